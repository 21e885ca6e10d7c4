use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug)]
pub struct Ctx {
    pub verbose: bool,
    pub color: bool,
    pub root: std::path::PathBuf,
}

pub fn make_cmdline_parser(argv0: &'static str) -> clap::Command {
    clap::Command::new(argv0)
        .color(clap::ColorChoice::Never)
        .arg(
            clap::Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("no_color")
                .long("no-color")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("root")
                .long("root")
                .env("STRUCTCHECK_ROOT")
                .value_parser(clap::value_parser!(std::path::PathBuf))
                .action(clap::ArgAction::Set),
        )
        .arg(
            clap::Arg::new("root_positional")
                .value_name("ROOT")
                .value_parser(clap::value_parser!(std::path::PathBuf))
                .action(clap::ArgAction::Set),
        )
}

// The one thing that is fatal: if we can't even find the root, there is
// nothing to check. The positional ROOT takes precedence over --root (and
// over STRUCTCHECK_ROOT, which feeds --root).
pub fn resolve_root(
    given: Option<&std::path::PathBuf>,
) -> Result<std::path::PathBuf, crate::error::StructError> {
    let raw: std::path::PathBuf = match given {
        Some(p) => p.clone(),
        None => std::env::current_dir().map_err(|e: std::io::Error| {
            crate::error::StructError::from(format!(
                "cannot determine the current directory: {}",
                e
            ))
        })?,
    };
    let resolved: std::path::PathBuf =
        std::fs::canonicalize(&raw).map_err(|e: std::io::Error| {
            crate::error::StructError::from(format!(
                "cannot resolve root {:?}: {}",
                &raw, e
            ))
        })?;
    if !resolved.is_dir() {
        return Err(format!("root {:?} is not a directory", &resolved).into());
    }
    Ok(resolved)
}

// Logs go to stderr so they never get mixed into the report (or the JSON)
// on stdout. RUST_LOG wins if it's set.
pub fn init_logging(verbose: bool) -> Result<(), crate::error::StructError> {
    let default_level: &str = if verbose { "debug" } else { "warn" };
    let filter: tracing_subscriber::EnvFilter =
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish()
        .try_init()?;
    Ok(())
}

impl Ctx {
    pub fn new(cmdline_matches: &clap::ArgMatches) -> Result<Ctx, crate::error::StructError> {
        let given: Option<&std::path::PathBuf> = cmdline_matches
            .get_one::<std::path::PathBuf>("root_positional")
            .or_else(|| cmdline_matches.get_one::<std::path::PathBuf>("root"));
        let no_color: bool = cmdline_matches.get_flag("no_color");

        Ok(Ctx {
            verbose: cmdline_matches.get_flag("verbose"),
            color: !no_color,
            root: resolve_root(given)?,
        })
    }

    // colored already honors NO_COLOR and CLICOLOR on its own; this is
    // only for --no-color.
    pub fn apply_color_choice(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

#[test]
fn parser_takes_root_flag() {
    let tree = crate::util::TempTree::new();
    let matches: clap::ArgMatches = make_cmdline_parser("structcheck-test")
        .try_get_matches_from(vec![
            std::ffi::OsString::from("structcheck-test"),
            std::ffi::OsString::from("--root"),
            tree.path().as_os_str().to_os_string(),
            std::ffi::OsString::from("--no-color"),
        ])
        .expect("parse");
    let ctx: Ctx = Ctx::new(&matches).expect("ctx");
    assert!(!ctx.color);
    assert!(!ctx.verbose);
    assert_eq!(
        ctx.root,
        std::fs::canonicalize(tree.path()).expect("canonicalize")
    );
}

#[test]
fn parser_takes_positional_root() {
    let tree = crate::util::TempTree::new();
    let matches: clap::ArgMatches = make_cmdline_parser("structcheck-test")
        .try_get_matches_from(vec![
            std::ffi::OsString::from("structcheck-test"),
            std::ffi::OsString::from("-v"),
            tree.path().as_os_str().to_os_string(),
        ])
        .expect("parse");
    let ctx: Ctx = Ctx::new(&matches).expect("ctx");
    assert!(ctx.verbose);
    assert!(ctx.color);
}

#[test]
fn positional_root_wins_over_flag() {
    let tree = crate::util::TempTree::new();
    tree.mkdir("inner");
    let matches: clap::ArgMatches = make_cmdline_parser("structcheck-test")
        .try_get_matches_from(vec![
            std::ffi::OsString::from("structcheck-test"),
            std::ffi::OsString::from("--root"),
            tree.path().as_os_str().to_os_string(),
            tree.path().join("inner").into_os_string(),
        ])
        .expect("parse");
    let ctx: Ctx = Ctx::new(&matches).expect("ctx");
    assert!(ctx.root.ends_with("inner"));
}

#[test]
fn missing_root_is_fatal() {
    let tree = crate::util::TempTree::new();
    let missing: std::path::PathBuf = tree.path().join("does-not-exist");
    let err: crate::error::StructError = resolve_root(Some(&missing)).unwrap_err();
    assert!(err.message.contains("cannot resolve root"));
}

#[test]
fn file_as_root_is_fatal() {
    let tree = crate::util::TempTree::new();
    tree.touch("package.json");
    let file: std::path::PathBuf = tree.path().join("package.json");
    let err: crate::error::StructError = resolve_root(Some(&file)).unwrap_err();
    assert!(err.message.contains("not a directory"));
}
