// Checks that a project tree has everything the expected structure says it
// should, and says what's missing.
//
// Exit status: 0 if every required entry is there (missing optional
// directories don't matter), 1 if anything required is missing, 2 if we
// couldn't even get started (bad root, bad arguments).
//
// With --json, the per-entry lines and the human summary are replaced by a
// single JSON document on stdout. With --quiet, only the final summary is
// printed. Logging always goes to stderr.

mod ctx;

fn verify_main(
    ctx: &crate::ctx::Ctx,
    structure: &structcheck::layout::ExpectedStructure,
    out: &mut impl std::io::Write,
) -> Result<u8, structcheck::error::StructError> {
    let probe: structcheck::probe::FsProbe = structcheck::probe::FsProbe;

    if ctx.json {
        let report: structcheck::report::CheckReport =
            structcheck::checker::verify(&ctx.base_ctx.root, &probe, structure);
        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&report.to_json(structure))?
        )?;
        return Ok(report.exit_code());
    }

    if !ctx.quiet {
        ctx.print_lines(out, structcheck::report::title_lines(structure))?;
    }

    // The observer can't return an error, so hang on to the first write
    // failure and give up on printing after that.
    let mut write_result: Result<(), structcheck::error::StructError> = Ok(());
    let report: structcheck::report::CheckReport =
        structcheck::checker::Checker::new(&ctx.base_ctx.root, &probe).run_check(
            structure,
            |event: &structcheck::report::CheckEvent| {
                if write_result.is_ok() {
                    write_result = ctx.print_event(out, event);
                }
            },
        );
    write_result?;

    ctx.print_lines(out, structcheck::report::summary_lines(&report, structure))?;
    Ok(report.exit_code())
}

fn make_verify_cmdline_parser() -> clap::Command {
    structcheck::ctx::make_cmdline_parser("structcheck-verify")
        .arg(
            clap::Arg::new("json")
                .long("json")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("quiet")
                .long("quiet")
                .short('q')
                .conflicts_with("json")
                .action(clap::ArgAction::SetTrue),
        )
}

// Ok(None) means clap already printed --help or --version and there's
// nothing left to do.
fn parse_args<I, T>(args: I) -> Result<Option<clap::ArgMatches>, structcheck::error::StructError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match make_verify_cmdline_parser().try_get_matches_from(args) {
        Ok(m) => Ok(Some(m)),
        Err(e) => {
            if e.use_stderr() {
                return Err(e.to_string().into());
            }
            let _ = e.print();
            Ok(None)
        }
    }
}

fn run(
    cmdline_matches: &clap::ArgMatches,
    out: &mut impl std::io::Write,
) -> Result<u8, structcheck::error::StructError> {
    let ctx: crate::ctx::Ctx = crate::ctx::Ctx::new(cmdline_matches)?;
    ctx.base_ctx.apply_color_choice();
    tracing::debug!("root resolved to {:?}", &ctx.base_ctx.root);

    verify_main(&ctx, &structcheck::layout::BAZARI, out)
}

// Anything that stopped us before we got an answer is a 2, so it can't be
// confused with "something is missing".
fn exit_code(result: Result<u8, structcheck::error::StructError>) -> u8 {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("structcheck-verify: {}", e);
            2u8
        }
    }
}

fn real_main() -> Result<u8, structcheck::error::StructError> {
    let cmdline_matches: clap::ArgMatches = match parse_args(std::env::args_os())? {
        Some(m) => m,
        None => {
            return Ok(0u8);
        }
    };

    structcheck::ctx::init_logging(cmdline_matches.get_flag("verbose"))?;

    let stdout: std::io::Stdout = std::io::stdout();
    let mut out: std::io::StdoutLock = stdout.lock();
    run(&cmdline_matches, &mut out)
}

fn main() -> std::process::ExitCode {
    std::process::ExitCode::from(exit_code(real_main()))
}

#[cfg(test)]
fn run_with_args(args: &[&std::ffi::OsStr]) -> (u8, String) {
    let mut argv: Vec<std::ffi::OsString> = vec![
        std::ffi::OsString::from("structcheck-verify"),
        std::ffi::OsString::from("--no-color"),
    ];
    argv.extend(args.iter().map(|a: &&std::ffi::OsStr| a.to_os_string()));
    let matches: clap::ArgMatches = parse_args(argv).expect("parse").expect("not --help");
    let mut out: Vec<u8> = Vec::new();
    let code: u8 = exit_code(run(&matches, &mut out));
    (code, String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn empty_root_fails() {
    let tree = structcheck::util::TempTree::new();
    let (code, out): (u8, String) = run_with_args(&[tree.path().as_os_str()]);
    assert_eq!(code, 1u8);
    assert!(out.contains("VERIFICAÇÃO DA ESTRUTURA - PROJETO BAZARI"));
    assert!(out.contains("Verificando Arquivos de Configuração Raiz"));
    assert!(out.contains("package.json"));
    assert!(out.contains("RELATÓRIO FINAL"));
}

#[test]
fn complete_root_passes() {
    let tree = structcheck::util::TempTree::new();
    tree.populate(&structcheck::layout::BAZARI);
    let (code, out): (u8, String) = run_with_args(&[tree.path().as_os_str()]);
    assert_eq!(code, 0u8);
    assert!(out.contains("RELATÓRIO FINAL"));
}

#[test]
fn quiet_prints_only_the_summary() {
    let tree = structcheck::util::TempTree::new();
    let (code, out): (u8, String) =
        run_with_args(&[std::ffi::OsStr::new("--quiet"), tree.path().as_os_str()]);
    assert_eq!(code, 1u8);
    assert!(!out.contains("VERIFICAÇÃO DA ESTRUTURA"));
    assert!(!out.contains("Verificando"));
    assert!(out.contains("RELATÓRIO FINAL"));
}

#[test]
fn json_is_a_single_document() {
    let tree = structcheck::util::TempTree::new();
    tree.touch("package.json");
    let (code, out): (u8, String) =
        run_with_args(&[std::ffi::OsStr::new("--json"), tree.path().as_os_str()]);
    assert_eq!(code, 1u8);
    assert!(!out.contains("RELATÓRIO FINAL"));
    let doc: serde_json::Value = serde_json::from_str(&out).expect("json");
    for key in [
        "total_checked",
        "existing",
        "missing_required",
        "missing_optional",
        "missing_required_list",
        "missing_optional_list",
        "exit_code",
    ] {
        assert!(doc.get(key).is_some(), "{} missing from the json", key);
    }
    assert_eq!(doc["exit_code"], serde_json::json!(1));
    assert_eq!(doc["existing"], serde_json::json!(1));
}

#[test]
fn missing_root_exits_with_2() {
    let tree = structcheck::util::TempTree::new();
    let missing: std::path::PathBuf = tree.path().join("does-not-exist");
    let (code, out): (u8, String) = run_with_args(&[missing.as_os_str()]);
    assert_eq!(code, 2u8);
    assert!(out.is_empty());
}

#[test]
fn quiet_and_json_conflict() {
    let err: structcheck::error::StructError = parse_args(vec![
        "structcheck-verify",
        "--json",
        "--quiet",
    ])
    .unwrap_err();
    assert!(err.message.contains("--quiet") || err.message.contains("--json"));
}
