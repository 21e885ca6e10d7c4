#[derive(Debug, Clone, Eq, PartialEq, PartialOrd, Ord)]
pub struct EntryPath {
    pub components: Vec<String>,
}

// Paths in the expected-structure table are always written with '/' as the
// separator, no matter what platform we are running on. An EntryPath keeps
// them split into components so that resolving against a root can push one
// component at a time, and the host's separator gets used.
//
// Converting a string to an EntryPath and back must give back the same
// string. That holds for junk like "foo//bar" too; it just won't be
// canonical.

impl EntryPath {
    pub fn is_canonical(&self) -> bool {
        // If it's empty, it's not canonical.
        if self.components.is_empty() {
            return false;
        }

        // Empty components mean a leading, trailing or doubled slash. "."
        // and ".." would let the table point outside of (or back into) the
        // tree it is describing.
        for component in &self.components {
            if component.is_empty() || (component == ".") || (component == "..") {
                return false;
            }
            if component.contains('\0') || component.contains('\\') {
                return false;
            }
        }

        true
    }

    pub fn join(&self, child: &EntryPath) -> EntryPath {
        let mut joined: EntryPath = self.clone();
        joined.components.extend(child.components.iter().cloned());
        joined
    }

    pub fn resolve(&self, root: &std::path::Path) -> std::path::PathBuf {
        let mut full: std::path::PathBuf = root.to_path_buf();
        for component in &self.components {
            full.push(component);
        }
        full
    }

    // How a directory gets written in the missing lists.
    pub fn to_dir_string(&self) -> String {
        let mut s: String = self.to_string();
        s.push('/');
        s
    }
}

impl std::fmt::Display for EntryPath {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.components.join("/"))
    }
}

impl From<&str> for EntryPath {
    fn from(s: &str) -> EntryPath {
        EntryPath {
            components: s.split('/').map(String::from).collect(),
        }
    }
}

#[test]
fn nonempty() {
    let p: EntryPath = "a".into();
    assert_eq!(p.components, vec!(String::from("a")));
    assert_eq!(p.to_string(), "a");
}

#[test]
fn two_components() {
    let p: EntryPath = "apps/web".into();
    assert_eq!(
        p.components,
        vec!(String::from("apps"), String::from("web"))
    );
    assert_eq!(p.to_string(), "apps/web");
}

#[test]
fn funky_paths_survive_the_round_trip() {
    for s in ["", "/", "/foo/bar", "foo/bar/", "foo//bar"] {
        let p: EntryPath = s.into();
        assert_eq!(p.to_string(), s);
    }
}

#[test]
fn empty_is_not_canonical() {
    let p: EntryPath = "".into();
    assert!(!p.is_canonical());
    let p: EntryPath = EntryPath {
        components: Vec::new(),
    };
    assert!(!p.is_canonical());
}

#[test]
fn slashes_in_the_wrong_places_are_not_canonical() {
    for s in ["/foo/bar", "foo/bar/", "foo//bar", "foo\\bar"] {
        let p: EntryPath = s.into();
        assert!(!p.is_canonical(), "{} should not be canonical", s);
    }
}

#[test]
fn dots_are_not_canonical() {
    let p: EntryPath = "foo/./bar".into();
    assert!(!p.is_canonical());
    let p: EntryPath = "foo/../bar".into();
    assert!(!p.is_canonical());
}

#[test]
fn dotfiles_are_canonical() {
    let p: EntryPath = ".github/workflows".into();
    assert!(p.is_canonical());
    let p: EntryPath = ".env.example".into();
    assert!(p.is_canonical());
}

#[test]
fn join_appends_components() {
    let dir: EntryPath = "apps/web/src".into();
    let file: EntryPath = "main.tsx".into();
    let joined: EntryPath = dir.join(&file);
    assert_eq!(joined.to_string(), "apps/web/src/main.tsx");
    assert!(joined.is_canonical());
}

#[test]
fn resolve_uses_host_separator() {
    let p: EntryPath = "infra/ipfs/swarm.key".into();
    let root: std::path::PathBuf = std::path::PathBuf::from("some").join("root");
    let expected: std::path::PathBuf = root.join("infra").join("ipfs").join("swarm.key");
    assert_eq!(p.resolve(&root), expected);
}

#[test]
fn dir_string_has_trailing_slash() {
    let p: EntryPath = ".vscode".into();
    assert_eq!(p.to_dir_string(), ".vscode/");
}
