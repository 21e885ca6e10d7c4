// Hex stuff... is there really nothing built in for this??

static HEX_DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];
pub fn hex_encode(buf: &[u8]) -> String {
    let mut s: String = String::with_capacity(buf.len() * 2);
    for i in buf {
        s.push(HEX_DIGITS[(i >> 4) as usize]);
        s.push(HEX_DIGITS[(i & 0xfu8) as usize]);
    }
    s
}

// For unit testing we want real trees on the real filesystem, since the
// whole point is stat()ing things. Each TempTree is a uniquely named
// directory under the system temp dir, and it cleans up after itself.
//
// Not test-only, because the binaries' tests need it too and they can't see
// the library's cfg(test) items. Panics on any I/O failure.
#[doc(hidden)]
pub struct TempTree {
    root: std::path::PathBuf,
}

impl TempTree {
    pub fn new() -> TempTree {
        let mut rng: rand::rngs::ThreadRng = rand::thread_rng();
        let mut uuid_buf: [u8; 16] = [0u8; 16];
        rand::RngCore::fill_bytes(&mut rng, &mut uuid_buf);

        let mut root: std::path::PathBuf = std::env::temp_dir();
        root.push(format!("structcheck-{}", hex_encode(&uuid_buf)));
        let root_for_panic: String = format!("{:?}", &root);
        std::fs::create_dir(&root).expect(&root_for_panic);
        TempTree { root: root }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.root
    }

    pub fn mkdir(&self, rel: &str) {
        let full: std::path::PathBuf = crate::path::EntryPath::from(rel).resolve(&self.root);
        let full_for_panic: String = format!("{:?}", &full);
        std::fs::create_dir_all(&full).expect(&full_for_panic);
    }

    // Creates any missing parents, too.
    pub fn touch(&self, rel: &str) {
        let full: std::path::PathBuf = crate::path::EntryPath::from(rel).resolve(&self.root);
        let full_for_panic: String = format!("{:?}", &full);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect(&full_for_panic);
        }
        std::fs::write(&full, b"").expect(&full_for_panic);
    }

    pub fn remove(&self, rel: &str) {
        let full: std::path::PathBuf = crate::path::EntryPath::from(rel).resolve(&self.root);
        let full_for_panic: String = format!("{:?}", &full);
        if full.is_dir() {
            std::fs::remove_dir_all(&full).expect(&full_for_panic);
        } else {
            std::fs::remove_file(&full).expect(&full_for_panic);
        }
    }

    // Everything required by the structure: root files, directories, and
    // every file nested under them. Optional directories are left out.
    pub fn populate(&self, structure: &crate::layout::ExpectedStructure) {
        for f in structure.root_files {
            self.touch(f);
        }
        for (dir, files) in structure.directories {
            self.mkdir(dir);
            for f in *files {
                self.touch(&format!("{}/{}", dir, f));
            }
        }
    }
}

impl Drop for TempTree {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

// An in-memory filesystem for tests that only care about the traversal.
// Anything not added is absent.
#[cfg(test)]
#[derive(Debug)]
pub struct FakeProbe {
    root: std::path::PathBuf,
    entries: std::collections::BTreeMap<std::path::PathBuf, crate::probe::Presence>,
    pub probes: std::cell::Cell<u64>,
}

#[cfg(test)]
impl FakeProbe {
    pub fn new(root: &std::path::Path) -> FakeProbe {
        FakeProbe {
            root: root.to_path_buf(),
            entries: std::collections::BTreeMap::new(),
            probes: std::cell::Cell::new(0u64),
        }
    }

    pub fn with(mut self, rel: &str, presence: crate::probe::Presence) -> FakeProbe {
        let full: std::path::PathBuf = crate::path::EntryPath::from(rel).resolve(&self.root);
        let _ = self.entries.insert(full, presence);
        self
    }

    pub fn with_file(self, rel: &str) -> FakeProbe {
        self.with(rel, crate::probe::Presence::File)
    }

    pub fn with_dir(self, rel: &str) -> FakeProbe {
        self.with(rel, crate::probe::Presence::Directory)
    }
}

#[cfg(test)]
impl crate::probe::Probe for FakeProbe {
    fn probe(&self, path: &std::path::Path) -> crate::probe::Presence {
        self.probes.set(self.probes.get() + 1u64);
        self.entries
            .get(path)
            .cloned()
            .unwrap_or(crate::probe::Presence::Absent)
    }
}

#[test]
fn hex_empty() {
    let v = Vec::<u8>::new();
    let s = hex_encode(&v);
    assert_eq!(s, "");
}

#[test]
fn hex_nonempty() {
    let v = vec![185u8, 74u8, 155u8, 38u8, 162u8];
    let s = hex_encode(&v);
    assert_eq!(s, "b94a9b26a2");
}

#[test]
fn temp_tree_cleans_up() {
    let root: std::path::PathBuf;
    {
        let tree = TempTree::new();
        tree.touch("a/b/c.txt");
        root = tree.path().to_path_buf();
        assert!(root.join("a").join("b").join("c.txt").is_file());
        tree.remove("a/b/c.txt");
        assert!(!root.join("a").join("b").join("c.txt").exists());
    }
    assert!(!root.exists());
}

#[test]
fn fake_probe_defaults_to_absent() {
    let root: std::path::PathBuf = std::path::PathBuf::from("fake-root");
    let probe: FakeProbe = FakeProbe::new(&root).with_dir("docs").with_file("docs/COMMANDS.md");
    assert_eq!(
        crate::probe::Probe::probe(&probe, &root.join("docs")),
        crate::probe::Presence::Directory
    );
    assert_eq!(
        crate::probe::Probe::probe(&probe, &root.join("docs").join("COMMANDS.md")),
        crate::probe::Presence::File
    );
    assert_eq!(
        crate::probe::Probe::probe(&probe, &root.join("README.md")),
        crate::probe::Presence::Absent
    );
    assert_eq!(probe.probes.get(), 3u64);
}
