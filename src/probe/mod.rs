#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Presence {
    File,
    Directory,

    // Exists, but is neither a regular file nor a directory (a fifo, a
    // socket, a device...). Good enough for a file check, not for a
    // directory check.
    Other,

    Absent,

    // Something is in the way of finding out, e.g. permission denied on a
    // parent directory. Counted as missing, but worth telling apart.
    Inaccessible(String),
}

impl Presence {
    pub fn exists(&self) -> bool {
        matches!(self, Presence::File | Presence::Directory | Presence::Other)
    }
}

pub trait Probe {
    fn probe(&self, path: &std::path::Path) -> Presence;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl Probe for FsProbe {
    fn probe(&self, path: &std::path::Path) -> Presence {
        // Follows symlinks, like Path::exists() does. A dangling symlink
        // is absent.
        match std::fs::metadata(path) {
            Ok(metadata) => {
                let file_type: std::fs::FileType = metadata.file_type();
                if file_type.is_dir() {
                    Presence::Directory
                } else if file_type.is_file() {
                    Presence::File
                } else {
                    Presence::Other
                }
            }
            // ENOTDIR: some parent along the way is a plain file, so the
            // thing we asked about can't be there either.
            Err(err) => match err.kind() {
                std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory => Presence::Absent,
                _ => Presence::Inaccessible(err.to_string()),
            },
        }
    }
}

#[test]
fn fs_probe_sees_files_and_dirs() {
    let tree = crate::util::TempTree::new();
    tree.mkdir("sub");
    tree.touch("sub/file.txt");

    assert_eq!(FsProbe.probe(tree.path()), Presence::Directory);
    assert_eq!(FsProbe.probe(&tree.path().join("sub")), Presence::Directory);
    assert_eq!(
        FsProbe.probe(&tree.path().join("sub").join("file.txt")),
        Presence::File
    );
    assert_eq!(
        FsProbe.probe(&tree.path().join("nope")),
        Presence::Absent
    );
}

#[test]
fn file_in_the_middle_means_absent() {
    let tree = crate::util::TempTree::new();
    tree.touch("apps");
    assert_eq!(
        FsProbe.probe(&tree.path().join("apps").join("web")),
        Presence::Absent
    );
}

#[test]
fn presence_predicates() {
    assert!(Presence::File.exists());
    assert!(Presence::Other.exists());
    assert!(Presence::Directory.exists());
    assert!(!Presence::Absent.exists());
    assert!(!Presence::Inaccessible("denied".to_string()).exists());
}
