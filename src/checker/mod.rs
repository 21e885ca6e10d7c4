// One pass over an ExpectedStructure, in table order:
//   1. root files (required)
//   2. each directory, and then, only if the directory is there, each file
//      in it (required). Files under a missing directory are not probed;
//      they go on the skipped list.
//   3. optional directories. Their contents are never looked at.
//
// Nothing stops early. Every missing entry is collected and the verdict is
// made at the end, from the report.
//
// Every probed entry counts once towards total_checked, directories
// included, so total_checked == existing + missing_required +
// missing_optional always.
//
// The checker never prints. Whoever runs it passes an observer that gets a
// CheckEvent for every section and every entry, in order.

use crate::report::{CheckEvent, EntryKind, EntryOutcome, Status};

pub struct Checker<'a, P: crate::probe::Probe> {
    root: &'a std::path::Path,
    probe: &'a P,
    report: crate::report::CheckReport,
}

impl<'a, P: crate::probe::Probe> Checker<'a, P> {
    pub fn new(root: &'a std::path::Path, probe: &'a P) -> Checker<'a, P> {
        Checker {
            root: root,
            probe: probe,
            report: crate::report::CheckReport::new(),
        }
    }

    pub fn report(&self) -> &crate::report::CheckReport {
        &self.report
    }

    pub fn into_report(self) -> crate::report::CheckReport {
        self.report
    }

    fn missing_status(optional: bool) -> Status {
        if optional {
            Status::OptionalMissing
        } else {
            Status::RequiredMissing
        }
    }

    fn finish<F>(&mut self, outcome: EntryOutcome, observer: &mut F) -> bool
    where
        F: FnMut(&CheckEvent),
    {
        self.report.record(&outcome);
        let present: bool = outcome.status == Status::Present;
        observer(&CheckEvent::Entry(outcome));
        present
    }

    fn note_inaccessible(&mut self, display_path: String, why: &str) {
        tracing::warn!("cannot access {}: {}", display_path, why);
        self.report.record_inaccessible(display_path);
    }

    // Any kind of entry will do.
    pub fn check_file<F>(&mut self, rel: &crate::path::EntryPath, optional: bool, observer: &mut F) -> bool
    where
        F: FnMut(&CheckEvent),
    {
        let full: std::path::PathBuf = rel.resolve(self.root);
        let presence: crate::probe::Presence = self.probe.probe(&full);
        tracing::debug!("probed {:?}: {:?}", &full, &presence);

        let mut outcome: EntryOutcome = EntryOutcome {
            path: rel.clone(),
            kind: EntryKind::File,
            status: Status::Present,
            detail: None,
        };
        if let crate::probe::Presence::Inaccessible(ref why) = presence {
            outcome.status = Self::missing_status(optional);
            outcome.detail = Some(format!("inaccessible: {}", why));
            self.note_inaccessible(outcome.display_path(), why);
        } else if !presence.exists() {
            outcome.status = Self::missing_status(optional);
        }
        self.finish(outcome, observer)
    }

    // Has to exist and has to be a directory.
    pub fn check_directory<F>(&mut self, rel: &crate::path::EntryPath, optional: bool, observer: &mut F) -> bool
    where
        F: FnMut(&CheckEvent),
    {
        let full: std::path::PathBuf = rel.resolve(self.root);
        let presence: crate::probe::Presence = self.probe.probe(&full);
        tracing::debug!("probed {:?}: {:?}", &full, &presence);

        let mut outcome: EntryOutcome = EntryOutcome {
            path: rel.clone(),
            kind: EntryKind::Directory,
            status: Status::Present,
            detail: None,
        };
        match presence {
            crate::probe::Presence::Directory => {}
            crate::probe::Presence::Inaccessible(ref why) => {
                outcome.status = Self::missing_status(optional);
                outcome.detail = Some(format!("inaccessible: {}", why));
                self.note_inaccessible(outcome.display_path(), why);
            }
            crate::probe::Presence::Absent => {
                outcome.status = Self::missing_status(optional);
            }
            crate::probe::Presence::File | crate::probe::Presence::Other => {
                outcome.status = Self::missing_status(optional);
                outcome.detail = Some("not a directory".to_string());
            }
        }
        self.finish(outcome, observer)
    }

    pub fn run_check<F>(
        mut self,
        structure: &crate::layout::ExpectedStructure,
        mut observer: F,
    ) -> crate::report::CheckReport
    where
        F: FnMut(&CheckEvent),
    {
        tracing::info!("verifying {} under {:?}", structure.title, self.root);

        observer(&CheckEvent::Section(
            "Verificando Arquivos de Configuração Raiz".to_string(),
        ));
        for f in structure.root_files {
            let _ = self.check_file(&(*f).into(), false, &mut observer);
        }

        for (dir, files) in structure.directories {
            observer(&CheckEvent::Section(format!("Verificando {}", dir)));
            let dir_path: crate::path::EntryPath = (*dir).into();
            let dir_present: bool = self.check_directory(&dir_path, false, &mut observer);
            for f in *files {
                let file_path: crate::path::EntryPath = dir_path.join(&(*f).into());
                if dir_present {
                    let _ = self.check_file(&file_path, false, &mut observer);
                } else {
                    self.report.record_skipped(&file_path);
                }
            }
        }

        observer(&CheckEvent::Section(
            "Verificando Estruturas para Próximas Etapas".to_string(),
        ));
        for dir in structure.optional_directories {
            let _ = self.check_directory(&(*dir).into(), true, &mut observer);
        }

        tracing::info!(
            "checked {} entries: {} present, {} required missing, {} optional missing, {} skipped",
            self.report.total_checked,
            self.report.existing,
            self.report.missing_required,
            self.report.missing_optional,
            self.report.skipped
        );
        self.into_report()
    }
}

// For callers that only want the verdict.
pub fn verify<P: crate::probe::Probe>(
    root: &std::path::Path,
    probe: &P,
    structure: &crate::layout::ExpectedStructure,
) -> crate::report::CheckReport {
    Checker::new(root, probe).run_check(structure, |_: &CheckEvent| {})
}

#[cfg(test)]
static TINY: crate::layout::ExpectedStructure = crate::layout::ExpectedStructure {
    title: "TINY",
    root_files: &["README.md", "LICENSE"],
    directories: &[
        ("docs", &["COMMANDS.md", "ETAPA2-COMPLETED.md"]),
        ("infra/ipfs", &["swarm.key"]),
    ],
    optional_directories: &["apps/api", "packages/dsl"],
    success_hints: &["ok"],
    remediation_hints: &["fix it"],
};

#[cfg(test)]
fn fake_root() -> std::path::PathBuf {
    std::path::PathBuf::from("fake-root")
}

#[test]
fn check_file_present_counts_once() {
    let root = fake_root();
    let probe = crate::util::FakeProbe::new(&root).with_file("README.md");
    let mut checker = Checker::new(&root, &probe);
    let mut events: Vec<CheckEvent> = Vec::new();
    let mut observer = |e: &CheckEvent| events.push(e.clone());

    assert!(checker.check_file(&"README.md".into(), false, &mut observer));
    assert_eq!(checker.report().existing, 1u64);
    assert_eq!(checker.report().total_checked, 1u64);
    assert!(checker.report().missing_required_list.is_empty());
    assert_eq!(events.len(), 1);
}

#[test]
fn check_file_absent_records_path_once_in_order() {
    let root = fake_root();
    let probe = crate::util::FakeProbe::new(&root);
    let mut checker = Checker::new(&root, &probe);
    let mut observer = |_: &CheckEvent| {};

    assert!(!checker.check_file(&"turbo.json".into(), false, &mut observer));
    assert!(!checker.check_file(&"Makefile".into(), false, &mut observer));
    assert_eq!(checker.report().missing_required, 2u64);
    assert_eq!(
        checker.report().missing_required_list,
        vec!["turbo.json", "Makefile"]
    );
}

#[test]
fn optional_absence_leaves_required_alone() {
    let root = fake_root();
    let probe = crate::util::FakeProbe::new(&root);
    let mut checker = Checker::new(&root, &probe);
    let mut observer = |_: &CheckEvent| {};

    assert!(!checker.check_directory(&"apps/api".into(), true, &mut observer));
    assert_eq!(checker.report().missing_optional, 1u64);
    assert_eq!(checker.report().missing_required, 0u64);
    assert_eq!(checker.report().missing_optional_list, vec!["apps/api/"]);
    assert_eq!(checker.report().exit_code(), 0u8);
}

#[test]
fn file_where_directory_expected_is_missing() {
    let root = fake_root();
    let probe = crate::util::FakeProbe::new(&root).with_file("docs");
    let mut checker = Checker::new(&root, &probe);
    let mut events: Vec<CheckEvent> = Vec::new();
    let mut observer = |e: &CheckEvent| events.push(e.clone());

    assert!(!checker.check_directory(&"docs".into(), false, &mut observer));
    assert_eq!(checker.report().missing_required_list, vec!["docs/"]);
    match &events[0] {
        CheckEvent::Entry(outcome) => {
            assert_eq!(outcome.detail.as_deref(), Some("not a directory"));
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn inaccessible_counts_as_missing_and_is_noted() {
    let root = fake_root();
    let probe = crate::util::FakeProbe::new(&root).with(
        "LICENSE",
        crate::probe::Presence::Inaccessible("permission denied".to_string()),
    );
    let mut checker = Checker::new(&root, &probe);
    let mut observer = |_: &CheckEvent| {};

    assert!(!checker.check_file(&"LICENSE".into(), false, &mut observer));
    assert_eq!(checker.report().missing_required_list, vec!["LICENSE"]);
    assert_eq!(checker.report().inaccessible_list, vec!["LICENSE"]);
}

#[test]
fn everything_present_except_optionals() {
    let root = fake_root();
    let probe = crate::util::FakeProbe::new(&root)
        .with_file("README.md")
        .with_file("LICENSE")
        .with_dir("docs")
        .with_file("docs/COMMANDS.md")
        .with_file("docs/ETAPA2-COMPLETED.md")
        .with_dir("infra/ipfs")
        .with_file("infra/ipfs/swarm.key");
    let report = verify(&root, &probe, &TINY);

    assert_eq!(report.exit_code(), 0u8);
    assert_eq!(report.missing_required, 0u64);
    assert_eq!(report.missing_optional, 2u64);
    assert_eq!(report.existing, 2u64 + 2u64 + 3u64);
    assert_eq!(report.total_checked, 9u64);
    assert_eq!(
        report.total_checked,
        report.existing + report.missing_required + report.missing_optional
    );
}

#[test]
fn nothing_present() {
    let root = fake_root();
    let probe = crate::util::FakeProbe::new(&root);
    let report = verify(&root, &probe, &TINY);

    assert_eq!(report.exit_code(), 1u8);
    assert_eq!(report.missing_required, 4u64);
    assert_eq!(
        report.missing_required_list,
        vec!["README.md", "LICENSE", "docs/", "infra/ipfs/"]
    );
    assert_eq!(
        report.skipped_list,
        vec![
            "docs/COMMANDS.md",
            "docs/ETAPA2-COMPLETED.md",
            "infra/ipfs/swarm.key"
        ]
    );
    // Files under missing directories are never probed.
    assert_eq!(probe.probes.get(), 2u64 + 2u64 + 2u64);
}

#[test]
fn events_come_in_table_order() {
    let root = fake_root();
    let probe = crate::util::FakeProbe::new(&root).with_dir("docs");
    let mut seen: Vec<String> = Vec::new();
    let _ = Checker::new(&root, &probe).run_check(&TINY, |e: &CheckEvent| match e {
        CheckEvent::Section(title) => seen.push(format!("# {}", title)),
        CheckEvent::Entry(outcome) => seen.push(outcome.display_path()),
    });
    assert_eq!(
        seen,
        vec![
            "# Verificando Arquivos de Configuração Raiz",
            "README.md",
            "LICENSE",
            "# Verificando docs",
            "docs/",
            "docs/COMMANDS.md",
            "docs/ETAPA2-COMPLETED.md",
            "# Verificando infra/ipfs",
            "infra/ipfs/",
            "# Verificando Estruturas para Próximas Etapas",
            "apps/api/",
            "packages/dsl/",
        ]
    );
}

#[test]
fn full_bazari_tree_on_disk() {
    let tree = crate::util::TempTree::new();
    tree.populate(&crate::layout::BAZARI);
    let report = verify(tree.path(), &crate::probe::FsProbe, &crate::layout::BAZARI);

    assert_eq!(report.exit_code(), 0u8);
    assert_eq!(report.missing_required, 0u64);
    assert_eq!(
        report.missing_optional,
        crate::layout::BAZARI.optional_directories.len() as u64
    );
    assert_eq!(
        report.existing,
        crate::layout::BAZARI.required_entry_count() as u64
    );
    assert_eq!(report.skipped, 0u64);
}

#[test]
fn empty_directory_on_disk() {
    let tree = crate::util::TempTree::new();
    let report = verify(tree.path(), &crate::probe::FsProbe, &crate::layout::BAZARI);
    let bazari = &crate::layout::BAZARI;

    assert_eq!(report.exit_code(), 1u8);
    assert_eq!(
        report.missing_required,
        (bazari.root_files.len() + bazari.directories.len()) as u64
    );
    assert_eq!(report.skipped, bazari.nested_file_count() as u64);
    for f in bazari.root_files {
        assert!(report.missing_required_list.contains(&f.to_string()));
    }
    for (dir, _) in bazari.directories {
        assert!(report.missing_required_list.contains(&format!("{}/", dir)));
    }
    assert_eq!(
        report.missing_optional,
        bazari.optional_directories.len() as u64
    );
}

#[test]
fn one_nested_file_missing_on_disk() {
    let tree = crate::util::TempTree::new();
    tree.populate(&crate::layout::BAZARI);
    tree.remove("apps/web/src/hooks/useDebounce.ts");
    let mut dir_seen_present: bool = false;
    let report = Checker::new(tree.path(), &crate::probe::FsProbe).run_check(
        &crate::layout::BAZARI,
        |e: &CheckEvent| {
            if let CheckEvent::Entry(outcome) = e {
                if outcome.display_path() == "apps/web/src/hooks/" {
                    dir_seen_present = outcome.status == Status::Present;
                }
            }
        },
    );

    assert_eq!(report.exit_code(), 1u8);
    assert!(dir_seen_present);
    assert_eq!(
        report.missing_required_list,
        vec!["apps/web/src/hooks/useDebounce.ts"]
    );
}

#[test]
fn running_twice_gives_the_same_answer() {
    let tree = crate::util::TempTree::new();
    tree.populate(&crate::layout::BAZARI);
    tree.remove("docs");
    tree.remove("LICENSE");
    let first = verify(tree.path(), &crate::probe::FsProbe, &crate::layout::BAZARI);
    let second = verify(tree.path(), &crate::probe::FsProbe, &crate::layout::BAZARI);
    assert_eq!(first, second);
    assert_eq!(first.missing_required_list, vec!["LICENSE", "docs/"]);
}
