// The expected structure is plain data. Nothing in here knows how to walk
// it; that is the checker's job. Order matters though: it is the order
// entries get checked and reported in, and the order the missing lists come
// out in.

#[derive(Debug)]
pub struct ExpectedStructure {
    pub title: &'static str,
    pub root_files: &'static [&'static str],
    pub directories: &'static [(&'static str, &'static [&'static str])],
    pub optional_directories: &'static [&'static str],
    pub success_hints: &'static [&'static str],
    pub remediation_hints: &'static [&'static str],
}

impl ExpectedStructure {
    pub fn nested_file_count(&self) -> usize {
        self.directories
            .iter()
            .map(|(_, files): &(&'static str, &'static [&'static str])| files.len())
            .sum()
    }

    // Everything whose absence fails the run, if every directory were
    // present so that all the nested files got checked too.
    pub fn required_entry_count(&self) -> usize {
        self.root_files.len() + self.directories.len() + self.nested_file_count()
    }
}

// The Bazari monorepo, as of the end of its second milestone. The optional
// directories are the ones the next milestones are going to add.
pub static BAZARI: ExpectedStructure = ExpectedStructure {
    title: "PROJETO BAZARI",
    root_files: &[
        "package.json",
        "pnpm-workspace.yaml",
        "turbo.json",
        "tsconfig.base.json",
        ".env.example",
        ".gitignore",
        ".prettierrc",
        ".eslintrc.json",
        ".lintstagedrc.js",
        "Makefile",
        "README.md",
        "LICENSE",
        "CONTRIBUTING.md",
        "QUICKSTART.md",
    ],
    directories: &[
        (".vscode", &["extensions.json", "settings.json"]),
        (".github/workflows", &["ci.yml"]),
        (".husky", &["pre-commit"]),
        (
            "apps/web",
            &[
                "package.json",
                "vite.config.ts",
                "tailwind.config.js",
                "postcss.config.js",
                "tsconfig.json",
                "tsconfig.node.json",
                "index.html",
            ],
        ),
        (
            "apps/web/public",
            &["bazari-logo.svg", "manifest.json", "robots.txt"],
        ),
        ("apps/web/src", &["index.css", "main.tsx", "App.tsx"]),
        (
            "apps/web/src/pages",
            &["Landing.tsx", "Auth.tsx", "Wallet.tsx"],
        ),
        ("apps/web/src/components", &["Loading.tsx", "Layout.tsx"]),
        (
            "apps/web/src/components/ui",
            &["button.tsx", "card.tsx", "dropdown-menu.tsx", "tabs.tsx"],
        ),
        (
            "apps/web/src/components/wallet",
            &[
                "WalletBalance.tsx",
                "WalletConnect.tsx",
                "TransactionHistory.tsx",
                "SendModal.tsx",
                "ReceiveModal.tsx",
                "AccountManager.tsx",
            ],
        ),
        (
            "apps/web/src/hooks",
            &[
                "index.ts",
                "useLocalStorage.ts",
                "useMediaQuery.ts",
                "useOnClickOutside.ts",
                "useDebounce.ts",
                "useCopyToClipboard.ts",
                "useWallet.ts",
            ],
        ),
        ("apps/web/src/lib", &["i18n.ts", "utils.ts"]),
        ("apps/web/src/store", &["index.ts", "auth.ts", "wallet.ts"]),
        ("apps/web/src/locales/pt-BR", &["common.json"]),
        ("apps/web/src/locales/en-US", &["common.json"]),
        ("apps/web/src/locales/es-ES", &["common.json"]),
        (
            "packages/wallet-core",
            &["package.json", "tsup.config.ts", "tsconfig.json"],
        ),
        ("packages/wallet-core/src", &["index.ts", "crypto.ts"]),
        (
            "infra",
            &["docker-compose.dev.yml", "docker-compose.prod.yml"],
        ),
        ("infra/ipfs", &["config.template.json", "swarm.key"]),
        (
            "scripts",
            &[
                "setup.sh",
                "setup.ps1",
                "clean.sh",
                "fix-wasm.sh",
                "check-structure.sh",
                "check-structure.py",
                "check-structure.js",
            ],
        ),
        ("docs", &["COMMANDS.md", "ETAPA2-COMPLETED.md"]),
    ],
    optional_directories: &[
        "apps/api",
        "apps/bazari-chain",
        "apps/studio",
        "packages/chain-client",
        "packages/ipfs-client",
        "packages/ui-kit",
        "packages/schemas",
        "packages/dsl",
        "infra/kubernetes",
    ],
    success_hints: &[
        "🎉 Projeto pronto para desenvolvimento!",
        "🚀 Execute 'pnpm dev' para iniciar",
    ],
    remediation_hints: &[
        "💡 Dica: Execute os scripts de setup para criar os arquivos faltantes",
        "   ./scripts/setup.sh (Linux/Mac) ou scripts\\setup.ps1 (Windows)",
        "   Ou use: pnpm setup",
    ],
};

#[test]
fn bazari_counts() {
    assert_eq!(BAZARI.root_files.len(), 14);
    assert_eq!(BAZARI.directories.len(), 22);
    assert_eq!(BAZARI.optional_directories.len(), 9);
    assert_eq!(BAZARI.nested_file_count(), 65);
    assert_eq!(BAZARI.required_entry_count(), 14 + 22 + 65);
}

#[test]
fn bazari_paths_are_canonical() {
    let mut all: Vec<crate::path::EntryPath> = Vec::new();
    for f in BAZARI.root_files {
        all.push((*f).into());
    }
    for (dir, files) in BAZARI.directories {
        let dir_path: crate::path::EntryPath = (*dir).into();
        for f in *files {
            all.push(dir_path.join(&(*f).into()));
        }
        all.push(dir_path);
    }
    for dir in BAZARI.optional_directories {
        all.push((*dir).into());
    }
    for p in &all {
        assert!(p.is_canonical(), "{} is not canonical", p);
    }
}

#[test]
fn bazari_has_no_duplicate_directories() {
    let mut seen: std::collections::BTreeSet<&str> = std::collections::BTreeSet::new();
    for (dir, _) in BAZARI.directories {
        assert!(seen.insert(*dir), "{} listed twice", dir);
    }
    for dir in BAZARI.optional_directories {
        assert!(seen.insert(*dir), "{} is both required and optional", dir);
    }
}
