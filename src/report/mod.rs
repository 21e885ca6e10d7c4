// Everything the checker finds out ends up in a CheckReport, and everything
// that gets shown to a human is rendered from one here. The rendering
// functions are pure: they take outcomes and counters and hand back lines,
// and the caller decides where the lines go.
//
// Colors come from the colored crate. Whether they are actually emitted is
// colored's global decision (NO_COLOR, CLICOLOR_FORCE, a tty check, or an
// explicit override from --no-color), not ours.

use colored::Colorize;

const BOX_WIDTH: usize = 56;
const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Status {
    Present,
    OptionalMissing,
    RequiredMissing,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EntryKind {
    File,
    Directory,
}

#[derive(Debug, Clone)]
pub struct EntryOutcome {
    pub path: crate::path::EntryPath,
    pub kind: EntryKind,
    pub status: Status,

    // Why a missing entry is missing, when it's something more interesting
    // than "it isn't there".
    pub detail: Option<String>,
}

impl EntryOutcome {
    // The form that goes into the missing lists: directories get a trailing
    // slash.
    pub fn display_path(&self) -> String {
        match self.kind {
            EntryKind::File => self.path.to_string(),
            EntryKind::Directory => self.path.to_dir_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum CheckEvent {
    Section(String),
    Entry(EntryOutcome),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CheckReport {
    pub total_checked: u64,
    pub existing: u64,
    pub missing_required: u64,
    pub missing_optional: u64,
    pub skipped: u64,
    pub missing_required_list: Vec<String>,
    pub missing_optional_list: Vec<String>,
    pub skipped_list: Vec<String>,
    pub inaccessible_list: Vec<String>,
}

impl CheckReport {
    pub fn new() -> CheckReport {
        CheckReport {
            total_checked: 0u64,
            existing: 0u64,
            missing_required: 0u64,
            missing_optional: 0u64,
            skipped: 0u64,
            missing_required_list: Vec::new(),
            missing_optional_list: Vec::new(),
            skipped_list: Vec::new(),
            inaccessible_list: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: &EntryOutcome) {
        self.total_checked += 1u64;
        match outcome.status {
            Status::Present => {
                self.existing += 1u64;
            }
            Status::OptionalMissing => {
                self.missing_optional += 1u64;
                self.missing_optional_list.push(outcome.display_path());
            }
            Status::RequiredMissing => {
                self.missing_required += 1u64;
                self.missing_required_list.push(outcome.display_path());
            }
        }
    }

    pub fn record_inaccessible(&mut self, display_path: String) {
        self.inaccessible_list.push(display_path);
    }

    // Not probed at all, because its directory was missing.
    pub fn record_skipped(&mut self, path: &crate::path::EntryPath) {
        self.skipped += 1u64;
        self.skipped_list.push(path.to_string());
    }

    pub fn is_success(&self) -> bool {
        self.missing_required == 0u64
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0u8
        } else {
            1u8
        }
    }

    pub fn to_json(&self, structure: &crate::layout::ExpectedStructure) -> serde_json::Value {
        serde_json::json!({
            "structure": structure.title,
            "total_checked": self.total_checked,
            "existing": self.existing,
            "missing_required": self.missing_required,
            "missing_optional": self.missing_optional,
            "skipped": self.skipped,
            "missing_required_list": self.missing_required_list,
            "missing_optional_list": self.missing_optional_list,
            "skipped_list": self.skipped_list,
            "inaccessible_list": self.inaccessible_list,
            "success": self.is_success(),
            "exit_code": self.exit_code(),
        })
    }
}

pub fn marker(kind: EntryKind, status: Status) -> colored::ColoredString {
    match (kind, status) {
        (EntryKind::File, Status::Present) => "✅".green(),
        (EntryKind::File, Status::OptionalMissing) => "⚠️ ".yellow(),
        (EntryKind::File, Status::RequiredMissing) => "❌".red(),
        (EntryKind::Directory, Status::Present) => "📁".green(),
        (EntryKind::Directory, Status::OptionalMissing) => "📁".yellow(),
        (EntryKind::Directory, Status::RequiredMissing) => "📁".red(),
    }
}

pub fn entry_line(outcome: &EntryOutcome) -> String {
    let mut line: String = format!(
        "{} {}",
        marker(outcome.kind, outcome.status),
        outcome.display_path()
    );
    match (outcome.kind, outcome.status) {
        (_, Status::Present) => {}
        (_, Status::OptionalMissing) => {
            line.push_str(&format!(" {}", "(opcional - próxima etapa)".yellow()));
        }
        (EntryKind::File, Status::RequiredMissing) => {
            line.push_str(&format!(" {}", "(FALTANDO!)".red()));
        }
        (EntryKind::Directory, Status::RequiredMissing) => {
            line.push_str(&format!(" {}", "(DIRETÓRIO FALTANDO!)".red()));
        }
    }
    if let Some(ref detail) = outcome.detail {
        line.push_str(&format!(" [{}]", detail).as_str().dimmed().to_string());
    }
    line
}

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

pub fn section_lines(title: &str) -> Vec<String> {
    vec![
        String::new(),
        format!("📁 {}...", title).as_str().cyan().bold().to_string(),
        rule(),
    ]
}

// Columns a string takes up on a terminal. Emoji are two columns wide but
// one char, and the variation selector that some of them carry takes up
// none. Good enough for the banners below, which is all it's for.
fn display_width(s: &str) -> usize {
    s.chars()
        .map(|c: char| -> usize {
            match c as u32 {
                0xfe0f | 0x200d => 0,
                0x1f000..=0x1faff | 0x2600..=0x27bf => 2,
                _ => 1,
            }
        })
        .sum()
}

// Like {:^width$}, but counting columns instead of chars. Text that is
// already too wide is left alone.
fn pad_center(text: &str, width: usize) -> String {
    let used: usize = display_width(text);
    if used >= width {
        return text.to_string();
    }
    let left: usize = (width - used) / 2;
    let right: usize = width - used - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn boxed(text: &str, paint: fn(&str) -> colored::ColoredString) -> Vec<String> {
    let bar: String = "═".repeat(BOX_WIDTH);
    vec![
        paint(&format!("╔{}╗", bar)).bold().to_string(),
        paint(&format!("║{}║", pad_center(text, BOX_WIDTH))).bold().to_string(),
        paint(&format!("╚{}╝", bar)).bold().to_string(),
    ]
}

fn blue(s: &str) -> colored::ColoredString {
    s.blue()
}

fn green(s: &str) -> colored::ColoredString {
    s.green()
}

fn red(s: &str) -> colored::ColoredString {
    s.red()
}

pub fn title_lines(structure: &crate::layout::ExpectedStructure) -> Vec<String> {
    boxed(
        &format!("🔍 VERIFICAÇÃO DA ESTRUTURA - {}", structure.title),
        blue,
    )
}

pub fn summary_lines(
    report: &CheckReport,
    structure: &crate::layout::ExpectedStructure,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    lines.push(String::new());
    lines.extend(boxed("📊 RELATÓRIO FINAL", blue));

    lines.push(String::new());
    lines.push("📈 Estatísticas:".bold().to_string());
    lines.push(rule());
    lines.push(format!(
        "Total verificado: {} arquivos/diretórios",
        report.total_checked.to_string().as_str().bold()
    ));
    lines.push(format!(
        "✅ Existentes: {}",
        report.existing.to_string().as_str().green().bold()
    ));
    lines.push(format!(
        "❌ Faltando (obrigatórios): {}",
        report.missing_required.to_string().as_str().red().bold()
    ));
    lines.push(format!(
        "⚠️  Opcionais (próximas etapas): {}",
        report.missing_optional.to_string().as_str().yellow().bold()
    ));
    if report.skipped > 0u64 {
        lines.push(format!(
            "⏭️  Não verificados (diretório ausente): {}",
            report.skipped.to_string().as_str().dimmed()
        ));
    }

    if report.is_success() {
        lines.push(String::new());
        lines.extend(boxed("✅ ESTRUTURA COMPLETA E CORRETA! ✅", green));
        lines.extend(boxed("Todos os arquivos obrigatórios presentes!", green));
        lines.push(String::new());
        for hint in structure.success_hints {
            lines.push(hint.green().to_string());
        }
    } else {
        lines.push(String::new());
        lines.extend(boxed("❌ ARQUIVOS FALTANDO NA ESTRUTURA! ❌", red));
        lines.push(String::new());
        lines.push(
            "📋 Lista de arquivos/diretórios faltantes:"
                .red()
                .bold()
                .to_string(),
        );
        lines.push(rule());
        for missing in &report.missing_required_list {
            lines.push(format!("  • {}", missing).as_str().red().to_string());
        }
        if !report.inaccessible_list.is_empty() {
            lines.push(String::new());
            lines.push("🔒 Sem permissão de acesso:".yellow().to_string());
            for path in &report.inaccessible_list {
                lines.push(format!("  • {}", path).as_str().yellow().to_string());
            }
        }
        lines.push(String::new());
        for hint in structure.remediation_hints {
            lines.push(hint.yellow().to_string());
        }
    }
    lines
}

#[cfg(test)]
fn outcome(path: &str, kind: EntryKind, status: Status) -> EntryOutcome {
    EntryOutcome {
        path: path.into(),
        kind: kind,
        status: status,
        detail: None,
    }
}

#[test]
fn record_keeps_the_books_balanced() {
    let mut report: CheckReport = CheckReport::new();
    report.record(&outcome("README.md", EntryKind::File, Status::Present));
    report.record(&outcome("LICENSE", EntryKind::File, Status::RequiredMissing));
    report.record(&outcome("docs", EntryKind::Directory, Status::RequiredMissing));
    report.record(&outcome("apps/api", EntryKind::Directory, Status::OptionalMissing));

    assert_eq!(report.total_checked, 4u64);
    assert_eq!(report.existing, 1u64);
    assert_eq!(report.missing_required, 2u64);
    assert_eq!(report.missing_optional, 1u64);
    assert_eq!(
        report.total_checked,
        report.existing + report.missing_required + report.missing_optional
    );
    assert_eq!(report.missing_required_list, vec!["LICENSE", "docs/"]);
    assert_eq!(report.missing_optional_list, vec!["apps/api/"]);
}

#[test]
fn exit_code_ignores_optional() {
    let mut report: CheckReport = CheckReport::new();
    assert_eq!(report.exit_code(), 0u8);
    report.record(&outcome("apps/api", EntryKind::Directory, Status::OptionalMissing));
    assert_eq!(report.exit_code(), 0u8);
    report.record(&outcome("turbo.json", EntryKind::File, Status::RequiredMissing));
    assert_eq!(report.exit_code(), 1u8);
}

#[test]
fn skipped_is_outside_the_totals() {
    let mut report: CheckReport = CheckReport::new();
    report.record_skipped(&"docs/COMMANDS.md".into());
    assert_eq!(report.skipped, 1u64);
    assert_eq!(report.total_checked, 0u64);
    assert_eq!(report.skipped_list, vec!["docs/COMMANDS.md"]);
}

#[test]
fn entry_lines_say_what_is_wrong() {
    let line: String = entry_line(&outcome("LICENSE", EntryKind::File, Status::RequiredMissing));
    assert!(line.contains("LICENSE"));
    assert!(line.contains("FALTANDO!"));

    let line: String = entry_line(&outcome("docs", EntryKind::Directory, Status::RequiredMissing));
    assert!(line.contains("docs/"));
    assert!(line.contains("DIRETÓRIO FALTANDO!"));

    let line: String = entry_line(&outcome("apps/api", EntryKind::Directory, Status::OptionalMissing));
    assert!(line.contains("apps/api/"));
    assert!(line.contains("opcional"));

    let line: String = entry_line(&outcome("README.md", EntryKind::File, Status::Present));
    assert!(line.contains("README.md"));
    assert!(!line.contains("FALTANDO"));
}

#[test]
fn entry_line_carries_detail() {
    let mut o: EntryOutcome = outcome("scripts", EntryKind::Directory, Status::RequiredMissing);
    o.detail = Some("not a directory".to_string());
    assert!(entry_line(&o).contains("not a directory"));
}

#[test]
fn summary_on_success_has_hints() {
    let mut report: CheckReport = CheckReport::new();
    report.record(&outcome("README.md", EntryKind::File, Status::Present));
    let text: String = summary_lines(&report, &crate::layout::BAZARI).join("\n");
    assert!(text.contains("ESTRUTURA COMPLETA E CORRETA"));
    assert!(text.contains("pnpm dev"));
    assert!(!text.contains("Lista de arquivos"));
}

#[test]
fn summary_on_failure_lists_missing_in_order() {
    let mut report: CheckReport = CheckReport::new();
    report.record(&outcome("turbo.json", EntryKind::File, Status::RequiredMissing));
    report.record(&outcome("infra", EntryKind::Directory, Status::RequiredMissing));
    let text: String = summary_lines(&report, &crate::layout::BAZARI).join("\n");
    assert!(text.contains("ARQUIVOS FALTANDO NA ESTRUTURA"));
    let first: usize = text.find("• turbo.json").expect("turbo.json listed");
    let second: usize = text.find("• infra/").expect("infra/ listed");
    assert!(first < second);
    assert!(text.contains("pnpm setup"));
}

#[test]
fn json_has_counters_and_lists() {
    let mut report: CheckReport = CheckReport::new();
    report.record(&outcome("turbo.json", EntryKind::File, Status::RequiredMissing));
    report.record(&outcome("apps/api", EntryKind::Directory, Status::OptionalMissing));
    let v: serde_json::Value = report.to_json(&crate::layout::BAZARI);
    assert_eq!(v["total_checked"], 2);
    assert_eq!(v["missing_required"], 1);
    assert_eq!(v["missing_optional"], 1);
    assert_eq!(v["missing_required_list"][0], "turbo.json");
    assert_eq!(v["missing_optional_list"][0], "apps/api/");
    assert_eq!(v["exit_code"], 1);
    assert_eq!(v["success"], false);
}

#[test]
fn emoji_count_double() {
    assert_eq!(display_width("abc"), 3);
    assert_eq!(display_width("🔍 X"), 4);
    assert_eq!(display_width("✅ ok ❌"), 8);
    assert_eq!(display_width("⚠️"), 2);
}

#[test]
fn banner_text_lines_up_with_the_border() {
    for text in [
        "🔍 VERIFICAÇÃO DA ESTRUTURA - PROJETO BAZARI",
        "📊 RELATÓRIO FINAL",
        "✅ ESTRUTURA COMPLETA E CORRETA! ✅",
        "Todos os arquivos obrigatórios presentes!",
        "❌ ARQUIVOS FALTANDO NA ESTRUTURA! ❌",
    ] {
        let padded: String = pad_center(text, BOX_WIDTH);
        assert_eq!(display_width(&padded), BOX_WIDTH, "{}", text);
        assert!(padded.contains(text));
    }
}

#[test]
fn pad_center_leaves_wide_text_alone() {
    let wide: String = "x".repeat(BOX_WIDTH + 3);
    assert_eq!(pad_center(&wide, BOX_WIDTH), wide);
}
