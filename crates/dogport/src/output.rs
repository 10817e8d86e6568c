//! Terminal output: progress banners and the final run report.

use std::io::{self, IsTerminal};
use std::path::Path;

use owo_colors::OwoColorize;
use tabled::{Table as TextTable, Tabled, settings::Style};

use dogport_core::{ExportProgress, RunReport, Table, TableOutcome, TableReport};

use crate::cli::ColorMode;

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Prints a banner as each table starts and a one-line summary when it ends.
pub struct Banners {
    color: bool,
    quiet: bool,
}

impl Banners {
    pub fn new(color: bool, quiet: bool) -> Self {
        Self { color, quiet }
    }

    fn paint(&self, text: &str, style: Tone) -> String {
        if !self.color {
            return text.to_owned();
        }
        match style {
            Tone::Heading => text.bold().to_string(),
            Tone::Good => text.green().to_string(),
            Tone::Warn => text.yellow().to_string(),
            Tone::Bad => text.red().bold().to_string(),
            Tone::Dim => text.dimmed().to_string(),
        }
    }

    pub fn started(&self, environment: &str, dir: &Path, host_prefix: &str) {
        if self.quiet {
            return;
        }
        println!(
            "Exporting environment {} to {}",
            self.paint(environment, Tone::Heading),
            self.paint(&dir.display().to_string(), Tone::Heading)
        );
        if !host_prefix.is_empty() {
            println!("Hosts limited to prefix {}", self.paint(host_prefix, Tone::Heading));
        }
    }

    pub fn finished(&self, dir: &Path, report: &RunReport) {
        if self.quiet {
            return;
        }
        if report.is_success() {
            println!(
                "{} Terraform written to {}",
                self.paint("✓", Tone::Good),
                self.paint(&dir.display().to_string(), Tone::Heading)
            );
        } else {
            println!(
                "{} export incomplete, output in {}",
                self.paint("✗", Tone::Bad),
                dir.display()
            );
        }
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Heading,
    Good,
    Warn,
    Bad,
    Dim,
}

impl ExportProgress for Banners {
    fn table_started(&mut self, table: Table) {
        if !self.quiet {
            println!(
                "{} {}",
                self.paint("==>", Tone::Dim),
                self.paint(&format!("exporting {table}"), Tone::Heading)
            );
        }
    }

    fn table_finished(&mut self, report: &TableReport) {
        if self.quiet {
            return;
        }
        let counts = format!(
            "{} emitted, {} skipped",
            report.rows_emitted, report.rows_skipped
        );
        let line = match &report.outcome {
            TableOutcome::Success => self.paint(&counts, Tone::Good),
            TableOutcome::PartialFailure => self.paint(
                &format!("{counts}, {} diagnostic(s)", report.diagnostics.len()),
                Tone::Warn,
            ),
            TableOutcome::Failed(err) => self.paint(&format!("failed: {err}"), Tone::Bad),
        };
        println!("    {line}");
    }
}

// ── Run report table ─────────────────────────────────────────────────

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Table")]
    table: String,
    #[tabled(rename = "Emitted")]
    emitted: String,
    #[tabled(rename = "Skipped")]
    skipped: String,
    #[tabled(rename = "Diagnostics")]
    diagnostics: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn status(outcome: &TableOutcome) -> &'static str {
    match outcome {
        TableOutcome::Success => "ok",
        TableOutcome::PartialFailure => "partial",
        TableOutcome::Failed(_) => "failed",
    }
}

/// The per-table summary, including tables never attempted.
pub fn render_report(report: &RunReport) -> String {
    let attempted = report.tables.iter().map(|t| ReportRow {
        table: t.table.to_string(),
        emitted: t.rows_emitted.to_string(),
        skipped: t.rows_skipped.to_string(),
        diagnostics: t.diagnostics.len().to_string(),
        status: status(&t.outcome).into(),
    });
    let skipped = report.not_attempted.iter().map(|t| ReportRow {
        table: t.to_string(),
        emitted: "-".into(),
        skipped: "-".into(),
        diagnostics: "-".into(),
        status: "not attempted".into(),
    });
    let rows: Vec<ReportRow> = attempted.chain(skipped).collect();
    TextTable::new(rows).with(Style::rounded()).to_string()
}

/// Print rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    println!("{output}");
}
