// ── Run report ──
//
// Per-table results aggregated by the exporter. Row-level problems are
// diagnostics and leave the table usable; API and I/O errors fail the
// whole table.

use std::fmt;

use crate::error::CoreError;
use crate::model::EntityId;
use crate::sanitize::ClaimError;
use crate::table::Table;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The row was not emitted.
    Rejected(ClaimError),
    /// The row was emitted under a disambiguated identifier.
    Renamed { from: String, to: String },
    /// The row was emitted under an identifier an earlier row also uses.
    Shared { ident: String, first: EntityId },
}

/// A row-level problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub id: EntityId,
    pub name: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// `true` when the row was dropped from the output.
    pub fn is_error(&self) -> bool {
        matches!(self.kind, DiagnosticKind::Rejected(_))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({}): ", self.name, self.id)?;
        match &self.kind {
            DiagnosticKind::Rejected(err) => write!(f, "skipped, {err}"),
            DiagnosticKind::Renamed { from, to } => {
                write!(f, "emitted as '{to}' instead of '{from}'")
            }
            DiagnosticKind::Shared { ident, first } => {
                write!(f, "identifier '{ident}' shared with {first}")
            }
        }
    }
}

#[derive(Debug)]
pub enum TableOutcome {
    Success,
    /// Some rows were dropped; see the diagnostics.
    PartialFailure,
    Failed(CoreError),
}

#[derive(Debug)]
pub struct TableReport {
    pub table: Table,
    pub rows_emitted: usize,
    /// Rows not emitted: system-owned, filtered out, or rejected.
    pub rows_skipped: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub outcome: TableOutcome,
}

impl TableReport {
    pub(crate) fn new(table: Table) -> Self {
        Self {
            table,
            rows_emitted: 0,
            rows_skipped: 0,
            diagnostics: Vec::new(),
            outcome: TableOutcome::Success,
        }
    }

    pub(crate) fn complete(mut self) -> Self {
        self.outcome = if self.diagnostics.iter().any(Diagnostic::is_error) {
            TableOutcome::PartialFailure
        } else {
            TableOutcome::Success
        };
        self
    }

    pub(crate) fn failed(mut self, error: CoreError) -> Self {
        self.outcome = TableOutcome::Failed(error);
        self
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, TableOutcome::Failed(_))
    }

    pub fn error(&self) -> Option<&CoreError> {
        match &self.outcome {
            TableOutcome::Failed(err) => Some(err),
            TableOutcome::Success | TableOutcome::PartialFailure => None,
        }
    }
}

/// Everything the exporter did in one run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Attempted tables, in export order.
    pub tables: Vec<TableReport>,
    /// Tables left out after an earlier failure.
    pub not_attempted: Vec<Table>,
}

impl RunReport {
    /// Every table attempted and none of them failed or dropped rows.
    pub fn is_success(&self) -> bool {
        self.not_attempted.is_empty()
            && self
                .tables
                .iter()
                .all(|t| matches!(t.outcome, TableOutcome::Success))
    }

    /// The first table-level error, if any.
    pub fn first_error(&self) -> Option<(Table, &CoreError)> {
        self.tables
            .iter()
            .find_map(|t| t.error().map(|e| (t.table, e)))
    }

    /// Consume the report, keeping only the first table-level error.
    pub fn into_first_error(self) -> Option<(Table, CoreError)> {
        self.tables.into_iter().find_map(|t| match t.outcome {
            TableOutcome::Failed(err) => Some((t.table, err)),
            TableOutcome::Success | TableOutcome::PartialFailure => None,
        })
    }

    pub fn table(&self, table: Table) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.table == table)
    }
}
