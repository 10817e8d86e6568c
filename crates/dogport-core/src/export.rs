// ── Export driver ──
//
// Walks the tables in dependency order. Each table is one list call, one
// pass over the rows, and one flush of its two streams. Tables run strictly
// one after another: later tables resolve references through identifiers
// recorded by earlier ones.

use std::future::Future;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::import::import_block;
use crate::model::Host;
use crate::render::{Render, render_resource};
use crate::report::{Diagnostic, DiagnosticKind, RunReport, TableReport};
use crate::resolve::AddressBook;
use crate::sanitize::{Claim, CollisionPolicy, IdentifierRegistry, validate_identifier};
use crate::source::DogApi;
use crate::table::{Table, export_order};
use crate::writer::TableSink;

/// What happens to the rest of the run once a table fails.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first failed table.
    #[default]
    AbortAll,
    /// Record the failure and carry on with the next table.
    ContinueRemaining,
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Provider alias every resource is bound to (`dog.<environment>`).
    pub environment: String,
    /// Only hosts whose name starts with this are exported. Empty matches all.
    pub host_prefix: String,
    pub collision: CollisionPolicy,
    pub failure: FailurePolicy,
}

impl ExportOptions {
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            host_prefix: String::new(),
            collision: CollisionPolicy::default(),
            failure: FailurePolicy::default(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_identifier(&self.environment).map_err(|e| CoreError::InvalidEnvironment {
            label: self.environment.clone(),
            reason: e.to_string(),
        })
    }
}

/// Observer for table-level progress.
pub trait ExportProgress {
    fn table_started(&mut self, _table: Table) {}
    fn table_finished(&mut self, _report: &TableReport) {}
}

impl ExportProgress for () {}

pub struct Exporter<'a, A, S> {
    api: &'a A,
    sink: S,
    options: ExportOptions,
    refs: AddressBook,
}

impl<'a, A, S> Exporter<'a, A, S>
where
    A: DogApi + Sync,
    S: TableSink + Send,
{
    pub fn new(api: &'a A, sink: S, options: ExportOptions) -> Self {
        Self {
            api,
            sink,
            options,
            refs: AddressBook::default(),
        }
    }

    /// Export every table.
    ///
    /// Fails outright only when the run cannot start (bad environment
    /// label, cyclic table dependencies). Table failures are reported in
    /// the returned [`RunReport`].
    pub async fn run<P>(mut self, progress: &mut P) -> Result<RunReport, CoreError>
    where
        P: ExportProgress + Send,
    {
        self.options.validate()?;
        let order = export_order()?;
        info!(
            environment = %self.options.environment,
            tables = order.len(),
            "starting export"
        );

        let mut report = RunReport::default();
        let mut remaining = order.into_iter();

        while let Some(table) = remaining.next() {
            progress.table_started(table);
            info!(%table, "exporting table");

            let table_report = self.export_table(table).await;
            info!(
                %table,
                emitted = table_report.rows_emitted,
                skipped = table_report.rows_skipped,
                diagnostics = table_report.diagnostics.len(),
                "table finished"
            );
            progress.table_finished(&table_report);

            let failed = table_report.is_failed();
            report.tables.push(table_report);

            if failed && self.options.failure == FailurePolicy::AbortAll {
                report.not_attempted = remaining.collect();
                warn!(
                    %table,
                    not_attempted = report.not_attempted.len(),
                    "aborting export"
                );
                break;
            }
        }

        Ok(report)
    }

    async fn export_table(&mut self, table: Table) -> TableReport {
        let api = self.api;
        match table {
            Table::Group => self.emit(api.groups(), |_| true).await,
            Table::Host => {
                let prefix = self.options.host_prefix.clone();
                self.emit(api.hosts(), |h: &Host| h.name.starts_with(&prefix))
                    .await
            }
            Table::Link => self.emit(api.links(), |_| true).await,
            Table::Ruleset => self.emit(api.rulesets(), |_| true).await,
            Table::Profile => self.emit(api.profiles(), |_| true).await,
            Table::Service => self.emit(api.services(), |_| true).await,
            Table::Zone => self.emit(api.zones(), |_| true).await,
            Table::Fact => self.emit(api.facts(), |_| true).await,
        }
    }

    async fn emit<R, F>(&mut self, fetch: F, keep: impl Fn(&R) -> bool + Send) -> TableReport
    where
        R: Render + Send,
        F: Future<Output = Result<Vec<R>, CoreError>> + Send,
    {
        let mut report = TableReport::new(R::TABLE);
        let rows = match fetch.await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(table = %R::TABLE, error = %e, "list call failed");
                return report.failed(e);
            }
        };
        debug!(table = %R::TABLE, rows = rows.len(), "rows fetched");

        match self.write_rows(&rows, &keep, &mut report) {
            Ok(()) => report.complete(),
            Err(e) => {
                warn!(table = %R::TABLE, error = %e, "writing table failed");
                report.failed(e)
            }
        }
    }

    fn write_rows<R: Render>(
        &mut self,
        rows: &[R],
        keep: &impl Fn(&R) -> bool,
        report: &mut TableReport,
    ) -> Result<(), CoreError> {
        let mut streams = self.sink.open(R::TABLE)?;
        let mut registry = IdentifierRegistry::new(self.options.collision);

        for row in rows {
            if row.is_skipped() {
                debug!(table = %R::TABLE, id = %row.id(), "skipping system-owned row");
                report.rows_skipped += 1;
                continue;
            }
            if !keep(row) {
                debug!(table = %R::TABLE, name = %row.name(), "row filtered out");
                report.rows_skipped += 1;
                continue;
            }

            let claim = match registry.claim(row.name(), row.id()) {
                Ok(claim) => claim,
                Err(e) => {
                    report.rows_skipped += 1;
                    diagnose(report, row, DiagnosticKind::Rejected(e));
                    continue;
                }
            };
            match &claim {
                Claim::Unique(_) => {}
                Claim::Renamed { base, ident } => {
                    let kind = DiagnosticKind::Renamed {
                        from: base.clone(),
                        to: ident.clone(),
                    };
                    diagnose(report, row, kind);
                }
                Claim::Shared { ident, first } => {
                    let kind = DiagnosticKind::Shared {
                        ident: ident.clone(),
                        first: first.clone(),
                    };
                    diagnose(report, row, kind);
                }
            }

            let ident = claim.ident();
            let definition = render_resource(row, ident, &self.options.environment, &self.refs);
            streams.write_definition(&definition)?;
            streams.write_import(&import_block(R::TABLE, row.id(), ident))?;
            self.refs.record(R::TABLE, row.name(), ident);
            report.rows_emitted += 1;
            debug!(table = %R::TABLE, id = %row.id(), %ident, "row emitted");
        }

        streams.finish()?;
        Ok(())
    }
}

fn diagnose<R: Render>(report: &mut TableReport, row: &R, kind: DiagnosticKind) {
    let diagnostic = Diagnostic {
        id: row.id().clone(),
        name: row.name().to_owned(),
        kind,
    };
    warn!(table = %R::TABLE, "{diagnostic}");
    report.diagnostics.push(diagnostic);
}
