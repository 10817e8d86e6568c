//! Export engine turning dog API entities into Terraform configuration.
//!
//! For every entity kind (a [`Table`]) the engine performs one list call,
//! renders each row as a `resource "dog_<table>"` block, and writes a
//! matching `import` block that adopts the existing remote object:
//!
//! - **[`Exporter`]**: walks the tables in dependency order
//!   ([`export_order`]) and aggregates a [`RunReport`]. Table failures either
//!   abort the run or are recorded and skipped, per [`FailurePolicy`].
//!
//! - **[`DogApi`]**: the read-only seam to the service. Implemented for
//!   [`dogport_api::DogClient`]; tests plug in an in-memory source.
//!
//! - **Identifiers** ([`sanitize`]): display names become resource
//!   identifiers through a fixed substitution table, an allow-list check,
//!   and per-table uniqueness under a [`CollisionPolicy`].
//!
//! - **References** ([`resolve`]): rule targets and services are either
//!   sentinel literals (`"ANY"`, `"any"`) or `dog_<table>.<ident>.id`
//!   cross-references.
//!
//! - **Output** ([`hcl`], [`render`], [`import`], [`writer`]): an HCL
//!   expression tree, one renderer per entity kind, and two buffered files
//!   per table.

pub mod config;
pub mod convert;
pub mod error;
pub mod export;
pub mod hcl;
pub mod import;
pub mod model;
pub mod render;
pub mod report;
pub mod resolve;
pub mod sanitize;
pub mod source;
pub mod table;
pub mod writer;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ClientConfig, TlsVerification};
pub use error::CoreError;
pub use export::{ExportOptions, ExportProgress, Exporter, FailurePolicy};
pub use report::{Diagnostic, DiagnosticKind, RunReport, TableOutcome, TableReport};
pub use sanitize::{CollisionPolicy, repair_identifier, sanitize, validate_identifier};
pub use source::DogApi;
pub use table::{Table, export_order};
pub use writer::{FileSink, TableSink, TableStreams};

pub use model::{
    EntityId, Fact, FactGroup, Group, GroupType, Host, Link, Profile, Rule, Rules, Ruleset,
    Service, VarMap, VarValue, Zone,
};
