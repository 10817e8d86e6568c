// ── Export tables ──
//
// One table per entity kind: its own list call, its own pair of output
// files, its own resource type. Tables that reference other tables'
// resources declare it, and the export order is derived from those
// declarations instead of being hand-maintained.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::error::CoreError;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Table {
    Group,
    Host,
    Link,
    Ruleset,
    Profile,
    Service,
    Zone,
    Fact,
}

impl Table {
    /// Terraform resource type, e.g. `dog_zone`.
    pub fn resource_type(self) -> String {
        format!("dog_{self}")
    }

    /// Name of the definitions file, e.g. `zone.tf`.
    pub fn definitions_file(self) -> String {
        format!("{self}.tf")
    }

    /// Name of the import bindings file, e.g. `zone_import.tf`.
    pub fn imports_file(self) -> String {
        format!("{self}_import.tf")
    }

    /// Tables whose resources this table's output refers to.
    pub fn depends_on(self) -> &'static [Table] {
        match self {
            Self::Ruleset | Self::Profile => &[Self::Group, Self::Zone, Self::Service],
            Self::Group
            | Self::Host
            | Self::Link
            | Self::Service
            | Self::Zone
            | Self::Fact => &[],
        }
    }
}

/// Every table, referenced tables before the tables that reference them.
///
/// Ties keep declaration order.
pub fn export_order() -> Result<Vec<Table>, CoreError> {
    topological_order(&Table::iter().collect::<Vec<_>>(), Table::depends_on)
}

/// Depth-first topological sort over `tables`, visiting in slice order.
pub(crate) fn topological_order(
    tables: &[Table],
    depends_on: impl Fn(Table) -> &'static [Table] + Copy,
) -> Result<Vec<Table>, CoreError> {
    let mut order = Vec::with_capacity(tables.len());
    let mut visited = HashSet::new();
    let mut path = Vec::new();

    for &table in tables {
        visit(table, depends_on, &mut order, &mut visited, &mut path)?;
    }

    Ok(order)
}

fn visit(
    table: Table,
    depends_on: impl Fn(Table) -> &'static [Table] + Copy,
    order: &mut Vec<Table>,
    visited: &mut HashSet<Table>,
    path: &mut Vec<Table>,
) -> Result<(), CoreError> {
    if visited.contains(&table) {
        return Ok(());
    }

    if let Some(start) = path.iter().position(|&t| t == table) {
        let mut cycle = path[start..].to_vec();
        cycle.push(table);
        return Err(CoreError::DependencyCycle(cycle));
    }

    path.push(table);
    for &dep in depends_on(table) {
        visit(dep, depends_on, order, visited, path)?;
    }
    path.pop();

    visited.insert(table);
    order.push(table);

    Ok(())
}
