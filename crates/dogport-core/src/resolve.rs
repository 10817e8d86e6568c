// ── Reference resolution ──
//
// A rule names its target and its service by display name. Each side is
// either a sentinel, emitted as a literal, or a cross-reference to another
// table's resource, emitted as `dog_<table>.<ident>.id`.

use std::collections::HashMap;

use crate::hcl::Expr;
use crate::model::{ANY_GROUP, ANY_SERVICE, GroupType, Rule};
use crate::sanitize::{repair_identifier, sanitize};
use crate::table::Table;

/// What a rule's `group` field points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRef<'a> {
    Any,
    Zone(&'a str),
    Group(&'a str),
}

impl<'a> GroupRef<'a> {
    pub fn of(rule: &'a Rule) -> Self {
        if rule.group == ANY_GROUP {
            Self::Any
        } else if rule.group_type == GroupType::Zone {
            Self::Zone(&rule.group)
        } else {
            Self::Group(&rule.group)
        }
    }

    pub fn expr(self, book: &AddressBook) -> Expr {
        match self {
            Self::Any => Expr::str(ANY_GROUP),
            Self::Zone(name) => book.reference(Table::Zone, name),
            Self::Group(name) => book.reference(Table::Group, name),
        }
    }
}

/// What a rule's `service` field points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceRef<'a> {
    Any,
    Service(&'a str),
}

impl<'a> ServiceRef<'a> {
    pub fn of(rule: &'a Rule) -> Self {
        if rule.service == ANY_SERVICE {
            Self::Any
        } else {
            Self::Service(&rule.service)
        }
    }

    pub fn expr(self, book: &AddressBook) -> Expr {
        match self {
            Self::Any => Expr::str(ANY_SERVICE),
            Self::Service(name) => book.reference(Table::Service, name),
        }
    }
}

/// Identifiers claimed during the run, keyed by table and display name.
///
/// When several rows share a display name the first claim wins, which is
/// the row a reference by name would have meant before disambiguation.
#[derive(Debug, Default)]
pub struct AddressBook {
    entries: HashMap<(Table, String), String>,
}

impl AddressBook {
    pub fn record(&mut self, table: Table, name: &str, ident: &str) {
        self.entries
            .entry((table, name.to_owned()))
            .or_insert_with(|| ident.to_owned());
    }

    pub fn lookup(&self, table: Table, name: &str) -> Option<&str> {
        self.entries
            .get(&(table, name.to_owned()))
            .map(String::as_str)
    }

    /// The identifier a reference to `name` should use. Entities that
    /// were never emitted fall back to the sanitized, repaired name.
    pub fn ident_for(&self, table: Table, name: &str) -> String {
        self.lookup(table, name)
            .map_or_else(|| repair_identifier(&sanitize(name)), ToOwned::to_owned)
    }

    pub fn reference(&self, table: Table, name: &str) -> Expr {
        Expr::Raw(format!(
            "{}.{}.id",
            table.resource_type(),
            self.ident_for(table, name)
        ))
    }
}
