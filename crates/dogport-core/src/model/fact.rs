// ── Fact domain types ──
//
// A fact is an inventory document: per group, its variables, its hosts
// with per-host variables, and its child groups.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;
use super::value::VarMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub id: EntityId,
    pub name: String,
    pub groups: BTreeMap<String, FactGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactGroup {
    pub vars: VarMap,
    pub hosts: BTreeMap<String, VarMap>,
    pub children: Vec<String>,
}
