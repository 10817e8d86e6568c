// ── Inventory domain types: groups and hosts ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;
use super::value::VarMap;

/// A group of hosts sharing a firewall profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub profile_name: String,
    pub profile_version: String,
    pub ec2_security_groups: Vec<SecurityGroupRef>,
    pub vars: VarMap,
}

/// An EC2 security group kept in sync with a dog group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroupRef {
    pub region: String,
    pub sgid: String,
}

/// A managed host. `group` is the group's display name, not its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub id: EntityId,
    pub name: String,
    pub environment: String,
    pub group: String,
    pub hostkey: String,
    pub location: String,
    pub vars: VarMap,
}
