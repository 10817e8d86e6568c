// ── Policy domain types: services, zones, rules ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// Literal rule target meaning "any source or destination".
pub const ANY_GROUP: &str = "ANY";

/// Literal rule service meaning "any port or protocol".
///
/// Lower-case on purpose: the service API uses a different sentinel than
/// the group API.
pub const ANY_SERVICE: &str = "any";

/// A named set of protocol/port pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: EntityId,
    pub name: String,
    pub version: i64,
    pub services: Vec<PortProtocol>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortProtocol {
    pub protocol: String,
    pub ports: Vec<String>,
}

/// A named set of addresses that rules can target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: EntityId,
    pub name: String,
    pub ipv4_addresses: Vec<String>,
    pub ipv6_addresses: Vec<String>,
}

/// How a rule's `group` field is to be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupType {
    Any,
    Zone,
    /// Anything else (`ROLE`, `GROUP`, ...) names a host group.
    Other(String),
}

impl GroupType {
    /// The discriminator as the API spells it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Any => "ANY",
            Self::Zone => "ZONE",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for GroupType {
    fn from(s: &str) -> Self {
        match s {
            "ANY" => Self::Any,
            "ZONE" => Self::Zone,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// One firewall rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub action: String,
    pub active: bool,
    pub comment: String,
    pub environments: Vec<String>,
    pub group: String,
    pub group_type: GroupType,
    pub interface: String,
    pub log: bool,
    pub log_prefix: String,
    pub service: String,
    pub states: Vec<String>,
    pub rule_type: String,
    /// Carried for completeness; output keeps list order instead.
    pub order: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub inbound: Vec<Rule>,
    pub outbound: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    pub id: EntityId,
    pub name: String,
    pub profile_id: Option<String>,
    pub rules: Rules,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: EntityId,
    pub name: String,
    pub version: i64,
    pub rules: Rules,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_type_discriminator() {
        assert_eq!(GroupType::from("ANY"), GroupType::Any);
        assert_eq!(GroupType::from("ZONE"), GroupType::Zone);
        assert_eq!(GroupType::from("ROLE"), GroupType::Other("ROLE".into()));
    }

    #[test]
    fn group_type_is_case_sensitive() {
        assert_eq!(GroupType::from("zone"), GroupType::Other("zone".into()));
        assert_eq!(GroupType::from("zone").as_str(), "zone");
    }
}
