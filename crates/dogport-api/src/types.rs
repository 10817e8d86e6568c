// Wire models for the dog V2 API.
//
// Field names follow the service's snake_case JSON. Everything except `id`
// is `#[serde(default)]` because older deployments omit empty fields
// instead of sending `""` / `[]`. Variable payloads stay as raw
// `serde_json::Value`; typing them is the consumer's job. An explicit
// `null` decodes like a missing key.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Group ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResponse {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ec2_security_group_ids: Vec<SecurityGroupResponse>,
    #[serde(default)]
    pub vars: Option<Value>,
}

/// A (region, security group id) pair attached to a group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityGroupResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sgid: String,
}

// ── Host ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostResponse {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub environment: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hostkey: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default)]
    pub vars: Option<Value>,
}

// ── Link ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkResponse {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address_handling: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub connection_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub direction: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub connection: ConnectionResponse,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_port: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub host: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub port: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ssl_options: SslOptionsResponse,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub virtual_host: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SslOptionsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cacertfile: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certfile: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fail_if_no_peer_cert: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keyfile: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub server_name_indication: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verify: String,
}

// ── Service ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub services: Vec<PortProtocolResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortProtocolResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub protocol: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ports: Vec<String>,
}

// ── Zone ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneResponse {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ipv4_addresses: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ipv6_addresses: Vec<String>,
}

// ── Ruleset / Profile ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesetResponse {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub profile_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: RulesResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rules: RulesResponse,
}

/// The inbound/outbound rule lists shared by rulesets and profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub inbound: Vec<RuleResponse>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub outbound: Vec<RuleResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub environments: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interface: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub log: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub log_prefix: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub states: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default", rename = "type")]
    pub rule_type: String,
}

// ── Fact ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactResponse {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: BTreeMap<String, FactGroupResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactGroupResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub vars: BTreeMap<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hosts: BTreeMap<String, BTreeMap<String, Value>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rule_type_field_is_renamed() {
        let rule: RuleResponse = serde_json::from_value(json!({
            "action": "ACCEPT",
            "group": "ANY",
            "group_type": "ANY",
            "service": "any",
            "type": "BASIC"
        }))
        .unwrap();
        assert_eq!(rule.rule_type, "BASIC");
        assert!(rule.environments.is_empty());
    }

    #[test]
    fn explicit_nulls_decode_as_defaults() {
        let zone: ZoneResponse = serde_json::from_value(json!({
            "id": "z1",
            "name": "office",
            "ipv4_addresses": ["10.0.0.0/8"],
            "ipv6_addresses": null
        }))
        .unwrap();
        assert!(zone.ipv6_addresses.is_empty());
        assert_eq!(zone.ipv4_addresses, vec!["10.0.0.0/8".to_owned()]);

        let group: GroupResponse = serde_json::from_value(json!({
            "id": "g1",
            "name": "web",
            "description": null,
            "ec2_security_group_ids": null,
            "vars": null
        }))
        .unwrap();
        assert_eq!(group.description, "");
        assert!(group.ec2_security_group_ids.is_empty());
        assert_eq!(group.vars, None);

        let ruleset: RulesetResponse = serde_json::from_value(json!({
            "id": "rs1",
            "profile_id": null,
            "rules": { "inbound": null, "outbound": [{ "type": null, "states": null }] }
        }))
        .unwrap();
        assert_eq!(ruleset.profile_id, None);
        assert!(ruleset.rules.inbound.is_empty());
        assert_eq!(ruleset.rules.outbound[0].rule_type, "");

        let link: LinkResponse =
            serde_json::from_value(json!({ "id": "l1", "connection": null })).unwrap();
        assert_eq!(link.connection.port, 0);
    }

    #[test]
    fn link_without_connection_uses_defaults() {
        let link: LinkResponse =
            serde_json::from_value(json!({ "id": "l1", "name": "upstream" })).unwrap();
        assert_eq!(link.connection.port, 0);
        assert!(!link.connection.ssl_options.fail_if_no_peer_cert);
    }

    #[test]
    fn fact_groups_decode_nested_maps() {
        let fact: FactResponse = serde_json::from_value(json!({
            "id": "f1",
            "name": "dog_test",
            "groups": {
                "all": {
                    "vars": { "port": 8080, "region": "us-east-1" },
                    "hosts": { "web1": { "role": "frontend" } },
                    "children": ["app"]
                }
            }
        }))
        .unwrap();
        let all = &fact.groups["all"];
        assert_eq!(all.vars["port"], json!(8080));
        assert_eq!(all.hosts["web1"]["role"], json!("frontend"));
        assert_eq!(all.children, vec!["app".to_owned()]);
    }
}
