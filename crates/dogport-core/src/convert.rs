// ── API-to-domain type conversions ──
//
// Bridges raw `dogport_api` response types into canonical `dogport_core::model`
// domain types. Variable payloads are typed here, once, so nothing
// downstream ever inspects raw JSON.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use dogport_api::types;

use crate::model::{
    Connection, EntityId, Fact, FactGroup, Group, GroupType, Host, Link, PortProtocol, Profile,
    Rule, Rules, Ruleset, SecurityGroupRef, Service, SslOptions, VarMap, VarValue, Zone,
};

// ── Helpers ────────────────────────────────────────────────────────

impl From<Value> for VarValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

fn var_map(raw: BTreeMap<String, Value>) -> VarMap {
    raw.into_iter().map(|(k, v)| (k, v.into())).collect()
}

/// Entity-level `vars` arrive as an optional JSON document. Anything other
/// than an object (or nothing) cannot be rendered as a map and is dropped.
fn entity_vars(owner: &str, raw: Option<Value>) -> VarMap {
    match raw {
        None | Some(Value::Null) => VarMap::new(),
        Some(Value::Object(map)) => map.into_iter().map(|(k, v)| (k, v.into())).collect(),
        Some(other) => {
            warn!(owner, kind = json_kind(&other), "ignoring non-object vars");
            VarMap::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ── Inventory ──────────────────────────────────────────────────────

impl From<types::GroupResponse> for Group {
    fn from(g: types::GroupResponse) -> Self {
        let vars = entity_vars(&g.name, g.vars);
        Group {
            id: EntityId::from(g.id),
            name: g.name,
            description: g.description,
            profile_name: g.profile_name,
            profile_version: g.profile_version,
            ec2_security_groups: g
                .ec2_security_group_ids
                .into_iter()
                .map(|sg| SecurityGroupRef {
                    region: sg.region,
                    sgid: sg.sgid,
                })
                .collect(),
            vars,
        }
    }
}

impl From<types::HostResponse> for Host {
    fn from(h: types::HostResponse) -> Self {
        let vars = entity_vars(&h.name, h.vars);
        Host {
            id: EntityId::from(h.id),
            name: h.name,
            environment: h.environment,
            group: h.group,
            hostkey: h.hostkey,
            location: h.location,
            vars,
        }
    }
}

// ── Links ──────────────────────────────────────────────────────────

impl From<types::LinkResponse> for Link {
    fn from(l: types::LinkResponse) -> Self {
        let c = l.connection;
        let ssl = c.ssl_options;
        Link {
            id: EntityId::from(l.id),
            name: l.name,
            address_handling: l.address_handling,
            connection: Connection {
                api_port: c.api_port,
                host: c.host,
                password: c.password,
                port: c.port,
                ssl_options: SslOptions {
                    cacertfile: ssl.cacertfile,
                    certfile: ssl.certfile,
                    fail_if_no_peer_cert: ssl.fail_if_no_peer_cert,
                    keyfile: ssl.keyfile,
                    server_name_indication: ssl.server_name_indication,
                    verify: ssl.verify,
                },
                user: c.user,
                virtual_host: c.virtual_host,
            },
            connection_type: l.connection_type,
            direction: l.direction,
            enabled: l.enabled,
        }
    }
}

// ── Policy ─────────────────────────────────────────────────────────

impl From<types::ServiceResponse> for Service {
    fn from(s: types::ServiceResponse) -> Self {
        Service {
            id: EntityId::from(s.id),
            name: s.name,
            version: s.version,
            services: s
                .services
                .into_iter()
                .map(|pp| PortProtocol {
                    protocol: pp.protocol,
                    ports: pp.ports,
                })
                .collect(),
        }
    }
}

impl From<types::ZoneResponse> for Zone {
    fn from(z: types::ZoneResponse) -> Self {
        Zone {
            id: EntityId::from(z.id),
            name: z.name,
            ipv4_addresses: z.ipv4_addresses,
            ipv6_addresses: z.ipv6_addresses,
        }
    }
}

impl From<types::RuleResponse> for Rule {
    fn from(r: types::RuleResponse) -> Self {
        Rule {
            action: r.action,
            active: r.active,
            comment: r.comment,
            environments: r.environments,
            group: r.group,
            group_type: GroupType::from(r.group_type.as_str()),
            interface: r.interface,
            log: r.log,
            log_prefix: r.log_prefix,
            service: r.service,
            states: r.states,
            rule_type: r.rule_type,
            order: r.order,
        }
    }
}

impl From<types::RulesResponse> for Rules {
    fn from(r: types::RulesResponse) -> Self {
        Rules {
            inbound: r.inbound.into_iter().map(Rule::from).collect(),
            outbound: r.outbound.into_iter().map(Rule::from).collect(),
        }
    }
}

impl From<types::RulesetResponse> for Ruleset {
    fn from(r: types::RulesetResponse) -> Self {
        Ruleset {
            id: EntityId::from(r.id),
            name: r.name,
            profile_id: r.profile_id.filter(|p| !p.is_empty()),
            rules: r.rules.into(),
        }
    }
}

impl From<types::ProfileResponse> for Profile {
    fn from(p: types::ProfileResponse) -> Self {
        Profile {
            id: EntityId::from(p.id),
            name: p.name,
            version: p.version,
            rules: p.rules.into(),
        }
    }
}

// ── Facts ──────────────────────────────────────────────────────────

impl From<types::FactResponse> for Fact {
    fn from(f: types::FactResponse) -> Self {
        Fact {
            id: EntityId::from(f.id),
            name: f.name,
            groups: f
                .groups
                .into_iter()
                .map(|(name, g)| {
                    let group = FactGroup {
                        vars: var_map(g.vars),
                        hosts: g
                            .hosts
                            .into_iter()
                            .map(|(host, vars)| (host, var_map(vars)))
                            .collect(),
                        children: g.children,
                    };
                    (name, group)
                })
                .collect(),
        }
    }
}
