use crate::hcl::Expr;
use crate::model::{EntityId, Profile, Rule, Rules, Ruleset, Service, Zone};
use crate::resolve::{AddressBook, GroupRef, ServiceRef};
use crate::table::Table;

use super::{Attrs, Render, attr};

impl Render for Service {
    const TABLE: Table = Table::Service;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self, _refs: &AddressBook) -> Attrs {
        let services = self
            .services
            .iter()
            .map(|pp| {
                Expr::Object(vec![
                    attr("protocol", Expr::str(&pp.protocol)),
                    attr("ports", Expr::strings(&pp.ports)),
                ])
            })
            .collect();

        vec![
            attr("name", Expr::str(&self.name)),
            attr("version", Expr::Int(self.version)),
            attr("services", Expr::List(services)),
        ]
    }
}

impl Render for Zone {
    const TABLE: Table = Table::Zone;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self, _refs: &AddressBook) -> Attrs {
        vec![
            attr("name", Expr::str(&self.name)),
            attr("ipv4_addresses", Expr::strings(&self.ipv4_addresses)),
            attr("ipv6_addresses", Expr::strings(&self.ipv6_addresses)),
        ]
    }
}

impl Render for Ruleset {
    const TABLE: Table = Table::Ruleset;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self, refs: &AddressBook) -> Attrs {
        let mut attrs = vec![attr("name", Expr::str(&self.name))];
        if let Some(profile_id) = &self.profile_id {
            attrs.push(attr("profile_id", Expr::str(profile_id)));
        }
        attrs.push(attr("rules", rules_expr(&self.rules, refs)));
        attrs
    }
}

impl Render for Profile {
    const TABLE: Table = Table::Profile;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self, refs: &AddressBook) -> Attrs {
        vec![
            attr("name", Expr::str(&self.name)),
            attr("version", Expr::Int(self.version)),
            attr("rules", rules_expr(&self.rules, refs)),
        ]
    }
}

// ── Rules ───────────────────────────────────────────────────────────

fn rules_expr(rules: &Rules, refs: &AddressBook) -> Expr {
    let list = |rules: &[Rule]| Expr::List(rules.iter().map(|r| rule_expr(r, refs)).collect());
    Expr::Object(vec![
        attr("inbound", list(&rules.inbound)),
        attr("outbound", list(&rules.outbound)),
    ])
}

/// Source order is kept; `order` is not consulted.
fn rule_expr(rule: &Rule, refs: &AddressBook) -> Expr {
    Expr::Object(vec![
        attr("action", Expr::str(&rule.action)),
        attr("active", Expr::Bool(rule.active)),
        attr("comment", Expr::str(&rule.comment)),
        attr("environments", Expr::strings(&rule.environments)),
        attr("group", GroupRef::of(rule).expr(refs)),
        attr("group_type", Expr::str(rule.group_type.as_str())),
        attr("interface", Expr::str(&rule.interface)),
        attr("log", Expr::Bool(rule.log)),
        attr("log_prefix", Expr::str(&rule.log_prefix)),
        attr("service", ServiceRef::of(rule).expr(refs)),
        attr("states", Expr::strings(&rule.states)),
        attr("type", Expr::str(&rule.rule_type)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GroupType, PortProtocol};
    use crate::render::render_resource;
    use pretty_assertions::assert_eq;

    fn rule(group: &str, group_type: &str, service: &str, order: i64) -> Rule {
        Rule {
            action: "ACCEPT".into(),
            active: true,
            comment: "allow".into(),
            environments: vec!["qa".into(), "prod".into()],
            group: group.into(),
            group_type: GroupType::from(group_type),
            interface: String::new(),
            log: false,
            log_prefix: String::new(),
            service: service.into(),
            states: vec!["NEW".into()],
            rule_type: "BASIC".into(),
            order,
        }
    }

    #[test]
    fn zone_scenario() {
        let zone = Zone {
            id: EntityId::from("z1"),
            name: "prod.zone (east)".into(),
            ipv4_addresses: vec!["10.0.0.1".into(), "10.0.0.2".into()],
            ipv6_addresses: Vec::new(),
        };
        let text = render_resource(&zone, "prod_zone__east_", "prod", &AddressBook::default());
        assert_eq!(
            text,
            r#"resource "dog_zone" "prod_zone__east_" {
  name = "prod.zone (east)"
  ipv4_addresses = ["10.0.0.1","10.0.0.2"]
  ipv6_addresses = []
  provider = dog.prod
}
"#
        );
    }

    #[test]
    fn service_block_lists_port_protocols() {
        let service = Service {
            id: EntityId::from("s1"),
            name: "ssh".into(),
            version: 2,
            services: vec![PortProtocol {
                protocol: "tcp".into(),
                ports: vec!["22".into(), "2222".into()],
            }],
        };
        let text = render_resource(&service, "ssh", "qa", &AddressBook::default());
        assert_eq!(
            text,
            r#"resource "dog_service" "ssh" {
  name = "ssh"
  version = 2
  services = [
    {
      protocol = "tcp"
      ports = ["22","2222"]
    },
  ]
  provider = dog.qa
}
"#
        );
    }

    #[test]
    fn ruleset_resolves_rule_references() {
        let mut refs = AddressBook::default();
        refs.record(Table::Zone, "dmz", "dmz");
        let ruleset = Ruleset {
            id: EntityId::from("r1"),
            name: "web".into(),
            profile_id: Some("p1".into()),
            rules: Rules {
                inbound: vec![rule("dmz", "ZONE", "ssh", 2), rule("ANY", "ANY", "any", 1)],
                outbound: vec![rule("app.tier", "ROLE", "any", 0)],
            },
        };
        let text = render_resource(&ruleset, "web", "qa", &refs);
        assert_eq!(
            text,
            r#"resource "dog_ruleset" "web" {
  name = "web"
  profile_id = "p1"
  rules = {
    inbound = [
      {
        action = "ACCEPT"
        active = true
        comment = "allow"
        environments = ["qa","prod"]
        group = dog_zone.dmz.id
        group_type = "ZONE"
        interface = ""
        log = false
        log_prefix = ""
        service = dog_service.ssh.id
        states = ["NEW"]
        type = "BASIC"
      },
      {
        action = "ACCEPT"
        active = true
        comment = "allow"
        environments = ["qa","prod"]
        group = "ANY"
        group_type = "ANY"
        interface = ""
        log = false
        log_prefix = ""
        service = "any"
        states = ["NEW"]
        type = "BASIC"
      },
    ]
    outbound = [
      {
        action = "ACCEPT"
        active = true
        comment = "allow"
        environments = ["qa","prod"]
        group = dog_group.app_tier.id
        group_type = "ROLE"
        interface = ""
        log = false
        log_prefix = ""
        service = "any"
        states = ["NEW"]
        type = "BASIC"
      },
    ]
  }
  provider = dog.qa
}
"#
        );
    }

    #[test]
    fn profile_without_rules() {
        let profile = Profile {
            id: EntityId::from("p1"),
            name: "base".into(),
            version: 7,
            rules: Rules::default(),
        };
        let text = render_resource(&profile, "base", "qa", &AddressBook::default());
        assert_eq!(
            text,
            r#"resource "dog_profile" "base" {
  name = "base"
  version = 7
  rules = {
    inbound = []
    outbound = []
  }
  provider = dog.qa
}
"#
        );
    }

    #[test]
    fn ruleset_without_profile_omits_profile_id() {
        let ruleset = Ruleset {
            id: EntityId::from("r2"),
            name: "bare".into(),
            profile_id: None,
            rules: Rules::default(),
        };
        let attrs = ruleset.attributes(&AddressBook::default());
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["name", "rules"]);
    }
}
