// Facts are the only entity with nested, user-shaped structure: group ->
// { children, hosts -> vars, vars }. Keys are user data, so they render
// as quoted map keys.

use crate::hcl::Expr;
use crate::model::{EntityId, Fact, FactGroup};
use crate::resolve::AddressBook;
use crate::table::Table;

use super::{Attrs, Render, attr, vars_map};

impl Render for Fact {
    const TABLE: Table = Table::Fact;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self, _refs: &AddressBook) -> Attrs {
        let groups = self
            .groups
            .iter()
            .map(|(name, group)| (name.clone(), fact_group(group)))
            .collect();

        vec![
            attr("name", Expr::str(&self.name)),
            attr("groups", Expr::Map(groups)),
        ]
    }
}

fn fact_group(group: &FactGroup) -> Expr {
    let hosts = group
        .hosts
        .iter()
        .map(|(host, vars)| (host.clone(), vars_map(vars)))
        .collect();

    Expr::Object(vec![
        attr("children", Expr::strings(&group.children)),
        attr("hosts", Expr::Map(hosts)),
        attr("vars", vars_map(&group.vars)),
    ])
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::model::{VarMap, VarValue};
    use crate::render::render_resource;
    use pretty_assertions::assert_eq;
    use serde_json::Number;

    #[test]
    fn fact_block() {
        let mut web1 = VarMap::new();
        web1.insert("role".into(), VarValue::from("frontend"));

        let mut vars = VarMap::new();
        vars.insert(
            "ratio".into(),
            VarValue::Number(Number::from_f64(0.75).unwrap_or_else(|| 0.into())),
        );
        vars.insert("port".into(), VarValue::from(8080));
        vars.insert("region".into(), VarValue::from("us-east-1"));
        vars.insert("debug".into(), VarValue::Bool(false));

        let mut groups = BTreeMap::new();
        groups.insert(
            "all".to_owned(),
            FactGroup {
                vars,
                hosts: BTreeMap::from([("web1".to_owned(), web1)]),
                children: vec!["app".into(), "db".into()],
            },
        );
        groups.insert("empty".to_owned(), FactGroup::default());

        let fact = Fact {
            id: EntityId::from("f1"),
            name: "dog_test".into(),
            groups,
        };

        let text = render_resource(&fact, "dog_test", "qa", &AddressBook::default());
        assert_eq!(
            text,
            r#"resource "dog_fact" "dog_test" {
  name = "dog_test"
  groups = {
    "all" = {
      children = ["app","db"]
      hosts = {
        "web1" = {
          "role" = "frontend"
        }
      }
      vars = {
        "debug" = false
        "port" = 8080
        "ratio" = 0
        "region" = "us-east-1"
      }
    }
    "empty" = {
      children = []
      hosts = {}
      vars = {}
    }
  }
  provider = dog.qa
}
"#
        );
    }
}
