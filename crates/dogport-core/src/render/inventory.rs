use crate::hcl::Expr;
use crate::model::{EntityId, Group, Host};
use crate::resolve::AddressBook;
use crate::table::Table;

use super::{Attrs, Render, attr, vars_map};

impl Render for Group {
    const TABLE: Table = Table::Group;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_skipped(&self) -> bool {
        self.id.is_all_active()
    }

    fn attributes(&self, _refs: &AddressBook) -> Attrs {
        let security_groups = self
            .ec2_security_groups
            .iter()
            .map(|sg| {
                Expr::Object(vec![
                    attr("region", Expr::str(&sg.region)),
                    attr("sgid", Expr::str(&sg.sgid)),
                ])
            })
            .collect();

        vec![
            attr("name", Expr::str(&self.name)),
            attr("description", Expr::str(&self.description)),
            attr("profile_name", Expr::str(&self.profile_name)),
            attr("profile_version", Expr::str(&self.profile_version)),
            attr("ec2_security_group_ids", Expr::List(security_groups)),
            attr("vars", Expr::jsonencode(vars_map(&self.vars))),
        ]
    }
}

impl Render for Host {
    const TABLE: Table = Table::Host;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn attributes(&self, _refs: &AddressBook) -> Attrs {
        vec![
            attr("name", Expr::str(&self.name)),
            attr("environment", Expr::str(&self.environment)),
            attr("group", Expr::str(&self.group)),
            attr("hostkey", Expr::str(&self.hostkey)),
            attr("location", Expr::str(&self.location)),
            attr("vars", Expr::jsonencode(vars_map(&self.vars))),
        ]
    }
}
