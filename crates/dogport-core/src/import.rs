// ── Import bindings ──
//
// One `import` block per emitted row, pairing the remote id with the
// address the resource will have inside the `dog` module.

use crate::hcl::{self, Expr};
use crate::model::EntityId;
use crate::render::attr;
use crate::table::Table;

/// `module.dog.dog_<table>.<ident>`
pub fn module_address(table: Table, ident: &str) -> String {
    format!("module.dog.{}.{ident}", table.resource_type())
}

pub fn import_block(table: Table, id: &EntityId, ident: &str) -> String {
    hcl::block(
        "import",
        &[],
        &[
            attr("id", Expr::str(id.to_string())),
            attr("to", Expr::Raw(module_address(table, ident))),
        ],
    )
}
