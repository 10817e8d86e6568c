// ── Entity renderers ──
//
// One `Render` impl per entity kind supplies the ordered attribute list;
// `render_resource` wraps it into a resource block bound to the
// environment's provider alias.

mod fact;
mod inventory;
mod link;
mod policy;

use crate::hcl::{self, Expr};
use crate::model::{EntityId, VarMap, VarValue};
use crate::resolve::AddressBook;
use crate::table::Table;

/// Ordered `key = value` pairs.
pub type Attrs = Vec<(String, Expr)>;

pub(crate) fn attr(key: &str, value: Expr) -> (String, Expr) {
    (key.to_owned(), value)
}

/// A row that can be emitted as a resource block.
pub trait Render {
    const TABLE: Table;

    fn id(&self) -> &EntityId;

    /// Display name the identifier is derived from.
    fn name(&self) -> &str;

    /// System-owned rows that must never be exported.
    fn is_skipped(&self) -> bool {
        false
    }

    fn attributes(&self, refs: &AddressBook) -> Attrs;
}

/// `resource "dog_<table>" "<ident>" { ... provider = dog.<environment> }`
pub fn render_resource<R: Render>(
    row: &R,
    ident: &str,
    environment: &str,
    refs: &AddressBook,
) -> String {
    let mut attrs = row.attributes(refs);
    attrs.push(attr("provider", Expr::Raw(format!("dog.{environment}"))));
    let resource_type = R::TABLE.resource_type();
    hcl::block("resource", &[resource_type.as_str(), ident], &attrs)
}

/// Typed variable value to expression. Numbers lose any fractional part.
pub fn var_expr(value: &VarValue) -> Expr {
    match value {
        VarValue::Null => Expr::Null,
        VarValue::Bool(b) => Expr::Bool(*b),
        VarValue::Number(n) => value.as_truncated_integer().map_or_else(
            || Expr::Raw(value.integer_text().unwrap_or_else(|| n.to_string())),
            Expr::Int,
        ),
        VarValue::String(s) => Expr::str(s),
        VarValue::List(items) => Expr::List(items.iter().map(var_expr).collect()),
        VarValue::Map(map) => vars_map(map),
    }
}

pub(crate) fn vars_map(vars: &VarMap) -> Expr {
    Expr::Map(vars.iter().map(|(k, v)| (k.clone(), var_expr(v))).collect())
}
