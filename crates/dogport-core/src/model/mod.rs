// ── Domain model ──
//
// Canonical, read-only views of the entities the exporter works on.

pub mod entity_id;
pub mod fact;
pub mod inventory;
pub mod link;
pub mod policy;
pub mod value;

pub use entity_id::{ALL_ACTIVE, EntityId};
pub use fact::{Fact, FactGroup};
pub use inventory::{Group, Host, SecurityGroupRef};
pub use link::{Connection, Link, SslOptions};
pub use policy::{
    ANY_GROUP, ANY_SERVICE, GroupType, PortProtocol, Profile, Rule, Rules, Ruleset, Service, Zone,
};
pub use value::{VarMap, VarValue};
