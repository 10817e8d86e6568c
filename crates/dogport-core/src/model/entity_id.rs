// ── Core identity type ──
//
// dog ids are opaque strings: mostly UUIDs, but a few system objects carry
// fixed ids (the virtual `all-active` group). The exporter only compares
// and prints them, so the text is kept exactly as the API sent it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Id of the virtual group every active host belongs to.
pub const ALL_ACTIVE: &str = "all-active";

/// Canonical identifier for any dog entity.
///
/// Remote-assigned and immutable; `Display` yields the original text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for the system-owned `all-active` group, which is never exported.
    pub fn is_all_active(&self) -> bool {
        self.0 == ALL_ACTIVE
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
