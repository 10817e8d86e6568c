// ── Identifier sanitizer ──
//
// Display names have no character restrictions; resource identifiers do.
// `sanitize` maps the former onto the latter with a fixed substitution
// table, `repair_identifier` forces the result onto the allow-list, and
// `IdentifierRegistry` keeps identifiers unique within a table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::model::EntityId;

/// Ordered substitution rules. Each rule sees the output of the previous one.
pub const SUBSTITUTIONS: [(char, char); 6] = [
    ('.', '_'),
    ('(', '_'),
    (')', '_'),
    ('/', '_'),
    (' ', '_'),
    (':', '_'),
];

/// Turn a display name into a resource identifier.
///
/// Only the characters in [`SUBSTITUTIONS`] change. No trimming, no case
/// folding, and no validity guarantee: [`repair_identifier`] handles what
/// the table does not cover.
pub fn sanitize(name: &str) -> String {
    SUBSTITUTIONS
        .iter()
        .fold(name.to_owned(), |acc, &(from, to)| {
            acc.chars().map(|c| if c == from { to } else { c }).collect()
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,
    #[error("identifier cannot start with '{0}'")]
    LeadingCharacter(char),
    #[error("identifier cannot contain '{0}'")]
    InvalidCharacter(char),
}

fn is_ident_start(c: char) -> bool {
    unicode_ident::is_xid_start(c) || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    unicode_ident::is_xid_continue(c) || c == '-'
}

/// Check an identifier against the allow-list: a Unicode `ID_Start`
/// character or `_` first, then `ID_Continue` characters and `-`.
pub fn validate_identifier(ident: &str) -> Result<(), IdentifierError> {
    let mut chars = ident.chars();
    let first = chars.next().ok_or(IdentifierError::Empty)?;
    if !is_ident_start(first) {
        return Err(IdentifierError::LeadingCharacter(first));
    }
    match chars.find(|&c| !is_ident_continue(c)) {
        Some(bad) => Err(IdentifierError::InvalidCharacter(bad)),
        None => Ok(()),
    }
}

/// The nearest identifier that passes [`validate_identifier`].
///
/// Characters outside the allow-list become `_`; a first character that
/// cannot start an identifier (a digit, `-`) gets a `_` in front. Valid
/// input comes back unchanged.
pub fn repair_identifier(ident: &str) -> String {
    let mut out: String = ident
        .chars()
        .map(|c| if is_ident_continue(c) { c } else { '_' })
        .collect();
    if !out.chars().next().is_some_and(is_ident_start) {
        out.insert(0, '_');
    }
    out
}

// ── Uniqueness ──────────────────────────────────────────────────────

/// What to do when two rows of a table sanitize to the same identifier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CollisionPolicy {
    /// Later rows get the remote id appended: `<ident>_<id>`.
    #[default]
    Suffix,
    /// Later rows are not emitted.
    Reject,
    /// Emit every row under the shared identifier.
    Allow,
}

/// Outcome of a successful claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    Unique(String),
    /// The row was given `ident` instead of its sanitized name `base`,
    /// because `base` was invalid or already taken.
    Renamed { base: String, ident: String },
    /// `ident` was taken and is now shared with an earlier row.
    Shared { ident: String, first: EntityId },
}

impl Claim {
    pub fn ident(&self) -> &str {
        match self {
            Self::Unique(ident) | Self::Renamed { ident, .. } | Self::Shared { ident, .. } => {
                ident
            }
        }
    }
}

/// A claim refused under [`CollisionPolicy::Reject`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error("identifier '{ident}' is already taken by {first}")]
    Collision { ident: String, first: EntityId },
}

/// Identifiers claimed so far within one table.
#[derive(Debug, Default)]
pub struct IdentifierRegistry {
    policy: CollisionPolicy,
    claimed: HashMap<String, EntityId>,
}

impl IdentifierRegistry {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            claimed: HashMap::new(),
        }
    }

    /// Sanitize `name`, repair it onto the allow-list, and claim it for
    /// the row `id`.
    pub fn claim(&mut self, name: &str, id: &EntityId) -> Result<Claim, ClaimError> {
        let base = sanitize(name);
        let wanted = repair_identifier(&base);

        let Some(first) = self.claimed.get(&wanted).cloned() else {
            self.claimed.insert(wanted.clone(), id.clone());
            return Ok(if wanted == base {
                Claim::Unique(base)
            } else {
                Claim::Renamed {
                    base,
                    ident: wanted,
                }
            });
        };

        match self.policy {
            CollisionPolicy::Allow => Ok(Claim::Shared {
                ident: wanted,
                first,
            }),
            CollisionPolicy::Reject => Err(ClaimError::Collision {
                ident: wanted,
                first,
            }),
            CollisionPolicy::Suffix => {
                let ident = self.free_suffixed(&wanted, id);
                self.claimed.insert(ident.clone(), id.clone());
                Ok(Claim::Renamed { base, ident })
            }
        }
    }

    fn free_suffixed(&self, base: &str, id: &EntityId) -> String {
        let candidate = repair_identifier(&format!("{base}_{}", sanitize(&id.to_string())));
        if !self.claimed.contains_key(&candidate) {
            return candidate;
        }
        // Same name and same id twice in one response.
        (2_u32..)
            .map(|n| format!("{candidate}_{n}"))
            .find(|c| !self.claimed.contains_key(c))
            .unwrap_or(candidate)
    }
}
