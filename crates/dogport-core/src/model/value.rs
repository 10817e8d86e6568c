// ── Dynamically typed variable values ──

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A variable value as stored on groups, hosts and facts.
///
/// Typed once when the API payload is decoded (see `convert`), so renderers
/// match on a closed set of shapes instead of raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<VarValue>),
    Map(VarMap),
}

/// Key/value variables. Ordered so that output is stable across runs.
pub type VarMap = BTreeMap<String, VarValue>;

impl VarValue {
    /// Integer view of a number, truncating any fractional part.
    ///
    /// `None` when the truncated value does not fit an `i64`; see
    /// [`VarValue::integer_text`] for those.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::as_conversions
    )]
    pub fn as_truncated_integer(&self) -> Option<i64> {
        let Self::Number(n) = self else {
            return None;
        };
        if let Some(i) = n.as_i64() {
            return Some(i);
        }
        if n.is_u64() {
            return None;
        }
        let f = n.as_f64()?.trunc();
        // 2^63 is exactly representable; anything at or above it overflows.
        (f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
    }

    /// Decimal digits of the truncated number, at any magnitude.
    pub fn integer_text(&self) -> Option<String> {
        let Self::Number(n) = self else {
            return None;
        };
        if let Some(u) = n.as_u64() {
            return Some(u.to_string());
        }
        if let Some(i) = n.as_i64() {
            return Some(i.to_string());
        }
        n.as_f64().map(|f| format!("{:.0}", f.trunc()))
    }
}

impl From<&str> for VarValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<i64> for VarValue {
    fn from(i: i64) -> Self {
        Self::Number(i.into())
    }
}

impl From<bool> for VarValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
