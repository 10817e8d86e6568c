use thiserror::Error;

/// Top-level error type for the `dogport-api` crate.
///
/// Covers every failure mode of a list call: authentication, transport,
/// non-200 responses and body decoding. `dogport-core` maps these into
/// export diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token rejected by the service (HTTP 401 / 403).
    #[error("Authentication failed (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake, certificate or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Status ──────────────────────────────────────────────────────
    /// Any response other than HTTP 200.
    #[error("API error (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the service rejected the credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if the request timed out in transit.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if no connection could be established.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_exposed_for_http_failures() {
        let err = Error::Status {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_auth());
    }

    #[test]
    fn authentication_is_classified() {
        let err = Error::Authentication {
            status: 401,
            message: "bad token".into(),
        };
        assert!(err.is_auth());
        assert_eq!(err.to_string(), "Authentication failed (HTTP 401): bad token");
    }

    #[test]
    fn deserialization_has_no_status() {
        let err = Error::Deserialization {
            message: "expected array".into(),
            body: "{}".into(),
        };
        assert_eq!(err.status(), None);
    }
}
