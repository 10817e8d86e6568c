// ── Core error types ──
//
// Errors from the export engine. API failures are translated from
// `dogport_api::Error` into domain variants so the CLI never has to look
// at HTTP details.

use std::path::PathBuf;

use thiserror::Error;

use crate::table::Table;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to the dog API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Output errors ────────────────────────────────────────────────
    #[error("Cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Invalid environment label '{label}': {reason}")]
    InvalidEnvironment { label: String, reason: String },

    #[error("Dependency cycle between tables: {}", format_cycle(.0))]
    DependencyCycle(Vec<Table>),
}

fn format_cycle(tables: &[Table]) -> String {
    tables
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl CoreError {
    /// Wrap an I/O error with the path it happened on.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<dogport_api::Error> for CoreError {
    fn from(err: dogport_api::Error) -> Self {
        match err {
            dogport_api::Error::Authentication { message, .. } => {
                CoreError::AuthenticationFailed { message }
            }
            dogport_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            dogport_api::Error::InvalidUrl(e) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("invalid URL: {e}"),
            },
            dogport_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            dogport_api::Error::Status { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            dogport_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("unexpected response body: {message}"),
                status: None,
            },
        }
    }
}
