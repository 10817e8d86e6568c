//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use dogport_config::ConfigError;
use dogport_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the dog API at {url}")]
    #[diagnostic(
        code(dogport::connection_failed),
        help(
            "{reason}\n\
             Check the endpoint, or pass --insecure (-k) for self-signed certificates."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(dogport::timeout),
        help("Increase the timeout with --timeout or check the API's responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(dogport::auth_failed),
        help("Verify the API token for profile '{profile}' (--token or DOG_API_TOKEN).")
    )]
    AuthFailed { message: String, profile: String },

    #[error("No API token configured for profile '{profile}'")]
    #[diagnostic(
        code(dogport::no_credentials),
        help(
            "Pass --token, set DOG_API_TOKEN, set token_env in the profile,\n\
             or store the token in the system keyring under service 'dogport',\n\
             account '{profile}/token'."
        )
    )]
    NoCredentials { profile: String },

    #[error("No API endpoint configured for profile '{profile}'")]
    #[diagnostic(
        code(dogport::no_endpoint),
        help(
            "Pass --endpoint, set DOG_API_ENDPOINT, or add `endpoint` to the profile in\n\
             {path}"
        )
    )]
    NoEndpoint { profile: String, path: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    #[diagnostic(code(dogport::api_error))]
    Api { message: String, status: Option<u16> },

    // ── Export ───────────────────────────────────────────────────────
    #[error("Cannot write {path}")]
    #[diagnostic(
        code(dogport::write_failed),
        help("Check that the output directory is writable.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Export incomplete: {failed} table(s) failed or dropped rows")]
    #[diagnostic(
        code(dogport::export_incomplete),
        help("See the warnings above. Use --on-collision suffix to keep colliding rows.")
    )]
    ExportIncomplete { failed: usize },

    #[error("Tables depend on each other in a cycle: {0}")]
    #[diagnostic(code(dogport::dependency_cycle))]
    DependencyCycle(String),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(dogport::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(dogport::config))]
    Config(Box<figment::Error>),

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. } | Self::NoEndpoint { .. } => exit_code::USAGE,
            Self::Api { .. }
            | Self::Write { .. }
            | Self::ExportIncomplete { .. }
            | Self::DependencyCycle(_)
            | Self::Config(_)
            | Self::Io(_) => exit_code::GENERAL,
        }
    }

    /// Name the active profile in authentication help text.
    pub fn with_profile(self, name: &str) -> Self {
        match self {
            Self::AuthFailed { message, .. } => Self::AuthFailed {
                message,
                profile: name.to_owned(),
            },
            other => other,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed {
                message,
                profile: "current".into(),
            },
            CoreError::Timeout => CliError::Timeout,
            CoreError::Api { message, status } => CliError::Api { message, status },
            CoreError::Write { path, source } => CliError::Write {
                path: path.display().to_string(),
                source,
            },
            CoreError::InvalidEnvironment { label, reason } => CliError::Validation {
                field: "environment".into(),
                reason: format!("'{label}' {reason}"),
            },
            err @ CoreError::DependencyCycle(_) => CliError::DependencyCycle(err.to_string()),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::NoEndpoint { profile } => CliError::NoEndpoint {
                profile,
                path: dogport_config::config_path().display().to_string(),
            },
            ConfigError::Serialization(e) => CliError::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
            ConfigError::Figment(e) => CliError::Config(e),
        }
    }
}
