//! Configuration for the dogport CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext), and
//! translation to `dogport_core::ClientConfig`, with command-line
//! [`Overrides`] applied on top of the profile.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use dogport_core::{ClientConfig, CollisionPolicy, TlsVerification};

/// Keyring service name tokens are stored under.
pub const KEYRING_SERVICE: &str = "dogport";

const REDACTED: &str = "********";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("no API endpoint configured for profile '{profile}'")]
    NoEndpoint { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named deployment profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// The profile to use: the explicit name, else `default_profile`,
    /// else `"default"`.
    pub fn profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    /// A copy safe to print: plaintext tokens are masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for profile in copy.profiles.values_mut() {
            if profile.token.is_some() {
                profile.token = Some(REDACTED.into());
            }
        }
        copy
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Identifier collision handling for `export`.
    #[serde(default)]
    pub on_collision: CollisionPolicy,

    /// Keep exporting after a table fails.
    #[serde(default)]
    pub keep_going: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            on_collision: CollisionPolicy::default(),
            keep_going: false,
        }
    }
}

fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named dog deployment.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// API base URL (e.g., "https://dog.example.com").
    pub endpoint: Option<String>,

    /// API token (plaintext; prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the API token.
    pub token_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "dogport", "dogport").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("dogport");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. A missing file yields the defaults.
///
/// `DOGPORT_`-prefixed variables override the file; nested keys use `__`
/// (`DOGPORT_DEFAULTS__TIMEOUT=60`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("DOGPORT_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the API token from the profile's credential chain.
///
/// Order: the profile's `token_env` variable, the system keyring entry
/// `<profile>/token`, then the plaintext `token`.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            debug!(profile = profile_name, env = %env_name, "token from environment");
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token")) {
        if let Ok(secret) = entry.get_password() {
            debug!(profile = profile_name, "token from keyring");
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// TLS mode implied by a profile, falling back to the global default.
pub fn profile_tls(profile: &Profile, defaults: &Defaults) -> TlsVerification {
    if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    }
}

pub fn parse_endpoint(raw: &str) -> Result<url::Url, ConfigError> {
    raw.parse().map_err(|e| ConfigError::Validation {
        field: "endpoint".into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })
}

/// Settings given on the command line (or its `DOG_API_*` / `DOGPORT_*`
/// variables). Each one beats the profile.
#[derive(Debug, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub token: Option<SecretString>,
    pub insecure: bool,
    pub timeout: Option<u64>,
}

/// Build a `ClientConfig` from a profile plus overrides.
///
/// Endpoint: override, then profile. Token: override, then
/// [`resolve_token`]. TLS: `insecure` override, then [`profile_tls`].
/// Timeout: override, then profile, then `defaults.timeout`.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
    overrides: &Overrides,
) -> Result<ClientConfig, ConfigError> {
    let endpoint = overrides
        .endpoint
        .as_deref()
        .or(profile.endpoint.as_deref())
        .ok_or_else(|| ConfigError::NoEndpoint {
            profile: profile_name.into(),
        })?;

    let token = match overrides.token {
        Some(ref token) => token.clone(),
        None => resolve_token(profile, profile_name)?,
    };

    let tls = if overrides.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        profile_tls(profile, defaults)
    };

    let timeout = overrides
        .timeout
        .or(profile.timeout)
        .unwrap_or(defaults.timeout);

    Ok(ClientConfig {
        endpoint: parse_endpoint(endpoint)?,
        token,
        tls,
        timeout: Duration::from_secs(timeout),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = load_config_from(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("default"));
        assert_eq!(config.defaults.timeout, 30);
        assert_eq!(config.defaults.on_collision, CollisionPolicy::Suffix);
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn profiles_load_from_toml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "prod"

[defaults]
timeout = 10
on_collision = "reject"

[profiles.prod]
endpoint = "https://dog.example.com"
token_env = "PATH"
insecure = true
"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.profile_name(None), "prod");
        assert_eq!(config.profile_name(Some("qa")), "qa");
        assert_eq!(config.defaults.on_collision, CollisionPolicy::Reject);

        let prod = &config.profiles["prod"];
        let client =
            profile_to_client_config(prod, "prod", &config.defaults, &Overrides::default())
                .unwrap();
        assert_eq!(client.endpoint.as_str(), "https://dog.example.com/");
        assert_eq!(client.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(client.timeout, Duration::from_secs(10));
    }

    #[test]
    fn token_env_takes_precedence_over_plaintext() {
        let profile = Profile {
            token: Some("plaintext".into()),
            token_env: Some("PATH".into()),
            ..Profile::default()
        };
        let token = resolve_token(&profile, "default").unwrap();
        assert_ne!(token.expose_secret(), "plaintext");
    }

    #[test]
    fn ca_cert_selects_custom_ca() {
        let profile = Profile {
            ca_cert: Some("/etc/dog/ca.pem".into()),
            ..Profile::default()
        };
        assert_eq!(
            profile_tls(&profile, &Defaults::default()),
            TlsVerification::CustomCa("/etc/dog/ca.pem".into())
        );
        assert_eq!(
            profile_tls(&Profile::default(), &Defaults::default()),
            TlsVerification::SystemDefaults
        );
    }

    #[test]
    fn missing_endpoint_is_reported() {
        let err = profile_to_client_config(
            &Profile::default(),
            "qa",
            &Defaults::default(),
            &Overrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NoEndpoint { profile } if profile == "qa"));
    }

    #[test]
    fn overrides_beat_the_profile() {
        let profile = Profile {
            endpoint: Some("https://dog.example.com".into()),
            token: Some("plaintext".into()),
            timeout: Some(5),
            ..Profile::default()
        };
        let overrides = Overrides {
            endpoint: Some("https://dog-qa.example.com".into()),
            token: Some(SecretString::from("flag-token".to_owned())),
            insecure: true,
            timeout: Some(90),
        };
        let client =
            profile_to_client_config(&profile, "qa", &Defaults::default(), &overrides).unwrap();
        assert_eq!(client.endpoint.as_str(), "https://dog-qa.example.com/");
        assert_eq!(client.token.expose_secret(), "flag-token");
        assert_eq!(client.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(client.timeout, Duration::from_secs(90));
    }

    #[test]
    fn overrides_work_without_a_profile() {
        let overrides = Overrides {
            endpoint: Some("https://dog.example.com/api/V2".into()),
            token: Some(SecretString::from("t".to_owned())),
            ..Overrides::default()
        };
        let client =
            profile_to_client_config(&Profile::default(), "default", &Defaults::default(), &overrides)
                .unwrap();
        assert_eq!(client.tls, TlsVerification::SystemDefaults);
        assert_eq!(client.timeout, Duration::from_secs(30));
    }

    #[test]
    fn redacted_masks_tokens() {
        let mut config = Config::default();
        config.profiles.insert(
            "prod".into(),
            Profile {
                token: Some("s3cret".into()),
                ..Profile::default()
            },
        );
        let text = config.redacted().to_toml().unwrap();
        assert!(!text.contains("s3cret"));
        assert!(text.contains(REDACTED));
    }
}
