//! CLI configuration: a thin wrapper around `dogport_config`.
//!
//! Turns `GlobalOpts` flags (--endpoint, --token, --insecure, --timeout)
//! into `Overrides` for the active profile.

use secrecy::SecretString;

use dogport_config::{Config, Overrides, Profile};
use dogport_core::ClientConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use dogport_config::{config_path, load_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.profile_name(global.profile.as_deref())
}

fn overrides(global: &GlobalOpts) -> Overrides {
    Overrides {
        endpoint: global.endpoint.clone(),
        token: global.token.clone().map(SecretString::from),
        insecure: global.insecure,
        timeout: global.timeout,
    }
}

/// Build a `ClientConfig` from the active profile plus flag overrides.
///
/// A missing profile is not an error on its own: `--endpoint` and
/// `--token` (or their environment variables) are enough.
pub fn resolve_client_config(
    global: &GlobalOpts,
    config: &Config,
    profile_name: &str,
) -> Result<ClientConfig, CliError> {
    let fallback = Profile::default();
    let profile = config.profiles.get(profile_name).unwrap_or(&fallback);

    Ok(dogport_config::profile_to_client_config(
        profile,
        profile_name,
        &config.defaults,
        &overrides(global),
    )?)
}
