// ── Runtime connection configuration ──
//
// These types describe *how* to reach the dog API. They carry credential
// data and connection tuning, but never touch disk. The CLI constructs a
// `ClientConfig` and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use dogport_api::{DogClient, TlsMode, TransportConfig};

use crate::error::CoreError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// Everything needed to build an API client for one dog deployment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API endpoint (e.g., `https://dog.example.com`).
    pub endpoint: Url,
    /// Bearer token.
    pub token: SecretString,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }

    /// Build the API client this configuration describes.
    pub fn build_client(&self) -> Result<DogClient, CoreError> {
        Ok(DogClient::from_token(
            self.endpoint.as_str(),
            &self.token,
            &self.transport(),
        )?)
    }
}
