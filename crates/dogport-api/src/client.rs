// Hand-crafted async HTTP client for the dog V2 API.
//
// Base path: /api/V2/
// Auth: bearer token header

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types;

const API_PREFIX: &str = "/api/V2";

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

/// Options for the ruleset listing call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RulesetQuery {
    /// Ask the service to denormalize rule references into names
    /// (group / zone / service names instead of opaque ids).
    pub names: bool,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the dog V2 API.
///
/// Uses bearer-token authentication and communicates via JSON REST
/// endpoints under `/api/V2/`.
pub struct DogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DogClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API token and transport config.
    ///
    /// Injects `Authorization: Bearer <token>` as a default header on
    /// every request.
    pub fn from_token(
        endpoint: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::Authentication {
                status: 0,
                message: format!("invalid API token header value: {e}"),
            })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);

        let http = transport.build_client(headers)?;
        let base_url = Self::normalize_base_url(endpoint)?;

        Ok(Self { http, base_url })
    }

    /// Build the base URL, appending `/api/V2/` unless already present.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with(API_PREFIX) {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}{API_PREFIX}/"));
        }

        Ok(url)
    }

    /// The normalized base URL (always ends in `/api/V2/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status == StatusCode::OK {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let parsed = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.message);
        let message = match parsed {
            Some(m) => m,
            None if !raw.is_empty() => raw,
            None => status.to_string(),
        };

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Error::Authentication {
                status: status.as_u16(),
                message,
            }
        } else {
            Error::Status {
                status: status.as_u16(),
                message,
            }
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub async fn list_groups(&self) -> Result<Vec<types::GroupResponse>, Error> {
        self.get("groups").await
    }

    pub async fn list_hosts(&self) -> Result<Vec<types::HostResponse>, Error> {
        self.get("hosts").await
    }

    pub async fn list_links(&self) -> Result<Vec<types::LinkResponse>, Error> {
        self.get("links").await
    }

    pub async fn list_services(&self) -> Result<Vec<types::ServiceResponse>, Error> {
        self.get("services").await
    }

    pub async fn list_zones(&self) -> Result<Vec<types::ZoneResponse>, Error> {
        self.get("zones").await
    }

    pub async fn list_rulesets(
        &self,
        query: &RulesetQuery,
    ) -> Result<Vec<types::RulesetResponse>, Error> {
        if query.names {
            self.get_with_params("rulesets", &[("names", "true".to_owned())])
                .await
        } else {
            self.get("rulesets").await
        }
    }

    pub async fn list_profiles(&self) -> Result<Vec<types::ProfileResponse>, Error> {
        self.get("profiles").await
    }

    pub async fn list_facts(&self) -> Result<Vec<types::FactResponse>, Error> {
        self.get("facts").await
    }
}
