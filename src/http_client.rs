use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use tracing::debug;

use crate::error::{ApiError, ApiResult};

pub const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io";
pub const API_KEY_HEADER: &str = "x-apisports-key";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// One GET against the upstream host. Implementations must be safe to call
/// repeatedly with the same arguments.
pub trait Transport {
    fn get(&self, path: &str, query: &[(&str, String)], api_key: &str) -> ApiResult<RawResponse>;
}

// The inner client pools keep-alive connections to the upstream host.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Build)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str, query: &[(&str, String)], api_key: &str) -> ApiResult<RawResponse> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, ?query, "GET");

        let network = |source| ApiError::Network {
            path: path.to_string(),
            source,
        };
        let resp = self
            .client
            .get(&url)
            .query(query)
            .header(API_KEY_HEADER, api_key)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, concat!("soccer_stats/", env!("CARGO_PKG_VERSION")))
            .send()
            .map_err(network)?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(network)?;
        debug!(status, bytes = body.len(), "response");
        Ok(RawResponse { status, body })
    }
}
