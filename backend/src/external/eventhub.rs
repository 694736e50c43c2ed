//! Azure Event Hubs client
//!
//! Sends events through the Event Hubs REST API, authenticated with a Shared
//! Access Signature derived from the namespace connection string.

use std::str::FromStr;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use sha2::Sha256;

use crate::error::{SimError, SimResult};

const API_VERSION: &str = "2014-01";
const EVENT_CONTENT_TYPE: &str = "application/atom+xml;type=entry;charset=utf-8";

/// Parsed namespace connection string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventHubConnection {
    /// Namespace host, e.g. `farm.servicebus.windows.net`
    pub host: String,
    pub key_name: String,
    pub key: String,
    /// Hub name when the string was issued for a single hub
    pub entity_path: Option<String>,
}

impl FromStr for EventHubConnection {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut host = None;
        let mut key_name = None;
        let mut key = None;
        let mut entity_path = None;

        for part in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            // Keys are base64 and may end in '=', so split on the first one only
            let (name, value) = part.split_once('=').ok_or_else(|| {
                SimError::InvalidConnectionString(format!("malformed segment '{}'", part))
            })?;

            match name {
                "Endpoint" => {
                    let endpoint = value.trim_end_matches('/');
                    let stripped = endpoint
                        .strip_prefix("sb://")
                        .or_else(|| endpoint.strip_prefix("https://"))
                        .unwrap_or(endpoint);
                    host = Some(stripped.to_string());
                }
                "SharedAccessKeyName" => key_name = Some(value.to_string()),
                "SharedAccessKey" => key = Some(value.to_string()),
                "EntityPath" => entity_path = Some(value.to_string()),
                // TransportType and friends only matter to AMQP clients
                _ => {}
            }
        }

        let missing =
            |name: &str| SimError::InvalidConnectionString(format!("missing {}", name));

        Ok(Self {
            host: host.filter(|h| !h.is_empty()).ok_or_else(|| missing("Endpoint"))?,
            key_name: key_name.ok_or_else(|| missing("SharedAccessKeyName"))?,
            key: key.ok_or_else(|| missing("SharedAccessKey"))?,
            entity_path: entity_path.filter(|p| !p.is_empty()),
        })
    }
}

/// Form-urlencode a single value
fn url_encode(value: &str) -> SimResult<String> {
    let url = Url::parse_with_params("https://sas.invalid/", &[("v", value)])
        .map_err(|e| SimError::Configuration(format!("Failed to encode value: {}", e)))?;

    Ok(url
        .query()
        .and_then(|q| q.strip_prefix("v="))
        .unwrap_or_default()
        .to_string())
}

/// Build a Shared Access Signature authorization header value.
///
/// The signed string is the url-encoded resource URI and the expiry (unix
/// seconds) joined by a newline.
pub fn sas_token(resource_uri: &str, key_name: &str, key: &str, expiry: i64) -> SimResult<String> {
    type HmacSha256 = Hmac<Sha256>;

    let encoded_uri = url_encode(resource_uri)?;
    let string_to_sign = format!("{}\n{}", encoded_uri, expiry);

    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|_| SimError::Configuration("Failed to create HMAC".to_string()))?;
    mac.update(string_to_sign.as_bytes());
    let signature = BASE64.encode(mac.finalize().into_bytes());

    Ok(format!(
        "SharedAccessSignature sr={}&sig={}&se={}&skn={}",
        encoded_uri,
        url_encode(&signature)?,
        expiry,
        key_name
    ))
}

/// Event Hubs REST client
#[derive(Clone)]
pub struct EventHubClient {
    client: Client,
    connection: EventHubConnection,
    hub: String,
    base_url: String,
    token_ttl: Duration,
}

impl EventHubClient {
    /// Create a client for `connection`. The connection string's EntityPath
    /// takes precedence over `hub_name`.
    pub fn new(
        connection: EventHubConnection,
        hub_name: Option<&str>,
        timeout: Duration,
        token_ttl: Duration,
    ) -> SimResult<Self> {
        let base_url = format!("https://{}", connection.host);
        Self::with_base_url(connection, hub_name, timeout, token_ttl, base_url)
    }

    /// Create a client that posts to a custom base URL (for testing)
    pub fn with_base_url(
        connection: EventHubConnection,
        hub_name: Option<&str>,
        timeout: Duration,
        token_ttl: Duration,
        base_url: String,
    ) -> SimResult<Self> {
        let hub = connection
            .entity_path
            .clone()
            .or_else(|| hub_name.filter(|n| !n.is_empty()).map(str::to_string))
            .ok_or_else(|| {
                SimError::Configuration(
                    "Event hub name missing: set EVENTHUB_NAME or EntityPath".to_string(),
                )
            })?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            connection,
            hub,
            base_url: base_url.trim_end_matches('/').to_string(),
            token_ttl,
        })
    }

    pub fn hub(&self) -> &str {
        &self.hub
    }

    /// The URI tokens are scoped to; always the real namespace, even when
    /// posting to a custom base URL
    pub fn resource_uri(&self) -> String {
        format!("https://{}/{}", self.connection.host, self.hub)
    }

    /// Send one event body
    pub async fn send(&self, body: Vec<u8>) -> SimResult<()> {
        let expiry = Utc::now().timestamp() + self.token_ttl.as_secs() as i64;
        let token = sas_token(
            &self.resource_uri(),
            &self.connection.key_name,
            &self.connection.key,
            expiry,
        )?;

        let url = format!(
            "{}/{}/messages?api-version={}",
            self.base_url, self.hub, API_VERSION
        );

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, token)
            .header(CONTENT_TYPE, EVENT_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SimError::Rejected { status, body });
        }

        Ok(())
    }
}
