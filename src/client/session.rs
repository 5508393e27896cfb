//! HTTP session to the Insight cloud.
//!
//! One [`InsightClient`] owns the configuration and a single transport
//! handle, created at most once and reused for the lifetime of the client.
//! Verb primitives issue requests relative to `base_url + "api/v1/"`;
//! [`InsightClient::call_cloud`] is the dispatch primitive every caller goes
//! through: it executes a request, drains the response body into an owned
//! [`RawResponse`] and hands it to a response handler, converting transport
//! failures into an absent result.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT_ENCODING, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

use crate::api::endpoint::HttpMethod;
use crate::client::config::{Authentication, InsightConfiguration};
use crate::error::{InsightError, Result};

/// Path prefix of the public API, appended to the configured base URL.
pub const API_PATH: &str = "api/v1/";

/// Header carrying the token in token authentication mode.
pub const TOKEN_HEADER: &str = "X-Authentication-Token";

/// Headers whose values never reach the logs.
const REDACTED_HEADERS: [&str; 3] = [
    "authorization",
    "proxy-authorization",
    "x-authentication-token",
];

fn redacted(name: &str, value: &str) -> String {
    if REDACTED_HEADERS
        .iter()
        .any(|h| h.eq_ignore_ascii_case(name))
    {
        "******".to_string()
    } else {
        value.to_string()
    }
}

/// A fully drained HTTP response.
///
/// The body is read before any handler runs, so the transport connection is
/// released on every exit path regardless of what the handler does.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: u16,
    reason: &'static str,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl RawResponse {
    fn drain(response: reqwest::blocking::Response) -> Result<Self> {
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes()?.to_vec();
        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or(""),
            headers,
            body,
        })
    }

    /// HTTP 2xx.
    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn code(&self) -> u16 {
        self.status
    }

    /// Canonical reason phrase for the status code.
    pub fn message(&self) -> &str {
        self.reason
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// Connection-managed client to the Insight cloud.
pub struct InsightClient {
    configuration: InsightConfiguration,
    transport: Mutex<Option<Client>>,
}

impl InsightClient {
    pub fn new(configuration: InsightConfiguration) -> Self {
        InsightClient {
            configuration,
            transport: Mutex::new(None),
        }
    }

    pub fn configuration(&self) -> &InsightConfiguration {
        &self.configuration
    }

    pub fn url(&self) -> &str {
        self.configuration.url()
    }

    pub fn project_id(&self) -> &str {
        self.configuration.project_id()
    }

    fn transport_slot(&self) -> MutexGuard<'_, Option<Client>> {
        self.transport.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Build the transport and select the authentication strategy.
    ///
    /// Replaces any existing handle. The verb primitives connect lazily on
    /// first use instead and never replace a live handle.
    pub fn connect(&self) -> Result<()> {
        let client = self.build_transport()?;
        *self.transport_slot() = Some(client);
        Ok(())
    }

    /// Whether a transport handle exists.
    pub fn is_connected(&self) -> bool {
        self.transport_slot().is_some()
    }

    fn build_transport(&self) -> Result<Client> {
        if let Authentication::Basic { username, .. } = self.configuration.authentication() {
            if username.is_empty() {
                return Err(InsightError::InvalidParameters(
                    "basic authentication requires a username".to_string(),
                ));
            }
        }

        let mut headers = HeaderMap::new();
        // Disable compression so body length semantics stay deterministic.
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

        debug!(
            "connecting to {} (project {})",
            self.configuration.url(),
            self.configuration.project_id()
        );
        Client::builder()
            .default_headers(headers)
            .connect_timeout(self.configuration.connection_timeout())
            .timeout(
                self.configuration
                    .read_timeout()
                    .max(self.configuration.write_timeout()),
            )
            .build()
            .map_err(|e| InsightError::Configuration(format!("failed to build transport: {e}")))
    }

    /// Reuse the transport handle, creating it when none exists yet.
    fn transport(&self) -> Result<Client> {
        let mut slot = self.transport_slot();
        match &*slot {
            Some(client) => Ok(client.clone()),
            None => {
                debug!("no transport handle yet, connecting lazily");
                let client = self.build_transport()?;
                *slot = Some(client.clone());
                Ok(client)
            }
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}{}", self.configuration.url(), API_PATH, path)
    }

    /// Issue one request and drain the response.
    fn send(
        &self,
        method: HttpMethod,
        path: &str,
        headers: Option<&HashMap<String, String>>,
        body: Option<&str>,
    ) -> Result<RawResponse> {
        let client = self.transport()?;
        let url = self.api_url(path);
        debug!("{} {}", method, url);

        let mut request = match method {
            HttpMethod::Get => client.get(&url),
            HttpMethod::Post => client.post(&url),
            HttpMethod::Put => client.put(&url),
            HttpMethod::Delete => client.delete(&url),
        };

        request = match self.configuration.authentication() {
            Authentication::Basic { username, secret } => {
                request.basic_auth(username, Some(secret))
            }
            Authentication::Token { secret } => request.header(TOKEN_HEADER, secret),
        };

        if let Some(headers) = headers {
            for (name, value) in headers {
                trace!("  {}: {}", name, redacted(name, value));
                request = request.header(name, value);
            }
        }

        if let Some(json) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(json.to_string());
        }

        let raw = RawResponse::drain(request.send()?)?;
        debug!("response status: {} {}", raw.code(), raw.message());
        Ok(raw)
    }

    /// Execute `action` and pass the drained response to `handler`.
    ///
    /// When no transport handle exists the call is a soft failure: a warning
    /// is logged and `None` returned without any I/O. Transport failures and
    /// handler failures are logged and collapsed to `None` as well, so a
    /// caller cannot tell a network error apart from a handler that produced
    /// no data.
    pub fn call_cloud<T>(
        &self,
        action: impl FnOnce() -> Result<RawResponse>,
        handler: impl FnOnce(&RawResponse) -> Result<Option<T>>,
    ) -> Option<T> {
        if !self.is_connected() {
            warn!("insight cloud client is not configured or unavailable");
            return None;
        }

        match action() {
            Ok(response) => match handler(&response) {
                Ok(value) => value,
                Err(err) => {
                    warn!("response handler failed: {}", err);
                    None
                }
            },
            Err(err) => {
                warn!("transport failure: {}", err);
                None
            }
        }
    }

    pub fn get(&self, path: &str, headers: Option<&HashMap<String, String>>) -> Result<RawResponse> {
        self.send(HttpMethod::Get, path, headers, None)
    }

    pub fn post(
        &self,
        path: &str,
        headers: Option<&HashMap<String, String>>,
        json: &str,
    ) -> Result<RawResponse> {
        self.send(HttpMethod::Post, path, headers, Some(json))
    }

    pub fn put(
        &self,
        path: &str,
        headers: Option<&HashMap<String, String>>,
        json: &str,
    ) -> Result<RawResponse> {
        self.send(HttpMethod::Put, path, headers, Some(json))
    }

    pub fn delete(
        &self,
        path: &str,
        headers: Option<&HashMap<String, String>>,
        json: &str,
    ) -> Result<RawResponse> {
        self.send(HttpMethod::Delete, path, headers, Some(json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::config::InsightConfiguration;

    fn client() -> InsightClient {
        let config = InsightConfiguration::builder()
            .url("http://localhost:5089")
            .project_id("test")
            .authentication(Authentication::basic("Administrator", "Administrator"))
            .build()
            .expect("config");
        InsightClient::new(config)
    }

    #[test]
    fn api_url_appends_prefix_and_path() {
        let client = client();
        assert_eq!(
            client.api_url("ai_export/init/test?corpora=abc"),
            "http://localhost:5089/api/v1/ai_export/init/test?corpora=abc"
        );
    }

    #[test]
    fn starts_disconnected() {
        assert!(!client().is_connected());
    }

    #[test]
    fn connect_creates_transport_handle() {
        let client = client();
        client.connect().expect("connect");
        assert!(client.is_connected());
    }

    #[test]
    fn call_cloud_soft_fails_when_disconnected() {
        let client = client();
        let result: Option<String> = client.call_cloud(
            || panic!("action must not run while disconnected"),
            |_| panic!("handler must not run while disconnected"),
        );
        assert!(result.is_none());
    }

    #[test]
    fn connect_rejects_basic_auth_without_username() {
        let config = InsightConfiguration::builder()
            .url("http://localhost:5089")
            .project_id("test")
            .authentication(Authentication::basic("", "secret"))
            .build()
            .expect("config");
        let client = InsightClient::new(config);
        let err = client.connect().expect_err("empty username");
        assert!(matches!(err, InsightError::InvalidParameters(_)));
        assert!(!client.is_connected());
    }

    #[test]
    fn sensitive_headers_are_redacted() {
        assert_eq!(redacted("X-Authentication-Token", "tok"), "******");
        assert_eq!(redacted("authorization", "Basic abc"), "******");
        assert_eq!(redacted("X-Scroll-Id", "cursor-1"), "cursor-1");
    }
}
