//! Session configuration and authentication modes.
//!
//! The configuration is validated once at build time and immutable
//! afterwards; a single [`InsightConfiguration`] is safely shared by every
//! caller issued against the client built from it.

use std::env;
use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{InsightError, Result};

/// Datasource assigned to calls that do not name one.
pub const DEFAULT_DATASOURCE: &str = "dev";

const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(600);
const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(600);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Authentication mode, selected once at connect time.
#[derive(Clone)]
pub enum Authentication {
    /// HTTP Basic with username and secret.
    Basic { username: String, secret: String },
    /// Opaque token carried in the `X-Authentication-Token` header.
    Token { secret: String },
}

impl Authentication {
    pub fn basic(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Authentication::Basic {
            username: username.into(),
            secret: secret.into(),
        }
    }

    pub fn token(secret: impl Into<String>) -> Self {
        Authentication::Token {
            secret: secret.into(),
        }
    }
}

// Secrets never reach Debug output.
impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authentication::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            Authentication::Token { .. } => f.debug_struct("Token").finish_non_exhaustive(),
        }
    }
}

/// Immutable configuration of an [`crate::InsightClient`].
#[derive(Debug, Clone)]
pub struct InsightConfiguration {
    url: String,
    project_id: String,
    datasource: String,
    authentication: Authentication,
    read_timeout: Duration,
    write_timeout: Duration,
    connection_timeout: Duration,
}

impl InsightConfiguration {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Build a configuration from `INSIGHT_*` environment variables.
    ///
    /// Requires `INSIGHT_URL`, `INSIGHT_PROJECT` and either `INSIGHT_TOKEN`
    /// or `INSIGHT_USERNAME` + `INSIGHT_SECRET`. `INSIGHT_DATASOURCE` and
    /// `INSIGHT_TIMEOUT_MS` override the defaults. Returns `None` when the
    /// required variables are absent or the result does not validate.
    pub fn from_env() -> Option<Self> {
        let url = env::var("INSIGHT_URL").ok()?;
        let project_id = env::var("INSIGHT_PROJECT").ok()?;
        let authentication = match env::var("INSIGHT_TOKEN") {
            Ok(token) => Authentication::token(token),
            Err(_) => Authentication::basic(
                env::var("INSIGHT_USERNAME").ok()?,
                env::var("INSIGHT_SECRET").ok()?,
            ),
        };

        let mut builder = Self::builder()
            .url(url)
            .project_id(project_id)
            .authentication(authentication);
        if let Ok(datasource) = env::var("INSIGHT_DATASOURCE") {
            if !datasource.trim().is_empty() {
                builder = builder.datasource(datasource);
            }
        }
        if let Some(timeout) = env::var("INSIGHT_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            let timeout = Duration::from_millis(timeout);
            builder = builder.read_timeout(timeout).write_timeout(timeout);
        }
        builder.build().ok()
    }

    /// Base URL without a trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn datasource(&self) -> &str {
        &self.datasource
    }

    pub fn authentication(&self) -> &Authentication {
        &self.authentication
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    pub fn write_timeout(&self) -> Duration {
        self.write_timeout
    }

    pub fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }
}

#[derive(Debug, Default)]
pub struct Builder {
    url: Option<String>,
    project_id: Option<String>,
    datasource: Option<String>,
    authentication: Option<Authentication>,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
    connection_timeout: Option<Duration>,
}

impl Builder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn datasource(mut self, datasource: impl Into<String>) -> Self {
        self.datasource = Some(datasource.into());
        self
    }

    pub fn authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = Some(authentication);
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }

    pub fn connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = Some(timeout);
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<InsightConfiguration> {
        let url = self
            .url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| InsightError::Configuration("url is required".to_string()))?;
        Url::parse(&url)
            .map_err(|e| InsightError::Configuration(format!("invalid url {url}: {e}")))?;

        let project_id = self
            .project_id
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| InsightError::Configuration("project id is required".to_string()))?;

        let authentication = self
            .authentication
            .ok_or_else(|| InsightError::Configuration("authentication is required".to_string()))?;

        Ok(InsightConfiguration {
            url: url.trim_end_matches('/').to_string(),
            project_id,
            datasource: self
                .datasource
                .unwrap_or_else(|| DEFAULT_DATASOURCE.to_string()),
            authentication,
            read_timeout: self.read_timeout.unwrap_or(DEFAULT_READ_TIMEOUT),
            write_timeout: self.write_timeout.unwrap_or(DEFAULT_WRITE_TIMEOUT),
            connection_timeout: self.connection_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
        })
    }
}
