use thiserror::Error;

pub type Result<T> = std::result::Result<T, InsightError>;

/// Error taxonomy of the client.
///
/// Transport failures never surface through this type: the dispatcher logs
/// them and collapses the call to its negative sentinel (see
/// [`crate::InsightClient::call_cloud`]). The `Http` variant exists only as
/// the internal channel between the request primitives and the dispatcher.
#[derive(Debug, Error)]
pub enum InsightError {
    /// The session is unusable as configured: bad authentication data, a
    /// transport that could not be built, or a family caller that requires an
    /// active client.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A required parameter failed validation before any request was built.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// An endpoint variant was asked to resolve a path shape it does not
    /// support.
    #[error("invalid API call for {0}")]
    UnsupportedPath(&'static str),

    /// Dispatch received an endpoint value outside the recognized set. The
    /// families are closed enums, so this is unreachable from safe callers.
    #[error("no such endpoint: {0}")]
    InvalidEndpoint(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
