use std::fmt;

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use url::Url;

/// Top-level error type for the `cloudsigma` crate.
///
/// Covers every failure mode of a single API call, from client
/// configuration through body decoding. Nothing in this crate logs or
/// retries on error; every variant is handed back to the caller.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// The API endpoint path does not end with `/`, so relative paths
    /// would resolve against the wrong directory.
    #[error("API endpoint must have a trailing slash, but {endpoint:?} does not")]
    InvalidEndpoint { endpoint: String },

    /// URL parsing or resolution error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Validation ──────────────────────────────────────────────────
    /// A required identifier was empty.
    #[error("argument cannot be empty")]
    EmptyArgument,

    /// An identifier that would resolve to a different path (`.` or `..`).
    #[error("invalid identifier: {id:?}")]
    InvalidId { id: String },

    /// A required payload was missing or carried nothing to send.
    #[error("empty payload not allowed")]
    EmptyPayload,

    // ── Credentials ─────────────────────────────────────────────────
    /// The credentials provider could not produce usable credentials.
    #[error("invalid credentials: {reason}")]
    Credentials { reason: String },

    /// A header value (user agent, token) is not valid in an HTTP header.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The caller's cancellation token fired before the call completed.
    #[error("request cancelled")]
    Cancelled,

    // ── Protocol ────────────────────────────────────────────────────
    /// The API answered with a status outside 200..=299.
    #[error(transparent)]
    Api(Box<ApiError>),

    /// An action that must return one object returned none.
    #[error("{action} response contained no objects")]
    EmptyResult { action: &'static str },

    // ── Data ────────────────────────────────────────────────────────
    /// A success body did not match the expected shape, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// An error status came back with a body that is not the error array.
    #[error("HTTP {status}: malformed error body: {message}")]
    MalformedErrorBody {
        status: u16,
        message: String,
        body: String,
    },

    /// The request body could not be encoded as JSON.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Writing a raw response body into the caller's sink failed.
    #[error("failed to write response body: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Self::Api(Box::new(err))
    }
}

impl Error {
    /// Returns `true` if the call was abandoned because its token was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Returns `true` if the call failed before anything was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyArgument
                | Self::InvalidId { .. }
                | Self::EmptyPayload
                | Self::Credentials { .. }
        )
    }

    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(err) => Some(err.status),
            Self::MalformedErrorBody { status, .. } => StatusCode::from_u16(*status).ok(),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// The `X-REQUEST-ID` of the failed response, for support escalation.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Api(err) => err.request_id.as_deref(),
            _ => None,
        }
    }

    /// The structured error entries returned by the API, if any.
    pub fn api_errors(&self) -> &[ApiErrorEntry] {
        match self {
            Self::Api(err) => &err.errors,
            _ => &[],
        }
    }
}

// ── API error payload ────────────────────────────────────────────────

/// One entry of the error array returned on non-2xx responses.
///
/// ```json
/// [{ "error_message": "...", "error_point": "cpu", "error_type": "validation" }]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorEntry {
    #[serde(rename = "error_message", default, deserialize_with = "null_as_empty")]
    pub message: String,
    /// Field or parameter implicated, when the API names one.
    #[serde(rename = "error_point", default)]
    pub point: Option<String>,
    #[serde(rename = "error_type", default)]
    pub error_type: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl fmt::Display for ApiErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{message: {:?}, point: {:?}, type: {:?}}}",
            self.message,
            self.point.as_deref().unwrap_or_default(),
            self.error_type.as_deref().unwrap_or_default(),
        )
    }
}

/// A non-2xx response, with the decoded error entries.
///
/// The display form is `METHOD URL: STATUS (request "ID") [entries]` and is
/// kept stable so logs stay greppable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub method: Method,
    pub url: Url,
    pub status: StatusCode,
    /// Decoded error entries. Empty when the response had no body.
    pub errors: Vec<ApiErrorEntry>,
    pub request_id: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.method, self.url, self.status.as_u16())?;
        if let Some(id) = &self.request_id {
            write!(f, " (request {id:?})")?;
        }
        f.write_str(" [")?;
        for (i, entry) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{entry}")?;
        }
        f.write_str("]")
    }
}

impl std::error::Error for ApiError {}
