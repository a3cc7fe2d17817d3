// cloudsigma: Async Rust client for the CloudSigma cloud infrastructure API.
//
// Every call is one request/response round trip, bound to a caller-owned
// CancellationToken and returning the decoded value next to the `Response`.

pub mod client;
pub mod credentials;
pub mod error;
pub mod options;
pub mod services;
pub mod transport;
pub mod types;

// ── Primary re-exports ──────────────────────────────────────────────
pub use client::{Client, ClientConfig, Response, Target, check_response};
pub use credentials::{
    Credentials, CredentialsProvider, CredentialsSource, TokenCredentialsProvider,
    UsernamePasswordCredentialsProvider,
};
pub use error::{ApiError, ApiErrorEntry, Error};
pub use options::ListOptions;
pub use transport::{TlsMode, TransportConfig};
pub use types::{Meta, Metadata, Owner, ResourceLink};

pub use tokio_util::sync::CancellationToken;
