// Request/response engine shared by every resource service.
//
// Endpoint: https://{location}.{domain}/api/{version}/
// Auth: Basic (email + password) or Bearer token, resolved per request

use std::io::Write;
use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};
use url::Url;

use crate::credentials::{
    Credentials, CredentialsProvider, TokenCredentialsProvider, UsernamePasswordCredentialsProvider,
};
use crate::error::{ApiError, Error};
use crate::options::{ListOptions, action_path, with_list_options};
use crate::services::{
    AclsService, CapabilitiesService, CloudStatusService, DrivesService, FirewallPoliciesService,
    IpsService, KeypairsService, LibraryDrivesService, LicensesService, LocationsService,
    ProfileService, PubkeysService, RemoteSnapshotsService, ServersService, SnapshotsService,
    SubscriptionsService, TagsService, VlansService,
};
use crate::transport::TransportConfig;
use crate::types::{CreateRequest, ListRoot, Meta};

pub const DEFAULT_LOCATION: &str = "zrh";
pub const DEFAULT_DOMAIN: &str = "cloudsigma.com";
pub const DEFAULT_API_VERSION: &str = "2.0";
pub const DEFAULT_USER_AGENT: &str = concat!("cloudsigma-sdk-rust/", env!("CARGO_PKG_VERSION"));

/// Response header carrying the per-request correlation id.
pub const HEADER_REQUEST_ID: &str = "X-REQUEST-ID";

const MEDIA_TYPE: &str = "application/json";

// ── Configuration ────────────────────────────────────────────────────

/// Everything needed to build a [`Client`] besides credentials.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Region sub-domain, e.g. `zrh`, `fra`, `sjc`.
    pub location: String,
    pub domain: String,
    pub api_version: String,
    pub user_agent: String,
    pub transport: TransportConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.into(),
            domain: DEFAULT_DOMAIN.into(),
            api_version: DEFAULT_API_VERSION.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            transport: TransportConfig::default(),
        }
    }
}

impl ClientConfig {
    /// The API endpoint this config points at.
    pub fn endpoint(&self) -> Result<Url, Error> {
        api_endpoint(&self.location, &self.domain, &self.api_version)
    }
}

/// Compose `https://{location}.{domain}/api/{version}/`, substituting the
/// defaults for empty parts.
pub fn api_endpoint(location: &str, domain: &str, api_version: &str) -> Result<Url, Error> {
    let location = non_empty_or(location, DEFAULT_LOCATION);
    let domain = non_empty_or(domain, DEFAULT_DOMAIN);
    let api_version = non_empty_or(api_version, DEFAULT_API_VERSION);

    Ok(Url::parse(&format!(
        "https://{location}.{domain}/api/{api_version}/"
    ))?)
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() { default } else { value }
}

// ── Response envelope ────────────────────────────────────────────────

/// Outcome of a completed HTTP exchange.
///
/// Returned next to the decoded value by every service call so callers can
/// read the status, the correlation id, and list pagination.
#[derive(Debug, Clone)]
pub struct Response {
    pub method: Method,
    pub url: Url,
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Value of `X-REQUEST-ID`, useful when contacting support.
    pub request_id: Option<String>,
    /// Pagination metadata, set by list calls.
    pub meta: Option<Meta>,
}

impl Response {
    pub fn new(method: Method, url: Url, status: StatusCode, headers: HeaderMap) -> Self {
        let request_id = headers
            .get(HEADER_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_owned);

        Self {
            method,
            url,
            status,
            headers,
            request_id,
            meta: None,
        }
    }
}

/// Check a buffered response for an API error.
///
/// Statuses 200..=299 pass. Anything else becomes [`Error::Api`] carrying
/// the decoded error entries (none for an empty body), or
/// [`Error::MalformedErrorBody`] when the body is not the error array.
/// Pure over its inputs, so calling it twice yields the same outcome.
pub fn check_response(response: &Response, body: &[u8]) -> Result<(), Error> {
    if response.status.is_success() {
        return Ok(());
    }

    let errors = if body.is_empty() {
        Vec::new()
    } else {
        serde_json::from_slice(body).map_err(|e| Error::MalformedErrorBody {
            status: response.status.as_u16(),
            message: e.to_string(),
            body: String::from_utf8_lossy(body).into_owned(),
        })?
    };

    Err(ApiError {
        method: response.method.clone(),
        url: response.url.clone(),
        status: response.status,
        errors,
        request_id: response.request_id.clone(),
    }
    .into())
}

// ── Body targets ─────────────────────────────────────────────────────

/// Where the body of a successful response goes.
pub enum Target<'a, T> {
    /// Drop the body.
    Discard,
    /// Decode JSON into the slot. An empty body is a decode error.
    Json(&'a mut T),
    /// Decode JSON into the slot, leaving `None` for an empty body.
    OptionalJson(&'a mut Option<T>),
    /// Copy the raw bytes into the sink.
    Raw(&'a mut (dyn Write + Send)),
}

impl<T: DeserializeOwned> Target<'_, T> {
    fn fill(self, body: &[u8]) -> Result<(), Error> {
        match self {
            Self::Discard => Ok(()),
            Self::Json(slot) => {
                *slot = decode_json(body)?;
                Ok(())
            }
            Self::OptionalJson(slot) => {
                if !body.iter().all(u8::is_ascii_whitespace) {
                    *slot = Some(decode_json(body)?);
                }
                Ok(())
            }
            Self::Raw(sink) => {
                sink.write_all(body)?;
                sink.flush()?;
                Ok(())
            }
        }
    }
}

fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|e| {
        let body = String::from_utf8_lossy(body).into_owned();
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body,
        }
    })
}

/// Race a transport future against the caller's token.
///
/// A transport error observed after cancellation is reported as
/// [`Error::Cancelled`].
async fn guarded<F, R>(cancel: &CancellationToken, fut: F) -> Result<R, Error>
where
    F: Future<Output = Result<R, reqwest::Error>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(Error::Cancelled),
        result = fut => result.map_err(|e| {
            if cancel.is_cancelled() {
                Error::Cancelled
            } else {
                Error::Transport(e)
            }
        }),
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the CloudSigma API.
///
/// Cheap to clone and safe to share across tasks. Resource services are
/// borrowed from it, e.g. `client.servers().list(&cancel, None)`.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: Url,
    user_agent: String,
    credentials: Arc<dyn CredentialsProvider>,
}

impl Client {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from credentials and a client config.
    pub fn new(
        credentials: Arc<dyn CredentialsProvider>,
        config: &ClientConfig,
    ) -> Result<Self, Error> {
        let http = config.transport.build_client()?;
        let endpoint = config.endpoint()?;

        Ok(Self {
            http,
            endpoint,
            user_agent: config.user_agent.clone(),
            credentials,
        })
    }

    /// Default endpoint, authenticating with an account email and password.
    pub fn with_basic_auth(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, Error> {
        Self::new(
            Arc::new(UsernamePasswordCredentialsProvider::new(username, password)),
            &ClientConfig::default(),
        )
    }

    /// Default endpoint, authenticating with an access token.
    pub fn with_token(token: impl Into<String>) -> Result<Self, Error> {
        Self::new(
            Arc::new(TokenCredentialsProvider::new(token)),
            &ClientConfig::default(),
        )
    }

    /// Wrap an existing `reqwest::Client` and endpoint.
    ///
    /// The endpoint is taken as-is; a missing trailing slash is reported by
    /// the first request rather than corrected here.
    pub fn with_client(
        http: reqwest::Client,
        endpoint: Url,
        credentials: Arc<dyn CredentialsProvider>,
    ) -> Self {
        Self {
            http,
            endpoint,
            user_agent: DEFAULT_USER_AGENT.into(),
            credentials,
        }
    }

    // ── Reconfiguration ──────────────────────────────────────────────

    /// Point the client at another location and domain, keeping the API
    /// version path. Empty arguments fall back to the defaults.
    pub fn set_api_endpoint(&mut self, location: &str, domain: &str) -> Result<(), Error> {
        let mut endpoint = api_endpoint(location, domain, DEFAULT_API_VERSION)?;
        endpoint.set_path(self.endpoint.path());
        self.endpoint = endpoint;
        Ok(())
    }

    pub fn set_endpoint_url(&mut self, endpoint: Url) {
        self.endpoint = endpoint;
    }

    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.user_agent = user_agent.into();
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    // ── Request building ─────────────────────────────────────────────

    /// Build an authenticated request for a path relative to the endpoint.
    ///
    /// Paths are joined with URL semantics, so they should not start with
    /// `/`. When given, `body` is encoded as JSON. Credentials are fetched
    /// from the provider on every call. Nothing is sent.
    pub fn new_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Request, Error> {
        if !self.endpoint.path().ends_with('/') {
            return Err(Error::InvalidEndpoint {
                endpoint: self.endpoint.to_string(),
            });
        }
        let url = self.endpoint.join(path)?;

        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(Error::Encode)?;

        let mut builder = self
            .http
            .request(method, url)
            .header(ACCEPT, MEDIA_TYPE)
            .header(CONTENT_TYPE, MEDIA_TYPE)
            .header(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);

        builder = match self.credentials.retrieve()? {
            Credentials::UsernamePassword { username, password } => {
                builder.basic_auth(username, Some(password.expose_secret()))
            }
            Credentials::Token(token) => {
                let mut value =
                    HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))?;
                value.set_sensitive(true);
                builder.header(AUTHORIZATION, value)
            }
        };

        if let Some(payload) = payload {
            builder = builder.body(payload);
        }

        Ok(builder.build()?)
    }

    // ── Execution ────────────────────────────────────────────────────

    /// Send a request and route the body of a successful response into
    /// `target`.
    ///
    /// The token is checked before dispatch and raced against both the
    /// exchange and the body read. Non-2xx responses are classified by
    /// [`check_response`] before the target is touched.
    pub async fn execute<T: DeserializeOwned + Send>(
        &self,
        cancel: &CancellationToken,
        request: reqwest::Request,
        target: Target<'_, T>,
    ) -> Result<Response, Error> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let method = request.method().clone();
        let url = request.url().clone();
        debug!("{method} {url}");

        let mut resp = guarded(cancel, self.http.execute(request)).await?;
        let response = Response::new(method, url, resp.status(), resp.headers().clone());
        if let Some(id) = &response.request_id {
            trace!(request_id = %id, status = response.status.as_u16(), "response received");
        }

        let target = match target {
            Target::Raw(sink) if response.status.is_success() => {
                while let Some(chunk) = guarded(cancel, resp.chunk()).await? {
                    sink.write_all(&chunk)?;
                }
                sink.flush()?;
                return Ok(response);
            }
            other => other,
        };

        let body = guarded(cancel, resp.bytes()).await?;
        check_response(&response, &body)?;
        target.fill(&body)?;

        Ok(response)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn send<B, T>(
        &self,
        cancel: &CancellationToken,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(T, Response), Error>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Default + Send,
    {
        let request = self.new_request(method, path, body)?;
        let mut value = T::default();
        let response = self.execute(cancel, request, Target::Json(&mut value)).await?;
        Ok((value, response))
    }

    pub(crate) async fn get<T>(
        &self,
        cancel: &CancellationToken,
        path: &str,
    ) -> Result<(T, Response), Error>
    where
        T: DeserializeOwned + Default + Send,
    {
        self.send::<(), T>(cancel, Method::GET, path, None).await
    }

    /// GET a collection, unwrapping `objects` and hoisting `meta` onto the
    /// response.
    pub(crate) async fn get_list<T>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        opts: Option<&ListOptions>,
    ) -> Result<(Vec<T>, Response), Error>
    where
        T: DeserializeOwned + Send,
    {
        let path = with_list_options(path, opts);
        let (root, response) = self.get::<ListRoot<T>>(cancel, &path).await?;
        Ok(unwrap_list(root, response))
    }

    pub(crate) async fn post<B, T>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        body: Option<&B>,
    ) -> Result<(T, Response), Error>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Default + Send,
    {
        self.send(cancel, Method::POST, path, body).await
    }

    pub(crate) async fn put<B, T>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        body: &B,
    ) -> Result<(T, Response), Error>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Default + Send,
    {
        self.send(cancel, Method::PUT, path, Some(body)).await
    }

    pub(crate) async fn delete(
        &self,
        cancel: &CancellationToken,
        path: &str,
    ) -> Result<Response, Error> {
        let request = self.new_request::<()>(Method::DELETE, path, None)?;
        self.execute(cancel, request, Target::<()>::Discard).await
    }

    /// POST `{"objects": [...]}` and return the created objects.
    pub(crate) async fn create<B, T>(
        &self,
        cancel: &CancellationToken,
        path: &str,
        objects: &[B],
    ) -> Result<(Vec<T>, Response), Error>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        if objects.is_empty() {
            return Err(Error::EmptyPayload);
        }
        let (root, response) = self
            .post::<_, ListRoot<T>>(cancel, path, Some(&CreateRequest { objects }))
            .await?;
        Ok(unwrap_list(root, response))
    }

    /// POST `{resource}{uuid}/action/?do={verb}`.
    pub(crate) async fn action<B, T>(
        &self,
        cancel: &CancellationToken,
        resource: &str,
        uuid: &str,
        verb: &str,
        body: Option<&B>,
    ) -> Result<(T, Response), Error>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Default + Send,
    {
        self.post(cancel, &action_path(resource, uuid, verb), body)
            .await
    }

    /// Action whose reply is a one-element `objects` array.
    pub(crate) async fn action_single<B, T>(
        &self,
        cancel: &CancellationToken,
        resource: &str,
        uuid: &str,
        verb: &'static str,
        body: Option<&B>,
    ) -> Result<(T, Response), Error>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let (root, response) = self
            .action::<B, ListRoot<T>>(cancel, resource, uuid, verb, body)
            .await?;
        let (objects, response) = unwrap_list(root, response);
        let first = objects
            .into_iter()
            .next()
            .ok_or(Error::EmptyResult { action: verb })?;
        Ok((first, response))
    }

    // ━━ Resource services ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn acls(&self) -> AclsService<'_> {
        AclsService::new(self)
    }

    pub fn capabilities(&self) -> CapabilitiesService<'_> {
        CapabilitiesService::new(self)
    }

    pub fn cloud_status(&self) -> CloudStatusService<'_> {
        CloudStatusService::new(self)
    }

    pub fn drives(&self) -> DrivesService<'_> {
        DrivesService::new(self)
    }

    pub fn firewall_policies(&self) -> FirewallPoliciesService<'_> {
        FirewallPoliciesService::new(self)
    }

    pub fn ips(&self) -> IpsService<'_> {
        IpsService::new(self)
    }

    pub fn keypairs(&self) -> KeypairsService<'_> {
        KeypairsService::new(self)
    }

    pub fn library_drives(&self) -> LibraryDrivesService<'_> {
        LibraryDrivesService::new(self)
    }

    pub fn licenses(&self) -> LicensesService<'_> {
        LicensesService::new(self)
    }

    pub fn locations(&self) -> LocationsService<'_> {
        LocationsService::new(self)
    }

    pub fn profile(&self) -> ProfileService<'_> {
        ProfileService::new(self)
    }

    pub fn pubkeys(&self) -> PubkeysService<'_> {
        PubkeysService::new(self)
    }

    pub fn remote_snapshots(&self) -> RemoteSnapshotsService<'_> {
        RemoteSnapshotsService::new(self)
    }

    pub fn servers(&self) -> ServersService<'_> {
        ServersService::new(self)
    }

    pub fn snapshots(&self) -> SnapshotsService<'_> {
        SnapshotsService::new(self)
    }

    pub fn subscriptions(&self) -> SubscriptionsService<'_> {
        SubscriptionsService::new(self)
    }

    pub fn tags(&self) -> TagsService<'_> {
        TagsService::new(self)
    }

    pub fn vlans(&self) -> VlansService<'_> {
        VlansService::new(self)
    }
}

fn unwrap_list<T>(root: ListRoot<T>, mut response: Response) -> (Vec<T>, Response) {
    response.meta = root.meta;
    (root.objects, response)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn client_at(endpoint: &str, credentials: Credentials) -> Client {
        Client::with_client(
            reqwest::Client::new(),
            Url::parse(endpoint).unwrap(),
            Arc::new(credentials),
        )
    }

    fn response(status: u16, request_id: Option<&str>) -> Response {
        let mut headers = HeaderMap::new();
        if let Some(id) = request_id {
            headers.insert(HEADER_REQUEST_ID, HeaderValue::from_str(id).unwrap());
        }
        Response::new(
            Method::GET,
            Url::parse("https://zrh.cloudsigma.com/api/2.0/servers/").unwrap(),
            StatusCode::from_u16(status).unwrap(),
            headers,
        )
    }

    #[test]
    fn default_config_endpoint() {
        let config = ClientConfig::default();

        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "https://zrh.cloudsigma.com/api/2.0/"
        );
        assert_eq!(config.user_agent, "cloudsigma-sdk-rust/0.12.0");
    }

    #[test]
    fn empty_endpoint_parts_fall_back_to_defaults() {
        let url = api_endpoint("", "", "").unwrap();

        assert_eq!(url.as_str(), "https://zrh.cloudsigma.com/api/2.0/");
    }

    #[test]
    fn set_api_endpoint_switches_location() {
        let mut client = Client::with_token("token").unwrap();

        client.set_api_endpoint("fra", "").unwrap();

        assert_eq!(
            client.endpoint().as_str(),
            "https://fra.cloudsigma.com/api/2.0/"
        );
    }

    #[test]
    fn set_user_agent_overrides_header() {
        let mut client = Client::with_token("token").unwrap();
        client.set_user_agent("testing");

        let req = client
            .new_request::<()>(Method::GET, "servers/", None)
            .unwrap();

        assert_eq!(req.headers()[USER_AGENT], "testing");
    }

    #[test]
    fn new_request_resolves_relative_path() {
        let client = client_at(
            "https://zrh.cloudsigma.com/api/2.0/",
            Credentials::token("token"),
        );

        let req = client
            .new_request(Method::POST, "servers/", Some(&serde_json::json!({"name": "a"})))
            .unwrap();

        assert_eq!(
            req.url().as_str(),
            "https://zrh.cloudsigma.com/api/2.0/servers/"
        );
        assert_eq!(req.headers()[ACCEPT], "application/json");
        assert_eq!(req.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(req.headers()[USER_AGENT], DEFAULT_USER_AGENT);
        let body = req.body().and_then(reqwest::Body::as_bytes).unwrap();
        assert_eq!(body, br#"{"name":"a"}"#);
    }

    #[test]
    fn new_request_with_token_sets_bearer() {
        let client = client_at(
            "https://zrh.cloudsigma.com/api/2.0/",
            Credentials::token("token"),
        );

        let req = client
            .new_request::<()>(Method::GET, "servers/", None)
            .unwrap();

        assert_eq!(req.headers()[AUTHORIZATION], "Bearer token");
        assert!(req.headers()[AUTHORIZATION].is_sensitive());
        assert_eq!(req.headers().get_all(AUTHORIZATION).iter().count(), 1);
    }

    #[test]
    fn new_request_with_username_password_sets_basic() {
        let client = client_at(
            "https://zrh.cloudsigma.com/api/2.0/",
            Credentials::username_password("user", "password"),
        );

        let req = client
            .new_request::<()>(Method::GET, "servers/", None)
            .unwrap();

        assert_eq!(
            req.headers()[AUTHORIZATION],
            "Basic dXNlcjpwYXNzd29yZA=="
        );
        assert!(req.body().is_none());
    }

    #[test]
    fn new_request_requires_trailing_slash() {
        let client = client_at(
            "https://zrh.cloudsigma.com/api/2.0",
            Credentials::token("token"),
        );

        let err = client
            .new_request::<()>(Method::GET, "servers/", None)
            .unwrap_err();

        assert!(matches!(err, Error::InvalidEndpoint { .. }));
    }

    #[test]
    fn new_request_propagates_credential_errors() {
        let client = client_at(
            "https://zrh.cloudsigma.com/api/2.0/",
            Credentials::token(""),
        );

        let err = client
            .new_request::<()>(Method::GET, "servers/", None)
            .unwrap_err();

        assert!(matches!(err, Error::Credentials { .. }));
    }

    #[test]
    fn request_id_is_picked_up() {
        assert_eq!(
            response(200, Some("long-uuid")).request_id.as_deref(),
            Some("long-uuid")
        );
        assert!(response(200, None).request_id.is_none());
    }

    #[test]
    fn check_response_decodes_error_entries() {
        let resp = response(400, Some("req-1"));
        let body = br#"[{"error_message":"error","error_point":"cpu","error_type":"validation"}]"#;

        let err = check_response(&resp, body).unwrap_err();

        let entries = err.api_errors();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "error");
        assert_eq!(entries[0].point.as_deref(), Some("cpu"));
        assert_eq!(err.request_id(), Some("req-1"));
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn check_response_treats_null_message_as_empty() {
        let body = br#"[{"error_message":null,"error_point":null,"error_type":"validation"}]"#;

        let err = check_response(&response(400, None), body).unwrap_err();

        assert!(matches!(err, Error::Api(_)));
        let entries = err.api_errors();
        assert_eq!(entries[0].message, "");
        assert!(entries[0].point.is_none());
        assert_eq!(entries[0].error_type.as_deref(), Some("validation"));
    }

    #[test]
    fn check_response_is_idempotent() {
        let resp = response(409, None);
        let body = br#"[{"error_message":"conflict"}]"#;

        let first = check_response(&resp, body).unwrap_err().to_string();
        let second = check_response(&resp, body).unwrap_err().to_string();

        assert_eq!(first, second);
    }

    #[test]
    fn check_response_with_unparseable_body() {
        let err = check_response(&response(500, None), b"<html>oops</html>").unwrap_err();

        assert!(matches!(err, Error::MalformedErrorBody { status: 500, .. }));
    }

    #[test]
    fn check_response_without_body_is_still_an_error() {
        let err = check_response(&response(404, None), b"").unwrap_err();

        assert!(err.is_not_found());
        assert!(err.api_errors().is_empty());
    }

    #[test]
    fn check_response_passes_success_range() {
        for status in [200, 201, 204, 299] {
            assert!(check_response(&response(status, None), b"garbage").is_ok());
        }
        assert!(check_response(&response(300, None), b"").is_err());
    }

    #[test]
    fn empty_success_body_per_target() {
        let mut value = serde_json::Value::Null;
        assert!(matches!(
            Target::Json(&mut value).fill(b""),
            Err(Error::Deserialization { .. })
        ));

        let mut optional: Option<serde_json::Value> = None;
        Target::OptionalJson(&mut optional).fill(b"").unwrap();
        assert!(optional.is_none());

        let mut sink = Vec::new();
        Target::<()>::Raw(&mut sink).fill(b"").unwrap();
        assert!(sink.is_empty());

        Target::<()>::Discard.fill(b"").unwrap();
    }
}
