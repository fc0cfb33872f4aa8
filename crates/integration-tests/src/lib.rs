//! Integration tests for the MoFresh client.
//!
//! Each test starts a [`MockBackend`]: an axum router served on an ephemeral
//! localhost port under `/api/v1`, with every incoming request recorded so
//! tests can assert on paths, credentials and encodings.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mofresh-integration-tests
//! ```

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use mofresh_client::{ApiClient, ApiConfig, SessionStore};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// What the mock saw of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

impl RecordedRequest {
    fn of(request: &Request) -> Self {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };
        Self {
            method: request.method().to_string(),
            path: request.uri().path().to_owned(),
            authorization: header("authorization"),
            content_type: header("content-type"),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct RequestLog(Arc<Mutex<Vec<RecordedRequest>>>);

impl RequestLog {
    fn push(&self, request: RecordedRequest) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }

    fn snapshot(&self) -> Vec<RecordedRequest> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

async fn record(State(log): State<RequestLog>, request: Request, next: Next) -> Response {
    log.push(RecordedRequest::of(&request));
    next.run(request).await
}

/// In-process stand-in for the MoFresh REST API.
pub struct MockBackend {
    addr: SocketAddr,
    log: RequestLog,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Serve `routes` under `/api/v1` on a free port.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start(routes: Router) -> Self {
        let log = RequestLog::default();
        let app = Router::new()
            .nest("/api/v1", routes)
            .layer(middleware::from_fn_with_state(log.clone(), record));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap_or_else(|e| panic!("failed to bind mock backend: {e}"));
        let addr = listener
            .local_addr()
            .unwrap_or_else(|e| panic!("mock backend has no address: {e}"));

        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, log, server }
    }

    /// Base URL the client should be configured with.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api/v1", self.addr)
    }

    /// Client configuration pointing at this backend.
    ///
    /// # Panics
    ///
    /// Panics if the base URL does not parse, which cannot happen for a bound
    /// socket address.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::parse(&self.base_url())
            .unwrap_or_else(|e| panic!("mock base URL is invalid: {e}"))
    }

    /// A client with its own, empty session.
    #[must_use]
    pub fn client(&self) -> ApiClient {
        self.client_with_session(SessionStore::new())
    }

    /// A client bound to `session`.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn client_with_session(&self, session: SessionStore) -> ApiClient {
        ApiClient::new(&self.api_config(), session)
            .unwrap_or_else(|e| panic!("failed to build client: {e}"))
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log.snapshot()
    }

    /// Requests whose path ends with `suffix`.
    #[must_use]
    pub fn requests_to(&self, suffix: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.path.ends_with(suffix))
            .collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// A base URL nothing is listening on.
///
/// # Panics
///
/// Panics if no local port can be bound.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|e| panic!("failed to bind probe port: {e}"));
    let addr = listener
        .local_addr()
        .unwrap_or_else(|e| panic!("probe port has no address: {e}"));
    drop(listener);
    format!("http://{addr}/api/v1")
}
