//! HTTP gateway to the MoFresh REST API.
//!
//! One [`ApiClient`] per process. It resolves endpoint paths against the
//! configured base URL, attaches the session's bearer token at request time,
//! and turns every response into either decoded data or an [`ApiError`].
//! Resource façades in [`crate::services`] borrow it.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::response::{decode_entity, normalize_list};
use crate::store::SessionStore;

const USER_AGENT: &str = concat!("mofresh-client/", env!("CARGO_PKG_VERSION"));

/// Whether a request carries the session credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Attach `Authorization: Bearer <token>` when a session token exists.
    Session,
    /// Never attach credentials.
    Public,
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the MoFresh REST API.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client bound to a session store.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the HTTP client fails to build.
    pub fn new(config: &ApiConfig, session: SessionStore) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.clone(),
                session,
            }),
        })
    }

    /// The session whose token is attached to requests.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Base URL every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve path segments against the base URL.
    ///
    /// Segments are percent-encoded individually, so an id containing `/`
    /// cannot escape its position in the path.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the base URL cannot take a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidRequest("base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start a request to an endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the endpoint cannot be resolved.
    pub fn request(
        &self,
        method: Method,
        segments: &[&str],
        access: Access,
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(segments)?;
        let builder = self.inner.client.request(method, url);

        Ok(match (access, self.inner.session.token()) {
            (Access::Session, Some(token)) => builder.bearer_auth(token.expose()),
            _ => builder,
        })
    }

    /// Send a request and return the body of a 2xx response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Response`] for non-2xx statuses, with the message
    /// taken from the body, and [`ApiError::Network`] if no response arrived.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let request = builder
            .build()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let method = request.method().clone();
        let path = request.url().path().to_owned();

        debug!(method = %method, path = %path, "Sending API request");

        let response = self.inner.client.execute(request).await.map_err(|e| {
            error!(method = %method, path = %path, error = %e, "API request failed");
            ApiError::network()
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(method = %method, path = %path, error = %e, "Failed to read API response body");
            ApiError::network()
        })?;

        if !status.is_success() {
            error!(
                method = %method,
                path = %path,
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "MoFresh API returned non-success status"
            );
            return Err(ApiError::from_response(status.as_u16(), &body));
        }

        Ok(body)
    }

    /// Send a request and decode a single entity.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::execute`], plus [`ApiError::Decode`] if the body does
    /// not match `T`.
    pub async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let body = self.execute(builder).await?;
        decode_entity(&body).inspect_err(|e| {
            error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to decode API response"
            );
        })
    }

    /// Send a request and normalize the body to a list.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::execute`]. An unexpected body shape is not an error.
    pub async fn fetch_list<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Vec<T>, ApiError> {
        let body = self.execute(builder).await?;
        Ok(normalize_list(&body))
    }

    /// Send a request whose response body is irrelevant.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::execute`].
    pub async fn send(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.execute(builder).await.map(drop)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ApiConfig::parse(base).unwrap(), SessionStore::new()).unwrap()
    }

    #[test]
    fn test_endpoint_appends_to_base_path() {
        let api = client("http://localhost:3000/api/v1");
        assert_eq!(
            api.endpoint(&["cold-rooms", "room-1", "occupancy"]).unwrap().as_str(),
            "http://localhost:3000/api/v1/cold-rooms/room-1/occupancy"
        );

        let api = client("http://localhost:3000/api/v1/");
        assert_eq!(
            api.endpoint(&["orders"]).unwrap().as_str(),
            "http://localhost:3000/api/v1/orders"
        );
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let api = client("https://api.mofresh.rw");
        assert_eq!(
            api.endpoint(&["users", "a/b"]).unwrap().path(),
            "/users/a%2Fb"
        );
    }

    #[test]
    fn test_anonymous_request_has_no_authorization() {
        let api = client("http://localhost:3000/api/v1");
        let request = api
            .request(Method::GET, &["products"], Access::Session)
            .unwrap()
            .build()
            .unwrap();
        assert!(request.headers().get("authorization").is_none());
    }
}
