//! Command implementations.
//!
//! Results are reported through `tracing` at info level; the JSON log format
//! (`--json`) makes them machine-readable.

pub mod assets;
pub mod auth;
pub mod cart;
pub mod catalog;

use std::sync::Arc;

use mofresh_client::{
    AnyAuthenticator, ApiClient, ApiError, AuthFlow, CartStore, ClientConfig, FileStorage,
    SessionStore,
};

/// Everything a command needs, wired once per invocation.
pub struct App {
    pub api: ApiClient,
    pub flow: AuthFlow<AnyAuthenticator>,
    pub cart: CartStore,
}

impl App {
    /// Build the client stack from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let session = SessionStore::new();
        let api = ApiClient::new(&config.api, session.clone())?;
        let flow = AuthFlow::new(AnyAuthenticator::for_mode(config.auth_mode, &api), session);
        let storage = FileStorage::new(config.storage_dir);
        tracing::debug!(
            base_url = %api.base_url(),
            mode = ?config.auth_mode,
            storage = %storage.dir().display(),
            "Client ready"
        );
        let cart = CartStore::load(Arc::new(storage));

        Ok(Self { api, flow, cart })
    }
}

/// Render a value as pretty JSON for the log line.
pub fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}
