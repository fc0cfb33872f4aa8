//! MoFresh Client - gateway, storage and authentication flow.
//!
//! The I/O half of the MoFresh client. [`mofresh_core`] decides; this crate
//! talks to the REST API and the local disk:
//! - [`config`] - environment configuration
//! - [`gateway`] - the single HTTP client with bearer attachment
//! - [`services`] - per-resource façades (users, products, orders, rentals,
//!   cold rooms, cold assets, auth)
//! - [`models`] - request and response bodies
//! - [`auth`] - login, registration and OTP flow over the session store
//! - [`store`] - shared session and cart handles
//! - [`storage`] - key/value persistence for the cart
//!
//! # Example
//!
//! ```rust,no_run
//! use mofresh_client::{ApiClient, AuthFlow, AnyAuthenticator, ClientConfig, SessionStore};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let session = SessionStore::new();
//! let api = ApiClient::new(&config.api, session.clone())?;
//! let flow = AuthFlow::new(AnyAuthenticator::for_mode(config.auth_mode, &api), session);
//!
//! let dashboard = flow.login("kigali@mofresh.rw", "secret").await?;
//! println!("redirect to {dashboard}");
//!
//! let rooms = api.infrastructure().list().await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod response;
pub mod services;
pub mod storage;
pub mod store;

pub use auth::{AnyAuthenticator, ApiAuthenticator, AuthError, AuthFlow, Authenticator, DemoAuthenticator};
pub use config::{ApiConfig, AuthMode, ClientConfig, ConfigError};
pub use error::{ApiError, NETWORK_ERROR_MESSAGE};
pub use gateway::{Access, ApiClient};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::{CART_STORAGE_KEY, CartStore, SessionStore};
