//! Core types for MoFresh.
//!
//! Type-safe wrappers for the values that cross the session and gateway
//! boundaries.

pub mod email;
pub mod id;
pub mod role;
pub mod token;

pub use email::{Email, EmailError};
pub use id::*;
pub use role::Role;
pub use token::AuthToken;
