//! MoFresh Core - session, cart and shared types.
//!
//! This crate holds everything the MoFresh client decides without touching the
//! network or the disk:
//! - [`session`] - authentication state machine and its pure reducer
//! - [`cart`] - cart line items and the merge-by-id reducer
//! - [`dashboard`] - post-login redirect policy
//! - [`validation`] - login, registration and OTP input checks
//! - [`directory`] - fixed identity table used by demo authentication
//! - [`types`] - newtypes for emails, ids, roles and tokens
//!
//! # Architecture
//!
//! No I/O, no HTTP clients, no storage. The `mofresh-client` crate owns the
//! gateway and persistence and drives the reducers defined here.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod dashboard;
pub mod directory;
pub mod session;
pub mod types;
pub mod validation;

pub use cart::{Cart, CartItem, CartLine};
pub use dashboard::Dashboard;
pub use session::{AuthGrant, PendingRequest, Session, SessionAction, SessionPhase, SessionUser, UserPatch};
pub use types::*;
pub use validation::{LoginForm, OtpCode, RegistrationForm, ValidationError};
