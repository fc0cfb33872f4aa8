//! Fixed identity table behind demo authentication.
//!
//! Demo mode resolves a role from the email alone. This is a development
//! stand-in: with the API authenticator the backend asserts identity and this
//! table is never consulted.

use crate::session::SessionUser;
use crate::types::{Email, Role};

/// One row of the demo directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoIdentity {
    /// Address that selects this identity (compared case-insensitively).
    pub email: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Granted role.
    pub role: Role,
    /// Managed site, for site managers.
    pub location: Option<&'static str>,
}

/// Known demo accounts.
pub const DEMO_IDENTITIES: &[DemoIdentity] = &[
    DemoIdentity {
        email: "admin@mofresh.rw",
        name: "MoFresh Admin",
        role: Role::Admin,
        location: None,
    },
    DemoIdentity {
        email: "kigali@mofresh.rw",
        name: "Kigali Site Manager",
        role: Role::SiteManager,
        location: Some("Kigali"),
    },
    DemoIdentity {
        email: "musanze@mofresh.rw",
        name: "Musanze Site Manager",
        role: Role::SiteManager,
        location: Some("Musanze"),
    },
    DemoIdentity {
        email: "rubavu@mofresh.rw",
        name: "Rubavu Site Manager",
        role: Role::SiteManager,
        location: Some("Rubavu"),
    },
    DemoIdentity {
        email: "huye@mofresh.rw",
        name: "Huye Site Manager",
        role: Role::SiteManager,
        location: Some("Huye"),
    },
    DemoIdentity {
        email: "supplier@mofresh.rw",
        name: "MoFresh Supplier",
        role: Role::Supplier,
        location: None,
    },
    DemoIdentity {
        email: "buyer@mofresh.rw",
        name: "MoFresh Buyer",
        role: Role::Buyer,
        location: None,
    },
];

/// Resolve the session user for an email.
///
/// Unlisted addresses become buyers with no location, named after the local
/// part of the address.
#[must_use]
pub fn resolve(email: &Email) -> SessionUser {
    DEMO_IDENTITIES
        .iter()
        .find(|identity| email.matches(identity.email))
        .map_or_else(
            || SessionUser {
                email: email.clone(),
                name: email.local_part().to_owned(),
                role: Role::Buyer,
                location: None,
            },
            |identity| SessionUser {
                email: email.clone(),
                name: identity.name.to_owned(),
                role: identity.role,
                location: identity.location.map(str::to_owned),
            },
        )
}
