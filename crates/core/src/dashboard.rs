//! Where a user lands after signing in.

use serde::Serialize;

use crate::types::Role;

/// Post-authentication destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dashboard {
    /// Platform administration.
    Admin,
    /// Site manager console.
    Manager,
    /// Supplier listings and orders.
    Supplier,
    /// Buyer storefront and rentals.
    Buyer,
}

impl Dashboard {
    /// Destination for a role. Every role, including unrecognized ones, maps
    /// somewhere; anything that is not admin, manager or supplier lands on the
    /// buyer dashboard.
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::SiteManager => Self::Manager,
            Role::Supplier => Self::Supplier,
            Role::Buyer | Role::Unknown => Self::Buyer,
        }
    }

    /// Route path of the dashboard.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Admin => "/dashboard/admin",
            Self::Manager => "/dashboard/manager",
            Self::Supplier => "/dashboard/supplier",
            Self::Buyer => "/dashboard/buyer",
        }
    }
}

impl std::fmt::Display for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
