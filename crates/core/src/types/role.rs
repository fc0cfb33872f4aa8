//! Marketplace roles.

use serde::{Deserialize, Serialize};

/// Role of an authenticated MoFresh user.
///
/// Serialized in `SCREAMING_SNAKE_CASE`, the spelling the API uses. Any value
/// the client does not know decodes to [`Role::Unknown`] instead of failing,
/// so a new backend role never breaks login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Shops the marketplace and rents cold-chain assets.
    #[default]
    Buyer,
    /// Runs a collection site and its cold rooms.
    SiteManager,
    /// Full platform administration.
    Admin,
    /// Lists produce on the marketplace.
    Supplier,
    /// A role this client does not recognize.
    #[serde(other)]
    Unknown,
}

impl Role {
    /// The wire spelling of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buyer => "BUYER",
            Self::SiteManager => "SITE_MANAGER",
            Self::Admin => "ADMIN",
            Self::Supplier => "SUPPLIER",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::SiteManager).unwrap(), "\"SITE_MANAGER\"");
        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_unrecognized_role_decodes_to_unknown() {
        let role: Role = serde_json::from_str("\"AUDITOR\"").unwrap();
        assert_eq!(role, Role::Unknown);
    }
}
