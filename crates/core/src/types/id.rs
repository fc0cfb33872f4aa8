//! Newtype IDs for type-safe entity references.
//!
//! The MoFresh API hands out opaque string identifiers (UUIDs in practice,
//! but the client never relies on that). Use the `define_id!` macro to create
//! wrappers that keep a `ColdRoomId` from being passed where an `OrderId` is
//! expected.

/// Macro to define a type-safe ID wrapper around `String`.
///
/// Creates a newtype with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `new()`, `as_str()`, `into_inner()`
/// - `Display`, `AsRef<str>`, `From<String>` and `From<&str>`
///
/// # Example
///
/// ```rust
/// # use mofresh_core::define_id;
/// define_id!(SiteId);
/// define_id!(BatchId);
///
/// let site = SiteId::new("site-1");
/// assert_eq!(site.as_str(), "site-1");
///
/// // These are different types, so this won't compile:
/// // let _: BatchId = site;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

define_id!(UserId);
define_id!(ProductId);
define_id!(OrderId);
define_id!(RentalId);
define_id!(ColdRoomId);
define_id!(ColdAssetId);
define_id!(SiteId);
