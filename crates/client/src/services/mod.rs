//! Resource façades over the gateway.
//!
//! Each façade borrows the [`ApiClient`] and maps one method to one endpoint.
//! None of them hold state; construct them on demand:
//!
//! ```rust,no_run
//! # async fn run(api: mofresh_client::ApiClient) -> Result<(), mofresh_client::ApiError> {
//! let products = api.products().list().await?;
//! let rooms = api.infrastructure().list().await?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod infrastructure;
mod logistics;
mod orders;
mod products;
mod rentals;
mod users;

pub use auth::{AuthApi, AuthPayload, AuthUser, LoginRequest, OtpRequest, ResendOtpRequest};
pub use infrastructure::Infrastructure;
pub use logistics::Logistics;
pub use orders::Orders;
pub use products::Products;
pub use rentals::Rentals;
pub use users::Users;

use crate::gateway::ApiClient;

impl ApiClient {
    /// Authentication endpoints.
    #[must_use]
    pub const fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// User accounts.
    #[must_use]
    pub const fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    /// Product listings.
    #[must_use]
    pub const fn products(&self) -> Products<'_> {
        Products::new(self)
    }

    /// Orders.
    #[must_use]
    pub const fn orders(&self) -> Orders<'_> {
        Orders::new(self)
    }

    /// Rentals.
    #[must_use]
    pub const fn rentals(&self) -> Rentals<'_> {
        Rentals::new(self)
    }

    /// Cold rooms.
    #[must_use]
    pub const fn infrastructure(&self) -> Infrastructure<'_> {
        Infrastructure::new(self)
    }

    /// Tricycles, cold boxes and cold plates.
    #[must_use]
    pub const fn logistics(&self) -> Logistics<'_> {
        Logistics::new(self)
    }
}
