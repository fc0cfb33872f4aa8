//! Request and response bodies for the MoFresh REST API.
//!
//! Response entities are owned by the backend. Each one models the fields the
//! client reads and keeps the rest in an `extra` map, so nothing the server
//! sends is dropped on the way through.

mod attachment;
mod cold_asset;
mod cold_room;
mod order;
mod product;
mod rental;
mod user;

pub use attachment::Attachment;
pub use cold_asset::{
    AssetStatus, ColdAsset, ColdAssetKind, ColdBox, ColdPlate, CreateColdBoxRequest,
    CreateColdPlateRequest, CreateTricycleRequest, Tricycle, UpdateStatusRequest,
};
pub use cold_room::{ColdRoom, CreateColdRoomRequest, Occupancy, UpdateColdRoomRequest};
pub use order::{CreateOrderRequest, Order, OrderItem, OrderLineRequest, OrderStatus};
pub use product::{CreateProductRequest, Product};
pub use rental::{CreateRentalRequest, Rental, RentalStatus};
pub use user::{RegisterUserRequest, UpdateUserRequest, User};

/// Fields the client does not model.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Serialize a secret by exposing it. Only request bodies use this.
pub(crate) fn expose_secret<S: serde::Serializer>(
    secret: &secrecy::SecretString,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use secrecy::ExposeSecret;
    serializer.serialize_str(secret.expose_secret())
}
