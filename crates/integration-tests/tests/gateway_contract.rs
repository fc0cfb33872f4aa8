//! Gateway behavior against a mock backend: envelope normalization, error
//! messages, credential attachment and request encodings.

#![allow(clippy::unwrap_used)]

use axum::extract::{Multipart, Path};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use mofresh_client::models::{
    AssetStatus, Attachment, ColdBox, ColdRoom, CreateOrderRequest, CreateProductRequest,
    OrderLineRequest, Product, Tricycle,
};
use mofresh_client::{ApiClient, ApiConfig, ApiError, NETWORK_ERROR_MESSAGE, SessionStore};
use mofresh_core::{
    AuthGrant, AuthToken, ColdAssetId, ColdRoomId, Email, OrderId, ProductId, Role, SessionAction,
    SessionUser, SiteId,
};
use mofresh_integration_tests::{MockBackend, unreachable_base_url};
use rust_decimal::Decimal;
use serde_json::{Value, json};

fn products_json() -> Value {
    json!([
        {"id": "p1", "name": "Tomatoes", "price": 800, "unit": "kg"},
        {"id": "p2", "name": "Milk", "price": "1200.50", "unit": "litre"}
    ])
}

fn sign_in(session: &SessionStore, token: &str) {
    session.dispatch(SessionAction::LoginSucceeded(AuthGrant {
        user: SessionUser {
            email: Email::parse("buyer@mofresh.rw").unwrap(),
            name: "Buyer".to_string(),
            role: Role::Buyer,
            location: None,
        },
        token: AuthToken::new(token),
    }));
}

#[tokio::test]
async fn test_bare_and_enveloped_lists_decode_identically() {
    let bare = MockBackend::start(
        Router::new().route("/products", get(|| async { Json(products_json()) })),
    )
    .await;
    let wrapped = MockBackend::start(Router::new().route(
        "/products",
        get(|| async { Json(json!({"data": products_json(), "meta": {"page": 1}})) }),
    ))
    .await;

    let a = bare.client().products().list().await.unwrap();
    let b = wrapped.client().products().list().await.unwrap();

    assert_eq!(a, b);
    let ids: Vec<&str> = a.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["p1", "p2"]);
    assert_eq!(a[1].price, Decimal::new(120_050, 2));
}

#[tokio::test]
async fn test_malformed_list_is_empty_not_error() {
    let backend = MockBackend::start(
        Router::new()
            .route("/cold-rooms", get(|| async { Json(json!({"data": "maintenance"})) }))
            .route("/rentals", get(|| async { "OK" })),
    )
    .await;
    let api = backend.client();

    assert!(api.infrastructure().list().await.unwrap().is_empty());
    assert!(api.rentals().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_single_entity_envelope_is_unwrapped() {
    let backend = MockBackend::start(Router::new().route(
        "/cold-rooms/{id}",
        get(|Path(id): Path<String>| async move {
            Json(json!({"data": {"id": id, "name": "Kigali Room A", "siteId": "kgl"}}))
        }),
    ))
    .await;

    let room: ColdRoom = backend
        .client()
        .infrastructure()
        .get(&ColdRoomId::new("room-1"))
        .await
        .unwrap();
    assert_eq!(room.id, ColdRoomId::new("room-1"));
    assert_eq!(room.site_id, Some(SiteId::new("kgl")));
}

#[tokio::test]
async fn test_error_message_comes_from_body() {
    let backend = MockBackend::start(
        Router::new()
            .route(
                "/orders/{id}",
                get(|| async {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"statusCode": 404, "message": "Order not found"})),
                    )
                }),
            )
            .route(
                "/orders",
                post(|| async {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({"message": ["items must not be empty"], "error": "Bad Request"})),
                    )
                }),
            )
            .route(
                "/products/{id}",
                axum::routing::delete(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            ),
    )
    .await;
    let api = backend.client();

    let err = api.orders().get(&OrderId::new("o-404")).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Response {
            status: 404,
            message: "Order not found".to_string()
        }
    );

    let request = CreateOrderRequest {
        items: Vec::new(),
        delivery_address: None,
        notes: None,
    };
    let err = api.orders().create(&request).await.unwrap_err();
    assert_eq!(err.message(), "items must not be empty");

    let err = api.products().delete(&ProductId::new("p1")).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.message(), NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_transport_failure_is_generic_network_error() {
    let config = ApiConfig::parse(&unreachable_base_url().await).unwrap();
    let api = ApiClient::new(&config, SessionStore::new()).unwrap();

    let err = api.products().list().await.unwrap_err();
    assert_eq!(err, ApiError::network());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_bearer_token_is_read_from_session_at_request_time() {
    let backend = MockBackend::start(
        Router::new()
            .route("/orders/my-orders", get(|| async { Json(json!([])) }))
            .route("/cold-assets/public/tricycles", get(|| async { Json(json!([])) }))
            .route(
                "/cold-assets/public/tricycles/site/{site}",
                get(|| async { Json(json!({"data": [{"id": "t1", "plateNumber": "RAB 001 A", "status": "AVAILABLE"}]})) }),
            ),
    )
    .await;
    let session = SessionStore::new();
    let api = backend.client_with_session(session.clone());

    api.orders().my_orders().await.unwrap();
    sign_in(&session, "jwt-123");
    api.orders().my_orders().await.unwrap();
    api.logistics().public_tricycles().await.unwrap();
    let at_site = api
        .logistics()
        .public_tricycles_at_site(&SiteId::new("musanze"))
        .await
        .unwrap();
    session.dispatch(SessionAction::Logout);
    api.orders().my_orders().await.unwrap();

    assert_eq!(at_site.len(), 1);
    assert_eq!(at_site[0].status, AssetStatus::Available);

    let auth: Vec<Option<String>> = backend
        .requests()
        .into_iter()
        .map(|request| request.authorization)
        .collect();
    assert_eq!(
        auth,
        [
            None,
            Some("Bearer jwt-123".to_string()),
            None,
            None,
            None
        ]
    );
    assert_eq!(
        backend.requests_to("/site/musanze")[0].path,
        "/api/v1/cold-assets/public/tricycles/site/musanze"
    );
}

#[tokio::test]
async fn test_product_with_image_is_sent_as_multipart() {
    async fn create(mut multipart: Multipart) -> Json<Value> {
        let mut parts = Vec::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let data = field.bytes().await.unwrap();
            parts.push(json!({"name": name, "fileName": file_name, "len": data.len()}));
        }
        Json(json!({"id": "p9", "name": "Avocado", "price": 300, "receivedParts": parts}))
    }

    let backend = MockBackend::start(Router::new().route("/products", post(create))).await;
    let request = CreateProductRequest {
        name: "Avocado".to_string(),
        description: None,
        category: Some("fruit".to_string()),
        price: Decimal::new(300, 0),
        unit: "piece".to_string(),
        quantity: Decimal::new(120, 0),
        site_id: None,
        image: Some(Attachment::new("avocado.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF])),
    };

    let product: Product = backend.client().products().create(&request).await.unwrap();
    let parts = product.extra["receivedParts"].as_array().unwrap();
    let image = parts.iter().find(|part| part["name"] == "image").unwrap();
    assert_eq!(image["fileName"], "avocado.jpg");
    assert_eq!(image["len"], 3);
    assert!(parts.iter().any(|part| part["name"] == "category"));

    let recorded = &backend.requests_to("/products")[0];
    assert!(
        recorded
            .content_type
            .as_deref()
            .unwrap()
            .starts_with("multipart/form-data")
    );
}

#[tokio::test]
async fn test_order_without_attachments_is_json() {
    let backend = MockBackend::start(Router::new().route(
        "/orders",
        post(|Json(body): Json<Value>| async move {
            Json(json!({"id": "o1", "status": "PENDING", "items": body["items"]}))
        }),
    ))
    .await;

    let request = CreateOrderRequest {
        items: vec![OrderLineRequest {
            product_id: ProductId::new("p1"),
            quantity: 3,
        }],
        delivery_address: Some("KG 11 Ave, Kigali".to_string()),
        notes: None,
    };
    let order = backend.client().orders().create(&request).await.unwrap();

    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].quantity, 3);
    assert_eq!(
        backend.requests_to("/orders")[0].content_type.as_deref(),
        Some("application/json")
    );
}

#[tokio::test]
async fn test_cold_asset_paths_follow_kind() {
    let backend = MockBackend::start(
        Router::new()
            .route(
                "/cold-assets/{kind}/{id}/status",
                patch(|Path((kind, id)): Path<(String, String)>, Json(body): Json<Value>| async move {
                    Json(json!({
                        "id": id,
                        "identificationNumber": format!("{kind}-{id}"),
                        "status": body["status"]
                    }))
                }),
            )
            .route(
                "/cold-assets/tricycles",
                get(|| async { Json(json!([{"id": "t1", "plateNumber": "RAB 001 A"}])) }),
            ),
    )
    .await;
    let api = backend.client();

    let updated: ColdBox = api
        .logistics()
        .update_status(&ColdAssetId::new("b7"), AssetStatus::InUse)
        .await
        .unwrap();
    assert_eq!(updated.identification_number, "boxes-b7");
    assert_eq!(updated.status, AssetStatus::InUse);

    let tricycles: Vec<Tricycle> = api.logistics().list().await.unwrap();
    assert_eq!(tricycles.len(), 1);

    let paths: Vec<String> = backend.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        ["/api/v1/cold-assets/boxes/b7/status", "/api/v1/cold-assets/tricycles"]
    );
}
