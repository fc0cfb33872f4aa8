//! Authentication flow end to end: demo identities without a backend, and
//! backend-asserted identity against the mock.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use mofresh_client::models::Attachment;
use mofresh_client::{
    AnyAuthenticator, ApiAuthenticator, ApiClient, ApiConfig, AuthError, AuthFlow, AuthMode,
    SessionStore,
};
use mofresh_core::{Dashboard, Role, SessionPhase, ValidationError};
use mofresh_integration_tests::{MockBackend, unreachable_base_url};
use serde_json::{Value, json};

fn backend_routes() -> Router {
    Router::new()
        .route(
            "/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "correct horse" {
                    (
                        StatusCode::OK,
                        Json(json!({
                            "accessToken": "jwt-admin",
                            "user": {"email": body["email"], "fullName": "Site Admin", "role": "ADMIN"}
                        })),
                    )
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"statusCode": 401, "message": "Invalid email or password"})),
                    )
                }
            }),
        )
        .route(
            "/users/register",
            post(|| async { (StatusCode::CREATED, Json(json!({"message": "OTP sent"}))) }),
        )
        .route(
            "/auth/verify-otp",
            post(|Json(body): Json<Value>| async move {
                if body["otp"] == "424242" {
                    (
                        StatusCode::OK,
                        Json(json!({"data": {
                            "access_token": "jwt-new",
                            "user": {"email": body["email"], "name": "Aline", "role": "SUPPLIER"}
                        }})),
                    )
                } else {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({"message": "Invalid or expired OTP"})),
                    )
                }
            }),
        )
        .route("/auth/resend-otp", post(|| async { Json(json!({"sent": true})) }))
}

async fn demo_flow() -> AuthFlow<AnyAuthenticator> {
    // Demo mode never calls out, so the client may point nowhere.
    let config = ApiConfig::parse(&unreachable_base_url().await).unwrap();
    let session = SessionStore::new();
    let api = ApiClient::new(&config, session.clone()).unwrap();
    AuthFlow::new(AnyAuthenticator::for_mode(AuthMode::Demo, &api), session)
}

#[tokio::test]
async fn test_demo_directory_roles() {
    let cases = [
        ("admin@mofresh.rw", Role::Admin, None, Dashboard::Admin),
        ("kigali@mofresh.rw", Role::SiteManager, Some("Kigali"), Dashboard::Manager),
        ("musanze@mofresh.rw", Role::SiteManager, Some("Musanze"), Dashboard::Manager),
        ("rubavu@mofresh.rw", Role::SiteManager, Some("Rubavu"), Dashboard::Manager),
        ("huye@mofresh.rw", Role::SiteManager, Some("Huye"), Dashboard::Manager),
        ("supplier@mofresh.rw", Role::Supplier, None, Dashboard::Supplier),
        ("buyer@mofresh.rw", Role::Buyer, None, Dashboard::Buyer),
        ("someone@example.com", Role::Buyer, None, Dashboard::Buyer),
    ];

    for (email, role, location, dashboard) in cases {
        let flow = demo_flow().await;
        assert_eq!(flow.login(email, "x").await.unwrap(), dashboard, "{email}");

        let snapshot = serde_json::to_value(flow.session().snapshot()).unwrap();
        assert_eq!(snapshot["isAuthenticated"], true, "{email}");
        assert_eq!(snapshot["user"]["role"], role.as_str(), "{email}");
        assert_eq!(snapshot["user"]["location"], json!(location), "{email}");
    }
}

#[tokio::test]
async fn test_demo_otp_accepts_six_characters_only() {
    let flow = demo_flow().await;
    flow.register("Aline", "0788000000", "aline@mofresh.rw", "pw", Vec::new())
        .await
        .unwrap();

    let err = flow.verify_otp("12345").await.unwrap_err();
    assert_eq!(
        err,
        AuthError::Validation(ValidationError::InvalidOtpLength {
            expected: 6,
            actual: 5
        })
    );
    assert!(flow.session().snapshot().otp_email().is_some());

    flow.verify_otp("abc123").await.unwrap();
    let session = flow.session().snapshot();
    assert!(session.is_authenticated());
    assert!(session.otp_email().is_none());
}

#[tokio::test]
async fn test_backend_login_binds_token_for_later_calls() {
    let backend = MockBackend::start(
        backend_routes().route("/orders/my-orders", axum::routing::get(|| async { Json(json!([])) })),
    )
    .await;
    let session = SessionStore::new();
    let api = backend.client_with_session(session.clone());
    let flow = AuthFlow::new(ApiAuthenticator::new(api.clone()), session.clone());

    let err = flow.login("admin@mofresh.rw", "wrong").await.unwrap_err();
    assert_eq!(err.message(), "Invalid email or password");
    assert_eq!(session.snapshot().error(), Some("Invalid email or password"));
    assert_eq!(session.snapshot().phase(), SessionPhase::Anonymous);

    assert_eq!(
        flow.login("admin@mofresh.rw", "correct horse").await.unwrap(),
        Dashboard::Admin
    );
    assert_eq!(session.snapshot().user().unwrap().name, "Site Admin");

    api.orders().my_orders().await.unwrap();
    let recorded = &backend.requests_to("/my-orders")[0];
    assert_eq!(recorded.authorization.as_deref(), Some("Bearer jwt-admin"));

    let logins = backend.requests_to("/auth/login");
    assert_eq!(logins.len(), 2);
    assert!(logins.iter().all(|request| request.authorization.is_none()));
}

#[tokio::test]
async fn test_backend_registration_and_verification() {
    let backend = MockBackend::start(backend_routes()).await;
    let session = SessionStore::new();
    let flow = AuthFlow::new(
        ApiAuthenticator::new(backend.client_with_session(session.clone())),
        session.clone(),
    );

    let email = flow
        .register("Aline Uwase", "0788000000", "aline@mofresh.rw", "pw", Vec::new())
        .await
        .unwrap();
    assert_eq!(session.snapshot().phase(), SessionPhase::OtpPending(email.clone()));

    // Wrong length: rejected locally.
    assert!(flow.verify_otp("4242").await.unwrap_err().is_validation());
    assert!(backend.requests_to("/auth/verify-otp").is_empty());

    // Right length, wrong code: rejected by the backend, still pending.
    let err = flow.verify_otp("000000").await.unwrap_err();
    assert_eq!(err.message(), "Invalid or expired OTP");
    assert_eq!(session.snapshot().phase(), SessionPhase::OtpPending(email));

    flow.resend_otp().await.unwrap();
    assert_eq!(backend.requests_to("/auth/resend-otp").len(), 1);

    assert_eq!(flow.verify_otp("424242").await.unwrap(), Dashboard::Supplier);
    let session = session.snapshot();
    assert_eq!(session.token().unwrap().expose(), "jwt-new");
    assert!(session.otp_email().is_none());
    assert_eq!(backend.requests_to("/auth/verify-otp").len(), 2);
}

#[tokio::test]
async fn test_registration_accepts_empty_created_reply() {
    let backend = MockBackend::start(
        Router::new().route("/users/register", post(|| async { StatusCode::CREATED })),
    )
    .await;
    let session = SessionStore::new();
    let flow = AuthFlow::new(
        ApiAuthenticator::new(backend.client_with_session(session.clone())),
        session.clone(),
    );

    let email = flow
        .register("Aline Uwase", "0788000000", "aline@mofresh.rw", "pw", Vec::new())
        .await
        .unwrap();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase(), SessionPhase::OtpPending(email));
    assert_eq!(snapshot.error(), None);
}

#[tokio::test]
async fn test_registration_with_documents_is_multipart() {
    let seen: Arc<Mutex<Vec<Value>>> = Arc::default();
    let handler_seen = seen.clone();
    let backend = MockBackend::start(Router::new().route(
        "/users/register",
        post(move |mut multipart: Multipart| {
            let seen = handler_seen.clone();
            async move {
                while let Some(field) = multipart.next_field().await.unwrap() {
                    let name = field.name().unwrap_or_default().to_string();
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let data = field.bytes().await.unwrap();
                    seen.lock().unwrap().push(json!({
                        "name": name,
                        "fileName": file_name,
                        "contentType": content_type,
                        "len": data.len(),
                    }));
                }
                StatusCode::NO_CONTENT
            }
        }),
    ))
    .await;
    let session = SessionStore::new();
    let flow = AuthFlow::new(
        ApiAuthenticator::new(backend.client_with_session(session.clone())),
        session.clone(),
    );

    let documents = vec![
        Attachment::new("national-id.pdf", "application/pdf", b"%PDF-1.7".to_vec()),
        Attachment::new("licence.jpg", "image/jpeg", vec![0xFF, 0xD8]),
    ];
    flow.register("Aline Uwase", "0788000000", "aline@mofresh.rw", "pw", documents)
        .await
        .unwrap();

    let parts = seen.lock().unwrap().clone();
    let names: Vec<&str> = parts.iter().filter_map(|part| part["name"].as_str()).collect();
    assert_eq!(names, ["fullName", "phone", "email", "password", "documents", "documents"]);

    let documents: Vec<&Value> = parts.iter().filter(|part| part["name"] == "documents").collect();
    assert_eq!(documents[0]["fileName"], "national-id.pdf");
    assert_eq!(documents[0]["contentType"], "application/pdf");
    assert_eq!(documents[0]["len"], 8);
    assert_eq!(documents[1]["fileName"], "licence.jpg");
    assert_eq!(documents[1]["len"], 2);

    let recorded = &backend.requests_to("/users/register")[0];
    assert!(
        recorded
            .content_type
            .as_deref()
            .unwrap()
            .starts_with("multipart/form-data")
    );
    assert!(session.snapshot().otp_email().is_some());
}
