//! Router-level tests against a fake identity provider and in-memory favourites.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use deals_back::{
    AppError, AppState, app,
    config::{CorsConfig, ServerConfig},
    models::AuthTokens,
    queries::memory_favourites::MemoryFavouritesStore,
    services::{
        catalog_service::Catalog,
        favourites_service::FavouritesService,
        identity_service::{IdentityGateway, IdentityProvider, ProviderError, ProviderResult},
    },
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tower::ServiceExt;

#[derive(Default)]
struct FakeProvider {
    calls: Mutex<Vec<String>>,
    unconfirmed: Mutex<bool>,
}

impl FakeProvider {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn sign_up(&self, email: &str, _: &str, nickname: &str) -> ProviderResult<()> {
        self.record(format!("sign_up:{email}:{nickname}"));
        if email == "taken@example.com" {
            return Err(ProviderError::Rejected(
                "UsernameExistsException: User already exists".into(),
            ));
        }
        Ok(())
    }

    async fn confirm_sign_up(&self, email: &str, code: &str) -> ProviderResult<()> {
        self.record(format!("confirm:{email}:{code}"));
        if code != "123456" {
            return Err(ProviderError::Rejected(
                "CodeMismatchException: Invalid verification code provided".into(),
            ));
        }
        Ok(())
    }

    async fn resend_confirmation_code(&self, email: &str) -> ProviderResult<()> {
        self.record(format!("resend:{email}"));
        Ok(())
    }

    async fn initiate_auth(&self, email: &str, password: &str) -> ProviderResult<Option<AuthTokens>> {
        self.record(format!("auth:{email}"));
        if *self.unconfirmed.lock().unwrap() {
            return Err(ProviderError::UserNotConfirmed(
                "UserNotConfirmedException: User is not confirmed.".into(),
            ));
        }
        if password != "correct-horse" {
            return Err(ProviderError::Rejected(
                "NotAuthorizedException: Incorrect username or password.".into(),
            ));
        }
        Ok(Some(AuthTokens {
            id_token: "id-token".into(),
            access_token: "access-token".into(),
            refresh_token: "refresh-token".into(),
        }))
    }

    async fn admin_confirm_sign_up(&self, email: &str) -> ProviderResult<()> {
        self.record(format!("admin_confirm:{email}"));
        *self.unconfirmed.lock().unwrap() = false;
        Ok(())
    }

    async fn change_password(&self, access_token: &str, old: &str, _: &str) -> ProviderResult<()> {
        self.record(format!("change_password:{access_token}"));
        if old != "old-pass" {
            return Err(ProviderError::Rejected(
                "NotAuthorizedException: Incorrect username or password.".into(),
            ));
        }
        Ok(())
    }
}

fn test_state(provider: Arc<FakeProvider>) -> AppState {
    AppState {
        catalog: Arc::new(Catalog::demo()),
        identity: Arc::new(IdentityGateway::new(provider)),
        favourites: Arc::new(FavouritesService::new(Arc::new(
            MemoryFavouritesStore::default(),
        ))),
    }
}

fn test_server() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        max_body_size: 64 * 1024,
    }
}

fn test_app(provider: Arc<FakeProvider>) -> Router {
    let cors = CorsConfig {
        allowed_origins: vec![
            "http://localhost:5173".into(),
            "http://localhost:3000".into(),
        ],
    };

    app::router(test_state(provider), &test_server(), &cors).expect("router")
}

fn token(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"not-the-provider-key"),
    )
    .expect("encode token")
}

fn id_token(sub: &str) -> String {
    token(json!({ "sub": sub, "token_use": "id", "email": "a@example.com" }))
}

fn json_request(method: &str, uri: &str, body: Value, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse JSON")
    };
    (status, json)
}

#[tokio::test]
async fn ping_answers_pong() {
    let app = test_app(Arc::default());
    let (status, body) = send(&app, get("/ping", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "pong" }));
}

#[tokio::test]
async fn product_lists_minimal_catalog() {
    let app = test_app(Arc::default());
    let (status, body) = send(&app, get("/product", None)).await;

    assert_eq!(status, StatusCode::OK);
    let products = body.as_array().expect("array");
    let expected = [
        ("1", "Laptop X", 999.99),
        ("2", "Smartphone Y", 499.5),
        ("3", "Headphones Z", 89.9),
    ];
    assert_eq!(products.len(), expected.len());
    for (product, (id, name, price)) in products.iter().zip(expected) {
        assert_eq!(product["id"], id);
        assert_eq!(product["name"], name);
        let actual = product["price"].as_f64().expect("numeric price");
        assert!((actual - price).abs() < 1e-9, "price {actual} != {price}");
    }
}

#[tokio::test]
async fn products_lists_full_catalog() {
    let app = test_app(Arc::default());
    let (status, body) = send(&app, get("/products", None)).await;

    assert_eq!(status, StatusCode::OK);
    let products = body.as_array().expect("array");
    assert_eq!(products.len(), Catalog::demo().products().len());
    for product in products {
        for field in ["id", "title", "price", "store", "image", "category", "description"] {
            assert!(product[field].is_string(), "missing {field} in {product}");
        }
    }
}

#[tokio::test]
async fn register_forwards_to_provider() {
    let provider = Arc::new(FakeProvider::default());
    let app = test_app(provider.clone());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/register",
            json!({ "email": "new@example.com", "password": "Secret1!", "nickname": "neo" }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "registered, check your email for confirmation code"
    );
    assert_eq!(provider.calls(), vec!["sign_up:new@example.com:neo"]);
}

#[tokio::test]
async fn register_passes_provider_error_through() {
    let app = test_app(Arc::default());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/register",
            json!({ "email": "taken@example.com", "password": "Secret1!", "nickname": "x" }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "UsernameExistsException: User already exists");
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let provider = Arc::new(FakeProvider::default());
    let app = test_app(provider.clone());

    let req = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid request");

    let (status, body) = send(
        &app,
        json_request("POST", "/login", json!({ "email": "a@example.com" }), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid request");

    let (status, body) = send(
        &app,
        json_request("POST", "/confirm", json!({ "email": "", "code": "1" }), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "email is required");

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn login_returns_token_triple() {
    let app = test_app(Arc::default());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/login",
            json!({ "email": "a@example.com", "password": "correct-horse" }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id_token": "id-token",
            "access_token": "access-token",
            "refresh_token": "refresh-token",
        })
    );
}

#[tokio::test]
async fn login_auto_confirms_unconfirmed_account_once() {
    let provider = Arc::new(FakeProvider {
        unconfirmed: Mutex::new(true),
        ..Default::default()
    });
    let app = test_app(provider.clone());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/login",
            json!({ "email": "a@example.com", "password": "correct-horse" }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["access_token"], "access-token");
    assert_eq!(
        provider.calls(),
        vec![
            "auth:a@example.com",
            "admin_confirm:a@example.com",
            "auth:a@example.com",
        ]
    );
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = test_app(Arc::default());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/login",
            json!({ "email": "a@example.com", "password": "nope" }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["error"],
        "NotAuthorizedException: Incorrect username or password."
    );
}

#[tokio::test]
async fn confirm_and_resend() {
    let provider = Arc::new(FakeProvider::default());
    let app = test_app(provider.clone());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/confirm",
            json!({ "email": "a@example.com", "code": "123456" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "confirmed");

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/confirm",
            json!({ "email": "a@example.com", "code": "000000" }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "CodeMismatchException: Invalid verification code provided"
    );

    let (status, body) = send(
        &app,
        json_request("POST", "/resend-confirm", json!({ "email": "a@example.com" }), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "code resent");
}

#[tokio::test]
async fn change_password_requires_bearer_token() {
    let provider = Arc::new(FakeProvider::default());
    let app = test_app(provider.clone());
    let body = json!({ "old_password": "old-pass", "new_password": "new-pass" });

    let (status, resp) = send(
        &app,
        json_request("POST", "/change-password", body.clone(), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp["error"], "missing token");

    let (status, resp) = send(
        &app,
        json_request("POST", "/change-password", body, Some("opaque-access")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["message"], "password changed");
    assert_eq!(provider.calls(), vec!["change_password:opaque-access"]);

    let (status, resp) = send(
        &app,
        json_request(
            "POST",
            "/change-password",
            json!({ "old_password": "bad", "new_password": "new-pass" }),
            Some("opaque-access"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        resp["error"],
        "NotAuthorizedException: Incorrect username or password."
    );
}

#[tokio::test]
async fn token_gate_rejects_bad_tokens() {
    let app = test_app(Arc::default());

    let (status, body) = send(&app, get("/favourites?userId=u1", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing token");

    let req = Request::builder()
        .uri("/favourites?userId=u1")
        .header(header::AUTHORIZATION, id_token("u1"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing token");

    let (status, body) = send(&app, get("/favourites?userId=u1", Some("garbage"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid token");

    let refresh = token(json!({ "sub": "u1", "token_use": "refresh" }));
    let (status, body) = send(&app, get("/favourites?userId=u1", Some(&refresh))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid token type");

    let numeric_use = token(json!({ "sub": "u1", "token_use": 5 }));
    let (status, body) = send(&app, get("/favourites?userId=u1", Some(&numeric_use))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid token type");

    let no_use = token(json!({ "sub": "u1" }));
    let (status, body) = send(&app, get("/favourites?userId=u1", Some(&no_use))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid token type");

    let access = token(json!({ "sub": "u1", "token_use": "access" }));
    let (status, _) = send(&app, get("/favourites?userId=u1", Some(&access))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_user_has_no_favourites() {
    let app = test_app(Arc::default());
    let token = id_token("u1");

    let (status, body) = send(&app, get("/favourites?userId=fresh", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "favouriteProducts": [] }));
}

#[tokio::test]
async fn adding_twice_reports_already_in_favourites() {
    let app = test_app(Arc::default());
    let token = id_token("u1");
    let body = json!({ "userId": "u1", "dealId": "d1" });

    let (status, resp) = send(
        &app,
        json_request("POST", "/addfavourite", body.clone(), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp, json!({ "status": "added", "favouriteProducts": ["d1"] }));

    let (status, resp) = send(
        &app,
        json_request("PUT", "/addfavourite", body, Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        resp,
        json!({ "status": "already_in_favourites", "favouriteProducts": ["d1"] })
    );

    let (_, resp) = send(&app, get("/favourites?userId=u1", Some(&token))).await;
    assert_eq!(resp, json!({ "favouriteProducts": ["d1"] }));
}

#[tokio::test]
async fn remove_reports_status() {
    let app = test_app(Arc::default());
    let token = id_token("u1");

    for deal in ["d1", "d2"] {
        send(
            &app,
            json_request(
                "PUT",
                "/addfavourite",
                json!({ "userId": "u1", "dealId": deal }),
                Some(&token),
            ),
        )
        .await;
    }

    let (status, resp) = send(
        &app,
        json_request(
            "PUT",
            "/removefavourite",
            json!({ "userId": "u1", "dealId": "d1" }),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp, json!({ "status": "removed", "favouriteProducts": ["d2"] }));

    let (status, resp) = send(
        &app,
        json_request(
            "PUT",
            "/removefavourite",
            json!({ "userId": "u1", "dealId": "never" }),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        resp,
        json!({ "status": "not_in_favourites", "favouriteProducts": ["d2"] })
    );
}

#[tokio::test]
async fn user_id_defaults_to_token_subject() {
    let app = test_app(Arc::default());
    let token = id_token("subject-7");

    let (status, resp) = send(
        &app,
        json_request("PUT", "/addfavourite", json!({ "dealId": "d9" }), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["favouriteProducts"], json!(["d9"]));

    let (_, resp) = send(&app, get("/favourites", Some(&token))).await;
    assert_eq!(resp, json!({ "favouriteProducts": ["d9"] }));

    let (status, resp) = send(
        &app,
        json_request("PUT", "/addfavourite", json!({ "dealId": "" }), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["error"], "dealId is required");
}

#[tokio::test]
async fn cors_preflight_allows_frontend_origin() {
    let app = test_app(Arc::default());

    let req = Request::builder()
        .method("OPTIONS")
        .uri("/addfavourite")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.expect("request");

    let headers = resp.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "43200");

    let req = Request::builder()
        .uri("/ping")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.expect("request");
    assert!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[tokio::test]
async fn explicit_user_id_overrides_token_subject() {
    let app = test_app(Arc::default());
    let token = id_token("someone-else");

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            "/addfavourite",
            json!({ "userId": "u1", "dealId": "d1" }),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, resp) = send(&app, get("/favourites?userId=u1", Some(&token))).await;
    assert_eq!(resp, json!({ "favouriteProducts": ["d1"] }));

    let (_, resp) = send(&app, get("/favourites", Some(&token))).await;
    assert_eq!(resp, json!({ "favouriteProducts": [] }));
}

#[test]
fn wildcard_cors_origin_is_a_config_error() {
    for origins in [vec!["*"], vec!["http://localhost:5173", "https://*.example.com"]] {
        let cors = CorsConfig {
            allowed_origins: origins.into_iter().map(String::from).collect(),
        };

        let result = app::router(test_state(Arc::default()), &test_server(), &cors);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
