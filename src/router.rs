//! # Routing
//!
//! Builds the axum `Router` and keeps the table that `GET /` reports.

use crate::handlers::auth::{login, logout, register};
use crate::handlers::health::health_check;
use crate::handlers::index::list_endpoints;
use crate::middleware::auth::require_auth;
use crate::state::AppState;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// One row of the route listing served at `GET /`
#[derive(Debug, Serialize)]
pub struct Endpoint {
    pub path: &'static str,
    pub methods: &'static [&'static str],
    pub middlewares: &'static [&'static str],
}

/// Every route `build_router` mounts
pub const ENDPOINTS: &[Endpoint] = &[
    Endpoint { path: "/", methods: &["GET"], middlewares: &[] },
    Endpoint { path: "/health", methods: &["GET"], middlewares: &[] },
    Endpoint { path: "/register", methods: &["POST"], middlewares: &[] },
    Endpoint { path: "/login", methods: &["POST"], middlewares: &[] },
    Endpoint { path: "/logout", methods: &["POST"], middlewares: &["require_auth"] },
];

/// Build the application router
///
/// Protected routes sit in their own router behind `require_auth` and are
/// merged into the public one. CORS is open to any origin.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/logout", post(logout))
        .route_layer(axum_middleware::from_fn_with_state(state.clone(), require_auth));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(list_endpoints))
        .route("/health", get(health_check))
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::accounts;
    use axum::body::{Body, Bytes};
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app() -> (Router, AppState) {
        let state = AppState::in_memory().await.unwrap();
        (build_router(state.clone()), state)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn logout_request(token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/logout");
        if let Some(token) = token {
            builder = builder.header("authorization", token);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Bytes) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, bytes)
    }

    async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, req).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn register(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
        send_json(
            app,
            post_json("/register", json!({ "username": username, "password": password })),
        )
        .await
    }

    #[tokio::test]
    async fn short_or_missing_password_is_rejected() {
        let (app, state) = app().await;

        for username in ["alice", "x", "a_very_long_username_indeed"] {
            let (status, body) = register(&app, username, "abc").await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["success"], false);
            assert_eq!(body["response"], "Password needs to be at least 6 characters long");
        }

        let (status, body) =
            send_json(&app, post_json("/register", json!({ "username": "alice" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["response"], "Password is required");

        assert_eq!(accounts::count(&state.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn register_returns_token_without_hash() {
        let (app, _) = app().await;

        let (status, body) = register(&app, "alice", "secret1").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "User created successfully");
        assert_eq!(body["response"]["username"], "alice");
        assert!(body["response"]["id"].as_str().is_some());
        assert!(!body["response"]["accessToken"].as_str().unwrap().is_empty());
        assert!(!body.to_string().contains("argon2"));
    }

    #[tokio::test]
    async fn duplicate_registration_fails_and_keeps_one_account() {
        let (app, state) = app().await;

        let (first, _) = register(&app, "alice", "secret1").await;
        let (second, body) = register(&app, "alice", "secret2").await;

        assert_eq!(first, StatusCode::CREATED);
        assert_eq!(second, StatusCode::BAD_REQUEST);
        assert_eq!(body["response"], "Could not create user");
        assert_eq!(accounts::count(&state.db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn username_outside_bounds_is_a_create_failure() {
        let (app, _) = app().await;

        let (status, body) = register(&app, "a", "secret1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["response"], "Could not create user");
        assert!(body["error"].as_str().unwrap().contains("between 2 and 14"));

        let (status, _) = register(&app, "fifteen_chars_x", "secret1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_returns_registration_token() {
        let (app, _) = app().await;
        let (_, registered) = register(&app, "alice", "secret1").await;

        let (status, body) = send_json(
            &app,
            post_json("/login", json!({ "username": "alice", "password": "secret1" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User logged in successfully");
        assert_eq!(body["response"]["id"], registered["response"]["id"]);
        assert_eq!(
            body["response"]["accessToken"],
            registered["response"]["accessToken"]
        );
    }

    #[tokio::test]
    async fn login_failures_are_byte_identical() {
        let (app, _) = app().await;
        register(&app, "alice", "secret1").await;

        let (wrong_status, wrong_password) = send(
            &app,
            post_json("/login", json!({ "username": "alice", "password": "wrong12" })),
        )
        .await;
        let (unknown_status, unknown_user) = send(
            &app,
            post_json("/login", json!({ "username": "nobody", "password": "secret1" })),
        )
        .await;

        assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
        assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
        assert_eq!(wrong_password, unknown_user);

        let body: Value = serde_json::from_slice(&wrong_password).unwrap();
        assert_eq!(body["message"], "Credentials do not match");
    }

    #[tokio::test]
    async fn protected_route_without_token_is_forbidden() {
        let (app, _) = app().await;

        let (status, body) = send_json(&app, logout_request(None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Please log in");

        let (status, _) = send_json(&app, logout_request(Some(""))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send_json(&app, logout_request(Some("not-a-token"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn logout_then_token_is_dead() {
        let (app, _) = app().await;

        let (status, body) = register(&app, "bob", "abcdef").await;
        assert_eq!(status, StatusCode::CREATED);
        let t1 = body["response"]["accessToken"].as_str().unwrap().to_string();
        assert!(!t1.is_empty());

        let (status, body) = send_json(&app, logout_request(Some(&t1))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User logged out successfully");

        // The gate now rejects the cleared token before logout runs again
        let (status, _) = send_json(&app, logout_request(Some(&t1))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn bearer_prefix_is_accepted() {
        let (app, _) = app().await;
        let (_, body) = register(&app, "bob", "abcdef").await;
        let token = body["response"]["accessToken"].as_str().unwrap();

        let header = format!("Bearer {}", token);
        let (status, _) = send_json(&app, logout_request(Some(&header))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn login_after_logout_gets_a_working_token() {
        let (app, _) = app().await;
        let (_, body) = register(&app, "bob", "abcdef").await;
        let t1 = body["response"]["accessToken"].as_str().unwrap().to_string();

        send_json(&app, logout_request(Some(&t1))).await;

        let (status, body) = send_json(
            &app,
            post_json("/login", json!({ "username": "bob", "password": "abcdef" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let t2 = body["response"]["accessToken"].as_str().unwrap().to_string();
        assert_ne!(t1, t2);

        let (status, _) = send_json(&app, logout_request(Some(&t1))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = send_json(&app, logout_request(Some(&t2))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn index_lists_every_route() {
        let (app, _) = app().await;
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();

        let (status, body) = send_json(&app, req).await;
        assert_eq!(status, StatusCode::OK);

        let routes = body.as_array().unwrap();
        assert_eq!(routes.len(), ENDPOINTS.len());
        let logout = routes.iter().find(|r| r["path"] == "/logout").unwrap();
        assert_eq!(logout["methods"], json!(["POST"]));
        assert_eq!(logout["middlewares"], json!(["require_auth"]));
    }

    #[tokio::test]
    async fn health_reports_database() {
        let (app, _) = app().await;
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let (status, body) = send_json(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "ok");
    }

    fn post_raw(uri: &str, content_type: Option<&str>, body: &'static str) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn non_string_username_still_hits_the_password_check() {
        let (app, state) = app().await;

        let (status, body) = send_json(
            &app,
            post_json("/register", json!({ "username": 12345, "password": "abc" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["response"], "Password needs to be at least 6 characters long");
        assert_eq!(accounts::count(&state.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unreadable_register_bodies_get_the_envelope() {
        let (app, state) = app().await;

        let requests = [
            post_raw("/register", None, r#"{"username":"alice","password":"abc"}"#),
            post_raw("/register", Some("text/plain"), "username=alice"),
            post_raw("/register", Some("application/json"), "{not json"),
            post_raw("/register", Some("application/json"), r#""alice:secret1""#),
        ];

        for req in requests {
            let (status, body) = send_json(&app, req).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["success"], false);
            assert!(body["message"].as_str().unwrap().contains("JSON object"));
        }

        assert_eq!(accounts::count(&state.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unreadable_login_bodies_look_like_bad_credentials() {
        let (app, _) = app().await;
        register(&app, "alice", "secret1").await;

        let (_, expected) = send(
            &app,
            post_json("/login", json!({ "username": "alice", "password": "wrong12" })),
        )
        .await;

        let requests = [
            post_raw("/login", None, r#"{"username":"alice","password":"secret1"}"#),
            post_raw("/login", Some("application/json"), "{not json"),
        ];

        for req in requests {
            let (status, bytes) = send(&app, req).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(bytes, expected);
        }
    }

    #[tokio::test]
    async fn store_failures_are_internal_errors() {
        let (app, state) = app().await;
        state.db.close().await;

        let (status, body) = send_json(&app, logout_request(Some("some-token"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["response"], "Internal server error");

        let (status, body) = send_json(
            &app,
            post_json("/login", json!({ "username": "alice", "password": "secret1" })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
    }

    #[tokio::test]
    async fn every_listed_endpoint_is_routed() {
        let (app, _) = app().await;

        for endpoint in ENDPOINTS {
            for method in endpoint.methods {
                let req = Request::builder()
                    .method(*method)
                    .uri(endpoint.path)
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap();

                let (status, _) = send(&app, req).await;
                assert_ne!(status, StatusCode::NOT_FOUND, "{} {}", method, endpoint.path);
                assert_ne!(
                    status,
                    StatusCode::METHOD_NOT_ALLOWED,
                    "{} {}",
                    method,
                    endpoint.path
                );
            }
        }
    }
}
