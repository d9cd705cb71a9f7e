use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use parfum_api::auth::rate_limit::LoginRateLimiter;
use parfum_api::config::{AppConfig, AuthConfig, Environment, RateLimitConfig};
use parfum_api::state::AppState;
use parfum_api::store::MemoryCatalogStore;

pub const ADMIN_PASSWORD: &str = "s3nh4-admin";
pub const ACCESS_SECRET: &str = "test-access-secret";
pub const REFRESH_SECRET: &str = "test-refresh-secret";

pub fn test_config() -> AppConfig {
    AppConfig {
        environment: Environment::Development,
        port: 0,
        database_url: "postgres://unused".to_string(),
        auth: AuthConfig {
            jwt_secret: ACCESS_SECRET.to_string(),
            jwt_refresh_secret: REFRESH_SECRET.to_string(),
            cookie_name: "auth_token".to_string(),
            // Low cost keeps the test suite fast
            admin_password_hash: Some(bcrypt::hash(ADMIN_PASSWORD, 4).expect("bcrypt hash")),
        },
        cors_origins: vec!["http://localhost:3000".to_string()],
        login_rate_limit: RateLimitConfig {
            max_attempts: 6,
            window_secs: 900,
        },
        trust_proxy: false,
    }
}

/// Router over the in-memory store; each call is a fresh, isolated app
pub fn test_app() -> Router {
    app_with(test_config())
}

pub fn app_with(config: AppConfig) -> Router {
    let limiter = LoginRateLimiter::new(&config.login_rate_limit);
    let state = AppState::new(
        Arc::new(config),
        Arc::new(MemoryCatalogStore::new()),
        Arc::new(limiter),
    );
    parfum_api::app(state)
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.expect("request")
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request build")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request build")
}

pub async fn body_json(res: Response<Body>) -> Value {
    let bytes = res
        .into_body()
        .collect()
        .await
        .expect("body collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body json")
}

/// All Set-Cookie header values on a response
pub fn set_cookies(res: &Response<Body>) -> Vec<String> {
    res.headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().expect("cookie header").to_string())
        .collect()
}

/// Value of the named cookie among Set-Cookie headers, if present
pub fn cookie_value(cookies: &[String], name: &str) -> Option<String> {
    cookies.iter().find_map(|c| {
        let pair = c.split(';').next()?;
        let (cookie_name, value) = pair.split_once('=')?;
        (cookie_name == name).then(|| value.to_string())
    })
}

/// Log in with the test password and return the access-token Cookie header
pub async fn login_cookie(app: &Router) -> String {
    let res = send(
        app,
        json_request("POST", "/login", &serde_json::json!({ "senha": ADMIN_PASSWORD })),
    )
    .await;
    let cookies = set_cookies(&res);
    let token = cookie_value(&cookies, "auth_token").expect("access cookie set");
    format!("auth_token={token}")
}
