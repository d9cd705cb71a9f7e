use std::net::SocketAddr;
use std::sync::Arc;

use parfum_api::auth::rate_limit::LoginRateLimiter;
use parfum_api::config::AppConfig;
use parfum_api::state::AppState;
use parfum_api::store::PgCatalogStore;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("configuration error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Starting parfum-api in {:?} mode", config.environment);

    // Storage must be reachable and the table ensured before serving
    let store = match PgCatalogStore::connect(&config.database_url).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("failed to initialize storage: {}", e);
            std::process::exit(1);
        }
    };

    let limiter = LoginRateLimiter::new(&config.login_rate_limit);
    let port = config.port;
    let state = AppState::new(Arc::new(config), Arc::new(store), Arc::new(limiter));

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Servidor rodando na porta {}", port);

    // ConnectInfo feeds the login throttle's per-client key
    axum::serve(
        listener,
        parfum_api::app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server");
}
