use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Errors raised while building configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
    pub cors_origins: Vec<String>,
    pub login_rate_limit: RateLimitConfig,
    /// Honor X-Forwarded-For when identifying clients. Enable only when the
    /// service sits behind a proxy that appends the real peer address;
    /// otherwise the header is client-supplied and spoofable.
    pub trust_proxy: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret for signing the short-lived access token (8h)
    pub jwt_secret: String,
    /// Secret for signing the long-lived refresh token (7d)
    pub jwt_refresh_secret: String,
    /// Access-token cookie name; the refresh cookie is "<name>_refresh"
    pub cookie_name: String,
    /// bcrypt hash of the shared administrator password. May be absent;
    /// login then fails per-request rather than at startup.
    pub admin_password_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub max_attempts: u32,
    pub window_secs: u64,
}

impl AuthConfig {
    pub fn refresh_cookie_name(&self) -> String {
        format!("{}_refresh", self.cookie_name)
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        let jwt_refresh_secret = env::var("JWT_REFRESH_SECRET")
            .map_err(|_| ConfigError::Missing("JWT_REFRESH_SECRET"))?;

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(3000);

        let cors_origins = match env::var("CORS_ORIGINS") {
            Ok(v) => v.split(',').map(|s| s.trim().to_string()).collect(),
            Err(_) => Self::default_cors_origins(),
        };

        let mut login_rate_limit = RateLimitConfig {
            max_attempts: 6,
            window_secs: 15 * 60,
        };
        if let Ok(v) = env::var("LOGIN_RATE_LIMIT_MAX") {
            login_rate_limit.max_attempts = v.parse().unwrap_or(login_rate_limit.max_attempts);
        }
        if let Ok(v) = env::var("LOGIN_RATE_LIMIT_WINDOW_SECS") {
            login_rate_limit.window_secs = v.parse().unwrap_or(login_rate_limit.window_secs);
        }

        Ok(Self {
            environment,
            port,
            database_url,
            auth: AuthConfig {
                jwt_secret,
                jwt_refresh_secret,
                cookie_name: env::var("COOKIE_NAME").unwrap_or_else(|_| "auth_token".to_string()),
                admin_password_hash: env::var("ADMIN_PASSWORD_HASH").ok(),
            },
            cors_origins,
            login_rate_limit,
            trust_proxy: env::var("TRUST_PROXY")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }

    /// Origins the deployed storefront and admin panel are served from
    fn default_cors_origins() -> Vec<String> {
        vec![
            "http://localhost".to_string(),
            "http://localhost:3000".to_string(),
            "https://imperiumparfumm.onrender.com".to_string(),
            "https://imperiumparfumm-api.onrender.com".to_string(),
        ]
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
