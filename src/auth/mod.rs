use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub mod rate_limit;

/// Lifetime of the access token (and its cookie)
pub const ACCESS_TOKEN_HOURS: i64 = 8;
/// Lifetime of the refresh token (and its cookie)
pub const REFRESH_TOKEN_DAYS: i64 = 7;

/// Claims carried by both tokens. There are no per-user accounts; the only
/// claim of substance marks the bearer as the administrator.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub adm: bool,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    fn admin(lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            adm: true,
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidToken,
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidToken => write!(f, "Invalid or expired JWT"),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

/// Mint the short-lived access token
pub fn generate_access_token(secret: &str) -> Result<String, JwtError> {
    sign(Claims::admin(Duration::hours(ACCESS_TOKEN_HOURS)), secret)
}

/// Mint the long-lived refresh token
pub fn generate_refresh_token(secret: &str) -> Result<String, JwtError> {
    sign(Claims::admin(Duration::days(REFRESH_TOKEN_DAYS)), secret)
}

fn sign(claims: Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiry; stateless, no revocation list is consulted
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|_| JwtError::InvalidToken)?;

    Ok(token_data.claims)
}
