pub mod guard;
pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::error::ApiError;

/// Token claims. The subject rides in a nested `user` object to stay
/// wire-compatible with tokens the previous backend issued.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user: ClaimsUser,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimsUser {
    pub id: Uuid,
}

impl Claims {
    pub fn new(account_id: Uuid, expiry_hours: u64) -> Self {
        let now = Utc::now();
        Self {
            user: ClaimsUser { id: account_id },
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Issue a signed bearer token for the given account.
pub fn issue_token(account_id: Uuid, security: &SecurityConfig) -> Result<String, ApiError> {
    if security.jwt_secret.is_empty() {
        tracing::error!("refusing to issue token: JWT secret not configured");
        return Err(ApiError::internal("Server Error"));
    }

    let claims = Claims::new(account_id, security.jwt_expiry_hours);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(security.jwt_secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("token generation failed: {}", e);
        ApiError::internal("Server Error")
    })
}

/// Verify a bearer token and return its claims. Malformed, expired and
/// bad-signature tokens all collapse to the same error kind for callers.
pub fn verify_token(token: &str, security: &SecurityConfig) -> Result<Claims, ApiError> {
    if security.jwt_secret.is_empty() {
        return Err(ApiError::unauthorized("Token is not valid"));
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(security.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::unauthorized("Token is not valid"))
}
