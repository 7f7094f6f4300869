use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use super::verify_token;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated subject extracted from the bearer token. Declaring this as
/// a handler argument gates the route; routes without it stay public.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::unauthorized("No token, authorization denied"))?;

        let value = header
            .to_str()
            .map_err(|_| ApiError::unauthorized("No token, authorization denied"))?;

        let token = extract_bearer_token(value)?;
        let claims = verify_token(token, &state.config.security)?;

        Ok(AuthUser {
            id: claims.user.id,
        })
    }
}

/// Parse "Bearer <token>" and return the token portion.
fn extract_bearer_token(header: &str) -> Result<&str, ApiError> {
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized("No token, authorization denied"))?
        .trim();

    if token.is_empty() {
        return Err(ApiError::unauthorized("No token, authorization denied"));
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bearer_tokens() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert!(extract_bearer_token("Basic abc").is_err());
        assert!(extract_bearer_token("Bearer ").is_err());
        assert!(extract_bearer_token("abc.def.ghi").is_err());
    }
}
