use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{issue_token, password};
use crate::database::accounts;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{FieldError, Rules};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

fn invalid_credentials() -> ApiError {
    // Unknown email and wrong password are indistinguishable to the client
    ApiError::validation_failed(vec![FieldError::message_only("Invalid Credentials")])
}

/// POST /api/auth - authenticate and receive a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    Rules::new()
        .email("email", body.email.as_deref(), "Please include a valid email")
        .required("password", body.password.as_deref(), "Password is required")
        .finish()?;

    let email = body.email.unwrap_or_default();
    let submitted = body.password.unwrap_or_default();

    let creds = accounts::find_credentials_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !password::verify_password(&submitted, &creds.password)? {
        return Err(invalid_credentials());
    }

    let token = issue_token(creds.id, &state.config.security)?;
    Ok(Json(json!({ "token": token })))
}
