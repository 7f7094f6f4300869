use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::guard::AuthUser;
use crate::auth::{issue_token, password};
use crate::database::accounts::{self, NewAccount};
use crate::database::models::{avatar_url, AccountPublic};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::Rules;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub fullname: Option<String>,
    pub address: Option<String>,
    pub role: Option<String>,
    pub wallet: Option<String>,
}

/// POST /api/users - register a new account.
///
/// Registration doubles as login: a bearer token for the new account is
/// returned on success.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<Value>, ApiError> {
    Rules::new()
        .required("name", body.name.as_deref(), "Name is required")
        .email("email", body.email.as_deref(), "Please include a valid email")
        .min_len(
            "password",
            body.password.as_deref(),
            6,
            "Please enter a password with 6 or more characters",
        )
        .finish()?;

    // Validated above; never empty past this point
    let email = body.email.unwrap_or_default();

    if accounts::email_exists(&state.pool, &email).await? {
        return Err(ApiError::conflict("User already exists"));
    }

    let account = NewAccount {
        name: body.name.unwrap_or_default(),
        avatar: avatar_url(&email),
        email,
        password_hash: password::hash_password(&body.password.unwrap_or_default())?,
        fullname: body.fullname,
        address: body.address,
        role: body.role,
        wallet: body.wallet,
    };

    let account_id = accounts::insert(&state.pool, account).await?;
    let token = issue_token(account_id, &state.config.security)?;

    Ok(Json(json!({ "token": token })))
}

/// GET /api/users - list all accounts. Password hashes never leave the
/// projection boundary.
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountPublic>>, ApiError> {
    let accounts = accounts::list_public(&state.pool).await?;
    Ok(Json(accounts))
}
