use axum::extract::{Path, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::guard::AuthUser;
use crate::database::models::profile;
use crate::database::models::{Experience, ProfileRow, ProfileView, SocialLinks};
use crate::database::profiles;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::{parse_date, split_skills, Rules};

const NO_PROFILE: &str = "There is no profile for this user";

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// GET /api/profile/me - the caller's profile with owner name and avatar.
pub async fn me(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<ProfileView>, ApiError> {
    let row = profiles::find_with_owner_by_account(&state.pool, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found(NO_PROFILE))?;
    Ok(Json(row.into()))
}

#[derive(Debug, Deserialize)]
pub struct UpsertProfileRequest {
    pub status: Option<String>,
    pub skills: Option<String>,
    /// Accepted for wire compatibility; experience is managed through the
    /// dedicated /api/profile/exp endpoints and never set here.
    #[allow(dead_code)]
    pub exp: Option<Value>,
    pub youtube: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

/// POST /api/profile - create or update the caller's profile.
///
/// Find-then-update-or-create keyed by the owning account. Concurrent
/// upserts by the same caller can race; the unique index on the owner column
/// keeps the outcome at one profile either way.
pub async fn upsert(
    user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<UpsertProfileRequest>,
) -> Result<Json<ProfileRow>, ApiError> {
    Rules::new()
        .required("status", body.status.as_deref(), "Status is required")
        .required("skills", body.skills.as_deref(), "Skills is required")
        .finish()?;

    let status = body.status.unwrap_or_default();
    let skills = split_skills(&body.skills.unwrap_or_default());
    let social = SocialLinks {
        youtube: non_empty(body.youtube),
        facebook: non_empty(body.facebook),
        linkedin: non_empty(body.linkedin),
        instagram: non_empty(body.instagram),
    };

    if let Some(updated) =
        profiles::update_by_account(&state.pool, user.id, &status, &skills, &social).await?
    {
        return Ok(Json(updated));
    }

    let created = profiles::insert(&state.pool, user.id, &status, &skills, &social).await?;
    Ok(Json(created))
}

/// GET /api/profile - all profiles with owner summaries.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProfileView>>, ApiError> {
    let rows = profiles::list_with_owner(&state.pool).await?;
    Ok(Json(rows.into_iter().map(ProfileView::from).collect()))
}

/// GET /api/profile/user/:user_id - profile by owning account id.
///
/// A malformed id and a missing profile are the same condition to callers.
pub async fn by_account(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileView>, ApiError> {
    let account_id =
        Uuid::parse_str(&user_id).map_err(|_| ApiError::not_found("Profile not found"))?;

    let row = profiles::find_with_owner_by_account(&state.pool, account_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Profile not found"))?;
    Ok(Json(row.into()))
}

/// DELETE /api/profile - delete the caller's profile and account together.
/// Deleting your profile deletes your login; listings stay behind.
pub async fn delete_mine(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    profiles::delete_with_account(&state.pool, user.id).await?;
    Ok(Json(json!({ "msg": "User deleted" })))
}

#[derive(Debug, Deserialize)]
pub struct AddExperienceRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

/// PUT /api/profile/exp - prepend a work-history entry to the caller's
/// profile, most recent first.
pub async fn add_experience(
    user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<AddExperienceRequest>,
) -> Result<Json<ProfileRow>, ApiError> {
    Rules::new()
        .required("title", body.title.as_deref(), "Title is required")
        .required("company", body.company.as_deref(), "Company is required")
        .required("from", body.from.as_deref(), "From is required")
        .date("from", body.from.as_deref(), "From must be a date (YYYY-MM-DD)")
        .date("to", body.to.as_deref(), "To must be a date (YYYY-MM-DD)")
        .finish()?;

    // Present and well-formed past validation
    let from = body.from.as_deref().and_then(parse_date).unwrap_or_default();
    let to = body.to.as_deref().and_then(parse_date);

    let row = profiles::find_by_account(&state.pool, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found(NO_PROFILE))?;

    let entry = Experience {
        id: Uuid::new_v4(),
        title: body.title.unwrap_or_default(),
        company: body.company.unwrap_or_default(),
        location: non_empty(body.location),
        from,
        to,
        current: body.current.unwrap_or(false),
        description: non_empty(body.description),
    };

    let mut entries = row.exp.0;
    profile::prepend_experience(&mut entries, entry);

    let updated = profiles::set_experience(&state.pool, row.id, &entries).await?;
    Ok(Json(updated))
}

/// DELETE /api/profile/exp/:exp_id - remove a work-history entry by id.
/// An unknown id leaves the list untouched.
pub async fn remove_experience(
    user: AuthUser,
    State(state): State<AppState>,
    Path(exp_id): Path<String>,
) -> Result<Json<ProfileRow>, ApiError> {
    let exp_id =
        Uuid::parse_str(&exp_id).map_err(|_| ApiError::not_found("Experience not found"))?;

    let row = profiles::find_by_account(&state.pool, user.id)
        .await?
        .ok_or_else(|| ApiError::not_found(NO_PROFILE))?;

    let mut entries = row.exp.0;
    if !profile::remove_experience(&mut entries, exp_id) {
        return Err(ApiError::not_found("Experience not found"));
    }

    let updated = profiles::set_experience(&state.pool, row.id, &entries).await?;
    Ok(Json(updated))
}
