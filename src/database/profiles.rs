use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::profile::SocialLinks;
use super::models::{Experience, ProfileRow, ProfileWithOwnerRow};
use super::DatabaseError;

const PROFILE_COLUMNS: &str =
    "id, account_id, status, skills, exp, youtube, facebook, linkedin, instagram, created_at";

/// Profile columns joined with the owner's name and avatar, emulating the
/// original store's partial population of the owning account.
const JOINED_COLUMNS: &str = "p.id, p.account_id, p.status, p.skills, p.exp, \
     p.youtube, p.facebook, p.linkedin, p.instagram, p.created_at, \
     a.name AS owner_name, a.avatar AS owner_avatar";

pub async fn find_by_account(
    pool: &PgPool,
    account_id: Uuid,
) -> Result<Option<ProfileRow>, DatabaseError> {
    let row = sqlx::query_as::<_, ProfileRow>(&format!(
        "SELECT {} FROM profiles WHERE account_id = $1",
        PROFILE_COLUMNS
    ))
    .bind(account_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_with_owner_by_account(
    pool: &PgPool,
    account_id: Uuid,
) -> Result<Option<ProfileWithOwnerRow>, DatabaseError> {
    let row = sqlx::query_as::<_, ProfileWithOwnerRow>(&format!(
        "SELECT {} FROM profiles p JOIN accounts a ON a.id = p.account_id WHERE p.account_id = $1",
        JOINED_COLUMNS
    ))
    .bind(account_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn list_with_owner(pool: &PgPool) -> Result<Vec<ProfileWithOwnerRow>, DatabaseError> {
    let rows = sqlx::query_as::<_, ProfileWithOwnerRow>(&format!(
        "SELECT {} FROM profiles p JOIN accounts a ON a.id = p.account_id ORDER BY p.created_at DESC",
        JOINED_COLUMNS
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Update path of the owner-keyed upsert: sets status, skills and social
/// links only, leaving the experience list untouched. Returns the post-update
/// row, or None when the owner has no profile yet.
pub async fn update_by_account(
    pool: &PgPool,
    account_id: Uuid,
    status: &str,
    skills: &[String],
    social: &SocialLinks,
) -> Result<Option<ProfileRow>, DatabaseError> {
    let row = sqlx::query_as::<_, ProfileRow>(&format!(
        "UPDATE profiles
         SET status = $2, skills = $3, youtube = $4, facebook = $5, linkedin = $6, instagram = $7
         WHERE account_id = $1
         RETURNING {}",
        PROFILE_COLUMNS
    ))
    .bind(account_id)
    .bind(status)
    .bind(skills)
    .bind(&social.youtube)
    .bind(&social.facebook)
    .bind(&social.linkedin)
    .bind(&social.instagram)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Create path of the upsert: inserts a fresh profile with an empty
/// experience list. The unique index on account_id rejects duplicates.
pub async fn insert(
    pool: &PgPool,
    account_id: Uuid,
    status: &str,
    skills: &[String],
    social: &SocialLinks,
) -> Result<ProfileRow, DatabaseError> {
    let row = sqlx::query_as::<_, ProfileRow>(&format!(
        "INSERT INTO profiles (id, account_id, status, skills, exp, youtube, facebook, linkedin, instagram)
         VALUES ($1, $2, $3, $4, '[]', $5, $6, $7, $8)
         RETURNING {}",
        PROFILE_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(account_id)
    .bind(status)
    .bind(skills)
    .bind(&social.youtube)
    .bind(&social.facebook)
    .bind(&social.linkedin)
    .bind(&social.instagram)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Replace a profile's experience list wholesale. Callers mutate the list in
/// memory (prepend / guarded remove) and write it back here.
pub async fn set_experience(
    pool: &PgPool,
    profile_id: Uuid,
    entries: &[Experience],
) -> Result<ProfileRow, DatabaseError> {
    let row = sqlx::query_as::<_, ProfileRow>(&format!(
        "UPDATE profiles SET exp = $2 WHERE id = $1 RETURNING {}",
        PROFILE_COLUMNS
    ))
    .bind(profile_id)
    .bind(Json(entries))
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Delete the caller's profile and the account itself in one transaction.
/// Listings owned by the account are intentionally left in place.
pub async fn delete_with_account(pool: &PgPool, account_id: Uuid) -> Result<(), DatabaseError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM profiles WHERE account_id = $1")
        .bind(account_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM accounts WHERE id = $1")
        .bind(account_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}
