use sqlx::PgPool;
use uuid::Uuid;

use super::models::{AccountCredentials, AccountPublic};
use super::DatabaseError;

/// The one projection read endpoints are allowed to see. The password hash
/// is deliberately absent; credential checks use `find_credentials_by_email`.
const PUBLIC_COLUMNS: &str =
    "id, name, email, fullname, address, avatar, role, wallet, status, created_at";

pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub fullname: Option<String>,
    pub address: Option<String>,
    pub avatar: String,
    pub role: Option<String>,
    pub wallet: Option<String>,
}

pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, DatabaseError> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

pub async fn insert(pool: &PgPool, account: NewAccount) -> Result<Uuid, DatabaseError> {
    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO accounts (id, name, email, password, fullname, address, avatar, role, wallet)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(&account.name)
    .bind(&account.email)
    .bind(&account.password_hash)
    .bind(&account.fullname)
    .bind(&account.address)
    .bind(&account.avatar)
    .bind(&account.role)
    .bind(&account.wallet)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn find_credentials_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<AccountCredentials>, DatabaseError> {
    let row = sqlx::query_as::<_, AccountCredentials>(
        "SELECT id, password FROM accounts WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn list_public(pool: &PgPool) -> Result<Vec<AccountPublic>, DatabaseError> {
    let rows = sqlx::query_as::<_, AccountPublic>(&format!(
        "SELECT {} FROM accounts ORDER BY created_at DESC",
        PUBLIC_COLUMNS
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
