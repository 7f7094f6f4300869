use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Work-history entry embedded in a profile's `exp` column. Entries carry
/// their own id so they can be removed individually; the list is ordered
/// most-recent-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

/// Prepend an entry, keeping the list most-recent-first.
pub fn prepend_experience(entries: &mut Vec<Experience>, entry: Experience) {
    entries.insert(0, entry);
}

/// Remove the entry with the given id. Returns false and leaves the list
/// untouched when no entry matches.
pub fn remove_experience(entries: &mut Vec<Experience>, exp_id: Uuid) -> bool {
    match entries.iter().position(|e| e.id == exp_id) {
        Some(index) => {
            entries.remove(index);
            true
        }
        None => false,
    }
}

/// Optional social link URLs carried on a profile.
#[derive(Debug, Clone, Default)]
pub struct SocialLinks {
    pub youtube: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

/// A profile row as stored.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    #[serde(rename = "user")]
    pub account_id: Uuid,
    pub status: Option<String>,
    pub skills: Vec<String>,
    pub exp: Json<Vec<Experience>>,
    pub youtube: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Flat join row: profile columns plus the owner's name and avatar.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileWithOwnerRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub status: Option<String>,
    pub skills: Vec<String>,
    pub exp: Json<Vec<Experience>>,
    pub youtube: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub created_at: DateTime<Utc>,
    pub owner_name: String,
    pub owner_avatar: String,
}

/// Limited account fields attached to profile reads.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerSummary {
    pub id: Uuid,
    pub name: String,
    pub avatar: String,
}

/// Profile response shape with the owner summary nested under `user`.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub id: Uuid,
    pub user: OwnerSummary,
    pub status: Option<String>,
    pub skills: Vec<String>,
    pub exp: Vec<Experience>,
    pub youtube: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ProfileWithOwnerRow> for ProfileView {
    fn from(row: ProfileWithOwnerRow) -> Self {
        Self {
            id: row.id,
            user: OwnerSummary {
                id: row.account_id,
                name: row.owner_name,
                avatar: row.owner_avatar,
            },
            status: row.status,
            skills: row.skills,
            exp: row.exp.0,
            youtube: row.youtube,
            facebook: row.facebook,
            linkedin: row.linkedin,
            instagram: row.instagram,
            created_at: row.created_at,
        }
    }
}
