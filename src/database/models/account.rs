use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::FromRow;
use uuid::Uuid;

/// Account projection for read endpoints. The password column is never part
/// of this projection; queries must list these columns explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccountPublic {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub fullname: Option<String>,
    pub address: Option<String>,
    pub avatar: String,
    pub role: Option<String>,
    pub wallet: Option<String>,
    pub status: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Minimal projection for credential checks. Only login reads the hash.
#[derive(Debug, FromRow)]
pub struct AccountCredentials {
    pub id: Uuid,
    pub password: String,
}

/// Derive a deterministic gravatar-style avatar URL from an email address.
/// The address is trimmed and lowercased before hashing, so equivalent
/// spellings map to the same avatar.
pub fn avatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let digest = hasher.finalize();
    format!(
        "https://www.gravatar.com/avatar/{:x}?s=200&r=pg&d=mm",
        digest
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_is_deterministic_and_normalized() {
        let a = avatar_url("a@x.com");
        let b = avatar_url("  A@X.COM ");
        assert_eq!(a, b);
        assert!(a.starts_with("https://www.gravatar.com/avatar/"));
        assert!(a.ends_with("?s=200&r=pg&d=mm"));
    }

    #[test]
    fn distinct_emails_get_distinct_avatars() {
        assert_ne!(avatar_url("a@x.com"), avatar_url("b@x.com"));
    }
}
