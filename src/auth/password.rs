use bcrypt::DEFAULT_COST;

use crate::error::ApiError;

/// Hash a password for storage. Salted per call, never reversible.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, DEFAULT_COST).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        ApiError::internal("Server Error")
    })
}

/// Verify a password against a stored hash.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, ApiError> {
    bcrypt::verify(password, hashed).map_err(|e| {
        tracing::error!("password verification failed: {}", e);
        ApiError::internal("Server Error")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hashed = hash_password("secret1").unwrap();
        assert_ne!(hashed, "secret1");
        assert!(verify_password("secret1", &hashed).unwrap());
        assert!(!verify_password("wrong", &hashed).unwrap());
    }

    #[test]
    fn hashes_are_salted_per_call() {
        let a = hash_password("secret1").unwrap();
        let b = hash_password("secret1").unwrap();
        assert_ne!(a, b);
    }
}
