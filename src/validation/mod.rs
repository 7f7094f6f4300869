//! Declarative request validation.
//!
//! Each endpoint builds a [`Rules`] set over its input fields; every violated
//! rule is collected (not just the first) and returned to the client as an
//! ordered `errors` array.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ApiError;

/// A single violated rule, serialized as `{"param": ..., "msg": ...}`.
/// Errors that are not tied to a field (e.g. bad credentials) omit `param`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    pub msg: String,
}

impl FieldError {
    pub fn new(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            param: Some(param.into()),
            msg: msg.into(),
        }
    }

    pub fn message_only(msg: impl Into<String>) -> Self {
        Self {
            param: None,
            msg: msg.into(),
        }
    }
}

/// Accumulates field errors in declaration order.
#[derive(Debug, Default)]
pub struct Rules {
    errors: Vec<FieldError>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field must be present and non-empty after trimming.
    pub fn required(mut self, param: &str, value: Option<&str>, msg: &str) -> Self {
        if value.map_or(true, |v| v.trim().is_empty()) {
            self.errors.push(FieldError::new(param, msg));
        }
        self
    }

    /// Non-string field must be present.
    pub fn present<T>(mut self, param: &str, value: Option<&T>, msg: &str) -> Self {
        if value.is_none() {
            self.errors.push(FieldError::new(param, msg));
        }
        self
    }

    /// Field must look like an email address: exactly one `@` with non-empty
    /// local part and a dotted domain.
    pub fn email(mut self, param: &str, value: Option<&str>, msg: &str) -> Self {
        let ok = value.is_some_and(|v| {
            let mut parts = v.splitn(2, '@');
            match (parts.next(), parts.next()) {
                (Some(local), Some(domain)) => {
                    !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
                }
                _ => false,
            }
        });
        if !ok {
            self.errors.push(FieldError::new(param, msg));
        }
        self
    }

    /// Field must be present with at least `min` characters.
    pub fn min_len(mut self, param: &str, value: Option<&str>, min: usize, msg: &str) -> Self {
        if value.map_or(true, |v| v.chars().count() < min) {
            self.errors.push(FieldError::new(param, msg));
        }
        self
    }

    /// Field, when present, must parse as a YYYY-MM-DD date.
    pub fn date(mut self, param: &str, value: Option<&str>, msg: &str) -> Self {
        if let Some(v) = value {
            if parse_date(v).is_none() {
                self.errors.push(FieldError::new(param, msg));
            }
        }
        self
    }

    /// Short-circuit the handler with a 400 carrying every violated field.
    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_failed(self.errors))
        }
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Split a comma-delimited skills string into trimmed, non-empty entries,
/// preserving order.
pub fn split_skills(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_violation_in_order() {
        let err = Rules::new()
            .required("title", None, "Title is required")
            .required("company", Some("  "), "Company is required")
            .required("from", Some("2020-01-01"), "From is required")
            .finish()
            .unwrap_err();

        match err {
            ApiError::ValidationFailed(errors) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].param.as_deref(), Some("title"));
                assert_eq!(errors[1].param.as_deref(), Some("company"));
            }
            other => panic!("expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn passes_when_all_rules_hold() {
        assert!(Rules::new()
            .required("name", Some("A"), "Name is required")
            .email("email", Some("a@x.com"), "Please include a valid email")
            .min_len(
                "password",
                Some("secret1"),
                6,
                "Please enter a password with 6 or more characters"
            )
            .finish()
            .is_ok());
    }

    #[test]
    fn rejects_malformed_emails() {
        for bad in ["", "no-at-sign", "@x.com", "a@", "a@nodot", "a@.com"] {
            assert!(
                Rules::new().email("email", Some(bad), "bad").finish().is_err(),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn min_len_counts_characters() {
        assert!(Rules::new()
            .min_len("password", Some("short"), 6, "too short")
            .finish()
            .is_err());
        assert!(Rules::new()
            .min_len("password", Some("secret1"), 6, "too short")
            .finish()
            .is_ok());
    }

    #[test]
    fn date_rule_only_fires_on_present_values() {
        assert!(Rules::new().date("to", None, "bad date").finish().is_ok());
        assert!(Rules::new()
            .date("to", Some("2020-13-40"), "bad date")
            .finish()
            .is_err());
        assert!(Rules::new()
            .date("to", Some("2020-06-15"), "bad date")
            .finish()
            .is_ok());
    }

    #[test]
    fn splits_and_trims_skills() {
        assert_eq!(
            split_skills("rust, sql ,  axum,,"),
            vec!["rust".to_string(), "sql".to_string(), "axum".to_string()]
        );
        assert!(split_skills("  ,").is_empty());
    }
}
