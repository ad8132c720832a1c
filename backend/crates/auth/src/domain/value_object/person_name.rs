//! Person Name Value Object
//!
//! First or last name shown on the profile.

use kernel::error::app_error::{AppError, AppResult};

/// Maximum name length in characters
pub const PERSON_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Trimmed, non-empty, at most [`PERSON_NAME_MAX_LENGTH`] characters.
    ///
    /// `field` names the input in error messages (`firstName`, `lastName`).
    pub fn new(value: impl AsRef<str>, field: &str) -> AppResult<Self> {
        let trimmed = value.as_ref().trim();

        if trimmed.is_empty() {
            return Err(AppError::bad_request(format!("{} should not be empty", field)));
        }

        if trimmed.chars().count() > PERSON_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "{} must be at most {} characters",
                field, PERSON_NAME_MAX_LENGTH
            )));
        }

        if trimmed.chars().any(char::is_control) {
            return Err(AppError::bad_request(format!(
                "{} contains invalid characters",
                field
            )));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims() {
        let name = PersonName::new("  Ada ", "firstName").unwrap();
        assert_eq!(name.as_str(), "Ada");
    }

    #[test]
    fn test_empty_rejected() {
        let err = PersonName::new("   ", "lastName").unwrap_err();
        assert_eq!(err.message(), "lastName should not be empty");
    }

    #[test]
    fn test_length_limit() {
        assert!(PersonName::new("a".repeat(PERSON_NAME_MAX_LENGTH), "firstName").is_ok());
        assert!(PersonName::new("a".repeat(PERSON_NAME_MAX_LENGTH + 1), "firstName").is_err());
    }

    #[test]
    fn test_control_character_rejected() {
        assert!(PersonName::new("Ada\u{0000}", "firstName").is_err());
    }
}
