//! Free-text value objects
//!
//! Name, description and category share one rule set: trimmed, bounded in
//! characters, no control characters. Descriptions may be empty and may
//! span several lines.

use kernel::error::app_error::{AppError, AppResult};

pub const NAME_MAX_LENGTH: usize = 200;
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;
pub const CATEGORY_MAX_LENGTH: usize = 100;

fn bounded_text(
    value: &str,
    field: &str,
    max: usize,
    multiline: bool,
    required: bool,
) -> AppResult<String> {
    let trimmed = value.trim();

    if required && trimmed.is_empty() {
        return Err(AppError::bad_request(format!("{} should not be empty", field)));
    }

    if trimmed.chars().count() > max {
        return Err(AppError::bad_request(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }

    let allowed = |c: char| multiline && (c == '\n' || c == '\r' || c == '\t');
    if trimmed.chars().any(|c| c.is_control() && !allowed(c)) {
        return Err(AppError::bad_request(format!(
            "{} contains invalid characters",
            field
        )));
    }

    Ok(trimmed.to_owned())
}

macro_rules! text_value_object {
    (
        $(#[$meta:meta])* $name:ident, $field:literal,
        max = $max:expr, multiline = $multiline:expr, required = $required:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl AsRef<str>) -> AppResult<Self> {
                bounded_text(value.as_ref(), $field, $max, $multiline, $required).map(Self)
            }

            /// Create from database value (assumed already validated)
            pub fn from_db(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

text_value_object!(
    /// Item name, e.g. "Organic Bananas"
    ItemName, "name",
    max = NAME_MAX_LENGTH, multiline = false, required = true
);
text_value_object!(
    /// Optional long-form description, `""` is a valid value
    Description, "description",
    max = DESCRIPTION_MAX_LENGTH, multiline = true, required = false
);
text_value_object!(
    /// Shelf category, e.g. "Fruits"
    Category, "category",
    max = CATEGORY_MAX_LENGTH, multiline = false, required = true
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed() {
        assert_eq!(ItemName::new("  Organic Bananas ").unwrap().as_str(), "Organic Bananas");
    }

    #[test]
    fn test_empty_rejected() {
        let err = Category::new("   ").unwrap_err();
        assert_eq!(err.message(), "category should not be empty");
        assert!(ItemName::new("").is_err());
    }

    #[test]
    fn test_empty_description_allowed() {
        assert_eq!(Description::new("").unwrap().as_str(), "");
        assert_eq!(Description::new("  \n ").unwrap().as_str(), "");
        assert!(Description::new("\u{0007}").is_err());
    }

    #[test]
    fn test_length_limits() {
        assert!(ItemName::new("a".repeat(NAME_MAX_LENGTH)).is_ok());
        assert!(ItemName::new("a".repeat(NAME_MAX_LENGTH + 1)).is_err());
        assert!(Description::new("a".repeat(DESCRIPTION_MAX_LENGTH + 1)).is_err());
        assert!(Category::new("a".repeat(CATEGORY_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_newlines_only_in_description() {
        assert!(Description::new("Fresh.\nFrom local farms.").is_ok());
        assert!(ItemName::new("Bananas\nApples").is_err());
    }
}
