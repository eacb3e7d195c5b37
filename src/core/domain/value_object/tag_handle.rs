use crate::core::domain::error::ValidationError;
use std::fmt;

const MAX_TAG_LENGTH: usize = 4096;

/// A tag resolved by the telemetry sink. Every emitted record carries one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagHandle(String);

impl TagHandle {
    /// Creates a new tag handle after validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        validate_tag(&name)?;
        Ok(Self(name))
    }

    /// Returns the tag name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates a tag name.
pub(crate) fn validate_tag(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Field {
            field: "tag".to_string(),
            message: "Tag cannot be empty".to_string(),
        });
    }
    if name.len() > MAX_TAG_LENGTH {
        return Err(ValidationError::Format(format!(
            "Tag cannot exceed {} characters",
            MAX_TAG_LENGTH
        )));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.';
    if !name.chars().all(allowed) {
        return Err(ValidationError::Format(
            "Tag contains invalid characters. Allowed: alphanumeric, -, _, .".to_string(),
        ));
    }
    Ok(())
}
