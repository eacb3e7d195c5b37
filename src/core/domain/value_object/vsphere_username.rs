use crate::core::domain::error::ValidationError;

/// A vSphere SSO or local username.
///
/// Both UPN (`administrator@vsphere.local`) and down-level
/// (`CORP\svc-monitor`) forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VsphereUsername(String);

impl VsphereUsername {
    /// Creates a new username after validation.
    pub fn new(username: impl Into<String>) -> Result<Self, ValidationError> {
        let username = username.into();
        validate_username(&username)?;
        Ok(Self(username))
    }

    /// Creates a new username without validation.
    #[allow(unused)]
    pub(crate) fn new_unchecked(username: String) -> Self {
        Self(username)
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a username.
pub(crate) fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::Field {
            field: "username".to_string(),
            message: "Username cannot be empty".to_string(),
        });
    }
    if username.len() > 256 {
        return Err(ValidationError::Format(format!(
            "Username cannot exceed 256 characters (got {})",
            username.len()
        )));
    }
    if username.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ValidationError::Format(
            "Username cannot contain whitespace or control characters".to_string(),
        ));
    }
    Ok(())
}
