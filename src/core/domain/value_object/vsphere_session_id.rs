use crate::core::domain::error::ValidationError;
use std::time::SystemTime;

/// Name of the header carrying the VI/JSON session identifier.
pub const SESSION_HEADER: &str = "vmware-api-session-id";

/// A vSphere VI/JSON session identifier, returned by `SessionManager.Login`.
#[derive(Debug, Clone)]
pub struct VsphereSessionId {
    value: String,
    created_at: SystemTime,
}

impl VsphereSessionId {
    /// Creates a new session id after validation.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        validate_session_id(&value)?;
        Ok(Self::new_unchecked(value))
    }

    /// Creates a new session id without validation.
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self {
            value,
            created_at: SystemTime::now(),
        }
    }

    /// Returns the session id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the time the session was obtained.
    #[must_use]
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }
}

/// Validates the format of a session id.
pub(crate) fn validate_session_id(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Field {
            field: "session_id".to_string(),
            message: "Session id cannot be empty".to_string(),
        });
    }
    if !value.is_ascii() || value.chars().any(|c| c.is_ascii_control() || c == ' ') {
        return Err(ValidationError::Format(
            "Session id must be printable ASCII without spaces".to_string(),
        ));
    }
    Ok(())
}
