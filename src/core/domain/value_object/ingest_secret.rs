use crate::core::domain::error::ValidationError;
use std::fmt;

/// The shared secret presented to the telemetry destination.
#[derive(Clone)]
pub struct IngestSecret(String);

impl IngestSecret {
    /// Creates a new secret after validation.
    pub fn new(secret: impl Into<String>) -> Result<Self, ValidationError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ValidationError::Field {
                field: "secret".to_string(),
                message: "Ingest secret cannot be empty".to_string(),
            });
        }
        Ok(Self(secret))
    }

    /// Returns the secret as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Formats the secret as an `Authorization` header value.
    #[must_use]
    pub fn as_authorization_header(&self) -> String {
        format!("Splunk {}", self.0)
    }
}

impl fmt::Debug for IngestSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IngestSecret(***)")
    }
}
