use crate::core::domain::error::ValidationError;
use url::Url;

/// The cleartext `host:port` address of the telemetry destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestTarget(String);

impl IngestTarget {
    /// Creates a new target after validation.
    pub fn new(target: impl Into<String>) -> Result<Self, ValidationError> {
        let target = target.into();
        validate_target(&target)?;
        Ok(Self(target))
    }

    /// Returns the target as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the base URL the sink talks to.
    pub fn base_url(&self) -> Result<Url, ValidationError> {
        Url::parse(&format!("http://{}/", self.0))
            .map_err(|e| ValidationError::Format(format!("Invalid target URL: {}", e)))
    }
}

/// Validates a `host:port` target.
pub(crate) fn validate_target(target: &str) -> Result<(), ValidationError> {
    if target.is_empty() {
        return Err(ValidationError::Field {
            field: "target".to_string(),
            message: "Ingest target cannot be empty".to_string(),
        });
    }
    if target.contains("://") || target.contains('/') {
        return Err(ValidationError::Format(
            "Ingest target must be a bare host:port".to_string(),
        ));
    }
    let (host, port) = target.rsplit_once(':').ok_or_else(|| {
        ValidationError::Format("Ingest target must be of the form host:port".to_string())
    })?;
    if host.is_empty() {
        return Err(ValidationError::Format(
            "Ingest target host cannot be empty".to_string(),
        ));
    }
    match port.parse::<u16>() {
        Ok(p) if p != 0 => Ok(()),
        _ => Err(ValidationError::Format(format!(
            "Invalid ingest target port '{}'",
            port
        ))),
    }
}
