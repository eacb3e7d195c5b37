use crate::core::domain::error::ValidationError;

/// A validated vCenter or ESXi host address, optionally carrying a port.
///
/// Accepts `vcenter.example.com`, `10.0.0.5` or `vcenter.example.com:8443`.
/// A scheme is never part of the value; the connection always speaks HTTPS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VsphereHost(String);

impl VsphereHost {
    /// Creates a new host after validation.
    pub fn new(host: impl Into<String>) -> Result<Self, ValidationError> {
        let host = host.into();
        validate_host(&host)?;
        Ok(Self(host))
    }

    /// Creates a new host without validation.
    #[allow(unused)]
    pub(crate) fn new_unchecked(host: String) -> Self {
        Self(host)
    }

    /// Returns the host as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const MAX_HOSTNAME_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

/// Validates a host address (RFC 1035 labels, optional `:port` suffix).
pub(crate) fn validate_host(host: &str) -> Result<(), ValidationError> {
    if host.is_empty() {
        return Err(ValidationError::Field {
            field: "host".to_string(),
            message: "Host cannot be empty".to_string(),
        });
    }
    if host.contains("://") {
        return Err(ValidationError::Format(
            "Host must not include a scheme".to_string(),
        ));
    }

    let name = match host.rsplit_once(':') {
        Some((name, port)) => {
            match port.parse::<u16>() {
                Ok(p) if p != 0 => {}
                _ => {
                    return Err(ValidationError::Format(format!(
                        "Invalid port '{}' in host",
                        port
                    )));
                }
            }
            name
        }
        None => host,
    };

    if name.len() > MAX_HOSTNAME_LENGTH {
        return Err(ValidationError::ConstraintViolation(format!(
            "Host length exceeds maximum of {} characters",
            MAX_HOSTNAME_LENGTH
        )));
    }

    for label in name.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
            return Err(ValidationError::Format(format!(
                "Label must be between 1 and {} characters",
                MAX_LABEL_LENGTH
            )));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ValidationError::Format(
                "Label can only contain alphanumeric characters and hyphens".to_string(),
            ));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(ValidationError::Format(
                "Label cannot start or end with hyphen".to_string(),
            ));
        }
    }
    Ok(())
}
