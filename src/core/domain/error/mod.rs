use std::time::Duration;
use thiserror::Error;

/// The main error type for vSphere sampling operations.
///
/// Variants fall into two groups. `Config`, `Session`, `Authentication` and
/// `Validation` can only happen before the sampling loop starts and are fatal.
/// Everything else is raised by a single sampling cycle, which the scheduler
/// logs before moving on to the next tick.
#[derive(Error, Debug)]
pub enum StatsError {
    /// A required configuration value is missing or unusable
    ///
    /// # Fields
    /// * `0` - A description of the missing or invalid setting
    #[error("Configuration error: {0}")]
    Config(String),

    /// The management session or the telemetry sink could not be established
    ///
    /// # Fields
    /// * `0` - A description of what failed during startup
    #[error("Session error: {0}")]
    Session(String),

    /// Represents authentication failures against the management endpoint
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Represents transport-level failures (DNS, TLS, refused connections, bad bodies)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The management endpoint answered with a non-success status
    ///
    /// # Fields
    /// * `status` - The HTTP status code
    /// * `message` - The response body, or a placeholder when it could not be read
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Inventory enumeration or property retrieval failed
    ///
    /// # Fields
    /// * `entity` - The managed entity kind being enumerated (e.g. `HostSystem`)
    /// * `message` - What went wrong
    #[error("Query error for {entity}: {message}")]
    Query { entity: String, message: String },

    /// A record could not be encoded
    #[error("Mapping error: {0}")]
    Mapping(#[from] serde_json::Error),

    /// The telemetry sink rejected a write
    #[error("Write error: {0}")]
    Write(String),

    /// One phase of a sampling cycle failed
    ///
    /// # Fields
    /// * `phase` - The record kind being sampled (`datastore`, `host` or `guest`)
    /// * `source` - The fetch, encode or write error that ended the phase
    #[error("Failed to sample {phase} records: {source}")]
    Sample {
        phase: &'static str,
        #[source]
        source: Box<StatsError>,
    },

    /// The per-cycle deadline expired before the operation finished
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// Represents validation failures with detailed context
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl StatsError {
    /// Returns `true` for errors that must terminate the process.
    ///
    /// Per-cycle errors (`Query`, `Mapping`, `Write`, `Timeout`, `Api`,
    /// `Connection`, `Sample`) return `false`.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StatsError::Config(_)
                | StatsError::Session(_)
                | StatsError::Authentication(_)
                | StatsError::Validation(_)
        )
    }
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Type alias for Results that may fail with a StatsError
pub type StatsResult<T> = Result<T, StatsError>;
