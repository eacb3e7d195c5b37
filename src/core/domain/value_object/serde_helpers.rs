//! Serde helpers for vSphere wire values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserializes an optional `xsd:dateTime` (RFC 3339) into seconds since the
/// UNIX epoch. Missing, null and pre-epoch values all become `0`.
pub mod epoch_seconds {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let time = Option::<DateTime<Utc>>::deserialize(deserializer)?;
        Ok(time
            .map(|t| u64::try_from(t.timestamp()).unwrap_or(0))
            .unwrap_or(0))
    }
}

/// Deserializes a number that may be absent or null into its zero value.
pub mod zero_if_null {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
