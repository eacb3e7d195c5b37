//! The flat record emitted for every sampled entity.
//!
//! A record is `{"Type": .., "Name": .., <sample fields>}`: the sample struct
//! is flattened into the same JSON object as the record header.

use crate::core::domain::error::StatsResult;
use serde::Serialize;
use std::fmt;

/// The `Type` field of an emitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Datastore,
    Host,
    Guest,
}

impl RecordKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Datastore => "datastore",
            RecordKind::Host => "host",
            RecordKind::Guest => "guest",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entity's state at capture time, ready to be encoded.
#[derive(Debug, Serialize)]
pub struct Record<'a, T: Serialize> {
    #[serde(rename = "Type")]
    pub kind: RecordKind,
    #[serde(rename = "Name")]
    pub name: &'a str,
    #[serde(flatten)]
    pub sample: &'a T,
}

impl<'a, T: Serialize> Record<'a, T> {
    pub fn new(kind: RecordKind, name: &'a str, sample: &'a T) -> Self {
        Self { kind, name, sample }
    }

    /// Encodes the record as a JSON object.
    pub fn encode(&self) -> StatsResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
