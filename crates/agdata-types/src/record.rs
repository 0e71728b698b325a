use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::name::validate_name;

/// Store-assigned identifier of a [`Record`].
///
/// Serialized as a bare JSON integer. The zero value means "not yet
/// assigned"; stores never hand it out.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// The id carried by a record that has not been persisted.
    pub const UNASSIGNED: Self = Self(0);

    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw integer value, as stored in the `Id` column.
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns `true` if a store has assigned this id.
    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// A named record with a free-text address.
///
/// `name` is unique across the store; `id` is fixed once assigned.
/// Equality compares all three fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub address: String,
}

impl Record {
    /// A record that has not been persisted yet.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: RecordId::UNASSIGNED,
            name: name.into(),
            address: address.into(),
        }
    }

    /// Same record carrying the given id.
    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = id;
        self
    }

    /// Validate the fields that must hold before persisting.
    pub fn validate(&self) -> Result<(), TypeError> {
        validate_name(&self.name)
    }
}

/// Inbound JSON body for create and update requests.
///
/// Every field is optional so that a missing or `null` name reaches name
/// validation instead of failing JSON binding.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecordPayload {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub address: Option<String>,
}

impl RecordPayload {
    /// Parse a payload from raw JSON bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self, TypeError> {
        serde_json::from_slice(bytes).map_err(|e| TypeError::Serialization(e.to_string()))
    }
}

impl From<RecordPayload> for Record {
    fn from(payload: RecordPayload) -> Self {
        Self {
            id: payload.id.map(RecordId::new).unwrap_or_default(),
            name: payload.name.unwrap_or_default(),
            address: payload.address.unwrap_or_default(),
        }
    }
}
