//! Participants and damage input

use crate::error::{Result, RiftError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique participant identifier
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identifier (UUID v4)
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParticipantId({})", self.0)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A raid member taking part in the reward split
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Identifier
    pub id: ParticipantId,

    /// Display name, may be empty
    #[serde(default)]
    pub name: String,

    /// Damage contribution in percent (non-negative, not normalized)
    #[serde(default)]
    pub damage: f64,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>, damage: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            damage,
        }
    }

    /// Share multiplier applied to a pool amount
    pub fn share(&self) -> f64 {
        self.damage / 100.0
    }
}

/// Parse damage as typed by a user.
///
/// Empty (or whitespace-only) input is accepted and means no damage yet.
/// Anything else must be a finite, non-negative decimal number; hex literals
/// and `Infinity` are rejected.
pub fn parse_damage(input: &str) -> Result<Option<f64>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| RiftError::InvalidDamage(input.to_string()))?;

    if !value.is_finite() || value < 0.0 {
        return Err(RiftError::InvalidDamage(input.to_string()));
    }

    Ok(Some(value))
}
