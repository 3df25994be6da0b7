//! Error types for Rift Rewards input handling
//!
//! The allocator itself never fails; these errors come from validating what
//! is fed into it (pool amounts, damage text, roster edits).

use crate::currency::Currency;
use crate::participant::ParticipantId;
use thiserror::Error;

/// Result type alias for Rift operations
pub type Result<T> = std::result::Result<T, RiftError>;

/// Errors that can occur while editing a reward session
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiftError {
    // === Input Validation ===
    /// Damage text is not a finite, non-negative number
    #[error("Invalid damage value: {0:?}")]
    InvalidDamage(String),

    /// Pool amount is negative or not finite
    #[error("Invalid {currency} pool amount: {value}")]
    InvalidPoolAmount { currency: Currency, value: f64 },

    /// Currency name not recognized
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    // === Roster ===
    /// Participant not found in the roster
    #[error("Participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    /// Participant id already present
    #[error("Participant already exists: {0}")]
    DuplicateParticipant(ParticipantId),
}

impl RiftError {
    /// Stable numeric code for the error
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidDamage(_) => 1001,
            Self::InvalidPoolAmount { .. } => 1002,
            Self::UnknownCurrency(_) => 1003,
            Self::ParticipantNotFound(_) => 2001,
            Self::DuplicateParticipant(_) => 2002,
        }
    }
}
