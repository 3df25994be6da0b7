//! # Rift Rewards Core
//!
//! Shared vocabulary for the rift reward calculator:
//! - `Currency` / `CurrencyMap` - the four payout currencies and per-currency values
//! - `Participant` - a raid member with a damage percentage
//! - `RiftError` - validation errors for everything fed into the allocator

pub mod currency;
pub mod error;
pub mod participant;

pub use currency::*;
pub use error::*;
pub use participant::*;

