//! # Rift Economics - Reward Allocation
//!
//! Splits the rewards of a rift run (token, dust, contract, tome) between the
//! participants according to the percentage of damage each one dealt.
//!
//! ## Key Features
//!
//! - **Minimum rewards**: nobody walks away with less than the per-currency floor
//! - **Proportional shares**: `pool × damage / 100`, damages are not normalized
//! - **Exact payouts**: largest-remainder rounding hands out every whole unit
//! - **Session state**: pure event-driven transitions around the allocator
//!
//! ## Example
//!
//! ```
//! use rift_core::{Participant, RewardPool};
//! use rift_economics::allocate;
//!
//! let pool = RewardPool::new(100.0, 1000.0, 200.0, 10.0);
//! let result = allocate(
//!     &pool,
//!     &[Participant::new("a", "Alice", 80.0), Participant::new("b", "Bob", 20.0)],
//! );
//!
//! assert_eq!(result.total_rewarded.token, 100);
//! assert_eq!(result.rewards[0].rewards.token, 80);
//! ```

pub mod allocation;
pub mod export;
pub mod minimums;
pub mod result;
pub mod rounding;
pub mod session;

// Re-exports
pub use allocation::{allocate, Allocator, AllocatorConfig};
pub use export::to_csv;
pub use minimums::{MinimumRule, MinimumRules};
pub use result::{Allocation, RewardResult};
pub use session::{RosterEntry, Session, SessionEvent};

/// Reward rule constants
pub mod constants {
    /// Fixed token minimum
    pub const FIXED_MIN_TOKEN: u64 = 1;

    /// Fixed dust minimum
    pub const FIXED_MIN_DUST: u64 = 20;

    /// Fixed contract minimum
    pub const FIXED_MIN_CONTRACT: u64 = 5;

    /// Fixed tome minimum
    pub const FIXED_MIN_TOME: u64 = 1;

    /// Dust minimum as a fraction of the pool (0.5%)
    pub const PERCENT_MIN_DUST: f64 = 0.005;

    /// Contract minimum as a fraction of the pool (0.5%)
    pub const PERCENT_MIN_CONTRACT: f64 = 0.005;

    /// Safety cap on floor propagation passes
    pub const MAX_FLOOR_PASSES: usize = 100;
}

pub use constants::*;
