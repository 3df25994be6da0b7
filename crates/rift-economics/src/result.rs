//! Allocation output types

use rift_core::{Currency, ParticipantId, RewardAmounts, RewardPool};
use serde::{Deserialize, Serialize};

/// Final whole-unit rewards for one participant
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// Participant ID
    pub id: ParticipantId,

    /// Display name at computation time
    pub name: String,

    /// Damage percentage at computation time
    pub damage: f64,

    /// Amount per currency
    #[serde(flatten)]
    pub rewards: RewardAmounts,

    /// At least one currency was set by a minimum floor
    pub received_min_rewards: bool,
}

/// Outcome of one allocator run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardResult {
    /// Allocations, highest damage first
    pub rewards: Vec<Allocation>,

    /// Sum of all allocations per currency
    pub total_rewarded: RewardAmounts,
}

impl RewardResult {
    /// Result for an empty roster
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result, summing the totals from the allocations (saturating)
    pub fn from_allocations(rewards: Vec<Allocation>) -> Self {
        let total_rewarded = RewardAmounts::from_fn(|currency| {
            rewards
                .iter()
                .fold(0u64, |total, a| total.saturating_add(a.rewards[currency]))
        });

        Self {
            rewards,
            total_rewarded,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rewards.len()
    }

    /// Allocation for a participant
    pub fn get(&self, id: &ParticipantId) -> Option<&Allocation> {
        self.rewards.iter().find(|a| &a.id == id)
    }

    /// Currencies where more was handed out than the pool holds
    pub fn over_allocated(&self, pool: &RewardPool) -> Vec<Currency> {
        self.total_rewarded
            .iter()
            .filter(|(currency, total)| **total as f64 > pool[*currency])
            .map(|(currency, _)| currency)
            .collect()
    }
}
