//! # Minimum Rewards
//!
//! Floor amounts every participant is guaranteed per currency, regardless of
//! how little damage they dealt.
//!
//! | Currency | Fixed | Percent of pool | Floor |
//! |----------|-------|-----------------|-------|
//! | Token | 1 | - | 1 |
//! | Dust | 20 | 0.5% | max(20, ⌊dust × 0.005⌋) |
//! | Contract | 5 | 0.5% | max(5, ⌊contract × 0.005⌋) |
//! | Tome | 1 | - | 1 |

use crate::constants::*;
use rift_core::{Currency, CurrencyMap, RewardPool};
use serde::{Deserialize, Serialize};

/// Floor rule for a single currency: `max(fixed, ⌊pool × percent⌋)`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinimumRule {
    /// Fixed minimum amount
    pub fixed: u64,

    /// Fraction of the pool that raises the minimum (0.005 = 0.5%)
    #[serde(default)]
    pub percent: f64,
}

impl MinimumRule {
    pub const fn fixed(fixed: u64) -> Self {
        Self { fixed, percent: 0.0 }
    }

    pub const fn scaled(fixed: u64, percent: f64) -> Self {
        Self { fixed, percent }
    }

    /// Floor for a given pool amount
    pub fn threshold(&self, pool_amount: f64) -> f64 {
        let scaled = (pool_amount * self.percent).floor();
        (self.fixed as f64).max(scaled)
    }
}

/// Minimum rules for all currencies
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinimumRules {
    #[serde(default = "default_token_rule")]
    pub token: MinimumRule,

    #[serde(default = "default_dust_rule")]
    pub dust: MinimumRule,

    #[serde(default = "default_contract_rule")]
    pub contract: MinimumRule,

    #[serde(default = "default_tome_rule")]
    pub tome: MinimumRule,
}

fn default_token_rule() -> MinimumRule {
    MinimumRule::fixed(FIXED_MIN_TOKEN)
}

fn default_dust_rule() -> MinimumRule {
    MinimumRule::scaled(FIXED_MIN_DUST, PERCENT_MIN_DUST)
}

fn default_contract_rule() -> MinimumRule {
    MinimumRule::scaled(FIXED_MIN_CONTRACT, PERCENT_MIN_CONTRACT)
}

fn default_tome_rule() -> MinimumRule {
    MinimumRule::fixed(FIXED_MIN_TOME)
}

impl Default for MinimumRules {
    fn default() -> Self {
        Self {
            token: default_token_rule(),
            dust: default_dust_rule(),
            contract: default_contract_rule(),
            tome: default_tome_rule(),
        }
    }
}

impl MinimumRules {
    /// Rule for a currency
    pub fn rule(&self, currency: Currency) -> &MinimumRule {
        match currency {
            Currency::Token => &self.token,
            Currency::Dust => &self.dust,
            Currency::Contract => &self.contract,
            Currency::Tome => &self.tome,
        }
    }

    /// Floor per currency for a pool
    pub fn thresholds(&self, pool: &RewardPool) -> CurrencyMap<f64> {
        pool.map(|currency, amount| self.rule(currency).threshold(*amount))
    }
}
