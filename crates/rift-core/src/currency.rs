//! Reward currencies and per-currency maps
//!
//! Every amount in the system is keyed by one of the four rift currencies.
//! Algorithms iterate [`Currency::ALL`] and read/write through a
//! [`CurrencyMap`], so a new currency only has to be added here.

use crate::error::RiftError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Largest accepted pool amount per currency.
///
/// Whole units up to this bound are exact in `f64`, and the sum of every
/// allocation stays far below `u64::MAX`.
pub const MAX_POOL_AMOUNT: f64 = 1e15;

/// A reward currency paid out after a rift run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// Game token
    Token,
    /// Strange dust
    Dust,
    /// Contract
    Contract,
    /// Tome of power
    Tome,
}

impl Currency {
    /// All currencies, in display order
    pub const ALL: [Currency; 4] = [
        Currency::Token,
        Currency::Dust,
        Currency::Contract,
        Currency::Tome,
    ];

    /// Lowercase identifier used in files and CSV headers
    pub fn name(&self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Dust => "dust",
            Self::Contract => "contract",
            Self::Tome => "tome",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Currency {
    type Err = RiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "token" => Ok(Self::Token),
            "dust" => Ok(Self::Dust),
            "contract" => Ok(Self::Contract),
            "tome" => Ok(Self::Tome),
            _ => Err(RiftError::UnknownCurrency(s.to_string())),
        }
    }
}

/// One value per currency
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencyMap<T> {
    #[serde(default)]
    pub token: T,
    #[serde(default)]
    pub dust: T,
    #[serde(default)]
    pub contract: T,
    #[serde(default)]
    pub tome: T,
}

/// Total amount available per currency
pub type RewardPool = CurrencyMap<f64>;

/// Whole-unit amounts per currency
pub type RewardAmounts = CurrencyMap<u64>;

impl<T> CurrencyMap<T> {
    /// Build a map by evaluating `f` for every currency
    pub fn from_fn(mut f: impl FnMut(Currency) -> T) -> Self {
        Self {
            token: f(Currency::Token),
            dust: f(Currency::Dust),
            contract: f(Currency::Contract),
            tome: f(Currency::Tome),
        }
    }

    /// Transform every value, keeping the currency key
    pub fn map<U>(&self, mut f: impl FnMut(Currency, &T) -> U) -> CurrencyMap<U> {
        CurrencyMap::from_fn(|currency| f(currency, &self[currency]))
    }

    /// Iterate `(currency, value)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (Currency, &T)> + '_ {
        Currency::ALL.into_iter().map(move |currency| (currency, &self[currency]))
    }
}

impl<T: Clone> CurrencyMap<T> {
    /// Same value for every currency
    pub fn splat(value: T) -> Self {
        Self::from_fn(|_| value.clone())
    }
}

impl<T> Index<Currency> for CurrencyMap<T> {
    type Output = T;

    fn index(&self, currency: Currency) -> &T {
        match currency {
            Currency::Token => &self.token,
            Currency::Dust => &self.dust,
            Currency::Contract => &self.contract,
            Currency::Tome => &self.tome,
        }
    }
}

impl<T> IndexMut<Currency> for CurrencyMap<T> {
    fn index_mut(&mut self, currency: Currency) -> &mut T {
        match currency {
            Currency::Token => &mut self.token,
            Currency::Dust => &mut self.dust,
            Currency::Contract => &mut self.contract,
            Currency::Tome => &mut self.tome,
        }
    }
}

impl RewardPool {
    /// Pool with the given amounts in token, dust, contract, tome order
    pub fn new(token: f64, dust: f64, contract: f64, tome: f64) -> Self {
        Self {
            token,
            dust,
            contract,
            tome,
        }
    }

    /// Validate a single pool amount: finite, in `0..=MAX_POOL_AMOUNT`
    pub fn check_amount(currency: Currency, value: f64) -> crate::Result<f64> {
        if value.is_finite() && (0.0..=MAX_POOL_AMOUNT).contains(&value) {
            Ok(value)
        } else {
            Err(RiftError::InvalidPoolAmount { currency, value })
        }
    }
}
