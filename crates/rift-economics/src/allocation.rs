//! # Reward Allocation
//!
//! Splits a reward pool between participants according to their damage.
//!
//! ## Phases
//!
//! 1. **Rank**: stable sort by descending damage
//! 2. **Floor pass**: a share below a currency's minimum is replaced by the minimum
//! 3. **Floor propagation**: shares are re-checked against what the floors left
//!    over, until no new participant drops below a minimum
//! 4. **Proportional fill**: unresolved amounts get `remaining × damage / 100`
//! 5. **Largest remainder**: whole units lost to flooring go to the largest
//!    fractional parts
//! 6. **Finalize**: floor every amount and sum the totals
//!
//! Every phase consumes the previous snapshot and returns a new one.
//! Damage is not normalized: five participants at 50% each receive half of
//! the pool each.

use crate::constants::*;
use crate::minimums::MinimumRules;
use crate::result::{Allocation, RewardResult};
use crate::rounding;
use rift_core::{Currency, CurrencyMap, Participant, RewardPool};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Allocator settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Minimum reward rules
    #[serde(default)]
    pub minimums: MinimumRules,

    /// Safety cap on floor propagation passes
    #[serde(default = "default_max_floor_passes")]
    pub max_floor_passes: usize,
}

fn default_max_floor_passes() -> usize {
    MAX_FLOOR_PASSES
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            minimums: MinimumRules::default(),
            max_floor_passes: default_max_floor_passes(),
        }
    }
}

/// Participant state after the floor phases.
///
/// `floors[c]` is `Some` when a minimum was assigned for that currency.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FloorDraft {
    pub participant: Participant,
    pub floors: CurrencyMap<Option<f64>>,
    pub received_min: bool,
}

impl FloorDraft {
    fn new(participant: Participant) -> Self {
        Self {
            participant,
            floors: CurrencyMap::splat(None),
            received_min: false,
        }
    }

    /// Assign minimums for every unresolved currency whose share of `basis`
    /// falls below its threshold
    fn apply_floors(self, basis: &CurrencyMap<f64>, thresholds: &CurrencyMap<f64>) -> Self {
        let share = self.participant.share();
        let floors = self.floors.map(|currency, assigned| match assigned {
            Some(amount) => Some(*amount),
            None if basis[currency] * share < thresholds[currency] => Some(thresholds[currency]),
            None => None,
        });
        let received_min = self.received_min || floors.iter().any(|(_, f)| f.is_some());

        Self {
            participant: self.participant,
            floors,
            received_min,
        }
    }
}

/// Participant state with a continuous amount for every currency
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FilledDraft {
    pub participant: Participant,
    pub amounts: CurrencyMap<f64>,
    pub received_min: bool,
}

/// Output of floor propagation
#[derive(Clone, Debug)]
pub(crate) struct Propagation {
    pub drafts: Vec<FloorDraft>,
    pub remaining: CurrencyMap<f64>,
    pub passes: usize,
}

/// Stable sort, highest damage first
pub(crate) fn rank_by_damage(participants: &[Participant]) -> Vec<Participant> {
    let mut ranked = participants.to_vec();
    ranked.sort_by(|a, b| b.damage.partial_cmp(&a.damage).unwrap_or(Ordering::Equal));
    ranked
}

/// Pool left after subtracting every assigned floor
pub(crate) fn remaining_pool(pool: &RewardPool, drafts: &[FloorDraft]) -> CurrencyMap<f64> {
    pool.map(|currency, total| {
        let assigned: f64 = drafts.iter().filter_map(|d| d.floors[currency]).sum();
        total - assigned
    })
}

/// Check every participant against the full pool
pub(crate) fn initial_floor_pass(
    ranked: Vec<Participant>,
    pool: &RewardPool,
    thresholds: &CurrencyMap<f64>,
) -> Vec<FloorDraft> {
    ranked
        .into_iter()
        .map(|p| FloorDraft::new(p).apply_floors(pool, thresholds))
        .collect()
}

/// Re-check unmarked participants against the shrinking remainder.
///
/// Terminates when everyone is marked or a pass marks nobody; the remainder
/// only changes when someone is marked, so a pass without marks is a fixed
/// point. `max_passes` bounds the loop regardless.
pub(crate) fn propagate_floors(
    drafts: Vec<FloorDraft>,
    pool: &RewardPool,
    thresholds: &CurrencyMap<f64>,
    max_passes: usize,
) -> Propagation {
    let mut drafts = drafts;
    let mut remaining = remaining_pool(pool, &drafts);
    let mut passes = 0;

    while passes < max_passes && drafts.iter().any(|d| !d.received_min) {
        passes += 1;

        let basis = remaining;
        let mut newly_marked = 0usize;
        drafts = drafts
            .into_iter()
            .map(|draft| {
                if draft.received_min {
                    return draft;
                }
                let next = draft.apply_floors(&basis, thresholds);
                if next.received_min {
                    newly_marked += 1;
                }
                next
            })
            .collect();

        remaining = remaining_pool(pool, &drafts);

        if newly_marked == 0 {
            break;
        }
    }

    if passes == max_passes && drafts.iter().any(|d| !d.received_min) {
        tracing::debug!(passes, "floor propagation stopped at pass cap");
    }

    Propagation {
        drafts,
        remaining,
        passes,
    }
}

/// Give every unresolved currency its proportional share of the remainder
pub(crate) fn proportional_fill(
    drafts: Vec<FloorDraft>,
    remaining: &CurrencyMap<f64>,
) -> Vec<FilledDraft> {
    drafts
        .into_iter()
        .map(|draft| {
            let share = draft.participant.share();
            let amounts = draft.floors.map(|currency, assigned| {
                assigned.unwrap_or_else(|| (remaining[currency] * share).max(0.0))
            });
            FilledDraft {
                participant: draft.participant,
                amounts,
                received_min: draft.received_min,
            }
        })
        .collect()
}

/// Participants that may receive leftover units.
///
/// Everyone without a minimum, or everyone when all received one.
pub(crate) fn rounding_eligible(drafts: &[FilledDraft]) -> Vec<usize> {
    let unmarked: Vec<usize> = drafts
        .iter()
        .enumerate()
        .filter(|(_, d)| !d.received_min)
        .map(|(i, _)| i)
        .collect();

    if unmarked.is_empty() {
        (0..drafts.len()).collect()
    } else {
        unmarked
    }
}

/// Largest-remainder top-up, one currency at a time
pub(crate) fn round_to_pool(drafts: Vec<FilledDraft>, pool: &RewardPool) -> Vec<FilledDraft> {
    let eligible = rounding_eligible(&drafts);
    let mut drafts = drafts;

    for currency in Currency::ALL {
        let values: Vec<f64> = drafts.iter().map(|d| d.amounts[currency]).collect();
        let topped = rounding::top_up(&values, &eligible, pool[currency]);

        drafts = drafts
            .into_iter()
            .zip(topped)
            .map(|(mut draft, value)| {
                draft.amounts[currency] = value;
                draft
            })
            .collect();
    }

    drafts
}

/// Floor every amount to whole units.
///
/// The cast saturates, so pools beyond `MAX_POOL_AMOUNT` that bypassed
/// validation end at `u64::MAX` instead of wrapping.
pub(crate) fn finalize(drafts: Vec<FilledDraft>) -> RewardResult {
    let rewards = drafts
        .into_iter()
        .map(|draft| Allocation {
            rewards: draft.amounts.map(|_, v| v.floor().max(0.0) as u64),
            id: draft.participant.id,
            name: draft.participant.name,
            damage: draft.participant.damage,
            received_min_rewards: draft.received_min,
        })
        .collect();

    RewardResult::from_allocations(rewards)
}

/// Reward allocator
#[derive(Clone, Debug, Default)]
pub struct Allocator {
    config: AllocatorConfig,
}

impl Allocator {
    /// Create allocator with custom settings
    pub fn new(config: AllocatorConfig) -> Self {
        Self { config }
    }

    /// Minimum floor per currency for a pool
    pub fn thresholds(&self, pool: &RewardPool) -> CurrencyMap<f64> {
        self.config.minimums.thresholds(pool)
    }

    /// Split `pool` between `participants`.
    ///
    /// Never fails. When the minimums add up to more than the pool the
    /// totals exceed it; see [`RewardResult::over_allocated`].
    pub fn allocate(&self, pool: &RewardPool, participants: &[Participant]) -> RewardResult {
        if participants.is_empty() {
            return RewardResult::empty();
        }

        let thresholds = self.thresholds(pool);
        let ranked = rank_by_damage(participants);
        let drafts = initial_floor_pass(ranked, pool, &thresholds);
        let propagation =
            propagate_floors(drafts, pool, &thresholds, self.config.max_floor_passes);
        let filled = proportional_fill(propagation.drafts, &propagation.remaining);
        let rounded = round_to_pool(filled, pool);
        let result = finalize(rounded);

        tracing::debug!(
            participants = result.len(),
            floor_passes = propagation.passes,
            token = result.total_rewarded.token,
            dust = result.total_rewarded.dust,
            contract = result.total_rewarded.contract,
            tome = result.total_rewarded.tome,
            "rewards allocated"
        );

        result
    }
}

/// Allocate with the default minimum rules
pub fn allocate(pool: &RewardPool, participants: &[Participant]) -> RewardResult {
    Allocator::default().allocate(pool, participants)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> RewardPool {
        RewardPool::new(100.0, 1000.0, 200.0, 10.0)
    }

    fn thresholds() -> CurrencyMap<f64> {
        MinimumRules::default().thresholds(&pool())
    }

    #[test]
    fn test_rank_is_stable() {
        let ranked = rank_by_damage(&[
            Participant::new("a", "", 10.0),
            Participant::new("b", "", 30.0),
            Participant::new("c", "", 10.0),
            Participant::new("d", "", 30.0),
        ]);
        let ids: Vec<_> = ranked.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_initial_floor_pass_marks_low_shares() {
        // 1.5% of 1000 dust = 15 < 20, of 200 contract = 3 < 5, of 10 tome = 0.15 < 1
        let drafts = initial_floor_pass(
            vec![Participant::new("low", "", 1.5), Participant::new("high", "", 98.5)],
            &pool(),
            &thresholds(),
        );

        let low = &drafts[0];
        assert!(low.received_min);
        assert_eq!(low.floors.token, None);
        assert_eq!(low.floors.dust, Some(20.0));
        assert_eq!(low.floors.contract, Some(5.0));
        assert_eq!(low.floors.tome, Some(1.0));

        assert!(!drafts[1].received_min);
        assert_eq!(drafts[1].floors, CurrencyMap::splat(None));
    }

    #[test]
    fn test_propagation_marks_after_remainder_shrinks() {
        // a: 10% of 10 tome = 1, not below the floor at first.
        // b and c get a tome floor each, leaving 8: 10% of 8 = 0.8 < 1.
        let drafts = initial_floor_pass(
            vec![
                Participant::new("a", "", 10.0),
                Participant::new("b", "", 5.0),
                Participant::new("c", "", 5.0),
            ],
            &pool(),
            &thresholds(),
        );
        assert!(!drafts[0].received_min);

        let propagation = propagate_floors(drafts, &pool(), &thresholds(), MAX_FLOOR_PASSES);
        let a = &propagation.drafts[0];
        assert!(a.received_min);
        assert_eq!(a.floors.tome, Some(1.0));
        assert_eq!(propagation.remaining.tome, 7.0);
    }

    #[test]
    fn test_propagation_stops_at_fixed_point() {
        let drafts = initial_floor_pass(
            vec![Participant::new("a", "", 80.0), Participant::new("b", "", 20.0)],
            &pool(),
            &thresholds(),
        );
        let propagation = propagate_floors(drafts, &pool(), &thresholds(), MAX_FLOOR_PASSES);

        assert_eq!(propagation.passes, 1);
        assert_eq!(propagation.remaining, pool());
    }

    #[test]
    fn test_propagation_respects_pass_cap() {
        let drafts = initial_floor_pass(
            vec![
                Participant::new("a", "", 10.0),
                Participant::new("b", "", 5.0),
                Participant::new("c", "", 5.0),
            ],
            &pool(),
            &thresholds(),
        );
        let propagation = propagate_floors(drafts, &pool(), &thresholds(), 0);

        assert_eq!(propagation.passes, 0);
        assert!(!propagation.drafts[0].received_min);
    }

    #[test]
    fn test_proportional_fill_uses_remainder() {
        let drafts = initial_floor_pass(
            vec![Participant::new("a", "", 50.0), Participant::new("b", "", 1.0)],
            &pool(),
            &thresholds(),
        );
        let remaining = remaining_pool(&pool(), &drafts);
        let filled = proportional_fill(drafts, &remaining);

        // b holds the dust floor, a gets half of what is left
        assert_eq!(filled[1].amounts.dust, 20.0);
        assert_eq!(filled[0].amounts.dust, 490.0);
    }

    #[test]
    fn test_proportional_fill_never_negative() {
        let drafts = vec![FloorDraft {
            participant: Participant::new("a", "", 50.0),
            floors: CurrencyMap::splat(None),
            received_min: false,
        }];
        let remaining = CurrencyMap::splat(-10.0);
        let filled = proportional_fill(drafts, &remaining);

        assert_eq!(filled[0].amounts, CurrencyMap::splat(0.0));
    }

    #[test]
    fn test_rounding_eligible_falls_back_to_everyone() {
        let draft = |received_min| FilledDraft {
            participant: Participant::new("x", "", 0.0),
            amounts: CurrencyMap::splat(0.0),
            received_min,
        };

        assert_eq!(rounding_eligible(&[draft(true), draft(false)]), vec![1]);
        assert_eq!(rounding_eligible(&[draft(true), draft(true)]), vec![0, 1]);
    }

    #[test]
    fn test_empty_roster() {
        let result = allocate(&pool(), &[]);
        assert!(result.is_empty());
        assert_eq!(result.total_rewarded, CurrencyMap::splat(0));
    }

    #[test]
    fn test_custom_minimums() {
        let mut config = AllocatorConfig::default();
        config.minimums.token = crate::minimums::MinimumRule::fixed(5);
        let allocator = Allocator::new(config);

        let result = allocator.allocate(
            &pool(),
            &[Participant::new("a", "", 97.0), Participant::new("b", "", 3.0)],
        );

        let b = result.get(&"b".into()).unwrap();
        assert_eq!(b.rewards.token, 5);
        assert!(b.received_min_rewards);
    }
}
