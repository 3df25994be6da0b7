//! # Reward Session
//!
//! Editable state around the allocator: the pool, the roster and the latest
//! result. Transitions are pure; [`Session::apply`] returns a new snapshot with
//! a freshly computed result and leaves `self` untouched.

use crate::allocation::Allocator;
use crate::result::RewardResult;
use indexmap::IndexMap;
use rift_core::{parse_damage, Currency, Participant, ParticipantId, Result, RewardPool, RiftError};
use serde::{Deserialize, Serialize};

/// Roster entry as edited by the user.
///
/// Damage is kept as typed; empty text counts as no damage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: ParticipantId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub damage: String,
}

impl RosterEntry {
    /// Participant as seen by the allocator
    pub fn participant(&self) -> Participant {
        let damage = parse_damage(&self.damage).ok().flatten().unwrap_or(0.0);
        Participant {
            id: self.id.clone(),
            name: self.name.clone(),
            damage,
        }
    }
}

/// State transitions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Set the pool amount of one currency
    UpdateReward { currency: Currency, value: f64 },

    /// Add a participant to the roster
    AddParticipant {
        id: ParticipantId,
        #[serde(default)]
        name: String,
        #[serde(default)]
        damage: String,
    },

    /// Remove a participant
    RemoveParticipant { id: ParticipantId },

    /// Change a participant's display name
    RenameParticipant { id: ParticipantId, name: String },

    /// Change a participant's damage text
    UpdateDamage { id: ParticipantId, value: String },
}

/// Pool, roster and latest allocation
#[derive(Clone, Debug, Default)]
pub struct Session {
    allocator: Allocator,
    pool: RewardPool,
    roster: IndexMap<ParticipantId, RosterEntry>,
    result: RewardResult,
}

impl Session {
    /// Empty session using the given allocator
    pub fn new(allocator: Allocator) -> Self {
        Self {
            allocator,
            pool: RewardPool::default(),
            roster: IndexMap::new(),
            result: RewardResult::empty(),
        }
    }

    pub fn pool(&self) -> &RewardPool {
        &self.pool
    }

    pub fn entry(&self, id: &ParticipantId) -> Option<&RosterEntry> {
        self.roster.get(id)
    }

    /// Latest allocation
    pub fn result(&self) -> &RewardResult {
        &self.result
    }

    /// Participants in roster order, as handed to the allocator
    pub fn participants(&self) -> Vec<Participant> {
        self.roster.values().map(RosterEntry::participant).collect()
    }

    /// Currencies where the latest result exceeds the pool
    pub fn over_allocated(&self) -> Vec<Currency> {
        self.result.over_allocated(&self.pool)
    }

    /// Apply one event, returning the next snapshot
    pub fn apply(&self, event: SessionEvent) -> Result<Session> {
        let mut next = self.clone();

        match event {
            SessionEvent::UpdateReward { currency, value } => {
                next.pool[currency] = RewardPool::check_amount(currency, value)?;
            }
            SessionEvent::AddParticipant { id, name, damage } => {
                if next.roster.contains_key(&id) {
                    return Err(RiftError::DuplicateParticipant(id));
                }
                parse_damage(&damage)?;
                next.roster.insert(id.clone(), RosterEntry { id, name, damage });
            }
            SessionEvent::RemoveParticipant { id } => {
                if next.roster.shift_remove(&id).is_none() {
                    return Err(RiftError::ParticipantNotFound(id));
                }
            }
            SessionEvent::RenameParticipant { id, name } => {
                next.entry_mut(&id)?.name = name;
            }
            SessionEvent::UpdateDamage { id, value } => {
                parse_damage(&value)?;
                next.entry_mut(&id)?.damage = value;
            }
        }

        Ok(next.recompute())
    }

    /// Apply events in order, stopping at the first error
    pub fn apply_all(&self, events: impl IntoIterator<Item = SessionEvent>) -> Result<Session> {
        events
            .into_iter()
            .try_fold(self.clone(), |session, event| session.apply(event))
    }

    fn entry_mut(&mut self, id: &ParticipantId) -> Result<&mut RosterEntry> {
        self.roster
            .get_mut(id)
            .ok_or_else(|| RiftError::ParticipantNotFound(id.clone()))
    }

    fn recompute(mut self) -> Self {
        self.result = self.allocator.allocate(&self.pool, &self.participants());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(id: &str, name: &str, damage: &str) -> SessionEvent {
        SessionEvent::AddParticipant {
            id: id.into(),
            name: name.into(),
            damage: damage.into(),
        }
    }

    fn seeded() -> Session {
        Session::default()
            .apply_all([
                SessionEvent::UpdateReward { currency: Currency::Token, value: 100.0 },
                SessionEvent::UpdateReward { currency: Currency::Dust, value: 1000.0 },
                SessionEvent::UpdateReward { currency: Currency::Contract, value: 200.0 },
                SessionEvent::UpdateReward { currency: Currency::Tome, value: 10.0 },
                add("a", "Alice", "80"),
                add("b", "Bob", "20"),
            ])
            .unwrap()
    }

    #[test]
    fn test_apply_recomputes_result() {
        let session = seeded();

        assert_eq!(session.result().len(), 2);
        assert_eq!(session.result().total_rewarded.token, 100);
        assert!(session.over_allocated().is_empty());
    }

    #[test]
    fn test_apply_leaves_previous_snapshot_untouched() {
        let before = seeded();
        let after = before.apply(add("c", "Cleo", "10")).unwrap();

        assert_eq!(before.result().len(), 2);
        assert_eq!(after.result().len(), 3);
    }

    #[test]
    fn test_invalid_damage_is_rejected() {
        let session = seeded();
        let err = session
            .apply(SessionEvent::UpdateDamage { id: "a".into(), value: "lots".into() })
            .unwrap_err();

        assert_eq!(err, RiftError::InvalidDamage("lots".into()));
        assert_eq!(session.entry(&"a".into()).unwrap().damage, "80");
    }

    #[test]
    fn test_empty_damage_counts_as_zero() {
        let session = seeded()
            .apply(SessionEvent::UpdateDamage { id: "b".into(), value: String::new() })
            .unwrap();

        let b = session.result().get(&"b".into()).unwrap();
        assert_eq!(b.damage, 0.0);
        assert!(b.received_min_rewards);
        assert_eq!(b.rewards.token, 1);
        assert_eq!(b.rewards.tome, 1);
    }

    #[test]
    fn test_rename_updates_result() {
        let session = seeded()
            .apply(SessionEvent::RenameParticipant { id: "b".into(), name: "Bobby".into() })
            .unwrap();

        assert_eq!(session.result().get(&"b".into()).unwrap().name, "Bobby");
    }

    #[test]
    fn test_remove_participant() {
        let session = seeded()
            .apply(SessionEvent::RemoveParticipant { id: "a".into() })
            .unwrap();

        assert_eq!(session.result().len(), 1);
        assert!(session.entry(&"a".into()).is_none());

        let err = session
            .apply(SessionEvent::RemoveParticipant { id: "a".into() })
            .unwrap_err();
        assert!(matches!(err, RiftError::ParticipantNotFound(_)));
    }

    #[test]
    fn test_duplicate_participant() {
        let err = seeded().apply(add("a", "Again", "5")).unwrap_err();
        assert!(matches!(err, RiftError::DuplicateParticipant(_)));
    }

    #[test]
    fn test_negative_pool_rejected() {
        let err = seeded()
            .apply(SessionEvent::UpdateReward { currency: Currency::Dust, value: -1.0 })
            .unwrap_err();
        assert!(matches!(err, RiftError::InvalidPoolAmount { currency: Currency::Dust, .. }));
    }

    #[test]
    fn test_oversized_pool_rejected() {
        let session = seeded();
        let err = session
            .apply(SessionEvent::UpdateReward { currency: Currency::Token, value: 1e20 })
            .unwrap_err();
        assert!(matches!(err, RiftError::InvalidPoolAmount { currency: Currency::Token, .. }));
        assert_eq!(session.pool().token, 100.0);
    }

    #[test]
    fn test_roster_order_breaks_ties() {
        let session = Session::default()
            .apply_all([add("x", "", "25"), add("y", "", "25"), add("z", "", "50")])
            .unwrap();

        let ids: Vec<_> = session.result().rewards.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "x", "y"]);
    }

    #[test]
    fn test_events_deserialize() {
        let event: SessionEvent =
            serde_json::from_str(r#"{"type": "update_reward", "currency": "dust", "value": 50}"#)
                .unwrap();
        assert_eq!(
            event,
            SessionEvent::UpdateReward { currency: Currency::Dust, value: 50.0 }
        );
    }
}
