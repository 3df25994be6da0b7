//! Roster files
//!
//! ```toml
//! [pool]
//! token = 100
//! dust = 1000
//! contract = 200
//! tome = 10
//!
//! [[participants]]
//! name = "Alice"
//! damage = 80
//! ```

use anyhow::Context;
use rift_core::{Currency, ParticipantId, RewardPool};
use rift_economics::{Session, SessionEvent};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Damage as written in the file: a number or the raw text
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DamageInput {
    Number(f64),
    Text(String),
}

impl Default for DamageInput {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl DamageInput {
    fn into_text(self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(text) => text,
        }
    }
}

/// One roster line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosterParticipant {
    /// Generated when missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ParticipantId>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub damage: DamageInput,
}

/// Pool and participants of one rift run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub pool: RewardPool,

    #[serde(default)]
    pub participants: Vec<RosterParticipant>,
}

impl Roster {
    /// Load a roster from a TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading roster {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing roster {}", path.display()))
    }

    /// Example roster
    pub fn template() -> Self {
        let participant = |name: &str, damage: f64| RosterParticipant {
            id: None,
            name: name.to_string(),
            damage: DamageInput::Number(damage),
        };

        Self {
            pool: RewardPool::new(100.0, 5000.0, 800.0, 10.0),
            participants: vec![
                participant("Tank", 45.0),
                participant("Healer", 15.0),
                participant("Ranger", 38.0),
                participant("Bard", 2.0),
            ],
        }
    }

    /// Session events that rebuild this roster from scratch
    pub fn events(self) -> Vec<SessionEvent> {
        let pool = self.pool;
        let rewards = Currency::ALL.into_iter().map(|currency| SessionEvent::UpdateReward {
            currency,
            value: pool[currency],
        });

        let participants = self.participants.into_iter().map(|p| SessionEvent::AddParticipant {
            id: p.id.unwrap_or_else(ParticipantId::generate),
            name: p.name,
            damage: p.damage.into_text(),
        });

        rewards.chain(participants).collect()
    }

    /// Replay the roster into `session`
    pub fn into_session(self, session: &Session) -> anyhow::Result<Session> {
        session.apply_all(self.events()).map_err(|err| {
            let code = err.code();
            anyhow::Error::new(err).context(format!("roster rejected (error {code})"))
        })
    }
}
