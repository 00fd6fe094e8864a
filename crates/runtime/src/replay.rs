//! Recorded battles and state digests.
//!
//! A [`Replay`] is the request plus every `(dt, intents)` step in order. Since
//! the session's random stream is seeded from the request, replaying the steps
//! rebuilds the exact final state, which [`state_digest`] condenses into a hex
//! string two parties can compare.

use battle_content::ContentCatalog;
use battle_core::{BattleState, TickIntents};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::repository::RepositoryError;
use crate::session::{BattleId, BattleRequest, BattleSession};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayStep {
    pub dt: f64,
    #[serde(default)]
    pub intents: TickIntents,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub request: BattleRequest,
    #[serde(default)]
    pub steps: Vec<ReplayStep>,
}

impl Replay {
    pub fn new(request: BattleRequest) -> Self {
        Self {
            request,
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, dt: f64, intents: TickIntents) {
        self.steps.push(ReplayStep { dt, intents });
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Rebuilds the final state. Steps after a terminal result are ignored.
    pub fn replay(&self, catalog: &ContentCatalog) -> Result<BattleState> {
        let mut session = BattleSession::start(BattleId::default(), self.request.clone(), catalog)?;
        for step in &self.steps {
            if session.advance(catalog, step.dt, &step.intents).is_some() {
                break;
            }
        }
        tracing::debug!(steps = self.steps.len(), ticks = session.ticks(), "replayed battle");
        Ok(session.state().clone())
    }
}

/// SHA-256 of the bincode encoding of `state`, hex encoded.
pub fn state_digest(state: &BattleState) -> std::result::Result<String, RepositoryError> {
    let bytes =
        bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}
