//! Facts about the match that outlive a single hand.

use std::fmt;
use thiserror::Error;

use super::entities::{Blinds, Chips, MatchId, PlayerId, PlayerNames};

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MatchStateError {
    #[error("match state already initialized")]
    AlreadyInitialized,
}

/// Who this client is within the match. Fixed for the process lifetime.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchIdentity {
    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub username: String,
}

impl fmt::Display for MatchIdentity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} (player {}) in match {}",
            self.username, self.player_id, self.match_id
        )
    }
}

/// Settings reported by the server's `initial_game_state` message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchSettings {
    pub blinds: Blinds,
    pub my_chips: Chips,
    pub opponent_chips: Chips,
    pub player_names: PlayerNames,
}

#[derive(Debug)]
pub struct MatchState {
    identity: MatchIdentity,
    settings: Option<MatchSettings>,
    is_running: bool,
}

impl MatchState {
    pub fn new(identity: MatchIdentity) -> Self {
        Self {
            identity,
            settings: None,
            is_running: true,
        }
    }

    pub fn identity(&self) -> &MatchIdentity {
        &self.identity
    }

    pub fn settings(&self) -> Option<&MatchSettings> {
        self.settings.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.settings.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// One-shot initialization from the server's starting parameters. Both
    /// players start with the same stack.
    pub fn apply_initial_state(
        &mut self,
        blinds: Blinds,
        starting_stack: Chips,
        player_names: PlayerNames,
    ) -> Result<(), MatchStateError> {
        if self.settings.is_some() {
            return Err(MatchStateError::AlreadyInitialized);
        }
        self.settings = Some(MatchSettings {
            blinds,
            my_chips: starting_stack,
            opponent_chips: starting_stack,
            player_names,
        });
        Ok(())
    }

    pub fn mark_ended(&mut self) {
        self.is_running = false;
    }
}
