//! State of the hand currently being played.
//!
//! One instance lives for the whole match and is reset between hands. Hole
//! cards are only visible between `begin_hand` and `end_hand`, and the board
//! always holds exactly as many cards as the current stage implies.

use std::{fmt, sync::Arc};
use thiserror::Error;

use super::{
    entities::{Card, Chips, HoleCards, Stage},
    oracle::{HandOracle, OracleError, Score},
};

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum HandStateError {
    #[error("hand already in progress")]
    HandInProgress,
    #[error("no hand in progress")]
    NoHandInProgress,
    #[error("hand must start at preflop, not {0}")]
    InvalidStartingStage(Stage),
    #[error("can't advance from {from} to {to}")]
    NonSequentialStage { from: Stage, to: Stage },
    #[error("{stage} needs {expected} board cards, update would give {actual}")]
    BoardSizeMismatch {
        stage: Stage,
        expected: usize,
        actual: usize,
    },
    #[error("oracle: {0}")]
    Oracle(#[from] OracleError),
}

/// Coarse classification of two hole cards, used before the flop.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum HoleTier {
    /// A pocket pair.
    Good,
    /// Two unpaired cards, both ten or better.
    Decent,
    Bad,
}

impl HoleTier {
    pub fn classify(hole_cards: &HoleCards) -> Self {
        if hole_cards.is_pocket_pair() {
            Self::Good
        } else if hole_cards.both_broadway() {
            Self::Decent
        } else {
            Self::Bad
        }
    }
}

impl fmt::Display for HoleTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Good => "good",
            Self::Decent => "decent",
            Self::Bad => "bad",
        };
        write!(f, "{repr}")
    }
}

pub struct HandState {
    hole_cards: Option<HoleCards>,
    board_cards: Vec<Card>,
    pot_size: Chips,
    stage: Option<Stage>,
    oracle: Arc<dyn HandOracle>,
}

impl fmt::Debug for HandState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandState")
            .field("hole_cards", &self.hole_cards)
            .field("board_cards", &self.board_cards)
            .field("pot_size", &self.pot_size)
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}

impl HandState {
    pub fn new(oracle: Arc<dyn HandOracle>) -> Self {
        Self {
            hole_cards: None,
            board_cards: Vec::new(),
            pot_size: 0,
            stage: None,
            oracle,
        }
    }

    pub fn hole_cards(&self) -> Option<&HoleCards> {
        self.hole_cards.as_ref()
    }

    pub fn board_cards(&self) -> &[Card] {
        &self.board_cards
    }

    pub fn pot_size(&self) -> Chips {
        self.pot_size
    }

    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    pub fn in_hand(&self) -> bool {
        self.hole_cards.is_some()
    }

    /// Whether the state is the same as between hands.
    pub fn is_at_rest(&self) -> bool {
        self.hole_cards.is_none()
            && self.board_cards.is_empty()
            && self.pot_size == 0
            && self.stage.is_none()
    }

    pub fn begin_hand(&mut self, hole_cards: HoleCards, stage: Stage) -> Result<(), HandStateError> {
        if self.in_hand() {
            return Err(HandStateError::HandInProgress);
        }
        if stage != Stage::Preflop {
            return Err(HandStateError::InvalidStartingStage(stage));
        }
        self.hole_cards = Some(hole_cards);
        self.stage = Some(stage);
        self.board_cards.clear();
        self.pot_size = 0;
        Ok(())
    }

    pub fn record_action_effect(&mut self, pot_size: Chips) -> Result<(), HandStateError> {
        if !self.in_hand() {
            return Err(HandStateError::NoHandInProgress);
        }
        self.pot_size = pot_size;
        Ok(())
    }

    /// Append newly revealed board cards and move to `new_stage`. Nothing is
    /// mutated when the transition is rejected.
    pub fn advance_stage(
        &mut self,
        new_board_cards: &[Card],
        new_stage: Stage,
    ) -> Result<(), HandStateError> {
        let current = self.stage.ok_or(HandStateError::NoHandInProgress)?;
        if current.successor() != Some(new_stage) {
            return Err(HandStateError::NonSequentialStage {
                from: current,
                to: new_stage,
            });
        }
        let actual = self.board_cards.len() + new_board_cards.len();
        if actual != new_stage.board_len() {
            return Err(HandStateError::BoardSizeMismatch {
                stage: new_stage,
                expected: new_stage.board_len(),
                actual,
            });
        }
        self.board_cards.extend_from_slice(new_board_cards);
        self.stage = Some(new_stage);
        Ok(())
    }

    pub fn end_hand(&mut self) {
        self.hole_cards = None;
        self.board_cards.clear();
        self.pot_size = 0;
        self.stage = None;
    }

    /// Oracle score of hole plus board cards; lower is stronger.
    pub fn hand_strength(&self) -> Result<Score, HandStateError> {
        let hole_cards = self.hole_cards.ok_or(HandStateError::NoHandInProgress)?;
        Ok(self.oracle.evaluate(&hole_cards.0, &self.board_cards)?)
    }

    pub fn hole_card_strength_tier(&self) -> Result<HoleTier, HandStateError> {
        self.hole_cards
            .as_ref()
            .map(HoleTier::classify)
            .ok_or(HandStateError::NoHandInProgress)
    }
}
