//! Protocol error types for decoding and dispatching server messages.

use thiserror::Error;

use crate::{
    game::{entities::Stage, hand_state::HandStateError, match_state::MatchStateError},
    session::SessionPhase,
};

/// Errors that end a session. None of these are retried.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Frame isn't valid JSON
    #[error("malformed frame: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Frame is valid JSON but not an object
    #[error("frame is not a JSON object")]
    NotAnObject,

    /// Object has no string `message_type`
    #[error("frame has no message_type")]
    MissingDiscriminator,

    /// Known message type with missing or invalid fields
    #[error("invalid {message_type} message: {source}")]
    InvalidMessage {
        message_type: String,
        #[source]
        source: serde_json::Error,
    },

    /// Frame exceeded the maximum size
    #[error("frame size {actual} exceeds maximum {max}")]
    FrameTooLarge { actual: usize, max: usize },

    /// Non-text frame on a text protocol
    #[error("unexpected binary frame")]
    BinaryFrame,

    /// Known message that isn't allowed in the current phase
    #[error("unexpected {message_type} while {phase}")]
    UnexpectedMessage {
        message_type: &'static str,
        phase: SessionPhase,
    },

    #[error("next_to_act on the {0} has no current_round_bet")]
    MissingRoundBet(Stage),

    #[error("hand state: {0}")]
    HandState(#[from] HandStateError),

    #[error("match state: {0}")]
    MatchState(#[from] MatchStateError),

    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ProtocolError {
    /// Whether the frame itself couldn't be turned into a message, as opposed
    /// to a well-formed message arriving out of order.
    pub fn is_malformation(&self) -> bool {
        matches!(
            self,
            Self::Malformed(_)
                | Self::NotAnObject
                | Self::MissingDiscriminator
                | Self::InvalidMessage { .. }
                | Self::FrameTooLarge { .. }
                | Self::BinaryFrame
        )
    }
}

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;
