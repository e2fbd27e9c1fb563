use serde::{Deserialize, Serialize};
use std::fmt;

use super::super::game::{
    entities::{Action, Blinds, BoardUpdate, Chips, HoleCards, MatchId, PlayerId, PlayerNames, Stage},
    match_state::MatchIdentity,
};
use super::signer::Signer;

/// Starting parameters of the match.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct InitialGameState {
    pub blind_amounts: Blinds,
    pub starting_stack: Chips,
    pub player_names: PlayerNames,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewHand {
    pub hole_cards: HoleCards,
    pub current_stage: Stage,
}

/// Signal that it's this client's turn.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct NextToAct {
    /// Chips this client has already put in during the current round. Only
    /// required after the flop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_round_bet: Option<Chips>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EffectiveAction {
    pub pot_size: Chips,
}

/// New community cards and the stage they open.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct StageDealt {
    pub board_update: BoardUpdate,
    pub current_stage: Stage,
}

/// The kinds of message the server is known to send.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MessageKind {
    CheckinConfirmation,
    InitialGameState,
    NewHand,
    NextToAct,
    EffectiveAction,
    Stage,
    EndHand,
    EndMatch,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CheckinConfirmation => "checkin_confirmation",
            Self::InitialGameState => "initial_game_state",
            Self::NewHand => "new_hand",
            Self::NextToAct => "next_to_act",
            Self::EffectiveAction => "effective_action",
            Self::Stage => "stage",
            Self::EndHand => "end_hand",
            Self::EndMatch => "end_match",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message from the match server to this client.
///
/// Every variant carries only the fields its message type requires. Any
/// other field on the wire is ignored, and a well-formed message with a
/// type this client doesn't know decodes as [`ServerMessage::Unknown`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "message_type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Acknowledges the check-in sent at connect time.
    CheckinConfirmation,
    InitialGameState(InitialGameState),
    NewHand(NewHand),
    NextToAct(NextToAct),
    EffectiveAction(EffectiveAction),
    #[serde(rename = "stage")]
    StageDealt(StageDealt),
    EndHand,
    EndMatch,
    #[serde(other)]
    Unknown,
}

impl ServerMessage {
    /// `None` for message types this client doesn't recognize.
    pub fn kind(&self) -> Option<MessageKind> {
        let kind = match self {
            Self::CheckinConfirmation => MessageKind::CheckinConfirmation,
            Self::InitialGameState(_) => MessageKind::InitialGameState,
            Self::NewHand(_) => MessageKind::NewHand,
            Self::NextToAct(_) => MessageKind::NextToAct,
            Self::EffectiveAction(_) => MessageKind::EffectiveAction,
            Self::StageDealt(_) => MessageKind::Stage,
            Self::EndHand => MessageKind::EndHand,
            Self::EndMatch => MessageKind::EndMatch,
            Self::Unknown => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::CheckinConfirmation => "check-in confirmed".to_string(),
            Self::InitialGameState(state) => format!(
                "match starts with {} chips each at {} blinds",
                state.starting_stack, state.blind_amounts
            ),
            Self::NewHand(hand) => format!("new hand with {}", hand.hole_cards),
            Self::NextToAct(_) => "our turn".to_string(),
            Self::EffectiveAction(action) => format!("pot is {}", action.pot_size),
            Self::StageDealt(stage) => format!(
                "{} dealt {}",
                stage.current_stage,
                String::from(stage.board_update.clone())
            ),
            Self::EndHand => "hand over".to_string(),
            Self::EndMatch => "match over".to_string(),
            Self::Unknown => "unknown message".to_string(),
        };
        write!(f, "{repr}")
    }
}

/// A message from this client to the match server.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "message_type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Proves match membership; the signature covers the match id.
    CheckIn {
        player_id: PlayerId,
        match_id: MatchId,
        signature: String,
    },
    /// A decision; the signature covers the action string.
    InputAction {
        player_id: PlayerId,
        match_id: MatchId,
        action: String,
        signature: String,
    },
}

impl ClientMessage {
    pub fn check_in(identity: &MatchIdentity, signer: &Signer) -> Self {
        Self::CheckIn {
            player_id: identity.player_id,
            match_id: identity.match_id,
            signature: signer.sign(&identity.match_id.to_string()),
        }
    }

    pub fn input_action(identity: &MatchIdentity, action: Action, signer: &Signer) -> Self {
        let action = action.to_string();
        Self::InputAction {
            player_id: identity.player_id,
            match_id: identity.match_id,
            signature: signer.sign(&action),
            action,
        }
    }
}

impl fmt::Display for ClientMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::CheckIn { match_id, .. } => write!(f, "check in to match {match_id}"),
            Self::InputAction { action, .. } => write!(f, "{action}"),
        }
    }
}
