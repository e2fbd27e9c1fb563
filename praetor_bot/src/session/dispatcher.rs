//! Routes decoded server messages into hand state, match state and the
//! decision policy.

use log::{debug, error, info};
use std::sync::Arc;

use crate::{
    bot::{DecisionPolicy, Policy},
    game::{
        constants::HAND_PROGRESS_INTERVAL,
        entities::{Action, Stage},
        hand_state::HandState,
        match_state::{MatchIdentity, MatchState},
        oracle::HandOracle,
    },
    net::{
        errors::{ProtocolError, Result},
        messages::{ClientMessage, InitialGameState, NewHand, NextToAct, ServerMessage, StageDealt},
        signer::Signer,
        utils::{Inbound, decode_frame},
    },
};

use super::state_machine::SessionPhase;

/// One bot's view of one match.
///
/// Messages must be fed in arrival order. A message that doesn't fit the
/// current [`SessionPhase`] is rejected without touching any state.
#[derive(Debug)]
pub struct Dispatcher {
    phase: SessionPhase,
    match_state: MatchState,
    hand_state: HandState,
    policy: Policy,
    signer: Signer,
    hands_played: u64,
    actions_sent: u64,
}

impl Dispatcher {
    pub fn new(
        identity: MatchIdentity,
        signer: Signer,
        oracle: Arc<dyn HandOracle>,
        policy: Policy,
    ) -> Self {
        Self {
            phase: SessionPhase::default(),
            match_state: MatchState::new(identity),
            hand_state: HandState::new(oracle),
            policy,
            signer,
            hands_played: 0,
            actions_sent: 0,
        }
    }

    /// The signed check-in to send right after connecting.
    pub fn check_in(&self) -> ClientMessage {
        ClientMessage::check_in(self.match_state.identity(), &self.signer)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn match_state(&self) -> &MatchState {
        &self.match_state
    }

    pub fn hand_state(&self) -> &HandState {
        &self.hand_state
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    pub fn actions_sent(&self) -> u64 {
        self.actions_sent
    }

    /// Whether the server has ended the match.
    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Decode and handle one text frame.
    pub fn handle_frame(&mut self, frame: &str) -> Result<Option<ClientMessage>> {
        let Inbound {
            message_type,
            message,
        } = decode_frame(frame)?;
        if message == ServerMessage::Unknown {
            debug!("ignoring unknown message type {message_type:?}");
            return Ok(None);
        }
        self.handle(message)
    }

    /// Handle one decoded message, returning the reply to send, if any.
    pub fn handle(&mut self, message: ServerMessage) -> Result<Option<ClientMessage>> {
        let Some(kind) = message.kind() else {
            debug!("ignoring unknown message");
            return Ok(None);
        };
        let Some(next_phase) = self.phase.transition(kind) else {
            let err = ProtocolError::UnexpectedMessage {
                message_type: kind.as_str(),
                phase: self.phase,
            };
            error!("{err}");
            return Err(err);
        };
        debug!("received {message}");

        let reply = match message {
            ServerMessage::CheckinConfirmation => {
                info!("checked in as {}", self.match_state.identity());
                None
            }
            ServerMessage::InitialGameState(state) => {
                self.on_initial_game_state(state)?;
                None
            }
            ServerMessage::NewHand(hand) => {
                self.on_new_hand(hand)?;
                None
            }
            ServerMessage::NextToAct(turn) => Some(self.on_next_to_act(turn)?),
            ServerMessage::EffectiveAction(action) => {
                self.hand_state.record_action_effect(action.pot_size)?;
                None
            }
            ServerMessage::StageDealt(dealt) => {
                self.on_stage(dealt)?;
                None
            }
            ServerMessage::EndHand => {
                self.hand_state.end_hand();
                None
            }
            ServerMessage::EndMatch if self.phase.is_terminal() => {
                debug!("repeated end_match ignored");
                None
            }
            ServerMessage::EndMatch => {
                self.hand_state.end_hand();
                self.match_state.mark_ended();
                info!(
                    "match {} ended after {} hands",
                    self.match_state.identity().match_id,
                    self.hands_played
                );
                None
            }
            ServerMessage::Unknown => None,
        };

        self.phase = next_phase;
        Ok(reply)
    }

    fn on_initial_game_state(&mut self, state: InitialGameState) -> Result<()> {
        let InitialGameState {
            blind_amounts,
            starting_stack,
            player_names,
        } = state;
        info!(
            "{} vs {}, {starting_stack} chips each, blinds {blind_amounts}",
            player_names.player_1, player_names.player_2
        );
        self.match_state
            .apply_initial_state(blind_amounts, starting_stack, player_names)?;
        Ok(())
    }

    fn on_new_hand(&mut self, hand: NewHand) -> Result<()> {
        self.hand_state
            .begin_hand(hand.hole_cards, hand.current_stage)?;
        self.hands_played += 1;
        if self.hands_played % HAND_PROGRESS_INTERVAL == 0 {
            info!("starting hand {}", self.hands_played);
        }
        debug!("hole cards {}", hand.hole_cards);
        Ok(())
    }

    fn on_stage(&mut self, dealt: StageDealt) -> Result<()> {
        let StageDealt {
            board_update,
            current_stage,
        } = dealt;
        self.hand_state
            .advance_stage(&board_update.0, current_stage)?;
        Ok(())
    }

    fn on_next_to_act(&mut self, turn: NextToAct) -> Result<ClientMessage> {
        let stage = self.hand_state.stage().unwrap_or(Stage::Preflop);
        let action = if stage.is_postflop() {
            let current_round_bet = turn
                .current_round_bet
                .ok_or(ProtocolError::MissingRoundBet(stage))?;
            let strength = self.hand_state.hand_strength()?;
            self.policy.postflop_action(strength, current_round_bet)
        } else {
            let tier = self.hand_state.hole_card_strength_tier()?;
            self.policy.preflop_action(tier)
        };
        Ok(self.sign_action(action))
    }

    fn sign_action(&mut self, action: Action) -> ClientMessage {
        self.actions_sent += 1;
        debug!("acting: {action}");
        ClientMessage::input_action(self.match_state.identity(), action, &self.signer)
    }
}
