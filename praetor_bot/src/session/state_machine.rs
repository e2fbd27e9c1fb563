//! Protocol phases of a bot session and the transitions between them.

use std::fmt;

use crate::net::messages::MessageKind;

/// Where the session is in the match protocol.
///
/// ```text
/// AwaitingCheckinConfirmation --checkin_confirmation--> AwaitingInitialState
/// AwaitingInitialState --initial_game_state--> IdleBetweenHands
/// IdleBetweenHands --new_hand--> InHand
/// InHand --next_to_act | effective_action | stage--> InHand
/// InHand --end_hand--> IdleBetweenHands
/// (any, including MatchEnded) --end_match--> MatchEnded
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SessionPhase {
    #[default]
    AwaitingCheckinConfirmation,
    AwaitingInitialState,
    IdleBetweenHands,
    InHand,
    MatchEnded,
}

impl SessionPhase {
    /// The phase after receiving a message of `kind`, or `None` if that
    /// message isn't allowed now.
    pub fn transition(self, kind: MessageKind) -> Option<Self> {
        use MessageKind as K;
        use SessionPhase as P;

        match (self, kind) {
            (_, K::EndMatch) => Some(P::MatchEnded),
            (P::MatchEnded, _) => None,
            (P::AwaitingCheckinConfirmation, K::CheckinConfirmation) => {
                Some(P::AwaitingInitialState)
            }
            (P::AwaitingInitialState, K::InitialGameState) => Some(P::IdleBetweenHands),
            (P::IdleBetweenHands, K::NewHand) => Some(P::InHand),
            (P::InHand, K::NextToAct | K::EffectiveAction | K::Stage) => Some(P::InHand),
            (P::InHand, K::EndHand) => Some(P::IdleBetweenHands),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::MatchEnded
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::AwaitingCheckinConfirmation => "awaiting check-in confirmation",
            Self::AwaitingInitialState => "awaiting initial game state",
            Self::IdleBetweenHands => "between hands",
            Self::InHand => "in a hand",
            Self::MatchEnded => "match ended",
        };
        write!(f, "{repr}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [MessageKind; 8] = [
        MessageKind::CheckinConfirmation,
        MessageKind::InitialGameState,
        MessageKind::NewHand,
        MessageKind::NextToAct,
        MessageKind::EffectiveAction,
        MessageKind::Stage,
        MessageKind::EndHand,
        MessageKind::EndMatch,
    ];

    #[test]
    fn happy_path() {
        let mut phase = SessionPhase::default();
        for (kind, expected) in [
            (MessageKind::CheckinConfirmation, SessionPhase::AwaitingInitialState),
            (MessageKind::InitialGameState, SessionPhase::IdleBetweenHands),
            (MessageKind::NewHand, SessionPhase::InHand),
            (MessageKind::NextToAct, SessionPhase::InHand),
            (MessageKind::EffectiveAction, SessionPhase::InHand),
            (MessageKind::Stage, SessionPhase::InHand),
            (MessageKind::EndHand, SessionPhase::IdleBetweenHands),
            (MessageKind::NewHand, SessionPhase::InHand),
            (MessageKind::EndMatch, SessionPhase::MatchEnded),
        ] {
            phase = phase.transition(kind).unwrap();
            assert_eq!(phase, expected);
        }
        assert!(phase.is_terminal());
    }

    #[test]
    fn end_match_accepted_from_every_live_phase() {
        for phase in [
            SessionPhase::AwaitingCheckinConfirmation,
            SessionPhase::AwaitingInitialState,
            SessionPhase::IdleBetweenHands,
            SessionPhase::InHand,
        ] {
            assert_eq!(
                phase.transition(MessageKind::EndMatch),
                Some(SessionPhase::MatchEnded)
            );
        }
    }

    #[test]
    fn only_end_match_follows_match_end() {
        for kind in ALL_KINDS {
            let expected = (kind == MessageKind::EndMatch).then_some(SessionPhase::MatchEnded);
            assert_eq!(SessionPhase::MatchEnded.transition(kind), expected);
        }
    }

    #[test]
    fn hand_messages_rejected_between_hands() {
        for kind in [
            MessageKind::NextToAct,
            MessageKind::EffectiveAction,
            MessageKind::Stage,
            MessageKind::EndHand,
        ] {
            assert_eq!(SessionPhase::IdleBetweenHands.transition(kind), None);
        }
    }

    #[test]
    fn new_hand_rejected_mid_hand() {
        assert_eq!(SessionPhase::InHand.transition(MessageKind::NewHand), None);
    }

    #[test]
    fn nothing_before_check_in_confirmation() {
        for kind in ALL_KINDS {
            let next = SessionPhase::AwaitingCheckinConfirmation.transition(kind);
            match kind {
                MessageKind::CheckinConfirmation => {
                    assert_eq!(next, Some(SessionPhase::AwaitingInitialState))
                }
                MessageKind::EndMatch => assert_eq!(next, Some(SessionPhase::MatchEnded)),
                _ => assert_eq!(next, None),
            }
        }
    }

    #[test]
    fn initial_state_only_once() {
        assert_eq!(
            SessionPhase::IdleBetweenHands.transition(MessageKind::InitialGameState),
            None
        );
        assert_eq!(
            SessionPhase::InHand.transition(MessageKind::InitialGameState),
            None
        );
    }
}
