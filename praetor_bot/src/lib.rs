//! # Praetor Bot
//!
//! Library side of a heads-up no-limit hold'em bot for the Praetor match
//! server.
//!
//! The server drives the match with JSON messages over a WebSocket. This
//! crate decodes those messages, tracks the state of the match and of the
//! current hand, decides what to do when it's the bot's turn, and builds the
//! HMAC-signed replies. The transport itself lives in the client binary.
//!
//! ## Session lifecycle
//!
//! - **AwaitingCheckinConfirmation**: the signed check-in has been sent
//! - **AwaitingInitialState**: waiting for blinds, stacks and player names
//! - **IdleBetweenHands**: waiting for the next `new_hand`
//! - **InHand**: stages are dealt and the bot is asked to act
//! - **MatchEnded**: the server ended the match
//!
//! ## Core Modules
//!
//! - [`game`]: Cards, hand and match state, and hand evaluation
//! - [`bot`]: Decision policies
//! - [`net`]: Wire messages, signing, framing and the outbound queue
//! - [`session`]: The protocol dispatcher and its phase machine
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use praetor_bot::{Dispatcher, LookupEvaluator, MatchIdentity, Policy, Signer};
//!
//! let identity = MatchIdentity {
//!     player_id: 0,
//!     match_id: 42,
//!     username: "alice".to_string(),
//! };
//! let signer = Signer::new("secret").unwrap();
//! let mut dispatcher = Dispatcher::new(
//!     identity,
//!     signer,
//!     Arc::new(LookupEvaluator::new()),
//!     Policy::default(),
//! );
//! let reply = dispatcher
//!     .handle_frame(r#"{"message_type":"checkin_confirmation"}"#)
//!     .unwrap();
//! assert!(reply.is_none());
//! ```

/// Decision policies.
pub mod bot;
pub use bot::{CallingStation, DecisionPolicy, Policy, Starter};

/// Cards, hand state, match state and hand evaluation.
pub mod game;
pub use game::{
    HandClass, HandOracle, HandState, HoleTier, LookupEvaluator, MatchIdentity, MatchState,
    Score,
    constants::{self, ONE_PAIR_THRESHOLD},
    entities::{self, Action, Card, Stage},
};

/// Wire protocol.
pub mod net;
pub use net::{
    errors::ProtocolError,
    messages::{ClientMessage, ServerMessage},
    outbox::{Outbox, OutboxError, OutboxReceiver, SendReceipt, outbox},
    signer::{Signer, SignerError},
    utils,
};

/// Protocol dispatch.
pub mod session;
pub use session::{Dispatcher, SessionPhase};
