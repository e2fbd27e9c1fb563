//! Card, hand and match state tracked from the server's event stream.
//!
//! This module provides:
//! - Card tokens and card strings as used on the wire
//! - Hand state with stage ordering enforced
//! - Match state initialized once per process
//! - The hand strength oracle and a lookup evaluator implementing it

pub mod constants;
pub mod entities;
pub mod hand_state;
pub mod match_state;
pub mod oracle;

pub use entities::CardError;
pub use hand_state::{HandState, HandStateError, HoleTier};
pub use match_state::{MatchIdentity, MatchSettings, MatchState, MatchStateError};
pub use oracle::{HandClass, HandOracle, LookupEvaluator, OracleError, Score};
