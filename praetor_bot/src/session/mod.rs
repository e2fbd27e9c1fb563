//! Bot session protocol handling.
//!
//! The [`Dispatcher`] consumes server messages one at a time in arrival
//! order, keeps hand and match state current, and asks the decision policy
//! for an action whenever the server says it's this client's turn. The
//! session's protocol position is an explicit [`SessionPhase`].

pub mod dispatcher;
pub mod state_machine;

pub use dispatcher::Dispatcher;
pub use state_machine::SessionPhase;
