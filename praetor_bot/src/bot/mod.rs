//! Decision policies for the bot.
//!
//! This module implements:
//! - DecisionPolicy: the interface the dispatcher calls on `next_to_act`
//! - Starter: the threshold/randomized default policy
//! - CallingStation: a policy that always calls
//!
//! ## Starter policy
//!
//! ### Preflop
//! - Pocket pair: call
//! - Two unpaired cards ten or better: call 75%, fold 25%
//! - Anything else: fold
//!
//! ### Postflop
//! - Call, unless nothing has been bet this round and the hand is one pair
//!   or better, in which case bet 10 chips half of the time
//!
//! ## Example
//!
//! ```
//! use praetor_bot::bot::{DecisionPolicy, Policy};
//! use praetor_bot::game::HoleTier;
//!
//! let policy = Policy::default();
//! assert_eq!(policy.preflop_action(HoleTier::Good).to_string(), "call");
//! ```

pub mod decision;

pub use decision::{CallingStation, DecisionPolicy, Policy, Starter};
