//! Bot decision-making.

use enum_dispatch::enum_dispatch;
use rand::Rng;
use std::{fmt, str::FromStr};

use crate::game::{
    constants::{ONE_PAIR_THRESHOLD, STARTER_BET_SIZE},
    entities::{Action, Chips},
    hand_state::HoleTier,
    oracle::Score,
};

/// Probability of calling with a decent (unpaired broadway) starting hand.
const DECENT_CALL_PROBABILITY: f64 = 0.75;

/// Probability of betting out with one pair or better when nobody has bet.
const POSTFLOP_BET_PROBABILITY: f64 = 0.5;

/// Chooses an action whenever the server says it's our turn.
///
/// Implementations only read their inputs; hand and match state stay with
/// the dispatcher.
#[enum_dispatch]
pub trait DecisionPolicy {
    fn preflop_action(&self, tier: HoleTier) -> Action;

    /// `strength` is the oracle score (lower is stronger) and
    /// `current_round_bet` the chips this client already put in this round.
    fn postflop_action(&self, strength: Score, current_round_bet: Chips) -> Action;
}

/// Threshold policy with a little randomness.
///
/// Preflop it calls pocket pairs, calls unpaired broadway hands three times
/// out of four, and folds the rest. Postflop it calls, except that with one
/// pair or better and no bet yet this round it bets half of the time.
#[derive(Clone, Copy, Debug, Default)]
pub struct Starter;

impl Starter {
    /// Preflop decision for a given uniform draw in `[0, 1)`.
    pub fn preflop_with_draw(tier: HoleTier, draw: f64) -> Action {
        match tier {
            HoleTier::Good => Action::Call,
            HoleTier::Decent if draw < DECENT_CALL_PROBABILITY => Action::Call,
            HoleTier::Decent | HoleTier::Bad => Action::Fold,
        }
    }

    /// Postflop decision for a given uniform draw in `[0, 1)`.
    pub fn postflop_with_draw(strength: Score, current_round_bet: Chips, draw: f64) -> Action {
        if current_round_bet == 0
            && strength <= ONE_PAIR_THRESHOLD
            && draw < POSTFLOP_BET_PROBABILITY
        {
            Action::Bet(STARTER_BET_SIZE)
        } else {
            Action::Call
        }
    }
}

impl DecisionPolicy for Starter {
    fn preflop_action(&self, tier: HoleTier) -> Action {
        // Fresh draw from the thread-local generator on every decision.
        Self::preflop_with_draw(tier, rand::rng().random())
    }

    fn postflop_action(&self, strength: Score, current_round_bet: Chips) -> Action {
        Self::postflop_with_draw(strength, current_round_bet, rand::rng().random())
    }
}

/// Calls every time, whatever the cards.
#[derive(Clone, Copy, Debug, Default)]
pub struct CallingStation;

impl DecisionPolicy for CallingStation {
    fn preflop_action(&self, _tier: HoleTier) -> Action {
        Action::Call
    }

    fn postflop_action(&self, _strength: Score, _current_round_bet: Chips) -> Action {
        Action::Call
    }
}

/// The set of policies the bot can run with.
#[enum_dispatch(DecisionPolicy)]
#[derive(Clone, Copy, Debug)]
pub enum Policy {
    Starter,
    CallingStation,
}

impl Default for Policy {
    fn default() -> Self {
        Self::Starter(Starter)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Starter(_) => "starter",
            Self::CallingStation(_) => "calling-station",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for Policy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "starter" => Ok(Self::Starter(Starter)),
            "calling-station" | "calling_station" => Ok(Self::CallingStation(CallingStation)),
            other => Err(format!("unknown policy {other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::constants::WORST_SCORE;

    const TRIALS: usize = 20_000;

    #[test]
    fn test_good_tier_always_calls() {
        let policy = Policy::default();
        for _ in 0..1000 {
            assert_eq!(policy.preflop_action(HoleTier::Good), Action::Call);
        }
    }

    #[test]
    fn test_bad_tier_always_folds() {
        let policy = Policy::default();
        for _ in 0..1000 {
            assert_eq!(policy.preflop_action(HoleTier::Bad), Action::Fold);
        }
    }

    #[test]
    fn test_decent_tier_calls_three_quarters_of_the_time() {
        let policy = Policy::default();
        let calls = (0..TRIALS)
            .filter(|_| policy.preflop_action(HoleTier::Decent) == Action::Call)
            .count();
        let fraction = calls as f64 / TRIALS as f64;
        assert!(
            (fraction - 0.75).abs() < 0.03,
            "decent hands called {fraction} of the time"
        );
    }

    #[test]
    fn test_decent_tier_threshold() {
        assert_eq!(Starter::preflop_with_draw(HoleTier::Decent, 0.0), Action::Call);
        assert_eq!(Starter::preflop_with_draw(HoleTier::Decent, 0.7499), Action::Call);
        assert_eq!(Starter::preflop_with_draw(HoleTier::Decent, 0.75), Action::Fold);
        assert_eq!(Starter::preflop_with_draw(HoleTier::Decent, 0.99), Action::Fold);
    }

    #[test]
    fn test_postflop_calls_when_already_bet() {
        for draw in [0.0, 0.25, 0.49, 0.5, 0.99] {
            for strength in [1, 3326, ONE_PAIR_THRESHOLD, WORST_SCORE] {
                assert_eq!(Starter::postflop_with_draw(strength, 10, draw), Action::Call);
            }
        }
    }

    #[test]
    fn test_postflop_bets_with_pair_on_low_draw() {
        assert_eq!(
            Starter::postflop_with_draw(ONE_PAIR_THRESHOLD, 0, 0.49),
            Action::Bet(STARTER_BET_SIZE)
        );
        assert_eq!(Starter::postflop_with_draw(1, 0, 0.0), Action::Bet(10));
        assert_eq!(
            Starter::postflop_with_draw(ONE_PAIR_THRESHOLD, 0, 0.5),
            Action::Call
        );
    }

    #[test]
    fn test_postflop_never_bets_high_card() {
        for draw in [0.0, 0.25, 0.49] {
            assert_eq!(
                Starter::postflop_with_draw(ONE_PAIR_THRESHOLD + 1, 0, draw),
                Action::Call
            );
        }
    }

    #[test]
    fn test_postflop_bet_frequency() {
        let policy = Policy::default();
        let bets = (0..TRIALS)
            .filter(|_| policy.postflop_action(2000, 0) == Action::Bet(STARTER_BET_SIZE))
            .count();
        let fraction = bets as f64 / TRIALS as f64;
        assert!((fraction - 0.5).abs() < 0.03, "bet {fraction} of the time");
    }

    #[test]
    fn test_calling_station_always_calls() {
        let policy: Policy = "calling-station".parse().unwrap();
        assert_eq!(policy.preflop_action(HoleTier::Bad), Action::Call);
        assert_eq!(policy.postflop_action(1, 0), Action::Call);
    }

    #[test]
    fn test_policy_from_str() {
        assert!(matches!("starter".parse::<Policy>(), Ok(Policy::Starter(_))));
        assert!(matches!(
            "Calling_Station".parse::<Policy>(),
            Ok(Policy::CallingStation(_))
        ));
        assert!("shark".parse::<Policy>().is_err());
    }

    #[test]
    fn test_policy_display_round_trips() {
        for name in ["starter", "calling-station"] {
            assert_eq!(name.parse::<Policy>().unwrap().to_string(), name);
        }
    }
}
