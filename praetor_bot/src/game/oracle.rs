//! Hand strength evaluation.
//!
//! Scores follow the treys convention: every distinct 5-card hand class gets
//! a number from 1 (royal flush) to 7462 (7-5-4-3-2 high card), lower being
//! stronger. Hands of 6 or 7 cards score as their best 5-card subset.

use std::{collections::HashMap, fmt};
use thiserror::Error;

use super::{
    constants::{ONE_PAIR_THRESHOLD, WORST_SCORE},
    entities::{ACE, Card, MIN_VALUE, Value},
};

/// Hand score; lower is stronger.
pub type Score = u16;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum OracleError {
    #[error("need 5 to 7 cards to evaluate, got {0}")]
    CardCount(usize),
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
}

/// Strength oracle consumed by hand state and decision policies.
pub trait HandOracle: Send + Sync {
    fn evaluate(&self, hole_cards: &[Card], board_cards: &[Card]) -> Result<Score, OracleError>;
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum HandClass {
    StraightFlush,
    FourOfAKind,
    FullHouse,
    Flush,
    Straight,
    ThreeOfAKind,
    TwoPair,
    OnePair,
    HighCard,
}

impl HandClass {
    /// Category of a score produced by [`LookupEvaluator`].
    pub fn from_score(score: Score) -> Self {
        match score {
            0..=10 => Self::StraightFlush,
            11..=166 => Self::FourOfAKind,
            167..=322 => Self::FullHouse,
            323..=1599 => Self::Flush,
            1600..=1609 => Self::Straight,
            1610..=2467 => Self::ThreeOfAKind,
            2468..=3325 => Self::TwoPair,
            3326..=ONE_PAIR_THRESHOLD => Self::OnePair,
            _ => Self::HighCard,
        }
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::StraightFlush => "sf",
            Self::FourOfAKind => "4k",
            Self::FullHouse => "fh",
            Self::Flush => "fs",
            Self::Straight => "s8",
            Self::ThreeOfAKind => "3k",
            Self::TwoPair => "2p",
            Self::OnePair => "1p",
            Self::HighCard => "hi",
        };
        write!(f, "{repr}")
    }
}

/// Values sorted high to low, packed four bits each. Uniquely identifies
/// a 5-card value multiset.
type ValueKey = u32;

fn pack(values: &[Value]) -> ValueKey {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted
        .into_iter()
        .fold(0, |key, value| (key << 4) | ValueKey::from(value))
}

/// All `k`-combinations of `pool`, in the order the pool lists them. With a
/// descending pool this is strongest-first.
fn combinations(pool: &[Value], k: usize) -> Vec<Vec<Value>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    let mut out = Vec::new();
    for (i, &head) in pool.iter().enumerate() {
        if pool.len() - i < k {
            break;
        }
        for mut rest in combinations(&pool[i + 1..], k - 1) {
            rest.insert(0, head);
            out.push(rest);
        }
    }
    out
}

/// Straights from broadway down to the wheel.
fn straights() -> Vec<Vec<Value>> {
    let mut out: Vec<Vec<Value>> = (6..=ACE)
        .rev()
        .map(|high| (high - 4..=high).collect())
        .collect();
    out.push(vec![ACE, 2, 3, 4, 5]);
    out
}

/// Table-driven evaluator producing treys-compatible scores.
pub struct LookupEvaluator {
    flushes: HashMap<ValueKey, Score>,
    unsuited: HashMap<ValueKey, Score>,
}

impl Default for LookupEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupEvaluator {
    pub fn new() -> Self {
        let descending: Vec<Value> = (MIN_VALUE..=ACE).rev().collect();
        let straight_keys: Vec<ValueKey> = straights().iter().map(|s| pack(s)).collect();
        let distinct: Vec<Vec<Value>> = combinations(&descending, 5)
            .into_iter()
            .filter(|combo| !straight_keys.contains(&pack(combo)))
            .collect();

        let mut flushes = HashMap::new();
        let mut unsuited = HashMap::new();
        let mut next: Score = 1;
        let mut assign = |table: &mut HashMap<ValueKey, Score>, values: &[Value]| {
            table.insert(pack(values), next);
            next += 1;
        };

        for straight in straights() {
            assign(&mut flushes, &straight);
        }
        for &quad in &descending {
            for &kicker in descending.iter().filter(|&&v| v != quad) {
                assign(&mut unsuited, &[quad, quad, quad, quad, kicker]);
            }
        }
        for &trips in &descending {
            for &pair in descending.iter().filter(|&&v| v != trips) {
                assign(&mut unsuited, &[trips, trips, trips, pair, pair]);
            }
        }
        for combo in &distinct {
            assign(&mut flushes, combo);
        }
        for straight in straights() {
            assign(&mut unsuited, &straight);
        }
        for &trips in &descending {
            let kickers: Vec<Value> = descending.iter().copied().filter(|&v| v != trips).collect();
            for pair in combinations(&kickers, 2) {
                assign(&mut unsuited, &[trips, trips, trips, pair[0], pair[1]]);
            }
        }
        for high_low in combinations(&descending, 2) {
            let (high, low) = (high_low[0], high_low[1]);
            for &kicker in descending.iter().filter(|&&v| v != high && v != low) {
                assign(&mut unsuited, &[high, high, low, low, kicker]);
            }
        }
        for &pair in &descending {
            let kickers: Vec<Value> = descending.iter().copied().filter(|&v| v != pair).collect();
            for rest in combinations(&kickers, 3) {
                assign(&mut unsuited, &[pair, pair, rest[0], rest[1], rest[2]]);
            }
        }
        for combo in &distinct {
            assign(&mut unsuited, combo);
        }
        debug_assert_eq!(next - 1, WORST_SCORE);

        Self { flushes, unsuited }
    }

    fn score_five(&self, cards: &[Card; 5]) -> Score {
        let values: Vec<Value> = cards.iter().map(|card| card.0).collect();
        let key = pack(&values);
        let suited = cards.iter().all(|card| card.1 == cards[0].1);
        let table = if suited { &self.flushes } else { &self.unsuited };
        // Every 5-card value multiset is present; a miss would mean five of a
        // kind, which duplicate detection has already ruled out.
        table.get(&key).copied().unwrap_or(WORST_SCORE)
    }

    /// Best score over every 5-card subset of `cards`.
    pub fn evaluate_cards(&self, cards: &[Card]) -> Result<Score, OracleError> {
        if !(5..=7).contains(&cards.len()) {
            return Err(OracleError::CardCount(cards.len()));
        }
        for (i, card) in cards.iter().enumerate() {
            if cards[..i].contains(card) {
                return Err(OracleError::DuplicateCard(*card));
            }
        }

        let n = cards.len();
        let mut best = WORST_SCORE;
        for a in 0..n {
            for b in a + 1..n {
                for c in b + 1..n {
                    for d in c + 1..n {
                        for e in d + 1..n {
                            let hand = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                            best = best.min(self.score_five(&hand));
                        }
                    }
                }
            }
        }
        Ok(best)
    }
}

impl HandOracle for LookupEvaluator {
    fn evaluate(&self, hole_cards: &[Card], board_cards: &[Card]) -> Result<Score, OracleError> {
        let mut cards = Vec::with_capacity(hole_cards.len() + board_cards.len());
        cards.extend_from_slice(hole_cards);
        cards.extend_from_slice(board_cards);
        self.evaluate_cards(&cards)
    }
}
