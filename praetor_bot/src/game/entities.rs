use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use super::constants::{CARD_DELIMITER, HOLE_CARD_COUNT, MAX_BOARD_CARDS};

/// Errors from parsing card tokens and card strings.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CardError {
    #[error("card token {0:?} must be exactly two characters")]
    InvalidToken(String),
    #[error("invalid rank {0:?}")]
    InvalidRank(char),
    #[error("invalid suit {0:?}")]
    InvalidSuit(char),
    #[error("expected {expected} cards, got {actual}")]
    WrongCount { expected: usize, actual: usize },
    #[error("card {0} appears twice")]
    DuplicateCard(Card),
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
}

impl Suit {
    fn from_char(c: char) -> Result<Self, CardError> {
        match c {
            'c' => Ok(Self::Club),
            's' => Ok(Self::Spade),
            'd' => Ok(Self::Diamond),
            'h' => Ok(Self::Heart),
            other => Err(CardError::InvalidSuit(other)),
        }
    }

    fn as_char(self) -> char {
        match self {
            Self::Club => 'c',
            Self::Spade => 's',
            Self::Diamond => 'd',
            Self::Heart => 'h',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Placeholder for card values.
pub type Value = u8;

/// Value of the lowest card (a deuce).
pub const MIN_VALUE: Value = 2;

/// Value of an ace. Aces are always high here; the evaluator handles the
/// wheel straight on its own.
pub const ACE: Value = 14;

/// Values from ten up to ace, the "broadway" ranks.
pub const BROADWAY: std::ops::RangeInclusive<Value> = 10..=ACE;

fn value_from_char(c: char) -> Result<Value, CardError> {
    match c {
        '2'..='9' => Ok(c as Value - b'0'),
        'T' => Ok(10),
        'J' => Ok(11),
        'Q' => Ok(12),
        'K' => Ok(13),
        'A' => Ok(ACE),
        other => Err(CardError::InvalidRank(other)),
    }
}

fn value_as_char(value: Value) -> char {
    match value {
        10 => 'T',
        11 => 'J',
        12 => 'Q',
        13 => 'K',
        ACE => 'A',
        v => (b'0' + v) as char,
    }
}

/// A card is a tuple of a value (deuce=2u8 ... ace=14u8) and a suit.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card(pub Value, pub Suit);

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", value_as_char(self.0), self.1)
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(rank), Some(suit), None) => {
                Ok(Self(value_from_char(rank)?, Suit::from_char(suit)?))
            }
            _ => Err(CardError::InvalidToken(token.to_string())),
        }
    }
}

/// Parse a delimited card string such as `Ah_Kd_2c`. The empty string is
/// zero cards.
pub fn parse_card_string(s: &str) -> Result<Vec<Card>, CardError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(CARD_DELIMITER).map(str::parse).collect()
}

/// Inverse of [`parse_card_string`].
pub fn format_card_string(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(&CARD_DELIMITER.to_string())
}

/// The two private cards of one player, as sent in `new_hand`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct HoleCards(pub [Card; HOLE_CARD_COUNT]);

impl HoleCards {
    pub fn is_pocket_pair(&self) -> bool {
        self.0[0].0 == self.0[1].0
    }

    pub fn both_broadway(&self) -> bool {
        self.0.iter().all(|card| BROADWAY.contains(&card.0))
    }
}

impl TryFrom<String> for HoleCards {
    type Error = CardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let cards = parse_card_string(&value)?;
        let actual = cards.len();
        let cards: [Card; HOLE_CARD_COUNT] =
            cards.try_into().map_err(|_| CardError::WrongCount {
                expected: HOLE_CARD_COUNT,
                actual,
            })?;
        if cards[0] == cards[1] {
            return Err(CardError::DuplicateCard(cards[0]));
        }
        Ok(Self(cards))
    }
}

impl From<HoleCards> for String {
    fn from(value: HoleCards) -> Self {
        format_card_string(&value.0)
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format_card_string(&self.0))
    }
}

/// Community cards revealed by a single `stage` message.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoardUpdate(pub Vec<Card>);

impl TryFrom<String> for BoardUpdate {
    type Error = CardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_card_string(&value).map(Self)
    }
}

impl From<BoardUpdate> for String {
    fn from(value: BoardUpdate) -> Self {
        format_card_string(&value.0)
    }
}

/// Betting rounds of a hand, in the order they are played.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Stage {
    /// The stage that immediately follows this one, if any.
    pub fn successor(self) -> Option<Self> {
        match self {
            Self::Preflop => Some(Self::Flop),
            Self::Flop => Some(Self::Turn),
            Self::Turn => Some(Self::River),
            Self::River => None,
        }
    }

    /// Number of board cards visible once this stage has been dealt.
    pub fn board_len(self) -> usize {
        match self {
            Self::Preflop => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::River => MAX_BOARD_CARDS,
        }
    }

    pub fn is_postflop(self) -> bool {
        self != Self::Preflop
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Preflop => "preflop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
        };
        write!(f, "{repr}")
    }
}

/// Type alias for chip amounts. Stacks, pots and bets are whole chips.
pub type Chips = u32;

/// Seat number the server assigned to this client.
pub type PlayerId = u32;

/// Server-assigned match identifier.
pub type MatchId = u64;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Blinds {
    pub big: Chips,
    pub small: Chips,
}

impl fmt::Display for Blinds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.small, self.big)
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PlayerNames {
    pub player_1: String,
    pub player_2: String,
}

/// A decision sent to the server. The wire form is the `Display` output.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Action {
    Call,
    Fold,
    Bet(Chips),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Fold => write!(f, "fold"),
            Self::Bet(amount) => write!(f, "bet_{amount}"),
        }
    }
}
