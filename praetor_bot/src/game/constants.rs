/// Separator between card tokens in a card string, e.g. `Ah_Kd`.
pub const CARD_DELIMITER: char = '_';

/// Number of hole cards dealt to each player.
pub const HOLE_CARD_COUNT: usize = 2;

/// Largest board of a hold'em hand.
pub const MAX_BOARD_CARDS: usize = 5;

/// Weakest possible score returned by the lookup evaluator (7-5-4-3-2 high).
pub const WORST_SCORE: u16 = 7462;

/// Worst score that still makes at least one pair. Any score at or below
/// this value is one pair or better.
pub const ONE_PAIR_THRESHOLD: u16 = 6185;

/// Fixed size of the postflop bet placed by the starter policy.
pub const STARTER_BET_SIZE: u32 = 10;

/// Log a progress line every this many hands.
pub const HAND_PROGRESS_INTERVAL: u64 = 50;
