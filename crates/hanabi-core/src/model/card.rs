use core::fmt;
use serde::{Deserialize, Serialize};

/// Color symbols in encoding order.
pub const COLOR_SYMBOLS: [char; 5] = ['R', 'Y', 'G', 'W', 'B'];

/// A card identity. Ranks are 0-based, so rank 0 is printed as `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub color: u8,
    pub rank: u8,
}

impl Card {
    pub const fn new(color: u8, rank: u8) -> Self {
        Self { color, rank }
    }

    /// One-hot index in the color-major `colors x ranks` card space.
    pub const fn index(self, num_ranks: usize) -> usize {
        self.color as usize * num_ranks + self.rank as usize
    }

    pub const fn from_index(index: usize, num_ranks: usize) -> Self {
        Self {
            color: (index / num_ranks) as u8,
            rank: (index % num_ranks) as u8,
        }
    }

    pub const fn fits(self, num_colors: usize, num_ranks: usize) -> bool {
        (self.color as usize) < num_colors && (self.rank as usize) < num_ranks
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match COLOR_SYMBOLS.get(self.color as usize) {
            Some(symbol) => write!(f, "{}{}", symbol, self.rank + 1),
            None => write!(f, "?{}", self.rank + 1),
        }
    }
}
