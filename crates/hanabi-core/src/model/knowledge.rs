//! Public hint knowledge for one hand slot.
//!
//! Colors and ranks are tracked as two independent plausibility masks. The
//! plausible cards of a slot are their cross product, so a single card value
//! can never be ruled out without ruling out its whole color or rank.

use crate::model::card::Card;
use serde::{Deserialize, Serialize};

/// Bit-mask over color or rank values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ValueMask(u8);

impl ValueMask {
    pub const EMPTY: Self = Self(0);

    /// Mask with the first `count` values set.
    pub const fn all(count: usize) -> Self {
        if count >= 8 {
            Self(u8::MAX)
        } else {
            Self(((1u16 << count) - 1) as u8)
        }
    }

    /// Values past the eighth have no bit and give an empty mask.
    pub const fn only(value: usize) -> Self {
        if value < 8 { Self(1 << value) } else { Self::EMPTY }
    }

    pub const fn contains(self, value: usize) -> bool {
        value < 8 && self.0 & (1 << value) != 0
    }

    pub const fn with(self, value: usize) -> Self {
        if value < 8 { Self(self.0 | (1 << value)) } else { self }
    }

    pub const fn without(self, value: usize) -> Self {
        if value < 8 { Self(self.0 & !(1 << value)) } else { self }
    }

    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardKnowledge {
    colors: ValueMask,
    ranks: ValueMask,
    color_hint: Option<u8>,
    rank_hint: Option<u8>,
}

impl CardKnowledge {
    /// Knowledge of a freshly drawn card: everything is plausible.
    pub const fn new(num_colors: usize, num_ranks: usize) -> Self {
        Self {
            colors: ValueMask::all(num_colors),
            ranks: ValueMask::all(num_ranks),
            color_hint: None,
            rank_hint: None,
        }
    }

    pub const fn color_plausible(&self, color: usize) -> bool {
        self.colors.contains(color)
    }

    pub const fn rank_plausible(&self, rank: usize) -> bool {
        self.ranks.contains(rank)
    }

    pub const fn is_card_plausible(&self, card: Card) -> bool {
        self.color_plausible(card.color as usize) && self.rank_plausible(card.rank as usize)
    }

    /// Color named by a direct hint, if any.
    pub const fn color_hint(&self) -> Option<u8> {
        self.color_hint
    }

    /// Rank named by a direct hint, if any.
    pub const fn rank_hint(&self) -> Option<u8> {
        self.rank_hint
    }

    pub fn apply_is_color_hint(&mut self, color: u8) {
        self.colors = ValueMask::only(color as usize);
        self.color_hint = Some(color);
    }

    pub fn apply_is_not_color_hint(&mut self, color: u8) {
        self.colors = self.colors.without(color as usize);
    }

    pub fn apply_is_rank_hint(&mut self, rank: u8) {
        self.ranks = ValueMask::only(rank as usize);
        self.rank_hint = Some(rank);
    }

    pub fn apply_is_not_rank_hint(&mut self, rank: u8) {
        self.ranks = self.ranks.without(rank as usize);
    }

    /// Writes the `colors x ranks` plausibility grid, color-major.
    pub fn fill_plausible_grid(&self, num_colors: usize, num_ranks: usize, grid: &mut [f32]) {
        for color in 0..num_colors {
            if !self.color_plausible(color) {
                continue;
            }
            for rank in 0..num_ranks {
                if self.rank_plausible(rank) {
                    grid[color * num_ranks + rank] = 1.0;
                }
            }
        }
    }
}
