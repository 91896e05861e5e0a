use crate::encode::layout::knowledge_slot_len;
use crate::encode::{ensure_hand_fits, ensure_players};
use crate::error::EncodeError;
use crate::model::{GameConfig, Observation};

/// One `colors x ranks` grid per player and hand slot, color-major, laid out
/// as `[player][slot][card]`.
///
/// `occupied[player]` is the number of slots currently holding a card; only
/// those slots carry a distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct BeliefGrid {
    players: usize,
    hand_size: usize,
    bits_per_card: usize,
    values: Vec<f32>,
    occupied: Vec<usize>,
}

impl BeliefGrid {
    pub fn zeros(config: &GameConfig, occupied: Vec<usize>) -> Self {
        let players = config.num_players();
        let hand_size = config.hand_size();
        let bits_per_card = config.bits_per_card();
        Self {
            players,
            hand_size,
            bits_per_card,
            values: vec![0.0; players * hand_size * bits_per_card],
            occupied,
        }
    }

    /// Cross product of the plausible colors and ranks of every tracked slot.
    ///
    /// Slots with knowledge but no card keep their grid; slots past the
    /// tracked knowledge are zero.
    pub fn plausibility(config: &GameConfig, obs: &Observation) -> Result<Self, EncodeError> {
        ensure_players(config, obs)?;
        let occupied = obs.hands.iter().map(|hand| hand.len()).collect();
        let mut grid = Self::zeros(config, occupied);
        for (player, hand) in obs.hands.iter().enumerate() {
            ensure_hand_fits(config, player, hand)?;
            for (slot, knowledge) in hand.knowledge().iter().enumerate() {
                knowledge.fill_plausible_grid(
                    config.num_colors(),
                    config.num_ranks(),
                    grid.slot_mut(player, slot),
                );
            }
        }
        Ok(grid)
    }

    pub fn num_players(&self) -> usize {
        self.players
    }

    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    pub fn bits_per_card(&self) -> usize {
        self.bits_per_card
    }

    pub fn slot(&self, player: usize, slot: usize) -> &[f32] {
        let start = self.offset(player, slot);
        &self.values[start..start + self.bits_per_card]
    }

    pub fn slot_mut(&mut self, player: usize, slot: usize) -> &mut [f32] {
        let start = self.offset(player, slot);
        &mut self.values[start..start + self.bits_per_card]
    }

    /// Cards held by `player`.
    pub fn occupied(&self, player: usize) -> usize {
        self.occupied[player]
    }

    /// `(player, slot)` for every slot holding a card, in layout order.
    pub fn occupied_slots(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.occupied
            .iter()
            .enumerate()
            .flat_map(|(player, &cards)| (0..cards).map(move |slot| (player, slot)))
    }

    pub fn as_flat(&self) -> &[f32] {
        &self.values
    }

    pub fn into_flat(self) -> Vec<f32> {
        self.values
    }

    /// Zeroes every slot that does not hold a card.
    pub fn clear_unoccupied(&mut self) {
        for player in 0..self.players {
            for slot in self.occupied[player]..self.hand_size {
                self.slot_mut(player, slot).fill(0.0);
            }
        }
    }

    /// Scales a slot to sum to one.
    pub fn normalize_slot(&mut self, player: usize, slot: usize) -> Result<(), EncodeError> {
        let grid = self.slot_mut(player, slot);
        let total: f32 = grid.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(EncodeError::EmptyBelief { player, slot });
        }
        grid.iter_mut().for_each(|value| *value /= total);
        Ok(())
    }

    fn offset(&self, player: usize, slot: usize) -> usize {
        (player * self.hand_size + slot) * self.bits_per_card
    }
}

/// Drops the hinted color and rank fields from a knowledge-shaped buffer,
/// keeping one grid per slot.
pub fn extract_grids(config: &GameConfig, knowledge: &[f32]) -> Result<Vec<f32>, EncodeError> {
    let slot_len = knowledge_slot_len(config);
    let slots = config.num_players() * config.hand_size();
    if knowledge.len() != slots * slot_len {
        return Err(EncodeError::BufferLength {
            expected: slots * slot_len,
            found: knowledge.len(),
        });
    }
    Ok(knowledge
        .chunks_exact(slot_len)
        .flat_map(|slot| slot[..config.bits_per_card()].iter().copied())
        .collect())
}
