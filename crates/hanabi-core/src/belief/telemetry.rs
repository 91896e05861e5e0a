use super::BeliefGrid;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeliefMetrics {
    /// Shannon entropy (nats) of each occupied slot, `[player][slot]`.
    pub entropy_per_slot: Vec<Vec<f32>>,
    pub entropy_per_player: Vec<f32>,
}

impl BeliefMetrics {
    pub fn from_grid(grid: &BeliefGrid) -> Self {
        let mut entropy_per_slot = vec![Vec::new(); grid.num_players()];
        let mut entropy_per_player = vec![0.0; grid.num_players()];

        for (player, slot) in grid.occupied_slots() {
            let mut slot_entropy = 0.0;
            for &prob in grid.slot(player, slot) {
                if prob > 0.0 {
                    slot_entropy -= prob * prob.ln();
                }
            }
            entropy_per_slot[player].push(slot_entropy);
            entropy_per_player[player] += slot_entropy;
        }

        Self {
            entropy_per_slot,
            entropy_per_player,
        }
    }

    pub fn total_entropy(&self) -> f32 {
        self.entropy_per_player.iter().sum()
    }
}
