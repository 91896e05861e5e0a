use crate::belief::card_count::CardCounts;
use crate::belief::grid::BeliefGrid;
use crate::error::EncodeError;
use crate::model::{GameConfig, Observation};
use tracing::error;

/// Plausibility times unseen count, normalized per occupied slot.
///
/// Slots without a card are zeroed.
pub fn direct_posterior(plausible: &BeliefGrid, counts: &CardCounts) -> Result<BeliefGrid, EncodeError> {
    let mut belief = plausible.clone();
    let slots: Vec<_> = belief.occupied_slots().collect();
    for (player, slot) in slots {
        for (value, &count) in belief.slot_mut(player, slot).iter_mut().zip(counts.as_slice()) {
            *value *= count as f32;
        }
        belief.normalize_slot(player, slot).inspect_err(|err| {
            error!(target: "hanabi_core::belief", player, slot, %err, "direct posterior has no support");
        })?;
    }
    belief.clear_unoccupied();
    Ok(belief)
}

pub fn v0_belief(config: &GameConfig, obs: &Observation) -> Result<BeliefGrid, EncodeError> {
    let counts = CardCounts::remaining(config, obs)?;
    let plausible = BeliefGrid::plausibility(config, obs)?;
    direct_posterior(&plausible, &counts)
}
