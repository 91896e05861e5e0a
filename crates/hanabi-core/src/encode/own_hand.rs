use crate::encode::{card_index, ensure_fireworks, ensure_hand_fits, ensure_players};
use crate::error::EncodeError;
use crate::model::observation::OWN_HAND;
use crate::model::{GameConfig, Observation};
use std::cmp::Ordering;

/// Entries per own slot: playable now, already played, not yet playable.
pub const OWN_HAND_STATES: usize = 3;

pub fn own_hand_len(config: &GameConfig) -> usize {
    config.hand_size() * OWN_HAND_STATES
}

/// Where each of the observer's cards stands against its color's firework:
/// rank equal to the firework (next to play), below it (dead), or above it.
/// Requires the observer's cards to be visible; empty slots stay zero.
pub fn encode_own_hand(config: &GameConfig, obs: &Observation) -> Result<Vec<f32>, EncodeError> {
    ensure_players(config, obs)?;
    ensure_fireworks(config, obs)?;
    let hand = &obs.hands[OWN_HAND];
    ensure_hand_fits(config, OWN_HAND, hand)?;

    let mut encoding = vec![0.0; own_hand_len(config)];
    for (slot, card) in hand.cards().iter().enumerate() {
        let card = card.ok_or(EncodeError::OwnCardHidden { slot })?;
        card_index(config, card)?;
        let firework = obs.fireworks[card.color as usize];
        let state = match card.rank.cmp(&firework) {
            Ordering::Equal => 0,
            Ordering::Less => 1,
            Ordering::Greater => 2,
        };
        encoding[slot * OWN_HAND_STATES + state] = 1.0;
    }
    Ok(encoding)
}
