use crate::encode::writer::SectionWriter;
use crate::encode::{card_index, ensure_hand_fits, ensure_players};
use crate::error::EncodeError;
use crate::model::observation::OWN_HAND;
use crate::model::{GameConfig, Observation};

/// One one-hot card field per slot and player, then one "hand is short" bit
/// per player.
///
/// The observer's own slots stay zero unless `show_own_cards` is set, in which
/// case every own card must be visible. Other players' cards must always be
/// visible.
pub fn encode_hands(
    config: &GameConfig,
    obs: &Observation,
    show_own_cards: bool,
    mut out: SectionWriter<'_>,
) -> Result<usize, EncodeError> {
    ensure_players(config, obs)?;
    let bits_per_card = config.bits_per_card();

    for (player, hand) in obs.hands.iter().enumerate() {
        ensure_hand_fits(config, player, hand)?;
        for (slot, card) in hand.cards().iter().enumerate() {
            let shown = match (player == OWN_HAND, show_own_cards, card) {
                (true, false, Some(_)) => return Err(EncodeError::OwnCardShown { slot }),
                (true, false, None) => None,
                (true, true, None) => return Err(EncodeError::OwnCardHidden { slot }),
                (false, _, None) => return Err(EncodeError::HiddenCard { player, slot }),
                (_, _, Some(card)) => Some(card_index(config, *card)?),
            };
            out.optional_one_hot(bits_per_card, shown)?;
        }
        out.skip((config.hand_size() - hand.len()) * bits_per_card)?;
    }

    let short = obs
        .hands
        .iter()
        .enumerate()
        .filter(|(_, hand)| hand.len() < config.hand_size())
        .fold(0u32, |mask, (player, _)| mask | (1 << player));
    out.bitmask(config.num_players(), short)?;
    out.finish()
}
