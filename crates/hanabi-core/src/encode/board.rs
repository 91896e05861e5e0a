use crate::encode::ensure_fireworks;
use crate::encode::layout::deck_field_len;
use crate::encode::writer::SectionWriter;
use crate::error::EncodeError;
use crate::model::{GameConfig, Observation};

/// Deck size (thermometer), fireworks (one-hot of the highest played rank per
/// color), information tokens and life tokens (thermometers).
pub fn encode_board(
    config: &GameConfig,
    obs: &Observation,
    mut out: SectionWriter<'_>,
) -> Result<usize, EncodeError> {
    ensure_fireworks(config, obs)?;

    out.thermometer(deck_field_len(config), obs.deck_size)?;
    for &progress in &obs.fireworks {
        out.optional_one_hot(config.num_ranks(), (progress as usize).checked_sub(1))?;
    }
    out.thermometer(
        config.max_information_tokens(),
        obs.information_tokens as usize,
    )?;
    out.thermometer(config.max_life_tokens(), obs.life_tokens as usize)?;
    out.finish()
}
