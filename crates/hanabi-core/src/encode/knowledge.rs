use crate::belief::BeliefGrid;
use crate::encode::layout::knowledge_slot_len;
use crate::encode::writer::SectionWriter;
use crate::encode::{ensure_hand_fits, ensure_players};
use crate::error::EncodeError;
use crate::model::{CardKnowledge, GameConfig, Observation};

/// Per slot: the plausibility grid, the hinted color and the hinted rank.
/// Slots past the tracked knowledge are left zero.
pub fn encode_card_knowledge(
    config: &GameConfig,
    obs: &Observation,
    out: SectionWriter<'_>,
) -> Result<usize, EncodeError> {
    encode_slots(config, obs, None, out)
}

/// Same layout, with the grid of every occupied slot replaced by its belief.
pub fn encode_knowledge_with_beliefs(
    config: &GameConfig,
    obs: &Observation,
    beliefs: &BeliefGrid,
    out: SectionWriter<'_>,
) -> Result<usize, EncodeError> {
    encode_slots(config, obs, Some(beliefs), out)
}

fn encode_slots(
    config: &GameConfig,
    obs: &Observation,
    beliefs: Option<&BeliefGrid>,
    mut out: SectionWriter<'_>,
) -> Result<usize, EncodeError> {
    ensure_players(config, obs)?;
    let bits_per_card = config.bits_per_card();

    for (player, hand) in obs.hands.iter().enumerate() {
        ensure_hand_fits(config, player, hand)?;
        for (slot, knowledge) in hand.knowledge().iter().enumerate() {
            match beliefs {
                Some(grid) if slot < hand.len() => out.values(grid.slot(player, slot))?,
                _ => knowledge.fill_plausible_grid(
                    config.num_colors(),
                    config.num_ranks(),
                    out.field(bits_per_card)?,
                ),
            }
            write_hints(config, knowledge, &mut out)?;
        }
        let untracked = config.hand_size() - hand.knowledge().len();
        out.skip(untracked * knowledge_slot_len(config))?;
    }
    out.finish()
}

fn write_hints(
    config: &GameConfig,
    knowledge: &CardKnowledge,
    out: &mut SectionWriter<'_>,
) -> Result<(), EncodeError> {
    out.optional_one_hot(config.num_colors(), knowledge.color_hint().map(usize::from))?;
    out.optional_one_hot(config.num_ranks(), knowledge.rank_hint().map(usize::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::belief::v0_belief;
    use crate::encode::layout::{Section, card_knowledge_len};
    use crate::model::Deck;

    fn encode(config: &GameConfig, obs: &Observation, beliefs: Option<&BeliefGrid>) -> Vec<f32> {
        let mut buf = vec![0.0; card_knowledge_len(config)];
        let out = SectionWriter::new(Section::CardKnowledge, &mut buf);
        let written = match beliefs {
            Some(grid) => encode_knowledge_with_beliefs(config, obs, grid, out),
            None => encode_card_knowledge(config, obs, out),
        };
        assert_eq!(written.expect("encode"), card_knowledge_len(config));
        buf
    }

    #[test]
    fn color_hint_narrows_grid_and_sets_hint_bit() {
        let config = GameConfig::new(2).expect("valid");
        let mut obs = Observation::deal(&config, &Deck::full(&config), 0, false);
        obs.hands[0].knowledge_mut()[0].apply_is_color_hint(2);
        obs.hands[0].knowledge_mut()[1].apply_is_not_color_hint(2);
        let buf = encode(&config, &obs, None);

        let first = &buf[..35];
        let expected_grid: Vec<f32> = (0..25).map(|i| if (10..15).contains(&i) { 1.0 } else { 0.0 }).collect();
        assert_eq!(&first[..25], expected_grid.as_slice());
        assert_eq!(&first[25..30], &[0.0, 0.0, 1.0, 0.0, 0.0]);
        assert!(first[30..].iter().all(|&v| v == 0.0));

        let second = &buf[35..70];
        assert_eq!(second[..25].iter().sum::<f32>(), 20.0);
        assert!(second[25..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn beliefs_replace_grids_and_keep_hints() {
        let config = GameConfig::new(2).expect("valid");
        let mut obs = Observation::deal(&config, &Deck::full(&config), 0, false);
        obs.hands[1].knowledge_mut()[4].apply_is_rank_hint(4);
        let beliefs = v0_belief(&config, &obs).expect("belief");
        let buf = encode(&config, &obs, Some(&beliefs));

        let slot = &buf[9 * 35..10 * 35];
        assert_eq!(&slot[..25], beliefs.slot(1, 4));
        assert!((slot[..25].iter().sum::<f32>() - 1.0).abs() < 1e-5);
        assert_eq!(&slot[30..35], &[0.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn untracked_slots_are_padding() {
        let config = GameConfig::new(2).expect("valid");
        let mut obs = Observation::deal(&config, &Deck::full(&config), 0, false);
        obs.hands[1].remove_card(2);
        let buf = encode(&config, &obs, None);
        assert!(buf[9 * 35..].iter().all(|&v| v == 0.0));
        assert_eq!(buf[8 * 35..8 * 35 + 25].iter().sum::<f32>(), 25.0);
    }
}
