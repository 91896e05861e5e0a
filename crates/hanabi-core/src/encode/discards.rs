use crate::encode::card_index;
use crate::encode::writer::SectionWriter;
use crate::error::EncodeError;
use crate::model::{GameConfig, Observation};

/// One thermometer per card value, color-major, each as wide as the value's
/// instance count, filled with the number of copies discarded.
pub fn encode_discards(
    config: &GameConfig,
    obs: &Observation,
    mut out: SectionWriter<'_>,
) -> Result<usize, EncodeError> {
    let mut discarded = vec![0usize; config.bits_per_card()];
    for card in &obs.discard_pile {
        discarded[card_index(config, *card)?] += 1;
    }

    for color in 0..config.num_colors() {
        for rank in 0..config.num_ranks() {
            let index = color * config.num_ranks() + rank;
            out.thermometer(config.instances_of(color, rank), discarded[index])?;
        }
    }
    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::layout::{Section, discards_len};
    use crate::model::{Card, Deck};

    fn encode(config: &GameConfig, obs: &Observation) -> Result<Vec<f32>, EncodeError> {
        let mut buf = vec![0.0; discards_len(config)];
        encode_discards(config, obs, SectionWriter::new(Section::Discards, &mut buf))?;
        Ok(buf)
    }

    #[test]
    fn per_value_thermometers() {
        let config = GameConfig::new(2).expect("valid");
        let mut obs = Observation::deal(&config, &Deck::full(&config), 0, false);
        // Red: two 1s, both 3s, one 4, the 5.
        obs.discard_pile = vec![
            Card::new(0, 0),
            Card::new(0, 2),
            Card::new(0, 0),
            Card::new(0, 3),
            Card::new(0, 2),
            Card::new(0, 4),
        ];
        let buf = encode(&config, &obs).expect("encode");
        assert_eq!(
            &buf[..10],
            &[1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0]
        );
        assert!(buf[10..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn extra_copy_overflows_its_field() {
        let config = GameConfig::new(2).expect("valid");
        let mut obs = Observation::deal(&config, &Deck::full(&config), 0, false);
        obs.discard_pile = vec![Card::new(1, 4), Card::new(1, 4)];
        assert!(matches!(
            encode(&config, &obs),
            Err(EncodeError::ValueOutOfRange { value: 2, width: 1, .. })
        ));
    }
}
