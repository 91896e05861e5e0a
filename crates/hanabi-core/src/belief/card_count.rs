use crate::encode::{card_index, ensure_fireworks};
use crate::error::EncodeError;
use crate::model::{Card, GameConfig, Observation};
use tracing::error;

/// Copies of each card value not yet discarded or played, color-major.
///
/// Unseen here means not public: cards in hands (the observer's own included)
/// and in the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardCounts {
    counts: Vec<usize>,
}

impl CardCounts {
    /// Full deck minus the discard pile minus every card implied by the
    /// fireworks. The result must add up to the deck plus all held cards.
    pub fn remaining(config: &GameConfig, obs: &Observation) -> Result<Self, EncodeError> {
        ensure_fireworks(config, obs)?;
        let num_ranks = config.num_ranks();
        let mut counts: Vec<i64> = (0..config.bits_per_card())
            .map(|index| {
                let card = Card::from_index(index, num_ranks);
                config.instances_of(card.color as usize, card.rank as usize) as i64
            })
            .collect();

        for card in &obs.discard_pile {
            counts[card_index(config, *card)?] -= 1;
        }
        for (color, &progress) in obs.fireworks.iter().enumerate() {
            for rank in 0..progress {
                counts[card_index(config, Card::new(color as u8, rank))?] -= 1;
            }
        }

        if let Some((index, &count)) = counts.iter().enumerate().find(|(_, count)| **count < 0) {
            let card = Card::from_index(index, num_ranks);
            error!(target: "hanabi_core::belief", %card, count, "negative remaining count");
            return Err(EncodeError::NegativeCount { card, count });
        }

        let counted: i64 = counts.iter().sum();
        let in_hands = obs.cards_in_hands();
        if counted != (obs.deck_size + in_hands) as i64 {
            error!(
                target: "hanabi_core::belief",
                counted,
                deck_size = obs.deck_size,
                in_hands,
                "unseen cards out of sync with the table"
            );
            return Err(EncodeError::CountMismatch {
                counted,
                deck_size: obs.deck_size,
                in_hands,
            });
        }

        Ok(Self {
            counts: counts.into_iter().map(|count| count as usize).collect(),
        })
    }

    pub fn get(&self, card: Card, num_ranks: usize) -> usize {
        self.counts[card.index(num_ranks)]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn to_f32(&self) -> Vec<f32> {
        self.counts.iter().map(|&count| count as f32).collect()
    }
}
