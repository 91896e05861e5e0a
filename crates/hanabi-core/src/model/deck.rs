use crate::model::card::Card;
use crate::model::config::GameConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Every physical card of a game, in draw order.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Color-major, rank-ascending, with each card repeated per its instance count.
    pub fn full(config: &GameConfig) -> Self {
        let mut cards = Vec::with_capacity(config.max_deck_size());
        for color in 0..config.num_colors() {
            for rank in 0..config.num_ranks() {
                for _ in 0..config.instances_of(color, rank) {
                    cards.push(Card::new(color as u8, rank as u8));
                }
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let mut deck = Self::full(config);
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(config: &GameConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(config, &mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
