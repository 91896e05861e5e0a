#![allow(dead_code)]

use hanabi_core::model::card::Card;
use hanabi_core::model::config::GameConfig;
use hanabi_core::model::deck::Deck;
use hanabi_core::model::hand::Hand;
use hanabi_core::model::knowledge::CardKnowledge;
use hanabi_core::model::moves::{HistoryItem, Move};
use hanabi_core::model::observation::Observation;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Plays a full table with a seeded random policy and tracks exactly what a
/// rules engine would report: hands with hint knowledge, discards, fireworks,
/// tokens and history (absolute seats).
pub struct SimulatedGame {
    config: GameConfig,
    rng: StdRng,
    draw_pile: Vec<Card>,
    hands: Vec<Vec<(Card, CardKnowledge)>>,
    discard_pile: Vec<Card>,
    fireworks: Vec<u8>,
    information_tokens: u8,
    life_tokens: u8,
    history: Vec<HistoryItem>,
    current: usize,
    turns_after_empty: usize,
}

impl SimulatedGame {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let deck = Deck::shuffled(config, &mut rng);
        let mut game = Self {
            config: config.clone(),
            rng,
            draw_pile: deck.cards().iter().rev().copied().collect(),
            hands: vec![Vec::new(); config.num_players()],
            discard_pile: Vec::new(),
            fireworks: vec![0; config.num_colors()],
            information_tokens: config.max_information_tokens() as u8,
            life_tokens: config.max_life_tokens() as u8,
            history: Vec::new(),
            current: 0,
            turns_after_empty: 0,
        };
        for seat in 0..config.num_players() {
            for _ in 0..config.hand_size() {
                game.draw(seat);
            }
        }
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_over(&self) -> bool {
        self.life_tokens == 0
            || self.fireworks.iter().all(|&f| f as usize == self.config.num_ranks())
            || self.turns_after_empty > self.config.num_players()
    }

    /// Plays up to `turns` moves, stopping early when the game ends.
    pub fn advance(&mut self, turns: usize) {
        for _ in 0..turns {
            if self.is_over() {
                return;
            }
            self.step();
        }
    }

    pub fn step(&mut self) {
        let seat = self.current;
        if self.hands[seat].is_empty() {
            self.current = (seat + 1) % self.config.num_players();
            return;
        }
        let can_hint = self.information_tokens > 0 && self.hands.iter().filter(|h| !h.is_empty()).count() > 1;
        let can_discard = (self.information_tokens as usize) < self.config.max_information_tokens();

        if let Some(slot) = self.playable_slot(seat).filter(|_| self.rng.gen_bool(0.7)) {
            self.play(seat, slot);
        } else if can_hint && (self.rng.gen_bool(0.6) || !can_discard) {
            self.hint(seat);
        } else if can_discard {
            let slot = self.rng.gen_range(0..self.hands[seat].len());
            self.discard(seat, slot);
        } else {
            let slot = self.rng.gen_range(0..self.hands[seat].len());
            self.play(seat, slot);
        }

        if self.draw_pile.is_empty() {
            self.turns_after_empty += 1;
        }
        self.current = (seat + 1) % self.config.num_players();
    }

    /// Table as seen by `observer`; own cards are visible only with
    /// `show_own_cards`.
    pub fn observation(&self, observer: usize, show_own_cards: bool) -> Observation {
        let players = self.config.num_players();
        let relative = |seat: usize| (seat + players - observer) % players;

        let mut hands = vec![Hand::new(); players];
        for (seat, hand) in self.hands.iter().enumerate() {
            let own = seat == observer;
            let cards = hand
                .iter()
                .map(|(card, _)| (!own || show_own_cards).then_some(*card))
                .collect();
            let knowledge = hand.iter().map(|(_, knowledge)| *knowledge).collect();
            hands[relative(seat)] = Hand::with_parts(cards, knowledge);
        }

        let last_moves = self
            .history
            .iter()
            .rev()
            .map(|item| {
                let mut item = *item;
                item.player = relative(item.player as usize) as u8;
                item
            })
            .collect();

        Observation {
            observer: observer as u8,
            hands,
            discard_pile: self.discard_pile.clone(),
            fireworks: self.fireworks.clone(),
            deck_size: self.draw_pile.len(),
            information_tokens: self.information_tokens,
            life_tokens: self.life_tokens,
            last_moves,
        }
    }

    fn playable_slot(&self, seat: usize) -> Option<usize> {
        self.hands[seat]
            .iter()
            .position(|(card, _)| card.rank == self.fireworks[card.color as usize])
    }

    fn draw(&mut self, seat: usize) {
        let Some(card) = self.draw_pile.pop() else {
            return;
        };
        let knowledge = CardKnowledge::new(self.config.num_colors(), self.config.num_ranks());
        self.hands[seat].push((card, knowledge));
        self.history.push(HistoryItem::new(
            seat as u8,
            Move::Deal {
                color: card.color,
                rank: card.rank,
            },
        ));
    }

    fn play(&mut self, seat: usize, slot: usize) {
        let (card, _) = self.hands[seat].remove(slot);
        let color = card.color as usize;
        let scored = card.rank == self.fireworks[color];
        let mut information_token = false;
        if scored {
            self.fireworks[color] += 1;
            let completed = self.fireworks[color] as usize == self.config.num_ranks();
            if completed && (self.information_tokens as usize) < self.config.max_information_tokens() {
                self.information_tokens += 1;
                information_token = true;
            }
        } else {
            self.life_tokens -= 1;
            self.discard_pile.push(card);
        }
        self.history.push(
            HistoryItem::new(seat as u8, Move::Play { card_index: slot as u8 })
                .with_card(card)
                .with_outcome(scored, information_token),
        );
        self.draw(seat);
    }

    fn discard(&mut self, seat: usize, slot: usize) {
        let (card, _) = self.hands[seat].remove(slot);
        self.discard_pile.push(card);
        self.information_tokens += 1;
        self.history.push(
            HistoryItem::new(seat as u8, Move::Discard { card_index: slot as u8 }).with_card(card),
        );
        self.draw(seat);
    }

    fn hint(&mut self, seat: usize) {
        let players = self.config.num_players();
        let (target_offset, target) = loop {
            let offset = self.rng.gen_range(1..players);
            let target = (seat + offset) % players;
            if !self.hands[target].is_empty() {
                break (offset, target);
            }
        };
        let pick = self.rng.gen_range(0..self.hands[target].len());
        let shown = self.hands[target][pick].0;
        let by_color = self.rng.gen_bool(0.5);

        let mut mask = 0u8;
        for (slot, (card, knowledge)) in self.hands[target].iter_mut().enumerate() {
            let hit = if by_color {
                card.color == shown.color
            } else {
                card.rank == shown.rank
            };
            match (by_color, hit) {
                (true, true) => knowledge.apply_is_color_hint(shown.color),
                (true, false) => knowledge.apply_is_not_color_hint(shown.color),
                (false, true) => knowledge.apply_is_rank_hint(shown.rank),
                (false, false) => knowledge.apply_is_not_rank_hint(shown.rank),
            }
            if hit {
                mask |= 1 << slot;
            }
        }

        let action = if by_color {
            Move::RevealColor {
                target_offset: target_offset as u8,
                color: shown.color,
            }
        } else {
            Move::RevealRank {
                target_offset: target_offset as u8,
                rank: shown.rank,
            }
        };
        self.information_tokens -= 1;
        self.history
            .push(HistoryItem::new(seat as u8, action).with_reveal_bitmask(mask));
    }
}

/// Observations from every seat at several points of seeded games.
pub fn sampled_observations(config: &GameConfig, seeds: std::ops::Range<u64>) -> Vec<Observation> {
    let mut out = Vec::new();
    for seed in seeds {
        let mut game = SimulatedGame::new(config, seed);
        for _ in 0..6 {
            for observer in 0..config.num_players() {
                out.push(game.observation(observer, false));
            }
            game.advance(7);
        }
    }
    out
}
