//! Read-only table snapshot from one player's point of view.

use crate::model::card::Card;
use crate::model::config::GameConfig;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::knowledge::CardKnowledge;
use crate::model::moves::HistoryItem;
use serde::{Deserialize, Serialize};

/// Index of the observer's own hand in `Observation::hands`.
pub const OWN_HAND: usize = 0;

/// What one player may see at one point of the game.
///
/// Hands are ordered relative to the observer: `hands[0]` is the observer's
/// own hand, `hands[1]` the next player to act, and so on. History players are
/// relative in the same way. `last_moves` is most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Absolute seat of the observer.
    pub observer: u8,
    pub hands: Vec<Hand>,
    #[serde(default)]
    pub discard_pile: Vec<Card>,
    /// Cards successfully played per color.
    pub fireworks: Vec<u8>,
    pub deck_size: usize,
    pub information_tokens: u8,
    pub life_tokens: u8,
    #[serde(default)]
    pub last_moves: Vec<HistoryItem>,
}

impl Observation {
    /// Table right after the deal: `hand_size` cards per seat drawn from the
    /// front of `deck`, in seat order, full tokens and no history.
    pub fn deal(config: &GameConfig, deck: &Deck, observer: u8, show_own_cards: bool) -> Self {
        let players = config.num_players();
        let hand_size = config.hand_size();
        let observer_seat = observer as usize % players;
        let mut hands = vec![Hand::new(); players];
        for seat in 0..players {
            let relative = (seat + players - observer_seat) % players;
            let start = seat * hand_size;
            for card in deck.cards().iter().skip(start).take(hand_size) {
                let visible = relative != OWN_HAND || show_own_cards;
                hands[relative].add_card(
                    visible.then_some(*card),
                    CardKnowledge::new(config.num_colors(), config.num_ranks()),
                );
            }
        }

        Self {
            observer: observer_seat as u8,
            hands,
            discard_pile: Vec::new(),
            fireworks: vec![0; config.num_colors()],
            deck_size: deck.len().saturating_sub(players * hand_size),
            information_tokens: config.max_information_tokens() as u8,
            life_tokens: config.max_life_tokens() as u8,
            last_moves: Vec::new(),
        }
    }

    /// Most recent move that was not a deal.
    pub fn last_non_deal_move(&self) -> Option<&HistoryItem> {
        self.last_moves.iter().find(|item| !item.action.is_deal())
    }

    /// Cards currently held across all hands, hidden ones included.
    pub fn cards_in_hands(&self) -> usize {
        self.hands.iter().map(Hand::len).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::moves::Move;

    #[test]
    fn deal_hides_only_the_observer_hand() {
        let config = GameConfig::new(3).expect("valid");
        let deck = Deck::full(&config);
        let obs = Observation::deal(&config, &deck, 1, false);

        assert_eq!(obs.hands.len(), 3);
        assert!(obs.hands[OWN_HAND].cards().iter().all(Option::is_none));
        // Seat 2 is the next player after seat 1 and received cards 10..15.
        let next: Vec<_> = obs.hands[1].cards().iter().map(|c| c.expect("visible")).collect();
        assert_eq!(next, deck.cards()[10..15].to_vec());
        assert_eq!(obs.deck_size, 50 - 15);
        assert_eq!(obs.cards_in_hands(), 15);
        assert_eq!(obs.information_tokens, 8);
        assert_eq!(obs.fireworks, vec![0; 5]);
    }

    #[test]
    fn last_non_deal_move_skips_deals() {
        let config = GameConfig::new(2).expect("valid");
        let mut obs = Observation::deal(&config, &Deck::full(&config), 0, false);
        assert!(obs.last_non_deal_move().is_none());

        obs.last_moves = vec![
            HistoryItem::new(1, Move::Deal { color: 0, rank: 0 }),
            HistoryItem::new(1, Move::Discard { card_index: 2 }),
            HistoryItem::new(0, Move::Play { card_index: 0 }),
        ];
        let last = obs.last_non_deal_move().expect("discard");
        assert_eq!(last.action, Move::Discard { card_index: 2 });
    }

    #[test]
    fn json_round_trip() {
        let config = GameConfig::new(2).expect("valid");
        let obs = Observation::deal(&config, &Deck::shuffled_with_seed(&config, 9), 0, true);
        let json = obs.to_json().expect("serialize");
        assert_eq!(Observation::from_json(&json).expect("deserialize"), obs);
    }
}
