//! Canonical observation encoding.
//!
//! The flat vector is the concatenation of the sections in `Section::ORDER`,
//! each placed by `Layout` and written through its own `SectionWriter`.

pub mod board;
pub mod discards;
pub mod encoder;
pub mod hands;
pub mod knowledge;
pub mod last_action;
pub mod layout;
pub mod own_hand;
pub mod writer;

pub use encoder::{CanonicalEncoder, KnowledgeEncoding};
pub use layout::{Layout, Section, SectionSpan};
pub use writer::{SectionWriter, thermometer_value};

use crate::error::EncodeError;
use crate::model::{Card, GameConfig, Hand, Observation};

/// One hand per player.
pub(crate) fn ensure_players(config: &GameConfig, obs: &Observation) -> Result<(), EncodeError> {
    if obs.hands.len() != config.num_players() {
        return Err(EncodeError::PlayerCountMismatch {
            expected: config.num_players(),
            found: obs.hands.len(),
        });
    }
    Ok(())
}

/// Neither cards nor knowledge entries may exceed the hand size, and every
/// card needs its knowledge entry.
pub(crate) fn ensure_hand_fits(
    config: &GameConfig,
    player: usize,
    hand: &Hand,
) -> Result<(), EncodeError> {
    if hand.knowledge().len() < hand.len() {
        return Err(EncodeError::KnowledgeMissing {
            player,
            cards: hand.len(),
            knowledge: hand.knowledge().len(),
        });
    }
    let found = hand.len().max(hand.knowledge().len());
    if found > config.hand_size() {
        return Err(EncodeError::HandOverflow {
            player,
            found,
            hand_size: config.hand_size(),
        });
    }
    Ok(())
}

/// Color-major index of `card`, rejecting cards outside the deck.
pub(crate) fn card_index(config: &GameConfig, card: Card) -> Result<usize, EncodeError> {
    if !card.fits(config.num_colors(), config.num_ranks()) {
        return Err(EncodeError::CardOutOfRange {
            card,
            colors: config.num_colors(),
            ranks: config.num_ranks(),
        });
    }
    Ok(config.card_index(card))
}

pub(crate) fn ensure_fireworks(config: &GameConfig, obs: &Observation) -> Result<(), EncodeError> {
    if obs.fireworks.len() != config.num_colors() {
        return Err(EncodeError::FireworksMismatch {
            expected: config.num_colors(),
            found: obs.fireworks.len(),
        });
    }
    Ok(())
}
