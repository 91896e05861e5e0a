//! Error kinds surfaced by configuration and encoding.
//!
//! `ConfigError` is raised once, when a `GameConfig` is built. `EncodeError`
//! marks a broken invariant in the observation or in the encoder itself; the
//! call that produced it must be abandoned, there is no partial result.

use crate::encode::Section;
use crate::model::{Card, MoveKind};
use thiserror::Error;

/// Malformed game parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            ConfigError::InvalidField { field, .. } => field,
        }
    }
}

/// Invariant violations detected while encoding an observation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("{section} section wrote {written} entries, layout declares {expected}")]
    LayoutMismatch {
        section: Section,
        expected: usize,
        written: usize,
    },
    #[error("{section} field of width {width} at offset {offset} overruns the section ({len} entries)")]
    FieldOverflow {
        section: Section,
        offset: usize,
        width: usize,
        len: usize,
    },
    #[error("{section}: value {value} does not fit a field of width {width}")]
    ValueOutOfRange {
        section: Section,
        value: usize,
        width: usize,
    },
    #[error("output buffer holds {found} entries, expected {expected}")]
    BufferLength { expected: usize, found: usize },
    #[error("observation has {found} hands, game has {expected} players")]
    PlayerCountMismatch { expected: usize, found: usize },
    #[error("player {player} tracks {found} slots, hand size is {hand_size}")]
    HandOverflow {
        player: usize,
        found: usize,
        hand_size: usize,
    },
    #[error("player {player} holds {cards} cards but tracks knowledge for only {knowledge}")]
    KnowledgeMissing {
        player: usize,
        cards: usize,
        knowledge: usize,
    },
    #[error("card {card} lies outside the {colors}x{ranks} deck")]
    CardOutOfRange { card: Card, colors: usize, ranks: usize },
    #[error("own hand slot {slot} is visible but own cards are hidden")]
    OwnCardShown { slot: usize },
    #[error("own hand slot {slot} is unobserved but own cards were requested")]
    OwnCardHidden { slot: usize },
    #[error("player {player} slot {slot} holds an unobserved card")]
    HiddenCard { player: usize, slot: usize },
    #[error("fireworks cover {found} colors, game has {expected}")]
    FireworksMismatch { expected: usize, found: usize },
    #[error("last action has move type {kind:?}, which has no encoding")]
    UnexpectedMove { kind: MoveKind },
    #[error("last {kind:?} move does not carry the moved card")]
    UnknownMovedCard { kind: MoveKind },
    #[error("card {card} has negative remaining count {count}")]
    NegativeCount { card: Card, count: i64 },
    #[error("{counted} unseen cards disagree with deck size {deck_size} plus {in_hands} held cards")]
    CountMismatch {
        counted: i64,
        deck_size: usize,
        in_hands: usize,
    },
    #[error("player {player} slot {slot} has no plausible card mass")]
    EmptyBelief { player: usize, slot: usize },
}
