use crate::model::card::Card;
use serde::{Deserialize, Serialize};

/// A move as recorded in the history. Hint targets are offsets from the
/// acting player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Move {
    Play { card_index: u8 },
    Discard { card_index: u8 },
    RevealColor { target_offset: u8, color: u8 },
    RevealRank { target_offset: u8, rank: u8 },
    Deal { color: u8, rank: u8 },
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Play,
    Discard,
    RevealColor,
    RevealRank,
    Deal,
    Invalid,
}

impl MoveKind {
    /// Move types that have a slot in the last-action encoding, in order.
    pub const ENCODED: [MoveKind; 4] = [
        MoveKind::Play,
        MoveKind::Discard,
        MoveKind::RevealColor,
        MoveKind::RevealRank,
    ];

    pub const fn encoded_index(self) -> Option<usize> {
        match self {
            MoveKind::Play => Some(0),
            MoveKind::Discard => Some(1),
            MoveKind::RevealColor => Some(2),
            MoveKind::RevealRank => Some(3),
            MoveKind::Deal | MoveKind::Invalid => None,
        }
    }
}

impl Move {
    pub const fn kind(&self) -> MoveKind {
        match self {
            Move::Play { .. } => MoveKind::Play,
            Move::Discard { .. } => MoveKind::Discard,
            Move::RevealColor { .. } => MoveKind::RevealColor,
            Move::RevealRank { .. } => MoveKind::RevealRank,
            Move::Deal { .. } => MoveKind::Deal,
            Move::Invalid => MoveKind::Invalid,
        }
    }

    pub const fn is_deal(&self) -> bool {
        matches!(self, Move::Deal { .. })
    }

    pub const fn is_hint(&self) -> bool {
        matches!(self, Move::RevealColor { .. } | Move::RevealRank { .. })
    }

    pub const fn target_offset(&self) -> Option<u8> {
        match self {
            Move::RevealColor { target_offset, .. } | Move::RevealRank { target_offset, .. } => {
                Some(*target_offset)
            }
            _ => None,
        }
    }

    /// Hand slot of a play or discard.
    pub const fn card_index(&self) -> Option<u8> {
        match self {
            Move::Play { card_index } | Move::Discard { card_index } => Some(*card_index),
            _ => None,
        }
    }
}

/// A past move with its outcome. `player` is relative to the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryItem {
    pub action: Move,
    pub player: u8,
    /// Slots touched by a hint, bit `i` for slot `i`.
    #[serde(default)]
    pub reveal_bitmask: u8,
    /// Card that was played or discarded, once it is public.
    #[serde(default)]
    pub card: Option<Card>,
    #[serde(default)]
    pub scored: bool,
    #[serde(default)]
    pub information_token: bool,
}

impl HistoryItem {
    pub const fn new(player: u8, action: Move) -> Self {
        Self {
            action,
            player,
            reveal_bitmask: 0,
            card: None,
            scored: false,
            information_token: false,
        }
    }

    pub const fn with_reveal_bitmask(mut self, mask: u8) -> Self {
        self.reveal_bitmask = mask;
        self
    }

    pub const fn with_card(mut self, card: Card) -> Self {
        self.card = Some(card);
        self
    }

    pub const fn with_outcome(mut self, scored: bool, information_token: bool) -> Self {
        self.scored = scored;
        self.information_token = information_token;
        self
    }
}
