//! Static section lengths and their placement in the encoding.
//!
//! All lengths depend on the `GameConfig` only, never on an observation.

use crate::model::config::{GameConfig, ObservationType};
use core::fmt;
use core::ops::Range;
use serde::{Deserialize, Serialize};

/// Entries used by the move-type one-hot (play, discard, reveal color, reveal rank).
pub const MOVE_TYPE_BITS: usize = 4;
/// Play outcome flags: scored, gained an information token.
pub const PLAY_OUTCOME_BITS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Hands,
    Board,
    Discards,
    LastAction,
    CardKnowledge,
}

impl Section {
    /// Write order of the canonical encoding.
    pub const ORDER: [Section; 5] = [
        Section::Hands,
        Section::Board,
        Section::Discards,
        Section::LastAction,
        Section::CardKnowledge,
    ];

    pub fn len(self, config: &GameConfig) -> usize {
        match self {
            Section::Hands => hands_len(config),
            Section::Board => board_len(config),
            Section::Discards => discards_len(config),
            Section::LastAction => last_action_len(config),
            Section::CardKnowledge => card_knowledge_len(config),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Section::Hands => "hands",
            Section::Board => "board",
            Section::Discards => "discards",
            Section::LastAction => "last_action",
            Section::CardKnowledge => "card_knowledge",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn hands_len(config: &GameConfig) -> usize {
    config.num_players() * config.hand_size() * config.bits_per_card() + config.num_players()
}

/// Width of the deck-size thermometer: cards left after the deal.
pub fn deck_field_len(config: &GameConfig) -> usize {
    config.max_deck_size() - config.num_players() * config.hand_size()
}

pub fn board_len(config: &GameConfig) -> usize {
    deck_field_len(config)
        + config.bits_per_card()
        + config.max_information_tokens()
        + config.max_life_tokens()
}

pub fn discards_len(config: &GameConfig) -> usize {
    config.max_deck_size()
}

pub fn last_action_len(config: &GameConfig) -> usize {
    config.num_players() // acting player
        + MOVE_TYPE_BITS
        + config.num_players() // hint target
        + config.num_colors() // revealed color
        + config.num_ranks() // revealed rank
        + config.hand_size() // reveal outcome
        + config.hand_size() // played / discarded slot
        + config.bits_per_card() // played / discarded card
        + PLAY_OUTCOME_BITS
}

/// Entries per slot in the knowledge section: grid, hinted color, hinted rank.
pub fn knowledge_slot_len(config: &GameConfig) -> usize {
    config.bits_per_card() + config.num_colors() + config.num_ranks()
}

pub fn card_knowledge_len(config: &GameConfig) -> usize {
    config.num_players() * config.hand_size() * knowledge_slot_len(config)
}

/// Compact belief layout: one `colors x ranks` grid per slot.
pub fn belief_len(config: &GameConfig) -> usize {
    config.num_players() * config.hand_size() * config.bits_per_card()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub section: Section,
    pub start: usize,
    pub len: usize,
}

impl SectionSpan {
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

/// Contiguous placement of the sections present for a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    spans: Vec<SectionSpan>,
    total: usize,
}

impl Layout {
    pub fn new(config: &GameConfig) -> Self {
        let minimal = config.observation_type() == ObservationType::Minimal;
        let mut spans = Vec::with_capacity(Section::ORDER.len());
        let mut start = 0;
        for section in Section::ORDER {
            if minimal && section == Section::CardKnowledge {
                continue;
            }
            let len = section.len(config);
            spans.push(SectionSpan {
                section,
                start,
                len,
            });
            start += len;
        }
        Self {
            spans,
            total: start,
        }
    }

    /// Total encoding length.
    pub fn shape(&self) -> usize {
        self.total
    }

    pub fn spans(&self) -> &[SectionSpan] {
        &self.spans
    }

    pub fn span(&self, section: Section) -> Option<SectionSpan> {
        self.spans.iter().copied().find(|span| span.section == section)
    }
}
