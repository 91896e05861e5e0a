use crate::belief::{BeliefConfig, BeliefGrid, CardCounts, v0_belief, v1_belief};
use crate::encode::board::encode_board;
use crate::encode::discards::encode_discards;
use crate::encode::hands::encode_hands;
use crate::encode::knowledge::{encode_card_knowledge, encode_knowledge_with_beliefs};
use crate::encode::last_action::encode_last_action;
use crate::encode::layout::{Layout, Section, last_action_len};
use crate::encode::own_hand::encode_own_hand;
use crate::encode::writer::SectionWriter;
use crate::error::EncodeError;
use crate::model::{GameConfig, Observation};
use core::fmt;
use serde::{Deserialize, Serialize};
use tracing::error;

/// What fills the grid of each occupied slot in the knowledge section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeEncoding {
    /// The raw plausibility grid.
    Plausibility,
    /// Direct posterior over the unseen cards.
    #[default]
    BeliefV0,
    /// Iteratively refined posterior.
    BeliefV1,
}

impl KnowledgeEncoding {
    pub const fn as_str(self) -> &'static str {
        match self {
            KnowledgeEncoding::Plausibility => "plausibility",
            KnowledgeEncoding::BeliefV0 => "belief_v0",
            KnowledgeEncoding::BeliefV1 => "belief_v1",
        }
    }
}

impl fmt::Display for KnowledgeEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encodes observations of one game configuration into flat vectors.
///
/// Holds no per-call state; one encoder can serve any number of threads.
#[derive(Debug, Clone)]
pub struct CanonicalEncoder {
    config: GameConfig,
    layout: Layout,
    knowledge: KnowledgeEncoding,
    belief: BeliefConfig,
}

impl CanonicalEncoder {
    /// Belief refinement starts from `BeliefConfig::from_env`.
    pub fn new(config: GameConfig) -> Self {
        let layout = Layout::new(&config);
        Self {
            config,
            layout,
            knowledge: KnowledgeEncoding::default(),
            belief: BeliefConfig::from_env(),
        }
    }

    pub fn with_knowledge_encoding(mut self, knowledge: KnowledgeEncoding) -> Self {
        self.knowledge = knowledge;
        self
    }

    pub fn with_belief_config(mut self, belief: BeliefConfig) -> Self {
        self.belief = belief.sanitized();
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn knowledge_encoding(&self) -> KnowledgeEncoding {
        self.knowledge
    }

    pub fn belief_config(&self) -> &BeliefConfig {
        &self.belief
    }

    /// Length of every vector produced by `encode`.
    pub fn shape(&self) -> usize {
        self.layout.shape()
    }

    pub fn encode(&self, obs: &Observation, show_own_cards: bool) -> Result<Vec<f32>, EncodeError> {
        let mut encoding = vec![0.0; self.shape()];
        self.encode_into(obs, show_own_cards, &mut encoding)?;
        Ok(encoding)
    }

    /// Writes the full encoding into `buf`, which must be `shape()` long.
    /// On error `buf` is left zeroed.
    pub fn encode_into(
        &self,
        obs: &Observation,
        show_own_cards: bool,
        buf: &mut [f32],
    ) -> Result<(), EncodeError> {
        if buf.len() != self.shape() {
            return Err(logged(
                "encode",
                EncodeError::BufferLength {
                    expected: self.shape(),
                    found: buf.len(),
                },
            ));
        }
        buf.fill(0.0);
        if let Err(err) = self.write_sections(obs, show_own_cards, buf) {
            buf.fill(0.0);
            return Err(logged("encode", err));
        }
        Ok(())
    }

    fn write_sections(
        &self,
        obs: &Observation,
        show_own_cards: bool,
        buf: &mut [f32],
    ) -> Result<(), EncodeError> {
        let config = &self.config;
        for span in self.layout.spans() {
            let out = SectionWriter::new(span.section, &mut buf[span.range()]);
            match span.section {
                Section::Hands => encode_hands(config, obs, show_own_cards, out)?,
                Section::Board => encode_board(config, obs, out)?,
                Section::Discards => encode_discards(config, obs, out)?,
                Section::LastAction => encode_last_action(config, obs, out)?,
                Section::CardKnowledge => match self.knowledge {
                    KnowledgeEncoding::Plausibility => encode_card_knowledge(config, obs, out)?,
                    KnowledgeEncoding::BeliefV0 => {
                        let beliefs = v0_belief(config, obs)?;
                        encode_knowledge_with_beliefs(config, obs, &beliefs, out)?
                    }
                    KnowledgeEncoding::BeliefV1 => {
                        let beliefs = v1_belief(config, obs, &self.belief)?;
                        encode_knowledge_with_beliefs(config, obs, &beliefs, out)?
                    }
                },
            };
        }
        Ok(())
    }

    /// The last-action section on its own.
    pub fn encode_last_action(&self, obs: &Observation) -> Result<Vec<f32>, EncodeError> {
        let mut encoding = vec![0.0; last_action_len(&self.config)];
        encode_last_action(
            &self.config,
            obs,
            SectionWriter::new(Section::LastAction, &mut encoding),
        )
        .map_err(|err| logged("last_action", err))?;
        Ok(encoding)
    }

    /// Plausibility grid of every tracked slot, `players x hand_size x colors*ranks`.
    pub fn encode_hand_mask(&self, obs: &Observation) -> Result<Vec<f32>, EncodeError> {
        BeliefGrid::plausibility(&self.config, obs)
            .map(BeliefGrid::into_flat)
            .map_err(|err| logged("hand_mask", err))
    }

    /// Unseen copies of every card value, color-major.
    pub fn encode_card_count(&self, obs: &Observation) -> Result<Vec<f32>, EncodeError> {
        CardCounts::remaining(&self.config, obs)
            .map(|counts| counts.to_f32())
            .map_err(|err| logged("card_count", err))
    }

    pub fn encode_v0_belief(&self, obs: &Observation) -> Result<Vec<f32>, EncodeError> {
        v0_belief(&self.config, obs)
            .map(BeliefGrid::into_flat)
            .map_err(|err| logged("v0_belief", err))
    }

    pub fn encode_v1_belief(&self, obs: &Observation) -> Result<Vec<f32>, EncodeError> {
        v1_belief(&self.config, obs, &self.belief)
            .map(BeliefGrid::into_flat)
            .map_err(|err| logged("v1_belief", err))
    }

    /// Three entries per own slot; the observer's cards must be visible.
    pub fn encode_own_hand(&self, obs: &Observation) -> Result<Vec<f32>, EncodeError> {
        encode_own_hand(&self.config, obs).map_err(|err| logged("own_hand", err))
    }
}

fn logged(op: &'static str, err: EncodeError) -> EncodeError {
    error!(target: "hanabi_core::encode", op, %err, "encoding aborted");
    err
}
