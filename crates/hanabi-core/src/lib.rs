#![deny(warnings)]
//! Canonical observation encoding for Hanabi.
//!
//! - `model`: game configuration and the read-only observation snapshot.
//! - `encode`: static layout, section encoders and the top-level encoder.
//! - `belief`: remaining card counts and the V0/V1 belief estimators.

pub mod belief;
pub mod encode;
pub mod error;
pub mod model;

pub use belief::{BeliefConfig, BeliefGrid, CardCounts};
pub use encode::{CanonicalEncoder, KnowledgeEncoding, Layout, Section};
pub use error::{ConfigError, EncodeError};
pub use model::{
    Card, CardKnowledge, Deck, GameConfig, GameParams, Hand, HistoryItem, Move, MoveKind,
    Observation, ObservationType,
};
