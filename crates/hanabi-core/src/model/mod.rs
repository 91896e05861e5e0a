pub mod card;
pub mod config;
pub mod deck;
pub mod hand;
pub mod knowledge;
pub mod moves;
pub mod observation;

pub use card::Card;
pub use config::{GameConfig, GameParams, ObservationType};
pub use deck::Deck;
pub use hand::Hand;
pub use knowledge::{CardKnowledge, ValueMask};
pub use moves::{HistoryItem, Move, MoveKind};
pub use observation::Observation;
