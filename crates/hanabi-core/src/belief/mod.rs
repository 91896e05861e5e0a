//! Probability estimates for hidden card identities.
//!
//! This module is composed of:
//! - `grid`: per-slot `colors x ranks` grids (`BeliefGrid`) and the plausibility support.
//! - `card_count`: unseen copies of each card value.
//! - `v0`: direct posterior, plausibility weighted by unseen counts.
//! - `v1`: damped fixed-point refinement that discounts cards expected elsewhere.
//! - `telemetry`: entropy summaries for diagnostics.

mod card_count;
mod grid;
pub mod telemetry;
mod v0;
pub mod v1;

pub use card_count::CardCounts;
pub use grid::{BeliefGrid, extract_grids};
pub use telemetry::BeliefMetrics;
pub use v0::{direct_posterior, v0_belief};
pub use v1::{BeliefConfig, Refinement, refine, v1_belief};
