//! Damped fixed-point refinement of the direct posterior.
//!
//! Each step estimates how many copies of every card value remain outside a
//! slot (unseen count minus the belief mass every slot already claims), moves
//! each slot a fraction `weight` toward that estimate restricted to its
//! plausibility grid, and renormalizes. The step count is fixed; there is no
//! convergence test.

use crate::belief::card_count::CardCounts;
use crate::belief::grid::BeliefGrid;
use crate::belief::v0::direct_posterior;
use crate::error::EncodeError;
use crate::model::{GameConfig, Observation};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error};

const MAX_ITERATIONS: usize = 10_000;

/// Tunable refinement parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeliefConfig {
    pub iterations: usize,
    /// Blend factor toward the candidate, in `[0, 1]`.
    pub weight: f32,
}

impl Default for BeliefConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            weight: 0.1,
        }
    }
}

impl BeliefConfig {
    /// Defaults overridden by `HANABI_BELIEF_ITERS` and `HANABI_BELIEF_WEIGHT`.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub(crate) fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base = Self::default();
        let iterations = lookup("HANABI_BELIEF_ITERS")
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(base.iterations)
            .min(MAX_ITERATIONS);
        let weight = lookup("HANABI_BELIEF_WEIGHT")
            .and_then(|value| value.trim().parse::<f32>().ok())
            .filter(|value| value.is_finite())
            .unwrap_or(base.weight)
            .clamp(0.0, 1.0);
        Self { iterations, weight }
    }

    /// Clamps values read from files into the accepted ranges.
    pub fn sanitized(self) -> Self {
        let weight = if self.weight.is_finite() {
            self.weight.clamp(0.0, 1.0)
        } else {
            Self::default().weight
        };
        Self {
            iterations: self.iterations.min(MAX_ITERATIONS),
            weight,
        }
    }
}

fn details_enabled() -> bool {
    env::var("HANABI_BELIEF_DETAILS")
        .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
        .unwrap_or(false)
}

/// Refined beliefs and the largest per-entry change of every step.
#[derive(Debug, Clone)]
pub struct Refinement {
    pub beliefs: BeliefGrid,
    pub deltas: Vec<f32>,
}

pub fn refine(
    plausible: &BeliefGrid,
    prior: &BeliefGrid,
    counts: &CardCounts,
    config: &BeliefConfig,
) -> Result<Refinement, EncodeError> {
    let bits = prior.bits_per_card();
    let slots: Vec<(usize, usize)> = prior.occupied_slots().collect();
    let weight = config.weight;
    let details = details_enabled();

    // Without blending every step is a renormalization of the prior; keep it exact.
    if weight == 0.0 {
        return Ok(Refinement {
            beliefs: prior.clone(),
            deltas: vec![0.0; config.iterations],
        });
    }

    let mut beliefs = prior.clone();
    let mut deltas = Vec::with_capacity(config.iterations);
    let mut elsewhere = vec![0.0f32; bits];
    let mut candidates = vec![0.0f32; slots.len() * bits];
    let mut previous = vec![0.0f32; bits];

    for step in 0..config.iterations {
        for (remaining, &count) in elsewhere.iter_mut().zip(counts.as_slice()) {
            *remaining = count as f32;
        }
        for &(player, slot) in &slots {
            for (remaining, &mass) in elsewhere.iter_mut().zip(beliefs.slot(player, slot)) {
                *remaining -= mass;
            }
        }

        for (candidate, &(player, slot)) in candidates.chunks_exact_mut(bits).zip(&slots) {
            let own = beliefs.slot(player, slot);
            let mask = plausible.slot(player, slot);
            for card in 0..bits {
                candidate[card] = (elsewhere[card] + own[card]).max(0.0) * mask[card];
            }
        }

        let mut delta = 0.0f32;
        for (candidate, &(player, slot)) in candidates.chunks_exact(bits).zip(&slots) {
            let grid = beliefs.slot_mut(player, slot);
            previous.copy_from_slice(grid);
            for (value, &target) in grid.iter_mut().zip(candidate) {
                *value = (1.0 - weight) * *value + weight * target;
            }
            beliefs.normalize_slot(player, slot).inspect_err(|err| {
                error!(target: "hanabi_core::belief", step, player, slot, %err, "refinement lost all mass");
            })?;
            for (now, before) in beliefs.slot(player, slot).iter().zip(&previous) {
                delta = delta.max((now - before).abs());
            }
        }

        if details {
            debug!(target: "hanabi_core::belief", step, delta, "v1 refinement step");
        }
        deltas.push(delta);
    }

    Ok(Refinement { beliefs, deltas })
}

pub fn v1_belief(
    config: &GameConfig,
    obs: &Observation,
    belief: &BeliefConfig,
) -> Result<BeliefGrid, EncodeError> {
    let counts = CardCounts::remaining(config, obs)?;
    let plausible = BeliefGrid::plausibility(config, obs)?;
    let prior = direct_posterior(&plausible, &counts)?;
    Ok(refine(&plausible, &prior, &counts, belief)?.beliefs)
}
