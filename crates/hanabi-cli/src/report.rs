use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use hanabi_core::belief::{BeliefMetrics, v0_belief, v1_belief};
use hanabi_core::encode::{CanonicalEncoder, KnowledgeEncoding, Section};
use hanabi_core::error::EncodeError;
use hanabi_core::model::config::GameConfig;
use hanabi_core::model::deck::Deck;
use hanabi_core::model::observation::Observation;
use serde::Serialize;
use tracing::{error, info};

use crate::config::{InputConfig, RunConfig, View};

/// Placement of one section inside a full encoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionEntry {
    pub section: Section,
    pub start: usize,
    pub len: usize,
}

/// JSON document written for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub run_id: String,
    pub view: View,
    pub knowledge: KnowledgeEncoding,
    /// Length of the full encoding for the configured game.
    pub shape: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<BeliefMetrics>,
}

/// Reads the observation file, or deals a seeded table for the observer. Own
/// cards of a dealt table are visible only with `show_own_cards`.
pub fn load_observation(
    input: &InputConfig,
    config: &GameConfig,
    show_own_cards: bool,
) -> Result<Observation> {
    if let Some(path) = input.observation.as_ref() {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading observation at {}", path.display()))?;
        return Observation::from_json(&json)
            .with_context(|| format!("parsing observation at {}", path.display()));
    }

    let seed = input
        .deal_seed
        .context("no observation file or deal seed configured")?;
    let deck = Deck::shuffled_with_seed(config, seed);
    Ok(Observation::deal(config, &deck, input.observer, show_own_cards))
}

pub fn build_report(
    run: &RunConfig,
    config: &GameConfig,
    obs: &Observation,
) -> Result<Report, EncodeError> {
    let encoder = CanonicalEncoder::new(config.clone())
        .with_knowledge_encoding(run.knowledge)
        .with_belief_config(run.belief);

    let mut sections = Vec::new();
    let mut metrics = None;
    let values = match run.view {
        View::Full => {
            sections = encoder
                .layout()
                .spans()
                .iter()
                .map(|span| SectionEntry {
                    section: span.section,
                    start: span.start,
                    len: span.len,
                })
                .collect();
            encoder.encode(obs, run.show_own_cards)?
        }
        View::LastAction => encoder.encode_last_action(obs)?,
        View::BeliefV0 => {
            let grid = v0_belief(config, obs).inspect_err(|err| logged(run.view, err))?;
            metrics = Some(BeliefMetrics::from_grid(&grid));
            grid.into_flat()
        }
        View::BeliefV1 => {
            let grid = v1_belief(config, obs, encoder.belief_config())
                .inspect_err(|err| logged(run.view, err))?;
            metrics = Some(BeliefMetrics::from_grid(&grid));
            grid.into_flat()
        }
        View::HandMask => encoder.encode_hand_mask(obs)?,
        View::CardCount => encoder.encode_card_count(obs)?,
        View::OwnHand => encoder.encode_own_hand(obs)?,
        View::Shape => Vec::new(),
    };

    if let Some(metrics) = metrics.as_ref() {
        info!(
            target: "hanabi_cli::report",
            view = run.view.as_str(),
            total_entropy = metrics.total_entropy(),
            "belief summary"
        );
    }

    Ok(Report {
        run_id: run.run_id.clone(),
        view: run.view,
        knowledge: encoder.knowledge_encoding(),
        shape: encoder.shape(),
        sections,
        values,
        metrics,
    })
}

fn logged(view: View, err: &EncodeError) {
    error!(target: "hanabi_cli::report", view = view.as_str(), %err, "belief estimate aborted");
}

/// Pretty JSON to `path`, or to stdout when no path is configured.
pub fn write_report(report: &Report, path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serializing report")?;
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("creating report directory at {}", parent.display())
                })?;
            }
            fs::write(path, json + "\n")
                .with_context(|| format!("writing report to {}", path.display()))?;
        }
        None => println!("{json}"),
    }
    Ok(())
}
