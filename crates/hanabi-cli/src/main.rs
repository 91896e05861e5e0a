use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use hanabi_cli::config::{RunConfig, View};
use hanabi_cli::logging::init_logging;
use hanabi_cli::report::{build_report, load_observation, write_report};
use hanabi_core::encode::KnowledgeEncoding;

/// Canonical observation encoder for Hanabi tables.
#[derive(Debug, Parser)]
#[command(
    name = "hanabi-encode",
    author,
    version,
    about = "Encode a Hanabi observation into its canonical vector"
)]
struct Cli {
    /// Path to the YAML run configuration. Built-in defaults apply without one.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Deal a fresh table from this seed instead of reading an observation.
    #[arg(long, value_name = "SEED", conflicts_with = "observation")]
    deal_seed: Option<u64>,

    /// Read the observation from a JSON file.
    #[arg(long, value_name = "FILE")]
    observation: Option<PathBuf>,

    /// Seat observing a dealt table.
    #[arg(long, value_name = "SEAT")]
    observer: Option<u8>,

    /// Override the reported view.
    #[arg(long, value_enum)]
    view: Option<View>,

    /// Override how the card-knowledge section is filled.
    #[arg(long, value_name = "MODE", value_parser = parse_knowledge)]
    knowledge: Option<KnowledgeEncoding>,

    /// Encode the observer's own cards (they must be visible).
    #[arg(long)]
    show_own_cards: bool,

    /// Write the report to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Exit after validating the configuration (nothing is encoded).
    #[arg(long)]
    validate_only: bool,

    /// Log per-step V1 refinement deltas regardless of config (forces HANABI_BELIEF_DETAILS=1).
    #[arg(long)]
    log_belief_details: bool,
}

fn parse_knowledge(raw: &str) -> Result<KnowledgeEncoding, String> {
    match raw.trim().replace('-', "_").as_str() {
        "plausibility" => Ok(KnowledgeEncoding::Plausibility),
        "belief_v0" => Ok(KnowledgeEncoding::BeliefV0),
        "belief_v1" => Ok(KnowledgeEncoding::BeliefV1),
        other => Err(format!(
            "unknown knowledge encoding '{other}' (plausibility, belief-v0, belief-v1)"
        )),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => RunConfig::from_path(path)?,
        None => RunConfig::default(),
    };

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(seed) = cli.deal_seed {
        config.input.deal_seed = Some(seed);
        config.input.observation = None;
    }

    if let Some(path) = cli.observation {
        config.input.observation = Some(path);
        config.input.deal_seed = None;
    }

    if let Some(observer) = cli.observer {
        config.input.observer = observer;
    }

    if let Some(view) = cli.view {
        config.view = view;
    }

    if let Some(knowledge) = cli.knowledge {
        config.knowledge = knowledge;
    }

    if cli.show_own_cards {
        config.show_own_cards = true;
    }

    if let Some(output) = cli.output {
        config.outputs.report = Some(output.display().to_string());
    }

    if cli.log_belief_details {
        config.logging.belief_details = true;
    }

    config.validate()?;

    let run_id = config.run_id.clone();
    if cli.validate_only {
        println!(
            "Configuration '{run_id}' is valid (view {}, knowledge {}).",
            config.view.as_str(),
            config.knowledge
        );
        return Ok(());
    }

    let outputs = config.resolved_outputs();
    let logging_guard = init_logging(&config.logging, &outputs, &run_id)?;

    let game = config.game_config()?;
    let obs = load_observation(&config.input, &game, config.show_own_cards)?;
    let report = build_report(&config, &game, &obs)
        .with_context(|| format!("encoding {} view for '{run_id}'", config.view.as_str()))?;
    write_report(&report, outputs.report.as_deref())?;

    if let Some(path) = outputs.report.as_ref() {
        eprintln!("Report: {}", path.display());
    }
    if let Some(guard) = logging_guard.as_ref() {
        eprintln!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
