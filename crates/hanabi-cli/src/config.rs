use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use hanabi_core::belief::BeliefConfig;
use hanabi_core::encode::KnowledgeEncoding;
use hanabi_core::model::config::{GameConfig, GameParams};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root run configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RunConfig {
    #[serde(default = "default_run_id")]
    pub run_id: String,
    #[serde(default)]
    pub game: GameParams,
    /// Falls back to `HANABI_BELIEF_ITERS` / `HANABI_BELIEF_WEIGHT` when absent.
    #[serde(default = "BeliefConfig::from_env")]
    pub belief: BeliefConfig,
    #[serde(default)]
    pub knowledge: KnowledgeEncoding,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub view: View,
    #[serde(default)]
    pub show_own_cards: bool,
    #[serde(default)]
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            run_id: default_run_id(),
            game: GameParams::default(),
            belief: BeliefConfig::from_env(),
            knowledge: KnowledgeEncoding::default(),
            input: InputConfig::default(),
            view: View::default(),
            show_own_cards: false,
            outputs: OutputsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RunConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| RunConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: RunConfig =
            serde_yaml::from_reader(reader).map_err(|source| RunConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| RunConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        let game = self.game_config()?;
        self.input.validate(&game)?;
        self.outputs.validate(&self.run_id)?;
        validate_belief(&self.belief)?;
        self.logging.normalize();
        if self.logging.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.logging.tracing_level),
            });
        }
        Ok(())
    }

    pub fn game_config(&self) -> Result<GameConfig, ValidationError> {
        self.game
            .build()
            .map_err(|err| ValidationError::InvalidField {
                field: format!("game.{}", err.field()),
                message: err.to_string(),
            })
    }

    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            report: self
                .outputs
                .report
                .as_deref()
                .map(|template| resolve_template(&self.run_id, template)),
            telemetry_dir: resolve_template(&self.run_id, &self.outputs.telemetry_dir),
        }
    }
}

fn default_run_id() -> String {
    "encode".to_string()
}

/// Where the observation comes from: a JSON file or a fresh seeded deal.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct InputConfig {
    #[serde(default)]
    pub observation: Option<PathBuf>,
    #[serde(default)]
    pub deal_seed: Option<u64>,
    /// Seat that observes a dealt table.
    #[serde(default)]
    pub observer: u8,
}

impl InputConfig {
    fn validate(&self, game: &GameConfig) -> Result<(), ValidationError> {
        match (&self.observation, self.deal_seed) {
            (Some(_), Some(_)) => Err(ValidationError::InvalidField {
                field: "input".to_string(),
                message: "observation and deal_seed are mutually exclusive".to_string(),
            }),
            (None, None) => Err(ValidationError::InvalidField {
                field: "input".to_string(),
                message: "either observation or deal_seed must be set".to_string(),
            }),
            (Some(path), None) if path.as_os_str().is_empty() => {
                Err(ValidationError::InvalidField {
                    field: "input.observation".to_string(),
                    message: "path must not be empty".to_string(),
                })
            }
            _ if self.observer as usize >= game.num_players() => {
                Err(ValidationError::InvalidField {
                    field: "input.observer".to_string(),
                    message: format!(
                        "observer {} is not a seat of a {}-player game",
                        self.observer,
                        game.num_players()
                    ),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Which encoding, or encoder accessor, the run reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Full,
    LastAction,
    BeliefV0,
    BeliefV1,
    HandMask,
    CardCount,
    OwnHand,
    Shape,
}

impl View {
    pub const fn as_str(self) -> &'static str {
        match self {
            View::Full => "full",
            View::LastAction => "last-action",
            View::BeliefV0 => "belief-v0",
            View::BeliefV1 => "belief-v1",
            View::HandMask => "hand-mask",
            View::CardCount => "card-count",
            View::OwnHand => "own-hand",
            View::Shape => "shape",
        }
    }
}

/// Output artifact configuration. Without `report` the report goes to stdout.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    #[serde(default)]
    pub report: Option<String>,
    #[serde(default = "default_telemetry_dir")]
    pub telemetry_dir: String,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            report: None,
            telemetry_dir: default_telemetry_dir(),
        }
    }
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        let report = self.report.as_ref().map(|value| ("outputs.report", value));
        for (label, value) in report
            .into_iter()
            .chain([("outputs.telemetry_dir", &self.telemetry_dir)])
        {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn default_telemetry_dir() -> String {
    "out/{run_id}".to_string()
}

/// Logging configuration defaults to plain stderr logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    /// Per-step V1 refinement deltas at debug level.
    #[serde(default)]
    pub belief_details: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            belief_details: false,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn validate_belief(belief: &BeliefConfig) -> Result<(), ValidationError> {
    if !belief.weight.is_finite() || !(0.0..=1.0).contains(&belief.weight) {
        return Err(ValidationError::InvalidField {
            field: "belief.weight".to_string(),
            message: format!("weight {} must lie in [0, 1]", belief.weight),
        });
    }
    if belief.sanitized().iterations != belief.iterations {
        return Err(ValidationError::InvalidField {
            field: "belief.iterations".to_string(),
            message: format!("{} iterations exceeds the supported maximum", belief.iterations),
        });
    }
    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Output paths with `{run_id}` substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub report: Option<PathBuf>,
    pub telemetry_dir: PathBuf,
}

/// Failures while loading a run configuration file.
#[derive(Debug, Error)]
pub enum RunConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

/// A rejected field of the run configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
