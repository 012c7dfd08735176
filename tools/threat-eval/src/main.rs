//! threat-eval: rank and select hostile targets from scene and roster files.
//!
//! Usage:
//!   threat-eval rank --scene town.json --roster contacts.json
//!   threat-eval select --roster contacts.json --preset urban
//!   threat-eval demo --seed 7 --count 20 > contacts.json

mod roster;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use vigil_core::config::{EvaluatorConfig, WeightVector};
use vigil_core::error::ThreatError;
use vigil_terrain::{load_scene, TerrainError, TerrainModel};
use vigil_threat_ai::{statistics, EvaluationResult, Orchestrator, ThreatStatistics, WeightedEvaluator};

use roster::{demo_roster, RosterFile};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid roster: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Terrain(#[from] TerrainError),

    #[error(transparent)]
    Threat(#[from] ThreatError),

    #[error("unknown weight preset {0:?} (expected standard, close_quarters or urban)")]
    UnknownPreset(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Parser, Debug)]
#[command(name = "threat-eval", version, about = "Fuzzy multi-criteria threat evaluation", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate every hostile and print them most threatening first.
    Rank {
        #[command(flatten)]
        inputs: Inputs,

        /// Emit JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Pick the single most threatening hostile, falling back to the
    /// heuristic when the roster is incomplete.
    Select {
        #[command(flatten)]
        inputs: Inputs,
    },
    /// Print a seeded random roster.
    Demo {
        #[arg(long, default_value_t = 1)]
        seed: u64,

        #[arg(long, default_value_t = 10)]
        count: u32,

        /// Half side of the square the hostiles are scattered in (m).
        #[arg(long, default_value_t = 50.0)]
        extent: f64,
    },
}

#[derive(Args, Debug)]
struct Inputs {
    /// Roster JSON (observer and enemies).
    #[arg(long, value_name = "FILE")]
    roster: PathBuf,

    /// Scene JSON (buildings, obstacles, alleys). Without it, visibility is
    /// assumed clear and the environment neutral.
    #[arg(long, value_name = "FILE")]
    scene: Option<PathBuf>,

    /// Evaluator configuration JSON.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Named weight preset, applied over the configuration's weights.
    #[arg(long)]
    preset: Option<String>,
}

#[derive(Serialize)]
struct RankReport<'a> {
    ranking: &'a [EvaluationResult],
    statistics: Option<ThreatStatistics>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Rank { inputs, json } => cmd_rank(&inputs, json),
        Command::Select { inputs } => cmd_select(&inputs),
        Command::Demo { seed, count, extent } => cmd_demo(seed, count, extent),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_evaluator(inputs: &Inputs) -> Result<WeightedEvaluator, CliError> {
    let mut config = match &inputs.config {
        Some(path) => {
            info!(path = %path.display(), "loading configuration");
            EvaluatorConfig::from_json(path)?
        }
        None => EvaluatorConfig::default(),
    };
    if let Some(name) = &inputs.preset {
        let weights = WeightVector::preset(name).ok_or_else(|| CliError::UnknownPreset(name.clone()))?;
        config = config.with_weights(weights);
    }

    let terrain = inputs.scene.as_deref().map(load_terrain).transpose()?;
    Ok(WeightedEvaluator::new(config, terrain)?)
}

fn load_terrain(path: &Path) -> Result<Arc<TerrainModel>, CliError> {
    Ok(Arc::new(load_scene(path)?))
}

fn cmd_rank(inputs: &Inputs, json: bool) -> Result<(), CliError> {
    let evaluator = build_evaluator(inputs)?;
    let targets = RosterFile::load(&inputs.roster)?.snapshots();
    let ranking = evaluator.rank(&targets)?;
    let stats = statistics(&ranking);

    if json {
        let report = RankReport {
            ranking: &ranking,
            statistics: stats,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{:>4}  {:>6}  {:>8}  {:>7}  {:>8}  level", "rank", "id", "dist(m)", "score", "accuracy");
    for (i, r) in ranking.iter().enumerate() {
        println!(
            "{:>4}  {:>6}  {:>8.1}  {:>7.3}  {:>8.3}  {}",
            i + 1,
            r.target_id,
            r.distance,
            r.score,
            r.accuracy,
            r.level
        );
    }

    if let Some(s) = stats {
        println!();
        println!(
            "{} targets: {} critical, {} high, {} medium, {} low",
            s.total, s.levels.critical, s.levels.high, s.levels.medium, s.levels.low
        );
        println!(
            "score mean {:.3}  median {:.3}  std {:.3}  range [{:.3}, {:.3}]",
            s.scores.mean, s.scores.median, s.scores.std_dev, s.scores.min, s.scores.max
        );
        for imp in &s.importance {
            println!(
                "  {:<12} weight {:.2}  mean {:.3}  max {:.3}",
                imp.indicator.name(),
                imp.weight,
                imp.mean_contribution,
                imp.max_contribution
            );
        }
    }
    Ok(())
}

fn cmd_select(inputs: &Inputs) -> Result<(), CliError> {
    let orchestrator = Orchestrator::new(build_evaluator(inputs)?);
    let targets = RosterFile::load(&inputs.roster)?.snapshots();
    let selection = orchestrator.select_target(&targets);
    println!("{}", serde_json::to_string_pretty(&selection)?);
    Ok(())
}

fn cmd_demo(seed: u64, count: u32, extent: f64) -> Result<(), CliError> {
    let roster = demo_roster(seed, count, extent)?;
    println!("{}", serde_json::to_string_pretty(&roster)?);
    Ok(())
}
