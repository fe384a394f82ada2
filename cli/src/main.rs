use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use canvas::analysis::{FishboneAnalysis, sample_analysis};
use canvas::camera::Transform;
use canvas::doc::DocError;
use canvas::engine::EngineCore;
use canvas::fishbone::{Category, FishboneLayout, LayoutParams};
use clap::{Parser, Subcommand};
use tracing::{Level, info};

mod config;
mod script;

use config::ConfigArgs;
use script::ScriptEvent;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Doc(#[from] DocError),
    #[error("script step {step}: no element at index {index}")]
    NoSuchElement { step: usize, index: usize },
}

#[derive(Parser, Debug)]
#[command(name = "studio", about = "Canvas editor core: session replay and fishbone rendering")]
struct Cli {
    /// Log state transitions at debug level.
    #[arg(long, short, global = true, env = "STUDIO_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON list of session events and print the final scene.
    Replay {
        script: PathBuf,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the fishbone diagram as SVG.
    Fishbone {
        /// Analysis JSON file. Defaults to the built-in sample.
        #[arg(long, env = "STUDIO_ANALYSIS")]
        analysis: Option<PathBuf>,
        /// Horizontal distance between branch columns.
        #[arg(long)]
        spacing: Option<f64>,
        /// Minimum spine length.
        #[arg(long)]
        spine_length: Option<f64>,
    },
    /// List the cause categories and their icons.
    Categories,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_writer(io::stderr).with_max_level(level).init();

    match cli.command {
        Command::Replay { script, config } => run_replay(&script, &config),
        Command::Fishbone { analysis, spacing, spine_length } => {
            run_fishbone(analysis.as_deref(), spacing, spine_length)
        }
        Command::Categories => {
            for c in Category::ALL {
                println!("{}\t{}", c.label(), c.icon());
            }
            Ok(())
        }
    }
}

fn run_replay(path: &Path, args: &ConfigArgs) -> Result<(), CliError> {
    let config = config::resolve(args)?;
    let events: Vec<ScriptEvent> = serde_json::from_str(&read(path)?)?;
    info!(events = events.len(), path = %path.display(), "replaying session");

    let mut core = EngineCore::with_config(config);
    let actions = script::replay(&mut core, &events)?;
    info!(actions = actions.len(), elements = core.doc().len(), "replay finished");

    println!("{}", serde_json::to_string_pretty(&core.scene())?);
    Ok(())
}

fn run_fishbone(analysis: Option<&Path>, spacing: Option<f64>, spine_length: Option<f64>) -> Result<(), CliError> {
    let analysis: FishboneAnalysis = match analysis {
        Some(path) => serde_json::from_str(&read(path)?)?,
        None => sample_analysis(),
    };
    let defaults = LayoutParams::default();
    let params = LayoutParams {
        branch_spacing: spacing.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(defaults.branch_spacing),
        spine_length: spine_length.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(defaults.spine_length),
        ..defaults
    };
    info!(causes = analysis.causes.len(), "rendering fishbone");

    let layout = FishboneLayout::compute(&Category::ALL, &params);
    print!("{}", layout.to_svg(Some(&analysis), &Transform::default()));
    Ok(())
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })
}
