//! taueval CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "taueval")]
#[command(about = "taueval - plot artifacts for tau classifier evaluation")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Visualization artifacts (plot-friendly JSON)
    Viz {
        #[command(subcommand)]
        command: VizCommands,
    },

    /// Print version information
    Version,
}

#[derive(Subcommand)]
enum VizCommands {
    /// ROC curve artifact from a signal/background histogram pair
    Roc {
        /// Input histograms (JSON: {"signal": [...], "background": [...]},
        /// same binning with under/overflow included)
        #[arg(short, long)]
        input: PathBuf,

        /// Attach one-sigma Clopper-Pearson error bands
        #[arg(long)]
        with_errors: bool,

        /// Output file for the artifact (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decay-mode migration matrix artifact
    DmMigration {
        /// Input counts (JSON: {"counts": [[...]], optional "gen_labels"
        /// and "reco_labels"}), counts indexed [reco][gen]
        #[arg(short, long)]
        input: PathBuf,

        /// Keep raw counts instead of column-normalised probabilities
        #[arg(long)]
        raw_counts: bool,

        /// Output file for the artifact (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Viz { command } => match command {
            VizCommands::Roc { input, with_errors, output } => {
                cmd_viz_roc(&input, with_errors, output.as_ref())
            }
            VizCommands::DmMigration { input, raw_counts, output } => {
                cmd_viz_dm_migration(&input, raw_counts, output.as_ref())
            }
        },
        Commands::Version => {
            println!("taueval {}", te_core::VERSION);
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct HistogramPairJson {
    signal: Vec<f64>,
    background: Vec<f64>,
}

fn cmd_viz_roc(input: &PathBuf, with_errors: bool, output: Option<&PathBuf>) -> Result<()> {
    tracing::info!(path = %input.display(), "loading histogram pair");
    let json = std::fs::read_to_string(input)?;
    let hists: HistogramPairJson = serde_json::from_str(&json)?;

    let artifact = te_viz::roc_artifact(&hists.signal, &hists.background, with_errors)?;
    if artifact.is_empty() {
        tracing::warn!(
            total_signal = artifact.total_signal,
            total_background = artifact.total_background,
            "ROC curve is empty: no threshold separated the distributions"
        );
    } else {
        tracing::info!(points = artifact.len(), reversed = artifact.reversed, "ROC curve built");
    }

    write_json(output, serde_json::to_value(artifact)?)
}

#[derive(Debug, Clone, Deserialize)]
struct MigrationCountsJson {
    counts: Vec<Vec<f64>>,
    #[serde(default)]
    gen_labels: Option<Vec<String>>,
    #[serde(default)]
    reco_labels: Option<Vec<String>>,
}

fn cmd_viz_dm_migration(input: &PathBuf, raw_counts: bool, output: Option<&PathBuf>) -> Result<()> {
    tracing::info!(path = %input.display(), "loading migration counts");
    let json = std::fs::read_to_string(input)?;
    let m: MigrationCountsJson = serde_json::from_str(&json)?;

    let gen_labels = m.gen_labels.unwrap_or_else(te_viz::migration::default_gen_labels);
    let reco_labels = m.reco_labels.unwrap_or_else(te_viz::migration::default_reco_labels);

    let artifact =
        te_viz::DmMigrationArtifact::new(m.counts, gen_labels, reco_labels, !raw_counts)?;

    write_json(output, serde_json::to_value(artifact)?)
}

fn write_json(output: Option<&PathBuf>, value: serde_json::Value) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
