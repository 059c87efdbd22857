//! QEX - Quantum Ensemble eXclusion
//! Command-line interface for analysing ensembles of quantum states

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use qex_core::{BasesDocument, EnsembleDocument};
use qex_exclusion::{ExclusionConfig, ExclusionSolver};
use qex_props::schmidt_rank;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "qex")]
#[command(author = "QEX Contributors")]
#[command(version = "2026.10.16")]
#[command(about = "QEX - conclusive exclusion and structure of quantum ensembles", long_about = None)]
struct Cli {
    /// Solver configuration (TOML); defaults plus QEX_* environment otherwise
    #[arg(short, long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimal conclusive exclusion probability of an ensemble
    Exclude {
        /// Ensemble document (.json or .toml)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Schmidt rank of every state in an ensemble document
    SchmidtRank {
        /// Ensemble document (.json or .toml)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Local dimensions, e.g. "2,3" (overrides `dims` in the document)
        #[arg(short, long, value_name = "A,B", value_parser = parse_dims)]
        dims: Option<(usize, usize)>,
    },

    /// Check whether the bases in a document are mutually unbiased
    Mub {
        /// Bases document (.json or .toml)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qex=info,qex_exclusion=info,qex_props=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Exclude { input } => exclude_command(&input, config, cli.json),
        Commands::SchmidtRank { input, dims } => schmidt_command(&input, dims, &config, cli.json),
        Commands::Mub { input } => mub_command(&input, &config, cli.json),
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ExclusionConfig> {
    match path {
        Some(path) => ExclusionConfig::load(path)
            .with_context(|| format!("loading configuration {}", path.display())),
        None => {
            let config = ExclusionConfig::from_env();
            config.validate().context("QEX_* environment")?;
            Ok(config)
        }
    }
}

fn parse_dims(s: &str) -> Result<(usize, usize), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected A,B but got '{s}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid dimension '{part}': {e}"))
    };
    Ok((parse(a)?, parse(b)?))
}

fn exclude_command(input: &Path, config: ExclusionConfig, json: bool) -> Result<()> {
    let doc = EnsembleDocument::load(input)?;
    let solver = ExclusionSolver::with_config(config)?;

    if !json {
        println!(
            "{} {} states from {}",
            "Solving".green().bold(),
            doc.states.len(),
            input.display().to_string().cyan()
        );
    }

    let report = solver
        .solve(doc.inputs()?, doc.probabilities.as_deref())
        .with_context(|| format!("conclusive exclusion for {}", input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{:>12} {:.10}", "probability".bold(), report.probability);
    println!("{:>12} {}", "status".bold(), report.status);
    if report.fast_path {
        println!("{:>12} single state, no solve", "backend".bold());
    } else {
        println!("{:>12} {} ({} iterations)", "backend".bold(), report.backend, report.iterations);
        println!("{:>12} {:.3e}", "gap".bold(), report.gap);
    }
    if let Some(warning) = &report.warning {
        println!("{} {}", "warning:".yellow().bold(), warning);
    }
    Ok(())
}

fn schmidt_command(
    input: &Path,
    dims: Option<(usize, usize)>,
    config: &ExclusionConfig,
    json: bool,
) -> Result<()> {
    let doc = EnsembleDocument::load(input)?;
    let dims = dims.or(doc.dims.map(|[a, b]| (a, b)));

    let mut ranks = Vec::with_capacity(doc.states.len());
    for (index, state) in doc.inputs()?.iter().enumerate() {
        let rank = schmidt_rank(state, dims, &config.tolerances)
            .with_context(|| format!("state {index}"))?;
        ranks.push(rank);
    }

    if json {
        println!("{}", serde_json::json!({ "schmidt_ranks": ranks }));
        return Ok(());
    }
    for (index, rank) in ranks.iter().enumerate() {
        let verdict = if *rank > 1 {
            "entangled".magenta()
        } else {
            "product".normal()
        };
        println!("{:>6} {:>3}  {}", format!("#{index}").bold(), rank, verdict);
    }
    Ok(())
}

fn mub_command(input: &Path, config: &ExclusionConfig, json: bool) -> Result<()> {
    let doc = BasesDocument::load(input)?;
    let bases = doc.vectors();
    if bases.is_empty() {
        bail!("{} contains no bases", input.display());
    }
    let unbiased = qex_props::is_mub(&bases, &config.tolerances)?;

    if json {
        println!("{}", serde_json::json!({ "mutually_unbiased": unbiased }));
    } else if unbiased {
        println!("{} {} bases are mutually unbiased", "✓".green().bold(), bases.len());
    } else {
        println!("{} bases are not mutually unbiased", "✗".red().bold());
    }
    Ok(())
}
