use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use triage::commands;
use triage::TriageConfig;

/// Triage - symptom questionnaire browsing and co-occurrence analysis
#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Browse symptom questionnaire answers and analyze which symptoms occur together")]
#[command(version)]
struct Cli {
  #[command(flatten)]
  inputs: Inputs,

  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

/// Input locations, each overriding the configuration file
#[derive(Args)]
struct Inputs {
  /// Questionnaire dataset (CSV with a `summary` column)
  #[arg(long, global = true, env = "TRIAGE_DATA")]
  data: Option<PathBuf>,

  /// Recommendations table (CSV)
  #[arg(long, global = true)]
  recommendations: Option<PathBuf>,

  /// Configuration file path
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
  /// List every symptom that has answers
  Symptoms,
  /// Show grouped answers, treatment history and advice for a symptom
  Browse {
    /// Symptom name as listed by `triage symptoms`
    symptom: String,
  },
  /// Compute co-occurrence, relations, network and similarity artifacts
  Analyze {
    /// Directory for the generated files
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Related symptoms kept per symptom
    #[arg(long)]
    top_n: Option<usize>,
    /// Minimum co-occurrence count for a network edge
    #[arg(long)]
    min_weight: Option<u32>,
    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
  },
  /// Generate a recommendations table prefilled with the default advice
  Template {
    /// Where to write the table (defaults to the configured recommendations path)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Replace an existing file
    #[arg(short, long)]
    force: bool,
  },
}

fn init_logging(verbose: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if verbose {
      EnvFilter::new("debug")
    } else {
      EnvFilter::new("triage=info,warn")
    }
  });

  tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();
}

fn load_config(inputs: &Inputs) -> Result<TriageConfig> {
  let mut config = match &inputs.config {
    Some(path) => TriageConfig::load_from_file(path)
      .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
    None => TriageConfig::load().context("Failed to load configuration")?,
  };

  if let Some(data) = &inputs.data {
    config.dataset = data.clone();
  }
  if let Some(recommendations) = &inputs.recommendations {
    config.recommendations = recommendations.clone();
  }

  Ok(config)
}

fn handle(command: Command, mut config: TriageConfig) -> Result<()> {
  match command {
    Command::Symptoms => commands::list_symptoms(&config),
    Command::Browse { symptom } => commands::browse(&config, &symptom),
    Command::Analyze { output, top_n, min_weight, json } => {
      if let Some(output) = output {
        config.output_dir = output;
      }
      if let Some(top_n) = top_n {
        config.top_n = top_n;
      }
      if let Some(min_weight) = min_weight {
        config.min_weight = min_weight;
      }
      commands::analyze(&config, json)
    }
    Command::Template { output, force } => commands::template(&config, output.as_deref(), force),
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let config = load_config(&cli.inputs)?;
  handle(cli.command, config)
}
