//! procscope CLI tool.
//!
//! Mines event logs and analyses process graphs, printing JSON to stdout.

use anyhow::Context;
use clap::{Parser, Subcommand};
use procscope::advisor::strategy::OptimizationStrategy;
use procscope::catalog::{domains, engines_in, total_engine_count};
use procscope::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "procscope")]
#[command(version, about = "Process mining and process-model analysis", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML configuration file (defaults to PROCSCOPE_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Optimization strategy, overrides the configuration
    #[arg(short, long, global = true)]
    strategy: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mine a process graph from an event log
    Mine {
        /// JSON array of events
        events: PathBuf,
    },

    /// Analyse a process graph
    Analyze {
        /// JSON process graph
        graph: PathBuf,
    },

    /// Mine an event log and analyse the result
    Run {
        /// JSON array of events
        events: PathBuf,
    },

    /// List optimization strategies and their rules
    Strategies,

    /// List engines by domain
    Engines,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging = logging.with_level(LogLevel::Debug);
    }
    logging.init()?;

    tracing::debug!(
        environment = %config.environment,
        strategy = %config.analysis.strategy,
        "Loaded configuration"
    );

    match &cli.command {
        Commands::Mine { events } => cmd_mine(events, &config, cli.pretty),
        Commands::Analyze { graph } => cmd_analyze(graph, &config, cli.pretty),
        Commands::Run { events } => cmd_run(events, &config, cli.pretty),
        Commands::Strategies => cmd_strategies(cli.pretty),
        Commands::Engines => cmd_engines(cli.pretty),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<ProcscopeConfig> {
    let mut config = match &cli.config {
        Some(path) => ProcscopeConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ProcscopeConfig::from_env()?,
    };
    if let Some(strategy) = &cli.strategy {
        config = config.with_strategy(strategy.clone());
    }
    config.validate()?;
    Ok(config)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

fn cmd_mine(path: &Path, config: &ProcscopeConfig, pretty: bool) -> anyhow::Result<()> {
    let events: Vec<Event> = read_json(path)?;
    let discovery = discover(&events, config)?;
    print_json(&discovery, pretty)
}

fn cmd_analyze(path: &Path, config: &ProcscopeConfig, pretty: bool) -> anyhow::Result<()> {
    let graph: ProcessGraph = read_json(path)?;
    let analysis = analyze(&graph, config)?;
    print_json(&analysis, pretty)
}

#[derive(Serialize)]
struct RunOutput {
    discovery: Discovery,
    analysis: AnalysisResult,
}

fn cmd_run(path: &Path, config: &ProcscopeConfig, pretty: bool) -> anyhow::Result<()> {
    let events: Vec<Event> = read_json(path)?;
    let (discovery, analysis) = mine_and_analyze(&events, config)?;
    print_json(&RunOutput { discovery, analysis }, pretty)
}

#[derive(Serialize)]
struct StrategyInfo {
    name: &'static str,
    rules: Vec<&'static str>,
}

fn strategy_table() -> Vec<StrategyInfo> {
    OptimizationStrategy::ALL
        .iter()
        .map(|s| StrategyInfo {
            name: s.as_str(),
            rules: s.rule_ids(),
        })
        .collect()
}

fn cmd_strategies(pretty: bool) -> anyhow::Result<()> {
    print_json(&strategy_table(), pretty)
}

#[derive(Serialize)]
struct DomainEngines {
    domain: Domain,
    name: &'static str,
    crate_name: &'static str,
    engines: Vec<EngineMetadata>,
}

fn cmd_engines(pretty: bool) -> anyhow::Result<()> {
    let listing: Vec<DomainEngines> = domains()
        .into_iter()
        .map(|info| DomainEngines {
            domain: info.domain,
            name: info.name,
            crate_name: info.crate_name,
            engines: engines_in(info.domain),
        })
        .collect();

    tracing::debug!(total = total_engine_count(), "Listing engines");
    print_json(&listing, pretty)
}
