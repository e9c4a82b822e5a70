//! STRATOS CLI - plan evaluation and evolution
//!
//! This CLI gives planners a terminal interface to:
//! - Score a plan record and read its findings
//! - Seed a template plan for a domain
//! - Evolve a population of plans over several generations
//! - Tune a domain's factor weights from user feedback

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;
mod template;

use commands::{evaluate, evolve, seed, tune};
use config::{CliConfig, ConfigView};
use error::CliResult;

/// STRATOS CLI application
#[derive(Parser)]
#[command(name = "stratos")]
#[command(about = "STRATOS - Strategy plan evaluation and evolution", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "STRATOS_CONFIG")]
    config: Option<String>,

    /// Domain tag (overrides the configured default)
    #[arg(short, long, env = "STRATOS_DOMAIN")]
    domain: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Score a plan record
    #[command(alias = "eval")]
    Evaluate(evaluate::EvaluateArgs),

    /// Generate a template plan
    Seed(seed::SeedArgs),

    /// Evolve a population of plans
    Evolve(evolve::EvolveArgs),

    /// Tune the domain's factor weights from feedback
    TuneWeights(tune::TuneArgs),

    /// Show configuration
    Config,
}

fn main() {
    if let Err(e) = run() {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Logs go to stderr so json/yaml output stays machine-readable
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = CliConfig::load(cli.config.as_deref())?;
    let domain = cli.domain.unwrap_or_else(|| config.domain.clone());

    match cli.command {
        Commands::Evaluate(args) => evaluate::execute(args, &config, &domain, cli.output),
        Commands::Seed(args) => seed::execute(args, &domain, cli.output),
        Commands::Evolve(args) => evolve::execute(args, &config, &domain, cli.output),
        Commands::TuneWeights(args) => tune::execute(args, &config, &domain, cli.output),
        Commands::Config => {
            let view = ConfigView::resolve(&config, &domain)?;
            match cli.output {
                output::OutputFormat::Table => {
                    println!("Domain: {}", view.domain);
                    println!("Weights: {}", view.weights);
                    println!("Output root: {}", config.output_root.display());
                    println!("Profiles root: {}", config.profiles_root.display());
                    let evo = &config.evolution;
                    println!(
                        "Evolution: survivors={} offspring={} mutation_rate={} discard_threshold={}",
                        evo.survivors, evo.offspring, evo.mutation_rate, evo.discard_threshold
                    );
                    Ok(())
                }
                format => output::print_single(&view, format),
            }
        }
    }
}
