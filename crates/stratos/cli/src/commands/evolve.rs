//! Population evolution command

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stratos_evaluator::StratosEvaluator;
use stratos_genome::{EvolutionConfig, GenerationEngine, JsonFileSink};
use stratos_types::PlanRecord;
use tracing::info;

use super::{population_from_value, read_json};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{print_info, print_output, print_success, OutputFormat, PlanRow};
use crate::template::template_plan;

/// Arguments for `stratos evolve`
#[derive(Args, Debug)]
pub struct EvolveArgs {
    /// Seed population JSON (array or single plan); a template plan when omitted
    #[arg(short, long)]
    pub population: Option<String>,

    /// Goal text for the template plan
    #[arg(short, long, default_value = "")]
    pub input: String,

    /// Number of generations to run
    #[arg(short, long, default_value_t = 1)]
    pub generations: u32,

    /// RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Elites kept per generation
    #[arg(long)]
    pub survivors: Option<usize>,

    /// Children bred per generation
    #[arg(long)]
    pub offspring: Option<usize>,

    /// Mutation probability gate
    #[arg(long)]
    pub mutation_rate: Option<f64>,

    /// Minimum score to enter the parent pool
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Skip writing generation summaries
    #[arg(long)]
    pub no_save: bool,

    /// Write the final population to a JSON file
    #[arg(long)]
    pub out: Option<PathBuf>,
}

impl EvolveArgs {
    /// Apply command-line overrides on top of the configured settings.
    pub fn evolution_config(&self, base: &EvolutionConfig) -> CliResult<EvolutionConfig> {
        let mut cfg = base.clone();
        if let Some(survivors) = self.survivors {
            cfg.survivors = survivors;
        }
        if let Some(offspring) = self.offspring {
            cfg.offspring = offspring;
        }
        if let Some(rate) = self.mutation_rate {
            if !(0.0..=1.0).contains(&rate) {
                return Err(CliError::InvalidInput(format!(
                    "mutation rate must be within [0, 1], got {}",
                    rate
                )));
            }
            cfg.mutation_rate = rate;
        }
        if let Some(threshold) = self.threshold {
            cfg.discard_threshold = threshold;
        }
        Ok(cfg)
    }
}

/// Execute the evolve command
pub fn execute(
    args: EvolveArgs,
    config: &CliConfig,
    domain: &str,
    format: OutputFormat,
) -> CliResult<()> {
    let seed_population: Vec<PlanRecord> = match &args.population {
        Some(path) => population_from_value(read_json(path)?)?,
        None => vec![template_plan(domain, &args.input)],
    };

    let evaluator = StratosEvaluator::new().with_weights(config.resolve_weights(domain)?);
    let mut engine = GenerationEngine::new(domain, args.evolution_config(&config.evolution)?);
    if !args.no_save {
        engine = engine.with_sink(Arc::new(JsonFileSink::new(&config.output_root)));
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(
        domain,
        seed_population = seed_population.len(),
        generations = args.generations,
        "Starting evolution"
    );
    let outcomes = engine.run(&seed_population, &evaluator, &mut rng, args.generations)?;

    let Some(last) = outcomes.last() else {
        return Err(CliError::InvalidInput("no generation was evolved".into()));
    };

    if let Some(path) = &args.out {
        std::fs::write(path, serde_json::to_string_pretty(&last.next_population)?)?;
        print_success(&format!(
            "{} plans written to {}",
            last.population_size(),
            path.display()
        ));
    }

    if matches!(format, OutputFormat::Table) {
        if let Some(best) = last.best() {
            print_info(&format!(
                "Generation {}: best {:.1} ({})",
                last.generation, best.score, best.plan.title
            ));
        }
    }
    print_output(PlanRow::from_ranked(&last.scored), format)
}
