//! Plan evaluation command

use clap::Args;
use colored::*;
use serde_json::Value;
use stratos_evaluator::StratosEvaluator;
use stratos_genome::score_population;
use stratos_types::EvaluationReport;

use super::{population_from_value, read_json};
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{colorize_score, print_output, print_single, OutputFormat, PlanRow};

/// Arguments for `stratos evaluate`
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Plan JSON file, or `-` for stdin. An array is ranked.
    pub plan: String,
}

/// Execute the evaluate command
pub fn execute(
    args: EvaluateArgs,
    config: &CliConfig,
    domain: &str,
    format: OutputFormat,
) -> CliResult<()> {
    let weights = config.resolve_weights(domain)?;
    let evaluator = StratosEvaluator::new().with_weights(weights);

    match read_json(&args.plan)? {
        value @ Value::Array(_) => {
            let population = population_from_value(value)?;
            let ranked = score_population(&population, &evaluator);
            print_output(PlanRow::from_ranked(&ranked), format)
        }
        value => {
            let report = evaluator.evaluate_value(&value);
            match format {
                OutputFormat::Table => {
                    print_report(&report);
                    Ok(())
                }
                _ => print_single(&report, format),
            }
        }
    }
}

fn print_report(report: &EvaluationReport) {
    println!("Score: {}", colorize_score(report.score));

    println!("\nFindings:");
    for finding in &report.findings {
        println!("  {}", finding.dimmed());
    }

    println!("\nRecommendations:");
    for rec in &report.recommendations {
        println!("  • {}", rec);
    }
}
