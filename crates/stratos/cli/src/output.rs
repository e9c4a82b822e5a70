//! Output formatting utilities

use crate::error::CliResult;
use colored::*;
use serde::Serialize;
use stratos_types::ScoredPlan;
use tabled::{Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// One ranked population member as a table row.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct PlanRow {
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[tabled(rename = "Score")]
    pub score: f64,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Objectives")]
    pub objectives: usize,
    #[tabled(rename = "Modules")]
    pub modules: usize,
    #[tabled(rename = "Flow")]
    pub flow: String,
}

impl PlanRow {
    /// Rows for an already ranked population.
    pub fn from_ranked(ranked: &[ScoredPlan]) -> Vec<Self> {
        ranked
            .iter()
            .enumerate()
            .map(|(i, s)| Self {
                rank: i + 1,
                score: s.score,
                title: s.plan.title.clone(),
                objectives: s.plan.objectives.len(),
                modules: s.plan.modules.len(),
                flow: s.plan.flow.join(" → "),
            })
            .collect()
    }
}

/// Print a vector of items in the specified format
pub fn print_output<T: Serialize + Tabled>(data: Vec<T>, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("{}", "No results".dimmed());
            } else {
                println!("{}", Table::new(data));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&data)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&data)?),
    }
    Ok(())
}

/// Print a single item in the specified format
pub fn print_single<T: Serialize>(data: &T, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table | OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?)
        }
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(data)?),
    }
    Ok(())
}

/// Colorize a 0-100 score.
pub fn colorize_score(score: f64) -> ColoredString {
    let text = format!("{:.1}", score);
    if score >= 75.0 {
        text.green()
    } else if score >= 60.0 {
        text.yellow()
    } else {
        text.red()
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}
