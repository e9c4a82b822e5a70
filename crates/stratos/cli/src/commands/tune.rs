//! Weight tuning command

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use stratos_evaluator::{read_feedback, FactorWeights, WeightTuner, DEFAULT_FEEDBACK_LIMIT};

use crate::config::{CliConfig, DomainProfile};
use crate::error::{CliError, CliResult};
use crate::output::{print_info, print_single, print_success, print_warning, OutputFormat};

/// Arguments for `stratos tune-weights`
#[derive(Args, Debug)]
pub struct TuneArgs {
    /// JSON Lines feedback file (`{"user_score": 0-100}` per line)
    #[arg(short, long)]
    pub feedback: PathBuf,

    /// Most recent feedback records to consider
    #[arg(long, default_value_t = DEFAULT_FEEDBACK_LIMIT)]
    pub limit: usize,

    /// Learning rate
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Show the proposal without writing the profile
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
struct TuneReport {
    domain: String,
    feedback_count: usize,
    old_weights: FactorWeights,
    new_weights: FactorWeights,
    applied: bool,
}

/// Execute the tune-weights command
pub fn execute(
    args: TuneArgs,
    config: &CliConfig,
    domain: &str,
    format: OutputFormat,
) -> CliResult<()> {
    let mut profile = DomainProfile::load(&config.profiles_root, domain)?.ok_or_else(|| {
        CliError::NotFound(
            DomainProfile::path_for(&config.profiles_root, domain)
                .display()
                .to_string(),
        )
    })?;

    if !args.feedback.exists() {
        return Err(CliError::NotFound(args.feedback.display().to_string()));
    }
    let reader = BufReader::new(File::open(&args.feedback)?);
    let feedback = read_feedback(reader, Some(args.limit))?;
    if feedback.is_empty() {
        print_warning("No usable feedback records; weights left unchanged");
        return Ok(());
    }

    let mut tuner = WeightTuner::new();
    if let Some(alpha) = args.learning_rate {
        tuner = tuner.with_learning_rate(alpha);
    }

    let old_weights = profile.tuning_weights();
    let new_weights = tuner.propose(&old_weights, &feedback);

    let applied = !args.dry_run;
    if applied {
        profile.set_weights(&new_weights)?;
        let backup = profile.save_with_backup()?;
        print_success(&format!(
            "Updated {} (backup: {})",
            profile.path().display(),
            backup.display()
        ));
    }

    let report = TuneReport {
        domain: domain.to_string(),
        feedback_count: feedback.len(),
        old_weights,
        new_weights,
        applied,
    };
    match format {
        OutputFormat::Table => {
            println!("Feedback records: {}", report.feedback_count);
            println!("Old weights: {}", report.old_weights);
            println!("New weights: {}", report.new_weights);
            if !applied {
                print_info("Dry run; profile not modified");
            }
            Ok(())
        }
        _ => print_single(&report, format),
    }
}
