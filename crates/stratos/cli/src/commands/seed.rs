//! Template seeding command

use std::path::PathBuf;

use clap::Args;

use crate::error::CliResult;
use crate::output::{print_single, print_success, OutputFormat};
use crate::template::template_plan;

/// Arguments for `stratos seed`
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Free-text goal placed in the plan title
    #[arg(short, long, default_value = "")]
    pub input: String,

    /// Write the plan to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Execute the seed command
pub fn execute(args: SeedArgs, domain: &str, format: OutputFormat) -> CliResult<()> {
    let plan = template_plan(domain, &args.input);

    match args.out {
        Some(path) => {
            std::fs::write(&path, serde_json::to_string_pretty(&plan)?)?;
            print_success(&format!("Template plan written to {}", path.display()));
            Ok(())
        }
        None => print_single(&plan, format),
    }
}
