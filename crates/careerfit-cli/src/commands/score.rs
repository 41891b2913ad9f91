//! The `careerfit score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use careerfit_core::parser::load_bank;
use careerfit_core::report::{load_responses, AssessmentReport};

use crate::config::load_config_from;
use crate::output::{print_results, save_reports, SaveOptions};

pub fn execute(
    responses_path: PathBuf,
    bank_path: Option<PathBuf>,
    output: Option<PathBuf>,
    save: bool,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let save_options = SaveOptions::resolve(&config, output, save, format)?;
    let bank = load_bank(config.bank_path(bank_path).as_deref())?;
    let data = load_responses(&responses_path)?;

    let report = AssessmentReport::build(&bank, &data)
        .with_context(|| format!("cannot score {}", responses_path.display()))?;

    let mut out = std::io::stdout().lock();
    print_results(&report, &mut out)?;

    if let Some(options) = save_options {
        for path in save_reports(&report, &options)? {
            eprintln!("Report saved to: {}", path.display());
        }
    }

    Ok(())
}
