//! careerfit CLI — take the career-fit questionnaire or score saved answers.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use careerfit_core::model::Section;

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "careerfit", version, about = "Career-fit questionnaire and scorer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the assessment interactively
    Take {
        /// Question bank TOML (default: built-in Clinical Data Analyst bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// JSON responses used to pre-populate answers
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Save reports to this directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Save reports to the configured output directory
        #[arg(long)]
        save: bool,

        /// Report formats: json, html, markdown, all (comma-separated)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a JSON responses file
    Score {
        /// Responses JSON: {"psychometric": {..}, "technical": {..}, "wiscar": {..}}
        responses: PathBuf,

        /// Question bank TOML (default: built-in Clinical Data Analyst bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Save reports to this directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Save reports to the configured output directory
        #[arg(long)]
        save: bool,

        /// Report formats: json, html, markdown, all (comma-separated)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Print the questions of a bank
    Show {
        /// Only this section: psychometric, technical, wiscar
        section: Option<Section>,

        /// Question bank TOML (default: built-in Clinical Data Analyst bank)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Mark correct answers and show explanations
        #[arg(long)]
        reveal: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("careerfit=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            bank,
            answers,
            output,
            save,
            format,
            config,
        } => commands::take::execute(bank, answers, output, save, format, config),
        Commands::Score {
            responses,
            bank,
            output,
            save,
            format,
            config,
        } => commands::score::execute(responses, bank, output, save, format, config),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Show {
            section,
            bank,
            reveal,
            config,
        } => commands::show::execute(bank, section, reveal, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
