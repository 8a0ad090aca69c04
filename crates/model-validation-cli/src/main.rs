mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::classification::{ClassificationReportArgs, RocArgs};
use commands::goodness_of_fit::HosmerLemeshowArgs;

/// Validation diagnostics for binary classification models
#[derive(Parser)]
#[command(
    name = "mva",
    version,
    about = "Validation diagnostics for binary classification models",
    long_about = "A CLI for validating binary classification models against \
                  their scored observations: the Hosmer-Lemeshow goodness-of-fit \
                  test with its decile-of-risk table, confusion-matrix \
                  classification reports, and ROC/AUC discrimination metrics."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Hosmer-Lemeshow goodness-of-fit test over scored observations
    HosmerLemeshow(HosmerLemeshowArgs),
    /// Confusion matrix and precision/recall/F1 report at a threshold
    ClassificationReport(ClassificationReportArgs),
    /// ROC curve and area under it
    Roc(RocArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::HosmerLemeshow(args) => commands::goodness_of_fit::run_hosmer_lemeshow(args),
        Commands::ClassificationReport(args) => {
            commands::classification::run_classification_report(args)
        }
        Commands::Roc(args) => commands::classification::run_roc(args),
        Commands::Version => {
            println!("mva {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
