use clap::Args;
use serde_json::Value;

use model_validation_core::classification::confusion::{
    calculate_classification_report, ClassificationInput,
};
use model_validation_core::classification::roc::{calculate_roc, RocInput};

use crate::input;

#[derive(Args)]
pub struct ClassificationReportArgs {
    /// JSON input file: {"observations": [...], "threshold"?}
    #[arg(long, conflicts_with = "csv")]
    pub input: Option<String>,

    /// CSV observation file with `actual,predicted` columns
    #[arg(long)]
    pub csv: Option<String>,

    /// Decision threshold (overrides the input file)
    #[arg(long)]
    pub threshold: Option<f64>,
}

#[derive(Args)]
pub struct RocArgs {
    /// JSON input file: {"observations": [...]}
    #[arg(long, conflicts_with = "csv")]
    pub input: Option<String>,

    /// CSV observation file with `actual,predicted` columns
    #[arg(long)]
    pub csv: Option<String>,
}

pub fn run_classification_report(
    args: ClassificationReportArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut input_data: ClassificationInput = if let Some(ref path) = args.csv {
        ClassificationInput {
            observations: input::read_observations_csv(path)?,
            threshold: 0.5,
        }
    } else if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json>, --csv <file.csv> or stdin required".into());
    };

    if let Some(threshold) = args.threshold {
        input_data.threshold = threshold;
    }

    let result = calculate_classification_report(&input_data)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_roc(args: RocArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input_data: RocInput = if let Some(ref path) = args.csv {
        RocInput {
            observations: input::read_observations_csv(path)?,
        }
    } else if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json>, --csv <file.csv> or stdin required".into());
    };

    let result = calculate_roc(&input_data)?;
    Ok(serde_json::to_value(result)?)
}
