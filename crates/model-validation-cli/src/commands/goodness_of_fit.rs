use clap::Args;
use serde_json::Value;

use model_validation_core::goodness_of_fit::hosmer_lemeshow::{
    calculate_hosmer_lemeshow, HosmerLemeshowInput, StatisticVariant,
};

use crate::input;

#[derive(Args)]
pub struct HosmerLemeshowArgs {
    /// JSON input file: {"observations": [...], "num_groups"?, "statistic"?}
    #[arg(long, conflicts_with = "csv")]
    pub input: Option<String>,

    /// CSV observation file with `actual,predicted` columns
    #[arg(long)]
    pub csv: Option<String>,

    /// Number of equal-frequency groups (overrides the input file)
    #[arg(long)]
    pub groups: Option<u32>,
}

pub fn run_hosmer_lemeshow(
    args: HosmerLemeshowArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut input_data: HosmerLemeshowInput = if let Some(ref path) = args.csv {
        HosmerLemeshowInput {
            observations: input::read_observations_csv(path)?,
            num_groups: 10,
            statistic: StatisticVariant::default(),
        }
    } else if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json>, --csv <file.csv> or stdin required".into());
    };

    if let Some(groups) = args.groups {
        input_data.num_groups = groups;
    }

    let result = calculate_hosmer_lemeshow(&input_data)?;
    Ok(serde_json::to_value(result)?)
}
