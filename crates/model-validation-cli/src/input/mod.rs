//! Input readers: typed JSON from a file or piped stdin, observation rows
//! from CSV.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use model_validation_core::Observation;

/// Read a JSON file and deserialise into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;
    let value: T = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", resolved.display(), e))?;
    Ok(value)
}

/// One row of an observation CSV file.
#[derive(serde::Deserialize)]
struct ObservationRow {
    actual: u8,
    predicted: f64,
}

/// Read scored observations from a headed CSV file with `actual` and
/// `predicted` columns, in row order.
pub fn read_observations_csv(path: &str) -> Result<Vec<Observation>, Box<dyn std::error::Error>> {
    let resolved = resolve_path(path)?;
    let mut reader = csv::Reader::from_path(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;

    let mut observations = Vec::new();
    for record in reader.deserialize() {
        let row: ObservationRow =
            record.map_err(|e| format!("Failed to parse '{}': {}", resolved.display(), e))?;
        observations.push(Observation::new(row.predicted, row.actual));
    }
    Ok(observations)
}

/// Attempt to read JSON from stdin if data is being piped.
/// Returns None when stdin is a TTY (interactive).
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(trimmed)?))
}

/// Resolve a path against the working directory and require a plain file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !resolved.exists() {
        return Err(format!("File not found: {}", resolved.display()).into());
    }
    if !resolved.is_file() {
        return Err(format!("Not a file: {}", resolved.display()).into());
    }
    Ok(resolved)
}
