pub mod csv_out;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => print_minimal(value),
    }
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Print just the headline number of a result, full precision.
fn print_minimal(value: &Value) {
    const PRIORITY_KEYS: [&str; 4] = ["chi_square", "auc", "accuracy", "p_value"];

    if let Value::Object(map) = value {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key) {
                if !val.is_null() {
                    println!("{}", val);
                    return;
                }
            }
        }
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, val);
            return;
        }
    }
    println!("{}", value);
}
