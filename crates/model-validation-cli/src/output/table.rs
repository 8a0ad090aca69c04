use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Render a result as human-readable tables: top-level scalars first, then
/// one table per nested object or collection.
///
/// Statistics are shown to two decimal places; the JSON and CSV formats
/// carry full precision.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            print_field_table(map);
            for (key, val) in map {
                match val {
                    Value::Object(nested) => {
                        println!("\n{}:", key);
                        print_field_table(nested);
                    }
                    Value::Array(items) if items.iter().all(Value::is_object) => {
                        if items.is_empty() {
                            continue;
                        }
                        println!("\n{}:", key);
                        if key == "groups" {
                            print_group_table(items);
                        } else {
                            print_record_table(items);
                        }
                    }
                    _ => {}
                }
            }
        }
        Value::Array(items) => print_record_table(items),
        _ => println!("{}", value),
    }
}

/// Field/Value table of an object's scalar entries.
fn print_field_table(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if !val.is_object() && !val.is_array() {
            builder.push_record([key.as_str(), &format_cell(val)]);
        }
    }
    println!("{}", Table::from(builder));
}

/// The decile-of-risk table: observed and expected counts per group.
fn print_group_table(groups: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record(["group", "n", "obs_pos", "obs_neg", "exp_pos", "exp_neg"]);
    for (index, group) in groups.iter().enumerate() {
        let field = |name: &str| {
            group
                .get(name)
                .map(format_cell)
                .unwrap_or_default()
        };
        builder.push_record([
            (index + 1).to_string(),
            field("n"),
            field("observed_positive"),
            field("observed_negative"),
            field("expected_positive"),
            field("expected_negative"),
        ]);
    }
    println!("{}", Table::from(builder));
}

/// Generic table over an array of uniform objects (e.g. ROC points).
fn print_record_table(items: &[Value]) {
    let Some(Value::Object(first)) = items.first() else {
        for item in items {
            println!("{}", format_cell(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in items {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_cell).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

fn format_cell(value: &Value) -> String {
    match value {
        Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                if n.is_u64() || n.is_i64() {
                    n.to_string()
                } else {
                    format!("{:.2}", f)
                }
            } else {
                n.to_string()
            }
        }
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
