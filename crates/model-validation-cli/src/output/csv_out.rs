use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// Results that carry a per-group or per-point collection emit that
/// collection as the CSV body; anything else becomes field,value rows with
/// dotted keys for nested objects. Numbers keep full precision.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let collection = map.get("groups").or_else(|| map.get("points"));
            if let Some(Value::Array(rows)) = collection {
                write_records(&mut wtr, rows);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                write_fields(&mut wtr, "", map);
            }
        }
        Value::Array(rows) => write_records(&mut wtr, rows),
        _ => {
            let _ = wtr.write_record([&scalar_string(value)]);
        }
    }

    let _ = wtr.flush();
}

/// field,value rows; nested objects flatten with dotted keys.
fn write_fields(
    wtr: &mut csv::Writer<io::StdoutLock<'_>>,
    prefix: &str,
    map: &serde_json::Map<String, Value>,
) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match val {
            Value::Object(nested) => write_fields(wtr, &name, nested),
            Value::Array(_) => {}
            _ => {
                let _ = wtr.write_record([name.as_str(), &scalar_string(val)]);
            }
        }
    }
}

/// One CSV row per object, headers from the first.
fn write_records(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            let _ = wtr.write_record([&scalar_string(row)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);
    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(scalar_string).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
