use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{result_of, scalar_text, schedule_rows};

/// Format output as tables using the tabled crate: headline fields first,
/// then any per-period schedule, then warnings and methodology.
pub fn print_table(value: &Value) {
    let result = result_of(value);

    match result {
        Value::Object(map) => {
            println!("{}", field_table(map));
            if let Some((key, rows)) = schedule_rows(result) {
                println!("\n{}:", key);
                println!("{}", row_table(rows));
            }
        }
        Value::Array(arr) => println!("{}", row_table(arr)),
        _ => println!("{}", scalar_text(result, "null")),
    }

    if let Some(envelope) = value.as_object() {
        print_envelope_notes(envelope);
    }
}

/// Two-column table of scalar fields; schedule arrays are shown separately.
fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        let is_schedule = matches!(val, Value::Array(rows) if rows.first().is_some_and(Value::is_object));
        if !is_schedule {
            builder.push_record([key.as_str(), &scalar_text(val, "null")]);
        }
    }
    builder.build()
}

fn row_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    if let Some(Value::Object(first)) = rows.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        builder.push_record(headers.clone());
        for item in rows {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(|v| scalar_text(v, "null")).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
    } else {
        for item in rows {
            builder.push_record([scalar_text(item, "null")]);
        }
    }
    builder.build()
}

fn print_envelope_notes(envelope: &Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
