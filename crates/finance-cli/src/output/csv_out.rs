use serde_json::Value;
use std::io;

use super::{result_of, scalar_text, schedule_rows};

/// Write output as CSV to stdout.
///
/// Schedules (amortization, depreciation) are written one row per period;
/// anything else as two-column `field,value` records.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let _ = write_csv(&mut wtr, value);
    let _ = wtr.flush();
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) -> csv::Result<()> {
    let result = result_of(value);

    if let Some((_, rows)) = schedule_rows(result) {
        return write_rows(wtr, rows);
    }

    match result {
        Value::Object(map) => {
            wtr.write_record(["field", "value"])?;
            for (key, val) in map {
                wtr.write_record([key.as_str(), &scalar_text(val, "")])?;
            }
        }
        Value::Array(arr) => write_rows(wtr, arr)?,
        _ => wtr.write_record([&scalar_text(result, "")])?,
    }
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            wtr.write_record([&scalar_text(item, "")])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    wtr.write_record(&headers)?;
    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(|v| scalar_text(v, "")).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_csv(&mut wtr, value).unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_schedule_written_per_period() {
        let value = json!({
            "result": {
                "periods": [
                    {"period": 1, "depreciation": "2250"},
                    {"period": 2, "depreciation": "2250"},
                ],
                "total_depreciation": "4500",
            }
        });
        let out = render(&value);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("period"));
    }

    #[test]
    fn test_scalar_result_is_field_value() {
        let value = json!({"result": {"wacc": "4.9"}});
        assert_eq!(render(&value), "field,value\nwacc,4.9\n");
    }
}
