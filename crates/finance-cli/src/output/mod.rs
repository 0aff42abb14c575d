pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` object of an envelope, or the value itself.
pub(crate) fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// The first field of `result` holding a non-empty array of objects:
/// the per-period rows of a schedule.
pub(crate) fn schedule_rows(result: &Value) -> Option<(&str, &[Value])> {
    result.as_object()?.iter().find_map(|(key, val)| match val {
        Value::Array(rows) if rows.first().is_some_and(Value::is_object) => {
            Some((key.as_str(), rows.as_slice()))
        }
        _ => None,
    })
}

/// Render a scalar for human-facing output. Strings print unquoted.
pub(crate) fn scalar_text(value: &Value, null: &str) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => null.to_string(),
        Value::Array(arr) => arr
            .iter()
            .map(|v| scalar_text(v, null))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schedule_rows_finds_period_table() {
        let value = json!({
            "result": {
                "payment": "400.76",
                "periods": [{"period": 1, "balance": "19724.24"}],
            }
        });
        let (key, rows) = schedule_rows(result_of(&value)).unwrap();
        assert_eq!(key, "periods");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_discount_factor_list_is_not_a_schedule() {
        let value = json!({"result": {"discount_factors": ["1", "0.91"]}});
        assert!(schedule_rows(result_of(&value)).is_none());
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&json!("9.71"), "null"), "9.71");
        assert_eq!(scalar_text(&json!(null), ""), "");
        assert_eq!(scalar_text(&json!(["1", "0.91"]), "null"), "1, 0.91");
    }
}
