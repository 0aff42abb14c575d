use serde_json::Value;

use super::{result_of, scalar_text};

/// Headline fields, most specific first.
const PRIORITY_KEYS: [&str; 6] = [
    "xirr",
    "irr",
    "npv",
    "payment",
    "wacc",
    "total_depreciation",
];

/// Print just the headline number of a result.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(value));
}

fn headline(value: &Value) -> String {
    let result = result_of(value);

    if let Value::Object(map) = result {
        // A null xirr on an undated appraisal should fall through to irr
        if let Some(val) = PRIORITY_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find(|val| !val.is_null())
        {
            return scalar_text(val, "null");
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, scalar_text(val, "null"));
        }
    }

    scalar_text(result, "null")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_skips_null_xirr() {
        let value = json!({"result": {"npv": "80015.03", "irr": "18.83", "xirr": null}});
        assert_eq!(headline(&value), "18.83");
    }

    #[test]
    fn test_falls_back_to_first_field() {
        let value = json!({"result": {"converged": false}});
        assert_eq!(headline(&value), "converged: false");
    }
}
