//! Schema-on-read access to spec result rows.
//!
//! Rows arrive as JSON objects with an open column set. The schema is
//! derived once per spec from the first record's key order; rows missing a
//! column read as null rather than erroring.

use serde_json::Value;

use crate::spec::Record;

/// Column names in the first record's natural key order.
/// Empty input yields an empty column list.
pub fn columns(rows: &[Record]) -> Vec<String> {
    rows.first()
        .map(|r| r.keys().cloned().collect())
        .unwrap_or_default()
}

/// Coerce a scalar cell to a finite number.
///
/// Numbers pass through; strings are trimmed and parsed. Booleans, nulls
/// and non-finite parses all fail with None. Callers decide whether a
/// failed row is dropped or an error.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let num = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    num.is_finite().then_some(num)
}

/// Render a cell for display. Null or absent cells become the empty string;
/// strings are shown without quotes.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_columns_from_first_record() {
        let rows = vec![
            record(json!({"year": 2020, "valuation": 1.5})),
            record(json!({"valuation": 2.0, "year": 2021})),
        ];
        assert_eq!(columns(&rows), vec!["year", "valuation"]);
        assert!(columns(&[]).is_empty());
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(42)), Some(42.0));
        assert_eq!(coerce_number(&json!(-1.5)), Some(-1.5));
        assert_eq!(coerce_number(&json!("  3.25 ")), Some(3.25));
        assert_eq!(coerce_number(&json!("abc")), None);
        assert_eq!(coerce_number(&json!(true)), None);
        assert_eq!(coerce_number(&json!(null)), None);
        assert_eq!(coerce_number(&json!("NaN")), None);
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(Some(&json!("SpaceX"))), "SpaceX");
        assert_eq!(cell_text(Some(&json!(12.5))), "12.5");
        assert_eq!(cell_text(Some(&json!(false))), "false");
        assert_eq!(cell_text(Some(&json!(null))), "");
        assert_eq!(cell_text(None), "");
    }
}
