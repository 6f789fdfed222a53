//! Free-text filtering of rows.

use serde_json::Value;

use crate::client::Row;

/// String form of a field value used for matching. `None` for null.
fn searchable(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// True if the lowercased `term` occurs in any non-null field. An empty
/// term matches every row.
pub fn matches(row: &Row, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    row.values()
        .filter_map(searchable)
        .any(|value| value.to_lowercase().contains(&term))
}

/// Rows matching `term`, in their original order.
pub fn filter_rows(rows: &[Row], term: &str) -> Vec<Row> {
    rows.iter().filter(|row| matches(row, term)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn empty_term_matches_everything() {
        assert!(matches(&row(json!({})), ""));
        assert!(matches(&row(json!({"name": "A"})), "   "));
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let r = row(json!({"id": 42, "name": "Ann Lee", "email": "ann@X.com", "bedrooms": null}));
        assert!(matches(&r, "ann"));
        assert!(matches(&r, "X.COM"));
        assert!(matches(&r, "42"));
        assert!(!matches(&r, "bob"));
    }

    #[test]
    fn null_fields_never_match() {
        assert!(!matches(&row(json!({"rooms": null})), "null"));
    }

    #[test]
    fn filter_preserves_order() {
        let rows = vec![
            row(json!({"name": "house two"})),
            row(json!({"name": "flat"})),
            row(json!({"name": "house one"})),
        ];
        let names: Vec<_> = filter_rows(&rows, "house")
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["house two", "house one"]);
    }
}
