//! Field-level diffs between entity snapshots

use serde_json::Value;

/// Describe the top-level fields that differ between two snapshots
///
/// Returns `None` when nothing changed. Bookkeeping timestamps are skipped.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return (before != after)
            .then(|| format!("{} -> {}", format_value(before), format_value(after)));
    };

    let mut changes = Vec::new();

    for (key, before_val) in before_obj {
        if key == "updated_at" {
            continue;
        }
        match after_obj.get(key) {
            Some(after_val) if after_val != before_val => changes.push(format!(
                "{}: {} -> {}",
                key,
                format_value(before_val),
                format_value(after_val)
            )),
            Some(_) => {}
            None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
        }
    }

    for (key, after_val) in after_obj {
        if !before_obj.contains_key(key) {
            changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
        }
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields_only() {
        let before = json!({"amount": 1000, "description": "Lunch"});
        let after = json!({"amount": 1250, "description": "Lunch"});

        let diff = generate_diff(&before, &after).unwrap();
        assert_eq!(diff, "amount: 1000 -> 1250");
    }

    #[test]
    fn test_ignores_updated_at() {
        let before = json!({"amount": 1000, "updated_at": "2025-01-01T00:00:00Z"});
        let after = json!({"amount": 1000, "updated_at": "2025-01-02T00:00:00Z"});
        assert!(generate_diff(&before, &after).is_none());
    }

    #[test]
    fn test_added_and_removed() {
        let before = json!({"category_id": "abc"});
        let after = json!({"recurring_id": "def"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("category_id: \"abc\" -> (removed)"));
        assert!(diff.contains("recurring_id: (added) -> \"def\""));
    }

    #[test]
    fn test_null_to_value() {
        let diff = generate_diff(&json!({"category_id": null}), &json!({"category_id": "x"}));
        assert_eq!(diff.unwrap(), "category_id: null -> \"x\"");
    }

    #[test]
    fn test_non_object_values() {
        assert_eq!(generate_diff(&json!(1), &json!(2)).unwrap(), "1 -> 2");
        assert!(generate_diff(&json!("a"), &json!("a")).is_none());
    }

    #[test]
    fn test_long_strings_truncated() {
        let diff = generate_diff(
            &json!({"description": "a".repeat(100)}),
            &json!({"description": "short"}),
        )
        .unwrap();
        assert!(diff.contains("...\" -> \"short\""));
    }
}
