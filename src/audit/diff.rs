//! Field diffs for audit entries

use serde_json::Value;

/// Keys that change on every write and say nothing about the edit
const BOOKKEEPING_KEYS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Describe the top-level fields that differ between two JSON objects
///
/// Returns `None` when nothing but bookkeeping fields changed.
pub fn field_diff(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return (before != after).then(|| format!("{} -> {}", format_value(before), format_value(after)));
    };

    let mut changes = Vec::new();

    for (key, before_val) in before_obj {
        if BOOKKEEPING_KEYS.contains(&key.as_str()) {
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
        if !before_obj.contains_key(key) && !BOOKKEEPING_KEYS.contains(&key.as_str()) {
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
        Value::String(s) if s.chars().count() > 30 => {
            format!("\"{}...\"", s.chars().take(27).collect::<String>())
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields_only() {
        let before = json!({"amount": 1000, "content": "ランチ", "category": "食費"});
        let after = json!({"amount": 1500, "content": "ランチ", "category": "食費"});

        let diff = field_diff(&before, &after).unwrap();
        assert_eq!(diff, "amount: 1000 -> 1500");
    }

    #[test]
    fn test_bookkeeping_fields_ignored() {
        let before = json!({"id": "a", "amount": 1000, "updated_at": "2025-01-01T00:00:00Z"});
        let after = json!({"id": "a", "amount": 1000, "updated_at": "2025-01-02T00:00:00Z"});

        assert!(field_diff(&before, &after).is_none());
    }

    #[test]
    fn test_string_change_and_truncation() {
        let before = json!({"content": "電車"});
        let after = json!({"content": "あ".repeat(40)});

        let diff = field_diff(&before, &after).unwrap();
        assert!(diff.starts_with("content: \"電車\" -> \""));
        assert!(diff.ends_with("...\""));
    }

    #[test]
    fn test_added_and_removed() {
        let before = json!({"type": "expense", "memo": "x"});
        let after = json!({"type": "income", "note": 1});

        let diff = field_diff(&before, &after).unwrap();
        assert!(diff.contains("type: \"expense\" -> \"income\""));
        assert!(diff.contains("memo: \"x\" -> (removed)"));
        assert!(diff.contains("note: (added) -> 1"));
    }

    #[test]
    fn test_non_object_values() {
        assert_eq!(field_diff(&json!(1), &json!(2)).unwrap(), "1 -> 2");
        assert!(field_diff(&json!(null), &json!(null)).is_none());
    }
}
