//! Change summaries for audit log updates
//!
//! Only top-level fields are compared. Audited values are public views
//! (profiles, entry summaries), so nothing secret reaches these strings.

use serde_json::Value;

const MAX_STRING_CHARS: usize = 40;

/// Describe what changed between two JSON snapshots
///
/// Returns `None` when the snapshots are equal.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return (before != after)
            .then(|| format!("{} -> {}", format_value(before), format_value(after)));
    };

    let mut changes = Vec::new();

    for (key, old) in before_obj {
        match after_obj.get(key) {
            Some(new) if new != old => {
                changes.push(format!("{}: {} -> {}", key, format_value(old), format_value(new)))
            }
            Some(_) => {}
            None => changes.push(format!("{}: {} -> (removed)", key, format_value(old))),
        }
    }

    for (key, new) in after_obj {
        if !before_obj.contains_key(key) {
            changes.push(format!("{}: (added) -> {}", key, format_value(new)));
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
        Value::String(s) => format!("\"{}\"", truncate(s)),
        // Tag lists read better spelled out than counted
        Value::Array(items) if items.iter().all(Value::is_string) => {
            let names: Vec<_> = items.iter().filter_map(Value::as_str).collect();
            format!("[{}]", truncate(&names.join(", ")))
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}

fn truncate(s: &str) -> String {
    if s.chars().count() > MAX_STRING_CHARS {
        let head: String = s.chars().take(MAX_STRING_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
