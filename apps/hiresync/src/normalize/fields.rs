use serde_json::Value;

/// Resolves a dotted path (`candidate.name`) inside a record.
pub fn lookup<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(record, |current, segment| current.get(segment))
        .filter(|v| !v.is_null())
}

/// Returns the first present, non-null value among several candidate paths.
pub fn pick<'a>(record: Option<&'a Value>, paths: &[&str]) -> Option<&'a Value> {
    let record = record?;
    paths.iter().find_map(|path| lookup(record, path))
}

/// Like [`pick`] but renders scalars as text; empty strings count as absent.
pub fn pick_text(record: Option<&Value>, paths: &[&str]) -> Option<String> {
    let record = record?;
    paths
        .iter()
        .filter_map(|path| lookup(record, path))
        .find_map(scalar_text)
}

pub fn pick_text_or(record: Option<&Value>, paths: &[&str], fallback: &str) -> String {
    pick_text(record, paths).unwrap_or_else(|| fallback.to_string())
}

pub fn pick_f64(record: Option<&Value>, paths: &[&str]) -> Option<f64> {
    let record = record?;
    paths
        .iter()
        .filter_map(|path| lookup(record, path))
        .find_map(value_as_f64)
}

/// Accepts real booleans, `1`/`0`, and the strings `"true"`/`"yes"`/`"done"`.
pub fn pick_bool(record: Option<&Value>, paths: &[&str]) -> Option<bool> {
    let record = record?;
    paths
        .iter()
        .filter_map(|path| lookup(record, path))
        .find_map(|v| match v {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|n| n != 0.0),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" | "done" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        })
}

pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Text form of a scalar; objects, arrays and blank strings yield `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `100.0` renders as `100`; integers keep full precision.
fn number_text(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            return f.to_string();
        }
    }
    n.to_string()
}

/// Extracts a list from a bare array or from the first matching envelope key.
pub fn extract_list<'a>(payload: &'a Value, keys: &[&str]) -> &'a [Value] {
    if let Value::Array(items) = payload {
        return items;
    }
    keys.iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Unwraps `{ "job": {...} }`-style envelopes; a bare object is returned as is.
pub fn extract_record<'a>(payload: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|key| payload.get(*key).filter(|v| v.is_object()))
        .or_else(|| payload.is_object().then_some(payload))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_lookup_nested_path() {
        let record = json!({"candidate": {"name": "Ada"}});
        assert_eq!(lookup(&record, "candidate.name"), Some(&json!("Ada")));
        assert_eq!(lookup(&record, "candidate.email"), None);
    }

    #[test]
    fn test_pick_text_skips_blank_and_null() {
        let record = json!({"title": "  ", "jobTitle": null, "job_title": "Engineer"});
        assert_eq!(
            pick_text(Some(&record), &["title", "jobTitle", "job_title"]),
            Some("Engineer".to_string())
        );
    }

    #[test]
    fn test_pick_text_none_record() {
        assert_eq!(pick_text(None, &["title"]), None);
        assert_eq!(pick_text_or(None, &["title"], "—"), "—");
    }

    #[test]
    fn test_pick_bool_variants() {
        let record = json!({"a": 1, "b": "yes", "c": "maybe"});
        assert_eq!(pick_bool(Some(&record), &["a"]), Some(true));
        assert_eq!(pick_bool(Some(&record), &["b"]), Some(true));
        assert_eq!(pick_bool(Some(&record), &["c"]), None);
    }

    #[test]
    fn test_value_as_f64_rejects_garbage() {
        assert_eq!(value_as_f64(&json!("12.5")), Some(12.5));
        assert_eq!(value_as_f64(&json!("twelve")), None);
        assert_eq!(value_as_f64(&json!({"n": 1})), None);
    }

    #[test]
    fn test_scalar_text_whole_floats() {
        assert_eq!(scalar_text(&json!(100.0)), Some("100".to_string()));
        assert_eq!(scalar_text(&json!(12.5)), Some("12.5".to_string()));
        assert_eq!(scalar_text(&json!(90)), Some("90".to_string()));
    }

    #[test]
    fn test_extract_list_shapes() {
        let bare = json!([1, 2]);
        let wrapped = json!({"data": [1, 2, 3]});
        let other = json!({"message": "ok"});
        assert_eq!(extract_list(&bare, &["data"]).len(), 2);
        assert_eq!(extract_list(&wrapped, &["jobs", "data"]).len(), 3);
        assert!(extract_list(&other, &["jobs", "data"]).is_empty());
    }

    #[test]
    fn test_extract_record_shapes() {
        let wrapped = json!({"job": {"title": "A"}});
        let bare = json!({"title": "B"});
        assert_eq!(extract_record(&wrapped, &["job"]), Some(&json!({"title": "A"})));
        assert_eq!(extract_record(&bare, &["job"]), Some(&bare));
        assert_eq!(extract_record(&json!([1]), &["job"]), None);
    }
}
