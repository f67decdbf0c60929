// WHY: Question and AI payloads arrive loosely typed (numbers as strings, lists as text)
// Coercions here never fail; unusable values come back as None or an empty list

use serde_json::{Map, Value};
use std::collections::HashSet;

/// Plain string fields of question content that must always hold strings
const STRING_FIELDS: &[&str] = &["explanation", "question", "passage", "sentence"];

/// Strings as-is, numbers and booleans in display form; null, arrays and objects give `None`
pub fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Integers, floats truncated toward zero, and trimmed numeric strings
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Trimmed, non-empty, de-duplicated strings from an array, a JSON-encoded
/// array string, or a comma/newline separated string
pub fn coerce_string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => dedup_trimmed(items.iter().filter_map(Value::as_str)),
        Value::String(s) => match serde_json::from_str::<Vec<String>>(s) {
            Ok(parsed) => dedup_trimmed(parsed.iter().map(String::as_str)),
            Err(_) => dedup_trimmed(s.split(['\n', ','])),
        },
        _ => Vec::new(),
    }
}

fn dedup_trimmed<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_string()))
        .map(str::to_string)
        .collect()
}

/// Normalize question content in place:
/// - `options` becomes a de-duplicated string list, or is removed if unusable
/// - `correct_answer` becomes an integer index (0 when out of range), or is removed
/// - plain text fields are forced to strings
pub fn normalize_question_content(content: &mut Map<String, Value>) {
    if let Some(raw) = content.get("options") {
        match raw {
            Value::Array(_) | Value::String(_) => {
                let options = coerce_string_list(raw);
                content.insert("options".to_string(), Value::from(options));
            }
            _ => {
                content.remove("options");
            }
        }
    }

    if let Some(raw) = content.get("correct_answer") {
        match coerce_int(raw) {
            Some(index) => {
                let option_count = content
                    .get("options")
                    .and_then(Value::as_array)
                    .map(Vec::len);
                let index = match option_count {
                    Some(count) if index < 0 || index as usize >= count => 0,
                    _ => index,
                };
                content.insert("correct_answer".to_string(), Value::from(index));
            }
            None => {
                content.remove("correct_answer");
            }
        }
    }

    for field in STRING_FIELDS {
        if let Some(value) = content.get_mut(*field) {
            if !value.is_string() {
                let text = match &*value {
                    Value::Null => String::new(),
                    other => coerce_string(other).unwrap_or_else(|| other.to_string()),
                };
                *value = Value::String(text);
            }
        }
    }
}
