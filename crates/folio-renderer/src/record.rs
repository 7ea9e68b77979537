//! Optional-returning accessors over untyped CMS payloads.
//!
//! Content arrives as loosely shaped JSON. Every field read in the renderer
//! goes through these helpers, which return `None` instead of failing when a
//! field is missing or has the wrong type.

use serde_json::{Map, Value};

/// Get a field as an object.
#[must_use]
pub fn get_record<'a>(value: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    value.get(key)?.as_object()
}

/// Get a field as a trimmed, non-empty string.
///
/// # Examples
///
/// ```
/// use folio_renderer::record::get_string;
/// use serde_json::json;
///
/// let value = json!({"title": "  Hello  ", "blank": "   ", "count": 3});
/// assert_eq!(get_string(&value, "title"), Some("Hello"));
/// assert_eq!(get_string(&value, "blank"), None);
/// assert_eq!(get_string(&value, "count"), None);
/// ```
#[must_use]
pub fn get_string<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    let trimmed = value.get(key)?.as_str()?.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Get a field as a string that is not blank, without trimming it.
///
/// Used for text where surrounding whitespace is significant (code).
#[must_use]
pub fn get_raw_string<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    let raw = value.get(key)?.as_str()?;
    (!raw.trim().is_empty()).then_some(raw)
}

/// Get a field as a number.
#[must_use]
pub fn get_number(value: &Value, key: &str) -> Option<f64> {
    value.get(key)?.as_f64()
}

/// Return the first of `keys` that yields a [`get_string`] match.
#[must_use]
pub fn first_string<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| get_string(value, key))
}

/// Walk nested objects along `path`, reading the last segment as a string.
///
/// ```
/// use folio_renderer::record::nested_string;
/// use serde_json::json;
///
/// let value = json!({"slug": {"current": "about"}});
/// assert_eq!(nested_string(&value, &["slug", "current"]), Some("about"));
/// assert_eq!(nested_string(&value, &["slug", "missing"]), None);
/// ```
#[must_use]
pub fn nested_string<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    let (last, parents) = path.split_last()?;
    let mut current = value;
    for key in parents {
        current = current.get(key).filter(|v| v.is_object())?;
    }
    get_string(current, last)
}

/// Flatten a string or an array of text blocks into plain text.
///
/// Blocks are joined by a blank line; spans within a block are concatenated.
/// Anything else yields `None`, as does text that is blank after flattening.
#[must_use]
pub fn to_plain_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Array(blocks) => blocks
            .iter()
            .filter_map(|block| {
                let children = block.get("children")?.as_array()?;
                let text: String = children
                    .iter()
                    .filter_map(|child| child.get("text")?.as_str())
                    .collect();
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_owned())
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
