use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Number, Value};

// Word characters are ASCII only, the same set a Jekyll permalink keeps.
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static NON_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-]+").unwrap());
static NON_KEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

/// Lowercases, turns whitespace runs into `-` and drops everything else that
/// is not a word character or hyphen. May return an empty string.
pub(crate) fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lower, "-");
    NON_SLUG.replace_all(&hyphenated, "").into_owned()
}

/// Renders an offset given in minutes *behind* UTC, so a zone ahead of UTC
/// (negative input) gets `+`.
pub(crate) fn format_utc_offset(minutes_behind_utc: i32) -> String {
    let sign = if minutes_behind_utc <= 0 { '+' } else { '-' };
    let minutes = minutes_behind_utc.unsigned_abs();
    format!("{sign}{:02}{:02}", minutes / 60, minutes % 60)
}

/// Double quotes `s`, escaping backslashes first and then quotes.
pub(crate) fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Space separated words as an inline sequence: `["a","b"]`, or `[]`.
pub(crate) fn format_list(raw: &str) -> String {
    let items: Vec<String> = raw.split_whitespace().map(quote).collect();
    format!("[{}]", items.join(","))
}

/// Trims, joins inner whitespace with `_` and strips non word characters.
/// `None` when nothing usable is left.
pub(crate) fn sanitize_key(raw: &str) -> Option<String> {
    let underscored = WHITESPACE.replace_all(raw.trim(), "_");
    let key = NON_KEY.replace_all(&underscored, "");
    if key.is_empty() {
        None
    } else {
        Some(key.into_owned())
    }
}

pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => quote(s),
        _ => format_json(value),
    }
}

/// Compact JSON, except that integral numbers never carry a fraction or an
/// exponent, nested ones included.
fn format_json(value: &Value) -> String {
    match value {
        Value::Number(n) => format_number(n),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(format_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| {
                    format!("{}:{}", Value::from(key.as_str()), format_json(value))
                })
                .collect();
            format!("{{{}}}", entries.join(","))
        }
        _ => value.to_string(),
    }
}

fn format_number(n: &Number) -> String {
    match n.as_f64() {
        // -0.0 is written as 0
        Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
        // 2.0 is written as 2, 1e21 in full
        Some(f) if n.is_f64() && f.fract() == 0.0 => format!("{f}"),
        _ => n.to_string(),
    }
}
