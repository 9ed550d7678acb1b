use serde_json::{Map, Number, Value};

use crate::{
    error::PostError,
    metadata::{PostRequest, DEFAULT_LAYOUT},
};

use super::PanelMessage;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CustomField {
    pub key: String,
    pub value: String,
}

/// Raw contents of the post form, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FormData {
    pub title: String,
    pub categories: String,
    pub tags: String,
    pub layout: String,
    pub fields: Vec<CustomField>,
}

impl Default for FormData {
    fn default() -> Self {
        Self {
            title: String::new(),
            categories: String::new(),
            tags: String::new(),
            layout: DEFAULT_LAYOUT.to_string(),
            fields: Vec::new(),
        }
    }
}

impl FormData {
    /// Validates the form and turns option values into typed values.
    pub fn submit(&self) -> Result<PostRequest, PostError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(PostError::EmptyTitle);
        }

        let mut additional_options = Map::new();
        for field in &self.fields {
            let key = field.key.trim();
            let value = field.value.trim();
            if !key.is_empty() {
                additional_options.insert(key.to_string(), parse_option_value(value));
            } else if !value.is_empty() {
                return Err(PostError::CustomFieldKeyMissing {
                    value: value.to_string(),
                });
            }
        }

        Ok(PostRequest {
            title: title.to_string(),
            categories: self.categories.clone(),
            tags: self.tags.clone(),
            layout: self.layout.clone(),
            additional_options,
        })
    }

    pub fn to_message(&self) -> PanelMessage {
        match self.submit() {
            Ok(data) => PanelMessage::CreatePost { data },
            Err(e) => PanelMessage::Error {
                text: e.to_string(),
            },
        }
    }
}

/// Reads a typed option value: `true`, `false`, `null`, finite numbers and
/// bracketed JSON are converted, anything else stays text.
pub(crate) fn parse_option_value(raw: &str) -> Value {
    let raw = raw.trim();
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }

    if let Some(number) = parse_number(raw) {
        return number;
    }

    let bracketed = (raw.starts_with('[') && raw.ends_with(']'))
        || (raw.starts_with('{') && raw.ends_with('}'));
    if bracketed {
        if let Ok(value) = serde_json::from_str(raw) {
            return value;
        }
    }

    Value::String(raw.to_string())
}

fn parse_number(raw: &str) -> Option<Value> {
    if let Some(value) = parse_prefixed_integer(raw) {
        return Some(value);
    }
    // `inf` and `nan` parse as f64 but are not numbers here
    let f: f64 = raw.parse().ok().filter(|f: &f64| f.is_finite())?;
    if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
        Some(Value::from(f as i64))
    } else {
        // kept as f64, `format_value` writes integral ones as plain digits
        Number::from_f64(f).map(Value::Number)
    }
}

/// `0x1F`, `0o17` and `0b11`. Unsigned only, like a JavaScript `Number`.
fn parse_prefixed_integer(raw: &str) -> Option<Value> {
    let (radix, digits) = match raw.get(..2)? {
        "0x" | "0X" => (16, &raw[2..]),
        "0o" | "0O" => (8, &raw[2..]),
        "0b" | "0B" => (2, &raw[2..]),
        _ => return None,
    };
    // from_str_radix would also take a leading `+`
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    match u64::from_str_radix(digits, radix) {
        Ok(n) if n < 1 << 53 => Some(Value::from(n)),
        _ => {
            let f = digits
                .chars()
                .filter_map(|c| c.to_digit(radix))
                .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d));
            Number::from_f64(f).map(Value::Number)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::format_value;
    use serde_json::json;

    fn form(title: &str, fields: &[(&str, &str)]) -> FormData {
        FormData {
            title: title.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| CustomField {
                    key: k.to_string(),
                    value: v.to_string(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn literal_true_becomes_a_boolean() {
        let request = form("Post", &[("flag", "true")]).submit().unwrap();
        assert_eq!(request.additional_options["flag"], Value::Bool(true));
    }

    #[test]
    fn option_values_are_typed() {
        assert_eq!(parse_option_value("false"), json!(false));
        assert_eq!(parse_option_value("null"), json!(null));
        assert_eq!(parse_option_value("42"), json!(42));
        assert_eq!(parse_option_value("-7"), json!(-7));
        assert_eq!(parse_option_value("3.14"), json!(3.14));
        assert_eq!(parse_option_value("1e3"), json!(1000));
        assert_eq!(parse_option_value("[1, \"a\"]"), json!([1, "a"]));
        assert_eq!(parse_option_value("{\"k\": true}"), json!({"k": true}));
        assert_eq!(parse_option_value("hello"), json!("hello"));
        assert_eq!(parse_option_value("\"text\""), json!("\"text\""));
        assert_eq!(parse_option_value(""), json!(""));
    }

    #[test]
    fn prefixed_integers_are_numbers() {
        assert_eq!(parse_option_value("0x1F"), json!(31));
        assert_eq!(parse_option_value("0XfF"), json!(255));
        assert_eq!(parse_option_value("0o7"), json!(7));
        assert_eq!(parse_option_value("0b11"), json!(3));
        assert_eq!(format_value(&parse_option_value("0x1F")), "31");

        assert_eq!(parse_option_value("0x"), json!("0x"));
        assert_eq!(parse_option_value("0b12"), json!("0b12"));
        assert_eq!(parse_option_value("0x+1"), json!("0x+1"));
        assert_eq!(parse_option_value("-0x1F"), json!("-0x1F"));
    }

    #[test]
    fn large_integers_render_as_digits() {
        assert_eq!(
            format_value(&parse_option_value("12345678901234567890")),
            "12345678901234567000"
        );
        assert_eq!(
            format_value(&parse_option_value("9007199254740993")),
            "9007199254740992"
        );
        assert_eq!(format_value(&parse_option_value("1e21")), "1000000000000000000000");
        assert_eq!(
            format_value(&parse_option_value("0xFFFFFFFFFFFFFFFF")),
            "18446744073709552000"
        );
    }

    #[test]
    fn infinity_and_nan_stay_text() {
        assert_eq!(parse_option_value("Infinity"), json!("Infinity"));
        assert_eq!(parse_option_value("NaN"), json!("NaN"));
        assert_eq!(parse_option_value("inf"), json!("inf"));
    }

    #[test]
    fn broken_json_stays_text() {
        assert_eq!(parse_option_value("[not json]"), json!("[not json]"));
        assert_eq!(parse_option_value("{oops"), json!("{oops"));
    }

    #[test]
    fn title_is_trimmed_and_required() {
        assert_eq!(form("  Hi  ", &[]).submit().unwrap().title, "Hi");
        assert!(matches!(
            form("   ", &[]).submit(),
            Err(PostError::EmptyTitle)
        ));
    }

    #[test]
    fn value_without_key_is_refused() {
        let err = form("Post", &[("", "orphan")]).submit().unwrap_err();
        assert!(matches!(err, PostError::CustomFieldKeyMissing { .. }));
        assert_eq!(
            err.to_string(),
            "Custom field key cannot be empty if value \"orphan\" is provided."
        );
    }

    #[test]
    fn blank_rows_are_ignored() {
        let request = form("Post", &[("", "  "), ("a", "1")]).submit().unwrap();
        assert_eq!(request.additional_options.len(), 1);
    }

    #[test]
    fn later_duplicate_key_wins_in_place() {
        let request = form("Post", &[("a", "1"), ("b", "2"), ("a", "3")])
            .submit()
            .unwrap();
        let entries: Vec<_> = request.additional_options.iter().collect();
        assert_eq!(entries[0], (&"a".to_string(), &json!(3)));
        assert_eq!(entries[1], (&"b".to_string(), &json!(2)));
    }

    #[test]
    fn messages_from_form() {
        assert!(matches!(
            form("Post", &[]).to_message(),
            PanelMessage::CreatePost { .. }
        ));
        assert_eq!(
            form("", &[]).to_message(),
            PanelMessage::Error {
                text: "Title is required.".to_string()
            }
        );
    }
}
