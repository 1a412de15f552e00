//! `Key:Value` tag strings.
//!
//! A tag is either raw (`Hero`) or carries a value (`Count:7`). The value
//! text is sniffed into the narrowest kind that reads it back exactly:
//!
//! 1. integer literal -> Int64
//! 2. decimal literal -> Double
//! 3. 2, 3 or 4 comma-separated numbers -> Vector2 / Vector3 / Vector4
//! 4. `true` / `false`, any case -> Boolean
//! 5. anything else -> String

use super::BoxedValue;
use crate::types::{text, Value};

/// Separator between a tag's key and value.
pub const TAG_SEPARATOR: char = ':';

/// Result of [`try_parse_tag`].
#[derive(Clone, Debug, PartialEq)]
pub enum ParsedTag {
    /// No separator or an empty side; the whole string is the tag.
    Raw(String),
    Value { key: String, value: BoxedValue },
}

impl ParsedTag {
    pub fn key(&self) -> &str {
        match self {
            Self::Raw(tag) => tag,
            Self::Value { key, .. } => key,
        }
    }

    pub fn value(&self) -> Option<&BoxedValue> {
        match self {
            Self::Raw(_) => None,
            Self::Value { value, .. } => Some(value),
        }
    }

    /// Tag string this parse came from.
    pub fn flatten(&self) -> String {
        match self {
            Self::Raw(tag) => tag.clone(),
            Self::Value { key, value } => flatten(key, value),
        }
    }
}

/// Split `raw` on the first `:` and sniff the value.
pub fn try_parse_tag(raw: &str) -> ParsedTag {
    match raw.split_once(TAG_SEPARATOR) {
        Some((key, value)) if !key.is_empty() && !value.is_empty() => ParsedTag::Value {
            key: key.to_string(),
            value: BoxedValue::new(sniff_value(value)),
        },
        _ => ParsedTag::Raw(raw.to_string()),
    }
}

/// Narrowest value kind for `s`. Never fails; unknown text is a String.
pub fn sniff_value(s: &str) -> Value {
    if text::is_integer_literal(s) {
        if let Ok(v) = s.trim().parse::<i64>() {
            return Value::Int64(v);
        }
    }
    if text::is_integer_literal(s) || text::is_decimal_literal(s) {
        if let Some(v) = text::parse_f64(s) {
            return Value::Double(v);
        }
    }
    if s.contains(',') {
        if let Some(v) = text::parse_vec2(s) {
            return Value::Vector2(v);
        }
        if let Some(v) = text::parse_vec3(s) {
            return Value::Vector3(v);
        }
        if let Some(v) = text::parse_vec4(s) {
            return Value::Vector4(v);
        }
    }
    if let Some(b) = text::parse_bool(s) {
        return Value::Boolean(b);
    }
    Value::string(s)
}

/// `key:value` with the value printed the way conversions print it.
pub fn flatten(key: &str, value: &BoxedValue) -> String {
    let value = value.as_string();
    let mut out = String::with_capacity(key.len() + 1 + value.len());
    out.push_str(key);
    out.push(TAG_SEPARATOR);
    out.push_str(value);
    out
}
