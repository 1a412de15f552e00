//! Boxed values.

use std::fmt;
use std::sync::OnceLock;

use crate::types::{convert, text, trait_of, AttributeType, Value, ValueKind};

/// A single value of any kind with lazily cached text and number forms.
///
/// Used for tag values and collection-level (`@Data`) values. Immutable once
/// built; replace the box to change the value.
#[derive(Clone)]
pub struct BoxedValue {
    value: Value,
    string: OnceLock<String>,
    number: OnceLock<Option<f64>>,
}

impl BoxedValue {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            string: OnceLock::new(),
            number: OnceLock::new(),
        }
    }

    pub fn of<T: AttributeType>(v: T) -> Self {
        Self::new(Value::of(v))
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Printed form, computed on first use.
    pub fn as_string(&self) -> &str {
        self.string.get_or_init(|| text::format_value(&self.value))
    }

    /// Numeric projection; `None` for non-numeric kinds.
    pub fn as_f64(&self) -> Option<f64> {
        *self.number.get_or_init(|| {
            if !self.is_numeric() {
                return None;
            }
            match convert(&self.value, ValueKind::Double)? {
                Value::Double(v) => Some(v),
                _ => None,
            }
        })
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        trait_of(self.kind()).is_numeric
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        trait_of(self.kind()).is_string
    }

    /// Numeric comparison when both are numeric, text comparison when both
    /// are text. Anything else never matches, not even itself.
    pub fn same_value(&self, other: &BoxedValue) -> bool {
        match (self.is_numeric(), other.is_numeric()) {
            (true, true) => self.as_f64() == other.as_f64(),
            (false, false) if self.is_text() && other.is_text() => self.as_string() == other.as_string(),
            _ => false,
        }
    }
}

impl From<Value> for BoxedValue {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

impl PartialEq for BoxedValue {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Debug for BoxedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BoxedValue").field(&self.value).finish()
    }
}

impl fmt::Display for BoxedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::DVec3;

    #[test]
    fn test_projections() {
        let b = BoxedValue::of(7i64);
        assert!(b.is_numeric());
        assert!(!b.is_text());
        assert_eq!(b.as_string(), "7");
        assert_eq!(b.as_f64(), Some(7.0));

        let b = BoxedValue::of(3.14159f64);
        assert_eq!(b.as_string(), "3.14");

        let b = BoxedValue::new(Value::string("hello"));
        assert!(b.is_text());
        assert_eq!(b.as_f64(), None);

        let b = BoxedValue::of(true);
        assert!(b.is_numeric());
        assert_eq!(b.as_f64(), Some(1.0));
    }

    #[test]
    fn test_same_value() {
        let a = BoxedValue::of(2i32);
        let b = BoxedValue::of(2.0f64);
        assert!(a.same_value(&b));
        assert!(!a.same_value(&BoxedValue::of(3i64)));

        let s = BoxedValue::new(Value::string("x"));
        let n = BoxedValue::new(Value::Name(crate::types::Name::new("x")));
        assert!(s.same_value(&n));
        assert!(!s.same_value(&a));

        let v = BoxedValue::of(DVec3::new(1.0, 2.0, 3.0));
        assert!(!v.same_value(&v.clone()));
        assert!(!v.same_value(&a));
    }
}
