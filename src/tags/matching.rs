//! Tag queries and value comparisons.

use std::fmt;

use super::{BoxedValue, Tags};

/// How a query string matches a tag name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MatchMode {
    #[default]
    Equals = 0,
    Contains = 1,
    StartsWith = 2,
    EndsWith = 3,
}

impl MatchMode {
    pub const ALL: [MatchMode; 4] = [Self::Equals, Self::Contains, Self::StartsWith, Self::EndsWith];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::Contains => "Contains",
            Self::StartsWith => "StartsWith",
            Self::EndsWith => "EndsWith",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name().eq_ignore_ascii_case(name))
    }

    #[inline]
    pub fn matches(self, tag: &str, query: &str) -> bool {
        match self {
            Self::Equals => tag == query,
            Self::Contains => tag.contains(query),
            Self::StartsWith => tag.starts_with(query),
            Self::EndsWith => tag.ends_with(query),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether any tag matches `query`.
///
/// Strict matching tests tag keys only (`Count` for `Count:7`); otherwise the
/// flattened strings are tested, so `Count:7` matches `Count:7` exactly.
pub fn has_matching_tags(tags: &Tags, query: &str, mode: MatchMode, strict: bool) -> bool {
    if strict {
        tags.value_tags().iter().any(|(key, _)| mode.matches(key, query))
            || tags.raw_tags().iter().any(|tag| mode.matches(tag, query))
    } else {
        tags.flatten().iter().any(|tag| mode.matches(tag, query))
    }
}

/// Values of every value tag whose key matches `query`, in key order.
pub fn matching_value_tags(tags: &Tags, query: &str, mode: MatchMode) -> Vec<BoxedValue> {
    tags.value_tags()
        .into_iter()
        .filter(|(key, _)| mode.matches(key, query))
        .map(|(_, value)| value)
        .collect()
}

/// Numeric comparison operator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Comparison {
    #[default]
    StrictlyEqual = 0,
    StrictlyNotEqual = 1,
    EqualOrGreater = 2,
    EqualOrSmaller = 3,
    StrictlyGreater = 4,
    StrictlySmaller = 5,
    NearlyEqual = 6,
    NearlyNotEqual = 7,
}

impl Comparison {
    pub const ALL: [Comparison; 8] = [
        Self::StrictlyEqual,
        Self::StrictlyNotEqual,
        Self::EqualOrGreater,
        Self::EqualOrSmaller,
        Self::StrictlyGreater,
        Self::StrictlySmaller,
        Self::NearlyEqual,
        Self::NearlyNotEqual,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::StrictlyEqual => "==",
            Self::StrictlyNotEqual => "!=",
            Self::EqualOrGreater => ">=",
            Self::EqualOrSmaller => "<=",
            Self::StrictlyGreater => ">",
            Self::StrictlySmaller => "<",
            Self::NearlyEqual => "~=",
            Self::NearlyNotEqual => "!~=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.symbol() == symbol.trim())
    }

    pub fn test(self, a: f64, b: f64, tolerance: f64) -> bool {
        match self {
            Self::StrictlyEqual => a == b,
            Self::StrictlyNotEqual => a != b,
            Self::EqualOrGreater => a >= b,
            Self::EqualOrSmaller => a <= b,
            Self::StrictlyGreater => a > b,
            Self::StrictlySmaller => a < b,
            Self::NearlyEqual => (a - b).abs() <= tolerance,
            Self::NearlyNotEqual => (a - b).abs() > tolerance,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Compare a boxed value against `b`; non-numeric values never pass.
pub fn compare(op: Comparison, a: &BoxedValue, b: f64, tolerance: f64) -> bool {
    a.as_f64().is_some_and(|a| op.test(a, b, tolerance))
}

/// String comparison operator. `Length*` variants compare character counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StringComparison {
    #[default]
    StrictlyEqual = 0,
    StrictlyNotEqual = 1,
    LengthEqual = 2,
    LengthNotEqual = 3,
    LengthEqualOrGreater = 4,
    LengthEqualOrSmaller = 5,
    LengthGreater = 6,
    LengthSmaller = 7,
    LexicallyGreater = 8,
    LexicallySmaller = 9,
    Contains = 10,
    StartsWith = 11,
    EndsWith = 12,
}

impl StringComparison {
    pub const ALL: [StringComparison; 13] = [
        Self::StrictlyEqual,
        Self::StrictlyNotEqual,
        Self::LengthEqual,
        Self::LengthNotEqual,
        Self::LengthEqualOrGreater,
        Self::LengthEqualOrSmaller,
        Self::LengthGreater,
        Self::LengthSmaller,
        Self::LexicallyGreater,
        Self::LexicallySmaller,
        Self::Contains,
        Self::StartsWith,
        Self::EndsWith,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::StrictlyEqual => "StrictlyEqual",
            Self::StrictlyNotEqual => "StrictlyNotEqual",
            Self::LengthEqual => "LengthEqual",
            Self::LengthNotEqual => "LengthNotEqual",
            Self::LengthEqualOrGreater => "LengthEqualOrGreater",
            Self::LengthEqualOrSmaller => "LengthEqualOrSmaller",
            Self::LengthGreater => "LengthGreater",
            Self::LengthSmaller => "LengthSmaller",
            Self::LexicallyGreater => "LexicallyGreater",
            Self::LexicallySmaller => "LexicallySmaller",
            Self::Contains => "Contains",
            Self::StartsWith => "StartsWith",
            Self::EndsWith => "EndsWith",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name().eq_ignore_ascii_case(name))
    }

    pub fn test(self, a: &str, b: &str) -> bool {
        let len = |s: &str| s.chars().count();
        match self {
            Self::StrictlyEqual => a == b,
            Self::StrictlyNotEqual => a != b,
            Self::LengthEqual => len(a) == len(b),
            Self::LengthNotEqual => len(a) != len(b),
            Self::LengthEqualOrGreater => len(a) >= len(b),
            Self::LengthEqualOrSmaller => len(a) <= len(b),
            Self::LengthGreater => len(a) > len(b),
            Self::LengthSmaller => len(a) < len(b),
            Self::LexicallyGreater => a > b,
            Self::LexicallySmaller => a < b,
            Self::Contains => a.contains(b),
            Self::StartsWith => a.starts_with(b),
            Self::EndsWith => a.ends_with(b),
        }
    }
}

impl fmt::Display for StringComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compare a boxed value's text against `b`; non-text values never pass.
pub fn compare_str(op: StringComparison, a: &BoxedValue, b: &str) -> bool {
    a.is_text() && op.test(a.as_string(), b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    fn tags() -> Tags {
        Tags::from_tags(["Hero", "Count:7", "Counter:1.5", "Team:Red"])
    }

    #[test]
    fn test_has_matching_tags() {
        let t = tags();
        assert!(has_matching_tags(&t, "Count", MatchMode::Equals, true));
        assert!(!has_matching_tags(&t, "Count", MatchMode::Equals, false));
        assert!(has_matching_tags(&t, "Count:7", MatchMode::Equals, false));
        assert!(has_matching_tags(&t, "ero", MatchMode::EndsWith, true));
        assert!(has_matching_tags(&t, "Team:R", MatchMode::StartsWith, false));
        assert!(!has_matching_tags(&t, "Team:R", MatchMode::StartsWith, true));
    }

    #[test]
    fn test_matching_value_tags() {
        let t = tags();
        let values = matching_value_tags(&t, "Count", MatchMode::StartsWith);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].as_f64(), Some(7.0));
        assert_eq!(values[1].as_f64(), Some(1.5));
        assert!(matching_value_tags(&t, "Hero", MatchMode::Equals).is_empty());
    }

    #[test]
    fn test_numeric_compare() {
        let seven = BoxedValue::of(7i64);
        assert!(compare(Comparison::StrictlyGreater, &seven, 6.0, 0.0));
        assert!(compare(Comparison::EqualOrSmaller, &seven, 7.0, 0.0));
        assert!(compare(Comparison::NearlyEqual, &seven, 7.05, 0.1));
        assert!(!compare(Comparison::NearlyNotEqual, &seven, 7.05, 0.1));
        assert!(!compare(Comparison::StrictlyEqual, &BoxedValue::new(Value::string("7")), 7.0, 0.0));
        assert_eq!(Comparison::from_symbol(" >= "), Some(Comparison::EqualOrGreater));
    }

    #[test]
    fn test_string_compare() {
        let red = BoxedValue::new(Value::string("Red"));
        assert!(compare_str(StringComparison::StrictlyEqual, &red, "Red"));
        assert!(compare_str(StringComparison::LengthEqual, &red, "abc"));
        assert!(compare_str(StringComparison::LexicallySmaller, &red, "Rose"));
        assert!(compare_str(StringComparison::StartsWith, &red, "R"));
        assert!(!compare_str(StringComparison::Contains, &BoxedValue::of(7i64), "7"));
        assert_eq!(StringComparison::from_name("endswith"), Some(StringComparison::EndsWith));
    }
}
