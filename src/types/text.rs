//! Text form of values.
//!
//! The same printer serves the any-to-string conversions and tag flattening,
//! so every string it produces for a sniffable kind parses back to the same
//! kind and value.
//!
//! | Kind | Printed as |
//! |---|---|
//! | Boolean | `true` / `false` |
//! | Int32, Int64 | plain digits |
//! | Float, Double | two decimals, `3.14` |
//! | Vector2/3/4 | `1,2,3` (shortest round-trip components) |
//! | Rotator | `pitch,yaw,roll` |
//! | Quaternion | `x,y,z,w` |
//! | Transform | `px,py,pz|qx,qy,qz,qw|sx,sy,sz` |
//! | text kinds | the text itself |

use smallvec::SmallVec;
use std::fmt::Write;

use super::Value;
use crate::util::{DQuat, DVec2, DVec3, DVec4, Rotator, Transform};

/// Separator between the three parts of a printed transform.
pub const TRANSFORM_SEPARATOR: char = '|';

/// Print a float scalar with two decimals.
#[inline]
pub fn format_real(v: f64) -> String {
    format!("{:.2}", v)
}

/// Print components joined by commas.
pub fn format_components(components: &[f64]) -> String {
    let mut out = String::with_capacity(components.len() * 4);
    for (i, c) in components.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{}", c);
    }
    out
}

pub fn format_transform(t: &Transform) -> String {
    let q = t.rotation;
    format!(
        "{}{sep}{}{sep}{}",
        format_components(&t.translation.to_array()),
        format_components(&[q.x, q.y, q.z, q.w]),
        format_components(&t.scale.to_array()),
        sep = TRANSFORM_SEPARATOR,
    )
}

/// Printed representation of any value.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Boolean(b) => (if *b { "true" } else { "false" }).to_string(),
        Value::Int32(v) => v.to_string(),
        Value::Int64(v) => v.to_string(),
        Value::Float(v) => format_real(*v as f64),
        Value::Double(v) => format_real(*v),
        Value::Vector2(v) => format_components(&v.to_array()),
        Value::Vector3(v) => format_components(&v.to_array()),
        Value::Vector4(v) => format_components(&v.to_array()),
        Value::Rotator(r) => format_components(&[r.pitch, r.yaw, r.roll]),
        Value::Quaternion(q) => format_components(&[q.x, q.y, q.z, q.w]),
        Value::Transform(t) => format_transform(t),
        Value::String(s) => s.to_string(),
        Value::Name(n) => n.to_string(),
        Value::ObjectPathRef(p) => p.to_string(),
        Value::ClassPathRef(p) => p.to_string(),
    }
}

/// `true` / `false`, any case.
pub fn parse_bool(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn strip_sign(s: &str) -> &str {
    s.strip_prefix(['+', '-']).unwrap_or(s)
}

/// Optional sign followed by digits only.
pub fn is_integer_literal(s: &str) -> bool {
    let digits = strip_sign(s.trim());
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Optional sign, digits with exactly one `.`, at least one digit.
pub fn is_decimal_literal(s: &str) -> bool {
    let body = strip_sign(s.trim());
    let Some((int, frac)) = body.split_once('.') else {
        return false;
    };
    (!int.is_empty() || !frac.is_empty())
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.bytes().all(|b| b.is_ascii_digit())
}

/// Integer parse; decimals are truncated toward zero.
pub fn parse_i64(s: &str) -> Option<i64> {
    let s = s.trim();
    s.parse::<i64>().ok().or_else(|| {
        s.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v as i64)
    })
}

pub fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok()
}

/// Comma-separated numbers, optionally wrapped in parentheses.
pub fn parse_components(s: &str) -> Option<SmallVec<[f64; 4]>> {
    let mut s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        s = inner;
    }
    if s.is_empty() {
        return None;
    }
    s.split(',').map(parse_f64).collect()
}

fn parse_exact<const N: usize>(s: &str) -> Option<[f64; N]> {
    let parts = parse_components(s)?;
    if parts.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    out.copy_from_slice(&parts);
    Some(out)
}

pub fn parse_vec2(s: &str) -> Option<DVec2> {
    parse_exact::<2>(s).map(DVec2::from_array)
}

pub fn parse_vec3(s: &str) -> Option<DVec3> {
    parse_exact::<3>(s).map(DVec3::from_array)
}

pub fn parse_vec4(s: &str) -> Option<DVec4> {
    parse_exact::<4>(s).map(DVec4::from_array)
}

pub fn parse_rotator(s: &str) -> Option<Rotator> {
    parse_exact::<3>(s).map(|[p, y, r]| Rotator::new(p, y, r))
}

pub fn parse_quat(s: &str) -> Option<DQuat> {
    parse_exact::<4>(s).map(DQuat::from_array)
}

pub fn parse_transform(s: &str) -> Option<Transform> {
    let mut parts = s.split(TRANSFORM_SEPARATOR);
    let translation = parse_vec3(parts.next()?)?;
    let rotation = parse_quat(parts.next()?)?;
    let scale = parse_vec3(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some(Transform::new(translation, rotation, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueKind;

    #[test]
    fn test_scalars() {
        assert_eq!(format_value(&Value::Boolean(true)), "true");
        assert_eq!(format_value(&Value::Int64(-42)), "-42");
        assert_eq!(format_value(&Value::Double(3.14159)), "3.14");
        assert_eq!(format_value(&Value::Float(2.0)), "2.00");
    }

    #[test]
    fn test_components() {
        assert_eq!(format_value(&Value::Vector3(DVec3::new(1.0, 2.0, 3.0))), "1,2,3");
        assert_eq!(format_value(&Value::Vector2(DVec2::new(0.5, -1.25))), "0.5,-1.25");
        assert_eq!(format_value(&Value::Quaternion(DQuat::IDENTITY)), "0,0,0,1");
    }

    #[test]
    fn test_literal_classes() {
        assert!(is_integer_literal("42"));
        assert!(is_integer_literal("-7"));
        assert!(!is_integer_literal("4.2"));
        assert!(!is_integer_literal("-"));
        assert!(!is_integer_literal("1e5"));
        assert!(is_decimal_literal("3.14"));
        assert!(is_decimal_literal("-.5"));
        assert!(!is_decimal_literal("."));
        assert!(!is_decimal_literal("1.2.3"));
        assert!(!is_decimal_literal("12"));
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_i64(" 12 "), Some(12));
        assert_eq!(parse_i64("3.9"), Some(3));
        assert_eq!(parse_i64("abc"), None);
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn test_parse_vectors() {
        assert_eq!(parse_vec3("1, 2, 3"), Some(DVec3::new(1.0, 2.0, 3.0)));
        assert_eq!(parse_vec3("(1,2,3)"), Some(DVec3::new(1.0, 2.0, 3.0)));
        assert_eq!(parse_vec3("1,2"), None);
        assert_eq!(parse_vec2("1,x"), None);
        assert_eq!(parse_components(""), None);
    }

    #[test]
    fn test_every_non_text_kind_reparses() {
        let t = Transform::new(DVec3::new(1.0, 2.0, 3.0), DQuat::from_xyzw(0.0, 0.0, 0.6, 0.8), DVec3::splat(2.0));
        let printed = format_transform(&t);
        assert_eq!(printed, "1,2,3|0,0,0.6,0.8|2,2,2");
        assert_eq!(parse_transform(&printed), Some(t));
        assert_eq!(parse_transform("1,2,3|0,0,0,1"), None);

        let r = Rotator::new(10.0, 20.5, -30.0);
        assert_eq!(parse_rotator(&format_value(&Value::Rotator(r))), Some(r));
        assert_eq!(Value::default_of(ValueKind::Vector4).kind(), ValueKind::Vector4);
    }
}
