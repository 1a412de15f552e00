//! Integration tests for the trait table and conversion matrix.

use attrkit::types::{conversion, convert, convert_or_default, is_supported, trait_of, Name, Value, ValueKind};
use attrkit::util::{DQuat, DVec2, DVec3, DVec4, Rotator, Transform};

fn as_f64(value: &Value) -> f64 {
    match convert(value, ValueKind::Double) {
        Some(Value::Double(v)) => v,
        other => panic!("expected a double, got {:?}", other),
    }
}

#[test]
fn test_every_kind_has_one_trait() {
    for kind in ValueKind::ALL {
        assert_eq!(trait_of(kind).kind, kind);
    }
    assert!(trait_of(ValueKind::Int64).is_numeric);
    assert!(trait_of(ValueKind::Vector3).is_vector);
    assert!(trait_of(ValueKind::Quaternion).is_rotation);
    assert!(trait_of(ValueKind::Name).is_string);
    assert!(!trait_of(ValueKind::Transform).supports_arithmetic);
}

#[test]
fn test_diagonal_is_copy() {
    attrkit::init();
    for kind in ValueKind::ALL {
        let value = Value::default_of(kind);
        assert_eq!(convert(&value, kind), Some(value), "{}", kind);
    }
}

#[test]
fn test_unsupported_pairs_have_no_entry() {
    for from in ValueKind::ALL {
        for to in ValueKind::ALL {
            assert_eq!(conversion(from, to).is_some(), is_supported(from, to), "{} -> {}", from, to);
        }
    }
    assert!(conversion(ValueKind::Double, ValueKind::Transform).is_none());
    assert_eq!(
        convert_or_default(&Value::Double(3.0), ValueKind::Transform),
        Value::Transform(Transform::IDENTITY)
    );
}

#[test]
fn test_supported_non_text_sources_produce_target_kind() {
    for from in ValueKind::ALL.into_iter().filter(|k| !k.is_text()) {
        let value = Value::default_of(from);
        for to in ValueKind::ALL {
            if let Some(out) = convert(&value, to) {
                assert_eq!(out.kind(), to, "{} -> {}", from, to);
            }
        }
    }
}

#[test]
fn test_numeric_round_trip_through_double() {
    let samples = [
        Value::Boolean(true),
        Value::Boolean(false),
        Value::Int32(-17),
        Value::Int64(1 << 40),
        Value::Float(2.5),
        Value::Double(-3.25),
    ];
    for value in samples {
        let double = convert(&value, ValueKind::Double).unwrap();
        assert_eq!(convert(&double, value.kind()), Some(value.clone()), "{:?}", value);
    }
}

#[test]
fn test_vector_round_trip_through_double_keeps_x() {
    let v = Value::Vector3(DVec3::new(4.0, 5.0, 6.0));
    assert_eq!(as_f64(&v), 4.0);
    let back = convert(&Value::Double(4.0), ValueKind::Vector3).unwrap();
    assert_eq!(back, Value::Vector3(DVec3::splat(4.0)));
    assert_eq!(as_f64(&back), 4.0);
}

#[test]
fn test_bool_numeric_rules() {
    assert_eq!(convert(&Value::Boolean(true), ValueKind::Int32), Some(Value::Int32(1)));
    assert_eq!(convert(&Value::Boolean(false), ValueKind::Double), Some(Value::Double(0.0)));
    assert_eq!(convert(&Value::Int64(-5), ValueKind::Boolean), Some(Value::Boolean(true)));
    assert_eq!(convert(&Value::Double(0.0), ValueKind::Boolean), Some(Value::Boolean(false)));
}

#[test]
fn test_broadcast_and_extract() {
    assert_eq!(
        convert(&Value::Float(1.5), ValueKind::Vector4),
        Some(Value::Vector4(DVec4::splat(1.5)))
    );
    assert_eq!(
        convert(&Value::Int32(2), ValueKind::Vector2),
        Some(Value::Vector2(DVec2::splat(2.0)))
    );
    assert_eq!(
        convert(&Value::Vector2(DVec2::new(7.0, 8.0)), ValueKind::Int32),
        Some(Value::Int32(7))
    );
}

#[test]
fn test_rotation_kinds_interconvert() {
    let r = Rotator::new(10.0, 45.0, -20.0);
    let q = match convert(&Value::Rotator(r), ValueKind::Quaternion) {
        Some(Value::Quaternion(q)) => q,
        other => panic!("unexpected {:?}", other),
    };
    assert!(q.is_normalized());
    match convert(&Value::Quaternion(q), ValueKind::Rotator) {
        Some(Value::Rotator(back)) => assert!(back.abs_diff_eq(r, 1.0e-6), "{:?}", back),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_string_forms() {
    let cases = [
        (Value::Boolean(true), "true"),
        (Value::Int32(42), "42"),
        (Value::Float(2.5), "2.50"),
        (Value::Double(3.14159), "3.14"),
        (Value::Vector3(DVec3::new(1.0, 2.0, 3.0)), "1,2,3"),
        (Value::Quaternion(DQuat::IDENTITY), "0,0,0,1"),
    ];
    for (value, expected) in cases {
        assert_eq!(convert(&value, ValueKind::String), Some(Value::string(expected)));
    }
}

#[test]
fn test_string_parsing() {
    assert_eq!(convert(&Value::string("42"), ValueKind::Int32), Some(Value::Int32(42)));
    assert_eq!(
        convert(&Value::string("1,2,3"), ValueKind::Vector3),
        Some(Value::Vector3(DVec3::new(1.0, 2.0, 3.0)))
    );
    assert_eq!(convert(&Value::string("TRUE"), ValueKind::Boolean), Some(Value::Boolean(true)));
    assert_eq!(convert(&Value::string("abc"), ValueKind::Int32), None);
    assert_eq!(convert_or_default(&Value::string("abc"), ValueKind::Int32), Value::Int32(0));
}

#[test]
fn test_transform_text_round_trip() {
    let t = Transform::new(DVec3::new(1.0, 2.0, 3.0), DQuat::from_xyzw(0.0, 0.0, 0.6, 0.8), DVec3::splat(2.0));
    let text = convert(&Value::Transform(t), ValueKind::String).unwrap();
    assert_eq!(convert(&text, ValueKind::Transform), Some(Value::Transform(t)));
}

#[test]
fn test_text_kinds_interconvert() {
    let name = convert(&Value::string("Hero"), ValueKind::Name).unwrap();
    assert_eq!(name, Value::Name(Name::new("Hero")));
    assert_eq!(convert(&name, ValueKind::String), Some(Value::string("Hero")));
}

#[test]
fn test_sentinels() {
    let t = trait_of(ValueKind::Double);
    assert_eq!(t.min_sentinel(), Value::Double(f64::MIN));
    assert_eq!(t.max_sentinel(), Value::Double(f64::MAX));

    let v = trait_of(ValueKind::Vector3);
    assert_eq!(v.min_sentinel(), Value::Vector3(DVec3::splat(f64::MAX)));
    assert_eq!(v.max_sentinel(), Value::Vector3(DVec3::splat(-f64::MAX)));
}
