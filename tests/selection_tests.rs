//! Integration tests for selectors and sub-selections.

use attrkit::data::PointProperty;
use attrkit::select::{CachedSubSelection, Domain, Selector, SelectorTarget, SubSelection, TransformPart};
use attrkit::types::{convert_or_default, Value, ValueKind};
use attrkit::util::{quat_same_rotation, Axis, DQuat, DVec3, DVec4, Error, Rotator, Transform};

const EPS: f64 = 1.0e-9;

fn read(path: &str, value: &Value, working: ValueKind) -> Value {
    let selection = SubSelection::from_path(path);
    CachedSubSelection::resolve(&selection, value.kind(), working).apply_get(value)
}

fn read_f64(path: &str, value: &Value) -> f64 {
    match read(path, value, ValueKind::Double) {
        Value::Double(v) => v,
        other => panic!("expected a double, got {:?}", other),
    }
}

fn read_vec3(path: &str, value: &Value) -> DVec3 {
    match read(path, value, ValueKind::Vector3) {
        Value::Vector3(v) => v,
        other => panic!("expected a vector, got {:?}", other),
    }
}

#[test]
fn test_selector_forms() {
    let s = Selector::parse("MyTransform.Rotation.Forward").unwrap();
    assert_eq!(s.name(), "MyTransform");
    assert_eq!(s.extras(), &["Rotation".to_string(), "Forward".to_string()]);
    assert_eq!(s.sub_selection().component, Some(TransformPart::Rotation));
    assert_eq!(s.sub_selection().axis, Some(Axis::Forward));

    let s = Selector::parse("$Rotation.Up").unwrap();
    assert_eq!(s.as_property(), Some(PointProperty::Rotation));

    let s = Selector::parse("@Data.Count").unwrap();
    assert_eq!(s.domain(), Domain::Data);
    assert_eq!(s.target(), &SelectorTarget::Attribute("Count".into()));
    assert_eq!(s.to_string(), "@Data.Count");

    assert!(matches!(Selector::parse(""), Err(Error::InvalidSelector { .. })));
    assert!(matches!(Selector::parse("$Nope"), Err(Error::PropertyNotFound(_))));
}

#[test]
fn test_empty_selection_is_plain_conversion() {
    let empty: [&str; 0] = [];
    let selection = SubSelection::parse(&empty);
    assert!(!selection.is_valid);

    for real in ValueKind::ALL {
        let source = Value::default_of(real);
        for working in ValueKind::ALL {
            let cached = CachedSubSelection::resolve(&selection, real, working);
            assert!(!cached.applies_to_source_read());
            assert_eq!(cached.apply_get(&source), convert_or_default(&source, working), "{} -> {}", real, working);

            let mut target = Value::default_of(real);
            let working_value = Value::default_of(working);
            cached.apply_set(&mut target, &working_value);
            assert_eq!(target, convert_or_default(&working_value, real), "{} <- {}", real, working);
        }
    }
}

#[test]
fn test_unknown_tokens_are_invalid() {
    let selection = SubSelection::from_path(".Banana");
    assert!(!selection.is_valid);
    assert_eq!(selection.get_result_kind(ValueKind::Vector3), ValueKind::Vector3);
}

#[test]
fn test_field_extraction() {
    let v = Value::Vector4(DVec4::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(read_f64(".X", &v), 1.0);
    assert_eq!(read_f64(".Y", &v), 2.0);
    assert_eq!(read_f64(".Z", &v), 3.0);
    assert_eq!(read_f64(".W", &v), 4.0);
    assert_eq!(read_f64(".a", &v), 4.0);
    assert!((read_f64(".Length", &v) - 14.0f64.sqrt()).abs() < EPS);
    assert_eq!(read_f64(".LenSqr", &v), 14.0);
    assert_eq!(read_f64(".Sum", &v), 10.0);

    let v3 = Value::Vector3(DVec3::new(1.0, 2.0, 3.0));
    assert_eq!(read_f64(".Sum", &v3), 6.0);
    assert_eq!(read_f64(".Volume", &v3), 6.0);
}

#[test]
fn test_field_on_scalar_does_not_apply() {
    let selection = SubSelection::from_path(".Y");
    let cached = CachedSubSelection::resolve(&selection, ValueKind::Double, ValueKind::Double);
    assert!(!cached.applies_to_source_read());
    assert_eq!(cached.apply_get(&Value::Double(5.0)), Value::Double(5.0));
}

#[test]
fn test_axis_extraction() {
    let identity = Value::Quaternion(DQuat::IDENTITY);
    assert!((read_vec3(".Forward", &identity) - DVec3::X).length() < EPS);
    assert!((read_vec3(".Up", &identity) - DVec3::Z).length() < EPS);
    assert!((read_vec3(".Left", &identity) + DVec3::Y).length() < EPS);

    let yawed = Value::Rotator(Rotator::new(0.0, 90.0, 0.0));
    assert!((read_vec3(".Right", &yawed) - DVec3::new(-1.0, 0.0, 0.0)).length() < 1.0e-6);
    assert!((read_vec3(".Forward", &yawed) - DVec3::Y).length() < 1.0e-6);
}

#[test]
fn test_transform_components() {
    let p = DVec3::new(1.0, 2.0, 3.0);
    let r = Rotator::new(0.0, 30.0, 0.0).to_quat();
    let s = DVec3::new(2.0, 2.0, 4.0);
    let t = Value::Transform(Transform::new(p, r, s));

    assert_eq!(read(".Position", &t, ValueKind::Vector3), Value::Vector3(p));
    assert_eq!(read(".Scale", &t, ValueKind::Vector3), Value::Vector3(s));
    match read(".Rotation", &t, ValueKind::Quaternion) {
        Value::Quaternion(q) => assert!(quat_same_rotation(q, r, 1.0e-9)),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(read_f64(".Pos.Y", &t), 2.0);
    assert_eq!(read_f64(".Scale.Z", &t), 4.0);
}

#[test]
fn test_position_x_write_is_isolated() {
    let p = DVec3::new(1.0, 2.0, 3.0);
    let r = Rotator::new(10.0, 20.0, 30.0).to_quat();
    let s = DVec3::splat(3.0);
    let mut t = Value::Transform(Transform::new(p, r, s));

    let selection = SubSelection::from_path(".Position.X");
    let cached = CachedSubSelection::resolve(&selection, ValueKind::Transform, ValueKind::Double);
    assert!(cached.applies_to_target_write());
    cached.apply_set(&mut t, &Value::Double(9.0));

    let Value::Transform(t) = t else { panic!("kind changed") };
    assert_eq!(t.translation, DVec3::new(9.0, 2.0, 3.0));
    assert_eq!(t.rotation, r);
    assert_eq!(t.scale, s);
}

#[test]
fn test_axis_is_read_only() {
    let selection = SubSelection::from_path(".Up");
    let cached = CachedSubSelection::resolve(&selection, ValueKind::Quaternion, ValueKind::Vector3);
    assert!(cached.applies_to_source_read());
    assert!(!cached.applies_to_target_write());
}

#[test]
fn test_broadcast_then_extract_x() {
    for scalar in [0.0, 1.5, -42.0] {
        let vector = read("", &Value::Double(scalar), ValueKind::Vector3);
        assert_eq!(read_f64(".X", &vector), scalar);
    }
}
