//! Field, axis and transform-part access per value kind.
//!
//! Each accessor is a plain function resolved once per kind by
//! [`extract_field_fn`], [`inject_field_fn`] and [`extract_axis_fn`].
//! Accessors never fail: a value of an unexpected kind reads as `0` and
//! ignores writes.

use std::fmt;

use crate::types::{convert_or_default, Value, ValueKind};
use crate::util::{Axis, DQuat, DVec2, DVec3, DVec4, Rotator, Transform};

/// One scalar view of a composite value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SingleField {
    #[default]
    X = 0,
    Y = 1,
    Z = 2,
    W = 3,
    Length = 4,
    SquaredLength = 5,
    Volume = 6,
    Sum = 7,
}

impl SingleField {
    /// Component field for index 0..=3.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            2 => Some(Self::Z),
            3 => Some(Self::W),
            _ => None,
        }
    }

    /// Component index; derived fields report 0.
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
            Self::W => 3,
            _ => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::W => "W",
            Self::Length => "Length",
            Self::SquaredLength => "SquaredLength",
            Self::Volume => "Volume",
            Self::Sum => "Sum",
        }
    }
}

impl fmt::Display for SingleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sub-part of a transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TransformPart {
    #[default]
    Position = 0,
    Rotation = 1,
    Scale = 2,
}

impl TransformPart {
    /// Kind of the extracted part.
    pub const fn kind(self) -> ValueKind {
        match self {
            Self::Rotation => ValueKind::Quaternion,
            Self::Position | Self::Scale => ValueKind::Vector3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Position => "Position",
            Self::Rotation => "Rotation",
            Self::Scale => "Scale",
        }
    }
}

impl fmt::Display for TransformPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub type ExtractFieldFn = fn(&Value, SingleField) -> f64;
pub type InjectFieldFn = fn(&mut Value, f64, SingleField);
pub type ExtractAxisFn = fn(&Value, Axis) -> DVec3;

// Typed field access.

pub fn vec2_field(v: DVec2, field: SingleField) -> f64 {
    match field {
        SingleField::Y => v.y,
        SingleField::Length => v.length(),
        SingleField::SquaredLength => v.length_squared(),
        SingleField::Volume => v.x * v.y,
        SingleField::Sum => v.x + v.y,
        _ => v.x,
    }
}

pub fn set_vec2_field(v: &mut DVec2, value: f64, field: SingleField) {
    match field {
        SingleField::X => v.x = value,
        SingleField::Y => v.y = value,
        SingleField::Length => *v = v.normalize_or_zero() * value,
        SingleField::SquaredLength => *v = v.normalize_or_zero() * value.sqrt(),
        _ => {}
    }
}

pub fn vec3_field(v: DVec3, field: SingleField) -> f64 {
    match field {
        SingleField::Y => v.y,
        SingleField::Z => v.z,
        SingleField::Length => v.length(),
        SingleField::SquaredLength => v.length_squared(),
        SingleField::Volume => v.x * v.y * v.z,
        SingleField::Sum => v.x + v.y + v.z,
        _ => v.x,
    }
}

pub fn set_vec3_field(v: &mut DVec3, value: f64, field: SingleField) {
    match field {
        SingleField::X => v.x = value,
        SingleField::Y => v.y = value,
        SingleField::Z => v.z = value,
        SingleField::Length => *v = v.normalize_or_zero() * value,
        SingleField::SquaredLength => *v = v.normalize_or_zero() * value.sqrt(),
        _ => {}
    }
}

/// Length fields ignore W; Volume and Sum use all four components.
pub fn vec4_field(v: DVec4, field: SingleField) -> f64 {
    match field {
        SingleField::Y => v.y,
        SingleField::Z => v.z,
        SingleField::W => v.w,
        SingleField::Length => v.truncate().length(),
        SingleField::SquaredLength => v.truncate().length_squared(),
        SingleField::Volume => v.x * v.y * v.z * v.w,
        SingleField::Sum => v.x + v.y + v.z + v.w,
        _ => v.x,
    }
}

pub fn set_vec4_field(v: &mut DVec4, value: f64, field: SingleField) {
    match field {
        SingleField::X => v.x = value,
        SingleField::Y => v.y = value,
        SingleField::Z => v.z = value,
        SingleField::W => v.w = value,
        SingleField::Length => *v = (v.truncate().normalize_or_zero() * value).extend(v.w),
        SingleField::SquaredLength => *v = (v.truncate().normalize_or_zero() * value.sqrt()).extend(v.w),
        _ => {}
    }
}

/// X is roll, Y is yaw, Z is pitch; other fields read roll.
pub fn rotator_field(r: Rotator, field: SingleField) -> f64 {
    match field {
        SingleField::Y => r.yaw,
        SingleField::Z => r.pitch,
        _ => r.roll,
    }
}

pub fn set_rotator_field(r: &mut Rotator, value: f64, field: SingleField) {
    match field {
        SingleField::X => r.roll = value,
        SingleField::Y => r.yaw = value,
        SingleField::Z => r.pitch = value,
        SingleField::Length => *r = r.normalized() * value,
        SingleField::SquaredLength => *r = r.normalized() * value.sqrt(),
        _ => {}
    }
}

pub fn quat_field(q: DQuat, field: SingleField) -> f64 {
    rotator_field(Rotator::from_quat(q), field)
}

pub fn set_quat_field(q: &mut DQuat, value: f64, field: SingleField) {
    let mut r = Rotator::from_quat(*q);
    set_rotator_field(&mut r, value, field);
    *q = r.to_quat();
}

// Value-level accessors, one per kind family.

fn extract_scalar(value: &Value, _field: SingleField) -> f64 {
    match value {
        Value::Boolean(v) => {
            if *v {
                1.0
            } else {
                0.0
            }
        }
        Value::Int32(v) => *v as f64,
        Value::Int64(v) => *v as f64,
        Value::Float(v) => *v as f64,
        Value::Double(v) => *v,
        _ => 0.0,
    }
}

fn inject_scalar(target: &mut Value, value: f64, _field: SingleField) {
    match target {
        Value::Boolean(v) => *v = value != 0.0,
        Value::Int32(v) => *v = value as i32,
        Value::Int64(v) => *v = value as i64,
        Value::Float(v) => *v = value as f32,
        Value::Double(v) => *v = value,
        _ => {}
    }
}

fn extract_vector(value: &Value, field: SingleField) -> f64 {
    match value {
        Value::Vector2(v) => vec2_field(*v, field),
        Value::Vector3(v) => vec3_field(*v, field),
        Value::Vector4(v) => vec4_field(*v, field),
        _ => 0.0,
    }
}

fn inject_vector(target: &mut Value, value: f64, field: SingleField) {
    match target {
        Value::Vector2(v) => set_vec2_field(v, value, field),
        Value::Vector3(v) => set_vec3_field(v, value, field),
        Value::Vector4(v) => set_vec4_field(v, value, field),
        _ => {}
    }
}

fn extract_rotation(value: &Value, field: SingleField) -> f64 {
    match value {
        Value::Rotator(r) => rotator_field(*r, field),
        Value::Quaternion(q) => quat_field(*q, field),
        _ => 0.0,
    }
}

fn inject_rotation(target: &mut Value, value: f64, field: SingleField) {
    match target {
        Value::Rotator(r) => set_rotator_field(r, value, field),
        Value::Quaternion(q) => set_quat_field(q, value, field),
        _ => {}
    }
}

/// Transform fields address the position.
fn extract_transform(value: &Value, field: SingleField) -> f64 {
    match value {
        Value::Transform(t) => vec3_field(t.translation, field),
        _ => 0.0,
    }
}

fn inject_transform(target: &mut Value, value: f64, field: SingleField) {
    if let Value::Transform(t) = target {
        set_vec3_field(&mut t.translation, value, field);
    }
}

fn extract_none(_value: &Value, _field: SingleField) -> f64 {
    0.0
}

fn inject_none(_target: &mut Value, _value: f64, _field: SingleField) {}

/// Field reader for `kind`.
pub fn extract_field_fn(kind: ValueKind) -> ExtractFieldFn {
    match kind {
        ValueKind::Boolean | ValueKind::Int32 | ValueKind::Int64 | ValueKind::Float | ValueKind::Double => {
            extract_scalar
        }
        ValueKind::Vector2 | ValueKind::Vector3 | ValueKind::Vector4 => extract_vector,
        ValueKind::Rotator | ValueKind::Quaternion => extract_rotation,
        ValueKind::Transform => extract_transform,
        ValueKind::String | ValueKind::Name | ValueKind::ObjectPathRef | ValueKind::ClassPathRef => extract_none,
    }
}

/// Field writer for `kind`.
pub fn inject_field_fn(kind: ValueKind) -> InjectFieldFn {
    match kind {
        ValueKind::Boolean | ValueKind::Int32 | ValueKind::Int64 | ValueKind::Float | ValueKind::Double => {
            inject_scalar
        }
        ValueKind::Vector2 | ValueKind::Vector3 | ValueKind::Vector4 => inject_vector,
        ValueKind::Rotator | ValueKind::Quaternion => inject_rotation,
        ValueKind::Transform => inject_transform,
        ValueKind::String | ValueKind::Name | ValueKind::ObjectPathRef | ValueKind::ClassPathRef => inject_none,
    }
}

fn axis_of_rotation(value: &Value, axis: Axis) -> DVec3 {
    match value {
        Value::Rotator(r) => axis.direction(r.to_quat()),
        Value::Quaternion(q) => axis.direction(*q),
        Value::Transform(t) => axis.direction(t.rotation),
        _ => DVec3::X,
    }
}

fn axis_default(_value: &Value, _axis: Axis) -> DVec3 {
    DVec3::X
}

/// Axis reader for `kind`; kinds without a rotation always read +X.
pub fn extract_axis_fn(kind: ValueKind) -> ExtractAxisFn {
    if kind.has_rotation() {
        axis_of_rotation
    } else {
        axis_default
    }
}

/// Copy one part out of a transform.
pub fn extract_component(t: &Transform, part: TransformPart) -> Value {
    match part {
        TransformPart::Position => Value::Vector3(t.translation),
        TransformPart::Rotation => Value::Quaternion(t.rotation),
        TransformPart::Scale => Value::Vector3(t.scale),
    }
}

/// Overwrite one part of a transform, converting `value` to the part's kind.
pub fn inject_component(t: &mut Transform, part: TransformPart, value: &Value) {
    match (part, convert_or_default(value, part.kind())) {
        (TransformPart::Position, Value::Vector3(v)) => t.translation = v,
        (TransformPart::Scale, Value::Vector3(v)) => t.scale = v,
        (TransformPart::Rotation, Value::Quaternion(q)) => t.rotation = q,
        _ => {}
    }
}

/// Scalar field of a transform part (position/scale as vectors, rotation
/// through its rotator).
pub fn component_field(t: &Transform, part: TransformPart, field: SingleField) -> f64 {
    match part {
        TransformPart::Position => vec3_field(t.translation, field),
        TransformPart::Rotation => quat_field(t.rotation, field),
        TransformPart::Scale => vec3_field(t.scale, field),
    }
}

pub fn set_component_field(t: &mut Transform, part: TransformPart, value: f64, field: SingleField) {
    match part {
        TransformPart::Position => set_vec3_field(&mut t.translation, value, field),
        TransformPart::Rotation => set_quat_field(&mut t.rotation, value, field),
        TransformPart::Scale => set_vec3_field(&mut t.scale, value, field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec4_fields() {
        let v = Value::Vector4(DVec4::new(1.0, 2.0, 3.0, 4.0));
        let get = extract_field_fn(ValueKind::Vector4);
        assert_eq!(get(&v, SingleField::X), 1.0);
        assert_eq!(get(&v, SingleField::W), 4.0);
        assert_eq!(get(&v, SingleField::Length), 14.0_f64.sqrt());
        assert_eq!(get(&v, SingleField::SquaredLength), 14.0);
        assert_eq!(get(&v, SingleField::Volume), 24.0);
        assert_eq!(get(&v, SingleField::Sum), 10.0);
    }

    #[test]
    fn test_vec2_ignores_missing_fields() {
        let mut v = Value::Vector2(DVec2::new(3.0, 4.0));
        assert_eq!(extract_field_fn(ValueKind::Vector2)(&v, SingleField::Z), 3.0);
        inject_field_fn(ValueKind::Vector2)(&mut v, 9.0, SingleField::Z);
        assert_eq!(v, Value::Vector2(DVec2::new(3.0, 4.0)));
    }

    #[test]
    fn test_length_injection_rescales() {
        let mut v = Value::Vector3(DVec3::new(3.0, 0.0, 4.0));
        inject_field_fn(ValueKind::Vector3)(&mut v, 10.0, SingleField::Length);
        assert!(matches!(v, Value::Vector3(v) if v.abs_diff_eq(DVec3::new(6.0, 0.0, 8.0), 1e-12)));
        inject_field_fn(ValueKind::Vector3)(&mut v, 4.0, SingleField::SquaredLength);
        match v {
            Value::Vector3(v) => assert!(v.abs_diff_eq(DVec3::new(1.2, 0.0, 1.6), 1e-12)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rotator_field_order() {
        let r = Value::Rotator(Rotator::new(10.0, 20.0, 30.0));
        let get = extract_field_fn(ValueKind::Rotator);
        assert_eq!(get(&r, SingleField::X), 30.0);
        assert_eq!(get(&r, SingleField::Y), 20.0);
        assert_eq!(get(&r, SingleField::Z), 10.0);
    }

    #[test]
    fn test_scalars_and_text() {
        let mut v = Value::Int32(7);
        assert_eq!(extract_field_fn(ValueKind::Int32)(&v, SingleField::Length), 7.0);
        inject_field_fn(ValueKind::Int32)(&mut v, 3.9, SingleField::Y);
        assert_eq!(v, Value::Int32(3));

        let mut s = Value::string("abc");
        assert_eq!(extract_field_fn(ValueKind::String)(&s, SingleField::X), 0.0);
        inject_field_fn(ValueKind::String)(&mut s, 1.0, SingleField::X);
        assert_eq!(s, Value::string("abc"));
    }

    #[test]
    fn test_axis_defaults_forward() {
        let get = extract_axis_fn(ValueKind::Vector3);
        assert_eq!(get(&Value::Vector3(DVec3::Z), Axis::Up), DVec3::X);
        let get = extract_axis_fn(ValueKind::Quaternion);
        assert!(get(&Value::Quaternion(DQuat::IDENTITY), Axis::Up).abs_diff_eq(DVec3::Z, 1e-12));
    }

    #[test]
    fn test_component_round_trip() {
        let mut t = Transform::new(DVec3::new(1.0, 2.0, 3.0), DQuat::IDENTITY, DVec3::splat(2.0));
        assert_eq!(extract_component(&t, TransformPart::Scale), Value::Vector3(DVec3::splat(2.0)));
        inject_component(&mut t, TransformPart::Position, &Value::Double(5.0));
        assert_eq!(t.translation, DVec3::splat(5.0));
        set_component_field(&mut t, TransformPart::Scale, 7.0, SingleField::Z);
        assert_eq!(t.scale, DVec3::new(2.0, 2.0, 7.0));
        assert_eq!(component_field(&t, TransformPart::Scale, SingleField::Z), 7.0);
    }
}
