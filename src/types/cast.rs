//! Per-kind conversion rules.
//!
//! Each source type implements [`Cast`] with one method per target kind. A
//! method left at its default (`None`) is either a formally unsupported pair
//! or a parse that failed; the conversion table decides which is which.

use super::text::{
    format_components, format_real, format_transform, parse_bool, parse_f64, parse_i64,
    parse_quat, parse_rotator, parse_transform, parse_vec2, parse_vec3, parse_vec4,
};
use super::{AttributeType, Name, SoftClassPath, SoftObjectPath, Value, ValueKind};
use crate::util::{quat_is_identity, DQuat, DVec2, DVec3, DVec4, Rotator, Transform, KINDA_SMALL_NUMBER};

/// Source side of a conversion.
pub(crate) trait Cast {
    const KIND: ValueKind;

    /// Borrow the payload of a value of kind [`Self::KIND`].
    fn peek(value: &Value) -> Option<&Self>;

    fn to_bool(&self) -> Option<bool> {
        None
    }
    fn to_i32(&self) -> Option<i32> {
        None
    }
    fn to_i64(&self) -> Option<i64> {
        None
    }
    fn to_f32(&self) -> Option<f32> {
        None
    }
    fn to_f64(&self) -> Option<f64> {
        None
    }
    fn to_vec2(&self) -> Option<DVec2> {
        None
    }
    fn to_vec3(&self) -> Option<DVec3> {
        None
    }
    fn to_vec4(&self) -> Option<DVec4> {
        None
    }
    fn to_rotator(&self) -> Option<Rotator> {
        None
    }
    fn to_quat(&self) -> Option<DQuat> {
        None
    }
    fn to_transform(&self) -> Option<Transform> {
        None
    }
    fn to_object_path(&self) -> Option<SoftObjectPath> {
        None
    }
    fn to_class_path(&self) -> Option<SoftClassPath> {
        None
    }

    /// Printed representation.
    fn to_text(&self) -> Option<String>;
}

/// Target side of a conversion.
pub(crate) trait CastTarget: AttributeType {
    fn cast<S: Cast + ?Sized>(source: &S) -> Option<Self>;
}

impl CastTarget for bool {
    fn cast<S: Cast + ?Sized>(s: &S) -> Option<Self> {
        s.to_bool()
    }
}
impl CastTarget for i32 {
    fn cast<S: Cast + ?Sized>(s: &S) -> Option<Self> {
        s.to_i32()
    }
}
impl CastTarget for i64 {
    fn cast<S: Cast + ?Sized>(s: &S) -> Option<Self> {
        s.to_i64()
    }
}
impl CastTarget for f32 {
    fn cast<S: Cast + ?Sized>(s: &S) -> Option<Self> {
        s.to_f32()
    }
}
impl CastTarget for f64 {
    fn cast<S: Cast + ?Sized>(s: &S) -> Option<Self> {
        s.to_f64()
    }
}
impl CastTarget for DVec2 {
    fn cast<S: Cast + ?Sized>(s: &S) -> Option<Self> {
        s.to_vec2()
    }
}
impl CastTarget for DVec3 {
    fn cast<S: Cast + ?Sized>(s: &S) -> Option<Self> {
        s.to_vec3()
    }
}
impl CastTarget for DVec4 {
    fn cast<S: Cast + ?Sized>(s: &S) -> Option<Self> {
        s.to_vec4()
    }
}
impl CastTarget for Rotator {
    fn cast<S: Cast + ?Sized>(s: &S) -> Option<Self> {
        s.to_rotator()
    }
}
impl CastTarget for DQuat {
    fn cast<S: Cast + ?Sized>(s: &S) -> Option<Self> {
        s.to_quat()
    }
}
impl CastTarget for Transform {
    fn cast<S: Cast + ?Sized>(s: &S) -> Option<Self> {
        s.to_transform()
    }
}
impl CastTarget for String {
    fn cast<S: Cast + ?Sized>(s: &S) -> Option<Self> {
        s.to_text()
    }
}
impl CastTarget for Name {
    fn cast<S: Cast + ?Sized>(s: &S) -> Option<Self> {
        s.to_text().map(Name::new)
    }
}
impl CastTarget for SoftObjectPath {
    fn cast<S: Cast + ?Sized>(s: &S) -> Option<Self> {
        s.to_object_path()
    }
}
impl CastTarget for SoftClassPath {
    fn cast<S: Cast + ?Sized>(s: &S) -> Option<Self> {
        s.to_class_path()
    }
}

impl Cast for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn peek(value: &Value) -> Option<&Self> {
        match value {
            Value::Boolean(v) => Some(v),
            _ => None,
        }
    }

    fn to_bool(&self) -> Option<bool> {
        Some(*self)
    }
    fn to_i32(&self) -> Option<i32> {
        Some(*self as i32)
    }
    fn to_i64(&self) -> Option<i64> {
        Some(*self as i64)
    }
    fn to_f32(&self) -> Option<f32> {
        Some(if *self { 1.0 } else { 0.0 })
    }
    fn to_f64(&self) -> Option<f64> {
        Some(if *self { 1.0 } else { 0.0 })
    }
    fn to_vec2(&self) -> Option<DVec2> {
        self.to_f64().map(DVec2::splat)
    }
    fn to_vec3(&self) -> Option<DVec3> {
        self.to_f64().map(DVec3::splat)
    }
    fn to_vec4(&self) -> Option<DVec4> {
        self.to_f64().map(DVec4::splat)
    }
    fn to_rotator(&self) -> Option<Rotator> {
        Some(Rotator::splat(if *self { 180.0 } else { 0.0 }))
    }
    fn to_quat(&self) -> Option<DQuat> {
        self.to_rotator().map(Rotator::to_quat)
    }
    fn to_text(&self) -> Option<String> {
        Some((if *self { "true" } else { "false" }).to_string())
    }
}

macro_rules! scalar_cast {
    ($ty:ty, $variant:ident, $text:expr) => {
        impl Cast for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn peek(value: &Value) -> Option<&Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn to_bool(&self) -> Option<bool> {
                Some(*self != 0 as $ty)
            }
            fn to_i32(&self) -> Option<i32> {
                Some(*self as i32)
            }
            fn to_i64(&self) -> Option<i64> {
                Some(*self as i64)
            }
            fn to_f32(&self) -> Option<f32> {
                Some(*self as f32)
            }
            fn to_f64(&self) -> Option<f64> {
                Some(*self as f64)
            }
            fn to_vec2(&self) -> Option<DVec2> {
                Some(DVec2::splat(*self as f64))
            }
            fn to_vec3(&self) -> Option<DVec3> {
                Some(DVec3::splat(*self as f64))
            }
            fn to_vec4(&self) -> Option<DVec4> {
                Some(DVec4::splat(*self as f64))
            }
            fn to_rotator(&self) -> Option<Rotator> {
                Some(Rotator::splat(*self as f64))
            }
            fn to_quat(&self) -> Option<DQuat> {
                Some(Rotator::splat(*self as f64).to_quat())
            }
            fn to_text(&self) -> Option<String> {
                Some(($text)(*self))
            }
        }
    };
}

scalar_cast!(i32, Int32, |v: i32| v.to_string());
scalar_cast!(i64, Int64, |v: i64| v.to_string());
scalar_cast!(f32, Float, |v: f32| format_real(v as f64));
scalar_cast!(f64, Double, format_real);

impl Cast for DVec2 {
    const KIND: ValueKind = ValueKind::Vector2;

    fn peek(value: &Value) -> Option<&Self> {
        match value {
            Value::Vector2(v) => Some(v),
            _ => None,
        }
    }

    fn to_bool(&self) -> Option<bool> {
        Some(self.length_squared() > 0.0)
    }
    fn to_i32(&self) -> Option<i32> {
        Some(self.x as i32)
    }
    fn to_i64(&self) -> Option<i64> {
        Some(self.x as i64)
    }
    fn to_f32(&self) -> Option<f32> {
        Some(self.x as f32)
    }
    fn to_f64(&self) -> Option<f64> {
        Some(self.x)
    }
    fn to_vec2(&self) -> Option<DVec2> {
        Some(*self)
    }
    fn to_vec3(&self) -> Option<DVec3> {
        Some(self.extend(0.0))
    }
    fn to_vec4(&self) -> Option<DVec4> {
        Some(self.extend(0.0).extend(0.0))
    }
    fn to_rotator(&self) -> Option<Rotator> {
        Some(Rotator::new(self.x, self.y, 0.0))
    }
    fn to_quat(&self) -> Option<DQuat> {
        self.to_rotator().map(Rotator::to_quat)
    }
    fn to_transform(&self) -> Option<Transform> {
        Some(Transform::from_translation(self.extend(0.0)))
    }
    fn to_text(&self) -> Option<String> {
        Some(format_components(&self.to_array()))
    }
}

impl Cast for DVec3 {
    const KIND: ValueKind = ValueKind::Vector3;

    fn peek(value: &Value) -> Option<&Self> {
        match value {
            Value::Vector3(v) => Some(v),
            _ => None,
        }
    }

    fn to_bool(&self) -> Option<bool> {
        Some(self.length_squared() > 0.0)
    }
    fn to_i32(&self) -> Option<i32> {
        Some(self.x as i32)
    }
    fn to_i64(&self) -> Option<i64> {
        Some(self.x as i64)
    }
    fn to_f32(&self) -> Option<f32> {
        Some(self.x as f32)
    }
    fn to_f64(&self) -> Option<f64> {
        Some(self.x)
    }
    fn to_vec2(&self) -> Option<DVec2> {
        Some(self.truncate())
    }
    fn to_vec3(&self) -> Option<DVec3> {
        Some(*self)
    }
    fn to_vec4(&self) -> Option<DVec4> {
        Some(self.extend(0.0))
    }
    fn to_rotator(&self) -> Option<Rotator> {
        Some(Rotator::new(self.x, self.y, self.z))
    }
    fn to_quat(&self) -> Option<DQuat> {
        self.to_rotator().map(Rotator::to_quat)
    }
    fn to_transform(&self) -> Option<Transform> {
        Some(Transform::from_translation(*self))
    }
    fn to_text(&self) -> Option<String> {
        Some(format_components(&self.to_array()))
    }
}

impl Cast for DVec4 {
    const KIND: ValueKind = ValueKind::Vector4;

    fn peek(value: &Value) -> Option<&Self> {
        match value {
            Value::Vector4(v) => Some(v),
            _ => None,
        }
    }

    fn to_bool(&self) -> Option<bool> {
        Some(self.length_squared() > 0.0)
    }
    fn to_i32(&self) -> Option<i32> {
        Some(self.x as i32)
    }
    fn to_i64(&self) -> Option<i64> {
        Some(self.x as i64)
    }
    fn to_f32(&self) -> Option<f32> {
        Some(self.x as f32)
    }
    fn to_f64(&self) -> Option<f64> {
        Some(self.x)
    }
    fn to_vec2(&self) -> Option<DVec2> {
        Some(self.truncate().truncate())
    }
    fn to_vec3(&self) -> Option<DVec3> {
        Some(self.truncate())
    }
    fn to_vec4(&self) -> Option<DVec4> {
        Some(*self)
    }
    fn to_rotator(&self) -> Option<Rotator> {
        Some(Rotator::new(self.x, self.y, self.z))
    }
    fn to_quat(&self) -> Option<DQuat> {
        let q = DQuat::from_vec4(*self);
        Some(if q.length_squared() > 0.0 { q.normalize() } else { DQuat::IDENTITY })
    }
    fn to_transform(&self) -> Option<Transform> {
        Some(Transform::from_translation(self.truncate()))
    }
    fn to_text(&self) -> Option<String> {
        Some(format_components(&self.to_array()))
    }
}

impl Cast for Rotator {
    const KIND: ValueKind = ValueKind::Rotator;

    fn peek(value: &Value) -> Option<&Self> {
        match value {
            Value::Rotator(v) => Some(v),
            _ => None,
        }
    }

    fn to_bool(&self) -> Option<bool> {
        Some(!self.is_nearly_zero(KINDA_SMALL_NUMBER))
    }
    fn to_i32(&self) -> Option<i32> {
        Some(self.pitch as i32)
    }
    fn to_i64(&self) -> Option<i64> {
        Some(self.pitch as i64)
    }
    fn to_f32(&self) -> Option<f32> {
        Some(self.pitch as f32)
    }
    fn to_f64(&self) -> Option<f64> {
        Some(self.pitch)
    }
    fn to_vec2(&self) -> Option<DVec2> {
        Some(DVec2::new(self.pitch, self.yaw))
    }
    fn to_vec3(&self) -> Option<DVec3> {
        Some(DVec3::new(self.pitch, self.yaw, self.roll))
    }
    fn to_vec4(&self) -> Option<DVec4> {
        Some(DVec4::new(self.pitch, self.yaw, self.roll, 0.0))
    }
    fn to_rotator(&self) -> Option<Rotator> {
        Some(*self)
    }
    fn to_quat(&self) -> Option<DQuat> {
        Some(Rotator::to_quat(*self))
    }
    fn to_transform(&self) -> Option<Transform> {
        Some(Transform::from_rotation(Rotator::to_quat(*self)))
    }
    fn to_text(&self) -> Option<String> {
        Some(format_components(&[self.pitch, self.yaw, self.roll]))
    }
}

impl Cast for DQuat {
    const KIND: ValueKind = ValueKind::Quaternion;

    fn peek(value: &Value) -> Option<&Self> {
        match value {
            Value::Quaternion(v) => Some(v),
            _ => None,
        }
    }

    fn to_bool(&self) -> Option<bool> {
        Some(!quat_is_identity(*self, KINDA_SMALL_NUMBER))
    }
    fn to_i32(&self) -> Option<i32> {
        Some(self.w as i32)
    }
    fn to_i64(&self) -> Option<i64> {
        Some(self.w as i64)
    }
    fn to_f32(&self) -> Option<f32> {
        Some(self.w as f32)
    }
    fn to_f64(&self) -> Option<f64> {
        Some(self.w)
    }
    fn to_vec2(&self) -> Option<DVec2> {
        let r = Rotator::from_quat(*self);
        Some(DVec2::new(r.pitch, r.yaw))
    }
    fn to_vec3(&self) -> Option<DVec3> {
        let r = Rotator::from_quat(*self);
        Some(DVec3::new(r.pitch, r.yaw, r.roll))
    }
    fn to_vec4(&self) -> Option<DVec4> {
        Some(DVec4::new(self.x, self.y, self.z, self.w))
    }
    fn to_rotator(&self) -> Option<Rotator> {
        Some(Rotator::from_quat(*self))
    }
    fn to_quat(&self) -> Option<DQuat> {
        Some(*self)
    }
    fn to_transform(&self) -> Option<Transform> {
        Some(Transform::from_rotation(*self))
    }
    fn to_text(&self) -> Option<String> {
        Some(format_components(&[self.x, self.y, self.z, self.w]))
    }
}

impl Cast for Transform {
    const KIND: ValueKind = ValueKind::Transform;

    fn peek(value: &Value) -> Option<&Self> {
        match value {
            Value::Transform(v) => Some(v),
            _ => None,
        }
    }

    fn to_bool(&self) -> Option<bool> {
        Some(!self.is_identity(KINDA_SMALL_NUMBER))
    }
    fn to_vec2(&self) -> Option<DVec2> {
        Some(self.translation.truncate())
    }
    fn to_vec3(&self) -> Option<DVec3> {
        Some(self.translation)
    }
    fn to_vec4(&self) -> Option<DVec4> {
        Some(self.translation.extend(0.0))
    }
    fn to_rotator(&self) -> Option<Rotator> {
        Some(self.rotator())
    }
    fn to_quat(&self) -> Option<DQuat> {
        Some(self.rotation)
    }
    fn to_transform(&self) -> Option<Transform> {
        Some(*self)
    }
    fn to_text(&self) -> Option<String> {
        Some(format_transform(self))
    }
}

impl Cast for str {
    const KIND: ValueKind = ValueKind::String;

    fn peek(value: &Value) -> Option<&Self> {
        match value {
            Value::String(v) => Some(&**v),
            _ => None,
        }
    }

    fn to_bool(&self) -> Option<bool> {
        parse_bool(self).or_else(|| parse_f64(self).map(|v| v != 0.0))
    }
    fn to_i32(&self) -> Option<i32> {
        parse_i64(self).map(|v| v as i32)
    }
    fn to_i64(&self) -> Option<i64> {
        parse_i64(self)
    }
    fn to_f32(&self) -> Option<f32> {
        parse_f64(self).map(|v| v as f32)
    }
    fn to_f64(&self) -> Option<f64> {
        parse_f64(self)
    }
    fn to_vec2(&self) -> Option<DVec2> {
        parse_vec2(self)
    }
    fn to_vec3(&self) -> Option<DVec3> {
        parse_vec3(self)
    }
    fn to_vec4(&self) -> Option<DVec4> {
        parse_vec4(self)
    }
    fn to_rotator(&self) -> Option<Rotator> {
        parse_rotator(self)
    }
    fn to_quat(&self) -> Option<DQuat> {
        parse_quat(self)
    }
    fn to_transform(&self) -> Option<Transform> {
        parse_transform(self)
    }
    fn to_object_path(&self) -> Option<SoftObjectPath> {
        Some(SoftObjectPath::new(self))
    }
    fn to_class_path(&self) -> Option<SoftClassPath> {
        Some(SoftClassPath::new(self))
    }
    fn to_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl Cast for Name {
    const KIND: ValueKind = ValueKind::Name;

    fn peek(value: &Value) -> Option<&Self> {
        match value {
            Value::Name(v) => Some(v),
            _ => None,
        }
    }

    /// Literal when the name spells one, otherwise "is not none".
    fn to_bool(&self) -> Option<bool> {
        self.as_str().to_bool().or(Some(!self.is_none()))
    }
    fn to_i32(&self) -> Option<i32> {
        self.as_str().to_i32()
    }
    fn to_i64(&self) -> Option<i64> {
        self.as_str().to_i64()
    }
    fn to_f32(&self) -> Option<f32> {
        self.as_str().to_f32()
    }
    fn to_f64(&self) -> Option<f64> {
        self.as_str().to_f64()
    }
    fn to_vec2(&self) -> Option<DVec2> {
        self.as_str().to_vec2()
    }
    fn to_vec3(&self) -> Option<DVec3> {
        self.as_str().to_vec3()
    }
    fn to_vec4(&self) -> Option<DVec4> {
        self.as_str().to_vec4()
    }
    fn to_rotator(&self) -> Option<Rotator> {
        self.as_str().to_rotator()
    }
    fn to_quat(&self) -> Option<DQuat> {
        self.as_str().to_quat()
    }
    fn to_transform(&self) -> Option<Transform> {
        self.as_str().to_transform()
    }
    fn to_object_path(&self) -> Option<SoftObjectPath> {
        Some(SoftObjectPath::new(self.as_str()))
    }
    fn to_class_path(&self) -> Option<SoftClassPath> {
        Some(SoftClassPath::new(self.as_str()))
    }
    fn to_text(&self) -> Option<String> {
        Some(self.as_str().to_string())
    }
}

impl Cast for SoftObjectPath {
    const KIND: ValueKind = ValueKind::ObjectPathRef;

    fn peek(value: &Value) -> Option<&Self> {
        match value {
            Value::ObjectPathRef(v) => Some(v),
            _ => None,
        }
    }

    fn to_bool(&self) -> Option<bool> {
        Some(self.is_valid())
    }
    fn to_object_path(&self) -> Option<SoftObjectPath> {
        Some(self.clone())
    }
    fn to_class_path(&self) -> Option<SoftClassPath> {
        Some(SoftClassPath::new(self.as_str()))
    }
    fn to_text(&self) -> Option<String> {
        Some(self.as_str().to_string())
    }
}

impl Cast for SoftClassPath {
    const KIND: ValueKind = ValueKind::ClassPathRef;

    fn peek(value: &Value) -> Option<&Self> {
        match value {
            Value::ClassPathRef(v) => Some(v),
            _ => None,
        }
    }

    fn to_bool(&self) -> Option<bool> {
        Some(self.is_valid())
    }
    fn to_object_path(&self) -> Option<SoftObjectPath> {
        Some(SoftObjectPath::new(self.as_str()))
    }
    fn to_class_path(&self) -> Option<SoftClassPath> {
        Some(self.clone())
    }
    fn to_text(&self) -> Option<String> {
        Some(self.as_str().to_string())
    }
}
