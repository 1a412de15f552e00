//! Per-kind classification table.

use std::fmt;
use std::sync::Arc;

use super::{Name, SoftClassPath, SoftObjectPath, Value, ValueKind};
use crate::util::{DVec2, DVec3, DVec4, Rotator, Transform};

/// Classification flags for one value kind.
///
/// One record exists per kind; [`trait_of`] is a constant-time lookup into a
/// static table.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTrait {
    pub kind: ValueKind,
    pub is_numeric: bool,
    pub is_vector: bool,
    pub is_rotation: bool,
    pub is_string: bool,
    pub supports_lerp: bool,
    pub supports_min_max: bool,
    pub supports_arithmetic: bool,
}

const fn flags(kind: ValueKind) -> TypeTrait {
    TypeTrait {
        kind,
        is_numeric: false,
        is_vector: false,
        is_rotation: false,
        is_string: false,
        supports_lerp: false,
        supports_min_max: false,
        supports_arithmetic: false,
    }
}

impl TypeTrait {
    pub const BOOLEAN: Self = Self { is_numeric: true, supports_min_max: true, ..flags(ValueKind::Boolean) };
    pub const INT32: Self = Self::number(ValueKind::Int32);
    pub const INT64: Self = Self::number(ValueKind::Int64);
    pub const FLOAT: Self = Self::number(ValueKind::Float);
    pub const DOUBLE: Self = Self::number(ValueKind::Double);
    pub const VECTOR2: Self = Self::vector(ValueKind::Vector2);
    pub const VECTOR3: Self = Self::vector(ValueKind::Vector3);
    pub const VECTOR4: Self = Self::vector(ValueKind::Vector4);
    pub const ROTATOR: Self = Self {
        is_rotation: true,
        supports_lerp: true,
        supports_min_max: true,
        supports_arithmetic: true,
        ..flags(ValueKind::Rotator)
    };
    pub const QUATERNION: Self = Self { is_rotation: true, supports_lerp: true, ..flags(ValueKind::Quaternion) };
    pub const TRANSFORM: Self = Self { supports_lerp: true, ..flags(ValueKind::Transform) };
    pub const STRING: Self = Self::text(ValueKind::String);
    pub const NAME: Self = Self::text(ValueKind::Name);
    pub const OBJECT_PATH_REF: Self = Self::text(ValueKind::ObjectPathRef);
    pub const CLASS_PATH_REF: Self = Self::text(ValueKind::ClassPathRef);

    const fn number(kind: ValueKind) -> Self {
        Self {
            is_numeric: true,
            supports_lerp: true,
            supports_min_max: true,
            supports_arithmetic: true,
            ..flags(kind)
        }
    }

    const fn vector(kind: ValueKind) -> Self {
        Self {
            is_vector: true,
            supports_lerp: true,
            supports_min_max: true,
            supports_arithmetic: true,
            ..flags(kind)
        }
    }

    const fn text(kind: ValueKind) -> Self {
        Self { is_string: true, ..flags(kind) }
    }

    /// Starting value for a running minimum.
    ///
    /// Vector and rotation sentinels are inverted (min is the largest value)
    /// so the first comparison always replaces them.
    pub fn min_sentinel(&self) -> Value {
        sentinel(self.kind, true)
    }

    /// Starting value for a running maximum.
    pub fn max_sentinel(&self) -> Value {
        sentinel(self.kind, false)
    }
}

fn sentinel(kind: ValueKind, min: bool) -> Value {
    // Inverted: the min sentinel of composite kinds is +MAX.
    let composite = if min { f64::MAX } else { -f64::MAX };
    match kind {
        ValueKind::Boolean => Value::Boolean(!min),
        ValueKind::Int32 => Value::Int32(if min { i32::MIN } else { i32::MAX }),
        ValueKind::Int64 => Value::Int64(if min { i64::MIN } else { i64::MAX }),
        ValueKind::Float => Value::Float(if min { f32::MIN } else { f32::MAX }),
        ValueKind::Double => Value::Double(if min { f64::MIN } else { f64::MAX }),
        ValueKind::Vector2 => Value::Vector2(DVec2::splat(composite)),
        ValueKind::Vector3 => Value::Vector3(DVec3::splat(composite)),
        ValueKind::Vector4 => Value::Vector4(DVec4::splat(composite)),
        ValueKind::Rotator => Value::Rotator(Rotator::splat(composite)),
        ValueKind::Quaternion => Value::Quaternion(Rotator::splat(composite).to_quat()),
        ValueKind::Transform => Value::Transform(Transform::new(
            DVec3::splat(composite),
            Rotator::splat(composite).to_quat(),
            DVec3::splat(composite),
        )),
        ValueKind::String => Value::String(Arc::from("")),
        ValueKind::Name => Value::Name(Name::none()),
        ValueKind::ObjectPathRef => Value::ObjectPathRef(SoftObjectPath::default()),
        ValueKind::ClassPathRef => Value::ClassPathRef(SoftClassPath::default()),
    }
}

static TRAITS: [TypeTrait; ValueKind::COUNT] = [
    TypeTrait::BOOLEAN,
    TypeTrait::INT32,
    TypeTrait::INT64,
    TypeTrait::FLOAT,
    TypeTrait::DOUBLE,
    TypeTrait::VECTOR2,
    TypeTrait::VECTOR3,
    TypeTrait::VECTOR4,
    TypeTrait::ROTATOR,
    TypeTrait::QUATERNION,
    TypeTrait::TRANSFORM,
    TypeTrait::STRING,
    TypeTrait::NAME,
    TypeTrait::OBJECT_PATH_REF,
    TypeTrait::CLASS_PATH_REF,
];

/// Trait record of `kind`.
#[inline]
pub fn trait_of(kind: ValueKind) -> &'static TypeTrait {
    &TRAITS[kind.index()]
}

impl fmt::Debug for TypeTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags = Vec::new();
        if self.is_numeric { tags.push("numeric"); }
        if self.is_vector { tags.push("vector"); }
        if self.is_rotation { tags.push("rotation"); }
        if self.is_string { tags.push("string"); }
        if self.supports_lerp { tags.push("lerp"); }
        if self.supports_min_max { tags.push("minmax"); }
        if self.supports_arithmetic { tags.push("arith"); }
        write!(f, "TypeTrait({}: {})", self.kind, tags.join("|"))
    }
}
