//! Per-point engine properties.

use std::fmt;

use crate::types::{convert_or_default, Value, ValueKind};
use crate::util::{DQuat, DVec3, DVec4, Transform};

/// Built-in properties every point carries, plus the read-only `Index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PointProperty {
    Density = 0,
    BoundsMin = 1,
    BoundsMax = 2,
    Extents = 3,
    Color = 4,
    Position = 5,
    Rotation = 6,
    Scale = 7,
    Transform = 8,
    Steepness = 9,
    LocalCenter = 10,
    Seed = 11,
    /// Point index. Computed, never stored.
    Index = 12,
}

impl PointProperty {
    pub const ALL: [PointProperty; 13] = [
        Self::Density,
        Self::BoundsMin,
        Self::BoundsMax,
        Self::Extents,
        Self::Color,
        Self::Position,
        Self::Rotation,
        Self::Scale,
        Self::Transform,
        Self::Steepness,
        Self::LocalCenter,
        Self::Seed,
        Self::Index,
    ];

    /// Kind the property is stored as.
    pub const fn kind(self) -> ValueKind {
        match self {
            Self::Density | Self::Steepness => ValueKind::Float,
            Self::BoundsMin
            | Self::BoundsMax
            | Self::Extents
            | Self::Position
            | Self::Scale
            | Self::LocalCenter => ValueKind::Vector3,
            Self::Color => ValueKind::Vector4,
            Self::Rotation => ValueKind::Quaternion,
            Self::Transform => ValueKind::Transform,
            Self::Seed | Self::Index => ValueKind::Int32,
        }
    }

    #[inline]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::Index)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Density => "Density",
            Self::BoundsMin => "BoundsMin",
            Self::BoundsMax => "BoundsMax",
            Self::Extents => "Extents",
            Self::Color => "Color",
            Self::Position => "Position",
            Self::Rotation => "Rotation",
            Self::Scale => "Scale",
            Self::Transform => "Transform",
            Self::Steepness => "Steepness",
            Self::LocalCenter => "LocalCenter",
            Self::Seed => "Seed",
            Self::Index => "Index",
        }
    }

    /// Case-insensitive lookup; `Location` is accepted for `Position`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("location") {
            return Some(Self::Position);
        }
        Self::ALL.into_iter().find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for PointProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Property storage of one point.
///
/// `Extents` and `LocalCenter` are derived from the bounds; writing them
/// moves the bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub transform: Transform,
    pub density: f32,
    pub bounds_min: DVec3,
    pub bounds_max: DVec3,
    pub color: DVec4,
    pub steepness: f32,
    pub seed: i32,
}

impl Default for Point {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            density: 1.0,
            bounds_min: DVec3::splat(-1.0),
            bounds_max: DVec3::ONE,
            color: DVec4::ONE,
            steepness: 0.5,
            seed: 0,
        }
    }
}

impl Point {
    /// Default point at `position`.
    pub fn at(position: DVec3) -> Self {
        Self { transform: Transform::from_translation(position), ..Self::default() }
    }

    #[inline]
    pub fn extents(&self) -> DVec3 {
        (self.bounds_max - self.bounds_min) * 0.5
    }

    #[inline]
    pub fn local_center(&self) -> DVec3 {
        (self.bounds_max + self.bounds_min) * 0.5
    }

    /// Read `property`; `index` only feeds [`PointProperty::Index`].
    pub fn get(&self, property: PointProperty, index: usize) -> Value {
        match property {
            PointProperty::Density => Value::Float(self.density),
            PointProperty::BoundsMin => Value::Vector3(self.bounds_min),
            PointProperty::BoundsMax => Value::Vector3(self.bounds_max),
            PointProperty::Extents => Value::Vector3(self.extents()),
            PointProperty::Color => Value::Vector4(self.color),
            PointProperty::Position => Value::Vector3(self.transform.translation),
            PointProperty::Rotation => Value::Quaternion(self.transform.rotation),
            PointProperty::Scale => Value::Vector3(self.transform.scale),
            PointProperty::Transform => Value::Transform(self.transform),
            PointProperty::Steepness => Value::Float(self.steepness),
            PointProperty::LocalCenter => Value::Vector3(self.local_center()),
            PointProperty::Seed => Value::Int32(self.seed),
            PointProperty::Index => Value::Int32(i32::try_from(index).unwrap_or(i32::MAX)),
        }
    }

    /// Write `property`, converting `value` to the property kind first.
    /// Writes to `Index` are ignored.
    pub fn set(&mut self, property: PointProperty, value: &Value) {
        let value = if value.kind() == property.kind() {
            value.clone()
        } else {
            convert_or_default(value, property.kind())
        };
        match (property, value) {
            (PointProperty::Density, Value::Float(v)) => self.density = v,
            (PointProperty::Steepness, Value::Float(v)) => self.steepness = v,
            (PointProperty::BoundsMin, Value::Vector3(v)) => self.bounds_min = v,
            (PointProperty::BoundsMax, Value::Vector3(v)) => self.bounds_max = v,
            (PointProperty::Extents, Value::Vector3(v)) => {
                let center = self.local_center();
                self.bounds_min = center - v;
                self.bounds_max = center + v;
            }
            (PointProperty::LocalCenter, Value::Vector3(v)) => {
                let extents = self.extents();
                self.bounds_min = v - extents;
                self.bounds_max = v + extents;
            }
            (PointProperty::Color, Value::Vector4(v)) => self.color = v,
            (PointProperty::Position, Value::Vector3(v)) => self.transform.translation = v,
            (PointProperty::Rotation, Value::Quaternion(q)) => self.transform.rotation = normalized(q),
            (PointProperty::Scale, Value::Vector3(v)) => self.transform.scale = v,
            (PointProperty::Transform, Value::Transform(t)) => self.transform = t,
            (PointProperty::Seed, Value::Int32(v)) => self.seed = v,
            _ => {}
        }
    }
}

fn normalized(q: DQuat) -> DQuat {
    if q.length_squared() > 0.0 {
        q.normalize()
    } else {
        DQuat::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        for p in PointProperty::ALL {
            assert_eq!(PointProperty::from_name(p.name()), Some(p));
        }
        assert_eq!(PointProperty::from_name("location"), Some(PointProperty::Position));
        assert_eq!(PointProperty::from_name(" SEED "), Some(PointProperty::Seed));
        assert_eq!(PointProperty::from_name("Speed"), None);
    }

    #[test]
    fn test_derived_bounds() {
        let mut p = Point::default();
        assert_eq!(p.get(PointProperty::Extents, 0), Value::Vector3(DVec3::ONE));
        p.set(PointProperty::LocalCenter, &Value::Vector3(DVec3::new(10.0, 0.0, 0.0)));
        assert_eq!(p.bounds_min, DVec3::new(9.0, -1.0, -1.0));
        p.set(PointProperty::Extents, &Value::Double(2.0));
        assert_eq!(p.bounds_max, DVec3::new(12.0, 2.0, 2.0));
        assert_eq!(p.local_center(), DVec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_set_converts() {
        let mut p = Point::default();
        p.set(PointProperty::Density, &Value::Int64(3));
        assert_eq!(p.density, 3.0);
        p.set(PointProperty::Position, &Value::Double(2.5));
        assert_eq!(p.transform.translation, DVec3::splat(2.5));
        p.set(PointProperty::Index, &Value::Int32(99));
        assert_eq!(p.get(PointProperty::Index, 4), Value::Int32(4));
    }
}
