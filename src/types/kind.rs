//! Value kinds - the closed set of types an attribute can hold.

use std::fmt;

/// Value kind enum.
///
/// Every attribute, property and boxed value is stored as exactly one of
/// these. The set is closed; the discriminant doubles as the row/column
/// index of the conversion table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ValueKind {
    /// Boolean
    Boolean = 0,
    /// Signed 32-bit integer
    Int32 = 1,
    /// Signed 64-bit integer
    Int64 = 2,
    /// 32-bit float
    Float = 3,
    /// 64-bit float
    #[default]
    Double = 4,
    /// 2D double vector
    Vector2 = 5,
    /// 3D double vector
    Vector3 = 6,
    /// 4D double vector
    Vector4 = 7,
    /// Euler angles in degrees
    Rotator = 8,
    /// Unit quaternion
    Quaternion = 9,
    /// Translation, rotation and scale
    Transform = 10,
    /// UTF-8 string
    String = 11,
    /// Interned-style identifier
    Name = 12,
    /// Reference to an asset object
    ObjectPathRef = 13,
    /// Reference to an asset class
    ClassPathRef = 14,
}

impl ValueKind {
    /// Number of value kinds.
    pub const COUNT: usize = 15;

    /// All kinds in discriminant order.
    pub const ALL: [ValueKind; Self::COUNT] = [
        Self::Boolean,
        Self::Int32,
        Self::Int64,
        Self::Float,
        Self::Double,
        Self::Vector2,
        Self::Vector3,
        Self::Vector4,
        Self::Rotator,
        Self::Quaternion,
        Self::Transform,
        Self::String,
        Self::Name,
        Self::ObjectPathRef,
        Self::ClassPathRef,
    ];

    /// Table index of this kind.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the name of this kind.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::Vector2 => "Vector2",
            Self::Vector3 => "Vector3",
            Self::Vector4 => "Vector4",
            Self::Rotator => "Rotator",
            Self::Quaternion => "Quaternion",
            Self::Transform => "Transform",
            Self::String => "String",
            Self::Name => "Name",
            Self::ObjectPathRef => "ObjectPathRef",
            Self::ClassPathRef => "ClassPathRef",
        }
    }

    /// Parse a kind from its name (case-insensitive, a few aliases).
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.trim().to_ascii_lowercase().as_str() {
            "boolean" | "bool" => Self::Boolean,
            "int32" | "int" | "i32" => Self::Int32,
            "int64" | "long" | "i64" => Self::Int64,
            "float" | "f32" => Self::Float,
            "double" | "f64" => Self::Double,
            "vector2" | "vec2" => Self::Vector2,
            "vector3" | "vector" | "vec3" => Self::Vector3,
            "vector4" | "vec4" => Self::Vector4,
            "rotator" => Self::Rotator,
            "quaternion" | "quat" => Self::Quaternion,
            "transform" => Self::Transform,
            "string" => Self::String,
            "name" => Self::Name,
            "objectpathref" | "objectpath" | "softobjectpath" => Self::ObjectPathRef,
            "classpathref" | "classpath" | "softclasspath" => Self::ClassPathRef,
            _ => return None,
        };
        Some(kind)
    }

    /// Convert from u8 value.
    pub const fn from_u8(v: u8) -> Option<Self> {
        if (v as usize) < Self::COUNT {
            Some(Self::ALL[v as usize])
        } else {
            None
        }
    }

    /// Number of scalar fields a sub-selection can address.
    #[inline]
    pub const fn field_count(self) -> usize {
        match self {
            Self::Vector2 => 2,
            Self::Vector3 | Self::Rotator => 3,
            Self::Vector4 | Self::Quaternion => 4,
            Self::Transform => 9,
            _ => 1,
        }
    }

    /// Kinds whose values are text.
    #[inline]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::String | Self::Name | Self::ObjectPathRef | Self::ClassPathRef)
    }

    /// Kinds that carry a rotation (axis sub-selections apply).
    #[inline]
    pub const fn has_rotation(self) -> bool {
        matches!(self, Self::Rotator | Self::Quaternion | Self::Transform)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ValueKind {
    type Err = crate::util::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| crate::util::Error::UnknownKind(s.to_string()))
    }
}
