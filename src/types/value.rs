//! Tagged attribute values.
//!
//! [`Value`] replaces untyped scratch buffers: it always knows its own kind,
//! and only the text kinds own heap memory.

use bytemuck::bytes_of;
use std::fmt;
use std::sync::Arc;

use super::ValueKind;
use crate::util::{hash32, DQuat, DVec2, DVec3, DVec4, Rotator, Transform};

/// Identifier value. The empty name is "none".
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Arc<str>);

impl Name {
    pub fn new(s: impl AsRef<str>) -> Self {
        Self(Arc::from(s.as_ref()))
    }

    /// The none name.
    pub fn none() -> Self {
        Self(Arc::from(""))
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to an asset object by path, e.g. `/Game/Meshes/Rock.Rock`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SoftObjectPath(Arc<str>);

/// Reference to an asset class by path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SoftClassPath(Arc<str>);

impl SoftObjectPath {
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(Arc::from(path.as_ref().trim()))
    }

    /// A path is valid when it is not empty.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl SoftClassPath {
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(Arc::from(path.as_ref().trim()))
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SoftObjectPath {
    fn default() -> Self {
        Self::new("")
    }
}

impl Default for SoftClassPath {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Display for SoftObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SoftClassPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single attribute value of any kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    Vector2(DVec2),
    Vector3(DVec3),
    Vector4(DVec4),
    Rotator(Rotator),
    Quaternion(DQuat),
    Transform(Transform),
    String(Arc<str>),
    Name(Name),
    ObjectPathRef(SoftObjectPath),
    ClassPathRef(SoftClassPath),
}

impl Value {
    /// Kind of this value.
    #[inline]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Boolean(_) => ValueKind::Boolean,
            Self::Int32(_) => ValueKind::Int32,
            Self::Int64(_) => ValueKind::Int64,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::Vector2(_) => ValueKind::Vector2,
            Self::Vector3(_) => ValueKind::Vector3,
            Self::Vector4(_) => ValueKind::Vector4,
            Self::Rotator(_) => ValueKind::Rotator,
            Self::Quaternion(_) => ValueKind::Quaternion,
            Self::Transform(_) => ValueKind::Transform,
            Self::String(_) => ValueKind::String,
            Self::Name(_) => ValueKind::Name,
            Self::ObjectPathRef(_) => ValueKind::ObjectPathRef,
            Self::ClassPathRef(_) => ValueKind::ClassPathRef,
        }
    }

    /// Default value of a kind: zero, identity or empty.
    pub fn default_of(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Boolean => Self::Boolean(false),
            ValueKind::Int32 => Self::Int32(0),
            ValueKind::Int64 => Self::Int64(0),
            ValueKind::Float => Self::Float(0.0),
            ValueKind::Double => Self::Double(0.0),
            ValueKind::Vector2 => Self::Vector2(DVec2::ZERO),
            ValueKind::Vector3 => Self::Vector3(DVec3::ZERO),
            ValueKind::Vector4 => Self::Vector4(DVec4::ZERO),
            ValueKind::Rotator => Self::Rotator(Rotator::ZERO),
            ValueKind::Quaternion => Self::Quaternion(DQuat::IDENTITY),
            ValueKind::Transform => Self::Transform(Transform::IDENTITY),
            ValueKind::String => Self::String(Arc::from("")),
            ValueKind::Name => Self::Name(Name::none()),
            ValueKind::ObjectPathRef => Self::ObjectPathRef(SoftObjectPath::default()),
            ValueKind::ClassPathRef => Self::ClassPathRef(SoftClassPath::default()),
        }
    }

    /// Wrap a typed value.
    #[inline]
    pub fn of<T: AttributeType>(v: T) -> Self {
        v.into_value()
    }

    /// String value from any text.
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Arc::from(s.as_ref()))
    }

    /// Typed copy of the payload if the kind matches exactly.
    #[inline]
    pub fn get<T: AttributeType>(&self) -> Option<T> {
        T::from_value(self)
    }

    /// 32-bit hash of the payload, seeded with the kind.
    ///
    /// Equal values of the same kind hash equal; the same bits under two
    /// kinds do not collide by construction.
    pub fn hash32(&self) -> u32 {
        let seed = self.kind() as u32;
        match self {
            Self::Boolean(v) => hash32(&[*v as u8], seed),
            Self::Int32(v) => hash32(bytes_of(v), seed),
            Self::Int64(v) => hash32(bytes_of(v), seed),
            Self::Float(v) => hash32(bytes_of(v), seed),
            Self::Double(v) => hash32(bytes_of(v), seed),
            Self::Vector2(v) => hash32(bytes_of(v), seed),
            Self::Vector3(v) => hash32(bytes_of(v), seed),
            Self::Vector4(v) => hash32(bytes_of(v), seed),
            Self::Rotator(v) => hash32(bytes_of(v), seed),
            Self::Quaternion(v) => hash32(bytes_of(v), seed),
            Self::Transform(v) => hash32(bytes_of(v), seed),
            Self::String(_) | Self::Name(_) | Self::ObjectPathRef(_) | Self::ClassPathRef(_) => {
                hash32(self.as_text().unwrap_or_default().as_bytes(), seed)
            }
        }
    }

    /// Text payload of the four text kinds.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(&**s),
            Self::Name(n) => Some(n.as_str()),
            Self::ObjectPathRef(p) => Some(p.as_str()),
            Self::ClassPathRef(p) => Some(p.as_str()),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::default_of(ValueKind::default())
    }
}

/// Rust types that back a value kind.
///
/// Used by the typed `get`/`set` wrappers on proxies and boxed values.
pub trait AttributeType: Clone + Send + Sync + 'static {
    /// Kind this type maps to.
    const KIND: ValueKind;

    /// Wrap into a [`Value`].
    fn into_value(self) -> Value;

    /// Unwrap a [`Value`] of exactly [`Self::KIND`].
    fn from_value(value: &Value) -> Option<Self>;

    /// Default value of the kind.
    fn default_value() -> Self;
}

impl AttributeType for bool {
    const KIND: ValueKind = ValueKind::Boolean;
    fn into_value(self) -> Value {
        Value::Boolean(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }
    fn default_value() -> Self {
        false
    }
}

impl AttributeType for i32 {
    const KIND: ValueKind = ValueKind::Int32;
    fn into_value(self) -> Value {
        Value::Int32(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int32(v) => Some(*v),
            _ => None,
        }
    }
    fn default_value() -> Self {
        0
    }
}

impl AttributeType for i64 {
    const KIND: ValueKind = ValueKind::Int64;
    fn into_value(self) -> Value {
        Value::Int64(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }
    fn default_value() -> Self {
        0
    }
}

impl AttributeType for f32 {
    const KIND: ValueKind = ValueKind::Float;
    fn into_value(self) -> Value {
        Value::Float(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
    fn default_value() -> Self {
        0.0
    }
}

impl AttributeType for f64 {
    const KIND: ValueKind = ValueKind::Double;
    fn into_value(self) -> Value {
        Value::Double(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }
    fn default_value() -> Self {
        0.0
    }
}

impl AttributeType for DVec2 {
    const KIND: ValueKind = ValueKind::Vector2;
    fn into_value(self) -> Value {
        Value::Vector2(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Vector2(v) => Some(*v),
            _ => None,
        }
    }
    fn default_value() -> Self {
        DVec2::ZERO
    }
}

impl AttributeType for DVec3 {
    const KIND: ValueKind = ValueKind::Vector3;
    fn into_value(self) -> Value {
        Value::Vector3(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Vector3(v) => Some(*v),
            _ => None,
        }
    }
    fn default_value() -> Self {
        DVec3::ZERO
    }
}

impl AttributeType for DVec4 {
    const KIND: ValueKind = ValueKind::Vector4;
    fn into_value(self) -> Value {
        Value::Vector4(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Vector4(v) => Some(*v),
            _ => None,
        }
    }
    fn default_value() -> Self {
        DVec4::ZERO
    }
}

impl AttributeType for Rotator {
    const KIND: ValueKind = ValueKind::Rotator;
    fn into_value(self) -> Value {
        Value::Rotator(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Rotator(v) => Some(*v),
            _ => None,
        }
    }
    fn default_value() -> Self {
        Rotator::ZERO
    }
}

impl AttributeType for DQuat {
    const KIND: ValueKind = ValueKind::Quaternion;
    fn into_value(self) -> Value {
        Value::Quaternion(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Quaternion(v) => Some(*v),
            _ => None,
        }
    }
    fn default_value() -> Self {
        DQuat::IDENTITY
    }
}

impl AttributeType for Transform {
    const KIND: ValueKind = ValueKind::Transform;
    fn into_value(self) -> Value {
        Value::Transform(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Transform(v) => Some(*v),
            _ => None,
        }
    }
    fn default_value() -> Self {
        Transform::IDENTITY
    }
}

impl AttributeType for String {
    const KIND: ValueKind = ValueKind::String;
    fn into_value(self) -> Value {
        Value::String(Arc::from(self))
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(v) => Some(v.to_string()),
            _ => None,
        }
    }
    fn default_value() -> Self {
        String::new()
    }
}

impl AttributeType for Name {
    const KIND: ValueKind = ValueKind::Name;
    fn into_value(self) -> Value {
        Value::Name(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Name(v) => Some(v.clone()),
            _ => None,
        }
    }
    fn default_value() -> Self {
        Name::none()
    }
}

impl AttributeType for SoftObjectPath {
    const KIND: ValueKind = ValueKind::ObjectPathRef;
    fn into_value(self) -> Value {
        Value::ObjectPathRef(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::ObjectPathRef(v) => Some(v.clone()),
            _ => None,
        }
    }
    fn default_value() -> Self {
        SoftObjectPath::default()
    }
}

impl AttributeType for SoftClassPath {
    const KIND: ValueKind = ValueKind::ClassPathRef;
    fn into_value(self) -> Value {
        Value::ClassPathRef(self)
    }
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::ClassPathRef(v) => Some(v.clone()),
            _ => None,
        }
    }
    fn default_value() -> Self {
        SoftClassPath::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kinds_match() {
        for kind in ValueKind::ALL {
            assert_eq!(Value::default_of(kind).kind(), kind);
        }
    }

    #[test]
    fn test_typed_get() {
        let v = Value::of(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(v.kind(), ValueKind::Vector3);
        assert_eq!(v.get::<DVec3>(), Some(DVec3::new(1.0, 2.0, 3.0)));
        assert_eq!(v.get::<f64>(), None);
    }

    #[test]
    fn test_text_payloads() {
        assert_eq!(Value::string("abc").as_text(), Some("abc"));
        assert_eq!(Value::Name(Name::new("n")).as_text(), Some("n"));
        assert_eq!(Value::Int32(3).as_text(), None);
        assert_eq!(String::from_value(&Value::string("x")), Some("x".to_string()));
    }

    #[test]
    fn test_hash_depends_on_kind_and_payload() {
        assert_eq!(Value::Double(1.5).hash32(), Value::Double(1.5).hash32());
        assert_ne!(Value::Double(1.5).hash32(), Value::Double(2.5).hash32());
        assert_ne!(Value::string("a").hash32(), Value::Name(Name::new("a")).hash32());
        assert_ne!(Value::Int32(0).hash32(), Value::Float(0.0).hash32());
    }

    #[test]
    fn test_non_text_values_stay_small() {
        // Transform is the largest inline payload.
        assert!(std::mem::size_of::<Value>() <= 96);
    }

    #[test]
    fn test_name_none() {
        assert!(Name::none().is_none());
        assert!(Name::default().is_none());
        assert!(!Name::new("Foo").is_none());
        assert!(!SoftObjectPath::default().is_valid());
        assert!(SoftClassPath::new("/Script/Engine.Actor").is_valid());
    }
}
