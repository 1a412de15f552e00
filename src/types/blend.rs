//! Per-kind blend operations.
//!
//! [`blender`] resolves the blend function of a kind once; the returned
//! pointer is then called per point. Both operands must already be of that
//! kind ([`blend`] converts the second operand when they are not).

use std::fmt;

use super::{convert_or_default, Name, SoftClassPath, SoftObjectPath, Value, ValueKind};
use crate::util::{quat_angle, DQuat, DVec2, DVec3, DVec4, Rotator, Transform};

/// How two values are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlendOp {
    Add = 0,
    Subtract = 1,
    Multiply = 2,
    Divide = 3,
    #[default]
    Lerp = 4,
    Min = 5,
    Max = 6,
    Average = 7,
    CopyA = 8,
    CopyB = 9,
    Abs = 10,
    /// First operand scaled by the weight.
    Factor = 11,
}

impl BlendOp {
    pub const ALL: [BlendOp; 12] = [
        BlendOp::Add,
        BlendOp::Subtract,
        BlendOp::Multiply,
        BlendOp::Divide,
        BlendOp::Lerp,
        BlendOp::Min,
        BlendOp::Max,
        BlendOp::Average,
        BlendOp::CopyA,
        BlendOp::CopyB,
        BlendOp::Abs,
        BlendOp::Factor,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Subtract => "Subtract",
            Self::Multiply => "Multiply",
            Self::Divide => "Divide",
            Self::Lerp => "Lerp",
            Self::Min => "Min",
            Self::Max => "Max",
            Self::Average => "Average",
            Self::CopyA => "CopyA",
            Self::CopyB => "CopyB",
            Self::Abs => "Abs",
            Self::Factor => "Factor",
        }
    }

    /// Case-insensitive name lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for BlendOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Combines `a` and `b` (both of the blender's kind) with a weight.
pub type BlendFn = fn(BlendOp, &Value, &Value, f64) -> Value;

/// Componentwise arithmetic shared by numbers, vectors and rotators.
trait Arith: Copy {
    fn sum(self, o: Self) -> Self;
    fn diff(self, o: Self) -> Self;
    fn product(self, o: Self) -> Self;
    /// Division where a zero divisor leaves `self` unchanged.
    fn quotient(self, o: Self) -> Self;
    fn mix(self, o: Self, t: f64) -> Self;
    fn least(self, o: Self) -> Self;
    fn greatest(self, o: Self) -> Self;
    fn absolute(self) -> Self;
    fn scaled(self, f: f64) -> Self;
}

macro_rules! int_arith {
    ($($t:ty),*) => {$(
        impl Arith for $t {
            fn sum(self, o: Self) -> Self { self.wrapping_add(o) }
            fn diff(self, o: Self) -> Self { self.wrapping_sub(o) }
            fn product(self, o: Self) -> Self { self.wrapping_mul(o) }
            fn quotient(self, o: Self) -> Self {
                if o == 0 { self } else { self.wrapping_div(o) }
            }
            fn mix(self, o: Self, t: f64) -> Self {
                (self as f64 + (o as f64 - self as f64) * t).round() as $t
            }
            fn least(self, o: Self) -> Self { std::cmp::min(self, o) }
            fn greatest(self, o: Self) -> Self { std::cmp::max(self, o) }
            fn absolute(self) -> Self { self.wrapping_abs() }
            fn scaled(self, f: f64) -> Self { (self as f64 * f).round() as $t }
        }
    )*};
}

macro_rules! float_arith {
    ($($t:ty),*) => {$(
        impl Arith for $t {
            fn sum(self, o: Self) -> Self { self + o }
            fn diff(self, o: Self) -> Self { self - o }
            fn product(self, o: Self) -> Self { self * o }
            fn quotient(self, o: Self) -> Self {
                if o == 0.0 { self } else { self / o }
            }
            fn mix(self, o: Self, t: f64) -> Self { self + (o - self) * t as $t }
            fn least(self, o: Self) -> Self { <$t>::min(self, o) }
            fn greatest(self, o: Self) -> Self { <$t>::max(self, o) }
            fn absolute(self) -> Self { <$t>::abs(self) }
            fn scaled(self, f: f64) -> Self { self * f as $t }
        }
    )*};
}

macro_rules! vec_arith {
    ($($t:ty),*) => {$(
        impl Arith for $t {
            fn sum(self, o: Self) -> Self { self + o }
            fn diff(self, o: Self) -> Self { self - o }
            fn product(self, o: Self) -> Self { self * o }
            fn quotient(self, o: Self) -> Self {
                <$t>::select(o.cmpeq(<$t>::ZERO), self, self / o)
            }
            fn mix(self, o: Self, t: f64) -> Self { <$t>::lerp(self, o, t) }
            fn least(self, o: Self) -> Self { <$t>::min(self, o) }
            fn greatest(self, o: Self) -> Self { <$t>::max(self, o) }
            fn absolute(self) -> Self { <$t>::abs(self) }
            fn scaled(self, f: f64) -> Self { self * f }
        }
    )*};
}

int_arith!(i32, i64);
float_arith!(f32, f64);
vec_arith!(DVec2, DVec3, DVec4);

impl Arith for Rotator {
    fn sum(self, o: Self) -> Self {
        self + o
    }
    fn diff(self, o: Self) -> Self {
        self - o
    }
    fn product(self, o: Self) -> Self {
        self.zip(o, |a, b| a * b)
    }
    fn quotient(self, o: Self) -> Self {
        self.zip(o, f64::quotient)
    }
    fn mix(self, o: Self, t: f64) -> Self {
        self.zip(o, |a, b| a + (b - a) * t)
    }
    fn least(self, o: Self) -> Self {
        self.zip(o, f64::min)
    }
    fn greatest(self, o: Self) -> Self {
        self.zip(o, f64::max)
    }
    fn absolute(self) -> Self {
        self.map(f64::abs)
    }
    fn scaled(self, f: f64) -> Self {
        self * f
    }
}

fn arith<T: Arith>(op: BlendOp, a: T, b: T, w: f64) -> T {
    match op {
        BlendOp::Add => a.sum(b),
        BlendOp::Subtract => a.diff(b),
        BlendOp::Multiply => a.product(b),
        BlendOp::Divide => a.quotient(b),
        BlendOp::Lerp => a.mix(b, w),
        BlendOp::Min => a.least(b),
        BlendOp::Max => a.greatest(b),
        BlendOp::Average => a.mix(b, 0.5),
        BlendOp::CopyA => a,
        BlendOp::CopyB => b,
        BlendOp::Abs => a.absolute(),
        BlendOp::Factor => a.scaled(w),
    }
}

macro_rules! arith_blender {
    ($name:ident, $variant:ident) => {
        fn $name(op: BlendOp, a: &Value, b: &Value, w: f64) -> Value {
            match (a, b) {
                (Value::$variant(a), Value::$variant(b)) => Value::$variant(arith(op, *a, *b, w)),
                _ => a.clone(),
            }
        }
    };
}

arith_blender!(blend_i32, Int32);
arith_blender!(blend_i64, Int64);
arith_blender!(blend_f32, Float);
arith_blender!(blend_f64, Double);
arith_blender!(blend_vec2, Vector2);
arith_blender!(blend_vec3, Vector3);
arith_blender!(blend_vec4, Vector4);
arith_blender!(blend_rotator, Rotator);

fn blend_bool(op: BlendOp, a: &Value, b: &Value, w: f64) -> Value {
    let (Value::Boolean(a), Value::Boolean(b)) = (a, b) else {
        return a.clone();
    };
    let (a, b) = (*a, *b);
    Value::Boolean(match op {
        BlendOp::Add | BlendOp::Max => a || b,
        BlendOp::Subtract => a && !b,
        BlendOp::Multiply | BlendOp::Min => a && b,
        BlendOp::Lerp => {
            if w < 0.5 {
                a
            } else {
                b
            }
        }
        BlendOp::Average => a == b && a,
        BlendOp::CopyB => b,
        BlendOp::Factor => a && w != 0.0,
        BlendOp::Divide | BlendOp::CopyA | BlendOp::Abs => a,
    })
}

fn quat_op(op: BlendOp, a: DQuat, b: DQuat, w: f64) -> DQuat {
    match op {
        BlendOp::Add => (Rotator::from_quat(a) + Rotator::from_quat(b)).to_quat(),
        BlendOp::Subtract => (Rotator::from_quat(a) - Rotator::from_quat(b)).to_quat(),
        BlendOp::Multiply => (a * b).normalize(),
        BlendOp::Divide => (a * b.inverse()).normalize(),
        BlendOp::Lerp => a.slerp(b, w),
        BlendOp::Average => a.slerp(b, 0.5),
        BlendOp::Min => {
            if quat_angle(b) < quat_angle(a) {
                b
            } else {
                a
            }
        }
        BlendOp::Max => {
            if quat_angle(b) > quat_angle(a) {
                b
            } else {
                a
            }
        }
        BlendOp::CopyB => b,
        BlendOp::Factor => DQuat::IDENTITY.slerp(a, w),
        BlendOp::CopyA | BlendOp::Abs => a,
    }
}

fn blend_quat(op: BlendOp, a: &Value, b: &Value, w: f64) -> Value {
    match (a, b) {
        (Value::Quaternion(a), Value::Quaternion(b)) => Value::Quaternion(quat_op(op, *a, *b, w)),
        _ => a.clone(),
    }
}

fn blend_transform(op: BlendOp, a: &Value, b: &Value, w: f64) -> Value {
    let (Value::Transform(a), Value::Transform(b)) = (a, b) else {
        return a.clone();
    };
    let t = match op {
        BlendOp::Lerp => a.lerp(b, w),
        BlendOp::Average => a.lerp(b, 0.5),
        BlendOp::CopyA => *a,
        BlendOp::CopyB => *b,
        _ => Transform::new(arith(op, a.translation, b.translation, w), a.rotation, a.scale),
    };
    Value::Transform(t)
}

fn text_op(op: BlendOp, a: &str, b: &str, w: f64) -> String {
    match op {
        BlendOp::Add => format!("{}{}", a, b),
        BlendOp::Subtract if !b.is_empty() => a.replace(b, ""),
        BlendOp::Min if b.len() < a.len() => b.to_string(),
        BlendOp::Max if b.len() > a.len() => b.to_string(),
        BlendOp::Average => format!("{}|{}", a, b),
        BlendOp::Lerp if w >= 0.5 => b.to_string(),
        BlendOp::CopyB => b.to_string(),
        _ => a.to_string(),
    }
}

fn blend_text(op: BlendOp, a: &Value, b: &Value, w: f64) -> Value {
    let (Some(sa), Some(sb)) = (a.as_text(), b.as_text()) else {
        return a.clone();
    };
    let s = text_op(op, sa, sb, w);
    match a.kind() {
        ValueKind::Name => Value::Name(Name::new(s)),
        ValueKind::ObjectPathRef => Value::ObjectPathRef(SoftObjectPath::new(s)),
        ValueKind::ClassPathRef => Value::ClassPathRef(SoftClassPath::new(s)),
        _ => Value::string(s),
    }
}

/// Blend function of `kind`.
pub fn blender(kind: ValueKind) -> BlendFn {
    match kind {
        ValueKind::Boolean => blend_bool,
        ValueKind::Int32 => blend_i32,
        ValueKind::Int64 => blend_i64,
        ValueKind::Float => blend_f32,
        ValueKind::Double => blend_f64,
        ValueKind::Vector2 => blend_vec2,
        ValueKind::Vector3 => blend_vec3,
        ValueKind::Vector4 => blend_vec4,
        ValueKind::Rotator => blend_rotator,
        ValueKind::Quaternion => blend_quat,
        ValueKind::Transform => blend_transform,
        ValueKind::String | ValueKind::Name | ValueKind::ObjectPathRef | ValueKind::ClassPathRef => blend_text,
    }
}

/// Blend `a` and `b` in the kind of `a`.
pub fn blend(op: BlendOp, a: &Value, b: &Value, weight: f64) -> Value {
    let kind = a.kind();
    if b.kind() == kind {
        blender(kind)(op, a, b, weight)
    } else {
        blender(kind)(op, a, &convert_or_default(b, kind), weight)
    }
}
