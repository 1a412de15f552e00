//! Math type re-exports and the rotation types attributes carry.
//!
//! Vectors and quaternions come from `glam` (double precision). This module
//! adds the Euler [`Rotator`] (degrees), the rigid [`Transform`] and the
//! [`Axis`] directions used by axis sub-selections.

pub use glam::{DQuat, DVec2, DVec3, DVec4};

use bytemuck::{Pod, Zeroable};
use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Tolerance used by nearly-zero / identity checks.
pub const KINDA_SMALL_NUMBER: f64 = 1.0e-4;

/// Singularity threshold for quaternion to Euler decomposition.
const SINGULARITY_THRESHOLD: f64 = 0.4999995;

const DEG_TO_RAD_HALF: f64 = PI / 360.0;
const RAD_TO_DEG: f64 = 180.0 / PI;

/// Clamp an angle in degrees to the (-180, 180] range.
#[inline]
pub fn normalize_axis(angle: f64) -> f64 {
    let mut a = angle % 360.0;
    if a < 0.0 {
        a += 360.0;
    }
    if a > 180.0 {
        a -= 360.0;
    }
    a
}

/// Euler rotation in degrees.
///
/// Pitch turns around Y, yaw around Z and roll around X.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Rotator {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl Rotator {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a rotator from pitch, yaw and roll in degrees.
    #[inline]
    pub const fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Same angle on every axis.
    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    /// Apply `f` to every angle.
    #[inline]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.pitch), f(self.yaw), f(self.roll))
    }

    /// Combine two rotators angle by angle.
    #[inline]
    pub fn zip(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self::new(f(self.pitch, other.pitch), f(self.yaw, other.yaw), f(self.roll, other.roll))
    }

    /// Angles wrapped into (-180, 180].
    #[inline]
    pub fn normalized(self) -> Self {
        self.map(normalize_axis)
    }

    /// True when every normalized angle is within `tolerance` of zero.
    pub fn is_nearly_zero(self, tolerance: f64) -> bool {
        let n = self.normalized();
        n.pitch.abs() <= tolerance && n.yaw.abs() <= tolerance && n.roll.abs() <= tolerance
    }

    /// Convert to a unit quaternion.
    pub fn to_quat(self) -> DQuat {
        let (sp, cp) = ((self.pitch % 360.0) * DEG_TO_RAD_HALF).sin_cos();
        let (sy, cy) = ((self.yaw % 360.0) * DEG_TO_RAD_HALF).sin_cos();
        let (sr, cr) = ((self.roll % 360.0) * DEG_TO_RAD_HALF).sin_cos();

        DQuat::from_xyzw(
            cr * sp * sy - sr * cp * cy,
            -cr * sp * cy - sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
            cr * cp * cy + sr * sp * sy,
        )
    }

    /// Decompose a quaternion into Euler angles.
    ///
    /// Near the poles (pitch ±90) yaw keeps its value and roll absorbs the
    /// remaining twist.
    pub fn from_quat(q: DQuat) -> Self {
        let singularity = q.z * q.x - q.w * q.y;
        let yaw_y = 2.0 * (q.w * q.z + q.x * q.y);
        let yaw_x = 1.0 - 2.0 * (q.y * q.y + q.z * q.z);
        let yaw = yaw_y.atan2(yaw_x) * RAD_TO_DEG;

        if singularity < -SINGULARITY_THRESHOLD {
            let roll = normalize_axis(-yaw - 2.0 * q.x.atan2(q.w) * RAD_TO_DEG);
            Self::new(-90.0, yaw, roll)
        } else if singularity > SINGULARITY_THRESHOLD {
            let roll = normalize_axis(yaw - 2.0 * q.x.atan2(q.w) * RAD_TO_DEG);
            Self::new(90.0, yaw, roll)
        } else {
            let pitch = (2.0 * singularity).clamp(-1.0, 1.0).asin() * RAD_TO_DEG;
            let roll = (-2.0 * (q.w * q.x + q.y * q.z))
                .atan2(1.0 - 2.0 * (q.x * q.x + q.y * q.y))
                * RAD_TO_DEG;
            Self::new(pitch, yaw, roll)
        }
    }

    /// Componentwise closeness test.
    pub fn abs_diff_eq(self, other: Self, tolerance: f64) -> bool {
        (self.pitch - other.pitch).abs() <= tolerance
            && (self.yaw - other.yaw).abs() <= tolerance
            && (self.roll - other.roll).abs() <= tolerance
    }
}

impl Add for Rotator {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a + b)
    }
}

impl Sub for Rotator {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a - b)
    }
}

impl Mul<f64> for Rotator {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.map(|a| a * rhs)
    }
}

impl fmt::Display for Rotator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.pitch, self.yaw, self.roll)
    }
}

/// True when `q` is the identity rotation (either sign) within `tolerance`.
#[inline]
pub fn quat_is_identity(q: DQuat, tolerance: f64) -> bool {
    q.x.abs() <= tolerance && q.y.abs() <= tolerance && q.z.abs() <= tolerance
        && (q.w.abs() - 1.0).abs() <= tolerance
}

/// Rotation angle of a unit quaternion, in radians.
#[inline]
pub fn quat_angle(q: DQuat) -> f64 {
    2.0 * q.w.clamp(-1.0, 1.0).acos()
}

/// Quaternion equality that treats `q` and `-q` as the same rotation.
pub fn quat_same_rotation(a: DQuat, b: DQuat, tolerance: f64) -> bool {
    a.abs_diff_eq(b, tolerance) || a.abs_diff_eq(-b, tolerance)
}

/// Rigid transform: translation, rotation and per-axis scale.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Transform {
    pub translation: DVec3,
    pub rotation: DQuat,
    pub scale: DVec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
        scale: DVec3::ONE,
    };

    #[inline]
    pub const fn new(translation: DVec3, rotation: DQuat, scale: DVec3) -> Self {
        Self { translation, rotation, scale }
    }

    /// Identity rotation and unit scale at `translation`.
    #[inline]
    pub const fn from_translation(translation: DVec3) -> Self {
        Self::new(translation, DQuat::IDENTITY, DVec3::ONE)
    }

    /// Pure rotation at the origin.
    #[inline]
    pub const fn from_rotation(rotation: DQuat) -> Self {
        Self::new(DVec3::ZERO, rotation, DVec3::ONE)
    }

    /// Rotation as Euler angles.
    #[inline]
    pub fn rotator(&self) -> Rotator {
        Rotator::from_quat(self.rotation)
    }

    /// Tolerance-based equality, rotation compared up to sign.
    pub fn abs_diff_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.translation.abs_diff_eq(other.translation, tolerance)
            && quat_same_rotation(self.rotation, other.rotation, tolerance)
            && self.scale.abs_diff_eq(other.scale, tolerance)
    }

    /// True when this is the identity transform within `tolerance`.
    #[inline]
    pub fn is_identity(&self, tolerance: f64) -> bool {
        self.abs_diff_eq(&Self::IDENTITY, tolerance)
    }

    /// Blend toward `other`: positions and scales lerp, rotation slerps.
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.translation.lerp(other.translation, t),
            self.rotation.slerp(other.rotation, t),
            self.scale.lerp(other.scale, t),
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Local direction picked by an axis sub-selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Axis {
    #[default]
    Forward = 0,
    Backward = 1,
    Right = 2,
    Left = 3,
    Up = 4,
    Down = 5,
}

impl Axis {
    pub const ALL: [Axis; 6] = [
        Axis::Forward,
        Axis::Backward,
        Axis::Right,
        Axis::Left,
        Axis::Up,
        Axis::Down,
    ];

    /// Unrotated unit vector for this axis.
    #[inline]
    pub const fn unit(self) -> DVec3 {
        match self {
            Self::Forward => DVec3::X,
            Self::Backward => DVec3::NEG_X,
            Self::Right => DVec3::Y,
            Self::Left => DVec3::NEG_Y,
            Self::Up => DVec3::Z,
            Self::Down => DVec3::NEG_Z,
        }
    }

    /// Axis rotated by `rotation`.
    #[inline]
    pub fn direction(self, rotation: DQuat) -> DVec3 {
        rotation * self.unit()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Forward => "Forward",
            Self::Backward => "Backward",
            Self::Right => "Right",
            Self::Left => "Left",
            Self::Up => "Up",
            Self::Down => "Down",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_normalize_axis() {
        assert_eq!(normalize_axis(190.0), -170.0);
        assert_eq!(normalize_axis(-190.0), 170.0);
        assert_eq!(normalize_axis(180.0), 180.0);
        assert_eq!(normalize_axis(720.0), 0.0);
    }

    #[test]
    fn test_yaw_quat() {
        let q = Rotator::new(0.0, 90.0, 0.0).to_quat();
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert!(q.abs_diff_eq(DQuat::from_xyzw(0.0, 0.0, h, h), EPS));
    }

    #[test]
    fn test_rotator_quat_roundtrip() {
        let samples = [
            Rotator::new(30.0, 45.0, 60.0),
            Rotator::new(-10.0, 170.0, -95.0),
            Rotator::new(0.0, 0.0, 0.0),
            Rotator::new(89.0, -45.0, 12.5),
        ];
        for r in samples {
            let back = Rotator::from_quat(r.to_quat());
            assert!(back.abs_diff_eq(r, 1e-6), "{:?} -> {:?}", r, back);
        }
    }

    #[test]
    fn test_gimbal_pole() {
        let r = Rotator::from_quat(Rotator::new(90.0, 30.0, 0.0).to_quat());
        assert!((r.pitch - 90.0).abs() < 1e-6);
        let q = r.to_quat();
        assert!(quat_same_rotation(q, Rotator::new(90.0, 30.0, 0.0).to_quat(), 1e-6));
    }

    #[test]
    fn test_axis_identity() {
        assert_eq!(Axis::Up.direction(DQuat::IDENTITY), DVec3::Z);
        assert_eq!(Axis::Left.direction(DQuat::IDENTITY), DVec3::NEG_Y);
    }

    #[test]
    fn test_axis_yaw() {
        let q = Rotator::new(0.0, 90.0, 0.0).to_quat();
        assert!(Axis::Forward.direction(q).abs_diff_eq(DVec3::Y, EPS));
        assert!(Axis::Right.direction(q).abs_diff_eq(DVec3::NEG_X, EPS));
        assert!(Axis::Up.direction(q).abs_diff_eq(DVec3::Z, EPS));
    }

    #[test]
    fn test_transform_identity() {
        assert!(Transform::IDENTITY.is_identity(KINDA_SMALL_NUMBER));
        assert!(Transform::default().is_identity(KINDA_SMALL_NUMBER));
        let t = Transform::from_translation(DVec3::new(1.0, 0.0, 0.0));
        assert!(!t.is_identity(KINDA_SMALL_NUMBER));
        let flipped = Transform::from_rotation(-DQuat::IDENTITY);
        assert!(flipped.is_identity(KINDA_SMALL_NUMBER));
    }

    #[test]
    fn test_rotator_nearly_zero() {
        assert!(Rotator::new(360.0, 0.0, -360.0).is_nearly_zero(KINDA_SMALL_NUMBER));
        assert!(!Rotator::new(0.0, 1.0, 0.0).is_nearly_zero(KINDA_SMALL_NUMBER));
    }
}
