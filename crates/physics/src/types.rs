//! # Linear Algebra Primitives
//!
//! Small value types shared by the integrator and the renderer: a 3-vector
//! and a row-major 3x3 matrix. Everything here is total; degenerate inputs
//! map to defined results instead of errors.

use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Vectors shorter than this normalize to [`Vec3::ZERO`].
pub const NORMALIZE_EPSILON: f32 = 1e-4;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction, or zero when the length is below
    /// [`NORMALIZE_EPSILON`].
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len < NORMALIZE_EPSILON {
            return Self::ZERO;
        }
        self * (1.0 / len)
    }

    /// Mirror `self` about the plane with unit normal `normal`.
    #[must_use]
    pub fn reflect(self, normal: Self) -> Self {
        self - normal * (2.0 * self.dot(normal))
    }

    #[must_use]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Component-wise maximum against a scalar.
    #[must_use]
    pub fn max_scalar(self, s: f32) -> Self {
        Self::new(self.x.max(s), self.y.max(s), self.z.max(s))
    }

    #[must_use]
    pub fn max_element(self) -> f32 {
        self.x.max(self.y).max(self.z)
    }

    #[must_use]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl MulAssign<f32> for Vec3 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Row-major 3x3 matrix.
///
/// Orientation matrices are expected to stay orthonormal so that
/// [`Mat3::transpose`] can stand in for the inverse. Repeated composition
/// drifts away from that; [`Mat3::orthonormalize`] pulls it back.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mat3 {
    pub m: [f32; 9],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    #[must_use]
    pub const fn from_cols(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self {
            m: [c0.x, c1.x, c2.x, c0.y, c1.y, c2.y, c0.z, c1.z, c2.z],
        }
    }

    #[must_use]
    pub fn rotate_x(angle_rad: f32) -> Self {
        let (s, c) = angle_rad.sin_cos();
        Self {
            m: [1.0, 0.0, 0.0, 0.0, c, -s, 0.0, s, c],
        }
    }

    #[must_use]
    pub fn rotate_y(angle_rad: f32) -> Self {
        let (s, c) = angle_rad.sin_cos();
        Self {
            m: [c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c],
        }
    }

    #[must_use]
    pub fn rotate_z(angle_rad: f32) -> Self {
        let (s, c) = angle_rad.sin_cos();
        Self {
            m: [c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0],
        }
    }

    #[must_use]
    pub const fn row(&self, i: usize) -> Vec3 {
        Vec3::new(self.m[i * 3], self.m[i * 3 + 1], self.m[i * 3 + 2])
    }

    #[must_use]
    pub const fn col(&self, j: usize) -> Vec3 {
        Vec3::new(self.m[j], self.m[3 + j], self.m[6 + j])
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::from_cols(self.row(0), self.row(1), self.row(2))
    }

    #[must_use]
    pub fn determinant(&self) -> f32 {
        let m = &self.m;
        m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    /// Gram-Schmidt over the columns: normalize the first, strip its
    /// projection from the second and normalize, then rebuild the third as
    /// their cross product.
    #[must_use]
    pub fn orthonormalize(&self) -> Self {
        let x = self.col(0).normalize();
        let y = (self.col(1) - x * x.dot(self.col(1))).normalize();
        let z = x.cross(y);
        Self::from_cols(x, y, z)
    }

    /// Whether every column is unit length and mutually orthogonal within `tolerance`.
    #[must_use]
    pub fn is_orthonormal(&self, tolerance: f32) -> bool {
        let cols = [self.col(0), self.col(1), self.col(2)];
        cols.iter().all(|c| (c.length() - 1.0).abs() <= tolerance)
            && cols[0].dot(cols[1]).abs() <= tolerance
            && cols[0].dot(cols[2]).abs() <= tolerance
            && cols[1].dot(cols[2]).abs() <= tolerance
    }

    #[must_use]
    pub fn mul_vec3(&self, v: Vec3) -> Vec3 {
        Vec3::new(self.row(0).dot(v), self.row(1).dot(v), self.row(2).dot(v))
    }

    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Mul for Mat3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let mut out = [0.0f32; 9];
        for i in 0..3 {
            for j in 0..3 {
                out[i * 3 + j] = (0..3).map(|k| self.m[i * 3 + k] * rhs.m[k * 3 + j]).sum();
            }
        }
        Self { m: out }
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.mul_vec3(rhs)
    }
}
