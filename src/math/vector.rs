// src/math/vector.rs

//! Homogeneous 4-component vector.

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

/// A homogeneous vector `(x, y, z, w)`.
///
/// The default value is the origin point `(0, 0, 0, 1)`: `w` defaults to 1, so
/// a vector built from three coordinates is a point rather than a direction.
/// Addition and subtraction are component-wise and include `w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Vector4 {
    fn default() -> Self {
        Self::point(0.0, 0.0, 0.0)
    }
}

impl Vector4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// A point (`w = 1`).
    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 1.0)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    pub fn dot(&self, other: &Vector4) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Perspective division: divides `x`, `y`, `z` by `w` and sets `w` to 1.
    ///
    /// The result is meaningless when `w == 0`; callers check first.
    pub fn normalize(&mut self) -> &mut Self {
        let w = self.w;
        self.x /= w;
        self.y /= w;
        self.z /= w;
        self.w = 1.0;
        self
    }

    /// By-value form of [`normalize`](Self::normalize).
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Clamps every component into `[0, 1]`.
    pub fn clamp(&mut self) -> &mut Self {
        for c in [&mut self.x, &mut self.y, &mut self.z, &mut self.w] {
            *c = c.clamp(0.0, 1.0);
        }
        self
    }
}

impl From<[f32; 4]> for Vector4 {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<[f32; 3]> for Vector4 {
    fn from(v: [f32; 3]) -> Self {
        Self::point(v[0], v[1], v[2])
    }
}

impl Index<usize> for Vector4 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Vector4 index out of range: {}", index),
        }
    }
}

impl IndexMut<usize> for Vector4 {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Vector4 index out of range: {}", index),
        }
    }
}

impl AddAssign for Vector4 {
    fn add_assign(&mut self, other: Vector4) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
        self.w += other.w;
    }
}

impl Add for Vector4 {
    type Output = Vector4;

    fn add(mut self, other: Vector4) -> Vector4 {
        self += other;
        self
    }
}

impl SubAssign for Vector4 {
    fn sub_assign(&mut self, other: Vector4) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
        self.w -= other.w;
    }
}

impl Sub for Vector4 {
    type Output = Vector4;

    fn sub(mut self, other: Vector4) -> Vector4 {
        self -= other;
        self
    }
}

impl MulAssign<f32> for Vector4 {
    fn mul_assign(&mut self, s: f32) {
        self.x *= s;
        self.y *= s;
        self.z *= s;
        self.w *= s;
    }
}

impl Mul<f32> for Vector4 {
    type Output = Vector4;

    fn mul(mut self, s: f32) -> Vector4 {
        self *= s;
        self
    }
}

/// Component-wise product.
impl MulAssign for Vector4 {
    fn mul_assign(&mut self, other: Vector4) {
        self.x *= other.x;
        self.y *= other.y;
        self.z *= other.z;
        self.w *= other.w;
    }
}

impl Mul for Vector4 {
    type Output = Vector4;

    fn mul(mut self, other: Vector4) -> Vector4 {
        self *= other;
        self
    }
}

impl fmt::Display for Vector4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn default_is_origin_point() {
        assert_eq!(Vector4::default(), Vector4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(Vector4::from([1.0, 2.0, 3.0]).w, 1.0);
    }

    #[test]
    fn add_and_sub_include_w() {
        let a = Vector4::new(1.0, 2.0, 3.0, 1.0);
        let b = Vector4::new(0.5, 0.5, 0.5, 1.0);
        assert_eq!(a + b, Vector4::new(1.5, 2.5, 3.5, 2.0));
        assert_eq!(a - b, Vector4::new(0.5, 1.5, 2.5, 0.0));
    }

    #[test]
    fn normalize_divides_by_w() {
        let v = Vector4::new(2.0, 4.0, -6.0, 2.0).normalized();
        assert_eq!(v, Vector4::new(1.0, 2.0, -3.0, 1.0));
    }

    #[test]
    fn clamp_limits_each_component() {
        let mut v = Vector4::new(-1.0, 0.5, 2.0, 1.0);
        v.clamp();
        assert_eq!(v, Vector4::new(0.0, 0.5, 1.0, 1.0));
    }

    #[test]
    fn dot_and_products() {
        let a = Vector4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vector4::new(2.0, 0.0, 1.0, 0.5);
        assert_eq!(a.dot(&b), 7.0);
        assert_eq!(a * b, Vector4::new(2.0, 0.0, 3.0, 2.0));
        assert_eq!(a * 2.0, Vector4::new(2.0, 4.0, 6.0, 8.0));
        assert_eq!(a[2], 3.0);
    }

    #[test]
    fn displays_as_tuple() {
        assert_eq!(Vector4::point(1.0, 0.5, -2.0).to_string(), "(1, 0.5, -2, 1)");
    }
}
