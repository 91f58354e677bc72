// src/math/matrix.rs

//! 4x4 single-precision matrix in column-major order.

use super::Vector4;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

/// A 4x4 matrix stored column-major: element `(row, col)` lives at
/// `row + col * 4`.
///
/// `a * b` is the usual matrix product, so post-multiplying a transform onto
/// an existing matrix makes it apply to a column vector *before* the
/// transforms already accumulated there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    m: [f32; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    pub const IDENTITY: Matrix4 = Matrix4 {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub const ZERO: Matrix4 = Matrix4 { m: [0.0; 16] };

    /// Builds a matrix from 16 values listed column by column.
    pub const fn from_column_major(m: [f32; 16]) -> Self {
        Self { m }
    }

    /// Builds a matrix from rows, the way it is written on paper.
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let mut m = [0.0; 16];
        for (row, values) in rows.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                m[row + col * 4] = *value;
            }
        }
        Self { m }
    }

    pub fn as_column_major(&self) -> &[f32; 16] {
        &self.m
    }

    /// Element at `(row, col)`, or `0.0` when either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        if row >= 4 || col >= 4 {
            return 0.0;
        }
        self.m[row + col * 4]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        if row < 4 && col < 4 {
            self.m[row + col * 4] = value;
        }
    }

    /// The fourth column, which holds the translation of an affine transform.
    pub fn translation_column(&self) -> Vector4 {
        Vector4::new(self.m[12], self.m[13], self.m[14], self.m[15])
    }

    /// `self * v` for a column vector `v`.
    pub fn transform(&self, v: Vector4) -> Vector4 {
        let mut out = [0.0f32; 4];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = self.get(row, 0) * v.x
                + self.get(row, 1) * v.y
                + self.get(row, 2) * v.z
                + self.get(row, 3) * v.w;
        }
        Vector4::from(out)
    }
}

impl MulAssign for Matrix4 {
    fn mul_assign(&mut self, other: Matrix4) {
        let lhs = self.m;
        for row in 0..4 {
            for col in 0..4 {
                self.m[col * 4 + row] = lhs[row] * other.m[col * 4]
                    + lhs[row + 4] * other.m[col * 4 + 1]
                    + lhs[row + 8] * other.m[col * 4 + 2]
                    + lhs[row + 12] * other.m[col * 4 + 3];
            }
        }
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(mut self, other: Matrix4) -> Matrix4 {
        self *= other;
        self
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;

    fn mul(self, v: Vector4) -> Vector4 {
        self.transform(v)
    }
}

impl MulAssign<f32> for Matrix4 {
    fn mul_assign(&mut self, s: f32) {
        self.m.iter_mut().for_each(|e| *e *= s);
    }
}

impl Mul<f32> for Matrix4 {
    type Output = Matrix4;

    fn mul(mut self, s: f32) -> Matrix4 {
        self *= s;
        self
    }
}

impl AddAssign for Matrix4 {
    fn add_assign(&mut self, other: Matrix4) {
        self.m.iter_mut().zip(other.m).for_each(|(a, b)| *a += b);
    }
}

impl Add for Matrix4 {
    type Output = Matrix4;

    fn add(mut self, other: Matrix4) -> Matrix4 {
        self += other;
        self
    }
}

impl SubAssign for Matrix4 {
    fn sub_assign(&mut self, other: Matrix4) {
        self.m.iter_mut().zip(other.m).for_each(|(a, b)| *a -= b);
    }
}

impl Sub for Matrix4 {
    type Output = Matrix4;

    fn sub(mut self, other: Matrix4) -> Matrix4 {
        self -= other;
        self
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            writeln!(
                f,
                "{} {} {} {}",
                self.get(row, 0),
                self.get(row, 1),
                self.get(row, 2),
                self.get(row, 3)
            )?;
        }
        Ok(())
    }
}
