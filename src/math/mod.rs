// src/math/mod.rs

//! Geometry utilities: homogeneous vectors, 4x4 matrices, integer regions and
//! the transform builders the renderer composes into its matrices.
//!
//! Everything here is a plain value type or a pure function, so it can be used
//! from any thread.

pub mod matrix;
pub mod region;
pub mod transform;
pub mod vector;

pub use matrix::Matrix4;
pub use region::Region;
pub use transform::{degrees_to_radians, multiply, radians_to_degrees};
pub use vector::Vector4;
