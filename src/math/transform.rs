// src/math/transform.rs

//! Transform builders.
//!
//! The `translate`/`scale`/`rotate_*` functions post-multiply a transform onto
//! an existing matrix in place (`m = m * t`), so the new transform is applied
//! to a vector before the ones already in `m`. The projection builders return
//! `None` for parameters that would produce a degenerate matrix.

use super::{Matrix4, Vector4};

pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees.to_radians()
}

pub fn radians_to_degrees(radians: f32) -> f32 {
    radians.to_degrees()
}

/// Transforms `v` by `m` (`m * v`).
pub fn multiply(v: Vector4, m: &Matrix4) -> Vector4 {
    m.transform(v)
}

pub fn translation(x: f32, y: f32, z: f32) -> Matrix4 {
    Matrix4::from_column_major([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        x, y, z, 1.0,
    ])
}

pub fn scaling(x: f32, y: f32, z: f32) -> Matrix4 {
    Matrix4::from_column_major([
        x, 0.0, 0.0, 0.0, //
        0.0, y, 0.0, 0.0, //
        0.0, 0.0, z, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Counter-clockwise rotation about the X axis.
pub fn rotation_x(angle: f32) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    Matrix4::from_column_major([
        1.0, 0.0, 0.0, 0.0, //
        0.0, c, s, 0.0, //
        0.0, -s, c, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Counter-clockwise rotation about the Y axis.
pub fn rotation_y(angle: f32) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    Matrix4::from_column_major([
        c, 0.0, -s, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        s, 0.0, c, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Counter-clockwise rotation about the Z axis.
pub fn rotation_z(angle: f32) -> Matrix4 {
    let (s, c) = angle.sin_cos();
    Matrix4::from_column_major([
        c, s, 0.0, 0.0, //
        -s, c, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

pub fn translate(m: &mut Matrix4, v: Vector4) -> &mut Matrix4 {
    *m *= translation(v.x, v.y, v.z);
    m
}

pub fn scale(m: &mut Matrix4, v: Vector4) -> &mut Matrix4 {
    *m *= scaling(v.x, v.y, v.z);
    m
}

pub fn rotate_x(m: &mut Matrix4, angle: f32) -> &mut Matrix4 {
    *m *= rotation_x(angle);
    m
}

pub fn rotate_y(m: &mut Matrix4, angle: f32) -> &mut Matrix4 {
    *m *= rotation_y(angle);
    m
}

pub fn rotate_z(m: &mut Matrix4, angle: f32) -> &mut Matrix4 {
    *m *= rotation_z(angle);
    m
}

/// Rotates about X (pitch), then Y (yaw), then Z (roll).
pub fn rotate(m: &mut Matrix4, pitch: f32, yaw: f32, roll: f32) -> &mut Matrix4 {
    rotate_z(rotate_y(rotate_x(m, pitch), yaw), roll)
}

/// Orthographic projection mapping the box `[left, right] x [bottom, top] x
/// [-near, -far]` onto the `[-1, 1]` cube.
pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Option<Matrix4> {
    if near >= far || top == bottom || right == left {
        return None;
    }
    let rml = right - left;
    let tmb = top - bottom;
    let fmn = far - near;
    Some(Matrix4::from_column_major([
        2.0 / rml, 0.0, 0.0, 0.0, //
        0.0, 2.0 / tmb, 0.0, 0.0, //
        0.0, 0.0, -2.0 / fmn, 0.0, //
        -(right + left) / rml,
        -(top + bottom) / tmb,
        -(far + near) / fmn,
        1.0,
    ]))
}

/// Perspective projection with a vertical field of view in degrees.
pub fn perspective(fovy_degrees: f32, near: f32, far: f32, aspect: f32) -> Option<Matrix4> {
    if near >= far || fovy_degrees == 0.0 || aspect <= 0.0 {
        return None;
    }
    let f_len = far - near;
    let y = 1.0 / degrees_to_radians(fovy_degrees * 0.5).tan();
    let x = y / aspect;
    let l = -(far + near) / f_len;
    let z = -2.0 * near * far / f_len;
    Some(Matrix4::from_column_major([
        x, 0.0, 0.0, 0.0, //
        0.0, y, 0.0, 0.0, //
        0.0, 0.0, l, -1.0, //
        0.0, 0.0, z, 0.0,
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    const EPS: f32 = 1e-5;

    fn assert_close(a: Vector4, b: Vector4) {
        for i in 0..4 {
            assert!((a[i] - b[i]).abs() < EPS, "{} != {}", a, b);
        }
    }

    #[test]
    fn translate_then_scale_applies_scale_first() {
        let mut m = Matrix4::IDENTITY;
        translate(&mut m, Vector4::point(1.0, 0.0, 0.0));
        scale(&mut m, Vector4::point(2.0, 2.0, 2.0));
        let p = multiply(Vector4::point(1.0, 1.0, 1.0), &m);
        assert_close(p, Vector4::point(3.0, 2.0, 2.0));
    }

    #[test]
    fn rotations_are_counter_clockwise() {
        let quarter = degrees_to_radians(90.0);
        let x_axis = Vector4::point(1.0, 0.0, 0.0);
        let y_axis = Vector4::point(0.0, 1.0, 0.0);
        let z_axis = Vector4::point(0.0, 0.0, 1.0);
        assert_close(rotation_z(quarter) * x_axis, y_axis);
        assert_close(rotation_x(quarter) * y_axis, z_axis);
        assert_close(rotation_y(quarter) * z_axis, x_axis);
    }

    #[test]
    fn euler_rotation_composes_axes_in_order() {
        let mut m = Matrix4::IDENTITY;
        rotate(&mut m, 0.3, -0.2, 1.1);
        let expected = rotation_x(0.3) * rotation_y(-0.2) * rotation_z(1.1);
        assert_eq!(m, expected);
    }

    #[test]
    fn ortho_maps_box_onto_unit_cube() {
        let m = ortho(-4.0, 4.0, -3.0, 3.0, 1.0, 100.0).unwrap();
        assert_close(m * Vector4::point(-4.0, -3.0, -1.0), Vector4::point(-1.0, -1.0, -1.0));
        assert_close(m * Vector4::point(4.0, 3.0, -100.0), Vector4::point(1.0, 1.0, 1.0));
    }

    #[test]
    fn projection_builders_reject_degenerate_parameters() {
        assert!(ortho(0.0, 0.0, -1.0, 1.0, 0.1, 10.0).is_none());
        assert!(ortho(-1.0, 1.0, 2.0, 2.0, 0.1, 10.0).is_none());
        assert!(ortho(-1.0, 1.0, -1.0, 1.0, 10.0, 10.0).is_none());
        assert!(perspective(0.0, 0.1, 10.0, 1.0).is_none());
        assert!(perspective(60.0, 10.0, 0.1, 1.0).is_none());
        assert!(perspective(60.0, 0.1, 10.0, 0.0).is_none());
    }

    #[test]
    fn perspective_maps_near_and_far_planes() {
        let m = perspective(90.0, 1.0, 10.0, 1.0).unwrap();
        let near = (m * Vector4::point(0.0, 0.0, -1.0)).normalized();
        let far = (m * Vector4::point(0.0, 0.0, -10.0)).normalized();
        assert!((near.z + 1.0).abs() < EPS);
        assert!((far.z - 1.0).abs() < EPS);
        let edge = (m * Vector4::point(1.0, 0.0, -1.0)).normalized();
        assert!((edge.x - 1.0).abs() < EPS);
    }

    #[test]
    fn angle_conversions_round_trip() {
        assert!((degrees_to_radians(180.0) - std::f32::consts::PI).abs() < EPS);
        assert!((radians_to_degrees(std::f32::consts::FRAC_PI_2) - 90.0).abs() < 1e-3);
    }
}
