// src/math/region.rs

//! Integer rectangle used as the rendering viewport.

use serde::{Deserialize, Serialize};

/// An axis-aligned integer region `[x_min, x_max] x [y_min, y_max]`.
///
/// Always satisfies `x_min <= x_max` and `y_min <= y_max`: construction clamps
/// an inverted maximum down to the minimum, never the other way round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Region {
    x_min: i32,
    x_max: i32,
    y_min: i32,
    y_max: i32,
}

impl Region {
    pub fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> Self {
        Self {
            x_min,
            x_max: x_max.max(x_min),
            y_min,
            y_max: y_max.max(y_min),
        }
    }

    /// Region cornered at the origin, `[0, x] x [0, y]`.
    pub fn from_size(x: i32, y: i32) -> Self {
        Self::new(0, x, 0, y)
    }

    /// Region covering every pixel of a `width x height` buffer; the maximum
    /// bounds are the last pixel indices.
    pub fn full(width: u32, height: u32) -> Self {
        let last = |n: u32| (n.min(i32::MAX as u32) as i32 - 1).max(0);
        Self::new(0, last(width), 0, last(height))
    }

    pub fn x_min(&self) -> i32 {
        self.x_min
    }

    pub fn x_max(&self) -> i32 {
        self.x_max
    }

    pub fn y_min(&self) -> i32 {
        self.y_min
    }

    pub fn y_max(&self) -> i32 {
        self.y_max
    }

    /// `x_max - x_min`, widened so regions spanning the whole `i32` range fit.
    pub fn width(&self) -> i64 {
        self.x_max as i64 - self.x_min as i64
    }

    pub fn height(&self) -> i64 {
        self.y_max as i64 - self.y_min as i64
    }

    /// Replaces the bounds if they describe a valid region.
    ///
    /// Returns `false` and leaves the region untouched when either maximum is
    /// below its minimum.
    pub fn set(&mut self, x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> bool {
        if x_max < x_min || y_max < y_min {
            return false;
        }
        *self = Self {
            x_min,
            x_max,
            y_min,
            y_max,
        };
        true
    }

    /// Whether this region lies entirely inside `outer`.
    pub fn fits_in(&self, outer: &Region) -> bool {
        outer.x_min <= self.x_min
            && outer.x_max >= self.x_max
            && outer.y_min <= self.y_min
            && outer.y_max >= self.y_max
    }

    /// Whether this region lies inside a `width x height` buffer.
    pub fn fits_in_dimensions(&self, width: u32, height: u32) -> bool {
        width > 0 && height > 0 && self.fits_in(&Region::full(width, height))
    }

    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    /// Maps a normalized device coordinate to a pixel position.
    ///
    /// Y grows downwards in the buffer, so `y = -1` lands on `y_max`. The flag
    /// tells whether `(x, y)` was inside `[-1, 1) x [-1, 1)`; the position is
    /// computed either way and may lie outside the region. Coordinates too far
    /// out for an `i32` saturate at its bounds.
    pub fn map_ndc(&self, x: f32, y: f32) -> ((i32, i32), bool) {
        let dx = ((x + 1.0) * 0.5 * self.width() as f32).floor() as i64;
        let dy = ((y + 1.0) * 0.5 * self.height() as f32).floor() as i64;
        let px = saturate((self.x_min as i64).saturating_add(dx));
        let py = saturate((self.y_max as i64).saturating_sub(dy));
        let inside = (-1.0..1.0).contains(&x) && (-1.0..1.0).contains(&y);
        ((px, py), inside)
    }
}

fn saturate(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn inverted_bounds_collapse_to_minimum() {
        let r = Region::new(5, 2, 3, -4);
        assert_eq!(r.x_max(), 5);
        assert_eq!(r.y_max(), 3);
        assert_eq!(r.area(), 0);
    }

    #[test]
    fn set_rejects_inverted_bounds() {
        let mut r = Region::new(0, 10, 0, 10);
        assert!(!r.set(4, 1, 0, 2));
        assert_eq!(r, Region::new(0, 10, 0, 10));
        assert!(r.set(1, 4, 2, 6));
        assert_eq!(r.area(), 12);
    }

    #[test]
    fn containment() {
        let outer = Region::from_size(10, 10);
        assert!(Region::new(2, 5, 2, 5).fits_in(&outer));
        assert!(!Region::new(-1, 5, 2, 5).fits_in(&outer));
        assert!(Region::full(8, 8).fits_in_dimensions(8, 8));
        assert!(!Region::from_size(8, 8).fits_in_dimensions(8, 8));
    }

    #[test]
    fn full_region_uses_last_pixel_indices() {
        let r = Region::full(640, 480);
        assert_eq!((r.x_min(), r.x_max(), r.y_min(), r.y_max()), (0, 639, 0, 479));
        assert_eq!(Region::full(0, 0).area(), 0);
    }

    #[test]
    fn maps_corners_with_y_flip() {
        let r = Region::full(4, 4);
        assert_eq!(r.map_ndc(-1.0, -1.0), ((0, 3), true));
        assert_eq!(r.map_ndc(1.0, 1.0), ((3, 0), false));
        assert_eq!(r.map_ndc(0.0, 0.0), ((1, 2), true));
    }

    #[test]
    fn reports_outside_coordinates_but_still_maps() {
        let r = Region::full(11, 11);
        let ((px, py), inside) = r.map_ndc(-1.5, 0.0);
        assert!(!inside);
        assert_eq!((px, py), (-3, 5));
    }

    #[test]
    fn far_coordinates_saturate() {
        let r = Region::full(4, 4);
        assert_eq!(r.map_ndc(0.0, -1.0e10), ((1, i32::MAX), false));
        assert_eq!(r.map_ndc(1.0e10, 1.0e10), ((i32::MAX, i32::MIN), false));
        assert_eq!(r.map_ndc(f32::NEG_INFINITY, 0.0), ((i32::MIN, 2), false));
    }

    #[test]
    fn region_spanning_all_of_i32() {
        let r = Region::new(i32::MIN, i32::MAX, 0, 3);
        assert_eq!(r.width(), u32::MAX as i64);
        assert_eq!(r.map_ndc(0.0, 0.0), ((0, 2), true));
        assert_eq!(r.map_ndc(-1.0, -1.0), ((i32::MIN, 3), true));
    }
}
