// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal column-major 4×4 visual transform.
//!
//! Layout engines report a node's visual transform (the CSS-style
//! `transform` property) as a 4×4 matrix. Geometry queries map frames to
//! their bounding boxes and scale sizes through it.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::geometry::{Frame, Point, Size};

/// A column-major 4×4 affine transform stored as `[[f64; 4]; 4]`.
///
/// Each inner array is one *column* of the matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Four columns, each a 4-element array `[x, y, z, w]`.
    pub cols: [[f64; 4]; 4],
}

impl Transform {
    /// The 4×4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a pure translation transform.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Creates a non-uniform scale transform.
    #[inline]
    #[must_use]
    pub const fn from_scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            cols: [
                [sx, 0.0, 0.0, 0.0],
                [0.0, sy, 0.0, 0.0],
                [0.0, 0.0, sz, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Creates a rotation around the Z axis (radians).
    #[inline]
    #[must_use]
    pub fn from_rotation_z(radians: f64) -> Self {
        let (s, c) = (radians.sin(), radians.cos());
        Self {
            cols: [
                [c, s, 0.0, 0.0],
                [-s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Whether this is exactly the identity matrix.
    #[inline]
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Maps a point in the XY plane (z = 0, w = 1).
    #[inline]
    #[must_use]
    pub fn apply_to_point(&self, p: Point) -> Point {
        let c = &self.cols;
        Point::new(
            c[0][0] * p.x + c[1][0] * p.y + c[3][0],
            c[0][1] * p.x + c[1][1] * p.y + c[3][1],
        )
    }

    /// Maps `frame` through this transform about the frame's own centre and
    /// returns the bounding box of the four mapped corners.
    #[must_use]
    pub fn apply_to_frame(&self, frame: Frame) -> Frame {
        if self.is_identity() {
            return frame;
        }
        let center = frame.center();
        let corner = |x: f64, y: f64| {
            let mapped = self.apply_to_point(Point::new(x - center.x, y - center.y));
            Point::new(mapped.x + center.x, mapped.y + center.y)
        };
        Frame::bounding(&[
            corner(frame.min_x(), frame.min_y()),
            corner(frame.max_x(), frame.min_y()),
            corner(frame.max_x(), frame.max_y()),
            corner(frame.min_x(), frame.max_y()),
        ])
    }

    /// Scales `size` by the matrix's X and Y scale factors.
    ///
    /// Rotation and shear are ignored; only the diagonal is used.
    #[must_use]
    pub fn apply_to_size(&self, size: Size) -> Size {
        if self.is_identity() {
            return size;
        }
        Size::new(
            (self.cols[0][0] * size.width).abs(),
            (self.cols[1][1] * size.height).abs(),
        )
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_frame_eq(actual: Frame, expected: Frame) {
        let eps = 1e-9;
        assert!(
            (actual.origin.x - expected.origin.x).abs() < eps
                && (actual.origin.y - expected.origin.y).abs() < eps
                && (actual.size.width - expected.size.width).abs() < eps
                && (actual.size.height - expected.size.height).abs() < eps,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn default_is_identity() {
        assert_eq!(Transform::default(), Transform::IDENTITY);
        assert!(Transform::default().is_identity());
    }

    #[test]
    fn identity_leaves_frame_untouched() {
        let frame = Frame::new(0.1, 0.2, 0.3, 0.7);
        assert_eq!(Transform::IDENTITY.apply_to_frame(frame), frame);
        assert_eq!(Transform::IDENTITY.apply_to_size(frame.size), frame.size);
    }

    #[test]
    fn translate_moves_frame() {
        let t = Transform::from_translation(5.0, -3.0, 0.0);
        assert_frame_eq(
            t.apply_to_frame(Frame::new(10.0, 10.0, 20.0, 20.0)),
            Frame::new(15.0, 7.0, 20.0, 20.0),
        );
    }

    #[test]
    fn scale_is_about_centre() {
        let t = Transform::from_scale(2.0, 2.0, 1.0);
        assert_frame_eq(
            t.apply_to_frame(Frame::new(10.0, 10.0, 20.0, 10.0)),
            Frame::new(0.0, 5.0, 40.0, 20.0),
        );
        assert_eq!(
            t.apply_to_size(Size::new(20.0, 10.0)),
            Size::new(40.0, 20.0)
        );
    }

    #[test]
    fn quarter_turn_swaps_extent() {
        let t = Transform::from_rotation_z(core::f64::consts::FRAC_PI_2);
        assert_frame_eq(
            t.apply_to_frame(Frame::new(0.0, 0.0, 40.0, 20.0)),
            Frame::new(10.0, -10.0, 20.0, 40.0),
        );
    }

    #[test]
    fn negative_scale_size_is_positive() {
        let t = Transform::from_scale(-1.0, 1.0, 1.0);
        assert_eq!(t.apply_to_size(Size::new(8.0, 4.0)), Size::new(8.0, 4.0));
    }
}
