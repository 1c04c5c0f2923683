// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Box-model value types.
//!
//! Points, sizes, and insets come from [`kurbo`]. Border widths and content
//! insets use [`kurbo::Insets`], where `x0` is the left edge, `y0` the top,
//! `x1` the right, and `y1` the bottom.
//!
//! [`Frame`] stores origin + size, not [`kurbo::Rect`]'s corners; reported
//! widths and heights round-trip exactly and the negative-size
//! [`LayoutMetrics::EMPTY`] sentinel is never normalized.

pub use kurbo::{Insets, Point, Size, Vec2};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// A box in its parent's coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frame {
    /// Top-left corner.
    pub origin: Point,
    /// Width and height. May be negative only for sentinels.
    pub size: Size,
}

impl Frame {
    /// The zero-sized frame at the origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a frame from its origin and size components.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Left edge.
    #[inline]
    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    /// Right edge.
    #[inline]
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    /// Top edge.
    #[inline]
    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    /// Bottom edge.
    #[inline]
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Centre point.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Smallest frame containing all of `points`.
    ///
    /// Returns [`Frame::ZERO`] for an empty slice.
    #[must_use]
    pub fn bounding(points: &[Point]) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::ZERO;
        };
        let (mut min, mut max) = (*first, *first);
        for p in rest {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }
}

/// Horizontal writing direction of a box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutDirection {
    /// Inherited or not yet resolved.
    #[default]
    Undefined,
    /// Left to right.
    LeftToRight,
    /// Right to left.
    RightToLeft,
}

/// How a box participates in positioning.
///
/// Anything other than [`Static`](Self::Static) makes the box a positioned
/// ancestor (offset parent) for its descendants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PositionType {
    /// Normal flow, not a containing block for offsets.
    Static,
    /// Offset relative to its normal position. Layout engines report this
    /// unless told otherwise.
    #[default]
    Relative,
    /// Taken out of flow.
    Absolute,
}

/// How a box is displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayType {
    /// Not displayed; hides the entire subtree from geometry queries.
    None,
    /// A block-like flex container.
    #[default]
    Flex,
    /// Inline content with no box of its own for size queries.
    Inline,
}

/// Geometry of one node, valid within a single revision only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    /// Border box in the parent's coordinate space.
    pub frame: Frame,
    /// Border plus padding on each edge.
    pub content_insets: Insets,
    /// Border width on each edge.
    pub border_width: Insets,
    /// Display mode.
    pub display_type: DisplayType,
    /// Positioning mode.
    pub position_type: PositionType,
    /// Writing direction.
    pub layout_direction: LayoutDirection,
}

impl LayoutMetrics {
    /// Metrics of a node that has not been laid out.
    pub const DEFAULT: Self = Self {
        frame: Frame::ZERO,
        content_insets: Insets::ZERO,
        border_width: Insets::ZERO,
        display_type: DisplayType::Flex,
        position_type: PositionType::Relative,
        layout_direction: LayoutDirection::Undefined,
    };

    /// The "no box" sentinel.
    ///
    /// Compares unequal to every metrics value a layout engine can produce for
    /// a displayed node, including a zero-sized one.
    pub const EMPTY: Self = Self {
        frame: Frame::new(0.0, 0.0, -1.0, -1.0),
        display_type: DisplayType::None,
        ..Self::DEFAULT
    };

    /// Creates default metrics with the given frame.
    #[inline]
    #[must_use]
    pub const fn with_frame(frame: Frame) -> Self {
        Self {
            frame,
            ..Self::DEFAULT
        }
    }

    /// Whether this node has a box at all.
    #[inline]
    #[must_use]
    pub fn is_displayed(&self) -> bool {
        self.display_type != DisplayType::None && *self != Self::EMPTY
    }

    /// The padding box in the node's own coordinate space: the border box
    /// with border widths removed.
    #[must_use]
    pub fn padding_frame(&self) -> Frame {
        let b = &self.border_width;
        Frame::new(
            b.x0,
            b.y0,
            self.frame.size.width - b.x0 - b.x1,
            self.frame.size.height - b.y0 - b.y1,
        )
    }

    /// The area a scroll container can scroll over, in the node's own
    /// coordinate space.
    ///
    /// This is the padding frame grown to cover `content_bounds` plus the
    /// padding on the content-end side: bottom, and right for left-to-right
    /// (or left for right-to-left) layouts. The content-start sides stay at
    /// the padding frame.
    #[must_use]
    pub fn scrollable_content_bounds(&self, content_bounds: Frame) -> Frame {
        let padding_frame = self.padding_frame();
        let (insets, borders) = (&self.content_insets, &self.border_width);
        let padding_bottom = insets.y1 - borders.y1;
        let padding_left = insets.x0 - borders.x0;
        let padding_right = insets.x1 - borders.x1;

        let min_y = padding_frame.min_y();
        let max_y = padding_frame
            .max_y()
            .max(content_bounds.max_y() + padding_bottom);

        let (min_x, max_x) = if self.layout_direction == LayoutDirection::RightToLeft {
            (
                padding_frame
                    .min_x()
                    .min(content_bounds.min_x() - padding_left),
                padding_frame.max_x(),
            )
        } else {
            (
                padding_frame.min_x(),
                padding_frame
                    .max_x()
                    .max(content_bounds.max_x() + padding_right),
            )
        };

        Frame::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

impl Default for LayoutMetrics {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Rounds a continuous length to whole pixels, ties away from zero.
#[expect(
    clippy::cast_possible_truncation,
    reason = "box metrics are far inside i32 range; `as` saturates otherwise"
)]
pub(crate) fn round_px(value: f64) -> i32 {
    value.round() as i32
}
