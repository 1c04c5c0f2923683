// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM-style queries against a revision.
//!
//! [`Dom`] is a short-lived query context over one [`Revision`]. Every query
//! takes a [`ShadowNode`] reference that may come from any earlier revision,
//! resolves it against the context's revision first, and returns `None` when
//! the node (or a node the query depends on) is not there.
//!
//! Continuous measurements ([`bounding_client_rect`], [`measure`],
//! [`measure_in_window`], [`measure_layout`], [`offset`]) are returned as
//! computed. Box metrics ([`scroll_position`], [`scroll_size`],
//! [`inner_size`], [`border_size`]) are rounded to whole pixels, with ties
//! rounded away from zero.
//!
//! [`bounding_client_rect`]: Dom::bounding_client_rect
//! [`measure`]: Dom::measure
//! [`measure_in_window`]: Dom::measure_in_window
//! [`measure_layout`]: Dom::measure_layout
//! [`offset`]: Dom::offset
//! [`scroll_position`]: Dom::scroll_position
//! [`scroll_size`]: Dom::scroll_size
//! [`inner_size`]: Dom::inner_size
//! [`border_size`]: Dom::border_size

mod position;
mod tag;

pub use position::{DocumentPosition, compare_document_position};
pub use tag::DomConfig;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::geometry::{DisplayType, Frame, LayoutMetrics, Point, round_px};
use crate::layout::{LayoutInspectingPolicy, compose};
use crate::node::ShadowNode;
use crate::resolve::{self, Miss};
use crate::revision::Revision;
#[cfg(feature = "trace-rich")]
use crate::trace::{LookupKind, ResolveEvent};
use crate::trace::{QueryEvent, QueryKind, QueryOutcome, TraceSink, Tracer};

/// A rectangle in a query's reference coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DomRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl From<Frame> for DomRect {
    fn from(frame: Frame) -> Self {
        Self {
            x: frame.origin.x,
            y: frame.origin.y,
            width: frame.size.width,
            height: frame.size.height,
        }
    }
}

/// Result of [`Dom::offset`].
#[derive(Clone, Debug)]
pub struct Offset {
    /// The positioned ancestor the offsets are measured from.
    pub parent: Arc<ShadowNode>,
    /// Distance from the parent's inner top border edge.
    pub top: f64,
    /// Distance from the parent's inner left border edge.
    pub left: f64,
}

/// Result of [`Dom::scroll_position`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollPosition {
    /// Horizontal scroll offset.
    pub left: f64,
    /// Vertical scroll offset.
    pub top: f64,
}

/// Result of [`Dom::scroll_size`] and [`Dom::inner_size`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoxSize {
    /// Width in whole pixels.
    pub width: i32,
    /// Height in whole pixels.
    pub height: i32,
}

/// Result of [`Dom::border_size`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BorderSize {
    /// Top border width.
    pub top: i32,
    /// Right border width.
    pub right: i32,
    /// Bottom border width.
    pub bottom: i32,
    /// Left border width.
    pub left: i32,
}

/// Result of [`Dom::measure`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Measurement {
    /// Left edge in the parent's coordinate space.
    pub x: f64,
    /// Top edge in the parent's coordinate space.
    pub y: f64,
    /// Visual width.
    pub width: f64,
    /// Visual height.
    pub height: f64,
    /// Visual left edge in the surface's coordinate space.
    pub page_x: f64,
    /// Visual top edge in the surface's coordinate space.
    pub page_y: f64,
}

/// A query context over one revision.
///
/// Queries take `&mut self` only to report to the trace sink; they never
/// modify the revision.
#[derive(Debug)]
pub struct Dom<'a> {
    revision: &'a Revision,
    config: DomConfig,
    tracer: Tracer<'a>,
}

impl<'a> Dom<'a> {
    /// Creates an untraced query context.
    #[must_use]
    pub fn new(revision: &'a Revision) -> Self {
        Self {
            revision,
            config: DomConfig::default(),
            tracer: Tracer::none(),
        }
    }

    /// Creates a query context that reports to `sink`.
    #[must_use]
    pub fn with_tracer(revision: &'a Revision, sink: &'a mut dyn TraceSink) -> Self {
        Self {
            revision,
            config: DomConfig::default(),
            tracer: Tracer::new(sink),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: DomConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the revision queries run against.
    #[inline]
    #[must_use]
    pub fn revision(&self) -> &'a Revision {
        self.revision
    }

    /// Returns the configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DomConfig {
        &self.config
    }

    /// Whether `node` is part of the revision.
    pub fn is_connected(&mut self, node: &ShadowNode) -> bool {
        let result = self.instance(node).map(drop);
        self.finish(node, QueryKind::IsConnected, result).is_some()
    }

    /// Returns the current instance of `node`'s parent.
    ///
    /// Nodes directly below the root, and the root itself, report the root.
    pub fn parent_node(&mut self, node: &ShadowNode) -> Option<Arc<ShadowNode>> {
        let result = self.parent(node);
        self.finish(node, QueryKind::ParentNode, result)
    }

    /// Returns the current children of `node`, in order.
    pub fn child_nodes(&mut self, node: &ShadowNode) -> Option<Vec<Arc<ShadowNode>>> {
        let result = self.instance(node).map(|current| current.children().to_vec());
        self.finish(node, QueryKind::ChildNodes, result)
    }

    /// Concatenates the raw text leaves below `node` in tree order.
    ///
    /// Returns an empty string for a disconnected node.
    pub fn text_content(&mut self, node: &ShadowNode) -> String {
        let result = self.instance(node).map(|current| {
            let mut text = String::new();
            let leaves = core::iter::once(&current)
                .chain(current.descendants())
                .filter_map(|n| n.raw_text());
            for leaf in leaves {
                text.push_str(leaf);
            }
            text
        });
        self.finish(node, QueryKind::TextContent, result)
            .unwrap_or_default()
    }

    /// Returns the DOM tag name of `node`.
    ///
    /// This is a pure function of the component name; it does not consult
    /// the revision.
    #[must_use]
    pub fn tag_name(&self, node: &ShadowNode) -> String {
        self.config.tag_name(node.component_name())
    }

    /// Returns `node`'s visual border box in window coordinates.
    pub fn bounding_client_rect(&mut self, node: &ShadowNode) -> Option<DomRect> {
        self.bounding_client_rect_with(node, true)
    }

    /// Like [`bounding_client_rect`](Self::bounding_client_rect), with
    /// control over whether visual transforms apply. The viewport offset
    /// always does.
    pub fn bounding_client_rect_with(
        &mut self,
        node: &ShadowNode,
        include_transform: bool,
    ) -> Option<DomRect> {
        let policy = LayoutInspectingPolicy {
            include_transform,
            include_viewport_offset: true,
        };
        let result = self
            .instance(node)
            .and_then(|_| compose(self.revision.root(), node.family(), policy))
            .map(|metrics| DomRect::from(metrics.frame));
        self.finish(node, QueryKind::BoundingClientRect, result)
    }

    /// Returns `node`'s positioned ancestor and the layout distance from that
    /// ancestor's inner border edge to `node`'s border box.
    ///
    /// Transforms are ignored. The root has no positioned ancestor and so no
    /// offset.
    pub fn offset(&mut self, node: &ShadowNode) -> Option<Offset> {
        let result = self.compute_offset(node);
        self.finish(node, QueryKind::Offset, result)
    }

    fn compute_offset(&mut self, node: &ShadowNode) -> Result<Offset, Miss> {
        self.instance(node)?;
        let parent = self.positioned_ancestor(node)?;

        let root = self.revision.root();
        let own = compose(root, node.family(), LayoutInspectingPolicy::LAYOUT)?;
        let anchor = compose(root, parent.family(), LayoutInspectingPolicy::LAYOUT)?;

        let delta = own.frame.origin - anchor.frame.origin;
        Ok(Offset {
            top: delta.y - anchor.border_width.y0,
            left: delta.x - anchor.border_width.x0,
            parent,
        })
    }

    /// Returns how far `node`'s content is scrolled.
    ///
    /// A node that is not scrolled reports exactly `+0.0` on both axes.
    pub fn scroll_position(&mut self, node: &ShadowNode) -> Option<ScrollPosition> {
        let result = self.instance(node).and_then(|current| {
            compose(
                self.revision.root(),
                current.family(),
                LayoutInspectingPolicy::VISUAL,
            )?;
            let layout = current.layout().ok_or(Miss::NotLayoutable)?;
            let offset = layout.content_origin_offset;
            Ok(ScrollPosition {
                left: scroll_axis(offset.x),
                top: scroll_axis(offset.y),
            })
        });
        self.finish(node, QueryKind::ScrollPosition, result)
    }

    /// Returns the size of the area `node`'s content can be scrolled over.
    pub fn scroll_size(&mut self, node: &ShadowNode) -> Option<BoxSize> {
        let result = self.instance(node).and_then(|current| {
            let metrics = self.box_metrics(&current)?;
            let layout = current.layout().ok_or(Miss::NotLayoutable)?;
            let bounds = metrics.scrollable_content_bounds(layout.content_bounds);
            Ok(BoxSize {
                width: round_px(bounds.size.width),
                height: round_px(bounds.size.height),
            })
        });
        self.finish(node, QueryKind::ScrollSize, result)
    }

    /// Returns the size of `node`'s padding box.
    pub fn inner_size(&mut self, node: &ShadowNode) -> Option<BoxSize> {
        let result = self.instance(node).and_then(|current| {
            let size = self.box_metrics(&current)?.padding_frame().size;
            Ok(BoxSize {
                width: round_px(size.width),
                height: round_px(size.height),
            })
        });
        self.finish(node, QueryKind::InnerSize, result)
    }

    /// Returns `node`'s border widths.
    pub fn border_size(&mut self, node: &ShadowNode) -> Option<BorderSize> {
        let result = self.instance(node).and_then(|current| {
            let border = self.box_metrics(&current)?.border_width;
            Ok(BorderSize {
                top: round_px(border.y0),
                right: round_px(border.x1),
                bottom: round_px(border.y1),
                left: round_px(border.x0),
            })
        });
        self.finish(node, QueryKind::BorderSize, result)
    }

    /// Returns `node`'s position in its parent together with its visual size
    /// and position in the surface. The viewport offset is not applied.
    pub fn measure(&mut self, node: &ShadowNode) -> Option<Measurement> {
        let result = self.instance(node).and_then(|current| {
            let page = compose(
                self.revision.root(),
                current.family(),
                LayoutInspectingPolicy::VISUAL,
            )?
            .frame;
            let local = current
                .layout()
                .map_or(Point::ORIGIN, |layout| layout.metrics.frame.origin);
            Ok(Measurement {
                x: local.x,
                y: local.y,
                width: page.size.width,
                height: page.size.height,
                page_x: page.origin.x,
                page_y: page.origin.y,
            })
        });
        self.finish(node, QueryKind::Measure, result)
    }

    /// Returns `node`'s visual border box in window coordinates.
    pub fn measure_in_window(&mut self, node: &ShadowNode) -> Option<DomRect> {
        let result = self.instance(node).and_then(|current| {
            compose(
                self.revision.root(),
                current.family(),
                LayoutInspectingPolicy::WINDOW,
            )
            .map(|metrics| DomRect::from(metrics.frame))
        });
        self.finish(node, QueryKind::MeasureInWindow, result)
    }

    /// Returns `node`'s border box in the coordinate space of
    /// `relative_to`, which must be one of its ancestors (or itself).
    /// Transforms are ignored.
    pub fn measure_layout(
        &mut self,
        node: &ShadowNode,
        relative_to: &ShadowNode,
    ) -> Option<DomRect> {
        let result = self.compute_measure_layout(node, relative_to);
        self.finish(node, QueryKind::MeasureLayout, result)
    }

    fn compute_measure_layout(
        &mut self,
        node: &ShadowNode,
        relative_to: &ShadowNode,
    ) -> Result<DomRect, Miss> {
        let current = self.instance(node)?;
        let ancestor = self
            .instance(relative_to)
            .map_err(|_| Miss::RelativeNodeDisconnected)?;
        let metrics = compose(&ancestor, current.family(), LayoutInspectingPolicy::LAYOUT)?;
        Ok(DomRect::from(metrics.frame))
    }

    /// Compares the tree positions of `a` and `b`.
    ///
    /// See [`compare_document_position`] for the meaning of the result.
    pub fn compare_document_position(
        &mut self,
        a: &ShadowNode,
        b: &ShadowNode,
    ) -> DocumentPosition {
        let position = compare_document_position(self.revision, a, b);
        let result = if position.contains(DocumentPosition::DISCONNECTED) {
            Err(Miss::Disconnected)
        } else {
            Ok(())
        };
        self.finish(a, QueryKind::CompareDocumentPosition, result);
        position
    }

    // -- helpers -------------------------------------------------------------

    /// Metrics of a node with a box of its own: displayed and not inline.
    fn box_metrics(&self, current: &ShadowNode) -> Result<LayoutMetrics, Miss> {
        let metrics = compose(
            self.revision.root(),
            current.family(),
            LayoutInspectingPolicy::LAYOUT,
        )?;
        if metrics.display_type == DisplayType::Inline {
            return Err(Miss::InlineDisplay);
        }
        Ok(metrics)
    }

    fn instance(&mut self, node: &ShadowNode) -> Result<Arc<ShadowNode>, Miss> {
        let found = resolve::current_instance(self.revision, node);
        #[cfg(feature = "trace-rich")]
        self.resolved(node, LookupKind::Instance, found.is_some());
        found.ok_or(Miss::Disconnected)
    }

    fn parent(&mut self, node: &ShadowNode) -> Result<Arc<ShadowNode>, Miss> {
        let found = resolve::parent_instance(self.revision, node);
        #[cfg(feature = "trace-rich")]
        self.resolved(node, LookupKind::Parent, found.is_some());
        found.ok_or(Miss::Disconnected)
    }

    fn positioned_ancestor(&mut self, node: &ShadowNode) -> Result<Arc<ShadowNode>, Miss> {
        let found = resolve::positioned_ancestor(self.revision, node);
        #[cfg(feature = "trace-rich")]
        self.resolved(node, LookupKind::PositionedAncestor, found.is_some());
        found.ok_or(Miss::NoPositionedAncestor)
    }

    #[cfg(feature = "trace-rich")]
    fn resolved(&mut self, node: &ShadowNode, lookup: LookupKind, found: bool) {
        self.tracer.resolve(&ResolveEvent {
            revision: self.revision.number(),
            tag: node.tag(),
            lookup,
            found,
        });
    }

    fn finish<T>(
        &mut self,
        node: &ShadowNode,
        kind: QueryKind,
        result: Result<T, Miss>,
    ) -> Option<T> {
        self.tracer.query(&QueryEvent {
            revision: self.revision.number(),
            surface: self.revision.surface_id(),
            tag: node.tag(),
            kind,
            outcome: QueryOutcome::from(&result),
        });
        result.ok()
    }
}

/// Scroll offset on one axis from the content-origin offset: negated and
/// rounded. `+ 0.0` turns a negative zero into `+0.0`.
fn scroll_axis(content_offset: f64) -> f64 {
    (-content_offset).round() + 0.0
}
