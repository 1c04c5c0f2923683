// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared tree fixtures for unit tests.

use alloc::sync::Arc;
use alloc::vec;

use crate::geometry::{Frame, Insets, LayoutMetrics, Vec2};
use crate::node::{Family, Layoutable, NodeTraits, ShadowNode, SurfaceId, Tag};
use crate::revision::{Revision, RevisionNumber};
use crate::transform::Transform;

/// Viewport origin of the fixture surface, carried by the root transform.
pub(crate) const VIEWPORT: Vec2 = Vec2::new(0.0, 100.0);

/// Surface of the fixture tree.
pub(crate) const SURFACE: SurfaceId = SurfaceId(7);

/// A small committed tree:
///
/// ```text
/// root (1, RootView)  0,0 400×800, border 2, viewport (0, 100)
/// ├─ container (2, View)  10,20 200×300, border 1, insets 4
/// │  ├─ first (3, View)  5,6 50×40
/// │  └─ second (4, AndroidTextInput)  5,60 50×40
/// └─ label (5, Paragraph)  10,400 100×20
///    ├─ RawText (6) "Hello "
///    └─ RawText (7) "World"
/// ```
pub(crate) struct Fixture {
    pub(crate) root_family: Arc<Family>,
    pub(crate) revision: Revision,
    pub(crate) container: Arc<ShadowNode>,
    pub(crate) first: Arc<ShadowNode>,
    pub(crate) second: Arc<ShadowNode>,
    pub(crate) label: Arc<ShadowNode>,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let root_family = Family::new_root(Tag(1), SURFACE, "RootView");
        let container_family = Family::new_child(&root_family, Tag(2), "View");
        let first_family = Family::new_child(&container_family, Tag(3), "View");
        let second_family = Family::new_child(&container_family, Tag(4), "AndroidTextInput");
        let label_family = Family::new_child(&root_family, Tag(5), "Paragraph");
        let hello_family = Family::new_child(&label_family, Tag(6), "RawText");
        let world_family = Family::new_child(&label_family, Tag(7), "RawText");

        let first = view(&first_family, 5.0, 6.0, 50.0, 40.0);
        let second = view(&second_family, 5.0, 60.0, 50.0, 40.0);
        let container = Arc::new(
            ShadowNode::new(container_family)
                .with_layout(
                    Layoutable::new(LayoutMetrics {
                        border_width: Insets::uniform(1.0),
                        content_insets: Insets::uniform(4.0),
                        ..LayoutMetrics::with_frame(Frame::new(10.0, 20.0, 200.0, 300.0))
                    })
                    .with_content_bounds(Frame::new(4.0, 4.0, 192.0, 292.0)),
                )
                .with_children(vec![Arc::clone(&first), Arc::clone(&second)]),
        );
        let label = Arc::new(
            ShadowNode::new(label_family)
                .with_layout(Layoutable::new(LayoutMetrics::with_frame(Frame::new(
                    10.0, 400.0, 100.0, 20.0,
                ))))
                .with_children(vec![text(&hello_family, "Hello "), text(&world_family, "World")]),
        );
        let root = Arc::new(
            ShadowNode::new(Arc::clone(&root_family))
                .with_traits(NodeTraits::ROOT_NODE_KIND)
                .with_layout(
                    Layoutable::new(LayoutMetrics {
                        border_width: Insets::uniform(2.0),
                        ..LayoutMetrics::with_frame(Frame::new(0.0, 0.0, 400.0, 800.0))
                    })
                    .with_transform(Transform::from_translation(VIEWPORT.x, VIEWPORT.y, 0.0)),
                )
                .with_children(vec![Arc::clone(&container), Arc::clone(&label)]),
        );

        Self {
            root_family,
            revision: Revision::new(root, RevisionNumber(1)),
            container,
            first,
            second,
            label,
        }
    }
}

/// A childless layout node with the given frame.
pub(crate) fn view(
    family: &Arc<Family>,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Arc<ShadowNode> {
    Arc::new(
        ShadowNode::new(Arc::clone(family)).with_layout(Layoutable::new(LayoutMetrics::with_frame(
            Frame::new(x, y, width, height),
        ))),
    )
}

/// A raw text leaf.
pub(crate) fn text(family: &Arc<Family>, content: &str) -> Arc<ShadowNode> {
    Arc::new(ShadowNode::new(Arc::clone(family)).with_raw_text(content))
}
