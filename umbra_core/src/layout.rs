// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Relative geometry composition.
//!
//! Every node's [`LayoutMetrics`] are expressed in its parent's coordinate
//! space. [`relative_layout_metrics`] walks the chain from a descendant up to
//! an ancestor and accumulates frames, optionally applying each node's visual
//! transform, scroll displacement, and the surface viewport offset, to express
//! the descendant's box in the ancestor's coordinate space.
//!
//! The revision root's transform is the translation by the surface viewport
//! origin, so `include_viewport_offset` shifts results into window space.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::geometry::{LayoutMetrics, Point};
use crate::node::{Family, Layoutable, ShadowNode};
use crate::resolve::Miss;

/// Which optional adjustments [`relative_layout_metrics`] applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayoutInspectingPolicy {
    /// Apply visual transforms and scroll offsets of non-root nodes.
    pub include_transform: bool,
    /// Apply the transform of root-kind nodes (the viewport offset).
    pub include_viewport_offset: bool,
}

impl LayoutInspectingPolicy {
    /// Plain layout: no transforms, no viewport offset.
    pub const LAYOUT: Self = Self {
        include_transform: false,
        include_viewport_offset: false,
    };
    /// Visual position within the surface.
    pub const VISUAL: Self = Self {
        include_transform: true,
        include_viewport_offset: false,
    };
    /// Visual position within the window.
    pub const WINDOW: Self = Self {
        include_transform: true,
        include_viewport_offset: true,
    };
}

/// Computes `family`'s metrics in `ancestor`'s coordinate space.
///
/// Returns `None` when `ancestor` does not take part in layout, when `family`
/// is not below `ancestor`, or when any node on the chain is outside the
/// layout system or not displayed.
#[must_use]
pub fn relative_layout_metrics(
    ancestor: &Arc<ShadowNode>,
    family: &Family,
    policy: LayoutInspectingPolicy,
) -> Option<LayoutMetrics> {
    compose(ancestor, family, policy).ok()
}

pub(crate) fn compose(
    ancestor: &Arc<ShadowNode>,
    family: &Family,
    policy: LayoutInspectingPolicy,
) -> Result<LayoutMetrics, Miss> {
    let ancestor_layout = ancestor.layout().ok_or(Miss::NotLayoutable)?;

    if ancestor.family().is(family) {
        let mut metrics = ancestor_layout.metrics;
        if !metrics.is_displayed() {
            return Err(Miss::NotDisplayed);
        }
        if policy.include_transform {
            metrics.frame = ancestor_layout.transform.apply_to_frame(metrics.frame);
        }
        metrics.frame.origin = Point::ORIGIN;
        return Ok(metrics);
    }

    let path = family.ancestors(ancestor).ok_or(Miss::Disconnected)?;

    // Descendant first, then each ancestor up to `ancestor` or the nearest
    // root-kind node, whichever comes first.
    let mut chain: Vec<&ShadowNode> = Vec::with_capacity(path.len() + 1);
    chain.push(path.target());
    for step in path.iter().rev() {
        chain.push(step.node);
        if step.node.is_root_kind() {
            break;
        }
    }

    let layouts = chain
        .iter()
        .map(|node| {
            let layout = node.layout().ok_or(Miss::NotLayoutable)?;
            if layout.metrics.is_displayed() {
                Ok(layout)
            } else {
                Err(Miss::NotDisplayed)
            }
        })
        .collect::<Result<Vec<&Layoutable>, Miss>>()?;

    let mut metrics = layouts[0].metrics;
    metrics.frame.origin = Point::ORIGIN;

    let last = layouts.len() - 1;
    for (i, (node, layout)) in chain.iter().zip(&layouts).enumerate() {
        let mut frame = layout.metrics.frame;
        if i == last {
            frame.origin = Point::ORIGIN;
        }

        let root_kind = node.is_root_kind();
        if (policy.include_transform && !root_kind) || (policy.include_viewport_offset && root_kind)
        {
            metrics.frame.size = layout.transform.apply_to_size(metrics.frame.size);
            frame = layout.transform.apply_to_frame(frame);
        }

        metrics.frame.origin += frame.origin.to_vec2();
        if i != 0 && policy.include_transform {
            metrics.frame.origin += layout.content_origin_offset;
        }
    }
    Ok(metrics)
}
