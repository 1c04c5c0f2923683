// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shadow-tree data model.
//!
//! A *shadow node* is an immutable snapshot of one UI node in one revision.
//! Each shadow node has:
//!
//! - An identity ([`Family`]) shared by every snapshot of the same logical
//!   node across all revisions. The family keeps a weak link to its parent
//!   family, used only to relocate the node inside a given revision.
//! - Ordered children, each an [`Arc<ShadowNode>`](alloc::sync::Arc). A new
//!   revision clones the nodes on the path from the root to a change and
//!   shares every other subtree with the previous revision.
//! - **Capabilities** declared at construction: [`Layoutable`] for nodes that
//!   take part in layout, and raw text for text leaves. Queries branch on
//!   [`ShadowNode::layout`] and [`ShadowNode::raw_text`] instead of
//!   inspecting node types.
//!
//! [`AncestorPath`] is the per-query chain of (ancestor, child index) pairs
//! from a revision's root down to a node's parent, produced by
//! [`Family::ancestors`].

mod family;
mod id;
mod path;
mod shadow;
mod traverse;

pub use family::Family;
pub use id::{SurfaceId, Tag};
pub use path::{AncestorPath, AncestorStep};
pub use shadow::{Layoutable, NodeTraits, ShadowNode, ShadowNodeFragment};
pub use traverse::Descendants;
