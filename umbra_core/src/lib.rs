// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable shadow-tree revisions with DOM-style structural and geometric
//! queries.
//!
//! `umbra_core` answers questions such as "is this node still connected?",
//! "what is its bounding rect?", or "where does it sit in document order?"
//! against a tree of immutable node snapshots that an external commit process
//! replaces wholesale. Callers may hold node references from *any* earlier
//! revision; every query is answered with respect to the revision passed in.
//! It is `no_std` compatible (with `alloc`) and shares all tree data through
//! [`Arc`](alloc::sync::Arc), so a published revision can be queried from many
//! threads at once.
//!
//! # Architecture
//!
//! ```text
//!   commit process ──► Revision (root ShadowNode, number)
//!                          │
//!   stale ShadowNode ──┐   │
//!                      ▼   ▼
//!                 Dom::new(&revision)
//!                      │
//!        ┌─────────────┼──────────────────────┐
//!        ▼             ▼                      ▼
//!   Family::ancestors  resolve::*   layout::relative_layout_metrics
//!   (AncestorPath)     (instance,   (frame composition along the
//!                       parent,      ancestor chain)
//!                       positioned)
//!                      │
//!                      ▼
//!            Option<result> + QueryEvent ──► TraceSink
//! ```
//!
//! **[`node`]**: [`Family`](node::Family) (stable logical identity),
//! [`ShadowNode`](node::ShadowNode) (immutable per-revision snapshot with
//! optional layout and raw-text capabilities), and
//! [`AncestorPath`](node::AncestorPath).
//!
//! **[`revision`]**: [`Revision`](revision::Revision), one immutable snapshot
//! of a surface, plus copy-on-write construction of the next revision.
//!
//! **[`resolve`]**: mapping a node reference of unknown vintage to its current
//! instance, parent, or positioned ancestor.
//!
//! **[`layout`]**: composition of per-node frames across an ancestor chain.
//!
//! **[`dom`]**: the public query layer.
//!
//! **[`geometry`]** / **[`transform`]**: value types shared by all of the
//! above.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! query instrumentation, with a zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-lookup
//!   resolution events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod dom;
pub mod geometry;
pub mod layout;
pub mod node;
pub mod resolve;
pub mod revision;
pub mod trace;
pub mod transform;

#[cfg(test)]
mod testing;
