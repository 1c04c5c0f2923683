// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for DOM queries.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! query layer calls as it answers queries. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates [`ResolveEvent`] plus the
//!   corresponding `TraceSink` method.

use crate::node::{SurfaceId, Tag};
use crate::revision::RevisionNumber;

pub use crate::resolve::Miss;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which query produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// `is_connected`.
    IsConnected,
    /// `parent_node`.
    ParentNode,
    /// `child_nodes`.
    ChildNodes,
    /// `text_content`.
    TextContent,
    /// `bounding_client_rect` and `bounding_client_rect_with`.
    BoundingClientRect,
    /// `offset`.
    Offset,
    /// `scroll_position`.
    ScrollPosition,
    /// `scroll_size`.
    ScrollSize,
    /// `inner_size`.
    InnerSize,
    /// `border_size`.
    BorderSize,
    /// `measure`.
    Measure,
    /// `measure_in_window`.
    MeasureInWindow,
    /// `measure_layout`.
    MeasureLayout,
    /// `compare_document_position`.
    CompareDocumentPosition,
}

impl QueryKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::IsConnected,
        Self::ParentNode,
        Self::ChildNodes,
        Self::TextContent,
        Self::BoundingClientRect,
        Self::Offset,
        Self::ScrollPosition,
        Self::ScrollSize,
        Self::InnerSize,
        Self::BorderSize,
        Self::Measure,
        Self::MeasureInWindow,
        Self::MeasureLayout,
        Self::CompareDocumentPosition,
    ];

    /// The query's method name on [`Dom`](crate::dom::Dom).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::IsConnected => "is_connected",
            Self::ParentNode => "parent_node",
            Self::ChildNodes => "child_nodes",
            Self::TextContent => "text_content",
            Self::BoundingClientRect => "bounding_client_rect",
            Self::Offset => "offset",
            Self::ScrollPosition => "scroll_position",
            Self::ScrollSize => "scroll_size",
            Self::InnerSize => "inner_size",
            Self::BorderSize => "border_size",
            Self::Measure => "measure",
            Self::MeasureInWindow => "measure_in_window",
            Self::MeasureLayout => "measure_layout",
            Self::CompareDocumentPosition => "compare_document_position",
        }
    }
}

/// How a query ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryOutcome {
    /// The query produced a result.
    Hit,
    /// The query produced no result.
    Miss(Miss),
}

impl QueryOutcome {
    /// Whether the query produced a result.
    #[inline]
    #[must_use]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

impl<T> From<&Result<T, Miss>> for QueryOutcome {
    fn from(result: &Result<T, Miss>) -> Self {
        match result {
            Ok(_) => Self::Hit,
            Err(miss) => Self::Miss(*miss),
        }
    }
}

/// Which resolution a [`ResolveEvent`] reports.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LookupKind {
    /// Current instance of the node.
    Instance,
    /// Current instance of the node's parent.
    Parent,
    /// Current instance of the node's positioned ancestor.
    PositionedAncestor,
}

#[cfg(feature = "trace-rich")]
impl LookupKind {
    /// Short lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Instance => "instance",
            Self::Parent => "parent",
            Self::PositionedAncestor => "positioned_ancestor",
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once for every query that resolves a node against a revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryEvent {
    /// Revision the query ran against.
    pub revision: RevisionNumber,
    /// Surface of that revision.
    pub surface: SurfaceId,
    /// Tag of the queried node.
    pub tag: Tag,
    /// Which query.
    pub kind: QueryKind,
    /// Result or reason for no result.
    pub outcome: QueryOutcome,
}

/// Emitted for every node lookup a query performs.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolveEvent {
    /// Revision the lookup ran against.
    pub revision: RevisionNumber,
    /// Tag of the node being looked up.
    pub tag: Tag,
    /// Which lookup.
    pub lookup: LookupKind,
    /// Whether the lookup found an instance.
    pub found: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the query layer.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a query finishes.
    fn on_query(&mut self, e: &QueryEvent) {
        _ = e;
    }

    /// Called for each node lookup (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_resolve(&mut self, e: &ResolveEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`QueryEvent`].
    #[inline]
    pub fn query(&mut self, e: &QueryEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_query(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ResolveEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn resolve(&mut self, e: &ResolveEvent) {
        if let Some(s) = &mut self.sink {
            s.on_resolve(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_query() -> QueryEvent {
        QueryEvent {
            revision: RevisionNumber(3),
            surface: SurfaceId(1),
            tag: Tag(42),
            kind: QueryKind::Measure,
            outcome: QueryOutcome::Miss(Miss::NotDisplayed),
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_query(&sample_query());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.query(&sample_query());
    }

    #[test]
    fn outcome_from_result() {
        let hit: Result<u8, Miss> = Ok(1);
        let miss: Result<u8, Miss> = Err(Miss::InlineDisplay);
        assert!(QueryOutcome::from(&hit).is_hit());
        assert_eq!(
            QueryOutcome::from(&miss),
            QueryOutcome::Miss(Miss::InlineDisplay)
        );
    }

    #[test]
    fn kind_names_are_distinct() {
        for (i, a) in QueryKind::ALL.iter().enumerate() {
            for b in &QueryKind::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn miss_names_match_debug() {
        for miss in Miss::ALL {
            assert_eq!(alloc::format!("{miss:?}"), miss.name());
        }
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            tags: Vec<Tag>,
        }
        impl TraceSink for RecordingSink {
            fn on_query(&mut self, e: &QueryEvent) {
                self.tags.push(e.tag);
            }
        }

        let mut sink = RecordingSink { tags: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.query(&sample_query());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.tags, &[Tag(42)]);
    }
}
