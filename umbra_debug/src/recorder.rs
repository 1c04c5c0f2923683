// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Record layouts, after a one-byte tag:
//!
//! - query: revision `u64`, surface `u32`, tag `u32`, kind `u8`, outcome `u8`
//!   (`0` for a hit, otherwise the miss reason).
//! - resolve: revision `u64`, tag `u32`, lookup `u8`, found `u8`.

use umbra_core::node::{SurfaceId, Tag};
use umbra_core::revision::RevisionNumber;
use umbra_core::trace::{
    LookupKind, Miss, QueryEvent, QueryKind, QueryOutcome, ResolveEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_QUERY: u8 = 1;
const TAG_RESOLVE: u8 = 2;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_kind(&mut self, kind: QueryKind) {
        self.write_u8(index_of(&QueryKind::ALL, kind));
    }

    fn write_outcome(&mut self, outcome: QueryOutcome) {
        let code = match outcome {
            QueryOutcome::Hit => 0,
            QueryOutcome::Miss(miss) => 1 + index_of(&Miss::ALL, miss),
        };
        self.write_u8(code);
    }

    fn write_lookup(&mut self, lookup: LookupKind) {
        self.write_u8(match lookup {
            LookupKind::Instance => 0,
            LookupKind::Parent => 1,
            LookupKind::PositionedAncestor => 2,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_query(&mut self, e: &QueryEvent) {
        self.write_u8(TAG_QUERY);
        self.write_u64(e.revision.0);
        self.write_u32(e.surface.0);
        self.write_u32(e.tag.0);
        self.write_kind(e.kind);
        self.write_outcome(e.outcome);
    }

    fn on_resolve(&mut self, e: &ResolveEvent) {
        self.write_u8(TAG_RESOLVE);
        self.write_u64(e.revision.0);
        self.write_u32(e.tag.0);
        self.write_lookup(e.lookup);
        self.write_u8(u8::from(e.found));
    }
}

/// Position of `item` in a short variant table.
#[expect(
    clippy::cast_possible_truncation,
    reason = "variant tables have fewer than 256 entries"
)]
fn index_of<T: PartialEq>(table: &[T], item: T) -> u8 {
    table.iter().position(|t| *t == item).unwrap_or_default() as u8
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`QueryEvent`].
    Query(QueryEvent),
    /// A [`ResolveEvent`].
    Resolve(ResolveEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first truncated or unrecognized record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_kind(&mut self) -> Option<QueryKind> {
        QueryKind::ALL.get(usize::from(self.read_u8()?)).copied()
    }

    fn read_outcome(&mut self) -> Option<QueryOutcome> {
        match self.read_u8()? {
            0 => Some(QueryOutcome::Hit),
            code => Miss::ALL
                .get(usize::from(code) - 1)
                .map(|&miss| QueryOutcome::Miss(miss)),
        }
    }

    fn read_lookup(&mut self) -> Option<LookupKind> {
        Some(match self.read_u8()? {
            0 => LookupKind::Instance,
            1 => LookupKind::Parent,
            2 => LookupKind::PositionedAncestor,
            _ => return None,
        })
    }

    fn decode_query(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Query(QueryEvent {
            revision: RevisionNumber(self.read_u64()?),
            surface: SurfaceId(self.read_u32()?),
            tag: Tag(self.read_u32()?),
            kind: self.read_kind()?,
            outcome: self.read_outcome()?,
        }))
    }

    fn decode_resolve(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Resolve(ResolveEvent {
            revision: RevisionNumber(self.read_u64()?),
            tag: Tag(self.read_u32()?),
            lookup: self.read_lookup()?,
            found: self.read_u8()? != 0,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_QUERY => self.decode_query(),
            TAG_RESOLVE => self.decode_resolve(),
            _ => None, // unknown tag → stop iteration
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
            revision: RevisionNumber(u64::MAX - 1),
            surface: SurfaceId(7),
            tag: Tag(42),
            kind: QueryKind::CompareDocumentPosition,
            outcome: QueryOutcome::Miss(Miss::RelativeNodeDisconnected),
        }
    }

    fn sample_resolve() -> ResolveEvent {
        ResolveEvent {
            revision: RevisionNumber(5),
            tag: Tag(9),
            lookup: LookupKind::Parent,
            found: true,
        }
    }

    #[test]
    fn records_have_fixed_sizes() {
        let mut rec = RecorderSink::new();
        rec.on_query(&sample_query());
        assert_eq!(rec.as_bytes().len(), 1 + 8 + 4 + 4 + 1 + 1);
        rec.on_resolve(&sample_resolve());
        assert_eq!(rec.as_bytes().len(), 19 + 1 + 8 + 4 + 1 + 1);
        assert_eq!(rec.as_bytes()[0], TAG_QUERY);
        assert_eq!(rec.as_bytes()[19], TAG_RESOLVE);
    }

    #[test]
    fn mixed_events_decode_in_order() {
        let mut rec = RecorderSink::new();
        rec.on_resolve(&sample_resolve());
        rec.on_query(&sample_query());
        let hit = QueryEvent {
            outcome: QueryOutcome::Hit,
            kind: QueryKind::IsConnected,
            ..sample_query()
        };
        rec.on_query(&hit);

        let events: Vec<_> = decode(&rec.into_bytes()).collect();
        assert_eq!(
            events,
            [
                RecordedEvent::Resolve(sample_resolve()),
                RecordedEvent::Query(sample_query()),
                RecordedEvent::Query(hit),
            ]
        );
    }

    #[test]
    fn every_kind_survives_recording() {
        let mut rec = RecorderSink::new();
        for kind in QueryKind::ALL {
            rec.on_query(&QueryEvent {
                kind,
                ..sample_query()
            });
        }
        let kinds: Vec<_> = decode(rec.as_bytes())
            .map(|e| match e {
                RecordedEvent::Query(q) => q.kind,
                other => panic!("expected Query, got {other:?}"),
            })
            .collect();
        assert_eq!(kinds, QueryKind::ALL);
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_query(&sample_query());
        rec.on_query(&sample_query());
        let bytes = rec.into_bytes();
        let cut = &bytes[..bytes.len() - 1];
        assert_eq!(decode(cut).count(), 1);
    }

    #[test]
    fn unknown_tag_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_resolve(&sample_resolve());
        let mut bytes = rec.into_bytes();
        bytes.push(0xff);
        bytes.extend_from_slice(&[0; 16]);
        assert_eq!(decode(&bytes).count(), 1);
        assert_eq!(decode(&[]).count(), 0);
    }
}
