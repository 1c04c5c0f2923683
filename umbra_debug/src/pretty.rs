// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use umbra_core::trace::{QueryEvent, QueryOutcome, ResolveEvent, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_query(&mut self, e: &QueryEvent) {
        let _ = match e.outcome {
            QueryOutcome::Hit => writeln!(
                self.writer,
                "[query] rev={} surface={} tag={} {} -> hit",
                e.revision.0,
                e.surface.0,
                e.tag.0,
                e.kind.name(),
            ),
            QueryOutcome::Miss(miss) => writeln!(
                self.writer,
                "[query] rev={} surface={} tag={} {} -> miss ({miss:?})",
                e.revision.0,
                e.surface.0,
                e.tag.0,
                e.kind.name(),
            ),
        };
    }

    fn on_resolve(&mut self, e: &ResolveEvent) {
        let found = if e.found { "found" } else { "missing" };
        let _ = writeln!(
            self.writer,
            "[resolve] rev={} tag={} {} {found}",
            e.revision.0,
            e.tag.0,
            e.lookup.name(),
        );
    }
}
