// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON reports for umbra query diagnostics.
//!
//! This crate provides [`TraceSink`](umbra_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`report::export`]: writes a JSON report with per-query hit and miss
//!   totals from recorded bytes.

pub mod pretty;
pub mod recorder;
pub mod report;
