// Copyright 2026 the Umbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON query report.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes a JSON object with three members:
//!
//! - `queries`: every recorded query, in order.
//! - `lookups`: every recorded node lookup, in order.
//! - `totals`: per query kind, the hit count, the miss count, and the misses
//!   broken down by reason. Kinds that never ran are omitted.

use std::io::{self, Write};

use serde_json::{Map, Value, json};

use umbra_core::trace::{Miss, QueryKind, QueryOutcome};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a JSON report.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut queries: Vec<Value> = Vec::new();
    let mut lookups: Vec<Value> = Vec::new();
    let mut totals = [Tally::default(); QueryKind::ALL.len()];

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Query(e) => {
                let outcome = match e.outcome {
                    QueryOutcome::Hit => Value::from("hit"),
                    QueryOutcome::Miss(miss) => Value::from(miss.name()),
                };
                queries.push(json!({
                    "revision": e.revision.0,
                    "surface": e.surface.0,
                    "tag": e.tag.0,
                    "query": e.kind.name(),
                    "outcome": outcome,
                }));
                if let Some(index) = QueryKind::ALL.iter().position(|&k| k == e.kind) {
                    totals[index].add(e.outcome);
                }
            }
            RecordedEvent::Resolve(e) => {
                lookups.push(json!({
                    "revision": e.revision.0,
                    "tag": e.tag.0,
                    "lookup": e.lookup.name(),
                    "found": e.found,
                }));
            }
        }
    }

    let mut by_kind = Map::new();
    for (kind, tally) in QueryKind::ALL.iter().zip(&totals) {
        if tally.hits + tally.misses() == 0 {
            continue;
        }
        by_kind.insert(kind.name().into(), tally.to_json());
    }

    let report = json!({
        "queries": queries,
        "lookups": lookups,
        "totals": by_kind,
    });
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}

#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    hits: u64,
    reasons: [u64; Miss::ALL.len()],
}

impl Tally {
    fn add(&mut self, outcome: QueryOutcome) {
        match outcome {
            QueryOutcome::Hit => self.hits += 1,
            QueryOutcome::Miss(miss) => {
                if let Some(index) = Miss::ALL.iter().position(|&m| m == miss) {
                    self.reasons[index] += 1;
                }
            }
        }
    }

    fn misses(&self) -> u64 {
        self.reasons.iter().sum()
    }

    fn to_json(self) -> Value {
        let reasons: Map<String, Value> = Miss::ALL
            .iter()
            .zip(self.reasons)
            .filter(|&(_, count)| count > 0)
            .map(|(miss, count)| (miss.name().into(), count.into()))
            .collect();
        json!({
            "hits": self.hits,
            "misses": self.misses(),
            "reasons": reasons,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use umbra_core::node::{SurfaceId, Tag};
    use umbra_core::revision::RevisionNumber;
    use umbra_core::trace::{LookupKind, QueryEvent, ResolveEvent, TraceSink};

    fn query(kind: QueryKind, outcome: QueryOutcome) -> QueryEvent {
        QueryEvent {
            revision: RevisionNumber(4),
            surface: SurfaceId(1),
            tag: Tag(12),
            kind,
            outcome,
        }
    }

    #[test]
    fn export_counts_hits_and_miss_reasons() {
        let mut rec = RecorderSink::new();
        rec.on_resolve(&ResolveEvent {
            revision: RevisionNumber(4),
            tag: Tag(12),
            lookup: LookupKind::Instance,
            found: true,
        });
        rec.on_query(&query(QueryKind::Measure, QueryOutcome::Hit));
        rec.on_query(&query(QueryKind::Measure, QueryOutcome::Miss(Miss::NotDisplayed)));
        rec.on_query(&query(QueryKind::Measure, QueryOutcome::Miss(Miss::NotDisplayed)));
        rec.on_query(&query(QueryKind::Offset, QueryOutcome::Miss(Miss::NoPositionedAncestor)));

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(parsed["queries"].as_array().unwrap().len(), 4);
        assert_eq!(parsed["queries"][1]["query"], "measure");
        assert_eq!(parsed["queries"][1]["outcome"], "hit");
        assert_eq!(parsed["queries"][2]["outcome"], "NotDisplayed");

        assert_eq!(parsed["lookups"][0]["lookup"], "instance");
        assert_eq!(parsed["lookups"][0]["found"], true);

        let measure = &parsed["totals"]["measure"];
        assert_eq!(measure["hits"], 1);
        assert_eq!(measure["misses"], 2);
        assert_eq!(measure["reasons"]["NotDisplayed"], 2);
        assert_eq!(parsed["totals"]["offset"]["reasons"]["NoPositionedAncestor"], 1);
        assert!(parsed["totals"].get("is_connected").is_none());
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert!(parsed["queries"].as_array().unwrap().is_empty());
        assert!(parsed["lookups"].as_array().unwrap().is_empty());
        assert!(parsed["totals"].as_object().unwrap().is_empty());
    }
}
