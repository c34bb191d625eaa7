// src/pipeline.rs
// =============================================================================
// Dispatcher and pipeline runner.
//
// For each raw record, in the order the API returned them:
//   1. read the kind tag; unknown kinds are skipped silently
//   2. decode into an EventRecord (schema chosen by kind)
//   3. format into display lines and write them out
//
// A record that fails to decode is reported as a warning line and the run
// moves on to the next record. Only a failing writer stops the loop.
// =============================================================================

use std::io::{self, Write};

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::event::{format_event, EventKind, EventRecord, Line, MalformedEvent};
use crate::style::Painter;

/// What happened to the records of one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records that produced output
    pub printed: usize,
    /// Records of a kind we don't format
    pub unknown: usize,
    /// Records that failed to decode
    pub malformed: usize,
}

/// Routes one raw record to its formatter
///
/// Unknown kinds produce no lines and no error.
pub fn dispatch(raw: &Value) -> Result<Vec<Line>, MalformedEvent> {
    let kind = EventKind::of(raw);
    if !kind.is_known() {
        debug!(kind = %kind, "skipping unsupported event kind");
        return Ok(Vec::new());
    }

    let record = EventRecord::decode(kind, raw)?;
    let lines = format_event(&record);
    debug!(kind = %record.kind, lines = lines.len(), "formatted event");
    Ok(lines)
}

/// Runs every record through the pipeline, writing rendered lines to `out`
pub fn run<W: Write>(records: &[Value], painter: Painter, out: &mut W) -> io::Result<RunSummary> {
    let mut summary = RunSummary::default();

    for (index, raw) in records.iter().enumerate() {
        match dispatch(raw) {
            Ok(lines) if lines.is_empty() => summary.unknown += 1,
            Ok(lines) => {
                for line in &lines {
                    trace!(index, line = %line.text());
                    writeln!(out, "{}", line.render(painter))?;
                }
                summary.printed += 1;
            }
            Err(error) => {
                warn!(
                    index,
                    kind = %error.kind,
                    field = %error.field,
                    "skipping malformed event"
                );
                writeln!(out, "{}", painter.error_line(&format!("Skipped {}", error)))?;
                summary.malformed += 1;
            }
        }
    }

    debug!(
        printed = summary.printed,
        unknown = summary.unknown,
        malformed = summary.malformed,
        "page processed"
    );
    Ok(summary)
}
