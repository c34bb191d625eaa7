// src/event/mod.rs
// =============================================================================
// Everything about a single activity event.
//
// Submodules:
// - kind: the event type tag ("PushEvent", ...) as an enum
// - field: safe accessors over the raw JSON, producing MalformedEvent
// - record: the decoded, typed EventRecord
// - format: one formatter per kind, producing display lines
// =============================================================================

mod field;
mod format;
mod kind;
mod record;

pub use field::MalformedEvent;
pub use format::{format_event, Line};
pub use kind::EventKind;
pub use record::EventRecord;
