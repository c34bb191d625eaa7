// src/event/field.rs
// =============================================================================
// Safe accessors for reading nested, possibly-absent fields out of a raw
// event record.
//
// Every raw record is a serde_json::Value. Rather than indexing into it and
// hoping for the best, each read goes through `Fields`, which remembers the
// dotted path it was reached by. A missing or mistyped field turns into a
// `MalformedEvent` naming that path and the event kind, e.g.
//
//   malformed PushEvent: field `payload.commits[2].sha` is missing
//
// Required reads never substitute a default. Optional reads (`opt_*`) treat
// an absent key and an explicit JSON `null` the same way, but still reject a
// value of the wrong type.
// =============================================================================

use serde_json::{Map, Value};
use thiserror::Error;

use super::kind::EventKind;

/// A record whose shape doesn't match what its kind promises
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed {kind}: field `{field}` {problem}")]
pub struct MalformedEvent {
    pub kind: EventKind,
    /// Dotted path from the record root, e.g. "payload.comment.body"
    pub field: String,
    pub problem: Problem,
}

/// What exactly was wrong with the field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Problem {
    #[error("is missing")]
    Missing,
    #[error("should be {expected}")]
    WrongType { expected: &'static str },
    #[error("is empty")]
    Empty,
}

/// A view over one JSON object inside a record
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    kind: &'a EventKind,
    path: String,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// Wraps the root of a record; the root itself must be an object
    pub fn root(kind: &'a EventKind, value: &'a Value) -> Result<Self, MalformedEvent> {
        match value.as_object() {
            Some(map) => Ok(Fields {
                kind,
                path: String::new(),
                map,
            }),
            None => Err(MalformedEvent {
                kind: kind.clone(),
                field: "<record>".to_string(),
                problem: Problem::WrongType { expected: "an object" },
            }),
        }
    }

    pub fn kind(&self) -> &'a EventKind {
        self.kind
    }

    /// Required nested object
    pub fn obj(&self, name: &str) -> Result<Fields<'a>, MalformedEvent> {
        self.opt_obj(name)?
            .ok_or_else(|| self.malformed(name, Problem::Missing))
    }

    /// Nested object that may be absent or null
    pub fn opt_obj(&self, name: &str) -> Result<Option<Fields<'a>>, MalformedEvent> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(Fields {
                kind: self.kind,
                path: self.join(name),
                map,
            })),
            Some(_) => Err(self.wrong_type(name, "an object")),
        }
    }

    /// Required string field
    pub fn str(&self, name: &str) -> Result<&'a str, MalformedEvent> {
        self.opt_str(name)?
            .ok_or_else(|| self.malformed(name, Problem::Missing))
    }

    /// Required string field that must also have some content
    pub fn non_empty_str(&self, name: &str) -> Result<&'a str, MalformedEvent> {
        let value = self.str(name)?;
        if value.is_empty() {
            return Err(self.malformed(name, Problem::Empty));
        }
        Ok(value)
    }

    /// String field that may be absent or null
    pub fn opt_str(&self, name: &str) -> Result<Option<&'a str>, MalformedEvent> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(self.wrong_type(name, "a string")),
        }
    }

    /// Required array whose elements are all objects
    pub fn objects(&self, name: &str) -> Result<Vec<Fields<'a>>, MalformedEvent> {
        let items = match self.get(name) {
            None => return Err(self.malformed(name, Problem::Missing)),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(self.wrong_type(name, "an array")),
        };

        let base = self.join(name);
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let path = format!("{}[{}]", base, i);
                match item.as_object() {
                    Some(map) => Ok(Fields {
                        kind: self.kind,
                        path,
                        map,
                    }),
                    None => Err(MalformedEvent {
                        kind: self.kind.clone(),
                        field: path,
                        problem: Problem::WrongType { expected: "an object" },
                    }),
                }
            })
            .collect()
    }

    /// Required string at a dotted path, e.g. `"comment.body"`
    pub fn str_at(&self, path: &str) -> Result<&'a str, MalformedEvent> {
        let (parents, leaf) = split_path(path);
        let mut current = self.clone();
        for parent in parents {
            current = current.obj(parent)?;
        }
        current.str(leaf)
    }

    /// Optional string at a dotted path; any absent step yields `None`
    ///
    /// Used for the `changes.*.from` diffs, which only exist on some actions.
    pub fn opt_str_at(&self, path: &str) -> Result<Option<&'a str>, MalformedEvent> {
        let (parents, leaf) = split_path(path);
        let mut current = self.clone();
        for parent in parents {
            current = match current.opt_obj(parent)? {
                Some(next) => next,
                None => return Ok(None),
            };
        }
        current.opt_str(leaf)
    }

    // JSON null is treated the same as a missing key
    fn get(&self, name: &str) -> Option<&'a Value> {
        self.map.get(name).filter(|v| !v.is_null())
    }

    fn join(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.path, name)
        }
    }

    fn malformed(&self, name: &str, problem: Problem) -> MalformedEvent {
        MalformedEvent {
            kind: self.kind.clone(),
            field: self.join(name),
            problem,
        }
    }

    fn wrong_type(&self, name: &str, expected: &'static str) -> MalformedEvent {
        self.malformed(name, Problem::WrongType { expected })
    }
}

fn split_path(path: &str) -> (Vec<&str>, &str) {
    let mut segments: Vec<&str> = path.split('.').collect();
    // split always yields at least one segment
    let leaf = segments.pop().unwrap_or(path);
    (segments, leaf)
}
