use std::borrow::Cow;
use std::collections::HashMap;

use crate::value::{Value, format_instant};

/// Key used when a bare primitive is turned into a record.
pub const VALUE_KEY: &str = "value";

/// Single-level mapping from column path to cell value, in insertion order.
///
/// Values borrow from the input where possible; instants are rendered to
/// their ISO-8601 text while flattening.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatRecord<'a> {
    entries: Vec<(String, Cow<'a, Value>)>,
    index: HashMap<String, usize>,
}

impl<'a> FlatRecord<'a> {
    /// Writing an existing key replaces its value and keeps its position.
    pub(crate) fn insert(&mut self, key: String, value: Cow<'a, Value>) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&pos| self.entries[pos].1.as_ref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(feature = "perf_smallvec")]
type Path<'a> = smallvec::SmallVec<[Cow<'a, str>; 8]>;
#[cfg(not(feature = "perf_smallvec"))]
type Path<'a> = Vec<Cow<'a, str>>;

struct Frame<'a> {
    /// Path length of the parent when this frame was pushed
    depth: usize,
    segment: Option<Cow<'a, str>>,
    value: &'a Value,
}

/// Deep-flattens one record candidate into dotted/indexed paths.
///
/// The walk is depth-first pre-order over an explicit stack, so arbitrarily
/// deep input cannot exhaust the call stack. Empty arrays and objects
/// contribute no keys.
pub fn flatten_record(record: &Value) -> FlatRecord<'_> {
    let mut out = FlatRecord::default();
    let mut path = Path::new();
    let mut stack = vec![Frame {
        depth: 0,
        segment: None,
        value: record,
    }];

    while let Some(frame) = stack.pop() {
        path.truncate(frame.depth);
        if let Some(segment) = frame.segment {
            path.push(segment);
        }
        let depth = path.len();
        match frame.value {
            Value::Array(items) => {
                // reversed so the first element is popped first
                for (i, item) in items.iter().enumerate().rev() {
                    stack.push(Frame {
                        depth,
                        segment: Some(Cow::Owned(i.to_string())),
                        value: item,
                    });
                }
            }
            Value::Object(entries) => {
                for (key, item) in entries.iter().rev() {
                    stack.push(Frame {
                        depth,
                        segment: Some(Cow::Borrowed(key.as_str())),
                        value: item,
                    });
                }
            }
            Value::Instant(at) => {
                out.insert(join_path(&path), Cow::Owned(Value::String(format_instant(at))));
            }
            leaf => out.insert(join_path(&path), Cow::Borrowed(leaf)),
        }
    }

    tracing::trace!(keys = out.len(), "flattened record");
    out
}

/// Record used when flattening is disabled: an object keeps its top-level
/// entries untouched, anything else is wrapped under [`VALUE_KEY`].
pub fn shallow_record(record: &Value) -> FlatRecord<'_> {
    let mut out = FlatRecord::default();
    match record {
        Value::Object(entries) => {
            for (key, item) in entries {
                out.insert(key.clone(), Cow::Borrowed(item));
            }
        }
        other => out.insert(VALUE_KEY.to_owned(), Cow::Borrowed(other)),
    }
    out
}

fn join_path(segments: &[Cow<'_, str>]) -> String {
    if segments.is_empty() {
        VALUE_KEY.to_owned()
    } else {
        segments.join(".")
    }
}
