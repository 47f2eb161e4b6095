use indexmap::IndexMap;

use crate::path::FieldPath;

/// Violation messages keyed by field path, in insertion order.
///
/// A path either has no entry or carries *all* of its violations in
/// constraint-check order; the map is never partially filled for a path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorMap(pub IndexMap<FieldPath, Vec<String>>);

impl ErrorMap {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a message to a path, creating the entry if needed.
    pub fn push(&mut self, path: FieldPath, message: impl Into<String>) {
        self.0.entry(path).or_default().push(message.into());
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.0.contains_key(path)
    }

    pub fn messages(&self, path: &FieldPath) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    /// The first message recorded for a path, used for inline display.
    pub fn first_message(&self, path: &FieldPath) -> Option<&str> {
        self.0.get(path).and_then(|msgs| msgs.first()).map(String::as_str)
    }

    /// Merge another map into this one, extending per-path message lists.
    pub fn merge(&mut self, other: ErrorMap) {
        for (path, messages) in other.0 {
            self.0.entry(path).or_default().extend(messages);
        }
    }
}
