use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use thisisplural::Plural;

use crate::path::{FieldPath, PathSegment};

/// Wire format for date fields (`<input type="date">`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Wire format for datetime fields (`<input type="datetime-local">`).
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
/// Wire format for time fields (`<input type="time">`).
pub const TIME_FORMAT: &str = "%H:%M";

/// A node in a nested value tree mirroring a form schema's shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit "nothing was submitted" marker. Distinct from an empty
    /// string: an empty text input submits `""`, an omitted checkbox
    /// submits nothing at all.
    Absent,
    Bool(bool),
    I64(i64),
    F64(f64),
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    /// Opaque reference to an uploaded file. Content handling is the
    /// caller's concern.
    File(FileRef),
    List(Items),
    Map(FieldMap),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Plural, Default)]
pub struct Items(pub Vec<Value>);

/// Ordered field-name to value mapping. Order is preserved so that encoded
/// output and rendered forms follow schema order deterministically.
#[derive(Debug, Clone, PartialEq, Plural, Default)]
pub struct FieldMap(pub IndexMap<String, Value>);

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&FieldMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Items> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a descendant node by path. Returns `None` when any segment
    /// does not resolve.
    pub fn at(&self, path: &FieldPath) -> Option<&Value> {
        let mut current = self;
        for segment in &path.0 {
            current = match (current, segment) {
                (Value::Map(FieldMap(map)), PathSegment::Field(name)) => map.get(name)?,
                (Value::List(Items(items)), PathSegment::Index(index)) => items.get(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// The string a form control would carry for this value, if it is a
    /// scalar. Containers and `Absent` have no single-control rendition.
    pub fn as_form_str(&self) -> Option<String> {
        match self {
            Value::Absent | Value::List(_) | Value::Map(_) => None,
            Value::Bool(b) => Some(b.to_string()),
            Value::I64(n) => Some(n.to_string()),
            Value::F64(n) => Some(n.to_string()),
            Value::Str(s) => Some(s.clone()),
            Value::Date(d) => Some(d.format(DATE_FORMAT).to_string()),
            Value::DateTime(dt) => Some(dt.format(DATETIME_FORMAT).to_string()),
            Value::Time(t) => Some(t.format(TIME_FORMAT).to_string()),
            Value::File(f) => Some(f.name.clone()),
        }
    }

    /// Type name used in mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Bool(_) => "boolean",
            Value::I64(_) => "integer",
            Value::F64(_) => "number",
            Value::Str(_) => "string",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Time(_) => "time",
            Value::File(_) => "file",
            Value::List(_) => "list",
            Value::Map(_) => "object",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::I64(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::F64(n)
    }
}
