//! Value tree, field paths and error map shared by the forma pipeline.
//!
//! A submission exists at two stages: a *raw* tree (every leaf still a
//! string, straight from the wire) and a *typed* tree (leaves coerced to
//! their schema-native types). Both stages use the same [`Value`] type;
//! raw trees simply never contain the typed leaf variants.

pub mod error_map;
pub mod json;
pub mod path;
pub mod value;

pub use error_map::ErrorMap;
pub use json::to_json;
pub use path::{FieldPath, PathParseError, PathSegment};
pub use value::{FieldMap, FileRef, Items, Value};
