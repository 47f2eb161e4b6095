//! Schema-driven form engine.
//!
//! A [`FormSchema`] declared once drives the whole lifecycle of a form:
//! [`render_form`] produces themed HTML for it, and [`submit`] turns a
//! flat HTML submission back into a validated, typed value tree, or into
//! a field-path-addressed error map the renderer redisplays inline.
//!
//! ```
//! use forma::prelude::*;
//!
//! let schema = FormSchema::new(
//!     "login",
//!     vec![
//!         FieldSpecBuilder::new("username", FieldKind::Text).required().build(),
//!         FieldSpecBuilder::new("password", FieldKind::Password).required().build(),
//!     ],
//! )
//! .unwrap();
//!
//! let entries = vec![
//!     ("username".to_string(), "alex".to_string()),
//!     ("password".to_string(), "secret".to_string()),
//! ];
//! let result = submit(&schema, &entries);
//! assert!(result.is_success());
//! ```
//!
//! Every call is a pure function of its inputs; schemas are immutable and
//! freely shared across threads.

pub mod prelude;
mod submit;

pub use submit::{SubmissionResult, render_form, submit};

pub use forma_codec::{DecodeError, SubmissionEntry, decode, encode};
pub use forma_render::{AssetMode, RenderContext, Theme, escape_html, render};
pub use forma_schema::{
    Constraints, EnumOption, FieldKind, FieldSpec, FieldSpecBuilder, FormSchema, ListSpec, ListUi,
    NumberKind, SchemaError, Section, schema_description,
};
pub use forma_validate::{ValidationOutcome, Violation, coerce, validate};
pub use forma_value::{
    ErrorMap, FieldMap, FieldPath, FileRef, Items, PathParseError, PathSegment, Value, to_json,
};
