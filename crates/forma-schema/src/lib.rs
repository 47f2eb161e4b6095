//! Form schema model: field kinds, constraints, sections and builders.
//!
//! A [`FormSchema`] is declared once, checked for structural invariants at
//! construction, and then treated as an immutable value shared by every
//! render and submission call.

pub mod builder;
pub mod describe;
pub mod form;
pub mod schema;

pub use builder::FieldSpecBuilder;
pub use describe::schema_description;
pub use form::{FormSchema, SchemaError, Section};
pub use schema::{Constraints, EnumOption, FieldKind, FieldSpec, ListSpec, ListUi, NumberKind};
