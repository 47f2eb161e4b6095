//! Convenience re-exports for callers wiring forms into a web layer.

pub use crate::submit::{SubmissionResult, render_form, submit};
pub use forma_render::{AssetMode, RenderContext, Theme};
pub use forma_schema::{
    EnumOption, FieldKind, FieldSpecBuilder, FormSchema, NumberKind, Section, schema_description,
};
pub use forma_value::{ErrorMap, FieldPath, Value};
