//! Type coercion and constraint validation.
//!
//! Both walks share one discipline: field-level problems never abort the
//! walk. Every leaf is visited so a single submission surfaces all of its
//! problems at once; messages accumulate in an [`forma_value::ErrorMap`]
//! keyed by field path.

pub mod coerce;
pub mod validate;
pub mod violation;

pub use coerce::coerce;
pub use validate::{ValidationOutcome, validate};
pub use violation::Violation;
