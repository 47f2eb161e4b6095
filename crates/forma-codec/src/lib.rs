//! Bidirectional mapping between flat form submissions and nested value
//! trees.
//!
//! HTML forms post flat `(key, value)` pairs whose keys follow the
//! `pets[0].name` path grammar. [`decode`] rebuilds the nested raw tree
//! those keys describe; [`encode`] flattens a tree back into wire pairs
//! for round-trip tests and form pre-population.

mod decode;
mod encode;
mod entry;
mod error;

pub use decode::decode;
pub use encode::encode;
pub use entry::SubmissionEntry;
pub use error::DecodeError;
