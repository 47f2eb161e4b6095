use thiserror::Error;

/// Structural decode failure. The only way a submission fails to decode is
/// a path used in two incompatible roles; missing fields are a validation
/// concern and never fail here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("path '{path}' is used both as {existing} and as {requested}")]
    PathConflict {
        path: String,
        existing: &'static str,
        requested: &'static str,
    },
}
