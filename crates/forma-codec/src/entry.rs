use forma_value::FieldPath;

/// One decoded `(path, raw value)` pair from a flat submission.
///
/// Entries are produced fresh per submission and never mutated. Multiple
/// entries may share a path prefix (all the leaves of one list item) or a
/// full path (multi-valued controls submitting repeated keys).
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionEntry {
    pub path: FieldPath,
    pub value: String,
}

impl SubmissionEntry {
    /// Parse a wire key into a path entry. Keys that do not follow the
    /// path grammar address a top-level field of that literal name.
    pub fn parse(key: &str, value: impl Into<String>) -> Self {
        Self {
            path: FieldPath::parse_lenient(key),
            value: value.into(),
        }
    }
}
