use std::fmt;

/// One field-level problem found during coercion or validation.
///
/// `Display` produces the user-facing message stored in the error map.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    TypeMismatch {
        expected: &'static str,
        actual: String,
    },
    InvalidChoice {
        value: String,
    },
    RequiredMissing,
    LengthViolation {
        min: Option<usize>,
        max: Option<usize>,
        actual: usize,
    },
    RangeViolation {
        min: Option<f64>,
        max: Option<f64>,
        actual: f64,
    },
    PatternViolation {
        pattern: String,
    },
    InvalidPattern {
        pattern: String,
    },
    CardinalityViolation {
        min: Option<usize>,
        max: Option<usize>,
        actual: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::TypeMismatch { expected, actual } => {
                write!(f, "expected {expected}, got '{actual}'")
            }
            Violation::InvalidChoice { value } => {
                write!(f, "'{value}' is not a valid choice")
            }
            Violation::RequiredMissing => write!(f, "required"),
            Violation::LengthViolation { min, max, actual } => match (min, max) {
                (Some(min), Some(max)) => write!(
                    f,
                    "must be between {min} and {max} characters, but got {actual}"
                ),
                (Some(min), None) => {
                    write!(f, "must be at least {min} characters, but got {actual}")
                }
                (None, Some(max)) => {
                    write!(f, "must be at most {max} characters, but got {actual}")
                }
                (None, None) => write!(f, "length violation"),
            },
            Violation::RangeViolation { min, max, actual } => match (min, max) {
                (Some(min), Some(max)) => {
                    write!(f, "must be between {min} and {max}, but got {actual}")
                }
                (Some(min), None) => write!(f, "must be at least {min}, but got {actual}"),
                (None, Some(max)) => write!(f, "must be at most {max}, but got {actual}"),
                (None, None) => write!(f, "range violation"),
            },
            Violation::PatternViolation { pattern } => {
                write!(f, "does not match pattern /{pattern}/")
            }
            Violation::InvalidPattern { pattern } => {
                write!(f, "schema pattern /{pattern}/ is not a valid regex")
            }
            Violation::CardinalityViolation { min, max, actual } => match (min, max) {
                (Some(min), Some(max)) => {
                    write!(f, "must have between {min} and {max} items, but has {actual}")
                }
                (Some(min), None) => write!(f, "must have at least {min} items, but has {actual}"),
                (None, Some(max)) => write!(f, "must have at most {max} items, but has {actual}"),
                (None, None) => write!(f, "item count violation"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_violated_bound() {
        let v = Violation::LengthViolation {
            min: Some(3),
            max: None,
            actual: 1,
        };
        assert_eq!(v.to_string(), "must be at least 3 characters, but got 1");

        let v = Violation::RangeViolation {
            min: Some(13.0),
            max: Some(120.0),
            actual: 7.0,
        };
        assert_eq!(v.to_string(), "must be between 13 and 120, but got 7");
    }

    #[test]
    fn required_message_is_terse() {
        assert_eq!(Violation::RequiredMissing.to_string(), "required");
    }
}
