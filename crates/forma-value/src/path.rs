use core::fmt::{self, Display};
use core::str::FromStr;

use thiserror::Error;
use thisisplural::Plural;

/// Address of one location in a nested value tree, e.g. `pets[0].name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Plural, Default)]
pub struct FieldPath(pub Vec<PathSegment>);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Named field access, like `name` in `pets[0].name`
    Field(String),
    /// List element access, like `[0]` in `pets[0].name`
    Index(usize),
}

impl FieldPath {
    /// The empty path addressing the tree root.
    pub fn root() -> Self {
        FieldPath(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(name: impl Into<String>) -> Self {
        FieldPath(vec![PathSegment::Field(name.into())])
    }

    /// A new path extending this one by a segment.
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        FieldPath(segments)
    }

    /// Parse a submission key, falling back to a single field segment when
    /// the key does not follow the path grammar. HTML forms may carry keys
    /// that were never meant as paths; those address a top-level field of
    /// that literal name.
    pub fn parse_lenient(key: &str) -> Self {
        key.parse().unwrap_or_else(|_| FieldPath::field(key))
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".{name}")?;
                    } else {
                        write!(f, "{name}")?;
                    }
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathParseError {
    #[error("path is empty")]
    Empty,
    #[error("unexpected character '{invalid_char}' at offset {at}")]
    UnexpectedChar { at: usize, invalid_char: char },
    #[error("unterminated index bracket at offset {at}")]
    UnterminatedIndex { at: usize },
    #[error("invalid list index at offset {at}")]
    InvalidIndex { at: usize },
    #[error("path ends with a trailing separator")]
    TrailingSeparator,
}

impl FromStr for FieldPath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathParseError::Empty);
        }

        let mut segments = Vec::new();
        let bytes = s.as_bytes();
        let mut pos = 0;
        // A field name is expected at the start and after every '.'.
        let mut expect_field = true;

        while pos < bytes.len() {
            match bytes[pos] {
                b'[' => {
                    if expect_field {
                        return Err(PathParseError::UnexpectedChar {
                            at: pos,
                            invalid_char: '[',
                        });
                    }
                    let close = s[pos..]
                        .find(']')
                        .map(|off| pos + off)
                        .ok_or(PathParseError::UnterminatedIndex { at: pos })?;
                    let index: usize = s[pos + 1..close]
                        .parse()
                        .map_err(|_| PathParseError::InvalidIndex { at: pos + 1 })?;
                    segments.push(PathSegment::Index(index));
                    pos = close + 1;
                }
                b'.' => {
                    if expect_field {
                        return Err(PathParseError::UnexpectedChar {
                            at: pos,
                            invalid_char: '.',
                        });
                    }
                    expect_field = true;
                    pos += 1;
                }
                _ => {
                    if !expect_field {
                        let invalid_char = s[pos..].chars().next().unwrap_or('?');
                        return Err(PathParseError::UnexpectedChar { at: pos, invalid_char });
                    }
                    let end = s[pos..]
                        .find(['.', '[', ']'])
                        .map(|off| pos + off)
                        .unwrap_or(bytes.len());
                    if end == pos {
                        let invalid_char = s[pos..].chars().next().unwrap_or('?');
                        return Err(PathParseError::UnexpectedChar { at: pos, invalid_char });
                    }
                    segments.push(PathSegment::Field(s[pos..end].to_string()));
                    expect_field = false;
                    pos = end;
                }
            }
        }

        if expect_field {
            return Err(PathParseError::TrailingSeparator);
        }
        Ok(FieldPath(segments))
    }
}
