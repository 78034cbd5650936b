//! Validation failures.
//!
//! Every validator reports failure through [`ValidationError`], which pairs an
//! [`ErrorKind`] with the [`Path`] from the validated root to the offending
//! value. Combinators prepend their own segment (object key or sequence index)
//! while a failure propagates outwards, so the path of a deeply nested failure
//! reads root-first.
//!
//! # Example
//!
//! ```rust
//! use shape_rs::{array, number, ErrorKind, Validator};
//! use serde_json::json;
//!
//! let err = array(number()).validate(&json!([1, "2"])).unwrap_err();
//! assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
//! assert_eq!(err.path.to_string(), "/1");
//! ```

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::kind::Kind;

/// Longest rendering of an offending value kept in messages.
const PREVIEW_LIMIT: usize = 48;

/// One step from a parent value into a child value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object member.
    Key(String),
    /// Sequence position.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // JSON pointer escaping: `~` -> `~0`, `/` -> `~1`
            Self::Key(key) => write!(f, "{}", key.replace('~', "~0").replace('/', "~1")),
            Self::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Location of a failure, root first.
///
/// Renders as a JSON pointer (`/items/0/name`); the root is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Whether this path points at the validated root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments from the root down.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    fn prepend(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }

    /// `" at <pointer>"`, or nothing for the root.
    fn location(&self) -> String {
        if self.is_root() {
            String::new()
        } else {
            format!(" at {}", self)
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

/// What went wrong, independent of where.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "code", content = "detail", rename_all = "snake_case")]
pub enum ErrorKind {
    /// The value's JSON type differs from the expected kind.
    #[error("expected {expected}, received {}", preview(.received))]
    TypeMismatch { expected: Kind, received: Value },

    /// The value differs from the declared literal.
    #[error("expected literal {}, received {}", preview(.expected), preview(.received))]
    LiteralMismatch { expected: Value, received: Value },

    /// A required object member is absent.
    #[error("missing required key `{0}`")]
    MissingKey(String),

    /// An object member has no counterpart in the schema.
    #[error("unknown key `{0}`")]
    UnknownKey(String),

    /// A tuple received the wrong number of elements.
    #[error("expected a tuple of {expected} elements, received {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// An array or tuple received something other than a sequence.
    #[error("expected a sequence, received {}", preview(.received))]
    NotASequence { received: Value },

    /// No union member accepted the value. `failures` holds one entry per
    /// member, in declaration order.
    #[error("{} matched none of [{}]", preview(.received), join_kinds(.attempted))]
    NoMatch {
        attempted: Vec<Kind>,
        received: Value,
        failures: Vec<ValidationError>,
    },
}

/// A failed validation: the kind of failure and where it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{kind}{}", .path.location())]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub path: Path,
}

impl ValidationError {
    /// Create an error located at the root.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            path: Path::root(),
        }
    }

    pub fn type_mismatch(expected: Kind, received: &Value) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            expected,
            received: received.clone(),
        })
    }

    pub fn literal_mismatch(expected: Value, received: &Value) -> Self {
        Self::new(ErrorKind::LiteralMismatch {
            expected,
            received: received.clone(),
        })
    }

    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingKey(key.into()))
    }

    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownKey(key.into()))
    }

    pub fn size_mismatch(expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::SizeMismatch { expected, actual })
    }

    pub fn not_a_sequence(received: &Value) -> Self {
        Self::new(ErrorKind::NotASequence {
            received: received.clone(),
        })
    }

    pub fn no_match(attempted: Vec<Kind>, received: &Value, failures: Vec<ValidationError>) -> Self {
        Self::new(ErrorKind::NoMatch {
            attempted,
            received: received.clone(),
            failures,
        })
    }

    /// Re-locate this error under the object member `key`.
    pub fn at_key(mut self, key: impl Into<String>) -> Self {
        self.path.prepend(PathSegment::Key(key.into()));
        self
    }

    /// Re-locate this error under the sequence position `index`.
    pub fn at_index(mut self, index: usize) -> Self {
        self.path.prepend(PathSegment::Index(index));
        self
    }

    /// Short machine-readable code for the failure kind.
    pub fn code(&self) -> &'static str {
        match self.kind {
            ErrorKind::TypeMismatch { .. } => "type_mismatch",
            ErrorKind::LiteralMismatch { .. } => "literal_mismatch",
            ErrorKind::MissingKey(_) => "missing_key",
            ErrorKind::UnknownKey(_) => "unknown_key",
            ErrorKind::SizeMismatch { .. } => "size_mismatch",
            ErrorKind::NotASequence { .. } => "not_a_sequence",
            ErrorKind::NoMatch { .. } => "no_match",
        }
    }
}

/// Failure of the JSON-text entry points: either the text is not JSON, or the
/// decoded value does not match.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl DecodeError {
    /// The validation failure, if decoding itself succeeded.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Json(_) => None,
        }
    }
}

/// Compact rendering of a value for messages, truncated on a char boundary.
pub(crate) fn preview(value: &Value) -> String {
    let rendered = value.to_string();
    if rendered.chars().count() <= PREVIEW_LIMIT {
        return rendered;
    }
    let mut truncated: String = rendered.chars().take(PREVIEW_LIMIT).collect();
    truncated.push('…');
    truncated
}

fn join_kinds(kinds: &[Kind]) -> String {
    kinds
        .iter()
        .map(Kind::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_error_has_no_location() {
        let err = ValidationError::missing_key("a");
        assert!(err.path.is_root());
        assert_eq!(err.to_string(), "missing required key `a`");
    }

    #[test]
    fn test_path_prepends_outermost_last() {
        let err = ValidationError::type_mismatch(Kind::Number, &json!("x"))
            .at_index(2)
            .at_key("items");
        assert_eq!(err.path.to_string(), "/items/2");
        assert_eq!(
            err.path.segments(),
            &[PathSegment::Key("items".into()), PathSegment::Index(2)]
        );
    }

    #[test]
    fn test_pointer_escapes_keys() {
        let err = ValidationError::unknown_key("x").at_key("a/b~c");
        assert_eq!(err.path.to_string(), "/a~1b~0c");
    }

    #[test]
    fn test_preview_truncates_long_values() {
        let long = json!("x".repeat(200));
        let rendered = preview(&long);
        assert!(rendered.ends_with('…'));
        assert_eq!(rendered.chars().count(), PREVIEW_LIMIT + 1);
    }

    #[test]
    fn test_codes() {
        assert_eq!(ValidationError::size_mismatch(2, 1).code(), "size_mismatch");
        assert_eq!(
            ValidationError::not_a_sequence(&json!(1)).code(),
            "not_a_sequence"
        );
        assert_eq!(
            ValidationError::no_match(vec![], &json!(1), vec![]).code(),
            "no_match"
        );
    }

    #[test]
    fn test_serializes_with_code_tag() {
        let err = ValidationError::missing_key("a").at_key("outer");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!({"kind": {"code": "missing_key", "detail": "a"}, "path": ["outer"]})
        );
    }

    #[test]
    fn test_decode_error_exposes_validation() {
        let err = DecodeError::from(ValidationError::unknown_key("b"));
        assert_eq!(err.validation(), Some(&ValidationError::unknown_key("b")));
        assert_eq!(err.to_string(), "unknown key `b`");
    }
}
