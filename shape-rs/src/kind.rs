//! Validator kinds, used in diagnostics.

use std::fmt;

use serde::Serialize;

/// The kind tag every validator carries.
///
/// Primitive kinds double as the "expected" side of a type mismatch; the
/// structural kinds name combinators in union diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    String,
    Number,
    Boolean,
    Null,
    Literal,
    Optional,
    Array,
    Object,
    Tuple,
    Union,
}

impl Kind {
    /// Returns the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Literal => "literal",
            Self::Optional => "optional",
            Self::Array => "array",
            Self::Object => "object",
            Self::Tuple => "tuple",
            Self::Union => "union",
        }
    }

    /// Returns true for the scalar type checks.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::String | Self::Number | Self::Boolean | Self::Null
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
