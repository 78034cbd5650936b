//! The [`Validator`] trait and its type-erased form.
//!
//! A validator is a pure function from an untyped [`Value`] to a typed output
//! or a [`ValidationError`]. Combinators own their member validators, so a
//! schema is an ordinary tree of values that can be cloned, shared across
//! threads and invoked any number of times.
//!
//! [`BoxedValidator`] erases the output type to [`Value`]; it is what
//! [`Schema`](crate::Schema) stores and what the runtime-sized tuple and union
//! forms accept. Its output is the accepted input itself, so numbers keep
//! their exact JSON representation (`1.0` stays a float, integers beyond
//! 2^53 are not rounded).

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{DecodeError, ValidationError};
use crate::kind::Kind;
use crate::optional::Optional;

/// Core validation interface.
///
/// # Example
///
/// ```rust
/// use shape_rs::{number, string, tuple, Validator};
/// use serde_json::json;
///
/// let point = tuple((string(), number()));
/// let (label, x) = point.validate(&json!(["x", 1])).unwrap();
/// assert_eq!(label, "x");
/// assert_eq!(x, 1.0);
/// ```
pub trait Validator {
    /// What a successful validation produces.
    type Output;

    /// Kind tag used in diagnostics.
    fn kind(&self) -> Kind;

    /// Check `value` and build the output.
    fn validate(&self, value: &Value) -> Result<Self::Output, ValidationError>;

    /// Whether an enclosing object may omit the field this validator guards.
    fn is_optional(&self) -> bool {
        false
    }
}

impl<V: Validator + ?Sized> Validator for &V {
    type Output = V::Output;

    fn kind(&self) -> Kind {
        (**self).kind()
    }

    fn validate(&self, value: &Value) -> Result<Self::Output, ValidationError> {
        (**self).validate(value)
    }

    fn is_optional(&self) -> bool {
        (**self).is_optional()
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    type Output = V::Output;

    fn kind(&self) -> Kind {
        (**self).kind()
    }

    fn validate(&self, value: &Value) -> Result<Self::Output, ValidationError> {
        (**self).validate(value)
    }

    fn is_optional(&self) -> bool {
        (**self).is_optional()
    }
}

/// Convenience methods available on every validator.
pub trait ValidatorExt: Validator + Sized {
    /// Mark this validator optional for an enclosing object.
    fn optional(self) -> Optional<Self> {
        Optional::new(self)
    }

    /// Erase the output type.
    fn boxed(self) -> BoxedValidator
    where
        Self: Send + Sync + 'static,
    {
        BoxedValidator::new(self)
    }

    /// Decode `json` and validate the decoded value.
    fn validate_str(&self, json: &str) -> Result<Self::Output, DecodeError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(self.validate(&value)?)
    }
}

impl<V: Validator> ValidatorExt for V {}

/// Object-safe view of a validator.
trait DynValidator: Send + Sync {
    fn kind(&self) -> Kind;
    fn is_optional(&self) -> bool;
    fn validate_value(&self, value: &Value) -> Result<Value, ValidationError>;
}

impl<V> DynValidator for V
where
    V: Validator + Send + Sync,
{
    fn kind(&self) -> Kind {
        Validator::kind(self)
    }

    fn is_optional(&self) -> bool {
        Validator::is_optional(self)
    }

    // Validators never rewrite what they accept, so the checked input is
    // the output. Re-encoding the typed output would round numbers.
    fn validate_value(&self, value: &Value) -> Result<Value, ValidationError> {
        self.validate(value).map(|_| value.clone())
    }
}

/// A shared, type-erased validator producing [`Value`] output.
///
/// Cloning is cheap (reference counted); the optional capability of the
/// wrapped validator is preserved.
#[derive(Clone)]
pub struct BoxedValidator {
    inner: Arc<dyn DynValidator>,
}

impl BoxedValidator {
    /// Wrap any shareable validator.
    pub fn new<V>(validator: V) -> Self
    where
        V: Validator + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(validator),
        }
    }
}

impl Validator for BoxedValidator {
    type Output = Value;

    fn kind(&self) -> Kind {
        self.inner.kind()
    }

    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        self.inner.validate_value(value)
    }

    fn is_optional(&self) -> bool {
        self.inner.is_optional()
    }
}

impl fmt::Debug for BoxedValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxedValidator")
            .field("kind", &self.inner.kind())
            .field("optional", &self.inner.is_optional())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{literal, number, optional, string};
    use serde_json::json;

    #[test]
    fn test_boxed_preserves_kind_and_optional() {
        let boxed = optional(string()).boxed();
        assert_eq!(Validator::kind(&boxed), Kind::Optional);
        assert!(Validator::is_optional(&boxed));

        let boxed = number().boxed();
        assert_eq!(Validator::kind(&boxed), Kind::Number);
        assert!(!Validator::is_optional(&boxed));
    }

    #[test]
    fn test_boxed_converts_output() {
        let boxed = literal("f").boxed();
        assert_eq!(boxed.validate(&json!("f")).unwrap(), json!("f"));
        assert!(boxed.validate(&json!("g")).is_err());
    }

    #[test]
    fn test_boxed_keeps_number_representation() {
        let boxed = number().boxed();
        for input in [
            json!(9_007_199_254_740_993u64),
            json!(-9_007_199_254_740_993i64),
            json!(u64::MAX),
            json!(1.0),
            json!(-0.0),
            json!(2),
        ] {
            let output = boxed.validate(&input).unwrap();
            assert_eq!(output, input);
            assert_eq!(output.to_string(), input.to_string());
        }
    }

    #[test]
    fn test_validate_through_reference_and_arc() {
        let shared = Arc::new(number());
        assert_eq!((&*shared).validate(&json!(2)).unwrap(), 2.0);
        assert_eq!(shared.validate(&json!(3)).unwrap(), 3.0);
    }

    #[test]
    fn test_validate_str_distinguishes_failures() {
        let err = number().validate_str("not json").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));

        let err = number().validate_str("\"3\"").unwrap_err();
        assert_eq!(err.validation().map(|e| e.code()), Some("type_mismatch"));

        assert_eq!(number().validate_str("3").unwrap(), 3.0);
    }

    #[test]
    fn test_boxed_debug() {
        let rendered = format!("{:?}", string().boxed());
        assert!(rendered.contains("String"));
    }
}
