//! Scalar type checks.
//!
//! Each validator accepts exactly one JSON type and never coerces: `number()`
//! rejects `"3"`, `string()` rejects `3`, `boolean()` rejects `0`.

use serde_json::Value;

use crate::error::ValidationError;
use crate::kind::Kind;
use crate::validator::Validator;

/// Accepts JSON strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringValidator;

/// Accepts JSON numbers (integers and floats alike).
///
/// The typed output is an `f64`, which cannot hold every integer past 2^53.
/// Boxed and object validation return the input number untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberValidator;

/// Accepts `true` and `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanValidator;

/// Accepts `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullValidator;

pub fn string() -> StringValidator {
    StringValidator
}

pub fn number() -> NumberValidator {
    NumberValidator
}

pub fn boolean() -> BooleanValidator {
    BooleanValidator
}

pub fn null() -> NullValidator {
    NullValidator
}

impl Validator for StringValidator {
    type Output = String;

    fn kind(&self) -> Kind {
        Kind::String
    }

    fn validate(&self, value: &Value) -> Result<String, ValidationError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(ValidationError::type_mismatch(Kind::String, other)),
        }
    }
}

impl Validator for NumberValidator {
    type Output = f64;

    fn kind(&self) -> Kind {
        Kind::Number
    }

    fn validate(&self, value: &Value) -> Result<f64, ValidationError> {
        value
            .as_f64()
            .ok_or_else(|| ValidationError::type_mismatch(Kind::Number, value))
    }
}

impl Validator for BooleanValidator {
    type Output = bool;

    fn kind(&self) -> Kind {
        Kind::Boolean
    }

    fn validate(&self, value: &Value) -> Result<bool, ValidationError> {
        value
            .as_bool()
            .ok_or_else(|| ValidationError::type_mismatch(Kind::Boolean, value))
    }
}

impl Validator for NullValidator {
    type Output = ();

    fn kind(&self) -> Kind {
        Kind::Null
    }

    fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        if value.is_null() {
            Ok(())
        } else {
            Err(ValidationError::type_mismatch(Kind::Null, value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_number_does_not_coerce() {
        assert_eq!(number().validate(&json!(3)).unwrap(), 3.0);
        assert_eq!(number().validate(&json!(-1.5)).unwrap(), -1.5);

        let err = number().validate(&json!("3")).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::TypeMismatch {
                expected: Kind::Number,
                received: json!("3"),
            }
        );
    }

    #[test]
    fn test_string() {
        assert_eq!(string().validate(&json!("x")).unwrap(), "x");
        assert!(string().validate(&json!(1)).is_err());
        assert!(string().validate(&json!(null)).is_err());
        assert!(string().validate(&json!(["x"])).is_err());
    }

    #[test]
    fn test_boolean() {
        assert!(boolean().validate(&json!(true)).unwrap());
        assert!(!boolean().validate(&json!(false)).unwrap());
        assert!(boolean().validate(&json!(0)).is_err());
        assert!(boolean().validate(&json!("true")).is_err());
    }

    #[test]
    fn test_null() {
        null().validate(&json!(null)).unwrap();
        assert!(null().validate(&json!(0)).is_err());
        assert!(null().validate(&json!({})).is_err());
    }

    #[test]
    fn test_kinds() {
        assert_eq!(string().kind(), Kind::String);
        assert_eq!(number().kind(), Kind::Number);
        assert_eq!(boolean().kind(), Kind::Boolean);
        assert_eq!(null().kind(), Kind::Null);
        assert!(!string().is_optional());
    }
}
