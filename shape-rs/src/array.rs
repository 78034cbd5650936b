//! Homogeneous sequences of any length.

use serde_json::Value;

use crate::error::ValidationError;
use crate::kind::Kind;
use crate::validator::Validator;

/// Validates every element of a JSON array with the same member validator.
///
/// Fails fast: the first failing element is reported, located at its index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Array<V> {
    member: V,
}

impl<V: Validator> Array<V> {
    pub fn new(member: V) -> Self {
        Self { member }
    }

    pub fn member(&self) -> &V {
        &self.member
    }
}

pub fn array<V: Validator>(member: V) -> Array<V> {
    Array::new(member)
}

impl<V: Validator> Validator for Array<V> {
    type Output = Vec<V::Output>;

    fn kind(&self) -> Kind {
        Kind::Array
    }

    fn validate(&self, value: &Value) -> Result<Self::Output, ValidationError> {
        let items = value
            .as_array()
            .ok_or_else(|| ValidationError::not_a_sequence(value))?;

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                self.member
                    .validate(item)
                    .map_err(|err| err.at_index(index))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, PathSegment};
    use crate::{number, string};
    use serde_json::json;

    #[test]
    fn test_preserves_order_and_length() {
        assert_eq!(
            array(number()).validate(&json!([1, 2, 3])).unwrap(),
            vec![1.0, 2.0, 3.0]
        );
        assert!(array(number()).validate(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_reports_failing_index() {
        let err = array(number()).validate(&json!([1, "2"])).unwrap_err();
        assert_eq!(err.path.segments(), &[PathSegment::Index(1)]);
        assert!(matches!(
            err.kind,
            ErrorKind::TypeMismatch {
                expected: Kind::Number,
                ..
            }
        ));
    }

    #[test]
    fn test_fails_fast_on_first_element() {
        let err = array(string()).validate(&json!([1, 2])).unwrap_err();
        assert_eq!(err.path.to_string(), "/0");
    }

    #[test]
    fn test_rejects_non_sequence() {
        let err = array(number()).validate(&json!({"0": 1})).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::NotASequence {
                received: json!({"0": 1})
            }
        );
    }

    #[test]
    fn test_nested_paths() {
        let err = array(array(number()))
            .validate(&json!([[1], [2, null]]))
            .unwrap_err();
        assert_eq!(err.path.to_string(), "/1/1");
    }
}
