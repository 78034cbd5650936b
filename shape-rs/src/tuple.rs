//! Fixed-length heterogeneous sequences.
//!
//! A tuple is declared with a Rust tuple of validators, one per position:
//! `tuple((string(), number()))` accepts `["x", 1]` and produces
//! `(String, f64)`. Static arities run from 1 to [`MAX_ARITY`]; a
//! `Vec<BoxedValidator>` declares a tuple whose length is only known at run
//! time and produces `Vec<Value>`.
//!
//! [`MAX_ARITY`]: crate::infer::MAX_ARITY

use serde_json::Value;

use crate::error::ValidationError;
use crate::kind::Kind;
use crate::validator::{BoxedValidator, Validator};

/// The positional validators of a tuple.
pub trait TupleItems {
    type Output;

    /// Number of positions.
    fn arity(&self) -> usize;

    /// Validate `items` position by position. A length that differs from
    /// [`arity`](Self::arity) fails with `SizeMismatch`.
    fn validate_items(&self, items: &[Value]) -> Result<Self::Output, ValidationError>;
}

macro_rules! impl_tuple_items {
    ($arity:expr; $($idx:tt => $name:ident / $item:ident),+) => {
        impl<$($name: Validator),+> TupleItems for ($($name,)+) {
            type Output = ($(<$name as Validator>::Output,)+);

            fn arity(&self) -> usize {
                $arity
            }

            fn validate_items(&self, items: &[Value]) -> Result<Self::Output, ValidationError> {
                let [$($item),+] = items else {
                    return Err(ValidationError::size_mismatch($arity, items.len()));
                };

                Ok(($(
                    self.$idx
                        .validate($item)
                        .map_err(|err| err.at_index($idx))?,
                )+))
            }
        }
    };
}

impl_tuple_items!(1; 0 => A / a);
impl_tuple_items!(2; 0 => A / a, 1 => B / b);
impl_tuple_items!(3; 0 => A / a, 1 => B / b, 2 => C / c);
impl_tuple_items!(4; 0 => A / a, 1 => B / b, 2 => C / c, 3 => D / d);
impl_tuple_items!(5; 0 => A / a, 1 => B / b, 2 => C / c, 3 => D / d, 4 => E / e);
impl_tuple_items!(6; 0 => A / a, 1 => B / b, 2 => C / c, 3 => D / d, 4 => E / e, 5 => F / f);
impl_tuple_items!(7; 0 => A / a, 1 => B / b, 2 => C / c, 3 => D / d, 4 => E / e, 5 => F / f, 6 => G / g);
impl_tuple_items!(8; 0 => A / a, 1 => B / b, 2 => C / c, 3 => D / d, 4 => E / e, 5 => F / f, 6 => G / g, 7 => H / h);

impl TupleItems for Vec<BoxedValidator> {
    type Output = Vec<Value>;

    fn arity(&self) -> usize {
        self.len()
    }

    fn validate_items(&self, items: &[Value]) -> Result<Vec<Value>, ValidationError> {
        if items.len() != self.len() {
            return Err(ValidationError::size_mismatch(self.len(), items.len()));
        }

        self.iter()
            .zip(items)
            .enumerate()
            .map(|(index, (validator, item))| {
                validator.validate(item).map_err(|err| err.at_index(index))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tuple<T> {
    items: T,
}

impl<T: TupleItems> Tuple<T> {
    pub fn new(items: T) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &T {
        &self.items
    }

    pub fn arity(&self) -> usize {
        self.items.arity()
    }
}

pub fn tuple<T: TupleItems>(items: T) -> Tuple<T> {
    Tuple::new(items)
}

impl<T: TupleItems> Validator for Tuple<T> {
    type Output = T::Output;

    fn kind(&self) -> Kind {
        Kind::Tuple
    }

    fn validate(&self, value: &Value) -> Result<T::Output, ValidationError> {
        let items = value
            .as_array()
            .ok_or_else(|| ValidationError::not_a_sequence(value))?;

        self.items.validate_items(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::{boolean, literal, number, string, ValidatorExt};
    use serde_json::json;

    #[test]
    fn test_positional_validation() {
        let point = tuple((string(), number()));
        assert_eq!(
            point.validate(&json!(["x", 1])).unwrap(),
            ("x".to_string(), 1.0)
        );
        assert_eq!(point.arity(), 2);
    }

    #[test]
    fn test_length_must_match() {
        let point = tuple((string(), number()));

        let err = point.validate(&json!(["x"])).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::SizeMismatch {
                expected: 2,
                actual: 1
            }
        );

        let err = point.validate(&json!(["x", 1, 2])).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::SizeMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_failure_is_located_at_position() {
        let err = tuple((string(), number(), boolean()))
            .validate(&json!(["x", 1, "no"]))
            .unwrap_err();
        assert_eq!(err.path.to_string(), "/2");
        assert_eq!(err.code(), "type_mismatch");
    }

    #[test]
    fn test_rejects_non_sequence() {
        let err = tuple((string(),)).validate(&json!("x")).unwrap_err();
        assert_eq!(err.code(), "not_a_sequence");
    }

    #[test]
    fn test_max_arity() {
        let eight = tuple((
            number(),
            number(),
            number(),
            number(),
            number(),
            number(),
            number(),
            literal("end"),
        ));
        let out = eight
            .validate(&json!([1, 2, 3, 4, 5, 6, 7, "end"]))
            .unwrap();
        assert_eq!(out.7, "end");
    }

    #[test]
    fn test_runtime_sized() {
        let items: Vec<BoxedValidator> = vec![string().boxed(), number().boxed()];
        let pair = tuple(items);
        assert_eq!(
            pair.validate(&json!(["a", 2])).unwrap(),
            vec![json!("a"), json!(2)]
        );
        assert_eq!(pair.validate(&json!(["a"])).unwrap_err().code(), "size_mismatch");

        let empty = tuple(Vec::<BoxedValidator>::new());
        assert!(empty.validate(&json!([])).unwrap().is_empty());
    }
}
