//! Type inference: from a validator to the type it produces.
//!
//! The mapping is carried by [`Validator::Output`] and is derived
//! structurally. No concrete schema is ever enumerated:
//!
//! | Validator | Output |
//! |-----------|--------|
//! | `string()` | `String` |
//! | `number()` | `f64` |
//! | `boolean()` | `bool` |
//! | `null()` | `()` |
//! | `literal(x)` | the literal's owned type (`String` for `&str`) |
//! | `optional(v)` | `Output<V>` |
//! | `array(v)` | `Vec<Output<V>>` |
//! | `tuple((a, b, ..))` | `(Output<A>, Output<B>, ..)` |
//! | `one_of((a, b, ..))` | `UnionN<Output<A>, Output<B>, ..>` |
//! | `object(schema)` | `Map<String, Value>` |
//! | `model::<M>()` | `M` |
//!
//! Tuple and union derivations exist for every arity from 1 (tuples) or 2
//! (unions) up to [`MAX_ARITY`]. Going past it is a compile error; the
//! `Vec<BoxedValidator>` forms of [`tuple`](crate::tuple) and
//! [`one_of`](crate::one_of) cover runtime-sized cases.
//!
//! Record types come from `#[derive(Model)]`: the struct declares the field
//! types and the compiler checks each one against its validator's output.
//!
//! [`IntoValue`] goes the other way, turning a typed output (a derived model,
//! a union, a tuple) back into a [`Value`] tree. The type-erased
//! [`BoxedValidator`](crate::BoxedValidator) does not go through it: it hands
//! back the accepted input, so numbers keep their exact representation.

use serde_json::{Map, Number, Value};

use crate::validator::Validator;

/// Largest tuple / union arity with a static output type.
pub const MAX_ARITY: usize = 8;

/// The output type of validator `V`.
pub type Output<V> = <V as Validator>::Output;

/// Conversion of a validated output back into a JSON value.
pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for Map<String, Value> {
    fn into_value(self) -> Value {
        Value::Object(self)
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoValue for () {
    fn into_value(self) -> Value {
        Value::Null
    }
}

/// Integral values become JSON integers; everything else, including `-0.0`,
/// stays a float. Non-finite values have no JSON form and become `null`.
///
/// An `f64` has already lost whether the input was written `1` or `1.0`; the
/// type-erased path returns the input itself and is exact.
impl IntoValue for f64 {
    fn into_value(self) -> Value {
        const I64_RANGE: std::ops::Range<f64> =
            -9_223_372_036_854_775_808.0..9_223_372_036_854_775_808.0;

        let negative_zero = self == 0.0 && self.is_sign_negative();
        if self.fract() == 0.0 && !negative_zero && I64_RANGE.contains(&self) {
            Value::Number(Number::from(self as i64))
        } else {
            Number::from_f64(self).map_or(Value::Null, Value::Number)
        }
    }
}

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        f64::from(self).into_value()
    }
}

macro_rules! impl_into_value_integer {
    ($($ty:ty),+) => {
        $(
            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::from(self)
                }
            }
        )+
    };
}

impl_into_value_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(IntoValue::into_value).collect())
    }
}

macro_rules! impl_into_value_tuple {
    ($($idx:tt => $name:ident),+) => {
        impl<$($name: IntoValue),+> IntoValue for ($($name,)+) {
            fn into_value(self) -> Value {
                Value::Array(vec![$(self.$idx.into_value()),+])
            }
        }
    };
}

impl_into_value_tuple!(0 => A);
impl_into_value_tuple!(0 => A, 1 => B);
impl_into_value_tuple!(0 => A, 1 => B, 2 => C);
impl_into_value_tuple!(0 => A, 1 => B, 2 => C, 3 => D);
impl_into_value_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E);
impl_into_value_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F);
impl_into_value_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G);
impl_into_value_tuple!(0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{array, boolean, literal, number, one_of, string, tuple, Union2};
    use serde_json::json;

    fn assert_output<V, T>(_validator: &V)
    where
        V: Validator<Output = T>,
    {
    }

    #[test]
    fn test_outputs_are_derived_structurally() {
        assert_output::<_, Vec<(String, f64)>>(&array(tuple((string(), number()))));
        assert_output::<_, Union2<f64, String>>(&one_of((number(), literal("x"))));
        assert_output::<_, (bool,)>(&tuple((boolean(),)));
    }

    #[test]
    fn test_integral_floats_become_integers() {
        assert_eq!(3.0_f64.into_value(), json!(3));
        assert_eq!((-2.0_f64).into_value(), json!(-2));
        assert_eq!(2.5_f64.into_value(), json!(2.5));
        assert_eq!(f64::NAN.into_value(), Value::Null);
    }

    #[test]
    fn test_negative_zero_stays_a_float() {
        assert_eq!((-0.0_f64).into_value().to_string(), "-0.0");
        assert_eq!(0.0_f64.into_value().to_string(), "0");
    }

    #[test]
    fn test_huge_floats_stay_floats() {
        let huge = 1e300_f64;
        assert_eq!(huge.into_value(), json!(1e300));
    }

    #[test]
    fn test_tuple_into_value() {
        assert_eq!(("x".to_string(), 1.0_f64).into_value(), json!(["x", 1]));
        assert_eq!(vec![true, false].into_value(), json!([true, false]));
    }
}
