//! Rust types that know their own validator.
//!
//! [`Shaped`] maps a type to the validator whose output is that type. The
//! derive macro uses it to build a field's validator from the field's
//! declared type, so `tags: Vec<String>` becomes `array(string())` without
//! being spelled out.

use crate::array::{array, Array};
use crate::primitive::{
    boolean, null, number, string, BooleanValidator, NullValidator, NumberValidator,
    StringValidator,
};
use crate::tuple::{tuple, Tuple};
use crate::union::{
    one_of, OneOf, Union2, Union3, Union4, Union5, Union6, Union7, Union8,
};
use crate::validator::Validator;

pub trait Shaped: Sized {
    type Validator: Validator<Output = Self>;

    fn validator() -> Self::Validator;
}

impl Shaped for String {
    type Validator = StringValidator;

    fn validator() -> StringValidator {
        string()
    }
}

impl Shaped for f64 {
    type Validator = NumberValidator;

    fn validator() -> NumberValidator {
        number()
    }
}

impl Shaped for bool {
    type Validator = BooleanValidator;

    fn validator() -> BooleanValidator {
        boolean()
    }
}

impl Shaped for () {
    type Validator = NullValidator;

    fn validator() -> NullValidator {
        null()
    }
}

impl<T: Shaped> Shaped for Vec<T> {
    type Validator = Array<T::Validator>;

    fn validator() -> Self::Validator {
        array(T::validator())
    }
}

macro_rules! impl_shaped_tuple {
    ($($name:ident),+) => {
        impl<$($name: Shaped),+> Shaped for ($($name,)+) {
            type Validator = Tuple<($($name::Validator,)+)>;

            fn validator() -> Self::Validator {
                tuple(($($name::validator(),)+))
            }
        }
    };
}

impl_shaped_tuple!(A);
impl_shaped_tuple!(A, B);
impl_shaped_tuple!(A, B, C);
impl_shaped_tuple!(A, B, C, D);
impl_shaped_tuple!(A, B, C, D, E);
impl_shaped_tuple!(A, B, C, D, E, F);
impl_shaped_tuple!(A, B, C, D, E, F, G);
impl_shaped_tuple!(A, B, C, D, E, F, G, H);

macro_rules! impl_shaped_union {
    ($union:ident; $($name:ident),+) => {
        impl<$($name: Shaped),+> Shaped for $union<$($name),+> {
            type Validator = OneOf<($($name::Validator,)+)>;

            fn validator() -> Self::Validator {
                one_of(($($name::validator(),)+))
            }
        }
    };
}

impl_shaped_union!(Union2; A, B);
impl_shaped_union!(Union3; A, B, C);
impl_shaped_union!(Union4; A, B, C, D);
impl_shaped_union!(Union5; A, B, C, D, E);
impl_shaped_union!(Union6; A, B, C, D, E, F);
impl_shaped_union!(Union7; A, B, C, D, E, F, G);
impl_shaped_union!(Union8; A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_shapes() {
        let v = <Vec<(String, f64)>>::validator();
        assert_eq!(
            v.validate(&json!([["a", 1], ["b", 2.5]])).unwrap(),
            vec![("a".to_string(), 1.0), ("b".to_string(), 2.5)]
        );
        assert_eq!(v.validate(&json!([["a"]])).unwrap_err().path.to_string(), "/0");
    }

    #[test]
    fn test_union_shape() {
        let v = <Union2<f64, bool>>::validator();
        assert_eq!(v.validate(&json!(false)).unwrap(), Union2::Second(false));
        assert!(v.validate(&json!("x")).is_err());
    }

    #[test]
    fn test_unit_is_null() {
        <()>::validator().validate(&json!(null)).unwrap();
    }
}
