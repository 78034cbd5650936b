//! Exact-value checks.
//!
//! `literal(x)` captures a scalar at declaration time and accepts only input
//! equal to it: strings by content, booleans by value, numbers by numeric
//! value (`3` and `3.0` are the same number). Integers are compared as
//! integers, so no two distinct values can meet through `f64` rounding.
//! Only scalars can be literals; object and array literals are rejected at
//! compile time by [`LiteralValue`].

use std::fmt;

use serde_json::Value;

use crate::error::ValidationError;
use crate::infer::IntoValue;
use crate::kind::Kind;
use crate::validator::Validator;

/// A scalar usable as a literal.
pub trait LiteralValue: Clone {
    /// What validation yields: the owned form of the literal.
    type Output;

    /// Whether `value` equals this literal.
    fn matches(&self, value: &Value) -> bool;

    /// The literal as a JSON value, for diagnostics.
    fn to_value(&self) -> Value;

    fn to_output(&self) -> Self::Output;
}

impl LiteralValue for &'static str {
    type Output = String;

    fn matches(&self, value: &Value) -> bool {
        value.as_str() == Some(*self)
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }

    fn to_output(&self) -> String {
        (*self).to_owned()
    }
}

impl LiteralValue for String {
    type Output = String;

    fn matches(&self, value: &Value) -> bool {
        value.as_str() == Some(self.as_str())
    }

    fn to_value(&self) -> Value {
        Value::from(self.as_str())
    }

    fn to_output(&self) -> String {
        self.clone()
    }
}

impl LiteralValue for bool {
    type Output = bool;

    fn matches(&self, value: &Value) -> bool {
        value.as_bool() == Some(*self)
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn to_output(&self) -> bool {
        *self
    }
}

/// `x` as an `i64`, when it is integral and in range.
fn exact_i64(x: f64) -> Option<i64> {
    const RANGE: std::ops::Range<f64> =
        -9_223_372_036_854_775_808.0..9_223_372_036_854_775_808.0;
    (x.fract() == 0.0 && RANGE.contains(&x)).then(|| x as i64)
}

/// `x` as a `u64`, when it is integral and in range.
fn exact_u64(x: f64) -> Option<u64> {
    const RANGE: std::ops::Range<f64> = 0.0..18_446_744_073_709_551_616.0;
    (x.fract() == 0.0 && RANGE.contains(&x)).then(|| x as u64)
}

fn signed_matches(expected: i64, value: &Value) -> bool {
    let Value::Number(number) = value else {
        return false;
    };
    if let Some(n) = number.as_i64() {
        n == expected
    } else if number.is_u64() {
        false
    } else {
        number.as_f64().and_then(exact_i64) == Some(expected)
    }
}

fn unsigned_matches(expected: u64, value: &Value) -> bool {
    let Value::Number(number) = value else {
        return false;
    };
    if let Some(n) = number.as_u64() {
        n == expected
    } else if number.is_i64() {
        false
    } else {
        number.as_f64().and_then(exact_u64) == Some(expected)
    }
}

fn float_matches(expected: f64, value: &Value) -> bool {
    let Value::Number(number) = value else {
        return false;
    };
    if let Some(n) = number.as_i64() {
        exact_i64(expected) == Some(n)
    } else if let Some(n) = number.as_u64() {
        exact_u64(expected) == Some(n)
    } else {
        number.as_f64() == Some(expected)
    }
}

macro_rules! impl_literal_number {
    ($compare:ident as $wide:ty; $($ty:ty),+) => {
        $(
            impl LiteralValue for $ty {
                type Output = $ty;

                fn matches(&self, value: &Value) -> bool {
                    $compare(<$wide>::from(*self), value)
                }

                fn to_value(&self) -> Value {
                    (*self).into_value()
                }

                fn to_output(&self) -> $ty {
                    *self
                }
            }
        )+
    };
}

impl_literal_number!(signed_matches as i64; i8, i16, i32, i64);
impl_literal_number!(unsigned_matches as u64; u8, u16, u32, u64);
impl_literal_number!(float_matches as f64; f32, f64);

// No lossless `From` into 64 bits for pointer-sized integers.
impl LiteralValue for isize {
    type Output = isize;

    fn matches(&self, value: &Value) -> bool {
        signed_matches(*self as i64, value)
    }

    fn to_value(&self) -> Value {
        (*self).into_value()
    }

    fn to_output(&self) -> isize {
        *self
    }
}

impl LiteralValue for usize {
    type Output = usize;

    fn matches(&self, value: &Value) -> bool {
        unsigned_matches(*self as u64, value)
    }

    fn to_value(&self) -> Value {
        (*self).into_value()
    }

    fn to_output(&self) -> usize {
        *self
    }
}

/// Validator accepting one fixed value.
#[derive(Clone, PartialEq)]
pub struct Literal<T> {
    expected: T,
}

impl<T: LiteralValue> Literal<T> {
    pub fn new(expected: T) -> Self {
        Self { expected }
    }

    /// The captured literal.
    pub fn expected(&self) -> &T {
        &self.expected
    }
}

pub fn literal<T: LiteralValue>(expected: T) -> Literal<T> {
    Literal::new(expected)
}

impl<T: LiteralValue> Validator for Literal<T> {
    type Output = T::Output;

    fn kind(&self) -> Kind {
        Kind::Literal
    }

    fn validate(&self, value: &Value) -> Result<T::Output, ValidationError> {
        if self.expected.matches(value) {
            Ok(self.expected.to_output())
        } else {
            Err(ValidationError::literal_mismatch(self.expected.to_value(), value))
        }
    }
}

impl<T: LiteralValue> fmt::Debug for Literal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Literal")
            .field(&self.expected.to_value())
            .finish()
    }
}
