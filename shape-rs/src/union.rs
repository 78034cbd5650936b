//! Alternatives.
//!
//! `one_of((a, b, ..))` tries each member in declaration order and returns the
//! first success, tagged with the member that produced it:
//!
//! ```rust
//! use shape_rs::{literal, number, one_of, Union2, Validator};
//! use serde_json::json;
//!
//! let v = one_of((number(), literal("x")));
//! assert_eq!(v.validate(&json!(3)).unwrap(), Union2::First(3.0));
//! assert_eq!(v.validate(&json!("x")).unwrap(), Union2::Second("x".into()));
//! assert_eq!(v.validate(&json!(true)).unwrap_err().code(), "no_match");
//! ```
//!
//! When several members would accept a value the earliest one wins. When none
//! does, every member's failure is kept in the resulting `NoMatch`.

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::ValidationError;
use crate::infer::IntoValue;
use crate::kind::Kind;
use crate::validator::{BoxedValidator, Validator};

macro_rules! define_union {
    ($union:ident; $($idx:tt => $variant:ident($name:ident)),+) => {
        /// Output of a union: which member accepted, and what it produced.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $union<$($name),+> {
            $($variant($name)),+
        }

        impl<$($name),+> $union<$($name),+> {
            /// Zero-based declaration position of the accepting member.
            pub fn position(&self) -> usize {
                match self {
                    $(Self::$variant(_) => $idx),+
                }
            }
        }

        impl<$($name: IntoValue),+> IntoValue for $union<$($name),+> {
            fn into_value(self) -> Value {
                match self {
                    $(Self::$variant(inner) => inner.into_value()),+
                }
            }
        }

        impl<$($name: Validator),+> UnionMembers for ($($name,)+) {
            type Output = $union<$(<$name as Validator>::Output),+>;

            fn kinds(&self) -> Vec<Kind> {
                vec![$(self.$idx.kind()),+]
            }

            fn try_each(&self, value: &Value) -> Result<Self::Output, Vec<ValidationError>> {
                let mut failures = Vec::new();
                $(
                    match self.$idx.validate(value) {
                        Ok(output) => return Ok($union::$variant(output)),
                        Err(err) => {
                            trace!(member = $idx, code = err.code(), "Union member rejected value");
                            failures.push(err);
                        }
                    }
                )+
                Err(failures)
            }
        }
    };
}

/// The member validators of a union.
pub trait UnionMembers {
    type Output;

    /// Member kinds in declaration order.
    fn kinds(&self) -> Vec<Kind>;

    /// Try each member in order; on total failure return every member's
    /// error, in the same order.
    fn try_each(&self, value: &Value) -> Result<Self::Output, Vec<ValidationError>>;
}

define_union!(Union2; 0 => First(A), 1 => Second(B));
define_union!(Union3; 0 => First(A), 1 => Second(B), 2 => Third(C));
define_union!(Union4; 0 => First(A), 1 => Second(B), 2 => Third(C), 3 => Fourth(D));
define_union!(Union5; 0 => First(A), 1 => Second(B), 2 => Third(C), 3 => Fourth(D), 4 => Fifth(E));
define_union!(Union6; 0 => First(A), 1 => Second(B), 2 => Third(C), 3 => Fourth(D), 4 => Fifth(E), 5 => Sixth(F));
define_union!(Union7; 0 => First(A), 1 => Second(B), 2 => Third(C), 3 => Fourth(D), 4 => Fifth(E), 5 => Sixth(F), 6 => Seventh(G));
define_union!(Union8; 0 => First(A), 1 => Second(B), 2 => Third(C), 3 => Fourth(D), 4 => Fifth(E), 5 => Sixth(F), 6 => Seventh(G), 7 => Eighth(H));

impl UnionMembers for Vec<BoxedValidator> {
    type Output = Value;

    fn kinds(&self) -> Vec<Kind> {
        self.iter().map(Validator::kind).collect()
    }

    fn try_each(&self, value: &Value) -> Result<Value, Vec<ValidationError>> {
        let mut failures = Vec::with_capacity(self.len());
        for (member, validator) in self.iter().enumerate() {
            match validator.validate(value) {
                Ok(output) => return Ok(output),
                Err(err) => {
                    trace!(member, code = err.code(), "Union member rejected value");
                    failures.push(err);
                }
            }
        }
        Err(failures)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneOf<T> {
    members: T,
}

impl<T: UnionMembers> OneOf<T> {
    pub fn new(members: T) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &T {
        &self.members
    }
}

pub fn one_of<T: UnionMembers>(members: T) -> OneOf<T> {
    OneOf::new(members)
}

impl<T: UnionMembers> Validator for OneOf<T> {
    type Output = T::Output;

    fn kind(&self) -> Kind {
        Kind::Union
    }

    fn validate(&self, value: &Value) -> Result<T::Output, ValidationError> {
        match self.members.try_each(value) {
            Ok(output) => Ok(output),
            Err(failures) => {
                debug!(attempted = failures.len(), "No union member matched");
                Err(ValidationError::no_match(
                    self.members.kinds(),
                    value,
                    failures,
                ))
            }
        }
    }
}
