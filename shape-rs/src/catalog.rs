//! The factory catalog as a value.
//!
//! [`Catalog`] bundles every factory behind one handle, for code that wants a
//! `z.string()`-style entry point passed around explicitly instead of a set of
//! free-function imports. It carries no state.

use crate::array::{array, Array};
use crate::literal::{literal, Literal, LiteralValue};
use crate::model::{model, Model, ModelValidator};
use crate::object::{object, Object, Schema};
use crate::optional::{optional, Optional};
use crate::primitive::{
    boolean, null, number, string, BooleanValidator, NullValidator, NumberValidator,
    StringValidator,
};
use crate::tuple::{tuple, Tuple, TupleItems};
use crate::union::{one_of, OneOf, UnionMembers};
use crate::validator::Validator;

/// Handle to every validator factory.
///
/// ```rust
/// use shape_rs::{Catalog, Schema, Validator};
/// use serde_json::json;
///
/// fn point(z: Catalog) -> impl Validator {
///     z.object(Schema::new().field("x", z.number()).field("label", z.o(z.string())))
/// }
///
/// assert!(point(Catalog).validate(&json!({ "x": 1 })).is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Catalog;

impl Catalog {
    pub fn string(self) -> StringValidator {
        string()
    }

    pub fn number(self) -> NumberValidator {
        number()
    }

    pub fn boolean(self) -> BooleanValidator {
        boolean()
    }

    pub fn null(self) -> NullValidator {
        null()
    }

    pub fn literal<T: LiteralValue>(self, expected: T) -> Literal<T> {
        literal(expected)
    }

    pub fn optional<V: Validator>(self, inner: V) -> Optional<V> {
        optional(inner)
    }

    /// Short alias for [`optional`](Self::optional).
    pub fn o<V: Validator>(self, inner: V) -> Optional<V> {
        optional(inner)
    }

    pub fn array<V: Validator>(self, member: V) -> Array<V> {
        array(member)
    }

    pub fn object(self, schema: Schema) -> Object {
        object(schema)
    }

    pub fn tuple<T: TupleItems>(self, items: T) -> Tuple<T> {
        tuple(items)
    }

    pub fn one_of<T: UnionMembers>(self, members: T) -> OneOf<T> {
        one_of(members)
    }

    pub fn model<M: Model>(self) -> ModelValidator<M> {
        model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Union2;
    use serde_json::json;

    #[test]
    fn test_catalog_matches_free_functions() {
        let z = Catalog;
        assert_eq!(z.string(), string());
        assert_eq!(z.o(z.number()), optional(number()));
        assert_eq!(z.literal("ff"), literal("ff"));
    }

    #[test]
    fn test_catalog_combinators() {
        let z = Catalog;
        let v = z.array(z.one_of((z.null(), z.tuple((z.boolean(),)))));
        assert_eq!(
            v.validate(&json!([null, [true]])).unwrap(),
            vec![Union2::First(()), Union2::Second((true,))]
        );
    }
}
