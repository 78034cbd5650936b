//! Closed records.
//!
//! An object validator holds a [`Schema`], an ordered mapping from field name
//! to type-erased validator, and accepts a JSON object whose keys match it
//! exactly:
//!
//! 1. every non-optional field must be present (declaration order);
//! 2. every input key must be a declared field (input order);
//! 3. every present member must pass its field's validator.
//!
//! The first two passes are exposed as free functions so that derived
//! [`Model`](crate::Model)s run exactly the same checks.
//!
//! # Example
//!
//! ```rust
//! use shape_rs::{object, optional, string, Schema, Validator};
//! use serde_json::json;
//!
//! let v = object(
//!     Schema::new()
//!         .field("a", string())
//!         .field("b", optional(string())),
//! );
//! assert!(v.validate(&json!({ "a": "x" })).is_ok());
//! assert_eq!(v.validate(&json!({})).unwrap_err().code(), "missing_key");
//! assert_eq!(v.validate(&json!({ "a": "x", "c": 1 })).unwrap_err().code(), "unknown_key");
//! ```

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};
use tracing::trace;

use crate::error::ValidationError;
use crate::kind::Kind;
use crate::validator::{BoxedValidator, Validator};

/// Ordered field name -> validator mapping.
///
/// Names are unique: declaring a name again replaces its validator and keeps
/// its original position.
#[derive(Clone, Default)]
pub struct Schema {
    fields: Vec<(String, BoxedValidator)>,
    index: HashMap<String, usize>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare (or redeclare) a field.
    pub fn field<V>(mut self, name: impl Into<String>, validator: V) -> Self
    where
        V: Validator + Send + Sync + 'static,
    {
        self.insert(name, BoxedValidator::new(validator));
        self
    }

    /// Declare a field, returning the validator it replaced, if any.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        validator: BoxedValidator,
    ) -> Option<BoxedValidator> {
        let name = name.into();
        match self.index.get(&name) {
            Some(&position) => self
                .fields
                .get_mut(position)
                .map(|(_, slot)| std::mem::replace(slot, validator)),
            None => {
                self.index.insert(name.clone(), self.fields.len());
                self.fields.push((name, validator));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&BoxedValidator> {
        self.index
            .get(name)
            .and_then(|&position| self.fields.get(position))
            .map(|(_, validator)| validator)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BoxedValidator)> {
        self.fields
            .iter()
            .map(|(name, validator)| (name.as_str(), validator))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

impl<K: Into<String>> FromIterator<(K, BoxedValidator)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, BoxedValidator)>>(iter: I) -> Self {
        let mut schema = Schema::new();
        for (name, validator) in iter {
            schema.insert(name, validator);
        }
        schema
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Static description of one field of a derived model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    /// Key in the JSON object.
    pub name: &'static str,
    /// Whether the key may be absent.
    pub optional: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            optional: false,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            optional: true,
        }
    }
}

/// Borrow `value` as a JSON object or fail with `TypeMismatch`.
pub fn expect_object(value: &Value) -> Result<&Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::type_mismatch(Kind::Object, value))
}

/// Presence pass: every `(name, optional)` field that is not optional must be
/// a key of `map`. Fields are checked in the order given.
pub fn check_presence<'a, I>(map: &Map<String, Value>, fields: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    for (name, optional) in fields {
        if !optional && !map.contains_key(name) {
            trace!(key = name, "Required key missing");
            return Err(ValidationError::missing_key(name));
        }
    }
    Ok(())
}

/// Closure pass: every key of `map` must satisfy `is_field`. Keys are checked
/// in input order.
pub fn check_closure<F>(map: &Map<String, Value>, is_field: F) -> Result<(), ValidationError>
where
    F: Fn(&str) -> bool,
{
    match map.keys().find(|key| !is_field(key.as_str())) {
        Some(key) => {
            trace!(key = key.as_str(), "Unknown key present");
            Err(ValidationError::unknown_key(key.as_str()))
        }
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Object {
    schema: Schema,
}

impl Object {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

pub fn object(schema: Schema) -> Object {
    Object::new(schema)
}

impl Validator for Object {
    type Output = Map<String, Value>;

    fn kind(&self) -> Kind {
        Kind::Object
    }

    fn validate(&self, value: &Value) -> Result<Map<String, Value>, ValidationError> {
        let map = expect_object(value)?;
        check_presence(
            map,
            self.schema
                .iter()
                .map(|(name, validator)| (name, validator.is_optional())),
        )?;
        check_closure(map, |key| self.schema.contains(key))?;

        let mut output = Map::new();
        for (key, member) in map {
            let validator = self
                .schema
                .get(key)
                .ok_or_else(|| ValidationError::unknown_key(key.as_str()))?;
            let validated = validator
                .validate(member)
                .map_err(|err| err.at_key(key.as_str()))?;
            output.insert(key.clone(), validated);
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, PathSegment};
    use crate::{array, boolean, number, optional, string, ValidatorExt};
    use serde_json::json;

    fn ab() -> Object {
        object(
            Schema::new()
                .field("a", string())
                .field("b", optional(number())),
        )
    }

    #[test]
    fn test_accepts_matching_object() {
        let out = ab().validate(&json!({ "a": "x", "b": 2 })).unwrap();
        assert_eq!(Value::Object(out), json!({ "a": "x", "b": 2 }));
    }

    #[test]
    fn test_optional_field_may_be_absent() {
        let out = ab().validate(&json!({ "a": "x" })).unwrap();
        assert!(!out.contains_key("b"));
    }

    #[test]
    fn test_optional_field_is_strict_when_present() {
        let err = ab().validate(&json!({ "a": "x", "b": null })).unwrap_err();
        assert_eq!(err.path.segments(), &[PathSegment::Key("b".into())]);
    }

    #[test]
    fn test_missing_key() {
        let err = ab().validate(&json!({})).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingKey("a".into()));
        assert!(err.path.is_root());
    }

    #[test]
    fn test_unknown_key() {
        let err = ab().validate(&json!({ "a": "x", "c": 1 })).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownKey("c".into()));
    }

    #[test]
    fn test_presence_is_checked_before_closure() {
        let err = ab().validate(&json!({ "c": 1 })).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingKey("a".into()));
    }

    #[test]
    fn test_rejects_non_object() {
        let err = ab().validate(&json!([])).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::TypeMismatch {
                expected: Kind::Object,
                ..
            }
        ));
    }

    #[test]
    fn test_member_failure_path() {
        let v = object(Schema::new().field(
            "items",
            array(object(Schema::new().field("done", boolean()))),
        ));
        let err = v
            .validate(&json!({ "items": [{ "done": true }, { "done": "no" }] }))
            .unwrap_err();
        assert_eq!(err.path.to_string(), "/items/1/done");
    }

    #[test]
    fn test_output_keeps_input_order() {
        let v = object(
            Schema::new()
                .field("a", number())
                .field("b", number())
                .field("c", number()),
        );
        let out = v.validate(&json!({ "c": 3, "a": 1, "b": 2 })).unwrap();
        let keys: Vec<_> = out.keys().map(String::as_str).collect();
        assert_eq!(keys, ["c", "a", "b"]);
    }

    #[test]
    fn test_output_keeps_exact_numbers() {
        let v = object(
            Schema::new()
                .field("n", number())
                .field("ns", array(optional(number()))),
        );
        for input in [
            json!({ "n": 9_007_199_254_740_993u64, "ns": [u64::MAX] }),
            json!({ "n": 1.0, "ns": [-0.0, 2.5] }),
            json!({ "n": i64::MIN, "ns": [] }),
        ] {
            let out = Value::Object(v.validate(&input).unwrap());
            assert_eq!(out, input);
            assert_eq!(out.to_string(), input.to_string());
        }
    }

    #[test]
    fn test_redeclaring_replaces_in_place() {
        let schema = Schema::new()
            .field("a", string())
            .field("b", string())
            .field("a", number());
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(schema.get("a").map(Validator::kind), Some(Kind::Number));
    }

    #[test]
    fn test_from_iterator() {
        let schema: Schema = vec![("x", string().boxed()), ("y", number().boxed())]
            .into_iter()
            .collect();
        assert!(schema.contains("x"));
        assert!(!schema.contains("z"));
        assert_eq!(format!("{:?}", schema).matches("BoxedValidator").count(), 2);
    }

    #[test]
    fn test_empty_schema() {
        let v = object(Schema::new());
        assert!(v.validate(&json!({})).unwrap().is_empty());
        assert_eq!(v.validate(&json!({ "a": 1 })).unwrap_err().code(), "unknown_key");
    }
}
