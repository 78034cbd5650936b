//! Instance builder: typed records checked against their schema.
//!
//! A [`Model`] is a Rust struct bound to a closed object schema, normally
//! through `#[derive(Model)]`. Building an instance runs the same passes as
//! [`object`](crate::object) over [`Model::schema`] (shape, presence,
//! closure, members) and fails with exactly the error that validator would
//! report; on success the fields are assigned from the validated members.
//!
//! ```rust
//! use shape_rs::Model;
//! use serde_json::json;
//!
//! #[derive(Debug, Model)]
//! struct Ai {
//!     name: String,
//!     version: f64,
//!     #[shape(literal = "ff")]
//!     kind: String,
//! }
//!
//! let ai = Ai::from_value(&json!({ "name": "x", "version": 1, "kind": "ff" })).unwrap();
//! assert_eq!(ai.version, 1.0);
//! assert!(Ai::from_value(&json!({ "name": "x", "version": 1, "kind": "gg" })).is_err());
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{DecodeError, ValidationError};
use crate::kind::Kind;
use crate::object::{check_closure, check_presence, expect_object, FieldSpec, Schema};
use crate::validator::Validator;

pub trait Model: Sized {
    /// Name used in diagnostics.
    fn name() -> &'static str;

    /// The schema's fields, in declaration order.
    fn fields() -> &'static [FieldSpec];

    /// The equivalent dynamic schema.
    fn schema() -> Schema;

    /// Build an instance from a map that already passed the presence and
    /// closure checks. Members are validated in the map's key order.
    fn from_fields(map: &Map<String, Value>) -> Result<Self, ValidationError>;

    /// Validate `value` and build an instance from it.
    fn from_value(value: &Value) -> Result<Self, ValidationError> {
        trace!(model = Self::name(), "Building model instance");

        let result = build::<Self>(value);
        if let Err(err) = &result {
            debug!(
                model = Self::name(),
                path = %err.path,
                code = err.code(),
                "Model construction failed"
            );
        }
        result
    }

    /// Decode `json` and build an instance from it.
    fn from_json_str(json: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value)?)
    }
}

fn build<M: Model>(value: &Value) -> Result<M, ValidationError> {
    let map = expect_object(value)?;
    let fields = M::fields();
    check_presence(map, fields.iter().map(|field| (field.name, field.optional)))?;
    check_closure(map, |key| fields.iter().any(|field| field.name == key))?;
    M::from_fields(map)
}

/// Validator adapter for a model, so models nest inside other combinators.
pub struct ModelValidator<M> {
    marker: PhantomData<fn() -> M>,
}

pub fn model<M: Model>() -> ModelValidator<M> {
    ModelValidator::new()
}

impl<M: Model> ModelValidator<M> {
    pub fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<M: Model> Default for ModelValidator<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for ModelValidator<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for ModelValidator<M> {}

impl<M: Model> fmt::Debug for ModelValidator<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelValidator").field(&M::name()).finish()
    }
}

impl<M: Model> Validator for ModelValidator<M> {
    type Output = M;

    fn kind(&self) -> Kind {
        Kind::Object
    }

    fn validate(&self, value: &Value) -> Result<M, ValidationError> {
        M::from_value(value)
    }
}
