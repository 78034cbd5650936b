//! # shape-rs
//!
//! Runtime validation of untyped JSON values against composable schemas, with
//! the result type of every schema inferred at compile time.
//!
//! ## Overview
//!
//! A schema is an ordinary value built from small validators: primitives
//! (`string`, `number`, `boolean`, `null`), `literal`, the `optional`
//! marker, and the structural combinators `array`, `object`, `tuple` and
//! `one_of`. Every validator is a pure function from a [`serde_json::Value`]
//! to a typed output or a [`ValidationError`] locating the first mismatch.
//!
//! The output type is never written by hand. It follows from the way the
//! schema is composed, through [`Validator::Output`]:
//!
//! ```rust
//! use shape_rs::{array, number, one_of, string, tuple, Union2, Validator};
//! use serde_json::json;
//!
//! let rows = array(tuple((string(), one_of((number(), string())))));
//! let parsed: Vec<(String, Union2<f64, String>)> =
//!     rows.validate(&json!([["a", 1], ["b", "two"]])).unwrap();
//! assert_eq!(parsed[1].1, Union2::Second("two".into()));
//! ```
//!
//! ## Quick Start
//!
//! Records are declared as Rust structs and bound to a closed object schema
//! with `#[derive(Model)]`:
//!
//! ```rust
//! use shape_rs::Model;
//! use serde_json::json;
//!
//! #[derive(Debug, Model)]
//! #[shape(rename_all = "camelCase")]
//! struct Release {
//!     name: String,
//!     build_number: f64,
//!     notes: Option<String>,
//!     #[shape(literal = "stable")]
//!     channel: String,
//! }
//!
//! let release = Release::from_value(&json!({
//!     "name": "core",
//!     "buildNumber": 42,
//!     "channel": "stable",
//! }))
//! .unwrap();
//! assert_eq!(release.build_number, 42.0);
//! assert_eq!(release.notes, None);
//!
//! let err = Release::from_value(&json!({ "name": "core" })).unwrap_err();
//! assert_eq!(err.to_string(), "missing required key `buildNumber`");
//! ```
//!
//! ## Features
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `derive` | Re-export `#[derive(Model)]` | ✅ |
//! | `serde-compat` | Respect serde attributes in the derive | ✅ |
//!
//! ## Validators
//!
//! | Factory | Accepts | Output |
//! |---------|---------|--------|
//! | `string()` | JSON string | `String` |
//! | `number()` | JSON number | `f64` |
//! | `boolean()` | `true` / `false` | `bool` |
//! | `null()` | `null` | `()` |
//! | `literal(x)` | a value equal to `x` | `x`'s owned type |
//! | `optional(v)` | what `v` accepts; may be absent in an object | `v`'s output |
//! | `array(v)` | a sequence of `v` | `Vec<_>` |
//! | `tuple((a, b, ..))` | a sequence of exactly one `a`, one `b`, .. | `(_, _, ..)` |
//! | `one_of((a, b, ..))` | what any member accepts, first match wins | `UnionN<_, _, ..>` |
//! | `object(schema)` | an object with exactly the schema's keys | `Map<String, Value>` |
//! | `model::<M>()` | what `M::from_value` accepts | `M` |
//!
//! No validator coerces: `number()` rejects `"3"`. Objects are closed: a
//! missing required key and an unexpected key are both failures.
//!
//! ## Container Attributes
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `#[shape(rename = "Name")]` | Model name used in diagnostics |
//! | `#[shape(rename_all = "camelCase")]` | Rename all keys using a naming convention |
//!
//! `rename_all` supports `camelCase`, `snake_case`, `PascalCase`,
//! `SCREAMING_SNAKE_CASE` and `kebab-case`.
//!
//! ## Field Attributes
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `#[shape(rename = "key")]` | Use `key` in the JSON object |
//! | `#[shape(skip)]` | Leave out of the schema; filled with `Default::default()` |
//! | `#[shape(default)]` | Optional key; filled with `Default::default()` when absent |
//! | `#[shape(literal = "ff")]` | Accept only this literal |
//! | `#[shape(with = "expr")]` | Validate with the given validator expression |
//!
//! A field of type `Option<T>` is optional and becomes `None` when absent.
//! With `serde-compat`, `#[serde(rename, rename_all, skip, default)]` are
//! honoured too; `shape` attributes take precedence.
//!
//! ## Errors
//!
//! [`ValidationError`] pairs an [`ErrorKind`] with the JSON pointer [`Path`]
//! of the offending value. Unions report every member's failure. The
//! JSON-text entry points ([`ValidatorExt::validate_str`],
//! [`Model::from_json_str`]) return [`DecodeError`], which also covers
//! malformed JSON.
//!
//! ## Logging
//!
//! Failed checks are reported through [`tracing`] at `trace` level and
//! aggregate failures (unions, model construction) at `debug` level. The
//! crate never installs a subscriber.

pub mod array;
pub mod catalog;
pub mod error;
pub mod infer;
pub mod kind;
pub mod literal;
pub mod model;
pub mod object;
pub mod optional;
pub mod primitive;
pub mod shaped;
pub mod tuple;
pub mod union;
pub mod validator;

pub use array::{array, Array};
pub use catalog::Catalog;
pub use error::{DecodeError, ErrorKind, Path, PathSegment, ValidationError};
pub use infer::{IntoValue, Output, MAX_ARITY};
pub use kind::Kind;
pub use literal::{literal, Literal, LiteralValue};
pub use model::{model, Model, ModelValidator};
pub use object::{check_closure, check_presence, expect_object, object, FieldSpec, Object, Schema};
pub use optional::{optional, Optional};
pub use primitive::{
    boolean, null, number, string, BooleanValidator, NullValidator, NumberValidator,
    StringValidator,
};
pub use shaped::Shaped;
pub use tuple::{tuple, Tuple, TupleItems};
pub use union::{
    one_of, OneOf, Union2, Union3, Union4, Union5, Union6, Union7, Union8, UnionMembers,
};
pub use validator::{BoxedValidator, Validator, ValidatorExt};

// Generated code refers to `::shape_rs::serde_json`.
pub use serde_json;

// Re-export derive macro when available
#[cfg(feature = "derive")]
pub use shape_rs_macros::Model;
