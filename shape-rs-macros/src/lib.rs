//! # shape-rs-macros
//!
//! Procedural macros binding Rust structs to shape-rs validation schemas.
//!
//! This crate provides the `#[derive(Model)]` macro. It is re-exported by
//! `shape-rs` (feature `derive`), which is where it should be used from.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shape_rs::Model;
//!
//! #[derive(Model)]
//! #[shape(rename_all = "camelCase")]
//! struct Release {
//!     name: String,
//!     build_number: f64,
//!     notes: Option<String>,
//!     #[shape(literal = "stable")]
//!     channel: String,
//! }
//! ```
//!
//! ## Attributes
//!
//! ### Container Attributes (on the struct)
//!
//! - `#[shape(rename = "Name")]` - Model name used in diagnostics
//! - `#[shape(rename_all = "camelCase")]` - Rename all keys (camelCase, snake_case, PascalCase, etc.)
//!
//! ### Field Attributes
//!
//! - `#[shape(rename = "key")]` - Use `key` in the JSON object
//! - `#[shape(skip)]` - Leave out of the schema, fill with `Default::default()`
//! - `#[shape(default)]` - Key may be absent, fill with `Default::default()`
//! - `#[shape(literal = "ff")]` - Accept only this literal (string, number or boolean)
//! - `#[shape(with = "expr")]` - Validate with the given validator expression
//!
//! With the `serde-compat` feature, `#[serde(rename, rename_all, skip,
//! skip_deserializing, default)]` are honoured as well.

use proc_macro::TokenStream;
use syn::DeriveInput;

mod codegen;
mod ir;
mod parser;

use codegen::impl_block::ImplBlockGenerator;
use parser::struct_parser::{StructParseError, StructParser};

/// Derive macro binding a struct to a closed object schema.
///
/// Generates `shape_rs::Model`, `shape_rs::Shaped` and `shape_rs::IntoValue`
/// implementations.
///
/// # Example
///
/// ```rust,ignore
/// use shape_rs::Model;
///
/// #[derive(Model)]
/// struct Ai {
///     name: String,
///     version: f64,
/// }
/// ```
#[proc_macro_derive(Model, attributes(shape, serde))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    match derive_model_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn derive_model_impl(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    let model = StructParser::parse(input).map_err(|e| convert_parse_error(e, input))?;

    let generator = ImplBlockGenerator::new();
    Ok(generator.generate(&model))
}

/// Convert a StructParseError to a syn::Error with proper span information.
fn convert_parse_error(error: StructParseError, input: &DeriveInput) -> syn::Error {
    match &error {
        StructParseError::Generic => syn::Error::new_spanned(&input.generics, error.to_string()),
        _ => syn::Error::new_spanned(&input.ident, error.to_string()),
    }
}
