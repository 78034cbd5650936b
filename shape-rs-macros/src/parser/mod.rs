//! Parser module for extracting model information from the Rust AST.
//!
//! This module contains parsers for:
//! - Struct definitions
//! - Field types
//! - Attributes

pub mod attributes;
pub mod struct_parser;
pub mod type_parser;

#[cfg(feature = "serde-compat")]
pub mod serde_compat;
