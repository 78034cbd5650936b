//! Struct parsing logic.
//!
//! Turns a `#[derive(Model)]` input into a [`ModelIR`]. Only structs with
//! named fields and no generic parameters are models; everything else is
//! rejected with an error naming the cause.

use std::collections::HashSet;

use darling::{FromDeriveInput, FromField};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, ExprPath, Fields, Lit};

use crate::ir::{FieldIR, ModelIR, Presence, ValidatorSource};
use crate::parser::attributes::{ContainerAttrs, FieldAttrs, RenameRule};
use crate::parser::type_parser::{ParseError, TypeParser};

#[cfg(feature = "serde-compat")]
use crate::parser::serde_compat::{SerdeContainerAttrs, SerdeFieldAttrs};

/// Error type for struct parsing failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StructParseError {
    #[error("Failed to parse container attributes: {0}")]
    ContainerAttrs(String),

    #[error("Failed to parse field attributes: {0}")]
    FieldAttrs(String),

    #[error("Failed to parse field type: {0}")]
    FieldType(#[from] ParseError),

    #[error("Model can only be derived for structs with named fields, found {0}")]
    NotAStruct(String),

    #[error("Model cannot be derived for generic structs")]
    Generic,

    #[error("Field at index {0} has no identifier")]
    MissingFieldIdent(usize),

    #[error("Two fields map to the key `{0}`")]
    DuplicateKey(String),

    #[error("Field `{0}`: literals must be strings, numbers or booleans")]
    InvalidLiteral(String),

    #[error("Field `{field}`: invalid expression `{source_text}`: {message}")]
    InvalidExpression {
        field: String,
        source_text: String,
        message: String,
    },

    #[error("Field `{field}`: {message}")]
    ConflictingAttrs { field: String, message: String },
}

/// Parses Rust struct definitions into ModelIR.
pub struct StructParser;

impl StructParser {
    /// Parse a DeriveInput into a ModelIR.
    pub fn parse(input: &DeriveInput) -> Result<ModelIR, StructParseError> {
        let container_attrs = ContainerAttrs::from_derive_input(input)
            .map_err(|e| StructParseError::ContainerAttrs(e.to_string()))?;

        // shape takes precedence over serde
        #[cfg(feature = "serde-compat")]
        let effective_rename_all = container_attrs
            .rename_all
            .or(SerdeContainerAttrs::from_attrs(&input.attrs).rename_all);

        #[cfg(not(feature = "serde-compat"))]
        let effective_rename_all = container_attrs.rename_all;

        let data_struct = match &input.data {
            Data::Struct(s) => s,
            Data::Enum(_) => return Err(StructParseError::NotAStruct("enum".to_string())),
            Data::Union(_) => return Err(StructParseError::NotAStruct("union".to_string())),
        };

        let named = match &data_struct.fields {
            Fields::Named(fields) => fields,
            Fields::Unnamed(_) => {
                return Err(StructParseError::NotAStruct("tuple struct".to_string()))
            }
            Fields::Unit => return Err(StructParseError::NotAStruct("unit struct".to_string())),
        };

        if !container_attrs.generics.params.is_empty() {
            return Err(StructParseError::Generic);
        }

        let fields = Self::parse_named_fields(named, effective_rename_all)?;
        Self::check_unique_keys(&fields)?;

        Ok(ModelIR {
            ident: container_attrs.ident.clone(),
            name: container_attrs.model_name(),
            fields,
        })
    }

    fn parse_named_fields(
        fields: &syn::FieldsNamed,
        rename_all: Option<RenameRule>,
    ) -> Result<Vec<FieldIR>, StructParseError> {
        let mut field_irs = Vec::with_capacity(fields.named.len());

        for (index, field) in fields.named.iter().enumerate() {
            let field_attrs = FieldAttrs::from_field(field)
                .map_err(|e| StructParseError::FieldAttrs(e.to_string()))?;

            let ident = field
                .ident
                .clone()
                .ok_or(StructParseError::MissingFieldIdent(index))?;
            let rust_name = ident.unraw().to_string();

            #[cfg(feature = "serde-compat")]
            let serde_field_attrs = SerdeFieldAttrs::from_attrs(&field.attrs);

            #[cfg(feature = "serde-compat")]
            let (should_skip, is_default, default_path, serde_rename) = (
                field_attrs.skip || serde_field_attrs.should_skip(),
                field_attrs.default || serde_field_attrs.default,
                serde_field_attrs.default_path.clone(),
                serde_field_attrs.rename.clone(),
            );

            #[cfg(not(feature = "serde-compat"))]
            let (should_skip, is_default, default_path, serde_rename) = (
                field_attrs.skip,
                field_attrs.default,
                None::<String>,
                None::<String>,
            );

            let default_path = default_path
                .map(|path| parse_expr::<ExprPath>(&rust_name, &path))
                .transpose()?;

            if should_skip {
                if field_attrs.literal.is_some() || field_attrs.with.is_some() {
                    return Err(StructParseError::ConflictingAttrs {
                        field: rust_name,
                        message: "a skipped field cannot declare a validator".to_string(),
                    });
                }

                field_irs.push(FieldIR {
                    ident,
                    key: rust_name,
                    value_ty: field.ty.clone(),
                    presence: Presence::Skipped(default_path),
                    source: ValidatorSource::Shaped,
                });
                continue;
            }

            let parsed = TypeParser::parse(&field.ty)?;

            // Priority: shape rename > serde rename > rename_all rule > original name
            let key = match (&field_attrs.rename, serde_rename) {
                (None, Some(serde_rename)) => serde_rename,
                _ => field_attrs.key(rename_all),
            };

            let source = match (&field_attrs.literal, &field_attrs.with) {
                (Some(_), Some(_)) => {
                    return Err(StructParseError::ConflictingAttrs {
                        field: rust_name,
                        message: "`literal` and `with` cannot be combined".to_string(),
                    })
                }
                (Some(lit), None) => match lit {
                    Lit::Str(_) | Lit::Int(_) | Lit::Float(_) | Lit::Bool(_) => {
                        ValidatorSource::Literal(lit.clone())
                    }
                    _ => return Err(StructParseError::InvalidLiteral(rust_name)),
                },
                (None, Some(expr)) => ValidatorSource::With(parse_expr(&rust_name, expr)?),
                (None, None) => ValidatorSource::Shaped,
            };

            let presence = if parsed.is_option {
                Presence::Optional
            } else if is_default {
                Presence::Defaulted(default_path)
            } else {
                Presence::Required
            };

            field_irs.push(FieldIR {
                ident,
                key,
                value_ty: parsed.value,
                presence,
                source,
            });
        }

        Ok(field_irs)
    }

    fn check_unique_keys(fields: &[FieldIR]) -> Result<(), StructParseError> {
        let mut seen = HashSet::new();
        for field in fields.iter().filter(|field| field.in_schema()) {
            if !seen.insert(field.key.as_str()) {
                return Err(StructParseError::DuplicateKey(field.key.clone()));
            }
        }
        Ok(())
    }
}

/// Parse an attribute string as Rust syntax.
fn parse_expr<T: syn::parse::Parse>(field: &str, text: &str) -> Result<T, StructParseError> {
    syn::parse_str(text).map_err(|e| StructParseError::InvalidExpression {
        field: field.to_string(),
        source_text: text.to_string(),
        message: e.to_string(),
    })
}
