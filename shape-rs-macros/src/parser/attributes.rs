//! Attribute parsing using darling for ergonomic derive macro attributes.
//!
//! This module defines the attribute structures for `#[shape(...)]` attributes
//! on the model struct and its fields.

use darling::{FromDeriveInput, FromField, FromMeta};
use syn::ext::IdentExt;
use syn::{Generics, Ident, Lit, Type};

/// Container-level attributes parsed from `#[shape(...)]` on the struct.
#[derive(Debug, Clone, FromDeriveInput)]
#[darling(attributes(shape))]
pub struct ContainerAttrs {
    /// The identifier of the type
    pub ident: Ident,

    /// Generic parameters of the type
    pub generics: Generics,

    /// Model name used in diagnostics
    #[darling(default)]
    pub rename: Option<String>,

    /// Rename all keys using a case convention
    #[darling(default)]
    pub rename_all: Option<RenameRule>,
}

impl ContainerAttrs {
    /// Get the model name (renamed or original).
    pub fn model_name(&self) -> String {
        self.rename
            .clone()
            .unwrap_or_else(|| self.ident.unraw().to_string())
    }
}

/// Field-level attributes parsed from `#[shape(...)]` on struct fields.
#[derive(Debug, Clone, FromField)]
#[darling(attributes(shape))]
pub struct FieldAttrs {
    /// Field identifier (None for tuple struct fields)
    pub ident: Option<Ident>,

    /// Field type
    pub ty: Type,

    /// Key used in the JSON object
    #[darling(default)]
    pub rename: Option<String>,

    /// Leave the field out of the schema
    #[darling(default)]
    pub skip: bool,

    /// Key may be absent; the field is then `Default::default()`
    #[darling(default)]
    pub default: bool,

    /// Accept only this literal
    #[darling(default)]
    pub literal: Option<Lit>,

    /// Validator expression overriding the one derived from the type
    #[darling(default)]
    pub with: Option<String>,
}

impl FieldAttrs {
    /// Get the key for this field (renamed or original).
    pub fn key(&self, rename_rule: Option<RenameRule>) -> String {
        // Explicit rename takes precedence
        if let Some(ref name) = self.rename {
            return name.clone();
        }

        match &self.ident {
            Some(ident) => {
                let name = ident.unraw().to_string();
                match rename_rule {
                    Some(rule) => rule.apply(&name),
                    None => name,
                }
            }
            None => String::new(),
        }
    }
}

/// Rename rule for key transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromMeta)]
pub enum RenameRule {
    /// camelCase
    #[darling(rename = "camelCase")]
    CamelCase,

    /// snake_case
    #[darling(rename = "snake_case")]
    SnakeCase,

    /// PascalCase
    #[darling(rename = "PascalCase")]
    PascalCase,

    /// SCREAMING_SNAKE_CASE
    #[darling(rename = "SCREAMING_SNAKE_CASE")]
    ScreamingSnakeCase,

    /// kebab-case
    #[darling(rename = "kebab-case")]
    KebabCase,
}

impl RenameRule {
    /// Parse a rule from its serde spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "camelCase" => Some(Self::CamelCase),
            "snake_case" => Some(Self::SnakeCase),
            "PascalCase" => Some(Self::PascalCase),
            "SCREAMING_SNAKE_CASE" => Some(Self::ScreamingSnakeCase),
            "kebab-case" => Some(Self::KebabCase),
            _ => None,
        }
    }

    /// Apply the rename rule to a string.
    pub fn apply(&self, name: &str) -> String {
        use convert_case::{Case, Casing};

        match self {
            RenameRule::CamelCase => name.to_case(Case::Camel),
            RenameRule::SnakeCase => name.to_case(Case::Snake),
            RenameRule::PascalCase => name.to_case(Case::Pascal),
            RenameRule::ScreamingSnakeCase => name.to_case(Case::UpperSnake),
            RenameRule::KebabCase => name.to_case(Case::Kebab),
        }
    }
}
