//! Serde attribute compatibility.
//!
//! With the `serde-compat` feature enabled, `#[derive(Model)]` reads the
//! serde attributes that change a struct's JSON shape (`rename`,
//! `rename_all`, `skip`, `default`) so a type deriving both keeps one
//! contract. `#[shape(...)]` attributes take precedence when both are present.

use syn::meta::ParseNestedMeta;
use syn::Attribute;

use crate::parser::attributes::RenameRule;

/// Serde container attributes extracted from `#[serde(...)]`.
#[derive(Debug, Clone, Default)]
pub struct SerdeContainerAttrs {
    /// Rename all fields using a case convention
    pub rename_all: Option<RenameRule>,
}

impl SerdeContainerAttrs {
    /// Parse serde attributes from a list of attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> Self {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("serde") {
                continue;
            }

            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    if let Some(value) = parse_string_value(&meta)? {
                        result.rename_all = RenameRule::from_name(&value);
                    }
                } else {
                    skip_value(&meta)?;
                }
                Ok(())
            });
        }

        result
    }
}

/// Serde field attributes extracted from `#[serde(...)]`.
#[derive(Debug, Clone, Default)]
pub struct SerdeFieldAttrs {
    /// Rename this field
    pub rename: Option<String>,

    /// Skip this field
    pub skip: bool,

    /// Skip deserializing this field
    pub skip_deserializing: bool,

    /// Field has a default value
    pub default: bool,

    /// Function named by `default = "path"`
    pub default_path: Option<String>,
}

impl SerdeFieldAttrs {
    /// Parse serde attributes from a list of attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> Self {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("serde") {
                continue;
            }

            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if let Some(value) = parse_string_value(&meta)? {
                        result.rename = Some(value);
                    }
                } else if meta.path.is_ident("skip") {
                    result.skip = true;
                } else if meta.path.is_ident("skip_deserializing") {
                    result.skip_deserializing = true;
                } else if meta.path.is_ident("default") {
                    result.default = true;
                    if meta.input.peek(syn::Token![=]) {
                        result.default_path = parse_string_value(&meta)?;
                    }
                } else {
                    skip_value(&meta)?;
                }
                Ok(())
            });
        }

        result
    }

    /// A field serde never reads from input is not part of the schema.
    pub fn should_skip(&self) -> bool {
        self.skip || self.skip_deserializing
    }
}

/// Parse a string value from a meta item like `rename = "value"`.
///
/// The `rename(serialize = "..", deserialize = "..")` form yields the
/// deserialize name.
fn parse_string_value(meta: &ParseNestedMeta) -> syn::Result<Option<String>> {
    if meta.input.peek(syn::token::Paren) {
        let mut deserialize = None;
        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("deserialize") {
                deserialize = parse_string_value(&inner)?;
            } else {
                skip_value(&inner)?;
            }
            Ok(())
        })?;
        return Ok(deserialize);
    }

    let value: syn::LitStr = meta.value()?.parse()?;
    Ok(Some(value.value()))
}

/// Consume the value of an attribute we do not interpret, so the remaining
/// items of the same attribute are still read.
fn skip_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| skip_value(&inner))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_container_rename_all() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(rename_all = "camelCase")])];
        let result = SerdeContainerAttrs::from_attrs(&attrs);
        assert_eq!(result.rename_all, Some(RenameRule::CamelCase));
    }

    #[test]
    fn test_container_ignores_other_items() {
        let attrs: Vec<Attribute> = vec![parse_quote!(
            #[serde(deny_unknown_fields, rename_all = "kebab-case")]
        )];
        let result = SerdeContainerAttrs::from_attrs(&attrs);
        assert_eq!(result.rename_all, Some(RenameRule::KebabCase));
    }

    #[test]
    fn test_field_rename() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(rename = "userId")])];
        let result = SerdeFieldAttrs::from_attrs(&attrs);
        assert_eq!(result.rename, Some("userId".to_string()));
    }

    #[test]
    fn test_field_rename_deserialize_form() {
        let attrs: Vec<Attribute> = vec![parse_quote!(
            #[serde(rename(serialize = "out", deserialize = "in"))]
        )];
        let result = SerdeFieldAttrs::from_attrs(&attrs);
        assert_eq!(result.rename, Some("in".to_string()));
    }

    #[test]
    fn test_field_skip() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(skip)])];
        assert!(SerdeFieldAttrs::from_attrs(&attrs).should_skip());

        let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(skip_deserializing)])];
        assert!(SerdeFieldAttrs::from_attrs(&attrs).should_skip());

        let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(skip_serializing)])];
        assert!(!SerdeFieldAttrs::from_attrs(&attrs).should_skip());
    }

    #[test]
    fn test_field_default_with_path() {
        let attrs: Vec<Attribute> = vec![parse_quote!(
            #[serde(default = "fallback", rename = "n")]
        )];
        let result = SerdeFieldAttrs::from_attrs(&attrs);
        assert!(result.default);
        assert_eq!(result.default_path, Some("fallback".to_string()));
        assert_eq!(result.rename, Some("n".to_string()));
    }

    #[test]
    fn test_non_serde_attributes_ignored() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[doc = "hello"])];
        let result = SerdeFieldAttrs::from_attrs(&attrs);
        assert!(result.rename.is_none());
        assert!(!result.default);
    }
}
