//! Field type inspection.
//!
//! A model field's declared type decides two things: whether the key may be
//! absent (`Option<T>`), and the type the field's validator must produce
//! (`T` for `Option<T>`, the declared type otherwise). Anything that cannot be
//! an owned value built from JSON is rejected here.

use syn::{GenericArgument, PathArguments, Type, TypePath};

/// Error type for type parsing failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Missing generic parameter for {0}")]
    MissingGeneric(String),
}

/// A field type split into its optionality and value type.
#[derive(Debug, Clone)]
pub struct ParsedType {
    /// Type the field's validator produces.
    pub value: Type,
    /// Whether the field was declared `Option<value>`.
    pub is_option: bool,
}

pub struct TypeParser;

impl TypeParser {
    pub fn parse(ty: &Type) -> Result<ParsedType, ParseError> {
        let ty = Self::ungroup(ty);
        Self::check_owned(ty)?;

        match Self::option_inner(ty)? {
            Some(inner) => {
                let inner = Self::ungroup(inner);
                Self::check_owned(inner)?;
                Ok(ParsedType {
                    value: inner.clone(),
                    is_option: true,
                })
            }
            None => Ok(ParsedType {
                value: ty.clone(),
                is_option: false,
            }),
        }
    }

    /// Strip invisible groups and parentheses.
    fn ungroup(ty: &Type) -> &Type {
        match ty {
            Type::Group(group) => Self::ungroup(&group.elem),
            Type::Paren(paren) => Self::ungroup(&paren.elem),
            other => other,
        }
    }

    fn check_owned(ty: &Type) -> Result<(), ParseError> {
        match ty {
            Type::Path(_) | Type::Tuple(_) | Type::Array(_) => Ok(()),
            Type::Reference(_) => Err(ParseError::UnsupportedType("References".into())),
            Type::Slice(_) => Err(ParseError::UnsupportedType("Slices".into())),
            Type::Ptr(_) => Err(ParseError::UnsupportedType("Raw pointers".into())),
            Type::BareFn(_) => Err(ParseError::UnsupportedType("Function pointers".into())),
            Type::TraitObject(_) => Err(ParseError::UnsupportedType("Trait objects".into())),
            Type::ImplTrait(_) => Err(ParseError::UnsupportedType("impl Trait".into())),
            Type::Infer(_) => Err(ParseError::UnsupportedType("Inferred types (_)".into())),
            Type::Never(_) => Err(ParseError::UnsupportedType("The never type".into())),
            Type::Macro(_) => Err(ParseError::UnsupportedType("Macro types".into())),
            _ => Err(ParseError::UnsupportedType("Unrecognized type syntax".into())),
        }
    }

    /// `Some(T)` when `ty` is `Option<T>` (bare, `std::option::` or
    /// `core::option::` qualified).
    fn option_inner(ty: &Type) -> Result<Option<&Type>, ParseError> {
        let Type::Path(TypePath { qself: None, path }) = ty else {
            return Ok(None);
        };

        let Some(last) = path.segments.last() else {
            return Ok(None);
        };
        if last.ident != "Option" {
            return Ok(None);
        }

        let prefix: Vec<String> = path
            .segments
            .iter()
            .take(path.segments.len() - 1)
            .map(|segment| segment.ident.to_string())
            .collect();
        let is_std_option = matches!(
            prefix.iter().map(String::as_str).collect::<Vec<_>>().as_slice(),
            [] | ["std", "option"] | ["core", "option"]
        );
        if !is_std_option {
            return Ok(None);
        }

        match &last.arguments {
            PathArguments::AngleBracketed(args) => args
                .args
                .iter()
                .find_map(|arg| match arg {
                    GenericArgument::Type(inner) => Some(inner),
                    _ => None,
                })
                .map(Some)
                .ok_or_else(|| ParseError::MissingGeneric("Option".into())),
            _ => Err(ParseError::MissingGeneric("Option".into())),
        }
    }
}
