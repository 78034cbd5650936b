//! Impl block generation for the Model trait.
//!
//! Every derived model gets three impls:
//! - `Model`: name, field table, dynamic schema and the build pass;
//! - `Shaped`: so the model can be a field of another model;
//! - `IntoValue`: so a model instance turns back into the JSON it came from.
//!
//! All paths are absolute (`::shape_rs::..`, `::std::..`) and generated
//! locals carry a `__shape` prefix, so user code in scope cannot interfere.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Lit;

use crate::ir::{FieldIR, ModelIR, Presence, ValidatorSource};

/// Generates the impl blocks for a model.
pub struct ImplBlockGenerator;

impl Default for ImplBlockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ImplBlockGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate every impl block for `model`.
    pub fn generate(&self, model: &ModelIR) -> TokenStream {
        let model_impl = self.generate_model(model);
        let shaped_impl = self.generate_shaped(model);
        let into_value_impl = self.generate_into_value(model);

        quote! {
            #model_impl
            #shaped_impl
            #into_value_impl
        }
    }

    fn generate_model(&self, model: &ModelIR) -> TokenStream {
        let ident = &model.ident;
        let name = &model.name;

        let field_specs: Vec<_> = model
            .schema_fields()
            .map(|field| {
                let key = &field.key;
                if field.is_optional() {
                    quote! { ::shape_rs::FieldSpec::optional(#key) }
                } else {
                    quote! { ::shape_rs::FieldSpec::required(#key) }
                }
            })
            .collect();
        let field_count = field_specs.len();

        let schema_entries: Vec<_> = model
            .schema_fields()
            .map(|field| {
                let key = &field.key;
                let validator = self.validator_expr(field);
                if field.is_optional() {
                    quote! { .field(#key, ::shape_rs::optional(#validator)) }
                } else {
                    quote! { .field(#key, #validator) }
                }
            })
            .collect();

        let from_fields = self.generate_from_fields(model);

        quote! {
            impl ::shape_rs::Model for #ident {
                fn name() -> &'static str {
                    #name
                }

                fn fields() -> &'static [::shape_rs::FieldSpec] {
                    static FIELDS: [::shape_rs::FieldSpec; #field_count] = [#(#field_specs),*];
                    &FIELDS
                }

                fn schema() -> ::shape_rs::Schema {
                    ::shape_rs::Schema::new()
                        #(#schema_entries)*
                }

                #from_fields
            }
        }
    }

    /// The build pass: one slot per schema field, filled while walking the
    /// input in key order, then assembled into the struct.
    fn generate_from_fields(&self, model: &ModelIR) -> TokenStream {
        let slots: Vec<_> = model
            .schema_fields()
            .map(|field| {
                let slot = slot_ident(field);
                let value_ty = &field.value_ty;
                quote! {
                    let mut #slot: ::std::option::Option<#value_ty> = ::std::option::Option::None;
                }
            })
            .collect();

        let arms: Vec<_> = model
            .schema_fields()
            .map(|field| {
                let slot = slot_ident(field);
                let key = &field.key;
                let validator = self.validator_expr(field);
                quote! {
                    #key => {
                        #slot = ::std::option::Option::Some(
                            ::shape_rs::Validator::validate(&#validator, __shape_value)
                                .map_err(|err| err.at_key(__shape_key.as_str()))?,
                        );
                    }
                }
            })
            .collect();

        let assignments: Vec<_> = model
            .fields
            .iter()
            .map(|field| {
                let ident = &field.ident;
                let slot = slot_ident(field);
                let key = &field.key;
                let value = match &field.presence {
                    Presence::Required => quote! {
                        match #slot {
                            ::std::option::Option::Some(value) => value,
                            ::std::option::Option::None => {
                                return ::std::result::Result::Err(
                                    ::shape_rs::ValidationError::missing_key(#key),
                                )
                            }
                        }
                    },
                    Presence::Optional => quote! { #slot },
                    Presence::Defaulted(None) => quote! { #slot.unwrap_or_default() },
                    Presence::Defaulted(Some(path)) => quote! { #slot.unwrap_or_else(#path) },
                    Presence::Skipped(None) => quote! { ::std::default::Default::default() },
                    Presence::Skipped(Some(path)) => quote! { #path() },
                };
                quote! { #ident: #value }
            })
            .collect();

        quote! {
            #[allow(unused_variables, unused_mut, unreachable_code)]
            fn from_fields(
                __shape_map: &::shape_rs::serde_json::Map<
                    ::std::string::String,
                    ::shape_rs::serde_json::Value,
                >,
            ) -> ::std::result::Result<Self, ::shape_rs::ValidationError> {
                #(#slots)*

                for (__shape_key, __shape_value) in __shape_map {
                    match __shape_key.as_str() {
                        #(#arms)*
                        __shape_other => {
                            return ::std::result::Result::Err(
                                ::shape_rs::ValidationError::unknown_key(__shape_other),
                            )
                        }
                    }
                }

                ::std::result::Result::Ok(Self {
                    #(#assignments),*
                })
            }
        }
    }

    fn generate_shaped(&self, model: &ModelIR) -> TokenStream {
        let ident = &model.ident;

        quote! {
            impl ::shape_rs::Shaped for #ident {
                type Validator = ::shape_rs::ModelValidator<Self>;

                fn validator() -> Self::Validator {
                    ::shape_rs::model::<Self>()
                }
            }
        }
    }

    fn generate_into_value(&self, model: &ModelIR) -> TokenStream {
        let ident = &model.ident;

        let inserts: Vec<_> = model
            .schema_fields()
            .map(|field| {
                let member = &field.ident;
                let key = &field.key;
                match field.presence {
                    Presence::Optional => quote! {
                        if let ::std::option::Option::Some(value) = self.#member {
                            __shape_map.insert(
                                ::std::string::String::from(#key),
                                ::shape_rs::IntoValue::into_value(value),
                            );
                        }
                    },
                    _ => quote! {
                        __shape_map.insert(
                            ::std::string::String::from(#key),
                            ::shape_rs::IntoValue::into_value(self.#member),
                        );
                    },
                }
            })
            .collect();

        quote! {
            impl ::shape_rs::IntoValue for #ident {
                fn into_value(self) -> ::shape_rs::serde_json::Value {
                    let mut __shape_map = ::shape_rs::serde_json::Map::new();
                    #(#inserts)*
                    ::shape_rs::serde_json::Value::Object(__shape_map)
                }
            }
        }
    }

    /// The validator expression for a schema field, before any `optional`
    /// wrapping.
    fn validator_expr(&self, field: &FieldIR) -> TokenStream {
        let value_ty = &field.value_ty;

        match &field.source {
            ValidatorSource::Shaped => quote! {
                <#value_ty as ::shape_rs::Shaped>::validator()
            },
            ValidatorSource::Literal(lit @ (Lit::Int(_) | Lit::Float(_))) => quote! {
                ::shape_rs::literal::<#value_ty>(#lit as #value_ty)
            },
            ValidatorSource::Literal(lit) => quote! {
                ::shape_rs::literal(#lit)
            },
            ValidatorSource::With(expr) => quote! { (#expr) },
        }
    }
}

fn slot_ident(field: &FieldIR) -> syn::Ident {
    use syn::ext::IdentExt;
    format_ident!("__shape_field_{}", field.ident.unraw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::struct_parser::StructParser;
    use syn::{parse_quote, DeriveInput};

    fn generate(input: DeriveInput) -> String {
        let model = StructParser::parse(&input).unwrap();
        ImplBlockGenerator::new().generate(&model).to_string()
    }

    #[test]
    fn test_generates_all_impls() {
        let code = generate(parse_quote! {
            struct Ai {
                name: String,
            }
        });

        assert!(code.contains("impl :: shape_rs :: Model for Ai"));
        assert!(code.contains("impl :: shape_rs :: Shaped for Ai"));
        assert!(code.contains("impl :: shape_rs :: IntoValue for Ai"));
        assert!(code.contains("FieldSpec :: required (\"name\")"));
        assert!(code.contains("< String as :: shape_rs :: Shaped > :: validator ()"));
    }

    #[test]
    fn test_optional_fields_are_wrapped() {
        let code = generate(parse_quote! {
            struct Ai {
                note: Option<String>,
                #[shape(default)]
                tags: Vec<String>,
            }
        });

        assert!(code.contains("FieldSpec :: optional (\"note\")"));
        assert!(code.contains("FieldSpec :: optional (\"tags\")"));
        assert!(code.contains(":: shape_rs :: optional (< String as :: shape_rs :: Shaped > :: validator ())"));
        assert!(code.contains("__shape_field_tags . unwrap_or_default ()"));
    }

    #[test]
    fn test_literals() {
        let code = generate(parse_quote! {
            struct Ai {
                #[shape(literal = "ff")]
                kind: String,
                #[shape(literal = 3)]
                level: f64,
            }
        });

        assert!(code.contains(":: shape_rs :: literal (\"ff\")"));
        assert!(code.contains(":: shape_rs :: literal :: < f64 > (3 as f64)"));
    }

    #[test]
    fn test_skipped_field_is_defaulted_only() {
        let code = generate(parse_quote! {
            struct Ai {
                name: String,
                #[shape(skip)]
                cache: Vec<String>,
            }
        });

        assert!(!code.contains("\"cache\""));
        assert!(code.contains("cache : :: std :: default :: Default :: default ()"));
        assert!(code.contains("[:: shape_rs :: FieldSpec ; 1usize]"));
    }

    #[test]
    fn test_raw_identifier_slot() {
        let code = generate(parse_quote! {
            struct Ai {
                r#type: String,
            }
        });

        assert!(code.contains("__shape_field_type"));
        assert!(code.contains("\"type\" =>"));
    }

    #[test]
    fn test_generated_code_parses() {
        let model = StructParser::parse(&parse_quote! {
            struct Ai {
                name: String,
                note: Option<String>,
                #[shape(with = "::shape_rs::array(::shape_rs::number())")]
                scores: Vec<f64>,
            }
        })
        .unwrap();
        let tokens = ImplBlockGenerator::new().generate(&model);
        let file: syn::File = syn::parse2(tokens).unwrap();
        assert_eq!(file.items.len(), 3);
    }
}
