//! Intermediate representation of a model, between parsing and codegen.

use syn::{Expr, ExprPath, Ident, Lit, Type};

/// A parsed `#[derive(Model)]` struct.
#[derive(Debug, Clone)]
pub struct ModelIR {
    /// Rust identifier of the struct
    pub ident: Ident,
    /// Name reported by `Model::name`
    pub name: String,
    /// Fields in declaration order, skipped ones included
    pub fields: Vec<FieldIR>,
}

impl ModelIR {
    /// Fields that appear in the schema.
    pub fn schema_fields(&self) -> impl Iterator<Item = &FieldIR> {
        self.fields.iter().filter(|field| field.in_schema())
    }
}

#[derive(Debug, Clone)]
pub struct FieldIR {
    pub ident: Ident,
    /// Key in the JSON object
    pub key: String,
    /// Type the field's validator produces
    pub value_ty: Type,
    pub presence: Presence,
    pub source: ValidatorSource,
}

impl FieldIR {
    pub fn in_schema(&self) -> bool {
        !matches!(self.presence, Presence::Skipped(_))
    }

    /// Whether the key may be absent from the input.
    pub fn is_optional(&self) -> bool {
        matches!(self.presence, Presence::Optional | Presence::Defaulted(_))
    }
}

/// How a field is filled when its key is absent.
#[derive(Debug, Clone)]
pub enum Presence {
    /// Absence is a `MissingKey` failure
    Required,
    /// Declared `Option<T>`; absence gives `None`
    Optional,
    /// Absence gives the default (`Default::default()` or the named function)
    Defaulted(Option<ExprPath>),
    /// Not part of the schema; always the default
    Skipped(Option<ExprPath>),
}

/// Where a field's validator comes from.
#[derive(Debug, Clone)]
pub enum ValidatorSource {
    /// `<T as Shaped>::validator()`
    Shaped,
    /// `literal(..)`
    Literal(Lit),
    /// A user-supplied validator expression
    With(Expr),
}
