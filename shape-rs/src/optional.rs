//! The optional marker.
//!
//! [`Optional`] is a transparent wrapper: invoked directly it enforces the
//! wrapped validator strictly (it does not turn `null` into a valid value).
//! Its only effect is [`Validator::is_optional`], which an enclosing object
//! consults to let the field be absent.

use serde_json::Value;

use crate::error::ValidationError;
use crate::kind::Kind;
use crate::validator::Validator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Optional<V> {
    inner: V,
}

impl<V: Validator> Optional<V> {
    pub fn new(inner: V) -> Self {
        Self { inner }
    }

    /// The wrapped validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn into_inner(self) -> V {
        self.inner
    }
}

pub fn optional<V: Validator>(inner: V) -> Optional<V> {
    Optional::new(inner)
}

impl<V: Validator> Validator for Optional<V> {
    type Output = V::Output;

    fn kind(&self) -> Kind {
        Kind::Optional
    }

    fn validate(&self, value: &Value) -> Result<V::Output, ValidationError> {
        self.inner.validate(value)
    }

    fn is_optional(&self) -> bool {
        true
    }
}
