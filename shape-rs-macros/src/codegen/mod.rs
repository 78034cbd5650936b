//! Code generation for derived models.

pub mod impl_block;
