//! Typed error variants for the termweave-schema crate.
//!
//! Field-level validation failures are recoverable by design: adapters leave
//! the offending field unset and record a diagnostic instead of aborting the
//! whole conversion.

use thiserror::Error;

/// A canonical field rejected a value at construction time.
///
/// The `field` names the schema location (e.g. `window.opacity`) and
/// `message` states the violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed for `{field}`: {message}")]
pub struct SchemaError {
    /// Dotted schema path of the rejected field.
    pub field: &'static str,
    /// Human-readable description of the violated constraint.
    pub message: String,
}

impl SchemaError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A color literal matched none of the known grammars.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color format: `{0}`")]
pub struct InvalidColorFormat(pub String);
