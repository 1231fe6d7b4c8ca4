//! Non-fatal warning collection for a single conversion.

use serde::{Deserialize, Serialize};

/// Ordered, append-only list of warnings produced while parsing or
/// exporting a configuration. Recording a diagnostic never fails the
/// conversion; fatal problems are errors, not diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning. Also mirrored to the `log` facade so embedding
    /// applications see conversion issues without inspecting the result.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{message}");
        self.warnings.push(message);
    }

    /// Absorb all warnings from another collector, preserving order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.warnings.extend(other.warnings);
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.warnings.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.warnings
    }

    pub fn into_vec(self) -> Vec<String> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_order_preserved() {
        let mut diags = Diagnostics::new();
        diags.warn("first");
        diags.warn("second");
        let mut more = Diagnostics::new();
        more.warn("third");
        diags.extend(more);
        assert_eq!(diags.as_slice(), ["first", "second", "third"]);
    }

    #[test]
    fn test_empty() {
        let diags = Diagnostics::new();
        assert!(diags.is_empty());
        assert_eq!(diags.len(), 0);
    }
}
