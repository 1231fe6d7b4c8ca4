//! Error types for the scripting-dialect engine.

use thiserror::Error;

/// Errors raised while processing a configuration script.
///
/// Only [`LuaError::Syntax`] is fatal to a parse. Unresolved references
/// are recovered by capturing the offending statement verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LuaError {
    /// Structurally broken source: unterminated string or block comment,
    /// unbalanced delimiters at end of input.
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// A reference to an identifier with no binding in the module scope.
    #[error("unresolved reference `{0}`")]
    UnresolvedReference(String),
}

impl LuaError {
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        LuaError::Syntax {
            line,
            message: message.into(),
        }
    }
}
