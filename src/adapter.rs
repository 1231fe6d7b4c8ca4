//! The adapter contract every terminal format satisfies, and the
//! registry that owns the built-in adapters.

use termweave_lua::LuaError;
use termweave_schema::{Diagnostics, Schema, SchemaError};
use thiserror::Error;

/// Fatal conversion failures. Anything recoverable is a diagnostic, not
/// an error: a field that fails validation is left unset, an unknown
/// setting goes to the terminal-specific bucket.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// No adapter registered under the requested name.
    #[error("unknown terminal `{0}`")]
    UnknownTerminal(String),

    /// Structurally unparseable source text.
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// Canonical interchange text that fails schema validation.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Interchange codec failure.
    #[error("interchange codec error: {0}")]
    Codec(String),
}

impl ConvertError {
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        ConvertError::Syntax {
            line,
            message: message.into(),
        }
    }
}

impl From<LuaError> for ConvertError {
    fn from(err: LuaError) -> Self {
        match err {
            LuaError::Syntax { line, message } => ConvertError::Syntax { line, message },
            // Unresolved references are recovered during evaluation; one
            // surfacing here means the script never parsed at all.
            LuaError::UnresolvedReference(name) => ConvertError::Syntax {
                line: 0,
                message: format!("unresolved reference `{name}`"),
            },
        }
    }
}

/// Result of parsing native configuration text.
#[derive(Debug)]
pub struct ParseOutcome {
    pub schema: Schema,
    pub diagnostics: Diagnostics,
}

/// Result of exporting a schema to native configuration text.
#[derive(Debug)]
pub struct ExportOutcome {
    pub text: String,
    pub diagnostics: Diagnostics,
}

/// One terminal's configuration format.
///
/// `parse` never mutates its input and never fails on individual bad
/// settings: those recover into diagnostics or the terminal-specific
/// bucket. `export` is deterministic and never silently drops a populated
/// canonical field; it either maps the field or records a diagnostic.
pub trait TerminalAdapter: Send + Sync + std::fmt::Debug {
    /// Registry identifier, lowercase (`wezterm`).
    fn name(&self) -> &'static str;

    /// Human-readable name (`WezTerm`).
    fn display_name(&self) -> &'static str;

    fn parse(&self, source: &str) -> Result<ParseOutcome, ConvertError>;

    fn export(&self, schema: &Schema) -> Result<ExportOutcome, ConvertError>;
}

/// Immutable collection of adapters, built once.
pub struct Registry {
    adapters: Vec<Box<dyn TerminalAdapter>>,
}

impl Registry {
    /// Registry with every built-in adapter.
    pub fn builtin() -> Self {
        Self {
            adapters: vec![
                Box::new(crate::terminals::WeztermAdapter),
                Box::new(crate::terminals::KittyAdapter),
                Box::new(crate::terminals::AlacrittyAdapter),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Result<&dyn TerminalAdapter, ConvertError> {
        self.adapters
            .iter()
            .find(|adapter| adapter.name() == name)
            .map(|adapter| adapter.as_ref())
            .ok_or_else(|| ConvertError::UnknownTerminal(name.to_string()))
    }

    /// Registered adapter names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            self.adapters.iter().map(|adapter| adapter.name()).collect();
        names.sort_unstable();
        names
    }
}
