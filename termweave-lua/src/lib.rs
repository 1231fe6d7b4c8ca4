//! Restricted scripting-dialect engine for termweave.
//!
//! Terminal configurations written in the wezterm scripting dialect are
//! handled by a tokenizer, a recursive-descent parser, a selective
//! evaluator, and a deterministic generator. Only the configuration
//! subset of the language is evaluated; everything else (control flow,
//! callbacks, unknown calls) is preserved verbatim so a same-terminal
//! round-trip loses nothing.
//!
//! Entry points: [`parse_module`] for source → [`ScriptModule`], and
//! [`ScriptWriter`] for [`ScriptModule`]-shaped data → source.

pub mod emit;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;

pub use emit::{ScriptWriter, format_number, quote, render_value};
pub use error::LuaError;
pub use eval::{ActionSpec, FontSpec, Fragment, ScriptModule, Value, parse_module};
