//! termweave: convert terminal emulator configurations between native
//! formats through a canonical schema.
//!
//! Three adapters ship built in (wezterm, kitty, alacritty). Each parses
//! its native format into [`Schema`] and exports a schema back to native
//! text. Settings without a canonical home survive round trips through
//! the schema's terminal-specific bucket, and conversions report dropped
//! or approximated settings as [`Diagnostics`] rather than failing.
//!
//! ```no_run
//! use termweave::{convert, Registry};
//!
//! let registry = Registry::builtin();
//! let outcome = convert(&registry, "kitty", "alacritty", "font_size 13.5\n")?;
//! println!("{}", outcome.text);
//! # Ok::<(), termweave::ConvertError>(())
//! ```

pub mod adapter;
pub mod convert;
pub mod interchange;
pub mod terminals;

pub use adapter::{ConvertError, ExportOutcome, ParseOutcome, Registry, TerminalAdapter};
pub use convert::{ConvertOutcome, convert};

// Canonical schema surface, re-exported so embedders need only this crate.
pub use termweave_schema::{Diagnostics, SCHEMA_VERSION, Schema};
