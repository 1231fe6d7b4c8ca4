//! Canonical configuration schema for termweave.
//!
//! This crate provides the terminal-agnostic intermediate representation
//! used when converting configurations between terminal emulators. It
//! includes:
//!
//! - The canonical schema sections (colors, font, cursor, window,
//!   behavior, keybindings, tabs/panes)
//! - Color literal normalization to fixed 8-bit RGB
//! - The terminal-specific escape hatch for settings with no canonical
//!   home
//! - The per-conversion diagnostics collector
//!
//! The schema is pure data: validation on construction, structural merge,
//! serde serialization — no I/O, no shared state.

/// Apply populated `Option` fields of `$src` over `$dst`, one field name
/// per argument. Used by every section's `merge_from`.
macro_rules! merge_opt {
    ($dst:expr, $src:expr, $($field:ident),+ $(,)?) => {
        $( if $src.$field.is_some() { $dst.$field = $src.$field.clone(); } )+
    };
}
pub(crate) use merge_opt;

pub mod color;
pub mod diagnostics;
pub mod error;
pub mod schema;
mod types;

// Re-export main types for convenience
pub use color::{Color, ParsedColor, normalize};
pub use diagnostics::Diagnostics;
pub use error::{InvalidColorFormat, SchemaError};
pub use schema::{SCHEMA_VERSION, Schema, TerminalSpecificSetting};
pub use types::{
    BehaviorConfig, BellMode, ColorScheme, CursorConfig, CursorShape, Decorations,
    FontConfig, KeyBinding, Modifier, Padding, PaneConfig, SCROLLBACK_UNLIMITED,
    StartupMode, TabBarPosition, TabBarVisibility, TabConfig, WindowConfig,
};
