//! Canonical configuration section types.
//!
//! Pure data with validation; no behavior beyond range checks and
//! field-by-field merge. Every section is optional inside
//! [`crate::Schema`] and every field inside a section is optional, so a
//! sparse native config maps to a sparse schema.

mod behavior;
mod color_scheme;
mod cursor;
mod font;
mod keybinding;
mod tabs;
mod window;

pub use behavior::{BehaviorConfig, BellMode, SCROLLBACK_UNLIMITED};
pub use color_scheme::ColorScheme;
pub use cursor::{CursorConfig, CursorShape};
pub use font::FontConfig;
pub use keybinding::{KeyBinding, Modifier};
pub use tabs::{PaneConfig, TabBarPosition, TabBarVisibility, TabConfig};
pub use window::{Decorations, Padding, StartupMode, WindowConfig};
