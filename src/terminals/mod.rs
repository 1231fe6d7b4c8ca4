//! Built-in terminal adapters.

mod alacritty;
mod kitty;
mod wezterm;

pub use alacritty::AlacrittyAdapter;
pub use kitty::KittyAdapter;
pub use wezterm::WeztermAdapter;

use termweave_schema::{Color, Diagnostics};

/// Normalize a native color literal, recording a diagnostic instead of
/// failing: a bad literal costs one field, an opaque alpha costs one
/// warning.
pub(crate) fn normalize_color(
    literal: &str,
    field: &str,
    diagnostics: &mut Diagnostics,
) -> Option<Color> {
    match termweave_schema::normalize(literal) {
        Ok(parsed) => {
            if parsed.dropped_alpha() {
                diagnostics.warn(format!(
                    "`{field}`: alpha component of `{literal}` is not representable, dropped"
                ));
            }
            Some(parsed.color)
        }
        Err(err) => {
            diagnostics.warn(format!("`{field}`: {err}"));
            None
        }
    }
}
