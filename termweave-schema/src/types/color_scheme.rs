//! Terminal color scheme: semantic colors plus the 16 ANSI slots.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Terminal color scheme with 16 ANSI colors plus semantic colors.
///
/// Invariant: every populated field is a fully resolved RGB triplet —
/// adapters normalize native literals before assignment, never store them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorScheme {
    /// Optional scheme name (e.g. a named builtin scheme reference).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,

    /// Cursor block color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Color>,
    /// Text color under the cursor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_text: Option<Color>,

    /// Selection highlight color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Color>,
    /// Selected text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_text: Option<Color>,

    // ANSI colors 0-7 (normal)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub black: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yellow: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magenta: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cyan: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white: Option<Color>,

    // ANSI colors 8-15 (bright)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bright_black: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bright_red: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bright_green: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bright_yellow: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bright_blue: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bright_magenta: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bright_cyan: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bright_white: Option<Color>,
}

impl ColorScheme {
    /// Get an ANSI color by index (0-15).
    pub fn ansi_color(&self, index: u8) -> Option<Color> {
        match index {
            0 => self.black,
            1 => self.red,
            2 => self.green,
            3 => self.yellow,
            4 => self.blue,
            5 => self.magenta,
            6 => self.cyan,
            7 => self.white,
            8 => self.bright_black,
            9 => self.bright_red,
            10 => self.bright_green,
            11 => self.bright_yellow,
            12 => self.bright_blue,
            13 => self.bright_magenta,
            14 => self.bright_cyan,
            15 => self.bright_white,
            _ => None,
        }
    }

    /// Set an ANSI color by index (0-15). Out-of-range indexes are ignored.
    pub fn set_ansi_color(&mut self, index: u8, color: Color) {
        let slot = match index {
            0 => &mut self.black,
            1 => &mut self.red,
            2 => &mut self.green,
            3 => &mut self.yellow,
            4 => &mut self.blue,
            5 => &mut self.magenta,
            6 => &mut self.cyan,
            7 => &mut self.white,
            8 => &mut self.bright_black,
            9 => &mut self.bright_red,
            10 => &mut self.bright_green,
            11 => &mut self.bright_yellow,
            12 => &mut self.bright_blue,
            13 => &mut self.bright_magenta,
            14 => &mut self.bright_cyan,
            15 => &mut self.bright_white,
            _ => return,
        };
        *slot = Some(color);
    }

    /// True when no field is populated.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply `other` over `self`: populated fields win.
    pub fn merge_from(&mut self, other: &Self) {
        crate::merge_opt!(
            self,
            other,
            name,
            foreground,
            background,
            cursor,
            cursor_text,
            selection,
            selection_text,
            black,
            red,
            green,
            yellow,
            blue,
            magenta,
            cyan,
            white,
            bright_black,
            bright_red,
            bright_green,
            bright_yellow,
            bright_blue,
            bright_magenta,
            bright_cyan,
            bright_white,
        );
    }
}
