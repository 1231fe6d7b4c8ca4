//! The canonical schema container and the terminal-specific escape hatch.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::types::{
    BehaviorConfig, ColorScheme, CursorConfig, FontConfig, KeyBinding, PaneConfig,
    TabConfig, WindowConfig,
};

/// Interchange format version written into exported canonical files.
pub const SCHEMA_VERSION: &str = "1.0";

/// A setting with no canonical home, preserved for same-terminal
/// round-trips.
///
/// Entries are keyed by the owning terminal: exporting to the same
/// terminal replays them, exporting anywhere else drops them with a
/// diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalSpecificSetting {
    /// Owning terminal identifier (e.g. `wezterm`).
    pub terminal: String,
    /// Native key or synthetic path (e.g. `module:line 12`).
    pub key: String,
    /// Structured value, as close to the native value as representable.
    pub value: serde_json::Value,
    /// Exact original source text, when the value alone cannot
    /// reconstruct it (verbatim script fragments).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

/// The terminal-agnostic intermediate settings tree.
///
/// Created per conversion, owned exclusively by the conversion call,
/// discarded after export. Holds no external resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Interchange format version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Terminal this schema was parsed from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_terminal: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<ColorScheme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<FontConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<CursorConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<BehaviorConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tabs: Option<TabConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panes: Option<PaneConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_bindings: Vec<KeyBinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub terminal_specific: Vec<TerminalSpecificSetting>,
}

fn default_version() -> String {
    SCHEMA_VERSION.to_string()
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            version: default_version(),
            source_terminal: None,
            color_scheme: None,
            font: None,
            cursor: None,
            window: None,
            behavior: None,
            tabs: None,
            panes: None,
            key_bindings: Vec::new(),
            terminal_specific: Vec::new(),
        }
    }
}

impl Schema {
    /// Fresh schema tagged with the terminal it is being parsed from.
    pub fn for_source(terminal: &str) -> Self {
        Self {
            source_terminal: Some(terminal.to_string()),
            ..Self::default()
        }
    }

    /// Append a setting to the terminal-specific bucket.
    pub fn add_terminal_specific(
        &mut self,
        terminal: &str,
        key: impl Into<String>,
        value: serde_json::Value,
        raw: Option<String>,
    ) {
        self.terminal_specific.push(TerminalSpecificSetting {
            terminal: terminal.to_string(),
            key: key.into(),
            value,
            raw,
        });
    }

    /// All bucket entries owned by `terminal`, in insertion order.
    pub fn terminal_specific_for<'a>(
        &'a self,
        terminal: &'a str,
    ) -> impl Iterator<Item = &'a TerminalSpecificSetting> {
        self.terminal_specific
            .iter()
            .filter(move |setting| setting.terminal == terminal)
    }

    /// Bucket entries NOT owned by `terminal` — the ones an export to
    /// `terminal` must drop.
    pub fn foreign_terminal_specific<'a>(
        &'a self,
        terminal: &'a str,
    ) -> impl Iterator<Item = &'a TerminalSpecificSetting> {
        self.terminal_specific
            .iter()
            .filter(move |setting| setting.terminal != terminal)
    }

    /// Re-check every section's range constraints. Used after
    /// deserializing an interchange file, where checked setters were
    /// bypassed.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if let Some(font) = &self.font {
            font.validate()?;
        }
        if let Some(window) = &self.window {
            window.validate()?;
        }
        if let Some(panes) = &self.panes {
            panes.validate()?;
        }
        for binding in &self.key_bindings {
            binding.validate()?;
        }
        Ok(())
    }

    /// Structural merge: apply `other` over `self`, field by field.
    /// Populated leaves win; sequences and maps are replaced wholesale,
    /// never concatenated.
    pub fn merge_from(&mut self, other: &Schema) {
        if other.source_terminal.is_some() {
            self.source_terminal = other.source_terminal.clone();
        }
        merge_section(&mut self.color_scheme, &other.color_scheme, ColorScheme::merge_from);
        merge_section(&mut self.font, &other.font, FontConfig::merge_from);
        merge_section(&mut self.cursor, &other.cursor, CursorConfig::merge_from);
        merge_section(&mut self.window, &other.window, WindowConfig::merge_from);
        merge_section(&mut self.behavior, &other.behavior, BehaviorConfig::merge_from);
        merge_section(&mut self.tabs, &other.tabs, TabConfig::merge_from);
        merge_section(&mut self.panes, &other.panes, PaneConfig::merge_from);
        if !other.key_bindings.is_empty() {
            self.key_bindings = other.key_bindings.clone();
        }
        if !other.terminal_specific.is_empty() {
            self.terminal_specific = other.terminal_specific.clone();
        }
    }
}

fn merge_section<T: Clone>(base: &mut Option<T>, other: &Option<T>, merge: fn(&mut T, &T)) {
    match (base.as_mut(), other) {
        (Some(base), Some(other)) => merge(base, other),
        (None, Some(other)) => *base = Some(other.clone()),
        _ => {}
    }
}
