//! Deterministic script generation.
//!
//! [`ScriptWriter`] renders a configuration module: fixed prologue, one
//! assignment per setting in canonical key order, verbatim fragments, and
//! the `return config` epilogue. Equal input always renders byte-identical
//! output.

use std::fmt::Write as _;

use crate::eval::{ActionSpec, FontSpec, Fragment, Value};

/// Canonical top-level key order for generated scripts. Keys not listed
/// here sort after the known set, in insertion order.
const KEY_ORDER: &[&str] = &[
    "color_scheme",
    "colors",
    "font",
    "font_size",
    "line_height",
    "harfbuzz_features",
    "default_cursor_style",
    "cursor_blink_rate",
    "initial_cols",
    "initial_rows",
    "window_background_opacity",
    "macos_window_background_blur",
    "window_padding",
    "window_decorations",
    "default_prog",
    "set_environment_variables",
    "scrollback_lines",
    "audible_bell",
    "visual_bell",
    "term",
    "hide_mouse_cursor_when_typing",
    "enable_tab_bar",
    "tab_bar_at_bottom",
    "hide_tab_bar_if_only_one_tab",
    "inactive_pane_hsb",
    "keys",
];

fn key_rank(key: &str) -> usize {
    KEY_ORDER
        .iter()
        .position(|known| *known == key)
        .unwrap_or(KEY_ORDER.len())
}

/// Stable numeric formatting: integral values print without a decimal
/// point, reals with at most six decimals and trailing zeros trimmed.
/// Never scientific notation.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let mut text = format!("{value:.6}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

/// Quote a string for the dialect, escaping as needed.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Render a value as a dialect expression.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Nil => "nil".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::Str(s) => quote(s),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(render_value).collect();
            format!("{{ {} }}", rendered.join(", "))
        }
        Value::Table(entries) => {
            if entries.is_empty() {
                return "{}".to_string();
            }
            let rendered: Vec<String> = entries
                .iter()
                .map(|(key, value)| {
                    if is_identifier(key) {
                        format!("{key} = {}", render_value(value))
                    } else {
                        format!("[{}] = {}", quote(key), render_value(value))
                    }
                })
                .collect();
            format!("{{ {} }}", rendered.join(", "))
        }
        Value::Font(spec) => render_font(spec),
        Value::Action(spec) => render_action(spec),
    }
}

fn render_font(spec: &FontSpec) -> String {
    let mut opts = Vec::new();
    if let Some(weight) = &spec.weight {
        opts.push(format!("weight = {}", quote(weight)));
    }
    if let Some(style) = &spec.style {
        opts.push(format!("style = {}", quote(style)));
    }
    if !spec.features.is_empty() {
        let features: Vec<String> = spec.features.iter().map(|f| quote(f)).collect();
        opts.push(format!("harfbuzz_features = {{ {} }}", features.join(", ")));
    }

    if spec.fallbacks.is_empty() {
        match opts.is_empty() {
            true => format!("wezterm.font({})", quote(&spec.family)),
            false => format!(
                "wezterm.font({}, {{ {} }})",
                quote(&spec.family),
                opts.join(", ")
            ),
        }
    } else {
        let mut families = vec![quote(&spec.family)];
        families.extend(spec.fallbacks.iter().map(|f| quote(f)));
        let list = format!("{{ {} }}", families.join(", "));
        match opts.is_empty() {
            true => format!("wezterm.font_with_fallback({list})"),
            false => format!(
                "wezterm.font_with_fallback({list}, {{ {} }})",
                opts.join(", ")
            ),
        }
    }
}

fn render_action(spec: &ActionSpec) -> String {
    if spec.args.is_empty() {
        return format!("wezterm.action.{}", spec.name);
    }
    let args: Vec<String> = spec.args.iter().map(render_value).collect();
    format!("wezterm.action.{}({})", spec.name, args.join(", "))
}

/// Accumulates settings and fragments, then renders the whole module.
#[derive(Debug, Default)]
pub struct ScriptWriter {
    assignments: Vec<(String, Value)>,
    fragments: Vec<Fragment>,
}

impl ScriptWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `config.<key> = <value>`. Assigning the same key again
    /// replaces the earlier value.
    pub fn assign(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(slot) = self.assignments.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.assignments.push((key, value));
        }
    }

    /// Queue a verbatim fragment, replayed after the generated
    /// assignments in the order queued.
    pub fn fragment(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    pub fn push_fragment_text(&mut self, line: usize, text: impl Into<String>) {
        self.fragments.push(Fragment {
            line,
            text: text.into(),
        });
    }

    /// Render the complete module. Assignments are ordered by the
    /// canonical key table, then insertion order for unknown keys.
    pub fn render(&self) -> String {
        let mut ordered: Vec<(usize, &(String, Value))> =
            self.assignments.iter().enumerate().collect();
        ordered.sort_by_key(|(index, (key, _))| (key_rank(key), *index));

        let mut out = String::new();
        out.push_str("local wezterm = require 'wezterm'\n");
        out.push_str("local config = wezterm.config_builder()\n\n");
        for (_, (key, value)) in &ordered {
            let _ = writeln!(out, "config.{key} = {}", render_value(value));
        }
        if !self.fragments.is_empty() {
            out.push('\n');
            for fragment in &self.fragments {
                out.push_str(&fragment.text);
                out.push('\n');
            }
        }
        out.push_str("\nreturn config\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_formatting() {
        assert_eq!(format_number(14.0), "14");
        assert_eq!(format_number(0.85), "0.85");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.123456789), "0.123457");
        assert_eq!(format_number(1_000_000.0), "1000000");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a\"b\\c\nd"), "\"a\\\"b\\\\c\\nd\"");
    }

    #[test]
    fn test_canonical_key_order() {
        let mut writer = ScriptWriter::new();
        writer.assign("scrollback_lines", Value::Number(10000.0));
        writer.assign("font_size", Value::Number(14.0));
        writer.assign("color_scheme", Value::Str("Tango".into()));
        let out = writer.render();
        let scheme = out.find("config.color_scheme").unwrap();
        let size = out.find("config.font_size").unwrap();
        let scroll = out.find("config.scrollback_lines").unwrap();
        assert!(scheme < size && size < scroll);
    }

    #[test]
    fn test_render_is_deterministic() {
        let build = || {
            let mut writer = ScriptWriter::new();
            writer.assign("font_size", Value::Number(13.0));
            writer.assign(
                "colors",
                Value::Table(vec![("foreground".into(), Value::Str("#c5c8c6".into()))]),
            );
            writer.push_fragment_text(12, "wezterm.on('update-status', status)");
            writer.render()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_fragments_before_return() {
        let mut writer = ScriptWriter::new();
        writer.assign("font_size", Value::Number(12.0));
        writer.push_fragment_text(3, "config.custom_feature(42)");
        let out = writer.render();
        let assign = out.find("config.font_size").unwrap();
        let fragment = out.find("config.custom_feature(42)").unwrap();
        let epilogue = out.find("return config").unwrap();
        assert!(assign < fragment && fragment < epilogue);
    }

    #[test]
    fn test_font_rendering() {
        let mut spec = FontSpec::new("JetBrains Mono");
        spec.weight = Some("Bold".into());
        assert_eq!(
            render_value(&Value::Font(spec)),
            "wezterm.font(\"JetBrains Mono\", { weight = \"Bold\" })"
        );

        let mut spec = FontSpec::new("Fira Code");
        spec.fallbacks = vec!["Noto Color Emoji".into()];
        assert_eq!(
            render_value(&Value::Font(spec)),
            "wezterm.font_with_fallback({ \"Fira Code\", \"Noto Color Emoji\" })"
        );
    }

    #[test]
    fn test_action_rendering() {
        let action = ActionSpec {
            name: "SpawnTab".into(),
            args: vec![Value::Str("CurrentPaneDomain".into())],
        };
        assert_eq!(
            render_value(&Value::Action(action)),
            "wezterm.action.SpawnTab(\"CurrentPaneDomain\")"
        );
        let bare = ActionSpec {
            name: "Paste".into(),
            args: vec![],
        };
        assert_eq!(render_value(&Value::Action(bare)), "wezterm.action.Paste");
    }

    #[test]
    fn test_non_identifier_table_key() {
        let value = Value::Table(vec![("x-y".into(), Value::Number(1.0))]);
        assert_eq!(render_value(&value), "{ [\"x-y\"] = 1 }");
    }
}
