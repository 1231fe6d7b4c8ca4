//! WezTerm adapter: the scripting-dialect configuration format.
//!
//! Parsing runs the restricted script engine and maps evaluated settings
//! onto the canonical schema. Settings the engine understood but the
//! schema has no home for go to the terminal-specific bucket as dotted
//! paths; script the engine could not evaluate is kept verbatim under
//! `module:line N` keys. Export regenerates a script deterministically
//! and replays both kinds of bucket entry.

use serde_json::json;
use termweave_lua::{
    ActionSpec, FontSpec, ScriptWriter, Value, parse_module, render_value,
};
use termweave_schema::{
    BellMode, Color, CursorShape, Decorations, Diagnostics, KeyBinding, Modifier,
    SCROLLBACK_UNLIMITED, Schema, StartupMode, TabBarPosition, TabBarVisibility,
};

use crate::adapter::{ConvertError, ExportOutcome, ParseOutcome, TerminalAdapter};
use crate::terminals::normalize_color;

#[derive(Debug)]
pub struct WeztermAdapter;

const NAME: &str = "wezterm";

/// Practical scrollback ceiling used when the schema asks for unlimited.
const MAX_SCROLLBACK: u32 = 1_000_000;

impl TerminalAdapter for WeztermAdapter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn display_name(&self) -> &'static str {
        "WezTerm"
    }

    fn parse(&self, source: &str) -> Result<ParseOutcome, ConvertError> {
        let module = parse_module(source)?;
        let mut schema = Schema::for_source(NAME);
        let mut diagnostics = Diagnostics::new();
        let mut bell = BellState::default();

        for (key, value) in module.settings() {
            map_setting(key, value, &mut schema, &mut diagnostics, &mut bell);
        }
        bell.resolve(&mut schema);

        for fragment in &module.fragments {
            diagnostics.warn(format!(
                "line {}: statement kept verbatim, only replayed when exporting back to wezterm",
                fragment.line
            ));
            schema.add_terminal_specific(
                NAME,
                format!("module:line {}", fragment.line),
                json!(fragment.text),
                Some(fragment.text.clone()),
            );
        }

        Ok(ParseOutcome {
            schema,
            diagnostics,
        })
    }

    fn export(&self, schema: &Schema) -> Result<ExportOutcome, ConvertError> {
        let mut diagnostics = Diagnostics::new();
        let mut writer = ScriptWriter::new();

        export_colors(schema, &mut writer, &mut diagnostics);
        export_font(schema, &mut writer, &mut diagnostics);
        export_cursor(schema, &mut writer);
        export_window(schema, &mut writer, &mut diagnostics);
        export_behavior(schema, &mut writer, &mut diagnostics);
        export_tabs(schema, &mut writer);
        let mut keys = export_keys(schema, &mut diagnostics);

        // Replay bucket entries owned by this terminal.
        let mut raw_keys = Vec::new();
        for setting in schema.terminal_specific_for(NAME) {
            if setting.key.starts_with("font.")
                || setting.key.starts_with("colors.")
                || setting.key.starts_with("inactive_pane_hsb.")
            {
                continue; // folded into the table assignments above
            }
            if setting.key.starts_with("module:") {
                if let Some(raw) = &setting.raw {
                    writer.push_fragment_text(0, raw.clone());
                }
                continue;
            }
            if setting.key == "keys" {
                if let Some(raw) = &setting.raw {
                    raw_keys.push(raw.clone());
                }
                continue;
            }
            writer.assign(setting.key.clone(), json_to_value(&setting.value));
        }
        if !raw_keys.is_empty() && keys.is_none() {
            keys = Some(Vec::new());
        }
        if let Some(keys) = keys {
            writer.assign("keys", Value::Array(keys));
            for raw in raw_keys {
                writer.push_fragment_text(0, format!("table.insert(config.keys, {raw})"));
            }
        }

        Ok(ExportOutcome {
            text: writer.render(),
            diagnostics,
        })
    }
}

// === Parse direction ===

/// Bell settings interact: audible and visual are separate native keys
/// that fold into one canonical mode once both are known.
#[derive(Default)]
struct BellState {
    audible_disabled: Option<bool>,
    visual: bool,
}

impl BellState {
    fn resolve(self, schema: &mut Schema) {
        let mode = match (self.audible_disabled, self.visual) {
            (Some(true), true) | (None, true) => Some(BellMode::Visual),
            (Some(true), false) => Some(BellMode::None),
            (Some(false), _) => Some(BellMode::Audible),
            (None, false) => None,
        };
        if let Some(mode) = mode {
            schema.behavior.get_or_insert_default().bell = Some(mode);
        }
    }
}

fn map_setting(
    key: &str,
    value: &Value,
    schema: &mut Schema,
    diagnostics: &mut Diagnostics,
    bell: &mut BellState,
) {
    match (key, value) {
        ("color_scheme", Value::Str(name)) => {
            schema.color_scheme.get_or_insert_default().name = Some(name.clone());
        }
        ("colors", Value::Table(_)) => map_colors(value, schema, diagnostics),
        ("font", Value::Font(spec)) => map_font(spec, schema, diagnostics),
        ("font_size", Value::Number(size)) => {
            if let Err(err) = schema.font.get_or_insert_default().set_size(*size) {
                diagnostics.warn(err.to_string());
            }
        }
        ("line_height", Value::Number(height)) => {
            if let Err(err) = schema.font.get_or_insert_default().set_line_height(*height) {
                diagnostics.warn(err.to_string());
            }
        }
        ("harfbuzz_features", Value::Array(features)) => {
            let font = schema.font.get_or_insert_default();
            for feature in features {
                match feature.as_str() {
                    Some(tag) => font.features.push(tag.to_string()),
                    None => diagnostics.warn("harfbuzz_features: ignoring non-string entry"),
                }
            }
        }
        ("default_cursor_style", Value::Str(style)) => {
            let cursor = schema.cursor.get_or_insert_default();
            let (shape, blink) = match style.as_str() {
                "SteadyBlock" => (CursorShape::Block, false),
                "BlinkingBlock" => (CursorShape::Block, true),
                "SteadyUnderline" => (CursorShape::Underline, false),
                "BlinkingUnderline" => (CursorShape::Underline, true),
                "SteadyBar" => (CursorShape::Beam, false),
                "BlinkingBar" => (CursorShape::Beam, true),
                other => {
                    diagnostics.warn(format!("unknown cursor style `{other}`"));
                    return;
                }
            };
            cursor.shape = Some(shape);
            cursor.blink = Some(blink);
        }
        ("cursor_blink_rate", Value::Number(rate)) => {
            let cursor = schema.cursor.get_or_insert_default();
            if *rate == 0.0 {
                cursor.blink = Some(false);
            } else if let Err(err) = cursor.set_blink_interval_ms(*rate as i64) {
                diagnostics.warn(err.to_string());
            }
        }
        ("initial_cols", Value::Number(cols)) => {
            if let Err(err) = schema.window.get_or_insert_default().set_columns(*cols as i64)
            {
                diagnostics.warn(err.to_string());
            }
        }
        ("initial_rows", Value::Number(rows)) => {
            if let Err(err) = schema.window.get_or_insert_default().set_rows(*rows as i64) {
                diagnostics.warn(err.to_string());
            }
        }
        ("window_background_opacity", Value::Number(opacity)) => {
            if let Err(err) = schema.window.get_or_insert_default().set_opacity(*opacity) {
                diagnostics.warn(err.to_string());
            }
        }
        ("macos_window_background_blur", Value::Number(radius)) => {
            let window = schema.window.get_or_insert_default();
            if let Err(err) = window.set_blur_radius(*radius as i64) {
                diagnostics.warn(err.to_string());
            } else {
                window.blur = Some(*radius > 0.0);
            }
        }
        ("window_padding", Value::Table(_)) => {
            let edge = |name: &str| value.get(name).and_then(Value::as_number).unwrap_or(0.0);
            if let Err(err) = schema.window.get_or_insert_default().set_padding(
                edge("top") as i64,
                edge("right") as i64,
                edge("bottom") as i64,
                edge("left") as i64,
            ) {
                diagnostics.warn(err.to_string());
            }
        }
        ("window_decorations", Value::Str(mode)) => {
            let decorations = if mode.contains("TITLE") {
                Decorations::Full
            } else if mode.contains("RESIZE") {
                Decorations::Resize
            } else {
                Decorations::None
            };
            schema.window.get_or_insert_default().decorations = Some(decorations);
        }
        ("default_prog", Value::Array(prog)) => {
            let parts: Vec<&str> = prog.iter().filter_map(Value::as_str).collect();
            if parts.len() == prog.len()
                && let Some((shell, args)) = parts.split_first()
            {
                let behavior = schema.behavior.get_or_insert_default();
                behavior.shell = Some(shell.to_string());
                behavior.shell_args = args.iter().map(|a| a.to_string()).collect();
            } else {
                diagnostics.warn("default_prog: expected an array of strings");
            }
        }
        ("set_environment_variables", Value::Table(entries)) => {
            let behavior = schema.behavior.get_or_insert_default();
            for (name, value) in entries {
                match value.as_str() {
                    Some(value) => {
                        behavior.env.insert(name.clone(), value.to_string());
                    }
                    None => diagnostics.warn(format!(
                        "set_environment_variables: ignoring non-string value for `{name}`"
                    )),
                }
            }
        }
        ("scrollback_lines", Value::Number(lines)) => {
            if let Err(err) = schema
                .behavior
                .get_or_insert_default()
                .set_scrollback_lines(*lines as i64)
            {
                diagnostics.warn(err.to_string());
            }
        }
        ("audible_bell", Value::Str(mode)) => {
            bell.audible_disabled = Some(mode == "Disabled");
        }
        ("visual_bell", Value::Table(_)) => {
            bell.visual = true;
        }
        ("term", Value::Str(term)) => {
            schema.behavior.get_or_insert_default().term = Some(term.clone());
        }
        ("hide_mouse_cursor_when_typing", Value::Bool(hide)) => {
            schema.behavior.get_or_insert_default().mouse_hide_while_typing = Some(*hide);
        }
        ("enable_tab_bar", Value::Bool(enabled)) => {
            let tabs = schema.tabs.get_or_insert_default();
            if !enabled {
                tabs.visibility = Some(TabBarVisibility::Never);
            } else if tabs.visibility.is_none() {
                tabs.visibility = Some(TabBarVisibility::Always);
            }
        }
        ("hide_tab_bar_if_only_one_tab", Value::Bool(true)) => {
            schema.tabs.get_or_insert_default().visibility = Some(TabBarVisibility::Auto);
        }
        ("hide_tab_bar_if_only_one_tab", Value::Bool(false)) => {}
        ("tab_bar_at_bottom", Value::Bool(bottom)) => {
            schema.tabs.get_or_insert_default().position = Some(if *bottom {
                TabBarPosition::Bottom
            } else {
                TabBarPosition::Top
            });
        }
        ("inactive_pane_hsb", Value::Table(entries)) => {
            for (subkey, sub) in entries {
                if subkey == "brightness" {
                    if let Some(brightness) = sub.as_number()
                        && let Err(err) = schema
                            .panes
                            .get_or_insert_default()
                            .set_inactive_dim(brightness)
                    {
                        diagnostics.warn(err.to_string());
                    }
                } else {
                    diagnostics.warn(format!(
                        "`inactive_pane_hsb.{subkey}` has no canonical equivalent, only replayed when exporting back to wezterm"
                    ));
                    schema.add_terminal_specific(
                        NAME,
                        format!("inactive_pane_hsb.{subkey}"),
                        value_to_json(sub),
                        None,
                    );
                }
            }
        }
        ("keys", Value::Array(entries)) => map_keys(entries, schema, diagnostics),
        _ => {
            diagnostics.warn(format!(
                "`{key}` has no canonical equivalent, only replayed when exporting back to wezterm"
            ));
            schema.add_terminal_specific(
                NAME,
                key,
                value_to_json(value),
                Some(render_value(value)),
            );
        }
    }
}

fn map_colors(colors: &Value, schema: &mut Schema, diagnostics: &mut Diagnostics) {
    let semantic: &[(&str, fn(&mut termweave_schema::ColorScheme) -> &mut Option<Color>)] = &[
        ("foreground", |s| &mut s.foreground),
        ("background", |s| &mut s.background),
        ("cursor_bg", |s| &mut s.cursor),
        ("cursor_fg", |s| &mut s.cursor_text),
        ("selection_bg", |s| &mut s.selection),
        ("selection_fg", |s| &mut s.selection_text),
    ];
    for (native, slot) in semantic {
        if let Some(literal) = colors.get(native).and_then(Value::as_str)
            && let Some(color) = normalize_color(literal, native, diagnostics)
        {
            *slot(schema.color_scheme.get_or_insert_default()) = Some(color);
        }
    }
    for (native, offset) in [("ansi", 0u8), ("brights", 8u8)] {
        if let Some(Value::Array(palette)) = colors.get(native) {
            for (index, entry) in palette.iter().take(8).enumerate() {
                if let Some(literal) = entry.as_str()
                    && let Some(color) = normalize_color(literal, native, diagnostics)
                {
                    schema
                        .color_scheme
                        .get_or_insert_default()
                        .set_ansi_color(offset + index as u8, color);
                }
            }
        }
    }
    if let Some(literal) = colors.get("split").and_then(Value::as_str)
        && let Some(color) = normalize_color(literal, "split", diagnostics)
    {
        schema.panes.get_or_insert_default().divider_color = Some(color);
    }

    // Subkeys outside the mapped set (tab_bar, indexed, compose_cursor,
    // ...) keep their data through the bucket.
    const MAPPED: [&str; 9] = [
        "foreground",
        "background",
        "cursor_bg",
        "cursor_fg",
        "selection_bg",
        "selection_fg",
        "ansi",
        "brights",
        "split",
    ];
    if let Value::Table(entries) = colors {
        for (subkey, sub) in entries {
            if MAPPED.contains(&subkey.as_str()) {
                continue;
            }
            diagnostics.warn(format!(
                "`colors.{subkey}` has no canonical equivalent, only replayed when exporting back to wezterm"
            ));
            schema.add_terminal_specific(
                NAME,
                format!("colors.{subkey}"),
                value_to_json(sub),
                None,
            );
        }
    }
}

fn map_font(spec: &FontSpec, schema: &mut Schema, diagnostics: &mut Diagnostics) {
    let font = schema.font.get_or_insert_default();
    font.family = Some(spec.family.clone());
    font.features.extend(spec.features.iter().cloned());

    // Variant and fallback data has no canonical home; keep it for the
    // return trip.
    if let Some(weight) = &spec.weight {
        diagnostics.warn("font weight only replayed when exporting back to wezterm");
        schema.add_terminal_specific(NAME, "font.weight", json!(weight), None);
    }
    if let Some(style) = &spec.style {
        diagnostics.warn("font style only replayed when exporting back to wezterm");
        schema.add_terminal_specific(NAME, "font.style", json!(style), None);
    }
    if !spec.fallbacks.is_empty() {
        diagnostics.warn("font fallback list only replayed when exporting back to wezterm");
        schema.add_terminal_specific(NAME, "font.fallbacks", json!(spec.fallbacks), None);
    }
}

fn map_keys(entries: &[Value], schema: &mut Schema, diagnostics: &mut Diagnostics) {
    for entry in entries {
        match canonical_binding(entry) {
            Some(binding) => schema.key_bindings.push(binding),
            None => {
                diagnostics.warn(
                    "key binding not representable canonically, only replayed when exporting back to wezterm",
                );
                schema.add_terminal_specific(
                    NAME,
                    "keys",
                    value_to_json(entry),
                    Some(render_value(entry)),
                );
            }
        }
    }
}

fn canonical_binding(entry: &Value) -> Option<KeyBinding> {
    let key = entry.get("key")?.as_str()?;
    let mods = match entry.get("mods") {
        Some(Value::Str(mods)) => mods
            .split('|')
            .map(|m| m.trim().parse::<Modifier>())
            .collect::<Result<Vec<_>, _>>()
            .ok()?,
        None => Vec::new(),
        Some(_) => return None,
    };
    let Value::Action(action) = entry.get("action")? else {
        return None;
    };
    let (action, param) = canonical_action(action)?;
    KeyBinding::new(key, mods, action, param).ok()
}

fn canonical_action(action: &ActionSpec) -> Option<(String, Option<String>)> {
    let name = match (action.name.as_str(), action.args.as_slice()) {
        ("CopyTo", _) => "copy",
        ("PasteFrom", _) | ("Paste", []) => "paste",
        ("SpawnTab", _) => "new_tab",
        ("CloseCurrentTab", _) => "close_tab",
        ("SpawnWindow", []) => "new_window",
        ("ActivateTabRelative", [Value::Number(n)]) if *n > 0.0 => "next_tab",
        ("ActivateTabRelative", [Value::Number(n)]) if *n < 0.0 => "prev_tab",
        ("IncreaseFontSize", []) => "increase_font_size",
        ("DecreaseFontSize", []) => "decrease_font_size",
        ("ResetFontSize", []) => "reset_font_size",
        ("ToggleFullScreen", []) => "toggle_fullscreen",
        ("ClearScrollback", _) => "clear_scrollback",
        ("SplitHorizontal", _) => "split_horizontal",
        ("SplitVertical", _) => "split_vertical",
        ("SendString", [Value::Str(text)]) => {
            return Some(("send_string".to_string(), Some(text.clone())));
        }
        _ => return None,
    };
    Some((name.to_string(), None))
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Nil => serde_json::Value::Null,
        Value::Bool(b) => json!(b),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|| json!(n.to_string())),
        Value::Str(s) => json!(s),
        Value::Array(items) => {
            serde_json::Value::Array(items.iter().map(value_to_json).collect())
        }
        Value::Table(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
        // Structured builtins round-trip through their rendered form.
        other @ (Value::Font(_) | Value::Action(_)) => json!(render_value(other)),
    }
}

fn json_to_value(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Nil,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(0.0)),
        serde_json::Value::String(s) => Value::Str(s.clone()),
        serde_json::Value::Array(items) => {
            Value::Array(items.iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(entries) => Value::Table(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), json_to_value(v)))
                .collect(),
        ),
    }
}

// === Export direction ===

fn export_colors(schema: &Schema, writer: &mut ScriptWriter, diagnostics: &mut Diagnostics) {
    let mut table: Vec<(String, Value)> = Vec::new();
    if let Some(scheme) = &schema.color_scheme {
        if let Some(name) = &scheme.name {
            writer.assign("color_scheme", Value::Str(name.clone()));
        }
        let semantic = [
            ("foreground", scheme.foreground),
            ("background", scheme.background),
            ("cursor_bg", scheme.cursor),
            ("cursor_fg", scheme.cursor_text),
            ("selection_bg", scheme.selection),
            ("selection_fg", scheme.selection_text),
        ];
        for (native, color) in semantic {
            if let Some(color) = color {
                table.push((native.to_string(), Value::Str(color.to_hex())));
            }
        }
        for (native, offset) in [("ansi", 0u8), ("brights", 8u8)] {
            let palette: Vec<Option<Color>> =
                (0..8).map(|i| scheme.ansi_color(offset + i)).collect();
            if palette.iter().all(Option::is_some) {
                table.push((
                    native.to_string(),
                    Value::Array(
                        palette
                            .into_iter()
                            .flatten()
                            .map(|c| Value::Str(c.to_hex()))
                            .collect(),
                    ),
                ));
            } else if palette.iter().any(Option::is_some) {
                // The native form is a full 8-entry array; a partial
                // palette cannot be expressed without inventing colors.
                diagnostics.warn(format!(
                    "partial `{native}` palette is not representable in wezterm, dropped"
                ));
            }
        }
    }
    if let Some(divider) = schema.panes.as_ref().and_then(|p| p.divider_color) {
        table.push(("split".to_string(), Value::Str(divider.to_hex())));
    }
    for setting in schema.terminal_specific_for(NAME) {
        if let Some(subkey) = setting.key.strip_prefix("colors.") {
            table.push((subkey.to_string(), json_to_value(&setting.value)));
        }
    }
    if !table.is_empty() {
        writer.assign("colors", Value::Table(table));
    }

    let mut hsb: Vec<(String, Value)> = Vec::new();
    if let Some(dim) = schema.panes.as_ref().and_then(|p| p.inactive_dim) {
        hsb.push(("brightness".to_string(), Value::Number(dim)));
    }
    for setting in schema.terminal_specific_for(NAME) {
        if let Some(subkey) = setting.key.strip_prefix("inactive_pane_hsb.") {
            hsb.push((subkey.to_string(), json_to_value(&setting.value)));
        }
    }
    if !hsb.is_empty() {
        writer.assign("inactive_pane_hsb", Value::Table(hsb));
    }
}

fn export_font(schema: &Schema, writer: &mut ScriptWriter, diagnostics: &mut Diagnostics) {
    let Some(font) = &schema.font else {
        return;
    };
    let mut features = font.features.clone();
    if font.ligatures == Some(false) {
        for tag in ["calt=0", "clig=0", "liga=0"] {
            if !features.iter().any(|f| f == tag) {
                features.push(tag.to_string());
            }
        }
    }
    if let Some(family) = &font.family {
        let mut spec = FontSpec::new(family.clone());
        spec.features = features;
        // Variant data captured from an earlier wezterm parse.
        for setting in schema.terminal_specific_for(NAME) {
            match (setting.key.as_str(), &setting.value) {
                ("font.weight", serde_json::Value::String(weight)) => {
                    spec.weight = Some(weight.clone());
                }
                ("font.style", serde_json::Value::String(style)) => {
                    spec.style = Some(style.clone());
                }
                ("font.fallbacks", serde_json::Value::Array(fallbacks)) => {
                    spec.fallbacks = fallbacks
                        .iter()
                        .filter_map(|f| f.as_str().map(str::to_string))
                        .collect();
                }
                _ => {}
            }
        }
        writer.assign("font", Value::Font(spec));
    } else if !features.is_empty() {
        writer.assign(
            "harfbuzz_features",
            Value::Array(features.into_iter().map(Value::Str).collect()),
        );
    }
    if let Some(size) = font.size {
        writer.assign("font_size", Value::Number(size));
    }
    if let Some(height) = font.line_height {
        writer.assign("line_height", Value::Number(height));
    }
    for (field, family) in [
        ("bold", &font.bold_family),
        ("italic", &font.italic_family),
        ("bold italic", &font.bold_italic_family),
    ] {
        if family.is_some() {
            diagnostics.warn(format!(
                "separate {field} font family is not representable in wezterm, dropped"
            ));
        }
    }
}

fn export_cursor(schema: &Schema, writer: &mut ScriptWriter) {
    let Some(cursor) = &schema.cursor else {
        return;
    };
    if let Some(shape) = cursor.shape {
        let blink = cursor.blink.unwrap_or(false);
        let style = match (shape, blink) {
            (CursorShape::Block, false) => "SteadyBlock",
            (CursorShape::Block, true) => "BlinkingBlock",
            (CursorShape::Underline, false) => "SteadyUnderline",
            (CursorShape::Underline, true) => "BlinkingUnderline",
            (CursorShape::Beam, false) => "SteadyBar",
            (CursorShape::Beam, true) => "BlinkingBar",
        };
        writer.assign("default_cursor_style", Value::Str(style.to_string()));
    }
    if let Some(interval) = cursor.blink_interval_ms {
        writer.assign("cursor_blink_rate", Value::Number(interval as f64));
    }
}

fn export_window(schema: &Schema, writer: &mut ScriptWriter, diagnostics: &mut Diagnostics) {
    let Some(window) = &schema.window else {
        return;
    };
    if let Some(columns) = window.columns {
        writer.assign("initial_cols", Value::Number(columns as f64));
    }
    if let Some(rows) = window.rows {
        writer.assign("initial_rows", Value::Number(rows as f64));
    }
    if let Some(opacity) = window.opacity {
        writer.assign("window_background_opacity", Value::Number(opacity));
    }
    match (window.blur, window.blur_radius) {
        (_, Some(radius)) => {
            writer.assign(
                "macos_window_background_blur",
                Value::Number(radius as f64),
            );
        }
        (Some(true), None) => {
            diagnostics.warn("blur enabled without a radius; using 20");
            writer.assign("macos_window_background_blur", Value::Number(20.0));
        }
        _ => {}
    }
    if let Some(padding) = window.padding {
        writer.assign(
            "window_padding",
            Value::Table(vec![
                ("left".to_string(), Value::Number(padding.left as f64)),
                ("right".to_string(), Value::Number(padding.right as f64)),
                ("top".to_string(), Value::Number(padding.top as f64)),
                ("bottom".to_string(), Value::Number(padding.bottom as f64)),
            ]),
        );
    }
    if let Some(decorations) = window.decorations {
        let native = match decorations {
            Decorations::Full => "TITLE | RESIZE",
            Decorations::Resize => "RESIZE",
            Decorations::None => "NONE",
        };
        writer.assign("window_decorations", Value::Str(native.to_string()));
    }
    match window.startup_mode {
        Some(StartupMode::Maximized) => {
            diagnostics.warn("maximized startup requires a gui-startup hook in wezterm, dropped");
        }
        Some(StartupMode::Fullscreen) => {
            diagnostics.warn("fullscreen startup requires a gui-startup hook in wezterm, dropped");
        }
        Some(StartupMode::Windowed) | None => {}
    }
}

fn export_behavior(schema: &Schema, writer: &mut ScriptWriter, diagnostics: &mut Diagnostics) {
    let Some(behavior) = &schema.behavior else {
        return;
    };
    if let Some(shell) = &behavior.shell {
        let mut prog = vec![Value::Str(shell.clone())];
        prog.extend(behavior.shell_args.iter().cloned().map(Value::Str));
        writer.assign("default_prog", Value::Array(prog));
    }
    if !behavior.env.is_empty() {
        writer.assign(
            "set_environment_variables",
            Value::Table(
                behavior
                    .env
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::Str(v.clone())))
                    .collect(),
            ),
        );
    }
    if let Some(lines) = behavior.scrollback_lines {
        if lines == SCROLLBACK_UNLIMITED {
            diagnostics.warn(format!(
                "unlimited scrollback capped to {MAX_SCROLLBACK} lines"
            ));
        }
        let capped = behavior.scrollback_capped(MAX_SCROLLBACK).unwrap_or(lines);
        writer.assign("scrollback_lines", Value::Number(capped as f64));
    }
    match behavior.bell {
        Some(BellMode::Audible) => {
            writer.assign("audible_bell", Value::Str("SystemBeep".to_string()));
        }
        Some(BellMode::None) => {
            writer.assign("audible_bell", Value::Str("Disabled".to_string()));
        }
        Some(BellMode::Visual) => {
            writer.assign("audible_bell", Value::Str("Disabled".to_string()));
            writer.assign(
                "visual_bell",
                Value::Table(vec![
                    ("fade_in_duration_ms".to_string(), Value::Number(75.0)),
                    ("fade_out_duration_ms".to_string(), Value::Number(75.0)),
                ]),
            );
        }
        None => {}
    }
    if let Some(term) = &behavior.term {
        writer.assign("term", Value::Str(term.clone()));
    }
    if let Some(hide) = behavior.mouse_hide_while_typing {
        writer.assign("hide_mouse_cursor_when_typing", Value::Bool(hide));
    }
    if behavior.copy_on_select.is_some() {
        diagnostics.warn("copy_on_select is a mouse binding in wezterm, dropped");
    }
}

fn export_tabs(schema: &Schema, writer: &mut ScriptWriter) {
    let Some(tabs) = &schema.tabs else {
        return;
    };
    match tabs.visibility {
        Some(TabBarVisibility::Never) => {
            writer.assign("enable_tab_bar", Value::Bool(false));
        }
        Some(TabBarVisibility::Auto) => {
            writer.assign("enable_tab_bar", Value::Bool(true));
            writer.assign("hide_tab_bar_if_only_one_tab", Value::Bool(true));
        }
        Some(TabBarVisibility::Always) => {
            writer.assign("enable_tab_bar", Value::Bool(true));
        }
        None => {}
    }
    if let Some(position) = tabs.position {
        writer.assign(
            "tab_bar_at_bottom",
            Value::Bool(position == TabBarPosition::Bottom),
        );
    }
}

fn export_keys(schema: &Schema, diagnostics: &mut Diagnostics) -> Option<Vec<Value>> {
    if schema.key_bindings.is_empty() {
        return None;
    }
    let mut entries = Vec::new();
    for binding in &schema.key_bindings {
        let Some(action) = native_action(binding) else {
            diagnostics.warn(format!(
                "no wezterm action for `{}`, binding dropped",
                binding.action
            ));
            continue;
        };
        let mut entry = vec![("key".to_string(), Value::Str(binding.key.clone()))];
        if !binding.mods.is_empty() {
            let mods: Vec<String> = binding
                .mods
                .iter()
                .map(|m| m.as_str().to_ascii_uppercase())
                .collect();
            entry.push(("mods".to_string(), Value::Str(mods.join("|"))));
        }
        entry.push(("action".to_string(), Value::Action(action)));
        entries.push(Value::Table(entry));
    }
    Some(entries)
}

fn native_action(binding: &KeyBinding) -> Option<ActionSpec> {
    let str_arg = |text: &str| vec![Value::Str(text.to_string())];
    let (name, args) = match binding.action.as_str() {
        "copy" => ("CopyTo", str_arg("Clipboard")),
        "paste" => ("PasteFrom", str_arg("Clipboard")),
        "new_tab" => ("SpawnTab", str_arg("CurrentPaneDomain")),
        "close_tab" => (
            "CloseCurrentTab",
            vec![Value::Table(vec![(
                "confirm".to_string(),
                Value::Bool(true),
            )])],
        ),
        "new_window" => ("SpawnWindow", Vec::new()),
        "next_tab" => ("ActivateTabRelative", vec![Value::Number(1.0)]),
        "prev_tab" => ("ActivateTabRelative", vec![Value::Number(-1.0)]),
        "increase_font_size" => ("IncreaseFontSize", Vec::new()),
        "decrease_font_size" => ("DecreaseFontSize", Vec::new()),
        "reset_font_size" => ("ResetFontSize", Vec::new()),
        "toggle_fullscreen" => ("ToggleFullScreen", Vec::new()),
        "clear_scrollback" => ("ClearScrollback", str_arg("ScrollbackOnly")),
        "split_horizontal" => (
            "SplitHorizontal",
            vec![Value::Table(vec![(
                "domain".to_string(),
                Value::Str("CurrentPaneDomain".to_string()),
            )])],
        ),
        "split_vertical" => (
            "SplitVertical",
            vec![Value::Table(vec![(
                "domain".to_string(),
                Value::Str("CurrentPaneDomain".to_string()),
            )])],
        ),
        "send_string" => ("SendString", str_arg(binding.action_param.as_deref()?)),
        _ => return None,
    };
    Some(ActionSpec {
        name: name.to_string(),
        args,
    })
}
