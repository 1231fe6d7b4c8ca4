//! kitty adapter: line-based `key value` configuration format.

use serde_json::json;
use termweave_lua::format_number;
use termweave_schema::{
    BellMode, CursorShape, Decorations, Diagnostics, KeyBinding, Modifier,
    SCROLLBACK_UNLIMITED, Schema, StartupMode, TabBarPosition, TabBarVisibility,
};

use crate::adapter::{ConvertError, ExportOutcome, ParseOutcome, TerminalAdapter};
use crate::terminals::normalize_color;

#[derive(Debug)]
pub struct KittyAdapter;

const NAME: &str = "kitty";

impl TerminalAdapter for KittyAdapter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn display_name(&self) -> &'static str {
        "kitty"
    }

    fn parse(&self, source: &str) -> Result<ParseOutcome, ConvertError> {
        let mut schema = Schema::for_source(NAME);
        let mut diagnostics = Diagnostics::new();
        let mut bell = BellState::default();

        for (index, raw_line) in source.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, rest) = match line.split_once(char::is_whitespace) {
                Some((key, rest)) => (key, rest.trim()),
                None => (line, ""),
            };
            map_line(
                key,
                rest,
                raw_line,
                index + 1,
                &mut schema,
                &mut diagnostics,
                &mut bell,
            );
        }
        bell.resolve(&mut schema);

        Ok(ParseOutcome {
            schema,
            diagnostics,
        })
    }

    fn export(&self, schema: &Schema) -> Result<ExportOutcome, ConvertError> {
        let mut diagnostics = Diagnostics::new();
        let mut lines: Vec<String> = Vec::new();

        export_font(schema, &mut lines);
        export_cursor(schema, &mut lines);
        export_window(schema, &mut lines, &mut diagnostics);
        export_behavior(schema, &mut lines);
        export_tabs(schema, &mut lines);
        export_colors(schema, &mut lines);
        export_keys(schema, &mut lines, &mut diagnostics);

        for setting in schema.terminal_specific_for(NAME) {
            if let Some(raw) = &setting.raw {
                lines.push(raw.trim().to_string());
            }
        }

        let mut text = lines.join("\n");
        text.push('\n');
        Ok(ExportOutcome { text, diagnostics })
    }
}

// === Parse direction ===

#[derive(Default)]
struct BellState {
    audio: Option<bool>,
    visual: bool,
}

impl BellState {
    fn resolve(self, schema: &mut Schema) {
        let mode = match (self.audio, self.visual) {
            (Some(true), _) => Some(BellMode::Audible),
            (Some(false), true) | (None, true) => Some(BellMode::Visual),
            (Some(false), false) => Some(BellMode::None),
            (None, false) => None,
        };
        if let Some(mode) = mode {
            schema.behavior.get_or_insert_default().bell = Some(mode);
        }
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "on" => Some(true),
        "no" | "n" | "false" | "off" => Some(false),
        _ => None,
    }
}

fn map_line(
    key: &str,
    rest: &str,
    raw_line: &str,
    line_no: usize,
    schema: &mut Schema,
    diagnostics: &mut Diagnostics,
    bell: &mut BellState,
) {
    // color0..color15
    if let Some(index) = key
        .strip_prefix("color")
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|n| *n < 16)
    {
        if let Some(color) = normalize_color(rest, key, diagnostics) {
            schema
                .color_scheme
                .get_or_insert_default()
                .set_ansi_color(index, color);
        }
        return;
    }

    match key {
        "foreground" | "background" | "cursor" | "cursor_text_color"
        | "selection_background" | "selection_foreground" => {
            if key == "cursor_text_color" && rest == "background" {
                // Special kitty spelling: cursor text takes the
                // background color; nothing concrete to store.
                diagnostics.warn("cursor_text_color background has no canonical equivalent");
                return;
            }
            if let Some(color) = normalize_color(rest, key, diagnostics) {
                let scheme = schema.color_scheme.get_or_insert_default();
                let slot = match key {
                    "foreground" => &mut scheme.foreground,
                    "background" => &mut scheme.background,
                    "cursor" => &mut scheme.cursor,
                    "cursor_text_color" => &mut scheme.cursor_text,
                    "selection_background" => &mut scheme.selection,
                    _ => &mut scheme.selection_text,
                };
                *slot = Some(color);
            }
        }
        "active_border_color" => {
            if let Some(color) = normalize_color(rest, key, diagnostics) {
                schema.panes.get_or_insert_default().divider_color = Some(color);
            }
        }
        "inactive_text_alpha" => match rest.parse::<f64>() {
            Ok(alpha) => {
                if let Err(err) = schema.panes.get_or_insert_default().set_inactive_dim(alpha)
                {
                    diagnostics.warn(err.to_string());
                }
            }
            Err(_) => diagnostics.warn(format!("inactive_text_alpha: bad value `{rest}`")),
        },
        "font_family" => {
            schema.font.get_or_insert_default().family = Some(rest.to_string());
        }
        "bold_font" | "italic_font" | "bold_italic_font" => {
            if rest != "auto" {
                let font = schema.font.get_or_insert_default();
                let slot = match key {
                    "bold_font" => &mut font.bold_family,
                    "italic_font" => &mut font.italic_family,
                    _ => &mut font.bold_italic_family,
                };
                *slot = Some(rest.to_string());
            }
        }
        "font_size" => match rest.parse::<f64>() {
            Ok(size) => {
                if let Err(err) = schema.font.get_or_insert_default().set_size(size) {
                    diagnostics.warn(err.to_string());
                }
            }
            Err(_) => diagnostics.warn(format!("font_size: bad value `{rest}`")),
        },
        "modify_font" => {
            // Only the percentage cell_height form maps onto line height.
            if let Some(pct) = rest
                .strip_prefix("cell_height")
                .map(str::trim)
                .and_then(|v| v.strip_suffix('%'))
                .and_then(|v| v.trim().parse::<f64>().ok())
            {
                if let Err(err) = schema
                    .font
                    .get_or_insert_default()
                    .set_line_height(pct / 100.0)
                {
                    diagnostics.warn(err.to_string());
                }
            } else {
                bucket(schema, diagnostics, key, rest, raw_line, line_no);
            }
        }
        "disable_ligatures" => {
            let ligatures = match rest {
                "never" => Some(true),
                "always" | "cursor" => Some(false),
                _ => None,
            };
            match ligatures {
                Some(value) => {
                    schema.font.get_or_insert_default().ligatures = Some(value);
                }
                None => diagnostics.warn(format!("disable_ligatures: bad value `{rest}`")),
            }
        }
        "font_features" => {
            schema
                .font
                .get_or_insert_default()
                .features
                .push(rest.to_string());
        }
        "cursor_shape" => {
            let shape = match rest {
                "block" => Some(CursorShape::Block),
                "beam" => Some(CursorShape::Beam),
                "underline" => Some(CursorShape::Underline),
                _ => None,
            };
            match shape {
                Some(shape) => {
                    schema.cursor.get_or_insert_default().shape = Some(shape);
                }
                None => diagnostics.warn(format!("cursor_shape: unknown shape `{rest}`")),
            }
        }
        "cursor_blink_interval" => match rest.parse::<f64>() {
            Ok(seconds) if seconds == 0.0 => {
                schema.cursor.get_or_insert_default().blink = Some(false);
            }
            Ok(seconds) if seconds > 0.0 => {
                let cursor = schema.cursor.get_or_insert_default();
                cursor.blink = Some(true);
                if let Err(err) =
                    cursor.set_blink_interval_ms((seconds * 1000.0).round() as i64)
                {
                    diagnostics.warn(err.to_string());
                }
            }
            // Negative means "use the system default": nothing to store.
            Ok(_) => {}
            Err(_) => diagnostics.warn(format!("cursor_blink_interval: bad value `{rest}`")),
        },
        "background_opacity" => match rest.parse::<f64>() {
            Ok(opacity) => {
                if let Err(err) = schema.window.get_or_insert_default().set_opacity(opacity) {
                    diagnostics.warn(err.to_string());
                }
            }
            Err(_) => diagnostics.warn(format!("background_opacity: bad value `{rest}`")),
        },
        "background_blur" => match rest.parse::<i64>() {
            Ok(radius) => {
                let window = schema.window.get_or_insert_default();
                if let Err(err) = window.set_blur_radius(radius) {
                    diagnostics.warn(err.to_string());
                } else {
                    window.blur = Some(radius > 0);
                }
            }
            Err(_) => diagnostics.warn(format!("background_blur: bad value `{rest}`")),
        },
        "window_padding_width" => {
            let values: Result<Vec<i64>, _> = rest
                .split_whitespace()
                .map(|v| v.parse::<f64>().map(|f| f as i64))
                .collect();
            let padding = match values.as_deref() {
                Ok([all]) => Some((*all, *all, *all, *all)),
                Ok([vertical, horizontal]) => {
                    Some((*vertical, *horizontal, *vertical, *horizontal))
                }
                Ok([top, right, bottom, left]) => Some((*top, *right, *bottom, *left)),
                _ => None,
            };
            match padding {
                Some((top, right, bottom, left)) => {
                    if let Err(err) = schema
                        .window
                        .get_or_insert_default()
                        .set_padding(top, right, bottom, left)
                    {
                        diagnostics.warn(err.to_string());
                    }
                }
                None => diagnostics.warn(format!("window_padding_width: bad value `{rest}`")),
            }
        }
        "hide_window_decorations" => {
            let decorations = match rest {
                "no" => Some(Decorations::Full),
                "yes" => Some(Decorations::None),
                "titlebar-only" | "titlebar-and-corners" => Some(Decorations::Resize),
                _ => None,
            };
            match decorations {
                Some(mode) => {
                    schema.window.get_or_insert_default().decorations = Some(mode);
                }
                None => {
                    diagnostics.warn(format!("hide_window_decorations: bad value `{rest}`"));
                }
            }
        }
        "initial_window_width" | "initial_window_height" => {
            // Only the cell-based form ("120c") maps onto columns/rows;
            // pixel sizes stay kitty-specific.
            match rest.strip_suffix('c').and_then(|v| v.parse::<i64>().ok()) {
                Some(cells) => {
                    let window = schema.window.get_or_insert_default();
                    let result = if key == "initial_window_width" {
                        window.set_columns(cells)
                    } else {
                        window.set_rows(cells)
                    };
                    if let Err(err) = result {
                        diagnostics.warn(err.to_string());
                    }
                }
                None => bucket(schema, diagnostics, key, rest, raw_line, line_no),
            }
        }
        "remember_window_size" => {}
        "start_as" => {
            let mode = match rest {
                "normal" => Some(StartupMode::Windowed),
                "maximized" => Some(StartupMode::Maximized),
                "fullscreen" => Some(StartupMode::Fullscreen),
                _ => None,
            };
            match mode {
                Some(mode) => {
                    schema.window.get_or_insert_default().startup_mode = Some(mode);
                }
                None => bucket(schema, diagnostics, key, rest, raw_line, line_no),
            }
        }
        "shell" => {
            // "." means the user's login shell; nothing to carry over.
            if rest != "." {
                let mut parts = rest.split_whitespace().map(str::to_string);
                let behavior = schema.behavior.get_or_insert_default();
                behavior.shell = parts.next();
                behavior.shell_args = parts.collect();
            }
        }
        "env" => match rest.split_once('=') {
            Some((name, value)) => {
                schema
                    .behavior
                    .get_or_insert_default()
                    .env
                    .insert(name.trim().to_string(), value.trim().to_string());
            }
            None => diagnostics.warn(format!("env: expected NAME=VALUE, got `{rest}`")),
        },
        "scrollback_lines" => match rest.parse::<i64>() {
            Ok(-1) => {
                schema.behavior.get_or_insert_default().scrollback_lines =
                    Some(SCROLLBACK_UNLIMITED);
            }
            Ok(lines) => {
                if let Err(err) = schema
                    .behavior
                    .get_or_insert_default()
                    .set_scrollback_lines(lines)
                {
                    diagnostics.warn(err.to_string());
                }
            }
            Err(_) => diagnostics.warn(format!("scrollback_lines: bad value `{rest}`")),
        },
        "enable_audio_bell" => match parse_bool(rest) {
            Some(enabled) => bell.audio = Some(enabled),
            None => diagnostics.warn(format!("enable_audio_bell: bad value `{rest}`")),
        },
        "visual_bell_duration" => {
            if rest.parse::<f64>().is_ok_and(|duration| duration > 0.0) {
                bell.visual = true;
            }
        }
        "copy_on_select" => {
            let value = match rest {
                "yes" | "clipboard" => Some(true),
                "no" => Some(false),
                _ => None,
            };
            match value {
                Some(value) => {
                    schema.behavior.get_or_insert_default().copy_on_select = Some(value);
                }
                // Named-buffer targets stay kitty-specific.
                None => bucket(schema, diagnostics, key, rest, raw_line, line_no),
            }
        }
        "mouse_hide_wait" => match rest.parse::<f64>() {
            Ok(wait) => {
                schema.behavior.get_or_insert_default().mouse_hide_while_typing =
                    Some(wait != 0.0);
            }
            Err(_) => diagnostics.warn(format!("mouse_hide_wait: bad value `{rest}`")),
        },
        "term" => {
            schema.behavior.get_or_insert_default().term = Some(rest.to_string());
        }
        "tab_bar_edge" => {
            let position = match rest {
                "top" => Some(TabBarPosition::Top),
                "bottom" => Some(TabBarPosition::Bottom),
                _ => None,
            };
            match position {
                Some(position) => {
                    schema.tabs.get_or_insert_default().position = Some(position);
                }
                None => diagnostics.warn(format!("tab_bar_edge: bad value `{rest}`")),
            }
        }
        "tab_bar_min_tabs" => match rest.parse::<u32>() {
            Ok(1) => {
                schema.tabs.get_or_insert_default().visibility = Some(TabBarVisibility::Always);
            }
            Ok(_) => {
                schema.tabs.get_or_insert_default().visibility = Some(TabBarVisibility::Auto);
            }
            Err(_) => diagnostics.warn(format!("tab_bar_min_tabs: bad value `{rest}`")),
        },
        "tab_bar_style" => {
            if rest == "hidden" {
                schema.tabs.get_or_insert_default().visibility = Some(TabBarVisibility::Never);
            } else {
                bucket(schema, diagnostics, key, rest, raw_line, line_no);
            }
        }
        "map" => map_binding(rest, raw_line, line_no, schema, diagnostics),
        _ => bucket(schema, diagnostics, key, rest, raw_line, line_no),
    }
}

fn map_binding(
    rest: &str,
    raw_line: &str,
    line_no: usize,
    schema: &mut Schema,
    diagnostics: &mut Diagnostics,
) {
    let parsed = (|| {
        let (combo, action_text) = rest.split_once(char::is_whitespace)?;
        let mut parts: Vec<&str> = combo.split('+').collect();
        let key = parts.pop()?;
        let mods = parts
            .iter()
            .map(|m| m.parse::<Modifier>())
            .collect::<Result<Vec<_>, _>>()
            .ok()?;
        let (action, param) = canonical_action(action_text.trim())?;
        KeyBinding::new(key, mods, action, param).ok()
    })();
    match parsed {
        Some(binding) => schema.key_bindings.push(binding),
        None => bucket(schema, diagnostics, "map", rest, raw_line, line_no),
    }
}

fn canonical_action(text: &str) -> Option<(String, Option<String>)> {
    if let Some(payload) = text.strip_prefix("send_text all ") {
        return Some(("send_string".to_string(), Some(payload.to_string())));
    }
    let name = match text {
        "copy_to_clipboard" => "copy",
        "paste_from_clipboard" => "paste",
        "new_tab" => "new_tab",
        "close_tab" => "close_tab",
        "new_os_window" => "new_window",
        "next_tab" => "next_tab",
        "previous_tab" => "prev_tab",
        "change_font_size all +2.0" => "increase_font_size",
        "change_font_size all -2.0" => "decrease_font_size",
        "change_font_size all 0" => "reset_font_size",
        "toggle_fullscreen" => "toggle_fullscreen",
        "clear_terminal scrollback active" => "clear_scrollback",
        "launch --location=hsplit" => "split_horizontal",
        "launch --location=vsplit" => "split_vertical",
        _ => return None,
    };
    Some((name.to_string(), None))
}

fn native_action(binding: &KeyBinding) -> Option<String> {
    let action = match binding.action.as_str() {
        "copy" => "copy_to_clipboard",
        "paste" => "paste_from_clipboard",
        "new_tab" => "new_tab",
        "close_tab" => "close_tab",
        "new_window" => "new_os_window",
        "next_tab" => "next_tab",
        "prev_tab" => "previous_tab",
        "increase_font_size" => "change_font_size all +2.0",
        "decrease_font_size" => "change_font_size all -2.0",
        "reset_font_size" => "change_font_size all 0",
        "toggle_fullscreen" => "toggle_fullscreen",
        "clear_scrollback" => "clear_terminal scrollback active",
        "split_horizontal" => "launch --location=hsplit",
        "split_vertical" => "launch --location=vsplit",
        "send_string" => {
            return binding
                .action_param
                .as_ref()
                .map(|text| format!("send_text all {text}"));
        }
        _ => return None,
    };
    Some(action.to_string())
}

fn bucket(
    schema: &mut Schema,
    diagnostics: &mut Diagnostics,
    key: &str,
    rest: &str,
    raw_line: &str,
    line_no: usize,
) {
    diagnostics.warn(format!(
        "line {line_no}: `{key}` has no canonical equivalent, only replayed when exporting back to kitty"
    ));
    schema.add_terminal_specific(NAME, key, json!(rest), Some(raw_line.to_string()));
}

// === Export direction ===

fn export_font(schema: &Schema, lines: &mut Vec<String>) {
    let Some(font) = &schema.font else {
        return;
    };
    if let Some(family) = &font.family {
        lines.push(format!("font_family {family}"));
    }
    for (key, family) in [
        ("bold_font", &font.bold_family),
        ("italic_font", &font.italic_family),
        ("bold_italic_font", &font.bold_italic_family),
    ] {
        if let Some(family) = family {
            lines.push(format!("{key} {family}"));
        }
    }
    if let Some(size) = font.size {
        lines.push(format!("font_size {}", format_number(size)));
    }
    if let Some(height) = font.line_height {
        lines.push(format!(
            "modify_font cell_height {}%",
            format_number((height * 100.0).round())
        ));
    }
    match font.ligatures {
        Some(true) => lines.push("disable_ligatures never".to_string()),
        Some(false) => lines.push("disable_ligatures always".to_string()),
        None => {}
    }
    for feature in &font.features {
        lines.push(format!("font_features {feature}"));
    }
}

fn export_cursor(schema: &Schema, lines: &mut Vec<String>) {
    let Some(cursor) = &schema.cursor else {
        return;
    };
    if let Some(shape) = cursor.shape {
        lines.push(format!("cursor_shape {}", shape.as_str()));
    }
    match (cursor.blink, cursor.blink_interval_ms) {
        (Some(false), _) => lines.push("cursor_blink_interval 0".to_string()),
        (_, Some(interval)) => lines.push(format!(
            "cursor_blink_interval {}",
            format_number(interval as f64 / 1000.0)
        )),
        _ => {}
    }
}

fn export_window(schema: &Schema, lines: &mut Vec<String>, diagnostics: &mut Diagnostics) {
    let Some(window) = &schema.window else {
        return;
    };
    if let Some(opacity) = window.opacity {
        lines.push(format!("background_opacity {}", format_number(opacity)));
    }
    match (window.blur, window.blur_radius) {
        (_, Some(radius)) => lines.push(format!("background_blur {radius}")),
        (Some(true), None) => {
            diagnostics.warn("blur enabled without a radius; using 20");
            lines.push("background_blur 20".to_string());
        }
        _ => {}
    }
    if let Some(padding) = window.padding {
        if padding == termweave_schema::Padding::uniform(padding.top) {
            lines.push(format!("window_padding_width {}", padding.top));
        } else {
            lines.push(format!(
                "window_padding_width {} {} {} {}",
                padding.top, padding.right, padding.bottom, padding.left
            ));
        }
    }
    if let Some(decorations) = window.decorations {
        let native = match decorations {
            Decorations::Full => "no",
            Decorations::None => "yes",
            Decorations::Resize => "titlebar-only",
        };
        lines.push(format!("hide_window_decorations {native}"));
    }
    if window.columns.is_some() || window.rows.is_some() {
        lines.push("remember_window_size no".to_string());
    }
    if let Some(columns) = window.columns {
        lines.push(format!("initial_window_width {columns}c"));
    }
    if let Some(rows) = window.rows {
        lines.push(format!("initial_window_height {rows}c"));
    }
    if let Some(mode) = window.startup_mode {
        let native = match mode {
            StartupMode::Windowed => "normal",
            StartupMode::Maximized => "maximized",
            StartupMode::Fullscreen => "fullscreen",
        };
        lines.push(format!("start_as {native}"));
    }
}

fn export_behavior(schema: &Schema, lines: &mut Vec<String>) {
    let Some(behavior) = &schema.behavior else {
        return;
    };
    if let Some(lines_count) = behavior.scrollback_lines {
        if lines_count == SCROLLBACK_UNLIMITED {
            lines.push("scrollback_lines -1".to_string());
        } else {
            lines.push(format!("scrollback_lines {lines_count}"));
        }
    }
    match behavior.bell {
        Some(BellMode::Audible) => lines.push("enable_audio_bell yes".to_string()),
        Some(BellMode::Visual) => {
            lines.push("enable_audio_bell no".to_string());
            lines.push("visual_bell_duration 0.25".to_string());
        }
        Some(BellMode::None) => {
            lines.push("enable_audio_bell no".to_string());
            lines.push("visual_bell_duration 0".to_string());
        }
        None => {}
    }
    if let Some(copy) = behavior.copy_on_select {
        lines.push(format!(
            "copy_on_select {}",
            if copy { "yes" } else { "no" }
        ));
    }
    if let Some(hide) = behavior.mouse_hide_while_typing {
        lines.push(format!("mouse_hide_wait {}", if hide { "3.0" } else { "0" }));
    }
    if let Some(term) = &behavior.term {
        lines.push(format!("term {term}"));
    }
    if let Some(shell) = &behavior.shell {
        if behavior.shell_args.is_empty() {
            lines.push(format!("shell {shell}"));
        } else {
            lines.push(format!("shell {shell} {}", behavior.shell_args.join(" ")));
        }
    }
    for (name, value) in &behavior.env {
        lines.push(format!("env {name}={value}"));
    }
}

fn export_tabs(schema: &Schema, lines: &mut Vec<String>) {
    let Some(tabs) = &schema.tabs else {
        return;
    };
    if let Some(position) = tabs.position {
        let edge = match position {
            TabBarPosition::Top => "top",
            TabBarPosition::Bottom => "bottom",
        };
        lines.push(format!("tab_bar_edge {edge}"));
    }
    match tabs.visibility {
        Some(TabBarVisibility::Always) => lines.push("tab_bar_min_tabs 1".to_string()),
        Some(TabBarVisibility::Auto) => lines.push("tab_bar_min_tabs 2".to_string()),
        Some(TabBarVisibility::Never) => lines.push("tab_bar_style hidden".to_string()),
        None => {}
    }
}

fn export_colors(schema: &Schema, lines: &mut Vec<String>) {
    if let Some(scheme) = &schema.color_scheme {
        let semantic = [
            ("foreground", scheme.foreground),
            ("background", scheme.background),
            ("cursor", scheme.cursor),
            ("cursor_text_color", scheme.cursor_text),
            ("selection_background", scheme.selection),
            ("selection_foreground", scheme.selection_text),
        ];
        for (key, color) in semantic {
            if let Some(color) = color {
                lines.push(format!("{key} {}", color.to_hex()));
            }
        }
        for index in 0..16u8 {
            if let Some(color) = scheme.ansi_color(index) {
                lines.push(format!("color{index} {}", color.to_hex()));
            }
        }
    }
    if let Some(panes) = &schema.panes {
        if let Some(divider) = panes.divider_color {
            lines.push(format!("active_border_color {}", divider.to_hex()));
        }
        if let Some(dim) = panes.inactive_dim {
            lines.push(format!("inactive_text_alpha {}", format_number(dim)));
        }
    }
}

fn export_keys(schema: &Schema, lines: &mut Vec<String>, diagnostics: &mut Diagnostics) {
    for binding in &schema.key_bindings {
        let Some(action) = native_action(binding) else {
            diagnostics.warn(format!(
                "no kitty action for `{}`, binding dropped",
                binding.action
            ));
            continue;
        };
        let mut combo: Vec<&str> = binding.mods.iter().map(|m| m.as_str()).collect();
        combo.push(&binding.key);
        lines.push(format!("map {} {action}", combo.join("+")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termweave_schema::Color;

    fn parse(source: &str) -> ParseOutcome {
        KittyAdapter.parse(source).unwrap()
    }

    #[test]
    fn test_colors_and_palette() {
        let outcome = parse("foreground #c5c8c6\ncolor0 #1d1f21\ncolor15 #ffffff\n");
        let scheme = outcome.schema.color_scheme.unwrap();
        assert_eq!(scheme.foreground, Some(Color::new(197, 200, 198)));
        assert_eq!(scheme.ansi_color(0), Some(Color::new(29, 31, 33)));
        assert_eq!(scheme.ansi_color(15), Some(Color::new(255, 255, 255)));
    }

    #[test]
    fn test_bold_font_auto_skipped() {
        let outcome = parse("font_family Fira Code\nbold_font auto\nitalic_font Fira Code Italic\n");
        let font = outcome.schema.font.unwrap();
        assert_eq!(font.family.as_deref(), Some("Fira Code"));
        assert_eq!(font.bold_family, None);
        assert_eq!(font.italic_family.as_deref(), Some("Fira Code Italic"));
    }

    #[test]
    fn test_blink_interval_seconds_to_ms() {
        let outcome = parse("cursor_blink_interval 0.5\n");
        let cursor = outcome.schema.cursor.unwrap();
        assert_eq!(cursor.blink, Some(true));
        assert_eq!(cursor.blink_interval_ms, Some(500));
    }

    #[test]
    fn test_blink_disabled() {
        let outcome = parse("cursor_blink_interval 0\n");
        assert_eq!(outcome.schema.cursor.unwrap().blink, Some(false));
    }

    #[test]
    fn test_scrollback_unlimited_sentinel() {
        let outcome = parse("scrollback_lines -1\n");
        assert_eq!(
            outcome.schema.behavior.unwrap().scrollback_lines,
            Some(SCROLLBACK_UNLIMITED)
        );
    }

    #[test]
    fn test_cell_suffix_dimensions() {
        let outcome = parse("initial_window_width 120c\ninitial_window_height 40c\n");
        let window = outcome.schema.window.unwrap();
        assert_eq!(window.columns, Some(120));
        assert_eq!(window.rows, Some(40));
    }

    #[test]
    fn test_pixel_dimensions_stay_specific() {
        let outcome = parse("initial_window_width 640\n");
        assert!(outcome.schema.window.is_none());
        assert_eq!(outcome.schema.terminal_specific.len(), 1);
        assert_eq!(outcome.schema.terminal_specific[0].key, "initial_window_width");
    }

    #[test]
    fn test_env_and_shell() {
        let outcome = parse("env EDITOR=nvim\nshell /bin/zsh --login\n");
        let behavior = outcome.schema.behavior.unwrap();
        assert_eq!(behavior.env.get("EDITOR").map(String::as_str), Some("nvim"));
        assert_eq!(behavior.shell.as_deref(), Some("/bin/zsh"));
        assert_eq!(behavior.shell_args, ["--login"]);
    }

    #[test]
    fn test_map_parsing() {
        let outcome = parse("map ctrl+shift+c copy_to_clipboard\nmap cmd+t new_tab\n");
        assert_eq!(outcome.schema.key_bindings.len(), 2);
        let copy = &outcome.schema.key_bindings[0];
        assert_eq!(copy.key, "c");
        assert_eq!(copy.mods, vec![Modifier::Ctrl, Modifier::Shift]);
        assert_eq!(copy.action, "copy");
        assert_eq!(outcome.schema.key_bindings[1].mods, vec![Modifier::Super]);
    }

    #[test]
    fn test_kitty_mod_binding_stays_specific() {
        let outcome = parse("map kitty_mod+enter launch --cwd=current\n");
        assert!(outcome.schema.key_bindings.is_empty());
        assert_eq!(outcome.schema.terminal_specific.len(), 1);
        let export = KittyAdapter.export(&outcome.schema).unwrap();
        assert!(export.text.contains("map kitty_mod+enter launch --cwd=current"));
    }

    #[test]
    fn test_unknown_key_bucketed_with_diagnostic() {
        let outcome = parse("tab_bar_align center\n");
        assert_eq!(outcome.schema.terminal_specific.len(), 1);
        assert_eq!(outcome.diagnostics.len(), 1);
    }

    #[test]
    fn test_comments_and_blanks_skipped() {
        let outcome = parse("# a comment\n\nfont_size 12.5\n");
        assert_eq!(outcome.schema.font.unwrap().size, Some(12.5));
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_round_trip_settings_equality() {
        let source = "font_family JetBrains Mono\nfont_size 13.5\nforeground #c5c8c6\nscrollback_lines 10000\nmap ctrl+shift+v paste_from_clipboard\n";
        let first = parse(source);
        let exported = KittyAdapter.export(&first.schema).unwrap();
        let second = parse(&exported.text);
        assert_eq!(first.schema.font, second.schema.font);
        assert_eq!(first.schema.color_scheme, second.schema.color_scheme);
        assert_eq!(first.schema.behavior, second.schema.behavior);
        assert_eq!(first.schema.key_bindings, second.schema.key_bindings);
    }

    #[test]
    fn test_export_deterministic() {
        let outcome = parse("font_size 12\ncolor1 #cc6666\nenv B=2\nenv A=1\n");
        let a = KittyAdapter.export(&outcome.schema).unwrap().text;
        let b = KittyAdapter.export(&outcome.schema).unwrap().text;
        assert_eq!(a, b);
        let a_pos = a.find("env A=1").unwrap();
        let b_pos = a.find("env B=2").unwrap();
        assert!(a_pos < b_pos);
    }
}
