//! Alacritty adapter: TOML-tree configuration format.
//!
//! Parsing deserializes the whole document, consumes the known paths,
//! then sweeps whatever is left into the terminal-specific bucket as
//! dotted paths. Export rebuilds a TOML tree; map keys serialize in
//! sorted order, so output is deterministic.

use serde_json::json;
use termweave_schema::{
    BellMode, CursorShape, Decorations, Diagnostics, KeyBinding, Modifier, Schema,
    StartupMode,
};
use toml::Value as Toml;

use crate::adapter::{ConvertError, ExportOutcome, ParseOutcome, TerminalAdapter};
use crate::terminals::normalize_color;

#[derive(Debug)]
pub struct AlacrittyAdapter;

const NAME: &str = "alacritty";

/// Alacritty rejects histories above this many lines.
const MAX_HISTORY: u32 = 100_000;

impl TerminalAdapter for AlacrittyAdapter {
    fn name(&self) -> &'static str {
        NAME
    }

    fn display_name(&self) -> &'static str {
        "Alacritty"
    }

    fn parse(&self, source: &str) -> Result<ParseOutcome, ConvertError> {
        let mut table: toml::Table = toml::from_str(source).map_err(|err| {
            let line = err
                .span()
                .map(|span| source[..span.start.min(source.len())].lines().count())
                .unwrap_or(0);
            ConvertError::syntax(line, err.message().to_string())
        })?;

        let mut schema = Schema::for_source(NAME);
        let mut diagnostics = Diagnostics::new();

        map_font(&mut table, &mut schema, &mut diagnostics);
        map_colors(&mut table, &mut schema, &mut diagnostics);
        map_cursor(&mut table, &mut schema, &mut diagnostics);
        map_window(&mut table, &mut schema, &mut diagnostics);
        map_behavior(&mut table, &mut schema, &mut diagnostics);
        map_bindings(&mut table, &mut schema, &mut diagnostics);

        // Everything left has no canonical home.
        sweep_remainder(&table, String::new(), &mut schema, &mut diagnostics);

        Ok(ParseOutcome {
            schema,
            diagnostics,
        })
    }

    fn export(&self, schema: &Schema) -> Result<ExportOutcome, ConvertError> {
        let mut diagnostics = Diagnostics::new();
        let mut table = toml::Table::new();

        export_font(schema, &mut table, &mut diagnostics);
        export_colors(schema, &mut table, &mut diagnostics);
        export_cursor(schema, &mut table);
        export_window(schema, &mut table, &mut diagnostics);
        export_behavior(schema, &mut table, &mut diagnostics);
        export_bindings(schema, &mut table, &mut diagnostics);

        for setting in schema.terminal_specific_for(NAME) {
            match json_to_toml(&setting.value) {
                Some(value) => {
                    if setting.key == "keyboard.bindings" {
                        push_binding(&mut table, value);
                    } else {
                        insert_path(&mut table, &setting.key, value);
                    }
                }
                None => diagnostics.warn(format!(
                    "`{}` could not be restored to the native tree",
                    setting.key
                )),
            }
        }

        let text = toml::to_string_pretty(&table)
            .map_err(|err| ConvertError::Codec(err.to_string()))?;
        Ok(ExportOutcome { text, diagnostics })
    }
}

// === Tree plumbing ===

/// Remove the value at a dotted path, pruning tables emptied on the way
/// back out.
fn take_path(table: &mut toml::Table, path: &[&str]) -> Option<Toml> {
    let (head, rest) = path.split_first()?;
    if rest.is_empty() {
        return table.remove(*head);
    }
    let inner = table.get_mut(*head)?.as_table_mut()?;
    let value = take_path(inner, rest)?;
    if inner.is_empty() {
        table.remove(*head);
    }
    Some(value)
}

fn insert_path(table: &mut toml::Table, path: &str, value: Toml) {
    let mut current = table;
    let mut parts = path.split('.').peekable();
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            current.insert(part.to_string(), value);
            return;
        }
        current = current
            .entry(part.to_string())
            .or_insert_with(|| Toml::Table(toml::Table::new()))
            .as_table_mut()
            .expect("intermediate path segments are tables");
    }
}

fn push_binding(table: &mut toml::Table, value: Toml) {
    let bindings = table
        .entry("keyboard".to_string())
        .or_insert_with(|| Toml::Table(toml::Table::new()))
        .as_table_mut()
        .expect("keyboard is a table")
        .entry("bindings".to_string())
        .or_insert_with(|| Toml::Array(Vec::new()));
    if let Some(array) = bindings.as_array_mut() {
        array.push(value);
    }
}

fn toml_to_json(value: &Toml) -> serde_json::Value {
    match value {
        Toml::String(s) => json!(s),
        Toml::Integer(i) => json!(i),
        Toml::Float(f) => json!(f),
        Toml::Boolean(b) => json!(b),
        Toml::Datetime(dt) => json!(dt.to_string()),
        Toml::Array(items) => {
            serde_json::Value::Array(items.iter().map(toml_to_json).collect())
        }
        Toml::Table(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_json(v)))
                .collect(),
        ),
    }
}

fn json_to_toml(value: &serde_json::Value) -> Option<Toml> {
    Some(match value {
        serde_json::Value::Null => return None,
        serde_json::Value::Bool(b) => Toml::Boolean(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Toml::Integer(i)
            } else {
                Toml::Float(n.as_f64()?)
            }
        }
        serde_json::Value::String(s) => Toml::String(s.clone()),
        serde_json::Value::Array(items) => {
            Toml::Array(items.iter().filter_map(json_to_toml).collect())
        }
        serde_json::Value::Object(entries) => Toml::Table(
            entries
                .iter()
                .filter_map(|(k, v)| Some((k.clone(), json_to_toml(v)?)))
                .collect(),
        ),
    })
}

fn sweep_remainder(
    table: &toml::Table,
    prefix: String,
    schema: &mut Schema,
    diagnostics: &mut Diagnostics,
) {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Toml::Table(inner) => sweep_remainder(inner, path, schema, diagnostics),
            other => {
                diagnostics.warn(format!(
                    "`{path}` has no canonical equivalent, only replayed when exporting back to alacritty"
                ));
                schema.add_terminal_specific(NAME, path, toml_to_json(other), None);
            }
        }
    }
}

// === Parse direction ===

fn take_str(table: &mut toml::Table, path: &[&str]) -> Option<String> {
    match take_path(table, path) {
        Some(Toml::String(s)) => Some(s),
        Some(other) => {
            // Put it back untouched rather than lose it.
            let mut root = toml::Table::new();
            insert_path(&mut root, &path.join("."), other);
            merge_back(table, root);
            None
        }
        None => None,
    }
}

fn take_f64(table: &mut toml::Table, path: &[&str]) -> Option<f64> {
    match take_path(table, path)? {
        Toml::Float(f) => Some(f),
        Toml::Integer(i) => Some(i as f64),
        _ => None,
    }
}

fn take_i64(table: &mut toml::Table, path: &[&str]) -> Option<i64> {
    match take_path(table, path)? {
        Toml::Integer(i) => Some(i),
        _ => None,
    }
}

fn take_bool(table: &mut toml::Table, path: &[&str]) -> Option<bool> {
    match take_path(table, path)? {
        Toml::Boolean(b) => Some(b),
        _ => None,
    }
}

fn merge_back(dst: &mut toml::Table, src: toml::Table) {
    for (key, value) in src {
        match (dst.get_mut(&key), value) {
            (Some(Toml::Table(existing)), Toml::Table(incoming)) => {
                merge_back(existing, incoming);
            }
            (_, value) => {
                dst.insert(key, value);
            }
        }
    }
}

fn take_color(
    table: &mut toml::Table,
    path: &[&str],
    schema_field: &str,
    diagnostics: &mut Diagnostics,
) -> Option<termweave_schema::Color> {
    let literal = take_str(table, path)?;
    normalize_color(&literal, schema_field, diagnostics)
}

fn map_font(table: &mut toml::Table, schema: &mut Schema, diagnostics: &mut Diagnostics) {
    let families = [
        ("normal", 0usize),
        ("bold", 1),
        ("italic", 2),
        ("bold_italic", 3),
    ];
    for (variant, slot) in families {
        if let Some(family) = take_str(table, &["font", variant, "family"]) {
            let font = schema.font.get_or_insert_default();
            match slot {
                0 => font.family = Some(family),
                1 => font.bold_family = Some(family),
                2 => font.italic_family = Some(family),
                _ => font.bold_italic_family = Some(family),
            }
        }
    }
    if let Some(size) = take_f64(table, &["font", "size"]) {
        if let Err(err) = schema.font.get_or_insert_default().set_size(size) {
            diagnostics.warn(err.to_string());
        }
    }
}

fn map_colors(table: &mut toml::Table, schema: &mut Schema, diagnostics: &mut Diagnostics) {
    let semantic: &[(&[&str], fn(&mut termweave_schema::ColorScheme) -> &mut Option<termweave_schema::Color>)] = &[
        (&["colors", "primary", "foreground"], |s| &mut s.foreground),
        (&["colors", "primary", "background"], |s| &mut s.background),
        (&["colors", "cursor", "cursor"], |s| &mut s.cursor),
        (&["colors", "cursor", "text"], |s| &mut s.cursor_text),
        (&["colors", "selection", "background"], |s| &mut s.selection),
        (&["colors", "selection", "text"], |s| &mut s.selection_text),
    ];
    for (path, slot) in semantic {
        if let Some(color) = take_color(table, path, path.last().unwrap_or(&"color"), diagnostics)
        {
            *slot(schema.color_scheme.get_or_insert_default()) = Some(color);
        }
    }
    const ANSI_NAMES: [&str; 8] = [
        "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
    ];
    for (group, offset) in [("normal", 0u8), ("bright", 8u8)] {
        for (index, name) in ANSI_NAMES.iter().enumerate() {
            if let Some(color) =
                take_color(table, &["colors", group, name], name, diagnostics)
            {
                schema
                    .color_scheme
                    .get_or_insert_default()
                    .set_ansi_color(offset + index as u8, color);
            }
        }
    }
}

fn map_cursor(table: &mut toml::Table, schema: &mut Schema, diagnostics: &mut Diagnostics) {
    // cursor.style is either a bare shape string or a table.
    let shape_text = take_str(table, &["cursor", "style"])
        .or_else(|| take_str(table, &["cursor", "style", "shape"]));
    if let Some(shape_text) = shape_text {
        let shape = match shape_text.as_str() {
            "Block" => Some(CursorShape::Block),
            "Underline" => Some(CursorShape::Underline),
            "Beam" => Some(CursorShape::Beam),
            _ => None,
        };
        match shape {
            Some(shape) => schema.cursor.get_or_insert_default().shape = Some(shape),
            None => diagnostics.warn(format!("cursor.style: unknown shape `{shape_text}`")),
        }
    }
    if let Some(blinking) = take_str(table, &["cursor", "style", "blinking"]) {
        let blink = match blinking.as_str() {
            "Never" | "Off" => Some(false),
            "On" | "Always" => Some(true),
            _ => None,
        };
        match blink {
            Some(blink) => schema.cursor.get_or_insert_default().blink = Some(blink),
            None => diagnostics.warn(format!("cursor.style.blinking: bad value `{blinking}`")),
        }
    }
    if let Some(interval) = take_i64(table, &["cursor", "blink_interval"]) {
        if let Err(err) = schema
            .cursor
            .get_or_insert_default()
            .set_blink_interval_ms(interval)
        {
            diagnostics.warn(err.to_string());
        }
    }
}

fn map_window(table: &mut toml::Table, schema: &mut Schema, diagnostics: &mut Diagnostics) {
    if let Some(opacity) = take_f64(table, &["window", "opacity"]) {
        if let Err(err) = schema.window.get_or_insert_default().set_opacity(opacity) {
            diagnostics.warn(err.to_string());
        }
    }
    if let Some(blur) = take_bool(table, &["window", "blur"]) {
        schema.window.get_or_insert_default().blur = Some(blur);
    }
    let pad_x = take_i64(table, &["window", "padding", "x"]);
    let pad_y = take_i64(table, &["window", "padding", "y"]);
    if pad_x.is_some() || pad_y.is_some() {
        let x = pad_x.unwrap_or(0);
        let y = pad_y.unwrap_or(0);
        if let Err(err) = schema.window.get_or_insert_default().set_padding(y, x, y, x) {
            diagnostics.warn(err.to_string());
        }
    }
    if let Some(columns) = take_i64(table, &["window", "dimensions", "columns"]) {
        if let Err(err) = schema.window.get_or_insert_default().set_columns(columns) {
            diagnostics.warn(err.to_string());
        }
    }
    if let Some(lines) = take_i64(table, &["window", "dimensions", "lines"]) {
        if let Err(err) = schema.window.get_or_insert_default().set_rows(lines) {
            diagnostics.warn(err.to_string());
        }
    }
    if let Some(decorations) = take_str(table, &["window", "decorations"]) {
        match decorations.as_str() {
            "Full" => {
                schema.window.get_or_insert_default().decorations = Some(Decorations::Full);
            }
            "None" => {
                schema.window.get_or_insert_default().decorations = Some(Decorations::None);
            }
            // macOS-only chrome variants round-trip via the bucket.
            "Transparent" | "Buttonless" => {
                diagnostics.warn(format!(
                    "window.decorations `{decorations}` only replayed when exporting back to alacritty"
                ));
                schema.add_terminal_specific(
                    NAME,
                    "window.decorations",
                    json!(decorations),
                    None,
                );
            }
            other => diagnostics.warn(format!("window.decorations: bad value `{other}`")),
        }
    }
    if let Some(mode) = take_str(table, &["window", "startup_mode"]) {
        let startup = match mode.as_str() {
            "Windowed" => Some(StartupMode::Windowed),
            "Maximized" => Some(StartupMode::Maximized),
            "Fullscreen" | "SimpleFullscreen" => Some(StartupMode::Fullscreen),
            _ => None,
        };
        match startup {
            Some(startup) => {
                schema.window.get_or_insert_default().startup_mode = Some(startup);
            }
            None => diagnostics.warn(format!("window.startup_mode: bad value `{mode}`")),
        }
    }
}

fn map_behavior(table: &mut toml::Table, schema: &mut Schema, diagnostics: &mut Diagnostics) {
    if let Some(history) = take_i64(table, &["scrolling", "history"]) {
        if let Err(err) = schema
            .behavior
            .get_or_insert_default()
            .set_scrollback_lines(history)
        {
            diagnostics.warn(err.to_string());
        }
    }
    if let Some(duration) = take_i64(table, &["bell", "duration"]) {
        let behavior = schema.behavior.get_or_insert_default();
        behavior.bell = Some(if duration > 0 {
            BellMode::Visual
        } else {
            BellMode::None
        });
    }
    if let Some(save) = take_bool(table, &["selection", "save_to_clipboard"]) {
        schema.behavior.get_or_insert_default().copy_on_select = Some(save);
    }
    if let Some(hide) = take_bool(table, &["mouse", "hide_when_typing"]) {
        schema.behavior.get_or_insert_default().mouse_hide_while_typing = Some(hide);
    }
    if let Some(Toml::Table(env)) = take_path(table, &["env"]) {
        let behavior = schema.behavior.get_or_insert_default();
        for (name, value) in env {
            match value {
                Toml::String(value) if name == "TERM" => behavior.term = Some(value),
                Toml::String(value) => {
                    behavior.env.insert(name, value);
                }
                _ => diagnostics.warn(format!("env.{name}: expected a string")),
            }
        }
    }
    match take_path(table, &["terminal", "shell"]) {
        Some(Toml::String(shell)) => {
            schema.behavior.get_or_insert_default().shell = Some(shell);
        }
        Some(Toml::Table(mut shell)) => {
            let behavior = schema.behavior.get_or_insert_default();
            if let Some(Toml::String(program)) = shell.remove("program") {
                behavior.shell = Some(program);
            }
            if let Some(Toml::Array(args)) = shell.remove("args") {
                behavior.shell_args = args
                    .into_iter()
                    .filter_map(|arg| match arg {
                        Toml::String(arg) => Some(arg),
                        _ => None,
                    })
                    .collect();
            }
        }
        Some(_) => diagnostics.warn("terminal.shell: expected a string or table"),
        None => {}
    }
}

fn map_bindings(table: &mut toml::Table, schema: &mut Schema, diagnostics: &mut Diagnostics) {
    let Some(Toml::Array(bindings)) = take_path(table, &["keyboard", "bindings"]) else {
        return;
    };
    for entry in bindings {
        match canonical_binding(&entry) {
            Some(binding) => schema.key_bindings.push(binding),
            None => {
                diagnostics.warn(
                    "key binding not representable canonically, only replayed when exporting back to alacritty",
                );
                schema.add_terminal_specific(
                    NAME,
                    "keyboard.bindings",
                    toml_to_json(&entry),
                    None,
                );
            }
        }
    }
}

fn canonical_binding(entry: &Toml) -> Option<KeyBinding> {
    let table = entry.as_table()?;
    // Mode- or chars-based bindings have no canonical form.
    if table.contains_key("mode") || table.contains_key("chars") {
        return None;
    }
    let key = table.get("key")?.as_str()?;
    let mods = match table.get("mods") {
        Some(mods) => mods
            .as_str()?
            .split('|')
            .map(|m| m.trim().parse::<Modifier>())
            .collect::<Result<Vec<_>, _>>()
            .ok()?,
        None => Vec::new(),
    };
    let action = table.get("action")?.as_str()?;
    let canonical = match action {
        "Copy" => "copy",
        "Paste" => "paste",
        "CreateNewWindow" | "SpawnNewInstance" => "new_window",
        "IncreaseFontSize" => "increase_font_size",
        "DecreaseFontSize" => "decrease_font_size",
        "ResetFontSize" => "reset_font_size",
        "ToggleFullscreen" => "toggle_fullscreen",
        "ClearHistory" => "clear_scrollback",
        _ => return None,
    };
    KeyBinding::new(key, mods, canonical, None).ok()
}

fn native_action(binding: &KeyBinding) -> Option<&'static str> {
    Some(match binding.action.as_str() {
        "copy" => "Copy",
        "paste" => "Paste",
        "new_window" => "CreateNewWindow",
        "increase_font_size" => "IncreaseFontSize",
        "decrease_font_size" => "DecreaseFontSize",
        "reset_font_size" => "ResetFontSize",
        "toggle_fullscreen" => "ToggleFullscreen",
        "clear_scrollback" => "ClearHistory",
        _ => return None,
    })
}

// === Export direction ===

fn export_font(schema: &Schema, table: &mut toml::Table, diagnostics: &mut Diagnostics) {
    let Some(font) = &schema.font else {
        return;
    };
    let variants = [
        ("normal", &font.family),
        ("bold", &font.bold_family),
        ("italic", &font.italic_family),
        ("bold_italic", &font.bold_italic_family),
    ];
    for (variant, family) in variants {
        if let Some(family) = family {
            insert_path(
                table,
                &format!("font.{variant}.family"),
                Toml::String(family.clone()),
            );
        }
    }
    if let Some(size) = font.size {
        insert_path(table, "font.size", Toml::Float(size));
    }
    if font.line_height.is_some() {
        diagnostics.warn("line height is not configurable in alacritty, dropped");
    }
    if font.ligatures.is_some() {
        diagnostics.warn("ligature toggle is not configurable in alacritty, dropped");
    }
    if !font.features.is_empty() {
        diagnostics.warn("font features are not configurable in alacritty, dropped");
    }
}

fn export_colors(schema: &Schema, table: &mut toml::Table, diagnostics: &mut Diagnostics) {
    if let Some(scheme) = &schema.color_scheme {
        if scheme.name.is_some() {
            diagnostics.warn("named color schemes are not referenced in alacritty, dropped");
        }
        let semantic = [
            ("colors.primary.foreground", scheme.foreground),
            ("colors.primary.background", scheme.background),
            ("colors.cursor.cursor", scheme.cursor),
            ("colors.cursor.text", scheme.cursor_text),
            ("colors.selection.background", scheme.selection),
            ("colors.selection.text", scheme.selection_text),
        ];
        for (path, color) in semantic {
            if let Some(color) = color {
                insert_path(table, path, Toml::String(color.to_hex()));
            }
        }
        const ANSI_NAMES: [&str; 8] = [
            "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
        ];
        for (group, offset) in [("normal", 0u8), ("bright", 8u8)] {
            for (index, name) in ANSI_NAMES.iter().enumerate() {
                if let Some(color) = scheme.ansi_color(offset + index as u8) {
                    insert_path(
                        table,
                        &format!("colors.{group}.{name}"),
                        Toml::String(color.to_hex()),
                    );
                }
            }
        }
    }
    if let Some(panes) = &schema.panes {
        if panes.divider_color.is_some() {
            diagnostics.warn("pane divider color has no equivalent in alacritty, dropped");
        }
        if panes.inactive_dim.is_some() {
            diagnostics.warn("inactive pane dimming has no equivalent in alacritty, dropped");
        }
    }
}

fn export_cursor(schema: &Schema, table: &mut toml::Table) {
    let Some(cursor) = &schema.cursor else {
        return;
    };
    if let Some(shape) = cursor.shape {
        let native = match shape {
            CursorShape::Block => "Block",
            CursorShape::Beam => "Beam",
            CursorShape::Underline => "Underline",
        };
        insert_path(table, "cursor.style.shape", Toml::String(native.to_string()));
    }
    if let Some(blink) = cursor.blink {
        insert_path(
            table,
            "cursor.style.blinking",
            Toml::String(if blink { "On" } else { "Off" }.to_string()),
        );
    }
    if let Some(interval) = cursor.blink_interval_ms {
        insert_path(table, "cursor.blink_interval", Toml::Integer(interval as i64));
    }
}

fn export_window(schema: &Schema, table: &mut toml::Table, diagnostics: &mut Diagnostics) {
    let Some(window) = &schema.window else {
        return;
    };
    if let Some(opacity) = window.opacity {
        insert_path(table, "window.opacity", Toml::Float(opacity));
    }
    if let Some(blur) = window.blur {
        insert_path(table, "window.blur", Toml::Boolean(blur));
    }
    if let Some(padding) = window.padding {
        // Alacritty padding is symmetric; fold four edges down to x/y.
        if padding.top != padding.bottom || padding.left != padding.right {
            diagnostics.warn("asymmetric padding folded to top/left values for alacritty");
        }
        insert_path(
            table,
            "window.padding.x",
            Toml::Integer(padding.left as i64),
        );
        insert_path(table, "window.padding.y", Toml::Integer(padding.top as i64));
    }
    if let Some(columns) = window.columns {
        insert_path(
            table,
            "window.dimensions.columns",
            Toml::Integer(columns as i64),
        );
    }
    if let Some(rows) = window.rows {
        insert_path(table, "window.dimensions.lines", Toml::Integer(rows as i64));
    }
    if let Some(decorations) = window.decorations {
        let native = match decorations {
            Decorations::Full => "Full",
            Decorations::None => "None",
            Decorations::Resize => {
                diagnostics
                    .warn("resize-only decorations have no equivalent in alacritty, using None");
                "None"
            }
        };
        insert_path(table, "window.decorations", Toml::String(native.to_string()));
    }
    if let Some(mode) = window.startup_mode {
        let native = match mode {
            StartupMode::Windowed => "Windowed",
            StartupMode::Maximized => "Maximized",
            StartupMode::Fullscreen => "Fullscreen",
        };
        insert_path(
            table,
            "window.startup_mode",
            Toml::String(native.to_string()),
        );
    }
    if window.blur_radius.is_some() {
        diagnostics.warn("blur radius is not configurable in alacritty, dropped");
    }
}

fn export_behavior(schema: &Schema, table: &mut toml::Table, diagnostics: &mut Diagnostics) {
    let Some(behavior) = &schema.behavior else {
        return;
    };
    if let Some(lines) = behavior.scrollback_lines {
        let capped = behavior.scrollback_capped(MAX_HISTORY).unwrap_or(lines);
        if capped != lines {
            diagnostics.warn(format!("scrollback capped to {MAX_HISTORY} lines"));
        }
        insert_path(table, "scrolling.history", Toml::Integer(capped as i64));
    }
    match behavior.bell {
        Some(BellMode::Visual) => {
            insert_path(table, "bell.duration", Toml::Integer(150));
        }
        Some(BellMode::None) => {
            insert_path(table, "bell.duration", Toml::Integer(0));
        }
        Some(BellMode::Audible) => {
            diagnostics.warn("audible bell has no equivalent in alacritty, dropped");
        }
        None => {}
    }
    if let Some(copy) = behavior.copy_on_select {
        insert_path(table, "selection.save_to_clipboard", Toml::Boolean(copy));
    }
    if let Some(hide) = behavior.mouse_hide_while_typing {
        insert_path(table, "mouse.hide_when_typing", Toml::Boolean(hide));
    }
    for (name, value) in &behavior.env {
        insert_path(table, &format!("env.{name}"), Toml::String(value.clone()));
    }
    if let Some(term) = &behavior.term {
        insert_path(table, "env.TERM", Toml::String(term.clone()));
    }
    if let Some(shell) = &behavior.shell {
        if behavior.shell_args.is_empty() {
            insert_path(table, "terminal.shell", Toml::String(shell.clone()));
        } else {
            let mut shell_table = toml::Table::new();
            shell_table.insert("program".to_string(), Toml::String(shell.clone()));
            shell_table.insert(
                "args".to_string(),
                Toml::Array(
                    behavior
                        .shell_args
                        .iter()
                        .map(|arg| Toml::String(arg.clone()))
                        .collect(),
                ),
            );
            insert_path(table, "terminal.shell", Toml::Table(shell_table));
        }
    }
}

fn export_bindings(schema: &Schema, table: &mut toml::Table, diagnostics: &mut Diagnostics) {
    for binding in &schema.key_bindings {
        let Some(action) = native_action(binding) else {
            diagnostics.warn(format!(
                "no alacritty action for `{}`, binding dropped",
                binding.action
            ));
            continue;
        };
        let mut entry = toml::Table::new();
        entry.insert(
            "key".to_string(),
            Toml::String(binding.key.to_ascii_uppercase()),
        );
        if !binding.mods.is_empty() {
            let mods: Vec<String> = binding
                .mods
                .iter()
                .map(|m| {
                    match m {
                        Modifier::Ctrl => "Control",
                        Modifier::Shift => "Shift",
                        Modifier::Alt => "Alt",
                        Modifier::Super => "Super",
                    }
                    .to_string()
                })
                .collect();
            entry.insert("mods".to_string(), Toml::String(mods.join("|")));
        }
        entry.insert("action".to_string(), Toml::String(action.to_string()));
        push_binding(table, Toml::Table(entry));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termweave_schema::Color;

    fn parse(source: &str) -> ParseOutcome {
        AlacrittyAdapter.parse(source).unwrap()
    }

    const SAMPLE: &str = r##"
[font]
size = 13.5

[font.normal]
family = "JetBrains Mono"

[colors.primary]
foreground = "#c5c8c6"
background = "#1d1f21"

[cursor.style]
shape = "Underline"
blinking = "On"

[window]
opacity = 0.95

[scrolling]
history = 10000

[[keyboard.bindings]]
key = "C"
mods = "Control|Shift"
action = "Copy"
"##;

    #[test]
    fn test_sample_parses_cleanly() {
        let outcome = parse(SAMPLE);
        assert!(outcome.diagnostics.is_empty());
        assert!(outcome.schema.terminal_specific.is_empty());
        assert_eq!(outcome.schema.font.as_ref().unwrap().size, Some(13.5));
        assert_eq!(
            outcome.schema.color_scheme.as_ref().unwrap().foreground,
            Some(Color::new(197, 200, 198))
        );
        assert_eq!(
            outcome.schema.cursor.as_ref().unwrap().shape,
            Some(CursorShape::Underline)
        );
        assert_eq!(outcome.schema.key_bindings[0].action, "copy");
    }

    #[test]
    fn test_unknown_table_swept_to_bucket() {
        let outcome = parse("[hints]\nalphabet = \"jfkdls\"\n");
        assert_eq!(outcome.schema.terminal_specific.len(), 1);
        assert_eq!(outcome.schema.terminal_specific[0].key, "hints.alphabet");
        assert_eq!(outcome.diagnostics.len(), 1);
    }

    #[test]
    fn test_bucket_restored_on_export() {
        let outcome = parse("[hints]\nalphabet = \"jfkdls\"\n");
        let export = AlacrittyAdapter.export(&outcome.schema).unwrap();
        assert!(export.text.contains("[hints]"));
        assert!(export.text.contains("alphabet = \"jfkdls\""));
    }

    #[test]
    fn test_invalid_toml_is_syntax_error() {
        let err = AlacrittyAdapter.parse("[window\nopacity = 0.9").unwrap_err();
        assert!(matches!(err, ConvertError::Syntax { .. }));
    }

    #[test]
    fn test_shell_table_form() {
        let outcome = parse("[terminal.shell]\nprogram = \"/bin/zsh\"\nargs = [\"--login\"]\n");
        let behavior = outcome.schema.behavior.unwrap();
        assert_eq!(behavior.shell.as_deref(), Some("/bin/zsh"));
        assert_eq!(behavior.shell_args, ["--login"]);
    }

    #[test]
    fn test_mode_binding_stays_specific() {
        let source = "[[keyboard.bindings]]\nkey = \"N\"\nmods = \"Control\"\nmode = \"Vi\"\naction = \"CreateNewWindow\"\n";
        let outcome = parse(source);
        assert!(outcome.schema.key_bindings.is_empty());
        assert_eq!(outcome.schema.terminal_specific.len(), 1);
        let export = AlacrittyAdapter.export(&outcome.schema).unwrap();
        assert!(export.text.contains("mode = \"Vi\""));
    }

    #[test]
    fn test_round_trip_settings_equality() {
        let first = parse(SAMPLE);
        let exported = AlacrittyAdapter.export(&first.schema).unwrap();
        let second = parse(&exported.text);
        assert_eq!(first.schema.font, second.schema.font);
        assert_eq!(first.schema.color_scheme, second.schema.color_scheme);
        assert_eq!(first.schema.cursor, second.schema.cursor);
        assert_eq!(first.schema.window, second.schema.window);
        assert_eq!(first.schema.behavior, second.schema.behavior);
        assert_eq!(first.schema.key_bindings, second.schema.key_bindings);
    }

    #[test]
    fn test_export_deterministic() {
        let outcome = parse(SAMPLE);
        let a = AlacrittyAdapter.export(&outcome.schema).unwrap().text;
        let b = AlacrittyAdapter.export(&outcome.schema).unwrap().text;
        assert_eq!(a, b);
    }

    #[test]
    fn test_scrollback_sentinel_capped() {
        let mut schema = Schema::default();
        let behavior = schema.behavior.get_or_insert_default();
        behavior.scrollback_lines = Some(termweave_schema::SCROLLBACK_UNLIMITED);
        let outcome = AlacrittyAdapter.export(&schema).unwrap();
        assert!(outcome.text.contains("history = 100000"));
        assert!(!outcome.diagnostics.is_empty());
    }
}
