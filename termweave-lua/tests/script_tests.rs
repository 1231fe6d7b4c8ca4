//! End-to-end tests for the scripting-dialect engine: real-world shaped
//! configurations in, evaluated settings and verbatim remainders out.

use termweave_lua::{ScriptWriter, Value, parse_module};

const SAMPLE: &str = r#"
local wezterm = require 'wezterm'
local config = wezterm.config_builder()

config.font = wezterm.font('JetBrains Mono', { weight = 'Medium' })
config.font_size = 13.5
config.colors = {
  foreground = '#c5c8c6',
  background = '#1d1f21',
  ansi = {
    '#1d1f21', '#cc6666', '#b5bd68', '#f0c674',
    '#81a2be', '#b294bb', '#8abeb7', '#c5c8c6',
  },
}
config.scrollback_lines = 10000
config.window_padding = { left = 4, right = 4, top = 2, bottom = 2 }
config.keys = {
  { key = 'c', mods = 'CTRL|SHIFT', action = wezterm.action.CopyTo 'Clipboard' },
  { key = 'v', mods = 'CTRL|SHIFT', action = wezterm.action.PasteFrom 'Clipboard' },
}

return config
"#;

#[test]
fn test_full_config_evaluates_cleanly() {
    let module = parse_module(SAMPLE).unwrap();
    assert!(module.fragments.is_empty());
    assert_eq!(module.get("font_size"), Some(&Value::Number(13.5)));
    assert_eq!(
        module.get("scrollback_lines"),
        Some(&Value::Number(10000.0))
    );
    let colors = module.get("colors").unwrap();
    assert_eq!(
        colors.get("background"),
        Some(&Value::Str("#1d1f21".into()))
    );
    let Some(Value::Array(keys)) = module.get("keys") else {
        panic!("expected keys array");
    };
    assert_eq!(keys.len(), 2);
}

#[test]
fn test_unknown_constructs_survive_round_trip() {
    let source = r#"
local wezterm = require 'wezterm'
local config = wezterm.config_builder()
config.font_size = 12
wezterm.on('update-status', function(window)
  window:set_right_status('hi')
end)
config.custom_feature(42)
return config
"#;
    let module = parse_module(source).unwrap();
    assert_eq!(module.fragments.len(), 2);

    let mut writer = ScriptWriter::new();
    for (key, value) in module.settings() {
        writer.assign(key, value.clone());
    }
    for fragment in &module.fragments {
        writer.fragment(fragment.clone());
    }
    let out = writer.render();
    assert!(out.contains("config.font_size = 12"));
    assert!(out.contains("wezterm.on('update-status', function(window)"));
    assert!(out.contains("config.custom_feature(42)"));
    assert!(out.trim_end().ends_with("return config"));
}

#[test]
fn test_regeneration_is_byte_identical() {
    let module = parse_module(SAMPLE).unwrap();
    let render = |module: &termweave_lua::ScriptModule| {
        let mut writer = ScriptWriter::new();
        for (key, value) in module.settings() {
            writer.assign(key, value.clone());
        }
        writer.render()
    };
    assert_eq!(render(&module), render(&module));

    // Regenerated output parses back to the same settings.
    let regenerated = parse_module(&render(&module)).unwrap();
    assert_eq!(
        regenerated.get("font_size"),
        module.get("font_size")
    );
    assert_eq!(regenerated.get("colors"), module.get("colors"));
}
