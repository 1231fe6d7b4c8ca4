//! Round-trip stability: parse -> export -> parse must converge, and the
//! canonical interchange encodings must reproduce the schema exactly.

use termweave::{Registry, convert, interchange};

fn roundtrip_converges(terminal: &str, source: &str) {
    let registry = Registry::builtin();
    let adapter = registry.get(terminal).unwrap();

    let first = adapter.parse(source).unwrap();
    let text = adapter.export(&first.schema).unwrap().text;
    let second = adapter.parse(&text).unwrap();
    assert_eq!(
        first.schema, second.schema,
        "{terminal} round trip changed the schema"
    );

    // A second trip must be a fixed point.
    let text_again = adapter.export(&second.schema).unwrap().text;
    assert_eq!(text, text_again, "{terminal} export is not idempotent");
}

#[test]
fn test_kitty_roundtrip_converges() {
    roundtrip_converges(
        "kitty",
        "\
font_family JetBrains Mono
font_size 13.5
foreground #c5c8c6
background #1d1f21
cursor_shape beam
background_opacity 0.95
scrollback_lines 10000
enable_audio_bell no
map ctrl+shift+c copy_to_clipboard
map ctrl+shift+v paste_from_clipboard
",
    );
}

#[test]
fn test_wezterm_roundtrip_converges() {
    roundtrip_converges(
        "wezterm",
        r##"
local wezterm = require 'wezterm'
local config = wezterm.config_builder()
config.font = wezterm.font('JetBrains Mono')
config.font_size = 13.5
config.colors = { foreground = '#c5c8c6', background = '#1d1f21' }
config.window_background_opacity = 0.95
config.scrollback_lines = 10000
return config
"##,
    );
}

#[test]
fn test_alacritty_roundtrip_converges() {
    roundtrip_converges(
        "alacritty",
        "\
[font]
size = 13.5

[font.normal]
family = \"JetBrains Mono\"

[colors.primary]
foreground = \"#c5c8c6\"
background = \"#1d1f21\"

[window]
opacity = 0.95

[scrolling]
history = 10000
",
    );
}

#[test]
fn test_unknown_settings_survive_own_roundtrip() {
    let registry = Registry::builtin();
    let sources = [
        ("kitty", "confirm_os_window_close 2\n"),
        ("alacritty", "[hints]\nalphabet = \"jfkdls\"\n"),
        (
            "wezterm",
            "local wezterm = require 'wezterm'\nlocal config = wezterm.config_builder()\nconfig.custom_feature(42)\nreturn config\n",
        ),
    ];
    for (terminal, source) in sources {
        let outcome = convert(&registry, terminal, terminal, source).unwrap();
        let marker = match terminal {
            "kitty" => "confirm_os_window_close 2",
            "alacritty" => "alphabet = \"jfkdls\"",
            _ => "config.custom_feature(42)",
        };
        assert!(
            outcome.text.contains(marker),
            "{terminal} lost its own setting: {}",
            outcome.text
        );
    }
}

#[test]
fn test_interchange_preserves_parsed_schema() {
    let registry = Registry::builtin();
    let adapter = registry.get("kitty").unwrap();
    let parsed = adapter
        .parse("font_size 13.5\nforeground #c5c8c6\nkitty_mod ctrl+alt\n")
        .unwrap();

    let toml_text = interchange::to_toml(&parsed.schema).unwrap();
    assert_eq!(interchange::from_toml(&toml_text).unwrap(), parsed.schema);

    let json_text = interchange::to_json(&parsed.schema).unwrap();
    assert_eq!(interchange::from_json(&json_text).unwrap(), parsed.schema);
}

#[test]
fn test_interchange_carries_bucket_entries() {
    let registry = Registry::builtin();
    let adapter = registry.get("kitty").unwrap();
    let parsed = adapter.parse("kitty_mod ctrl+alt\n").unwrap();

    // Export through the interchange text and back, then to native text.
    let toml_text = interchange::to_toml(&parsed.schema).unwrap();
    let schema = interchange::from_toml(&toml_text).unwrap();
    let text = adapter.export(&schema).unwrap().text;
    assert!(text.contains("kitty_mod ctrl+alt"));
}
