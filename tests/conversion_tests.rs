//! End-to-end conversions through the public pipeline.

use termweave::{ConvertError, Registry, convert};

const KITTY_SAMPLE: &str = "\
font_family JetBrains Mono
font_size 13.5
foreground #c5c8c6
background #1d1f21
scrollback_lines -1
map ctrl+shift+c copy_to_clipboard
";

const WEZTERM_SAMPLE: &str = r##"
local wezterm = require 'wezterm'
local config = wezterm.config_builder()

config.font = wezterm.font('JetBrains Mono')
config.font_size = 14.0
config.colors = { foreground = '#c5c8c6' }
config.window_background_opacity = 0.95

wezterm.on('update-status', function(window, pane)
  window:set_right_status('ok')
end)

return config
"##;

#[test]
fn test_kitty_to_wezterm() {
    let registry = Registry::builtin();
    let outcome = convert(&registry, "kitty", "wezterm", KITTY_SAMPLE).unwrap();

    assert!(outcome.text.contains("wezterm.font(\"JetBrains Mono\")"));
    assert!(outcome.text.contains("config.font_size = 13.5"));
    assert!(outcome.text.contains("foreground = \"#c5c8c6\""));
    assert!(
        outcome
            .text
            .contains("action = wezterm.action.CopyTo(\"Clipboard\")")
    );
    assert!(outcome.text.ends_with("return config\n"));

    // Unlimited history has no wezterm spelling; capped with a warning.
    assert!(outcome.text.contains("config.scrollback_lines = 1000000"));
    assert!(
        outcome
            .diagnostics
            .iter()
            .any(|d| d.contains("scrollback"))
    );
}

#[test]
fn test_wezterm_to_kitty() {
    let registry = Registry::builtin();
    let outcome = convert(&registry, "wezterm", "kitty", WEZTERM_SAMPLE).unwrap();

    assert!(outcome.text.contains("font_family JetBrains Mono"));
    assert!(outcome.text.contains("font_size 14"));
    assert!(outcome.text.contains("foreground #c5c8c6"));
    assert!(outcome.text.contains("background_opacity 0.95"));

    // The event handler only exists in wezterm; it is dropped with a
    // diagnostic, never copied into the kitty output.
    assert!(!outcome.text.contains("wezterm.on"));
    assert!(
        outcome
            .diagnostics
            .iter()
            .any(|d| d.contains("no equivalent in kitty"))
    );
}

#[test]
fn test_kitty_to_alacritty() {
    let registry = Registry::builtin();
    let outcome = convert(&registry, "kitty", "alacritty", KITTY_SAMPLE).unwrap();

    assert!(outcome.text.contains("family = \"JetBrains Mono\""));
    assert!(outcome.text.contains("size = 13.5"));
    assert!(outcome.text.contains("foreground = \"#c5c8c6\""));
    assert!(outcome.text.contains("action = \"Copy\""));
    assert!(outcome.text.contains("mods = \"Control|Shift\""));
    // Alacritty's history ceiling is lower than wezterm's.
    assert!(outcome.text.contains("history = 100000"));
}

#[test]
fn test_alacritty_to_wezterm() {
    let registry = Registry::builtin();
    let source = "\
[font.normal]
family = \"Fira Code\"

[window]
opacity = 0.9

[cursor.style]
shape = \"Beam\"
";
    let outcome = convert(&registry, "alacritty", "wezterm", source).unwrap();
    assert!(outcome.text.contains("wezterm.font(\"Fira Code\")"));
    assert!(outcome.text.contains("config.window_background_opacity = 0.9"));
    assert!(outcome.text.contains("BlinkingBar") || outcome.text.contains("SteadyBar"));
}

#[test]
fn test_conversion_is_deterministic() {
    let registry = Registry::builtin();
    let a = convert(&registry, "kitty", "wezterm", KITTY_SAMPLE).unwrap();
    let b = convert(&registry, "kitty", "wezterm", KITTY_SAMPLE).unwrap();
    assert_eq!(a.text, b.text);
}

#[test]
fn test_same_terminal_conversion_replays_bucket() {
    let registry = Registry::builtin();
    let source = "kitty_mod ctrl+alt\nfont_size 12\n";
    let outcome = convert(&registry, "kitty", "kitty", source).unwrap();
    // kitty_mod has no canonical home but survives a kitty -> kitty trip.
    assert!(outcome.text.contains("kitty_mod ctrl+alt"));
    assert!(outcome.text.contains("font_size 12"));
}

#[test]
fn test_unparseable_source_aborts() {
    let registry = Registry::builtin();
    let err = convert(&registry, "alacritty", "kitty", "[window\nbroken").unwrap_err();
    assert!(matches!(err, ConvertError::Syntax { .. }));
}

#[test]
fn test_field_errors_recover_with_diagnostics() {
    let registry = Registry::builtin();
    let source = "foreground #c5c8c6\nbackground notacolor\n";
    let outcome = convert(&registry, "kitty", "wezterm", source).unwrap();
    assert!(outcome.text.contains("foreground = \"#c5c8c6\""));
    assert!(
        outcome
            .diagnostics
            .iter()
            .any(|d| d.contains("notacolor"))
    );
}
