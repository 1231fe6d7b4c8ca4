//! Canonical interchange codecs.
//!
//! The schema serializes through serde; these helpers pin the two
//! supported encodings and validate on the way in. Swapping or adding an
//! encoding touches only this file.

use termweave_schema::Schema;

use crate::adapter::ConvertError;

pub fn to_toml(schema: &Schema) -> Result<String, ConvertError> {
    toml::to_string_pretty(schema).map_err(|err| ConvertError::Codec(err.to_string()))
}

pub fn from_toml(text: &str) -> Result<Schema, ConvertError> {
    let schema: Schema =
        toml::from_str(text).map_err(|err| ConvertError::Codec(err.to_string()))?;
    schema.validate()?;
    Ok(schema)
}

pub fn to_json(schema: &Schema) -> Result<String, ConvertError> {
    serde_json::to_string_pretty(schema).map_err(|err| ConvertError::Codec(err.to_string()))
}

pub fn from_json(text: &str) -> Result<Schema, ConvertError> {
    let schema: Schema =
        serde_json::from_str(text).map_err(|err| ConvertError::Codec(err.to_string()))?;
    schema.validate()?;
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use termweave_schema::{Color, ColorScheme, FontConfig};

    fn sample() -> Schema {
        let mut schema = Schema::for_source("kitty");
        schema.color_scheme = Some(ColorScheme {
            foreground: Some(Color::new(197, 200, 198)),
            background: Some(Color::new(29, 31, 33)),
            ..Default::default()
        });
        let mut font = FontConfig::default();
        font.family = Some("JetBrains Mono".to_string());
        font.set_size(13.5).unwrap();
        schema.font = Some(font);
        schema
    }

    #[test]
    fn test_toml_round_trip() {
        let schema = sample();
        let text = to_toml(&schema).unwrap();
        assert_eq!(from_toml(&text).unwrap(), schema);
    }

    #[test]
    fn test_json_round_trip() {
        let schema = sample();
        let text = to_json(&schema).unwrap();
        assert_eq!(from_json(&text).unwrap(), schema);
    }

    #[test]
    fn test_decode_rejects_out_of_range() {
        let text = r#"
version = "1.0"

[window]
opacity = 1.5
"#;
        let err = from_toml(text).unwrap_err();
        assert!(matches!(err, ConvertError::Schema(_)));
    }

    #[test]
    fn test_decode_rejects_out_of_range_pane_dim() {
        let text = r#"
version = "1.0"

[panes]
inactive_dim = 5.0
"#;
        let err = from_toml(text).unwrap_err();
        assert!(matches!(err, ConvertError::Schema(_)));
    }

    #[test]
    fn test_decode_rejects_duplicate_binding_mods() {
        let text = r#"
version = "1.0"

[[key_bindings]]
key = "c"
mods = ["ctrl", "ctrl"]
action = "copy"
"#;
        let err = from_toml(text).unwrap_err();
        assert!(matches!(err, ConvertError::Schema(_)));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            from_toml("not = [valid"),
            Err(ConvertError::Codec(_))
        ));
    }
}
