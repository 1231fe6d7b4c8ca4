//! Font configuration.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Font configuration for the terminal.
///
/// `features` carries terminal-specific shaping tags (HarfBuzz-style
/// `liga=0` etc.) as opaque strings in source order; they are passed
/// through, never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Primary font family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Separate family for bold text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold_family: Option<String>,
    /// Separate family for italic text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic_family: Option<String>,
    /// Separate family for bold italic text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold_italic_family: Option<String>,
    /// Font size in points. Positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Line height multiplier. Positive; 1.0 means normal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    /// Whether font ligatures are enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ligatures: Option<bool>,
    /// Opaque feature/variation tags, pass-through, ordered.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

/// Default line height when a terminal needs a concrete value and the
/// schema leaves it unset.
pub(crate) const DEFAULT_LINE_HEIGHT: f64 = 1.0;

impl FontConfig {
    /// Effective line height, defaulting to 1.0.
    pub fn line_height_or_default(&self) -> f64 {
        self.line_height.unwrap_or(DEFAULT_LINE_HEIGHT)
    }

    /// Set the font size; must be a positive finite number.
    pub fn set_size(&mut self, size: f64) -> Result<(), SchemaError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(SchemaError::new(
                "font.size",
                format!("must be a positive real, got {size}"),
            ));
        }
        self.size = Some(size);
        Ok(())
    }

    /// Set the line height multiplier; must be a positive finite number.
    pub fn set_line_height(&mut self, height: f64) -> Result<(), SchemaError> {
        if !height.is_finite() || height <= 0.0 {
            return Err(SchemaError::new(
                "font.line_height",
                format!("must be a positive real, got {height}"),
            ));
        }
        self.line_height = Some(height);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Re-check every range constraint; used after deserialization.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if let Some(size) = self.size
            && (!size.is_finite() || size <= 0.0)
        {
            return Err(SchemaError::new("font.size", "must be a positive real"));
        }
        if let Some(height) = self.line_height
            && (!height.is_finite() || height <= 0.0)
        {
            return Err(SchemaError::new(
                "font.line_height",
                "must be a positive real",
            ));
        }
        Ok(())
    }

    /// Apply `other` over `self`: populated fields win; `features` is
    /// replaced wholesale when the override has entries.
    pub fn merge_from(&mut self, other: &Self) {
        crate::merge_opt!(
            self,
            other,
            family,
            bold_family,
            italic_family,
            bold_italic_family,
            size,
            line_height,
            ligatures,
        );
        if !other.features.is_empty() {
            self.features = other.features.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_must_be_positive() {
        let mut font = FontConfig::default();
        assert!(font.set_size(0.0).is_err());
        assert!(font.set_size(-3.0).is_err());
        assert!(font.set_size(f64::NAN).is_err());
        font.set_size(14.0).unwrap();
        assert_eq!(font.size, Some(14.0));
    }

    #[test]
    fn test_line_height_default() {
        let font = FontConfig::default();
        assert_eq!(font.line_height_or_default(), 1.0);
    }

    #[test]
    fn test_merge_replaces_features_wholesale() {
        let mut base = FontConfig {
            features: vec!["liga=0".into(), "calt=0".into()],
            ..Default::default()
        };
        let over = FontConfig {
            features: vec!["ss01".into()],
            ..Default::default()
        };
        base.merge_from(&over);
        assert_eq!(base.features, ["ss01"]);
    }
}
