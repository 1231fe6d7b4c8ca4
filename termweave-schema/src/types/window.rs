//! Window geometry and chrome configuration.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Window decoration mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Decorations {
    /// Title bar and resize borders (default).
    #[default]
    Full,
    /// No decorations at all.
    None,
    /// Resize borders only, no title bar.
    Resize,
}

/// Initial window mode at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StartupMode {
    #[default]
    Windowed,
    Maximized,
    Fullscreen,
}

/// Interior padding in pixels, one value per edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    /// Equal padding on all four edges.
    pub fn uniform(value: u32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Window appearance and geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Initial width in columns. Positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    /// Initial height in rows. Positive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    /// Background opacity, 0.0 (transparent) to 1.0 (opaque).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Whether background blur is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<bool>,
    /// Blur radius in platform units. Non-negative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur_radius: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decorations: Option<Decorations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startup_mode: Option<StartupMode>,
}

impl WindowConfig {
    /// Set opacity; must lie in `[0.0, 1.0]`.
    pub fn set_opacity(&mut self, opacity: f64) -> Result<(), SchemaError> {
        if !opacity.is_finite() || !(0.0..=1.0).contains(&opacity) {
            return Err(SchemaError::new(
                "window.opacity",
                format!("must be in [0.0, 1.0], got {opacity}"),
            ));
        }
        self.opacity = Some(opacity);
        Ok(())
    }

    /// Set initial columns; must be positive.
    pub fn set_columns(&mut self, columns: i64) -> Result<(), SchemaError> {
        self.columns = Some(positive_u32("window.columns", columns)?);
        Ok(())
    }

    /// Set initial rows; must be positive.
    pub fn set_rows(&mut self, rows: i64) -> Result<(), SchemaError> {
        self.rows = Some(positive_u32("window.rows", rows)?);
        Ok(())
    }

    /// Set blur radius from a raw source value; must be non-negative.
    pub fn set_blur_radius(&mut self, radius: i64) -> Result<(), SchemaError> {
        let radius = u32::try_from(radius).map_err(|_| {
            SchemaError::new(
                "window.blur_radius",
                format!("must be a non-negative integer, got {radius}"),
            )
        })?;
        self.blur_radius = Some(radius);
        Ok(())
    }

    /// Set padding from raw per-edge source values; each must be
    /// non-negative.
    pub fn set_padding(
        &mut self,
        top: i64,
        right: i64,
        bottom: i64,
        left: i64,
    ) -> Result<(), SchemaError> {
        let edge = |value: i64| {
            u32::try_from(value).map_err(|_| {
                SchemaError::new(
                    "window.padding",
                    format!("edges must be non-negative integers, got {value}"),
                )
            })
        };
        self.padding = Some(Padding {
            top: edge(top)?,
            right: edge(right)?,
            bottom: edge(bottom)?,
            left: edge(left)?,
        });
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Re-check every range constraint; used after deserialization.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if let Some(opacity) = self.opacity
            && (!opacity.is_finite() || !(0.0..=1.0).contains(&opacity))
        {
            return Err(SchemaError::new("window.opacity", "must be in [0.0, 1.0]"));
        }
        if self.columns == Some(0) {
            return Err(SchemaError::new("window.columns", "must be positive"));
        }
        if self.rows == Some(0) {
            return Err(SchemaError::new("window.rows", "must be positive"));
        }
        Ok(())
    }

    /// Apply `other` over `self`: populated fields win.
    pub fn merge_from(&mut self, other: &Self) {
        crate::merge_opt!(
            self,
            other,
            columns,
            rows,
            opacity,
            blur,
            blur_radius,
            padding,
            decorations,
            startup_mode,
        );
    }
}

fn positive_u32(field: &'static str, value: i64) -> Result<u32, SchemaError> {
    match u32::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(SchemaError::new(
            field,
            format!("must be a positive integer, got {value}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity_bounds() {
        let mut window = WindowConfig::default();
        assert!(window.set_opacity(1.5).is_err());
        assert!(window.set_opacity(-0.1).is_err());
        window.set_opacity(0.95).unwrap();
        assert_eq!(window.opacity, Some(0.95));
        window.set_opacity(0.0).unwrap();
        window.set_opacity(1.0).unwrap();
    }

    #[test]
    fn test_dimensions_positive() {
        let mut window = WindowConfig::default();
        assert!(window.set_columns(0).is_err());
        assert!(window.set_rows(-3).is_err());
        window.set_columns(120).unwrap();
        window.set_rows(40).unwrap();
    }

    #[test]
    fn test_padding_non_negative() {
        let mut window = WindowConfig::default();
        assert!(window.set_padding(4, 4, -1, 4).is_err());
        window.set_padding(4, 8, 4, 8).unwrap();
        assert_eq!(
            window.padding,
            Some(Padding {
                top: 4,
                right: 8,
                bottom: 4,
                left: 8
            })
        );
    }

    #[test]
    fn test_validation_error_names_field() {
        let mut window = WindowConfig::default();
        let err = window.set_opacity(1.5).unwrap_err();
        assert_eq!(err.field, "window.opacity");
        assert!(err.message.contains("[0.0, 1.0]"));
    }

    #[test]
    fn test_validate_after_deserialize() {
        let window = WindowConfig {
            opacity: Some(2.0),
            ..Default::default()
        };
        assert!(window.validate().is_err());
    }
}
