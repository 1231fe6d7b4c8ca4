//! Cursor appearance configuration.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Cursor shape supported by every covered terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CursorShape {
    #[default]
    Block,
    Beam,
    Underline,
}

impl CursorShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            CursorShape::Block => "block",
            CursorShape::Beam => "beam",
            CursorShape::Underline => "underline",
        }
    }
}

/// Cursor appearance and blink behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<CursorShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blink: Option<bool>,
    /// Blink interval in milliseconds. Non-negative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blink_interval_ms: Option<u32>,
}

impl CursorConfig {
    /// Set the blink interval from a raw (possibly negative) source value.
    pub fn set_blink_interval_ms(&mut self, interval: i64) -> Result<(), SchemaError> {
        let interval = u32::try_from(interval).map_err(|_| {
            SchemaError::new(
                "cursor.blink_interval_ms",
                format!("must be a non-negative integer, got {interval}"),
            )
        })?;
        self.blink_interval_ms = Some(interval);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply `other` over `self`: populated fields win.
    pub fn merge_from(&mut self, other: &Self) {
        crate::merge_opt!(self, other, shape, blink, blink_interval_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blink_interval_rejects_negative() {
        let mut cursor = CursorConfig::default();
        assert!(cursor.set_blink_interval_ms(-500).is_err());
        cursor.set_blink_interval_ms(500).unwrap();
        assert_eq!(cursor.blink_interval_ms, Some(500));
    }

    #[test]
    fn test_shape_str() {
        assert_eq!(CursorShape::Underline.as_str(), "underline");
    }
}
