//! Tab bar and pane visual configuration.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::SchemaError;

/// When the tab bar is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TabBarVisibility {
    #[default]
    Always,
    /// Hidden while only one tab is open.
    Auto,
    Never,
}

/// Tab bar position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TabBarPosition {
    #[default]
    Top,
    Bottom,
}

/// Tab bar configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<TabBarVisibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<TabBarPosition>,
}

impl TabConfig {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply `other` over `self`: populated fields win.
    pub fn merge_from(&mut self, other: &Self) {
        crate::merge_opt!(self, other, visibility, position);
    }
}

/// Split pane visual configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaneConfig {
    /// Color of the divider between split panes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divider_color: Option<Color>,
    /// Brightness factor applied to inactive panes, 0.0-1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inactive_dim: Option<f64>,
}

impl PaneConfig {
    /// Set the inactive-pane dim factor; must lie in `[0.0, 1.0]`.
    pub fn set_inactive_dim(&mut self, factor: f64) -> Result<(), SchemaError> {
        if !factor.is_finite() || !(0.0..=1.0).contains(&factor) {
            return Err(SchemaError::new(
                "panes.inactive_dim",
                format!("must be in [0.0, 1.0], got {factor}"),
            ));
        }
        self.inactive_dim = Some(factor);
        Ok(())
    }

    /// Re-check the range constraint the setter enforces, for values
    /// that arrived through deserialization.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if let Some(factor) = self.inactive_dim
            && (!factor.is_finite() || !(0.0..=1.0).contains(&factor))
        {
            return Err(SchemaError::new(
                "panes.inactive_dim",
                format!("must be in [0.0, 1.0], got {factor}"),
            ));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply `other` over `self`: populated fields win.
    pub fn merge_from(&mut self, other: &Self) {
        crate::merge_opt!(self, other, divider_color, inactive_dim);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_dim_bounds() {
        let mut panes = PaneConfig::default();
        assert!(panes.set_inactive_dim(1.2).is_err());
        panes.set_inactive_dim(0.8).unwrap();
        assert_eq!(panes.inactive_dim, Some(0.8));
    }

    #[test]
    fn test_validate_recheck_inactive_dim() {
        let panes = PaneConfig {
            inactive_dim: Some(5.0),
            ..Default::default()
        };
        assert_eq!(panes.validate().unwrap_err().field, "panes.inactive_dim");
        assert!(PaneConfig::default().validate().is_ok());
    }
}
