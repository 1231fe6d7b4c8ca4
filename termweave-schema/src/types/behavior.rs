//! Shell, scrollback, and miscellaneous behavior configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Sentinel scrollback line count meaning "unlimited history".
///
/// Terminals without an unlimited mode clamp this to their practical
/// maximum on export.
pub const SCROLLBACK_UNLIMITED: u32 = u32::MAX;

/// Bell notification mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BellMode {
    #[default]
    Audible,
    Visual,
    None,
}

/// Terminal behavior configuration.
///
/// `env` is a sorted map so exports enumerate variables in a deterministic
/// order regardless of source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Default shell path or command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
    /// Arguments passed to the shell, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shell_args: Vec<String>,
    /// Environment variables set for the shell. Keys unique.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    /// Scrollback history in lines; [`SCROLLBACK_UNLIMITED`] means
    /// unlimited, 0 disables scrollback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scrollback_lines: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bell: Option<BellMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_on_select: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mouse_hide_while_typing: Option<bool>,
    /// Value advertised through `$TERM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
}

impl BehaviorConfig {
    /// Set the scrollback line count from a raw source value. Negative
    /// values are rejected here; adapters translate their own "unlimited"
    /// spellings (e.g. kitty's `-1`) to [`SCROLLBACK_UNLIMITED`] first.
    pub fn set_scrollback_lines(&mut self, lines: i64) -> Result<(), SchemaError> {
        let lines = u32::try_from(lines).map_err(|_| {
            SchemaError::new(
                "behavior.scrollback_lines",
                format!("must be a non-negative integer, got {lines}"),
            )
        })?;
        self.scrollback_lines = Some(lines);
        Ok(())
    }

    /// Scrollback capped to a terminal's practical maximum, resolving the
    /// unlimited sentinel.
    pub fn scrollback_capped(&self, max_lines: u32) -> Option<u32> {
        self.scrollback_lines.map(|lines| lines.min(max_lines))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply `other` over `self`: populated fields win; `shell_args` and
    /// `env` are replaced wholesale when the override has entries.
    pub fn merge_from(&mut self, other: &Self) {
        crate::merge_opt!(
            self,
            other,
            shell,
            scrollback_lines,
            bell,
            copy_on_select,
            mouse_hide_while_typing,
            term,
        );
        if !other.shell_args.is_empty() {
            self.shell_args = other.shell_args.clone();
        }
        if !other.env.is_empty() {
            self.env = other.env.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrollback_rejects_negative() {
        let mut behavior = BehaviorConfig::default();
        assert!(behavior.set_scrollback_lines(-1).is_err());
        behavior.set_scrollback_lines(10000).unwrap();
        assert_eq!(behavior.scrollback_lines, Some(10000));
    }

    #[test]
    fn test_scrollback_capped() {
        let behavior = BehaviorConfig {
            scrollback_lines: Some(SCROLLBACK_UNLIMITED),
            ..Default::default()
        };
        assert_eq!(behavior.scrollback_capped(100_000), Some(100_000));
    }

    #[test]
    fn test_env_is_sorted() {
        let mut behavior = BehaviorConfig::default();
        behavior.env.insert("ZVAR".into(), "1".into());
        behavior.env.insert("AVAR".into(), "2".into());
        let keys: Vec<&str> = behavior.env.keys().map(String::as_str).collect();
        assert_eq!(keys, ["AVAR", "ZVAR"]);
    }

    #[test]
    fn test_merge_replaces_env_wholesale() {
        let mut base = BehaviorConfig::default();
        base.env.insert("KEEP".into(), "no".into());
        let mut over = BehaviorConfig::default();
        over.env.insert("NEW".into(), "yes".into());
        base.merge_from(&over);
        assert!(!base.env.contains_key("KEEP"));
        assert_eq!(base.env.get("NEW").map(String::as_str), Some("yes"));
    }
}
