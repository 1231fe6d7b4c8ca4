//! Keybinding and modifier key types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Keyboard modifier for keybindings.
///
/// Variant order defines the canonical display order; modifier sets are
/// sorted on construction so equality is order-independent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    /// Control key
    Ctrl,
    /// Shift key
    Shift,
    /// Alt/Option key
    Alt,
    /// Cmd/Super/Windows key
    Super,
}

impl Modifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Ctrl => "ctrl",
            Modifier::Shift => "shift",
            Modifier::Alt => "alt",
            Modifier::Super => "super",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modifier {
    type Err = SchemaError;

    /// Accepts the aliases the covered terminals use.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => Ok(Modifier::Ctrl),
            "shift" => Ok(Modifier::Shift),
            "alt" | "option" | "opt" => Ok(Modifier::Alt),
            "super" | "cmd" | "command" | "meta" | "win" => Ok(Modifier::Super),
            other => Err(SchemaError::new(
                "key_bindings.mods",
                format!("unknown modifier `{other}`"),
            )),
        }
    }
}

/// A keyboard shortcut binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// The key, as spelled by the source terminal (e.g. `c`, `Return`).
    pub key: String,
    /// Modifier set, sorted canonical order, no duplicates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mods: Vec<Modifier>,
    /// Action identifier (e.g. `copy`, `SpawnTab`).
    pub action: String,
    /// Optional action parameter (e.g. a clipboard destination).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_param: Option<String>,
}

impl KeyBinding {
    /// Build a binding, sorting the modifier set into canonical order.
    /// Duplicate modifiers are invalid.
    pub fn new(
        key: impl Into<String>,
        mods: Vec<Modifier>,
        action: impl Into<String>,
        action_param: Option<String>,
    ) -> Result<Self, SchemaError> {
        let mut mods = mods;
        mods.sort();
        if mods.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(SchemaError::new(
                "key_bindings.mods",
                "duplicate modifier in set",
            ));
        }
        Ok(Self {
            key: key.into(),
            mods,
            action: action.into(),
            action_param,
        })
    }

    /// Re-check the modifier-set invariant (sorted, no duplicates) for
    /// bindings that arrived through deserialization.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.mods.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(SchemaError::new(
                "key_bindings.mods",
                "modifiers must be in canonical order without duplicates",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_aliases() {
        assert_eq!("Control".parse::<Modifier>().unwrap(), Modifier::Ctrl);
        assert_eq!("cmd".parse::<Modifier>().unwrap(), Modifier::Super);
        assert_eq!("option".parse::<Modifier>().unwrap(), Modifier::Alt);
        assert!("hyper".parse::<Modifier>().is_err());
    }

    #[test]
    fn test_mod_order_independent_equality() {
        let a = KeyBinding::new(
            "c",
            vec![Modifier::Shift, Modifier::Ctrl],
            "copy",
            None,
        )
        .unwrap();
        let b = KeyBinding::new(
            "c",
            vec![Modifier::Ctrl, Modifier::Shift],
            "copy",
            None,
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_validate_recheck_mods() {
        let binding = KeyBinding {
            key: "c".to_string(),
            mods: vec![Modifier::Ctrl, Modifier::Ctrl],
            action: "copy".to_string(),
            action_param: None,
        };
        assert!(binding.validate().is_err());

        let binding =
            KeyBinding::new("c", vec![Modifier::Shift, Modifier::Ctrl], "copy", None).unwrap();
        assert!(binding.validate().is_ok());
    }

    #[test]
    fn test_duplicate_modifiers_invalid() {
        let err = KeyBinding::new(
            "c",
            vec![Modifier::Ctrl, Modifier::Ctrl],
            "copy",
            None,
        )
        .unwrap_err();
        assert_eq!(err.field, "key_bindings.mods");
    }
}
