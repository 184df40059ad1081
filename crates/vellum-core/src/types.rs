// SPDX-FileCopyrightText: 2026 Vellum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common artifact types shared across the Vellum workspace.
//!
//! These are the units the engine collects and orders on behalf of its
//! external collaborators: live-typing pattern rules, editing-behavior
//! units, and keybinding tables. The engine never executes any of them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A keybinding table: key combination (e.g. `"Mod-b"`) mapped to a command
/// name, in declaration order.
///
/// When two plugins bind the same key, the table contributed by the earlier
/// plugin wins because the key-dispatch layer layers tables in plugin order.
pub type Keymap = IndexMap<String, String>;

/// A live-typing pattern rule.
///
/// Applied by the external rule engine in list order; the first matching
/// rule wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRule {
    /// Stable rule name, for logging and tests.
    pub name: String,
    /// Trigger regex matched against text before the cursor.
    pub pattern: String,
    /// Literal replacement text, for plain substitution rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    /// Opaque handler descriptor for rules that build structure instead of
    /// substituting text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<Value>,
}

impl PatternRule {
    /// A plain text-substitution rule.
    pub fn substitution(
        name: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            replacement: Some(replacement.into()),
            handler: None,
        }
    }

    /// A structural rule carrying an opaque handler descriptor.
    pub fn structural(
        name: impl Into<String>,
        pattern: impl Into<String>,
        handler: Value,
    ) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            replacement: None,
            handler: Some(handler),
        }
    }
}

/// An opaque editing-behavior unit contributed by a plugin.
///
/// Relative position in the built behavior list determines priority when
/// multiple behaviors observe the same interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Behavior {
    /// Stable behavior name, for logging and tests.
    pub name: String,
    /// Opaque payload consumed by the editing-session assembly.
    #[serde(default)]
    pub payload: Value,
}

impl Behavior {
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn substitution_rule_carries_no_handler() {
        let rule = PatternRule::substitution("ellipsis", r"\.\.\.$", "\u{2026}");
        assert_eq!(rule.replacement.as_deref(), Some("\u{2026}"));
        assert!(rule.handler.is_none());
    }

    #[test]
    fn structural_rule_carries_handler() {
        let rule = PatternRule::structural("blockquote", r"^\s*>\s$", json!({"wrap": "blockquote"}));
        assert!(rule.replacement.is_none());
        assert_eq!(rule.handler, Some(json!({"wrap": "blockquote"})));
    }
}
