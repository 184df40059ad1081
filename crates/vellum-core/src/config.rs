// SPDX-FileCopyrightText: 2026 Vellum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request configuration for editor sessions and conversion requests.
//!
//! An [`EditorConfig`] is what the host hands the engine for every
//! selection, artifact build, or table build. It names either a resolved
//! preset or an ad hoc include/exclude filter over the full catalogue.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::schema::Schema;

/// Per-request configuration controlling which plugins are active.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Name of a resolved preset to use, if any.
    #[serde(default)]
    pub preset: Option<String>,
    /// Ad hoc include/exclude filter applied to the full catalogue when no
    /// resolved preset matches.
    #[serde(default)]
    pub plugins: Option<PluginFilter>,
    /// The active document schema, assembled by the host and consumed by
    /// rule factories. Not part of the request identity.
    #[serde(skip)]
    pub schema: Option<Arc<Schema>>,
}

/// Include/exclude filter over plugin ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginFilter {
    /// Plugin ids appended after filtering, in listed order.
    #[serde(default)]
    pub include: Option<Vec<String>>,
    /// Plugin ids dropped from the catalogue, order of the rest preserved.
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
}

impl EditorConfig {
    /// Configuration naming a preset.
    pub fn preset(name: impl Into<String>) -> Self {
        Self {
            preset: Some(name.into()),
            ..Self::default()
        }
    }

    /// Plugin ids to append, with empty lists treated as absent.
    pub fn include_ids(&self) -> Option<&[String]> {
        self.plugins
            .as_ref()
            .and_then(|f| f.include.as_deref())
            .filter(|ids| !ids.is_empty())
    }

    /// Plugin ids to drop, with empty lists treated as absent.
    pub fn exclude_ids(&self) -> Option<&[String]> {
        self.plugins
            .as_ref()
            .and_then(|f| f.exclude.as_deref())
            .filter(|ids| !ids.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_lists_are_treated_as_absent() {
        let config = EditorConfig {
            plugins: Some(PluginFilter {
                include: Some(vec![]),
                exclude: Some(vec![]),
            }),
            ..EditorConfig::default()
        };
        assert!(config.include_ids().is_none());
        assert!(config.exclude_ids().is_none());
    }

    #[test]
    fn deserializes_from_json_options() {
        let config: EditorConfig = serde_json::from_str(
            r#"{"preset": "normal", "plugins": {"exclude": ["emoji"]}}"#,
        )
        .unwrap();
        assert_eq!(config.preset.as_deref(), Some("normal"));
        assert_eq!(config.exclude_ids(), Some(&["emoji".to_string()][..]));
        assert!(config.include_ids().is_none());
    }
}
