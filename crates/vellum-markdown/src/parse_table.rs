// SPDX-FileCopyrightText: 2026 Vellum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parse-direction token table extraction.
//!
//! Walks the schema contributions of a selected plugin list and collects
//! every `parse_markdown` descriptor into a flat table keyed by token name.
//! The table, together with the active schema and the raw-content renderer,
//! is what the external text-to-structure parser consumes; the descriptors
//! themselves stay opaque here.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use vellum_core::schema::ParseSpec;
use vellum_plugin::{PluginDescriptor, PresetManager};

/// Flat token table: token name → opaque conversion descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseTable {
    /// Descriptors in first-contribution order; on a key collision the later
    /// plugin's descriptor replaces the earlier one.
    pub tokens: IndexMap<String, Value>,
}

impl ParseTable {
    /// The descriptor registered for a token, if any.
    pub fn get(&self, token: &str) -> Option<&Value> {
        self.tokens.get(token)
    }

    /// Number of registered tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if no tokens are registered.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Build the parse-direction table for a selected plugin list.
///
/// Elements register under their own name unless their descriptor names an
/// explicit token. Registration order is precedence order: on a duplicate
/// key the last plugin wins.
pub fn build_parse_table(plugins: &[Arc<PluginDescriptor>]) -> ParseTable {
    let mut tokens = IndexMap::new();

    for plugin in plugins {
        let Some(schema) = &plugin.schema else {
            continue;
        };
        for (name, element) in schema.elements() {
            let Some(parse) = &element.parse_markdown else {
                continue;
            };
            match parse {
                ParseSpec::Element(spec) => {
                    tokens.insert(name.clone(), spec.clone());
                }
                ParseSpec::Token { token, spec } => {
                    tokens.insert(token.clone(), spec.clone());
                }
            }
        }
    }

    ParseTable { tokens }
}

/// A [`PresetManager`] with the parse-table factory bound.
///
/// One cache per hosting session; requests with the same configuration
/// signature share the built table.
pub fn parse_table_cache() -> PresetManager<ParseTable> {
    PresetManager::new("parser", |registry, config| {
        Ok(build_parse_table(&registry.select(config)?))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use serde_json::json;
    use vellum_core::config::EditorConfig;
    use vellum_core::schema::{ElementSpec, SchemaFragment};
    use vellum_plugin::PluginRegistry;

    fn mark_plugin(id: &str, mark: &str, spec: Value) -> PluginDescriptor {
        let mut marks = IndexMap::new();
        marks.insert(
            mark.to_string(),
            ElementSpec {
                parse_markdown: Some(ParseSpec::Element(spec)),
                to_markdown: None,
            },
        );
        PluginDescriptor::new(id).with_schema(SchemaFragment {
            nodes: IndexMap::new(),
            marks,
        })
    }

    #[test]
    fn collects_declared_tokens_and_skips_schemaless_plugins() {
        let plugins = vec![
            Arc::new(mark_plugin("strong", "strong", json!({"mark": "strong"}))),
            Arc::new(PluginDescriptor::new("no_schema")),
            Arc::new(mark_plugin("em", "em", json!({"mark": "em"}))),
        ];

        let table = build_parse_table(&plugins);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("strong"), Some(&json!({"mark": "strong"})));
        assert_eq!(table.get("em"), Some(&json!({"mark": "em"})));
    }

    #[test]
    fn later_plugin_wins_on_duplicate_key() {
        let plugins = vec![
            Arc::new(mark_plugin("first", "strong", json!({"mark": "strong", "v": 1}))),
            Arc::new(mark_plugin("second", "strong", json!({"mark": "strong", "v": 2}))),
        ];

        let table = build_parse_table(&plugins);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("strong").unwrap()["v"], 2);
    }

    #[test]
    fn explicit_token_name_overrides_element_name() {
        let mut nodes = IndexMap::new();
        nodes.insert(
            "code_block".to_string(),
            ElementSpec {
                parse_markdown: Some(ParseSpec::Token {
                    token: "fence".into(),
                    spec: json!({"block": "code_block"}),
                }),
                to_markdown: None,
            },
        );
        let plugin = Arc::new(PluginDescriptor::new("code_block").with_schema(SchemaFragment {
            nodes,
            marks: IndexMap::new(),
        }));

        let table = build_parse_table(&[plugin]);
        assert!(table.get("code_block").is_none());
        assert_eq!(table.get("fence"), Some(&json!({"block": "code_block"})));
    }

    #[test]
    fn cache_builds_once_per_configuration() {
        let mut registry = PluginRegistry::new();
        vellum_plugin::install(&mut registry).unwrap();
        let mut cache = parse_table_cache();

        let config = EditorConfig::preset("full");
        let first = cache.check(&mut registry, &config).unwrap();
        let second = cache.check(&mut registry, &config).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.get("fence").is_some());
        assert!(first.get("paragraph").is_some());
    }
}
