// SPDX-FileCopyrightText: 2026 Vellum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serialize-direction node and mark table extraction.
//!
//! Symmetric to the parse direction: every element spec with a `to_markdown`
//! descriptor lands in the node or mark table under its element name. A
//! declared mark without a descriptor still gets an entry with empty
//! open/close delimiters: it serializes as plain text, which is the
//! documented default, not an error.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Value, json};
use vellum_plugin::{PluginDescriptor, PresetManager};

/// Node and mark tables handed to the external structure-to-text serializer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SerializeTables {
    /// Node name → opaque serializer descriptor.
    pub nodes: IndexMap<String, Value>,
    /// Mark name → serializer descriptor, defaulted for undeclared marks.
    pub marks: IndexMap<String, Value>,
}

/// The default descriptor for a mark declared without `to_markdown`.
pub fn empty_mark_spec() -> Value {
    json!({"open": "", "close": ""})
}

/// Build the serialize-direction tables for a selected plugin list.
///
/// Later plugins overwrite earlier ones on name collision, same precedence
/// as the parse direction.
pub fn build_serialize_tables(plugins: &[Arc<PluginDescriptor>]) -> SerializeTables {
    let mut nodes = IndexMap::new();
    let mut marks = IndexMap::new();

    for plugin in plugins {
        let Some(schema) = &plugin.schema else {
            continue;
        };

        for (name, element) in &schema.nodes {
            if let Some(spec) = &element.to_markdown {
                nodes.insert(name.clone(), spec.clone());
            }
        }

        for (name, element) in &schema.marks {
            let spec = element
                .to_markdown
                .clone()
                .unwrap_or_else(empty_mark_spec);
            marks.insert(name.clone(), spec);
        }
    }

    SerializeTables { nodes, marks }
}

/// A [`PresetManager`] with the serialize-table factory bound.
///
/// Independent of the parse-direction cache: the two never share entries.
pub fn serialize_table_cache() -> PresetManager<SerializeTables> {
    PresetManager::new("serializer", |registry, config| {
        Ok(build_serialize_tables(&registry.select(config)?))
    })
}
