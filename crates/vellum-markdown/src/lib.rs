// SPDX-FileCopyrightText: 2026 Vellum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token-table extraction for markdown conversion.
//!
//! Builds the two tables the external conversion algorithms consume:
//!
//! - **Parse direction**: token name → conversion descriptor, consumed by
//!   the text-to-structure parser together with the active schema and the
//!   raw-content renderer.
//! - **Serialize direction**: node and mark tables, consumed by the
//!   structure-to-text serializer.
//!
//! Both extractions are wrapped in independent per-direction
//! [`PresetManager`](vellum_plugin::PresetManager) caches so repeated
//! requests with the same configuration reuse the built table.

pub mod parse_table;
pub mod serialize_table;

pub use parse_table::{ParseTable, build_parse_table, parse_table_cache};
pub use serialize_table::{
    SerializeTables, build_serialize_tables, empty_mark_spec, serialize_table_cache,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vellum_core::config::EditorConfig;
    use vellum_plugin::PluginRegistry;

    #[test]
    fn parse_and_serialize_caches_are_independent() {
        let mut registry = PluginRegistry::new();
        vellum_plugin::install(&mut registry).unwrap();
        let mut parse = parse_table_cache();
        let mut serialize = serialize_table_cache();

        let config = EditorConfig::preset("full");
        let parse_table = parse.check(&mut registry, &config).unwrap();
        let tables = serialize.check(&mut registry, &config).unwrap();

        // Same signature, different caches, different artifacts.
        assert!(parse_table.get("strong").is_some());
        assert!(tables.marks.get("strong").is_some());
        assert!(Arc::ptr_eq(
            &parse_table,
            &parse.check(&mut registry, &config).unwrap()
        ));
    }
}
