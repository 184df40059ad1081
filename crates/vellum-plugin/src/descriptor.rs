// SPDX-FileCopyrightText: 2026 Vellum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin descriptors: the unit of contribution.
//!
//! A descriptor is a capability record. Every contribution is an optional
//! field holding either declarative data (the schema fragment, the menu
//! payload) or a pure factory function invoked at build time. The engine
//! checks for presence and relocates or concatenates the results; it never
//! interprets them.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use vellum_core::config::EditorConfig;
use vellum_core::schema::{Schema, SchemaFragment};
use vellum_core::types::{Behavior, Keymap, PatternRule};

/// Factory producing a plugin's live-typing pattern rules for the active schema.
pub type RuleFactory = Arc<dyn Fn(&Schema) -> Vec<PatternRule> + Send + Sync>;

/// Factory producing a plugin's editing-behavior units for a request.
pub type BehaviorFactory = Arc<dyn Fn(&EditorConfig) -> Vec<Behavior> + Send + Sync>;

/// Factory producing a plugin's keybinding table for a request.
pub type KeymapFactory = Arc<dyn Fn(&EditorConfig) -> Keymap + Send + Sync>;

/// A named bundle of optional contributions.
#[derive(Clone, Default)]
pub struct PluginDescriptor {
    /// Unique key within the registry.
    pub id: String,
    /// Document-model contribution, if any.
    pub schema: Option<SchemaFragment>,
    /// Pattern-rule factory, if any.
    pub input_rules: Option<RuleFactory>,
    /// Behavior factory, if any.
    pub behaviors: Option<BehaviorFactory>,
    /// Keymap factory, if any.
    pub keymap: Option<KeymapFactory>,
    /// Declarative menu contribution. Carried for the UI layer, ignored here.
    pub menu: Option<Value>,
}

impl PluginDescriptor {
    /// Create an empty descriptor with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Attach a schema fragment.
    pub fn with_schema(mut self, schema: SchemaFragment) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Attach a pattern-rule factory.
    pub fn with_input_rules(
        mut self,
        factory: impl Fn(&Schema) -> Vec<PatternRule> + Send + Sync + 'static,
    ) -> Self {
        self.input_rules = Some(Arc::new(factory));
        self
    }

    /// Attach a behavior factory.
    pub fn with_behaviors(
        mut self,
        factory: impl Fn(&EditorConfig) -> Vec<Behavior> + Send + Sync + 'static,
    ) -> Self {
        self.behaviors = Some(Arc::new(factory));
        self
    }

    /// Attach a keymap factory.
    pub fn with_keymap(
        mut self,
        factory: impl Fn(&EditorConfig) -> Keymap + Send + Sync + 'static,
    ) -> Self {
        self.keymap = Some(Arc::new(factory));
        self
    }

    /// Attach a declarative menu payload.
    pub fn with_menu(mut self, menu: Value) -> Self {
        self.menu = Some(menu);
        self
    }
}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("id", &self.id)
            .field("schema", &self.schema.is_some())
            .field("input_rules", &self.input_rules.is_some())
            .field("behaviors", &self.behaviors.is_some())
            .field("keymap", &self.keymap.is_some())
            .field("menu", &self.menu.is_some())
            .finish()
    }
}
