// SPDX-FileCopyrightText: 2026 Vellum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Artifact builders: pure derivations over a selected plugin list.
//!
//! Each builder resolves the active plugin list for the request, iterates it
//! once in order, and concatenates each descriptor's contribution, skipping
//! descriptors lacking that capability. List order is the only priority
//! mechanism: the rule engine takes the first matching pattern rule, and the
//! key-dispatch layer layers keymap tables so earlier plugins win.

use vellum_core::config::EditorConfig;
use vellum_core::error::VellumError;
use vellum_core::schema::Schema;
use vellum_core::types::{Behavior, Keymap, PatternRule};

use crate::registry::PluginRegistry;

/// The fixed built-in typography rules prepended to every rule list.
///
/// Smart quotes, ellipsis, and em dash, with the trigger patterns the
/// external rule engine expects.
pub fn builtin_rules() -> Vec<PatternRule> {
    vec![
        PatternRule::substitution(
            "open_double_quote",
            r#"(?:^|[\s{\[(<'"\u{2018}\u{201C}])(")$"#,
            "\u{201C}",
        ),
        PatternRule::substitution("close_double_quote", r#""$"#, "\u{201D}"),
        PatternRule::substitution(
            "open_single_quote",
            r#"(?:^|[\s{\[(<'"\u{2018}\u{201C}])(')$"#,
            "\u{2018}",
        ),
        PatternRule::substitution("close_single_quote", r"'$", "\u{2019}"),
        PatternRule::substitution("ellipsis", r"\.\.\.$", "\u{2026}"),
        PatternRule::substitution("em_dash", r"--$", "\u{2014}"),
    ]
}

/// Build the ordered live-typing rule list for a request.
///
/// Built-ins come first, then each plugin's rules in plugin order, so the
/// first-match tie-break follows declaration order.
pub fn build_pattern_rules(
    registry: &mut PluginRegistry,
    config: &EditorConfig,
) -> Result<Vec<PatternRule>, VellumError> {
    let plugins = registry.select(config)?;
    let default_schema = Schema::default();
    let schema = config.schema.as_deref().unwrap_or(&default_schema);

    let mut rules = builtin_rules();
    for plugin in &plugins {
        if let Some(factory) = &plugin.input_rules {
            rules.extend(factory(schema));
        }
    }
    Ok(rules)
}

/// Build the ordered behavior-unit list for a request.
///
/// Plugin order determines relative priority when multiple behaviors
/// observe the same interaction.
pub fn build_behaviors(
    registry: &mut PluginRegistry,
    config: &EditorConfig,
) -> Result<Vec<Behavior>, VellumError> {
    let plugins = registry.select(config)?;

    let mut behaviors = Vec::new();
    for plugin in &plugins {
        if let Some(factory) = &plugin.behaviors {
            behaviors.extend(factory(config));
        }
    }
    Ok(behaviors)
}

/// Build the ordered keybinding-table list for a request.
///
/// Each plugin's keymap stays a separate table; the consumer layers them in
/// this order, so on a shared key the earlier plugin's binding wins.
pub fn build_keymaps(
    registry: &mut PluginRegistry,
    config: &EditorConfig,
) -> Result<Vec<Keymap>, VellumError> {
    let plugins = registry.select(config)?;

    let mut keymaps = Vec::new();
    for plugin in &plugins {
        if let Some(factory) = &plugin.keymap {
            keymaps.push(factory(config));
        }
    }
    Ok(keymaps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::PluginDescriptor;
    use indexmap::IndexMap;
    use serde_json::json;

    fn rule_plugin(id: &str, rule_name: &'static str) -> PluginDescriptor {
        PluginDescriptor::new(id)
            .with_input_rules(move |_| vec![PatternRule::substitution(rule_name, "x$", "y")])
    }

    #[test]
    fn builtins_precede_plugin_rules_in_plugin_order() {
        let mut registry = PluginRegistry::new();
        registry.register(rule_plugin("first", "rule_first"), None);
        registry.register(PluginDescriptor::new("silent"), None);
        registry.register(rule_plugin("second", "rule_second"), None);

        let rules = build_pattern_rules(&mut registry, &EditorConfig::default()).unwrap();
        let names: Vec<&str> = rules.iter().map(|r| r.name.as_str()).collect();

        let builtin_count = builtin_rules().len();
        assert_eq!(&names[..builtin_count], &["open_double_quote", "close_double_quote", "open_single_quote", "close_single_quote", "ellipsis", "em_dash"]);
        assert_eq!(&names[builtin_count..], &["rule_first", "rule_second"]);
    }

    #[test]
    fn behaviors_concatenate_in_plugin_order() {
        let mut registry = PluginRegistry::new();
        registry.register(
            PluginDescriptor::new("a").with_behaviors(|_| {
                vec![
                    Behavior::new("a1", json!(null)),
                    Behavior::new("a2", json!(null)),
                ]
            }),
            None,
        );
        registry.register(PluginDescriptor::new("no_behaviors"), None);
        registry.register(
            PluginDescriptor::new("b")
                .with_behaviors(|_| vec![Behavior::new("b1", json!(null))]),
            None,
        );

        let behaviors = build_behaviors(&mut registry, &EditorConfig::default()).unwrap();
        let names: Vec<&str> = behaviors.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["a1", "a2", "b1"]);
    }

    #[test]
    fn keymaps_stay_separate_tables_in_plugin_order() {
        let mut registry = PluginRegistry::new();
        registry.register(
            PluginDescriptor::new("strong").with_keymap(|_| {
                let mut map: IndexMap<String, String> = IndexMap::new();
                map.insert("Mod-b".into(), "toggle_strong".into());
                map
            }),
            None,
        );
        registry.register(
            PluginDescriptor::new("shadow").with_keymap(|_| {
                let mut map: IndexMap<String, String> = IndexMap::new();
                map.insert("Mod-b".into(), "shadowed".into());
                map
            }),
            None,
        );

        let keymaps = build_keymaps(&mut registry, &EditorConfig::default()).unwrap();
        assert_eq!(keymaps.len(), 2);
        // Both tables keep their binding; the consumer layers table 0 first.
        assert_eq!(keymaps[0]["Mod-b"], "toggle_strong");
        assert_eq!(keymaps[1]["Mod-b"], "shadowed");
    }

    #[test]
    fn builders_respect_the_selected_preset() {
        let mut registry = PluginRegistry::new();
        registry.register(
            rule_plugin("in_preset", "kept"),
            Some(crate::preset::PresetTarget::append("slim")),
        );
        registry.register(rule_plugin("outside", "dropped"), None);

        let rules = build_pattern_rules(&mut registry, &EditorConfig::preset("slim")).unwrap();
        let names: Vec<&str> = rules.iter().map(|r| r.name.as_str()).collect();
        assert!(names.contains(&"kept"));
        assert!(!names.contains(&"dropped"));
    }
}
