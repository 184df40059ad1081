// SPDX-FileCopyrightText: 2026 Vellum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in plugin catalog.
//!
//! Descriptors for the stock markdown plugins compiled into the engine, and
//! [`install`] wiring them into a registry: most enroll into the `markdown`
//! preset at registration, `emoji`, `mention`, and `oembed` stay outside it,
//! and the `normal` and `full` presets are derived on top.

use indexmap::IndexMap;
use serde_json::{Value, json};
use vellum_core::error::VellumError;
use vellum_core::schema::{ElementSpec, ParseSpec, SchemaFragment};
use vellum_core::types::{Behavior, Keymap, PatternRule};

use crate::descriptor::PluginDescriptor;
use crate::diagnostics::Placement;
use crate::preset::{PresetSpec, PresetTarget};
use crate::registry::PluginRegistry;

/// Fragment with a single node element.
fn node_fragment(name: &str, parse: Option<ParseSpec>, to: Option<Value>) -> SchemaFragment {
    let mut nodes = IndexMap::new();
    nodes.insert(
        name.to_string(),
        ElementSpec {
            parse_markdown: parse,
            to_markdown: to,
        },
    );
    SchemaFragment {
        nodes,
        marks: IndexMap::new(),
    }
}

/// Fragment with a single mark element.
fn mark_fragment(name: &str, parse: Option<ParseSpec>, to: Option<Value>) -> SchemaFragment {
    let mut marks = IndexMap::new();
    marks.insert(
        name.to_string(),
        ElementSpec {
            parse_markdown: parse,
            to_markdown: to,
        },
    );
    SchemaFragment {
        nodes: IndexMap::new(),
        marks,
    }
}

fn single_binding(key: &str, command: &str) -> Keymap {
    let mut map = IndexMap::new();
    map.insert(key.to_string(), command.to_string());
    map
}

/// Descriptors for all built-in plugins, in registration order.
pub fn builtin_plugins() -> Vec<PluginDescriptor> {
    vec![
        PluginDescriptor::new("doc").with_schema(node_fragment("doc", None, None)),
        PluginDescriptor::new("paragraph").with_schema(node_fragment(
            "paragraph",
            Some(ParseSpec::Element(json!({"block": "paragraph"}))),
            Some(json!({"render": "block"})),
        )),
        PluginDescriptor::new("blockquote")
            .with_schema(node_fragment(
                "blockquote",
                Some(ParseSpec::Element(json!({"block": "blockquote"}))),
                Some(json!({"wrap": "> "})),
            ))
            .with_input_rules(|_| {
                vec![PatternRule::structural(
                    "blockquote",
                    r"^\s*>\s$",
                    json!({"wrap": "blockquote"}),
                )]
            }),
        PluginDescriptor::new("bullet_list")
            .with_schema(node_fragment(
                "bullet_list",
                Some(ParseSpec::Element(json!({"block": "bullet_list"}))),
                Some(json!({"list": "bullet", "delimiter": "- "})),
            ))
            .with_input_rules(|_| {
                vec![PatternRule::structural(
                    "bullet_list",
                    r"^\s*([-+*])\s$",
                    json!({"wrap_list": "bullet_list"}),
                )]
            }),
        PluginDescriptor::new("strong")
            .with_schema(mark_fragment(
                "strong",
                Some(ParseSpec::Element(json!({"mark": "strong"}))),
                Some(json!({"open": "**", "close": "**", "mixable": true})),
            ))
            .with_keymap(|_| single_binding("Mod-b", "toggle_strong")),
        PluginDescriptor::new("code")
            .with_schema(mark_fragment(
                "code",
                Some(ParseSpec::Element(json!({"mark": "code"}))),
                Some(json!({"open": "`", "close": "`", "escape": false})),
            ))
            .with_keymap(|_| single_binding("Mod-`", "toggle_code")),
        PluginDescriptor::new("code_block").with_schema(node_fragment(
            "code_block",
            // The markdown token for fenced code is named `fence`.
            Some(ParseSpec::Token {
                token: "fence".into(),
                spec: json!({"block": "code_block", "attrs": ["params"]}),
            }),
            Some(json!({"fence": "```"})),
        )),
        PluginDescriptor::new("emoji").with_behaviors(|_| {
            vec![Behavior::new("emoji_chooser", json!({"trigger": ":"}))]
        }),
        PluginDescriptor::new("hard_break")
            .with_schema(node_fragment(
                "hard_break",
                Some(ParseSpec::Token {
                    token: "hardbreak".into(),
                    spec: json!({"node": "hard_break"}),
                }),
                Some(json!({"render": "  \n"})),
            ))
            .with_keymap(|_| single_binding("Shift-Enter", "insert_hard_break")),
        PluginDescriptor::new("em")
            .with_schema(mark_fragment(
                "em",
                Some(ParseSpec::Element(json!({"mark": "em"}))),
                Some(json!({"open": "*", "close": "*", "mixable": true})),
            ))
            .with_keymap(|_| single_binding("Mod-i", "toggle_em")),
        PluginDescriptor::new("horizontal_rule").with_schema(node_fragment(
            "horizontal_rule",
            Some(ParseSpec::Token {
                token: "hr".into(),
                spec: json!({"node": "horizontal_rule"}),
            }),
            Some(json!({"render": "---"})),
        )),
        PluginDescriptor::new("image").with_schema(node_fragment(
            "image",
            Some(ParseSpec::Element(json!({"node": "image", "attrs": ["src", "title", "alt"]}))),
            Some(json!({"render": "![{alt}]({src})"})),
        )),
        PluginDescriptor::new("list_item").with_schema(node_fragment(
            "list_item",
            Some(ParseSpec::Element(json!({"block": "list_item"}))),
            Some(json!({"render": "item"})),
        )),
        PluginDescriptor::new("mention").with_behaviors(|_| {
            vec![Behavior::new("mention_provider", json!({"trigger": "@"}))]
        }),
        PluginDescriptor::new("oembed").with_behaviors(|_| {
            vec![Behavior::new("oembed_loader", json!({"match": "url"}))]
        }),
        PluginDescriptor::new("ordered_list")
            .with_schema(node_fragment(
                "ordered_list",
                Some(ParseSpec::Element(json!({"block": "ordered_list", "attrs": ["order"]}))),
                Some(json!({"list": "ordered"})),
            ))
            .with_input_rules(|_| {
                vec![PatternRule::structural(
                    "ordered_list",
                    r"^(\d+)\.\s$",
                    json!({"wrap_list": "ordered_list"}),
                )]
            }),
        PluginDescriptor::new("heading")
            .with_schema(node_fragment(
                "heading",
                Some(ParseSpec::Element(json!({"block": "heading", "attrs": ["level"]}))),
                Some(json!({"prefix": "#"})),
            ))
            .with_input_rules(|_| {
                vec![PatternRule::structural(
                    "heading",
                    r"^(#{1,6})\s$",
                    json!({"block": "heading"}),
                )]
            }),
        PluginDescriptor::new("strikethrough").with_schema(mark_fragment(
            "strikethrough",
            // The markdown token for strikethrough is named `s`.
            Some(ParseSpec::Token {
                token: "s".into(),
                spec: json!({"mark": "strikethrough"}),
            }),
            Some(json!({"open": "~~", "close": "~~", "mixable": true})),
        )),
        PluginDescriptor::new("table")
            .with_schema({
                let mut nodes = IndexMap::new();
                nodes.insert(
                    "table".to_string(),
                    ElementSpec {
                        parse_markdown: Some(ParseSpec::Element(json!({"block": "table"}))),
                        to_markdown: Some(json!({"render": "table"})),
                    },
                );
                nodes.insert(
                    "table_row".to_string(),
                    ElementSpec {
                        parse_markdown: Some(ParseSpec::Element(json!({"block": "table_row"}))),
                        to_markdown: None,
                    },
                );
                nodes.insert(
                    "table_cell".to_string(),
                    ElementSpec {
                        parse_markdown: Some(ParseSpec::Element(json!({"block": "table_cell"}))),
                        to_markdown: None,
                    },
                );
                SchemaFragment {
                    nodes,
                    marks: IndexMap::new(),
                }
            })
            .with_behaviors(|_| vec![Behavior::new("table_editing", json!({"fix_tables": true}))]),
        PluginDescriptor::new("text").with_schema(node_fragment("text", None, None)),
        PluginDescriptor::new("link")
            .with_schema(mark_fragment(
                "link",
                Some(ParseSpec::Element(json!({"mark": "link", "attrs": ["href", "title"]}))),
                Some(json!({"open": "[", "close": "]({href})"})),
            ))
            .with_behaviors(|_| vec![Behavior::new("link_click", json!({"open_in": "new_tab"}))]),
        PluginDescriptor::new("attributes").with_behaviors(|_| {
            vec![Behavior::new("attribute_parser", json!({"syntax": "{...}"}))]
        }),
        PluginDescriptor::new("placeholder").with_behaviors(|_| {
            vec![Behavior::new("placeholder_decoration", json!({"text": ""}))]
        }),
    ]
}

/// Plugins registered outside the `markdown` preset.
const NON_MARKDOWN: &[&str] = &["emoji", "mention", "oembed"];

/// Register the built-in plugins and define the stock presets.
///
/// `markdown` holds the core plugins in registration order; `normal` extends
/// it, splicing `emoji` before `hard_break` and `mention` and `oembed`
/// before `ordered_list`; `full` extends `normal`.
pub fn install(registry: &mut PluginRegistry) -> Result<(), VellumError> {
    for plugin in builtin_plugins() {
        let target = if NON_MARKDOWN.contains(&plugin.id.as_str()) {
            None
        } else {
            Some(PresetTarget::append("markdown"))
        };
        registry.register(plugin, target);
    }

    registry.define_preset(
        "normal",
        PresetSpec::extend("markdown").customize(|editor| {
            editor.insert("emoji", Placement::Before("hard_break".into()));
            editor.insert("mention", Placement::Before("ordered_list".into()));
            editor.insert("oembed", Placement::Before("ordered_list".into()));
        }),
    )?;
    registry.define_preset("full", PresetSpec::extend("normal"))?;
    Ok(())
}
