// SPDX-FileCopyrightText: 2026 Vellum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document-model schema fragments contributed by plugins.
//!
//! The engine never assembles or interprets a schema. Plugins contribute
//! [`SchemaFragment`]s whose conversion descriptors are relocated into token
//! tables by `vellum-markdown`; the assembled [`Schema`] itself is built by
//! the host and only passed through to rule factories.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The active document schema, assembled by the host.
///
/// Only the element names are relevant to this engine's collaborators; the
/// full element definitions live host-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Names of node types present in the document model.
    pub nodes: Vec<String>,
    /// Names of mark types present in the document model.
    pub marks: Vec<String>,
}

/// A plugin's contribution to the document model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaFragment {
    /// Node specs keyed by element name, in declaration order.
    #[serde(default)]
    pub nodes: IndexMap<String, ElementSpec>,
    /// Mark specs keyed by element name, in declaration order.
    #[serde(default)]
    pub marks: IndexMap<String, ElementSpec>,
}

/// Spec for a single node or mark element.
///
/// Both conversion descriptors are opaque payloads: the engine relocates
/// them into token tables but never reads inside them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementSpec {
    /// How to recognize/build this element from text-format tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_markdown: Option<ParseSpec>,
    /// How to emit text-format output for this element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_markdown: Option<Value>,
}

/// Parse-direction descriptor for one element.
///
/// Most elements register under their own name; an element whose text-format
/// token is named differently carries the token name explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParseSpec {
    /// Registered in the token table under a differently named token.
    Token {
        /// The text-format token name used as the table key.
        token: String,
        /// The opaque conversion descriptor.
        spec: Value,
    },
    /// Registered in the token table under the element's own name.
    Element(Value),
}

impl SchemaFragment {
    /// Node and mark specs in declaration order, nodes first.
    ///
    /// Matches the merge order the parse-direction extractor uses.
    pub fn elements(&self) -> impl Iterator<Item = (&String, &ElementSpec)> {
        self.nodes.iter().chain(self.marks.iter())
    }
}
