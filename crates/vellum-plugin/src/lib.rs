// SPDX-FileCopyrightText: 2026 Vellum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registration, preset composition, and derived-artifact caching.
//!
//! Plugins contribute fragments of document-model structure, editing
//! behaviors, keybindings, and format-conversion rules as optional fields of
//! a [`PluginDescriptor`]. This crate registers them with stable ordering,
//! resolves declarative presets into concrete ordered lists, selects the
//! active list for a request, derives artifact lists from it, and caches
//! per-signature artifacts so repeated requests do not rebuild them.
//!
//! The engine never interprets plugin contributions; it collects, orders,
//! filters, and caches them.

pub mod builders;
pub mod cache;
pub mod catalog;
pub mod descriptor;
pub mod diagnostics;
pub mod preset;
pub mod registry;

pub use builders::{build_behaviors, build_keymaps, build_pattern_rules, builtin_rules};
pub use cache::{PresetManager, Signature};
pub use catalog::{builtin_plugins, install};
pub use descriptor::{BehaviorFactory, KeymapFactory, PluginDescriptor, RuleFactory};
pub use diagnostics::{Diagnostic, Placement};
pub use preset::{PresetEditor, PresetSpec, PresetTarget};
pub use registry::PluginRegistry;
