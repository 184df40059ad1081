// SPDX-FileCopyrightText: 2026 Vellum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Preset composition: declarative specs resolved into concrete lists.
//!
//! A preset is a named, ordered, duplicate-free list of plugin descriptors.
//! It is declared either as an explicit id list or derivatively from an
//! already-resolved base preset with exclude/include sets and an optional
//! customization callback for `before`/`after` insertions. Resolution runs
//! once; the stored preset is a concrete descriptor list, not a spec.

use std::fmt;

use vellum_core::error::VellumError;

use crate::diagnostics::{Diagnostic, Placement};
use crate::registry::PluginRegistry;

/// Where `register` should enroll a plugin, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetTarget {
    /// Append to the named preset.
    Append(String),
    /// Insert immediately before `anchor` in the named preset.
    Before { preset: String, anchor: String },
    /// Insert immediately after `anchor` in the named preset.
    After { preset: String, anchor: String },
}

impl PresetTarget {
    /// Enroll at the end of `preset`.
    pub fn append(preset: impl Into<String>) -> Self {
        PresetTarget::Append(preset.into())
    }

    /// Enroll immediately before `anchor` in `preset`.
    pub fn before(preset: impl Into<String>, anchor: impl Into<String>) -> Self {
        PresetTarget::Before {
            preset: preset.into(),
            anchor: anchor.into(),
        }
    }

    /// Enroll immediately after `anchor` in `preset`.
    pub fn after(preset: impl Into<String>, anchor: impl Into<String>) -> Self {
        PresetTarget::After {
            preset: preset.into(),
            anchor: anchor.into(),
        }
    }

    pub(crate) fn into_parts(self) -> (String, Placement) {
        match self {
            PresetTarget::Append(preset) => (preset, Placement::End),
            PresetTarget::Before { preset, anchor } => (preset, Placement::Before(anchor)),
            PresetTarget::After { preset, anchor } => (preset, Placement::After(anchor)),
        }
    }
}

/// Customization callback invoked with an insertion primitive bound to the
/// preset being defined.
pub type CustomizeFn = Box<dyn FnOnce(&mut PresetEditor<'_>)>;

/// Declarative preset specification.
pub enum PresetSpec {
    /// An explicit ordered id list; ids missing from the catalogue are
    /// silently skipped (optional plugins).
    Explicit(Vec<String>),
    /// Derived from an already-resolved base preset.
    Derived {
        /// Name of the base preset to copy.
        base: String,
        /// Ids dropped from the copy, order of the rest preserved.
        exclude: Vec<String>,
        /// Ids resolved and appended at the end, in listed order.
        include: Vec<String>,
        /// Arbitrary additional insertions, run after exclude/include.
        customize: Option<CustomizeFn>,
    },
}

impl PresetSpec {
    /// An explicit ordered id list.
    pub fn explicit<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PresetSpec::Explicit(ids.into_iter().map(Into::into).collect())
    }

    /// Derive from `base` with no exclusions or inclusions.
    pub fn extend(base: impl Into<String>) -> Self {
        PresetSpec::Derived {
            base: base.into(),
            exclude: Vec::new(),
            include: Vec::new(),
            customize: None,
        }
    }

    /// Ids to drop from the base copy.
    pub fn exclude<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let PresetSpec::Derived { exclude, .. } = &mut self {
            exclude.extend(ids.into_iter().map(Into::into));
        }
        self
    }

    /// Ids to append after the base copy.
    pub fn include<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let PresetSpec::Derived { include, .. } = &mut self {
            include.extend(ids.into_iter().map(Into::into));
        }
        self
    }

    /// Callback for additional `before`/`after` insertions.
    pub fn customize(mut self, f: impl FnOnce(&mut PresetEditor<'_>) + 'static) -> Self {
        if let PresetSpec::Derived { customize, .. } = &mut self {
            *customize = Some(Box::new(f));
        }
        self
    }
}

impl fmt::Debug for PresetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetSpec::Explicit(ids) => f.debug_tuple("Explicit").field(ids).finish(),
            PresetSpec::Derived {
                base,
                exclude,
                include,
                customize,
            } => f
                .debug_struct("Derived")
                .field("base", base)
                .field("exclude", exclude)
                .field("include", include)
                .field("customize", &customize.is_some())
                .finish(),
        }
    }
}

/// Insertion primitive handed to a [`PresetSpec`] customization callback,
/// bound to the preset being defined.
pub struct PresetEditor<'a> {
    registry: &'a mut PluginRegistry,
    preset: &'a str,
}

impl PresetEditor<'_> {
    /// The preset this editor is bound to.
    pub fn preset(&self) -> &str {
        self.preset
    }

    /// Insert a registered plugin at the given placement.
    ///
    /// A missing anchor degrades to an append; an unknown plugin id records
    /// a diagnostic and leaves the preset untouched. Never fails.
    pub fn insert(&mut self, id: &str, placement: Placement) {
        self.registry.add_to_preset(id, self.preset, placement);
    }
}

impl PluginRegistry {
    /// Resolve a declarative spec and store it under `name`, overwriting any
    /// prior definition.
    ///
    /// An explicit list silently skips unknown ids. A derived spec fails if
    /// the base preset is unresolved; an unknown include id is recorded as a
    /// diagnostic and the remaining list is still produced.
    pub fn define_preset(&mut self, name: &str, spec: PresetSpec) -> Result<(), VellumError> {
        match spec {
            PresetSpec::Explicit(ids) => {
                let list = ids.iter().filter_map(|id| self.get(id)).collect();
                self.store_preset(name, list);
                Ok(())
            }
            PresetSpec::Derived {
                base,
                exclude,
                include,
                customize,
            } => {
                let base_list =
                    self.preset(&base)
                        .ok_or_else(|| VellumError::PresetNotRegistered {
                            preset: name.to_string(),
                            base: base.clone(),
                        })?;

                let mut list: Vec<_> = if exclude.is_empty() {
                    base_list
                } else {
                    base_list
                        .into_iter()
                        .filter(|plugin| !exclude.iter().any(|id| *id == plugin.id))
                        .collect()
                };

                for id in &include {
                    match self.get(id) {
                        Some(plugin) => list.push(plugin),
                        None => self.record(Diagnostic::IncludeUnknown {
                            preset: name.to_string(),
                            id: id.clone(),
                        }),
                    }
                }

                self.store_preset(name, list);

                if let Some(customize) = customize {
                    let mut editor = PresetEditor {
                        registry: self,
                        preset: name,
                    };
                    customize(&mut editor);
                }
                Ok(())
            }
        }
    }

    /// Insert a registered plugin into a preset at the given placement.
    ///
    /// The degraded path appends and records a diagnostic; this never fails.
    pub fn add_to_preset(&mut self, id: &str, preset: &str, placement: Placement) {
        match self.get(id) {
            Some(plugin) => self.splice_into_preset(plugin, preset, placement),
            None => self.record(Diagnostic::IncludeUnknown {
                preset: preset.to_string(),
                id: id.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::PluginDescriptor;

    fn registry_with(ids: &[&str]) -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        for id in ids {
            registry.register(PluginDescriptor::new(*id), None);
        }
        registry
    }

    fn preset_ids(registry: &PluginRegistry, name: &str) -> Vec<String> {
        registry
            .preset(name)
            .unwrap()
            .iter()
            .map(|p| p.id.clone())
            .collect()
    }

    #[test]
    fn explicit_list_skips_unknown_ids_silently() {
        let mut registry = registry_with(&["a", "b"]);
        registry
            .define_preset("p", PresetSpec::explicit(["a", "ghost", "b"]))
            .unwrap();

        assert_eq!(preset_ids(&registry, "p"), vec!["a", "b"]);
        assert!(registry.diagnostics().is_empty());
    }

    #[test]
    fn derived_exclude_preserves_remaining_order() {
        let mut registry = registry_with(&["a", "x", "b"]);
        registry
            .define_preset("p1", PresetSpec::explicit(["a", "x", "b"]))
            .unwrap();
        registry
            .define_preset("p2", PresetSpec::extend("p1").exclude(["x"]))
            .unwrap();

        assert_eq!(preset_ids(&registry, "p2"), vec!["a", "b"]);
        // The base preset is untouched.
        assert_eq!(preset_ids(&registry, "p1"), vec!["a", "x", "b"]);
    }

    #[test]
    fn derived_unknown_base_is_a_hard_error() {
        let mut registry = registry_with(&["a"]);
        let err = registry
            .define_preset("p", PresetSpec::extend("missing"))
            .unwrap_err();

        assert!(matches!(
            err,
            VellumError::PresetNotRegistered { base, .. } if base == "missing"
        ));
        assert!(registry.preset("p").is_none());
    }

    #[test]
    fn derived_unknown_include_is_diagnosed_but_list_is_produced() {
        let mut registry = registry_with(&["a", "b", "c"]);
        registry
            .define_preset("base", PresetSpec::explicit(["a", "b"]))
            .unwrap();
        registry
            .define_preset("p", PresetSpec::extend("base").include(["ghost", "c"]))
            .unwrap();

        assert_eq!(preset_ids(&registry, "p"), vec!["a", "b", "c"]);
        assert_eq!(
            registry.diagnostics(),
            &[Diagnostic::IncludeUnknown {
                preset: "p".into(),
                id: "ghost".into(),
            }]
        );
    }

    #[test]
    fn customize_inserts_before_and_after_anchors() {
        let mut registry = registry_with(&["a", "b", "c", "d"]);
        registry
            .define_preset("base", PresetSpec::explicit(["a", "b"]))
            .unwrap();
        registry
            .define_preset(
                "p",
                PresetSpec::extend("base").customize(|editor| {
                    editor.insert("c", Placement::Before("b".into()));
                    editor.insert("d", Placement::After("a".into()));
                }),
            )
            .unwrap();

        assert_eq!(preset_ids(&registry, "p"), vec!["a", "d", "c", "b"]);
    }

    #[test]
    fn missing_anchor_degrades_to_append_with_warning() {
        let mut registry = registry_with(&["a", "b", "c"]);
        registry
            .define_preset("p", PresetSpec::explicit(["a", "b"]))
            .unwrap();

        registry.add_to_preset("c", "p", Placement::Before("missing".into()));

        assert_eq!(preset_ids(&registry, "p"), vec!["a", "b", "c"]);
        assert_eq!(
            registry.diagnostics(),
            &[Diagnostic::AnchorMissing {
                preset: "p".into(),
                plugin: "c".into(),
                placement: Placement::Before("missing".into()),
            }]
        );
    }

    #[test]
    fn insert_before_existing_anchor_splices_in_place() {
        let mut registry = registry_with(&["a", "b", "c"]);
        registry
            .define_preset("p", PresetSpec::explicit(["a", "b"]))
            .unwrap();

        registry.add_to_preset("c", "p", Placement::Before("b".into()));

        assert_eq!(preset_ids(&registry, "p"), vec!["a", "c", "b"]);
        assert!(registry.diagnostics().is_empty());
    }

    #[test]
    fn register_with_target_enrolls_into_preset() {
        let mut registry = PluginRegistry::new();
        registry.register(
            PluginDescriptor::new("a"),
            Some(PresetTarget::append("markdown")),
        );
        registry.register(
            PluginDescriptor::new("b"),
            Some(PresetTarget::append("markdown")),
        );
        registry.register(
            PluginDescriptor::new("c"),
            Some(PresetTarget::before("markdown", "b")),
        );

        assert_eq!(preset_ids(&registry, "markdown"), vec!["a", "c", "b"]);
    }

    #[test]
    fn redefinition_overwrites_prior_preset() {
        let mut registry = registry_with(&["a", "b"]);
        registry
            .define_preset("p", PresetSpec::explicit(["a"]))
            .unwrap();
        registry
            .define_preset("p", PresetSpec::explicit(["b"]))
            .unwrap();

        assert_eq!(preset_ids(&registry, "p"), vec!["b"]);
    }
}
