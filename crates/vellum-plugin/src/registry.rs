// SPDX-FileCopyrightText: 2026 Vellum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plugin registry: ordered catalogue, preset table, and selection.
//!
//! A [`PluginRegistry`] is an explicit value created at session bootstrap,
//! not a process-wide singleton; tests build as many independent registries
//! as they need. Registration is expected to complete before selection
//! starts: registering a plugin after a preset referencing it was resolved
//! leaves that preset unchanged.

use std::collections::HashMap;
use std::sync::Arc;

use vellum_core::config::EditorConfig;
use vellum_core::error::VellumError;

use crate::descriptor::PluginDescriptor;
use crate::diagnostics::{Diagnostic, Placement};
use crate::preset::PresetTarget;

/// Ordered catalogue of plugin descriptors plus the resolved preset table.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    /// Descriptors in first-registration order.
    catalogue: Vec<Arc<PluginDescriptor>>,
    /// Plugin id to catalogue position.
    index: HashMap<String, usize>,
    /// Resolved presets: name to concrete ordered descriptor list.
    presets: HashMap<String, Vec<Arc<PluginDescriptor>>>,
    /// Non-fatal conditions recorded so far.
    diagnostics: Vec<Diagnostic>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor, optionally enrolling it into a preset.
    ///
    /// A colliding id overwrites the catalogue entry in place (first-seen
    /// position is kept) and records [`Diagnostic::PluginOverwritten`].
    /// Presets resolved before the overwrite keep the old descriptor.
    pub fn register(&mut self, descriptor: PluginDescriptor, target: Option<PresetTarget>) {
        let descriptor = Arc::new(descriptor);

        match self.index.get(&descriptor.id) {
            Some(&pos) => {
                let id = descriptor.id.clone();
                self.catalogue[pos] = Arc::clone(&descriptor);
                Diagnostic::PluginOverwritten { id }.emit(&mut self.diagnostics);
            }
            None => {
                self.index
                    .insert(descriptor.id.clone(), self.catalogue.len());
                self.catalogue.push(Arc::clone(&descriptor));
            }
        }

        if let Some(target) = target {
            let (preset, placement) = target.into_parts();
            self.splice_into_preset(descriptor, &preset, placement);
        }
    }

    /// Look up a descriptor by id.
    pub fn get(&self, id: &str) -> Option<Arc<PluginDescriptor>> {
        self.index.get(id).map(|&pos| Arc::clone(&self.catalogue[pos]))
    }

    /// The full catalogue in registration order, as an independent copy.
    pub fn catalogue(&self) -> Vec<Arc<PluginDescriptor>> {
        self.catalogue.clone()
    }

    /// A resolved preset's ordered descriptor list, as an independent copy.
    pub fn preset(&self, name: &str) -> Option<Vec<Arc<PluginDescriptor>>> {
        self.presets.get(name).cloned()
    }

    /// Returns the number of registered plugins.
    pub fn len(&self) -> usize {
        self.catalogue.len()
    }

    /// Returns true if no plugins are registered.
    pub fn is_empty(&self) -> bool {
        self.catalogue.is_empty()
    }

    /// Non-fatal conditions recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drain the recorded diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Resolve the active plugin list for a request.
    ///
    /// A resolved preset named by the config is returned as a copy.
    /// Otherwise the full catalogue is filtered by `plugins.exclude`, then
    /// `plugins.include` ids are appended in listed order; an unknown
    /// include id fails the call. If the config names a preset that is not
    /// yet resolved, the computed list is stored under that name before it
    /// is returned, so later requests reuse it.
    pub fn select(
        &mut self,
        config: &EditorConfig,
    ) -> Result<Vec<Arc<PluginDescriptor>>, VellumError> {
        if let Some(name) = &config.preset {
            if let Some(list) = self.presets.get(name) {
                return Ok(list.clone());
            }
        }

        let mut result: Vec<Arc<PluginDescriptor>> = match config.exclude_ids() {
            Some(exclude) => self
                .catalogue
                .iter()
                .filter(|plugin| !exclude.iter().any(|id| *id == plugin.id))
                .cloned()
                .collect(),
            None => self.catalogue.clone(),
        };

        if let Some(include) = config.include_ids() {
            for id in include {
                let plugin = self
                    .get(id)
                    .ok_or_else(|| VellumError::PluginNotRegistered { id: id.clone() })?;
                result.push(plugin);
            }
        }

        if let Some(name) = &config.preset {
            self.presets.insert(name.clone(), result.clone());
        }

        Ok(result)
    }

    /// Splice a descriptor into a preset at the requested placement.
    ///
    /// A missing anchor degrades to an append plus a diagnostic; this never
    /// fails.
    pub(crate) fn splice_into_preset(
        &mut self,
        plugin: Arc<PluginDescriptor>,
        preset: &str,
        placement: Placement,
    ) {
        let mut list = self.presets.get(preset).cloned().unwrap_or_default();
        let anchor_pos = placement
            .anchor()
            .and_then(|anchor| list.iter().position(|entry| entry.id == anchor));

        match (&placement, anchor_pos) {
            (Placement::End, _) => list.push(plugin),
            (Placement::Before(_), Some(pos)) => list.insert(pos, plugin),
            (Placement::After(_), Some(pos)) => list.insert(pos + 1, plugin),
            (_, None) => {
                Diagnostic::AnchorMissing {
                    preset: preset.to_string(),
                    plugin: plugin.id.clone(),
                    placement: placement.clone(),
                }
                .emit(&mut self.diagnostics);
                list.push(plugin);
            }
        }

        self.presets.insert(preset.to_string(), list);
    }

    /// Store a resolved preset, overwriting any prior definition.
    pub(crate) fn store_preset(&mut self, name: &str, list: Vec<Arc<PluginDescriptor>>) {
        self.presets.insert(name.to_string(), list);
    }

    /// Record a diagnostic from a sibling module.
    pub(crate) fn record(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit(&mut self.diagnostics);
    }
}
