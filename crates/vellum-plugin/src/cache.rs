// SPDX-FileCopyrightText: 2026 Vellum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Derived-artifact caching keyed by request signature.
//!
//! A [`PresetManager`] is a caching facade over a bound factory: repeated
//! requests with the same effective configuration get the same built
//! artifact back instead of rebuilding it. Each artifact kind (parse-table,
//! serialize-table, ...) owns its own manager; managers never share entries.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;
use vellum_core::config::EditorConfig;
use vellum_core::error::VellumError;

use crate::registry::PluginRegistry;

/// Canonical cache key derived from a request configuration.
///
/// The preset name identifies the effective plugin list when present;
/// otherwise the sorted, deduplicated filter id lists do. A config with
/// neither denotes the full catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Signature {
    /// A named preset.
    Preset(String),
    /// The full catalogue under an ad hoc include/exclude filter.
    Filtered {
        include: Vec<String>,
        exclude: Vec<String>,
    },
    /// The full catalogue, unfiltered.
    Full,
}

impl Signature {
    /// Derive the signature for a request configuration.
    pub fn of(config: &EditorConfig) -> Self {
        if let Some(name) = &config.preset {
            return Signature::Preset(name.clone());
        }

        let include = canonical(config.include_ids());
        let exclude = canonical(config.exclude_ids());
        if include.is_empty() && exclude.is_empty() {
            Signature::Full
        } else {
            Signature::Filtered { include, exclude }
        }
    }
}

/// Sort and deduplicate a filter id list so structurally equal configs with
/// reordered ids share a cache entry.
fn canonical(ids: Option<&[String]>) -> Vec<String> {
    let mut ids = ids.map(<[String]>::to_vec).unwrap_or_default();
    ids.sort();
    ids.dedup();
    ids
}

/// Factory bound to a [`PresetManager`].
pub type ArtifactFactory<T> =
    Box<dyn Fn(&mut PluginRegistry, &EditorConfig) -> Result<T, VellumError> + Send + Sync>;

/// Signature-keyed cache over a bound artifact factory.
pub struct PresetManager<T> {
    /// Manager name, for logging only.
    name: String,
    build: ArtifactFactory<T>,
    cache: HashMap<Signature, Arc<T>>,
}

impl<T> PresetManager<T> {
    /// Create a manager with its factory bound.
    pub fn new(
        name: impl Into<String>,
        build: impl Fn(&mut PluginRegistry, &EditorConfig) -> Result<T, VellumError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            build: Box::new(build),
            cache: HashMap::new(),
        }
    }

    /// Return the cached artifact for this configuration, or build and cache
    /// one.
    ///
    /// The returned `Arc` is identity-stable across calls with the same
    /// signature. A factory error propagates unmodified and nothing is
    /// cached for that signature.
    pub fn check(
        &mut self,
        registry: &mut PluginRegistry,
        config: &EditorConfig,
    ) -> Result<Arc<T>, VellumError> {
        let signature = Signature::of(config);

        if let Some(artifact) = self.cache.get(&signature) {
            debug!(manager = %self.name, ?signature, "artifact cache hit");
            return Ok(Arc::clone(artifact));
        }

        debug!(manager = %self.name, ?signature, "building artifact");
        let artifact = Arc::new((self.build)(registry, config)?);
        self.cache.insert(signature, Arc::clone(&artifact));
        Ok(artifact)
    }

    /// Drop the cached artifact for this configuration, if any.
    ///
    /// Presets re-derived after artifacts were built are not picked up
    /// automatically; invalidation is the caller's call.
    pub fn invalidate(&mut self, config: &EditorConfig) -> bool {
        self.cache.remove(&Signature::of(config)).is_some()
    }

    /// Drop every cached artifact.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Number of cached artifacts.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl<T> fmt::Debug for PresetManager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresetManager")
            .field("name", &self.name)
            .field("cached", &self.cache.len())
            .finish()
    }
}
