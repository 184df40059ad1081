// SPDX-FileCopyrightText: 2026 Vellum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured diagnostics for non-fatal registry conditions.
//!
//! The registry never aborts on degraded ordering or overwritten entries; it
//! records a [`Diagnostic`] and keeps going. Callers and tests inspect the
//! collector instead of scraping log output; every diagnostic is also
//! emitted through `tracing::warn!`.

use std::fmt;

use tracing::warn;

/// Where an insertion rule asked to place a plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Immediately before the named plugin.
    Before(String),
    /// Immediately after the named plugin.
    After(String),
    /// At the end of the preset.
    End,
}

impl Placement {
    /// The anchor id, if this placement has one.
    pub fn anchor(&self) -> Option<&str> {
        match self {
            Placement::Before(id) | Placement::After(id) => Some(id),
            Placement::End => None,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Before(id) => write!(f, "before `{id}`"),
            Placement::After(id) => write!(f, "after `{id}`"),
            Placement::End => write!(f, "at end"),
        }
    }
}

/// A non-fatal condition recorded during registration or preset resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A plugin id collided on registration; the catalogue entry was
    /// overwritten in place.
    PluginOverwritten {
        /// The colliding plugin id.
        id: String,
    },
    /// A `before`/`after` insertion target was not present in the preset;
    /// the plugin was appended to the end instead.
    AnchorMissing {
        /// The preset being edited.
        preset: String,
        /// The plugin being inserted.
        plugin: String,
        /// The requested placement whose anchor was absent.
        placement: Placement,
    },
    /// A preset include (or insertion) referenced a plugin id missing from
    /// the catalogue; that single insertion was skipped.
    IncludeUnknown {
        /// The preset being resolved.
        preset: String,
        /// The unknown plugin id.
        id: String,
    },
}

impl Diagnostic {
    /// Record-and-log constructor used by the registry.
    pub(crate) fn emit(self, sink: &mut Vec<Diagnostic>) {
        match &self {
            Diagnostic::PluginOverwritten { id } => {
                warn!(plugin = %id, "plugin id collision, catalogue entry overwritten");
            }
            Diagnostic::AnchorMissing {
                preset,
                plugin,
                placement,
            } => {
                warn!(
                    %preset,
                    plugin = %plugin,
                    %placement,
                    "insertion anchor not in preset, appending to end"
                );
            }
            Diagnostic::IncludeUnknown { preset, id } => {
                warn!(%preset, plugin = %id, "included plugin not registered, skipping");
            }
        }
        sink.push(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_display_names_the_anchor() {
        assert_eq!(
            Placement::Before("hard_break".into()).to_string(),
            "before `hard_break`"
        );
        assert_eq!(Placement::End.to_string(), "at end");
        assert_eq!(Placement::After("em".into()).anchor(), Some("em"));
        assert_eq!(Placement::End.anchor(), None);
    }

    #[test]
    fn emit_appends_to_the_sink() {
        let mut sink = Vec::new();
        Diagnostic::PluginOverwritten { id: "strong".into() }.emit(&mut sink);
        assert_eq!(
            sink,
            vec![Diagnostic::PluginOverwritten { id: "strong".into() }]
        );
    }
}
