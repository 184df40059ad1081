// SPDX-FileCopyrightText: 2026 Vellum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Vellum editor engine.

use thiserror::Error;

/// The primary error type used across the Vellum engine crates.
///
/// Only configuration errors abort an operation; degraded-ordering and
/// overwrite conditions are surfaced as diagnostics instead (see
/// `vellum-plugin`'s diagnostics module) and never interrupt control flow.
#[derive(Debug, Error)]
pub enum VellumError {
    /// A derived preset referenced a base preset that has not been resolved.
    #[error("cannot extend preset `{base}` into `{preset}`: base preset not registered")]
    PresetNotRegistered { preset: String, base: String },

    /// A selection include list referenced a plugin id missing from the catalogue.
    #[error("unknown plugin `{id}` in include list")]
    PluginNotRegistered { id: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_offender() {
        let err = VellumError::PresetNotRegistered {
            preset: "custom".into(),
            base: "missing".into(),
        };
        assert!(err.to_string().contains("missing"));
        assert!(err.to_string().contains("custom"));

        let err = VellumError::PluginNotRegistered { id: "emoji".into() };
        assert!(err.to_string().contains("emoji"));
    }
}
