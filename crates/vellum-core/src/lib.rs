// SPDX-FileCopyrightText: 2026 Vellum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Vellum rich-text editor engine.
//!
//! This crate provides the shared types used throughout the Vellum
//! workspace: the error enum, the per-request configuration, document-model
//! schema fragments, and the artifact units (pattern rules, behaviors,
//! keymaps) the engine collects from plugins.

pub mod config;
pub mod error;
pub mod schema;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use config::{EditorConfig, PluginFilter};
pub use error::VellumError;
pub use schema::{ElementSpec, ParseSpec, Schema, SchemaFragment};
pub use types::{Behavior, Keymap, PatternRule};
