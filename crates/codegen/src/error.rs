// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or rendering a blackbox.
#[derive(Error, Debug)]
pub enum BlackboxError {
    /// The generator was configured with a value it does not support (e.g. an unknown IPC token).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A port was tagged with something other than clock/input/output/inout.
    #[error("Port '{signal}' has invalid category '{tag}' (expected clock, input, output or inout)")]
    InvalidPortCategory { signal: String, tag: String },

    /// A port declaration is not of the form `<type> <name>`.
    #[error("Invalid signal declaration '{0}': expected '<type> <name>'")]
    InvalidSignalDeclaration(String),

    /// A hardware type token could not be turned into a bit width.
    #[error("Cannot parse signal type '{token}': {reason}")]
    SignalParse { token: String, reason: String },

    /// The model payload would not fit in a `u32` offset.
    #[error("Payload field '{field}' overflows the model payload ({offset} + {width})")]
    PayloadOverflow { field: String, offset: u32, width: u32 },

    /// The template references a placeholder the fragment record does not provide.
    #[error("Template references unknown slot '{{{slot}}}'")]
    MissingTemplateSlot { slot: String },

    /// The template text is not well formed (unbalanced braces, empty slot, ...).
    #[error("Malformed template at byte {offset}: {reason}")]
    MalformedTemplate { offset: usize, reason: String },

    /// The backing template file does not exist.
    #[error("Template not found: {0:?}")]
    TemplateNotFound(PathBuf),

    /// An artifact was requested before any port was registered.
    #[error("No ports registered; classify the port list before generating artifacts")]
    EmptyPortSet,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for blackbox generation.
pub type Result<T> = std::result::Result<T, BlackboxError>;
