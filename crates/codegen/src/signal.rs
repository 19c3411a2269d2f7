// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Signal declarations and the SystemC type-token parser.
//!
//! Port types arrive as raw C++ template arguments such as `<bool>`,
//! `<sc_bv<8>>` or `<sc_bv<DATA_WIDTH>>//8`. The parser maps them to the
//! accessor type used on the wire (`get<int>`, `get<bool>`, ...) and to the
//! number of payload characters the value occupies.

use crate::error::{BlackboxError, Result};

/// Substring identifying a clock marker type.
pub const CLOCK_MARKER: &str = "__clock__";

/// Raw type given to the synthetic clock entries on the model side.
pub const SYNTHETIC_CLOCK_TYPE: &str = "<__clock__>";

/// Accessor type used when reading a value back from the signal handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicalType {
    Int,
    Bool,
    /// Native C++ type, passed through verbatim.
    Native(String),
}

impl LogicalType {
    /// Template argument inserted after `get` in the generated accessor call.
    pub fn as_template_arg(&self) -> &str {
        match self {
            LogicalType::Int => "<int>",
            LogicalType::Bool => "<bool>",
            LogicalType::Native(raw) => raw,
        }
    }
}

/// Result of parsing a raw type token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalType {
    /// `None` for clocks, which carry no payload.
    pub logical: Option<LogicalType>,
    pub width: u32,
}

impl SignalType {
    pub fn is_clock(&self) -> bool {
        self.logical.is_none()
    }

    /// Accessor template argument, empty for clocks.
    pub fn template_arg(&self) -> &str {
        self.logical
            .as_ref()
            .map(LogicalType::as_template_arg)
            .unwrap_or("")
    }
}

/// Parses a raw type token into its accessor type and payload width.
///
/// Only tokens mentioning `sc` are treated as SystemC types:
/// - `sc_int`/`sc_uint`: the literal is the largest representable value, the
///   width is `floor(log2(N))`.
/// - `sc_bv`/`sc_lv`: the literal is the bit count.
/// - `sc_bit`/`sc_logic`: reported as `<bool>` with the literal as width.
///
/// The literal is every ASCII digit of the token concatenated, so a symbolic
/// width can be pinned with a trailing comment, e.g. `<sc_bv<ADDR_WIDTH>>//8`.
pub fn parse_signal_type(raw: &str) -> Result<SignalType> {
    if raw.contains("sc") {
        if raw.contains("int") {
            let max = embedded_literal(raw)?;
            if max == 0 {
                return Err(BlackboxError::SignalParse {
                    token: raw.to_string(),
                    reason: "integer range literal must be greater than zero".to_string(),
                });
            }
            return Ok(SignalType {
                logical: Some(LogicalType::Int),
                width: max.ilog2(),
            });
        }

        if raw.contains("bv") || raw.contains("lv") {
            return Ok(SignalType {
                logical: Some(LogicalType::Int),
                width: narrow(raw, embedded_literal(raw)?)?,
            });
        }

        if raw.contains("bit") || raw.contains("logic") {
            return Ok(SignalType {
                logical: Some(LogicalType::Bool),
                width: narrow(raw, embedded_literal(raw)?)?,
            });
        }
    }

    if raw.contains(CLOCK_MARKER) {
        return Ok(SignalType {
            logical: None,
            width: 0,
        });
    }

    Ok(SignalType {
        logical: Some(LogicalType::Native(raw.to_string())),
        width: 1,
    })
}

fn embedded_literal(raw: &str) -> Result<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(BlackboxError::SignalParse {
            token: raw.to_string(),
            reason: "no numeric width literal found".to_string(),
        });
    }
    digits.parse().map_err(|e| BlackboxError::SignalParse {
        token: raw.to_string(),
        reason: format!("width literal '{}' out of range: {}", digits, e),
    })
}

fn narrow(raw: &str, value: u64) -> Result<u32> {
    u32::try_from(value).map_err(|_| BlackboxError::SignalParse {
        token: raw.to_string(),
        reason: format!("width {} does not fit in 32 bits", value),
    })
}

/// A typed port declaration, e.g. `<sc_bv<8>> data_in`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    decl: String,
    raw_type: String,
    name: String,
}

impl Signal {
    /// Splits a declaration at its last whitespace run: everything before is
    /// the raw type, the last token is the port name.
    pub fn from_decl(decl: &str) -> Result<Self> {
        let decl = decl.trim();
        let (raw_type, name) = decl
            .rsplit_once(char::is_whitespace)
            .map(|(ty, name)| (ty.trim_end(), name))
            .filter(|(ty, name)| !ty.is_empty() && !name.is_empty())
            .ok_or_else(|| BlackboxError::InvalidSignalDeclaration(decl.to_string()))?;

        Ok(Self {
            decl: decl.to_string(),
            raw_type: raw_type.to_string(),
            name: name.to_string(),
        })
    }

    /// Synthetic clock entry used for model-side payload accounting.
    pub fn clock_marker(name: &str) -> Self {
        Self {
            decl: format!("{} {}", SYNTHETIC_CLOCK_TYPE, name),
            raw_type: SYNTHETIC_CLOCK_TYPE.to_string(),
            name: name.to_string(),
        }
    }

    /// The declaration as written by the user.
    pub fn decl(&self) -> &str {
        &self.decl
    }

    pub fn raw_type(&self) -> &str {
        &self.raw_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signal_type(&self) -> Result<SignalType> {
        parse_signal_type(&self.raw_type)
    }
}
