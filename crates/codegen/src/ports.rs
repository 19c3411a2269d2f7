// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::error::{BlackboxError, Result};
use crate::signal::Signal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of the wrapped SystemC module and its SST element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
    name: String,
    lib: String,
    desc: String,
    link_desc: [String; 2],
    abbr: String,
}

impl ModuleInfo {
    pub fn new(name: &str, lib: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BlackboxError::InvalidConfiguration(
                "Module name cannot be empty".to_string(),
            ));
        }
        let abbr = abbreviate(name);
        if abbr.is_empty() {
            tracing::warn!(
                "Module name '{}' abbreviates to an empty prefix; generated constants will start with '_'",
                name
            );
        }
        Ok(Self {
            name: name.to_string(),
            lib: lib.to_string(),
            desc: String::new(),
            link_desc: [String::new(), String::new()],
            abbr,
        })
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    /// Descriptions of the receiving and transmitting SST links, in that order.
    pub fn with_link_descriptions(mut self, rx: impl Into<String>, tx: impl Into<String>) -> Self {
        self.link_desc = [rx.into(), tx.into()];
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lib(&self) -> &str {
        &self.lib
    }

    pub fn description(&self) -> &str {
        &self.desc
    }

    pub fn link_descriptions(&self) -> &[String; 2] {
        &self.link_desc
    }

    /// Upper-cased abbreviation used to prefix generated constants.
    pub fn abbreviation(&self) -> &str {
        &self.abbr
    }

    /// Name of the signal-count constant, e.g. `RM_NPORTS`.
    pub fn nports_const(&self) -> String {
        format!("{}_NPORTS", self.abbr)
    }

    /// Enumerator naming a port's slot, e.g. `RM_data_in`.
    pub fn slot_name(&self, port: &str) -> String {
        format!("{}_{}", self.abbr, port)
    }

    /// Qualified reference to a port's slot, e.g. `ram_ports::RM_data_in`.
    pub fn slot_ref(&self, port: &str) -> String {
        format!("{}_ports::{}", self.name, self.slot_name(port))
    }
}

/// Drops ASCII punctuation and lower-case vowels, then upper-cases the rest.
///
/// Distinct modules may share an abbreviation (`ram` and `rom` both give
/// `RM`); generating both into one translation unit is not supported.
pub fn abbreviate(module: &str) -> String {
    module
        .chars()
        .filter(|c| !c.is_ascii_punctuation() && !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
        .collect::<String>()
        .to_uppercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortCategory {
    Clock,
    Input,
    Output,
    Inout,
}

impl FromStr for PortCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "clock" => Ok(PortCategory::Clock),
            "input" => Ok(PortCategory::Input),
            "output" => Ok(PortCategory::Output),
            "inout" => Ok(PortCategory::Inout),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for PortCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PortCategory::Clock => "clock",
            PortCategory::Input => "input",
            PortCategory::Output => "output",
            PortCategory::Inout => "inout",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub category: PortCategory,
    pub signal: Signal,
}

/// Classified, immutable port list in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortRegistry {
    ports: Vec<Port>,
}

impl PortRegistry {
    /// Validates and classifies a complete port list.
    ///
    /// Each entry pairs a declaration (`<type> <name>`) with a category tag.
    /// Nothing is registered unless every entry is valid.
    pub fn classify<I, D, T>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (D, T)>,
        D: AsRef<str>,
        T: AsRef<str>,
    {
        let mut ports = Vec::new();
        for (decl, tag) in entries {
            let (decl, tag) = (decl.as_ref(), tag.as_ref());
            let category: PortCategory =
                tag.parse().map_err(|tag| BlackboxError::InvalidPortCategory {
                    signal: decl.to_string(),
                    tag,
                })?;
            let signal = Signal::from_decl(decl)?;
            tracing::debug!(
                "Classified port '{}' ({}) as {}",
                signal.name(),
                signal.raw_type(),
                category
            );
            if category == PortCategory::Inout {
                tracing::warn!(
                    "Inout port '{}' is declared and bound but not exchanged over IPC",
                    signal.name()
                );
            }
            ports.push(Port { category, signal });
        }
        Ok(Self { ports })
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// All ports in declaration order.
    pub fn ports(&self) -> impl Iterator<Item = &Signal> {
        self.ports.iter().map(|p| &p.signal)
    }

    pub fn of(&self, category: PortCategory) -> impl Iterator<Item = &Signal> {
        self.ports
            .iter()
            .filter(move |p| p.category == category)
            .map(|p| &p.signal)
    }

    pub fn clocks(&self) -> impl Iterator<Item = &Signal> {
        self.of(PortCategory::Clock)
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Signal> {
        self.of(PortCategory::Input)
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Signal> {
        self.of(PortCategory::Output)
    }

    pub fn inouts(&self) -> impl Iterator<Item = &Signal> {
        self.of(PortCategory::Inout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviation() {
        assert_eq!(abbreviate("ram"), "RM");
        assert_eq!(abbreviate("galois_lfsr"), "GLSLFSR");
        assert_eq!(abbreviate("Inverter-2"), "INVRTR2");
        assert_eq!(abbreviate("aeiou"), "");
    }

    #[test]
    fn test_abbreviation_collision_is_possible() {
        assert_eq!(abbreviate("ram"), abbreviate("rom"));
    }

    #[test]
    fn test_module_slot_names() {
        let module = ModuleInfo::new("ram", "tests").unwrap();
        assert_eq!(module.abbreviation(), "RM");
        assert_eq!(module.nports_const(), "RM_NPORTS");
        assert_eq!(module.slot_name("cs"), "RM_cs");
        assert_eq!(module.slot_ref("cs"), "ram_ports::RM_cs");
        assert_eq!(module.link_descriptions(), &[String::new(), String::new()]);
    }

    #[test]
    fn test_empty_module_name_rejected() {
        assert!(matches!(
            ModuleInfo::new("  ", "tests"),
            Err(BlackboxError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_classify_preserves_order() {
        let reg = PortRegistry::classify([
            ("<bool> clock", "clock"),
            ("<bool> reset", "input"),
            ("<sc_uint<4> > data_out", "output"),
            ("<bool> en", "input"),
        ])
        .unwrap();

        let names: Vec<_> = reg.ports().map(Signal::name).collect();
        assert_eq!(names, ["clock", "reset", "data_out", "en"]);
        let inputs: Vec<_> = reg.inputs().map(Signal::name).collect();
        assert_eq!(inputs, ["reset", "en"]);
        assert_eq!(reg.clocks().count(), 1);
        assert_eq!(reg.outputs().count(), 1);
        assert_eq!(reg.inouts().count(), 0);
    }

    #[test]
    fn test_classify_rejects_bad_tag_without_partial_registration() {
        let err =
            PortRegistry::classify([("<bool> a", "input"), ("<bool> b", "wire")]).unwrap_err();
        match err {
            BlackboxError::InvalidPortCategory { signal, tag } => {
                assert_eq!(signal, "<bool> b");
                assert_eq!(tag, "wire");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_classify_empty() {
        let reg = PortRegistry::classify(Vec::<(String, String)>::new()).unwrap();
        assert!(reg.is_empty());
    }
}
