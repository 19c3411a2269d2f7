// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Literal placeholder substitution for the blackbox templates.
//!
//! Templates use `{name}` placeholders; `{{` and `}}` produce literal braces,
//! which the C++ bodies need everywhere. Nothing else is interpreted.
//! Fragments are supplied through typed records whose field names are the
//! slot set, so a template can be checked against a record before rendering.

use crate::error::{BlackboxError, Result};
use std::path::Path;

/// A record of named fragments that can fill a template.
pub trait TemplateSlots {
    /// Every placeholder name the record provides.
    const SLOTS: &'static [&'static str];

    fn slot(&self, name: &str) -> Option<&str>;
}

macro_rules! fragment_record {
    ($(#[$meta:meta])* $name:ident { $($field:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            $(pub $field: String,)+
        }

        impl TemplateSlots for $name {
            const SLOTS: &'static [&'static str] = &[$(stringify!($field)),+];

            fn slot(&self, name: &str) -> Option<&str> {
                match name {
                    $(stringify!($field) => Some(self.$field.as_str()),)+
                    _ => None,
                }
            }
        }
    };
}

fragment_record! {
    /// Fragments of the SystemC driver (`<module>_driver.cpp`).
    DriverFragments {
        module,
        port_defs,
        bindings,
        var_decl,
        dest,
        clock,
        sender,
        receiver,
        inputs,
        outputs,
    }
}

fragment_record! {
    /// Fragments of the SST model component (`<module>_comp.cpp`).
    ModelFragments {
        module,
        lib,
        comp,
        desc,
        link_desc0,
        link_desc1,
        var_decl,
        var_init,
        var_bind,
        var_dest,
        sender,
        receiver,
        inputs,
        outputs,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(String),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(text: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = text.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, c)) if c.is_ascii_alphanumeric() || c == '_' => name.push(c),
                            Some((at, c)) => {
                                return Err(BlackboxError::MalformedTemplate {
                                    offset: at,
                                    reason: format!("unexpected '{}' in placeholder", c),
                                })
                            }
                            None => {
                                return Err(BlackboxError::MalformedTemplate {
                                    offset: pos,
                                    reason: "unterminated placeholder".to_string(),
                                })
                            }
                        }
                    }
                    if name.is_empty() {
                        return Err(BlackboxError::MalformedTemplate {
                            offset: pos,
                            reason: "empty placeholder".to_string(),
                        });
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Slot(name));
                }
                '}' => {
                    return Err(BlackboxError::MalformedTemplate {
                        offset: pos,
                        reason: "single '}' (write '}}' for a literal brace)".to_string(),
                    })
                }
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Reads and parses a template file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(BlackboxError::TemplateNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let template = Self::parse(&text)?;
        tracing::debug!(
            "Loaded template {:?} ({} placeholders)",
            path,
            template.slots().count()
        );
        Ok(template)
    }

    /// Placeholder names in order of appearance, repeats included.
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Slot(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Fails on the first placeholder `F` does not provide.
    pub fn check<F: TemplateSlots>(&self) -> Result<()> {
        match self.slots().find(|name| !F::SLOTS.contains(name)) {
            Some(slot) => Err(BlackboxError::MissingTemplateSlot {
                slot: slot.to_string(),
            }),
            None => Ok(()),
        }
    }

    pub fn render<F: TemplateSlots>(&self, fragments: &F) -> Result<String> {
        self.check::<F>()?;
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(name) => {
                    let value =
                        fragments
                            .slot(name)
                            .ok_or_else(|| BlackboxError::MissingTemplateSlot {
                                slot: name.clone(),
                            })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// Parses `text` and fills it from `fragments`.
pub fn render<F: TemplateSlots>(text: &str, fragments: &F) -> Result<String> {
    Template::parse(text)?.render(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> DriverFragments {
        DriverFragments {
            module: "ram".to_string(),
            sender: "m_signal_io".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_slot_sets() {
        assert_eq!(
            DriverFragments::SLOTS,
            &[
                "module", "port_defs", "bindings", "var_decl", "dest", "clock", "sender",
                "receiver", "inputs", "outputs"
            ]
        );
        assert_eq!(ModelFragments::SLOTS.len(), 14);
        assert!(ModelFragments::SLOTS.contains(&"link_desc1"));
    }

    #[test]
    fn test_render_substitutes_and_unescapes() {
        let out = render("{module} DUT(\"{module}\"); int f() {{ return 0; }}", &driver()).unwrap();
        assert_eq!(out, "ram DUT(\"ram\"); int f() { return 0; }");
    }

    #[test]
    fn test_render_unknown_slot() {
        let err = render("{module}.{modul}", &driver()).unwrap_err();
        match err {
            BlackboxError::MissingTemplateSlot { slot } => assert_eq!(slot, "modul"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_model_slot_rejected_by_driver_record() {
        let template = Template::parse("{var_init}").unwrap();
        assert!(template.check::<ModelFragments>().is_ok());
        assert!(matches!(
            template.check::<DriverFragments>(),
            Err(BlackboxError::MissingTemplateSlot { .. })
        ));
    }

    #[test]
    fn test_malformed_templates() {
        for text in ["int main() { }", "{module", "{}", "{ module }", "a } b"] {
            let err = Template::parse(text).unwrap_err();
            assert!(
                matches!(err, BlackboxError::MalformedTemplate { .. }),
                "{text:?} gave {err}"
            );
        }
    }

    #[test]
    fn test_no_code_execution() {
        let out = render("{sender}.set({{0}})", &driver()).unwrap();
        assert_eq!(out, "m_signal_io.set({0})");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Template::load("/nonexistent/blackbox/driver.tmpl").unwrap_err();
        assert!(matches!(err, BlackboxError::TemplateNotFound(_)));
    }

    #[test]
    fn test_render_is_idempotent() {
        let template = Template::parse("{sender}\n{module}{{}}").unwrap();
        let first = template.render(&driver()).unwrap();
        let second = template.render(&driver()).unwrap();
        assert_eq!(first, second);
    }
}
