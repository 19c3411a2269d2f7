// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Blackbox code generation.
//!
//! A blackbox lets a SystemC module run as an SST component: a driver
//! program owns the SystemC kernel and exchanges signal values with a model
//! component over IPC. This crate produces the three sources of a blackbox
//! from a module identity, an IPC transport and a classified port list:
//!
//! 1. `<module>_driver.cpp`: the SystemC driver,
//! 2. `<module>_comp.cpp`: the SST model component,
//! 3. `<module>_ports.hpp`: the shared port-index enumeration.
//!
//! Generation is pure; reading templates and writing files is left to the
//! caller.

pub mod binding;
pub mod error;
pub mod ipc;
pub mod ports;
pub mod signal;
pub mod template;

pub use binding::{BindingFormatter, PayloadField, PayloadLayout, PAYLOAD_HEADER_LEN};
pub use error::{BlackboxError, Result};
pub use ipc::{IpcTransport, IpcVariant};
pub use ports::{abbreviate, ModuleInfo, PortCategory, PortRegistry};
pub use signal::{parse_signal_type, LogicalType, Signal, SignalType};
pub use template::{DriverFragments, ModelFragments, Template, TemplateSlots};

use std::fmt;

/// The three generated sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Driver,
    Model,
    Ports,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Driver,
        ArtifactKind::Model,
        ArtifactKind::Ports,
    ];

    pub fn file_name(self, module: &str) -> String {
        match self {
            ArtifactKind::Driver => format!("{}_driver.cpp", module),
            ArtifactKind::Model => format!("{}_comp.cpp", module),
            ArtifactKind::Ports => format!("{}_ports.hpp", module),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Driver => write!(f, "driver"),
            ArtifactKind::Model => write!(f, "model"),
            ArtifactKind::Ports => write!(f, "ports"),
        }
    }
}

/// Rendered sources of one blackbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub driver: String,
    pub model: String,
    pub ports: String,
}

impl Artifacts {
    pub fn get(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Driver => &self.driver,
            ArtifactKind::Model => &self.model,
            ArtifactKind::Ports => &self.ports,
        }
    }
}

/// Blackbox generator for a single module.
///
/// Module identity and transport are fixed at construction. The port list
/// is supplied in one call and replaces any previous one.
#[derive(Debug, Clone)]
pub struct Blackbox {
    module: ModuleInfo,
    ipc: IpcVariant,
    ports: PortRegistry,
}

impl Blackbox {
    pub fn new(module: ModuleInfo, ipc: IpcVariant) -> Self {
        Self {
            module,
            ipc,
            ports: PortRegistry::default(),
        }
    }

    /// Builds a generator from a textual IPC token (`sock`, `zmq`, ...).
    pub fn with_ipc_token(module: ModuleInfo, ipc: &str) -> Result<Self> {
        Ok(Self::new(module, ipc.parse()?))
    }

    /// Classifies `entries` and, if all are valid, replaces the port list.
    pub fn classify<I, D, T>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (D, T)>,
        D: AsRef<str>,
        T: AsRef<str>,
    {
        self.ports = PortRegistry::classify(entries)?;
        Ok(())
    }

    pub fn set_ports(&mut self, ports: PortRegistry) {
        self.ports = ports;
    }

    pub fn module(&self) -> &ModuleInfo {
        &self.module
    }

    pub fn ipc(&self) -> IpcVariant {
        self.ipc
    }

    pub fn ports(&self) -> &PortRegistry {
        &self.ports
    }

    fn formatter(&self) -> Result<BindingFormatter<'_>> {
        if self.ports.is_empty() {
            return Err(BlackboxError::EmptyPortSet);
        }
        Ok(BindingFormatter::new(
            &self.module,
            &self.ports,
            self.ipc.transport(),
        ))
    }

    pub fn driver_fragments(&self) -> Result<DriverFragments> {
        let fmt = self.formatter()?;
        let transport = self.ipc.transport();
        Ok(DriverFragments {
            module: self.module.name().to_string(),
            port_defs: fmt.port_defs(),
            bindings: fmt.dut_bindings(),
            var_decl: transport.driver_decl(&self.module.nports_const()),
            dest: transport.driver_teardown().to_string(),
            clock: fmt.driver_clocks(),
            sender: transport.sender().to_string(),
            receiver: transport.receiver().to_string(),
            inputs: fmt.driver_input_reads()?,
            outputs: fmt.driver_output_writes(),
        })
    }

    pub fn model_fragments(&self) -> Result<ModelFragments> {
        let fmt = self.formatter()?;
        let transport = self.ipc.transport();
        let [link_desc0, link_desc1] = self.module.link_descriptions().clone();
        Ok(ModelFragments {
            module: self.module.name().to_string(),
            lib: self.module.lib().to_string(),
            comp: self.module.name().to_string(),
            desc: self.module.description().to_string(),
            link_desc0,
            link_desc1,
            var_decl: transport.model_decl().to_string(),
            var_init: transport.model_init(&self.module.nports_const()),
            var_bind: transport.model_bind().to_string(),
            var_dest: transport.model_teardown().to_string(),
            sender: transport.sender().to_string(),
            receiver: transport.receiver().to_string(),
            // The model forwards the DUT's outputs and feeds it inputs.
            inputs: fmt.model_output_serialize()?,
            outputs: fmt.model_input_deserialize()?,
        })
    }

    pub fn generate_driver(&self, template: &Template) -> Result<String> {
        template.render(&self.driver_fragments()?)
    }

    pub fn generate_model(&self, template: &Template) -> Result<String> {
        template.render(&self.model_fragments()?)
    }

    pub fn generate_ports_enum(&self) -> Result<String> {
        Ok(self.formatter()?.ports_enum())
    }

    pub fn payload_layout(&self) -> Result<PayloadLayout> {
        self.formatter()?.payload_layout()
    }

    /// Enumerator names in slot order, `__pid__` excluded.
    pub fn enum_slots(&self) -> Result<Vec<String>> {
        Ok(self.formatter()?.enum_slots())
    }

    /// Renders all three sources; nothing is returned unless all succeed.
    pub fn generate(&self, driver: &Template, model: &Template) -> Result<Artifacts> {
        let artifacts = Artifacts {
            driver: self.generate_driver(driver)?,
            model: self.generate_model(model)?,
            ports: self.generate_ports_enum()?,
        };
        tracing::debug!(
            "Generated {} blackbox ({} ports, {} IPC)",
            self.module.name(),
            self.ports.len(),
            self.ipc
        );
        Ok(artifacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lfsr(ipc: IpcVariant) -> Blackbox {
        let module = ModuleInfo::new("galois_lfsr", "tests").unwrap();
        let mut bbox = Blackbox::new(module, ipc);
        bbox.classify([
            ("<bool> clock", "clock"),
            ("<bool> reset", "input"),
            ("<sc_uint<4> > data_out", "output"),
        ])
        .unwrap();
        bbox
    }

    #[test]
    fn test_artifact_file_names() {
        assert_eq!(ArtifactKind::Driver.file_name("ram"), "ram_driver.cpp");
        assert_eq!(ArtifactKind::Model.file_name("ram"), "ram_comp.cpp");
        assert_eq!(ArtifactKind::Ports.file_name("ram"), "ram_ports.hpp");
    }

    #[test]
    fn test_empty_port_set() {
        let module = ModuleInfo::new("ram", "tests").unwrap();
        let bbox = Blackbox::new(module, IpcVariant::Socket);
        assert!(matches!(bbox.generate_ports_enum(), Err(BlackboxError::EmptyPortSet)));
        assert!(matches!(bbox.driver_fragments(), Err(BlackboxError::EmptyPortSet)));
        assert!(matches!(bbox.model_fragments(), Err(BlackboxError::EmptyPortSet)));
    }

    #[test]
    fn test_reclassify_replaces_ports() {
        let mut bbox = lfsr(IpcVariant::Socket);
        bbox.classify([("<bool> only", "input")]).unwrap();
        assert_eq!(bbox.ports().len(), 1);
        assert_eq!(
            bbox.generate_ports_enum().unwrap(),
            "int GLSLFSR_NPORTS = 2;\n\nenum galois_lfsr_ports {\n    __pid__, GLSLFSR_only\n};\n"
        );
    }

    #[test]
    fn test_failed_classify_keeps_previous_ports() {
        let mut bbox = lfsr(IpcVariant::Socket);
        assert!(bbox.classify([("<bool> x", "input"), ("<bool> y", "bidir")]).is_err());
        assert_eq!(bbox.ports().len(), 3);
    }

    #[test]
    fn test_unknown_ipc_token() {
        let module = ModuleInfo::new("ram", "tests").unwrap();
        assert!(matches!(
            Blackbox::with_ipc_token(module, "shm"),
            Err(BlackboxError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_driver_fragments_socket() {
        let frags = lfsr(IpcVariant::Socket).driver_fragments().unwrap();
        assert_eq!(frags.module, "galois_lfsr");
        assert_eq!(frags.sender, "m_signal_io");
        assert_eq!(frags.receiver, "m_signal_io");
        assert_eq!(frags.dest, "");
        assert!(frags.var_decl.contains("GLSLFSR_NPORTS"));
        assert_eq!(
            frags.inputs,
            "reset = m_signal_io.get<bool>(galois_lfsr_ports::GLSLFSR_reset)"
        );
    }

    #[test]
    fn test_model_fragments_zmq() {
        let module = ModuleInfo::new("galois_lfsr", "tests")
            .unwrap()
            .with_description("Galois LFSR")
            .with_link_descriptions("rx", "tx");
        let mut bbox = Blackbox::new(module, IpcVariant::MessageQueue);
        bbox.classify([("<bool> reset", "input"), ("<sc_uint<4> > data_out", "output")])
            .unwrap();

        let frags = bbox.model_fragments().unwrap();
        assert_eq!(frags.comp, "galois_lfsr");
        assert_eq!(frags.lib, "tests");
        assert_eq!(frags.desc, "Galois LFSR");
        assert_eq!(frags.link_desc0, "rx");
        assert_eq!(frags.link_desc1, "tx");
        assert_eq!(frags.var_bind, "m_socket.bind(m_ipc_port.c_str())");
        assert_eq!(frags.var_dest, "m_socket.close();");
        assert!(frags.inputs.starts_with("std::to_string(m_signal_i.get<int>("));
        assert!(frags.outputs.starts_with("m_signal_o.set(galois_lfsr_ports::GLSLFSR_reset"));
    }

    #[test]
    fn test_generate_renders_all() {
        let bbox = lfsr(IpcVariant::Socket);
        let driver = Template::parse("{module}: {inputs}").unwrap();
        let model = Template::parse("{comp}/{lib}: {outputs}").unwrap();
        let artifacts = bbox.generate(&driver, &model).unwrap();
        assert_eq!(
            artifacts.get(ArtifactKind::Driver),
            "galois_lfsr: reset = m_signal_io.get<bool>(galois_lfsr_ports::GLSLFSR_reset)"
        );
        assert!(artifacts.model.starts_with("galois_lfsr/tests: m_signal_io.set("));
        assert!(artifacts.ports.starts_with("int GLSLFSR_NPORTS = 4;"));
    }

    #[test]
    fn test_generate_fails_on_driver_slot_in_model_template() {
        let bbox = lfsr(IpcVariant::Socket);
        let driver = Template::parse("{module}").unwrap();
        let model = Template::parse("{port_defs}").unwrap();
        assert!(matches!(
            bbox.generate(&driver, &model),
            Err(BlackboxError::MissingTemplateSlot { .. })
        ));
    }
}
