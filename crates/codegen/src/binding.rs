// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Formats a classified port list into the C++ fragments substituted into
//! the driver and model templates.
//!
//! The driver reads inputs from the wire and writes outputs back; the model
//! mirrors that by serialising outputs into the event it forwards and by
//! deserialising the inputs it receives from a flat string payload.

use crate::error::{BlackboxError, Result};
use crate::ipc::IpcTransport;
use crate::ports::{ModuleInfo, PortRegistry};
use crate::signal::Signal;
use serde::Serialize;

/// Characters reserved at the head of every model payload.
pub const PAYLOAD_HEADER_LEN: u32 = 2;

/// Separator between top-level statements in `sc_main`.
const STMT_SEP: &str = ";\n    ";
/// Separator between statements inside the exchange loop / event handler.
const LOOP_STMT_SEP: &str = ";\n        ";
/// Separator between terms of the serialised output string.
const CONCAT_SEP: &str = " +\n                ";

/// One field of the flattened model-side input payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadField {
    pub name: String,
    pub slot: String,
    pub offset: u32,
    pub width: u32,
    pub clock: bool,
}

/// Field layout of the payload the model receives, inputs first and then
/// the clocks, which occupy no characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadLayout {
    pub fields: Vec<PayloadField>,
}

impl PayloadLayout {
    /// Total payload length, header included.
    pub fn len(&self) -> u64 {
        self.fields
            .last()
            .map(|f| u64::from(f.offset) + u64::from(f.width))
            .unwrap_or(u64::from(PAYLOAD_HEADER_LEN))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

pub struct BindingFormatter<'a> {
    module: &'a ModuleInfo,
    ports: &'a PortRegistry,
    transport: &'a dyn IpcTransport,
}

impl<'a> BindingFormatter<'a> {
    pub fn new(
        module: &'a ModuleInfo,
        ports: &'a PortRegistry,
        transport: &'a dyn IpcTransport,
    ) -> Self {
        Self {
            module,
            ports,
            transport,
        }
    }

    /// `sc_signal<type> name` for every port.
    pub fn port_defs(&self) -> String {
        join(self.ports.ports().map(|s| format!("sc_signal{}", s.decl())), STMT_SEP)
    }

    /// Connects each local signal to the DUT port of the same name.
    pub fn dut_bindings(&self) -> String {
        join(
            self.ports
                .ports()
                .map(|s| format!("DUT.{sig}({sig})", sig = s.name())),
            STMT_SEP,
        )
    }

    /// Reads each clock's pulse from the receiver.
    pub fn driver_clocks(&self) -> String {
        join(
            self.ports.clocks().map(|s| {
                format!(
                    "{} = {}.get_clock_pulse({})",
                    s.name(),
                    self.transport.receiver(),
                    self.module.slot_ref(s.name())
                )
            }),
            STMT_SEP,
        )
    }

    /// Assigns each driver input from the receiver.
    pub fn driver_input_reads(&self) -> Result<String> {
        let reads = self
            .ports
            .inputs()
            .map(|s| -> Result<String> {
                Ok(format!(
                    "{} = {}.get{}({})",
                    s.name(),
                    self.transport.receiver(),
                    s.signal_type()?.template_arg(),
                    self.module.slot_ref(s.name())
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(reads.join(LOOP_STMT_SEP))
    }

    /// Stores each driver output on the sender.
    pub fn driver_output_writes(&self) -> String {
        join(
            self.ports.outputs().map(|s| {
                format!(
                    "{}.set({}, {})",
                    self.transport.sender(),
                    self.module.slot_ref(s.name()),
                    s.name()
                )
            }),
            LOOP_STMT_SEP,
        )
    }

    /// Concatenation of the model's outputs as strings, forwarded on the
    /// outgoing SST link.
    pub fn model_output_serialize(&self) -> Result<String> {
        let terms = self
            .ports
            .outputs()
            .map(|s| -> Result<String> {
                Ok(format!(
                    "std::to_string({}.get{}({}))",
                    self.transport.receiver(),
                    s.signal_type()?.template_arg(),
                    self.module.slot_ref(s.name())
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(terms.join(CONCAT_SEP))
    }

    /// Computes where each model input sits in the incoming payload.
    pub fn payload_layout(&self) -> Result<PayloadLayout> {
        let clocks: Vec<Signal> = self
            .ports
            .clocks()
            .map(|s| Signal::clock_marker(s.name()))
            .collect();

        let mut offset = PAYLOAD_HEADER_LEN;
        let mut fields = Vec::new();
        for sig in self.ports.inputs().chain(clocks.iter()) {
            let ty = sig.signal_type()?;
            if ty.width == 0 && !ty.is_clock() {
                tracing::warn!(
                    "Input '{}' ({}) has zero payload width and will read to the end of the payload",
                    sig.name(),
                    sig.raw_type()
                );
            }
            tracing::debug!(
                "Payload field '{}' at offset {} width {}",
                sig.name(),
                offset,
                ty.width
            );
            fields.push(PayloadField {
                name: sig.name().to_string(),
                slot: self.module.slot_name(sig.name()),
                offset,
                width: ty.width,
                clock: ty.is_clock(),
            });
            offset = offset
                .checked_add(ty.width)
                .ok_or_else(|| BlackboxError::PayloadOverflow {
                    field: sig.name().to_string(),
                    offset,
                    width: ty.width,
                })?;
        }
        Ok(PayloadLayout { fields })
    }

    /// Parses each model input out of `_data_in` and stores it on the sender.
    ///
    /// Clock fields occupy no payload and produce no read.
    pub fn model_input_deserialize(&self) -> Result<String> {
        let layout = self.payload_layout()?;
        Ok(join(
            layout.fields.iter().filter(|f| !f.clock).map(|f| {
                let len = if f.width > 0 {
                    format!(", {}", f.width)
                } else {
                    String::new()
                };
                format!(
                    "{}.set({}, std::stoi(_data_in.substr({}{})))",
                    self.transport.sender(),
                    self.module.slot_ref(&f.name),
                    f.offset,
                    len
                )
            }),
            LOOP_STMT_SEP,
        ))
    }

    /// Enumerator names for every port, slot 0 (`__pid__`) excluded.
    pub fn enum_slots(&self) -> Vec<String> {
        self.ports
            .ports()
            .map(|s| self.module.slot_name(s.name()))
            .collect()
    }

    /// Value of the port-count constant: every port plus the pid slot.
    pub fn nports(&self) -> usize {
        self.ports.len() + 1
    }

    /// Body of the `<module>_ports.hpp` header.
    pub fn ports_enum(&self) -> String {
        format!(
            "int {nports_const} = {nports};\n\nenum {module}_ports {{\n    __pid__, {slots}\n}};\n",
            nports_const = self.module.nports_const(),
            nports = self.nports(),
            module = self.module.name(),
            slots = self.enum_slots().join(", ")
        )
    }
}

fn join<I: Iterator<Item = String>>(items: I, sep: &str) -> String {
    items.collect::<Vec<_>>().join(sep)
}
