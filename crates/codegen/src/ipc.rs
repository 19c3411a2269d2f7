// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! IPC transports between the SystemC driver and the SST model.
//!
//! Each transport contributes the C++ declarations, initialisers, bind and
//! teardown statements for both sides, plus the names of the endpoints
//! used to send and receive signal values.

use crate::error::{BlackboxError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transport selected for a blackbox. Fixed once the generator is built.
///
/// Deserialises through [`FromStr`], so manifests accept the same tokens as
/// the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum IpcVariant {
    /// UNIX domain socket shared by both directions.
    Socket,
    /// ZeroMQ REQ/REP pair with distinct transmit and receive handlers.
    MessageQueue,
}

impl IpcVariant {
    pub fn transport(self) -> &'static dyn IpcTransport {
        match self {
            IpcVariant::Socket => &SocketTransport,
            IpcVariant::MessageQueue => &ZmqTransport,
        }
    }
}

impl FromStr for IpcVariant {
    type Err = BlackboxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "sock" | "socks" | "socket" | "sockets" => Ok(IpcVariant::Socket),
            "zmq" | "message-queue" => Ok(IpcVariant::MessageQueue),
            other => Err(BlackboxError::InvalidConfiguration(format!(
                "Unsupported IPC protocol '{}'. Supported: sock, socket, zmq, message-queue",
                other
            ))),
        }
    }
}

impl TryFrom<String> for IpcVariant {
    type Error = BlackboxError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for IpcVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpcVariant::Socket => write!(f, "socket"),
            IpcVariant::MessageQueue => write!(f, "message-queue"),
        }
    }
}

/// Code fragments a transport contributes to the generated sources.
///
/// `nports` is the name of the signal-count constant from the ports header
/// (e.g. `RM_NPORTS`).
pub trait IpcTransport {
    /// Local declarations inside the driver's `sc_main`.
    fn driver_decl(&self, nports: &str) -> String;

    /// Statement closing driver resources, possibly empty.
    fn driver_teardown(&self) -> &'static str;

    /// Member declarations of the SST component.
    fn model_decl(&self) -> &'static str;

    /// Fragment of the component's constructor initialiser list, trailing comma included.
    fn model_init(&self, nports: &str) -> String;

    /// Expression binding the model endpoint to its address.
    fn model_bind(&self) -> &'static str;

    /// Statement closing model resources, possibly empty.
    fn model_teardown(&self) -> &'static str;

    /// Endpoint used to transmit values.
    fn sender(&self) -> &'static str;

    /// Endpoint used to receive values.
    fn receiver(&self) -> &'static str;
}

pub struct SocketTransport;

impl IpcTransport for SocketTransport {
    fn driver_decl(&self, nports: &str) -> String {
        format!(
            "// Initialize signal handlers
    SocketSignal m_signal_io({}, socket(AF_UNIX, SOCK_STREAM, 0), false);
    m_signal_io.set_addr(argv[1]);",
            nports
        )
    }

    fn driver_teardown(&self) -> &'static str {
        ""
    }

    fn model_decl(&self) -> &'static str {
        "SocketSignal m_signal_io;"
    }

    fn model_init(&self, nports: &str) -> String {
        format!(
            "m_signal_io({}, socket(AF_UNIX, SOCK_STREAM, 0)),",
            nports
        )
    }

    fn model_bind(&self) -> &'static str {
        "m_signal_io.set_addr(m_ipc_port)"
    }

    fn model_teardown(&self) -> &'static str {
        ""
    }

    fn sender(&self) -> &'static str {
        "m_signal_io"
    }

    fn receiver(&self) -> &'static str {
        "m_signal_io"
    }
}

pub struct ZmqTransport;

impl IpcTransport for ZmqTransport {
    fn driver_decl(&self, nports: &str) -> String {
        format!(
            "// Socket to talk to server
    zmq::context_t context(1);
    zmq::socket_t socket(context, ZMQ_REQ);
    socket.connect(argv[1]);

    // Initialize signal handlers
    ZMQReceiver m_signal_i({n}, socket);
    ZMQTransmitter m_signal_o({n}, socket);",
            n = nports
        )
    }

    fn driver_teardown(&self) -> &'static str {
        "socket.close();"
    }

    fn model_decl(&self) -> &'static str {
        "zmq::context_t m_context;
    zmq::socket_t m_socket;
    ZMQReceiver m_signal_i;
    ZMQTransmitter m_signal_o;"
    }

    fn model_init(&self, nports: &str) -> String {
        format!(
            "m_context(1), m_socket(m_context, ZMQ_REP),
      m_signal_i({n}, m_socket), m_signal_o({n}, m_socket),",
            n = nports
        )
    }

    fn model_bind(&self) -> &'static str {
        "m_socket.bind(m_ipc_port.c_str())"
    }

    fn model_teardown(&self) -> &'static str {
        "m_socket.close();"
    }

    fn sender(&self) -> &'static str {
        "m_signal_o"
    }

    fn receiver(&self) -> &'static str {
        "m_signal_i"
    }
}
