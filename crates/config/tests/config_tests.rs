// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use blackbox_codegen::IpcVariant;
use blackbox_config::BlackboxManifest;
use std::path::PathBuf;

#[test]
fn test_minimal_manifest_defaults() {
    let yaml = r#"
module: galois_lfsr
lib: tests
ipc: sockets
templates:
  driver: driver.cpp.tmpl
  model: model.cpp.tmpl
ports:
  - { signal: "<bool> clock", category: clock }
  - { signal: "<bool> reset", category: input }
  - { signal: "<sc_uint<4> > data_out", category: output }
"#;
    let m = BlackboxManifest::from_yaml(yaml).unwrap();
    assert_eq!(m.ipc, IpcVariant::Socket);
    assert_eq!(m.desc, "");
    assert_eq!(m.link_desc, [String::new(), String::new()]);
    assert_eq!(m.output_dir, PathBuf::from("blackboxes"));
    // No manifest directory: paths stay as written.
    assert_eq!(m.driver_template(), PathBuf::from("driver.cpp.tmpl"));

    let bbox = m.build(None).unwrap();
    assert_eq!(bbox.module().abbreviation(), "GLSLFSR");
    assert_eq!(bbox.ports().clocks().count(), 1);
}

#[test]
fn test_unknown_field_rejected() {
    let yaml = r#"
module: ram
lib: tests
ipc: zmq
templates: { driver: d.tmpl, model: m.tmpl }
port: []
"#;
    assert!(BlackboxManifest::from_yaml(yaml).is_err());
}

#[test]
fn test_malformed_signal_declaration() {
    let yaml = r#"
module: ram
lib: tests
ipc: message-queue
templates: { driver: d.tmpl, model: m.tmpl }
ports:
  - { signal: "address", category: input }
"#;
    let m = BlackboxManifest::from_yaml(yaml).unwrap();
    let err = m.build(None).unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid signal declaration 'address'"));
}
