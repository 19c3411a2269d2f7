// LabWired - Firmware Simulation Platform
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use blackbox_codegen::{
    parse_signal_type, Blackbox, IpcVariant, LogicalType, ModuleInfo, PortRegistry,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_clock_markers_have_zero_width(suffix in "[a-zA-Z0-9_<>]{0,12}") {
        let token = format!("<__clock__{}>", suffix);
        // Tokens mentioning `sc` are parsed as SystemC types first.
        prop_assume!(!token.contains("sc"));
        let ty = parse_signal_type(&token).unwrap();
        prop_assert!(ty.is_clock());
        prop_assert_eq!(ty.width, 0);
    }

    #[test]
    fn test_bit_vector_width_is_declared_length(n in 1u32..100_000, lv in any::<bool>()) {
        let token = if lv {
            format!("<sc_lv<{}>>", n)
        } else {
            format!("<sc_bv<{}>>", n)
        };
        let ty = parse_signal_type(&token).unwrap();
        prop_assert_eq!(ty.logical, Some(LogicalType::Int));
        prop_assert_eq!(ty.width, n);
    }

    #[test]
    fn test_int_width_is_floor_log2(n in 1u64..u32::MAX as u64) {
        let ty = parse_signal_type(&format!("<sc_uint<{}>>", n)).unwrap();
        prop_assert_eq!(ty.width, 63 - n.leading_zeros());
    }

    #[test]
    fn test_enum_order_matches_declaration(
        names in prop::collection::vec("[a-z][a-z0-9_]{0,8}", 1..12)
    ) {
        let entries: Vec<(String, String)> = names
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let tag = if i % 2 == 0 { "input" } else { "output" };
                (format!("<sc_bv<{}>> {}", i + 1, n), tag.to_string())
            })
            .collect();

        let module = ModuleInfo::new("fuzz", "tests").unwrap();
        let mut bbox = Blackbox::new(module, IpcVariant::Socket);
        bbox.set_ports(PortRegistry::classify(entries).unwrap());

        let expected: Vec<String> = names.iter().map(|n| format!("FZZ_{}", n)).collect();
        prop_assert_eq!(bbox.enum_slots().unwrap(), expected);

        let layout = bbox.payload_layout().unwrap();
        let mut prev_end = 2;
        for field in &layout.fields {
            prop_assert_eq!(field.offset, prev_end);
            prev_end = field.offset + field.width;
        }
    }
}
