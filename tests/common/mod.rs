//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use circuit_sizer::sizing::{CircuitInputs, DistributionSystem, DownstreamElement};

/// Single-pole 20 A, 120 V branch carrying 16 A at power factor 0.9.
pub fn branch_20a(length_feet: f64) -> CircuitInputs {
    CircuitInputs {
        panel_name: "LP1".into(),
        circuit_number: "1".into(),
        load_name: Some("RECEPTACLES".into()),
        rating: Some(20.0),
        length_feet: Some(length_feet),
        voltage: Some(120.0),
        power_factor: Some(0.9),
        apparent_current: Some(16.0),
        ..CircuitInputs::default()
    }
}

/// Three-pole 225 A, 480 V feeder to a 150 kVA transformer whose
/// distribution system has no line-to-ground voltage.
pub fn transformer_feeder() -> CircuitInputs {
    CircuitInputs {
        panel_name: "MDP".into(),
        circuit_number: "1".into(),
        load_name: Some("XFMR T1".into()),
        poles: 3,
        rating: Some(225.0),
        length_feet: Some(100.0),
        voltage: Some(480.0),
        power_factor: Some(0.9),
        downstream: vec![DownstreamElement {
            part_type: Some(DownstreamElement::TRANSFORMER),
            total_estimated_va: Some(150_000.0),
            distribution: Some(DistributionSystem {
                line_to_line_volts: Some(480.0),
                line_to_ground_volts: None,
            }),
            ..DownstreamElement::default()
        }],
        ..CircuitInputs::default()
    }
}

/// Three-pole 1000 A, 480 V circuit carrying 900 A.
pub fn large_service(length_feet: f64) -> CircuitInputs {
    CircuitInputs {
        panel_name: "SWBD".into(),
        circuit_number: "1".into(),
        poles: 3,
        rating: Some(1000.0),
        length_feet: Some(length_feet),
        voltage: Some(480.0),
        power_factor: Some(0.9),
        apparent_current: Some(900.0),
        ..CircuitInputs::default()
    }
}

/// Expected demand current for [`transformer_feeder`].
pub fn transformer_demand_amps() -> f64 {
    150_000.0 / (480.0 * 3f64.sqrt())
}
