//! Randomized invariants over the sizing primitives.

mod common;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use circuit_sizer::settings::CircuitSettings;
use circuit_sizer::sizing::{CircuitBranch, CircuitInputs, ConduitRun, is_ampacity_acceptable};
use circuit_sizer::tables::{ConduitSize, ReferenceTables, WireSize};

#[test]
fn ampacity_acceptance_is_monotonic() {
    let tables = ReferenceTables::standard();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..5_000 {
        let rating = tables.standard_ocp[rng.random_range(0..tables.standard_ocp.len())].amps;
        let circuit_amps = rng.random_range(0.0..rating * 1.2);
        let a1 = rng.random_range(0.0..rating * 1.5);
        let a2 = a1 + rng.random_range(0.0..rating);

        if is_ampacity_acceptable(&tables, rating, a1, Some(circuit_amps)) {
            assert!(
                is_ampacity_acceptable(&tables, rating, a2, Some(circuit_amps)),
                "rating {rating} amps {circuit_amps}: {a1} accepted but {a2} rejected"
            );
        }
    }
}

#[test]
fn ampacity_without_load_current_is_never_acceptable() {
    let tables = ReferenceTables::standard();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let rating = rng.random_range(15.0..6000.0);
        let ampacity = rng.random_range(0.0..10_000.0);
        assert!(!is_ampacity_acceptable(&tables, rating, ampacity, None));
    }
}

fn vd_inputs(length: f64, current: f64, volts: f64, poles: u32) -> CircuitInputs {
    CircuitInputs {
        panel_name: "LP1".into(),
        circuit_number: "1".into(),
        poles,
        rating: Some(20.0),
        length_feet: Some(length),
        voltage: Some(volts),
        apparent_current: Some(current),
        ..CircuitInputs::default()
    }
}

#[test]
fn voltage_drop_is_finite_and_non_negative() {
    let settings = CircuitSettings::default();
    let tables = ReferenceTables::standard();
    let mut rng = StdRng::seed_from_u64(1234);
    let voltages = [120.0, 208.0, 240.0, 277.0, 480.0];
    let sizes = [WireSize::Awg12, WireSize::Awg4, WireSize::Awg4_0, WireSize::Kcmil500];

    for _ in 0..500 {
        let length = rng.random_range(1.0..=1000.0);
        let current = rng.random_range(1.0..=1000.0);
        let volts = voltages[rng.random_range(0..voltages.len())];
        let poles = rng.random_range(1..=3);
        let Ok(branch) = CircuitBranch::new(vd_inputs(length, current, volts, poles), &settings, &tables)
        else {
            panic!("valid inputs");
        };

        for size in sizes {
            let sets = rng.random_range(1..=4);
            let vd = branch.calculate_voltage_drop(size, sets);
            assert!(
                vd.is_some_and(|vd| vd.is_finite() && vd >= 0.0),
                "{size} x{sets} at {length} ft, {current} A, {volts} V gave {vd:?}"
            );
        }
    }
}

#[test]
fn voltage_drop_is_zero_without_current_length_or_voltage() {
    let settings = CircuitSettings::default();
    let tables = ReferenceTables::standard();
    let cases = [
        vd_inputs(100.0, 0.0, 120.0, 1),
        vd_inputs(0.0, 16.0, 120.0, 1),
        vd_inputs(100.0, 16.0, 0.0, 1),
        CircuitInputs {
            apparent_current: None,
            ..vd_inputs(100.0, 16.0, 120.0, 1)
        },
        CircuitInputs {
            voltage: None,
            ..vd_inputs(100.0, 16.0, 120.0, 1)
        },
    ];

    for inputs in cases {
        let vd = CircuitBranch::new(inputs, &settings, &tables)
            .ok()
            .and_then(|b| b.calculate_voltage_drop(WireSize::Awg12, 1));
        assert_eq!(vd, Some(0.0));
    }
}

#[test]
fn voltage_drop_is_none_without_impedance_data() {
    let settings = CircuitSettings::default();
    let tables = ReferenceTables::standard();
    let branch = CircuitBranch::new(vd_inputs(100.0, 16.0, 120.0, 1), &settings, &tables);
    // No impedance row for 700 kcmil
    let vd = branch.ok().and_then(|b| b.calculate_voltage_drop(WireSize::Kcmil700, 1));
    assert_eq!(vd, None);
}

#[test]
fn conduit_override_fill_round_trips() {
    let tables = ReferenceTables::standard();
    let mut rng = StdRng::seed_from_u64(99);

    for entry in &tables.conduits {
        for (&size, &area) in &entry.areas {
            let total_area = rng.random_range(0.0..area);
            let mut run = ConduitRun::default();
            assert!(run.set_type_from_value(&entry.conduit_type, &tables));
            assert!(run.apply_override_size(size, total_area, &tables));
            let expected = (total_area / area * 100_000.0).round() / 100_000.0;
            assert_eq!(run.fill_ratio, Some(expected), "{} {size}", entry.conduit_type);
        }
    }
}

#[test]
fn conduit_sizes_outside_a_type_are_rejected() {
    let tables = ReferenceTables::standard();
    let mut run = ConduitRun::default();
    assert!(run.set_type_from_value("ENT", &tables));
    assert!(!run.apply_override_size(ConduitSize::Three, 0.5, &tables));
}

#[test]
fn failed_and_cleared_circuits_read_empty() {
    let settings = CircuitSettings::default();
    let mut tables = ReferenceTables::standard();
    if let Some(info) = tables.ocp_defaults.get_mut(&1000) {
        info.number_of_parallel_sets = 1;
        info.max_lug_qty = 1;
    }

    let failed = circuit_sizer::sizing::size_circuit(common::large_service(100.0), &settings, &tables);
    let mut cleared_inputs = common::branch_20a(50.0);
    cleared_inputs.overrides.enabled = true;
    cleared_inputs.overrides.wire_hot_size = Some("-".into());
    let cleared = circuit_sizer::sizing::size_circuit(cleared_inputs, &settings, &tables);

    for branch in [failed, cleared].into_iter().filter_map(Result::ok) {
        assert_eq!(branch.wire_material(), None);
        assert_eq!(branch.wire_temp_rating(), None);
        assert_eq!(branch.wire_insulation(), None);
        assert_eq!(branch.hot_wire_quantity(), 0);
        assert_eq!(branch.neutral_wire_quantity(), 0);
        assert_eq!(branch.ground_wire_quantity(), 0);
        assert_eq!(branch.isolated_ground_wire_quantity(), 0);
        assert_eq!(branch.hot_wire_size(), None);
        assert_eq!(branch.neutral_wire_size(), None);
        assert_eq!(branch.ground_wire_size(), None);
        assert_eq!(branch.isolated_ground_wire_size(), None);
        assert_eq!(branch.number_of_wires(), 0);
        assert_eq!(branch.circuit_base_ampacity(), None);
        assert_eq!(branch.voltage_drop_percentage(), None);
        assert_eq!(branch.get_wire_set_string(), "-");
        assert_eq!(branch.get_wire_size_callout(), "-");
        if branch.calc_failed() {
            assert_eq!(branch.number_of_sets(), None);
            assert_eq!(branch.conduit_type(), None);
            assert_eq!(branch.conduit_size(), None);
            assert_eq!(branch.conduit_fill_percentage(), None);
            assert_eq!(branch.conduit_material_type(), None);
            assert_eq!(branch.get_conduit_and_wire_size(), "-");
        }
    }
}
