//! Fixed sizing pipeline and the per-circuit result snapshot.

use std::fmt;

use serde::Serialize;

use crate::error::SizingError;
use crate::settings::CircuitSettings;
use crate::tables::{ConduitMaterial, Material, ReferenceTables, TempRating, WireSize};

use super::branch::{BranchType, CircuitBranch};
use super::inputs::{CircuitInputs, CircuitKind};
use super::notice::GroupedNotices;

/// Every output of a sized circuit, plus its notices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitReport {
    pub name: String,
    pub load_name: Option<String>,
    pub branch_type: BranchType,
    pub is_feeder: bool,
    pub poles: u32,
    pub breaker_rating: Option<f64>,
    pub breaker_frame: Option<f64>,
    pub circuit_load_current: Option<f64>,
    pub length: Option<f64>,
    pub wire_material: Option<Material>,
    pub wire_temp_rating: Option<TempRating>,
    pub wire_insulation: Option<String>,
    pub hot_wire_quantity: u32,
    pub hot_wire_size: Option<WireSize>,
    pub neutral_wire_quantity: u32,
    pub neutral_wire_size: Option<WireSize>,
    pub ground_wire_quantity: u32,
    pub ground_wire_size: Option<WireSize>,
    pub isolated_ground_wire_quantity: u32,
    pub isolated_ground_wire_size: Option<WireSize>,
    pub number_of_sets: Option<u32>,
    pub number_of_wires: u32,
    pub circuit_base_ampacity: Option<f64>,
    /// Fraction of circuit voltage.
    pub voltage_drop_percentage: Option<f64>,
    pub conduit_material_type: Option<ConduitMaterial>,
    pub conduit_type: Option<String>,
    pub conduit_size: Option<String>,
    pub conduit_fill_percentage: Option<f64>,
    pub wire_set: String,
    pub wire_size_callout: String,
    pub conduit_and_wire_size: String,
    pub calc_failed: bool,
    pub notices: GroupedNotices,
}

impl CircuitReport {
    pub fn from_branch(branch: &CircuitBranch<'_>) -> Self {
        Self {
            name: branch.name().to_string(),
            load_name: branch.inputs().load_name.clone(),
            branch_type: branch.branch_type(),
            is_feeder: branch.is_feeder(),
            poles: branch.poles(),
            breaker_rating: branch.breaker_rating(),
            breaker_frame: branch.breaker_frame(),
            circuit_load_current: branch.circuit_load_current(),
            length: branch.length(),
            wire_material: branch.wire_material(),
            wire_temp_rating: branch.wire_temp_rating(),
            wire_insulation: branch.wire_insulation().map(str::to_string),
            hot_wire_quantity: branch.hot_wire_quantity(),
            hot_wire_size: branch.hot_wire_size(),
            neutral_wire_quantity: branch.neutral_wire_quantity(),
            neutral_wire_size: branch.neutral_wire_size(),
            ground_wire_quantity: branch.ground_wire_quantity(),
            ground_wire_size: branch.ground_wire_size(),
            isolated_ground_wire_quantity: branch.isolated_ground_wire_quantity(),
            isolated_ground_wire_size: branch.isolated_ground_wire_size(),
            number_of_sets: branch.number_of_sets(),
            number_of_wires: branch.number_of_wires(),
            circuit_base_ampacity: branch.circuit_base_ampacity(),
            voltage_drop_percentage: branch.voltage_drop_percentage(),
            conduit_material_type: branch.conduit_material_type(),
            conduit_type: branch.conduit_type().map(str::to_string),
            conduit_size: branch.conduit_size(),
            conduit_fill_percentage: branch.conduit_fill_percentage(),
            wire_set: branch.get_wire_set_string(),
            wire_size_callout: branch.get_wire_size_callout(),
            conduit_and_wire_size: branch.get_conduit_and_wire_size(),
            calc_failed: branch.calc_failed(),
            notices: branch.notices().grouped(),
        }
    }
}

fn or_dash<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl fmt::Display for CircuitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vd = self
            .voltage_drop_percentage
            .map_or_else(|| "-".to_string(), |vd| format!("{:.2}%", vd * 100.0));
        write!(
            f,
            "{:<10} {:<12} {:>6}A  {:<28} VD {:<7} {}",
            self.name,
            self.branch_type.to_string(),
            or_dash(self.breaker_rating),
            self.conduit_and_wire_size,
            vd,
            if self.calc_failed { "FAILED" } else { "" }
        )
    }
}

/// Runs the full pipeline for one circuit: breaker (only when
/// `auto_calculate_breaker` is set), hot, neutral, ground, conduit.
///
/// # Errors
///
/// Returns [`SizingError::InvalidInput`] when the inputs fail their
/// construction preconditions.
pub fn size_circuit<'a>(
    inputs: CircuitInputs,
    settings: &'a CircuitSettings,
    tables: &'a ReferenceTables,
) -> Result<CircuitBranch<'a>, SizingError> {
    let mut branch = CircuitBranch::new(inputs, settings, tables)?;
    if settings.auto_calculate_breaker {
        branch.calculate_breaker_size();
    }
    branch.calculate_hot_wire_size();
    branch.calculate_neutral_wire_size();
    branch.calculate_ground_wire_size();
    branch.calculate_conduit_size();
    Ok(branch)
}

/// Sizes every power-system circuit in `circuits` and returns their reports
/// in input order. Non-power circuits are skipped.
///
/// # Errors
///
/// Returns the first [`SizingError`] encountered.
pub fn size_all(
    circuits: &[CircuitInputs],
    settings: &CircuitSettings,
    tables: &ReferenceTables,
) -> Result<Vec<CircuitReport>, SizingError> {
    let mut reports = Vec::with_capacity(circuits.len());
    for inputs in circuits {
        if inputs.circuit_kind == CircuitKind::Other {
            tracing::debug!(circuit = %inputs.name(), "skipping non-power circuit");
            continue;
        }
        let branch = size_circuit(inputs.clone(), settings, tables)?;
        reports.push(CircuitReport::from_branch(&branch));
    }
    tracing::info!(sized = reports.len(), total = circuits.len(), "sizing run complete");
    Ok(reports)
}
