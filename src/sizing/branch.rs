//! The per-circuit sizing aggregate: classification, input resolution and
//! structural quantities.

use std::fmt;

use serde::Serialize;

use crate::error::SizingError;
use crate::settings::CircuitSettings;
use crate::tables::{Material, ReferenceTables, TempRating, WireInfo, WireInfoMatch};

use super::cable::CableSet;
use super::conduit::ConduitRun;
use super::inputs::{CircuitInputs, CircuitKind};
use super::notice::NoticeCollector;
use super::overrides::{OverrideContext, ValidatedOverrides};

/// Display classification of a sized circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BranchType {
    #[serde(rename = "N/A")]
    NotApplicable,
    #[serde(rename = "CONDUIT ONLY")]
    ConduitOnly,
    #[serde(rename = "FEEDER")]
    Feeder,
    #[serde(rename = "SPACE")]
    Space,
    #[serde(rename = "SPARE")]
    Spare,
    #[serde(rename = "BRANCH")]
    Branch,
}

impl fmt::Display for BranchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BranchType::NotApplicable => "N/A",
            BranchType::ConduitOnly => "CONDUIT ONLY",
            BranchType::Feeder => "FEEDER",
            BranchType::Space => "SPACE",
            BranchType::Spare => "SPARE",
            BranchType::Branch => "BRANCH",
        };
        f.write_str(label)
    }
}

/// One circuit's sizing pass.
///
/// Construction resolves inputs, validates overrides and sets conductor
/// quantities. The caller then runs, in order,
/// [`calculate_breaker_size`](Self::calculate_breaker_size) (only when
/// `auto_calculate_breaker` is set),
/// [`calculate_hot_wire_size`](Self::calculate_hot_wire_size),
/// [`calculate_neutral_wire_size`](Self::calculate_neutral_wire_size),
/// [`calculate_ground_wire_size`](Self::calculate_ground_wire_size) and
/// [`calculate_conduit_size`](Self::calculate_conduit_size), and reads the
/// resolved outputs.
#[derive(Debug, Clone)]
pub struct CircuitBranch<'a> {
    pub(super) inputs: CircuitInputs,
    pub(super) settings: &'a CircuitSettings,
    pub(super) tables: &'a ReferenceTables,
    name: String,
    pub(super) is_feeder: bool,
    pub(super) is_transformer_primary: bool,
    wire_length: Option<f64>,
    wire_length_makeup: f64,
    pub(super) wire_info: Option<&'a WireInfo>,
    pub(super) overrides: ValidatedOverrides,
    pub(super) calculated_breaker: Option<f64>,
    pub(super) cable: CableSet,
    pub(super) conduit: ConduitRun,
    pub(super) notices: NoticeCollector,
}

impl<'a> CircuitBranch<'a> {
    /// Builds a branch and runs the setup stages.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidInput`] when the inputs fail their
    /// preconditions (see [`CircuitInputs::check`]).
    pub fn new(
        inputs: CircuitInputs,
        settings: &'a CircuitSettings,
        tables: &'a ReferenceTables,
    ) -> Result<Self, SizingError> {
        inputs.check()?;
        let name = inputs.name();
        let mut branch = Self {
            notices: NoticeCollector::new(name.clone()),
            name,
            inputs,
            settings,
            tables,
            is_feeder: false,
            is_transformer_primary: false,
            wire_length: None,
            wire_length_makeup: 0.0,
            wire_info: None,
            overrides: ValidatedOverrides::default(),
            calculated_breaker: None,
            cable: CableSet::new(),
            conduit: ConduitRun::default(),
        };

        branch.detect_feeder();
        branch.load_core_inputs();
        branch.validate_overrides();
        branch.setup_structural_quantities();
        Ok(branch)
    }

    fn detect_feeder(&mut self) {
        let mut detected = (false, false);
        for element in &self.inputs.downstream {
            if element.is_distribution_equipment() {
                detected = (true, element.is_transformer());
                break;
            }
        }
        if self.inputs.downstream.is_empty() {
            tracing::debug!(circuit = %self.name, "no downstream elements for feeder detection");
        }

        self.is_feeder = self.inputs.is_feeder.unwrap_or(detected.0);
        self.is_transformer_primary = self.inputs.is_transformer_primary.unwrap_or(detected.1);
    }

    fn load_core_inputs(&mut self) {
        self.wire_length = None;
        self.wire_length_makeup = 0.0;

        if self.is_power_circuit() && !self.is_spare() && !self.is_space() {
            let makeup = self.inputs.length_makeup_feet;
            self.wire_length_makeup = makeup;
            match self.inputs.length_feet {
                Some(raw) => {
                    let mut total = raw + makeup;
                    if total <= 0.0 {
                        self.notices.warn(
                            "Wire makeup length results in a total length <= 0. Using Revit Length only.",
                        );
                        total = raw;
                    }
                    self.wire_length = Some(total);
                }
                None => {
                    tracing::debug!(circuit = %self.name, "no circuit length supplied");
                }
            }
        }

        self.wire_info = self.lookup_wire_info();
    }

    fn lookup_wire_info(&mut self) -> Option<&'a WireInfo> {
        if !self.is_power_circuit() {
            return None;
        }
        let Some(rating) = self.rating() else {
            tracing::debug!(circuit = %self.name, "no rating; wire info empty");
            return None;
        };

        let rating_key = rating as u32;
        let tables: &'a ReferenceTables = self.tables;
        match tables.wire_info_for(rating_key)? {
            WireInfoMatch::Exact(info) => Some(info),
            WireInfoMatch::NextAvailable(key, info) => {
                self.notices.warn(format!(
                    "No exact wire info match for breaker {rating_key}; using next available {key}."
                ));
                Some(info)
            }
            WireInfoMatch::MaxAvailable(key, info) => {
                self.notices.warn(format!(
                    "Breaker rating {rating_key} exceeds defaults; using max available {key}."
                ));
                Some(info)
            }
        }
    }

    fn validate_overrides(&mut self) {
        let ctx = OverrideContext {
            settings: self.settings,
            tables: self.tables,
            wire_info: self.wire_info,
            rating: self.rating(),
            poles: self.inputs.poles,
            is_feeder: self.is_feeder,
        };
        self.overrides =
            ValidatedOverrides::validate(&self.inputs.overrides, &ctx, &mut self.notices);
    }

    fn setup_structural_quantities(&mut self) {
        let poles = self.inputs.poles;
        self.cable.hot_qty = poles;

        self.cable.neutral_qty = if poles == 1 {
            1
        } else if self.is_feeder {
            u32::from(self.has_feeder_line_to_ground_voltage())
        } else {
            u32::from(self.overrides.include_neutral)
        };

        self.cable.ground_qty = u32::from(self.inputs.circuit_kind.is_load_circuit());
        self.cable.ig_qty = u32::from(self.overrides.include_isolated_ground);

        let base_sets = self.wire_info.map_or(1, |w| w.number_of_parallel_sets.max(1));
        let sets = self.constrain_default_sets(base_sets);
        self.cable.sets = Some(sets);

        if self.overrides.user_clear_hot {
            self.cable.hot_qty = 0;
            self.cable.neutral_qty = 0;
            self.cable.ground_qty = 0;
            self.cable.ig_qty = 0;
            self.cable.sets = Some(self.overrides.wire_sets.unwrap_or(sets));
            self.cable.material = None;
            self.cable.temp = None;
            self.cable.insulation = None;
            self.cable.mark_user_cleared();
            return;
        }

        self.cable.material = Some(
            self.overrides
                .material
                .or(self.wire_info.map(|w| w.wire_material))
                .unwrap_or(Material::Copper),
        );
        self.cable.temp = Some(
            self.overrides
                .temp
                .or(self.wire_info.map(|w| w.wire_temperature_rating))
                .unwrap_or(TempRating::C75),
        );
        self.cable.insulation = self
            .overrides
            .insulation
            .clone()
            .or_else(|| self.wire_info.and_then(|w| w.wire_insulation.clone()))
            .map(|ins| ins.trim().to_uppercase());
    }

    /// Clamps the default set count to breaker, pole and lug limits.
    fn constrain_default_sets(&mut self, sets: u32) -> u32 {
        let mut sets = sets.max(1);
        let rating = self.rating().unwrap_or(0.0);
        let poles = self.inputs.poles;
        let max_sets = self.wire_info.map_or(1, |w| w.max_lug_qty.max(1));

        if ((rating > 0.0 && rating < 100.0) || poles < 2) && sets != 1 {
            self.notices.warn(format!(
                "Parallel sets not allowed for {poles}P breaker {rating}A. Resetting to 1 set."
            ));
            sets = 1;
        }
        if sets > max_sets {
            self.notices.warn(format!(
                "Requested {sets} sets exceeds lug capacity of {max_sets} set(s); clamping to {max_sets}."
            ));
            sets = max_sets;
        }
        sets
    }

    fn has_feeder_line_to_ground_voltage(&self) -> bool {
        self.inputs
            .downstream
            .iter()
            .filter_map(|e| e.distribution)
            .any(|d| d.line_to_ground_volts.is_some_and(|v| v != 0.0))
    }

    /// Display name `"{panel}-{number}"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &CircuitInputs {
        &self.inputs
    }

    pub fn settings(&self) -> &CircuitSettings {
        self.settings
    }

    pub fn notices(&self) -> &NoticeCollector {
        &self.notices
    }

    pub fn cable(&self) -> &CableSet {
        &self.cable
    }

    pub fn conduit(&self) -> &ConduitRun {
        &self.conduit
    }

    pub fn overrides(&self) -> &ValidatedOverrides {
        &self.overrides
    }

    /// Cable defaults resolved from the breaker rating, if any.
    pub fn wire_info(&self) -> Option<&'a WireInfo> {
        self.wire_info
    }

    pub fn is_power_circuit(&self) -> bool {
        self.inputs.circuit_kind.is_power()
    }

    pub fn is_spare(&self) -> bool {
        self.inputs.circuit_kind == CircuitKind::Spare
    }

    pub fn is_space(&self) -> bool {
        self.inputs.circuit_kind == CircuitKind::Space
    }

    pub fn is_feeder(&self) -> bool {
        self.is_feeder
    }

    pub fn is_transformer_primary(&self) -> bool {
        self.is_transformer_primary
    }

    pub fn branch_type(&self) -> BranchType {
        if self.cable.is_user_cleared() && self.conduit.is_cleared() {
            return BranchType::NotApplicable;
        }
        if self.cable.is_user_cleared() {
            return BranchType::ConduitOnly;
        }
        if self.is_feeder {
            return BranchType::Feeder;
        }
        if self.is_space() {
            return BranchType::Space;
        }
        if self.is_spare() {
            return BranchType::Spare;
        }
        BranchType::Branch
    }

    pub fn max_voltage_drop(&self) -> f64 {
        self.settings.max_voltage_drop(self.is_feeder)
    }

    /// Supplied breaker rating; `None` for non-power and space circuits.
    pub fn rating(&self) -> Option<f64> {
        if self.is_power_circuit() && !self.is_space() {
            self.inputs.rating
        } else {
            None
        }
    }

    /// Resolved run length (raw length plus makeup), feet.
    pub fn length(&self) -> Option<f64> {
        self.wire_length
    }

    pub fn wire_length_makeup(&self) -> f64 {
        self.wire_length_makeup
    }

    pub fn voltage(&self) -> Option<f64> {
        self.inputs.voltage
    }

    pub fn poles(&self) -> u32 {
        self.inputs.poles
    }

    /// `3` for three-pole circuits, otherwise `1`.
    pub fn phase(&self) -> u32 {
        if self.inputs.poles == 3 { 3 } else { 1 }
    }

    /// Load current used for ampacity checks: downstream demand for feeders,
    /// connected current otherwise. `None` for spare and space circuits.
    pub fn circuit_load_current(&self) -> Option<f64> {
        if !self.inputs.circuit_kind.is_load_circuit() {
            return None;
        }
        if self.is_feeder {
            return self.downstream_demand_current();
        }
        self.inputs.apparent_current
    }

    /// Breaker rating the sizing stages work against.
    pub fn breaker_rating(&self) -> Option<f64> {
        if self.is_space() {
            return None;
        }
        if !self.settings.auto_calculate_breaker {
            return self.rating();
        }
        if self.overrides.enabled {
            if let Some(breaker) = self.overrides.breaker {
                return Some(breaker);
            }
        }
        self.calculated_breaker
    }

    /// Supplied frame, or the standard frame of an auto-calculated breaker.
    pub fn breaker_frame(&self) -> Option<f64> {
        if self.settings.auto_calculate_breaker {
            let standard = self.breaker_rating().and_then(|rating| {
                self.tables
                    .standard_ocp
                    .iter()
                    .find(|ocp| ocp.amps == rating)
                    .map(|ocp| ocp.frame)
            });
            if standard.is_some() {
                return standard;
            }
        }
        self.inputs.frame
    }

    /// `true` when either the cable or the conduit could not be sized.
    pub fn calc_failed(&self) -> bool {
        self.cable.is_failed() || self.conduit.is_failed()
    }

    /// Cable-derived outputs present as empty in this state.
    pub(super) fn cable_blank(&self) -> bool {
        self.cable.is_user_cleared() || self.calc_failed()
    }
}
