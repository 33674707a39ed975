//! Facts supplied by the host model for one circuit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SizingError;

/// Circuit classification as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitKind {
    /// An ordinary load or feeder circuit on a power system.
    #[default]
    PowerCircuit,
    Spare,
    Space,
    /// A non-power system (data, fire alarm, ...). Never sized.
    Other,
}

impl CircuitKind {
    pub fn is_power(self) -> bool {
        !matches!(self, CircuitKind::Other)
    }

    /// `true` for circuits that carry a load, as opposed to spare/space slots.
    pub fn is_load_circuit(self) -> bool {
        matches!(self, CircuitKind::PowerCircuit | CircuitKind::Other)
    }
}

/// Distribution system of a downstream panel or transformer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DistributionSystem {
    pub line_to_line_volts: Option<f64>,
    pub line_to_ground_volts: Option<f64>,
}

/// One element connected downstream of the circuit.
///
/// Every field is optional; a missing fact is simply skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DownstreamElement {
    /// Family part type code (14 panelboard, 15 transformer, 16 switchboard,
    /// 17 other panel).
    pub part_type: Option<i64>,
    pub total_estimated_va: Option<f64>,
    pub total_demand_current: Option<f64>,
    pub distribution: Option<DistributionSystem>,
}

impl DownstreamElement {
    pub const PANELBOARD: i64 = 14;
    pub const TRANSFORMER: i64 = 15;
    pub const SWITCHBOARD: i64 = 16;
    pub const OTHER_PANEL: i64 = 17;

    pub fn is_distribution_equipment(&self) -> bool {
        matches!(
            self.part_type,
            Some(Self::PANELBOARD | Self::TRANSFORMER | Self::SWITCHBOARD | Self::OTHER_PANEL)
        )
    }

    pub fn is_transformer(&self) -> bool {
        self.part_type == Some(Self::TRANSFORMER)
    }
}

/// A raw override value as typed by the user: either a number or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawOverride {
    Number(f64),
    Text(String),
}

impl RawOverride {
    /// `true` for empty or whitespace-only text.
    pub fn is_blank(&self) -> bool {
        matches!(self, RawOverride::Text(s) if s.trim().is_empty())
    }

    /// `true` for the literal `"-"` that clears a field.
    pub fn is_clear_marker(&self) -> bool {
        matches!(self, RawOverride::Text(s) if s.trim() == "-")
    }
}

impl fmt::Display for RawOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawOverride::Number(n) => write!(f, "{n}"),
            RawOverride::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RawOverride {
    fn from(value: &str) -> Self {
        RawOverride::Text(value.to_string())
    }
}

impl From<f64> for RawOverride {
    fn from(value: f64) -> Self {
        RawOverride::Number(value)
    }
}

/// Unvalidated user overrides. Sizes, sets and breaker are read only when
/// `enabled` is set; material, temperature, insulation and conduit choices
/// apply in both modes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CircuitOverrides {
    /// Manual override mode.
    pub enabled: bool,
    pub include_neutral: bool,
    pub include_isolated_ground: bool,
    pub breaker: Option<f64>,
    pub wire_sets: Option<RawOverride>,
    pub wire_material: Option<String>,
    pub wire_temp_rating: Option<RawOverride>,
    pub wire_insulation: Option<String>,
    pub wire_hot_size: Option<RawOverride>,
    pub wire_neutral_size: Option<RawOverride>,
    pub wire_ground_size: Option<RawOverride>,
    pub conduit_type: Option<String>,
    pub conduit_size: Option<String>,
}

/// Everything the engine needs to know about one circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CircuitInputs {
    pub panel_name: String,
    pub circuit_number: String,
    pub load_name: Option<String>,
    pub circuit_kind: CircuitKind,
    pub poles: u32,
    /// Breaker rating in amps.
    pub rating: Option<f64>,
    pub frame: Option<f64>,
    /// One-way run length in feet, before makeup.
    pub length_feet: Option<f64>,
    pub length_makeup_feet: f64,
    pub voltage: Option<f64>,
    /// Defaults to 0.9 when absent.
    pub power_factor: Option<f64>,
    /// Connected load current in amps.
    pub apparent_current: Option<f64>,
    /// Forces feeder classification; detected from `downstream` when `None`.
    pub is_feeder: Option<bool>,
    /// Forces transformer-primary classification; detected when `None`.
    pub is_transformer_primary: Option<bool>,
    /// Takes precedence over any demand derived from `downstream`.
    pub downstream_demand_current: Option<f64>,
    pub downstream: Vec<DownstreamElement>,
    pub overrides: CircuitOverrides,
}

impl Default for CircuitInputs {
    fn default() -> Self {
        Self {
            panel_name: String::new(),
            circuit_number: String::new(),
            load_name: None,
            circuit_kind: CircuitKind::PowerCircuit,
            poles: 1,
            rating: None,
            frame: None,
            length_feet: None,
            length_makeup_feet: 0.0,
            voltage: None,
            power_factor: None,
            apparent_current: None,
            is_feeder: None,
            is_transformer_primary: None,
            downstream_demand_current: None,
            downstream: Vec::new(),
            overrides: CircuitOverrides::default(),
        }
    }
}

impl CircuitInputs {
    /// Display name `"{panel}-{number}"`.
    pub fn name(&self) -> String {
        format!("{}-{}", self.panel_name, self.circuit_number)
    }

    /// Checks construction preconditions.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidInput`] for a blank circuit number, poles
    /// outside 1..=3, or a non-finite numeric input.
    pub fn check(&self) -> Result<(), SizingError> {
        if self.circuit_number.trim().is_empty() {
            return Err(SizingError::invalid(
                "circuit_number",
                "circuit identity is empty",
            ));
        }
        if !(1..=3).contains(&self.poles) {
            return Err(SizingError::invalid(
                "poles",
                format!("must be 1, 2 or 3, got {}", self.poles),
            ));
        }

        let numerics = [
            ("rating", self.rating),
            ("frame", self.frame),
            ("length_feet", self.length_feet),
            ("length_makeup_feet", Some(self.length_makeup_feet)),
            ("voltage", self.voltage),
            ("power_factor", self.power_factor),
            ("apparent_current", self.apparent_current),
            ("downstream_demand_current", self.downstream_demand_current),
            ("overrides.breaker", self.overrides.breaker),
        ];
        for (field, value) in numerics {
            if let Some(v) = value.filter(|v| !v.is_finite()) {
                return Err(SizingError::invalid(field, format!("must be finite, got {v}")));
            }
        }
        if let Some(pf) = self.power_factor.filter(|pf| !(0.0..=1.0).contains(pf)) {
            return Err(SizingError::invalid(
                "power_factor",
                format!("must be in [0.0, 1.0], got {pf}"),
            ));
        }
        Ok(())
    }
}
