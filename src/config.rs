//! TOML project files: sizing settings plus the circuits to size.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::SizingError;
use crate::settings::CircuitSettings;
use crate::sizing::{
    CircuitInputs, CircuitOverrides, DistributionSystem, DownstreamElement, RawOverride,
};

/// A sizing project parsed from TOML.
///
/// ```toml
/// [settings]
/// max_branch_voltage_drop = 0.03
///
/// [[circuits]]
/// panel_name = "LP1"
/// circuit_number = "1"
/// rating = 20.0
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Policy settings shared by every circuit.
    #[serde(default)]
    pub settings: CircuitSettings,
    /// Circuits in sizing order.
    #[serde(default)]
    pub circuits: Vec<CircuitInputs>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"circuits[2].poles"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn branch(panel: &str, number: &str, load: &str) -> CircuitInputs {
    CircuitInputs {
        panel_name: panel.to_string(),
        circuit_number: number.to_string(),
        load_name: Some(load.to_string()),
        power_factor: Some(0.9),
        ..CircuitInputs::default()
    }
}

impl ProjectConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "feeders"];

    /// A lighting and receptacle panel: single-pole branches at two
    /// lengths, a two-pole circuit with a neutral, and an isolated-ground
    /// receptacle circuit with manual overrides.
    pub fn demo() -> Self {
        let circuits = vec![
            CircuitInputs {
                rating: Some(20.0),
                length_feet: Some(50.0),
                voltage: Some(120.0),
                apparent_current: Some(16.0),
                ..branch("LP1", "1", "LIGHTING")
            },
            CircuitInputs {
                rating: Some(20.0),
                length_feet: Some(75.0),
                voltage: Some(120.0),
                apparent_current: Some(16.0),
                ..branch("LP1", "3", "RECEPTACLES")
            },
            CircuitInputs {
                poles: 2,
                rating: Some(30.0),
                length_feet: Some(60.0),
                voltage: Some(208.0),
                apparent_current: Some(22.0),
                overrides: CircuitOverrides {
                    include_neutral: true,
                    ..CircuitOverrides::default()
                },
                ..branch("LP1", "5", "WATER HEATER")
            },
            CircuitInputs {
                rating: Some(20.0),
                length_feet: Some(40.0),
                voltage: Some(120.0),
                apparent_current: Some(12.0),
                overrides: CircuitOverrides {
                    enabled: true,
                    include_isolated_ground: true,
                    wire_hot_size: Some(RawOverride::from("#10")),
                    conduit_type: Some("PVC".to_string()),
                    ..CircuitOverrides::default()
                },
                ..branch("LP1", "7", "IG RECEPTACLES")
            },
        ];

        Self {
            settings: CircuitSettings::default(),
            circuits,
        }
    }

    /// A main distribution panel with a transformer feeder and a panelboard
    /// feeder, voltage drop measured at 80% of the breaker rating.
    pub fn feeders() -> Self {
        let transformer = DownstreamElement {
            part_type: Some(DownstreamElement::TRANSFORMER),
            total_estimated_va: Some(150_000.0),
            distribution: Some(DistributionSystem {
                line_to_line_volts: Some(480.0),
                line_to_ground_volts: None,
            }),
            ..DownstreamElement::default()
        };
        let panelboard = DownstreamElement {
            part_type: Some(DownstreamElement::PANELBOARD),
            total_demand_current: Some(310.0),
            distribution: Some(DistributionSystem {
                line_to_line_volts: Some(480.0),
                line_to_ground_volts: Some(277.0),
            }),
            ..DownstreamElement::default()
        };

        let circuits = vec![
            CircuitInputs {
                poles: 3,
                rating: Some(225.0),
                length_feet: Some(100.0),
                voltage: Some(480.0),
                downstream: vec![transformer],
                ..branch("MDP", "1", "XFMR T1")
            },
            CircuitInputs {
                poles: 3,
                rating: Some(400.0),
                length_feet: Some(180.0),
                length_makeup_feet: 10.0,
                voltage: Some(480.0),
                downstream: vec![panelboard],
                ..branch("MDP", "2", "PANEL HA")
            },
        ];

        Self {
            settings: CircuitSettings {
                feeder_vd_method: crate::settings::FeederVdMethod::EightyPercent,
                ..CircuitSettings::default()
            },
            circuits,
        }
    }

    /// Loads a project from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "feeders" => Ok(Self::feeders()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Loads a project from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("project", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a project from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Checks settings ranges and every circuit's preconditions.
    ///
    /// Returns an empty vector if the project is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.settings;

        if !(s.min_breaker_size.is_finite() && s.min_breaker_size > 0.0) {
            errors.push(ConfigError::new("settings.min_breaker_size", "must be > 0"));
        }
        if !(s.max_conduit_fill > 0.0 && s.max_conduit_fill <= 1.0) {
            errors.push(ConfigError::new(
                "settings.max_conduit_fill",
                "must be in (0.0, 1.0]",
            ));
        }
        for (field, value) in [
            ("settings.max_branch_voltage_drop", s.max_branch_voltage_drop),
            ("settings.max_feeder_voltage_drop", s.max_feeder_voltage_drop),
        ] {
            if !(value > 0.0 && value < 1.0) {
                errors.push(ConfigError::new(field, "must be in (0.0, 1.0)"));
            }
        }

        let mut seen = BTreeSet::new();
        for (i, circuit) in self.circuits.iter().enumerate() {
            if let Err(SizingError::InvalidInput { field, message }) = circuit.check() {
                errors.push(ConfigError::new(format!("circuits[{i}].{field}"), message));
            }
            if !seen.insert(circuit.name()) {
                errors.push(ConfigError::new(
                    format!("circuits[{i}].circuit_number"),
                    format!("duplicate circuit \"{}\"", circuit.name()),
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::FeederVdMethod;
    use crate::sizing::CircuitKind;

    #[test]
    fn all_presets_are_valid() {
        for name in ProjectConfig::PRESETS {
            let cfg = ProjectConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn from_preset_unknown() {
        let err = ProjectConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
        assert_eq!(
            e.to_string(),
            "config error: preset: unknown preset \"nonexistent\", available: demo, feeders"
        );
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r##"
[settings]
max_feeder_voltage_drop = 0.025
feeder_vd_method = "80_percent"

[[circuits]]
panel_name = "LP1"
circuit_number = "1"
rating = 20.0
voltage = 120.0
apparent_current = 16.0
length_feet = 75.0

[circuits.overrides]
enabled = true
wire_hot_size = "#10"
wire_sets = 1

[[circuits]]
panel_name = "MDP"
circuit_number = "2"
circuit_kind = "spare"
poles = 3

[[circuits.downstream]]
part_type = 14
total_demand_current = 120.0
"##;
        let cfg = ProjectConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "{cfg:?}");
        let cfg = cfg.unwrap_or_default();
        assert_eq!(cfg.settings.max_feeder_voltage_drop, 0.025);
        assert_eq!(cfg.settings.feeder_vd_method, FeederVdMethod::EightyPercent);
        assert_eq!(cfg.circuits.len(), 2);
        assert_eq!(
            cfg.circuits[0].overrides.wire_hot_size,
            Some(RawOverride::Text("#10".into()))
        );
        assert_eq!(cfg.circuits[0].overrides.wire_sets, Some(RawOverride::Number(1.0)));
        assert_eq!(cfg.circuits[1].circuit_kind, CircuitKind::Spare);
        assert_eq!(cfg.circuits[1].downstream.len(), 1);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn unknown_field_rejected() {
        let toml = r#"
[[circuits]]
panel_name = "LP1"
circuit_number = "1"
amperage = 20.0
"#;
        let err = ProjectConfig::from_toml_str(toml);
        assert!(err.is_err());
        assert_eq!(err.unwrap_err().field, "toml");
    }

    #[test]
    fn validation_reports_circuit_paths() {
        let mut cfg = ProjectConfig::demo();
        cfg.circuits[1].poles = 4;
        cfg.circuits[2].circuit_number = "1".to_string();
        cfg.settings.max_conduit_fill = 1.5;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "circuits[1].poles"));
        assert!(errors.iter().any(|e| e.field == "circuits[2].circuit_number"));
        assert!(errors.iter().any(|e| e.field == "settings.max_conduit_fill"));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = ProjectConfig::from_toml_file(Path::new("/nonexistent/project.toml"));
        assert!(err.is_err());
        assert_eq!(err.unwrap_err().field, "project");
    }
}
