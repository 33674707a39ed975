//! Sizing policy knobs shared by every circuit in a run.

use serde::{Deserialize, Serialize};

use crate::tables::ConduitSize;

/// Current basis used for feeder voltage drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeederVdMethod {
    /// Downstream demand current, falling back to connected current.
    #[default]
    #[serde(rename = "demand")]
    Demand,
    /// Connected current, falling back to demand current.
    #[serde(rename = "connected")]
    Connected,
    /// 80% of the breaker rating, floored at the demand-basis current.
    #[serde(rename = "80_percent", alias = "eighty_percent")]
    EightyPercent,
}

/// How the neutral conductor is sized when manual overrides are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NeutralBehavior {
    #[default]
    #[serde(rename = "match_hot")]
    MatchHot,
    #[serde(rename = "manual")]
    Manual,
}

/// Policy settings for a sizing run.
///
/// Fractions (`max_conduit_fill`, voltage drop limits) are decimals, e.g.
/// `0.03` for 3%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitSettings {
    /// Floor applied to the computed breaker current before the standard lookup.
    pub min_breaker_size: f64,
    /// Compute the breaker from load current instead of using the supplied rating.
    pub auto_calculate_breaker: bool,
    /// Prefix used when formatting wire sizes, e.g. `"#"`.
    pub wire_size_prefix: String,
    /// Suffix used when formatting conduit sizes, e.g. `"C"`.
    pub conduit_size_suffix: String,
    /// Smallest conduit the auto-pick may select.
    pub min_conduit_size: ConduitSize,
    pub max_conduit_fill: f64,
    pub neutral_behavior: NeutralBehavior,
    pub max_branch_voltage_drop: f64,
    pub max_feeder_voltage_drop: f64,
    pub feeder_vd_method: FeederVdMethod,
}

impl Default for CircuitSettings {
    fn default() -> Self {
        Self {
            min_breaker_size: 20.0,
            auto_calculate_breaker: false,
            wire_size_prefix: "#".to_string(),
            conduit_size_suffix: "C".to_string(),
            min_conduit_size: ConduitSize::ThreeQuarter,
            max_conduit_fill: 0.36,
            neutral_behavior: NeutralBehavior::MatchHot,
            max_branch_voltage_drop: 0.03,
            max_feeder_voltage_drop: 0.02,
            feeder_vd_method: FeederVdMethod::Demand,
        }
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

impl CircuitSettings {
    /// Serializes the settings with the three fraction fields rounded to
    /// three decimals.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let rounded = Self {
            max_conduit_fill: round3(self.max_conduit_fill),
            max_branch_voltage_drop: round3(self.max_branch_voltage_drop),
            max_feeder_voltage_drop: round3(self.max_feeder_voltage_drop),
            ..self.clone()
        };
        serde_json::to_string(&rounded)
    }

    /// Parses settings persisted by [`CircuitSettings::to_json`].
    ///
    /// Missing keys take their defaults and unknown keys are ignored. Empty or
    /// unparseable text yields the default settings.
    pub fn from_json(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str(text) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "invalid circuit settings JSON; using defaults");
                Self::default()
            }
        }
    }

    /// Voltage drop limit for a branch or feeder.
    pub fn max_voltage_drop(&self, is_feeder: bool) -> f64 {
        if is_feeder {
            self.max_feeder_voltage_drop
        } else {
            self.max_branch_voltage_drop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let s = CircuitSettings::default();
        assert_eq!(s.min_breaker_size, 20.0);
        assert!(!s.auto_calculate_breaker);
        assert_eq!(s.min_conduit_size, ConduitSize::ThreeQuarter);
        assert_eq!(s.max_conduit_fill, 0.36);
        assert_eq!(s.feeder_vd_method, FeederVdMethod::Demand);
        assert_eq!(s.neutral_behavior, NeutralBehavior::MatchHot);
    }

    #[test]
    fn to_json_rounds_fractions() {
        let s = CircuitSettings {
            max_conduit_fill: 0.40004,
            max_branch_voltage_drop: 0.0312,
            ..CircuitSettings::default()
        };
        let json = s.to_json().unwrap_or_default();
        let back = CircuitSettings::from_json(&json);
        assert_eq!(back.max_conduit_fill, 0.4);
        assert_eq!(back.max_branch_voltage_drop, 0.031);
        assert!(json.contains("\"feeder_vd_method\":\"demand\""));
        assert!(json.contains("\"min_conduit_size\":\"3/4\\\"\""));
    }

    #[test]
    fn from_json_empty_or_invalid_is_default() {
        assert_eq!(CircuitSettings::from_json(""), CircuitSettings::default());
        assert_eq!(CircuitSettings::from_json("{not json"), CircuitSettings::default());
    }

    #[test]
    fn from_json_partial_keeps_defaults() {
        let s = CircuitSettings::from_json(r#"{"min_breaker_size": 15, "write_fixture_results": true}"#);
        assert_eq!(s.min_breaker_size, 15.0);
        assert_eq!(s.max_feeder_voltage_drop, 0.02);
    }

    #[test]
    fn legacy_eighty_percent_alias() {
        let s = CircuitSettings::from_json(r#"{"feeder_vd_method": "eighty_percent"}"#);
        assert_eq!(s.feeder_vd_method, FeederVdMethod::EightyPercent);
        let s = CircuitSettings::from_json(r#"{"feeder_vd_method": "80_percent"}"#);
        assert_eq!(s.feeder_vd_method, FeederVdMethod::EightyPercent);
    }

    #[test]
    fn voltage_drop_limit_by_kind() {
        let s = CircuitSettings::default();
        assert_eq!(s.max_voltage_drop(true), 0.02);
        assert_eq!(s.max_voltage_drop(false), 0.03);
    }
}
