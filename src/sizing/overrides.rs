//! Sanitizes raw user overrides into typed values.
//!
//! Every override either becomes a valid typed value or is dropped with a
//! warning, so the sizing stages never re-validate.

use crate::settings::CircuitSettings;
use crate::tables::{ConduitSize, Material, ReferenceTables, TempRating, WireInfo, WireSize};

use super::inputs::{CircuitOverrides, RawOverride};
use super::notice::NoticeCollector;

/// A wire size override that exists in the conductor table, with the text
/// the user typed.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeOverride {
    pub size: WireSize,
    pub raw: String,
}

/// Overrides after validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedOverrides {
    pub enabled: bool,
    pub include_neutral: bool,
    pub include_isolated_ground: bool,
    pub breaker: Option<f64>,
    pub wire_sets: Option<u32>,
    pub material: Option<Material>,
    pub temp: Option<TempRating>,
    pub insulation: Option<String>,
    pub hot_size: Option<SizeOverride>,
    pub neutral_size: Option<SizeOverride>,
    pub ground_size: Option<SizeOverride>,
    pub conduit_type: Option<String>,
    /// Raw text kept for messages alongside the parsed size.
    pub conduit_size: Option<(ConduitSize, String)>,
    pub user_clear_hot: bool,
    pub user_clear_conduit: bool,
}

/// Circuit facts the validation rules consult.
pub(crate) struct OverrideContext<'a> {
    pub settings: &'a CircuitSettings,
    pub tables: &'a ReferenceTables,
    pub wire_info: Option<&'a WireInfo>,
    pub rating: Option<f64>,
    pub poles: u32,
    pub is_feeder: bool,
}

/// Strips the configured wire prefix and parses the remaining label.
pub(crate) fn normalize_wire_size(raw: &str, prefix: &str) -> Option<WireSize> {
    let stripped = if prefix.is_empty() {
        raw.to_string()
    } else {
        raw.replace(prefix, "")
    };
    WireSize::parse(&stripped)
}

/// Strips the configured conduit suffix and parses the remaining label.
pub(crate) fn normalize_conduit_size(raw: &str, suffix: &str) -> Option<ConduitSize> {
    let stripped = if suffix.is_empty() {
        raw.to_string()
    } else {
        raw.replace(suffix, "")
    };
    ConduitSize::parse(&stripped)
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

fn parse_sets(raw: &RawOverride) -> Option<u32> {
    match raw {
        RawOverride::Number(n) if n.fract() == 0.0 && *n >= 1.0 && *n <= f64::from(u32::MAX) => {
            Some(*n as u32)
        }
        RawOverride::Number(_) => None,
        RawOverride::Text(s) => s.trim().parse::<u32>().ok().filter(|n| *n > 0),
    }
}

impl ValidatedOverrides {
    pub(crate) fn validate(
        raw: &CircuitOverrides,
        ctx: &OverrideContext<'_>,
        notices: &mut NoticeCollector,
    ) -> Self {
        let mut out = ValidatedOverrides {
            enabled: raw.enabled,
            include_neutral: raw.include_neutral,
            include_isolated_ground: raw.include_isolated_ground,
            ..Self::default()
        };

        if let Some(material) = non_blank(raw.wire_material.as_ref()) {
            out.material = Material::parse(material);
            if out.material.is_none() {
                notices.warn(format!(
                    "Wire material '{material}' not recognized; using defaults."
                ));
            }
        }

        if let Some(temp) = raw.wire_temp_rating.as_ref().filter(|t| !t.is_blank()) {
            out.temp = TempRating::parse(&temp.to_string());
            if out.temp.is_none() {
                notices.warn(format!("Wire temp '{temp}' invalid; reverting to defaults."));
            }
        }

        if let Some(insulation) = non_blank(raw.wire_insulation.as_ref()) {
            let norm = insulation.trim().to_uppercase();
            if ctx.tables.insulation_types().contains(norm.as_str()) {
                out.insulation = Some(norm);
            } else {
                notices.warn(format!(
                    "Wire insulation '{insulation}' not found in tables; using defaults."
                ));
            }
        }

        if let Some(conduit_type) = non_blank(raw.conduit_type.as_ref()) {
            if ctx.tables.conduit_material_for(conduit_type).is_some() {
                out.conduit_type = Some(conduit_type.to_string());
            } else {
                notices.warn(format!(
                    "Conduit type '{conduit_type}' invalid; using defaults."
                ));
            }
        }

        if let Some(size) = non_blank(raw.conduit_size.as_ref()) {
            if raw.enabled && size.trim() == "-" {
                out.user_clear_conduit = true;
            } else {
                match normalize_conduit_size(size, &ctx.settings.conduit_size_suffix) {
                    Some(parsed) if ctx.tables.conduit_sizes.contains(&parsed) => {
                        out.conduit_size = Some((parsed, size.to_string()));
                    }
                    _ => notices.warn(format!(
                        "Conduit size '{size}' invalid; using calculated size."
                    )),
                }
            }
        }

        if !raw.enabled {
            return out;
        }

        out.breaker = raw.breaker.filter(|b| *b > 0.0);
        if let Some(breaker) = raw.breaker.filter(|b| *b <= 0.0) {
            notices.warn(format!("Breaker override {breaker}A is invalid. Ignoring."));
        }

        if let Some(sets_raw) = raw.wire_sets.as_ref() {
            out.wire_sets = parse_sets(sets_raw);
            if out.wire_sets.is_none() && !sets_raw.is_blank() {
                notices.warn(format!("Wire sets override '{sets_raw}' is invalid. Ignoring."));
            }
        }

        if let Some(sets) = out.wire_sets {
            let max_sets = ctx.wire_info.map_or(1, |w| w.max_lug_qty.max(1));
            if sets > max_sets {
                notices.warn(format!(
                    "Wire sets override {sets} exceeds lug capacity of {max_sets} set(s); keeping user override per request."
                ));
            }
            let rating = ctx.rating.unwrap_or(0.0);
            if ((rating > 0.0 && rating < 100.0) || ctx.poles < 2) && sets != 1 {
                notices.warn(format!(
                    "Parallel sets not allowed for {}P breaker {rating}A; keeping {sets} set(s) as requested.",
                    ctx.poles
                ));
            }
        }

        let prefix = ctx.settings.wire_size_prefix.as_str();
        let mut check_size = |label: &str, raw_size: Option<&RawOverride>| -> (Option<SizeOverride>, bool) {
            let Some(raw_size) = raw_size.filter(|r| !r.is_blank()) else {
                return (None, false);
            };
            if raw_size.is_clear_marker() {
                return (None, true);
            }
            let text = raw_size.to_string();
            match normalize_wire_size(&text, prefix) {
                Some(size) if ctx.tables.conductors.contains_key(&size) => {
                    (Some(SizeOverride { size, raw: text }), false)
                }
                _ => {
                    notices.warn(format!(
                        "{label} size override '{text}' invalid; will auto size."
                    ));
                    (None, false)
                }
            }
        };

        let (hot, clear_hot) = check_size("Hot", raw.wire_hot_size.as_ref());
        let (neutral, _) = check_size("Neutral", raw.wire_neutral_size.as_ref());
        let (ground, _) = check_size("Ground", raw.wire_ground_size.as_ref());
        out.hot_size = hot;
        out.neutral_size = neutral;
        out.ground_size = ground;
        out.user_clear_hot = clear_hot;

        if let (Some(sets), Some(hot)) = (out.wire_sets, out.hot_size.as_ref()) {
            if ctx.is_feeder && sets > 1 && ctx.tables.is_below_one_aught(hot.size) {
                notices.warn(format!(
                    "Feeders smaller than 1/0 are typically not paralleled; keeping {sets} set(s) as requested."
                ));
            }
        }

        if let (Some(hot), Some(max_lug)) = (
            out.hot_size.as_ref(),
            ctx.wire_info.and_then(|w| w.max_lug_size),
        ) {
            if ctx.tables.is_larger_than(hot.size, max_lug) {
                notices.warn(format!(
                    "Hot size override {} exceeds lug size block {max_lug}; keeping user override per request.",
                    hot.raw
                ));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        settings: CircuitSettings,
        tables: ReferenceTables,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                settings: CircuitSettings::default(),
                tables: ReferenceTables::standard(),
            }
        }

        fn ctx(&self, rating: f64, poles: u32, is_feeder: bool) -> OverrideContext<'_> {
            OverrideContext {
                settings: &self.settings,
                tables: &self.tables,
                wire_info: self.tables.wire_info_for(rating as u32).map(|m| m.info()),
                rating: Some(rating),
                poles,
                is_feeder,
            }
        }
    }

    #[test]
    fn normalizes_prefixed_sizes() {
        assert_eq!(normalize_wire_size("#1/0", "#"), Some(WireSize::Awg1_0));
        assert_eq!(normalize_wire_size(" 12 ", "#"), Some(WireSize::Awg12));
        assert_eq!(normalize_conduit_size("3/4\"C", "C"), Some(ConduitSize::ThreeQuarter));
    }

    #[test]
    fn invalid_material_and_temp_are_dropped_with_warnings() {
        let fx = Fixture::new();
        let raw = CircuitOverrides {
            wire_material: Some("gold".into()),
            wire_temp_rating: Some("105 C".into()),
            wire_insulation: Some("thhn".into()),
            ..CircuitOverrides::default()
        };
        let mut notices = NoticeCollector::new("T-1");
        let v = ValidatedOverrides::validate(&raw, &fx.ctx(20.0, 1, false), &mut notices);
        assert_eq!(v.material, None);
        assert_eq!(v.temp, None);
        assert_eq!(v.insulation.as_deref(), Some("THHN"));
        assert_eq!(notices.grouped().warnings.len(), 2);
    }

    #[test]
    fn manual_fields_ignored_when_disabled() {
        let fx = Fixture::new();
        let raw = CircuitOverrides {
            wire_hot_size: Some("6".into()),
            wire_sets: Some(RawOverride::Number(2.0)),
            breaker: Some(30.0),
            ..CircuitOverrides::default()
        };
        let mut notices = NoticeCollector::new("T-1");
        let v = ValidatedOverrides::validate(&raw, &fx.ctx(20.0, 1, false), &mut notices);
        assert_eq!(v.hot_size, None);
        assert_eq!(v.wire_sets, None);
        assert_eq!(v.breaker, None);
        assert!(!notices.has_items());
    }

    #[test]
    fn sets_over_lug_capacity_are_kept_with_warning() {
        let fx = Fixture::new();
        let raw = CircuitOverrides {
            enabled: true,
            wire_sets: Some("3".into()),
            ..CircuitOverrides::default()
        };
        let mut notices = NoticeCollector::new("T-1");
        let v = ValidatedOverrides::validate(&raw, &fx.ctx(225.0, 3, false), &mut notices);
        assert_eq!(v.wire_sets, Some(3));
        let warnings = notices.grouped().warnings;
        assert!(warnings.iter().any(|w| w.contains("exceeds lug capacity")));
    }

    #[test]
    fn non_positive_breaker_warns_and_drops() {
        let fx = Fixture::new();
        let raw = CircuitOverrides {
            enabled: true,
            breaker: Some(0.0),
            ..CircuitOverrides::default()
        };
        let mut notices = NoticeCollector::new("T-1");
        let v = ValidatedOverrides::validate(&raw, &fx.ctx(20.0, 1, false), &mut notices);
        assert_eq!(v.breaker, None);
        assert_eq!(
            notices.grouped().warnings,
            vec!["Breaker override 0A is invalid. Ignoring."]
        );
    }

    #[test]
    fn non_numeric_sets_warn_and_drop() {
        let fx = Fixture::new();
        let raw = CircuitOverrides {
            enabled: true,
            wire_sets: Some("two".into()),
            ..CircuitOverrides::default()
        };
        let mut notices = NoticeCollector::new("T-1");
        let v = ValidatedOverrides::validate(&raw, &fx.ctx(225.0, 3, false), &mut notices);
        assert_eq!(v.wire_sets, None);
        assert_eq!(notices.grouped().warnings.len(), 1);
    }

    #[test]
    fn dash_marks_user_clear() {
        let fx = Fixture::new();
        let raw = CircuitOverrides {
            enabled: true,
            wire_hot_size: Some("-".into()),
            conduit_size: Some("-".into()),
            ..CircuitOverrides::default()
        };
        let mut notices = NoticeCollector::new("T-1");
        let v = ValidatedOverrides::validate(&raw, &fx.ctx(20.0, 1, false), &mut notices);
        assert!(v.user_clear_hot);
        assert!(v.user_clear_conduit);
        assert_eq!(v.hot_size, None);
        assert!(!notices.has_items());
    }

    #[test]
    fn unknown_size_falls_back_to_auto_with_warning() {
        let fx = Fixture::new();
        let raw = CircuitOverrides {
            enabled: true,
            wire_hot_size: Some(RawOverride::Number(5.0)),
            ..CircuitOverrides::default()
        };
        let mut notices = NoticeCollector::new("T-1");
        let v = ValidatedOverrides::validate(&raw, &fx.ctx(20.0, 1, false), &mut notices);
        assert_eq!(v.hot_size, None);
        assert_eq!(
            notices.grouped().warnings,
            vec!["Hot size override '5' invalid; will auto size."]
        );
    }

    #[test]
    fn hot_override_over_lug_block_warns_but_keeps() {
        let fx = Fixture::new();
        let raw = CircuitOverrides {
            enabled: true,
            wire_hot_size: Some("#2".into()),
            ..CircuitOverrides::default()
        };
        let mut notices = NoticeCollector::new("T-1");
        let v = ValidatedOverrides::validate(&raw, &fx.ctx(20.0, 1, false), &mut notices);
        assert_eq!(v.hot_size.map(|h| h.size), Some(WireSize::Awg2));
        assert!(
            notices
                .grouped()
                .warnings
                .iter()
                .any(|w| w.contains("exceeds lug size block 4"))
        );
    }

    #[test]
    fn small_paralleled_feeder_override_warns() {
        let fx = Fixture::new();
        let raw = CircuitOverrides {
            enabled: true,
            wire_sets: Some(RawOverride::Number(2.0)),
            wire_hot_size: Some("2".into()),
            ..CircuitOverrides::default()
        };
        let mut notices = NoticeCollector::new("T-1");
        ValidatedOverrides::validate(&raw, &fx.ctx(400.0, 3, true), &mut notices);
        assert!(
            notices
                .grouped()
                .warnings
                .iter()
                .any(|w| w.starts_with("Feeders smaller than 1/0"))
        );
    }
}
