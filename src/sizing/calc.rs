//! Breaker, conductor and conduit sizing stages.

use crate::settings::NeutralBehavior;
use crate::tables::{Material, ReferenceTables, TempRating, WireSize};

use super::branch::CircuitBranch;
use super::conduit::ConduitState;
use super::overrides::SizeOverride;

/// Breakers above this rating may not use the next-size-up allowance.
const NEXT_SIZE_UP_LIMIT: f64 = 800.0;

/// Decides whether `ampacity` may protect a circuit with `breaker_rating`
/// carrying `circuit_amps`.
///
/// The conductor must carry the load. It is then accepted outright when it
/// meets the breaker rating, or for breakers up to 800 A when the next
/// standard rating at or above the ampacity reaches the breaker rating.
pub fn is_ampacity_acceptable(
    tables: &ReferenceTables,
    breaker_rating: f64,
    ampacity: f64,
    circuit_amps: Option<f64>,
) -> bool {
    let Some(circuit_amps) = circuit_amps else {
        return false;
    };
    if ampacity < circuit_amps {
        return false;
    }
    if ampacity >= breaker_rating {
        return true;
    }
    if breaker_rating > NEXT_SIZE_UP_LIMIT {
        return false;
    }
    tables
        .standard_ocp_at_or_above(ampacity)
        .is_some_and(|next| next.amps >= breaker_rating)
}

struct HotSelection {
    size: WireSize,
    sets: u32,
    base_ampacity: f64,
    voltage_drop: Option<f64>,
    over_feeder_limit: bool,
    over_lug_limit: bool,
}

impl CircuitBranch<'_> {
    /// Sets the calculated breaker from 125% of the connected current,
    /// floored at `min_breaker_size` and rounded up to a standard rating.
    pub fn calculate_breaker_size(&mut self) {
        let amps = self.inputs.apparent_current.filter(|a| *a != 0.0);
        self.calculated_breaker = amps.and_then(|amps| {
            let amps = (amps * 1.25).max(self.settings.min_breaker_size);
            self.tables.standard_ocp_at_or_above(amps).map(|ocp| ocp.amps)
        });
        tracing::debug!(
            circuit = %self.name(),
            breaker = ?self.calculated_breaker,
            "calculated breaker"
        );
    }

    fn fail_cable_sizing(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.notices.error(format!(
            "{message} Wire sizing failed. All cable outputs will be cleared."
        ));
        self.cable.fail(message);
    }

    fn ampacity_ok(&self, breaker_rating: f64, ampacity: f64) -> bool {
        is_ampacity_acceptable(
            self.tables,
            breaker_rating,
            ampacity,
            self.circuit_load_current(),
        )
    }

    /// Resolves the hot conductor size and set count.
    ///
    /// A manual hot override is tried first and kept even when it fails the
    /// ampacity or voltage drop checks (with a warning). Otherwise the
    /// search walks the ampacity table from the default size upward, adding
    /// parallel sets up to the lug capacity. Failure clears the cable.
    pub fn calculate_hot_wire_size(&mut self) {
        if self.cable.is_user_cleared() {
            self.cable.voltage_drop = None;
            return;
        }

        let Some(rating) = self.breaker_rating() else {
            self.fail_cable_sizing("No breaker rating.");
            return;
        };

        if let Some(load) = self.circuit_load_current() {
            if load > rating {
                self.notices.warn(format!(
                    "Circuit load {load:.2}A exceeds breaker rating {rating}A."
                ));
            }
        }

        if self.overrides.enabled {
            if let Some(hot) = self.overrides.hot_size.clone() {
                if self.try_override_hot_size(&hot, rating) {
                    return;
                }
                tracing::info!(
                    circuit = %self.name(),
                    hot = %hot.raw,
                    "Override hot size rejected; falling back to automatic sizing."
                );
            }
        }

        self.auto_size_hot(rating);
    }

    fn try_override_hot_size(&mut self, hot: &SizeOverride, rating: f64) -> bool {
        if !self.tables.is_allowed(hot.size) {
            return false;
        }

        let material = self
            .overrides
            .material
            .or(self.cable.material)
            .unwrap_or(Material::Copper);
        let temp = self.cable.temp.unwrap_or(TempRating::C75);
        let ampacity = self
            .tables
            .ampacity_row(material, temp)
            .iter()
            .find(|(size, _)| *size == hot.size)
            .map(|(_, amps)| *amps);
        let Some(ampacity) = ampacity else {
            self.notices.warn(format!(
                "Hot override {} not found in ampacity table.",
                hot.raw
            ));
            return false;
        };

        let sets = self.overrides.wire_sets.or(self.cable.sets).unwrap_or(1);
        let total = ampacity * f64::from(sets);
        let prefix = self.settings.wire_size_prefix.clone();

        if !self.ampacity_ok(rating, total) {
            self.notices.warn(format!(
                "Override {sets} set(s) x {prefix}{} fails ampacity ({total} A). Saving anyway.",
                hot.size
            ));
        }

        let max_vd = self.max_voltage_drop();
        let voltage_drop = self.calculate_voltage_drop(hot.size, sets);
        if let Some(vd) = voltage_drop.filter(|vd| *vd > max_vd) {
            let percent = (vd * 100.0 * 100.0).round() / 100.0;
            self.notices.warn(format!(
                "Override {sets} set(s) x {prefix}{} fails volt drop check ({percent}%). Saving anyway.",
                hot.size
            ));
        }

        self.cable.hot_size = Some(hot.size);
        self.cable.sets = Some(sets);
        self.cable.base_ampacity = Some(ampacity);
        self.cable.total_ampacity = Some(total);
        self.cable.voltage_drop = voltage_drop;
        self.cable.mark_sized();
        true
    }

    fn auto_size_hot(&mut self, rating: f64) {
        let Some(info) = self.wire_info else {
            self.fail_cable_sizing("No wire_info defaults.");
            return;
        };

        let material = self.cable.material.unwrap_or(info.wire_material);
        let temp = self.cable.temp.unwrap_or(info.wire_temperature_rating);
        let row = self.tables.ampacity_row(material, temp);
        if row.is_empty() {
            self.fail_cable_sizing(format!(
                "No ampacity table for {material} at {} C.",
                temp.celsius()
            ));
            return;
        }

        // Starts from the clamped default sets, so a sub-100 A or single-pole
        // circuit never searches parallel runs.
        let base_sets = self.cable.sets.unwrap_or(1).max(1);
        let max_sets = info.max_lug_qty.max(1);
        let max_lug_size = info.max_lug_size;
        let start = info
            .wire_hot_size
            .and_then(|base| row.iter().position(|(size, _)| *size == base))
            .unwrap_or(0);
        let max_vd = self.max_voltage_drop();

        let mut any_lug_limit_hit = false;
        let mut selection: Option<HotSelection> = None;

        'sets: for sets in base_sets..=max_sets {
            for &(size, ampacity) in &row[start..] {
                if !self.tables.is_allowed(size) {
                    continue;
                }
                let over_feeder_limit = info
                    .max_feeder_size
                    .is_some_and(|limit| self.tables.is_larger_than(size, limit));
                let over_lug_limit =
                    max_lug_size.is_some_and(|limit| self.tables.is_larger_than(size, limit));
                if over_lug_limit {
                    any_lug_limit_hit = true;
                    if sets < max_sets {
                        continue;
                    }
                }

                if self.is_feeder && sets > 1 && self.tables.is_below_one_aught(size) {
                    tracing::debug!(
                        circuit = %self.name(),
                        %size,
                        sets,
                        "skipping paralleled feeder conductor below 1/0"
                    );
                    continue;
                }

                let total = ampacity * f64::from(sets);
                let at_lug_limit = max_lug_size == Some(size);
                if !self.ampacity_ok(rating, total) {
                    any_lug_limit_hit |= at_lug_limit;
                    continue;
                }

                let voltage_drop = self.calculate_voltage_drop(size, sets);
                if voltage_drop.is_some_and(|vd| vd > max_vd) {
                    any_lug_limit_hit |= at_lug_limit;
                    continue;
                }

                selection = Some(HotSelection {
                    size,
                    sets,
                    base_ampacity: ampacity,
                    voltage_drop,
                    over_feeder_limit,
                    over_lug_limit,
                });
                break 'sets;
            }
        }

        let Some(selected) = selection else {
            let mut message = format!(
                "Reached max lug qty {max_sets} and could not size hot conductor for breaker {rating} A."
            );
            if let Some(limit) = max_lug_size.filter(|_| any_lug_limit_hit) {
                message.push_str(&format!(
                    " Lug size block at {limit} prevented further upsizing."
                ));
            }
            self.fail_cable_sizing(message);
            return;
        };

        if selected.over_lug_limit {
            if let Some(limit) = max_lug_size {
                self.notices.warn(format!(
                    "Exceeded lug size block {limit} at max sets {max_sets}; selecting {} with warning.",
                    selected.size
                ));
            }
        }
        if selected.over_feeder_limit {
            if let Some(limit) = info.max_feeder_size {
                self.notices.warn(format!(
                    "Exceeded max feeder size {limit} to satisfy ampacity/VD; selected {} instead.",
                    selected.size
                ));
            }
        }
        if any_lug_limit_hit {
            if let Some(limit) = max_lug_size {
                self.notices.warn(format!(
                    "Reached lug size block {limit} when sizing hots; continuing with allowable configuration."
                ));
            }
        }

        tracing::debug!(
            circuit = %self.name(),
            size = %selected.size,
            sets = selected.sets,
            "hot conductor selected"
        );
        self.cable.hot_size = Some(selected.size);
        self.cable.sets = Some(selected.sets);
        self.cable.base_ampacity = Some(selected.base_ampacity);
        self.cable.total_ampacity = Some(selected.base_ampacity * f64::from(selected.sets));
        self.cable.voltage_drop = selected.voltage_drop;
        self.cable.mark_sized();
    }

    /// Resolves the neutral size from the hot size or a manual override.
    pub fn calculate_neutral_wire_size(&mut self) {
        if self.cable_blank() {
            self.cable.neutral_size = None;
            return;
        }

        if self.overrides.enabled {
            match self.settings.neutral_behavior {
                NeutralBehavior::MatchHot => {
                    self.cable.neutral_size =
                        (self.cable.neutral_qty > 0).then_some(self.cable.hot_size).flatten();
                    return;
                }
                NeutralBehavior::Manual => {
                    if let Some(neutral) = self.overrides.neutral_size.clone() {
                        if self.tables.is_allowed(neutral.size) {
                            self.cable.neutral_size = Some(neutral.size);
                            return;
                        }
                        self.notices.warn(format!(
                            "Neutral size override '{}' invalid; using calculated neutral size.",
                            neutral.raw
                        ));
                    }
                }
            }
        }

        self.cable.neutral_size = if self.cable.neutral_qty == 0 {
            None
        } else {
            self.cable.neutral_size.or(self.cable.hot_size)
        };
    }

    /// Resolves the equipment ground from an override, the EGC table, or by
    /// scaling the default ground with the hot conductor's area.
    ///
    /// The isolated ground, when present, follows the ground size.
    pub fn calculate_ground_wire_size(&mut self) {
        if self.cable_blank() {
            self.cable.ground_size = None;
            self.cable.ig_size = None;
            return;
        }

        self.cable.ground_size = self.resolve_ground_size();
        self.cable.ig_size = if self.cable.ig_qty > 0 {
            self.cable.ground_size
        } else {
            None
        };
    }

    fn resolve_ground_size(&mut self) -> Option<WireSize> {
        if self.overrides.enabled {
            if let Some(ground) = self.overrides.ground_size.clone() {
                if self.tables.is_allowed(ground.size) {
                    return Some(ground.size);
                }
                self.notices.warn(format!(
                    "Ground size override '{}' invalid; auto-calculating based on breaker/material.",
                    ground.raw
                ));
            }
        }

        let amps = self.breaker_rating()?;
        let material = self
            .cable
            .material
            .or(self.wire_info.map(|w| w.wire_material))
            .unwrap_or(Material::Copper);

        match self.wire_info.and_then(|w| w.wire_ground_size) {
            None => self.egc_table_size(material, amps),
            Some(base_ground) => self.scaled_ground_size(base_ground),
        }
    }

    fn egc_table_size(&mut self, material: Material, amps: f64) -> Option<WireSize> {
        let row = self.tables.egc_row(material);
        if row.is_empty() {
            self.notices
                .warn(format!("EGC table missing for material {material}."));
            return None;
        }
        if let Some(&(_, size)) = row.iter().find(|(threshold, _)| *threshold >= amps) {
            return Some(size);
        }
        let (_, largest) = *row.last()?;
        self.notices.warn(format!(
            "Breaker {amps}A exceeds EGC table; using largest EGC size {largest}."
        ));
        Some(largest)
    }

    /// Upsizes the default ground in proportion to the hot conductor's total
    /// circular-mil area relative to the default hot configuration.
    fn scaled_ground_size(&mut self, base_ground: WireSize) -> Option<WireSize> {
        let base_hot = self.wire_info.and_then(|w| w.wire_hot_size);
        let (Some(base_hot), Some(calc_hot)) = (base_hot, self.cable.hot_size) else {
            self.notices.warn(
                "Unable to scale ground size (missing base sizes); leaving ground blank.",
            );
            return None;
        };

        let cmils = (
            self.tables.cmil(base_hot),
            self.tables.cmil(base_ground),
            self.tables.cmil(calc_hot),
        );
        let (Some(base_hot_cmil), Some(base_ground_cmil), Some(calc_hot_cmil)) = cmils else {
            self.notices.warn(
                "Ground size lookup failed for provided wire sizes; leaving blank.",
            );
            return None;
        };

        let base_sets = self
            .wire_info
            .map_or(1, |w| w.number_of_parallel_sets.max(1));
        let calc_sets = self.cable.sets.unwrap_or(1).max(1);
        let ratio = (f64::from(calc_sets) * calc_hot_cmil) / (f64::from(base_sets) * base_hot_cmil);
        let target = base_ground_cmil * ratio;

        let mut candidates: Vec<(f64, WireSize)> = self
            .tables
            .conductors
            .iter()
            .map(|(size, data)| (data.cmil, *size))
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

        let found = candidates
            .into_iter()
            .find(|(cmil, _)| *cmil >= target)
            .map(|(_, size)| size);
        if found.is_none() {
            self.notices.warn(format!(
                "Scaled ground area {target:.0} cmil exceeds every conductor; leaving ground blank."
            ));
        }
        found
    }

    /// Resolves conduit type, size and fill for the finished cable set.
    pub fn calculate_conduit_size(&mut self) {
        let cable_dropped =
            self.cable.is_failed() || (self.cable_blank() && !self.overrides.user_clear_hot);
        if cable_dropped || self.calc_failed() {
            self.conduit.clear_as(ConduitState::Cleared);
            return;
        }
        if self.overrides.user_clear_conduit {
            self.conduit.clear_as(ConduitState::UserCleared);
            return;
        }

        let conduit_type = self
            .overrides
            .conduit_type
            .clone()
            .or_else(|| self.wire_info.and_then(|w| w.conduit_type.clone()));
        let Some(conduit_type) = conduit_type else {
            self.conduit.clear_as(ConduitState::Cleared);
            return;
        };
        if !self.conduit.set_type_from_value(&conduit_type, self.tables) {
            self.conduit.clear_as(ConduitState::Cleared);
            return;
        }

        let total_area = self.cable.total_area(self.tables);
        let max_fill = self.settings.max_conduit_fill;

        if self.overrides.enabled {
            if let Some((size, raw)) = self.overrides.conduit_size.clone() {
                if self.conduit.apply_override_size(size, total_area, self.tables) {
                    if let Some(fill) = self.conduit.fill_ratio.filter(|f| *f > max_fill) {
                        let fill = (fill * 1000.0).round() / 1000.0;
                        self.notices.warn(format!(
                            "Override conduit size {size} exceeds max fill ({fill} > {max_fill})."
                        ));
                    }
                    return;
                }
                self.notices.warn(format!(
                    "Invalid conduit size override '{raw}'; calculating instead."
                ));
            }
        }

        if self
            .conduit
            .pick_size(total_area, self.settings, self.tables)
            .is_none()
        {
            let message = format!(
                "No conduit size fits total area {total_area:.4} at max fill {max_fill}."
            );
            self.notices.warn(message.clone());
            self.conduit.clear_as(ConduitState::Failed(message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ampacity_must_carry_the_load() {
        let tables = ReferenceTables::standard();
        assert!(!is_ampacity_acceptable(&tables, 20.0, 25.0, Some(30.0)));
        assert!(!is_ampacity_acceptable(&tables, 20.0, 25.0, None));
        assert!(is_ampacity_acceptable(&tables, 20.0, 25.0, Some(16.0)));
    }

    #[test]
    fn next_size_up_applies_up_to_800_amps() {
        let tables = ReferenceTables::standard();
        // 380 A conductor on a 400 A breaker: next standard above 380 is 400.
        assert!(is_ampacity_acceptable(&tables, 400.0, 380.0, Some(300.0)));
        // 190 A conductor on a 225 A breaker: next standard is 200.
        assert!(!is_ampacity_acceptable(&tables, 225.0, 190.0, Some(150.0)));
        // Above 800 A the conductor has to meet the breaker outright.
        assert!(!is_ampacity_acceptable(&tables, 1000.0, 960.0, Some(900.0)));
        assert!(is_ampacity_acceptable(&tables, 1000.0, 1000.0, Some(900.0)));
    }
}
