//! Load currents and conductor voltage drop.

use crate::settings::FeederVdMethod;
use crate::tables::{ConduitMaterial, Material, WireSize};

use super::branch::CircuitBranch;

const DEFAULT_POWER_FACTOR: f64 = 0.9;

impl CircuitBranch<'_> {
    /// Demand current drawn through this feeder.
    ///
    /// An explicit `downstream_demand_current` wins. Otherwise the first
    /// downstream element with a usable fact decides: a transformer primary
    /// converts estimated VA to amps, anything else reports its demand
    /// current.
    pub fn downstream_demand_current(&self) -> Option<f64> {
        if let Some(demand) = self.inputs.downstream_demand_current {
            return Some(demand);
        }

        let volts = self.voltage().filter(|v| *v != 0.0);
        for element in &self.inputs.downstream {
            if self.is_transformer_primary {
                if let (Some(va), Some(volts)) = (element.total_estimated_va, volts) {
                    let divisor = if self.phase() == 1 {
                        volts
                    } else {
                        volts * 3f64.sqrt()
                    };
                    return Some(va / divisor);
                }
            }
            if let Some(current) = element.total_demand_current {
                return Some(current);
            }
        }
        None
    }

    /// Current used for voltage drop, per the feeder method for feeders.
    pub fn voltage_drop_current(&self) -> Option<f64> {
        let connected = self.inputs.apparent_current;
        if !self.is_feeder {
            return connected;
        }

        let demand_basis = self.downstream_demand_current().or(connected);
        match self.settings.feeder_vd_method {
            FeederVdMethod::Demand => demand_basis,
            FeederVdMethod::Connected => connected.or(demand_basis),
            FeederVdMethod::EightyPercent => {
                let eighty = self.rating().map(|r| r * 0.8);
                match (demand_basis, eighty) {
                    (Some(base), Some(eighty)) => Some(base.max(eighty)),
                    (base, eighty) => base.or(eighty),
                }
            }
        }
    }

    /// Conduit material used for impedance lookup. Falls back to the type
    /// the conduit stage will use when no conduit has been resolved yet.
    fn impedance_conduit_material(&self) -> Option<ConduitMaterial> {
        if let Some(material) = self.conduit.material {
            return Some(material);
        }
        if self.overrides.user_clear_conduit {
            return None;
        }
        let conduit_type = self
            .overrides
            .conduit_type
            .as_deref()
            .or_else(|| self.wire_info.and_then(|w| w.conduit_type.as_deref()))?;
        self.tables.conduit_material_for(conduit_type)
    }

    /// Voltage drop of `sets` parallel runs of `size`, as a fraction of
    /// circuit voltage.
    ///
    /// `None` when the cable is cleared or failed, or when no impedance is
    /// known for the conductor and conduit. `Some(0.0)` when current, length
    /// or voltage is missing or zero.
    pub fn calculate_voltage_drop(&self, size: WireSize, sets: u32) -> Option<f64> {
        if self.cable_blank() {
            return None;
        }

        let power_factor = self
            .inputs
            .power_factor
            .filter(|pf| *pf != 0.0)
            .unwrap_or(DEFAULT_POWER_FACTOR);
        let nonzero = |v: Option<f64>| v.filter(|v| *v != 0.0);
        let (Some(amps), Some(length), Some(volts)) = (
            nonzero(self.voltage_drop_current()),
            nonzero(self.length()),
            nonzero(self.voltage()),
        ) else {
            return Some(0.0);
        };

        let material = self
            .cable
            .material
            .or(self.wire_info.map(|w| w.wire_material))
            .unwrap_or(Material::Copper);
        let Some(conduit_material) = self.impedance_conduit_material() else {
            tracing::debug!(circuit = %self.name(), "no conduit material for impedance lookup");
            return None;
        };
        let Some(impedance) = self.tables.impedance(size) else {
            tracing::debug!(circuit = %self.name(), %size, "no impedance data");
            return None;
        };

        let sets = f64::from(sets.max(1));
        let r = impedance.resistance(material, conduit_material) / sets;
        let x = impedance.reactance(conduit_material) / sets;
        let sin_phi = (1.0 - power_factor * power_factor).max(0.0).sqrt();
        let factor = if self.phase() == 3 { 1.732 } else { 2.0 };

        let drop_volts = factor * amps * (r * power_factor + x * sin_phi) * length / 1000.0;
        let fraction = drop_volts / volts;
        if fraction.is_finite() {
            Some(fraction)
        } else {
            Some(0.0)
        }
    }
}
