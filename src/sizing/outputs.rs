//! Resolved outputs and display callouts.
//!
//! Cable getters read as empty while the cable is user-cleared or the
//! calculation failed; conduit getters read as empty while the conduit is
//! cleared in any way.

use crate::tables::{ConduitMaterial, Material, TempRating, WireSize};

use super::branch::CircuitBranch;

impl CircuitBranch<'_> {
    fn conduit_blank(&self) -> bool {
        self.conduit.is_cleared() || self.calc_failed()
    }

    /// `"{prefix}{size}"`, e.g. `"#12"`.
    pub fn format_wire_size(&self, size: WireSize) -> String {
        format!("{}{size}", self.settings.wire_size_prefix)
    }

    pub fn wire_material(&self) -> Option<Material> {
        if self.cable_blank() {
            None
        } else {
            self.cable.material
        }
    }

    pub fn wire_temp_rating(&self) -> Option<TempRating> {
        if self.cable_blank() {
            None
        } else {
            self.cable.temp
        }
    }

    pub fn wire_insulation(&self) -> Option<&str> {
        if self.cable_blank() {
            None
        } else {
            self.cable.insulation.as_deref()
        }
    }

    pub fn hot_wire_quantity(&self) -> u32 {
        if self.cable_blank() { 0 } else { self.cable.hot_qty }
    }

    pub fn neutral_wire_quantity(&self) -> u32 {
        if self.cable_blank() { 0 } else { self.cable.neutral_qty }
    }

    pub fn ground_wire_quantity(&self) -> u32 {
        if self.cable_blank() { 0 } else { self.cable.ground_qty }
    }

    pub fn isolated_ground_wire_quantity(&self) -> u32 {
        if self.cable_blank() { 0 } else { self.cable.ig_qty }
    }

    pub fn hot_wire_size(&self) -> Option<WireSize> {
        if self.cable_blank() {
            None
        } else {
            self.cable.hot_size
        }
    }

    pub fn neutral_wire_size(&self) -> Option<WireSize> {
        if self.cable_blank() || self.cable.neutral_qty == 0 {
            None
        } else {
            self.cable.neutral_size
        }
    }

    pub fn ground_wire_size(&self) -> Option<WireSize> {
        if self.cable_blank() {
            None
        } else {
            self.cable.ground_size
        }
    }

    pub fn isolated_ground_wire_size(&self) -> Option<WireSize> {
        if self.cable_blank() || self.cable.ig_qty == 0 {
            None
        } else {
            self.cable.ig_size
        }
    }

    /// Parallel sets; `None` once the calculation has failed.
    pub fn number_of_sets(&self) -> Option<u32> {
        if self.calc_failed() {
            None
        } else {
            Some(self.cable.sets.unwrap_or(1))
        }
    }

    /// Current-carrying conductors per set (hots plus neutral).
    pub fn number_of_wires(&self) -> u32 {
        self.hot_wire_quantity() + self.neutral_wire_quantity()
    }

    /// Total ampacity of the selected hot configuration.
    pub fn circuit_base_ampacity(&self) -> Option<f64> {
        if self.cable_blank() {
            None
        } else {
            self.cable.total_ampacity
        }
    }

    /// Voltage drop of the selected configuration as a fraction.
    pub fn voltage_drop_percentage(&self) -> Option<f64> {
        if self.cable_blank() {
            None
        } else {
            self.cable.voltage_drop
        }
    }

    pub fn conduit_material_type(&self) -> Option<ConduitMaterial> {
        if self.conduit_blank() {
            None
        } else {
            self.conduit.material
        }
    }

    pub fn conduit_type(&self) -> Option<&str> {
        if self.conduit_blank() {
            None
        } else {
            self.conduit.conduit_type.as_deref()
        }
    }

    /// Conduit trade size with the configured suffix, e.g. `"3/4\"C"`.
    pub fn conduit_size(&self) -> Option<String> {
        if self.conduit_blank() {
            return None;
        }
        self.conduit
            .size
            .map(|size| format!("{size}{}", self.settings.conduit_size_suffix))
    }

    pub fn conduit_fill_percentage(&self) -> Option<f64> {
        if self.conduit_blank() {
            None
        } else {
            self.conduit.fill_ratio
        }
    }

    /// Conductor breakdown per set, e.g. `"2#12 + 1#12G"` or
    /// `"3#4/0H + 1#2N + 1#4G AL"`. `"-"` when the cable is empty.
    pub fn get_wire_set_string(&self) -> String {
        if self.cable_blank() {
            return "-".to_string();
        }

        let prefix = self.settings.wire_size_prefix.as_str();
        let cable = &self.cable;
        let hot = cable.hot_size;
        let neutral = cable.neutral_size.or(hot);
        let ground = cable.ground_size;
        let isolated_ground = cable.ig_size.or(ground);

        let mut parts = Vec::new();
        match (hot, neutral) {
            (Some(hot), Some(neutral)) if cable.neutral_qty > 0 => {
                if hot == neutral {
                    parts.push(format!("{}{prefix}{hot}", cable.hot_qty + cable.neutral_qty));
                } else {
                    parts.push(format!("{}{prefix}{hot}H", cable.hot_qty));
                    parts.push(format!("{}{prefix}{neutral}N", cable.neutral_qty));
                }
            }
            (Some(hot), _) if cable.hot_qty > 0 => {
                parts.push(format!("{}{prefix}{hot}", cable.hot_qty));
            }
            _ => {}
        }
        if let Some(ground) = ground.filter(|_| cable.ground_qty > 0) {
            parts.push(format!("{}{prefix}{ground}G", cable.ground_qty));
        }
        if let Some(ig) = isolated_ground.filter(|_| cable.ig_qty > 0) {
            parts.push(format!("{}{prefix}{ig}IG", cable.ig_qty));
        }

        if parts.is_empty() {
            return "-".to_string();
        }
        let mut callout = parts.join(" + ");
        if let Some(material) = cable.material.filter(|m| *m != Material::Copper) {
            callout.push(' ');
            callout.push_str(material.as_str());
        }
        callout
    }

    /// Wire set string prefixed with `"({sets}) "` for parallel runs.
    pub fn get_wire_size_callout(&self) -> String {
        let wire_set = self.get_wire_set_string();
        if wire_set == "-" {
            return wire_set;
        }
        match self.number_of_sets() {
            Some(sets) if sets > 1 => format!("({sets}) {wire_set}"),
            _ => wire_set,
        }
    }

    /// Combined conduit and wire callout, e.g. `"3/4\"C-(2#12 + 1#12G)"`.
    pub fn get_conduit_and_wire_size(&self) -> String {
        let wire_set = self.get_wire_set_string();
        if self.conduit_blank() && wire_set == "-" {
            return "-".to_string();
        }

        let Some(conduit) = self.conduit_size() else {
            return self.get_wire_size_callout();
        };
        let prefix = match self.number_of_sets() {
            Some(sets) if sets > 1 => format!("({sets}) "),
            _ => String::new(),
        };
        if wire_set == "-" {
            return format!("{prefix}{conduit}");
        }
        format!("{prefix}{conduit}-({wire_set})")
    }
}
