//! Read-only reference tables consumed by the sizing engine.
//!
//! Tables are plain data with typed keys. [`ReferenceTables::standard`]
//! returns the built-in NEC-style set; callers may start from it and replace
//! individual tables (for example a project-specific OCP defaults table).

pub mod sizes;
mod standard;

use std::collections::{BTreeMap, BTreeSet};

pub use sizes::{
    AmpacityGrid, ConduitMaterial, ConduitSize, Impedance, Material, TempRating, WireSize,
};

/// Conductor geometry for one size.
#[derive(Debug, Clone, PartialEq)]
pub struct ConductorData {
    /// Circular-mil area.
    pub cmil: f64,
    /// Cross-sectional area (sq in) by insulation type, upper case keys.
    pub area: BTreeMap<String, f64>,
}

/// Interior areas of one conduit type, keyed by trade size.
#[derive(Debug, Clone, PartialEq)]
pub struct ConduitTypeAreas {
    pub conduit_type: String,
    pub material: ConduitMaterial,
    pub areas: BTreeMap<ConduitSize, f64>,
}

/// A standard overcurrent device rating with its frame and switch sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardOcp {
    pub amps: f64,
    pub frame: f64,
    pub switch: f64,
}

/// Default cable selection for a breaker rating.
#[derive(Debug, Clone, PartialEq)]
pub struct WireInfo {
    pub wire_material: Material,
    pub wire_temperature_rating: TempRating,
    pub wire_insulation: Option<String>,
    /// Starting point of the automatic hot-size search.
    pub wire_hot_size: Option<WireSize>,
    /// When present, ground sizing scales this size instead of using the EGC table.
    pub wire_ground_size: Option<WireSize>,
    pub number_of_parallel_sets: u32,
    /// Largest conductor the terminal lugs accept.
    pub max_lug_size: Option<WireSize>,
    /// Number of conductors per phase the lugs accept.
    pub max_lug_qty: u32,
    /// Soft upper bound; exceeding it is allowed with a warning.
    pub max_feeder_size: Option<WireSize>,
    pub conduit_type: Option<String>,
}

/// Outcome of the ceiling lookup into the OCP defaults table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WireInfoMatch<'a> {
    Exact(&'a WireInfo),
    /// No exact key; the next larger rating was used.
    NextAvailable(u32, &'a WireInfo),
    /// The rating exceeds every key; the largest rating was used.
    MaxAvailable(u32, &'a WireInfo),
}

impl<'a> WireInfoMatch<'a> {
    pub fn info(self) -> &'a WireInfo {
        match self {
            WireInfoMatch::Exact(info)
            | WireInfoMatch::NextAvailable(_, info)
            | WireInfoMatch::MaxAvailable(_, info) => info,
        }
    }
}

/// The full set of lookup tables the engine reads.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    pub ampacity: AmpacityGrid,
    pub conductors: BTreeMap<WireSize, ConductorData>,
    /// Conduit types in lookup order; the first entry naming a type wins.
    pub conduits: Vec<ConduitTypeAreas>,
    /// Ascending conduit sizes used for the minimum-size lookup and auto-pick.
    pub conduit_sizes: Vec<ConduitSize>,
    /// Ascending `(amp threshold, EGC size)` rows per material.
    pub egc: BTreeMap<Material, Vec<(f64, WireSize)>>,
    pub impedance: BTreeMap<WireSize, Impedance>,
    pub ocp_defaults: BTreeMap<u32, WireInfo>,
    /// Ascending standard breaker ratings.
    pub standard_ocp: Vec<StandardOcp>,
    /// The only sizes the engine will select, ascending.
    pub allowed_wire_sizes: Vec<WireSize>,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::standard()
    }
}

impl ReferenceTables {
    /// Built-in tables (NEC 310.16 ampacities, Chapter 9 areas and impedances,
    /// 250.122 EGC sizes, standard 240.6 ratings).
    pub fn standard() -> Self {
        Self {
            ampacity: standard::ampacity(),
            conductors: standard::conductors(),
            conduits: standard::conduits(),
            conduit_sizes: ConduitSize::ALL.to_vec(),
            egc: standard::egc(),
            impedance: standard::impedance(),
            ocp_defaults: standard::ocp_defaults(),
            standard_ocp: standard::standard_ocp(),
            allowed_wire_sizes: standard::allowed_wire_sizes(),
        }
    }

    pub fn ampacity_row(&self, material: Material, temp: TempRating) -> &[(WireSize, f64)] {
        self.ampacity.row(material, temp)
    }

    pub fn is_allowed(&self, size: WireSize) -> bool {
        self.allowed_wire_sizes.contains(&size)
    }

    /// Position of `size` in the allowed list.
    pub fn allowed_index(&self, size: WireSize) -> Option<usize> {
        self.allowed_wire_sizes.iter().position(|s| *s == size)
    }

    /// `true` when `size` sits below 1/0 in the allowed ordering.
    pub fn is_below_one_aught(&self, size: WireSize) -> bool {
        match (self.allowed_index(size), self.allowed_index(WireSize::Awg1_0)) {
            (Some(idx), Some(threshold)) => idx < threshold,
            _ => false,
        }
    }

    /// `true` when `size` is strictly larger than `limit` in the allowed ordering.
    pub fn is_larger_than(&self, size: WireSize, limit: WireSize) -> bool {
        match (self.allowed_index(size), self.allowed_index(limit)) {
            (Some(idx), Some(limit_idx)) => idx > limit_idx,
            _ => false,
        }
    }

    pub fn conductor_area(&self, size: WireSize, insulation: &str) -> Option<f64> {
        self.conductors.get(&size)?.area.get(insulation).copied()
    }

    pub fn cmil(&self, size: WireSize) -> Option<f64> {
        self.conductors.get(&size).map(|c| c.cmil)
    }

    /// Union of insulation keys across all conductor sizes.
    pub fn insulation_types(&self) -> BTreeSet<&str> {
        self.conductors
            .values()
            .flat_map(|c| c.area.keys().map(String::as_str))
            .collect()
    }

    /// Material bucket of the first conduit entry naming `conduit_type`.
    pub fn conduit_material_for(&self, conduit_type: &str) -> Option<ConduitMaterial> {
        self.conduits
            .iter()
            .find(|c| c.conduit_type == conduit_type)
            .map(|c| c.material)
    }

    pub fn conduit_areas(
        &self,
        material: ConduitMaterial,
        conduit_type: &str,
    ) -> Option<&BTreeMap<ConduitSize, f64>> {
        self.conduits
            .iter()
            .find(|c| c.material == material && c.conduit_type == conduit_type)
            .map(|c| &c.areas)
    }

    pub fn egc_row(&self, material: Material) -> &[(f64, WireSize)] {
        self.egc.get(&material).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn impedance(&self, size: WireSize) -> Option<&Impedance> {
        self.impedance.get(&size)
    }

    /// Smallest standard rating at or above `amps`.
    pub fn standard_ocp_at_or_above(&self, amps: f64) -> Option<&StandardOcp> {
        self.standard_ocp.iter().find(|ocp| ocp.amps >= amps)
    }

    /// Ceiling lookup of the cable defaults for a breaker rating.
    ///
    /// Returns `None` only when the defaults table is empty.
    pub fn wire_info_for(&self, rating: u32) -> Option<WireInfoMatch<'_>> {
        if let Some(info) = self.ocp_defaults.get(&rating) {
            return Some(WireInfoMatch::Exact(info));
        }
        if let Some((key, info)) = self.ocp_defaults.range(rating..).next() {
            return Some(WireInfoMatch::NextAvailable(*key, info));
        }
        self.ocp_defaults
            .iter()
            .next_back()
            .map(|(key, info)| WireInfoMatch::MaxAvailable(*key, info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tables_are_consistent() {
        let t = ReferenceTables::standard();
        for size in &t.allowed_wire_sizes {
            assert!(t.conductors.contains_key(size), "missing conductor data for {size}");
        }
        for pair in t.standard_ocp.windows(2) {
            assert!(pair[0].amps < pair[1].amps);
        }
        for row in t.egc.values() {
            for pair in row.windows(2) {
                assert!(pair[0].0 < pair[1].0);
            }
        }
    }

    #[test]
    fn ampacity_rows_ascend() {
        let t = ReferenceTables::standard();
        for material in [Material::Copper, Material::Aluminum] {
            for temp in [TempRating::C60, TempRating::C75, TempRating::C90] {
                let row = t.ampacity_row(material, temp);
                assert!(!row.is_empty());
                for pair in row.windows(2) {
                    assert!(pair[0].0 < pair[1].0);
                    assert!(pair[0].1 <= pair[1].1);
                }
            }
        }
    }

    #[test]
    fn wire_info_exact_and_ceiling() {
        let t = ReferenceTables::standard();
        assert!(matches!(t.wire_info_for(20), Some(WireInfoMatch::Exact(_))));
        assert!(matches!(t.wire_info_for(22), Some(WireInfoMatch::NextAvailable(25, _))));
        assert!(matches!(t.wire_info_for(9000), Some(WireInfoMatch::MaxAvailable(6000, _))));
    }

    #[test]
    fn conduit_type_resolves_material() {
        let t = ReferenceTables::standard();
        assert_eq!(t.conduit_material_for("EMT"), Some(ConduitMaterial::Magnetic));
        assert_eq!(t.conduit_material_for("PVC"), Some(ConduitMaterial::NonMagnetic));
        assert_eq!(t.conduit_material_for("GARDEN HOSE"), None);
        assert!(t.conduit_areas(ConduitMaterial::Magnetic, "EMT").is_some());
        assert!(t.conduit_areas(ConduitMaterial::NonMagnetic, "EMT").is_none());
    }

    #[test]
    fn allowed_ordering_helpers() {
        let t = ReferenceTables::standard();
        assert!(t.is_below_one_aught(WireSize::Awg1));
        assert!(!t.is_below_one_aught(WireSize::Awg1_0));
        assert!(t.is_larger_than(WireSize::Kcmil600, WireSize::Kcmil500));
        assert!(!t.is_larger_than(WireSize::Kcmil500, WireSize::Kcmil500));
        // 14 AWG is not selectable, so ordering questions about it are false.
        assert!(!t.is_below_one_aught(WireSize::Awg14));
    }

    #[test]
    fn insulation_union_contains_common_types() {
        let t = ReferenceTables::standard();
        let ins = t.insulation_types();
        assert!(ins.contains("THHN"));
        assert!(ins.contains("XHHW-2"));
    }

    #[test]
    fn standard_ocp_ceiling() {
        let t = ReferenceTables::standard();
        assert_eq!(t.standard_ocp_at_or_above(20.0).map(|o| o.amps), Some(20.0));
        assert_eq!(t.standard_ocp_at_or_above(21.0).map(|o| o.amps), Some(25.0));
        assert!(t.standard_ocp_at_or_above(7000.0).is_none());
    }
}
