//! Conduit working record and table-driven size resolution.

use crate::settings::CircuitSettings;
use crate::tables::{ConduitMaterial, ConduitSize, ReferenceTables};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConduitState {
    #[default]
    Pending,
    Sized,
    /// No conduit applies (no type, unknown type, or the cable was dropped).
    Cleared,
    /// The user blanked the conduit size with `"-"`.
    UserCleared,
    /// No size keeps fill within the limit.
    Failed(String),
}

/// Conduit carrying the circuit's cable set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConduitRun {
    pub conduit_type: Option<String>,
    pub material: Option<ConduitMaterial>,
    pub size: Option<ConduitSize>,
    /// `area_used / area_available`, rounded to 5 decimals.
    pub fill_ratio: Option<f64>,
    state: ConduitState,
}

fn round5(value: f64) -> f64 {
    (value * 100_000.0).round() / 100_000.0
}

impl ConduitRun {
    pub fn state(&self) -> &ConduitState {
        &self.state
    }

    /// `true` for every state that presents as "no conduit".
    pub fn is_cleared(&self) -> bool {
        matches!(
            self.state,
            ConduitState::Cleared | ConduitState::UserCleared | ConduitState::Failed(_)
        )
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, ConduitState::Failed(_))
    }

    /// Resets geometry and moves to `state`.
    pub(crate) fn clear_as(&mut self, state: ConduitState) {
        self.conduit_type = None;
        self.material = None;
        self.size = None;
        self.fill_ratio = None;
        self.state = state;
    }

    /// Resolves `conduit_type` to its material bucket. The first bucket
    /// listing the type wins.
    pub fn set_type_from_value(&mut self, conduit_type: &str, tables: &ReferenceTables) -> bool {
        match tables.conduit_material_for(conduit_type) {
            Some(material) => {
                self.conduit_type = Some(conduit_type.to_string());
                self.material = Some(material);
                true
            }
            None => false,
        }
    }

    fn areas<'t>(
        &self,
        tables: &'t ReferenceTables,
    ) -> Option<&'t std::collections::BTreeMap<ConduitSize, f64>> {
        let material = self.material?;
        let conduit_type = self.conduit_type.as_deref()?;
        tables.conduit_areas(material, conduit_type)
    }

    /// Applies a user-chosen size. Returns `false` if the size has no area
    /// for this conduit type.
    pub fn apply_override_size(
        &mut self,
        size: ConduitSize,
        total_area: f64,
        tables: &ReferenceTables,
    ) -> bool {
        let Some(area) = self.areas(tables).and_then(|t| t.get(&size).copied()) else {
            return false;
        };
        self.size = Some(size);
        self.fill_ratio = Some(round5(total_area / area));
        self.state = ConduitState::Sized;
        true
    }

    /// Picks the first size at or above `settings.min_conduit_size` whose
    /// fill stays within `settings.max_conduit_fill`.
    pub fn pick_size(
        &mut self,
        total_area: f64,
        settings: &CircuitSettings,
        tables: &ReferenceTables,
    ) -> Option<ConduitSize> {
        let areas = self.areas(tables)?;
        let start = tables
            .conduit_sizes
            .iter()
            .position(|s| *s == settings.min_conduit_size)?;

        let (size, fill) = tables.conduit_sizes[start..].iter().find_map(|size| {
            let area = areas.get(size)?;
            let fill = total_area / area;
            (fill <= settings.max_conduit_fill).then_some((*size, round5(fill)))
        })?;

        self.size = Some(size);
        self.fill_ratio = Some(fill);
        self.state = ConduitState::Sized;
        Some(size)
    }
}
