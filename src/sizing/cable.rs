//! Conductor working record for one circuit.

use crate::tables::{Material, ReferenceTables, TempRating, WireSize};

/// Lifecycle of a [`CableSet`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CableState {
    #[default]
    Pending,
    Sized,
    /// The user blanked the hot size with `"-"`.
    UserCleared,
    /// No acceptable sizing exists; carries the failure reason.
    Failed(String),
}

/// Conductor sizes, quantities and spec for one circuit.
///
/// Sizes are `None` until resolved. While the state is
/// [`CableState::UserCleared`] or [`CableState::Failed`] the branch getters
/// present every derived value as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CableSet {
    pub hot_size: Option<WireSize>,
    pub neutral_size: Option<WireSize>,
    pub ground_size: Option<WireSize>,
    pub ig_size: Option<WireSize>,

    pub hot_qty: u32,
    pub neutral_qty: u32,
    pub ground_qty: u32,
    pub ig_qty: u32,

    pub sets: Option<u32>,
    pub material: Option<Material>,
    pub temp: Option<TempRating>,
    pub insulation: Option<String>,

    /// Per-conductor ampacity of the selected hot size.
    pub base_ampacity: Option<f64>,
    /// `base_ampacity * sets`.
    pub total_ampacity: Option<f64>,
    /// Voltage drop as a fraction of circuit voltage.
    pub voltage_drop: Option<f64>,

    state: CableState,
}

impl CableSet {
    pub fn new() -> Self {
        Self {
            sets: Some(1),
            ..Self::default()
        }
    }

    pub fn state(&self) -> &CableState {
        &self.state
    }

    pub fn is_user_cleared(&self) -> bool {
        self.state == CableState::UserCleared
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, CableState::Failed(_))
    }

    pub(crate) fn mark_user_cleared(&mut self) {
        self.state = CableState::UserCleared;
    }

    pub(crate) fn mark_sized(&mut self) {
        self.state = CableState::Sized;
    }

    /// Wipes every size, quantity and spec field and records the failure.
    pub(crate) fn fail(&mut self, reason: impl Into<String>) {
        self.clear();
        self.state = CableState::Failed(reason.into());
    }

    /// Resets all cable data; the state is left untouched.
    pub fn clear(&mut self) {
        let state = std::mem::take(&mut self.state);
        *self = Self {
            sets: None,
            state,
            ..Self::default()
        };
    }

    /// Total conductor cross-section (sq in) for the current insulation.
    ///
    /// Components with no size, no quantity, or no table entry contribute
    /// nothing. Neutral falls back to the hot size and isolated ground to the
    /// ground size.
    pub fn total_area(&self, tables: &ReferenceTables) -> f64 {
        let Some(insulation) = self.insulation.as_deref() else {
            return 0.0;
        };
        let items = [
            (self.hot_size, self.hot_qty),
            (self.neutral_size.or(self.hot_size), self.neutral_qty),
            (self.ground_size, self.ground_qty),
            (self.ig_size.or(self.ground_size), self.ig_qty),
        ];

        items
            .into_iter()
            .filter(|(_, qty)| *qty > 0)
            .filter_map(|(size, qty)| {
                let area = tables.conductor_area(size?, insulation)?;
                Some(f64::from(qty) * area)
            })
            .sum()
    }
}
