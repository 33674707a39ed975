//! Per-circuit sizing engine.
//!
//! A [`CircuitBranch`] is built from [`CircuitInputs`], shared
//! [`CircuitSettings`](crate::settings::CircuitSettings) and
//! [`ReferenceTables`](crate::tables::ReferenceTables). The sizing stages run
//! in a fixed order (breaker, hot, neutral, ground, conduit), each reading
//! the results of the previous one. [`size_circuit`] runs that order.

pub mod branch;
pub mod cable;
pub mod calc;
pub mod conduit;
pub mod inputs;
pub mod notice;
mod outputs;
pub mod overrides;
pub mod report;
mod voltage_drop;

pub use branch::{BranchType, CircuitBranch};
pub use cable::{CableSet, CableState};
pub use calc::is_ampacity_acceptable;
pub use conduit::{ConduitRun, ConduitState};
pub use inputs::{
    CircuitInputs, CircuitKind, CircuitOverrides, DistributionSystem, DownstreamElement,
    RawOverride,
};
pub use notice::{GroupedNotices, Notice, NoticeCollector, NoticeLevel};
pub use overrides::{SizeOverride, ValidatedOverrides};
pub use report::{CircuitReport, size_all, size_circuit};
