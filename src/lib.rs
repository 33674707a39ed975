//! Electrical branch circuit and feeder sizing.
//!
//! Given a circuit's breaker, load, length and voltage, the engine selects
//! hot, neutral and ground conductors, parallel sets and conduit from
//! NEC-style reference tables, recording every substitution as a notice.

pub mod config;
pub mod error;
/// File export of sizing results.
pub mod io {
    pub mod export;
}
pub mod settings;
pub mod sizing;
pub mod tables;
pub mod telemetry;
