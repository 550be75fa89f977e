//! Configurable complexity thresholds.

use serde::{Deserialize, Serialize};

/// Thresholds against which modulated plans are classified as complex.
///
/// A read-only snapshot is taken when a session starts; later edits do
/// not affect an open session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Plans whose minimum per-beam MCS falls below this are complex
    pub mcs_min: f64,

    /// Plans whose maximum per-beam SAS rises above this are complex
    pub sas_max: f64,

    /// Plans with more fractions than this are complex
    pub fractions: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            mcs_min: 0.5,
            sas_max: 0.5,
            fractions: 3,
        }
    }
}
