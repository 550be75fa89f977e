//! Plan complexity classification.

use radqa_core::{PlanMetrics, Technique, Thresholds};

/// Whether a plan needs the stricter complex-plan QA package.
///
/// Only modulated techniques (IMRT/VMAT) can be complex: a plan is complex
/// when its minimum beam MCS falls below the threshold, its maximum beam
/// SAS rises above it, or it has more fractions than allowed. Unknown
/// metrics leave their sub-condition false, so a plan with no usable
/// metrics is non-complex rather than an error.
pub fn is_complex(technique: Technique, metrics: &PlanMetrics, thresholds: &Thresholds) -> bool {
    if !technique.is_modulated() {
        return false;
    }
    let low_mcs = metrics
        .mcs_min
        .value()
        .is_some_and(|v| v < thresholds.mcs_min);
    let high_sas = metrics
        .sas_max
        .value()
        .is_some_and(|v| v > thresholds.sas_max);
    let many_fractions = metrics
        .fractions
        .value()
        .is_some_and(|n| n > thresholds.fractions);
    low_mcs || high_sas || many_fractions
}
