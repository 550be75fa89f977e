//! Report-to-plan assembly and clinician-facing suggestions.

use radqa_core::{AnatomicRegion, FractionCount, MetricValue, PlanMetrics, Sex, Technique};

use crate::{extract_value, summarize_beam_metrics, Grid, Result};

/// Assembled plan data plus pre-session suggestions.
///
/// The suggestions are guesses from the plan name, not authoritative; the
/// clinician reviews and may override both before a session starts.
#[derive(Debug, Clone)]
pub struct PlanReport {
    /// Extracted plan metrics
    pub metrics: PlanMetrics,

    /// Technique guessed from the plan name
    pub suggested_technique: Technique,

    /// Anatomic region guessed from the plan name
    pub suggested_region: AnatomicRegion,
}

/// Extract the fixed label set and the beam-metrics aggregates from one
/// report grid.
pub fn assemble_plan(grid: &Grid) -> Result<PlanReport> {
    let plan_name = extract_value(grid, "PLAN NAME")?;
    let patient_name = extract_value(grid, "PATIENT NAME")?;
    let patient_id = extract_value(grid, "PATIENT ID")?;
    let sex = Sex::from_report(&extract_value(grid, "PATIENT SEX")?);
    let fractions = FractionCount::from_report(&extract_value(grid, "FRACTIONS")?);
    let mcs_avg = MetricValue::from_report(&extract_value(grid, "MCS")?);
    let sas_avg = MetricValue::from_report(&extract_value(grid, "SAS")?);
    let pmu_avg = MetricValue::from_report(&extract_value(grid, "PMU")?);
    let beams = summarize_beam_metrics(grid);

    let suggested_technique = suggest_technique(&plan_name);
    let suggested_region = suggest_region(&plan_name);

    Ok(PlanReport {
        metrics: PlanMetrics {
            plan_name,
            patient_name,
            patient_id,
            sex,
            fractions,
            mcs_avg,
            sas_avg,
            pmu_avg,
            mcs_min: beams.mcs_min,
            sas_max: beams.sas_max,
        },
        suggested_technique,
        suggested_region,
    })
}

/// First technique label found inside the upper-cased plan name, in
/// detection priority order; `3D` when none matches.
fn suggest_technique(plan_name: &str) -> Technique {
    let upper = plan_name.to_uppercase();
    Technique::ALL
        .into_iter()
        .find(|t| upper.contains(t.label()))
        .unwrap_or(Technique::ThreeD)
}

/// Third whitespace token of the upper-cased plan name, when it names a
/// known region; `OTHER` otherwise.
fn suggest_region(plan_name: &str) -> AnatomicRegion {
    plan_name
        .to_uppercase()
        .split_whitespace()
        .nth(2)
        .and_then(AnatomicRegion::parse)
        .unwrap_or(AnatomicRegion::Other)
}
