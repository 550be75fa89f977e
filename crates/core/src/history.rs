//! Exported historical record of completed QA sessions.

use serde::{Deserialize, Serialize};

use crate::id::RecordId;
use crate::Time;

/// One row of the historical record, written once per completed session.
///
/// Fields are pre-rendered display strings so the record reads the same
/// way the clinician saw the session; `-` marks anything that never
/// applied (attempt-2 fields of a single-attempt session, metrics the
/// report did not carry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRow {
    /// Unique identifier
    pub id: RecordId,

    /// When the session completed
    pub date: Time,

    /// Patient identifier
    pub patient_id: String,

    /// Patient name
    pub patient_name: String,

    /// Patient sex
    pub sex: String,

    /// Plan name
    pub plan_name: String,

    /// Anatomic region
    pub region: String,

    /// Delivery technique
    pub technique: String,

    /// Plan-level MCS average
    pub mcs_avg: String,

    /// Plan-level SAS average
    pub sas_avg: String,

    /// Plan-level PMU average
    pub pmu_avg: String,

    /// Number of treatment fractions
    pub fractions: String,

    /// Minimum per-beam MCS
    pub mcs_min: String,

    /// Maximum per-beam SAS
    pub sas_max: String,

    /// Attempt-1 package, `+`-joined
    pub attempt1_package: String,

    /// Attempt-1 outcome
    pub attempt1_outcome: String,

    /// Attempt-2 package, `-` if the session ended after one attempt
    pub attempt2_package: String,

    /// Attempt-2 outcome, `-` if the session ended after one attempt
    pub attempt2_outcome: String,

    /// Total catalog cost across all attempts, rounded to two decimals
    pub total_cost: f64,
}
