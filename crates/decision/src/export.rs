//! Historical-record rows for completed sessions.

use radqa_core::{CostCatalog, HistoryRow, QaAttempt, RecordId};

use crate::{total_cost, QaSession, SessionError, SessionState};

/// Build the exportable history row for a terminal session.
///
/// Attempt-2 fields are `-` when the session ended after one attempt.
/// A session still awaiting an outcome cannot be exported.
pub fn session_record(session: &QaSession, catalog: &CostCatalog) -> Result<HistoryRow, SessionError> {
    if let SessionState::Awaiting { attempt } = session.state() {
        return Err(SessionError::NotTerminal { attempt });
    }

    let attempt = |n: u8| session.history().iter().find(|a| a.number == n);
    let (attempt1_package, attempt1_outcome) = attempt_fields(attempt(1));
    let (attempt2_package, attempt2_outcome) = attempt_fields(attempt(2));

    let metrics = session.metrics();
    let context = session.context();

    Ok(HistoryRow {
        id: RecordId::new(),
        date: chrono::Utc::now(),
        patient_id: metrics.patient_id.clone(),
        patient_name: metrics.patient_name.clone(),
        sex: context.sex.to_string(),
        plan_name: metrics.plan_name.clone(),
        region: context.region.to_string(),
        technique: context.technique.to_string(),
        mcs_avg: metrics.mcs_avg.to_string(),
        sas_avg: metrics.sas_avg.to_string(),
        pmu_avg: metrics.pmu_avg.to_string(),
        fractions: metrics.fractions.to_string(),
        mcs_min: metrics.mcs_min.to_string(),
        sas_max: metrics.sas_max.to_string(),
        attempt1_package,
        attempt1_outcome,
        attempt2_package,
        attempt2_outcome,
        total_cost: total_cost(session.history(), catalog),
    })
}

fn attempt_fields(attempt: Option<&QaAttempt>) -> (String, String) {
    match attempt {
        Some(a) => (a.package_label(), a.outcome.to_string()),
        None => ("-".to_string(), "-".to_string()),
    }
}
