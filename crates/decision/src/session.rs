//! QA session state machine.

use serde::{Deserialize, Serialize};

use radqa_core::{
    AttemptOutcome, ClinicalContext, PlanMetrics, QaAttempt, QaTechnique, SessionId, Thresholds,
};

use crate::{compute_package, is_complex, max_attempts};

/// Errors for invalid session operations. The session state is unchanged
/// whenever one of these is returned.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    /// Outcome submitted on a terminal session
    #[error("session is closed; no further outcomes can be recorded")]
    SessionClosed,

    /// `Pending` submitted as an outcome
    #[error("an attempt outcome must be Successful or Failed")]
    PendingOutcome,

    /// Export requested before the session reached a terminal state
    #[error("session is still awaiting attempt {attempt}; only terminal sessions can be exported")]
    NotTerminal {
        /// The attempt still awaiting an outcome
        attempt: u8,
    },
}

/// Session state: awaiting an attempt outcome, or one of the two terminal
/// verdicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Waiting for the outcome of the given attempt
    Awaiting {
        /// Attempt number, starting at 1
        attempt: u8,
    },
    /// QA passed; the plan is validated for delivery
    Validated,
    /// All attempts failed; the treatment plan must be redone
    ReplanRequired,
}

impl SessionState {
    /// Whether the session has ended.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Awaiting { .. })
    }
}

/// One QA session over a loaded plan.
///
/// Owns immutable snapshots of the plan metrics and the clinical context
/// (frozen at session start), the once-computed complexity verdict, and
/// the append-only attempt history. Complexity and thresholds are fixed
/// for the session lifetime; configuration edits made elsewhere do not
/// reach an open session.
#[derive(Debug, Clone)]
pub struct QaSession {
    id: SessionId,
    metrics: PlanMetrics,
    context: ClinicalContext,
    complex: bool,
    max_attempts: u8,
    state: SessionState,
    history: Vec<QaAttempt>,
    current_package: Vec<QaTechnique>,
}

impl QaSession {
    /// Start a session: classify the plan once, compute the attempt-1
    /// package and wait for its outcome.
    pub fn begin(metrics: PlanMetrics, context: ClinicalContext, thresholds: &Thresholds) -> Self {
        let complex = is_complex(context.technique, &metrics, thresholds);
        let max_attempts = max_attempts(Some(context.technique), complex);
        let current_package =
            compute_package(Some(context.technique), complex, context.escalation_flag(), 1);
        tracing::debug!(
            technique = %context.technique,
            complex,
            max_attempts,
            "starting QA session"
        );
        Self {
            id: SessionId::new(),
            metrics,
            context,
            complex,
            max_attempts,
            state: SessionState::Awaiting { attempt: 1 },
            history: Vec::new(),
            current_package,
        }
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The plan metrics snapshot this session was opened for.
    pub fn metrics(&self) -> &PlanMetrics {
        &self.metrics
    }

    /// The frozen clinical context.
    pub fn context(&self) -> &ClinicalContext {
        &self.context
    }

    /// Complexity verdict computed at session start.
    pub fn is_complex(&self) -> bool {
        self.complex
    }

    /// Attempts allowed before the plan must be redone.
    pub fn max_attempts(&self) -> u8 {
        self.max_attempts
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Recorded attempts, in order. Never rewritten.
    pub fn history(&self) -> &[QaAttempt] {
        &self.history
    }

    /// Package recommended for the attempt currently awaiting an outcome.
    /// Empty once the session is terminal.
    pub fn current_package(&self) -> &[QaTechnique] {
        &self.current_package
    }

    /// Record the outcome of the current attempt.
    ///
    /// Success terminates in `Validated` from any attempt. Failure on the
    /// last allowed attempt terminates in `ReplanRequired`; an earlier
    /// failure advances to the next attempt and recomputes its package.
    /// The attempt record is appended to history before the state changes.
    pub fn record_outcome(&mut self, outcome: AttemptOutcome) -> Result<SessionState, SessionError> {
        if outcome == AttemptOutcome::Pending {
            return Err(SessionError::PendingOutcome);
        }
        let SessionState::Awaiting { attempt } = self.state else {
            return Err(SessionError::SessionClosed);
        };

        self.history.push(QaAttempt {
            number: attempt,
            package: self.current_package.clone(),
            outcome,
        });

        self.state = if outcome == AttemptOutcome::Successful {
            self.current_package = Vec::new();
            SessionState::Validated
        } else if attempt >= self.max_attempts {
            self.current_package = Vec::new();
            SessionState::ReplanRequired
        } else {
            let next = attempt + 1;
            self.current_package = compute_package(
                Some(self.context.technique),
                self.complex,
                self.context.escalation_flag(),
                next,
            );
            SessionState::Awaiting { attempt: next }
        };

        tracing::info!(attempt, %outcome, state = ?self.state, "recorded QA attempt");
        Ok(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radqa_core::{AnatomicRegion, FractionCount, MetricValue, Sex, Technique};

    fn metrics(mcs_min: f64, sas_max: f64, fractions: u32) -> PlanMetrics {
        PlanMetrics {
            plan_name: "PLAN 01 LUNG VMAT".to_string(),
            patient_name: "DOE JOHN".to_string(),
            patient_id: "12345".to_string(),
            sex: Sex::Male,
            fractions: FractionCount::Known(fractions),
            mcs_avg: MetricValue::Unknown,
            sas_avg: MetricValue::Unknown,
            pmu_avg: MetricValue::Unknown,
            mcs_min: MetricValue::Known(mcs_min),
            sas_max: MetricValue::Known(sas_max),
        }
    }

    fn context(technique: Technique, region: AnatomicRegion) -> ClinicalContext {
        let mut ctx = ClinicalContext::new(technique, region, false, Sex::Male);
        ctx.anatomic_changes = false;
        ctx
    }

    #[test]
    fn success_terminates_from_any_attempt() {
        let mut session = QaSession::begin(
            metrics(0.8, 0.2, 1),
            context(Technique::ThreeD, AnatomicRegion::Breast),
            &Thresholds::default(),
        );
        assert_eq!(
            session.record_outcome(AttemptOutcome::Successful).unwrap(),
            SessionState::Validated
        );
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].outcome, AttemptOutcome::Successful);
    }

    #[test]
    fn complex_vmat_escalates_then_requires_replan() {
        // Scenario: MCSmin 0.45, SASmax 0.6, 5 fractions vs defaults
        let mut session = QaSession::begin(
            metrics(0.45, 0.6, 5),
            context(Technique::Vmat, AnatomicRegion::Prostate),
            &Thresholds::default(),
        );
        assert!(session.is_complex());
        assert_eq!(
            session.current_package(),
            &[
                QaTechnique::Plancheck,
                QaTechnique::IndependentCalculation,
                QaTechnique::LogFile,
                QaTechnique::PortalDosimetry,
            ]
        );

        assert_eq!(
            session.record_outcome(AttemptOutcome::Failed).unwrap(),
            SessionState::Awaiting { attempt: 2 }
        );
        assert_eq!(
            session.current_package(),
            &[QaTechnique::ArcCheck, QaTechnique::ThreeDvh]
        );

        assert_eq!(
            session.record_outcome(AttemptOutcome::Failed).unwrap(),
            SessionState::ReplanRequired
        );
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn non_complex_modulated_plan_fails_terminally_on_first_attempt() {
        let mut session = QaSession::begin(
            metrics(0.8, 0.2, 1),
            context(Technique::Imrt, AnatomicRegion::Prostate),
            &Thresholds::default(),
        );
        assert!(!session.is_complex());
        assert_eq!(session.max_attempts(), 1);
        assert_eq!(
            session.record_outcome(AttemptOutcome::Failed).unwrap(),
            SessionState::ReplanRequired
        );
    }

    #[test]
    fn anatomic_changes_add_transit_epid_on_first_attempt() {
        // Scenario: 3D plan with anatomic changes present
        let mut ctx = context(Technique::ThreeD, AnatomicRegion::Breast);
        ctx.anatomic_changes = true;
        let session = QaSession::begin(metrics(0.8, 0.2, 1), ctx, &Thresholds::default());
        assert_eq!(
            session.current_package(),
            &[
                QaTechnique::Plancheck,
                QaTechnique::IndependentCalculation,
                QaTechnique::LogFile,
                QaTechnique::TransitEpid,
            ]
        );
    }

    #[test]
    fn terminal_sessions_reject_further_outcomes() {
        let mut session = QaSession::begin(
            metrics(0.8, 0.2, 1),
            context(Technique::Sbrt, AnatomicRegion::Lung),
            &Thresholds::default(),
        );
        session.record_outcome(AttemptOutcome::Successful).unwrap();
        assert_eq!(
            session.record_outcome(AttemptOutcome::Failed),
            Err(SessionError::SessionClosed)
        );
        // history untouched by the rejected operation
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn pending_is_not_a_recordable_outcome() {
        let mut session = QaSession::begin(
            metrics(0.8, 0.2, 1),
            context(Technique::Srs, AnatomicRegion::BrainCns),
            &Thresholds::default(),
        );
        assert_eq!(
            session.record_outcome(AttemptOutcome::Pending),
            Err(SessionError::PendingOutcome)
        );
        assert_eq!(session.state(), SessionState::Awaiting { attempt: 1 });
        assert!(session.history().is_empty());
    }

    #[test]
    fn history_never_exceeds_two_attempts() {
        let mut session = QaSession::begin(
            metrics(0.45, 0.6, 5),
            context(Technique::Vmat, AnatomicRegion::Prostate),
            &Thresholds::default(),
        );
        session.record_outcome(AttemptOutcome::Failed).unwrap();
        session.record_outcome(AttemptOutcome::Failed).unwrap();
        assert!(session.record_outcome(AttemptOutcome::Failed).is_err());
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn srs_escalates_to_stereophan() {
        let mut session = QaSession::begin(
            metrics(0.8, 0.2, 1),
            context(Technique::Srs, AnatomicRegion::BrainCns),
            &Thresholds::default(),
        );
        assert_eq!(
            session.current_package(),
            &[QaTechnique::Plancheck, QaTechnique::PortalDosimetry]
        );
        session.record_outcome(AttemptOutcome::Failed).unwrap();
        assert_eq!(
            session.current_package(),
            &[QaTechnique::StereophanGafchromic]
        );
    }
}
