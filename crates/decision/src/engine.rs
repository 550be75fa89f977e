//! Per-attempt QA technique rule table.
//!
//! Packages are fixed per (technique, complexity, attempt): a failed first
//! attempt escalates to a fixed second-attempt set regardless of which
//! technique in the package failed.

use radqa_core::{QaTechnique, Technique};

/// Maximum attempts before a failed plan must be redone.
///
/// Non-complex modulated plans get a single attempt; so does an unknown
/// technique, for which the rule table defines no escalation.
pub fn max_attempts(technique: Option<Technique>, complex: bool) -> u8 {
    match technique {
        None => 1,
        Some(t) if t.is_modulated() && !complex => 1,
        Some(_) => 2,
    }
}

/// Recommended technique package for one attempt.
///
/// Deterministic and order-stable for identical inputs. `escalation`
/// (anatomic changes present or a pediatric patient) appends Transit-EPID
/// to the first attempt only; second-attempt packages are fixed
/// escalation sets. An unknown technique yields the `Undefined`
/// placeholder package.
pub fn compute_package(
    technique: Option<Technique>,
    complex: bool,
    escalation: bool,
    attempt: u8,
) -> Vec<QaTechnique> {
    let Some(technique) = technique else {
        return vec![QaTechnique::Undefined];
    };

    let mut package = if attempt <= 1 {
        match technique {
            Technique::ThreeD | Technique::Fif => vec![
                QaTechnique::Plancheck,
                QaTechnique::IndependentCalculation,
                QaTechnique::LogFile,
            ],
            Technique::Srs | Technique::Sbrt => {
                vec![QaTechnique::Plancheck, QaTechnique::PortalDosimetry]
            }
            Technique::Imrt | Technique::Vmat if complex => vec![
                QaTechnique::Plancheck,
                QaTechnique::IndependentCalculation,
                QaTechnique::LogFile,
                QaTechnique::PortalDosimetry,
            ],
            Technique::Imrt | Technique::Vmat => vec![
                QaTechnique::Plancheck,
                QaTechnique::IndependentCalculation,
                QaTechnique::LogFile,
            ],
        }
    } else {
        match technique {
            Technique::ThreeD | Technique::Fif => vec![QaTechnique::PortalDosimetry],
            Technique::Srs | Technique::Sbrt => vec![QaTechnique::StereophanGafchromic],
            Technique::Imrt | Technique::Vmat if complex => {
                vec![QaTechnique::ArcCheck, QaTechnique::ThreeDvh]
            }
            // no second attempt exists for non-complex modulated plans
            Technique::Imrt | Technique::Vmat => Vec::new(),
        }
    };

    if escalation && attempt <= 1 {
        package.push(QaTechnique::TransitEpid);
    }
    package
}

#[cfg(test)]
mod tests {
    use super::*;
    use QaTechnique::*;

    #[test]
    fn attempt_one_packages_match_rule_table() {
        assert_eq!(
            compute_package(Some(Technique::ThreeD), false, false, 1),
            vec![Plancheck, IndependentCalculation, LogFile]
        );
        assert_eq!(
            compute_package(Some(Technique::Fif), false, false, 1),
            vec![Plancheck, IndependentCalculation, LogFile]
        );
        assert_eq!(
            compute_package(Some(Technique::Srs), false, false, 1),
            vec![Plancheck, PortalDosimetry]
        );
        assert_eq!(
            compute_package(Some(Technique::Vmat), false, false, 1),
            vec![Plancheck, IndependentCalculation, LogFile]
        );
        assert_eq!(
            compute_package(Some(Technique::Vmat), true, false, 1),
            vec![Plancheck, IndependentCalculation, LogFile, PortalDosimetry]
        );
    }

    #[test]
    fn attempt_two_packages_are_fixed_escalations() {
        assert_eq!(
            compute_package(Some(Technique::ThreeD), false, false, 2),
            vec![PortalDosimetry]
        );
        assert_eq!(
            compute_package(Some(Technique::Sbrt), false, false, 2),
            vec![StereophanGafchromic]
        );
        assert_eq!(
            compute_package(Some(Technique::Imrt), true, false, 2),
            vec![ArcCheck, ThreeDvh]
        );
        assert_eq!(compute_package(Some(Technique::Imrt), false, false, 2), vec![]);
    }

    #[test]
    fn escalation_appends_transit_epid_to_first_attempt_only() {
        assert_eq!(
            compute_package(Some(Technique::ThreeD), false, true, 1),
            vec![Plancheck, IndependentCalculation, LogFile, TransitEpid]
        );
        assert_eq!(
            compute_package(Some(Technique::Srs), false, true, 2),
            vec![StereophanGafchromic]
        );
        assert_eq!(
            compute_package(Some(Technique::Vmat), true, true, 2),
            vec![ArcCheck, ThreeDvh]
        );
    }

    #[test]
    fn unknown_technique_yields_undefined() {
        assert_eq!(compute_package(None, false, true, 1), vec![Undefined]);
        assert_eq!(compute_package(None, true, false, 2), vec![Undefined]);
    }

    #[test]
    fn packages_are_reproducible() {
        let a = compute_package(Some(Technique::Vmat), true, true, 1);
        let b = compute_package(Some(Technique::Vmat), true, true, 1);
        assert_eq!(a, b);
    }

    #[test]
    fn max_attempts_per_rule_table() {
        assert_eq!(max_attempts(Some(Technique::ThreeD), false), 2);
        assert_eq!(max_attempts(Some(Technique::Srs), false), 2);
        assert_eq!(max_attempts(Some(Technique::Vmat), true), 2);
        assert_eq!(max_attempts(Some(Technique::Vmat), false), 1);
        assert_eq!(max_attempts(Some(Technique::Imrt), false), 1);
        assert_eq!(max_attempts(None, false), 1);
    }
}
