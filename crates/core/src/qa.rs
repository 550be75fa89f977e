//! QA verification techniques and attempt records.

use serde::{Deserialize, Serialize};

/// A single QA verification technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QaTechnique {
    /// Automated plan integrity check
    Plancheck,
    /// Independent dose calculation
    IndependentCalculation,
    /// Machine log-file analysis
    LogFile,
    /// Portal dosimetry measurement
    PortalDosimetry,
    /// Stereophan phantom with Gafchromic film / conformity index
    StereophanGafchromic,
    /// ArcCheck cylindrical diode array
    ArcCheck,
    /// 3DVH dose reconstruction
    ThreeDvh,
    /// In-vivo transit EPID dosimetry
    TransitEpid,
    /// Placeholder when no rule applies to the technique
    Undefined,
}

impl QaTechnique {
    /// Display label, as it appears in reports and the cost catalog.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Plancheck => "Plancheck",
            Self::IndependentCalculation => "Independent Calculation",
            Self::LogFile => "LogFile",
            Self::PortalDosimetry => "Portal Dosimetry",
            Self::StereophanGafchromic => "Stereophan + Gafchromic/CI",
            Self::ArcCheck => "ArcCheck",
            Self::ThreeDvh => "3DVH",
            Self::TransitEpid => "Transit-EPID",
            Self::Undefined => "Undefined",
        }
    }
}

impl std::fmt::Display for QaTechnique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Recorded result of one QA attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptOutcome {
    /// Attempt not yet performed
    Pending,
    /// QA passed
    Successful,
    /// QA failed
    Failed,
}

impl AttemptOutcome {
    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Successful => "Successful",
            Self::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded QA attempt: the package that was recommended and what
/// came of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaAttempt {
    /// Attempt number, starting at 1
    pub number: u8,

    /// Package recommended for this attempt, in rule-table order
    pub package: Vec<QaTechnique>,

    /// Recorded outcome
    pub outcome: AttemptOutcome,
}

impl QaAttempt {
    /// Serialized package form: member labels joined with ` + `, or `-`
    /// for an empty package.
    pub fn package_label(&self) -> String {
        if self.package.is_empty() {
            return "-".to_string();
        }
        self.package
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_label_joins_members() {
        let attempt = QaAttempt {
            number: 1,
            package: vec![QaTechnique::Plancheck, QaTechnique::LogFile],
            outcome: AttemptOutcome::Pending,
        };
        assert_eq!(attempt.package_label(), "Plancheck + LogFile");
    }

    #[test]
    fn empty_package_labels_as_placeholder() {
        let attempt = QaAttempt {
            number: 2,
            package: Vec::new(),
            outcome: AttemptOutcome::Pending,
        };
        assert_eq!(attempt.package_label(), "-");
    }
}
