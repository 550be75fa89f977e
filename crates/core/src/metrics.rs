//! Plan metrics extracted from a planning-system report.

use serde::{Deserialize, Serialize};

/// A scalar metric that may be absent from the report.
///
/// `Unknown` is the typed form of the `-` placeholder the report uses for
/// missing values and is distinct from zero. Downstream rules treat
/// `Unknown` as "condition not met", never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MetricValue {
    /// Successfully parsed value
    Known(f64),
    /// Value absent or unparsable
    Unknown,
}

impl MetricValue {
    /// Parse a raw report field.
    ///
    /// Empty fields and `-` map to `Unknown`; decimal commas are
    /// normalized before parsing. Non-finite values are rejected.
    pub fn from_report(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == "-" {
            return Self::Unknown;
        }
        match raw.replace(',', ".").parse::<f64>() {
            Ok(v) if v.is_finite() => Self::Known(v),
            _ => Self::Unknown,
        }
    }

    /// Inner value, if known.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Known(v) => Some(*v),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(v) => write!(f, "{}", v),
            Self::Unknown => write!(f, "-"),
        }
    }
}

/// Number of treatment fractions, when the report states one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FractionCount {
    /// Successfully parsed count
    Known(u32),
    /// Count absent or unparsable
    Unknown,
}

impl FractionCount {
    /// Parse a raw report field; anything but a plain integer is `Unknown`.
    pub fn from_report(raw: &str) -> Self {
        match raw.trim().parse::<u32>() {
            Ok(n) => Self::Known(n),
            Err(_) => Self::Unknown,
        }
    }

    /// Inner count, if known.
    pub fn value(&self) -> Option<u32> {
        match self {
            Self::Known(n) => Some(*n),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for FractionCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Known(n) => write!(f, "{}", n),
            Self::Unknown => write!(f, "-"),
        }
    }
}

/// Patient sex as stated in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Male
    Male,
    /// Female
    Female,
    /// Not stated in the report
    Unknown,
}

impl Sex {
    /// Parse from the report field (`M`/`F`, case-insensitive).
    pub fn from_report(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("m") {
            Self::Male
        } else if raw.eq_ignore_ascii_case("f") {
            Self::Female
        } else {
            Self::Unknown
        }
    }

    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Unknown => "-",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All metrics extracted from one plan report.
///
/// An immutable snapshot: replaced wholesale when the next report loads.
/// String fields hold `-` when the label was absent from the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanMetrics {
    /// Plan name
    pub plan_name: String,

    /// Patient name
    pub patient_name: String,

    /// Patient identifier
    pub patient_id: String,

    /// Patient sex
    pub sex: Sex,

    /// Number of treatment fractions
    pub fractions: FractionCount,

    /// Plan-level MCS average
    pub mcs_avg: MetricValue,

    /// Plan-level SAS average
    pub sas_avg: MetricValue,

    /// Plan-level PMU average
    pub pmu_avg: MetricValue,

    /// Minimum per-beam MCS
    pub mcs_min: MetricValue,

    /// Maximum per-beam SAS
    pub sas_max: MetricValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_value_parses_decimal_comma() {
        assert_eq!(MetricValue::from_report("0,62"), MetricValue::Known(0.62));
        assert_eq!(MetricValue::from_report(" 0.45 "), MetricValue::Known(0.45));
    }

    #[test]
    fn metric_value_missing_is_unknown_not_zero() {
        assert_eq!(MetricValue::from_report("-"), MetricValue::Unknown);
        assert_eq!(MetricValue::from_report(""), MetricValue::Unknown);
        assert_eq!(MetricValue::from_report("n/a"), MetricValue::Unknown);
        assert_ne!(MetricValue::from_report("-"), MetricValue::Known(0.0));
    }

    #[test]
    fn metric_value_rejects_non_finite() {
        assert_eq!(MetricValue::from_report("inf"), MetricValue::Unknown);
        assert_eq!(MetricValue::from_report("NaN"), MetricValue::Unknown);
    }

    #[test]
    fn metric_value_displays_placeholder() {
        assert_eq!(MetricValue::Unknown.to_string(), "-");
        assert_eq!(MetricValue::Known(0.4).to_string(), "0.4");
    }

    #[test]
    fn fraction_count_parses_integers_only() {
        assert_eq!(FractionCount::from_report("25"), FractionCount::Known(25));
        assert_eq!(FractionCount::from_report("25.0"), FractionCount::Unknown);
        assert_eq!(FractionCount::from_report("-"), FractionCount::Unknown);
    }

    #[test]
    fn sex_parses_case_insensitively() {
        assert_eq!(Sex::from_report("m"), Sex::Male);
        assert_eq!(Sex::from_report(" F "), Sex::Female);
        assert_eq!(Sex::from_report("-"), Sex::Unknown);
        assert_eq!(Sex::from_report("female"), Sex::Unknown);
    }
}
