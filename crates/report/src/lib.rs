//! Plan-report reading and extraction.
//!
//! Loads one planning-system report export into a cell [`Grid`], pulls
//! labeled scalar values and beam-metric aggregates out of it, and
//! assembles the result into a [`radqa_core::PlanMetrics`] record plus
//! clinician-facing technique/region suggestions.

mod grid;
mod extract;
mod assemble;

pub use grid::{parse_report, read_report, Cell, Grid};
pub use extract::{extract_value, summarize_beam_metrics, BeamSummary, MISSING};
pub use assemble::{assemble_plan, PlanReport};

/// Error type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors raised while reading or extracting a report.
///
/// Missing labels and unparsable values are never errors; they surface as
/// `-` / `Unknown` sentinels instead. Only structural violations land here.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A label matched in the last column of its row, so there is no
    /// adjacent cell to read the value from
    #[error("label '{label}' matched at row {row} with no value cell to its right")]
    LabelWithoutValue {
        /// The label that matched
        label: String,
        /// Row index of the match
        row: usize,
    },
}
