//! Labeled-value extraction and beam-metrics aggregation.

use radqa_core::MetricValue;

use crate::{Grid, ReportError, Result};

/// Placeholder returned for values absent from the report.
pub const MISSING: &str = "-";

/// Column-0 marker opening the beam-metrics block.
const BEAM_METRICS_MARKER: &str = "BEAM METRICS";

/// Beam-metrics column holding the metric name.
const METRIC_NAME_COL: usize = 2;
/// Beam-metrics column holding the raw value.
const METRIC_VALUE_COL: usize = 3;

/// Find the first cell whose trimmed text equals `label` and return the
/// trimmed text of the cell to its right.
///
/// Rows are scanned top to bottom, columns left to right; comparison is
/// case-sensitive. An absent label yields `Ok("-")`. A label that matches
/// in the last column of its row has no value cell, which is malformed
/// input and an error.
pub fn extract_value(grid: &Grid, label: &str) -> Result<String> {
    for (row_idx, row) in grid.rows().iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            if cell.as_text() == label {
                return match row.get(col_idx + 1) {
                    Some(value) => Ok(value.as_text()),
                    None => Err(ReportError::LabelWithoutValue {
                        label: label.to_string(),
                        row: row_idx,
                    }),
                };
            }
        }
    }
    Ok(MISSING.to_string())
}

/// Per-beam metric aggregates from the `BEAM METRICS` block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamSummary {
    /// Minimum MCS across beams, `Unknown` when no beam row parsed
    pub mcs_min: MetricValue,
    /// Maximum SAS across beams, `Unknown` when no beam row parsed
    pub sas_max: MetricValue,
}

/// Aggregate MCS/SAS values from the open-ended beam-metrics block.
///
/// The block starts after the first row whose column 0 reads
/// `BEAM METRICS` (marker rows themselves carry no data) and runs to the
/// end of the grid. Within it, column 2 names the metric and column 3
/// holds the value; decimal commas are normalized and rows that fail to
/// parse are skipped without error, as are rows with fewer than four
/// columns and metric names other than `MCS`/`SAS`.
pub fn summarize_beam_metrics(grid: &Grid) -> BeamSummary {
    let mut mcs = Vec::new();
    let mut sas = Vec::new();
    let mut in_block = false;

    for row in grid.rows() {
        if row.first().is_some_and(|c| c.as_text() == BEAM_METRICS_MARKER) {
            in_block = true;
            continue;
        }
        if !in_block {
            continue;
        }
        let (Some(name), Some(raw)) = (row.get(METRIC_NAME_COL), row.get(METRIC_VALUE_COL))
        else {
            continue;
        };
        let Ok(value) = raw.as_text().replace(',', ".").trim().parse::<f64>() else {
            continue;
        };
        if !value.is_finite() {
            continue;
        }
        match name.as_text().as_str() {
            "MCS" => mcs.push(value),
            "SAS" => sas.push(value),
            _ => {}
        }
    }

    BeamSummary {
        mcs_min: mcs
            .into_iter()
            .reduce(f64::min)
            .map_or(MetricValue::Unknown, MetricValue::Known),
        sas_max: sas
            .into_iter()
            .reduce(f64::max)
            .map_or(MetricValue::Unknown, MetricValue::Known),
    }
}
