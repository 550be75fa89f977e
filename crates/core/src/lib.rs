//! radqa core data models.
//!
//! This crate defines the domain structures shared by the report reader,
//! the QA decision engine and the storage layer.

#![warn(missing_docs)]

// Core identities
mod id;

// Plan data
mod metrics;
mod clinical;

// QA workflow
mod qa;

// Configuration and export
mod thresholds;
mod catalog;
mod history;

// Re-exports
pub use id::*;

pub use metrics::{FractionCount, MetricValue, PlanMetrics, Sex};
pub use clinical::{AnatomicRegion, ClinicalContext, Technique};
pub use qa::{AttemptOutcome, QaAttempt, QaTechnique};
pub use thresholds::Thresholds;
pub use catalog::CostCatalog;
pub use history::HistoryRow;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
