//! QA decision core.
//!
//! Pure, synchronous decision logic: complexity classification against
//! configurable thresholds, the per-attempt technique rule table, the
//! session state machine that escalates across attempts, cost aggregation
//! over recorded attempts, and the history-row builder for export.

mod classify;
mod engine;
mod session;
mod cost;
mod export;

pub use classify::is_complex;
pub use engine::{compute_package, max_attempts};
pub use session::{QaSession, SessionError, SessionState};
pub use cost::total_cost;
pub use export::session_record;
