//! Cost aggregation over recorded QA attempts.

use radqa_core::{CostCatalog, QaAttempt};

/// Total catalog cost of every technique across all recorded attempts.
///
/// Package members are priced per `+`-separated token (so compound labels
/// such as `Stereophan + Gafchromic/CI` price each part); a technique
/// recommended in two attempts is counted twice; unknown catalog names
/// contribute zero. The sum is rounded half-up to two decimals.
pub fn total_cost(history: &[QaAttempt], catalog: &CostCatalog) -> f64 {
    let total: f64 = history
        .iter()
        .flat_map(|attempt| attempt.package.iter())
        .flat_map(|technique| technique.label().split('+'))
        .map(|token| catalog.unit_cost(token))
        .sum();
    (total * 100.0).round() / 100.0
}
