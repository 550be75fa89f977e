//! Unit-cost catalog for QA techniques.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from QA technique name to unit cost.
///
/// Loaded externally and read-only to the decision core. Names are
/// trimmed on insert and lookup; unknown names price at zero rather than
/// erroring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostCatalog {
    entries: HashMap<String, f64>,
}

impl CostCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one technique's unit cost.
    pub fn insert(&mut self, name: &str, cost: f64) {
        self.entries.insert(name.trim().to_string(), cost);
    }

    /// Unit cost of a technique; zero when the name is not listed.
    pub fn unit_cost(&self, name: &str) -> f64 {
        self.entries.get(name.trim()).copied().unwrap_or(0.0)
    }

    /// Number of listed techniques.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog lists nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over listed techniques and their costs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, cost)| (name.as_str(), *cost))
    }
}
