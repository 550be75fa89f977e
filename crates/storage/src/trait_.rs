//! Storage trait abstraction.

use async_trait::async_trait;
use radqa_core::{CostCatalog, HistoryRow, Thresholds};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog row that cannot be priced; the whole load aborts so a
    /// partial catalog is never handed out
    #[error("malformed catalog row at line {line}: {reason}")]
    MalformedCatalog {
        /// 1-based line number in the catalog file
        line: usize,
        /// What was wrong with the row
        reason: String,
    },
}

/// Storage abstraction for radqa data.
///
/// This trait allows different storage backends to be plugged in.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Load the complexity thresholds; defaults apply when the file is
    /// absent or unreadable.
    async fn load_thresholds(&self) -> Result<Thresholds>;

    /// Persist the complexity thresholds.
    async fn save_thresholds(&mut self, thresholds: &Thresholds) -> Result<()>;

    /// Load the QA cost catalog; an absent catalog is empty, a malformed
    /// one is an error.
    async fn load_catalog(&self) -> Result<CostCatalog>;

    /// Append one completed-session row to the historical record.
    async fn append_history(&mut self, row: &HistoryRow) -> Result<()>;

    /// List all recorded history rows in append order.
    async fn list_history(&self) -> Result<Vec<HistoryRow>>;
}
