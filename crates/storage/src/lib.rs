//! Persistence for radqa data.
//!
//! Covers the three externally persisted artifacts: the thresholds
//! configuration, the cost catalog and the historical QA record.

mod trait_;
mod json_store;

pub use trait_::{Result, Storage, StorageError};
pub use json_store::JsonStore;
