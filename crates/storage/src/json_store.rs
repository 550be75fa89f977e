//! File-backed store implementation.
//!
//! Keeps the thresholds and the historical record as pretty-printed JSON
//! files, and reads the externally maintained cost catalog from a
//! tab-separated table, all under one data directory.

use std::path::{Path, PathBuf};

use radqa_core::{CostCatalog, HistoryRow, Thresholds};
use tokio::fs;
use tracing::warn;

use super::{Result, Storage, StorageError};

/// Catalog column holding the technique name.
const CATALOG_NAME_COL: usize = 0;
/// Catalog column holding the unit cost (11th column of the table).
const CATALOG_COST_COL: usize = 10;

/// File-based storage backend rooted at a data directory.
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Create a store, ensuring the data directory exists.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn thresholds_path(&self) -> PathBuf {
        self.root.join("thresholds.json")
    }

    fn catalog_path(&self) -> PathBuf {
        self.root.join("catalog.tsv")
    }

    fn history_path(&self) -> PathBuf {
        self.root.join("history.json")
    }

    /// Read the full history table; absent file means no rows yet, a
    /// corrupt file is an error so existing records are never clobbered.
    async fn read_history(&self) -> Result<Vec<HistoryRow>> {
        match fs::read_to_string(self.history_path()).await {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait::async_trait]
impl Storage for JsonStore {
    async fn load_thresholds(&self) -> Result<Thresholds> {
        match fs::read_to_string(self.thresholds_path()).await {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(thresholds) => Ok(thresholds),
                Err(e) => {
                    warn!("unreadable thresholds file, using defaults: {e}");
                    Ok(Thresholds::default())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Thresholds::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save_thresholds(&mut self, thresholds: &Thresholds) -> Result<()> {
        let json = serde_json::to_string_pretty(thresholds)?;
        fs::write(self.thresholds_path(), json.as_bytes()).await?;
        Ok(())
    }

    async fn load_catalog(&self) -> Result<CostCatalog> {
        match fs::read_to_string(self.catalog_path()).await {
            Ok(raw) => parse_catalog(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "no cost catalog at {}; all techniques price at 0",
                    self.catalog_path().display()
                );
                Ok(CostCatalog::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn append_history(&mut self, row: &HistoryRow) -> Result<()> {
        let mut rows = self.read_history().await?;
        rows.push(row.clone());
        let json = serde_json::to_string_pretty(&rows)?;
        fs::write(self.history_path(), json.as_bytes()).await?;
        Ok(())
    }

    async fn list_history(&self) -> Result<Vec<HistoryRow>> {
        self.read_history().await
    }
}

/// Parse the tab-separated catalog table.
///
/// The first line is a header and skipped; blank lines are skipped. Each
/// remaining line must carry a technique name in column 0 and a
/// non-negative cost in column 10 (decimal commas allowed).
fn parse_catalog(raw: &str) -> Result<CostCatalog> {
    let mut catalog = CostCatalog::new();
    for (idx, line) in raw.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let cells: Vec<&str> = line.split('\t').collect();
        let name = cells.get(CATALOG_NAME_COL).map(|c| c.trim()).unwrap_or("");
        let Some(raw_cost) = cells.get(CATALOG_COST_COL) else {
            return Err(StorageError::MalformedCatalog {
                line: idx + 1,
                reason: "missing cost column".to_string(),
            });
        };
        let cost = raw_cost
            .replace(',', ".")
            .trim()
            .parse::<f64>()
            .map_err(|_| StorageError::MalformedCatalog {
                line: idx + 1,
                reason: format!("unparsable cost '{}'", raw_cost.trim()),
            })?;
        if !cost.is_finite() || cost < 0.0 {
            return Err(StorageError::MalformedCatalog {
                line: idx + 1,
                reason: format!("cost {cost} is not a non-negative number"),
            });
        }
        catalog.insert(name, cost);
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use radqa_core::RecordId;

    fn row(patient_id: &str) -> HistoryRow {
        HistoryRow {
            id: RecordId::new(),
            date: chrono::Utc::now(),
            patient_id: patient_id.to_string(),
            patient_name: "DOE JOHN".to_string(),
            sex: "M".to_string(),
            plan_name: "PLAN 01 LUNG VMAT".to_string(),
            region: "LUNG".to_string(),
            technique: "VMAT".to_string(),
            mcs_avg: "0.55".to_string(),
            sas_avg: "0.3".to_string(),
            pmu_avg: "-".to_string(),
            fractions: "5".to_string(),
            mcs_min: "0.45".to_string(),
            sas_max: "0.6".to_string(),
            attempt1_package: "Plancheck + LogFile".to_string(),
            attempt1_outcome: "Successful".to_string(),
            attempt2_package: "-".to_string(),
            attempt2_outcome: "-".to_string(),
            total_cost: 150.0,
        }
    }

    #[tokio::test]
    async fn thresholds_default_when_file_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();
        assert_eq!(store.load_thresholds().await.unwrap(), Thresholds::default());
    }

    #[tokio::test]
    async fn thresholds_default_when_file_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();
        fs::write(store.thresholds_path(), b"{not json").await.unwrap();
        assert_eq!(store.load_thresholds().await.unwrap(), Thresholds::default());

        let custom = Thresholds {
            mcs_min: 0.4,
            sas_max: 0.7,
            fractions: 10,
        };
        store.save_thresholds(&custom).await.unwrap();
        assert_eq!(store.load_thresholds().await.unwrap(), custom);
    }

    #[tokio::test]
    async fn catalog_parses_header_blank_lines_and_commas() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();
        let table = "Name\ta\tb\tc\td\te\tf\tg\th\ti\tCost\n\
                     Plancheck\t\t\t\t\t\t\t\t\t\t100\n\
                     \n\
                     LogFile \t\t\t\t\t\t\t\t\t\t50,5\n";
        fs::write(store.catalog_path(), table).await.unwrap();

        let catalog = store.load_catalog().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.unit_cost("Plancheck"), 100.0);
        assert_eq!(catalog.unit_cost("LogFile"), 50.5);
    }

    #[tokio::test]
    async fn missing_catalog_is_empty_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();
        let catalog = store.load_catalog().await.unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.unit_cost("Plancheck"), 0.0);
    }

    #[tokio::test]
    async fn malformed_catalog_rows_abort_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path()).await.unwrap();

        // short row
        fs::write(store.catalog_path(), "header\nPlancheck\t100\n")
            .await
            .unwrap();
        assert!(matches!(
            store.load_catalog().await.unwrap_err(),
            StorageError::MalformedCatalog { line: 2, .. }
        ));

        // negative cost
        fs::write(
            store.catalog_path(),
            "header\nPlancheck\t\t\t\t\t\t\t\t\t\t-5\n",
        )
        .await
        .unwrap();
        assert!(matches!(
            store.load_catalog().await.unwrap_err(),
            StorageError::MalformedCatalog { line: 2, .. }
        ));
    }

    #[tokio::test]
    async fn history_appends_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();
        assert!(store.list_history().await.unwrap().is_empty());

        store.append_history(&row("1001")).await.unwrap();
        store.append_history(&row("1002")).await.unwrap();

        let rows = store.list_history().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].patient_id, "1001");
        assert_eq!(rows[1].patient_id, "1002");
    }

    #[tokio::test]
    async fn corrupt_history_is_a_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonStore::new(dir.path()).await.unwrap();
        fs::write(store.history_path(), b"[{broken").await.unwrap();
        assert!(matches!(
            store.append_history(&row("1001")).await.unwrap_err(),
            StorageError::Json(_)
        ));
    }
}
