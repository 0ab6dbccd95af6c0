use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::TableStore;
use crate::models::RecordTable;
use crate::Result;

/// Worksheets stored as `<root>/<spreadsheet>/<worksheet>.json`
#[derive(Debug, Clone)]
pub struct JsonFileTableStore {
    root: PathBuf,
}

impl JsonFileTableStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn worksheet_path(&self, spreadsheet: &str, worksheet: &str) -> PathBuf {
        self.root
            .join(sanitize_name(spreadsheet))
            .join(format!("{}.json", sanitize_name(worksheet)))
    }
}

// Worksheet names are free text; keep them inside the store root.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "_".to_string()
    } else {
        cleaned
    }
}

#[async_trait]
impl TableStore for JsonFileTableStore {
    async fn read_table(&self, spreadsheet: &str, worksheet: &str) -> Result<RecordTable> {
        let path = self.worksheet_path(spreadsheet, worksheet);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Worksheet '{}' not found in '{}'", worksheet, spreadsheet);
                return Ok(RecordTable::default());
            }
            Err(e) => return Err(e.into()),
        };
        let table: RecordTable = serde_json::from_slice(&bytes)?;
        debug!("Read {} rows from {}", table.len(), path.display());
        Ok(table)
    }

    async fn write_table(
        &self,
        spreadsheet: &str,
        worksheet: &str,
        table: &RecordTable,
    ) -> Result<()> {
        let path = self.worksheet_path(spreadsheet, worksheet);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(table)?;

        // Write beside the target and rename so readers never see a partial file.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &path).await?;

        info!(
            "Successfully uploaded {} rows to '{}', worksheet '{}'",
            table.len(),
            spreadsheet,
            worksheet
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("YouTube_Product_Content"), "YouTube_Product_Content");
        assert_eq!(sanitize_name("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_name(".."), "_");
        assert_eq!(sanitize_name("  "), "_");
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileTableStore::new(dir.path());
        let table = RecordTable::from_rows(
            &["title", "score"],
            vec![vec![CellValue::from("Phone review"), CellValue::from(12_i64)]],
        );

        store.write_table("Data", "Reddit", &table).await.unwrap();
        assert!(dir.path().join("Data").join("Reddit.json").exists());
        assert_eq!(store.read_table("Data", "Reddit").await.unwrap(), table);
        assert!(store.read_table("Data", "Missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_worksheet_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Data")).unwrap();
        std::fs::write(dir.path().join("Data").join("Bad.json"), b"{not json").unwrap();
        let store = JsonFileTableStore::new(dir.path());
        assert!(store.read_table("Data", "Bad").await.is_err());
    }
}
