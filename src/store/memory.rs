use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::TableStore;
use crate::models::RecordTable;
use crate::Result;

/// In-process worksheet store
#[derive(Debug, Default)]
pub struct MemoryTableStore {
    tables: RwLock<HashMap<(String, String), RecordTable>>,
}

impl MemoryTableStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a worksheet without going through the async API
    #[must_use]
    pub fn with_table(mut self, spreadsheet: &str, worksheet: &str, table: RecordTable) -> Self {
        self.tables
            .get_mut()
            .insert((spreadsheet.to_string(), worksheet.to_string()), table);
        self
    }

    pub async fn worksheet_count(&self) -> usize {
        self.tables.read().await.len()
    }
}

#[async_trait]
impl TableStore for MemoryTableStore {
    async fn read_table(&self, spreadsheet: &str, worksheet: &str) -> Result<RecordTable> {
        let tables = self.tables.read().await;
        let key = (spreadsheet.to_string(), worksheet.to_string());
        match tables.get(&key) {
            Some(table) => Ok(table.clone()),
            None => {
                debug!("Worksheet '{}' not found in '{}'", worksheet, spreadsheet);
                Ok(RecordTable::default())
            }
        }
    }

    async fn write_table(
        &self,
        spreadsheet: &str,
        worksheet: &str,
        table: &RecordTable,
    ) -> Result<()> {
        self.tables
            .write()
            .await
            .insert((spreadsheet.to_string(), worksheet.to_string()), table.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;

    #[tokio::test]
    async fn test_missing_worksheet_reads_empty() {
        let store = MemoryTableStore::new();
        let table = store.read_table("sheet", "nope").await.unwrap();
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let store = MemoryTableStore::new();
        let first = RecordTable::from_rows(&["a"], vec![vec![CellValue::from("x")]]);
        let second = RecordTable::from_rows(&["b"], vec![]);
        store.write_table("s", "w", &first).await.unwrap();
        store.write_table("s", "w", &second).await.unwrap();
        assert_eq!(store.read_table("s", "w").await.unwrap(), second);
        assert_eq!(store.worksheet_count().await, 1);
    }
}
