//! Cleaning pass: writes normalized copies of text columns back to the store
//!
//! For every listed column present in a worksheet, a `cleaned_<column>`
//! column is added holding the normalized tokens joined by single spaces.
//! The insight extractor prefers these columns over the raw text.

use tracing::info;
use tracing::warn;

use crate::config::CleaningTarget;
use crate::insights::sources::cleaned_column;
use crate::models::CellValue;
use crate::store::TableStore;
use crate::text::TextNormalizer;
use crate::Result;

/// Spreadsheet exports sometimes carry an index column named like this
const UNNAMED_COLUMN_PREFIX: &str = "Unnamed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleaningOutcome {
    /// Worksheet empty or absent; nothing written
    Skipped,
    Cleaned {
        rows: usize,
        cleaned: Vec<String>,
        missing: Vec<String>,
    },
}

pub async fn clean_and_update_table<S>(
    store: &S,
    normalizer: &TextNormalizer,
    spreadsheet: &str,
    worksheet: &str,
    text_columns: &[String],
    stem: bool,
) -> Result<CleaningOutcome>
where
    S: TableStore + ?Sized,
{
    info!("Cleaning data for worksheet '{}' in spreadsheet '{}'", worksheet, spreadsheet);
    let mut table = store.read_table(spreadsheet, worksheet).await?;

    if table.is_empty() {
        warn!("Worksheet '{}' is empty or missing. Skipping cleaning.", worksheet);
        return Ok(CleaningOutcome::Skipped);
    }

    table.drop_columns_where(|c| c.starts_with(UNNAMED_COLUMN_PREFIX));

    let mut cleaned = Vec::new();
    let mut missing = Vec::new();
    for column in text_columns {
        if !table.has_column(column) {
            warn!("Column '{}' not found in '{}'. Skipping.", column, worksheet);
            missing.push(column.clone());
            continue;
        }
        info!("  - Cleaning column: '{}'", column);
        let values: Vec<CellValue> = table
            .rows
            .iter()
            .map(|row| {
                let tokens = row
                    .get(column)
                    .map(|v| normalizer.normalize_value(v, stem))
                    .unwrap_or_default();
                CellValue::Text(tokens.join(" "))
            })
            .collect();
        let target = cleaned_column(column);
        table.set_column(&target, values);
        cleaned.push(target);
    }

    store.write_table(spreadsheet, worksheet, &table).await?;
    info!("Successfully cleaned and updated worksheet '{}'", worksheet);

    Ok(CleaningOutcome::Cleaned {
        rows: table.len(),
        cleaned,
        missing,
    })
}

/// Run the cleaning pass over every target, continuing past failures
pub async fn clean_all<S>(
    store: &S,
    normalizer: &TextNormalizer,
    spreadsheet: &str,
    targets: &[CleaningTarget],
    stem: bool,
) -> Vec<(String, Result<CleaningOutcome>)>
where
    S: TableStore + ?Sized,
{
    let mut results = Vec::with_capacity(targets.len());
    for target in targets {
        let outcome = clean_and_update_table(
            store,
            normalizer,
            spreadsheet,
            &target.worksheet,
            &target.columns,
            stem,
        )
        .await;
        if let Err(e) = &outcome {
            warn!("Cleaning '{}' failed: {}", target.worksheet, e);
        }
        results.push((target.worksheet.clone(), outcome));
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordTable;
    use crate::store::MemoryTableStore;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_adds_cleaned_columns() {
        let table = RecordTable::from_rows(
            &["Unnamed: 0", "title", "selftext"],
            vec![
                vec![CellValue::from(0_i64), "Running shoes for trails".into(), CellValue::Empty],
                vec![CellValue::from(1_i64), CellValue::from(7_i64), "Budget pick #deal".into()],
            ],
        );
        let store = MemoryTableStore::new().with_table("Data", "Reddit", table);
        let normalizer = TextNormalizer::default();

        let outcome = clean_and_update_table(
            &store,
            &normalizer,
            "Data",
            "Reddit",
            &columns(&["title", "selftext", "flair"]),
            true,
        )
        .await
        .unwrap();

        assert_eq!(
            outcome,
            CleaningOutcome::Cleaned {
                rows: 2,
                cleaned: columns(&["cleaned_title", "cleaned_selftext"]),
                missing: columns(&["flair"]),
            }
        );

        let updated = store.read_table("Data", "Reddit").await.unwrap();
        assert_eq!(
            updated.columns,
            columns(&["title", "selftext", "cleaned_title", "cleaned_selftext"])
        );
        assert_eq!(updated.rows[0]["cleaned_title"], CellValue::from("run shoe trail"));
        assert_eq!(updated.rows[1]["cleaned_title"], CellValue::from(""));
        assert_eq!(updated.rows[1]["cleaned_selftext"], CellValue::from("budget pick deal"));
    }

    #[tokio::test]
    async fn test_empty_worksheet_skipped() {
        let store = MemoryTableStore::new();
        let normalizer = TextNormalizer::default();
        let outcome =
            clean_and_update_table(&store, &normalizer, "Data", "Nothing", &columns(&["x"]), false)
                .await
                .unwrap();
        assert_eq!(outcome, CleaningOutcome::Skipped);
        assert_eq!(store.worksheet_count().await, 0);
    }
}
