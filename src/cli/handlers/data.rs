//! Worksheet import

use std::path::Path;

use serde_json::Value;

use crate::cli::output::print_success;
use crate::models::CellValue;
use crate::models::RecordTable;
use crate::ContentOptimizer;
use crate::OptimizerError;
use crate::Result;

/// Load a worksheet document from disk and overwrite it in the store
pub async fn handle_import_command(
    optimizer: &ContentOptimizer,
    worksheet: &str,
    file: &Path,
) -> Result<()> {
    let bytes = tokio::fs::read(file).await?;
    let table = parse_table_document(&bytes)?;
    optimizer
        .store()
        .write_table(optimizer.config().spreadsheet(), worksheet, &table)
        .await?;
    print_success(&format!(
        "Imported {} rows ({} columns) into '{}'",
        table.len(),
        table.columns.len(),
        worksheet
    ));
    Ok(())
}

/// Accept either a serialized `RecordTable` or a plain array of records.
///
/// For record arrays, a column is added the first time any record uses it.
pub fn parse_table_document(bytes: &[u8]) -> Result<RecordTable> {
    let value: Value = serde_json::from_slice(bytes)?;
    if value.get("columns").is_some() {
        return Ok(serde_json::from_value(value)?);
    }
    match value {
        Value::Array(records) => {
            let mut table = RecordTable::default();
            for record in records {
                let Value::Object(fields) = record else {
                    return Err(OptimizerError::Config(
                        "record arrays must contain only objects".to_string(),
                    ));
                };
                let mut row = crate::models::RawRecord::new();
                for (column, value) in fields {
                    if !table.has_column(&column) {
                        table.columns.push(column.clone());
                    }
                    row.insert(column, serde_json::from_value::<CellValue>(value)?);
                }
                table.rows.push(row);
            }
            Ok(table)
        }
        _ => Err(OptimizerError::Config(
            "expected {\"columns\": [...], \"rows\": [...]} or an array of records".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_table_document() {
        let table = parse_table_document(
            br#"{"columns": ["title", "score"], "rows": [{"title": "Phone", "score": 3}]}"#,
        )
        .unwrap();
        assert_eq!(table.columns, vec!["title", "score"]);
        assert_eq!(table.rows[0]["score"], CellValue::Number(3.0));
    }

    #[test]
    fn test_parse_record_array() {
        let table = parse_table_document(
            br#"[{"Tweet": "hi #launch", "public_metrics.like_count": 10}, {"Tweet": null}]"#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.has_column("Tweet"));
        assert!(table.has_column("public_metrics.like_count"));
        assert_eq!(table.rows[1]["Tweet"], CellValue::Empty);
    }

    #[test]
    fn test_parse_rejects_scalars() {
        assert!(parse_table_document(b"42").is_err());
        assert!(parse_table_document(b"[1, 2]").is_err());
    }
}
