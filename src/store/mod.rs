//! Worksheet storage
//!
//! A store holds spreadsheets by name, each holding worksheets by name.
//! Worksheets are always read and written whole. Reading a worksheet that
//! does not exist yields an empty table rather than an error.

use async_trait::async_trait;

use crate::models::RecordTable;
use crate::Result;

mod json_file;
mod memory;
mod postgres;

pub use json_file::JsonFileTableStore;
pub use memory::MemoryTableStore;
pub use postgres::PgTableStore;

#[async_trait]
pub trait TableStore: Send + Sync {
    /// Read a whole worksheet
    async fn read_table(&self, spreadsheet: &str, worksheet: &str) -> Result<RecordTable>;

    /// Replace a worksheet's contents, creating it when missing
    async fn write_table(&self, spreadsheet: &str, worksheet: &str, table: &RecordTable)
        -> Result<()>;
}
