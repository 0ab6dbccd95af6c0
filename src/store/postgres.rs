//! PostgreSQL-backed worksheet store
//!
//! Each worksheet is one database row holding its ordered column names and
//! its records as JSONB.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::error;
use tracing::info;
use tracing::warn;

use super::TableStore;
use crate::models::RawRecord;
use crate::models::RecordTable;
use crate::Result;

#[derive(Debug, Clone)]
pub struct PgTableStore {
    pool: PgPool,
    retries: u32,
    retry_delay: Duration,
}

impl PgTableStore {
    #[must_use]
    pub fn new(pool: PgPool, retries: u32, retry_delay: Duration) -> Self {
        Self {
            pool,
            retries: retries.max(1),
            retry_delay,
        }
    }

    /// Create a new store from configuration
    pub async fn from_config(config: &crate::config::AppConfig) -> Result<Self> {
        let pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .min_connections(config.database.min_connections)
            .acquire_timeout(Duration::from_secs(config.database.connection_timeout));

        let pool = pool_options.connect(&config.database.url).await?;

        info!(
            "Database pool configured: max_connections={}, min_connections={}",
            config.database.max_connections, config.database.min_connections
        );

        Ok(Self::new(
            pool,
            config.store.retries,
            Duration::from_secs(config.store.retry_delay_secs),
        ))
    }

    /// Get a reference to the database pool for raw queries
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Initialize database schema
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS worksheets (
                spreadsheet TEXT NOT NULL,
                worksheet TEXT NOT NULL,
                column_names JSONB NOT NULL,
                row_data JSONB NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (spreadsheet, worksheet)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        info!("Worksheet schema initialized");
        Ok(())
    }

    async fn with_retry<T, F, Fut>(&self, operation: &str, worksheet: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, sqlx::Error>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.retries && is_transient(&e) => {
                    warn!(
                        "Database error during {} (attempt {}/{}): {}. Retrying in {}s...",
                        operation,
                        attempt,
                        self.retries,
                        e,
                        self.retry_delay.as_secs()
                    );
                    tokio::time::sleep(self.retry_delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!(
                        "{} failed for '{}' after {} attempt(s): {}",
                        operation, worksheet, attempt, e
                    );
                    return Err(e.into());
                }
            }
        }
    }
}

fn is_transient(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::Tls(_)
    )
}

#[async_trait]
impl TableStore for PgTableStore {
    async fn read_table(&self, spreadsheet: &str, worksheet: &str) -> Result<RecordTable> {
        let row = self
            .with_retry("read_table", worksheet, || {
                sqlx::query_as::<_, (Json<Vec<String>>, Json<Vec<RawRecord>>)>(
                    "SELECT column_names, row_data FROM worksheets WHERE spreadsheet = $1 AND worksheet = $2",
                )
                .bind(spreadsheet)
                .bind(worksheet)
                .fetch_optional(&self.pool)
            })
            .await?;

        match row {
            Some((Json(columns), Json(rows))) => Ok(RecordTable { columns, rows }),
            None => {
                warn!("Worksheet '{}' not found in '{}'", worksheet, spreadsheet);
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
        self.with_retry("write_table", worksheet, || {
            sqlx::query(
                r"
                INSERT INTO worksheets (spreadsheet, worksheet, column_names, row_data, updated_at)
                VALUES ($1, $2, $3, $4, NOW())
                ON CONFLICT (spreadsheet, worksheet)
                DO UPDATE SET
                    column_names = EXCLUDED.column_names,
                    row_data = EXCLUDED.row_data,
                    updated_at = EXCLUDED.updated_at
                ",
            )
            .bind(spreadsheet)
            .bind(worksheet)
            .bind(Json(table.columns.clone()))
            .bind(Json(table.rows.clone()))
            .execute(&self.pool)
        })
        .await?;

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

    #[test]
    fn test_transient_errors() {
        assert!(is_transient(&sqlx::Error::PoolTimedOut));
        assert!(is_transient(&sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "reset"
        ))));
        assert!(!is_transient(&sqlx::Error::RowNotFound));
        assert!(!is_transient(&sqlx::Error::ColumnNotFound("rows".to_string())));
    }
}
