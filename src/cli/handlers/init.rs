//! Database initialization handler

use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::cli::output::print_warning;
use crate::config::StoreBackend;
use crate::store::PgTableStore;
use crate::AppConfig;
use crate::Result;

/// Handle database initialization command
pub async fn handle_init_command(config: &AppConfig, force: bool) -> Result<()> {
    if config.store.backend != StoreBackend::Postgres {
        print_info("JSON store needs no initialization; worksheets are created on first write.");
        return Ok(());
    }
    if !force {
        print_warning("This will create the worksheet table in PostgreSQL.");
        print_warning("This operation is safe - it uses CREATE TABLE IF NOT EXISTS.");
        println!("\nUse --force to proceed.");
        return Ok(());
    }

    print_info("🗄️  Initializing worksheet store...");
    let store = PgTableStore::from_config(config).await?;
    store.init_schema().await?;
    print_success("Worksheet table ready");
    Ok(())
}
