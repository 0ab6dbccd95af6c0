use clap::Parser;
use content_optimizer::cli::*;
use content_optimizer::AppConfig;
use content_optimizer::ContentOptimizer;
use content_optimizer::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_layered(Some(path.as_path()))?,
        None => AppConfig::load()?,
    };

    // Initialize logging
    if cli.verbose {
        content_optimizer::logging::init_logging_with_level("debug")?;
    } else {
        content_optimizer::logging::init_logging_with_config(Some(&config))?;
    }
    info!("Configuration loaded successfully");

    match cli.command {
        // No store connection needed
        Commands::Config => handle_config_command(&config)?,
        Commands::Init { force } => handle_init_command(&config, force).await?,
        command => {
            let optimizer = ContentOptimizer::new(config).await?;
            run_command(&optimizer, command).await?;
        }
    }

    Ok(())
}

async fn run_command(optimizer: &ContentOptimizer, command: Commands) -> Result<()> {
    match command {
        Commands::Import { worksheet, file } => {
            handle_import_command(optimizer, &worksheet, &file).await
        }
        Commands::Clean { no_stem } => handle_clean_command(optimizer, no_stem).await,
        Commands::Insights {
            platform,
            keywords,
            themes,
            no_stem,
            report,
            json,
            notify,
        } => {
            handle_insights_command(
                optimizer,
                InsightsArgs {
                    platform,
                    keywords,
                    themes,
                    no_stem,
                    report,
                    json,
                    notify,
                },
            )
            .await
        }
        Commands::Report {
            dry_run,
            alerts_only,
        } => handle_report_command(optimizer, dry_run, alerts_only).await,
        Commands::Notify { message, channel } => {
            handle_notify_command(optimizer, &message, channel.as_deref()).await
        }
        Commands::Config => handle_config_command(optimizer.config()),
        Commands::Init { force } => handle_init_command(optimizer.config(), force).await,
    }
}
