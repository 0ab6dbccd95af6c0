//! CLI output formatting utilities

use crate::cleaning::CleaningOutcome;
use crate::insights::ExtractionReport;
use crate::AppConfig;

/// Print the per-worksheet extraction details
pub fn print_extraction_reports(reports: &[ExtractionReport]) {
    println!("📊 Worksheets analyzed: {}", reports.len());
    for report in reports {
        println!(
            "  - {} ({}) | rows: {} | keyword tokens: {} | theme tokens: {} | resampled: {}",
            report.worksheet,
            report.platform,
            report.rows,
            report.keyword_tokens,
            report.theme_tokens,
            report.resampled_rows
        );
        for issue in &report.issues {
            println!("      ⚠️  {issue}");
        }
    }
    println!();
}

/// Print one line per cleaned worksheet
pub fn print_cleaning_outcome(worksheet: &str, outcome: &CleaningOutcome) {
    match outcome {
        CleaningOutcome::Skipped => {
            print_warning(&format!("{worksheet}: empty or missing, skipped"));
        }
        CleaningOutcome::Cleaned {
            rows,
            cleaned,
            missing,
        } => {
            print_success(&format!(
                "{worksheet}: {rows} rows, wrote {}",
                if cleaned.is_empty() {
                    "no columns".to_string()
                } else {
                    cleaned.join(", ")
                }
            ));
            if !missing.is_empty() {
                print_warning(&format!("{worksheet}: missing columns {}", missing.join(", ")));
            }
        }
    }
}

pub fn print_config(config: &AppConfig) {
    let config = config.redacted();
    println!("📋 Content Optimizer Configuration:");
    println!();

    println!("🗄️  Store:");
    println!("  Backend: {:?}", config.store.backend);
    println!("  Spreadsheet: {}", config.store.spreadsheet);
    println!("  JSON dir: {}", config.store.json_dir.display());
    println!(
        "  Retries: {} (delay {}s)",
        config.store.retries, config.store.retry_delay_secs
    );
    println!("  Database URL: {}", config.database.url);
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Backtrace: {}", config.logging.backtrace);
    println!();

    println!("🔎 Insights:");
    println!("  Keywords: {}", config.insights.num_keywords);
    println!("  Themes: {}", config.insights.num_themes);
    println!("  Stemming: {}", config.insights.apply_stemming);
    println!("  Engagement sample: {}", config.insights.engagement_sample_size);
    if !config.insights.extra_stop_words.is_empty() {
        println!("  Extra stop words: {}", config.insights.extra_stop_words.join(", "));
    }
    for source in &config.insights.sources {
        println!("  - {} → {}", source.platform, source.worksheet);
    }
    println!();

    println!("📊 Reports:");
    println!(
        "  Sentiment columns: {} / {}",
        config.reports.columns.label, config.reports.columns.score
    );
    for target in &config.reports.targets {
        println!(
            "  - {} ({}) → {}",
            target.worksheet, target.text_column, target.channel
        );
    }
    for rule in &config.reports.alerts {
        println!(
            "  - alert {}: {} items below {} → {}",
            rule.worksheet, rule.min_count, rule.negative_threshold, rule.channel
        );
    }
    println!();

    println!("🔔 Notifier:");
    println!(
        "  Webhook: {}",
        config.notifier.webhook_url.as_deref().unwrap_or("(disabled)")
    );
    println!(
        "  Channel: {}",
        config.notifier.channel.as_deref().unwrap_or("(webhook default)")
    );
}

pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("❌ {msg}");
}
