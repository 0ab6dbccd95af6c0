//! Sentiment report and alert handler

use crate::cli::output::print_error;
use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::cli::output::print_warning;
use crate::ContentOptimizer;
use crate::Result;

pub async fn handle_report_command(
    optimizer: &ContentOptimizer,
    dry_run: bool,
    alerts_only: bool,
) -> Result<()> {
    let send = !dry_run;

    if !alerts_only {
        print_info("📊 Generating sentiment reports...");
        for (worksheet, report) in optimizer.sentiment_reports(send).await {
            match report {
                Ok(report) => println!("\n{}", report.render()),
                Err(issue) => print_warning(&format!("{worksheet}: {issue}")),
            }
        }
    }

    print_info("🔎 Checking for sentiment alerts...");
    let alerts = optimizer.sentiment_alerts(send).await;
    if alerts.is_empty() {
        print_success("No critical negative sentiment detected");
    }
    for alert in &alerts {
        println!("\n{}", alert.render());
        if send && !alert.delivered {
            print_error(&format!(
                "Alert for '{}' was not delivered to {} (see logs)",
                alert.worksheet, alert.channel
            ));
        }
    }
    Ok(())
}
