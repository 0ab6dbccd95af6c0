//! Insight extraction handler

use crate::cli::commands::PlatformArg;
use crate::cli::output::print_extraction_reports;
use crate::cli::output::print_warning;
use crate::ContentOptimizer;
use crate::Result;

pub struct InsightsArgs {
    pub platform: Option<PlatformArg>,
    pub keywords: Option<usize>,
    pub themes: Option<usize>,
    pub no_stem: bool,
    pub report: bool,
    pub json: bool,
    pub notify: bool,
}

pub async fn handle_insights_command(optimizer: &ContentOptimizer, args: InsightsArgs) -> Result<()> {
    let mut request = optimizer.default_request();
    request.platform = args.platform.map(Into::into);
    if let Some(keywords) = args.keywords {
        request.num_keywords = keywords;
    }
    if let Some(themes) = args.themes {
        request.num_themes = themes;
    }
    if args.no_stem {
        request.stem = false;
    }

    let outcome = optimizer.insights(&request).await;

    if args.report {
        print_extraction_reports(&outcome.reports);
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.insight)?);
    } else {
        println!("{}", outcome.insight);
    }

    if args.notify {
        if outcome.insight.is_empty() {
            print_warning("No insights found; notification not sent.");
        } else if !optimizer.notify(&outcome.insight.render(), None).await {
            print_warning("Notification was not delivered (see logs).");
        }
    }
    Ok(())
}
