//! Cleaning pass handler

use crate::cli::output::print_cleaning_outcome;
use crate::cli::output::print_error;
use crate::cli::output::print_info;
use crate::ContentOptimizer;
use crate::OptimizerError;
use crate::Result;

pub async fn handle_clean_command(optimizer: &ContentOptimizer, no_stem: bool) -> Result<()> {
    let stem = optimizer.config().insights.apply_stemming && !no_stem;
    print_info(&format!(
        "Cleaning worksheets in '{}' (stemming: {})",
        optimizer.config().spreadsheet(),
        stem
    ));

    let mut failures = 0;
    for (worksheet, outcome) in optimizer.clean(stem).await {
        match outcome {
            Ok(outcome) => print_cleaning_outcome(&worksheet, &outcome),
            Err(e) => {
                failures += 1;
                print_error(&format!("{worksheet}: {e}"));
            }
        }
    }

    if failures > 0 {
        return Err(OptimizerError::Store(format!(
            "{failures} worksheet(s) could not be cleaned"
        )));
    }
    Ok(())
}
