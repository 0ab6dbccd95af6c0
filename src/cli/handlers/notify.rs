use crate::cli::output::print_success;
use crate::cli::output::print_warning;
use crate::ContentOptimizer;
use crate::Result;

pub async fn handle_notify_command(
    optimizer: &ContentOptimizer,
    message: &str,
    channel: Option<&str>,
) -> Result<()> {
    if optimizer.notify(message, channel).await {
        print_success("Notification sent");
    } else {
        print_warning("Notification skipped or failed (see logs)");
    }
    Ok(())
}
