use anyhow::Result;

use crate::cli_args::{CliArgs, ProducerConsumerArgs};

pub fn producer_consumer(_top_args: &CliArgs, pc_args: &ProducerConsumerArgs) -> Result<()> {
    let config = super::resolve_config(&pc_args.settings)?;
    let report = sync_patterns::run_producer_consumer(&config, pc_args.backend.into())?;

    log::info!(
        "Done: {} produced, {} consumed, {} still queued (peak {} of {})",
        report.total_produced(),
        report.total_consumed(),
        report.pending_at_end,
        report.peak_len,
        report.usable_capacity
    );
    Ok(())
}
