use anyhow::Result;

use sync_patterns::RecordReport;

use crate::cli_args::{CliArgs, ReadersWritersArgs};

pub fn readers_writers(_top_args: &CliArgs, rw_args: &ReadersWritersArgs) -> Result<()> {
    let config = super::resolve_config(&rw_args.settings)?;
    let report = sync_patterns::run_readers_writers(&config, rw_args.variant.into())?;

    log::info!(
        "Done: {} writes, {} reads of which {} consistent and {} inconsistent",
        report.writes.iter().sum::<u64>(),
        report.total_reads(),
        report.consistent_reads(),
        report.inconsistent_reads()
    );

    check_guarantee(&report)
}

/// Fail if a record that promised consistent reads produced a torn one.
fn check_guarantee(report: &RecordReport) -> Result<()> {
    if report.synchronized && report.inconsistent_reads() > 0 {
        anyhow::bail!(
            "A synchronized record tore {} times",
            report.inconsistent_reads()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use sync_patterns::record::AccessStats;
    use sync_patterns::Observation;

    fn report(synchronized: bool) -> RecordReport {
        RecordReport {
            synchronized,
            writes: vec![1, 1],
            observations: vec![vec![
                Observation::Consistent(1),
                Observation::classify(2, 1),
            ]],
            stats: AccessStats::default(),
        }
    }

    #[test]
    fn torn_synchronized_record_fails_the_run() {
        let err = check_guarantee(&report(true)).unwrap_err();
        assert_eq!(err.to_string(), "A synchronized record tore 1 times");
    }

    #[test]
    fn torn_unsynchronized_record_is_expected() {
        check_guarantee(&report(false)).unwrap();
    }
}
