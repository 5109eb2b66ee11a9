#![cfg(not(loom))]
use std::collections::BTreeMap;

use pretty_assertions::assert_eq;

use sync_patterns::harness::Item;
use sync_patterns::*;

const BACKENDS: [ChannelBackend; 2] = [ChannelBackend::Condvar, ChannelBackend::Semaphore];

fn classic(max_pause_nanos: u64) -> Config {
    ConfigBuilder::default()
        .max_pause_nanos(max_pause_nanos)
        .seed(0x5eed)
        .build()
        .unwrap()
}

/// Every value is seen exactly once, consumers see increasing values, and each producer's items come out in the
/// order it made them.
fn check_channel_report(report: &ChannelReport) {
    let mut everything = report
        .consumed
        .iter()
        .flatten()
        .chain(report.leftover.iter())
        .copied()
        .collect::<Vec<Item>>();

    for consumed in report.consumed.iter() {
        assert!(consumed.windows(2).all(|w| w[0].value < w[1].value));
    }

    everything.sort_by_key(|i| i.value);
    assert_eq!(
        everything.iter().map(|i| i.value).collect::<Vec<_>>(),
        (0..report.total_produced()).collect::<Vec<_>>()
    );

    let mut by_producer = BTreeMap::<_, Vec<u64>>::new();
    for item in everything.iter() {
        by_producer.entry(item.producer).or_default().push(item.value);
    }
    for (producer, values) in by_producer {
        assert_eq!(
            values.len() as u64,
            report.produced[producer.get() as usize - 1]
        );
    }

    assert!(report.peak_len <= report.usable_capacity);
    assert_eq!(report.pending_at_end, report.leftover.len());
}

#[test]
fn classic_scenario_without_pauses() {
    for backend in BACKENDS {
        let report = run_producer_consumer(&classic(0), backend).unwrap();

        assert_eq!(report.produced, vec![25, 25, 25]);
        assert_eq!(report.total_consumed(), 70);
        assert_eq!(report.consumed.iter().map(Vec::len).collect::<Vec<_>>(), vec![35, 35]);
        assert_eq!(report.pending_at_end, 5);
        assert_eq!(report.usable_capacity, 9);
        check_channel_report(&report);
    }
}

#[test]
fn classic_scenario_with_pauses() {
    for backend in BACKENDS {
        let report = run_producer_consumer(&classic(20_000), backend).unwrap();

        assert_eq!(report.total_produced(), 75);
        assert_eq!(report.total_consumed(), 70);
        assert_eq!(report.pending_at_end, 5);
        check_channel_report(&report);
    }
}

#[test]
fn balanced_run_leaves_nothing_behind() {
    let config = ConfigBuilder::default()
        .capacity(3)
        .num_producers(4)
        .production_limit(30)
        .num_consumers(3)
        .consumption_limit(40)
        .max_pause_nanos(5_000)
        .seed(17)
        .build()
        .unwrap();

    for backend in BACKENDS {
        let report = run_producer_consumer(&config, backend).unwrap();
        assert_eq!(report.pending_at_end, 0);
        assert!(report.leftover.is_empty());
        assert!(report.peak_len <= 2);
        check_channel_report(&report);
    }
}

#[test]
fn hazardous_configs_are_rejected_before_running() {
    let starving = ConfigBuilder::default().num_consumers(3).build().unwrap();
    let stalling = ConfigBuilder::default().num_consumers(1).build().unwrap();

    for backend in BACKENDS {
        for config in [&starving, &stalling] {
            let err = run_producer_consumer(config, backend).unwrap_err();
            assert!(err.is_configuration_hazard(), "{err}");
            assert!(!err.is_setup_failure());
        }
    }
}

fn busy_record_config(seed: u64) -> Config {
    ConfigBuilder::default()
        .num_writers(4)
        .write_actions(40)
        .num_readers(4)
        .read_actions(10_000)
        .max_pause_nanos(100_000)
        .seed(seed)
        .build()
        .unwrap()
}

#[test]
fn synchronized_records_never_tear() {
    for variant in [RecordVariant::Lock, RecordVariant::Semaphore] {
        let report = run_readers_writers(&busy_record_config(1), variant).unwrap();

        assert!(report.synchronized);
        assert_eq!(report.writes, vec![40, 40, 40, 40]);
        assert_eq!(report.inconsistent_reads(), 0);
        assert_eq!(report.stats.exclusion_violations, 0);
        assert!(report
            .observations
            .iter()
            .flatten()
            .all(|o| matches!(o, Observation::Consistent(0..=4))));
    }
}

#[test]
fn classic_record_run() {
    for variant in [RecordVariant::Lock, RecordVariant::Semaphore] {
        let report = run_readers_writers(&classic(20_000), variant).unwrap();
        assert_eq!(report.writes, vec![20, 20, 20]);
        assert_eq!(report.observations.len(), 3);
        assert!(report.total_reads() <= 3);
        assert_eq!(report.inconsistent_reads(), 0);
    }
}

/// Any single run may get lucky, but not twenty in a row.
#[test]
fn unsynchronized_record_tears() {
    let torn = (0..20).any(|seed| {
        let report =
            run_readers_writers(&busy_record_config(seed), RecordVariant::Unsynchronized).unwrap();
        assert!(!report.synchronized);
        report.inconsistent_reads() > 0
    });
    assert!(torn);
}
