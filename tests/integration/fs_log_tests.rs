//! The monitor writing through the real filesystem adapter.

use std::path::PathBuf;

use bowlwatch::adapters::fs_storage::FsLogStorage;
use bowlwatch::app::service::{BowlMonitor, MonitorPorts, StepOutcome};
use bowlwatch::config::MonitorConfig;
use bowlwatch::sample::{CSV_HEADER, DateTime};

use crate::mock_hw::{MockDelay, MockRtc, MockSensors, RecordingSink, RecordingStrip, SimClock};

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("bowlwatch-it-{}-{}", tag, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn new_log_file_follows_existing_ones_and_persists_on_flush() {
    let dir = scratch_dir("seq");
    for i in 0..6 {
        std::fs::write(dir.join(format!("LOGGER{i:02}.CSV")), "old\r\n").unwrap();
    }

    let clock = SimClock::starting_at(0);
    let ports = MonitorPorts {
        sensors: MockSensors::default(),
        time: clock.clone(),
        clock: MockRtc::at(DateTime {
            year: 2025,
            month: 12,
            day: 31,
            hour: 23,
            minute: 59,
            second: 59,
        }),
        storage: FsLogStorage::new(&dir),
        strip: RecordingStrip::default(),
        delay: MockDelay::new(clock.clone()),
        sink: RecordingSink::default(),
    };
    let mut monitor = BowlMonitor::start(MonitorConfig::default(), ports).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(monitor.data_log().name().map(|n| n.as_str()), Some("LOGGER06.CSV"));

    clock.set(600_000);
    assert_eq!(monitor.step(), StepOutcome::Logged { flushed: true });

    let written = std::fs::read_to_string(dir.join("LOGGER06.CSV")).unwrap();
    assert_eq!(
        written,
        format!("{CSV_HEADER}\r\n600000,1767225599,2025/12/31 23:59:59,21.50,40.00,2000\r\n")
    );
    // Older files are untouched.
    assert_eq!(std::fs::read_to_string(dir.join("LOGGER00.CSV")).unwrap(), "old\r\n");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_directory_means_no_log() {
    let dir = std::env::temp_dir().join(format!("bowlwatch-it-absent-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let clock = SimClock::starting_at(0);
    let ports = MonitorPorts {
        sensors: MockSensors::default(),
        time: clock.clone(),
        clock: MockRtc::absent(),
        storage: FsLogStorage::new(&dir),
        strip: RecordingStrip::default(),
        delay: MockDelay::new(clock.clone()),
        sink: RecordingSink::default(),
    };
    let mut monitor = BowlMonitor::start(MonitorConfig::default(), ports).unwrap_or_else(|e| panic!("{e}"));
    assert!(!monitor.data_log().is_ready());

    clock.set(600_000);
    assert_eq!(monitor.step(), StepOutcome::Logged { flushed: true });
    assert!(!dir.exists());
}
