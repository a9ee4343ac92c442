use log::LevelFilter;
use spotwatch_logging::{initialize, sw_info, LogDestination};

#[test]
fn file_destination_writes_to_log_path() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("spotwatch.log");

    assert!(initialize(LogDestination::File, &log_path, LevelFilter::Info));
    sw_info!("job {} connected", "abc");
    log::logger().flush();

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("job abc connected"));

    // A second initialization is refused rather than replacing the logger.
    assert!(!initialize(
        LogDestination::Terminal,
        &log_path,
        LevelFilter::Info
    ));
}
