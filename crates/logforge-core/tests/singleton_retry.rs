//! A failed first configuration of the process-wide facade. Kept in its own
//! test binary so the instance starts out uninitialized.

use logforge_core::config::{ENV_CONSOLE_LEVEL, ENV_FILE_LEVEL, ENV_LOG_DIR, ENV_SINGLE_FILE};
use logforge_core::{LogForge, LogForgeError, Severity};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_failed_first_configuration_is_retried() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    std::env::set_var(ENV_LOG_DIR, blocker.join("logs"));
    std::env::remove_var(ENV_CONSOLE_LEVEL);
    std::env::remove_var(ENV_FILE_LEVEL);
    std::env::remove_var(ENV_SINGLE_FILE);

    let result = LogForge::get_instance(Some("retry"), Severity::Debug, Severity::Info);
    assert!(matches!(result, Err(LogForgeError::CreateDir { .. })));
    assert!(LogForge::global().is_none());

    let log_dir = temp_dir.path().join("logs");
    std::env::set_var(ENV_LOG_DIR, &log_dir);

    let forge = LogForge::get_instance(Some("retry"), Severity::Debug, Severity::Info).unwrap();
    assert!(LogForge::global().is_some());
    assert_eq!(forge.name(), "retry");

    let before = forge.handler_summaries();
    assert_eq!(before.len(), 5);

    // warning.log exists as a directory, so opening it fails mid-configuration.
    let broken_dir = temp_dir.path().join("broken");
    fs::create_dir_all(broken_dir.join("warning.log")).unwrap();
    let broken = broken_dir.display().to_string();

    let result = forge.configure_with(|key: &str| (key == ENV_LOG_DIR).then(|| broken.clone()));
    assert!(matches!(result, Err(LogForgeError::OpenFile { .. })));
    assert_eq!(forge.handler_summaries(), before);

    forge.warning("still routed");
    let contents = fs::read_to_string(log_dir.join("warning.log")).unwrap();
    assert!(contents.ends_with("retry - WARNING - still routed\n"), "{}", contents);
}
