//! The process-wide facade. Kept in its own test binary because it reads and
//! writes process environment variables.

use logforge_core::config::{ENV_CONSOLE_LEVEL, ENV_FILE_LEVEL, ENV_LOG_DIR, ENV_SINGLE_FILE};
use logforge_core::{LogForge, Severity};
use std::sync::Barrier;
use std::thread;
use tempfile::TempDir;

#[test]
fn test_process_wide_instance() {
    let temp_dir = TempDir::new().unwrap();
    std::env::set_var(ENV_LOG_DIR, temp_dir.path());
    std::env::set_var(ENV_CONSOLE_LEVEL, "ERROR");
    std::env::set_var(ENV_FILE_LEVEL, "not-a-level");
    std::env::remove_var(ENV_SINGLE_FILE);

    assert!(LogForge::global().is_none());

    let barrier = Barrier::new(4);
    let addresses: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    let name = format!("worker-{}", i);
                    let forge =
                        LogForge::get_instance(Some(name.as_str()), Severity::Debug, Severity::Info)
                            .unwrap();
                    forge as *const LogForge as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));

    let forge =
        LogForge::get_instance(Some("late"), Severity::Critical, Severity::Critical).unwrap();
    assert!(forge.name().starts_with("worker-"));
    assert_eq!(forge as *const LogForge as usize, addresses[0]);

    // Console from the environment, file default kept over the invalid value.
    let summaries = forge.handler_summaries();
    assert_eq!(summaries[0].threshold, Severity::Error);
    assert_eq!(summaries.len(), 5);
    assert_eq!(summaries[1].threshold, Severity::Info);

    // The rejected LOG_FILE_LEVEL was reported once, at WARNING.
    forge.warning("to file only");
    let warnings = std::fs::read_to_string(temp_dir.path().join("warning.log")).unwrap();
    let warnings: Vec<&str> = warnings.lines().collect();
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("ignoring LOG_FILE_LEVEL=\"not-a-level\""));
    assert!(warnings[1].ends_with("WARNING - to file only"));

    // Explicit reconfiguration with new defaults and single-file mode.
    std::env::set_var(ENV_SINGLE_FILE, "true");
    std::env::remove_var(ENV_FILE_LEVEL);
    forge.reconfigure(Severity::Warning, Severity::Error).unwrap();

    let summaries = forge.handler_summaries();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].threshold, Severity::Error);
    assert_eq!(summaries[1].threshold, Severity::Error);
    assert!(summaries[1].sink.ends_with("app.log"));
    assert!(std::ptr::eq(LogForge::global().unwrap(), forge));
}
