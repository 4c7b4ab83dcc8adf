use logforge_core::config::{ENV_FILE_LEVEL, ENV_LOG_DIR, ENV_SINGLE_FILE};
use logforge_core::term::has_ansi;
use logforge_core::{ConsoleTarget, LogForge, SharedBuffer, Severity};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

fn build(console: &SharedBuffer, vars: &[(&str, &str)]) -> LogForge {
    LogForge::builder()
        .name("files")
        .console(ConsoleTarget::Buffer(console.clone()))
        .build_with(env(vars))
        .unwrap()
}

fn lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_per_level_files_receive_their_level_only() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("nested").join("logs");
    let console = SharedBuffer::new();
    let log = build(&console, &[(ENV_LOG_DIR, dir.to_str().unwrap())]);

    log.debug("debug message");
    log.info("info message");
    log.warning("warning message");
    log.error("error message");
    log.critical("critical message");

    assert!(!dir.join("debug.log").exists());
    for (file, level) in [
        ("info.log", "INFO"),
        ("warning.log", "WARNING"),
        ("error.log", "ERROR"),
        ("critical.log", "CRITICAL"),
    ] {
        let content = lines(&dir.join(file));
        assert_eq!(content.len(), 1, "{}: {:?}", file, content);
        assert!(
            content[0].ends_with(&format!("files - {} - {} message", level, level.to_lowercase())),
            "{}",
            content[0]
        );
    }

    assert_eq!(console.lines().len(), 5);
}

#[test]
fn test_critical_does_not_reach_error_file() {
    let temp_dir = TempDir::new().unwrap();
    let console = SharedBuffer::new();
    let log = build(&console, &[(ENV_LOG_DIR, temp_dir.path().to_str().unwrap())]);

    log.critical("only critical");

    assert!(lines(&temp_dir.path().join("error.log")).is_empty());
    assert_eq!(lines(&temp_dir.path().join("critical.log")).len(), 1);
}

#[test]
fn test_single_file_keeps_emission_order() {
    let temp_dir = TempDir::new().unwrap();
    let console = SharedBuffer::new();
    let log = build(
        &console,
        &[
            (ENV_LOG_DIR, temp_dir.path().to_str().unwrap()),
            (ENV_SINGLE_FILE, "true"),
            (ENV_FILE_LEVEL, "WARNING"),
        ],
    );

    log.info("skipped");
    log.critical("first");
    log.warning("second");
    log.error("third");

    let content = lines(&temp_dir.path().join("app.log"));
    assert_eq!(content.len(), 3);
    assert!(content[0].ends_with("CRITICAL - first"));
    assert!(content[1].ends_with("WARNING - second"));
    assert!(content[2].ends_with("ERROR - third"));
    assert!(!temp_dir.path().join("warning.log").exists());
}

#[test]
fn test_files_never_contain_color() {
    let temp_dir = TempDir::new().unwrap();
    let console = SharedBuffer::new();
    let log = build(
        &console,
        &[
            (ENV_LOG_DIR, temp_dir.path().to_str().unwrap()),
            (ENV_SINGLE_FILE, "TRUE"),
        ],
    );

    log.error("\x1b[1;31mred\x1b[0m and \x1b[92mgreen\x1b[0m");
    logforge_core::warning!(log, "{} \x1b[33m{}\x1b[0m", "formatted", 7);

    let content = lines(&temp_dir.path().join("app.log"));
    assert_eq!(content.len(), 2);
    assert!(content.iter().all(|line| !has_ansi(line)));
    assert!(content[0].ends_with("ERROR - red and green"));
    assert!(content[1].ends_with("WARNING - formatted 7"));

    assert!(console.lines().iter().all(|line| has_ansi(line)));
}

#[test]
fn test_configure_twice_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let vars = [(ENV_LOG_DIR, temp_dir.path().to_str().unwrap())];
    let console = SharedBuffer::new();
    let log = build(&console, &vars);

    let first = log.handler_summaries();
    log.configure_with(env(&vars)).unwrap();
    let second = log.handler_summaries();

    assert_eq!(first, second);
    assert_eq!(second.len(), 5);
    assert_eq!(second[0].threshold, Severity::Debug);

    log.info("once");
    assert_eq!(lines(&temp_dir.path().join("info.log")).len(), 1);
}

#[test]
fn test_reconfigure_detaches_old_files() {
    let temp_dir = TempDir::new().unwrap();
    let first_dir = temp_dir.path().join("first");
    let second_dir = temp_dir.path().join("second");
    let console = SharedBuffer::new();
    let log = build(&console, &[(ENV_LOG_DIR, first_dir.to_str().unwrap())]);

    log.info("before");
    log.configure_with(env(&[(ENV_LOG_DIR, second_dir.to_str().unwrap())]))
        .unwrap();
    log.info("after");

    let old = lines(&first_dir.join("info.log"));
    let new = lines(&second_dir.join("info.log"));
    assert_eq!(old.len(), 1);
    assert!(old[0].ends_with("before"));
    assert_eq!(new.len(), 1);
    assert!(new[0].ends_with("after"));
}
