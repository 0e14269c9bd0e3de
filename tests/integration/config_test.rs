//! Integration tests for the config command (CLI)

use tempfile::TempDir;

use crate::helpers::run_slotdelta;

#[test]
fn config_path_honors_env_override() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("custom.toml");

    let (stdout, _stderr, exit_code) = run_slotdelta(&["config", "path"], &config);

    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim(), config.display().to_string());
}

#[test]
fn config_show_prints_defaults_without_file() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");

    let (stdout, _stderr, exit_code) = run_slotdelta(&["config", "show"], &config);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[display]"));
    assert!(stdout.contains("color = \"auto\""));
    assert!(stdout.contains("use_mm = false"));
    assert!(!stdout.contains("threshold"));
}

#[test]
fn config_show_reflects_file_values() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "[filter]\nthreshold = 7.5\n").unwrap();

    let (stdout, _stderr, exit_code) = run_slotdelta(&["config", "show"], &config);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("threshold = 7.5"));
}

#[test]
fn malformed_config_is_reported() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "[display\n").unwrap();

    let (_stdout, stderr, exit_code) = run_slotdelta(&["config", "show"], &config);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Failed to parse config file"));
}
