//! Integration tests for the analyze command (CLI)

use tempfile::TempDir;

use crate::helpers::{fixture, run_slotdelta};

const SINGLE_TOUCH_WARNING: &str = "slot coordinates on FINGER/DOUBLETAP change may be incorrect";

/// Run `slotdelta analyze` with no config file present.
fn analyze(args: &[&str]) -> (String, String, i32) {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    let mut full = vec!["analyze"];
    full.extend_from_slice(args);
    run_slotdelta(&full, &config)
}

fn frame_lines(stdout: &str) -> Vec<&str> {
    stdout.lines().filter(|l| l.contains("ms ")).collect()
}

// ============================================================================
// Frame Output Tests
// ============================================================================

#[test]
fn two_slot_trace_prints_one_line_per_frame() {
    let (stdout, stderr, exit_code) = analyze(&[&fixture("two_slots.yml")]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            " 0.000000    +0ms     .     +++++++      |  ************** ",
            " 0.010000   +10ms     . →→  +10/  +0     |  ************** ",
            " 0.020000   +10ms     .     -------      |  ************** ",
        ]
    );
}

#[test]
fn untouched_slot_stays_idle_in_every_frame() {
    let (stdout, _stderr, exit_code) = analyze(&[&fixture("two_slots.yml")]);

    assert_eq!(exit_code, 0);
    for line in stdout.lines() {
        let columns: Vec<&str> = line.split(" | ").collect();
        assert_eq!(columns.len(), 2, "line: {:?}", line);
        assert_eq!(columns[1].trim(), "*".repeat(14));
    }
}

#[test]
fn show_distance_widens_columns() {
    let (stdout, _stderr, exit_code) =
        analyze(&[&fixture("two_slots.yml"), "--show-distance"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("dist: (10.0/0.0, 10.0)"), "{}", stdout);
    assert!(stdout.contains(&"*".repeat(33)));
}

#[test]
fn absolute_mode_prints_positions() {
    let (stdout, _stderr, exit_code) =
        analyze(&[&fixture("two_slots.yml"), "--use-absolute"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("→→  110/ 100"), "{}", stdout);
}

#[test]
fn millimeters_use_device_resolution() {
    let (stdout, _stderr, exit_code) = analyze(&[&fixture("two_slots.yml"), "--use-mm"]);

    assert_eq!(exit_code, 0);
    // 10 units at 12 units/mm
    assert!(stdout.contains("→→ +0.83/+0.00"), "{}", stdout);
}

#[test]
fn always_color_emits_escape_sequences() {
    let (stdout, _stderr, exit_code) =
        analyze(&[&fixture("two_slots.yml"), "--color", "always"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("\x1b[0m"));
}

// ============================================================================
// Filtering Tests
// ============================================================================

#[test]
fn ignore_below_collapses_small_deltas_into_status_line() {
    let (stdout, _stderr, exit_code) =
        analyze(&[&fixture("jitter.yml"), "--ignore-below", "5"]);

    assert_eq!(exit_code, 0);
    assert_eq!(frame_lines(&stdout).len(), 3, "{}", stdout);
    assert!(stdout.contains("... 1 below threshold"));
    assert!(stdout.contains("... 3 below threshold"));
    assert!(!stdout.contains("... 4 below threshold"));
    assert!(stdout.contains("+40/  +0"));
}

#[test]
fn ignore_below_never_adds_lines() {
    let (all, _, _) = analyze(&[&fixture("jitter.yml")]);
    let (some, _, _) = analyze(&[&fixture("jitter.yml"), "--ignore-below", "1.5"]);
    let (few, _, _) = analyze(&[&fixture("jitter.yml"), "--ignore-below", "5"]);

    assert_eq!(frame_lines(&all).len(), 6);
    assert_eq!(frame_lines(&some).len(), 4);
    assert_eq!(frame_lines(&few).len(), 3);
    assert!(!all.contains("below threshold"));
}

#[test]
fn ignore_below_above_every_delta_keeps_only_markers() {
    let (stdout, _stderr, exit_code) =
        analyze(&[&fixture("jitter.yml"), "--ignore-below", "100"]);

    assert_eq!(exit_code, 0);
    let lines = frame_lines(&stdout);
    assert_eq!(lines.len(), 2, "{}", stdout);
    assert!(lines[0].contains("+++++++"));
    assert!(lines[1].contains("-------"));
    assert!(lines.iter().all(|l| !l.contains('/')));
    assert!(stdout.contains("... 4 below threshold"));
    assert!(!stdout.contains("... 5 below threshold"));
}

#[test]
fn config_file_supplies_filter_defaults() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "[filter]\nignore_below = 5.0\n").unwrap();

    let (stdout, _stderr, exit_code) =
        run_slotdelta(&["analyze", &fixture("jitter.yml")], &config);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("... 3 below threshold"));
}

// ============================================================================
// Single-Touch Fallback Tests
// ============================================================================

#[test]
fn device_without_slots_falls_back_to_single_touch() {
    let (stdout, stderr, exit_code) = analyze(&[&fixture("single_touch.yml")]);

    assert_eq!(exit_code, 0, "stderr: {}", stderr);
    assert_eq!(stderr.matches(SINGLE_TOUCH_WARNING).count(), 1);
    assert!(stdout.contains("+++++++"));
    assert!(stdout.contains("TOU"));
    assert!(!stdout.contains(" | "));
}

#[test]
fn use_st_flag_warns_once() {
    let (_stdout, stderr, exit_code) = analyze(&[&fixture("two_slots.yml"), "--use-st"]);

    assert_eq!(exit_code, 0);
    assert_eq!(stderr.matches(SINGLE_TOUCH_WARNING).count(), 1);
}

#[test]
fn multitouch_device_does_not_warn() {
    let (_stdout, stderr, _exit_code) = analyze(&[&fixture("two_slots.yml")]);
    assert!(!stderr.contains(SINGLE_TOUCH_WARNING));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn mm_without_resolution_fails_before_output() {
    let (stdout, stderr, exit_code) = analyze(&[&fixture("no_resolution.yml"), "--use-mm"]);

    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("cannot use mm"), "{}", stderr);
}

#[test]
fn missing_recording_reports_path() {
    let (stdout, stderr, exit_code) = analyze(&["/nonexistent/trace.yml"]);

    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Failed to open file"));
    assert!(stderr.contains("trace.yml"));
}

#[test]
fn device_index_out_of_range_fails() {
    let (_stdout, stderr, exit_code) =
        analyze(&[&fixture("two_slots.yml"), "--device", "3"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Device 3 not found"));
}

#[test]
fn analyze_without_recording_is_usage_error() {
    let (_stdout, stderr, exit_code) = analyze(&[]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("<RECORDING>"));
}
