//! Shared helpers for integration tests

use std::path::{Path, PathBuf};
use std::process::Command;

/// Directory holding the libinput-record fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

pub fn fixture(name: &str) -> String {
    fixtures_dir().join(name).to_string_lossy().into_owned()
}

/// Run slotdelta with colors off and an isolated config file location.
///
/// Returns stdout, stderr and the exit code.
pub fn run_slotdelta(args: &[&str], config: &Path) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_slotdelta"))
        .args(args)
        .env("NO_COLOR", "1")
        .env("SLOTDELTA_CONFIG", config)
        .env("SLOTDELTA_LOG", "warn")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute slotdelta");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}
