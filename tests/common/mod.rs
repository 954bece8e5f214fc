//! Common helpers for integration tests.
//!
//! # Modules
//!
//! - `log_capture`: in-memory tracing capture for asserting on log events

#![allow(dead_code)]

pub mod log_capture;

use assert_cmd::Command;

/// Environment variables that change the binary's behavior.
const BEHAVIOR_VARS: &[&str] = &[
    "OPTDEMO_VARIANT",
    "OPTDEMO_BANNER",
    "OPTDEMO_ANNOUNCE_EXIT",
    "OPTDEMO_TEXT_MODE",
    "OPTDEMO_NO_COLOR",
    "OPTDEMO_LOG",
    "OPTDEMO_LOG_FORMAT",
    "OPTDEMO_LOG_FILE",
    "RUST_LOG",
];

/// The `optdemo` binary with a clean environment and no config file.
#[allow(deprecated)]
pub fn optdemo_cmd() -> Command {
    let mut cmd = Command::cargo_bin("optdemo").expect("optdemo binary");
    for key in BEHAVIOR_VARS {
        cmd.env_remove(key);
    }
    cmd.env("OPTDEMO_CONFIG", "/nonexistent/optdemo/config.toml")
        .env("NO_COLOR", "1");
    cmd
}
