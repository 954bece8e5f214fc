//! Environment detection utilities.

use std::io::IsTerminal;

/// Check if stdout is a TTY.
#[must_use]
pub fn stdout_is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Check if stderr is a TTY.
#[must_use]
pub fn stderr_is_tty() -> bool {
    std::io::stderr().is_terminal()
}

/// Check if diagnostics on stderr should be colored.
///
/// `no_color` is the resolved configuration value, which already accounts
/// for `NO_COLOR` and `OPTDEMO_NO_COLOR`.
#[must_use]
pub fn should_color_stderr(no_color: bool) -> bool {
    if no_color {
        return false;
    }

    // Check TERM=dumb
    if std::env::var("TERM").is_ok_and(|t| t == "dumb") {
        return false;
    }

    // Only use color if diagnostics go to a TTY
    stderr_is_tty()
}
