//! optdemo - getopt-style option parsing demo
//!
//! CLI entry point.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use std::io::{self, Write};
use std::process::ExitCode;

use optdemo::cli::{Dispatcher, program_name, write_diagnostic};
use optdemo::core::logging;
use optdemo::output::WriterConsole;
use optdemo::storage::ResolvedConfig;
use optdemo::util::env;

fn main() -> ExitCode {
    // Initialize logging
    logging::init_from_env();

    let mut args = std::env::args_os();
    let program = program_name(args.next().as_deref());

    let config = match ResolvedConfig::resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(code = e.error_code(), "{}", e);
            let mut stderr = io::stderr().lock();
            let color = env::should_color_stderr(std::env::var_os("NO_COLOR").is_some());
            let _ = write_diagnostic(&mut stderr, &program, &e, color);
            return e.exit_code().into();
        }
    };
    tracing::debug!(stdout_tty = env::stdout_is_tty(), "console ready");

    let dispatcher =
        Dispatcher::new(program.as_str(), &config).with_color(env::should_color_stderr(config.no_color));
    let mut console = WriterConsole::stdout(config.text_mode);
    let mut stderr = io::stderr().lock();

    match dispatcher.run(args, &mut console, &mut stderr) {
        Ok(code) => code.into(),
        Err(e) => {
            tracing::error!(code = e.error_code(), "{}", e);
            let _ = write_diagnostic(&mut stderr, &program, &e, false);
            let _ = stderr.flush();
            e.exit_code().into()
        }
    }
}
