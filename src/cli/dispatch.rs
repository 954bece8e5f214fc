//! The option dispatch loop.
//!
//! Pulls outcomes from [`Getopt`] one at a time and maps each recognized
//! flag to its message. Help ends the run successfully; any rejected token
//! ends it with status 1.

use std::ffi::{OsStr, OsString};
use std::fmt::Display;
use std::io::Write;

use colored::Colorize;

use crate::error::{ExitCode, OptError, Result};
use crate::getopt::{Getopt, OptionTable, ParseOutcome, ParsedOption};
use crate::output::{self, Console};
use crate::storage::ResolvedConfig;

/// Printed on stdout after `-?` is rejected.
pub const HELP_HINT: &str = "Did you mean `--help' ?";

/// Printed when the options run out, if the variant announces it.
pub const EXIT_LINE: &str = "exit 0";

/// Runs one command line against the configured option table.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    program: String,
    table: OptionTable,
    banner: bool,
    announce_exit: bool,
    color: bool,
}

impl Dispatcher {
    /// Dispatcher for `program` (used as the diagnostic prefix).
    #[must_use]
    pub fn new(program: impl Into<String>, config: &ResolvedConfig) -> Self {
        Self {
            program: program.into(),
            table: config.option_table(),
            banner: config.banner,
            announce_exit: config.announce_exit,
            color: false,
        }
    }

    /// Color diagnostics written to stderr.
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Parse `args` and act on every option until help, an error, or the end.
    ///
    /// Messages go to `console`, getopt-style diagnostics to `stderr`.
    ///
    /// # Errors
    ///
    /// Only I/O failures on the output streams are returned as errors;
    /// usage and conversion problems are reported and become
    /// [`ExitCode::Failure`].
    pub fn run<C, E, I, S>(&self, args: I, console: &mut C, stderr: &mut E) -> Result<ExitCode>
    where
        C: Console + ?Sized,
        E: Write + ?Sized,
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        if self.banner {
            let banner = format!("{} characters API", console.mode());
            console.write_line(&banner)?;
        }

        let mut opts = Getopt::new(&self.table, args);
        loop {
            match opts.next_outcome() {
                ParseOutcome::Recognized(option) => {
                    tracing::debug!(flag = %option.flag, "option recognized");
                    if let Some(code) = self.apply(&option, console, stderr)? {
                        console.flush()?;
                        return Ok(code);
                    }
                }
                ParseOutcome::Rejected(err) => {
                    tracing::debug!(code = err.code(), error = %err, "option rejected");
                    console.flush()?;
                    self.report(&err, stderr)?;
                    if err.is_question_mark() {
                        console.write_line(HELP_HINT)?;
                        console.flush()?;
                    }
                    return Ok(ExitCode::Failure);
                }
                ParseOutcome::End => break,
            }
        }

        if !opts.operands().is_empty() {
            tracing::debug!(operands = ?opts.operands(), "ignoring operands");
        }
        if self.announce_exit {
            console.write_line(EXIT_LINE)?;
        }
        console.flush()?;
        Ok(ExitCode::Success)
    }

    /// Act on one option. `Some(code)` ends the run.
    fn apply<C, E>(
        &self,
        option: &ParsedOption,
        console: &mut C,
        stderr: &mut E,
    ) -> Result<Option<ExitCode>>
    where
        C: Console + ?Sized,
        E: Write + ?Sized,
    {
        match option.flag {
            'h' => {
                console.write_line(&self.table.summary())?;
                Ok(Some(ExitCode::Success))
            }
            'f' => {
                console.write_line("foo")?;
                Ok(None)
            }
            'b' => {
                console.write_line("bar")?;
                Ok(None)
            }
            'i' => {
                let value = option.argument().unwrap_or_else(|| OsStr::new(""));
                match output::print_wide_line(console, "input: ", value) {
                    Ok(()) => Ok(None),
                    Err(OptError::Conversion(err)) => {
                        tracing::warn!(error = %err, "input argument not printable");
                        self.report(&err, stderr)?;
                        Ok(Some(ExitCode::Failure))
                    }
                    Err(err) => Err(err),
                }
            }
            other => {
                // Registered in the table but not handled here.
                writeln!(
                    stderr,
                    "error: getopt returned unknown code: 0x{:x}",
                    u32::from(other)
                )?;
                Ok(Some(ExitCode::Failure))
            }
        }
    }

    fn report<E: Write + ?Sized>(&self, message: &dyn Display, stderr: &mut E) -> Result<()> {
        write_diagnostic(stderr, &self.program, message, self.color)
    }
}

/// Write `<program>: <message>` to `stderr`.
///
/// # Errors
///
/// Returns an I/O error if `stderr` cannot be written.
pub fn write_diagnostic<E: Write + ?Sized>(
    stderr: &mut E,
    program: &str,
    message: &dyn Display,
    color: bool,
) -> Result<()> {
    if color {
        writeln!(
            stderr,
            "{}: {}",
            program.bold(),
            message.to_string().red()
        )?;
    } else {
        writeln!(stderr, "{program}: {message}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{TextMode, WriterConsole, to_wide};
    use crate::storage::Variant;
    use crate::test_utils::{ConsoleEvent, RecordingConsole};
    use tracing_test::traced_test;

    struct Run {
        code: ExitCode,
        stdout: String,
        stderr: String,
    }

    fn config(variant: Variant) -> ResolvedConfig {
        ResolvedConfig {
            variant,
            announce_exit: variant.announces_exit(),
            ..ResolvedConfig::default()
        }
    }

    fn run_with(config: &ResolvedConfig, args: &[&str]) -> Run {
        let dispatcher = Dispatcher::new("optdemo", config);
        let mut console = WriterConsole::new(Vec::new(), config.text_mode);
        let mut stderr = Vec::new();
        let code = dispatcher
            .run(args.iter().copied(), &mut console, &mut stderr)
            .unwrap();
        Run {
            code,
            stdout: String::from_utf8(console.into_inner()).unwrap(),
            stderr: String::from_utf8(stderr).unwrap(),
        }
    }

    fn run(args: &[&str]) -> Run {
        run_with(&config(Variant::Classic), args)
    }

    #[test]
    fn single_flags_print_their_message() {
        for (arg, expected) in [("-f", "foo\n"), ("-b", "bar\n"), ("--foo", "foo\n")] {
            let result = run_with(
                &ResolvedConfig {
                    announce_exit: false,
                    ..ResolvedConfig::default()
                },
                &[arg],
            );
            assert_eq!(result.code, ExitCode::Success);
            assert_eq!(result.stdout, expected, "{arg}");
            assert!(result.stderr.is_empty());
        }
    }

    #[test]
    fn classic_variant_announces_exit() {
        let result = run(&["-fb"]);
        assert_eq!(result.code, ExitCode::Success);
        assert_eq!(result.stdout, "foo\nbar\nexit 0\n");
    }

    #[test]
    fn no_arguments_just_exits() {
        let result = run(&[]);
        assert_eq!(result.code, ExitCode::Success);
        assert_eq!(result.stdout, "exit 0\n");
    }

    #[test]
    fn input_is_printed() {
        let result = run(&["-i", "Grüße.txt", "--input=日本"]);
        assert_eq!(result.code, ExitCode::Success);
        assert_eq!(result.stdout, "input: Grüße.txt\ninput: 日本\nexit 0\n");
    }

    #[test]
    fn input_argument_may_start_with_dash() {
        let result = run(&["-i", "-f"]);
        assert_eq!(result.stdout, "input: -f\nexit 0\n");
    }

    #[test]
    fn help_stops_processing() {
        for args in [&["-h", "-f"][..], &["--help", "-f"][..], &["--he"][..]] {
            let result = run(args);
            assert_eq!(result.code, ExitCode::Success);
            assert_eq!(result.stdout, "options: -h -i<file> -f -b\n");
        }
    }

    #[test]
    fn output_before_help_is_kept() {
        let result = run(&["-f", "-h"]);
        assert_eq!(result.stdout, "foo\noptions: -h -i<file> -f -b\n");
    }

    #[test]
    fn unknown_option_fails() {
        let result = run(&["-x", "-f"]);
        assert_eq!(result.code, ExitCode::Failure);
        assert_eq!(result.stdout, "");
        assert_eq!(result.stderr, "optdemo: invalid option -- 'x'\n");
    }

    #[test]
    fn unknown_long_option_fails() {
        let result = run(&["--frobnicate"]);
        assert_eq!(result.code, ExitCode::Failure);
        assert_eq!(result.stderr, "optdemo: unrecognized option '--frobnicate'\n");
    }

    #[test]
    fn missing_argument_fails() {
        let result = run(&["-f", "-i"]);
        assert_eq!(result.code, ExitCode::Failure);
        assert_eq!(result.stdout, "foo\n");
        assert_eq!(
            result.stderr,
            "optdemo: option requires an argument -- 'i'\n"
        );
    }

    #[test]
    fn question_mark_prints_hint_in_classic_variant() {
        let result = run(&["-?"]);
        assert_eq!(result.code, ExitCode::Failure);
        assert_eq!(result.stdout, format!("{HELP_HINT}\n"));
        assert_eq!(result.stderr, "optdemo: invalid option -- '?'\n");
    }

    #[test]
    fn question_mark_is_help_in_alias_variant() {
        let alias = config(Variant::HelpAlias);
        let question = run_with(&alias, &["-?"]);
        let help = run_with(&alias, &["-h"]);
        assert_eq!(question.code, ExitCode::Success);
        assert_eq!(question.stdout, help.stdout);
        assert_eq!(question.stdout, "options: -h -? -i<file> -f -b\n");
    }

    #[test]
    fn alias_variant_does_not_announce_exit() {
        let result = run_with(&config(Variant::HelpAlias), &["-b"]);
        assert_eq!(result.stdout, "bar\n");
    }

    #[test]
    fn banner_reports_native_mode() {
        let narrow = ResolvedConfig {
            banner: true,
            ..ResolvedConfig::default()
        };
        assert_eq!(run_with(&narrow, &[]).stdout, "narrow characters API\nexit 0\n");

        let wide = ResolvedConfig {
            text_mode: TextMode::Wide,
            ..narrow
        };
        assert_eq!(run_with(&wide, &[]).stdout, "wide characters API\nexit 0\n");
    }

    #[test]
    fn wide_console_gets_wide_input_without_switch() {
        let dispatcher = Dispatcher::new("optdemo", &ResolvedConfig::default());
        let mut console = RecordingConsole::new(TextMode::Wide);
        let mut stderr = Vec::new();
        dispatcher
            .run(["-i", "ß"], &mut console, &mut stderr)
            .unwrap();
        assert!(console.mode_switches().is_empty());
        assert_eq!(
            console.events(),
            &[
                ConsoleEvent::Wide(to_wide("input: ß\n")),
                ConsoleEvent::Wide(to_wide("exit 0\n")),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn unconvertible_input_fails() {
        use std::os::unix::ffi::OsStringExt;

        let dispatcher = Dispatcher::new("optdemo", &ResolvedConfig::default());
        let mut console = RecordingConsole::new(TextMode::Narrow);
        let mut stderr = Vec::new();
        let args = vec![
            OsString::from("-f"),
            OsString::from("-i"),
            OsString::from_vec(vec![b'x', 0xff]),
        ];
        let code = dispatcher.run(args, &mut console, &mut stderr).unwrap();

        assert_eq!(code, ExitCode::Failure);
        assert_eq!(console.text(), "foo\n");
        assert_eq!(console.mode(), TextMode::Narrow);
        let stderr = String::from_utf8(stderr).unwrap();
        assert!(stderr.starts_with("optdemo: cannot convert 'x\u{FFFD}'"));
    }

    #[test]
    fn unhandled_table_entry_is_reported() {
        use crate::getopt::OptionSpec;

        let mut dispatcher = Dispatcher::new("optdemo", &ResolvedConfig::default());
        dispatcher.table = OptionTable::new(vec![OptionSpec::flag("zap", 'z')]);
        let mut console = WriterConsole::new(Vec::new(), TextMode::Narrow);
        let mut stderr = Vec::new();
        let code = dispatcher.run(["-z"], &mut console, &mut stderr).unwrap();

        assert_eq!(code, ExitCode::Failure);
        assert_eq!(
            String::from_utf8(stderr).unwrap(),
            "error: getopt returned unknown code: 0x7a\n"
        );
    }

    #[test]
    #[traced_test]
    fn recognized_and_rejected_options_are_logged() {
        run(&["-f", "-x"]);
        assert!(logs_contain("option recognized"));
        assert!(logs_contain("option rejected"));
        assert!(logs_contain("OPTD-P001"));
    }

    #[test]
    fn diagnostics_without_color_are_plain() {
        let mut buf = Vec::new();
        write_diagnostic(&mut buf, "prog", &"boom", false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "prog: boom\n");
    }
}
