//! E2E tests for the optdemo binary.
//!
//! Covers:
//! - Flag messages and clustering
//! - Option arguments, including non-ASCII ones
//! - Help output for both variants
//! - Diagnostics and exit status for rejected options
//! - Banner and `exit 0` announcement settings

use predicates::prelude::*;

mod common;

use common::optdemo_cmd as optdemo;

#[test]
fn no_options_announces_exit() {
    optdemo().assert().success().stdout("exit 0\n").stderr("");
}

#[test]
fn flags_print_in_order() {
    optdemo()
        .args(["-f", "-b", "--foo"])
        .assert()
        .success()
        .stdout("foo\nbar\nfoo\nexit 0\n");
}

#[test]
fn clustered_flags_are_split() {
    optdemo()
        .arg("-bf")
        .assert()
        .success()
        .stdout("bar\nfoo\nexit 0\n");
}

#[test]
fn input_argument_forms() {
    for args in [
        &["-i", "data.txt"][..],
        &["-idata.txt"][..],
        &["--input", "data.txt"][..],
        &["--input=data.txt"][..],
        &["--in=data.txt"][..],
    ] {
        optdemo()
            .args(args)
            .assert()
            .success()
            .stdout("input: data.txt\nexit 0\n");
    }
}

#[test]
fn input_argument_keeps_unicode() {
    optdemo()
        .args(["-i", "файл-日本.txt", "-f"])
        .assert()
        .success()
        .stdout("input: файл-日本.txt\nfoo\nexit 0\n");
}

#[test]
fn dash_leading_argument_is_taken_verbatim() {
    optdemo()
        .args(["-i", "-f"])
        .assert()
        .success()
        .stdout("input: -f\nexit 0\n");
}

#[test]
fn operands_are_skipped() {
    optdemo()
        .args(["one", "-f", "two", "--", "-b"])
        .assert()
        .success()
        .stdout("foo\nexit 0\n");
}

#[test]
fn help_stops_processing() {
    for flag in ["-h", "--help", "--he"] {
        optdemo()
            .args(["-f", flag, "-b"])
            .assert()
            .success()
            .stdout("foo\noptions: -h -i<file> -f -b\n");
    }
}

#[test]
fn unknown_short_option_fails() {
    optdemo()
        .args(["-f", "-x", "-b"])
        .assert()
        .code(1)
        .stdout("foo\n")
        .stderr(predicate::str::contains("invalid option -- 'x'"));
}

#[test]
fn unknown_long_option_fails() {
    optdemo()
        .arg("--verbose")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unrecognized option '--verbose'"));
}

#[test]
fn missing_argument_fails() {
    optdemo()
        .arg("-i")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains(
            "option requires an argument -- 'i'",
        ));

    optdemo()
        .arg("--input")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "option '--input' requires an argument",
        ));
}

#[test]
fn flag_with_value_fails() {
    optdemo()
        .arg("--foo=yes")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "option '--foo' doesn't allow an argument",
        ));
}

#[test]
fn question_mark_gets_a_hint_in_classic_variant() {
    optdemo()
        .arg("-?")
        .assert()
        .code(1)
        .stdout("Did you mean `--help' ?\n")
        .stderr(predicate::str::contains("invalid option -- '?'"));
}

#[test]
fn question_mark_is_help_in_alias_variant() {
    optdemo()
        .env("OPTDEMO_VARIANT", "help-alias")
        .arg("-?")
        .assert()
        .success()
        .stdout("options: -h -? -i<file> -f -b\n");
}

#[test]
fn alias_variant_does_not_announce_exit() {
    optdemo()
        .env("OPTDEMO_VARIANT", "help-alias")
        .arg("-f")
        .assert()
        .success()
        .stdout("foo\n");
}

#[test]
fn banner_names_the_text_mode() {
    optdemo()
        .env("OPTDEMO_BANNER", "1")
        .arg("-b")
        .assert()
        .success()
        .stdout("narrow characters API\nbar\nexit 0\n");

    optdemo()
        .env("OPTDEMO_BANNER", "1")
        .env("OPTDEMO_TEXT_MODE", "wide")
        .args(["-i", "é"])
        .assert()
        .success()
        .stdout("wide characters API\ninput: é\nexit 0\n");
}

#[test]
fn config_file_selects_variant() {
    let dir = optdemo::test_utils::TestDir::new();
    let path = dir.create_file(
        "config.toml",
        "[general]\nvariant = \"help-alias\"\nbanner = true\n",
    );

    optdemo()
        .env("OPTDEMO_CONFIG", &path)
        .arg("-?")
        .assert()
        .success()
        .stdout("narrow characters API\noptions: -h -? -i<file> -f -b\n");
}

#[test]
fn corrupted_config_fails_without_panic() {
    let dir = optdemo::test_utils::TestDir::new();
    let path = dir.create_file("config.toml", "this is not valid toml {{{{");

    optdemo()
        .env("OPTDEMO_CONFIG", &path)
        .arg("-f")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("config parse error").and(predicate::str::contains("panic").not()));
}

#[test]
fn invalid_environment_value_fails() {
    optdemo()
        .env("OPTDEMO_TEXT_MODE", "sideways")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("OPTDEMO_TEXT_MODE"));
}

#[cfg(unix)]
#[test]
fn invalid_unicode_argument_fails() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    optdemo()
        .arg("-i")
        .arg(OsStr::from_bytes(b"bad\xffname"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot convert"));
}

#[test]
fn logs_go_to_stderr_only() {
    optdemo()
        .env("OPTDEMO_LOG", "debug")
        .arg("-f")
        .assert()
        .success()
        .stdout("foo\nexit 0\n")
        .stderr(predicate::str::contains("option recognized"));
}
