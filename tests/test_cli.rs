use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::tempdir;

const INPUT: &str = r#"time=10:00:01 level=info msg="server started" port=8080
time=10:00:02 level=debug msg=tick
not "logfmt
time=10:00:03 level=error msg="disk full" path=/var
"#;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_logfmt-filter")
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(bin())
        .args(args)
        .env_remove("LOGFMT_FILTER_CONFIG")
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("command should start");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("write stdin");

    let output = child.wait_with_output().expect("command should run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn stdout_of(args: &[&str], input: &str) -> String {
    String::from_utf8(run_with_stdin(args, input).stdout).expect("utf8 stdout")
}

#[test]
fn test_no_arguments_dumps_every_record() {
    let out = stdout_of(&[], INPUT);
    assert_eq!(
        out,
        "time=10:00:01 level=info msg=\"server started\" port=8080\n\
         time=10:00:02 level=debug msg=tick\n\
         time=10:00:03 level=error msg=\"disk full\" path=/var\n"
    );
}

#[test]
fn test_filter_only() {
    let out = stdout_of(&["level!=debug", "msg~disk"], INPUT);
    assert_eq!(out, "time=10:00:03 level=error msg=\"disk full\" path=/var\n");
}

#[test]
fn test_filter_and_template_split_on_pipe() {
    let out = stdout_of(&["level!=debug", "|", "[.time]", ".msg"], INPUT);
    assert_eq!(out, "[10:00:01] server started\n[10:00:03] disk full\n");
}

#[test]
fn test_template_only() {
    let out = stdout_of(&[".level"], INPUT);
    assert_eq!(out, "info\ndebug\nerror\n");
}

#[test]
fn test_presence_filters() {
    let out = stdout_of(&["--filter", "port+", "-t", ".msg"], INPUT);
    assert_eq!(out, "server started\n");

    let out = stdout_of(&["--filter", "port- path-", "-t", ".msg"], INPUT);
    assert_eq!(out, "tick\n");
}

#[test]
fn test_json_output() {
    let out = stdout_of(&["-F", "json", "level=error"], INPUT);
    assert_eq!(
        out,
        "{\"time\":\"10:00:03\",\"level\":\"error\",\"msg\":\"disk full\",\"path\":\"/var\"}\n"
    );
}

#[test]
fn test_config_file_supplies_defaults() {
    let dir = tempdir().expect("temp dir");
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        "[filter]\nalways = \"level!=debug\"\n\n[output]\ntemplate = \".level .msg\"\n",
    )
    .expect("write config");

    let out = stdout_of(
        &["-c", config.to_str().expect("utf8 path"), "msg~server"],
        INPUT,
    );
    assert_eq!(out, "info server started\n");

    let out = stdout_of(
        &["-c", config.to_str().expect("utf8 path"), "-t", ".time"],
        INPUT,
    );
    assert_eq!(out, "10:00:01\n10:00:03\n");
}

#[test]
fn test_verbose_reports_summary_on_stderr() {
    let output = run_with_stdin(&["-vv", "level=info", "bogus"], INPUT);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(stdout, "time=10:00:01 level=info msg=\"server started\" port=8080\n");
    assert!(stderr.contains("Filter: level=info"), "stderr: {stderr}");
    assert!(stderr.contains("Ignoring unrecognized filter fragment 'bogus'"), "stderr: {stderr}");
    assert!(stderr.contains("Skipping line 3"), "stderr: {stderr}");
    assert!(
        stderr.contains("Read 4 lines: 3 records decoded, 1 matched, 1 undecodable"),
        "stderr: {stderr}"
    );
}

#[test]
fn test_quiet_run_has_empty_stderr() {
    let output = run_with_stdin(&["-q", "level=error"], INPUT);
    assert!(output.stderr.is_empty());
}

#[test]
fn test_missing_config_file_fails() {
    let output = Command::new(bin())
        .args(["-c", "/nonexistent/logfmt-filter.toml"])
        .stdin(Stdio::null())
        .output()
        .expect("command should run");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load config"));
}
