#![cfg(unix)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn termkit() -> Command {
    let mut cmd = Command::cargo_bin("termkit").unwrap();
    for name in [
        "TERMKIT_LANGUAGE",
        "TERMKIT_INDENT",
        "TERMKIT_LOGO",
        "TERMKIT_TEXT_COLOR",
        "TERMKIT_SPINNER_TYPE",
    ] {
        cmd.env_remove(name);
    }
    cmd
}

#[test]
fn test_help_output() {
    termkit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Terminal presentation toolkit"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("task"))
        .stdout(predicate::str::contains("git-status"));
}

#[test]
fn test_version_output() {
    termkit()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "termkit {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_run_echoes_stdout() {
    termkit()
        .args(["run", "echo hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello"));
}

#[test]
fn test_run_failure_exits_with_status_two() {
    termkit()
        .args(["run", "exit 1"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains("A silent error has occurred"))
        .stdout(predicate::str::contains("Command failed with exit code 1"));
}

#[test]
fn test_run_failure_shows_stderr_in_error_box() {
    termkit()
        .args(["run", "echo broken pipe >&2; exit 1"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("broken pipe"))
        .stdout(predicate::str::contains("A silent error has occurred").not());
}

#[test]
fn test_run_stderr_without_failure_is_a_warning() {
    termkit()
        .args(["run", "echo careful >&2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("careful"));
}

#[test]
fn test_run_ignore_error_silences_known_noise() {
    termkit()
        .args(["run", "--ignore-error", "careful", "echo careful >&2"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_run_silent_keeps_command_status() {
    termkit()
        .args(["run", "--silent", "echo hidden; exit 3"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_run_joins_trailing_arguments() {
    termkit()
        .args(["run", "--", "printf", "%s-%s", "a b", "c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a b-c"));
}

#[test]
fn test_run_rejects_malformed_env() {
    termkit()
        .args(["run", "--env", "NOEQUALS", "true"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("NAME=value"));
}

#[test]
fn test_read_lines_prints_each_line() {
    termkit()
        .args(["read", "--lines", "printf 'a\\n\\nb\\n'"])
        .assert()
        .success()
        .stdout("a\nb\n");
}

#[test]
fn test_read_get_joins_lines() {
    termkit()
        .args(["read", "--get", "printf 'x\\ny\\n'"])
        .assert()
        .success()
        .stdout("x / y\n");
}

#[test]
fn test_task_renders_title_and_completion() {
    termkit()
        .args(["task", "Build", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Build"))
        .stdout(predicate::str::contains("Completed after"));
}

#[test]
fn test_task_failure_exits_with_status_two() {
    termkit()
        .args(["task", "Build", "exit 5"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("exit code 5"));
}

#[test]
fn test_negative_indent_is_rejected() {
    termkit()
        .args(["--indent", "-1", "say", "hi"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("indent"));
}

#[test]
fn test_unknown_color_is_rejected() {
    termkit()
        .args(["--text-color", "mauve", "say", "--kind", "print", "hi"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("textColor"));
}

#[test]
fn test_say_indent_uses_theme_indent() {
    termkit()
        .args(["--indent", "4", "say", "--kind", "indent", "hi"])
        .assert()
        .success()
        .stdout("    hi\n");
}

#[test]
fn test_say_success_adds_check_mark() {
    termkit()
        .args(["--no-color", "say", "--kind", "success", "Saved"])
        .assert()
        .success()
        .stdout("  ✔  Saved\n\n");
}

#[test]
fn test_state_failure_includes_message() {
    termkit()
        .args(["state", "--failed", "--message", "(down)", "db", "postgres"])
        .assert()
        .success()
        .stdout("  db  ✖  postgres (down)\n");
}

#[test]
fn test_box_uses_minimum_width() {
    let output = termkit().args(["box", "Hello"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[2].trim_end(), "  Hello");
    assert_eq!(lines[2].chars().count(), 80);
}

#[test]
fn test_box_requires_text() {
    termkit()
        .args(["box", "--kind", "warning"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("text"));
}

#[test]
fn test_theme_file_is_applied() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "indent = 6\nlogo = \"◆\"").unwrap();

    let output = termkit()
        .arg("--theme-file")
        .arg(file.path())
        .arg("theme")
        .output()
        .unwrap();
    assert!(output.status.success());

    let theme: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(theme["indent"], 6);
    assert_eq!(theme["logo"], "◆");
}

#[test]
fn test_flags_override_environment_and_theme_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "indent = 6\nlanguage = \"fr\"").unwrap();

    let output = termkit()
        .env("TERMKIT_INDENT", "3")
        .arg("--theme-file")
        .arg(file.path())
        .args(["--indent", "1", "theme"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let theme: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(theme["indent"], 1);
    assert_eq!(theme["language"], "fr");
    assert_eq!(theme["textColor"], "blue");
}

#[test]
fn test_missing_theme_file_fails() {
    termkit()
        .args(["--theme-file", "/nonexistent/termkit/theme.toml", "theme"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Failed to read theme file"));
}

#[test]
fn test_theme_compact_prints_one_line() {
    let output = termkit()
        .args(["--logo", "◆", "theme", "--compact"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    let theme: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(theme["logo"], "◆");
    assert_eq!(theme["indent"], 2);
}
