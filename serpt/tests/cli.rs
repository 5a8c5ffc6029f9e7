use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A serpt invocation isolated from any user configuration.
fn serpt(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("serpt").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("SERPT_CONFIG")
        .env_remove("SERPT_VERBOSE")
        .arg("--no-color");
    cmd
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn tokens_lists_every_token() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "m.py", "if x:\n    pass\n");

    serpt(dir.path())
        .arg("tokens")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1:0 IF visible \"if\""))
        .stdout(predicate::str::contains("2:0 LEADING_WS hidden \"    \""))
        .stdout(predicate::str::contains("3:0 EOF visible \"\""));
}

#[test]
fn tokens_visible_hides_comments() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "m.py", "x = 1  # note\n");

    serpt(dir.path())
        .args(["tokens", "--visible"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("COMMENT").not())
        .stdout(predicate::str::contains("NEWLINE"));
}

#[test]
fn tokens_json_output() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "m.py", "0x1fL\n");

    serpt(dir.path())
        .args(["tokens", "--format", "json"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\":\"LONGINT\""))
        .stdout(predicate::str::contains("\"text\":\"0x1fL\""));
}

#[test]
fn tokens_reports_lex_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "bad.py", "s = '''never closed\n");

    serpt(dir.path())
        .arg("tokens")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1002]"));
}

#[test]
fn check_passes_clean_files() {
    let dir = TempDir::new().unwrap();
    let a = write_file(&dir, "a.py", "def f(a,\n      b):\n    return a  # c\n");
    let b = write_file(&dir, "b.py", "x = [1, 2L, 3.5j]\n");

    serpt(dir.path())
        .arg("check")
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout(predicate::str::contains("checked 2 file(s): 0 error(s), 0 warning(s)"));
}

#[test]
fn check_reports_every_error_with_snippet() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "bad.py", "a = $\nb = 0x\n");

    serpt(dir.path())
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("2 error(s)"))
        .stderr(predicate::str::contains("error[E1001]"))
        .stderr(predicate::str::contains("error[E1003]"))
        .stderr(predicate::str::contains("  1 | a = $"));
}

#[test]
fn check_no_recover_stops_early() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "bad.py", "a = $\nb = ?\n");

    serpt(dir.path())
        .args(["check", "--no-recover"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 error(s)"));
}

#[test]
fn check_warns_on_unmatched_closer() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "warn.py", "x = 1)\n");

    serpt(dir.path())
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 warning(s)"))
        .stderr(predicate::str::contains("warning[W1006]"));
}

#[test]
fn config_uses_given_file() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "custom.toml", "[check]\nmax_errors = 4\n");

    serpt(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("max_errors = 4"));
}

#[test]
fn config_file_in_current_dir_is_found() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "serpt.toml", "[tokens]\nformat = \"json\"\n");
    let path = write_file(&dir, "m.py", "x\n");

    serpt(dir.path())
        .arg("tokens")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();

    serpt(dir.path())
        .args(["--config", "does-not-exist.toml", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}
