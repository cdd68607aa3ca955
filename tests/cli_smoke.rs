use assert_cmd::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const RANGE: [&str; 4] = ["--since", "2000-01-01", "--until", "2099-12-31"];

fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

fn git(dir: &Path, args: &[&str]) {
    assert!(Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap()
        .success());
}

fn init_git_repo(dir: &Path) {
    git(dir, &["init"]);
    git(dir, &["config", "core.autocrlf", "false"]);
    git(dir, &["config", "user.email", "you@example.com"]);
    git(dir, &["config", "user.name", "Your Name"]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

fn commit_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.sync_all().unwrap();
    git(dir, &["add", "."]);
    git(dir, &["commit", "-m", &format!("add {name}")]);
}

/// A repository with 3 source lines and 3 vendored lines by you@example.com.
fn sample_repo(dir: &Path) {
    init_git_repo(dir);
    commit_file(dir, "src/a.rs", "fn a() {}\n");
    commit_file(dir, "src/b.rs", "fn b() {}\nfn c() {}\n");
    commit_file(dir, "vendor/lib.js", "1;\n2;\n3;\n");
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn analyze_json_reports_totals() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    sample_repo(dir.path());

    let mut cmd = Command::cargo_bin("gitrespect").unwrap();
    cmd.arg(dir.path())
        .args(["-a", "you@example.com", "-o", "json", "-b", "monthly"])
        .args(RANGE);
    let v = json_stdout(&mut cmd);

    assert_eq!(v["version"], 1);
    assert_eq!(v["author"], "you@example.com");
    assert_eq!(v["summary"]["added"], 6);
    assert_eq!(v["summary"]["deleted"], 0);
    assert_eq!(v["summary"]["commits"], 3);
    assert_eq!(v["summary"]["files_changed"], 3);
    assert_eq!(v["benchmarks"].as_array().map(|b| b.len()), Some(3));
    assert_eq!(v["monthly"].as_array().map(|m| m.is_empty()), Some(false));
}

#[test]
fn excluded_files_are_not_counted() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    sample_repo(dir.path());

    let mut cmd = Command::cargo_bin("gitrespect").unwrap();
    cmd.arg(dir.path())
        .args(["-a", "you@example.com", "-o", "json", "-e", "vendor/*,*.min.js"])
        .args(RANGE);
    let v = json_stdout(&mut cmd);

    assert_eq!(v["summary"]["added"], 3);
    assert_eq!(v["summary"]["files_changed"], 2);
}

#[test]
fn directories_of_repositories_are_combined() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    let one = dir.path().join("one");
    let two = dir.path().join("two");
    fs::create_dir_all(&one).unwrap();
    fs::create_dir_all(&two).unwrap();
    sample_repo(&one);
    sample_repo(&two);

    let mut cmd = Command::cargo_bin("gitrespect").unwrap();
    cmd.arg(dir.path())
        .args(["-a", "you@example.com", "-o", "json"])
        .args(RANGE);
    let v = json_stdout(&mut cmd);

    assert_eq!(v["repository"], "2 repositories");
    assert_eq!(v["summary"]["added"], 12);
}

#[test]
fn compare_json_reports_both_periods() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    sample_repo(dir.path());

    let mut cmd = Command::cargo_bin("gitrespect").unwrap();
    cmd.arg("compare")
        .arg(dir.path())
        .args(["-a", "you@example.com", "-o", "json"])
        .args(["--before=2000-01:2000-12", "--after=2000-01:2099-12"]);
    let v = json_stdout(&mut cmd);

    assert_eq!(v["before"]["label"], "2000-01:2000-12");
    assert_eq!(v["before"]["net"], 0);
    assert_eq!(v["after"]["net"], 6);
    assert_eq!(v["productivity_multiplier"], 0.0);
}

#[test]
fn team_json_ranks_members() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    sample_repo(dir.path());

    let mut cmd = Command::cargo_bin("gitrespect").unwrap();
    cmd.arg(dir.path())
        .args(["-t", "nobody@example.com,you@example.com", "-o", "json"])
        .args(RANGE);
    let v = json_stdout(&mut cmd);

    let members = v["members"].as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["email"], "you@example.com");
    assert_eq!(members[0]["net"], 6);
    assert_eq!(v["totals"]["net"], 6);
}

#[test]
fn html_report_is_written_to_file() {
    let dir = tempdir().unwrap();
    if !has_git() {
        return;
    }
    sample_repo(dir.path());
    let out = dir.path().join("report.html");

    let mut cmd = Command::cargo_bin("gitrespect").unwrap();
    cmd.arg(dir.path())
        .args(["-a", "you@example.com", "-o", "html", "--theme", "light", "-f"])
        .arg(&out)
        .args(RANGE);
    let stdout = cmd.assert().success().get_output().stdout.clone();

    assert!(String::from_utf8_lossy(&stdout).contains("Report saved to"));
    let html = fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("you@example.com"));
}

#[test]
fn version_prints_package_version() {
    let mut cmd = Command::cargo_bin("gitrespect").unwrap();
    cmd.arg("version");
    let out = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8_lossy(&out);
    assert!(text.starts_with(&format!("gitrespect {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn fails_when_nothing_can_be_analyzed() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let mut cmd = Command::cargo_bin("gitrespect").unwrap();
    cmd.arg(&missing).args(["-a", "nobody@example.com", "-o", "json"]);
    cmd.assert().failure();
}

#[test]
fn invalid_dates_are_rejected() {
    let mut cmd = Command::cargo_bin("gitrespect").unwrap();
    cmd.args(["--since", "yesterday-ish", "-a", "me@example.com"]);
    cmd.assert().failure();
}
