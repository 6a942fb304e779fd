use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn imagegen() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("imagegen");
    // Tests run inside CI too; never inherit its pull request context
    cmd.env_remove("GITHUB_BASE_REF").env_remove("GITHUB_SHA");
    cmd
}

/// Release directory with two variants, one of them missing its base.
fn init_release(dir: &Path) {
    let base = dir.join("base");
    std::fs::create_dir_all(base.join("templates")).unwrap();
    std::fs::write(
        base.join("templates/intellij.Dockerfile.j2"),
        "ENV QD_CODE={{ qd_code }}\n",
    )
    .unwrap();
    std::fs::write(
        base.join("templates/thirdparty.Dockerfile.j2"),
        "ENV QD_LINTER={{ qd_image }}\n",
    )
    .unwrap();
    std::fs::write(base.join("jdk.Dockerfile"), "FROM eclipse-temurin:21\n").unwrap();
    std::fs::write(base.join("jvm.Dockerfile"), "FROM jdk\nRUN setup-jvm\n").unwrap();
    std::fs::write(
        dir.join("public.json"),
        r#"{"jvm-community": {"from": "jvm", "qd_code": "QDJVMC"}, "php": {}}"#,
    )
    .unwrap();
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success(), "git {args:?} failed");
    String::from_utf8(output.stdout).unwrap().trim().to_owned()
}

fn add_product(root: &Path, rel: &str, content: &str) {
    let dir = root.join(rel);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("Dockerfile"), content).unwrap();
}

/// Git repository with `origin/main` at the initial commit and a follow-up
/// commit that only touches `2024.3/go`. Returns the head sha.
fn init_pr_repo(dir: &Path) -> String {
    add_product(dir, "2024.3/go", "FROM golang:1.22\n");
    add_product(dir, "2024.3/js", "FROM node:20\n");
    git(dir, &["init", "-q"]);
    git(dir, &["config", "user.email", "test@test.com"]);
    git(dir, &["config", "user.name", "Test"]);
    git(dir, &["add", "."]);
    git(dir, &["commit", "-q", "-m", "init"]);
    git(dir, &["update-ref", "refs/remotes/origin/main", "HEAD"]);

    add_product(dir, "2024.3/go", "FROM golang:1.23\n");
    git(dir, &["commit", "-q", "-am", "bump go"]);
    git(dir, &["rev-parse", "HEAD"])
}

fn parse_matrix(stdout: &[u8]) -> Vec<serde_json::Value> {
    serde_json::from_slice(stdout).unwrap()
}

// ── Help / Version ──

#[test]
fn shows_help() {
    imagegen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compose Dockerfiles"));
}

#[test]
fn shows_version() {
    imagegen()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("imagegen"));
}

// ── Generate Command ──

#[test]
fn generate_writes_dockerfiles() {
    let tmp = TempDir::new().unwrap();
    init_release(tmp.path());

    imagegen()
        .arg("generate")
        .arg(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated"))
        .stderr(predicate::str::contains("Skipping php"));

    let dockerfile =
        std::fs::read_to_string(tmp.path().join("jvm-community/Dockerfile")).unwrap();
    assert!(dockerfile.starts_with("# This file was generated by imagegen"));
    assert!(dockerfile.contains("FROM eclipse-temurin:21\nRUN setup-jvm\n\nENV QD_CODE=QDJVMC"));
    assert!(!dockerfile.ends_with('\n'));
    assert!(!tmp.path().join("php").exists());
}

#[test]
fn generate_requires_release_dir_argument() {
    imagegen().arg("generate").assert().failure();
}

#[test]
fn generate_fails_on_missing_release_dir() {
    let tmp = TempDir::new().unwrap();

    imagegen()
        .arg("generate")
        .arg(tmp.path().join("nope"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("doesn't exist"));
}

#[test]
fn generate_fails_on_invalid_manifest() {
    let tmp = TempDir::new().unwrap();
    init_release(tmp.path());
    std::fs::write(tmp.path().join("public.json"), "not json").unwrap();

    imagegen()
        .arg("generate")
        .arg(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("public.json"));
}

#[test]
fn generate_check_passes_after_generate() {
    let tmp = TempDir::new().unwrap();
    init_release(tmp.path());

    imagegen().arg("generate").arg(tmp.path()).assert().success();
    imagegen()
        .args(["generate", "--check"])
        .arg(tmp.path())
        .assert()
        .success();
}

#[test]
fn generate_check_fails_when_out_of_date() {
    let tmp = TempDir::new().unwrap();
    init_release(tmp.path());
    imagegen().arg("generate").arg(tmp.path()).assert().success();

    std::fs::write(
        tmp.path().join("base/jdk.Dockerfile"),
        "FROM eclipse-temurin:22\n",
    )
    .unwrap();

    imagegen()
        .args(["generate", "--check"])
        .arg(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("out of date"));
}

// ── Matrix Command ──

#[test]
fn matrix_full_rebuild_outside_pull_requests() {
    let tmp = TempDir::new().unwrap();
    add_product(tmp.path(), "2024.3/go", "FROM golang\n");
    add_product(tmp.path(), "2024.3/ruby", "FROM ruby\n");

    let assert = imagegen()
        .arg("matrix")
        .arg("--root")
        .arg(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("\t{"));

    let matrix = parse_matrix(&assert.get_output().stdout);
    assert_eq!(
        matrix,
        vec![
            serde_json::json!({"version": "2024.3", "linter": "go", "platform": "linux/amd64", "runner": "ubuntu-24.04"}),
            serde_json::json!({"version": "2024.3", "linter": "go", "platform": "linux/arm64", "runner": "ubuntu-24.04-arm"}),
        ]
    );
}

#[test]
fn matrix_flat_layout() {
    let tmp = TempDir::new().unwrap();
    add_product(tmp.path(), "dockerfiles/cdnet", "FROM dotnet\n");

    let assert = imagegen()
        .args(["matrix", "--layout", "flat", "--root"])
        .arg(tmp.path())
        .assert()
        .success();

    let matrix = parse_matrix(&assert.get_output().stdout);
    assert_eq!(matrix.len(), 2);
    assert!(matrix.iter().all(|e| e.get("version").is_none()));
    assert_eq!(matrix[0]["linter"], "cdnet");
}

#[test]
fn matrix_pull_request_requires_head_sha() {
    let tmp = TempDir::new().unwrap();

    imagegen()
        .arg("matrix")
        .arg("--root")
        .arg(tmp.path())
        .env("GITHUB_BASE_REF", "main")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("GITHUB_SHA"));
}

#[test]
fn matrix_pull_request_selects_changed_dockerfiles() {
    let tmp = TempDir::new().unwrap();
    let head = init_pr_repo(tmp.path());

    let assert = imagegen()
        .arg("matrix")
        .arg("--root")
        .arg(tmp.path())
        .env("GITHUB_BASE_REF", "main")
        .env("GITHUB_SHA", &head)
        .assert()
        .success();

    let matrix = parse_matrix(&assert.get_output().stdout);
    assert_eq!(matrix.len(), 2);
    assert!(matrix.iter().all(|e| e["linter"] == "go"));
    assert_eq!(matrix[0]["platform"], "linux/amd64");
    assert_eq!(matrix[1]["platform"], "linux/arm64");
}

#[test]
fn matrix_pull_request_fails_on_unknown_target_branch() {
    let tmp = TempDir::new().unwrap();
    let head = init_pr_repo(tmp.path());

    imagegen()
        .arg("matrix")
        .arg("--root")
        .arg(tmp.path())
        .args(["--base-ref", "release", "--head-sha", head.as_str()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("inconclusive"));
}
