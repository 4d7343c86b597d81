//! CLI surface: help, version and argument validation.

use crate::common::{FileAssert, TestProject};
use assert_cmd::Command;
use assetcache_cli::test_utils::SceneFixture;
use predicates::prelude::*;

#[test]
fn test_help_lists_flags() {
    Command::cargo_bin("assetcache")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--cache-dir"))
        .stdout(predicate::str::contains("--asset-dir"))
        .stdout(predicate::str::contains("--depth"))
        .stdout(predicate::str::contains("--keep"))
        .stdout(predicate::str::contains("--no-progress"));
}

#[test]
fn test_version_output() {
    Command::cargo_bin("assetcache")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_document_argument_required() {
    Command::cargo_bin("assetcache")
        .unwrap()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("DOCUMENT"));
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    Command::cargo_bin("assetcache")
        .unwrap()
        .args(["scene.xml", "--quiet", "--verbose"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_quiet_run_still_prints_summary() {
    let project = TestProject::new().unwrap();
    SceneFixture::basic().write_to(project.project_path()).unwrap();
    let cache = project.cache_path().display().to_string();

    let output = project
        .run_assetcache(&["scene.xml", "--cache-dir", &cache, "--quiet"])
        .unwrap();
    output.assert_success().assert_stdout_contains("Asset cache ready");

    FileAssert::exists(
        project
            .cache_path()
            .join("scene")
            .join("transformed_scene.xml"),
    );
}

#[test]
fn test_no_progress_flag_accepted() {
    let project = TestProject::new().unwrap();
    SceneFixture::basic().write_to(project.project_path()).unwrap();
    let cache = project.cache_path().display().to_string();

    project
        .run_assetcache(&["scene.xml", "--cache-dir", &cache, "--no-progress"])
        .unwrap()
        .assert_success();
}
