//! Error handling: malformed documents, missing files and exit codes.

use crate::common::{DirAssert, FileAssert, TestProject};
use assetcache_cli::test_utils::SceneFixture;

#[test]
fn test_missing_document_exits_with_error() {
    let project = TestProject::new().unwrap();

    let output = project.run_assetcache(&["absent.xml"]).unwrap();
    output.assert_failure().assert_stderr_contains("Document not found");
    assert_eq!(output.code, Some(1));
}

#[test]
fn test_malformed_document_exits_and_writes_nothing() {
    assetcache_cli::test_utils::init_test_logging(None);

    let project = TestProject::new().unwrap();
    SceneFixture::malformed().write_to(project.project_path()).unwrap();
    let cache = project.cache_path().display().to_string();

    let output = project
        .run_assetcache(&["broken.xml", "--cache-dir", &cache])
        .unwrap();
    output
        .assert_failure()
        .assert_stderr_contains("Failed to parse document");
    assert_eq!(output.code, Some(1));

    // A rejected document leaves no trace in the cache
    DirAssert::not_exists(project.cache_path().join("broken"));
}

#[test]
fn test_missing_asset_warns_and_passes_through() {
    let project = TestProject::new().unwrap();
    SceneFixture::with_missing().write_to(project.project_path()).unwrap();
    let cache = project.cache_path().display().to_string();

    let output = project
        .run_assetcache(&["partial.xml", "--cache-dir", &cache])
        .unwrap();
    output
        .assert_success()
        .assert_stdout_contains("Copied 1 assets")
        .assert_stdout_contains("1 references could not be resolved");

    // The resolvable asset is cached; the missing one keeps its original
    // reference in the transformed document
    let out = project.cache_path().join("partial");
    FileAssert::exists(out.join("meshes_arm.stl"));
    FileAssert::not_exists(out.join("meshes_ghost.stl"));

    let transformed = out.join("transformed_partial.xml");
    FileAssert::contains(&transformed, r#"file="meshes_arm.stl""#);
    FileAssert::contains(&transformed, r#"file="meshes/ghost.stl""#);
}

#[test]
fn test_document_with_no_references_still_transforms() {
    let project = TestProject::new().unwrap();
    project
        .write_document("empty.xml", r#"<scene><light intensity="3"/></scene>"#)
        .unwrap();
    let cache = project.cache_path().display().to_string();

    let output = project
        .run_assetcache(&["empty.xml", "--cache-dir", &cache])
        .unwrap();
    output.assert_success().assert_stdout_contains("Copied 0 assets");

    FileAssert::contains(
        project.cache_path().join("empty").join("transformed_empty.xml"),
        r#"<light intensity="3"/>"#,
    );
}
