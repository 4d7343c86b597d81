//! End-to-end cache builds: full pipeline runs and cache directory layout.

use crate::common::{FileAssert, TestProject};
use assetcache_cli::test_utils::SceneFixture;

#[test]
fn test_basic_build_copies_and_rewrites() {
    assetcache_cli::test_utils::init_test_logging(None);

    let project = TestProject::new().unwrap();
    SceneFixture::basic().write_to(project.project_path()).unwrap();
    let cache = project.cache_path().display().to_string();

    let output = project
        .run_assetcache(&["scene.xml", "--cache-dir", &cache])
        .unwrap();
    output
        .assert_success()
        .assert_stdout_contains("Building asset cache for scene.xml")
        .assert_stdout_contains("Copied 3 assets")
        .assert_stdout_contains("Asset cache ready");

    // Copies carry their source content under flattened names
    let out = project.cache_path().join("scene");
    FileAssert::equals(out.join("meshes_arm.stl"), "meshes/arm.stl");
    FileAssert::equals(out.join("gripper_claw.stl"), "meshes/gripper/claw.stl");
    FileAssert::equals(out.join("textures_wood.png"), "textures/wood.png");

    // The transformed document points at the flattened names and keeps
    // everything else intact
    let transformed = out.join("transformed_scene.xml");
    FileAssert::contains(&transformed, r#"file="meshes_arm.stl""#);
    FileAssert::contains(&transformed, r#"file="gripper_claw.stl""#);
    FileAssert::contains(&transformed, r#"file="textures_wood.png""#);
    FileAssert::contains(&transformed, r#"<geom mesh="arm"/>"#);

    // The source document is untouched
    FileAssert::contains(
        project.project_path().join("scene.xml"),
        r#"file="meshes/arm.stl""#,
    );
}

#[test]
fn test_default_cache_dir_is_relative_to_cwd() {
    let project = TestProject::new().unwrap();
    SceneFixture::basic().write_to(project.project_path()).unwrap();

    project.run_assetcache(&["scene.xml"]).unwrap().assert_success();

    let out = project.project_path().join("asset_cache").join("scene");
    FileAssert::exists(out.join("transformed_scene.xml"));
    FileAssert::exists(out.join("textures_wood.png"));
}

#[test]
fn test_output_directory_uses_document_stem() {
    let project = TestProject::new().unwrap();
    let fixture = SceneFixture::basic();
    project
        .write_document("scenes/robot.xml", &fixture.content)
        .unwrap();
    for asset in &fixture.assets {
        project.create_asset(&format!("scenes/{asset}"), asset).unwrap();
    }
    let cache = project.cache_path().display().to_string();

    project
        .run_assetcache(&["scenes/robot.xml", "--cache-dir", &cache])
        .unwrap()
        .assert_success();

    FileAssert::exists(
        project
            .cache_path()
            .join("robot")
            .join("transformed_robot.xml"),
    );
}

#[test]
fn test_absolute_document_path() {
    let project = TestProject::new().unwrap();
    let document = SceneFixture::basic().write_to(project.project_path()).unwrap();
    let cache = project.cache_path().display().to_string();

    project
        .run_assetcache(&[document.to_str().unwrap(), "--cache-dir", &cache])
        .unwrap()
        .assert_success();

    FileAssert::exists(
        project
            .cache_path()
            .join("scene")
            .join("transformed_scene.xml"),
    );
}

#[test]
fn test_duplicate_references_copied_once() {
    let project = TestProject::new().unwrap();
    project
        .write_document(
            "dup.xml",
            r#"<scene><mesh file="meshes/arm.stl"/><mesh file="meshes/arm.stl"/></scene>"#,
        )
        .unwrap();
    project.create_asset("meshes/arm.stl", "stl").unwrap();
    let cache = project.cache_path().display().to_string();

    let output = project
        .run_assetcache(&["dup.xml", "--cache-dir", &cache])
        .unwrap();
    output.assert_success().assert_stdout_contains("Copied 1 assets");
}

#[test]
fn test_rerun_is_idempotent() {
    let project = TestProject::new().unwrap();
    SceneFixture::basic().write_to(project.project_path()).unwrap();
    let cache = project.cache_path().display().to_string();

    project
        .run_assetcache(&["scene.xml", "--cache-dir", &cache])
        .unwrap()
        .assert_success();
    let output = project
        .run_assetcache(&["scene.xml", "--cache-dir", &cache])
        .unwrap();
    output.assert_success().assert_stdout_contains("Copied 3 assets");

    // A second run overwrites in place rather than inventing new names
    let out = project.cache_path().join("scene");
    FileAssert::exists(out.join("meshes_arm.stl"));
    FileAssert::not_exists(out.join("meshes_arm.stl_2"));
}
