//! Flattening policy through the CLI: collision handling, --depth, --keep
//! and --asset-dir.

use crate::common::{FileAssert, TestProject};
use assetcache_cli::test_utils::SceneFixture;

#[test]
fn test_colliding_references_widen_until_distinct() {
    assetcache_cli::test_utils::init_test_logging(None);

    let project = TestProject::new().unwrap();
    SceneFixture::colliding().write_to(project.project_path()).unwrap();
    let cache = project.cache_path().display().to_string();

    project
        .run_assetcache(&["collide.xml", "--cache-dir", &cache])
        .unwrap()
        .assert_success();

    // Both references end in x/detail.png; one extra ancestor separates them
    let out = project.cache_path().join("collide");
    FileAssert::equals(out.join("left_x_detail.png"), "left/x/detail.png");
    FileAssert::equals(out.join("right_x_detail.png"), "right/x/detail.png");

    let transformed = out.join("transformed_collide.xml");
    FileAssert::contains(&transformed, r#"file="left_x_detail.png""#);
    FileAssert::contains(&transformed, r#"file="right_x_detail.png""#);
}

#[test]
fn test_depth_preserves_directory_levels() {
    let project = TestProject::new().unwrap();
    SceneFixture::basic().write_to(project.project_path()).unwrap();
    let cache = project.cache_path().display().to_string();

    project
        .run_assetcache(&["scene.xml", "--cache-dir", &cache, "--depth", "1"])
        .unwrap()
        .assert_success();

    // One directory level survives as a real subdirectory
    let out = project.cache_path().join("scene");
    FileAssert::exists(out.join("meshes").join("arm.stl"));
    FileAssert::exists(out.join("gripper").join("claw.stl"));
    FileAssert::exists(out.join("textures").join("wood.png"));

    let transformed = out.join("transformed_scene.xml");
    FileAssert::contains(&transformed, r#"file="meshes/arm.stl""#);
    FileAssert::contains(&transformed, r#"file="gripper/claw.stl""#);
}

#[test]
fn test_keep_flag_preserves_reference_and_subtree() {
    let project = TestProject::new().unwrap();
    SceneFixture::basic().write_to(project.project_path()).unwrap();
    let cache = project.cache_path().display().to_string();

    project
        .run_assetcache(&[
            "scene.xml",
            "--cache-dir",
            &cache,
            "--keep",
            "meshes/gripper/claw.stl",
        ])
        .unwrap()
        .assert_success();

    let out = project.cache_path().join("scene");
    FileAssert::exists(out.join("meshes").join("gripper").join("claw.stl"));
    FileAssert::exists(out.join("meshes_arm.stl"));

    let transformed = out.join("transformed_scene.xml");
    FileAssert::contains(&transformed, r#"file="meshes/gripper/claw.stl""#);
    FileAssert::contains(&transformed, r#"file="meshes_arm.stl""#);
}

#[test]
fn test_asset_dir_resolves_references() {
    let project = TestProject::new().unwrap();
    // Assets live outside the document's directory
    project.create_asset("assets/textures/wood.png", "png").unwrap();
    project
        .write_document(
            "scenes/scene.xml",
            r#"<scene><texture file="textures/wood.png"/></scene>"#,
        )
        .unwrap();
    let cache = project.cache_path().display().to_string();
    let asset_dir = project.project_path().join("assets").display().to_string();

    let output = project
        .run_assetcache(&[
            "scenes/scene.xml",
            "--cache-dir",
            &cache,
            "--asset-dir",
            &asset_dir,
        ])
        .unwrap();
    output.assert_success().assert_stdout_contains("Copied 1 assets");

    FileAssert::equals(
        project.cache_path().join("scene").join("textures_wood.png"),
        "png",
    );
}
