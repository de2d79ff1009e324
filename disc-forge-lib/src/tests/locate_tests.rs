use super::*;
use std::fs;

#[test]
fn finds_nested_image_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path();
    fs::create_dir_all(folder.join("disc")).unwrap();
    fs::write(folder.join("readme.txt"), b"").unwrap();
    fs::write(folder.join("disc/Game.RVZ"), b"").unwrap();

    assert_eq!(
        locate_image(folder, "rvz").unwrap(),
        folder.join("disc/Game.RVZ")
    );
}

#[test]
fn first_match_in_name_order_wins() {
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path();
    fs::write(folder.join("b.rvz"), b"").unwrap();
    fs::write(folder.join("a.rvz"), b"").unwrap();

    assert_eq!(locate_image(folder, "rvz").unwrap(), folder.join("a.rvz"));
}

#[test]
fn no_image_is_image_not_found() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("game.iso"), b"").unwrap();

    let err = locate_image(dir.path(), "rvz").unwrap_err();
    assert!(matches!(err, PipelineError::ImageNotFound { .. }));
    assert!(err.to_string().contains("No .rvz image found"));
}

#[test]
fn directories_with_image_extension_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("fake.rvz")).unwrap();
    assert!(locate_image(dir.path(), "rvz").is_err());
}
