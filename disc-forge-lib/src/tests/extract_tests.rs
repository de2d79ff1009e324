use super::*;
use std::io::Write;

fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default();
    for (name, data) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn test_extraction_folder() {
    assert_eq!(
        extraction_folder(Path::new("games/Game (USA).zip")),
        PathBuf::from("games/Game (USA)")
    );
    assert_eq!(
        extraction_folder(Path::new("games/Game v1.1.zip")),
        PathBuf::from("games/Game v1.1")
    );
}

#[test]
fn extracts_and_removes_archive() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("Game.zip");
    write_zip(
        &archive,
        &[("Game.rvz", b"RVZ\x01data"), ("extra/readme.txt", b"hi")],
    );

    let folder = extract_archive(&archive).unwrap();
    assert_eq!(folder, dir.path().join("Game"));
    assert!(!archive.exists());
    assert_eq!(fs::read(folder.join("Game.rvz")).unwrap(), b"RVZ\x01data");
    assert_eq!(fs::read(folder.join("extra/readme.txt")).unwrap(), b"hi");
}

#[test]
fn corrupt_archive_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("Broken.zip");
    fs::write(&archive, b"this is not a zip file").unwrap();

    let err = extract_archive(&archive).unwrap_err();
    assert!(matches!(err, PipelineError::Extraction { .. }));
    assert!(archive.exists());
}

#[test]
fn unpack_zip_counts_files() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("tool.zip");
    write_zip(&archive, &[("bin/tool.exe", b"MZ"), ("doc.txt", b"")]);

    let dest = dir.path().join("out");
    assert_eq!(unpack_zip(&archive, &dest).unwrap(), 2);
    assert!(dest.join("bin/tool.exe").is_file());
    assert!(archive.exists());
}

#[test]
fn unpack_7z_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("tool.7z");
    fs::write(&archive, b"not 7z").unwrap();
    assert!(matches!(
        unpack_7z(&archive, &dir.path().join("out")),
        Err(ArchiveError::SevenZ(_))
    ));
}
