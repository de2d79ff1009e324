use super::*;
use std::fs::File;
use std::io::Write;

fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    let options = zip::write::SimpleFileOptions::default();
    for (name, data) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap();
}

fn config_in(dir: &Path) -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.lookup_file = dir.join("wiitdb.txt");
    config.converter_a.path = dir.join("tools/DolphinTool");
    config.converter_b.path = dir.join("tools/wit");
    config
}

#[test]
fn test_archive_kind() {
    assert_eq!(
        archive_kind("https://dl.dolphin-emu.org/releases/2409/dolphin-2409-x64.7z"),
        Some(ArchiveKind::SevenZ)
    );
    assert_eq!(
        archive_kind("https://wit.wiimm.de/download/wit-v3.05a-r8638-cygwin64.ZIP?mirror=1"),
        Some(ArchiveKind::Zip)
    );
    assert_eq!(archive_kind("https://example.com/wit.tar.gz"), None);
}

#[test]
fn test_find_file_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("wit-v3/bin")).unwrap();
    fs::write(dir.path().join("wit-v3/bin/WIT.exe"), b"MZ").unwrap();

    assert_eq!(
        find_file(dir.path(), "wit.exe"),
        Some(dir.path().join("wit-v3/bin/WIT.exe"))
    );
    assert_eq!(find_file(dir.path(), "wwt.exe"), None);
}

#[test]
fn installs_executable_from_zip() {
    let dir = tempfile::tempdir().unwrap();
    let staging = dir.path().join("staging");
    fs::create_dir_all(&staging).unwrap();
    let archive = staging.join("download.zip");
    write_zip(
        &archive,
        &[
            ("wit-v3.05a/bin/wit.exe", b"MZ-wit"),
            ("wit-v3.05a/doc/README.txt", b"docs"),
        ],
    );

    let dest = dir.path().join("tools/wit.exe");
    install_tool_archive(&archive, ArchiveKind::Zip, "wit.exe", &dest).unwrap();
    assert_eq!(fs::read(&dest).unwrap(), b"MZ-wit");
    assert!(!staging.join("extracted/wit-v3.05a/bin/wit.exe").exists());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}

#[test]
fn missing_executable_in_archive() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("download.zip");
    write_zip(&archive, &[("readme.txt", b"nothing here")]);

    let err = install_tool_archive(
        &archive,
        ArchiveKind::Zip,
        "DolphinTool.exe",
        &dir.path().join("DolphinTool.exe"),
    )
    .unwrap_err();
    assert!(matches!(err, BootstrapError::ExecutableNotFound { .. }));
}

#[test]
fn reports_missing_prerequisites() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    assert_eq!(missing_prerequisites(&config), Prerequisite::ALL.to_vec());

    fs::write(&config.lookup_file, "ABCE01 = Test Game\n").unwrap();
    fs::create_dir_all(dir.path().join("tools")).unwrap();
    fs::write(&config.converter_b.path, b"").unwrap();
    assert_eq!(missing_prerequisites(&config), vec![Prerequisite::ConverterA]);
}

#[test]
fn fetch_skips_present_prerequisites() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    fs::create_dir_all(dir.path().join("tools")).unwrap();
    fs::write(&config.lookup_file, "").unwrap();
    fs::write(&config.converter_a.path, b"").unwrap();
    fs::write(&config.converter_b.path, b"").unwrap();

    let report = fetch_prerequisites(&config, false).unwrap();
    assert!(report.fetched.is_empty());
    assert_eq!(report.skipped.len(), 3);
}

#[test]
fn unsupported_tool_archive_is_rejected_before_download() {
    let dir = tempfile::tempdir().unwrap();
    let download = ToolDownload {
        url: "https://example.invalid/tool.tar.xz".into(),
        executable: "tool".into(),
    };
    let err = fetch_tool(&download, &dir.path().join("tool")).unwrap_err();
    assert!(matches!(err, BootstrapError::UnsupportedArchive(_)));
}

#[cfg(unix)]
#[test]
fn bare_tool_names_are_found_on_path() {
    assert!(tool_available(Path::new("sh")));
    assert!(!tool_available(Path::new("disc-forge-no-such-tool")));
    assert!(!tool_available(Path::new("./disc-forge-no-such-tool")));
}

#[test]
fn bare_tool_in_working_dir_is_available() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("disc-forge-local-tool"), b"").unwrap();
    assert!(tool_available_in(Path::new("disc-forge-local-tool"), dir.path()));
    assert!(!tool_available_in(Path::new("disc-forge-other-tool"), dir.path()));
}

#[test]
fn availability_matches_spawned_program() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("disc-forge-local-tool"), b"").unwrap();
    let program = resolve_program_in(Path::new("disc-forge-local-tool"), dir.path());
    assert!(program.is_file());
    assert!(tool_available(&program));
}
