//! Tests for Release Archive Assembly
//!
//! Builds archive plans from temp-dir fixtures, writes real zips, and reads
//! them back to verify the documented layout.

use fwpack::archive::{archive_file_name, write_archive, ArchivePlan};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

fn read_entry(archive: &Path, name: &str) -> String {
    let file = File::open(archive).unwrap();
    let mut zip = zip::ZipArchive::new(file).unwrap();
    let mut entry = zip.by_name(name).unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}

fn entry_names(archive: &Path) -> Vec<String> {
    let file = File::open(archive).unwrap();
    let zip = zip::ZipArchive::new(file).unwrap();
    let mut names: Vec<String> = zip.file_names().map(|n| n.to_string()).collect();
    names.sort();
    names
}

#[test]
fn test_archive_contains_documented_layout() {
    let tmp = TempDir::new().unwrap();

    let firmware = tmp.path().join("firmware.bin");
    fs::write(&firmware, "binary blob").unwrap();

    let config_a = tmp.path().join("Configuration.h");
    let config_b = tmp.path().join("Configuration_adv.h");
    fs::write(&config_a, "#define A").unwrap();
    fs::write(&config_b, "#define B").unwrap();

    let touchscreen = tmp.path().join("BIGTREE_TFT35.bin");
    fs::write(&touchscreen, "tft blob").unwrap();

    let extra = tmp.path().join("flash-instructions.md");
    fs::write(&extra, "hold boot, press reset").unwrap();

    let plan = ArchivePlan {
        file_name: "fw-ender3-20260805.zip".to_string(),
        firmware: firmware.clone(),
        config_files: vec![config_a, config_b],
        touchscreen: Some(touchscreen),
        build_include: vec![(extra, "docs/flash-instructions.md".to_string())],
    };

    let out_dir = tmp.path().join("release");
    let archive = write_archive(&plan, &out_dir).unwrap();

    assert_eq!(archive, out_dir.join("fw-ender3-20260805.zip"));
    assert_eq!(
        entry_names(&archive),
        vec![
            "BIGTREE_TFT35.bin",
            "config/Configuration.h",
            "config/Configuration_adv.h",
            "docs/flash-instructions.md",
            "firmware.bin",
        ]
    );

    assert_eq!(read_entry(&archive, "firmware.bin"), "binary blob");
    assert_eq!(read_entry(&archive, "config/Configuration.h"), "#define A");
    assert_eq!(
        read_entry(&archive, "docs/flash-instructions.md"),
        "hold boot, press reset"
    );
}

#[test]
fn test_archive_without_optional_parts() {
    let tmp = TempDir::new().unwrap();

    let firmware = tmp.path().join("firmware.bin");
    fs::write(&firmware, "blob").unwrap();

    let plan = ArchivePlan {
        file_name: "fw-minimal-20260805.zip".to_string(),
        firmware,
        config_files: Vec::new(),
        touchscreen: None,
        build_include: Vec::new(),
    };

    let archive = write_archive(&plan, tmp.path()).unwrap();
    assert_eq!(entry_names(&archive), vec!["firmware.bin"]);
}

#[test]
fn test_missing_firmware_fails_the_plan() {
    let tmp = TempDir::new().unwrap();

    let plan = ArchivePlan {
        file_name: "fw-broken-20260805.zip".to_string(),
        firmware: tmp.path().join("never-built.bin"),
        config_files: Vec::new(),
        touchscreen: None,
        build_include: Vec::new(),
    };

    assert!(write_archive(&plan, tmp.path()).is_err());
}

#[test]
fn test_archive_file_name_is_dated() {
    let date = chrono::NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
    assert_eq!(
        archive_file_name("fw", "skr-mini", date),
        "fw-skr-mini-20260805.zip"
    );
}
