//! Tests for Release Manifest Handling
//!
//! These tests verify:
//! - Saving and loading manifests through the filesystem
//! - Validation of complete and broken manifests
//! - Default values for omitted fields

use fwpack::config_file::{CompanionSpec, ReleaseManifest};
use fwpack::types::CleanStrategy;
use std::fs;
use tempfile::TempDir;

fn sample_manifest() -> ReleaseManifest {
    ReleaseManifest {
        project_name: "marlin-fw".to_string(),
        project_dir: "firmware".to_string(),
        environment: "STM32F103RC_btt".to_string(),
        clean: CleanStrategy::FullClean,
        companion: Some(CompanionSpec {
            dir: "webui".to_string(),
            build_command: vec!["bash".to_string(), "build.sh".to_string()],
            dist_dir: "dist".to_string(),
        }),
        touchscreen_artifact: Some("tft/BIGTREE_TFT35.bin".to_string()),
        ..ReleaseManifest::default()
    }
}

// =============================================================================
// Save / Load Round-Trip
// =============================================================================

#[test]
fn test_save_and_load_round_trip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("release.json");

    let manifest = sample_manifest();
    manifest.save_to_file(&path).unwrap();

    let loaded = ReleaseManifest::load_from_file(&path).unwrap();
    assert_eq!(loaded.project_name, "marlin-fw");
    assert_eq!(loaded.environment, "STM32F103RC_btt");
    assert_eq!(loaded.clean, CleanStrategy::FullClean);
    assert_eq!(
        loaded.companion.as_ref().map(|c| c.dir.as_str()),
        Some("webui")
    );
    assert_eq!(
        loaded.touchscreen_artifact.as_deref(),
        Some("tft/BIGTREE_TFT35.bin")
    );
}

#[test]
fn test_saved_manifest_is_pretty_json() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("release.json");

    sample_manifest().save_to_file(&path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains('\n'), "Manifest should be human-editable");
    assert!(content.contains("\"project_name\""));
}

#[test]
fn test_load_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    let result = ReleaseManifest::load_from_file(tmp.path().join("absent.json"));
    assert!(result.is_err());
}

#[test]
fn test_load_invalid_json_fails() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(ReleaseManifest::load_from_file(&path).is_err());
}

// =============================================================================
// Defaults and Validation
// =============================================================================

#[test]
fn test_minimal_manifest_gets_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("release.json");
    fs::write(
        &path,
        r#"{
            "project_name": "fw",
            "project_dir": "firmware",
            "environment": "mega2560"
        }"#,
    )
    .unwrap();

    let manifest = ReleaseManifest::load_from_file(&path).unwrap();
    manifest.validate().unwrap();

    assert_eq!(manifest.configs_dir, "configs");
    assert_eq!(manifest.output_dir, "release");
    assert_eq!(manifest.config_target, ".");
    assert_eq!(manifest.clean, CleanStrategy::Clean);
    assert_eq!(manifest.pio_bin, "pio");
    assert_eq!(manifest.git_bin, "git");
    assert!(manifest.companion.is_none());
    assert!(manifest.touchscreen_artifact.is_none());
}

#[test]
fn test_clean_strategy_parses_from_manifest_json() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("release.json");
    fs::write(
        &path,
        r#"{
            "project_name": "fw",
            "project_dir": "firmware",
            "environment": "mega2560",
            "clean": "none"
        }"#,
    )
    .unwrap();

    let manifest = ReleaseManifest::load_from_file(&path).unwrap();
    assert_eq!(manifest.clean, CleanStrategy::None);
}

#[test]
fn test_validation_catches_broken_manifests() {
    let mut manifest = sample_manifest();
    manifest.project_name = String::new();
    assert!(manifest.validate().is_err());

    let mut manifest = sample_manifest();
    manifest.environment = "two words".to_string();
    assert!(manifest.validate().is_err());

    let mut manifest = sample_manifest();
    manifest.config_target = "../elsewhere".to_string();
    assert!(manifest.validate().is_err());

    let mut manifest = sample_manifest();
    if let Some(companion) = &mut manifest.companion {
        companion.build_command.clear();
    }
    assert!(manifest.validate().is_err());
}

#[test]
fn test_starter_manifest_validates() {
    ReleaseManifest::starter().validate().unwrap();
}
