//! Pre-flight sanity checks for the release environment
//!
//! This module verifies the environment before any subprocess runs:
//! - Required tool binaries are present (PlatformIO, git)
//! - The firmware project and configurations directory exist
//!
//! If any check fails, the program exits with a clear error message before
//! the first build starts.

use crate::config_file::ReleaseManifest;
use crate::process_guard::CommandProcessGroup;
use std::process::Command;
use tracing::{debug, info};

/// Result of environment verification
#[derive(Debug)]
pub struct PreflightReport {
    pub missing_binaries: Vec<String>,
    pub missing_paths: Vec<String>,
}

impl PreflightReport {
    /// Returns true if all checks passed
    pub fn is_ok(&self) -> bool {
        self.missing_binaries.is_empty() && self.missing_paths.is_empty()
    }
}

/// Check if a binary is available in PATH
fn binary_exists(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .in_new_process_group()
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Perform all pre-flight checks and return the result
pub fn verify_environment(manifest: &ReleaseManifest) -> PreflightReport {
    let mut missing_binaries = Vec::new();
    for binary in [manifest.pio_bin.as_str(), manifest.git_bin.as_str()] {
        if !binary_exists(binary) {
            missing_binaries.push(binary.to_string());
        }
    }

    let mut missing_paths = Vec::new();
    let project = manifest.project_path();
    if !project.is_dir() {
        missing_paths.push(format!("project directory: {}", manifest.project_dir));
    } else if !project.join("platformio.ini").is_file() {
        missing_paths.push(format!(
            "platformio.ini in project directory: {}",
            manifest.project_dir
        ));
    }
    if !manifest.configs_path().is_dir() {
        missing_paths.push(format!("configurations directory: {}", manifest.configs_dir));
    }
    if let Some(artifact) = &manifest.touchscreen_artifact {
        if !std::path::Path::new(artifact).is_file() {
            missing_paths.push(format!("touchscreen artifact: {}", artifact));
        }
    }
    if let Some(companion) = &manifest.companion {
        if !companion.dir_path().is_dir() {
            missing_paths.push(format!("companion directory: {}", companion.dir));
        }
    }

    PreflightReport {
        missing_binaries,
        missing_paths,
    }
}

/// Print a clear error message to stderr and exit.
/// Called before any subprocess runs, so stderr is safe to use freely.
pub fn print_error_and_exit(report: &PreflightReport) -> ! {
    eprintln!();
    eprintln!("✗ Pre-flight check failed");
    eprintln!();

    if !report.missing_binaries.is_empty() {
        eprintln!("  Missing required binaries:");
        for binary in &report.missing_binaries {
            eprintln!("    • {}", binary);
        }
        eprintln!();
        eprintln!("  Install PlatformIO (pip install platformio) and git, or point");
        eprintln!("  pio_bin/git_bin in the manifest at the right programs.");
        eprintln!();
    }

    if !report.missing_paths.is_empty() {
        eprintln!("  Missing required paths:");
        for path in &report.missing_paths {
            eprintln!("    • {}", path);
        }
        eprintln!();
    }

    eprintln!("Fix the above issues and try again.");
    std::process::exit(1);
}

/// Main entry point: verify the environment and exit if checks fail.
/// Call this before the release run starts.
pub fn run_preflight_checks(manifest: &ReleaseManifest) {
    debug!("Running pre-flight checks...");

    let report = verify_environment(manifest);

    if !report.is_ok() {
        print_error_and_exit(&report);
    }

    info!("Pre-flight checks passed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn manifest_in(tmp: &TempDir) -> ReleaseManifest {
        let project = tmp.path().join("fw");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join("platformio.ini"), "[env:uno]\n").unwrap();
        let configs = tmp.path().join("configs");
        fs::create_dir_all(&configs).unwrap();

        ReleaseManifest {
            project_name: "fw".to_string(),
            project_dir: project.to_string_lossy().to_string(),
            environment: "uno".to_string(),
            configs_dir: configs.to_string_lossy().to_string(),
            // `sh` and `true` exist everywhere, keeping the check hermetic
            pio_bin: "sh".to_string(),
            git_bin: "true".to_string(),
            ..ReleaseManifest::default()
        }
    }

    #[test]
    fn test_binary_exists_sh() {
        assert!(binary_exists("sh"), "sh should be available");
    }

    #[test]
    fn test_binary_exists_nonexistent() {
        assert!(!binary_exists("this_binary_definitely_does_not_exist_12345"));
    }

    #[test]
    fn test_verify_environment_passes_on_complete_setup() {
        let tmp = TempDir::new().unwrap();
        let manifest = manifest_in(&tmp);
        let report = verify_environment(&manifest);
        assert!(report.is_ok(), "unexpected failures: {:?}", report);
    }

    #[test]
    fn test_verify_environment_flags_missing_platformio_ini() {
        let tmp = TempDir::new().unwrap();
        let mut manifest = manifest_in(&tmp);
        fs::remove_file(manifest.project_path().join("platformio.ini")).unwrap();
        manifest.pio_bin = "sh".to_string();

        let report = verify_environment(&manifest);
        assert!(!report.is_ok());
        assert!(report.missing_paths.iter().any(|p| p.contains("platformio.ini")));
    }

    #[test]
    fn test_verify_environment_flags_missing_binary() {
        let tmp = TempDir::new().unwrap();
        let mut manifest = manifest_in(&tmp);
        manifest.pio_bin = "definitely_not_a_real_pio_binary".to_string();

        let report = verify_environment(&manifest);
        assert_eq!(
            report.missing_binaries,
            vec!["definitely_not_a_real_pio_binary".to_string()]
        );
    }
}
