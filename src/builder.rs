//! Firmware build cycle.
//!
//! Wraps the per-configuration external invocations: tracked-file reset via
//! git, the PlatformIO clean and build runs, and locating the firmware
//! binary afterwards.

use crate::config_file::ReleaseManifest;
use crate::tool_args::is_dry_run;
use crate::tool_runner::{run_tool, run_tool_streaming};
use crate::tools::git::GitCheckoutArgs;
use crate::tools::pio::PioRunArgs;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

/// Drives the external tools for one firmware project
pub struct FirmwareBuilder<'a> {
    manifest: &'a ReleaseManifest,
}

impl<'a> FirmwareBuilder<'a> {
    pub fn new(manifest: &'a ReleaseManifest) -> Self {
        Self { manifest }
    }

    /// Reset tracked files in the project tree (`git checkout -- .`),
    /// discarding the previously applied configuration
    pub fn reset_tracked(&self) -> Result<()> {
        let args = GitCheckoutArgs::reset_all(&self.manifest.git_bin);
        run_tool(&args, self.manifest.project_path())?.ensure_success("Tracked-file reset")
    }

    /// Run the configured clean step for an environment
    pub fn clean(&self, environment: &str) -> Result<()> {
        match PioRunArgs::clean(&self.manifest.pio_bin, environment, self.manifest.clean) {
            Some(args) => {
                info!("Cleaning environment {}", environment);
                run_tool_streaming(&args, self.manifest.project_path())?.ensure_success("Clean")
            }
            None => {
                debug!("Clean strategy is 'none', skipping clean step");
                Ok(())
            }
        }
    }

    /// Build an environment, relaying compiler output as it happens
    pub fn build(&self, environment: &str) -> Result<()> {
        let args = PioRunArgs::build(&self.manifest.pio_bin, environment);
        run_tool_streaming(&args, self.manifest.project_path())?.ensure_success("Firmware build")
    }

    /// Locate the firmware binary a successful build must have produced
    pub fn locate_firmware(&self, environment: &str) -> Result<PathBuf> {
        let path = self.manifest.firmware_path(environment);

        // The build was skipped in dry-run mode, so the binary may not exist
        if is_dry_run() {
            return Ok(path);
        }

        if !path.is_file() {
            anyhow::bail!(
                "Firmware binary not found after build: {:?} (environment {})",
                path,
                environment
            );
        }
        Ok(path)
    }
}
