//! The linear release driver.
//!
//! One run: build the companion artifact, then for every example
//! configuration reset / clean / apply / build / archive, then a final
//! tracked-file reset and the checksum table. Any subprocess failure or
//! missing artifact aborts the run; the final reset is still attempted so the
//! project tree is not left with a half-applied configuration.

use crate::archive::{archive_file_name, write_archive, ArchivePlan};
use crate::builder::FirmwareBuilder;
use crate::checksum::{checksum_files, render_table, ChecksumEntry};
use crate::companion;
use crate::config_file::ReleaseManifest;
use crate::configs::{self, ExampleConfig};
use crate::process_guard::ProcessGuard;
use crate::tool_args::is_dry_run;
use crate::types::ChecksumAlgorithm;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;
use tracing::{info, warn};

/// What a release run produced
#[derive(Debug)]
pub struct ReleaseReport {
    /// Every archive staged in the output directory this run
    pub archives: Vec<PathBuf>,
    /// Digest per archive, in the same order
    pub checksums: Vec<ChecksumEntry>,
}

/// Executes one release run as described by the manifest
pub struct ReleaseRunner {
    manifest: ReleaseManifest,
    only: Vec<String>,
}

impl ReleaseRunner {
    pub fn new(manifest: ReleaseManifest) -> Self {
        Self {
            manifest,
            only: Vec::new(),
        }
    }

    /// Restrict the run to the named configurations
    pub fn with_filter(mut self, only: Vec<String>) -> Self {
        self.only = only;
        self
    }

    /// Execute the full release sequence
    pub fn run(&self) -> Result<ReleaseReport> {
        // Any exit path from here tears down running builds
        let _guard = ProcessGuard::new();

        let mut archives = Vec::new();

        if let Some(spec) = &self.manifest.companion {
            println!("🚀 Building companion repository...");
            if let Some(artifact) = companion::build_and_collect(spec, self.manifest.output_path())?
            {
                println!("✓ Companion artifact: {}", artifact.display());
                archives.push(artifact);
            }
        }

        let selected = self.select_configs()?;
        println!(
            "Found {} configuration(s): {}",
            selected.len(),
            selected
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let builder = FirmwareBuilder::new(&self.manifest);
        let result = self.run_configs(&builder, &selected, &mut archives);

        // Final tracked-file reset; on failure the original error wins
        match &result {
            Ok(()) => builder.reset_tracked()?,
            Err(_) => {
                if let Err(reset_err) = builder.reset_tracked() {
                    warn!("Tracked-file reset after failed run also failed: {}", reset_err);
                }
            }
        }
        result?;

        let checksums = if archives.is_empty() {
            Vec::new()
        } else {
            let entries = checksum_files(&archives, ChecksumAlgorithm::Sha256)
                .context("Failed to compute archive checksums")?;
            println!();
            print!("{}", render_table(&entries, ChecksumAlgorithm::Sha256));
            entries
        };

        Ok(ReleaseReport {
            archives,
            checksums,
        })
    }

    /// Discover configurations and apply the `--only` filter
    fn select_configs(&self) -> Result<Vec<ExampleConfig>> {
        let configs = configs::discover(self.manifest.configs_path())?;

        if self.only.is_empty() {
            return Ok(configs);
        }

        for name in &self.only {
            if !configs.iter().any(|c| &c.name == name) {
                anyhow::bail!("Unknown configuration '{}' in --only filter", name);
            }
        }

        Ok(configs
            .into_iter()
            .filter(|c| self.only.contains(&c.name))
            .collect())
    }

    fn run_configs(
        &self,
        builder: &FirmwareBuilder<'_>,
        selected: &[ExampleConfig],
        archives: &mut Vec<PathBuf>,
    ) -> Result<()> {
        for config in selected {
            let environment = config.environment_or(&self.manifest.environment);
            println!();
            println!(
                "🔧 Configuration {} (environment {})",
                config.name, environment
            );

            builder.reset_tracked()?;
            builder.clean(environment)?;

            if is_dry_run() {
                info!(
                    "[DRY RUN] Would apply {} configuration file(s) from {:?}",
                    config.config_files()?.len(),
                    config.dir
                );
            } else {
                let copied = config.apply(&self.manifest.config_target_path())?;
                info!("Applied {} configuration file(s)", copied.len());
            }

            builder.build(environment)?;
            let firmware = builder.locate_firmware(environment)?;

            let plan = self.archive_plan(config, firmware)?;
            if is_dry_run() {
                info!("[DRY RUN] Would write archive {}", plan.file_name);
            } else {
                let archive = write_archive(&plan, self.manifest.output_path())?;
                println!("✓ Archive: {}", archive.display());
                archives.push(archive);
            }
        }
        Ok(())
    }

    fn archive_plan(&self, config: &ExampleConfig, firmware: PathBuf) -> Result<ArchivePlan> {
        let touchscreen = if config.wants_touchscreen {
            let artifact = self
                .manifest
                .touchscreen_artifact
                .as_ref()
                .with_context(|| {
                    format!(
                        "Configuration '{}' requests the touchscreen artifact, but the \
                         manifest does not define touchscreen_artifact",
                        config.name
                    )
                })?;
            Some(PathBuf::from(artifact))
        } else {
            None
        };

        Ok(ArchivePlan {
            file_name: archive_file_name(
                &self.manifest.project_name,
                &config.name,
                Utc::now().date_naive(),
            ),
            firmware,
            config_files: config.config_files()?,
            touchscreen,
            build_include: config.build_include_files()?,
        })
    }
}
