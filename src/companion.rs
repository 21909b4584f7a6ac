//! Companion repository build and artifact collection.
//!
//! The companion repo (typically a web UI) owns its build: fwpack invokes the
//! configured command verbatim inside the repo, then picks up the newest zip
//! from its dist directory and stages it next to the firmware archives.

use crate::config_file::CompanionSpec;
use crate::tool_args::is_dry_run;
use crate::tool_runner::run_tool_streaming;
use crate::tools::companion::CompanionBuildArgs;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Build the companion repository and stage its zip artifact in `output_dir`.
///
/// Returns the staged path, or `None` in dry-run mode (the build command is
/// skipped, so there is no artifact to collect).
pub fn build_and_collect(spec: &CompanionSpec, output_dir: &Path) -> Result<Option<PathBuf>> {
    let args = CompanionBuildArgs::new(&spec.build_command)
        .context("Companion build command is empty")?;

    let output = run_tool_streaming(&args, spec.dir_path())?;
    output.ensure_success("Companion build")?;

    if is_dry_run() {
        info!("[DRY RUN] Skipping companion artifact collection");
        return Ok(None);
    }

    let artifact = newest_zip(&spec.dist_path())?;
    let name = artifact
        .file_name()
        .context("Companion artifact has no file name")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;
    let dest = output_dir.join(name);
    fs::copy(&artifact, &dest)
        .with_context(|| format!("Failed to stage companion artifact {:?}", artifact))?;

    info!("Staged companion artifact {:?}", dest);
    Ok(Some(dest))
}

/// Newest zip in the dist directory, by modification time.
/// The companion build script names its artifact however it likes; the most
/// recently written zip is the one this run produced.
fn newest_zip(dist: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(dist)
        .with_context(|| format!("Failed to read companion dist directory {:?}", dist))?;

    let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "zip") {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        if newest.as_ref().is_none_or(|(time, _)| modified > *time) {
            newest = Some((modified, path));
        }
    }

    newest
        .map(|(_, path)| path)
        .with_context(|| format!("No zip artifact found in {:?}", dist))
}
