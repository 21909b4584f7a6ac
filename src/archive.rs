//! Release archive assembly.
//!
//! One zip per configuration, containing the firmware binary at the root,
//! the configuration files under `config/`, the optional touchscreen
//! artifact, and the auxiliary build-include tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs::{self, File};
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::write::{FileOptions, ZipWriter};

/// Everything that goes into one configuration's archive
#[derive(Debug, Clone)]
pub struct ArchivePlan {
    /// Archive file name, from `archive_file_name`
    pub file_name: String,
    /// Built firmware binary
    pub firmware: PathBuf,
    /// Configuration files, packed under `config/`
    pub config_files: Vec<PathBuf>,
    /// Optional touchscreen artifact, packed at the root
    pub touchscreen: Option<PathBuf>,
    /// Auxiliary files as (source, archive path) pairs
    pub build_include: Vec<(PathBuf, String)>,
}

/// Dated archive name: `<project>-<config>-<YYYYMMDD>.zip`
pub fn archive_file_name(project: &str, config: &str, date: NaiveDate) -> String {
    format!("{}-{}-{}.zip", project, config, date.format("%Y%m%d"))
}

/// Write the archive into `dest_dir` and return its path
pub fn write_archive(plan: &ArchivePlan, dest_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dest_dir)
        .with_context(|| format!("Failed to create output directory {:?}", dest_dir))?;

    let dest = dest_dir.join(&plan.file_name);
    let file = File::create(&dest)
        .with_context(|| format!("Failed to create archive {:?}", dest))?;
    let mut zip = ZipWriter::new(file);

    add_file(&mut zip, &plan.firmware, "firmware.bin")?;

    for source in &plan.config_files {
        let name = source
            .file_name()
            .with_context(|| format!("Configuration file has no name: {:?}", source))?
            .to_string_lossy();
        add_file(&mut zip, source, &format!("config/{}", name))?;
    }

    if let Some(touchscreen) = &plan.touchscreen {
        let name = touchscreen
            .file_name()
            .with_context(|| format!("Touchscreen artifact has no name: {:?}", touchscreen))?
            .to_string_lossy();
        add_file(&mut zip, touchscreen, &name)?;
    }

    for (source, archive_path) in &plan.build_include {
        add_file(&mut zip, source, archive_path)?;
    }

    zip.finish()
        .with_context(|| format!("Failed to finish archive {:?}", dest))?;

    debug!("Wrote archive {:?}", dest);
    Ok(dest)
}

fn add_file<W: Write + Seek>(zip: &mut ZipWriter<W>, source: &Path, name: &str) -> Result<()> {
    zip.start_file::<_, ()>(name, FileOptions::default())
        .with_context(|| format!("Failed to start archive entry {}", name))?;
    let bytes =
        fs::read(source).with_context(|| format!("Failed to read {:?} for archiving", source))?;
    zip.write_all(&bytes)
        .with_context(|| format!("Failed to write archive entry {}", name))?;
    Ok(())
}
