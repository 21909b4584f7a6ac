//! Example-configuration discovery and application.
//!
//! Every subdirectory of the configurations directory is one named example
//! configuration. Its top-level regular files are the configuration files
//! copied into the firmware tree before a build; a couple of well-known
//! marker/text files tune the packaging:
//!
//! - `environment.txt` overrides the PlatformIO environment for this
//!   configuration (first line, trimmed)
//! - `touchscreen.txt` requests inclusion of the touchscreen artifact
//! - `build-include/` holds auxiliary files packed into the archive verbatim
//!
//! Marker/text files are never copied into the project tree and never packed
//! as configuration files.

use crate::error::{ReleaseError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Per-configuration environment override file
pub const ENVIRONMENT_FILE: &str = "environment.txt";
/// Per-configuration touchscreen inclusion marker
pub const TOUCHSCREEN_MARKER: &str = "touchscreen.txt";
/// Per-configuration auxiliary file directory
pub const BUILD_INCLUDE_DIR: &str = "build-include";

/// One named example configuration
#[derive(Debug, Clone)]
pub struct ExampleConfig {
    /// Directory name, used in archive names and progress output
    pub name: String,
    /// Configuration directory
    pub dir: PathBuf,
    /// Environment override from `environment.txt`, if present
    pub environment: Option<String>,
    /// Whether `touchscreen.txt` is present
    pub wants_touchscreen: bool,
}

impl ExampleConfig {
    /// Load a configuration from its directory
    pub fn load(dir: &Path) -> Result<Self> {
        let name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ReleaseError::config(format!("Unreadable directory name: {:?}", dir)))?
            .to_string();

        if !is_valid_name(&name) {
            return Err(ReleaseError::validation(format!(
                "Invalid configuration name '{}': only letters, numbers, dashes, \
                 underscores, and dots are allowed",
                name
            )));
        }

        let environment = read_environment_override(&dir.join(ENVIRONMENT_FILE), &name)?;
        let wants_touchscreen = dir.join(TOUCHSCREEN_MARKER).is_file();

        Ok(Self {
            name,
            dir: dir.to_path_buf(),
            environment,
            wants_touchscreen,
        })
    }

    /// Environment this configuration builds with, given the manifest default
    pub fn environment_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.environment.as_deref().unwrap_or(default)
    }

    /// Configuration files: sorted top-level regular files, markers excluded
    pub fn config_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if file_name == ENVIRONMENT_FILE || file_name == TOUCHSCREEN_MARKER {
                continue;
            }
            files.push(path);
        }
        files.sort();
        Ok(files)
    }

    /// Auxiliary files from `build-include/`, as (source, archive path) pairs.
    /// Relative paths inside the directory are preserved.
    pub fn build_include_files(&self) -> Result<Vec<(PathBuf, String)>> {
        let root = self.dir.join(BUILD_INCLUDE_DIR);
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        collect_files(&root, &root, &mut files)?;
        files.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(files)
    }

    /// Copy the configuration files into the target directory, overwriting
    /// tracked files. Returns the copied file names.
    pub fn apply(&self, target: &Path) -> Result<Vec<String>> {
        fs::create_dir_all(target)?;

        let mut copied = Vec::new();
        for source in self.config_files()? {
            let file_name = source
                .file_name()
                .ok_or_else(|| {
                    ReleaseError::config(format!("Unreadable file name: {:?}", source))
                })?
                .to_string_lossy()
                .to_string();

            let dest = target.join(&file_name);
            fs::copy(&source, &dest)?;
            debug!("Applied {} -> {:?}", file_name, dest);
            copied.push(file_name);
        }
        Ok(copied)
    }
}

/// Configuration names end up in archive file names, so keep them to a safe
/// character set and never hidden-file names.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
}

/// Discover all example configurations, sorted by name.
///
/// An empty or missing configurations directory is an error: a release run
/// with nothing to build is a setup mistake, not a no-op.
pub fn discover(configs_dir: &Path) -> Result<Vec<ExampleConfig>> {
    if !configs_dir.is_dir() {
        return Err(ReleaseError::config(format!(
            "Configurations directory not found: {:?}",
            configs_dir
        )));
    }

    let mut configs = Vec::new();
    for entry in fs::read_dir(configs_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        configs.push(ExampleConfig::load(&path)?);
    }

    if configs.is_empty() {
        return Err(ReleaseError::config(format!(
            "No example configurations found in {:?}",
            configs_dir
        )));
    }

    configs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(configs)
}

fn read_environment_override(path: &Path, config: &str) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let environment = content.lines().next().unwrap_or("").trim().to_string();
    if environment.is_empty() {
        return Err(ReleaseError::config(format!(
            "{} in configuration '{}' is empty",
            ENVIRONMENT_FILE, config
        )));
    }
    Ok(Some(environment))
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<(PathBuf, String)>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, out)?;
        } else if path.is_file() {
            let rel = path
                .strip_prefix(root)
                .map_err(|_| {
                    ReleaseError::config(format!("Path escapes build-include root: {:?}", path))
                })?
                .to_string_lossy()
                .to_string();
            out.push((path, rel));
        }
    }
    Ok(())
}
