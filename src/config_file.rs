//! Release manifest handling for saving and loading release descriptions.
//!
//! The manifest is a JSON file describing one release run: where the firmware
//! project lives, which PlatformIO environment to build, where the example
//! configurations and output archives are, and the optional companion
//! repository and touchscreen artifact.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::CleanStrategy;

/// Secondary repository built with its own build script.
///
/// The build command is invoked verbatim inside `dir`; the zip artifact it
/// produces is picked up from `dist_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionSpec {
    /// Repository root, relative to the working directory or absolute
    pub dir: String,
    /// Build command as an argv vector, e.g. `["bash", "build.sh"]`
    pub build_command: Vec<String>,
    /// Directory (relative to `dir`) where the zip artifact appears
    pub dist_dir: String,
}

impl CompanionSpec {
    /// Companion repository root as a path
    pub fn dir_path(&self) -> &Path {
        Path::new(&self.dir)
    }

    /// Absolute-ish path of the artifact directory
    pub fn dist_path(&self) -> PathBuf {
        self.dir_path().join(&self.dist_dir)
    }
}

/// Release manifest that can be saved/loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseManifest {
    /// Short project name used in archive file names
    pub project_name: String,
    /// Firmware project root (must contain platformio.ini)
    pub project_dir: String,
    /// Default PlatformIO environment to build
    pub environment: String,

    /// Subdirectory of `project_dir` configuration files are copied into
    #[serde(default = "default_config_target")]
    pub config_target: String,
    /// Directory holding the named example-configuration directories
    #[serde(default = "default_configs_dir")]
    pub configs_dir: String,
    /// Directory release archives are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Clean step before each configuration build
    #[serde(default)]
    pub clean: CleanStrategy,

    /// Optional secondary repository whose zip artifact ships with the release
    #[serde(default)]
    pub companion: Option<CompanionSpec>,
    /// Optional prebuilt touchscreen firmware, included per configuration marker
    #[serde(default)]
    pub touchscreen_artifact: Option<String>,

    /// Program name of the PlatformIO CLI (overridable for tests)
    #[serde(default = "default_pio_bin")]
    pub pio_bin: String,
    /// Program name of the git CLI (overridable for tests)
    #[serde(default = "default_git_bin")]
    pub git_bin: String,
}

fn default_config_target() -> String {
    ".".to_string()
}

fn default_configs_dir() -> String {
    "configs".to_string()
}

fn default_output_dir() -> String {
    "release".to_string()
}

fn default_pio_bin() -> String {
    "pio".to_string()
}

fn default_git_bin() -> String {
    "git".to_string()
}

impl Default for ReleaseManifest {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            project_dir: ".".to_string(),
            environment: String::new(),
            config_target: default_config_target(),
            configs_dir: default_configs_dir(),
            output_dir: default_output_dir(),
            clean: CleanStrategy::default(),
            companion: None,
            touchscreen_artifact: None,
            pio_bin: default_pio_bin(),
            git_bin: default_git_bin(),
        }
    }
}

impl ReleaseManifest {
    /// Create a starter manifest with placeholder values for `fwpack init`
    pub fn starter() -> Self {
        Self {
            project_name: "my-firmware".to_string(),
            environment: "esp32dev".to_string(),
            ..Self::default()
        }
    }

    /// Save the manifest to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize manifest to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write manifest to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load a manifest from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read manifest from {:?}", path.as_ref()))?;

        let manifest: Self =
            serde_json::from_str(&content).context("Failed to parse manifest JSON")?;

        Ok(manifest)
    }

    /// Validate the manifest
    ///
    /// Only value-level checks happen here; filesystem existence is verified
    /// by the preflight checks right before a run.
    pub fn validate(&self) -> Result<()> {
        let name = self.project_name.trim();
        if name.is_empty() {
            anyhow::bail!("Project name must be specified");
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            anyhow::bail!(
                "Project name can only contain letters, numbers, dashes, underscores, and dots"
            );
        }

        if self.project_dir.trim().is_empty() {
            anyhow::bail!("Project directory must be specified");
        }

        if self.environment.trim().is_empty() {
            anyhow::bail!("PlatformIO environment must be specified");
        }
        if self.environment.contains(char::is_whitespace) {
            anyhow::bail!("PlatformIO environment cannot contain whitespace");
        }

        if self.configs_dir.trim().is_empty() {
            anyhow::bail!("Configurations directory must be specified");
        }
        if self.output_dir.trim().is_empty() {
            anyhow::bail!("Output directory must be specified");
        }

        let target = Path::new(&self.config_target);
        if target.is_absolute() {
            anyhow::bail!("Config target must be a relative path inside the project");
        }
        if target
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            anyhow::bail!("Config target cannot contain '..'");
        }

        if let Some(companion) = &self.companion {
            if companion.dir.trim().is_empty() {
                anyhow::bail!("Companion directory must be specified");
            }
            if companion.build_command.is_empty() {
                anyhow::bail!("Companion build command must not be empty");
            }
            if companion.dist_dir.trim().is_empty() {
                anyhow::bail!("Companion dist directory must be specified");
            }
        }

        if let Some(artifact) = &self.touchscreen_artifact {
            if artifact.trim().is_empty() {
                anyhow::bail!("Touchscreen artifact path must not be empty when set");
            }
        }

        if self.pio_bin.trim().is_empty() || self.git_bin.trim().is_empty() {
            anyhow::bail!("Tool program names must not be empty");
        }

        Ok(())
    }

    /// Firmware project root as a path
    pub fn project_path(&self) -> &Path {
        Path::new(&self.project_dir)
    }

    /// Directory the configuration files are copied into
    pub fn config_target_path(&self) -> PathBuf {
        self.project_path().join(&self.config_target)
    }

    /// Directory of example configurations as a path
    pub fn configs_path(&self) -> &Path {
        Path::new(&self.configs_dir)
    }

    /// Output directory as a path
    pub fn output_path(&self) -> &Path {
        Path::new(&self.output_dir)
    }

    /// Expected firmware binary location for an environment
    pub fn firmware_path(&self, environment: &str) -> PathBuf {
        self.project_path()
            .join(".pio")
            .join("build")
            .join(environment)
            .join("firmware.bin")
    }
}
