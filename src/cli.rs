use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fwpack - release packaging for PlatformIO firmware projects
#[derive(Parser)]
#[command(name = "fwpack")]
#[command(about = "Builds every example configuration and packages dated release archives")]
#[command(version)]
pub struct Cli {
    /// Dry-run mode: show what would be executed without making changes.
    ///
    /// In this mode, mutating subprocesses (tracked-file reset, clean, build,
    /// companion build) and archive writes are skipped and logged. Read-only
    /// discovery still executes so the preview is realistic.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full release: companion build, every configuration, checksums
    Release {
        /// Path to the release manifest
        #[arg(short, long, default_value = "release.json")]
        manifest: PathBuf,

        /// Only build the named configurations (repeatable)
        #[arg(long)]
        only: Vec<String>,

        /// Override the manifest's output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Validate a release manifest
    Validate {
        /// Path to the manifest to validate
        manifest: PathBuf,
    },
    /// List the example configurations a manifest points at
    List {
        /// Path to the release manifest
        #[arg(short, long, default_value = "release.json")]
        manifest: PathBuf,
    },
    /// Print the checksum table for archives in a directory
    Checksum {
        /// Directory holding the archives
        #[arg(default_value = "release")]
        dir: PathBuf,

        /// Digest algorithm (sha256, sha512)
        #[arg(short, long, default_value = "sha256")]
        algorithm: String,
    },
    /// Write a starter manifest
    Init {
        /// Where to write the manifest
        #[arg(default_value = "release.json")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
