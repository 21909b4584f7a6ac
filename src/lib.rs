//! fwpack Library
//!
//! This library provides the core functionality for the PlatformIO release
//! packaging driver: manifest handling, configuration discovery, typed
//! external-tool invocations, archive assembly, and the linear release
//! sequence itself.

pub mod archive;
pub mod builder;
pub mod checksum;
pub mod cli;
pub mod companion;
pub mod config_file;
pub mod configs;
pub mod error;
pub mod preflight;
pub mod process_guard;
pub mod release;
pub mod tool_args;
pub mod tool_runner;
pub mod tools;
pub mod types;

// Re-export main types for convenience
pub use archive::{archive_file_name, write_archive, ArchivePlan};
pub use builder::FirmwareBuilder;
pub use checksum::{checksum_files, collect_archives, file_digest, render_table, ChecksumEntry};
pub use config_file::{CompanionSpec, ReleaseManifest};
pub use configs::{discover, ExampleConfig};
pub use error::ReleaseError;
pub use process_guard::{ChildRegistry, CommandProcessGroup, ProcessGuard};
pub use release::{ReleaseReport, ReleaseRunner};
pub use tool_args::{disable_dry_run, enable_dry_run, is_dry_run, ToolArgs};
pub use tool_runner::{run_tool, run_tool_streaming, ToolOutput};
pub use tools::companion::CompanionBuildArgs;
pub use tools::git::GitCheckoutArgs;
pub use tools::pio::PioRunArgs;
pub use types::{ChecksumAlgorithm, CleanStrategy};
