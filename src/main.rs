//! fwpack - Main entry point
//!
//! A release packaging driver for PlatformIO firmware projects: builds every
//! example configuration and packages dated release archives.

use std::path::Path;

use tracing::{debug, error, info};

use fwpack::checksum;
use fwpack::cli::{Cli, Commands};
use fwpack::config_file::ReleaseManifest;
use fwpack::configs;
use fwpack::error;
use fwpack::preflight;
use fwpack::process_guard;
use fwpack::release::ReleaseRunner;
use fwpack::tool_args;
use fwpack::types::ChecksumAlgorithm;

/// Initialize the logger with appropriate settings
fn init_logger() {
    use tracing_subscriber::EnvFilter;

    // RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Main application entry point
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    info!("fwpack starting up");

    // Initialize signal handlers for graceful child process cleanup.
    // This ensures a running build is terminated if we receive SIGINT/SIGTERM.
    if let Err(e) = process_guard::init_signal_handlers() {
        tracing::warn!("Failed to initialize signal handlers: {}", e);
        // Continue anyway - cleanup will still work via Drop
    }
    debug!("Signal handlers initialized");

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    if cli.dry_run {
        info!("Dry-run mode enabled");
        tool_args::enable_dry_run();
    }

    match cli.command {
        Commands::Release {
            manifest,
            only,
            output_dir,
        } => {
            run_release(&manifest, only, output_dir)?;
        }
        Commands::Validate { manifest } => {
            run_validate(&manifest);
        }
        Commands::List { manifest } => {
            run_list(&manifest)?;
        }
        Commands::Checksum { dir, algorithm } => {
            run_checksum(&dir, &algorithm)?;
        }
        Commands::Init { path, force } => {
            run_init(&path, force)?;
        }
    }

    Ok(())
}

/// Load and validate a manifest, with user-facing progress
fn load_manifest(path: &Path) -> Result<ReleaseManifest, Box<dyn std::error::Error>> {
    info!("Loading manifest from: {:?}", path);
    let manifest = ReleaseManifest::load_from_file(path)?;
    manifest.validate()?;
    println!("✓ Manifest loaded and validated: {:?}", path);
    Ok(manifest)
}

/// Run the full release sequence
fn run_release(
    manifest_path: &Path,
    only: Vec<String>,
    output_dir: Option<std::path::PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut manifest = load_manifest(manifest_path)?;

    if let Some(dir) = output_dir {
        manifest.output_dir = dir.to_string_lossy().to_string();
    }

    if tool_args::is_dry_run() {
        info!("Skipping pre-flight checks in dry-run mode");
    } else {
        preflight::run_preflight_checks(&manifest);
    }

    println!("🚀 Starting release for {}...", manifest.project_name);

    let report = ReleaseRunner::new(manifest).with_filter(only).run()?;

    println!();
    println!("✅ Release complete: {} archive(s)", report.archives.len());
    Ok(())
}

/// Validate a manifest file and report the result
fn run_validate(manifest_path: &Path) {
    info!("Validating manifest file: {:?}", manifest_path);
    match ReleaseManifest::load_from_file(manifest_path) {
        Ok(manifest) => match manifest.validate() {
            Ok(_) => {
                info!("Manifest validation successful");
                println!("✓ Manifest file is valid: {:?}", manifest_path);
            }
            Err(e) => {
                error!("Manifest validation failed: {}", e);
                eprintln!("✗ Manifest validation failed: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to load manifest file: {}", e);
            eprintln!("✗ Failed to load manifest file: {}", e);
            std::process::exit(1);
        }
    }
}

/// List the example configurations a manifest points at
fn run_list(manifest_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let manifest = load_manifest(manifest_path)?;
    let configs = configs::discover(manifest.configs_path())?;

    println!("Configurations in {:?}:", manifest.configs_path());
    for config in &configs {
        let mut notes = Vec::new();
        if config.environment.is_some() {
            notes.push("environment override");
        }
        if config.wants_touchscreen {
            notes.push("touchscreen");
        }
        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!(" [{}]", notes.join(", "))
        };
        println!(
            "  {} (environment {}){}",
            config.name,
            config.environment_or(&manifest.environment),
            notes
        );
    }
    Ok(())
}

/// Print the checksum table for existing archives
fn run_checksum(dir: &Path, algorithm: &str) -> Result<(), Box<dyn std::error::Error>> {
    // Parse algorithm string into typed enum
    let algorithm: ChecksumAlgorithm = algorithm.parse().unwrap_or_else(|_| {
        eprintln!("❌ Unknown algorithm '{}'", algorithm);
        eprintln!("   Valid algorithms: sha256, sha512");
        std::process::exit(1);
    });

    let archives = checksum::collect_archives(dir)?;
    let entries = checksum::checksum_files(&archives, algorithm)?;
    print!("{}", checksum::render_table(&entries, algorithm));
    Ok(())
}

/// Write a starter manifest
fn run_init(path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() && !force {
        return Err(error::general_error(format!(
            "{:?} already exists (use --force to overwrite)",
            path
        ))
        .into());
    }

    ReleaseManifest::starter().save_to_file(path)?;
    println!("✓ Wrote starter manifest to {:?}", path);
    println!("  Edit project_name, project_dir, and environment before releasing.");
    Ok(())
}
