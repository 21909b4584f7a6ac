//! Type-safe external-tool argument contracts.
//!
//! This module provides the `ToolArgs` trait for ensuring compile-time
//! correctness of subprocess invocations. Instead of raw string vectors,
//! Rust structs implement this trait to produce validated CLI arguments and
//! environment variables.
//!
//! # Design Goals
//!
//! 1. **Compile-Time Safety**: Argument mismatches (e.g., `-e` vs `--env`)
//!    are caught at compile time, not runtime.
//! 2. **Single Source of Truth**: The struct definition IS the contract.
//! 3. **Environment Contracts**: Tool behavior toggles are passed via env
//!    vars, matching each tool's documented interface.

use std::sync::atomic::{AtomicBool, Ordering};

/// Trait for typed subprocess arguments.
///
/// Implementors define the mapping between Rust struct fields and the flags
/// and environment variables an external tool expects. This ensures the
/// compiler catches flag mismatches.
///
/// # Contract
///
/// - `program()`: Returns the program to execute (resolved via PATH).
/// - `to_cli_args()`: Returns CLI arguments exactly as the tool expects them.
/// - `get_env_vars()`: Returns environment variables set for the invocation.
pub trait ToolArgs {
    /// Program to execute
    fn program(&self) -> String;

    /// Convert struct fields to CLI arguments.
    ///
    /// Example: `["run", "-e", "esp32dev", "-t", "clean"]`
    fn to_cli_args(&self) -> Vec<String>;

    /// Get environment variables for the invocation.
    ///
    /// Example: `[("PLATFORMIO_DISABLE_PROGRESSBAR", "true")]`
    fn get_env_vars(&self) -> Vec<(String, String)>;
}

/// Global dry-run flag.
///
/// When enabled, the runner logs what it would execute and skips the actual
/// subprocess. Read-only discovery still executes so previews stay realistic.
static DRY_RUN: AtomicBool = AtomicBool::new(false);

/// Enable dry-run mode for all subsequent tool invocations
pub fn enable_dry_run() {
    DRY_RUN.store(true, Ordering::SeqCst);
}

/// Disable dry-run mode
pub fn disable_dry_run() {
    DRY_RUN.store(false, Ordering::SeqCst);
}

/// Check whether dry-run mode is enabled
pub fn is_dry_run() -> bool {
    DRY_RUN.load(Ordering::SeqCst)
}
