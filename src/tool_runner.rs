//! Type-Safe External Tool Execution
//!
//! This module provides the ONLY sanctioned way to execute the external tools
//! fwpack drives (PlatformIO, git, the companion build script). All
//! subprocess execution MUST go through `run_tool` or `run_tool_streaming`
//! to ensure:
//!
//! - Process group isolation (whole build trees die together)
//! - Proper PID registration for signal-time cleanup
//! - Type-safe argument passing via the `ToolArgs` trait
//! - Dry-run short-circuiting

use crate::process_guard::{ChildRegistry, CommandProcessGroup};
use crate::tool_args::{is_dry_run, ToolArgs};
use anyhow::{Context, Result};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::info;

/// Output from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Standard output from the tool.
    pub stdout: String,
    /// Standard error from the tool.
    pub stderr: String,
    /// Exit code (None if terminated by signal).
    pub exit_code: Option<i32>,
    /// Whether the tool exited successfully (exit code 0).
    pub success: bool,
    /// Whether the invocation was skipped because of dry-run mode.
    pub dry_run: bool,
}

impl ToolOutput {
    /// Check if the tool succeeded and return an error if not.
    pub fn ensure_success(&self, context: &str) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            let code = self.exit_code.unwrap_or(-1);
            anyhow::bail!(
                "{} failed (exit code {}): {}",
                context,
                code,
                self.stderr.trim()
            )
        }
    }

    fn skipped(description: &str) -> Self {
        Self {
            stdout: format!("[DRY RUN] Skipped: {}\n", description),
            stderr: String::new(),
            exit_code: Some(0),
            success: true,
            dry_run: true,
        }
    }
}

/// Execute an external tool with type-safe arguments, capturing its output.
///
/// The child runs in its own process group and is registered with the global
/// registry so signal-time cleanup can reach it. A non-zero exit is NOT an
/// error at this layer; callers decide via `ensure_success`.
pub fn run_tool<T: ToolArgs>(args: &T, cwd: &Path) -> Result<ToolOutput> {
    let program = args.program();
    let cli_args = args.to_cli_args();
    let env_vars = args.get_env_vars();

    // Log exact command and environment for transparency
    info!(
        "run_tool: {} {:?} (cwd {:?}) env={:?}",
        program, cli_args, cwd, env_vars
    );

    if is_dry_run() {
        return Ok(ToolOutput::skipped(&format!(
            "{} {}",
            program,
            cli_args.join(" ")
        )));
    }

    let mut cmd = Command::new(&program);
    cmd.args(&cli_args)
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .stdin(Stdio::null())
        .in_new_process_group();

    for (key, value) in &env_vars {
        cmd.env(key, value);
    }

    let child = cmd
        .spawn()
        .with_context(|| format!("Failed to spawn tool: {}", program))?;
    let pid = child.id();

    register_child(pid);
    let output = child
        .wait_with_output()
        .with_context(|| format!("Failed waiting for tool: {}", program));
    unregister_child(pid);
    let output = output?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code();
    let success = output.status.success();

    if success {
        info!("Tool {} executed successfully", program);
    } else {
        info!(
            "Tool {} failed with exit code {}",
            program,
            exit_code.unwrap_or(-1)
        );
    }

    Ok(ToolOutput {
        stdout,
        stderr,
        exit_code,
        success,
        dry_run: false,
    })
}

/// Execute an external tool, relaying its stdout line by line.
///
/// Long builds print compiler output as it happens; the lines are also
/// captured in the returned `ToolOutput`. stderr is captured and reported on
/// completion.
pub fn run_tool_streaming<T: ToolArgs>(args: &T, cwd: &Path) -> Result<ToolOutput> {
    let program = args.program();
    let cli_args = args.to_cli_args();
    let env_vars = args.get_env_vars();

    info!(
        "run_tool_streaming: {} {:?} (cwd {:?}) env={:?}",
        program, cli_args, cwd, env_vars
    );

    if is_dry_run() {
        return Ok(ToolOutput::skipped(&format!(
            "{} {}",
            program,
            cli_args.join(" ")
        )));
    }

    let mut cmd = Command::new(&program);
    cmd.args(&cli_args)
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .stdin(Stdio::null())
        .in_new_process_group();

    for (key, value) in &env_vars {
        cmd.env(key, value);
    }

    let mut child = cmd
        .spawn()
        .with_context(|| format!("Failed to spawn tool: {}", program))?;
    let pid = child.id();
    register_child(pid);

    let mut captured = String::new();
    if let Some(stdout) = child.stdout.take() {
        let reader = BufReader::new(stdout);
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    println!("{}", line);
                    captured.push_str(&line);
                    captured.push('\n');
                }
                Err(e) => {
                    let _ = child.wait();
                    unregister_child(pid);
                    return Err(e).with_context(|| format!("Failed reading output of {}", program));
                }
            }
        }
    }

    let output = child
        .wait_with_output()
        .with_context(|| format!("Failed waiting for tool: {}", program));
    unregister_child(pid);
    let output = output?;

    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code();
    let success = output.status.success();

    if success {
        info!("Tool {} executed successfully", program);
    } else {
        info!(
            "Tool {} failed with exit code {}",
            program,
            exit_code.unwrap_or(-1)
        );
    }

    Ok(ToolOutput {
        stdout: captured,
        stderr,
        exit_code,
        success,
        dry_run: false,
    })
}

fn register_child(pid: u32) {
    let registry = ChildRegistry::global();
    // Lock is held briefly, panic is acceptable if poisoned
    let mut guard = registry.lock().expect("ChildRegistry mutex poisoned");
    guard.register(pid);
}

fn unregister_child(pid: u32) {
    let registry = ChildRegistry::global();
    let mut guard = registry.lock().expect("ChildRegistry mutex poisoned");
    guard.unregister(pid);
}
