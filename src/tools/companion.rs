//! Typed arguments for the companion repository's build command.

use crate::tool_args::ToolArgs;

/// The companion repository's own build command, invoked verbatim.
///
/// The manifest supplies the command as an argv vector; validation guarantees
/// it is non-empty before an invocation is constructed.
#[derive(Debug, Clone)]
pub struct CompanionBuildArgs {
    command: Vec<String>,
}

impl CompanionBuildArgs {
    /// Wrap a non-empty argv vector. Returns `None` for an empty command.
    pub fn new(command: &[String]) -> Option<Self> {
        if command.is_empty() {
            return None;
        }
        Some(Self {
            command: command.to_vec(),
        })
    }
}

impl ToolArgs for CompanionBuildArgs {
    fn program(&self) -> String {
        self.command[0].clone()
    }

    fn to_cli_args(&self) -> Vec<String> {
        self.command[1..].to_vec()
    }

    fn get_env_vars(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}
