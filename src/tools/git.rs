//! Typed arguments for git invocations.

use crate::tool_args::ToolArgs;

/// Arguments for `git checkout -- <pathspec>`.
///
/// Used to reset tracked files after configuration files have been copied
/// over them, before the next configuration and at the end of the run.
#[derive(Debug, Clone)]
pub struct GitCheckoutArgs {
    /// Program name of the git CLI (usually `git`)
    pub git_bin: String,
    /// Pathspec to restore; `.` restores everything tracked
    pub pathspec: Vec<String>,
}

impl GitCheckoutArgs {
    /// Restore every tracked file in the working tree
    pub fn reset_all(git_bin: &str) -> Self {
        Self {
            git_bin: git_bin.to_string(),
            pathspec: vec![".".to_string()],
        }
    }
}

impl ToolArgs for GitCheckoutArgs {
    fn program(&self) -> String {
        self.git_bin.clone()
    }

    fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec!["checkout".to_string(), "--".to_string()];
        args.extend(self.pathspec.iter().cloned());
        args
    }

    fn get_env_vars(&self) -> Vec<(String, String)> {
        // Never block the run waiting for credentials
        vec![("GIT_TERMINAL_PROMPT".to_string(), "0".to_string())]
    }
}
