//! Typed arguments for the PlatformIO CLI.

use crate::tool_args::ToolArgs;
use crate::types::CleanStrategy;

/// Arguments for `pio run`.
///
/// Covers both the build invocation (`pio run -e ENV`) and the clean targets
/// (`pio run -e ENV -t clean|fullclean`).
#[derive(Debug, Clone)]
pub struct PioRunArgs {
    /// Program name of the PlatformIO CLI (usually `pio`)
    pub pio_bin: String,
    /// Environment to build (`-e`)
    pub environment: String,
    /// Optional run target (`-t`), e.g. `clean`
    pub target: Option<String>,
}

impl PioRunArgs {
    /// Build the given environment
    pub fn build(pio_bin: &str, environment: &str) -> Self {
        Self {
            pio_bin: pio_bin.to_string(),
            environment: environment.to_string(),
            target: None,
        }
    }

    /// Clean invocation for the given strategy, or `None` when the strategy
    /// has no clean step
    pub fn clean(pio_bin: &str, environment: &str, strategy: CleanStrategy) -> Option<Self> {
        strategy.pio_target().map(|target| Self {
            pio_bin: pio_bin.to_string(),
            environment: environment.to_string(),
            target: Some(target.to_string()),
        })
    }
}

impl ToolArgs for PioRunArgs {
    fn program(&self) -> String {
        self.pio_bin.clone()
    }

    fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            "-e".to_string(),
            self.environment.clone(),
        ];
        if let Some(target) = &self.target {
            args.push("-t".to_string());
            args.push(target.clone());
        }
        args
    }

    fn get_env_vars(&self) -> Vec<(String, String)> {
        // Progress bars garble line-buffered capture
        vec![(
            "PLATFORMIO_DISABLE_PROGRESSBAR".to_string(),
            "true".to_string(),
        )]
    }
}
