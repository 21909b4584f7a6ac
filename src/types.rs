//! Type-safe release options for fwpack
//!
//! This module replaces stringly-typed option values with proper Rust enums
//! that provide compile-time validation and exhaustive matching.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Clean step executed before each configuration build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CleanStrategy {
    /// `pio run -t clean` (removes build objects for the environment)
    #[default]
    Clean,
    /// `pio run -t fullclean` (removes the whole build directory)
    FullClean,
    /// No clean step between configurations
    None,
}

impl CleanStrategy {
    /// PlatformIO target implementing this strategy, if any
    pub fn pio_target(&self) -> Option<&'static str> {
        match self {
            Self::Clean => Some("clean"),
            Self::FullClean => Some("fullclean"),
            Self::None => None,
        }
    }
}

/// Digest algorithm for the checksum table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChecksumAlgorithm {
    #[default]
    Sha256,
    Sha512,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strategy_parse() {
        assert_eq!("clean".parse::<CleanStrategy>().unwrap(), CleanStrategy::Clean);
        assert_eq!(
            "fullclean".parse::<CleanStrategy>().unwrap(),
            CleanStrategy::FullClean
        );
        assert_eq!("none".parse::<CleanStrategy>().unwrap(), CleanStrategy::None);
        assert!("scrub".parse::<CleanStrategy>().is_err());
    }

    #[test]
    fn test_clean_strategy_targets() {
        assert_eq!(CleanStrategy::Clean.pio_target(), Some("clean"));
        assert_eq!(CleanStrategy::FullClean.pio_target(), Some("fullclean"));
        assert_eq!(CleanStrategy::None.pio_target(), None);
    }

    #[test]
    fn test_checksum_algorithm_display() {
        assert_eq!(ChecksumAlgorithm::Sha256.to_string(), "sha256");
        assert_eq!(ChecksumAlgorithm::Sha512.to_string(), "sha512");
    }
}
