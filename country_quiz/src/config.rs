//! Quiz configuration.
//!
//! Consolidates every environment variable read and validates the result.
//! Command-line overrides take precedence over the environment.

use crate::{scores::MAX_SCORES, session::DEFAULT_TOTAL_SECS};
use std::path::PathBuf;

/// Default directory for persisted state
pub const DEFAULT_DATA_DIR: &str = ".country_quiz";

/// Longest allowed session (one day)
pub const MAX_TOTAL_SECS: u32 = 24 * 60 * 60;

/// Upper bound for the leaderboard size
pub const MAX_LEADERBOARD: usize = 100;

/// Complete quiz configuration
#[derive(Debug, Clone, PartialEq)]
pub struct QuizConfig {
    /// Session length in seconds
    pub total_secs: u32,
    /// Directory holding the persisted score history
    pub data_dir: PathBuf,
    /// Custom catalog JSON; the built-in catalog when `None`
    pub catalog_path: Option<PathBuf>,
    /// Leaderboard size
    pub max_scores: usize,
    /// Keep scores in memory only
    pub persist_scores: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            total_secs: DEFAULT_TOTAL_SECS,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_path: None,
            max_scores: MAX_SCORES,
            persist_scores: true,
        }
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub total_secs: Option<u32>,
    pub data_dir: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub max_scores: Option<usize>,
    pub no_save: bool,
}

impl QuizConfig {
    /// Load configuration from environment variables
    ///
    /// Recognized variables:
    /// - `CQ_TOTAL_SECS`: session length (default: 900)
    /// - `CQ_DATA_DIR`: score history directory (default: `.country_quiz`)
    /// - `CQ_CATALOG`: path to a catalog JSON file (default: built-in)
    /// - `CQ_MAX_SCORES`: leaderboard size (default: 10)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let total_secs = match overrides.total_secs {
            Some(secs) => secs,
            None => parse_env("CQ_TOTAL_SECS")?.unwrap_or(defaults.total_secs),
        };

        let data_dir = overrides
            .data_dir
            .or_else(|| env_non_empty("CQ_DATA_DIR").map(PathBuf::from))
            .unwrap_or(defaults.data_dir);

        let catalog_path = overrides
            .catalog_path
            .or_else(|| env_non_empty("CQ_CATALOG").map(PathBuf::from));

        let max_scores = match overrides.max_scores {
            Some(max) => max,
            None => parse_env("CQ_MAX_SCORES")?.unwrap_or(defaults.max_scores),
        };

        Ok(Self {
            total_secs,
            data_dir,
            catalog_path,
            max_scores,
            persist_scores: !overrides.no_save,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_secs == 0 || self.total_secs > MAX_TOTAL_SECS {
            return Err(ConfigError::Invalid {
                var: "CQ_TOTAL_SECS".to_string(),
                reason: format!("Must be between 1 and {MAX_TOTAL_SECS}"),
            });
        }

        if self.max_scores == 0 || self.max_scores > MAX_LEADERBOARD {
            return Err(ConfigError::Invalid {
                var: "CQ_MAX_SCORES".to_string(),
                reason: format!("Must be between 1 and {MAX_LEADERBOARD}"),
            });
        }

        if let Some(path) = &self.catalog_path
            && !path.is_file()
        {
            return Err(ConfigError::Invalid {
                var: "CQ_CATALOG".to_string(),
                reason: format!("{} is not a file", path.display()),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an optional environment variable, failing loudly on bad values
fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env_non_empty(key)
        .map(|raw| {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                var: key.to_string(),
                reason: format!("'{raw}': {e}"),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: env-mutating tests are serialized with #[serial].
        unsafe {
            for key in ["CQ_TOTAL_SECS", "CQ_DATA_DIR", "CQ_CATALOG", "CQ_MAX_SCORES"] {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_env();
        let config = QuizConfig::from_env(ConfigOverrides::default()).unwrap();
        assert_eq!(config, QuizConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_env_values_are_read() {
        clear_env();
        // SAFETY: serialized test.
        unsafe {
            std::env::set_var("CQ_TOTAL_SECS", "120");
            std::env::set_var("CQ_DATA_DIR", "/tmp/quiz");
            std::env::set_var("CQ_MAX_SCORES", "5");
        }
        let config = QuizConfig::from_env(ConfigOverrides::default()).unwrap();
        clear_env();

        assert_eq!(config.total_secs, 120);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/quiz"));
        assert_eq!(config.max_scores, 5);
    }

    #[test]
    #[serial]
    fn test_overrides_beat_env() {
        clear_env();
        // SAFETY: serialized test.
        unsafe {
            std::env::set_var("CQ_TOTAL_SECS", "120");
        }
        let config = QuizConfig::from_env(ConfigOverrides {
            total_secs: Some(60),
            no_save: true,
            ..Default::default()
        })
        .unwrap();
        clear_env();

        assert_eq!(config.total_secs, 60);
        assert!(!config.persist_scores);
    }

    #[test]
    #[serial]
    fn test_unparsable_env_is_an_error() {
        clear_env();
        // SAFETY: serialized test.
        unsafe {
            std::env::set_var("CQ_TOTAL_SECS", "fifteen");
        }
        let err = QuizConfig::from_env(ConfigOverrides::default()).unwrap_err();
        clear_env();

        assert!(err.to_string().contains("CQ_TOTAL_SECS"));
    }

    #[test]
    fn test_validation_rejects_zero_length() {
        let config = QuizConfig {
            total_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { var, .. }) if var == "CQ_TOTAL_SECS"
        ));
    }

    #[test]
    fn test_validation_rejects_oversized_leaderboard() {
        let config = QuizConfig {
            max_scores: MAX_LEADERBOARD + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_missing_catalog_file() {
        let config = QuizConfig {
            catalog_path: Some(PathBuf::from("/definitely/not/here.json")),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
