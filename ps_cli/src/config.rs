//! Frontend configuration management.
//!
//! Consolidates all environment variable reads and applies command-line
//! overrides on top of them.

use std::path::PathBuf;

/// Default snapshot file when neither `--file` nor `TOURNAMENT_FILE` is set
pub const DEFAULT_FILE: &str = "tournament.json";

/// Complete frontend configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Snapshot file to load on startup and autosave into
    pub file: PathBuf,
    /// Seed for the tournament's random source (OS-seeded when absent)
    pub seed: Option<u64>,
    /// Save after every command that changes the tournament
    pub autosave: bool,
}

/// Values given on the command line; each one wins over its environment variable
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub file: Option<PathBuf>,
    pub seed: Option<u64>,
    pub no_autosave: bool,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `overrides` - Values parsed from the command line
    ///
    /// # Returns
    ///
    /// * `Result<CliConfig, ConfigError>` - Loaded configuration or error
    ///
    /// # Errors
    ///
    /// Returns error if `TOURNAMENT_SEED` is set but is not a number
    pub fn from_env(overrides: CliOverrides) -> Result<Self, ConfigError> {
        let file = overrides
            .file
            .or_else(|| std::env::var("TOURNAMENT_FILE").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE));

        let seed = match overrides.seed {
            Some(seed) => Some(seed),
            None => match std::env::var("TOURNAMENT_SEED") {
                Ok(raw) => Some(raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    var: "TOURNAMENT_SEED".to_string(),
                    reason: format!("Must be an unsigned integer, got '{}'", raw),
                })?),
                Err(_) => None,
            },
        };

        let autosave = !overrides.no_autosave && parse_env_or("TOURNAMENT_AUTOSAVE", true);

        Ok(CliConfig {
            file,
            seed,
            autosave,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                var: "TOURNAMENT_FILE".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.file.is_dir() {
            return Err(ConfigError::Invalid {
                var: "TOURNAMENT_FILE".to_string(),
                reason: format!("{} is a directory", self.file.display()),
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

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win() {
        let config = CliConfig::from_env(CliOverrides {
            file: Some(PathBuf::from("cup.json")),
            seed: Some(12),
            no_autosave: true,
        })
        .unwrap();

        assert_eq!(config.file, PathBuf::from("cup.json"));
        assert_eq!(config.seed, Some(12));
        assert!(!config.autosave);
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid {
            var: "TOURNAMENT_SEED".to_string(),
            reason: "Must be an unsigned integer".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("TOURNAMENT_SEED"));
        assert!(msg.contains("unsigned"));
    }

    #[test]
    fn test_validation_rejects_directory() {
        let config = CliConfig {
            file: std::env::temp_dir(),
            seed: None,
            autosave: true,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_empty_path() {
        let config = CliConfig {
            file: PathBuf::new(),
            seed: None,
            autosave: false,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_env_or_default() {
        let value: u32 = parse_env_or("PS_CLI_TEST_VARIABLE_THAT_IS_NEVER_SET", 7);
        assert_eq!(value, 7);
    }
}
