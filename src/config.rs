//! Configuration management for pebblechain

use crate::blockchain::{DEFAULT_DIFFICULTY, DEFAULT_MINING_REWARD, MAX_AMOUNT, MAX_DIFFICULTY};
use crate::error::ChainError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    #[serde(default = "default_difficulty")]
    pub difficulty: u32,
    #[serde(default = "default_mining_reward")]
    pub mining_reward: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            difficulty: default_difficulty(),
            mining_reward: default_mining_reward(),
        }
    }
}

fn default_difficulty() -> u32 {
    DEFAULT_DIFFICULTY
}

fn default_mining_reward() -> u64 {
    DEFAULT_MINING_REWARD
}

impl ChainConfig {
    /// Reads the configuration from a TOML file. A missing or empty file
    /// yields the defaults, so running without one always works.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChainError> {
        let config_str = fs::read_to_string(path).unwrap_or_default();
        let config: ChainConfig = if config_str.is_empty() {
            ChainConfig::default()
        } else {
            toml::from_str(&config_str)
                .map_err(|e| ChainError::ConfigError(format!("Failed to parse config: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate critical values
    pub fn validate(&self) -> Result<(), ChainError> {
        if self.difficulty > MAX_DIFFICULTY {
            return Err(ChainError::ConfigError(format!(
                "difficulty must be at most {} (got {})",
                MAX_DIFFICULTY, self.difficulty
            )));
        }
        if self.mining_reward > MAX_AMOUNT {
            return Err(ChainError::ConfigError(format!(
                "mining_reward must be at most {} (got {})",
                MAX_AMOUNT, self.mining_reward
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let config = ChainConfig::load("definitely-not-a-real-config.toml").unwrap();
        assert_eq!(config.difficulty, DEFAULT_DIFFICULTY);
        assert_eq!(config.mining_reward, DEFAULT_MINING_REWARD);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chain.toml");
        std::fs::write(&path, "difficulty = 3\n").unwrap();

        let config = ChainConfig::load(&path).unwrap();
        assert_eq!(config.difficulty, 3);
        assert_eq!(config.mining_reward, DEFAULT_MINING_REWARD);
    }

    #[test]
    fn test_rejects_unmeetable_difficulty() {
        let config = ChainConfig {
            difficulty: MAX_DIFFICULTY + 1,
            ..ChainConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_mining_reward() {
        let config = ChainConfig {
            mining_reward: MAX_AMOUNT + 1,
            ..ChainConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chain.toml");
        std::fs::write(&path, "difficulty = \"lots\"\n").unwrap();

        let result = ChainConfig::load(&path);
        assert!(matches!(result, Err(ChainError::ConfigError(_))));
    }
}
