use crate::domain::column::ColumnId;
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};

/// How completed tasks are rewarded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// XP granted each time a task enters the terminal column
    pub xp_per_completion: u32,
    /// Session XP before any task is completed
    pub starting_xp: u64,
    /// The column that counts as "completed"
    pub terminal_column: ColumnId,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            xp_per_completion: 50,
            starting_xp: 0,
            terminal_column: ColumnId::Done,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub board_name: String,
    pub rewards: RewardConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_name: "Task Manager".to_string(),
            rewards: RewardConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Parses and validates a JSON config document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rewards.xp_per_completion == 0 {
            return Err(BoardError::ConfigError(
                "rewards.xp_per_completion must be greater than zero".to_string(),
            ));
        }
        if self.board_name.trim().is_empty() {
            return Err(BoardError::ConfigError(
                "board_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
