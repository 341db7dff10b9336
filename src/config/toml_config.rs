use crate::config::GameConfig;
use crate::utils::error::{GameError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk layout: a single `[game]` table, every key optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub game: GameConfig,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| GameError::ConfigParse {
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn into_game_config(self) -> GameConfig {
        self.game
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.game.validate()
    }
}
