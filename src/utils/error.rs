use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid config value for {field} ({value}): {reason}")]
    Config {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Config parsing error: {message}")]
    ConfigParse { message: String },

    #[error("Game state error: {message}")]
    State { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GameError {
    pub fn config(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        GameError::Config {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn state(message: impl Into<String>) -> Self {
        GameError::State {
            message: message.into(),
        }
    }

    /// Config and state errors stop the game before (or instead of) a round.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GameError::Config { .. } | GameError::ConfigParse { .. } | GameError::State { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GameError::Config { field, reason, .. } => {
                format!("The game settings are invalid: `{}` {}", field, reason)
            }
            GameError::ConfigParse { .. } => {
                "The config file could not be read as TOML".to_string()
            }
            GameError::State { .. } => "The game reached an impossible state".to_string(),
            GameError::Io(e) => format!("File or terminal error: {}", e),
            GameError::Serialization(_) => "Failed to encode a game event".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
