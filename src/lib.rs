pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::config::{toml_config::TomlConfig, GameConfig};
pub use crate::core::{game::GameController, session::GameSession};
pub use crate::domain::model::{DataItem, InboundEvent, OutboundSignal, Phase, RoundId};
pub use crate::utils::error::{GameError, Result};
