#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_less_than, validate_positive_number, validate_range, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FAST_TIER_SIZE: usize = 8;
pub const DEFAULT_TOTAL_ITEMS: usize = 16;
pub const DEFAULT_DURATION_SECONDS: u32 = 30;
pub const DEFAULT_HIT_POINTS: i64 = 10;
pub const DEFAULT_MISS_PENALTY: i64 = -5;
pub const DEFAULT_HIT_PROBABILITY: f64 = 0.7;
pub const DEFAULT_FORCED_MISS_INTERVAL_SECONDS: u32 = 5;

/// Game constants. Fixed for the lifetime of a controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub fast_tier_size: usize,
    pub total_items: usize,
    pub duration_seconds: u32,
    pub hit_points: i64,
    /// Added to the score on every miss, so zero or negative.
    pub miss_penalty: i64,
    pub hit_probability: f64,
    pub forced_miss_interval_seconds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fast_tier_size: DEFAULT_FAST_TIER_SIZE,
            total_items: DEFAULT_TOTAL_ITEMS,
            duration_seconds: DEFAULT_DURATION_SECONDS,
            hit_points: DEFAULT_HIT_POINTS,
            miss_penalty: DEFAULT_MISS_PENALTY,
            hit_probability: DEFAULT_HIT_PROBABILITY,
            forced_miss_interval_seconds: DEFAULT_FORCED_MISS_INTERVAL_SECONDS,
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<()> {
        // 兩個記憶體層都不可為空
        validate_positive_number("fast_tier_size", self.fast_tier_size as u64, 1)?;
        validate_less_than(
            "fast_tier_size",
            self.fast_tier_size,
            "total_items",
            self.total_items,
        )?;
        validate_range("total_items", self.total_items, 2, u16::MAX as usize + 1)?;

        validate_positive_number("duration_seconds", self.duration_seconds as u64, 1)?;
        validate_positive_number(
            "forced_miss_interval_seconds",
            self.forced_miss_interval_seconds as u64,
            1,
        )?;

        validate_range("hit_points", self.hit_points, 0, i64::MAX)?;
        validate_range("miss_penalty", self.miss_penalty, i64::MIN, 0)?;
        validate_range("hit_probability", self.hit_probability, 0.0, 1.0)?;

        Ok(())
    }
}
