use crate::domain::model::{DataItem, MemoryState};
use crate::utils::error::{GameError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

pub struct RequestGenerator;

impl RequestGenerator {
    /// With probability `hit_probability` the request is drawn from the fast tier,
    /// otherwise from the slow-only items. Both draws are uniform.
    pub fn next<R: Rng + ?Sized>(
        memory: &MemoryState,
        hit_probability: f64,
        rng: &mut R,
    ) -> Result<DataItem> {
        let wants_hit = rng.gen::<f64>() < hit_probability;
        let (pool, tier) = if wants_hit {
            (memory.fast_tier(), "fast tier")
        } else {
            (memory.slow_only(), "slow-only set")
        };

        let item = pool.choose(rng).copied().ok_or_else(|| {
            GameError::state(format!("cannot draw a request from an empty {}", tier))
        })?;

        tracing::debug!("New request {} from the {}", item, tier);
        Ok(item)
    }
}
