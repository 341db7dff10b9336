pub mod game;
pub mod pool;
pub mod request;
pub mod score;
pub mod session;
pub mod timer;

pub use crate::domain::model::{DataItem, MemoryState, OutboundSignal, Phase, RoundState};
pub use crate::domain::ports::{EventSink, EventSource, TickHandle, TickScheduler};
pub use crate::utils::error::Result;
