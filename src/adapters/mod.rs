// Adapters layer: concrete implementations of the domain ports (timers, sinks, sources).

pub mod manual;
pub mod sink;
pub mod source;
pub mod ticker;

pub use manual::ManualScheduler;
pub use sink::{ChannelSink, RecordingSink, RenderFormat, WriterSink};
pub use source::{ChannelSource, ScriptedSource};
pub use ticker::TokioTicker;
