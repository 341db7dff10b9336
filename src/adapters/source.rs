use crate::domain::model::InboundEvent;
use crate::domain::ports::EventSource;
use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedReceiver;

/// Player input and ticks share one channel, so the game sees a single ordered stream.
#[derive(Debug)]
pub struct ChannelSource {
    rx: UnboundedReceiver<InboundEvent>,
}

impl ChannelSource {
    pub fn new(rx: UnboundedReceiver<InboundEvent>) -> Self {
        Self { rx }
    }
}

#[async_trait]
impl EventSource for ChannelSource {
    async fn next_event(&mut self) -> Option<InboundEvent> {
        self.rx.recv().await
    }
}

/// Plays back a fixed list of events, then reports exhaustion.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    events: std::collections::VecDeque<InboundEvent>,
}

impl ScriptedSource {
    pub fn new(events: impl IntoIterator<Item = InboundEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

#[async_trait]
impl EventSource for ScriptedSource {
    async fn next_event(&mut self) -> Option<InboundEvent> {
        self.events.pop_front()
    }
}
