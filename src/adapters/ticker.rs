use crate::domain::model::{InboundEvent, RoundId};
use crate::domain::ports::{TickHandle, TickScheduler};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Delivers `TickElapsed` events into the game's inbound channel from a tokio task.
///
/// Must be used from inside a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioTicker {
    tx: UnboundedSender<InboundEvent>,
}

impl TokioTicker {
    pub fn new(tx: UnboundedSender<InboundEvent>) -> Self {
        Self { tx }
    }
}

impl TickScheduler for TokioTicker {
    type Handle = TokioTickHandle;

    fn schedule(&mut self, round: RoundId, period: Duration) -> TokioTickHandle {
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            // 第一次 tick 在一個週期之後，而不是立即
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(InboundEvent::TickElapsed { round }).is_err() {
                    tracing::debug!("Tick receiver gone, stopping ticks for round {}", round);
                    break;
                }
            }
        });

        TokioTickHandle { task: Some(task) }
    }
}

#[derive(Debug)]
pub struct TokioTickHandle {
    task: Option<JoinHandle<()>>,
}

impl TickHandle for TokioTickHandle {
    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for TokioTickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
