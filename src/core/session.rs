use crate::core::game::GameController;
use crate::domain::model::{FeedbackKind, InboundEvent, OutboundSignal, Phase};
use crate::domain::ports::{EventSink, EventSource, TickScheduler};
use crate::utils::error::Result;
use rand::Rng;

/// Drains an event source into a controller, one event at a time.
pub struct GameSession<R: Rng, S: TickScheduler, E: EventSink, Src: EventSource> {
    controller: GameController<R, S, E>,
    source: Src,
    fast_tier_only: bool,
}

impl<R: Rng, S: TickScheduler, E: EventSink, Src: EventSource> GameSession<R, S, E, Src> {
    pub fn new(controller: GameController<R, S, E>, source: Src) -> Self {
        Self {
            controller,
            source,
            fast_tier_only: false,
        }
    }

    /// Only fast-tier blocks are clickable; other picks are answered with a prompt
    /// and never reach the controller.
    pub fn fast_tier_only(mut self, enabled: bool) -> Self {
        self.fast_tier_only = enabled;
        self
    }

    /// Returns when the source is exhausted or a `Shutdown` arrives.
    pub async fn run(&mut self) -> Result<()> {
        tracing::debug!("Game session started");

        while let Some(event) = self.source.next_event().await {
            if let InboundEvent::PlayerSelected { item } = event {
                if self.fast_tier_only
                    && self.controller.phase() == Phase::Running
                    && !self.controller.is_selectable(item)
                {
                    self.controller
                        .sink_mut()
                        .emit(OutboundSignal::FeedbackEmitted {
                            kind: FeedbackKind::Prompt,
                            text: format!("{} is not in the L1 cache, pick a cached block.", item),
                        });
                    continue;
                }
            }

            self.controller.dispatch(event)?;

            if event == InboundEvent::Shutdown {
                break;
            }
        }

        tracing::debug!("Game session finished");
        Ok(())
    }

    pub fn controller(&self) -> &GameController<R, S, E> {
        &self.controller
    }

    pub fn into_controller(self) -> GameController<R, S, E> {
        self.controller
    }
}
