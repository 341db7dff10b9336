use crate::config::GameConfig;
use crate::core::pool::DataPool;
use crate::core::request::RequestGenerator;
use crate::core::score::ScoreKeeper;
use crate::core::timer::{RoundTimer, TimerSignal};
use crate::domain::model::{
    DataItem, FeedbackKind, InboundEvent, MemoryState, MissReason, OutboundSignal, Phase,
    RoundId, RoundState,
};
use crate::domain::ports::{EventSink, TickScheduler};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use rand::Rng;

/// Owns one game: the round state, the timer, the random source and the signal sink.
///
/// Every mutation goes through `&mut self`, so feeding it from a single ordered event
/// stream is all the synchronisation it needs. Calls that make no sense in the current
/// phase are ignored rather than reported.
pub struct GameController<R: Rng, S: TickScheduler, E: EventSink> {
    config: GameConfig,
    items: Vec<DataItem>,
    memory: Option<MemoryState>,
    state: RoundState,
    round: RoundId,
    timer: RoundTimer<S>,
    scores: ScoreKeeper,
    rng: R,
    sink: E,
}

impl<R: Rng, S: TickScheduler, E: EventSink> GameController<R, S, E> {
    /// Fails with a config error before any round can start.
    pub fn new(config: GameConfig, rng: R, scheduler: S, sink: E) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            items: DataPool::generate(config.total_items),
            memory: None,
            state: RoundState::new(config.duration_seconds),
            round: RoundId::default(),
            timer: RoundTimer::new(scheduler, config.forced_miss_interval_seconds),
            scores: ScoreKeeper::from_config(&config),
            config,
            rng,
            sink,
        })
    }

    /// Valid from `Idle` or `Ended`; ignored while a round is running.
    pub fn start_round(&mut self) -> Result<()> {
        if self.state.phase == Phase::Running {
            tracing::debug!("Round {} already running, start ignored", self.round);
            return Ok(());
        }

        let memory =
            DataPool::partition(&self.items, self.config.fast_tier_size, &mut self.rng)?;

        self.round = self.round.next();
        self.state = RoundState::new(self.config.duration_seconds);
        self.sink.emit(OutboundSignal::ScoreChanged { score: 0 });
        self.sink.emit(OutboundSignal::TimeChanged {
            seconds_remaining: self.state.time_remaining,
        });
        self.sink.emit(OutboundSignal::MemoryChanged {
            fast_tier: memory.fast_tier().to_vec(),
            backing_store: memory.backing_store_view(),
        });
        self.memory = Some(memory);

        self.timer.start(self.round, self.config.duration_seconds);
        self.sync_phase();

        tracing::info!(
            "🚀 Round {} started ({}s, {} of {} items cached)",
            self.round,
            self.config.duration_seconds,
            self.config.fast_tier_size,
            self.config.total_items
        );

        self.request_new_item()
    }

    /// A matching pick scores and immediately moves on; a wrong pick costs points
    /// and keeps the same request so the player can retry.
    pub fn handle_selection(&mut self, chosen: DataItem) -> Result<()> {
        if self.state.phase != Phase::Running {
            return Ok(());
        }

        if self.state.requested_item == Some(chosen) {
            self.scores.apply_hit(&mut self.state, &mut self.sink);
            self.request_new_item()
        } else {
            self.scores
                .apply_miss(&mut self.state, MissReason::WrongChoice, &mut self.sink);
            Ok(())
        }
    }

    /// Ticks tagged with another round are stale and dropped.
    pub fn on_tick(&mut self, round: RoundId) -> Result<()> {
        if round != self.round {
            tracing::warn!(
                "Ignoring stale tick for round {} (current {})",
                round,
                self.round
            );
            return Ok(());
        }

        let Some(signal) = self.timer.tick() else {
            return Ok(());
        };

        self.state.time_remaining = self.timer.time_remaining();
        self.sink.emit(OutboundSignal::TimeChanged {
            seconds_remaining: self.state.time_remaining,
        });

        match signal {
            TimerSignal::Elapsed => Ok(()),
            TimerSignal::ForcedMissCheck => self.on_forced_miss_check(),
            TimerSignal::RoundEnded => {
                self.on_round_ended();
                Ok(())
            }
        }
    }

    /// Penalises on every interval boundary, even if the player hit moments earlier.
    pub fn on_forced_miss_check(&mut self) -> Result<()> {
        if self.state.phase != Phase::Running {
            return Ok(());
        }

        self.scores
            .apply_miss(&mut self.state, MissReason::Timeout, &mut self.sink);
        self.request_new_item()
    }

    pub fn on_round_ended(&mut self) {
        if self.state.phase != Phase::Running {
            return;
        }

        self.timer.finish();
        self.sync_phase();
        self.state.requested_item = None;

        let tally = self.state.tally;
        tracing::info!(
            "🏁 Round {} over: score {} ({} hits, {} wrong, {} timeouts)",
            self.round,
            self.state.score,
            tally.hits,
            tally.wrong_misses,
            tally.timeout_misses
        );
        self.sink.emit(OutboundSignal::RoundEnded {
            final_score: self.state.score,
        });
    }

    /// Stops a running round without a final score and returns to `Idle`.
    pub fn abandon_round(&mut self) {
        if self.state.phase != Phase::Running {
            return;
        }

        self.timer.stop();
        self.sync_phase();
        self.state.requested_item = None;
        tracing::info!("Round {} abandoned at score {}", self.round, self.state.score);
    }

    /// Routes one inbound event. `Shutdown` abandons any running round.
    pub fn dispatch(&mut self, event: InboundEvent) -> Result<()> {
        match event {
            InboundEvent::PlayerSelected { item } => self.handle_selection(item),
            InboundEvent::RoundStartRequested => self.start_round(),
            InboundEvent::RoundAbandonRequested | InboundEvent::Shutdown => {
                self.abandon_round();
                Ok(())
            }
            InboundEvent::TickElapsed { round } => self.on_tick(round),
        }
    }

    // 階段只由計時器決定
    fn sync_phase(&mut self) {
        self.state.phase = self.timer.phase();
    }

    fn request_new_item(&mut self) -> Result<()> {
        let Some(memory) = self.memory.as_ref() else {
            return Ok(());
        };

        let item = RequestGenerator::next(memory, self.config.hit_probability, &mut self.rng)?;
        self.state.requested_item = Some(item);
        self.sink.emit(OutboundSignal::RequestChanged { item });
        self.sink.emit(OutboundSignal::FeedbackEmitted {
            kind: FeedbackKind::Prompt,
            text: "Find the data!".to_string(),
        });
        Ok(())
    }

    /// Whether a front-end should offer `item` as a clickable block this round.
    pub fn is_selectable(&self, item: DataItem) -> bool {
        self.memory
            .as_ref()
            .is_some_and(|memory| memory.is_cached(item))
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Whether a tick stream is scheduled right now.
    pub fn is_ticking(&self) -> bool {
        self.timer.is_ticking()
    }

    pub fn score(&self) -> i64 {
        self.state.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.state.time_remaining
    }

    pub fn requested_item(&self) -> Option<DataItem> {
        self.state.requested_item
    }

    pub fn memory(&self) -> Option<&MemoryState> {
        self.memory.as_ref()
    }

    pub fn round_id(&self) -> RoundId {
        self.round
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        self.timer.scheduler()
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }
}
