use crate::config::GameConfig;
use crate::domain::model::{FeedbackKind, MissReason, OutboundSignal, RoundState};
use crate::domain::ports::EventSink;

/// Applies point deltas. The score has no floor and can go negative.
#[derive(Debug, Clone, Copy)]
pub struct ScoreKeeper {
    hit_points: i64,
    miss_penalty: i64,
}

impl ScoreKeeper {
    pub fn new(hit_points: i64, miss_penalty: i64) -> Self {
        Self {
            hit_points,
            miss_penalty,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.hit_points, config.miss_penalty)
    }

    pub fn apply_hit<E: EventSink + ?Sized>(&self, state: &mut RoundState, sink: &mut E) -> i64 {
        state.score += self.hit_points;
        state.tally.hits += 1;
        tracing::debug!("Cache HIT, score {}", state.score);

        sink.emit(OutboundSignal::FeedbackEmitted {
            kind: FeedbackKind::Hit,
            text: format!("Cache HIT! (+{} pts)", self.hit_points),
        });
        sink.emit(OutboundSignal::ScoreChanged { score: state.score });
        state.score
    }

    pub fn apply_miss<E: EventSink + ?Sized>(
        &self,
        state: &mut RoundState,
        reason: MissReason,
        sink: &mut E,
    ) -> i64 {
        state.score += self.miss_penalty;
        let text = match reason {
            MissReason::WrongChoice => {
                state.tally.wrong_misses += 1;
                "Wrong data. Try again.".to_string()
            }
            MissReason::Timeout => {
                state.tally.timeout_misses += 1;
                format!("Time's up! Cache MISS. ({} pts)", self.miss_penalty)
            }
        };
        tracing::debug!("Cache MISS ({:?}), score {}", reason, state.score);

        sink.emit(OutboundSignal::FeedbackEmitted {
            kind: reason.into(),
            text,
        });
        sink.emit(OutboundSignal::ScoreChanged { score: state.score });
        state.score
    }
}
