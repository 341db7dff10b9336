use crate::domain::model::{OutboundSignal, Slot};
use crate::domain::ports::EventSink;
use std::io::Write;
use tokio::sync::mpsc::UnboundedSender;

/// Keeps every signal in memory. Used by tests and for replaying a round.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    signals: Vec<OutboundSignal>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signals(&self) -> &[OutboundSignal] {
        &self.signals
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, signal: OutboundSignal) {
        self.signals.push(signal);
    }
}

/// Forwards signals to a presentation task.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: UnboundedSender<OutboundSignal>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<OutboundSignal>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn emit(&mut self, signal: OutboundSignal) {
        if self.tx.send(signal).is_err() {
            tracing::warn!("Presentation channel closed, dropping signal");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Text,
    JsonLines,
}

/// Renders signals to a writer, one line per signal.
pub struct WriterSink<W: Write> {
    writer: W,
    format: RenderFormat,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, format: RenderFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&mut self, signal: &OutboundSignal) -> crate::utils::error::Result<()> {
        match self.format {
            RenderFormat::JsonLines => {
                serde_json::to_writer(&mut self.writer, signal)?;
                writeln!(self.writer)?;
            }
            RenderFormat::Text => writeln!(self.writer, "{}", render_text(signal))?,
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> EventSink for WriterSink<W> {
    fn emit(&mut self, signal: OutboundSignal) {
        if let Err(e) = self.render(&signal) {
            tracing::warn!("Failed to render {:?}: {}", signal, e);
        }
    }
}

fn render_text(signal: &OutboundSignal) -> String {
    match signal {
        OutboundSignal::MemoryChanged {
            fast_tier,
            backing_store,
        } => {
            let l1: Vec<String> = fast_tier.iter().map(|item| format!("[{}]", item)).collect();
            let ram: Vec<String> = backing_store
                .iter()
                .map(|slot| match slot {
                    Slot::Cached => "[Cache]".to_string(),
                    Slot::Item(item) => format!("[{}]", item),
                })
                .collect();
            format!("L1 cache: {}\nRAM:      {}", l1.join(" "), ram.join(" "))
        }
        OutboundSignal::RequestChanged { item } => format!("Requested data: {}", item),
        OutboundSignal::ScoreChanged { score } => format!("Score: {}", score),
        OutboundSignal::TimeChanged { seconds_remaining } => {
            format!("Time left: {}s", seconds_remaining)
        }
        OutboundSignal::FeedbackEmitted { text, .. } => text.clone(),
        OutboundSignal::RoundEnded { final_score } => format!(
            "Game over. Final score: {}. Type `start` to play again.",
            final_score
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DataItem, FeedbackKind};
    use tokio::sync::mpsc;

    #[test]
    fn test_text_rendering() {
        let mut sink = WriterSink::new(Vec::new(), RenderFormat::Text);
        let a = DataItem::from_index(0);
        let b = DataItem::from_index(1);
        sink.emit(OutboundSignal::MemoryChanged {
            fast_tier: vec![a],
            backing_store: vec![Slot::Cached, Slot::Item(b)],
        });
        sink.emit(OutboundSignal::RoundEnded { final_score: -15 });

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            out,
            "L1 cache: [A]\nRAM:      [Cache] [B]\nGame over. Final score: -15. Type `start` to play again.\n"
        );
    }

    #[test]
    fn test_json_lines_rendering() {
        let mut sink = WriterSink::new(Vec::new(), RenderFormat::JsonLines);
        sink.emit(OutboundSignal::ScoreChanged { score: 10 });
        sink.emit(OutboundSignal::FeedbackEmitted {
            kind: FeedbackKind::Hit,
            text: "Cache HIT! (+10 pts)".to_string(),
        });

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["signal"], "score_changed");
        assert_eq!(lines[0]["score"], 10);
        assert_eq!(lines[1]["kind"], "hit");
    }

    #[test]
    fn test_channel_sink_forwards() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut sink = ChannelSink::new(tx);
        sink.emit(OutboundSignal::TimeChanged {
            seconds_remaining: 29,
        });
        assert_eq!(
            rx.try_recv().unwrap(),
            OutboundSignal::TimeChanged {
                seconds_remaining: 29
            }
        );

        drop(rx);
        // 接收端關閉時只記錄警告
        sink.emit(OutboundSignal::ScoreChanged { score: 0 });
    }
}
