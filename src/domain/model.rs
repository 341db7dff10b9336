use serde::{Deserialize, Serialize};
use std::fmt;

/// One labelled data block. Labels run A..Z, then AA, AB, ... like spreadsheet columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DataItem(u16);

impl DataItem {
    pub fn from_index(index: u16) -> Self {
        DataItem(index)
    }

    pub fn label(self) -> String {
        let mut n = self.0 as u32 + 1;
        let mut letters = Vec::new();
        while n > 0 {
            n -= 1;
            letters.push((b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        letters.iter().rev().collect()
    }

    /// Case-insensitive inverse of [`DataItem::label`].
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let mut n: u32 = 0;
        for c in input.chars() {
            let c = c.to_ascii_uppercase();
            if !c.is_ascii_uppercase() {
                return None;
            }
            n = n.checked_mul(26)?.checked_add(c as u32 - 'A' as u32 + 1)?;
            if n > u16::MAX as u32 + 1 {
                return None;
            }
        }
        Some(DataItem((n - 1) as u16))
    }
}

impl fmt::Display for DataItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<DataItem> for String {
    fn from(item: DataItem) -> Self {
        item.label()
    }
}

impl TryFrom<String> for DataItem {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DataItem::parse(&value).ok_or_else(|| format!("invalid data label: {:?}", value))
    }
}

/// How a block shows up in the backing-store panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "slot", content = "item", rename_all = "snake_case")]
pub enum Slot {
    Cached,
    Item(DataItem),
}

/// Split of every item into the fast tier and the slow-only remainder.
/// Built once per round by `DataPool::partition` and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryState {
    all_items: Vec<DataItem>,
    fast_tier: Vec<DataItem>,
    slow_only: Vec<DataItem>,
}

impl MemoryState {
    pub(crate) fn from_parts(
        all_items: Vec<DataItem>,
        fast_tier: Vec<DataItem>,
        slow_only: Vec<DataItem>,
    ) -> Self {
        Self {
            all_items,
            fast_tier,
            slow_only,
        }
    }

    pub fn all_items(&self) -> &[DataItem] {
        &self.all_items
    }

    /// Fast-tier items in display (shuffled) order.
    pub fn fast_tier(&self) -> &[DataItem] {
        &self.fast_tier
    }

    /// Slow-only items in label order.
    pub fn slow_only(&self) -> &[DataItem] {
        &self.slow_only
    }

    pub fn is_cached(&self, item: DataItem) -> bool {
        self.fast_tier.contains(&item)
    }

    pub fn backing_store_view(&self) -> Vec<Slot> {
        self.all_items
            .iter()
            .map(|&item| {
                if self.is_cached(item) {
                    Slot::Cached
                } else {
                    Slot::Item(item)
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Running,
    Ended,
}

/// Identifies a round so that ticks scheduled for an older round can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct RoundId(pub u64);

impl RoundId {
    pub fn next(self) -> Self {
        RoundId(self.0 + 1)
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTally {
    pub hits: u32,
    pub wrong_misses: u32,
    pub timeout_misses: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub score: i64,
    pub time_remaining: u32,
    pub requested_item: Option<DataItem>,
    /// Copied from the round timer after every transition.
    pub phase: Phase,
    pub tally: RoundTally,
}

impl RoundState {
    pub fn new(duration_seconds: u32) -> Self {
        Self {
            score: 0,
            time_remaining: duration_seconds,
            requested_item: None,
            phase: Phase::Idle,
            tally: RoundTally::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissReason {
    WrongChoice,
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Prompt,
    Hit,
    WrongMiss,
    TimeoutMiss,
}

impl From<MissReason> for FeedbackKind {
    fn from(reason: MissReason) -> Self {
        match reason {
            MissReason::WrongChoice => FeedbackKind::WrongMiss,
            MissReason::Timeout => FeedbackKind::TimeoutMiss,
        }
    }
}

/// Events consumed by the game core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundEvent {
    PlayerSelected { item: DataItem },
    RoundStartRequested,
    RoundAbandonRequested,
    TickElapsed { round: RoundId },
    Shutdown,
}

/// Signals the core produces for whatever renders the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum OutboundSignal {
    MemoryChanged {
        fast_tier: Vec<DataItem>,
        backing_store: Vec<Slot>,
    },
    RequestChanged {
        item: DataItem,
    },
    ScoreChanged {
        score: i64,
    },
    TimeChanged {
        seconds_remaining: u32,
    },
    FeedbackEmitted {
        kind: FeedbackKind,
        text: String,
    },
    RoundEnded {
        final_score: i64,
    },
}
