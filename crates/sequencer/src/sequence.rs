//! Frame sequence generation.
//!
//! A message becomes an ordered list of timed events: signals (shown with
//! the active frame) and gaps (shown with the pause frame). The sequence is
//! built once per run and handed to the encoder unchanged.

use serde::Serialize;
use skedaddle_common::error::{SkedaddleError, SkedaddleResult};

use crate::code_table::text_to_morse;
use crate::timing::Timing;

/// Default pause appended before a looping playback repeats (seconds).
pub const DEFAULT_END_GAP_SECS: f64 = 1.0;

/// Parameters for building a sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencerConfig {
    /// Transmission speed in words per minute.
    pub wpm: f64,

    /// Trailing pause after the message. Zero disables it.
    pub end_gap_secs: f64,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            wpm: 15.0,
            end_gap_secs: DEFAULT_END_GAP_SECS,
        }
    }
}

/// What a single event represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// Dit.
    ShortSignal,
    /// Dah.
    LongSignal,
    IntraLetterGap,
    InterLetterGap,
    InterWordGap,
    EndGap,
}

impl EventKind {
    /// Whether the active frame is shown for this event.
    pub fn is_signal(self) -> bool {
        matches!(self, Self::ShortSignal | Self::LongSignal)
    }

    /// Display string used in transmission summaries.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::ShortSignal => "·",
            Self::LongSignal => "─",
            Self::InterLetterGap => " ",
            Self::InterWordGap => "   ",
            Self::IntraLetterGap | Self::EndGap => "",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShortSignal => "short-signal",
            Self::LongSignal => "long-signal",
            Self::IntraLetterGap => "intra-letter-gap",
            Self::InterLetterGap => "inter-letter-gap",
            Self::InterWordGap => "inter-word-gap",
            Self::EndGap => "end-gap",
        }
    }
}

/// A timed signal or pause.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Event {
    pub kind: EventKind,

    /// Duration in seconds.
    pub duration_secs: f64,

    pub symbol: &'static str,
}

impl Event {
    fn new(kind: EventKind, duration_secs: f64) -> Self {
        Self {
            kind,
            duration_secs,
            symbol: kind.symbol(),
        }
    }
}

/// An ordered, immutable list of events for one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sequence {
    morse: String,
    timing: Timing,
    events: Vec<Event>,
    total_duration_secs: f64,
}

impl Sequence {
    /// The morse string the events were generated from.
    pub fn morse(&self) -> &str {
        &self.morse
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// In-order sum of all event durations.
    pub fn total_duration_secs(&self) -> f64 {
        self.total_duration_secs
    }

    /// Number of dits and dahs.
    pub fn signal_count(&self) -> usize {
        self.events.iter().filter(|e| e.kind.is_signal()).count()
    }

    /// Events paired with their cumulative start offset in seconds.
    pub fn timed_events(&self) -> impl Iterator<Item = (f64, &Event)> + '_ {
        self.events.iter().scan(0.0f64, |offset, event| {
            let start = *offset;
            *offset += event.duration_secs;
            Some((start, event))
        })
    }

    /// Human-readable rendering, e.g. `··· ─── ···`.
    pub fn visual_morse(&self) -> String {
        self.events.iter().map(|e| e.symbol).collect()
    }

    pub fn to_json_pretty(&self) -> SkedaddleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the event sequence for a message.
///
/// Fails only when the speed or end gap is not a usable number.
pub fn sequence(text: &str, config: &SequencerConfig) -> SkedaddleResult<Sequence> {
    let timing = Timing::from_wpm(config.wpm)?;
    if !config.end_gap_secs.is_finite() || config.end_gap_secs < 0.0 {
        return Err(SkedaddleError::invalid_parameter(format!(
            "end gap must be a non-negative finite number of seconds, got {}",
            config.end_gap_secs
        )));
    }

    let morse = text_to_morse(text);
    let mut events = events_for_morse(&morse, &timing);
    if config.end_gap_secs > 0.0 {
        events.push(Event::new(EventKind::EndGap, config.end_gap_secs));
    }

    let total_duration_secs = events
        .iter()
        .fold(0.0f64, |total, event| total + event.duration_secs);

    tracing::debug!(
        morse = %morse,
        events = events.len(),
        total_duration_secs,
        "Built morse sequence"
    );

    Ok(Sequence {
        morse,
        timing,
        events,
        total_duration_secs,
    })
}

fn events_for_morse(morse: &str, timing: &Timing) -> Vec<Event> {
    let chars = morse.as_bytes();
    let mut events = Vec::with_capacity(chars.len() * 2);

    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            b'.' => events.push(Event::new(EventKind::ShortSignal, timing.dit_secs())),
            b'-' => events.push(Event::new(EventKind::LongSignal, timing.dah_secs())),
            b' ' => {
                if chars.get(i + 1) == Some(&b' ') {
                    events.push(Event::new(
                        EventKind::InterWordGap,
                        timing.word_gap_event_secs(),
                    ));
                    i += 2;
                } else {
                    events.push(Event::new(
                        EventKind::InterLetterGap,
                        timing.inter_letter_gap_secs(),
                    ));
                    i += 1;
                }
                continue;
            }
            _ => {}
        }

        if i + 1 < chars.len() && chars[i + 1] != b' ' {
            events.push(Event::new(
                EventKind::IntraLetterGap,
                timing.intra_letter_gap_secs(),
            ));
        }
        i += 1;
    }

    events
}
