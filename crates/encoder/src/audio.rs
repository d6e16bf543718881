//! Beep track synthesis.
//!
//! Every signal becomes a sine burst delayed to the signal's start offset.
//! The bursts are mixed over silence and the result is cut to the
//! sequence's total duration.

use std::path::Path;

use skedaddle_sequencer::Sequence;

/// Sample rate of the synthesized track.
pub const AUDIO_SAMPLE_RATE: u32 = 44_100;

/// A tone placed on the audio timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneBurst {
    pub start_secs: f64,
    pub duration_secs: f64,
}

/// One burst per dit or dah, at its cumulative start offset.
pub fn tone_bursts(sequence: &Sequence) -> Vec<ToneBurst> {
    sequence
        .timed_events()
        .filter(|(_, event)| event.kind.is_signal())
        .map(|(start_secs, event)| ToneBurst {
            start_secs,
            duration_secs: event.duration_secs,
        })
        .collect()
}

/// Build the `-filter_complex` graph mixing all bursts over silence.
pub fn build_audio_filter(bursts: &[ToneBurst], frequency_hz: u32) -> String {
    let silence = format!("anullsrc=r={AUDIO_SAMPLE_RATE}:cl=mono");
    if bursts.is_empty() {
        return format!("{silence}[out]");
    }

    let beeps = bursts
        .iter()
        .enumerate()
        .map(|(i, burst)| {
            let delay_ms = (burst.start_secs * 1000.0).round() as u64;
            format!(
                "sine=f={frequency_hz}:d={:.4}[beep{i}];[beep{i}]adelay={delay_ms}|{delay_ms}[delayed{i}]",
                burst.duration_secs
            )
        })
        .collect::<Vec<_>>()
        .join(";");
    let delayed: String = (0..bursts.len()).map(|i| format!("[delayed{i}]")).collect();

    format!(
        "{silence}[silent];{beeps};[silent]{delayed}amix=inputs={}:duration=longest[out]",
        bursts.len() + 1
    )
}

/// ffmpeg arguments that render the beep track for a sequence to `output`.
pub fn audio_args(sequence: &Sequence, frequency_hz: u32, output: &Path) -> Vec<String> {
    let filter = build_audio_filter(&tone_bursts(sequence), frequency_hz);
    vec![
        "-y".to_string(),
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-filter_complex".to_string(),
        filter,
        "-map".to_string(),
        "[out]".to_string(),
        "-t".to_string(),
        format!("{:.4}", sequence.total_duration_secs()),
        output.to_string_lossy().into_owned(),
    ]
}
