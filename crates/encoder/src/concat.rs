//! ffmpeg concat demuxer scripts.
//!
//! Each event becomes a `file`/`duration` pair. The demuxer ignores the
//! duration of the final entry, so the last frame is listed once more.

use std::path::Path;

use skedaddle_common::error::{SkedaddleError, SkedaddleResult};
use skedaddle_sequencer::Sequence;

use crate::frames::FrameSet;

/// Render the concat script for a sequence.
pub fn build_concat_script(sequence: &Sequence, frames: &FrameSet) -> SkedaddleResult<String> {
    let last = sequence
        .events()
        .last()
        .ok_or_else(|| SkedaddleError::invalid_parameter("message produced no frames to render"))?;

    let mut script = String::new();
    for event in sequence.events() {
        script.push_str(&format!("file {}\n", quote_path(frames.frame_for(event.kind))));
        script.push_str(&format!("duration {:.4}\n", event.duration_secs));
    }
    script.push_str(&format!("file {}\n", quote_path(frames.frame_for(last.kind))));

    Ok(script)
}

fn quote_path(path: &Path) -> String {
    format!("'{}'", path.to_string_lossy().replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use skedaddle_sequencer::{sequence, SequencerConfig};

    fn config(end_gap_secs: f64) -> SequencerConfig {
        SequencerConfig {
            wpm: 15.0,
            end_gap_secs,
        }
    }

    #[test]
    fn test_single_dit_repeats_last_frame() {
        let seq = sequence("E", &config(0.0)).unwrap();
        let frames = FrameSet::new("/frames/a.jpg", "/frames/b.jpg");
        let script = build_concat_script(&seq, &frames).unwrap();
        assert_eq!(
            script,
            "file '/frames/a.jpg'\nduration 0.0800\nfile '/frames/a.jpg'\n"
        );
    }

    #[test]
    fn test_signals_and_gaps_pick_their_frames() {
        let seq = sequence("ET", &config(2.0)).unwrap();
        let frames =
            FrameSet::new("/frames/a.jpg", "/frames/b.jpg").with_long_signal("/frames/dah.jpg");
        let script = build_concat_script(&seq, &frames).unwrap();
        assert_eq!(
            script,
            "file '/frames/a.jpg'\nduration 0.0800\n\
             file '/frames/b.jpg'\nduration 0.2400\n\
             file '/frames/dah.jpg'\nduration 0.2400\n\
             file '/frames/b.jpg'\nduration 2.0000\n\
             file '/frames/b.jpg'\n"
        );
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let seq = sequence("", &config(0.0)).unwrap();
        let frames = FrameSet::new("a.jpg", "b.jpg");
        assert!(matches!(
            build_concat_script(&seq, &frames),
            Err(SkedaddleError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_single_quotes_are_escaped() {
        assert_eq!(
            quote_path(Path::new("/tmp/cat's tongue.jpg")),
            r"'/tmp/cat'\''s tongue.jpg'"
        );
    }
}
