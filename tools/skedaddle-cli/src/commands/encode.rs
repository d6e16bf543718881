//! Encode a message to an image loop or video.

use std::io::Write;
use std::path::PathBuf;

use skedaddle_common::config::AppConfig;
use skedaddle_common::error::SkedaddleError;
use skedaddle_encoder::{encode_sequence, EncodeJob, EncodeProgress, FrameSet, OutputFormat};
use skedaddle_sequencer::sequence;

use super::{print_summary, resolve_transmission};
use crate::TransmissionArgs;

/// Output-related flags for `encode`.
pub struct OutputArgs {
    pub output: Option<PathBuf>,
    pub format: Option<String>,
    pub audio: bool,
    pub frequency: Option<u32>,
    pub frame_a: Option<PathBuf>,
    pub frame_b: Option<PathBuf>,
    pub frame_dah: Option<PathBuf>,
}

pub fn run(
    config: &AppConfig,
    transmission: TransmissionArgs,
    output: OutputArgs,
) -> anyhow::Result<()> {
    let (text, sequencer_config) = resolve_transmission(config, transmission);
    let defaults = &config.defaults;

    let format: OutputFormat = output
        .format
        .as_deref()
        .unwrap_or(&defaults.format)
        .parse()?;
    let output_path = output
        .output
        .unwrap_or_else(|| PathBuf::from(format!("morse-kitty.{}", format.extension())));

    let signal = output.frame_a.unwrap_or_else(|| defaults.frame_a.clone());
    let mut frames = FrameSet::new(
        signal,
        output.frame_b.unwrap_or_else(|| defaults.frame_b.clone()),
    );
    if let Some(dah) = output.frame_dah {
        frames = frames.with_long_signal(dah);
    }

    let tone_frequency_hz = output
        .audio
        .then(|| output.frequency.unwrap_or(defaults.tone_frequency_hz));

    let sequence = sequence(&text, &sequencer_config)?;
    print_summary(&text, &sequence);

    println!("Encoding transmission...");
    println!("  Output: {}", output_path.display());
    println!("  Format: {format}");
    if let Some(hz) = tone_frequency_hz {
        println!("  Audio: {hz} Hz tone");
    }

    let job = EncodeJob {
        output_path,
        format,
        frames,
        tone_frequency_hz,
    };

    let progress_cb: Box<dyn Fn(EncodeProgress) + Send> = Box::new(|p| {
        print!(
            "\r  Progress: {:.1}% ({:.2}s encoded)  ",
            p.progress * 100.0,
            p.out_time_secs,
        );
        std::io::stdout().flush().ok();
    });

    let outcome = match encode_sequence(&job, &sequence, Some(progress_cb)) {
        Ok(outcome) => outcome,
        Err(e) => {
            println!("\nEncoding failed.");
            if matches!(e, SkedaddleError::Unsupported { .. }) {
                super::check::print_install_hints();
            }
            return Err(e.into());
        }
    };

    println!();
    println!();
    println!("Transmission encoded:");
    println!(
        "  Output: {} ({:.2} KB)",
        outcome.output_path.display(),
        outcome.size_bytes as f64 / 1024.0
    );
    println!("  Duration: {:.2}s", outcome.duration_secs);
    println!("  Frames: {}", outcome.frame_count);
    println!("  Message: \"{text}\"");
    println!("  Morse: {}", sequence.morse());

    Ok(())
}
