pub mod check;
pub mod config;
pub mod decode;
pub mod decode_help;
pub mod encode;
pub mod plan;

use skedaddle_common::config::AppConfig;
use skedaddle_sequencer::{Sequence, SequencerConfig};

use crate::TransmissionArgs;

/// Merge CLI flags over configured defaults.
pub fn resolve_transmission(
    config: &AppConfig,
    args: TransmissionArgs,
) -> (String, SequencerConfig) {
    let text = args.text.unwrap_or_else(|| config.defaults.text.clone());
    let sequencer = SequencerConfig {
        wpm: args.wpm.unwrap_or(config.defaults.wpm),
        end_gap_secs: args.end_gap.unwrap_or(config.defaults.end_gap_secs),
    };
    (text, sequencer)
}

/// Print the human-readable transmission plan.
pub fn print_summary(text: &str, sequence: &Sequence) {
    let timing = sequence.timing();

    println!("Skedaddle Encoder");
    println!("{}", "=".repeat(60));
    println!("  Message: \"{text}\"");
    println!("  Speed: {} WPM", timing.wpm);
    println!("  Morse: {}", sequence.morse());
    println!("{}", "=".repeat(60));
    println!();
    println!("Transmission plan:");
    println!("{}", "-".repeat(60));
    println!("  {}", sequence.visual_morse());
    println!("{}", "-".repeat(60));
    println!("  Duration: {:.2}s", sequence.total_duration_secs());
    println!("  Frames: {}", sequence.len());
    println!("  Dit: {:.0}ms", timing.dit_secs() * 1000.0);
    println!("  Dah: {:.0}ms", timing.dah_secs() * 1000.0);
    println!();
}
