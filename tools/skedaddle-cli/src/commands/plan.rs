//! Show a transmission plan without encoding.

use skedaddle_common::config::AppConfig;
use skedaddle_sequencer::sequence;

use super::{print_summary, resolve_transmission};
use crate::TransmissionArgs;

pub fn run(config: &AppConfig, transmission: TransmissionArgs, json: bool) -> anyhow::Result<()> {
    let (text, sequencer_config) = resolve_transmission(config, transmission);
    let sequence = sequence(&text, &sequencer_config)?;

    if json {
        println!("{}", sequence.to_json_pretty()?);
        return Ok(());
    }

    print_summary(&text, &sequence);

    if sequence.is_empty() {
        println!("  Nothing to transmit: no supported characters in message.");
        return Ok(());
    }

    println!("  {:>4}  {:>9}  {:>9}  kind", "#", "start", "duration");
    for (i, (start, event)) in sequence.timed_events().enumerate() {
        println!(
            "  {:>4}  {:>8.4}s  {:>8.4}s  {}",
            i,
            start,
            event.duration_secs,
            event.kind.as_str()
        );
    }

    Ok(())
}
