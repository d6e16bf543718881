//! Decode a morse string.

use skedaddle_sequencer::decode_morse;

pub fn run(morse: &str) -> anyhow::Result<()> {
    let text = decode_morse(morse)?;
    println!("{text}");
    Ok(())
}
