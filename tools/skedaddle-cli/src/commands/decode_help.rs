//! Instructions for reading a transmission by eye.

use skedaddle_sequencer::{supported_characters, Timing};

pub fn run() -> anyhow::Result<()> {
    let standard = Timing::from_wpm(15.0)?;

    println!("Decoding a Skedaddle transmission");
    println!("{}", "=".repeat(50));
    println!();
    println!("1. Step through the animation frame by frame.");
    println!("2. Mark every stretch where the signal frame is shown.");
    println!("3. Classify each signal by length:");
    println!("     short = dit (.)   long = dah (-), three times a dit");
    println!("4. Classify each pause by length:");
    println!("     1 unit  = between elements of one letter");
    println!("     3 units = between letters");
    println!("     7 units = between words");
    println!("5. Translate the letters with the table below,");
    println!("   or run: skedaddle decode \"... --- ...\"");
    println!();
    println!("Reference speeds:");
    for (wpm, label) in [
        (5.0, "beginner"),
        (15.0, "standard (default)"),
        (25.0, "proficient"),
        (40.0, "expert"),
    ] {
        let timing = Timing::from_wpm(wpm)?;
        println!(
            "  {:>2} WPM  dit {:>3.0}ms  {}",
            wpm,
            timing.dit_secs() * 1000.0,
            label
        );
    }
    println!();
    println!(
        "At 15 WPM: dit {:.0}ms, dah {:.0}ms, letter gap {:.0}ms, word gap {:.0}ms.",
        standard.dit_secs() * 1000.0,
        standard.dah_secs() * 1000.0,
        standard.inter_letter_gap_secs() * 1000.0,
        standard.inter_word_gap_secs() * 1000.0,
    );
    println!();

    let supported: String = supported_characters().filter(|c| *c != ' ').collect();
    println!("Supported characters: {supported}");

    Ok(())
}
