//! Morse timing derived from words per minute.
//!
//! The reference word "PARIS" is 50 units long, so one unit lasts
//! `1.2 / wpm` seconds.

use serde::Serialize;
use skedaddle_common::error::{SkedaddleError, SkedaddleResult};

/// Element and gap durations for a given speed, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Timing {
    /// Words per minute this timing was derived from.
    pub wpm: f64,

    /// Length of one unit (one dit).
    pub unit_secs: f64,
}

impl Timing {
    /// Derive timing from a words-per-minute speed.
    pub fn from_wpm(wpm: f64) -> SkedaddleResult<Self> {
        if !wpm.is_finite() || wpm <= 0.0 {
            return Err(SkedaddleError::invalid_parameter(format!(
                "words per minute must be a positive finite number, got {wpm}"
            )));
        }
        Ok(Self {
            wpm,
            unit_secs: 1.2 / wpm,
        })
    }

    pub fn dit_secs(&self) -> f64 {
        self.unit_secs
    }

    pub fn dah_secs(&self) -> f64 {
        self.unit_secs * 3.0
    }

    /// Gap between elements of the same letter.
    pub fn intra_letter_gap_secs(&self) -> f64 {
        self.unit_secs
    }

    pub fn inter_letter_gap_secs(&self) -> f64 {
        self.unit_secs * 3.0
    }

    /// Full silence between two words.
    pub fn inter_word_gap_secs(&self) -> f64 {
        self.unit_secs * 7.0
    }

    /// Duration of the inter-word event; the inter-letter gap that follows
    /// it in the morse string supplies the remaining three units.
    pub fn word_gap_event_secs(&self) -> f64 {
        self.inter_word_gap_secs() - self.inter_letter_gap_secs()
    }
}
