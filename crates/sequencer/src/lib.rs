//! Skedaddle Sequencer
//!
//! Turns a text message into the timed frame sequence of its
//! International Morse Code transmission:
//! - **Code table:** character to dit/dah code lookup, plus decoding
//! - **Timing:** element and gap durations derived from words per minute
//! - **Sequence:** ordered signal/gap events with a total duration
//!
//! ```text
//! "SOS" ──► "... --- ..." ──► [·][ ][·][ ][·][   ][─] ... ──► encoder
//! ```

pub mod code_table;
pub mod sequence;
pub mod timing;

pub use code_table::*;
pub use sequence::*;
pub use timing::*;
