//! Skedaddle Encoder
//!
//! Hands a morse sequence to ffmpeg. Nothing is decoded or drawn here:
//! the sequence becomes a concat script of still frames and, optionally,
//! a tone track, and ffmpeg does the rest.
//!
//! # Pipeline
//!
//! ```text
//! Sequence ──┬── concat.txt (frame, duration)* ──────────────┐
//!            │                                               ├── ffmpeg ──► out.avif / out.mp4
//!            └── tone.wav (sine bursts mixed over silence) ──┘
//!                 (only with a tone frequency)
//! ```

pub mod audio;
pub mod concat;
pub mod export;
pub mod frames;
pub mod process;

pub use export::*;
pub use frames::FrameSet;
