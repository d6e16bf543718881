//! Frame images shown for each kind of event.

use std::fs::File;
use std::path::{Path, PathBuf};

use skedaddle_common::error::{SkedaddleError, SkedaddleResult};
use skedaddle_sequencer::EventKind;

/// The three still images a transmission is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSet {
    /// Shown for dits.
    pub short_signal: PathBuf,

    /// Shown for dahs.
    pub long_signal: PathBuf,

    /// Shown for every gap.
    pub pause: PathBuf,
}

impl FrameSet {
    /// Use one image for both signal kinds.
    pub fn new(signal: impl Into<PathBuf>, pause: impl Into<PathBuf>) -> Self {
        let signal = signal.into();
        Self {
            short_signal: signal.clone(),
            long_signal: signal,
            pause: pause.into(),
        }
    }

    pub fn with_long_signal(mut self, path: impl Into<PathBuf>) -> Self {
        self.long_signal = path.into();
        self
    }

    /// Image to display for an event of the given kind.
    pub fn frame_for(&self, kind: EventKind) -> &Path {
        match kind {
            EventKind::ShortSignal => &self.short_signal,
            EventKind::LongSignal => &self.long_signal,
            _ => &self.pause,
        }
    }

    /// Check every frame is a readable file and make its path absolute.
    pub fn resolve(&self) -> SkedaddleResult<Self> {
        Ok(Self {
            short_signal: resolve_frame("short-signal frame", &self.short_signal)?,
            long_signal: resolve_frame("long-signal frame", &self.long_signal)?,
            pause: resolve_frame("pause frame", &self.pause)?,
        })
    }
}

fn resolve_frame(role: &str, path: &Path) -> SkedaddleResult<PathBuf> {
    let readable = match File::open(path).and_then(|file| file.metadata()) {
        Ok(meta) => meta.is_file(),
        Err(err) => {
            tracing::debug!(role, path = %path.display(), error = %err, "Frame is not readable");
            false
        }
    };
    if !readable {
        return Err(SkedaddleError::resource_not_found(role, path));
    }
    Ok(path.canonicalize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaps_use_pause_frame() {
        let frames = FrameSet::new("a.jpg", "b.jpg").with_long_signal("dah.jpg");
        assert_eq!(frames.frame_for(EventKind::ShortSignal), Path::new("a.jpg"));
        assert_eq!(frames.frame_for(EventKind::LongSignal), Path::new("dah.jpg"));
        for kind in [
            EventKind::IntraLetterGap,
            EventKind::InterLetterGap,
            EventKind::InterWordGap,
            EventKind::EndGap,
        ] {
            assert_eq!(frames.frame_for(kind), Path::new("b.jpg"));
        }
    }

    #[test]
    fn test_resolve_names_missing_frame() {
        let dir = tempfile::tempdir().unwrap();
        let signal = dir.path().join("a.jpg");
        std::fs::write(&signal, b"jpg").unwrap();
        let missing = dir.path().join("b.jpg");

        let err = FrameSet::new(&signal, &missing).resolve().unwrap_err();
        match err {
            SkedaddleError::ResourceNotFound { resource, path } => {
                assert_eq!(resource, "pause frame");
                assert_eq!(path, missing);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        let pause = dir.path().join("b.jpg");
        std::fs::write(&pause, b"jpg").unwrap();

        let err = FrameSet::new(dir.path(), &pause).resolve().unwrap_err();
        assert!(matches!(err, SkedaddleError::ResourceNotFound { .. }));
    }

    #[test]
    fn test_resolve_reports_unopenable_frame_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let signal = dir.path().join("a.jpg");
        std::fs::write(&signal, b"jpg").unwrap();
        // Opening a path below a regular file fails with something other than NotFound.
        let below_file = signal.join("b.jpg");

        let err = FrameSet::new(&signal, &below_file).resolve().unwrap_err();
        match err {
            SkedaddleError::ResourceNotFound { resource, path } => {
                assert_eq!(resource, "pause frame");
                assert_eq!(path, below_file);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_makes_paths_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let signal = dir.path().join("a.jpg");
        let pause = dir.path().join("b.jpg");
        std::fs::write(&signal, b"jpg").unwrap();
        std::fs::write(&pause, b"jpg").unwrap();

        let resolved = FrameSet::new(&signal, &pause).resolve().unwrap();
        assert!(resolved.short_signal.is_absolute());
        assert!(resolved.pause.is_absolute());
        assert_eq!(resolved.short_signal, resolved.long_signal);
    }
}
