//! Encode jobs and the ffmpeg backend.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use skedaddle_common::error::{SkedaddleError, SkedaddleResult};
use skedaddle_sequencer::Sequence;

use crate::audio::audio_args;
use crate::concat::build_concat_script;
use crate::frames::FrameSet;
use crate::process::{ProcessRunner, SystemRunner};

/// Container written by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Looping AV1 image sequence.
    Avif,
    /// H.264 video.
    Mp4,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Avif => "avif",
            Self::Mp4 => "mp4",
        }
    }

    fn codec_args(self, with_audio: bool) -> Vec<String> {
        let mut args: Vec<String> = match self {
            Self::Avif => [
                "-vf",
                "format=yuv420p",
                "-c:v",
                "libaom-av1",
                "-still-picture",
                "0",
                "-loop",
                "0",
                "-cpu-used",
                "8",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            Self::Mp4 => [
                "-vf",
                "format=yuv420p",
                "-c:v",
                "libx264",
                "-preset",
                "medium",
                "-crf",
                "23",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        };
        if with_audio {
            args.push("-c:a".to_string());
            args.push(
                match self {
                    Self::Avif => "libopus",
                    Self::Mp4 => "aac",
                }
                .to_string(),
            );
        }
        args
    }
}

impl FromStr for OutputFormat {
    type Err = SkedaddleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "avif" => Ok(Self::Avif),
            "mp4" => Ok(Self::Mp4),
            _ => Err(SkedaddleError::invalid_parameter(format!(
                "Unknown format: {s}. Use: avif, mp4"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A transmission ready to be encoded.
#[derive(Debug, Clone)]
pub struct EncodeJob {
    /// Output file path.
    pub output_path: PathBuf,

    pub format: OutputFormat,

    pub frames: FrameSet,

    /// Beep frequency; `None` encodes without audio.
    pub tone_frequency_hz: Option<u32>,
}

/// Progress callback for encoding.
pub type ProgressCallback = Box<dyn Fn(EncodeProgress) + Send>;

/// Encode progress report.
#[derive(Debug, Clone)]
pub struct EncodeProgress {
    /// Current progress [0.0, 1.0].
    pub progress: f64,

    /// Seconds of output written so far.
    pub out_time_secs: f64,

    pub stage: EncodeStage,
}

/// Stages of an encode run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeStage {
    Preparing,
    SynthesizingAudio,
    Encoding,
    Finalizing,
    Complete,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct EncodeOutcome {
    pub output_path: PathBuf,
    pub size_bytes: u64,
    pub duration_secs: f64,
    pub frame_count: usize,
}

/// Trait for encode backends.
pub trait EncodeBackend: Send {
    /// Write `sequence` to `job.output_path`. Frames are already resolved.
    fn encode(
        &mut self,
        job: &EncodeJob,
        sequence: &Sequence,
        progress: Option<&ProgressCallback>,
    ) -> SkedaddleResult<()>;

    /// Check if this backend is available on the system.
    fn is_available(&self) -> bool;

    /// Backend name.
    fn name(&self) -> &str;
}

/// Encode a sequence with ffmpeg.
///
/// This is the main entry point for rendering.
pub fn encode_sequence(
    job: &EncodeJob,
    sequence: &Sequence,
    progress: Option<ProgressCallback>,
) -> SkedaddleResult<EncodeOutcome> {
    let mut backend = FfmpegBackend::new();
    encode_with_backend(&mut backend, job, sequence, progress)
}

/// Encode a sequence with the given backend.
pub fn encode_with_backend(
    backend: &mut dyn EncodeBackend,
    job: &EncodeJob,
    sequence: &Sequence,
    progress: Option<ProgressCallback>,
) -> SkedaddleResult<EncodeOutcome> {
    tracing::info!(
        output = %job.output_path.display(),
        format = %job.format,
        events = sequence.len(),
        audio = job.tone_frequency_hz.is_some(),
        "Starting encode"
    );

    if sequence.is_empty() {
        return Err(SkedaddleError::invalid_parameter(
            "message produced no frames to render",
        ));
    }
    if job.tone_frequency_hz == Some(0) {
        return Err(SkedaddleError::invalid_parameter(
            "tone frequency must be greater than 0 Hz",
        ));
    }

    let job = EncodeJob {
        frames: job.frames.resolve()?,
        ..job.clone()
    };

    if let Some(parent) = job.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    report(
        progress.as_ref(),
        EncodeProgress {
            progress: 0.0,
            out_time_secs: 0.0,
            stage: EncodeStage::Preparing,
        },
    );

    if !backend.is_available() {
        return Err(SkedaddleError::unsupported(format!(
            "No supported encode backend found (expected {} in PATH)",
            backend.name()
        )));
    }

    tracing::info!(backend = backend.name(), "Using encode backend");
    let started = std::time::Instant::now();
    backend.encode(&job, sequence, progress.as_ref())?;

    let size_bytes = std::fs::metadata(&job.output_path)?.len();
    tracing::info!(
        elapsed_secs = started.elapsed().as_secs_f64(),
        size_bytes,
        "Encode finished"
    );

    Ok(EncodeOutcome {
        output_path: job.output_path,
        size_bytes,
        duration_secs: sequence.total_duration_secs(),
        frame_count: sequence.len(),
    })
}

/// Encodes through the `ffmpeg` binary.
pub struct FfmpegBackend<R: ProcessRunner = SystemRunner> {
    runner: R,
}

const FFMPEG: &str = "ffmpeg";
const CONCAT_FILE_NAME: &str = "concat.txt";
const AUDIO_FILE_NAME: &str = "tone.wav";

impl FfmpegBackend<SystemRunner> {
    pub fn new() -> Self {
        Self {
            runner: SystemRunner,
        }
    }
}

impl Default for FfmpegBackend<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProcessRunner> FfmpegBackend<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    fn encode_in(
        &self,
        workdir: &Path,
        job: &EncodeJob,
        sequence: &Sequence,
        progress: Option<&ProgressCallback>,
    ) -> SkedaddleResult<()> {
        let concat_path = workdir.join(CONCAT_FILE_NAME);
        std::fs::write(&concat_path, build_concat_script(sequence, &job.frames)?)?;
        tracing::debug!(path = %concat_path.display(), "Wrote concat script");

        let audio_path = match job.tone_frequency_hz {
            Some(frequency_hz) => {
                report(
                    progress,
                    EncodeProgress {
                        progress: 0.0,
                        out_time_secs: 0.0,
                        stage: EncodeStage::SynthesizingAudio,
                    },
                );
                let path = workdir.join(AUDIO_FILE_NAME);
                self.synthesize_audio(sequence, frequency_hz, &path)?;
                Some(path)
            }
            None => None,
        };

        let args = video_args(
            job.format,
            &concat_path,
            audio_path.as_deref(),
            &job.output_path,
        );
        self.run_video(
            &args,
            &job.output_path,
            sequence.total_duration_secs(),
            progress,
        )
    }

    fn synthesize_audio(
        &self,
        sequence: &Sequence,
        frequency_hz: u32,
        output: &Path,
    ) -> SkedaddleResult<()> {
        let args = audio_args(sequence, frequency_hz, output);
        tracing::debug!(args = ?args, "Running ffmpeg audio synthesis");

        let result = self
            .runner
            .run(FFMPEG, &args, &mut |_| {})
            .map_err(|e| {
                SkedaddleError::audio_synthesis_failed(FFMPEG, format!("Failed to start: {e}"))
            })?;
        if !result.success {
            return Err(SkedaddleError::audio_synthesis_failed(
                FFMPEG,
                format!("status {}: {}", result.status, result.stderr.trim()),
            ));
        }
        tracing::info!(path = %output.display(), "Synthesized tone track");
        Ok(())
    }

    /// Run the video step. A failed run removes whatever ffmpeg left at
    /// `output`; earlier failures never reach this point.
    fn run_video(
        &self,
        args: &[String],
        output: &Path,
        expected_duration_secs: f64,
        progress: Option<&ProgressCallback>,
    ) -> SkedaddleResult<()> {
        tracing::debug!(args = ?args, "Running ffmpeg");
        report(
            progress,
            EncodeProgress {
                progress: 0.0,
                out_time_secs: 0.0,
                stage: EncodeStage::Encoding,
            },
        );

        let mut state = ProgressState::default();
        let result = self
            .runner
            .run(FFMPEG, args, &mut |line| {
                if let Some((key, value)) = line.split_once('=') {
                    state.update(key, value);
                    if key == "progress" {
                        report(progress, progress_report(&state, expected_duration_secs));
                    }
                }
            })
            .map_err(|e| SkedaddleError::encode_failed(FFMPEG, format!("Failed to start: {e}")))?;

        if !result.success {
            remove_partial_output(output);
            return Err(SkedaddleError::encode_failed(
                FFMPEG,
                format!("status {}: {}", result.status, result.stderr.trim()),
            ));
        }

        report(
            progress,
            EncodeProgress {
                progress: 1.0,
                out_time_secs: expected_duration_secs,
                stage: EncodeStage::Complete,
            },
        );
        Ok(())
    }
}

impl<R: ProcessRunner> EncodeBackend for FfmpegBackend<R> {
    fn encode(
        &mut self,
        job: &EncodeJob,
        sequence: &Sequence,
        progress: Option<&ProgressCallback>,
    ) -> SkedaddleResult<()> {
        let workdir = tempfile::Builder::new().prefix("skedaddle-").tempdir()?;
        let result = self.encode_in(workdir.path(), job, sequence, progress);

        let workdir_path = workdir.path().to_path_buf();
        if let Err(err) = workdir.close() {
            tracing::warn!(error = %err, path = %workdir_path.display(), "Failed to remove temporary files");
        }
        result
    }

    fn is_available(&self) -> bool {
        self.runner.is_available(FFMPEG)
    }

    fn name(&self) -> &str {
        FFMPEG
    }
}

/// ffmpeg arguments that mux the concat script (and optional tone track)
/// into the output container.
pub fn video_args(
    format: OutputFormat,
    concat_path: &Path,
    audio_path: Option<&Path>,
    output: &Path,
) -> Vec<String> {
    let mut args: Vec<String> = [
        "-y",
        "-hide_banner",
        "-loglevel",
        "error",
        "-nostats",
        "-progress",
        "pipe:1",
        "-f",
        "concat",
        "-safe",
        "0",
        "-i",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    args.push(concat_path.to_string_lossy().into_owned());

    if let Some(audio) = audio_path {
        args.push("-i".to_string());
        args.push(audio.to_string_lossy().into_owned());
    }

    args.extend(format.codec_args(audio_path.is_some()));
    args.push(output.to_string_lossy().into_owned());
    args
}

fn remove_partial_output(output: &Path) {
    if !output.exists() {
        return;
    }
    match std::fs::remove_file(output) {
        Ok(()) => tracing::debug!(path = %output.display(), "Removed partial output"),
        Err(err) => {
            tracing::warn!(error = %err, path = %output.display(), "Failed to remove partial output")
        }
    }
}

fn report(progress: Option<&ProgressCallback>, update: EncodeProgress) {
    if let Some(cb) = progress {
        cb(update);
    }
}

#[derive(Debug, Default)]
struct ProgressState {
    out_time_secs: f64,
    complete: bool,
}

impl ProgressState {
    fn update(&mut self, key: &str, value: &str) {
        match key {
            // Despite the name, ffmpeg reports microseconds here too.
            "out_time_ms" | "out_time_us" => {
                if let Ok(us) = value.parse::<f64>() {
                    self.out_time_secs = us / 1_000_000.0;
                }
            }
            "progress" => {
                self.complete = value == "end";
            }
            _ => {}
        }
    }
}

fn progress_report(state: &ProgressState, expected_duration_secs: f64) -> EncodeProgress {
    let progress = if expected_duration_secs <= 0.0 {
        0.0
    } else {
        (state.out_time_secs / expected_duration_secs).clamp(0.0, 1.0)
    };

    EncodeProgress {
        progress: if state.complete { 1.0 } else { progress },
        out_time_secs: state.out_time_secs,
        stage: if state.complete {
            EncodeStage::Finalizing
        } else {
            EncodeStage::Encoding
        },
    }
}
