use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use skedaddle_common::error::SkedaddleError;
use skedaddle_encoder::process::{ProcessOutput, ProcessRunner};
use skedaddle_encoder::{
    encode_with_backend, EncodeJob, EncodeProgress, EncodeStage, FfmpegBackend, FrameSet,
    OutputFormat,
};
use skedaddle_sequencer::{sequence, Sequence, SequencerConfig};

#[derive(Debug, Clone)]
struct Call {
    args: Vec<String>,
    concat_script: Option<String>,
}

/// Stands in for ffmpeg: records every call and writes the output file.
#[derive(Clone, Default)]
struct FakeRunner {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_call: Option<usize>,
    available: bool,
}

impl FakeRunner {
    fn new() -> Self {
        Self {
            available: true,
            ..Default::default()
        }
    }

    fn failing_on(call: usize) -> Self {
        Self {
            fail_call: Some(call),
            ..Self::new()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        on_stdout_line: &mut dyn FnMut(&str),
    ) -> std::io::Result<ProcessOutput> {
        assert_eq!(program, "ffmpeg");
        let concat_script = args
            .iter()
            .position(|a| a == "concat")
            .and_then(|i| args.get(i + 4))
            .map(|path| std::fs::read_to_string(path).unwrap());

        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(Call {
                args: args.to_vec(),
                concat_script,
            });
            calls.len() - 1
        };

        let output = PathBuf::from(args.last().unwrap());
        std::fs::write(&output, b"partial").unwrap();

        if self.fail_call == Some(index) {
            return Ok(ProcessOutput {
                success: false,
                status: "exit status: 1".to_string(),
                stderr: "Unknown encoder 'libaom-av1'\n".to_string(),
            });
        }

        on_stdout_line("out_time_us=40000");
        on_stdout_line("progress=continue");
        on_stdout_line("progress=end");
        std::fs::write(&output, b"fake media payload").unwrap();
        Ok(ProcessOutput {
            success: true,
            status: "exit status: 0".to_string(),
            stderr: String::new(),
        })
    }

    fn is_available(&self, _program: &str) -> bool {
        self.available
    }
}

struct Fixture {
    dir: tempfile::TempDir,
    frames: FrameSet,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let signal = dir.path().join("a.jpg");
    let pause = dir.path().join("b.jpg");
    std::fs::write(&signal, b"tongue out").unwrap();
    std::fs::write(&pause, b"normal").unwrap();
    Fixture {
        frames: FrameSet::new(signal, pause),
        dir,
    }
}

fn job(fx: &Fixture, format: OutputFormat, tone: Option<u32>) -> EncodeJob {
    EncodeJob {
        output_path: fx
            .dir
            .path()
            .join("out")
            .join(format!("morse.{}", format.extension())),
        format,
        frames: fx.frames.clone(),
        tone_frequency_hz: tone,
    }
}

fn sos() -> Sequence {
    sequence("SOS", &SequencerConfig::default()).unwrap()
}

fn arg_after<'a>(args: &'a [String], flag: &str) -> &'a str {
    let i = args.iter().position(|a| a == flag).unwrap();
    &args[i + 1]
}

#[test]
fn video_only_encode_runs_ffmpeg_once_and_cleans_up() {
    let fx = fixture();
    let runner = FakeRunner::new();
    let mut backend = FfmpegBackend::with_runner(runner.clone());
    let job = job(&fx, OutputFormat::Avif, None);
    let seq = sos();

    let outcome = encode_with_backend(&mut backend, &job, &seq, None).unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    let script = calls[0].concat_script.as_ref().unwrap();
    assert_eq!(script.matches("duration ").count(), seq.len());
    assert_eq!(script.matches("file ").count(), seq.len() + 1);
    assert!(script.starts_with("file '"));
    assert!(script.contains("duration 0.0800"));
    assert!(script.ends_with("b.jpg'\n"));

    assert_eq!(outcome.output_path, job.output_path);
    assert_eq!(outcome.size_bytes, b"fake media payload".len() as u64);
    assert_eq!(outcome.frame_count, seq.len());
    assert_eq!(outcome.duration_secs, seq.total_duration_secs());

    let concat_path = Path::new(arg_after(&calls[0].args, "-i"));
    assert!(!concat_path.exists(), "temporary concat script should be removed");
}

#[test]
fn audio_is_synthesized_before_video_mux() {
    let fx = fixture();
    let runner = FakeRunner::new();
    let mut backend = FfmpegBackend::with_runner(runner.clone());
    let job = job(&fx, OutputFormat::Mp4, Some(800));

    encode_with_backend(&mut backend, &job, &sos(), None).unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);

    let audio = &calls[0].args;
    assert!(arg_after(audio, "-filter_complex").contains("sine=f=800:d=0.2400"));
    assert_eq!(arg_after(audio, "-t"), "3.1600");
    let audio_path = audio.last().unwrap();

    let video = &calls[1].args;
    let inputs: Vec<&String> = video
        .iter()
        .enumerate()
        .filter(|(i, _)| *i > 0 && video[i - 1] == "-i")
        .map(|(_, a)| a)
        .collect();
    assert_eq!(inputs.len(), 2);
    assert_eq!(inputs[1], audio_path);
    assert_eq!(arg_after(video, "-c:a"), "aac");
    assert!(!Path::new(audio_path).exists());
}

#[test]
fn audio_failure_aborts_before_video() {
    let fx = fixture();
    let runner = FakeRunner::failing_on(0);
    let mut backend = FfmpegBackend::with_runner(runner.clone());
    let job = job(&fx, OutputFormat::Avif, Some(800));

    let err = encode_with_backend(&mut backend, &job, &sos(), None).unwrap_err();

    assert!(matches!(err, SkedaddleError::AudioSynthesisFailed { .. }));
    assert_eq!(runner.calls().len(), 1);
    assert!(!job.output_path.exists());
}

#[test]
fn audio_failure_leaves_existing_output_untouched() {
    let fx = fixture();
    let runner = FakeRunner::failing_on(0);
    let mut backend = FfmpegBackend::with_runner(runner.clone());
    let job = job(&fx, OutputFormat::Mp4, Some(800));
    std::fs::create_dir_all(job.output_path.parent().unwrap()).unwrap();
    std::fs::write(&job.output_path, b"previous render").unwrap();

    let err = encode_with_backend(&mut backend, &job, &sos(), None).unwrap_err();

    assert!(matches!(err, SkedaddleError::AudioSynthesisFailed { .. }));
    assert_eq!(runner.calls().len(), 1);
    assert_eq!(
        std::fs::read(&job.output_path).unwrap(),
        b"previous render".to_vec()
    );
}

#[test]
fn video_failure_reports_stderr_and_removes_partial_output() {
    let fx = fixture();
    let runner = FakeRunner::failing_on(0);
    let mut backend = FfmpegBackend::with_runner(runner.clone());
    let job = job(&fx, OutputFormat::Avif, None);
    std::fs::create_dir_all(job.output_path.parent().unwrap()).unwrap();
    std::fs::write(&job.output_path, b"previous render").unwrap();

    let err = encode_with_backend(&mut backend, &job, &sos(), None).unwrap_err();

    match err {
        SkedaddleError::EncodeFailed { backend, message } => {
            assert_eq!(backend, "ffmpeg");
            assert!(message.contains("Unknown encoder 'libaom-av1'"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!job.output_path.exists());
}

#[test]
fn missing_frame_fails_before_any_process_runs() {
    let fx = fixture();
    let runner = FakeRunner::new();
    let mut backend = FfmpegBackend::with_runner(runner.clone());
    let mut job = job(&fx, OutputFormat::Avif, None);
    job.frames = job.frames.with_long_signal(fx.dir.path().join("dah.jpg"));

    let err = encode_with_backend(&mut backend, &job, &sos(), None).unwrap_err();

    match err {
        SkedaddleError::ResourceNotFound { resource, path } => {
            assert_eq!(resource, "long-signal frame");
            assert_eq!(path, fx.dir.path().join("dah.jpg"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(runner.calls().is_empty());
}

#[test]
fn empty_sequence_is_rejected() {
    let fx = fixture();
    let runner = FakeRunner::new();
    let mut backend = FfmpegBackend::with_runner(runner.clone());
    let config = SequencerConfig {
        wpm: 15.0,
        end_gap_secs: 0.0,
    };
    let empty = sequence("🐱", &config).unwrap();

    let err =
        encode_with_backend(&mut backend, &job(&fx, OutputFormat::Avif, None), &empty, None)
            .unwrap_err();

    assert!(matches!(err, SkedaddleError::InvalidParameter { .. }));
    assert!(runner.calls().is_empty());
}

#[test]
fn unavailable_backend_is_unsupported() {
    let fx = fixture();
    let runner = FakeRunner {
        available: false,
        ..FakeRunner::new()
    };
    let mut backend = FfmpegBackend::with_runner(runner.clone());

    let err = encode_with_backend(&mut backend, &job(&fx, OutputFormat::Avif, None), &sos(), None)
        .unwrap_err();

    assert!(matches!(err, SkedaddleError::Unsupported { .. }));
    assert!(runner.calls().is_empty());
}

#[test]
fn progress_walks_through_stages() {
    let fx = fixture();
    let runner = FakeRunner::new();
    let mut backend = FfmpegBackend::with_runner(runner);
    let stages: Arc<Mutex<Vec<EncodeStage>>> = Arc::default();
    let sink = stages.clone();
    let callback: Box<dyn Fn(EncodeProgress) + Send> =
        Box::new(move |p| sink.lock().unwrap().push(p.stage));

    encode_with_backend(
        &mut backend,
        &job(&fx, OutputFormat::Avif, Some(700)),
        &sos(),
        Some(callback),
    )
    .unwrap();

    let stages = stages.lock().unwrap().clone();
    assert_eq!(
        stages,
        vec![
            EncodeStage::Preparing,
            EncodeStage::SynthesizingAudio,
            EncodeStage::Encoding,
            EncodeStage::Encoding,
            EncodeStage::Finalizing,
            EncodeStage::Complete,
        ]
    );
}
