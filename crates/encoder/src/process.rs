//! Subprocess execution.

use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};

/// Result of a finished subprocess.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub success: bool,

    /// Exit status as reported by the OS (e.g. "exit status: 1").
    pub status: String,

    /// Everything the process wrote to stderr.
    pub stderr: String,
}

/// Runs external programs to completion.
pub trait ProcessRunner: Send {
    /// Run `program` and block until it exits, feeding each stdout line to
    /// `on_stdout_line` as it arrives.
    fn run(
        &self,
        program: &str,
        args: &[String],
        on_stdout_line: &mut dyn FnMut(&str),
    ) -> std::io::Result<ProcessOutput>;

    /// Whether `program` can be found on this system.
    fn is_available(&self, program: &str) -> bool;
}

/// Runs programs with `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        on_stdout_line: &mut dyn FnMut(&str),
    ) -> std::io::Result<ProcessOutput> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        tracing::debug!(pid = child.id(), program, "Process started");

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other(format!("failed to capture {program} stdout")))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| std::io::Error::other(format!("failed to capture {program} stderr")))?;

        // Drain stderr concurrently so a full pipe cannot stall the child.
        let stderr_task = std::thread::spawn(move || -> String {
            let mut reader = BufReader::new(stderr);
            let mut output = String::new();
            match reader.read_to_string(&mut output) {
                Ok(_) => output,
                Err(err) => format!("<failed to read stderr: {err}>"),
            }
        });

        let mut reader = BufReader::new(stdout);
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                on_stdout_line(trimmed);
            }
        }

        let status = child.wait()?;
        let stderr = stderr_task
            .join()
            .unwrap_or_else(|_| "<failed to join stderr reader>".to_string());

        Ok(ProcessOutput {
            success: status.success(),
            status: status.to_string(),
            stderr,
        })
    }

    fn is_available(&self, program: &str) -> bool {
        command_exists(program)
    }
}

/// Check whether a binary is on PATH.
pub fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
