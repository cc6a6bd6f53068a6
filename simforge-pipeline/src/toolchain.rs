//! Toolchain driver — synchronous external-process invocation with captured
//! output and an optional deadline.
//!
//! A nonzero exit code is *data*, not an error: the caller decides what a
//! failed configure or build means for the run. [`ToolError`] is reserved for
//! invocations that could not be observed to completion at all (missing
//! binary, timeout, broken pipes).

use std::io::{BufReader, Read};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Exit code and fully drained streams of one finished invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Failures that prevent observing a tool's result.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The executable could not be spawned (typically: not found on PATH).
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The deadline elapsed; the child was killed.
    #[error("'{program}' timed out after {timeout_ms} ms")]
    Timeout { program: String, timeout_ms: u64 },

    /// I/O failure while waiting on or draining the child.
    #[error("I/O error while running '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Human-readable command line, for logs and reports.
pub fn command_line(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Run `program` with `args`, blocking until exit (or `timeout`), capturing
/// both output streams rather than letting them reach the console.
pub fn invoke(
    program: &str,
    args: &[String],
    timeout: Option<Duration>,
) -> Result<ToolOutput, ToolError> {
    let io_error = |source: std::io::Error| ToolError::Io {
        program: program.to_string(),
        source,
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ToolError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| io_error(std::io::Error::other("missing stdout pipe")))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| io_error(std::io::Error::other("missing stderr pipe")))?;

    // Drain both pipes on dedicated threads so a chatty tool cannot deadlock
    // against a full pipe buffer while we wait on it.
    let stdout_reader = thread::spawn(move || {
        let mut buf = String::new();
        let mut reader = BufReader::new(stdout);
        let _ = reader.read_to_string(&mut buf);
        buf
    });
    let stderr_reader = thread::spawn(move || {
        let mut buf = String::new();
        let mut reader = BufReader::new(stderr);
        let _ = reader.read_to_string(&mut buf);
        buf
    });

    let exit_status = match timeout {
        None => child.wait().map_err(io_error)?,
        Some(deadline) => {
            let start = Instant::now();
            loop {
                match child.try_wait() {
                    Ok(Some(status)) => break status,
                    Ok(None) => {
                        if start.elapsed() > deadline {
                            let _ = child.kill();
                            let _ = child.wait();
                            let _ = stdout_reader.join();
                            let _ = stderr_reader.join();
                            return Err(ToolError::Timeout {
                                program: program.to_string(),
                                timeout_ms: deadline.as_millis() as u64,
                            });
                        }
                        thread::sleep(Duration::from_millis(10));
                    }
                    Err(err) => return Err(io_error(err)),
                }
            }
        }
    };

    let stdout = stdout_reader.join().unwrap_or_default();
    let stderr = stderr_reader.join().unwrap_or_default();

    Ok(ToolOutput {
        exit_code: exit_status.code(),
        stdout,
        stderr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[test]
    fn captures_exit_code_and_both_streams() {
        let out = invoke("sh", &sh("echo out; echo err >&2; exit 3"), None).expect("invoke");
        assert_eq!(out.exit_code, Some(3));
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
        assert!(!out.success());
    }

    #[test]
    fn zero_exit_is_success() {
        let out = invoke("sh", &sh("exit 0"), None).expect("invoke");
        assert!(out.success());
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let err = invoke("definitely-not-a-real-binary-9f2c", &[], None).unwrap_err();
        assert!(matches!(err, ToolError::Spawn { .. }));
    }

    #[test]
    fn timeout_kills_a_hung_tool() {
        let err = invoke("sh", &sh("sleep 30"), Some(Duration::from_millis(100))).unwrap_err();
        match err {
            ToolError::Timeout { timeout_ms, .. } => assert_eq!(timeout_ms, 100),
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    #[test]
    fn output_is_captured_not_passed_through() {
        // Large output exercises the pipe-draining threads.
        let out = invoke("sh", &sh("seq 1 20000"), None).expect("invoke");
        assert!(out.success());
        assert!(out.stdout.ends_with("20000\n"));
    }

    #[test]
    fn command_line_formats_program_and_args() {
        assert_eq!(command_line("cmake", &[]), "cmake");
        assert_eq!(
            command_line("cmake", &["--build".to_string(), "/w/.sim/build".to_string()]),
            "cmake --build /w/.sim/build"
        );
    }
}
