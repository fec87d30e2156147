//! Shell command execution.
//!
//! Everything ads knows about a service comes from running one of its
//! commands and looking at the exit status. [`CommandRunner`] is that seam;
//! [`ShellRunner`] is the real implementation and tests substitute their own.

use crate::error::{Error, Result, EXIT_INTERRUPTED};
use async_trait::async_trait;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use tokio::process::Command;
use tokio::sync::watch;

/// What to do with a command's stdout/stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Inherit the terminal (verbose mode)
    Stream,
    /// Capture stdout and stderr interleaved, for replay on failure
    Buffer,
    /// Discard everything
    Null,
}

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitState {
    Exited(i32),
    /// Terminated by a signal other than an interactive interrupt
    Killed,
    /// The user pressed Ctrl-C while the command ran
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub state: ExitState,
    /// Captured text; only present in [`OutputMode::Buffer`]
    pub output: Option<String>,
}

impl CommandOutcome {
    pub fn exited(code: i32) -> Self {
        Self {
            state: ExitState::Exited(code),
            output: None,
        }
    }

    pub fn interrupted() -> Self {
        Self {
            state: ExitState::Interrupted,
            output: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn success(&self) -> bool {
        self.state == ExitState::Exited(0)
    }

    pub fn interrupted_by_user(&self) -> bool {
        self.state == ExitState::Interrupted
    }
}

/// Runs an opaque shell command string in a working directory.
///
/// Implementations must wait for the command to finish. Failure of the
/// command itself is a normal [`CommandOutcome`]; `Err` is reserved for not
/// being able to run it at all.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &str, dir: &Path, mode: OutputMode) -> Result<CommandOutcome>;
}

/// Runs commands with `bash -c`, racing each child against Ctrl-C.
///
/// Ctrl-C is only observed once [`listen_for_interrupts`] has been called.
#[derive(Debug, Default, Clone)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str, dir: &Path, mode: OutputMode) -> Result<CommandOutcome> {
        tracing::debug!(dir = %dir.display(), ?mode, "Running: {}", command);
        let process_error = |source: std::io::Error| Error::Process {
            dir: dir.to_path_buf(),
            source,
        };

        let mut cmd = Command::new("bash");
        cmd.arg("-c").arg(command).current_dir(dir).kill_on_drop(true);

        // Captured output goes to a file rather than a pipe: a daemon started in
        // the background inherits the descriptors and would hold a pipe open.
        let mut capture = None;
        match mode {
            OutputMode::Stream => {}
            OutputMode::Buffer => {
                let file = tempfile::tempfile().map_err(process_error)?;
                cmd.stdout(Stdio::from(file.try_clone().map_err(process_error)?))
                    .stderr(Stdio::from(file.try_clone().map_err(process_error)?));
                capture = Some(file);
            }
            OutputMode::Null => {
                cmd.stdout(Stdio::null()).stderr(Stdio::null());
            }
        }

        let _running = interrupts().enter();
        let mut child = cmd.spawn().map_err(process_error)?;
        // The builder holds the parent's copies of the capture descriptors.
        drop(cmd);

        let status = tokio::select! {
            result = child.wait() => result.map_err(process_error)?,
            _ = interrupt() => {
                tracing::debug!("Interrupted while running: {}", command);
                return Ok(CommandOutcome::interrupted());
            }
        };

        let state = exit_state(&status);
        if state == ExitState::Interrupted {
            // Let the listener see the same Ctrl-C while this command still counts as running.
            tokio::task::yield_now().await;
        }
        tracing::debug!(?state, "Finished: {}", command);

        let output = match capture {
            Some(file) => Some(read_capture(file).map_err(process_error)?),
            None => None,
        };
        Ok(CommandOutcome { state, output })
    }
}

fn read_capture(mut file: File) -> std::io::Result<String> {
    let mut bytes = Vec::new();
    file.seek(SeekFrom::Start(0))?;
    file.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Quote `word` for safe inclusion in a `bash -c` command line.
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Ctrl-C presses, routed to whatever is currently running.
///
/// Once tokio listens for SIGINT the default handler is gone, so a press with
/// nothing running would otherwise be lost. [`listen_for_interrupts`] exits the
/// process in that case instead.
#[derive(Debug)]
pub(crate) struct Interrupts {
    presses: watch::Sender<u64>,
    running: AtomicUsize,
}

/// Marks a command (or a wait between commands) as interruptible while alive.
pub(crate) struct Running<'a>(&'a AtomicUsize);

impl Drop for Running<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Interrupts {
    pub(crate) fn new() -> Self {
        Self {
            presses: watch::channel(0).0,
            running: AtomicUsize::new(0),
        }
    }

    pub(crate) fn enter(&self) -> Running<'_> {
        self.running.fetch_add(1, Ordering::SeqCst);
        Running(&self.running)
    }

    /// Resolves on the next press delivered after the first poll.
    pub(crate) async fn wait(&self) {
        let _running = self.enter();
        let mut presses = self.presses.subscribe();
        // The sender lives as long as `self`, so this only returns on a press.
        let _ = presses.changed().await;
    }

    /// Hand a press to whatever is running; false when nothing is.
    pub(crate) fn deliver(&self) -> bool {
        if self.running.load(Ordering::SeqCst) == 0 {
            return false;
        }
        self.presses.send_modify(|count| *count = count.wrapping_add(1));
        true
    }
}

fn interrupts() -> &'static Interrupts {
    static INTERRUPTS: OnceLock<Interrupts> = OnceLock::new();
    INTERRUPTS.get_or_init(Interrupts::new)
}

/// Take over Ctrl-C for the rest of the run.
///
/// A press while a command runs (or while `down` waits to retry) interrupts
/// just that; a press at any other time exits with [`EXIT_INTERRUPTED`].
/// Without this, [`interrupt`] never resolves and SIGINT keeps its default.
pub fn listen_for_interrupts() {
    tokio::spawn(async {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Unable to listen for Ctrl-C: {}", e);
                return;
            }
            if !interrupts().deliver() {
                tracing::debug!("Interrupted between commands");
                std::process::exit(EXIT_INTERRUPTED);
            }
        }
    });
}

/// Resolves when the user presses Ctrl-C.
pub(crate) async fn interrupt() {
    interrupts().wait().await
}

#[cfg(unix)]
fn exit_state(status: &std::process::ExitStatus) -> ExitState {
    use std::os::unix::process::ExitStatusExt;

    const SIGINT: i32 = 2;
    match (status.code(), status.signal()) {
        (Some(code), _) => ExitState::Exited(code),
        (None, Some(SIGINT)) => ExitState::Interrupted,
        (None, _) => ExitState::Killed,
    }
}

#[cfg(not(unix))]
fn exit_state(status: &std::process::ExitStatus) -> ExitState {
    status.code().map(ExitState::Exited).unwrap_or(ExitState::Killed)
}
