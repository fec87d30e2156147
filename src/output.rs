use colored::Colorize;
use parking_lot::Mutex;
use std::io::Write;

/// Abstraction over user-facing output.
///
/// Library code reports through this trait instead of `println!`/`eprintln!`
/// so that tests can capture what a user would see and scripts can run ads
/// quietly. Diagnostics for developers go through `tracing` instead.
pub trait UserOutput: Send + Sync {
    /// Plain line on stdout (listings, paths meant for pipelines).
    fn status(&self, message: &str);

    /// Progress or outcome message (e.g., "Starting api").
    fn info(&self, message: &str);

    /// Extra detail shown only in verbose mode.
    fn debug(&self, message: &str);

    /// Error message (e.g., "Failed to start api").
    fn error(&self, message: &str);

    /// Captured output of a failed command, replayed verbatim.
    fn raw(&self, text: &str);
}

/// Separator printed after replayed command output.
pub const SEPARATOR: &str = "--------------------------------";

/// Standard CLI output: stdout/stderr with ANSI colors.
pub struct CliOutput;

impl UserOutput for CliOutput {
    fn status(&self, message: &str) {
        println!("{}", message);
    }

    fn info(&self, message: &str) {
        println!("{}", format!("--- {}", message).green());
        std::io::stdout().flush().ok();
    }

    fn debug(&self, message: &str) {
        println!("{}", message.blue());
        std::io::stdout().flush().ok();
    }

    fn error(&self, message: &str) {
        eprintln!("{}", format!("!!! {}", message).red());
    }

    fn raw(&self, text: &str) {
        let mut stderr = std::io::stderr().lock();
        stderr.write_all(text.as_bytes()).ok();
        stderr.flush().ok();
    }
}

/// Suppresses all output.
pub struct QuietOutput;

impl UserOutput for QuietOutput {
    fn status(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn debug(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn raw(&self, _text: &str) {}
}

/// Which channel a captured line went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Status,
    Info,
    Debug,
    Error,
    Raw,
}

/// Records every message in memory.
#[derive(Default)]
pub struct MemoryOutput {
    lines: Mutex<Vec<(Channel, String)>>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Channel, String)> {
        self.lines.lock().clone()
    }

    /// Messages sent to one channel, in order.
    pub fn on(&self, channel: Channel) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// True if any message on `channel` contains `needle`.
    pub fn contains(&self, channel: Channel, needle: &str) -> bool {
        self.on(channel).iter().any(|line| line.contains(needle))
    }

    fn push(&self, channel: Channel, message: &str) {
        self.lines.lock().push((channel, message.to_string()));
    }
}

impl UserOutput for MemoryOutput {
    fn status(&self, message: &str) {
        self.push(Channel::Status, message);
    }

    fn info(&self, message: &str) {
        self.push(Channel::Info, message);
    }

    fn debug(&self, message: &str) {
        self.push(Channel::Debug, message);
    }

    fn error(&self, message: &str) {
        self.push(Channel::Error, message);
    }

    fn raw(&self, text: &str) {
        self.push(Channel::Raw, text);
    }
}
