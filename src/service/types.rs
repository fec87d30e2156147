use crate::config::ServiceFile;
use std::fmt;
use std::path::{Path, PathBuf};

/// The three externally-defined commands a service may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Status,
    Start,
    Stop,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Status => write!(f, "Status"),
            Verb::Start => write!(f, "Start"),
            Verb::Stop => write!(f, "Stop"),
        }
    }
}

/// Which family of log files to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogKind {
    /// `log_paths`
    #[default]
    General,
    /// `err_log_paths`
    Error,
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogKind::General => write!(f, "general"),
            LogKind::Error => write!(f, "error"),
        }
    }
}

/// A concrete service in a project.
///
/// Loaded once from its `ads.yml` and read-only afterwards. Every command is
/// optional; an absent command means ads cannot drive the service that way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    /// Absolute directory containing the service's `ads.yml`; commands run here
    pub home: PathBuf,
    pub description: Option<String>,
    pub status_cmd: Option<String>,
    pub start_cmd: Option<String>,
    pub stop_cmd: Option<String>,
    pub log_paths: Vec<String>,
    pub err_log_paths: Vec<String>,
}

impl Service {
    /// A service with no commands, logs, or description.
    pub fn new(name: impl Into<String>, home: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            home: home.into(),
            description: None,
            status_cmd: None,
            start_cmd: None,
            stop_cmd: None,
            log_paths: Vec::new(),
            err_log_paths: Vec::new(),
        }
    }

    pub fn from_file(name: impl Into<String>, home: impl Into<PathBuf>, file: ServiceFile) -> Self {
        Self {
            name: name.into(),
            home: home.into(),
            description: file.description.filter(|d| !d.trim().is_empty()),
            status_cmd: file.status_cmd.filter(|c| !c.trim().is_empty()),
            start_cmd: file.start_cmd.filter(|c| !c.trim().is_empty()),
            stop_cmd: file.stop_cmd.filter(|c| !c.trim().is_empty()),
            log_paths: file.log_paths.unwrap_or_default(),
            err_log_paths: file.err_log_paths.unwrap_or_default(),
        }
    }

    pub fn with_status(mut self, cmd: impl Into<String>) -> Self {
        self.status_cmd = Some(cmd.into());
        self
    }

    pub fn with_start(mut self, cmd: impl Into<String>) -> Self {
        self.start_cmd = Some(cmd.into());
        self
    }

    pub fn with_stop(mut self, cmd: impl Into<String>) -> Self {
        self.stop_cmd = Some(cmd.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_logs(mut self, kind: LogKind, globs: Vec<String>) -> Self {
        match kind {
            LogKind::General => self.log_paths = globs,
            LogKind::Error => self.err_log_paths = globs,
        }
        self
    }

    pub fn command(&self, verb: Verb) -> Option<&str> {
        match verb {
            Verb::Status => self.status_cmd.as_deref(),
            Verb::Start => self.start_cmd.as_deref(),
            Verb::Stop => self.stop_cmd.as_deref(),
        }
    }

    pub fn log_globs(&self, kind: LogKind) -> &[String] {
        match kind {
            LogKind::General => &self.log_paths,
            LogKind::Error => &self.err_log_paths,
        }
    }

    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or("(No description)")
    }

    pub fn home(&self) -> &Path {
        &self.home
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
