use crate::service::Verb;

/// Observed state of a service, as reported by its status command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Running,
    Stopped,
    /// No status command is defined, or the check was interrupted
    Unknown,
}

impl ServiceStatus {
    pub fn is_running(&self) -> bool {
        *self == ServiceStatus::Running
    }
}

/// Result of driving one service towards "up" or "down".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    AlreadyRunning,
    Started,
    AlreadyStopped,
    /// `attempts` counts invocations of the stop command
    Stopped { attempts: u32 },
    /// No status command, so the current state can't be known
    StatusUndefined,
    /// The command needed for the transition isn't defined
    CommandUndefined(Verb),
    /// The command ran and exited non-zero
    CommandFailed(Verb),
    /// The stop command kept succeeding but the status never changed
    StillRunning { attempts: u32 },
    /// The user pressed Ctrl-C while a command ran
    Interrupted(Verb),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::AlreadyRunning
                | Outcome::Started
                | Outcome::AlreadyStopped
                | Outcome::Stopped { .. }
        )
    }
}
