use super::{Outcome, ServiceStatus};
use crate::error::Result;
use crate::output::{UserOutput, SEPARATOR};
use crate::runner::{interrupt, CommandOutcome, CommandRunner, OutputMode};
use crate::service::{Service, Verb};
use std::time::Duration;

/// Times the stop command is re-run while the service still reports running.
pub const STOP_RETRY_LIMIT: u32 = 10;

/// Pause before re-running the stop command.
pub const STOP_RETRY_DELAY: Duration = Duration::from_millis(500);

enum Probe {
    Running,
    Stopped,
    Interrupted,
}

/// Drives single services up or down using their own commands.
///
/// Ordinary command failure is reported through [`Outcome`]; `Err` only
/// surfaces when a command can't be run at all.
pub struct LifecycleController<'a> {
    runner: &'a dyn CommandRunner,
    out: &'a dyn UserOutput,
    verbose: bool,
}

impl<'a> LifecycleController<'a> {
    /// # Arguments
    ///
    /// * `runner` - Executes status/start/stop commands
    /// * `out` - Receives progress and error messages
    /// * `verbose` - Stream command output instead of capturing it
    pub fn new(runner: &'a dyn CommandRunner, out: &'a dyn UserOutput, verbose: bool) -> Self {
        Self {
            runner,
            out,
            verbose,
        }
    }

    /// Ensure `service` is running.
    ///
    /// Trusts the start command's exit code; status is not re-checked afterwards.
    pub async fn up(&self, service: &Service) -> Result<Outcome> {
        let Some(status_cmd) = service.command(Verb::Status) else {
            self.out.error(&format!(
                "Status command not defined for {}; can't tell if it's already running",
                service.name
            ));
            return Ok(Outcome::StatusUndefined);
        };

        if self.verbose {
            self.out
                .debug(&format!("Checking if {} is already running", service.name));
        }
        match self.probe(service, status_cmd).await? {
            Probe::Running => {
                self.out.info(&format!("{} is already running", service.name));
                return Ok(Outcome::AlreadyRunning);
            }
            Probe::Interrupted => return Ok(self.interrupted(service, Verb::Status)),
            Probe::Stopped => {}
        }

        let Some(start_cmd) = service.command(Verb::Start) else {
            self.out
                .error(&format!("Start command not defined for {}", service.name));
            return Ok(Outcome::CommandUndefined(Verb::Start));
        };

        self.out.info(&format!("Starting {}", service.name));
        let outcome = self.run(service, start_cmd).await?;
        if outcome.interrupted_by_user() {
            return Ok(self.interrupted(service, Verb::Start));
        }
        if outcome.success() {
            if self.verbose {
                self.out.debug(&format!("Started {}", service.name));
            }
            return Ok(Outcome::Started);
        }

        self.out.error(&format!("Failed to start {}", service.name));
        self.replay(&outcome);
        Ok(Outcome::CommandFailed(Verb::Start))
    }

    /// Ensure `service` is stopped.
    ///
    /// Stop commands may return before the service has exited, so after each
    /// successful stop the status is checked again; the stop command is re-run
    /// up to [`STOP_RETRY_LIMIT`] more times, [`STOP_RETRY_DELAY`] apart.
    pub async fn down(&self, service: &Service) -> Result<Outcome> {
        let Some(status_cmd) = service.command(Verb::Status) else {
            self.out.error(&format!(
                "Status command not defined for {}; can't tell if it's already stopped",
                service.name
            ));
            return Ok(Outcome::StatusUndefined);
        };

        if self.verbose {
            self.out.debug(&format!("Checking if {} is running", service.name));
        }
        match self.probe(service, status_cmd).await? {
            Probe::Stopped => {
                self.out.info(&format!("{} is already stopped", service.name));
                return Ok(Outcome::AlreadyStopped);
            }
            Probe::Interrupted => return Ok(self.interrupted(service, Verb::Status)),
            Probe::Running => {}
        }

        let Some(stop_cmd) = service.command(Verb::Stop) else {
            self.out
                .error(&format!("Stop command not defined for {}", service.name));
            return Ok(Outcome::CommandUndefined(Verb::Stop));
        };

        self.out.info(&format!("Stopping {}", service.name));
        let mut attempts = 0;
        loop {
            let outcome = self.run(service, stop_cmd).await?;
            attempts += 1;

            if outcome.interrupted_by_user() {
                return Ok(self.interrupted(service, Verb::Stop));
            }
            if !outcome.success() {
                self.out
                    .error(&format!("Stop command failed for {}", service.name));
                self.replay(&outcome);
                return Ok(Outcome::CommandFailed(Verb::Stop));
            }
            if self.verbose {
                self.out.debug("Stop command succeeded");
            }

            match self.probe(service, status_cmd).await? {
                Probe::Stopped => {
                    if self.verbose {
                        self.out
                            .debug(&format!("Status says {} is down", service.name));
                    }
                    return Ok(Outcome::Stopped { attempts });
                }
                Probe::Interrupted => return Ok(self.interrupted(service, Verb::Status)),
                Probe::Running if attempts > STOP_RETRY_LIMIT => {
                    self.out.error(&format!(
                        "Stop command succeeded, but status says {} is still running. \
                         This is a bug in your ads.yml. If you can reproduce this, try with -v to debug.",
                        service.name
                    ));
                    tracing::warn!(
                        service = %service.name,
                        attempts,
                        "Service still running after repeated successful stop commands"
                    );
                    return Ok(Outcome::StillRunning { attempts });
                }
                Probe::Running => {
                    if self.verbose {
                        self.out.debug(&format!(
                            "{} is still running after stop command; retrying",
                            service.name
                        ));
                    }
                    tokio::select! {
                        _ = tokio::time::sleep(STOP_RETRY_DELAY) => {}
                        _ = interrupt() => return Ok(self.interrupted(service, Verb::Stop)),
                    }
                }
            }
        }
    }

    /// Report whether `service` is running. One status check, no retries.
    pub async fn status(&self, service: &Service) -> Result<ServiceStatus> {
        let Some(status_cmd) = service.command(Verb::Status) else {
            self.out
                .info(&format!("{}: status command not defined", service.name));
            return Ok(ServiceStatus::Unknown);
        };

        if self.verbose {
            self.out
                .debug(&format!("Checking if {} is running", service.name));
        }
        let status = match self.probe(service, status_cmd).await? {
            Probe::Running => ServiceStatus::Running,
            Probe::Stopped => ServiceStatus::Stopped,
            Probe::Interrupted => {
                self.out.info(&format!("{}: interrupted", service.name));
                return Ok(ServiceStatus::Unknown);
            }
        };

        let msg = if status.is_running() { "ok" } else { "not running" };
        self.out.info(&format!("{}: {}", service.name, msg));
        Ok(status)
    }

    async fn probe(&self, service: &Service, status_cmd: &str) -> Result<Probe> {
        let mode = if self.verbose {
            OutputMode::Stream
        } else {
            OutputMode::Null
        };
        let outcome = self.invoke(service, status_cmd, mode).await?;
        Ok(if outcome.interrupted_by_user() {
            Probe::Interrupted
        } else if outcome.success() {
            Probe::Running
        } else {
            Probe::Stopped
        })
    }

    async fn run(&self, service: &Service, command: &str) -> Result<CommandOutcome> {
        let mode = if self.verbose {
            OutputMode::Stream
        } else {
            OutputMode::Buffer
        };
        self.invoke(service, command, mode).await
    }

    async fn invoke(
        &self,
        service: &Service,
        command: &str,
        mode: OutputMode,
    ) -> Result<CommandOutcome> {
        if mode == OutputMode::Stream {
            self.out.debug(&format!("cd {}", service.home.display()));
            self.out.debug(command);
        }
        self.runner.run(command, &service.home, mode).await
    }

    /// Show a failed command's captured output; in verbose mode it was already streamed.
    fn replay(&self, outcome: &CommandOutcome) {
        if let Some(text) = outcome.output.as_deref() {
            self.out.raw(text);
            self.out.error(SEPARATOR);
        }
    }

    fn interrupted(&self, service: &Service, verb: Verb) -> Outcome {
        self.out.error(&format!(
            "{} command for {} was interrupted",
            verb, service.name
        ));
        Outcome::Interrupted(verb)
    }
}
