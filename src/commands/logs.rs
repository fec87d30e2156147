use ads::output::UserOutput;
use ads::paths::relative_to;
use ads::runner::{shell_quote, CommandRunner, OutputMode};
use ads::service::{collect_logs_nonempty, LogKind};
use ads::{Error, Workspace};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogsMode {
    #[default]
    Tail,
    List,
    Cat,
}

/// Tail, list or print the log files of the selected services.
///
/// An empty selection is allowed, but finding no log files at all is a
/// not-found error.
pub async fn run_logs(
    workspace: &Workspace,
    runner: &dyn CommandRunner,
    selectors: &[String],
    mode: LogsMode,
    kind: LogKind,
    cwd: &Path,
    out: &dyn UserOutput,
) -> anyhow::Result<()> {
    let services = workspace.select(selectors, false)?;
    let files = collect_logs_nonempty(&services, kind)?;

    match mode {
        LogsMode::List => {
            for file in &files {
                out.status(&relative_to(file, cwd).display().to_string());
            }
            Ok(())
        }
        LogsMode::Tail => {
            // Project-relative paths keep tail's "==> file <==" headers short.
            let root = &workspace.project().root;
            let command = format!("tail -F {}", quoted(&files, root).join(" \\\n\t"));
            let outcome = runner.run(&command, root, OutputMode::Stream).await?;
            if outcome.success() || outcome.interrupted_by_user() {
                Ok(())
            } else {
                Err(Error::Internal(format!("tail exited with {:?}", outcome.state)).into())
            }
        }
        LogsMode::Cat => {
            let command = format!("cat {}", quoted(&files, cwd).join(" "));
            let outcome = runner.run(&command, cwd, OutputMode::Stream).await?;
            if outcome.success() {
                Ok(())
            } else {
                Err(Error::Internal(format!("cat exited with {:?}", outcome.state)).into())
            }
        }
    }
}

fn quoted(files: &[PathBuf], base: &Path) -> Vec<String> {
    files
        .iter()
        .map(|f| shell_quote(&relative_to(f, base).to_string_lossy()))
        .collect()
}
