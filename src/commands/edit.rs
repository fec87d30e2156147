use ads::output::UserOutput;
use ads::project::service_file;
use ads::runner::{shell_quote, CommandRunner, OutputMode};
use ads::Workspace;
use std::path::Path;

const DEFAULT_EDITOR: &str = "vi";

/// Open the selected services' `ads.yml` files in `$EDITOR`.
pub async fn run_edit(
    workspace: &Workspace,
    runner: &dyn CommandRunner,
    selectors: &[String],
    cwd: &Path,
    out: &dyn UserOutput,
) -> anyhow::Result<()> {
    let files: Vec<String> = workspace
        .select(selectors, true)?
        .into_iter()
        .map(|service| shell_quote(&service_file(service).to_string_lossy()))
        .collect();

    let editor = std::env::var("EDITOR")
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string());

    let command = format!("{} {}", editor, files.join(" "));
    let outcome = runner.run(&command, cwd, OutputMode::Stream).await?;
    if !outcome.success() && !outcome.interrupted_by_user() {
        out.error(&format!("{} exited with {:?}", editor, outcome.state));
    }
    Ok(())
}
