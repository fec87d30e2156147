use ads::output::UserOutput;
use ads::paths::relative_to;
use ads::Workspace;
use std::path::Path;

/// Print each selected service's home, relative to `cwd`.
pub fn run_home(
    workspace: &Workspace,
    selectors: &[String],
    cwd: &Path,
    out: &dyn UserOutput,
) -> anyhow::Result<()> {
    for service in workspace.select(selectors, true)? {
        out.status(&relative_to(service.home(), cwd).display().to_string());
    }
    Ok(())
}
