use ads::output::UserOutput;
use ads::runner::CommandRunner;
use ads::{LifecycleController, Workspace};

/// Start the selected services. At least one must match.
pub async fn run_up(
    workspace: &Workspace,
    runner: &dyn CommandRunner,
    selectors: &[String],
    verbose: bool,
    out: &dyn UserOutput,
) -> anyhow::Result<()> {
    let services = workspace.select(selectors, true)?;
    LifecycleController::new(runner, out, verbose)
        .up_all(&services)
        .await?;
    Ok(())
}

/// Stop the selected services. At least one must match.
pub async fn run_down(
    workspace: &Workspace,
    runner: &dyn CommandRunner,
    selectors: &[String],
    verbose: bool,
    out: &dyn UserOutput,
) -> anyhow::Result<()> {
    let services = workspace.select(selectors, true)?;
    LifecycleController::new(runner, out, verbose)
        .down_all(&services)
        .await?;
    Ok(())
}

pub async fn run_bounce(
    workspace: &Workspace,
    runner: &dyn CommandRunner,
    selectors: &[String],
    verbose: bool,
    out: &dyn UserOutput,
) -> anyhow::Result<()> {
    let services = workspace.select(selectors, true)?;
    LifecycleController::new(runner, out, verbose)
        .bounce_all(&services)
        .await?;
    Ok(())
}

/// Report each selected service; an empty selection is fine.
pub async fn run_status(
    workspace: &Workspace,
    runner: &dyn CommandRunner,
    selectors: &[String],
    verbose: bool,
    out: &dyn UserOutput,
) -> anyhow::Result<()> {
    let services = workspace.select(selectors, false)?;
    LifecycleController::new(runner, out, verbose)
        .status_all(&services)
        .await?;
    Ok(())
}
