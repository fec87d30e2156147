use ads::output::UserOutput;
use ads::Workspace;

pub fn run_list(workspace: &Workspace, out: &dyn UserOutput) -> anyhow::Result<()> {
    for line in workspace.listing().render() {
        out.status(&line);
    }
    Ok(())
}
