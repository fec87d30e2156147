mod cli;
mod commands;

use ads::error::EXIT_INTERNAL;
use ads::output::{CliOutput, UserOutput};
use ads::service::LogKind;
use ads::{Error as AdsError, ShellRunner, Workspace};
use clap::Parser;
use cli::{Cli, Commands};
use commands::LogsMode;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.command.verbose()) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    if let Err(e) = run(cli).await {
        let out = CliOutput;
        let code = if let Some(ads_error) = e.downcast_ref::<AdsError>() {
            out.error(&ads_error.to_string());
            if let Some(suggestion) = ads_error.suggestion() {
                eprintln!("\nHint: {}", suggestion);
            }
            ads_error.exit_code()
        } else {
            out.error(&format!("{:#}", e));
            EXIT_INTERNAL
        };
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    ads::runner::listen_for_interrupts();
    let out = CliOutput;
    let runner = ShellRunner::new();
    let cwd = std::env::current_dir()?;
    let workspace = Workspace::load_from_env()?;

    match cli.command {
        Commands::List => commands::run_list(&workspace, &out),
        Commands::Up(target) => {
            commands::run_up(&workspace, &runner, &target.services, target.verbose, &out).await
        }
        Commands::Down(target) => {
            commands::run_down(&workspace, &runner, &target.services, target.verbose, &out).await
        }
        Commands::Bounce(target) => {
            commands::run_bounce(&workspace, &runner, &target.services, target.verbose, &out)
                .await
        }
        Commands::Status(target) => {
            commands::run_status(&workspace, &runner, &target.services, target.verbose, &out)
                .await
        }
        Commands::Logs {
            list,
            cat,
            errors,
            target,
            ..
        } => {
            let mode = if list {
                LogsMode::List
            } else if cat {
                LogsMode::Cat
            } else {
                LogsMode::Tail
            };
            let kind = if errors { LogKind::Error } else { LogKind::General };
            commands::run_logs(&workspace, &runner, &target.services, mode, kind, &cwd, &out).await
        }
        Commands::Home { services } => commands::run_home(&workspace, &services, &cwd, &out),
        Commands::Edit { services } => {
            commands::run_edit(&workspace, &runner, &services, &cwd, &out).await
        }
    }
}

/// Log to stderr, filtered by `ADS_LOG`, then `RUST_LOG`; `-v` raises the default to info.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = std::env::var("ADS_LOG")
        .ok()
        .and_then(|spec| tracing_subscriber::EnvFilter::try_new(spec).ok())
        .or_else(|| tracing_subscriber::EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}
