use clap::{ArgGroup, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ads")]
#[command(version)]
#[command(about = "ads - start, stop and inspect the services in your codebase")]
#[command(
    after_help = "Services are directories with an ads.yml; the project root has an adsroot.yml.\n\
                  With no service arguments, commands act on the default selector (see `ads list`)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Selectors plus verbosity, shared by the commands that act on services.
#[derive(Args, Debug, Clone, Default)]
pub struct Target {
    /// Show the commands being run and stream their output
    #[arg(short, long)]
    pub verbose: bool,

    /// Services, groups, or "all" (defaults to the default selector)
    #[arg(value_name = "SERVICE")]
    pub services: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List services, groups and the default selector
    List,

    /// Start services that are not running
    #[command(visible_aliases = ["start", "run"])]
    Up(Target),

    /// Stop services that are running
    #[command(visible_aliases = ["stop", "kill"])]
    Down(Target),

    /// Check whether services are running
    Status(Target),

    /// Stop and then start services
    #[command(visible_alias = "restart")]
    Bounce(Target),

    /// Tail, list or print log files
    #[command(group(ArgGroup::new("mode").args(["tail", "list", "cat"])))]
    #[command(group(ArgGroup::new("kind").args(["general", "errors"])))]
    Logs {
        /// Follow the log files (default)
        #[arg(long)]
        tail: bool,

        /// Print log file paths
        #[arg(long)]
        list: bool,

        /// Print the contents of the log files
        #[arg(long)]
        cat: bool,

        /// Use log_paths (default)
        #[arg(long)]
        general: bool,

        /// Use err_log_paths
        #[arg(long)]
        errors: bool,

        #[command(flatten)]
        target: Target,
    },

    /// Print service home directories
    Home {
        #[arg(value_name = "SERVICE")]
        services: Vec<String>,
    },

    /// Open ads.yml files in $EDITOR
    Edit {
        #[arg(value_name = "SERVICE")]
        services: Vec<String>,
    },
}

impl Commands {
    /// Whether -v was given; raises the default log level.
    pub fn verbose(&self) -> bool {
        match self {
            Commands::Up(t) | Commands::Down(t) | Commands::Status(t) | Commands::Bounce(t) => {
                t.verbose
            }
            Commands::Logs { target, .. } => target.verbose,
            Commands::List | Commands::Home { .. } | Commands::Edit { .. } => false,
        }
    }
}
