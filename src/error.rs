// Allow unused_assignments at module level because thiserror's generated code
// for struct variants triggers false positive warnings - the fields ARE used
// in the Display impl but rustc's lint pass doesn't see this.
#![allow(unused_assignments)]

use miette::Diagnostic;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for command-line misuse and broken configuration.
pub const EXIT_USAGE: i32 = 2;
/// Exit code when a selector names nothing, or resolves to nothing.
pub const EXIT_NOT_FOUND: i32 = 11;
/// Exit code when at least one service failed to start.
pub const EXIT_START_FAILED: i32 = 21;
/// Exit code when at least one service failed to stop.
pub const EXIT_STOP_FAILED: i32 = 22;
/// Exit code when `status` finds at least one service not running.
pub const EXIT_SOME_DOWN: i32 = 23;
/// Exit code for invariant violations inside ads itself.
pub const EXIT_INTERNAL: i32 = 50;
/// Exit code when Ctrl-C arrives while no service command is running.
pub const EXIT_INTERRUPTED: i32 = 130;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("{}: {message}", .path.display())]
    #[diagnostic(
        code(ads::config::invalid),
        help("Fix the file and re-run")
    )]
    Config { path: PathBuf, message: String },

    #[error("{}: failed to parse YAML: {source}", .path.display())]
    #[diagnostic(code(ads::config::yaml))]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Definition of selector '{}' is circular: {}", .0.first().map(String::as_str).unwrap_or_default(), .0.join(" -> "))]
    #[diagnostic(
        code(ads::selector::circular),
        help("Groups cannot include each other in a cycle. Review the 'groups' in adsroot.yml and ~/.ads_profile.yml")
    )]
    CircularSelector(Vec<String>),

    #[error("No service or selector named '{name}'. Reference chain: {}", .chain.join(" -> "))]
    #[diagnostic(
        code(ads::selector::unknown),
        help("Run `ads list` to see the services and groups that are defined")
    )]
    UnknownSelector { name: String, chain: Vec<String> },

    #[error("{0}")]
    #[diagnostic(code(ads::not_found))]
    NotFound(String),

    #[error("{0}")]
    #[diagnostic(code(ads::usage))]
    Usage(String),

    #[error("{0}")]
    #[diagnostic(
        code(ads::service::start_failed),
        help("Re-run with -v to see the output of the start commands")
    )]
    StartFailed(String),

    #[error("{0}")]
    #[diagnostic(
        code(ads::service::stop_failed),
        help("Re-run with -v to see the output of the stop and status commands")
    )]
    StopFailed(String),

    #[error("One or more services are not running")]
    #[diagnostic(code(ads::service::some_down))]
    SomeDown,

    #[error("Failed to run command in '{}': {source}", .dir.display())]
    #[diagnostic(
        code(ads::process::spawn),
        help("ads runs every command through /bin/bash; check that it is installed")
    )]
    Process {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Internal error: {0}")]
    #[diagnostic(code(ads::internal))]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Process exit code scripts can branch on.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config { .. } | Error::Yaml { .. } | Error::Io(_) | Error::Usage(_) => {
                EXIT_USAGE
            }
            Error::CircularSelector(_) | Error::UnknownSelector { .. } | Error::NotFound(_) => {
                EXIT_NOT_FOUND
            }
            Error::StartFailed(_) => EXIT_START_FAILED,
            Error::StopFailed(_) => EXIT_STOP_FAILED,
            Error::SomeDown => EXIT_SOME_DOWN,
            Error::Process { .. } | Error::Internal(_) => EXIT_INTERNAL,
        }
    }

    /// Returns a helpful suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Error::UnknownSelector { name, .. } => Some(format!(
                "Run 'ads list' to see what is defined. Is '{}' missing an ads.yml?",
                name
            )),
            Error::CircularSelector(chain) => Some(format!(
                "Remove one of the references between these groups: {}",
                chain.join(", ")
            )),
            Error::Usage(msg) if msg.contains("within an ads project") => Some(
                "Create an adsroot.yml at the top of your codebase to mark the project root"
                    .to_string(),
            ),
            Error::Config { .. } | Error::Yaml { .. } => {
                Some("Check the file against the formats described in the README".to_string())
            }
            _ => None,
        }
    }

    /// Formats the error with its suggestion (if any) for user-friendly display.
    pub fn with_suggestion(&self) -> String {
        match self.suggestion() {
            Some(suggestion) => format!("{}\n\nHint: {}", self, suggestion),
            None => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circular_selector_names_head_and_full_chain() {
        let err = Error::CircularSelector(vec![
            "foo".to_string(),
            "bar".to_string(),
            "foo".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Definition of selector 'foo' is circular: foo -> bar -> foo"
        );
        assert_eq!(err.exit_code(), EXIT_NOT_FOUND);
    }

    #[test]
    fn unknown_selector_reports_reference_chain() {
        let err = Error::UnknownSelector {
            name: "a".to_string(),
            chain: vec!["ab".to_string(), "a".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("No service or selector named 'a'"), "{}", msg);
        assert!(msg.ends_with("ab -> a"), "{}", msg);
    }

    #[test]
    fn exit_codes_are_distinct_per_outcome() {
        let codes = [
            Error::Usage("x".into()).exit_code(),
            Error::NotFound("x".into()).exit_code(),
            Error::StartFailed("x".into()).exit_code(),
            Error::StopFailed("x".into()).exit_code(),
            Error::SomeDown.exit_code(),
            Error::Internal("x".into()).exit_code(),
        ];
        assert_eq!(codes, [2, 11, 21, 22, 23, 50]);
    }

    #[test]
    fn bad_selectors_exit_as_not_found() {
        let err = Error::UnknownSelector {
            name: "nope".into(),
            chain: vec!["nope".into()],
        };
        assert_eq!(err.exit_code(), EXIT_NOT_FOUND);
        assert!(err.with_suggestion().contains("Hint:"));
    }
}
