#![allow(dead_code)]

use ads::runner::{CommandOutcome, CommandRunner, OutputMode};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway project tree on disk.
pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    /// A project with the given `adsroot.yml` contents.
    pub fn new(adsroot: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let project = Self { dir };
        project.write("adsroot.yml", adsroot);
        project
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Add a service whose state is the presence of a `running` marker file.
    pub fn marker_service(&self, rel_dir: &str) {
        self.write(
            &format!("{}/ads.yml", rel_dir),
            "status_cmd: test -f running\n\
             start_cmd: touch running\n\
             stop_cmd: rm -f running\n",
        );
    }

    /// Add a service whose start command leaves a background process behind,
    /// tracked through a `pid` file.
    pub fn daemon_service(&self, rel_dir: &str) {
        self.write(
            &format!("{}/ads.yml", rel_dir),
            "status_cmd: 'test -f pid && kill -0 \"$(cat pid)\" 2>/dev/null'\n\
             start_cmd: 'sleep 300 & echo $! > pid; echo daemon launched'\n\
             stop_cmd: 'kill \"$(cat pid)\"; rm -f pid'\n",
        );
    }

    pub fn is_running(&self, rel_dir: &str) -> bool {
        self.path(rel_dir).join("running").is_file()
    }
}

/// Answers each command with scripted exit codes; the last code repeats.
#[derive(Default)]
pub struct ScriptedRunner {
    script: Mutex<HashMap<String, VecDeque<i32>>>,
    calls: Mutex<Vec<(String, PathBuf)>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, command: &str, codes: &[i32]) -> Self {
        self.script
            .lock()
            .insert(command.to_string(), codes.iter().copied().collect());
        self
    }

    pub fn count(&self, command: &str) -> usize {
        self.calls.lock().iter().filter(|(c, _)| c == command).count()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(c, _)| c.clone()).collect()
    }

    pub fn dirs(&self) -> Vec<PathBuf> {
        self.calls.lock().iter().map(|(_, d)| d.clone()).collect()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &str, dir: &Path, _mode: OutputMode) -> ads::Result<CommandOutcome> {
        self.calls.lock().push((command.to_string(), dir.to_path_buf()));
        let mut script = self.script.lock();
        let queue = script
            .get_mut(command)
            .unwrap_or_else(|| panic!("unscripted command: {}", command));
        let code = if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            *queue.front().unwrap()
        };
        Ok(CommandOutcome::exited(code).with_output(format!("{} exited {}\n", command, code)))
    }
}
