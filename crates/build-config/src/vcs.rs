//! Version-control probe
//!
//! Only read-only queries are issued. A probe that cannot run at all is a
//! definitive "not under version control", never an error or a retry.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::{debug, warn};

/// State of a working tree relative to a release tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeState {
    /// Not inside a work tree, or the tool is unavailable
    NotARepository,
    /// Under version control, but the tag does not exist
    TagMissing,
    /// Tag exists and the tree matches it
    Clean,
    /// Tag exists and the tree differs from it
    Diverged,
}

/// Answers how a directory relates to a release tag
pub trait VersionControl {
    /// Inspect `repo_dir` against `tag`
    fn tree_state(&self, repo_dir: &Path, tag: &str) -> TreeState;
}

/// Probe backed by the `git` command line
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    /// Use `git` from `PATH`
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific git executable
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run<I, S>(&self, repo_dir: &Path, args: I) -> Option<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let result = Command::new(&self.program)
            .arg("-C")
            .arg(repo_dir)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        match result {
            Ok(output) => Some(output),
            Err(e) => {
                warn!(program = %self.program.display(), error = %e, "Failed to run version control probe");
                None
            }
        }
    }
}

impl VersionControl for GitCli {
    fn tree_state(&self, repo_dir: &Path, tag: &str) -> TreeState {
        let Some(inside) = self.run(repo_dir, ["rev-parse", "--is-inside-work-tree"]) else {
            return TreeState::NotARepository;
        };
        if !inside.status.success() || String::from_utf8_lossy(&inside.stdout).trim() != "true" {
            debug!(repo = %repo_dir.display(), "Not inside a git work tree");
            return TreeState::NotARepository;
        }

        let reference = format!("refs/tags/{}", tag);
        let Some(has_tag) = self.run(repo_dir, ["rev-parse", "-q", "--verify", reference.as_str()])
        else {
            return TreeState::NotARepository;
        };
        if !has_tag.status.success() {
            return TreeState::TagMissing;
        }

        let Some(diff) = self.run(repo_dir, ["diff", "--quiet", tag, "--", "."]) else {
            return TreeState::NotARepository;
        };
        if diff.status.success() {
            TreeState::Clean
        } else {
            TreeState::Diverged
        }
    }
}
