use {
    crate::error::ReleaseError,
    anyhow::{anyhow, Context, Result},
    log::debug,
    std::{
        path::{Path, PathBuf},
        process::{Command, Output},
    },
};

/// Result of committing every tracked change in a working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    NothingToCommit,
}

/// A version-controlled working copy the updaters pull, commit and push.
pub trait Repository {
    fn path(&self) -> &Path;
    fn pull(&self) -> Result<()>;
    fn commit_all(&self, message: &str) -> Result<CommitOutcome>;
    fn push(&self) -> Result<()>;
}

pub fn get_git_root_path(dir: &Path) -> Result<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(dir)
        .output()
        .map_err(|e| anyhow!("failed to get git root path, error: {e}"))?;
    if !output.status.success() {
        return Err(anyhow!(
            "{} is not inside a git repository: {}",
            dir.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }
    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(PathBuf::from(root))
}

/// A working copy driven through the system `git` binary.
///
/// `path` is the configured directory, which may sit below the git toplevel;
/// every command runs there and config files are resolved against it.
#[derive(Debug, Clone)]
pub struct GitRepository {
    path: PathBuf,
}

impl GitRepository {
    pub fn open(path: &Path) -> Result<Self> {
        let root = get_git_root_path(path)
            .context(format!("failed to open repository at {}", path.display()))?;
        debug!("{} belongs to the repository at {}", path.display(), root.display());
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        debug!("running `git {}` in {}", args.join(" "), self.path.display());
        Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .output()
            .context(format!(
                "failed to run `git {}` in {}",
                args.join(" "),
                self.path.display()
            ))
    }

    fn run_checked(&self, args: &[&str]) -> Result<String> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Err(self.command_failed(args, &output).into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn command_failed(&self, args: &[&str], output: &Output) -> ReleaseError {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let stderr = if stderr.is_empty() {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        } else {
            stderr
        };
        ReleaseError::GitCommandFailed {
            repo: self.path.clone(),
            args: args.join(" "),
            stderr,
        }
    }
}

impl Repository for GitRepository {
    fn path(&self) -> &Path {
        &self.path
    }

    fn pull(&self) -> Result<()> {
        self.run_checked(&["pull"])?;
        Ok(())
    }

    fn commit_all(&self, message: &str) -> Result<CommitOutcome> {
        let args = ["commit", "-am", message];
        let output = self.run(&args)?;
        if output.status.success() {
            return Ok(CommitOutcome::Committed);
        }

        // a failed commit with a clean tracked tree means there was nothing to commit
        let status = self.run_checked(&["status", "--porcelain", "--untracked-files=no"])?;
        if status.trim().is_empty() {
            return Ok(CommitOutcome::NothingToCommit);
        }
        Err(self.command_failed(&args, &output).into())
    }

    fn push(&self) -> Result<()> {
        self.run_checked(&["push"])?;
        Ok(())
    }
}
