//! In-memory stand-ins for the external collaborators.

use {
    crate::{
        types::UploadTarget,
        utils::{Archiver, CommitOutcome, RemoteUploader, Repository},
    },
    anyhow::{anyhow, Result},
    std::{
        cell::RefCell,
        fs,
        path::{Path, PathBuf},
        rc::Rc,
    },
};

/// Shared, ordered record of every collaborator call.
pub(crate) type CallLog = Rc<RefCell<Vec<String>>>;

pub(crate) struct FakeArchiver {
    pub calls: CallLog,
}

impl Archiver for FakeArchiver {
    fn archive_dir(&self, dir: &Path, archive: &Path) -> Result<()> {
        let name = dir.file_name().unwrap().to_string_lossy().to_string();
        self.calls.borrow_mut().push(format!("archive {name}"));
        fs::write(archive, name)?;
        Ok(())
    }
}

pub(crate) struct FakeUploader {
    pub calls: CallLog,
    /// Uploads of a file with this name exit non-zero.
    pub fail_on: Option<String>,
}

impl RemoteUploader for FakeUploader {
    fn ensure_dir(&self, remote_dir: &str) -> Result<()> {
        self.calls.borrow_mut().push(format!("mkdir {remote_dir}"));
        Ok(())
    }

    fn upload(&self, target: &UploadTarget) -> Result<()> {
        let name = target.local.file_name().unwrap().to_string_lossy().to_string();
        self.calls
            .borrow_mut()
            .push(format!("upload {name} {}", target.destination()));
        if self.fail_on.as_deref() == Some(name.as_str()) {
            return Err(crate::error::ReleaseError::RemoteCopyFailed {
                path: target.local.clone(),
                target: target.destination(),
                status: "1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

pub(crate) struct FakeRepository {
    pub name: &'static str,
    pub path: PathBuf,
    pub calls: CallLog,
    pub outcome: CommitOutcome,
    pub fail_pull: bool,
}

impl FakeRepository {
    pub fn new(name: &'static str, path: &Path, calls: &CallLog) -> Self {
        Self {
            name,
            path: path.to_path_buf(),
            calls: calls.clone(),
            outcome: CommitOutcome::Committed,
            fail_pull: false,
        }
    }
}

impl Repository for FakeRepository {
    fn path(&self) -> &Path {
        &self.path
    }

    fn pull(&self) -> Result<()> {
        self.calls.borrow_mut().push(format!("pull {}", self.name));
        if self.fail_pull {
            return Err(anyhow!("merge conflict in {}", self.name));
        }
        Ok(())
    }

    fn commit_all(&self, message: &str) -> Result<CommitOutcome> {
        self.calls
            .borrow_mut()
            .push(format!("commit {} {message}", self.name));
        Ok(self.outcome)
    }

    fn push(&self) -> Result<()> {
        self.calls.borrow_mut().push(format!("push {}", self.name));
        Ok(())
    }
}

pub(crate) fn calls_starting_with(calls: &CallLog, prefix: &str) -> Vec<String> {
    calls
        .borrow()
        .iter()
        .filter(|call| call.starts_with(prefix))
        .cloned()
        .collect()
}
