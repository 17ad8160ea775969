use {
    super::{config::RemoteConfig, version::Version},
    std::{fmt, path::PathBuf},
};

/// A local file paired with the version-scoped remote folder it is copied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub local: PathBuf,
    pub user: String,
    pub host: String,
    pub remote_dir: String,
}

impl UploadTarget {
    pub fn new(local: PathBuf, remote: &RemoteConfig, version: &Version) -> Self {
        Self {
            local,
            user: remote.user.clone(),
            host: remote.host.clone(),
            remote_dir: remote_version_dir(remote, version),
        }
    }

    /// The `user@host:dir/` destination handed to scp.
    pub fn destination(&self) -> String {
        format!("{}@{}:{}", self.user, self.host, self.remote_dir)
    }
}

impl fmt::Display for UploadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.local.display(), self.destination())
    }
}

pub fn remote_version_dir(remote: &RemoteConfig, version: &Version) -> String {
    format!("{}/{}/", remote.base_dir, version.major_minor())
}

/// Whether doc and site commits are pushed to their remotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushDecision {
    Push,
    LocalOnly,
}

impl PushDecision {
    pub fn from_identity(user: &str, ci_user: &str) -> Self {
        if user == ci_user {
            Self::Push
        } else {
            Self::LocalOnly
        }
    }

    pub fn should_push(self) -> bool {
        self == Self::Push
    }
}
