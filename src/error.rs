use std::path::PathBuf;

/// Failures a caller may need to tell apart from plain I/O errors.
///
/// Everything else travels as an [`anyhow::Error`] with context attached.
#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    #[error("invalid version `{text}`: {reason}")]
    InvalidVersion { text: String, reason: String },

    #[error("failed to copy {} to {target} (exit status: {status})", .path.display())]
    RemoteCopyFailed {
        path: PathBuf,
        target: String,
        status: String,
    },

    #[error("remote command `{command}` failed on {host} (exit status: {status})")]
    RemoteCommandFailed {
        host: String,
        command: String,
        status: String,
    },

    #[error("`git {args}` failed in {}: {stderr}", .repo.display())]
    GitCommandFailed {
        repo: PathBuf,
        args: String,
        stderr: String,
    },
}
