use {
    crate::{
        error::ReleaseError,
        types::{RemoteConfig, UploadTarget},
    },
    anyhow::{Context, Result},
    log::{debug, info},
    std::process::{Command, ExitStatus},
};

/// Copies release files to the file-hosting account.
pub trait RemoteUploader {
    /// Makes sure the version-scoped folder exists on the remote side.
    fn ensure_dir(&self, remote_dir: &str) -> Result<()>;

    fn upload(&self, target: &UploadTarget) -> Result<()>;
}

/// Uploads with `scp` and manages folders through the hosting shell service over `ssh`.
#[derive(Debug, Clone)]
pub struct ScpUploader {
    remote: RemoteConfig,
}

impl ScpUploader {
    pub fn new(remote: RemoteConfig) -> Self {
        Self { remote }
    }

    fn shell_login(&self) -> String {
        format!(
            "{},{}@{}",
            self.remote.user, self.remote.project, self.remote.shell_host
        )
    }

    fn ssh(&self, command: &str) -> Result<()> {
        let login = self.shell_login();
        debug!("running `ssh {login} {command}`");
        let status = Command::new("ssh")
            .args([login.as_str(), command])
            .status()
            .context(format!("failed to run ssh against {login}"))?;
        if !status.success() {
            return Err(ReleaseError::RemoteCommandFailed {
                host: self.remote.shell_host.clone(),
                command: command.to_string(),
                status: describe(status),
            }
            .into());
        }
        Ok(())
    }
}

impl RemoteUploader for ScpUploader {
    fn ensure_dir(&self, remote_dir: &str) -> Result<()> {
        info!("creating {remote_dir} on {} if missing", self.remote.shell_host);
        // the hosting shell has to be started before it accepts commands
        self.ssh("create")?;
        self.ssh(&format!("mkdir -p {remote_dir}"))
    }

    fn upload(&self, target: &UploadTarget) -> Result<()> {
        let destination = target.destination();
        info!("uploading {} to {destination}", target.local.display());
        let status = Command::new("scp")
            .arg(&target.local)
            .arg(&destination)
            .status()
            .context(format!("failed to run scp for {}", target.local.display()))?;
        if !status.success() {
            return Err(ReleaseError::RemoteCopyFailed {
                path: target.local.clone(),
                target: destination,
                status: describe(status),
            }
            .into());
        }
        Ok(())
    }
}

fn describe(status: ExitStatus) -> String {
    status
        .code()
        .map(|code| code.to_string())
        .unwrap_or_else(|| "terminated by signal".to_string())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::types::{ReleaseConfig, Version},
        pretty_assertions::assert_eq,
        std::path::PathBuf,
    };

    #[test]
    fn test_shell_login() {
        let uploader = ScpUploader::new(ReleaseConfig::default().remote);
        assert_eq!(uploader.shell_login(), "yongjoop,verdict@shell.sourceforge.net");
    }

    #[cfg(unix)]
    mod stubbed {
        use {
            super::*,
            pretty_assertions::assert_eq,
            serial_test::serial,
            std::{env, fs, os::unix::fs::PermissionsExt, path::Path},
        };

        /// Puts `scp` and `ssh` scripts first on `PATH`. Each appends its
        /// arguments to `<name>.log` and exits with the given code.
        fn stub_commands(dir: &Path, scp_exit: i32, ssh_exit: i32) {
            for (name, code) in [("scp", scp_exit), ("ssh", ssh_exit)] {
                let script = dir.join(name);
                let log = dir.join(format!("{name}.log"));
                fs::write(
                    &script,
                    format!("#!/bin/sh\necho \"$@\" >> '{}'\nexit {code}\n", log.display()),
                )
                .unwrap();
                fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
            }
        }

        fn with_stub_path<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
            let saved = env::var_os("PATH");
            let _restore = scopeguard::guard(saved, |saved| match saved {
                Some(path) => env::set_var("PATH", path),
                None => env::remove_var("PATH"),
            });
            let mut paths = vec![dir.to_path_buf()];
            if let Some(path) = env::var_os("PATH") {
                paths.extend(env::split_paths(&path));
            }
            env::set_var("PATH", env::join_paths(paths).unwrap());
            f()
        }

        fn logged(dir: &Path, name: &str) -> Vec<String> {
            fs::read_to_string(dir.join(format!("{name}.log")))
                .unwrap_or_default()
                .lines()
                .map(|l| l.to_string())
                .collect()
        }

        fn target(local: PathBuf) -> UploadTarget {
            UploadTarget::new(local, &ReleaseConfig::default().remote, &Version::new(1, 2, 3))
        }

        #[test]
        #[serial]
        fn test_upload_success() {
            let temp_dir = tempfile::tempdir().unwrap();
            stub_commands(temp_dir.path(), 0, 0);
            let local = temp_dir.path().join("verdict-cli-1.2.3.zip");
            let uploader = ScpUploader::new(ReleaseConfig::default().remote);

            with_stub_path(temp_dir.path(), || uploader.upload(&target(local.clone()))).unwrap();

            assert_eq!(
                logged(temp_dir.path(), "scp"),
                vec![format!(
                    "{} yongjoop@frs.sourceforge.net:/home/frs/project/verdict/1.2/",
                    local.display()
                )]
            );
        }

        #[test]
        #[serial]
        fn test_upload_nonzero_exit_is_copy_failure() {
            let temp_dir = tempfile::tempdir().unwrap();
            stub_commands(temp_dir.path(), 1, 0);
            let local = temp_dir.path().join("verdict-jdbc-1.2.3.jar");
            let uploader = ScpUploader::new(ReleaseConfig::default().remote);

            let err = with_stub_path(temp_dir.path(), || uploader.upload(&target(local.clone())))
                .unwrap_err();

            match err.downcast_ref::<ReleaseError>() {
                Some(ReleaseError::RemoteCopyFailed {
                    path,
                    target,
                    status,
                }) => {
                    assert_eq!(path, &local);
                    assert_eq!(
                        target,
                        "yongjoop@frs.sourceforge.net:/home/frs/project/verdict/1.2/"
                    );
                    assert_eq!(status, "1");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[test]
        #[serial]
        fn test_ensure_dir() {
            let temp_dir = tempfile::tempdir().unwrap();
            stub_commands(temp_dir.path(), 0, 0);
            let uploader = ScpUploader::new(ReleaseConfig::default().remote);

            with_stub_path(temp_dir.path(), || {
                uploader.ensure_dir("/home/frs/project/verdict/1.2/")
            })
            .unwrap();

            assert_eq!(
                logged(temp_dir.path(), "ssh"),
                vec![
                    "yongjoop,verdict@shell.sourceforge.net create".to_string(),
                    "yongjoop,verdict@shell.sourceforge.net mkdir -p /home/frs/project/verdict/1.2/"
                        .to_string(),
                ]
            );
        }

        #[test]
        #[serial]
        fn test_ensure_dir_failure_is_remote_command_failure() {
            let temp_dir = tempfile::tempdir().unwrap();
            stub_commands(temp_dir.path(), 0, 255);
            let uploader = ScpUploader::new(ReleaseConfig::default().remote);

            let err = with_stub_path(temp_dir.path(), || {
                uploader.ensure_dir("/home/frs/project/verdict/1.2/")
            })
            .unwrap_err();

            match err.downcast_ref::<ReleaseError>() {
                Some(ReleaseError::RemoteCommandFailed {
                    host,
                    command,
                    status,
                }) => {
                    assert_eq!(host, "shell.sourceforge.net");
                    assert_eq!(command, "create");
                    assert_eq!(status, "255");
                }
                other => panic!("unexpected error: {other:?}"),
            }
            assert_eq!(logged(temp_dir.path(), "ssh").len(), 1);
        }
    }
}
