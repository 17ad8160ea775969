use {
    super::VersionArgs,
    crate::{
        types::{ReleaseConfig, Version},
        utils::{copy_into, remove_dir_if_exists, Archiver, ZipArchiver},
    },
    anyhow::{Context, Result},
    clap::Args,
    log::{debug, info},
    std::{
        env, fs,
        path::{Path, PathBuf},
    },
};

#[derive(Args)]
pub struct CommandArgs {
    #[command(flatten)]
    pub version: VersionArgs,
}

pub fn run(args: CommandArgs, config: &ReleaseConfig) -> Result<()> {
    let version = args.version.resolve(config)?;
    let root = env::current_dir().context("failed to get current directory")?;
    let archive = package_cli(&ZipArchiver, &root, &config.package_files, &version)?;
    info!("created {}", archive.display());
    Ok(())
}

/// Stages `files` from `root` into `verdict-cli-{version}/` and archives it as
/// `verdict-cli-{version}.zip` under `root`. A stale staging directory is replaced.
pub fn package_cli(
    archiver: &dyn Archiver,
    root: &Path,
    files: &[String],
    version: &Version,
) -> Result<PathBuf> {
    let archive = root.join(version.cli_zip_name());
    info!("creating a zip archive: {}", archive.display());

    let staging = root.join(version.cli_dir_name());
    remove_dir_if_exists(&staging)?;
    fs::create_dir_all(&staging).context(format!("failed to create {}", staging.display()))?;

    for file in files {
        debug!("staging {file}");
        copy_into(&root.join(file), &staging)
            .context(format!("failed to stage {file} into {}", staging.display()))?;
    }

    archiver
        .archive_dir(&staging, &archive)
        .context(format!("failed to create {}", archive.display()))?;
    Ok(archive)
}
