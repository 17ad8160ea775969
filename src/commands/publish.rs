use {
    super::{plan::upload_targets, VersionArgs},
    crate::{
        types::{release::remote_version_dir, ReleaseConfig, UploadTarget, Version},
        utils::{RemoteUploader, ScpUploader},
    },
    anyhow::{Context, Result},
    clap::Args,
    log::info,
    std::env,
};

#[derive(Args)]
pub struct CommandArgs {
    #[command(flatten)]
    pub version: VersionArgs,
}

pub fn run(args: CommandArgs, config: &ReleaseConfig) -> Result<()> {
    let version = args.version.resolve(config)?;
    let root = env::current_dir().context("failed to get current directory")?;
    let uploader = ScpUploader::new(config.remote.clone());
    publish(
        &uploader,
        config,
        &version,
        &upload_targets(config, &root, &version),
    )
}

/// Uploads every target in order. The first failure aborts; files already
/// copied stay on the remote side.
pub fn publish(
    uploader: &dyn RemoteUploader,
    config: &ReleaseConfig,
    version: &Version,
    targets: &[UploadTarget],
) -> Result<()> {
    if config.remote.create_remote_dir {
        uploader.ensure_dir(&remote_version_dir(&config.remote, version))?;
    }
    for (i, target) in targets.iter().enumerate() {
        info!("[{}/{}] uploading {target}", i.saturating_add(1), targets.len());
        uploader.upload(target)?;
    }
    Ok(())
}
