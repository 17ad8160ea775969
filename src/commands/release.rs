use {
    super::{
        clean::remove_cli_archives, package::package_cli, plan::upload_targets,
        publish::publish, resolve_push_decision, update_doc::update_doc,
        update_site::update_site, VersionArgs,
    },
    crate::{
        types::{PushDecision, ReleaseConfig, Version},
        utils::{Archiver, GitRepository, RemoteUploader, Repository, ScpUploader, ZipArchiver},
    },
    anyhow::{Context, Result},
    clap::Args,
    log::info,
    std::{env, path::Path},
};

#[derive(Args)]
pub struct CommandArgs {
    #[command(flatten)]
    pub version: VersionArgs,
}

pub fn run(args: CommandArgs, config: &ReleaseConfig) -> Result<()> {
    let push = resolve_push_decision(config)?;
    let version = args.version.resolve(config)?;
    let root = env::current_dir().context("failed to get current directory")?;

    let uploader = ScpUploader::new(config.remote.clone());
    let doc_repo = GitRepository::open(&config.doc.repo)?;
    let site_repo = GitRepository::open(&config.site.repo)?;

    Release {
        config,
        root: &root,
        archiver: &ZipArchiver,
        uploader: &uploader,
        doc_repo: &doc_repo,
        site_repo: &site_repo,
        push,
    }
    .run(&version)
}

/// One release run over its external collaborators.
///
/// Stages run in order and each one is final: a failure stops the run and
/// nothing done by earlier stages is undone. The `release` command opens both
/// repositories before building this, which only checks that they are git
/// working copies. Packaging is still the first side effect.
pub struct Release<'a> {
    pub config: &'a ReleaseConfig,
    pub root: &'a Path,
    pub archiver: &'a dyn Archiver,
    pub uploader: &'a dyn RemoteUploader,
    pub doc_repo: &'a dyn Repository,
    pub site_repo: &'a dyn Repository,
    pub push: PushDecision,
}

impl Release<'_> {
    pub fn run(&self, version: &Version) -> Result<()> {
        info!("releasing verdict {version}");

        package_cli(self.archiver, self.root, &self.config.package_files, version)?;

        let targets = upload_targets(self.config, self.root, version);
        publish(self.uploader, self.config, version, &targets)?;

        update_doc(self.doc_repo, &self.config.doc.conf_file, version, self.push)?;
        update_site(self.site_repo, &self.config.site, version, self.push)?;

        remove_cli_archives(self.root)?;
        info!("released verdict {version}");
        Ok(())
    }
}
