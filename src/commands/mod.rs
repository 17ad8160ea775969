pub mod clean;
pub mod package;
pub mod plan;
pub mod publish;
pub mod release;
pub mod update_doc;
pub mod update_site;

#[cfg(test)]
pub(crate) mod testing;

use {
    crate::{
        types::{PushDecision, ReleaseConfig, Version},
        utils::{current_user, JsonVersionStore, VersionStore},
    },
    anyhow::{Context, Result},
    clap::Args,
    log::info,
};

#[derive(Args, Debug, Clone, Default)]
pub struct VersionArgs {
    #[arg(
        long,
        value_name = "X.Y.Z",
        help = "Release this version instead of the one in the version file"
    )]
    pub version: Option<Version>,
}

impl VersionArgs {
    pub fn resolve(&self, config: &ReleaseConfig) -> Result<Version> {
        let version = match self.version {
            Some(version) => version,
            None => JsonVersionStore::new(&config.version_file)
                .current_version()
                .context("failed to resolve the release version")?,
        };
        info!("release version: {version}");
        Ok(version)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct PushArgs {
    #[arg(long, conflicts_with = "no_push", help = "Push the commit regardless of the current user")]
    pub push: bool,
    #[arg(long, help = "Keep the commit local regardless of the current user")]
    pub no_push: bool,
}

impl PushArgs {
    pub fn resolve(&self, config: &ReleaseConfig) -> Result<PushDecision> {
        if self.push {
            return Ok(PushDecision::Push);
        }
        if self.no_push {
            return Ok(PushDecision::LocalOnly);
        }
        resolve_push_decision(config)
    }
}

/// Commits are pushed only when the release runs as the CI account.
pub fn resolve_push_decision(config: &ReleaseConfig) -> Result<PushDecision> {
    let user = current_user()?;
    let decision = PushDecision::from_identity(&user, &config.ci_user);
    match decision {
        PushDecision::Push => {
            info!("running as {user}: doc and site changes will be pushed to their repositories")
        }
        PushDecision::LocalOnly => {
            info!("running as {user}: doc and site changes won't be pushed")
        }
    }
    Ok(decision)
}
