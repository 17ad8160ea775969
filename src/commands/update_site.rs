use {
    super::{update_doc::commit_and_push, PushArgs, VersionArgs},
    crate::{
        types::{PushDecision, ReleaseConfig, SiteConfig, Version},
        utils::{CommitOutcome, GitRepository, Repository},
    },
    anyhow::{anyhow, Context, Result},
    clap::Args,
    log::{debug, info},
    serde_yaml_ng::{Mapping, Value},
    std::{fs, path::Path},
};

pub const GENERATED_HEADER: &str = "# auto generated by verdict-release\n\n";

#[derive(Args)]
pub struct CommandArgs {
    #[command(flatten)]
    pub version: VersionArgs,

    #[command(flatten)]
    pub push: PushArgs,
}

pub fn run(args: CommandArgs, config: &ReleaseConfig) -> Result<()> {
    let push = args.push.resolve(config)?;
    let version = args.version.resolve(config)?;
    let repo = GitRepository::open(&config.site.repo)?;
    update_site(&repo, &config.site, &version, push)?;
    Ok(())
}

/// One downloadable artifact as listed on the download page.
struct Artifact {
    key: &'static str,
    family: &'static str,
    name: String,
}

fn artifacts(version: &Version) -> [Artifact; 3] {
    [
        Artifact {
            key: "verdict_spark",
            family: "Verdict Spark Library",
            name: version.spark_jar_name(),
        },
        Artifact {
            key: "verdict_jdbc",
            family: "Verdict JDBC Driver",
            name: version.jdbc_jar_name(),
        },
        Artifact {
            key: "verdict_shell",
            family: "Command Line Interface (including Verdict JDBC Driver)",
            name: version.cli_zip_name(),
        },
    ]
}

fn string(s: impl Into<String>) -> Value {
    Value::String(s.into())
}

/// Sets the release fields of the site `_config.yml` mapping, leaving every
/// other top-level key where it was.
pub fn set_release_fields(site: &mut Mapping, config: &SiteConfig, version: &Version) {
    let folder = format!("{}/{}", config.download_base_url, version.major_minor());
    site.insert(string("url"), string(config.url.as_str()));
    site.insert(string("version"), string(version.to_string()));

    for artifact in artifacts(version) {
        let url = format!("{folder}/{}/download", artifact.name);
        let mut entry = Mapping::new();
        entry.insert(string("family"), string(artifact.family));
        entry.insert(string("name"), string(artifact.name));
        entry.insert(string("url"), string(url));
        site.insert(string(artifact.key), Value::Mapping(entry));
    }
}

/// Parses `content`, applies [`set_release_fields`] and renders the whole
/// document again behind the generated-file header.
pub fn rewrite_site_config(content: &str, config: &SiteConfig, version: &Version) -> Result<String> {
    let mut site = match serde_yaml_ng::from_str::<Value>(content)? {
        Value::Mapping(mapping) => mapping,
        Value::Null => Mapping::new(),
        other => return Err(anyhow!("expected a mapping at the top level, found {other:?}")),
    };
    set_release_fields(&mut site, config, version);
    let rendered = serde_yaml_ng::to_string(&Value::Mapping(site))?;
    Ok(format!("{GENERATED_HEADER}{rendered}"))
}

/// Pulls the website repository, rewrites its config for `version`, commits,
/// and pushes when `push` allows it.
pub fn update_site(
    repo: &dyn Repository,
    config: &SiteConfig,
    version: &Version,
    push: PushDecision,
) -> Result<CommitOutcome> {
    info!("updating verdict site in {}", repo.path().display());
    repo.pull()?;

    let path = repo.path().join(&config.conf_file);
    let content = read_or_empty(&path)?;
    let updated = rewrite_site_config(&content, config, version)
        .context(format!("failed to update {}", path.display()))?;
    debug!("writing {}", path.display());
    fs::write(&path, updated).context(format!("failed to write {}", path.display()))?;

    commit_and_push(repo, version, push)
}

fn read_or_empty(path: &Path) -> Result<String> {
    if !path.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(path).context(format!("failed to read {}", path.display()))
}
