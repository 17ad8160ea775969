use {
    super::{PushArgs, VersionArgs},
    crate::{
        types::{PushDecision, ReleaseConfig, Version},
        utils::{CommitOutcome, GitRepository, Repository},
    },
    anyhow::{Context, Result},
    clap::Args,
    log::{info, warn},
    regex::Regex,
    std::{fs, path::Path},
};

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
    let repo = GitRepository::open(&config.doc.repo)?;
    update_doc(&repo, &config.doc.conf_file, &version, push)?;
    Ok(())
}

/// Replaces every line that assigns one of the patched keys (`key = ...`)
/// with `key = u'value'`. All other lines are kept byte for byte.
#[derive(Debug)]
pub struct LinePatch {
    fields: Vec<(Regex, String, String)>,
}

impl LinePatch {
    pub fn new(fields: &[(&str, &str)]) -> Result<Self> {
        let fields = fields
            .iter()
            .map(|(key, value)| -> Result<(Regex, String, String)> {
                let pattern = Regex::new(&format!("^{} = ", regex::escape(key)))?;
                Ok((pattern, key.to_string(), value.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { fields })
    }

    /// `version` and `release` as found in a Sphinx `conf.py`.
    pub fn for_version(version: &Version) -> Result<Self> {
        let version = version.to_string();
        Self::new(&[("version", &version), ("release", &version)])
    }

    /// Returns the patched text and the number of lines replaced.
    pub fn apply(&self, content: &str) -> (String, usize) {
        let mut replaced = 0usize;
        let mut out = String::with_capacity(content.len());
        for line in content.split_inclusive('\n') {
            let body = line.trim_end_matches(['\n', '\r']);
            let ending = &line[body.len()..];
            match self.fields.iter().find(|(pattern, _, _)| pattern.is_match(body)) {
                Some((_, key, value)) => {
                    out.push_str(&format!("{key} = u'{value}'{ending}"));
                    replaced = replaced.saturating_add(1);
                }
                None => out.push_str(line),
            }
        }
        (out, replaced)
    }
}

/// Pulls the documentation repository, stamps `version` into its config file,
/// commits, and pushes when `push` allows it.
pub fn update_doc(
    repo: &dyn Repository,
    conf_file: &Path,
    version: &Version,
    push: PushDecision,
) -> Result<CommitOutcome> {
    info!("updating verdict documentation in {}", repo.path().display());
    repo.pull()?;

    let path = repo.path().join(conf_file);
    let content = fs::read_to_string(&path).context(format!("failed to read {}", path.display()))?;
    let (updated, replaced) = LinePatch::for_version(version)?.apply(&content);
    if replaced == 0 {
        warn!("no `version =` or `release =` line found in {}", path.display());
    }
    fs::write(&path, updated).context(format!("failed to write {}", path.display()))?;

    commit_and_push(repo, version, push)
}

/// Commits all tracked changes as "version updated to {version}". An empty
/// commit is not an error. Pushes only under [`PushDecision::Push`].
pub fn commit_and_push(
    repo: &dyn Repository,
    version: &Version,
    push: PushDecision,
) -> Result<CommitOutcome> {
    let outcome = repo.commit_all(&format!("version updated to {version}"))?;
    if outcome == CommitOutcome::NothingToCommit {
        info!("nothing to commit in {}", repo.path().display());
    }
    if push.should_push() {
        info!("pushing {}", repo.path().display());
        repo.push()?;
    } else {
        info!("leaving the commit in {} local", repo.path().display());
    }
    Ok(outcome)
}
