use {
    super::VersionArgs,
    crate::types::{ReleaseConfig, UploadTarget, Version},
    anyhow::{Context, Result},
    clap::Args,
    std::{
        env,
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
    for target in upload_targets(config, &root, &version) {
        println!("{target}");
    }
    Ok(())
}

/// Files published for `version`, in upload order: spark jar, jdbc jar, CLI archive.
pub fn upload_plan(config: &ReleaseConfig, version: &Version) -> Vec<PathBuf> {
    vec![
        config.jars_dir.join(version.spark_jar_name()),
        config.jars_dir.join(version.jdbc_jar_name()),
        PathBuf::from(version.cli_zip_name()),
    ]
}

/// The upload plan resolved against `root` and paired with the remote folder.
pub fn upload_targets(config: &ReleaseConfig, root: &Path, version: &Version) -> Vec<UploadTarget> {
    upload_plan(config, version)
        .into_iter()
        .map(|path| UploadTarget::new(root.join(path), &config.remote, version))
        .collect()
}

#[cfg(test)]
mod tests {
    use {super::*, pretty_assertions::assert_eq};

    #[test]
    fn test_upload_plan() {
        let config = ReleaseConfig::default();
        assert_eq!(
            upload_plan(&config, &Version::new(1, 2, 3)),
            vec![
                PathBuf::from("jars/verdict-spark-lib-1.2.3.jar"),
                PathBuf::from("jars/verdict-jdbc-1.2.3.jar"),
                PathBuf::from("verdict-cli-1.2.3.zip"),
            ]
        );
    }

    #[test]
    fn test_upload_targets() {
        let mut config = ReleaseConfig::default();
        config.jars_dir = PathBuf::from("/opt/verdict/jars");
        let targets = upload_targets(&config, Path::new("/work"), &Version::new(0, 4, 11));

        let locals = targets.iter().map(|t| t.local.clone()).collect::<Vec<_>>();
        assert_eq!(
            locals,
            vec![
                PathBuf::from("/opt/verdict/jars/verdict-spark-lib-0.4.11.jar"),
                PathBuf::from("/opt/verdict/jars/verdict-jdbc-0.4.11.jar"),
                PathBuf::from("/work/verdict-cli-0.4.11.zip"),
            ]
        );
        assert!(targets
            .iter()
            .all(|t| t.remote_dir == "/home/frs/project/verdict/0.4/"));
    }
}
