use {
    crate::{types::ReleaseConfig, utils::find_files_by_affix},
    anyhow::{Context, Result},
    clap::Args,
    log::info,
    std::{
        env, fs,
        path::{Path, PathBuf},
    },
};

#[derive(Args)]
pub struct CommandArgs {}

pub fn run(_args: CommandArgs, _config: &ReleaseConfig) -> Result<()> {
    let root = env::current_dir().context("failed to get current directory")?;
    let removed = remove_cli_archives(&root)?;
    info!("removed {} archive(s)", removed.len());
    Ok(())
}

/// Deletes the `verdict*.zip` files directly under `root`.
pub fn remove_cli_archives(root: &Path) -> Result<Vec<PathBuf>> {
    info!("removing cli zip files in {}", root.display());
    let archives = find_files_by_affix(root, "verdict", ".zip")?;
    for archive in &archives {
        info!("  removing {}", archive.display());
        fs::remove_file(archive).context(format!("failed to remove {}", archive.display()))?;
    }
    Ok(archives)
}
