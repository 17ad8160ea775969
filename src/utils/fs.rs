use {
    anyhow::{anyhow, Context, Result},
    log::debug,
    std::{
        fs,
        path::{Path, PathBuf},
    },
    walkdir::WalkDir,
};

/// Copies `src` (a file or a directory tree) into `dest_dir`, like `cp -r src dest_dir`.
pub fn copy_into(src: &Path, dest_dir: &Path) -> Result<()> {
    if !src.exists() {
        return Err(anyhow!("{} does not exist", src.display()));
    }
    let Some(name) = src.file_name() else {
        return Err(anyhow!("{} has no file name", src.display()));
    };
    let base = src.parent().unwrap_or_else(|| Path::new(""));

    for entry in WalkDir::new(src).follow_links(true).sort_by_file_name() {
        let entry = entry.context(format!("failed to walk {}", src.display()))?;
        let relative = entry
            .path()
            .strip_prefix(base)
            .context(format!("{} escapes {}", entry.path().display(), base.display()))?;
        let target = dest_dir.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .context(format!("failed to create {}", target.display()))?;
        } else {
            debug!("copying {} to {}", entry.path().display(), target.display());
            fs::copy(entry.path(), &target).context(format!(
                "failed to copy {} to {}",
                entry.path().display(),
                target.display()
            ))?;
        }
    }
    debug!("copied {} into {}", name.to_string_lossy(), dest_dir.display());
    Ok(())
}

/// Removes `dir` and everything under it if it exists.
pub fn remove_dir_if_exists(dir: &Path) -> Result<()> {
    if dir.exists() {
        debug!("removing {}", dir.display());
        fs::remove_dir_all(dir).context(format!("failed to remove {}", dir.display()))?;
    }
    Ok(())
}

/// Regular files directly under `dir` whose names start with `prefix` and end with `suffix`.
pub fn find_files_by_affix(dir: &Path, prefix: &str, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut results = vec![];
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.context(format!("failed to list {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        if file_name.starts_with(prefix) && file_name.ends_with(suffix) {
            results.push(entry.path().to_path_buf());
        }
    }
    Ok(results)
}
