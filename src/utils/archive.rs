use {
    anyhow::{anyhow, Context, Result},
    log::debug,
    scopeguard::ScopeGuard,
    std::{
        fs::{self, File},
        io,
        path::Path,
    },
    walkdir::WalkDir,
    zip::{write::FileOptions, CompressionMethod, DateTime, ZipWriter},
};

/// Compresses a staged directory into a single archive file.
pub trait Archiver {
    /// Writes `archive` holding `dir`, with entries rooted at the directory's own name.
    fn archive_dir(&self, dir: &Path, archive: &Path) -> Result<()>;
}

/// Deflated zip archives with reproducible bytes: entries are added in
/// file-name order and stamped with the zip epoch instead of their mtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipArchiver;

impl Archiver for ZipArchiver {
    fn archive_dir(&self, dir: &Path, archive: &Path) -> Result<()> {
        if !dir.is_dir() {
            return Err(anyhow!("{} is not a directory", dir.display()));
        }
        let base = dir.parent().unwrap_or_else(|| Path::new(""));
        let partial = archive.with_extension("zip.partial");
        let partial = scopeguard::guard(partial, |path| {
            let _ = fs::remove_file(path);
        });

        let file = File::create(&*partial)
            .context(format!("failed to create {}", partial.display()))?;
        let mut zip = ZipWriter::new(file);

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.context(format!("failed to walk {}", dir.display()))?;
            let name = entry_name(entry.path(), base)?;
            let options = FileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .last_modified_time(DateTime::default())
                .unix_permissions(file_mode(&entry.metadata()?));

            if entry.file_type().is_dir() {
                debug!("adding directory {name}");
                zip.add_directory(name, options)?;
            } else {
                debug!("adding file {name}");
                zip.start_file(name, options)?;
                let mut src = File::open(entry.path())
                    .context(format!("failed to open {}", entry.path().display()))?;
                io::copy(&mut src, &mut zip)
                    .context(format!("failed to compress {}", entry.path().display()))?;
            }
        }
        zip.finish()
            .context(format!("failed to finish {}", partial.display()))?;

        fs::rename(&*partial, archive).context(format!(
            "failed to move {} to {}",
            partial.display(),
            archive.display()
        ))?;
        ScopeGuard::into_inner(partial);
        Ok(())
    }
}

fn entry_name(path: &Path, base: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(base)
        .context(format!("{} escapes {}", path.display(), base.display()))?;
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect::<Vec<_>>();
    Ok(parts.join("/"))
}

#[cfg(unix)]
fn file_mode(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn file_mode(metadata: &fs::Metadata) -> u32 {
    if metadata.is_dir() {
        0o755
    } else {
        0o644
    }
}
