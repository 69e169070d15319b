//! Archive extraction into the cache directory
//!
//! The bundled zip is copied next to the cache, unpacked into a private
//! staging directory, and each top-level entry is then renamed into the cache
//! root. On failure the temp copy and the staging directory stay on disk for
//! inspection.

use super::location::{is_reserved_name, CacheLocation};
use super::marker::record_version;
use crate::error::{PupprinteerError, PupprinteerResult};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
#[cfg(any(unix, test))]
use std::path::Component;
use tokio::fs;
use tracing::{debug, info, warn};

/// Unix file type bits for a symbolic link
#[cfg(unix)]
const S_IFLNK: u32 = 0o120000;

/// Unix file type mask
#[cfg(unix)]
const S_IFMT: u32 = 0o170000;

/// How a successful extraction call produced its executable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// Archive unpacked and version marker written
    Extracted,
    /// Archive missing but an executable was already in place; its version
    /// is unknown and no marker was written
    ReusedUnversioned,
}

/// Extract `archive_path` into the cache and record `declared_version`
pub async fn extract(
    archive_path: &Path,
    location: &CacheLocation,
    declared_version: &str,
) -> PupprinteerResult<ExtractOutcome> {
    if !path_exists(archive_path).await {
        if path_exists(&location.executable_path).await {
            warn!(
                "Chrome archive {} not found; reusing existing binary of unknown version at {}",
                archive_path.display(),
                location.executable_path.display()
            );
            return Ok(ExtractOutcome::ReusedUnversioned);
        }
        return Err(PupprinteerError::ArchiveNotFound(archive_path.to_path_buf()));
    }

    info!("Extracting Chrome {}...", declared_version.trim());

    fs::copy(archive_path, &location.temp_archive_path)
        .await
        .map_err(|e| {
            PupprinteerError::extraction(
                archive_path,
                format!(
                    "copying to {}: {}",
                    location.temp_archive_path.display(),
                    e
                ),
            )
        })?;
    debug!(
        "ZIP file copied to temp location: {}",
        location.temp_archive_path.display()
    );

    let staging = location.new_staging_dir();
    let files = unpack_zip(&location.temp_archive_path, &staging)
        .await
        .map_err(|e| PupprinteerError::extraction(archive_path, e))?;
    debug!("Unpacked {} files into {}", files, staging.display());

    publish(&staging, &location.cache_root)
        .await
        .map_err(|e| PupprinteerError::extraction(archive_path, format!("publishing: {}", e)))?;
    debug!("ZIP contents extracted to: {}", location.cache_root.display());

    remove_temp_archive(&location.temp_archive_path).await;

    if !path_exists(&location.executable_path).await {
        return Err(PupprinteerError::ExecutableMissingAfterExtraction(
            location.executable_path.clone(),
        ));
    }

    make_executable(&location.executable_path)
        .await
        .map_err(|e| PupprinteerError::extraction(archive_path, e))?;
    record_version(location, declared_version)
        .await
        .map_err(|e| PupprinteerError::extraction(archive_path, e))?;

    info!(
        "Chrome binary ready: {}",
        location.executable_path.display()
    );
    Ok(ExtractOutcome::Extracted)
}

async fn path_exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

/// Delete the scratch archive copy; failure only warns.
///
/// Returns whether the file was removed.
async fn remove_temp_archive(path: &Path) -> bool {
    match fs::remove_file(path).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to remove temporary archive {}: {}", path.display(), e);
            false
        }
    }
}

/// Unpack a zip archive into `dest_dir` on the blocking pool.
///
/// Returns the number of regular files written.
pub async fn unpack_zip(archive_path: &Path, dest_dir: &Path) -> io::Result<usize> {
    let archive_path = archive_path.to_path_buf();
    let dest_dir = dest_dir.to_path_buf();

    tokio::task::spawn_blocking(move || unpack_zip_blocking(&archive_path, &dest_dir))
        .await
        .map_err(io::Error::other)?
}

fn unpack_zip_blocking(archive_path: &Path, dest_dir: &Path) -> io::Result<usize> {
    std::fs::create_dir_all(dest_dir)?;

    let file = File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(io::Error::other)?;
    let mut files = 0;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(io::Error::other)?;
        let entry_path = match entry.enclosed_name() {
            Some(path) => path.to_path_buf(),
            None => {
                warn!("Skipping unsafe path in zip: {}", entry.name());
                continue;
            }
        };

        let dest_path = dest_dir.join(&entry_path);

        if entry.is_dir() {
            std::fs::create_dir_all(&dest_path)?;
            continue;
        }

        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            if mode & S_IFMT == S_IFLNK {
                let mut target = String::new();
                io::Read::read_to_string(&mut entry, &mut target)?;
                write_symlink(&entry_path, &dest_path, Path::new(&target))?;
                continue;
            }
        }

        let mut outfile = File::create(&dest_path)?;
        io::copy(&mut entry, &mut outfile)?;
        files += 1;

        #[cfg(unix)]
        set_unix_permissions(&dest_path, entry.unix_mode())?;
    }

    Ok(files)
}

/// Create a symlink entry, refusing targets that leave the archive root
#[cfg(unix)]
fn write_symlink(entry_path: &Path, dest_path: &Path, target: &Path) -> io::Result<()> {
    let base = entry_path.parent().unwrap_or(Path::new(""));
    if !stays_within(&base.join(target)) {
        warn!(
            "Skipping symlink escaping archive root: {} -> {}",
            entry_path.display(),
            target.display()
        );
        return Ok(());
    }

    if dest_path.symlink_metadata().is_ok() {
        std::fs::remove_file(dest_path)?;
    }
    std::os::unix::fs::symlink(target, dest_path)
}

/// Whether a relative path never climbs above its starting directory
#[cfg(any(unix, test))]
fn stays_within(path: &Path) -> bool {
    let mut depth = 0usize;
    for component in path.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    true
}

#[cfg(unix)]
fn set_unix_permissions(path: &Path, mode: Option<u32>) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(mode) = mode {
        let mode = mode & 0o7777;
        if mode != 0 {
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))?;
        }
    }
    Ok(())
}

/// Move every top-level entry of `staging` into `cache_root`, then remove
/// the staging directory.
///
/// A stale copy is first renamed aside, so the new entry lands with a single
/// rename. Entries named like the cache's own files are skipped.
async fn publish(staging: &Path, cache_root: &Path) -> io::Result<()> {
    let mut retired = staging.as_os_str().to_owned();
    retired.push("-retired");
    let retired = PathBuf::from(retired);

    let mut entries = fs::read_dir(staging).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name());
    }

    let mut moved = 0usize;
    for name in names {
        if is_reserved_name(&name) {
            warn!(
                "Skipping archive entry that collides with cache files: {}",
                name.to_string_lossy()
            );
            continue;
        }

        let dest = cache_root.join(&name);
        match fs::symlink_metadata(&dest).await {
            Ok(_) => {
                fs::create_dir_all(&retired).await?;
                fs::rename(&dest, retired.join(&name)).await?;
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }

        fs::rename(staging.join(&name), &dest).await?;
        moved += 1;
    }

    if path_exists(&retired).await {
        fs::remove_dir_all(&retired).await?;
    }
    fs::remove_dir_all(staging).await?;
    debug!("Published {} entries into {}", moved, cache_root.display());
    Ok(())
}

/// Mark a file as runnable by its owner.
///
/// On Windows, this is a no-op.
#[allow(unused_variables)]
pub async fn make_executable(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut permissions = fs::metadata(path).await?.permissions();
        permissions.set_mode(permissions.mode() | 0o755);
        fs::set_permissions(path, permissions).await.map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("setting executable permission on {}: {}", path.display(), e),
            )
        })?;

        debug!("Chrome binary made executable: {}", path.display());
    }

    Ok(())
}
