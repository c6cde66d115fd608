//! One tree walker, two failure policies.
//!
//! Scaffolding a theme and mirroring static directories are the same
//! operation (copy every file under a source directory to a destination
//! tree) with opposite tolerance for errors. [`copy_tree`] does the walk;
//! [`ErrorPolicy`] decides what a per-item failure means.

use super::MaterializeError;
use super::context::OutputCounter;
use crate::assets::VirtualAssetSource;
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// What to do when a single item in a tree fails to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log the failure, skip the item, keep going.
    ///
    /// Directories are created as soon as they are seen; a directory that
    /// cannot be created is skipped with everything beneath it.
    BestEffort,
    /// Stop at the first failing item and return its error.
    ///
    /// Only files are materialized; their parent directories are created
    /// on demand, so empty source directories leave no trace.
    FailFast,
}

/// Write `data` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, data: &[u8]) -> Result<(), MaterializeError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| MaterializeError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, data).map_err(|source| MaterializeError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Copy one file out of `source` onto disk.
fn copy_entry<S>(source: &S, from: &Path, to: &Path) -> Result<(), MaterializeError>
where
    S: VirtualAssetSource + ?Sized,
{
    let data = source.read_file(from)?;
    write_file(to, &data)
}

/// Recursively copy the subtree `from` of `source` to the real directory `to`.
///
/// Failing to list `from` itself is always an error. Below that, `policy`
/// decides. `counter` is bumped once per file written.
pub fn copy_tree<S>(
    source: &S,
    from: &Path,
    to: &Path,
    policy: ErrorPolicy,
    counter: &mut OutputCounter,
) -> Result<(), MaterializeError>
where
    S: VirtualAssetSource + ?Sized,
{
    let entries = source.read_dir(from)?;

    for entry in entries {
        let src = from.join(&entry.name);
        let dst = to.join(&entry.name);

        if entry.is_dir {
            match policy {
                ErrorPolicy::BestEffort => {
                    if let Err(err) = fs::create_dir_all(&dst) {
                        warn!("failed to create directory '{}': {}", dst.display(), err);
                        continue;
                    }
                    debug!("created directory '{}'", dst.display());
                    if let Err(err) = copy_tree(source, &src, &dst, policy, counter) {
                        warn!("skipped '{}': {}", src.display(), err);
                    }
                }
                ErrorPolicy::FailFast => copy_tree(source, &src, &dst, policy, counter)?,
            }
            continue;
        }

        match copy_entry(source, &src, &dst) {
            Ok(()) => {
                debug!("copied '{}' -> '{}'", src.display(), dst.display());
                counter.incr(1);
            }
            Err(err) => match policy {
                ErrorPolicy::BestEffort => {
                    warn!("skipped file '{}': {}", src.display(), err);
                }
                ErrorPolicy::FailFast => {
                    warn!("failed to copy '{}': {}", dst.display(), err);
                    return Err(err);
                }
            },
        }
    }

    Ok(())
}
