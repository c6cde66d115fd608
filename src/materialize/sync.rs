//! Asset synchronizer: mirror static directories into the output tree.

use super::MaterializeError;
use super::context::{CopyDirSet, OutputCounter};
use super::walk::{ErrorPolicy, copy_tree};
use crate::assets::DirAssets;
use log::{info, warn};
use std::path::Path;

/// Copy every file of every entry in `copy_dirs` to
/// `output_dir/<dest_dir>/<relative path>`.
///
/// Entries run in order. The first file that fails to copy aborts its
/// entry, and the error is returned without touching later entries.
pub fn sync_assets(
    copy_dirs: &CopyDirSet,
    output_dir: &Path,
    counter: &mut OutputCounter,
) -> Result<(), MaterializeError> {
    for entry in copy_dirs {
        let before = counter.get();
        let source = DirAssets::new(&entry.source_dir);
        let dest = output_dir.join(&entry.dest_dir);

        if let Err(err) = copy_tree(&source, Path::new(""), &dest, ErrorPolicy::FailFast, counter) {
            warn!(
                "output: failed to copy assets: {}, {}",
                entry.source_dir.display(),
                err
            );
            return Err(err);
        }
        info!(
            "assets copied: {} -> {} ({} files)",
            entry.source_dir.display(),
            dest.display(),
            counter.get() - before
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::read_tree;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn mirrors_relative_paths() {
        let project = TempDir::new().unwrap();
        let static_dir = project.path().join("themes/default/static");
        fs::create_dir_all(static_dir.join("css")).unwrap();
        fs::write(static_dir.join("css/style.css"), "body{}").unwrap();
        fs::write(static_dir.join("robots.txt"), "User-agent: *").unwrap();

        let mut copy_dirs = CopyDirSet::new();
        copy_dirs.push(&static_dir, "static");
        let out = TempDir::new().unwrap();
        let mut counter = OutputCounter::new();

        sync_assets(&copy_dirs, out.path(), &mut counter).unwrap();

        assert_eq!(counter.get(), 2);
        assert_eq!(
            read_tree(&out.path().join("static")),
            vec![
                ("css/style.css".to_string(), b"body{}".to_vec()),
                ("robots.txt".to_string(), b"User-agent: *".to_vec()),
            ]
        );
    }

    #[test]
    fn missing_source_dir_is_error() {
        let mut copy_dirs = CopyDirSet::new();
        copy_dirs.push("/definitely/not/here", "static");
        let out = TempDir::new().unwrap();
        let mut counter = OutputCounter::new();

        let err = sync_assets(&copy_dirs, out.path(), &mut counter).unwrap_err();
        assert!(matches!(err, MaterializeError::Listing { .. }));
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn blocked_destination_fails_entry() {
        let src = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("css")).unwrap();
        fs::write(src.path().join("css/style.css"), "body{}").unwrap();
        let out = TempDir::new().unwrap();
        fs::create_dir_all(out.path().join("static")).unwrap();
        fs::write(out.path().join("static/css"), "in the way").unwrap();

        let mut copy_dirs = CopyDirSet::new();
        copy_dirs.push(src.path(), "static");
        let mut counter = OutputCounter::new();

        let err = sync_assets(&copy_dirs, out.path(), &mut counter).unwrap_err();
        assert!(matches!(err, MaterializeError::Write { .. }));
        assert_eq!(counter.get(), 0);
    }
}
