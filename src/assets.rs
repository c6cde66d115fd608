//! Read-only asset sources.
//!
//! The theme scaffolder and the asset synchronizer both copy trees out of a
//! [`VirtualAssetSource`]: a hierarchical, read-only store queried by path.
//! The trait says nothing about where the bytes live, so the same tree walk
//! serves three backends:
//!
//! - [`EmbeddedAssets`]: the default theme compiled into the binary with
//!   `include_dir`. This is what `inkpress init` extracts.
//! - [`DirAssets`]: a real directory on disk, used to mirror theme static
//!   directories into the output tree.
//! - [`MemoryAssets`]: an in-memory table, handy for tests and for callers
//!   that assemble a theme programmatically.
//!
//! Paths passed to a source are relative to its root. The empty path names
//! the root itself.

use include_dir::{Dir, DirEntry, include_dir};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Bundled themes. Each top-level directory is one theme.
static BUNDLED_THEMES: Dir = include_dir!("$CARGO_MANIFEST_DIR/themes");

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("cannot list directory {}: {source}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AssetError {
    fn listing_not_found(path: &Path) -> Self {
        AssetError::Listing {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        }
    }

    fn read_not_found(path: &Path) -> Self {
        AssetError::Read {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        }
    }
}

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualEntry {
    pub name: String,
    pub is_dir: bool,
}

impl VirtualEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// A read-only hierarchical file store.
///
/// Listings are returned sorted by name so every walk over a source visits
/// entries in the same order.
pub trait VirtualAssetSource {
    /// List the direct children of `path`.
    fn read_dir(&self, path: &Path) -> Result<Vec<VirtualEntry>, AssetError>;

    /// Read the full contents of the file at `path`.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, AssetError>;
}

// ============================================================================
// Embedded bundle
// ============================================================================

/// Themes bundled into the binary at compile time.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAssets {
    root: &'static Dir<'static>,
}

impl EmbeddedAssets {
    /// The bundled theme collection. `default` is the stock theme.
    pub fn themes() -> Self {
        Self {
            root: &BUNDLED_THEMES,
        }
    }

    fn find_dir(&self, path: &Path) -> Option<&'static Dir<'static>> {
        if is_root(path) {
            return Some(self.root);
        }
        self.root.get_dir(path)
    }
}

impl VirtualAssetSource for EmbeddedAssets {
    fn read_dir(&self, path: &Path) -> Result<Vec<VirtualEntry>, AssetError> {
        let dir = self
            .find_dir(path)
            .ok_or_else(|| AssetError::listing_not_found(path))?;
        let mut entries: Vec<VirtualEntry> = dir
            .entries()
            .iter()
            .filter_map(|entry| {
                let name = entry.path().file_name()?.to_string_lossy().into_owned();
                Some(match entry {
                    DirEntry::Dir(_) => VirtualEntry::dir(name),
                    DirEntry::File(_) => VirtualEntry::file(name),
                })
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, AssetError> {
        self.root
            .get_file(path)
            .map(|file| file.contents().to_vec())
            .ok_or_else(|| AssetError::read_not_found(path))
    }
}

// ============================================================================
// On-disk directory
// ============================================================================

/// A real directory viewed as a read-only asset source.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if is_root(path) {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }
}

impl VirtualAssetSource for DirAssets {
    fn read_dir(&self, path: &Path) -> Result<Vec<VirtualEntry>, AssetError> {
        let dir = self.resolve(path);
        let listing_err = |source: io::Error| AssetError::Listing {
            path: dir.clone(),
            source,
        };

        let meta = fs::metadata(&dir).map_err(listing_err)?;
        if !meta.is_dir() {
            return Err(listing_err(io::Error::new(
                io::ErrorKind::NotADirectory,
                "not a directory",
            )));
        }

        let mut entries = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| listing_err(e.into()))?;
            entries.push(VirtualEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry.file_type().is_dir(),
            });
        }
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, AssetError> {
        let file = self.resolve(path);
        fs::read(&file).map_err(|source| AssetError::Read { path: file, source })
    }
}

// ============================================================================
// In-memory table
// ============================================================================

/// An in-memory asset tree keyed by `/`-separated relative paths.
///
/// Directories are implied by the files inserted beneath them.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl VirtualAssetSource for MemoryAssets {
    fn read_dir(&self, path: &Path) -> Result<Vec<VirtualEntry>, AssetError> {
        let mut children: BTreeMap<String, bool> = BTreeMap::new();
        for file in self.files.keys() {
            let rest = if is_root(path) {
                file.as_path()
            } else {
                match file.strip_prefix(path) {
                    Ok(rest) => rest,
                    Err(_) => continue,
                }
            };
            let mut components = rest.components();
            let Some(first) = components.next() else {
                continue;
            };
            let name = first.as_os_str().to_string_lossy().into_owned();
            let is_dir = components.next().is_some();
            let slot = children.entry(name).or_insert(is_dir);
            *slot |= is_dir;
        }

        if children.is_empty() {
            return Err(AssetError::listing_not_found(path));
        }
        Ok(children
            .into_iter()
            .map(|(name, is_dir)| VirtualEntry { name, is_dir })
            .collect())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, AssetError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::read_not_found(path))
    }
}

fn is_root(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn embedded_bundle_has_default_theme() {
        let assets = EmbeddedAssets::themes();
        let top = assets.read_dir(Path::new("")).unwrap();
        assert!(top.contains(&VirtualEntry::dir("default")));

        let theme = assets.read_dir(Path::new("default")).unwrap();
        assert!(theme.contains(&VirtualEntry::file("theme.toml")));
        assert!(theme.contains(&VirtualEntry::dir("static")));
    }

    #[test]
    fn embedded_read_file_returns_bytes() {
        let assets = EmbeddedAssets::themes();
        let bytes = assets
            .read_file(Path::new("default/static/css/style.css"))
            .unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn embedded_missing_paths_are_errors() {
        let assets = EmbeddedAssets::themes();
        assert!(matches!(
            assets.read_dir(Path::new("no-such-theme")),
            Err(AssetError::Listing { .. })
        ));
        assert!(matches!(
            assets.read_file(Path::new("default/missing.txt")),
            Err(AssetError::Read { .. })
        ));
    }

    #[test]
    fn dir_assets_lists_sorted_children() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.txt"), "b").unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();

        let assets = DirAssets::new(tmp.path());
        let entries = assets.read_dir(Path::new("")).unwrap();
        assert_eq!(
            entries,
            vec![
                VirtualEntry::file("a.txt"),
                VirtualEntry::file("b.txt"),
                VirtualEntry::dir("sub"),
            ]
        );
    }

    #[test]
    fn dir_assets_missing_root_is_listing_error() {
        let tmp = TempDir::new().unwrap();
        let assets = DirAssets::new(tmp.path().join("nope"));
        let err = assets.read_dir(Path::new("")).unwrap_err();
        assert!(matches!(err, AssetError::Listing { .. }));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn dir_assets_read_error_names_full_path() {
        let tmp = TempDir::new().unwrap();
        let assets = DirAssets::new(tmp.path());
        let err = assets.read_file(Path::new("ghost.css")).unwrap_err();
        assert!(err.to_string().contains(&tmp.path().join("ghost.css").display().to_string()));
    }

    #[test]
    fn memory_assets_infers_directories() {
        let assets = MemoryAssets::new()
            .with_file("theme/a.txt", "a")
            .with_file("theme/sub/b.txt", "b");

        let entries = assets.read_dir(Path::new("theme")).unwrap();
        assert_eq!(
            entries,
            vec![VirtualEntry::file("a.txt"), VirtualEntry::dir("sub")]
        );
        assert_eq!(
            assets.read_file(Path::new("theme/sub/b.txt")).unwrap(),
            b"b"
        );
    }

    #[test]
    fn memory_assets_unknown_dir_is_error() {
        let assets = MemoryAssets::new().with_file("theme/a.txt", "a");
        assert!(assets.read_dir(Path::new("other")).is_err());
    }
}
