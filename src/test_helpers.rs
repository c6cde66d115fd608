//! Shared test utilities for the inkpress test suite.
//!
//! Filesystem fixtures are built in `TempDir`s; failures are injected
//! without permission tricks (tests may run as root):
//!
//! - [`FailingReads`] wraps any asset source and refuses to read chosen paths.
//! - A regular file placed where a directory is expected blocks writes.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::assets::{AssetError, VirtualAssetSource, VirtualEntry};
use crate::config::SiteConfig;
use crate::site::SiteData;
use crate::theme::Theme;

// =========================================================================
// Asset sources
// =========================================================================

/// An asset source whose listed files exist but cannot be read.
pub struct FailingReads<S> {
    inner: S,
    broken: HashSet<PathBuf>,
}

impl<S> FailingReads<S> {
    pub fn new<I, P>(inner: S, broken: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            inner,
            broken: broken.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: VirtualAssetSource> VirtualAssetSource for FailingReads<S> {
    fn read_dir(&self, path: &Path) -> Result<Vec<VirtualEntry>, AssetError> {
        self.inner.read_dir(path)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, AssetError> {
        if self.broken.contains(path) {
            return Err(AssetError::Read {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidData, "corrupt asset"),
            });
        }
        self.inner.read_file(path)
    }
}

// =========================================================================
// Filesystem fixtures
// =========================================================================

/// Every file under `dir` as `(relative/path, bytes)`, sorted by path.
pub fn read_tree(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<(String, Vec<u8>)> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e
                .path()
                .strip_prefix(dir)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            (rel, fs::read(e.path()).unwrap())
        })
        .collect();
    files.sort();
    files
}

/// A project at `root` with a `default` theme holding `files`, stock
/// config, and no content.
pub fn site_with_theme(root: &Path, files: &[(&str, &str)]) -> SiteData {
    let theme_dir = root.join("themes/default");
    fs::create_dir_all(&theme_dir).unwrap();
    for (path, contents) in files {
        let path = theme_dir.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    SiteData {
        root: root.to_path_buf(),
        config: SiteConfig::default(),
        theme: Theme::load(&theme_dir).unwrap(),
        posts: Vec::new(),
        pages: Vec::new(),
    }
}
