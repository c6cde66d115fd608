//! Per-build state shared by the materialization steps.

use crate::minify::{HtmlMinifier, MinifyError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Rendered files keyed by their final output path.
///
/// Keys are unique: inserting an existing path replaces the earlier buffer.
#[derive(Debug, Clone, Default)]
pub struct OutputRegistry {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl OutputRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rendered buffer. Returns the buffer it replaced, if any.
    pub fn insert(&mut self, path: impl Into<PathBuf>, buf: impl Into<Vec<u8>>) -> Option<Vec<u8>> {
        self.files.insert(path.into(), buf.into())
    }

    pub fn get(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[u8])> {
        self.files.iter().map(|(p, b)| (p.as_path(), b.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<P: Into<PathBuf>, B: Into<Vec<u8>>> FromIterator<(P, B)> for OutputRegistry {
    fn from_iter<I: IntoIterator<Item = (P, B)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (path, buf) in iter {
            registry.insert(path, buf);
        }
        registry
    }
}

/// A real directory to mirror into the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyDirEntry {
    /// Existing directory on disk, usually inside a theme.
    pub source_dir: PathBuf,
    /// Destination relative to the output root.
    pub dest_dir: PathBuf,
}

/// Ordered, append-only list of directories to mirror. Duplicates are kept.
#[derive(Debug, Clone, Default)]
pub struct CopyDirSet {
    entries: Vec<CopyDirEntry>,
}

impl CopyDirSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) {
        self.entries.push(CopyDirEntry {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
        });
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CopyDirEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a CopyDirSet {
    type Item = &'a CopyDirEntry;
    type IntoIter = std::slice::Iter<'a, CopyDirEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Number of artifacts successfully written during one run.
///
/// Only successful writes are counted; attempts and failures never are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputCounter(usize);

impl OutputCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incr(&mut self, n: usize) {
        self.0 += n;
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

/// Everything one build hands to the materialization driver.
///
/// Created fresh per build and dropped once the output tree is written.
pub struct BuildContext {
    outputs: OutputRegistry,
    copy_dirs: CopyDirSet,
    counter: OutputCounter,
    minifier: Box<dyn HtmlMinifier>,
}

impl BuildContext {
    pub fn new(outputs: OutputRegistry, minifier: Box<dyn HtmlMinifier>) -> Self {
        Self {
            outputs,
            copy_dirs: CopyDirSet::new(),
            counter: OutputCounter::new(),
            minifier,
        }
    }

    pub fn outputs(&self) -> &OutputRegistry {
        &self.outputs
    }

    pub fn copy_dirs(&self) -> &CopyDirSet {
        &self.copy_dirs
    }

    pub fn append_copy_dir(&mut self, source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) {
        self.copy_dirs.push(source_dir, dest_dir);
    }

    pub fn incr_output_counter(&mut self, n: usize) {
        self.counter.incr(n);
    }

    pub fn output_count(&self) -> usize {
        self.counter.get()
    }

    pub fn minify_html(&self, data: &[u8]) -> Result<Vec<u8>, MinifyError> {
        self.minifier.minify(data)
    }

    /// Split borrows for steps that read one part while counting into another.
    pub(crate) fn parts(
        &mut self,
    ) -> (
        &OutputRegistry,
        &CopyDirSet,
        &dyn HtmlMinifier,
        &mut OutputCounter,
    ) {
        (
            &self.outputs,
            &self.copy_dirs,
            self.minifier.as_ref(),
            &mut self.counter,
        )
    }
}
