//! Site materialization: turning in-memory results into files.
//!
//! Two entry points share one tree walker ([`walk::copy_tree`]):
//!
//! ```text
//! init:   bundled theme ──scaffold_theme──▶ themes/default/
//!
//! build:  theme static dirs ──▶ CopyDirSet ──sync_assets──────▶ <output>/<dest>/...
//!         OutputRegistry ──────────────────write_artifacts───▶ <output>/...
//! ```
//!
//! ## Failure policy
//!
//! | Step | Per-item failure | Returned to caller |
//! |------|------------------|--------------------|
//! | [`scaffold_theme`] | logged, item skipped | only if the top directory can't be listed |
//! | [`sync_assets`] | aborts the entry | yes, and later entries are not run |
//! | [`write_artifacts`] | logged, file skipped | never |
//!
//! A failed build is not rolled back; whatever was written stays on disk.
//!
//! ## Counting
//!
//! The [`BuildContext`] owns one [`OutputCounter`]. Both the synchronizer and
//! the writer bump it once per file actually written, so after
//! [`materialize`] returns it holds the run's artifact total.

mod context;
mod scaffold;
mod sync;
mod walk;
mod writer;

pub use context::{BuildContext, CopyDirEntry, CopyDirSet, OutputCounter, OutputRegistry};
pub use scaffold::scaffold_theme;
pub use sync::sync_assets;
pub use walk::{ErrorPolicy, copy_tree, write_file};
pub use writer::write_artifacts;

use crate::assets::AssetError;
use crate::site::SiteData;
use crate::theme::Theme;
use log::warn;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaterializeError {
    #[error("cannot list {}: {source}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<AssetError> for MaterializeError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::Listing { path, source } => MaterializeError::Listing { path, source },
            AssetError::Read { path, source } => MaterializeError::Read { path, source },
        }
    }
}

/// Queue every static directory the theme declares for mirroring.
///
/// `<theme dir>/<static dir>` is copied to `<output>/<static dir>`.
pub fn update_theme_copy_dirs(theme: &Theme, ctx: &mut BuildContext) {
    for dir in theme.static_dirs() {
        ctx.append_copy_dir(theme.dir().join(dir), dir);
    }
}

/// Write a rendered site to `output_dir`.
///
/// Static assets go first and must all copy cleanly; then the rendered
/// pages are written best-effort, minified when the site config asks for it.
pub fn materialize(
    site: &SiteData,
    ctx: &mut BuildContext,
    output_dir: &Path,
) -> Result<(), MaterializeError> {
    update_theme_copy_dirs(&site.theme, ctx);

    let (outputs, copy_dirs, minifier, counter) = ctx.parts();

    if let Err(err) = sync_assets(copy_dirs, output_dir, counter) {
        warn!("theme: failed to copy static assets: {}", err);
        return Err(err);
    }

    let minifier = site.config.build.enable_minify_html.then_some(minifier);
    write_artifacts(outputs, minifier, counter);
    Ok(())
}
