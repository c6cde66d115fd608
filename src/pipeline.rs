//! `inkpress build`: load, render, materialize.
//!
//! ```text
//! 1. Load     config.toml + theme + content   →  SiteData
//! 2. Render   SiteData                        →  OutputRegistry
//! 3. Write    theme static dirs, then pages   →  <output>/
//! ```
//!
//! Each run gets a fresh [`BuildContext`]. The output directory is not
//! cleaned first, and a failed run leaves whatever it already wrote.

use crate::materialize::{self, BuildContext, MaterializeError};
use crate::minify::BasicMinifier;
use crate::render;
use crate::site::{SiteData, SiteError};
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Site(#[from] SiteError),
    #[error("output: {0}")]
    Output(#[from] MaterializeError),
}

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Overrides `build.output_dir` from the config.
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub posts: usize,
    pub pages: usize,
    /// Buffers handed to the writer.
    pub rendered: usize,
    /// Files actually written: rendered pages plus copied assets.
    pub artifacts: usize,
    pub minified: bool,
}

/// Build the site at `root`.
pub fn build(root: &Path, options: &BuildOptions) -> Result<BuildReport, BuildError> {
    let site = SiteData::load(root)?;
    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| site.output_dir());
    info!(
        "building '{}' with theme '{}' -> '{}'",
        site.config.site.title,
        site.theme.name(),
        output_dir.display()
    );

    let outputs = render::render_site(&site, &output_dir);
    let rendered = outputs.len();

    let mut ctx = BuildContext::new(outputs, Box::new(BasicMinifier));
    materialize::materialize(&site, &mut ctx, &output_dir)?;

    Ok(BuildReport {
        output_dir,
        posts: site.posts.len(),
        pages: site.pages.len(),
        rendered,
        artifacts: ctx.output_count(),
        minified: site.config.build.enable_minify_html,
    })
}
