//! `inkpress init`: lay down a new site skeleton.
//!
//! Steps run in order and the first failure stops the run:
//!
//! 1. write `config.toml` (an existing one is kept unless forced),
//! 2. create the content and theme directories,
//! 3. extract the bundled `default` theme into `themes/default`,
//! 4. write a first post and a first page.
//!
//! Theme extraction is best-effort per file (see
//! [`scaffold_theme`](crate::materialize::scaffold_theme)); it only fails
//! when the bundled theme cannot be listed at all.

use crate::assets::{EmbeddedAssets, VirtualAssetSource};
use crate::config::{self, CONFIG_FILE};
use crate::content::{self, ContentError, DATE_FORMAT, FrontMatter};
use crate::materialize::{self, MaterializeError};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const POST_BODY: &str = include_str!("seed/post.md");
const PAGE_BODY: &str = include_str!("seed/page.md");

/// Bundled theme extracted by `init`, and where it lands.
const DEFAULT_THEME: &str = "default";
const THEME_TARGET: &str = "themes/default";

/// Directories created under the project root.
pub const INIT_DIRECTORIES: &[&str] = &["content/posts", "content/pages", "themes"];

#[derive(Error, Debug)]
pub enum InitError {
    #[error("failed to initialize config file: {0}")]
    Config(#[source] std::io::Error),
    #[error("failed to create directory '{}': {source}", path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write '{}': {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to initialize theme: {0}")]
    Theme(#[from] MaterializeError),
    #[error("failed to initialize content: {0}")]
    Content(#[from] ContentError),
}

#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Replace an existing `config.toml`.
    pub force: bool,
}

/// What `init` did.
#[derive(Debug, Clone, Default)]
pub struct InitReport {
    /// `false` when an existing config was kept.
    pub config_written: bool,
    pub directories: Vec<PathBuf>,
    pub theme_dir: PathBuf,
    pub theme_files: usize,
    pub seeded: Vec<PathBuf>,
}

/// Initialize a sample site in `root` from the bundled themes.
pub fn init(root: &Path, options: &InitOptions) -> Result<InitReport, InitError> {
    init_with_assets(root, options, &EmbeddedAssets::themes())
}

/// Initialize a sample site in `root`, taking the theme from `themes`.
///
/// `themes` must contain a `default` directory.
pub fn init_with_assets<S>(
    root: &Path,
    options: &InitOptions,
    themes: &S,
) -> Result<InitReport, InitError>
where
    S: VirtualAssetSource + ?Sized,
{
    let mut report = InitReport {
        config_written: init_config_file(root, options.force)?,
        ..InitReport::default()
    };
    report.directories = init_directories(root)?;

    report.theme_dir = root.join(THEME_TARGET);
    report.theme_files =
        materialize::scaffold_theme(themes, Path::new(DEFAULT_THEME), &report.theme_dir)
            .inspect_err(|err| warn!("failed to extract default theme: {}", err))?;
    debug!(
        "extracted {} theme files to '{}'",
        report.theme_files,
        report.theme_dir.display()
    );

    let now = chrono::Local::now().format(DATE_FORMAT).to_string();
    report.seeded.push(init_first_post(root, &now)?);
    report.seeded.push(init_first_page(root, &now)?);

    info!("initialized sample site in '{}'", root.display());
    Ok(report)
}

fn init_config_file(root: &Path, force: bool) -> Result<bool, InitError> {
    let path = root.join(CONFIG_FILE);
    if path.exists() && !force {
        warn!("'{}' already exists, keeping it", path.display());
        return Ok(false);
    }
    fs::write(&path, config::stock_config_toml()).map_err(InitError::Config)?;
    debug!("initialized config file: '{}'", path.display());
    Ok(true)
}

fn init_directories(root: &Path) -> Result<Vec<PathBuf>, InitError> {
    let mut created = Vec::new();
    for dir in INIT_DIRECTORIES {
        let path = root.join(dir);
        fs::create_dir_all(&path).map_err(|source| InitError::Directory {
            path: path.clone(),
            source,
        })?;
        debug!("created directory: '{}'", path.display());
        created.push(path);
    }
    Ok(created)
}

fn init_first_post(root: &Path, date: &str) -> Result<PathBuf, InitError> {
    let meta = FrontMatter {
        title: "Hello World".to_string(),
        slug: "hello-world".to_string(),
        description: "this is a demo post".to_string(),
        date: date.to_string(),
        tags: vec!["hello".to_string()],
        author: "admin".to_string(),
    };
    write_document(&root.join("content/posts/hello-world.md"), &meta, POST_BODY)
}

fn init_first_page(root: &Path, date: &str) -> Result<PathBuf, InitError> {
    let meta = FrontMatter {
        title: "About".to_string(),
        slug: "about/".to_string(),
        description: "this is a demo page".to_string(),
        date: date.to_string(),
        tags: Vec::new(),
        author: "admin".to_string(),
    };
    write_document(&root.join("content/pages/about.md"), &meta, PAGE_BODY)
}

fn write_document(path: &Path, meta: &FrontMatter, body: &str) -> Result<PathBuf, InitError> {
    let text = content::compose_document(meta, body.trim())?;
    fs::write(path, text).map_err(|source| InitError::Document {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("created document: '{}'", path.display());
    Ok(path.to_path_buf())
}
