//! A loaded project: config, theme and content for one site root.

use crate::config::{self, ConfigError, SiteConfig};
use crate::content::{self, ContentError, Document};
use crate::theme::{Theme, ThemeError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("theme: {0}")]
    Theme(#[from] ThemeError),
    #[error("content: {0}")]
    Content(#[from] ContentError),
}

#[derive(Debug, Clone)]
pub struct SiteData {
    pub root: PathBuf,
    pub config: SiteConfig,
    pub theme: Theme,
    /// Newest first.
    pub posts: Vec<Document>,
    pub pages: Vec<Document>,
}

impl SiteData {
    /// Read everything a build needs from the project at `root`.
    pub fn load(root: &Path) -> Result<Self, SiteError> {
        let config = config::load_config(root)?;
        let theme = Theme::load(&config.theme_dir(root))?;
        let posts = content::load_posts(&root.join(&config.content.posts_dir))?;
        let pages = content::load_documents(&root.join(&config.content.pages_dir))?;

        Ok(Self {
            root: root.to_path_buf(),
            config,
            theme,
            posts,
            pages,
        })
    }

    pub fn output_dir(&self) -> PathBuf {
        self.config.output_dir(&self.root)
    }
}
