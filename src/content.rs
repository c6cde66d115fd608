//! Posts and pages on disk.
//!
//! A document is a markdown file that opens with a fenced TOML block:
//!
//! ````text
//! ```toml
//! title = "Hello World"
//! slug = "hello-world"
//! date = "2026-01-01 10:00:00"
//! tags = ["hello"]
//! ```
//! Body text in **markdown**.
//! ````
//!
//! Posts live in `content/posts/`, pages in `content/pages/`. Only `.md`
//! files are read; everything else in those directories is ignored.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const FENCE_OPEN: &str = "```toml";
const FENCE_CLOSE: &str = "```";

/// Timestamp layout used in `date` fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{}: document must start with a ```toml front matter block", .0.display())]
    MissingFrontMatter(PathBuf),
    #[error("{}: front matter block is not closed", .0.display())]
    UnterminatedFrontMatter(PathBuf),
    #[error("{}: invalid front matter: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot encode front matter: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    /// URL slug. A trailing `/` renders as `<slug>/index.html`.
    pub slug: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// `YYYY-MM-DD HH:MM:SS`; sorts lexicographically.
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub meta: FrontMatter,
    /// Raw markdown after the front matter.
    pub body: String,
    pub source: PathBuf,
}

/// Split a document into front matter and body.
pub fn parse_document(text: &str, source: &Path) -> Result<Document, ContentError> {
    let text = text.trim_start_matches('\u{feff}');
    let mut lines = text.split_inclusive('\n');

    let first = lines.next().unwrap_or_default();
    if first.trim_end() != FENCE_OPEN {
        return Err(ContentError::MissingFrontMatter(source.to_path_buf()));
    }

    let mut front = String::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim_end() == FENCE_CLOSE {
            closed = true;
            break;
        }
        front.push_str(line);
    }
    if !closed {
        return Err(ContentError::UnterminatedFrontMatter(source.to_path_buf()));
    }

    let meta: FrontMatter = toml::from_str(&front).map_err(|e| ContentError::Toml {
        path: source.to_path_buf(),
        source: e,
    })?;
    let body: String = lines.collect();

    Ok(Document {
        meta,
        body: body.trim().to_string(),
        source: source.to_path_buf(),
    })
}

/// Render a document back to its on-disk form.
pub fn compose_document(meta: &FrontMatter, body: &str) -> Result<String, ContentError> {
    let front = toml::to_string(meta)?;
    Ok(format!("{FENCE_OPEN}\n{front}{FENCE_CLOSE}\n{body}\n"))
}

/// Load every `.md` document in `dir`, sorted by file name.
///
/// A missing directory yields no documents.
pub fn load_documents(dir: &Path) -> Result<Vec<Document>, ContentError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();

    files
        .iter()
        .map(|path| {
            let text = fs::read_to_string(path)?;
            parse_document(&text, path)
        })
        .collect()
}

/// Posts, newest first. Ties keep file-name order.
pub fn load_posts(dir: &Path) -> Result<Vec<Document>, ContentError> {
    let mut posts = load_documents(dir)?;
    posts.sort_by(|a, b| b.meta.date.cmp(&a.meta.date));
    Ok(posts)
}
