//! Theme handle.
//!
//! A theme is a directory under `themes/`. Its optional `theme.toml` names
//! the static directories that a build mirrors into the output root:
//!
//! ```toml
//! name = "default"
//! static_dirs = ["static"]
//! ```
//!
//! Page markup is compiled into the binary (see [`crate::render`]), so a
//! theme on disk only carries presentation assets.

use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

pub const THEME_FILE: &str = "theme.toml";

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("theme directory not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("static dir must be a relative path inside the theme: {}", .0.display())]
    InvalidStaticDir(PathBuf),
}

/// Contents of `theme.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeManifest {
    pub name: String,
    pub static_dirs: Vec<PathBuf>,
}

impl Default for ThemeManifest {
    fn default() -> Self {
        Self {
            name: String::new(),
            static_dirs: vec![PathBuf::from("static")],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    dir: PathBuf,
    name: String,
    static_dirs: Vec<PathBuf>,
}

impl Theme {
    /// Load the theme rooted at `dir`.
    pub fn load(dir: &Path) -> Result<Self, ThemeError> {
        if !dir.is_dir() {
            return Err(ThemeError::NotFound(dir.to_path_buf()));
        }

        let manifest_path = dir.join(THEME_FILE);
        let mut manifest = if manifest_path.exists() {
            let content = fs::read_to_string(&manifest_path)?;
            toml::from_str::<ThemeManifest>(&content).map_err(|source| ThemeError::Toml {
                path: manifest_path.clone(),
                source,
            })?
        } else {
            ThemeManifest::default()
        };

        if manifest.name.is_empty() {
            manifest.name = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        if let Some(bad) = manifest.static_dirs.iter().find(|d| !is_contained(d)) {
            return Err(ThemeError::InvalidStaticDir(bad.clone()));
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            name: manifest.name,
            static_dirs: manifest.static_dirs,
        })
    }

    /// Build a theme handle without touching the filesystem.
    pub fn from_parts(dir: impl Into<PathBuf>, static_dirs: Vec<PathBuf>) -> Self {
        let dir = dir.into();
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            dir,
            name,
            static_dirs,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Static directories, relative to [`dir`](Self::dir), in declared order.
    pub fn static_dirs(&self) -> &[PathBuf] {
        &self.static_dirs
    }
}

/// Relative, non-empty, and never climbing out with `..`.
fn is_contained(path: &Path) -> bool {
    let mut any = false;
    for component in path.components() {
        match component {
            Component::Normal(_) => any = true,
            Component::CurDir => {}
            _ => return false,
        }
    }
    any
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_reads_manifest() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("fancy");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(THEME_FILE),
            "name = \"Fancy\"\nstatic_dirs = [\"static\", \"fonts\"]\n",
        )
        .unwrap();

        let theme = Theme::load(&dir).unwrap();
        assert_eq!(theme.name(), "Fancy");
        assert_eq!(theme.dir(), dir.as_path());
        assert_eq!(
            theme.static_dirs(),
            &[PathBuf::from("static"), PathBuf::from("fonts")]
        );
    }

    #[test]
    fn load_without_manifest_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("plain");
        fs::create_dir_all(&dir).unwrap();

        let theme = Theme::load(&dir).unwrap();
        assert_eq!(theme.name(), "plain");
        assert_eq!(theme.static_dirs(), &[PathBuf::from("static")]);
    }

    #[test]
    fn load_missing_dir_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Theme::load(&tmp.path().join("ghost"));
        assert!(matches!(result, Err(ThemeError::NotFound(_))));
    }

    #[test]
    fn escaping_static_dir_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(THEME_FILE), "static_dirs = [\"../secrets\"]").unwrap();
        let result = Theme::load(tmp.path());
        assert!(matches!(result, Err(ThemeError::InvalidStaticDir(_))));
    }

    #[test]
    fn absolute_static_dir_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(THEME_FILE), "static_dirs = [\"/etc\"]").unwrap();
        assert!(Theme::load(tmp.path()).is_err());
    }

    #[test]
    fn unknown_manifest_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(THEME_FILE), "statik_dirs = [\"static\"]").unwrap();
        assert!(matches!(
            Theme::load(tmp.path()),
            Err(ThemeError::Toml { .. })
        ));
    }

    #[test]
    fn bundled_manifest_parses() {
        let manifest: ThemeManifest =
            toml::from_str(include_str!("../themes/default/theme.toml")).unwrap();
        assert_eq!(manifest.name, "default");
        assert_eq!(manifest.static_dirs, vec![PathBuf::from("static")]);
    }
}
