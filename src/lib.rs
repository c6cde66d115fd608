//! # inkpress
//!
//! A small static blog generator. A project is a directory holding a
//! `config.toml`, markdown content with TOML front matter, and a theme whose
//! static files are mirrored into the output.
//!
//! # Commands
//!
//! ```text
//! init    bundled theme + stock config + seed content  →  project skeleton
//! build   config + theme + content  →  render  →  <output>/
//! ```
//!
//! The build renders every page into memory first (an
//! [`OutputRegistry`](materialize::OutputRegistry)), then hands it to the
//! [`materialize`] layer, which copies theme assets and writes the pages.
//! Rendering never touches the filesystem, so it is tested without any.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`assets`] | Read-only asset sources: the theme bundle compiled into the binary, a directory on disk, an in-memory map |
//! | [`materialize`] | Theme extraction, asset mirroring, artifact writing, and the per-build context |
//! | [`minify`] | HTML minification capability and the built-in minifier |
//! | [`theme`] | Theme directory handle and its `theme.toml` |
//! | [`config`] | `config.toml` loading, stock defaults, validation |
//! | [`content`] | Front matter parsing and composing for posts and pages |
//! | [`render`] | Maud templates producing every page of the site |
//! | [`site`] | Everything loaded for one project root |
//! | [`init`] | `init` command |
//! | [`pipeline`] | `build` command |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Assets before pages
//!
//! A build copies the theme's static directories before writing any page. If
//! an asset cannot be copied the build stops, so a site is never published
//! with pages pointing at a stylesheet that is not there. Page writes, on the
//! other hand, are best-effort: one unwritable file is logged and skipped.
//!
//! ## Themes ship inside the binary
//!
//! The `default` theme is embedded with `include_dir` and extracted by `init`.
//! Extraction goes through the same [`assets::VirtualAssetSource`] trait as
//! on-disk theme directories, so both share one tree walker.

pub mod assets;
pub mod config;
pub mod content;
pub mod init;
pub mod materialize;
pub mod minify;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod site;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_helpers;
