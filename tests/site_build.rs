//! End-to-end tests against the public library API.

use inkpress::assets::MemoryAssets;
use inkpress::init::{self, InitOptions};
use inkpress::materialize::{
    CopyDirSet, MaterializeError, OutputCounter, OutputRegistry, scaffold_theme, sync_assets,
    write_artifacts,
};
use inkpress::minify::{HtmlMinifier, MinifyError};
use inkpress::pipeline::{self, BuildOptions};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Replaces every document with an empty page.
struct Blank;

impl HtmlMinifier for Blank {
    fn minify(&self, _input: &[u8]) -> Result<Vec<u8>, MinifyError> {
        Ok(b"<html></html>".to_vec())
    }
}

#[test]
fn writer_applies_minifier() {
    let out = TempDir::new().unwrap();
    let outputs: OutputRegistry = [(out.path().join("index.html"), "<html>  </html>")]
        .into_iter()
        .collect();
    let mut counter = OutputCounter::new();

    write_artifacts(&outputs, Some(&Blank as &dyn HtmlMinifier), &mut counter);

    assert_eq!(
        fs::read_to_string(out.path().join("index.html")).unwrap(),
        "<html></html>"
    );
    assert_eq!(counter.get(), 1);
}

#[test]
fn counter_excludes_failed_writes() {
    let out = TempDir::new().unwrap();
    // a regular file where a directory is needed
    fs::write(out.path().join("blocked"), "").unwrap();
    let outputs: OutputRegistry = [
        (out.path().join("a.html"), "a"),
        (out.path().join("blocked/b.html"), "b"),
        (out.path().join("c/d.html"), "d"),
    ]
    .into_iter()
    .collect();
    let mut counter = OutputCounter::new();

    write_artifacts(&outputs, None, &mut counter);

    assert_eq!(counter.get(), outputs.len() - 1);
    assert!(out.path().join("c/d.html").is_file());
}

#[test]
fn sync_mirrors_static_dir() {
    let project = TempDir::new().unwrap();
    let static_dir = project.path().join("static");
    fs::create_dir_all(static_dir.join("css")).unwrap();
    fs::write(static_dir.join("css/style.css"), "body{}").unwrap();
    let mut copy_dirs = CopyDirSet::new();
    copy_dirs.push(&static_dir, "static");
    let out = TempDir::new().unwrap();
    let mut counter = OutputCounter::new();

    sync_assets(&copy_dirs, out.path(), &mut counter).unwrap();

    assert_eq!(
        fs::read(out.path().join("static/css/style.css")).unwrap(),
        b"body{}"
    );
    assert_eq!(counter.get(), 1);
}

#[cfg(unix)]
#[test]
fn dangling_symlink_stops_sync() {
    let project = TempDir::new().unwrap();
    let first = project.path().join("first");
    let second = project.path().join("second");
    fs::create_dir_all(&first).unwrap();
    fs::create_dir_all(&second).unwrap();
    std::os::unix::fs::symlink(project.path().join("nowhere"), first.join("gone.txt")).unwrap();
    fs::write(second.join("ok.txt"), "ok").unwrap();

    let mut copy_dirs = CopyDirSet::new();
    copy_dirs.push(&first, "first");
    copy_dirs.push(&second, "second");
    let out = TempDir::new().unwrap();
    let mut counter = OutputCounter::new();

    let err = sync_assets(&copy_dirs, out.path(), &mut counter).unwrap_err();

    assert!(matches!(err, MaterializeError::Read { .. }));
    assert!(!out.path().join("second/ok.txt").exists());
    assert_eq!(counter.get(), 0);
}

#[test]
fn scaffold_from_memory_bundle() {
    let bundle = MemoryAssets::new()
        .with_file("plain/theme.toml", "name = \"plain\"\n")
        .with_file("plain/static/css/style.css", "p{}");
    let target = TempDir::new().unwrap();

    let written = scaffold_theme(&bundle, Path::new("plain"), target.path()).unwrap();

    assert_eq!(written, 2);
    assert_eq!(
        fs::read_to_string(target.path().join("static/css/style.css")).unwrap(),
        "p{}"
    );
}

#[test]
fn init_then_build_produces_site() {
    let project = TempDir::new().unwrap();
    init::init(project.path(), &InitOptions::default()).unwrap();

    let report = pipeline::build(project.path(), &BuildOptions::default()).unwrap();

    let out = project.path().join("build");
    assert_eq!(report.output_dir, out);
    let index = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains("Hello World"));
    assert!(index.contains("/static/css/style.css"));
    assert!(out.join("static/css/style.css").is_file());
    assert!(out.join("static/img/favicon.svg").is_file());
    // 4 pages + 2 theme assets
    assert_eq!(report.artifacts, 6);
}

#[test]
fn rebuild_overwrites_in_place() {
    let project = TempDir::new().unwrap();
    init::init(project.path(), &InitOptions::default()).unwrap();
    let out = project.path().join("build");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("index.html"), "stale").unwrap();
    fs::write(out.join("leftover.txt"), "kept").unwrap();

    pipeline::build(project.path(), &BuildOptions::default()).unwrap();

    assert_ne!(fs::read_to_string(out.join("index.html")).unwrap(), "stale");
    assert_eq!(fs::read_to_string(out.join("leftover.txt")).unwrap(), "kept");
}
