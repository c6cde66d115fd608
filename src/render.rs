//! HTML rendering.
//!
//! Turns a loaded [`SiteData`] into an [`OutputRegistry`]: one buffer per
//! page, keyed by its final path under the output directory. Nothing is
//! written here; the materialize stage owns the disk.
//!
//! ## Generated Pages
//!
//! ```text
//! <output>/
//! ├── index.html                 # Post list
//! ├── posts/<slug>/index.html    # One per post
//! ├── <slug>/index.html          # Pages whose slug ends in '/'
//! ├── <slug>.html                # Other pages
//! └── tags/<tag>/index.html      # One per tag
//! ```
//!
//! Markup is written with [maud](https://maud.lambda.xyz/), so templates are
//! checked at compile time and every interpolation is escaped. Markdown
//! bodies go through pulldown-cmark.

use crate::content::Document;
use crate::materialize::OutputRegistry;
use crate::site::SiteData;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const STYLESHEET: &str = "/static/css/style.css";
const FAVICON: &str = "/static/img/favicon.svg";

/// Render every page of the site into a registry rooted at `output_dir`.
pub fn render_site(site: &SiteData, output_dir: &Path) -> OutputRegistry {
    let mut outputs = OutputRegistry::new();
    let chrome = Chrome::new(site);

    outputs.insert(
        output_dir.join("index.html"),
        render_index(&chrome, &site.posts).into_string(),
    );

    for post in &site.posts {
        outputs.insert(
            output_dir.join(post_path(&post.meta.slug)),
            render_post(&chrome, post).into_string(),
        );
    }

    for page in &site.pages {
        outputs.insert(
            output_dir.join(page_path(&page.meta.slug)),
            render_page(&chrome, page).into_string(),
        );
    }

    for (tag, posts) in group_by_tag(&site.posts) {
        outputs.insert(
            output_dir.join("tags").join(tag_slug(&tag)).join("index.html"),
            render_tag(&chrome, &tag, &posts).into_string(),
        );
    }

    outputs
}

// ============================================================================
// URLs and paths
// ============================================================================

fn post_path(slug: &str) -> PathBuf {
    Path::new("posts")
        .join(slug.trim_matches('/'))
        .join("index.html")
}

fn post_url(slug: &str) -> String {
    format!("/posts/{}/", slug.trim_matches('/'))
}

fn page_path(slug: &str) -> PathBuf {
    let trimmed = slug.trim_start_matches('/');
    if trimmed.is_empty() || trimmed.ends_with('/') {
        Path::new(trimmed).join("index.html")
    } else {
        PathBuf::from(format!("{trimmed}.html"))
    }
}

fn page_url(slug: &str) -> String {
    let trimmed = slug.trim_start_matches('/');
    if trimmed.is_empty() || trimmed.ends_with('/') {
        format!("/{trimmed}")
    } else {
        format!("/{trimmed}.html")
    }
}

fn tag_slug(tag: &str) -> String {
    tag.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn tag_url(tag: &str) -> String {
    format!("/tags/{}/", tag_slug(tag))
}

fn group_by_tag(posts: &[Document]) -> BTreeMap<String, Vec<&Document>> {
    let mut tags: BTreeMap<String, Vec<&Document>> = BTreeMap::new();
    for post in posts {
        for tag in &post.meta.tags {
            tags.entry(tag.clone()).or_default().push(post);
        }
    }
    tags
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

// ============================================================================
// HTML Components
// ============================================================================

/// Site-wide pieces shared by every page.
struct Chrome<'a> {
    title: &'a str,
    subtitle: &'a str,
    author: &'a str,
    base_url: &'a str,
    nav: Vec<(String, &'a str)>,
}

impl<'a> Chrome<'a> {
    fn new(site: &'a SiteData) -> Self {
        let meta = &site.config.site;
        Self {
            title: &meta.title,
            subtitle: &meta.subtitle,
            author: &meta.author,
            base_url: meta.base_url.trim_end_matches('/'),
            nav: site
                .pages
                .iter()
                .map(|p| (page_url(&p.meta.slug), p.meta.title.as_str()))
                .collect(),
        }
    }
}

/// Renders the base HTML document structure
fn base_document(chrome: &Chrome, page_title: Option<&str>, url: &str, content: Markup) -> Markup {
    let title = match page_title {
        Some(t) => format!("{} - {}", t, chrome.title),
        None => chrome.title.to_string(),
    };
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="canonical" href={ (chrome.base_url) (url) };
                link rel="icon" href=(FAVICON) type="image/svg+xml";
                link rel="stylesheet" href=(STYLESHEET);
            }
            body {
                (site_header(chrome))
                main.site-main { (content) }
                footer.site-footer {
                    "© " (chrome.author)
                }
            }
        }
    }
}

fn site_header(chrome: &Chrome) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (chrome.title) }
            @if !chrome.subtitle.is_empty() {
                p.site-subtitle { (chrome.subtitle) }
            }
            nav.site-nav {
                a href="/" { "Home" }
                @for (url, title) in &chrome.nav {
                    a href=(url) { (title) }
                }
            }
        }
    }
}

fn post_meta(post: &Document) -> Markup {
    html! {
        p.post-meta {
            @if !post.meta.date.is_empty() {
                time { (post.meta.date) }
            }
            @if !post.meta.author.is_empty() {
                " · " (post.meta.author)
            }
        }
        @if !post.meta.tags.is_empty() {
            p.post-tags {
                @for tag in &post.meta.tags {
                    a href=(tag_url(tag)) { "#" (tag) }
                }
            }
        }
    }
}

fn post_list(posts: &[&Document]) -> Markup {
    html! {
        ul.post-list {
            @for post in posts {
                li {
                    a href=(post_url(&post.meta.slug)) { (post.meta.title) }
                    (post_meta(post))
                    @if !post.meta.description.is_empty() {
                        p.post-description { (post.meta.description) }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_index(chrome: &Chrome, posts: &[Document]) -> Markup {
    let posts: Vec<&Document> = posts.iter().collect();
    let content = html! {
        @if posts.is_empty() {
            p { "Nothing here yet." }
        } @else {
            (post_list(&posts))
        }
    };
    base_document(chrome, None, "/", content)
}

fn render_post(chrome: &Chrome, post: &Document) -> Markup {
    let content = html! {
        article.post {
            h1 { (post.meta.title) }
            (post_meta(post))
            (PreEscaped(markdown_to_html(&post.body)))
        }
    };
    base_document(chrome, Some(&post.meta.title), &post_url(&post.meta.slug), content)
}

fn render_page(chrome: &Chrome, page: &Document) -> Markup {
    let content = html! {
        article.page {
            h1 { (page.meta.title) }
            (PreEscaped(markdown_to_html(&page.body)))
        }
    };
    base_document(chrome, Some(&page.meta.title), &page_url(&page.meta.slug), content)
}

fn render_tag(chrome: &Chrome, tag: &str, posts: &[&Document]) -> Markup {
    let heading = format!("#{tag}");
    let content = html! {
        h1 { (heading) }
        (post_list(posts))
    };
    base_document(chrome, Some(&heading), &tag_url(tag), content)
}
