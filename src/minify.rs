//! HTML minification.
//!
//! The build context owns one [`HtmlMinifier`]. When `build.enable_minify_html`
//! is set, every rendered buffer is passed through it before being written;
//! a [`MinifyError`] only costs the size reduction, the original bytes are
//! written instead.
//!
//! [`BasicMinifier`] rules:
//!
//! - comments are removed (`<!--[if ...]>` conditional comments are kept),
//! - `<pre>`, `<textarea>`, `<script>` and `<style>` bodies are copied verbatim,
//! - whitespace between two tags is dropped when it spans a line break
//!   (source indentation), and collapsed to one space otherwise,
//! - any other whitespace run becomes a single space.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MinifyError {
    #[error("input is not valid UTF-8 (at byte {0})")]
    NotUtf8(usize),
    #[error("unterminated comment starting at byte {0}")]
    UnterminatedComment(usize),
}

pub trait HtmlMinifier {
    fn minify(&self, input: &[u8]) -> Result<Vec<u8>, MinifyError>;
}

/// Tags whose content must survive byte for byte.
const RAW_TEXT_TAGS: &[&str] = &["pre", "textarea", "script", "style"];

#[derive(Debug, Clone, Copy, Default)]
pub struct BasicMinifier;

impl HtmlMinifier for BasicMinifier {
    fn minify(&self, input: &[u8]) -> Result<Vec<u8>, MinifyError> {
        let html = std::str::from_utf8(input).map_err(|e| MinifyError::NotUtf8(e.valid_up_to()))?;
        minify_str(html).map(String::into_bytes)
    }
}

fn minify_str(html: &str) -> Result<String, MinifyError> {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    let mut offset = 0;

    while !rest.is_empty() {
        if rest.starts_with("<!--") && !rest.starts_with("<!--[if") {
            let end = rest.find("-->").ok_or(MinifyError::UnterminatedComment(offset))?;
            offset += end + 3;
            rest = &rest[end + 3..];
            continue;
        }

        if rest.starts_with('<') {
            let tag_end = rest.find('>').map(|i| i + 1).unwrap_or(rest.len());
            let tag = &rest[..tag_end];
            out.push_str(tag);
            offset += tag_end;
            rest = &rest[tag_end..];

            if let Some(name) = raw_text_tag(tag) {
                let close = format!("</{name}");
                let body_end = find_ignore_case(rest, &close).unwrap_or(rest.len());
                out.push_str(&rest[..body_end]);
                offset += body_end;
                rest = &rest[body_end..];
            }
            continue;
        }

        let text_end = rest.find('<').unwrap_or(rest.len());
        let text = &rest[..text_end];
        push_text(&mut out, text, text_end == rest.len());
        offset += text_end;
        rest = &rest[text_end..];
    }

    Ok(out.trim().to_string())
}

/// Append a text run, squeezing whitespace.
fn push_text(out: &mut String, text: &str, at_end: bool) {
    if text.trim().is_empty() {
        let between_tags = out.ends_with('>') && !at_end;
        if !(between_tags && text.contains('\n')) && !out.is_empty() && !at_end {
            out.push(' ');
        }
        return;
    }

    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
}

/// If `tag` opens one of the raw-text elements, return its name.
fn raw_text_tag(tag: &str) -> Option<&'static str> {
    let inner = tag.strip_prefix('<')?;
    if inner.starts_with('/') || tag.ends_with("/>") {
        return None;
    }
    let name_end = inner
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(inner.len());
    let name = &inner[..name_end];
    RAW_TEXT_TAGS
        .iter()
        .copied()
        .find(|raw| raw.eq_ignore_ascii_case(name))
}

fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}
