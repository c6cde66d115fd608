//! Artifact writer: rendered buffers to files.

use super::context::{OutputCounter, OutputRegistry};
use super::walk::write_file;
use crate::minify::HtmlMinifier;
use log::{debug, warn};
use std::borrow::Cow;

/// Write every registry entry to its path.
///
/// With a minifier, each buffer is minified first; a minify failure falls
/// back to the original bytes. A write failure is logged and the entry
/// skipped. `counter` is bumped once per file written.
pub fn write_artifacts(
    outputs: &OutputRegistry,
    minifier: Option<&dyn HtmlMinifier>,
    counter: &mut OutputCounter,
) {
    for (path, buf) in outputs.iter() {
        let data: Cow<'_, [u8]> = match minifier {
            Some(minifier) => match minifier.minify(buf) {
                Ok(minified) => {
                    debug!(
                        "minified ok: {}, {} -> {}",
                        path.display(),
                        buf.len(),
                        minified.len()
                    );
                    Cow::Owned(minified)
                }
                Err(err) => {
                    warn!("output: failed to minify: {}, {}", path.display(), err);
                    Cow::Borrowed(buf)
                }
            },
            None => Cow::Borrowed(buf),
        };

        if let Err(err) = write_file(path, &data) {
            warn!("output: failed to write file: {}, {}", path.display(), err);
            continue;
        }
        counter.incr(1);
    }
}
