//! Theme scaffolding: extract a bundled theme onto disk.

use super::MaterializeError;
use super::context::OutputCounter;
use super::walk::{ErrorPolicy, copy_tree};
use crate::assets::VirtualAssetSource;
use std::path::Path;

/// Reproduce the virtual subtree `from` under the real directory `to`.
///
/// Best-effort below the top level: any directory or file that fails is
/// logged and skipped. Only a failure to list `from` itself is returned.
///
/// Returns the number of files written.
pub fn scaffold_theme<S>(source: &S, from: &Path, to: &Path) -> Result<usize, MaterializeError>
where
    S: VirtualAssetSource + ?Sized,
{
    let mut counter = OutputCounter::new();
    copy_tree(source, from, to, ErrorPolicy::BestEffort, &mut counter)?;
    Ok(counter.get())
}
