use crate::error::{Error, Result};
use crate::index::Index;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Persist an index as pretty-printed JSON.
///
/// Serialization is a pure function of the index value: map keys are sorted
/// (`BTreeMap`), so identical indices produce byte-identical files. The write
/// is all-or-nothing: bytes go to a temporary sibling that is renamed over
/// the destination, so a failure never leaves a partial index behind.
pub fn save_index(path: &Path, index: &Index) -> Result<()> {
    let json = serde_json::to_string_pretty(index)
        .map_err(|e| Error::MalformedIndex { reason: e.to_string() })?;

    let tmp = path.with_extension("tmp");
    let mut f = File::create(&tmp)
        .map_err(|e| Error::io(format!("creating {}", tmp.display()), e))?;
    f.write_all(json.as_bytes())
        .map_err(|e| Error::io(format!("writing {}", tmp.display()), e))?;
    fs::rename(&tmp, path)
        .map_err(|e| Error::io(format!("renaming {} to {}", tmp.display(), path.display()), e))?;

    tracing::debug!(path = %path.display(), bytes = json.len(), "saved index");
    Ok(())
}

/// Load a persisted index.
///
/// A file that parses but lacks a required top-level field, or whose fields
/// have the wrong shape, is reported as [`Error::MalformedIndex`].
pub fn load_index(path: &Path) -> Result<Index> {
    let json = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
    let index: Index = serde_json::from_str(&json)
        .map_err(|e| Error::MalformedIndex { reason: e.to_string() })?;
    Ok(index)
}
