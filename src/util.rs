use anyhow::{anyhow, Result};
use std::fs::File;
use std::path::Path;

/// Opens `path`, naming the `kind` of file in the error message.
pub fn open(path: &Path, kind: &str) -> Result<File> {
    File::open(path).map_err(|e| anyhow!("Opening {} file `{}`: {}", kind, path.display(), e))
}
