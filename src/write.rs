//! Serializes [`Post`]s into the `posts.json` document consumed by the site's
//! front end.

use crate::post::Post;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Writes `posts` as a pretty-printed JSON array followed by a newline. Keys
/// appear in [`Post`]'s field order.
pub fn write_index<W: Write>(posts: &[Post], mut w: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut w, posts)?;
    w.write_all(b"\n")?;
    w.flush()?;
    Ok(())
}

/// Writes `posts` to `path` via a temporary file in the same directory which
/// is then renamed over `path`, so readers never observe a partial document.
pub fn write_index_file(posts: &[Post], path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    write_index(posts, &mut tmp)?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Persist {
        path: path.to_owned(),
        err: e.error,
    })?;
    Ok(())
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem writing the index.
#[derive(Debug)]
pub enum Error {
    /// Returned when there is a generic I/O error.
    Io(std::io::Error),

    /// Returned when serialization fails.
    Json(serde_json::Error),

    /// Returned when the finished temporary file can't be moved into place.
    Persist { path: PathBuf, err: std::io::Error },
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::Json(err) => err.fmt(f),
            Error::Persist { path, err } => {
                write!(f, "Writing index file '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Persist { path: _, err } => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    /// Converts [`serde_json::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: serde_json::Error) -> Error {
        Error::Json(err)
    }
}
