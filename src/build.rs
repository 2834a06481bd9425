//! Exports the [`build_index`] function which stitches together the steps of
//! generating `posts.json`: finding post files ([`find_post_files`]), turning
//! each into a [`Post`] ([`crate::post`]), ordering them newest first, and
//! writing the result ([`crate::write`]).

use crate::config::Config;
use crate::post::{Error as PostError, Post};
use crate::write::{write_index_file, Error as WriteError};
use log::{debug, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A post source file discovered in the posts directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostFile {
    /// The bare file name, e.g. `2025-01-15-hello.html`.
    pub file_name: String,

    /// The full path to the file.
    pub path: PathBuf,
}

/// Lists the `.html` files directly inside `config.posts_directory`, sorted by
/// file name and skipping anything in `config.exclude`.
pub fn find_post_files(config: &Config) -> Result<Vec<PostFile>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(&config.posts_directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()));

    for result in walker {
        let entry = result?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !is_html(&file_name) {
            continue;
        }
        if config.is_excluded(&file_name) {
            debug!("Skipping excluded file `{}`", file_name);
            continue;
        }
        files.push(PostFile {
            file_name,
            path: entry.into_path(),
        });
    }

    Ok(files)
}

impl PostFile {
    /// Reads the file's HTML. Bytes that aren't valid UTF-8 are replaced with
    /// U+FFFD rather than failing the whole run.
    pub fn read(&self) -> Result<String> {
        let bytes = std::fs::read(&self.path).map_err(|err| Error::Read {
            path: self.path.clone(),
            err,
        })?;
        match String::from_utf8(bytes) {
            Ok(html) => Ok(html),
            Err(e) => {
                warn!("`{}` is not valid UTF-8; decoding lossily", self.path.display());
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        }
    }
}

fn is_html(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("html"))
        .unwrap_or(false)
}

/// Reads every post file and returns the resulting [`Post`]s, newest first.
/// A post without a title aborts the build; a post without a usable date is
/// skipped with a warning.
pub fn build_index(config: &Config) -> Result<Vec<Post>> {
    let mut posts: Vec<Post> = Vec::new();

    for file in find_post_files(config)? {
        let html = file.read()?;
        match Post::from_html(&file.file_name, &html, &config.url_prefix) {
            Ok(post) => posts.push(post),
            Err(PostError::MissingTitle) => {
                return Err(Error::Post {
                    path: file.path,
                    err: PostError::MissingTitle,
                })
            }
            Err(err) => warn!("Skipping `{}`: {}", file.path.display(), err),
        }
    }

    // ISO dates are zero-padded so lexical order is chronological; the URL
    // tie-break keeps the output stable between runs.
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.url.cmp(&b.url)));
    Ok(posts)
}

/// Builds the index and writes it to `config.output_file`. Returns the number
/// of posts written.
pub fn generate(config: &Config) -> Result<usize> {
    let posts = build_index(config)?;
    write_index_file(&posts, &config.output_file)?;
    info!(
        "Wrote {} posts to `{}`",
        posts.len(),
        config.output_file.display()
    );
    Ok(posts.len())
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for generating the index. Errors can come from walking the
/// posts directory, reading a post, turning a post into a [`Post`], or
/// writing the output.
#[derive(Debug)]
pub enum Error {
    /// Returned for a post file that can't be indexed at all.
    Post { path: PathBuf, err: PostError },

    /// Returned for I/O problems reading a post file.
    Read { path: PathBuf, err: std::io::Error },

    /// Returned for problems listing the posts directory.
    Walk(walkdir::Error),

    /// Returned for errors writing the index file.
    Write(WriteError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Post { path, err } => write!(f, "Indexing '{}': {}", path.display(), err),
            Error::Read { path, err } => {
                write!(f, "Reading post file '{}': {}", path.display(), err)
            }
            Error::Walk(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Post { path: _, err } => Some(err),
            Error::Read { path: _, err } => Some(err),
            Error::Walk(err) => Some(err),
            Error::Write(err) => Some(err),
        }
    }
}

impl From<walkdir::Error> for Error {
    /// Converts [`walkdir::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: walkdir::Error) -> Error {
        Error::Walk(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}
