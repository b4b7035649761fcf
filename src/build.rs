//! Exports the [`build_index`] function which stitches together the steps of
//! building the post index: parsing and sorting the posts
//! ([`crate::parser`]), rendering them as JSON ([`render_index`]), and
//! writing the result over the previous index.

use crate::parser::{Error as ParseError, Parser as PostParser};
use crate::post::Post;
use std::fmt;
use std::path::{Path, PathBuf};

/// Builds the post index for the posts in `source_directory` and writes it
/// to `output_file`. Every post is parsed and rendered before the output
/// file is touched, so a failure leaves any previous index as it was.
pub fn build_index(source_directory: &Path, output_file: &Path) -> Result<()> {
    let posts = PostParser::new().parse_posts(source_directory)?;
    let json = render_index(&posts)?;

    std::fs::write(output_file, json).map_err(|err| Error::Write {
        path: output_file.to_owned(),
        err,
    })?;

    log::info!(
        "wrote {} post(s) to `{}`",
        posts.len(),
        output_file.display()
    );
    Ok(())
}

/// Renders posts as a JSON array with two-space indentation. Fields keep
/// their front matter order, followed by `path`.
pub fn render_index(posts: &[Post]) -> Result<String> {
    Ok(serde_json::to_string_pretty(posts)?)
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building the post index.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors reading or parsing the posts.
    Parse(ParseError),

    /// Returned when the index can't be serialized.
    Serialize(serde_json::Error),

    /// Returned for I/O problems writing the index file.
    Write { path: PathBuf, err: std::io::Error },
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(err) => err.fmt(f),
            Error::Serialize(err) => err.fmt(f),
            Error::Write { path, err } => {
                write!(f, "Writing index file '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Serialize(err) => Some(err),
            Error::Write { path: _, err } => Some(err),
        }
    }
}

impl From<ParseError> for Error {
    /// Converts [`ParseError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: ParseError) -> Error {
        Error::Parse(err)
    }
}

impl From<serde_json::Error> for Error {
    /// Converts [`serde_json::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: serde_json::Error) -> Error {
        Error::Serialize(err)
    }
}
