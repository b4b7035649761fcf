//! Defines the [`Parser`] and [`Error`] types, which turn a directory of
//! post source files into a sorted list of [`Post`]s.

use std::{
    fmt,
    fs::{read_dir, File},
    path::{Path, PathBuf},
};

use crate::{
    frontmatter,
    post::{sort_posts, Post, MARKDOWN_EXTENSION},
};

/// Parses [`Post`] objects from source files.
#[derive(Default)]
pub struct Parser;

impl Parser {
    /// Constructs a new parser.
    pub fn new() -> Parser {
        Parser
    }

    /// Parses a single [`Post`] from the file `file_name` inside
    /// `source_directory`.
    fn parse_post(&self, source_directory: &Path, file_name: &str) -> Result<Post> {
        match self._parse_post(source_directory, file_name) {
            Ok(p) => Ok(p),
            Err(e) => Err(Error::Annotated(
                format!("parsing post `{}`", file_name),
                Box::new(e),
            )),
        }
    }

    fn _parse_post(&self, source_directory: &Path, file_name: &str) -> Result<Post> {
        use std::io::Read;
        let mut contents = String::new();
        File::open(source_directory.join(file_name))?.read_to_string(&mut contents)?;

        let (front_matter, _body) = frontmatter::parse(&contents)?;
        let post = Post::new(file_name, front_matter);
        log::debug!("parsed `{}` as `{}`", file_name, post.path);
        Ok(post)
    }

    /// Searches a provided `source_directory` (non-recursively) for post
    /// files (extension = `.md`) and returns a list of [`Post`] objects
    /// sorted by date (most recent first; see [`sort_posts`]). Any other
    /// entry, including a post index written into the same directory, is
    /// skipped. Each post file is structured as follows:
    ///
    /// 1. Initial front matter fence (`---`)
    /// 2. YAML front matter, typically with `title` and `date` fields
    /// 3. Terminal front matter fence (`---`)
    /// 4. Post body
    ///
    /// For example:
    ///
    /// ```md
    /// ---
    /// title: Hello, world!
    /// date: 2021-04-16
    /// ---
    /// # Hello
    ///
    /// World
    /// ```
    pub fn parse_posts(&self, source_directory: &Path) -> Result<Vec<Post>> {
        // Collect every name before reading any file.
        let mut file_names = Vec::new();
        for result in read_dir(source_directory)? {
            let entry = result?;
            let os_file_name = entry.file_name();
            let lossy_name = os_file_name.to_string_lossy();
            if !lossy_name.ends_with(MARKDOWN_EXTENSION) {
                log::debug!("skipping `{}`", lossy_name);
                continue;
            }
            // Only post names have to be valid UTF-8; they become routes.
            let file_name = os_file_name
                .to_str()
                .ok_or_else(|| InvalidFileNameError(entry.path()))?;
            file_names.push(file_name.to_owned());
        }

        let mut posts = Vec::with_capacity(file_names.len());
        for file_name in &file_names {
            posts.push(self.parse_post(source_directory, file_name)?);
        }

        sort_posts(&mut posts);
        Ok(posts)
    }
}

#[derive(Debug)]
pub struct InvalidFileNameError(PathBuf);

impl fmt::Display for InvalidFileNameError {
    /// Displays an [`InvalidFileNameError`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid file name: {:?}", &self.0)
    }
}

impl std::error::Error for InvalidFileNameError {
    /// Implements the [`std::error::Error`] trait for [`InvalidFileNameError`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

/// Represents the result of a [`Post`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a [`Post`] object.
#[derive(Debug)]
pub enum Error {
    /// Returned when a post's front matter is malformed.
    FrontMatter(frontmatter::Error),

    /// Returned for I/O errors listing the directory or reading a file.
    Io(std::io::Error),

    /// Returned when a directory entry's name isn't valid UTF-8.
    InvalidFileName(InvalidFileNameError),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::FrontMatter(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
            Error::InvalidFileName(err) => err.fmt(f),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", &annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FrontMatter(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::InvalidFileName(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<InvalidFileNameError> for Error {
    fn from(err: InvalidFileNameError) -> Error {
        Error::InvalidFileName(err)
    }
}

impl From<frontmatter::Error> for Error {
    /// Converts a [`frontmatter::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator when parsing front matter.
    fn from(err: frontmatter::Error) -> Error {
        Error::FrontMatter(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    // use the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_parse_posts() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), "simple.md", "---\ntitle: Simple\ndate: 2000-01-01\n---\nToday.");
        write(dir.path(), "posts.json", "[]");
        write(dir.path(), "notes.txt", "not a post");
        write(dir.path(), "later.md", "---\ntitle: Later\ndate: 2001-01-01\n---\n");
        fs::create_dir(dir.path().join("drafts"))?;
        write(&dir.path().join("drafts"), "hidden.md", "---\ntitle: Hidden\n---\n");

        let posts = Parser::new().parse_posts(dir.path())?;

        let paths: Vec<&str> = posts.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(vec!["/blog/later", "/blog/simple"], paths);
        assert_eq!(Some(&json!("Simple")), posts[1].front_matter.get("title"));
        Ok(())
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_names() -> Result<()> {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir()?;
        write(dir.path(), "a.md", "---\ntitle: A\n---\n");
        fs::write(dir.path().join(OsStr::from_bytes(b"junk\xff.txt")), "junk")?;

        let posts = Parser::new().parse_posts(dir.path())?;
        assert_eq!(vec!["/blog/a"], posts.iter().map(|p| p.path.as_str()).collect::<Vec<_>>());

        fs::write(dir.path().join(OsStr::from_bytes(b"bad\xff.md")), "---\n---\n")?;
        assert!(matches!(
            Parser::new().parse_posts(dir.path()),
            Err(Error::InvalidFileName(_))
        ));
        Ok(())
    }

    #[test]
    fn test_file_without_front_matter() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), "bare.md", "# No header here\n");

        let posts = Parser::new().parse_posts(dir.path())?;

        assert_eq!(1, posts.len());
        assert!(posts[0].front_matter.is_empty());
        assert_eq!("/blog/bare", posts[0].path);
        Ok(())
    }

    #[test]
    fn test_malformed_front_matter_names_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), "good.md", "---\ntitle: Good\n---\n");
        write(dir.path(), "broken.md", "---\ntitle: Broken\n");

        match Parser::new().parse_posts(dir.path()) {
            Err(err @ Error::Annotated(..)) => {
                assert_eq!("parsing post `broken.md`: Missing closing `---`", err.to_string());
            }
            other => panic!("expected an annotated error, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = Parser::new().parse_posts(&dir.path().join("nope"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
