//! Splits a post source file into its YAML front matter and its body.
//!
//! A file with front matter looks like this:
//!
//! ```md
//! ---
//! title: Hello, world!
//! date: 2021-04-16
//! ---
//! # Hello
//! ```
//!
//! A file that doesn't open with a `---` line has no front matter at all and
//! parses to an empty [`FrontMatter`].

use serde_json::{Map, Value};
use std::fmt;

const FENCE: &str = "---";
const BYTE_ORDER_MARK: char = '\u{feff}';

/// The fields of a post's front matter in the order they were written.
pub type FrontMatter = Map<String, Value>;

/// Parses the front matter at the top of `input`, returning it along with
/// the remaining body text.
pub fn parse(input: &str) -> Result<(FrontMatter, &str)> {
    let input = input.trim_start_matches(BYTE_ORDER_MARK);
    match split(input)? {
        None => Ok((FrontMatter::new(), input)),
        Some((yaml, body)) => Ok((deserialize(yaml)?, body)),
    }
}

// Returns the text between the fences and the text after the closing fence,
// or `None` if `input` doesn't start with a fence.
fn split(input: &str) -> Result<Option<(&str, &str)>> {
    let mut lines = input.split_inclusive('\n');
    let first = match lines.next() {
        Some(line) => line,
        None => return Ok(None),
    };
    if !is_fence(first) {
        return Ok(None);
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if is_fence(line) {
            return Ok(Some((&input[yaml_start..offset], &input[offset + line.len()..])));
        }
        offset += line.len();
    }
    Err(Error::MissingEndFence)
}

fn is_fence(line: &str) -> bool {
    line.trim_end() == FENCE
}

fn deserialize(yaml: &str) -> Result<FrontMatter> {
    if yaml.trim().is_empty() {
        return Ok(FrontMatter::new());
    }
    match serde_yaml::from_str(yaml)? {
        Value::Object(front_matter) => Ok(front_matter),
        Value::Null => Ok(FrontMatter::new()),
        _ => Err(Error::NotAMapping),
    }
}

/// The result of a front matter parse.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents malformed front matter.
#[derive(Debug)]
pub enum Error {
    /// Returned when the opening fence (`---`) is never closed.
    MissingEndFence,

    /// Returned when the front matter is valid YAML but not a mapping (e.g.,
    /// a list or a bare string).
    NotAMapping,

    /// Returned when there was an error parsing the front matter as YAML.
    DeserializeYaml(serde_yaml::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingEndFence => write!(f, "Missing closing `---`"),
            Error::NotAMapping => {
                write!(f, "Front matter must be a mapping of fields to values")
            }
            Error::DeserializeYaml(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingEndFence => None,
            Error::NotAMapping => None,
            Error::DeserializeYaml(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_keeps_field_order() -> Result<()> {
        let (front_matter, body) =
            parse("---\ntitle: Hello\ndate: 2021-04-16\ntags: [a, b]\n---\n# Hello\n")?;
        assert_eq!(
            vec!["title", "date", "tags"],
            front_matter.keys().map(String::as_str).collect::<Vec<_>>()
        );
        assert_eq!(Some(&json!("2021-04-16")), front_matter.get("date"));
        assert_eq!(Some(&json!(["a", "b"])), front_matter.get("tags"));
        assert_eq!("# Hello\n", body);
        Ok(())
    }

    #[test]
    fn test_parse_without_front_matter() -> Result<()> {
        let (front_matter, body) = parse("# Just a body\n---\n")?;
        assert!(front_matter.is_empty());
        assert_eq!("# Just a body\n---\n", body);
        Ok(())
    }

    #[test]
    fn test_parse_empty_block() -> Result<()> {
        let (front_matter, body) = parse("---\n---\nbody")?;
        assert!(front_matter.is_empty());
        assert_eq!("body", body);
        Ok(())
    }

    #[test]
    fn test_parse_crlf_and_bom() -> Result<()> {
        let (front_matter, body) = parse("\u{feff}---\r\ntitle: Windows\r\n---\r\nbody\r\n")?;
        assert_eq!(Some(&json!("Windows")), front_matter.get("title"));
        assert_eq!("body\r\n", body);
        Ok(())
    }

    #[test]
    fn test_fence_must_be_whole_line() -> Result<()> {
        let (front_matter, _) = parse("---\ntitle: a --- b\n---\n")?;
        assert_eq!(Some(&json!("a --- b")), front_matter.get("title"));
        Ok(())
    }

    #[test]
    fn test_missing_end_fence() {
        assert!(matches!(
            parse("---\ntitle: Hello\n"),
            Err(Error::MissingEndFence)
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            parse("---\ntitle: [unclosed\n---\n"),
            Err(Error::DeserializeYaml(_))
        ));
    }

    #[test]
    fn test_not_a_mapping() {
        assert!(matches!(
            parse("---\n- one\n- two\n---\n"),
            Err(Error::NotAMapping)
        ));
    }
}
