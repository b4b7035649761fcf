//! Defines the [`Post`] type, one entry in the post index, and the ordering
//! applied to the index ([`sort_posts`]).

use crate::frontmatter::FrontMatter;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::cmp::Reverse;

/// The route segment under which every post is served.
pub const ROUTE_PREFIX: &str = "/blog/";

/// The extension of post source files.
pub const MARKDOWN_EXTENSION: &str = ".md";

/// A post's front matter plus the route it's served from.
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    /// The fields parsed from the post's front matter, untouched.
    pub front_matter: FrontMatter,

    /// The post's route, e.g. `/blog/hello-world` for `hello-world.md`.
    pub path: String,
}

impl Post {
    /// Creates a [`Post`] for the source file named `file_name`.
    pub fn new(file_name: &str, front_matter: FrontMatter) -> Post {
        Post {
            front_matter,
            path: route(file_name),
        }
    }

    /// The raw `date` field from the front matter, if any.
    pub fn date(&self) -> Option<&Value> {
        self.front_matter.get("date")
    }

    /// Builds the index record for this post: a copy of the front matter with
    /// `path` merged in. A `path` field already present in the front matter
    /// keeps its position but takes the derived value.
    pub fn to_record(&self) -> FrontMatter {
        let mut record = self.front_matter.clone();
        record.insert("path".to_owned(), Value::String(self.path.clone()));
        record
    }
}

impl Serialize for Post {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

/// Derives the route for a source file name by dropping the `.md`
/// extension and prefixing [`ROUTE_PREFIX`].
pub fn route(file_name: &str) -> String {
    let stem = file_name.strip_suffix(MARKDOWN_EXTENSION).unwrap_or(file_name);
    format!("{}{}", ROUTE_PREFIX, stem)
}

/// The instant a post was published, as far as ordering is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PostDate(DateTime<Utc>);

impl PostDate {
    /// Parses a front matter date. Accepts RFC 3339 timestamps, naive
    /// date-times (read as UTC), and bare `YYYY-MM-DD` dates (UTC midnight).
    pub fn parse(s: &str) -> Option<PostDate> {
        let s = s.trim();
        if let Ok(date_time) = DateTime::parse_from_rfc3339(s) {
            return Some(PostDate(date_time.with_timezone(&Utc)));
        }
        for format in &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return Some(PostDate(Utc.from_utc_datetime(&naive)));
            }
        }
        let naive = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
        Some(PostDate(Utc.from_utc_datetime(&naive.and_hms_opt(0, 0, 0)?)))
    }

    fn of(post: &Post) -> Option<PostDate> {
        match post.date() {
            None => None,
            Some(Value::String(s)) => {
                let date = PostDate::parse(s);
                if date.is_none() {
                    log::warn!("`{}` has an unrecognized date `{}`", post.path, s);
                }
                date
            }
            Some(other) => {
                log::warn!("`{}` has a non-string date `{}`", post.path, other);
                None
            }
        }
    }
}

/// Orders posts from most to least recent. Posts without a usable date go
/// after every dated post. Ties are broken by path so the order never
/// depends on directory listing order.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by_cached_key(|post| {
        let date = PostDate::of(post);
        (date.is_none(), Reverse(date), post.path.clone())
    });
}
