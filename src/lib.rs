//! Build helpers for a personal website. There are two independent pieces:
//!
//! 1. The site configuration handed to the site renderer ([`crate::site`])
//! 2. The blog post index ([`crate::build`])
//!
//! The post index is built in a single pass: list the posts directory, parse
//! the front matter of every `.md` file ([`crate::parser`],
//! [`crate::frontmatter`]), give each post its `/blog/<name>` route and sort
//! the posts newest-first ([`crate::post`]), then write them out as one JSON
//! array. The client-side blog listing reads that file.
//!
//! The site configuration is a fixed value except for the copyright year in
//! the footer, which is read from a [`crate::clock::Clock`].

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod clock;
pub mod config;
pub mod frontmatter;
pub mod parser;
pub mod post;
pub mod site;
