//! Defines [`SiteConfig`], the configuration value handed to the external
//! site renderer. Everything in it is a literal except the copyright year in
//! the footer, which comes from a [`Clock`] every time the value is
//! evaluated.

use crate::clock::Clock;
use chrono::Datelike;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

const TITLE: &str = "Brendan Goodenough";

/// The configuration object consumed by the site renderer. Serializes to the
/// renderer's camelCase field names (`cleanUrls`, `themeConfig`, etc).
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// The language tag for the generated pages.
    pub lang: String,

    /// Whether the renderer should drop the `.html` suffix from URLs.
    pub clean_urls: bool,

    /// The site title.
    pub title: String,

    pub markdown: MarkdownConfig,

    pub theme_config: ThemeConfig,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MarkdownConfig {
    /// The syntax-highlighting theme for code blocks.
    pub theme: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub social_links: Vec<SocialLink>,

    /// The range of heading levels shown in the page outline.
    pub outline: (u8, u8),

    pub nav: Vec<NavLink>,

    pub footer: Footer,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SocialLink {
    pub icon: String,
    pub link: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct NavLink {
    pub text: String,
    pub link: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Footer {
    pub copyright: String,
}

impl SiteConfig {
    /// Builds the site configuration, reading the current year from `clock`.
    pub fn evaluate<C: Clock>(clock: C) -> SiteConfig {
        SiteConfig {
            lang: "en-US".to_owned(),
            clean_urls: true,
            title: TITLE.to_owned(),
            markdown: MarkdownConfig {
                theme: "github-dark".to_owned(),
            },
            theme_config: ThemeConfig {
                social_links: vec![
                    social("github", "https://github.com/nerdenough"),
                    social("twitter", "https://twitter.com/nerdenough"),
                    social("instagram", "https://instagram.com/nerdenough"),
                ],
                outline: (2, 3),
                nav: vec![nav("Projects", "/projects"), nav("Blog", "/blog")],
                footer: Footer {
                    copyright: format!("&copy; {} {}", clock.today().year(), TITLE),
                },
            },
        }
    }

    /// Renders the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn social(icon: &str, link: &str) -> SocialLink {
    SocialLink {
        icon: icon.to_owned(),
        link: link.to_owned(),
    }
}

fn nav(text: &str, link: &str) -> NavLink {
    NavLink {
        text: text.to_owned(),
        link: link.to_owned(),
    }
}

/// Evaluates the [`SiteConfig`] against `clock` and writes it to
/// `output_file` as JSON, replacing any previous contents.
pub fn write_site_config<C: Clock>(clock: C, output_file: &Path) -> Result<()> {
    let json = SiteConfig::evaluate(clock).to_json()?;
    std::fs::write(output_file, json).map_err(|err| Error::Write {
        path: output_file.to_owned(),
        err,
    })?;
    log::info!("wrote site configuration to `{}`", output_file.display());
    Ok(())
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem rendering or writing the site configuration.
#[derive(Debug)]
pub enum Error {
    /// Returned when the configuration can't be serialized.
    Serialize(serde_json::Error),

    /// Returned when the configuration file can't be written.
    Write { path: PathBuf, err: std::io::Error },
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Serialize(err) => err.fmt(f),
            Error::Write { path, err } => {
                write!(f, "Writing site configuration '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Serialize(err) => Some(err),
            Error::Write { path: _, err } => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    /// Converts [`serde_json::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator when serializing.
    fn from(err: serde_json::Error) -> Error {
        Error::Serialize(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;
    use serde_json::json;

    fn clock(year: i32) -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(year, 3, 14).unwrap())
    }

    #[test]
    fn test_footer_uses_clock_year() {
        let config = SiteConfig::evaluate(clock(2031));
        assert_eq!(
            "&copy; 2031 Brendan Goodenough",
            config.theme_config.footer.copyright
        );
    }

    #[test]
    fn test_only_footer_depends_on_clock() {
        let mut a = SiteConfig::evaluate(clock(2020));
        let b = SiteConfig::evaluate(clock(2024));
        assert_ne!(a, b);
        a.theme_config.footer = b.theme_config.footer.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn test_renderer_contract() -> Result<()> {
        let value: serde_json::Value =
            serde_json::from_str(&SiteConfig::evaluate(clock(2023)).to_json()?)?;
        assert_eq!(
            json!({
                "lang": "en-US",
                "cleanUrls": true,
                "title": "Brendan Goodenough",
                "markdown": { "theme": "github-dark" },
                "themeConfig": {
                    "socialLinks": [
                        { "icon": "github", "link": "https://github.com/nerdenough" },
                        { "icon": "twitter", "link": "https://twitter.com/nerdenough" },
                        { "icon": "instagram", "link": "https://instagram.com/nerdenough" }
                    ],
                    "outline": [2, 3],
                    "nav": [
                        { "text": "Projects", "link": "/projects" },
                        { "text": "Blog", "link": "/blog" }
                    ],
                    "footer": { "copyright": "&copy; 2023 Brendan Goodenough" }
                }
            }),
            value
        );
        Ok(())
    }

    #[test]
    fn test_write_site_config() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        std::fs::write(&path, "stale")?;
        write_site_config(clock(2025), &path)?;
        let written = std::fs::read_to_string(&path)?;
        assert!(written.starts_with("{\n  \"lang\": \"en-US\","));
        assert!(written.contains("&copy; 2025 Brendan Goodenough"));
        Ok(())
    }
}
