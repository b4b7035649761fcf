use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The name of the project file searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "site.yaml";

const DEFAULT_POSTS_DIRECTORY: &str = "docs/blog";
const DEFAULT_INDEX_FILE: &str = "docs/blog/posts.json";
const DEFAULT_SITE_CONFIG_FILE: &str = "docs/.vitepress/config.json";

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct Project {
    #[serde(default)]
    posts_directory: Option<PathBuf>,

    #[serde(default)]
    index_file: Option<PathBuf>,

    #[serde(default)]
    site_config_file: Option<PathBuf>,
}

/// Where the build reads posts from and writes its outputs to.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub posts_directory: PathBuf,
    pub index_file: PathBuf,
    pub site_config_file: PathBuf,
}

impl Config {
    /// Looks for a `site.yaml` in `dir` and then in each of its parents. If
    /// none exists, the defaults are resolved against the nearest of those
    /// directories that holds `docs/blog`, or against `dir` itself.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        for candidate in dir.ancestors() {
            let path = candidate.join(PROJECT_FILE);
            if path.is_file() {
                log::debug!("using project file `{}`", path.display());
                return match Config::from_project_file(&path) {
                    Ok(config) => Ok(config),
                    Err(e) => Err(anyhow!("Loading configuration: {:?}", e)),
                };
            }
        }
        let root = dir
            .ancestors()
            .find(|candidate| candidate.join(DEFAULT_POSTS_DIRECTORY).is_dir())
            .unwrap_or(dir);
        log::debug!(
            "no `{}` found above `{}`; using defaults under `{}`",
            PROJECT_FILE,
            dir.display(),
            root.display()
        );
        Ok(Config::resolve(root, Project::default()))
    }

    pub fn from_project_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Reading project file `{}`", path.display()))?;
        let project: Project = match contents.trim().is_empty() {
            true => Project::default(),
            false => serde_yaml::from_str(&contents)?,
        };
        match path.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )),
            Some(project_root) => Ok(Config::resolve(project_root, project)),
        }
    }

    fn resolve(root: &Path, project: Project) -> Config {
        let resolve = |path: Option<PathBuf>, default: &str| {
            root.join(path.unwrap_or_else(|| PathBuf::from(default)))
        };
        Config {
            posts_directory: resolve(project.posts_directory, DEFAULT_POSTS_DIRECTORY),
            index_file: resolve(project.index_file, DEFAULT_INDEX_FILE),
            site_config_file: resolve(project.site_config_file, DEFAULT_SITE_CONFIG_FILE),
        }
    }
}
