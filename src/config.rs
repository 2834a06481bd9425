//! Loads the `postmeta.yaml` project file. The file is looked up in the given
//! directory and then in each of its parents; when none exists the defaults
//! are rooted at the starting directory.

use crate::util::open;
use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the project file searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "postmeta.yaml";

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Project {
    posts_directory: PathBuf,
    output_file: PathBuf,
    url_prefix: String,
    exclude: Vec<String>,
    required_meta: Vec<String>,
    title_min: usize,
    title_max: usize,
    description_max: usize,
}

impl Default for Project {
    fn default() -> Self {
        Project {
            posts_directory: PathBuf::from("posts"),
            output_file: PathBuf::from("posts.json"),
            url_prefix: "/posts/".to_owned(),
            exclude: vec!["index.html".to_owned()],
            required_meta: vec!["description".to_owned()],
            title_min: 10,
            title_max: 60,
            description_max: 160,
        }
    }
}

/// Thresholds and required fields applied by [`crate::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    pub required_meta: Vec<String>,
    pub title_min: usize,
    pub title_max: usize,
    pub description_max: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Project::default().rules()
    }
}

impl Project {
    fn rules(&self) -> Rules {
        Rules {
            required_meta: self.required_meta.clone(),
            title_min: self.title_min,
            title_max: self.title_max,
            description_max: self.description_max,
        }
    }

    fn into_config(self, root: &Path) -> Result<Config> {
        if self.title_min > self.title_max {
            return Err(anyhow!(
                "`title_min` ({}) is greater than `title_max` ({})",
                self.title_min,
                self.title_max
            ));
        }
        Ok(Config {
            rules: self.rules(),
            posts_directory: root.join(self.posts_directory),
            output_file: root.join(self.output_file),
            url_prefix: self.url_prefix,
            exclude: self.exclude,
        })
    }
}

/// Fully resolved settings; all paths are absolute or relative to the
/// process's working directory.
#[derive(Clone, Debug)]
pub struct Config {
    pub posts_directory: PathBuf,
    pub output_file: PathBuf,
    pub url_prefix: String,
    pub exclude: Vec<String>,
    pub rules: Rules,
}

impl Config {
    /// Searches `dir` and its ancestors for [`PROJECT_FILE`]. Falls back to
    /// the default settings rooted at `dir` if no project file is found. A
    /// relative `dir` is resolved against the working directory first, so `.`
    /// still searches every parent.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let dir = match dir.is_absolute() {
            true => dir.to_owned(),
            false => std::env::current_dir()
                .context("Resolving the working directory")?
                .join(dir),
        };
        for candidate in dir.ancestors() {
            let path = candidate.join(PROJECT_FILE);
            if path.exists() {
                return Config::from_project_file(&path)
                    .with_context(|| format!("Loading configuration from `{}`", path.display()));
            }
        }
        info!(
            "No `{}` found above `{}`; using defaults",
            PROJECT_FILE,
            dir.display()
        );
        Project::default().into_config(&dir)
    }

    /// Loads a specific project file. Relative paths in the file are resolved
    /// against the file's directory.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let project: Project = serde_yaml::from_reader(open(path, "project")?)?;
        match path.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )),
            Some(project_root) => {
                debug!("Project root is `{}`", project_root.display());
                project.into_config(project_root)
            }
        }
    }

    /// Reports whether `file_name` is listed in `exclude`.
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == file_name)
    }
}
