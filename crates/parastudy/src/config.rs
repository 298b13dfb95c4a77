//! Study configuration stored in `config.yaml`.
//!
//! Every field has a default, so a missing file or a partial file is fine.

use std::path::{Path, PathBuf};

use parastudy_core::{DEFAULT_VIZ_VARIABLES, LouverDefaults, RecipeRef};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://app.pollination.cloud";

/// Where jobs are submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobServiceConfig {
    /// Directory the job service reads requests from and writes results to.
    /// Defaults to `jobs/` in the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    /// Base of the job URLs shown to the user
    pub base_url: String,
}

impl Default for JobServiceConfig {
    fn default() -> Self {
        Self {
            root: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Louvers used when only one of count and depth is varied
    pub louvers: LouverDefaults,
    pub job_service: JobServiceConfig,
    pub recipe: RecipeRef,
    pub viz_variables: String,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            louvers: LouverDefaults::default(),
            job_service: JobServiceConfig::default(),
            recipe: RecipeRef::default(),
            viz_variables: DEFAULT_VIZ_VARIABLES.to_string(),
        }
    }
}

impl StudyConfig {
    /// Job service directory, resolved against the data directory
    pub fn job_root(&self, data_dir: &Path) -> PathBuf {
        match &self.job_service.root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => data_dir.join(root),
            None => data_dir.join("jobs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = "louvers:\n  count: 3\n  depth: 0.8\n";
        let config: StudyConfig = serde_saphyr::from_str(yaml).unwrap();

        assert_eq!(config.louvers.count, 3);
        assert_eq!(config.louvers.depth, 0.8);
        assert_eq!(config.job_service, JobServiceConfig::default());
        assert_eq!(config.recipe.to_string(), "ladybug-tools/annual-energy-use:latest");
        assert_eq!(config.viz_variables, DEFAULT_VIZ_VARIABLES);
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = StudyConfig::default();
        config.job_service.root = Some(PathBuf::from("/srv/jobs"));
        config.recipe.tag = "0.5.3".to_string();

        let yaml = serde_saphyr::to_string(&config).unwrap();
        let back: StudyConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_job_root_resolution() {
        let data = Path::new("/home/user/.parastudy");
        let mut config = StudyConfig::default();
        assert_eq!(config.job_root(data), data.join("jobs"));

        config.job_service.root = Some(PathBuf::from("remote"));
        assert_eq!(config.job_root(data), data.join("remote"));

        config.job_service.root = Some(PathBuf::from("/srv/jobs"));
        assert_eq!(config.job_root(data), PathBuf::from("/srv/jobs"));
    }
}
