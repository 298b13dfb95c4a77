//! Study data directory
//!
//! Directory structure:
//! ~/.parastudy/
//!   config.yaml          # Louver defaults, job service, recipe
//!   study.yaml           # Study context shared by the wizard steps
//!   parastudy.log
//!   model/               # Copy of the loaded base model
//!   design_options/      # One model file per design option
//!   jobs/                # Default job service root

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StudyConfig;
use crate::state::StudyContext;
use crate::util::io::{atomic_write, copy_file_into, replace_dir, staging_path};

/// Error types for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Manages the data directory of a study
#[derive(Debug, Clone)]
pub struct StudyDirectory {
    root: PathBuf,
}

impl StudyDirectory {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the default data directory path (~/.parastudy/)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".parastudy")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn config_path(&self) -> PathBuf {
        self.root.join("config.yaml")
    }

    fn study_path(&self) -> PathBuf {
        self.root.join("study.yaml")
    }

    pub fn model_dir(&self) -> PathBuf {
        self.root.join("model")
    }

    pub fn options_dir(&self) -> PathBuf {
        self.root.join("design_options")
    }

    /// Initialize the data directory and write a default config if none exists
    pub fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StorageError::Io(format!("Failed to create data directory: {}", e)))?;
        if !self.config_path().exists() {
            self.save_config(&StudyConfig::default())?;
        }
        Ok(())
    }

    /// Load config.yaml, falling back to defaults when it does not exist
    pub fn load_config(&self) -> Result<StudyConfig, StorageError> {
        let config_path = self.config_path();
        if !config_path.exists() {
            return Ok(StudyConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|e| StorageError::Io(format!("Failed to read config: {}", e)))?;

        serde_saphyr::from_str(&content)
            .map_err(|e| StorageError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn save_config(&self, config: &StudyConfig) -> Result<(), StorageError> {
        let yaml = serde_saphyr::to_string(config)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize config: {}", e)))?;

        atomic_write(&self.config_path(), &yaml)
            .map_err(|e| StorageError::Io(format!("Failed to write config: {}", e)))
    }

    /// Load study.yaml; a fresh study has an empty context
    pub fn load_context(&self) -> Result<StudyContext, StorageError> {
        let study_path = self.study_path();
        if !study_path.exists() {
            return Ok(StudyContext::default());
        }

        let content = fs::read_to_string(&study_path)
            .map_err(|e| StorageError::Io(format!("Failed to read study: {}", e)))?;

        serde_saphyr::from_str(&content)
            .map_err(|e| StorageError::Parse(format!("Failed to parse study: {}", e)))
    }

    pub fn save_context(&self, context: &StudyContext) -> Result<(), StorageError> {
        let yaml = serde_saphyr::to_string(context)
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize study: {}", e)))?;

        atomic_write(&self.study_path(), &yaml)
            .map_err(|e| StorageError::Io(format!("Failed to write study: {}", e)))?;
        tracing::debug!(path = %self.study_path().display(), "Saved study context");
        Ok(())
    }

    /// Copy a base model into model/, replacing whatever was loaded before
    /// Copy the base model into `model/`, replacing any previous copy.
    ///
    /// The copy is staged first, so a source that already lives in `model/`
    /// survives the import.
    pub fn import_model(&self, source: &Path) -> Result<PathBuf, StorageError> {
        let model_dir = self.model_dir();
        let staged = staging_path(&model_dir);
        if staged.exists() {
            fs::remove_dir_all(&staged)
                .map_err(|e| StorageError::Io(format!("Failed to clear model staging: {}", e)))?;
        }
        let copied = copy_file_into(source, &staged)
            .map_err(|e| StorageError::Io(format!("Failed to copy model: {}", e)))?;
        replace_dir(&staged, &model_dir)
            .map_err(|e| StorageError::Io(format!("Failed to replace model directory: {}", e)))?;

        let name = copied.file_name().unwrap_or_default();
        Ok(model_dir.join(name))
    }
}
