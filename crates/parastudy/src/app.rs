use std::path::{Path, PathBuf};

use crate::config::StudyConfig;
use crate::data::storage::{StorageError, StudyDirectory};
use crate::service::DirectoryJobService;
use crate::state::StudyContext;

/// A study opened from its data directory
pub struct App {
    pub directory: StudyDirectory,
    pub config: StudyConfig,
    pub context: StudyContext,
}

impl App {
    /// Open (and initialize if needed) the study in `data_dir`
    pub fn with_data_dir(data_dir: PathBuf) -> Result<Self, StorageError> {
        let directory = StudyDirectory::new(data_dir);
        directory.init()?;
        let config = directory.load_config()?;
        let context = directory.load_context()?;
        tracing::debug!(data_dir = %directory.root().display(), "Opened study");
        Ok(Self {
            directory,
            config,
            context,
        })
    }

    pub fn data_dir(&self) -> &Path {
        self.directory.root()
    }

    /// Persist the study context
    pub fn save(&self) -> Result<(), StorageError> {
        self.directory.save_context(&self.context)
    }

    /// Forget every step. Files already generated stay on disk.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.context = StudyContext::default();
        self.save()?;
        tracing::info!("Study reset");
        Ok(())
    }

    pub fn job_service(&self) -> DirectoryJobService {
        DirectoryJobService::new(self.config.job_root(self.data_dir()))
    }
}
