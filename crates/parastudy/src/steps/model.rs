use std::path::{Path, PathBuf};

use jiff::Timestamp;
use parastudy_core::HbModel;

use crate::app::App;
use crate::state::{ModelState, StepError};

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    pub path: PathBuf,
    pub identifier: Option<String>,
    pub exterior_faces: usize,
    pub apertures: usize,
}

/// Validate a base model and copy it into the study.
///
/// Everything derived from a previously loaded model is cleared.
pub fn load_model(app: &mut App, source: &Path) -> Result<ModelSummary, StepError> {
    if !source.is_file() {
        return Err(StepError::MissingFile(source.to_path_buf()));
    }
    let model = HbModel::from_path(source)?;
    let exterior_faces = model.exterior_faces_with_apertures();
    if exterior_faces == 0 {
        tracing::warn!(
            source = %source.display(),
            "Model has no exterior faces with apertures; design options will all be identical"
        );
    }

    let path = app.directory.import_model(source)?;
    let identifier = model.identifier().map(str::to_string);
    app.context.set_model(ModelState {
        source: source.to_path_buf(),
        path: path.clone(),
        identifier: identifier.clone(),
        loaded_at: Timestamp::now(),
    });
    app.save()?;

    tracing::info!(source = %source.display(), exterior_faces, "Loaded base model");
    Ok(ModelSummary {
        path,
        identifier,
        exterior_faces,
        apertures: model.aperture_count(),
    })
}
