//! Integration tests for the parastudy wizard
//!
//! Tests are organized by topic:
//! - `wizard` - Step prerequisites, context persistence and the full flow
//! - `service` - Filesystem job service


use std::fs;
use std::path::{Path, PathBuf};

use parastudy_core::{JobRef, RangeSpec};
use tempfile::TempDir;

use crate::app::App;
use crate::service::DirectoryJobService;
use crate::state::Selection;

/// A single-room model with one exterior south wall carrying a window
pub(crate) const SAMPLE_MODEL: &str = r#"{
  "type": "Model",
  "identifier": "Shoebox",
  "units": "Meters",
  "rooms": [{
    "type": "Room",
    "identifier": "Office",
    "faces": [
      {
        "type": "Face",
        "identifier": "Office_South",
        "face_type": "Wall",
        "geometry": {"type": "Face3D", "boundary": [[0, 0, 0], [6, 0, 0], [6, 0, 3], [0, 0, 3]]},
        "boundary_condition": {"type": "Outdoors"},
        "apertures": [{
          "type": "Aperture",
          "identifier": "Office_South_Win",
          "geometry": {"type": "Face3D", "boundary": [[1, 0, 1], [5, 0, 1], [5, 0, 2], [1, 0, 2]]},
          "boundary_condition": {"type": "Outdoors"}
        }]
      },
      {
        "type": "Face",
        "identifier": "Office_Floor",
        "face_type": "Floor",
        "geometry": {"type": "Face3D", "boundary": [[0, 0, 0], [0, 5, 0], [6, 5, 0], [6, 0, 0]]},
        "boundary_condition": {"type": "Ground"}
      }
    ]
  }]
}"#;

/// A fresh study in a temporary directory
pub(crate) fn new_study() -> (TempDir, App) {
    let tmp = TempDir::new().unwrap();
    let app = App::with_data_dir(tmp.path().join("data")).unwrap();
    (tmp, app)
}

pub(crate) fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

pub(crate) fn selection(parameter: parastudy_core::Parameter, range: &str) -> Selection {
    Selection {
        parameter,
        range: range.parse::<RangeSpec>().unwrap(),
    }
}

pub(crate) fn set_status(service: &DirectoryJobService, job: &JobRef, status: &str) {
    fs::write(service.job_dir(job).join("status"), status).unwrap();
}

/// Write an EUI for every run and mark the job completed
pub(crate) fn complete_job(
    service: &DirectoryJobService,
    job: &JobRef,
    eui: impl Fn(usize) -> f64,
) {
    for (run_id, option_no) in service.runs(job).unwrap() {
        let path = service
            .job_dir(job)
            .join("runs")
            .join(run_id)
            .join("eui.json");
        fs::write(path, format!(r#"{{"eui": {}, "unit": "kWh/m2"}}"#, eui(option_no.0))).unwrap();
    }
    set_status(service, job, "Completed");
}
