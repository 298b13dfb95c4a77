//! Integration tests for the parastudy core
//!
//! Tests are organized by topic:
//! - `space` - Range construction and parameter space expansion
//! - `naming` - Labels and file names
//! - `materialize` - Design option generation and output directory handling
//! - `submission` - Job requests and job URLs
//! - `results` - Status mapping and joining results by option number

mod materialize;

use serde_json::json;

use crate::building::HbModel;
use crate::model::{DesignCombination, Parameter, ParameterDefinition};
use crate::space::ParameterSpace;

/// One room: an exterior south wall with a window, a roof with a skylight,
/// an adiabatic wall with an opening and a ground floor.
pub(crate) fn sample_model() -> HbModel {
    HbModel::from_value(json!({
        "type": "Model",
        "identifier": "Sample_Box",
        "units": "Meters",
        "rooms": [{
            "type": "Room",
            "identifier": "Room_1",
            "faces": [
                {
                    "type": "Face",
                    "identifier": "Room_1_South",
                    "face_type": "Wall",
                    "geometry": {
                        "type": "Face3D",
                        "boundary": [[0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [4.0, 0.0, 3.0], [0.0, 0.0, 3.0]]
                    },
                    "boundary_condition": { "type": "Outdoors" },
                    "apertures": [{
                        "type": "Aperture",
                        "identifier": "Room_1_South_Win",
                        "geometry": {
                            "type": "Face3D",
                            "boundary": [[1.0, 0.0, 1.0], [3.0, 0.0, 1.0], [3.0, 0.0, 2.0], [1.0, 0.0, 2.0]]
                        },
                        "boundary_condition": { "type": "Outdoors" }
                    }]
                },
                {
                    "type": "Face",
                    "identifier": "Room_1_Roof",
                    "face_type": "RoofCeiling",
                    "geometry": {
                        "type": "Face3D",
                        "boundary": [[0.0, 0.0, 3.0], [4.0, 0.0, 3.0], [4.0, 4.0, 3.0], [0.0, 4.0, 3.0]]
                    },
                    "boundary_condition": { "type": "Outdoors" },
                    "apertures": [{
                        "type": "Aperture",
                        "identifier": "Room_1_Skylight",
                        "geometry": {
                            "type": "Face3D",
                            "boundary": [[1.0, 1.0, 3.0], [2.0, 1.0, 3.0], [2.0, 2.0, 3.0], [1.0, 2.0, 3.0]]
                        },
                        "boundary_condition": { "type": "Outdoors" }
                    }]
                },
                {
                    "type": "Face",
                    "identifier": "Room_1_West",
                    "face_type": "Wall",
                    "geometry": {
                        "type": "Face3D",
                        "boundary": [[0.0, 4.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 3.0], [0.0, 4.0, 3.0]]
                    },
                    "boundary_condition": { "type": "Adiabatic" },
                    "apertures": [{
                        "type": "Aperture",
                        "identifier": "Room_1_West_Opening",
                        "geometry": {
                            "type": "Face3D",
                            "boundary": [[0.0, 3.0, 0.5], [0.0, 1.0, 0.5], [0.0, 1.0, 2.5], [0.0, 3.0, 2.5]]
                        },
                        "boundary_condition": { "type": "Adiabatic" }
                    }]
                },
                {
                    "type": "Face",
                    "identifier": "Room_1_Floor",
                    "face_type": "Floor",
                    "geometry": {
                        "type": "Face3D",
                        "boundary": [[0.0, 0.0, 0.0], [0.0, 4.0, 0.0], [4.0, 4.0, 0.0], [4.0, 0.0, 0.0]]
                    },
                    "boundary_condition": { "type": "Ground" }
                }
            ]
        }]
    }))
    .unwrap()
}

/// Window to wall ratio and louver count from explicit values
pub(crate) fn wwr_lc_space(wwr: &[f64], lc: &[f64]) -> ParameterSpace {
    ParameterSpace::new()
        .with(ParameterDefinition::new(Parameter::WindowToWallRatio, wwr.to_vec()).unwrap())
        .unwrap()
        .with(ParameterDefinition::new(Parameter::LouverCount, lc.to_vec()).unwrap())
        .unwrap()
}

pub(crate) fn single(parameter: Parameter, value: f64) -> DesignCombination {
    DesignCombination::from_pairs(vec![(parameter, value)])
}
