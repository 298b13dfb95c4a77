//! Design option generation tests

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use crate::building::{DesignModel, HbModel};
use crate::error::{InputError, MaterializeError, ModelError};
use crate::materialize::{LouverDefaults, Materializer, apply_combination};
use crate::model::{AbbreviationTable, OptionNo, Parameter, ParameterDefinition};
use crate::space::ParameterSpace;

use super::{sample_model, single, wwr_lc_space};

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn staging_of(dir: &Path) -> PathBuf {
    dir.with_file_name("design_options.staging")
}

#[test]
fn test_example_options_written_in_order() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("design_options");
    let base = sample_model();
    let table = AbbreviationTable::standard();
    let combos = wwr_lc_space(&[0.4, 0.5], &[0.0, 2.0]).expand().unwrap();

    let report = Materializer::new(&base, &table)
        .materialize(&combos, &out)
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(report.total(), 4);
    let numbers: Vec<OptionNo> = report.options.iter().map(|o| o.option_no).collect();
    assert_eq!(numbers, (0..4).map(OptionNo).collect::<Vec<_>>());

    assert_eq!(
        file_names(&out),
        vec![
            "wwr_0.4__lc_0.hbjson",
            "wwr_0.4__lc_2.hbjson",
            "wwr_0.5__lc_0.hbjson",
            "wwr_0.5__lc_2.hbjson",
        ]
    );
    assert_eq!(report.options[1].artifact, out.join("wwr_0.4__lc_2.hbjson"));
    assert_eq!(
        report.options[1].label,
        "Window to wall ratio:0.4, Louver count:2"
    );
    assert!(!staging_of(&out).exists());
}

#[test]
fn test_each_option_starts_from_fresh_base() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("design_options");
    let base = sample_model();
    let table = AbbreviationTable::standard();
    let combos = wwr_lc_space(&[0.4, 0.5], &[0.0, 2.0]).expand().unwrap();

    let report = Materializer::new(&base, &table)
        .with_louver_defaults(LouverDefaults {
            count: 1,
            depth: 0.3,
        })
        .materialize(&combos, &out)
        .unwrap();

    let louvers: Vec<usize> = report
        .options
        .iter()
        .map(|o| HbModel::from_path(&o.artifact).unwrap().louver_count())
        .collect();
    // Only the south window is vertical, so two louvers per louvered option
    assert_eq!(louvers, vec![0, 2, 0, 2]);

    // The base model itself is never touched
    assert_eq!(base, sample_model());
    assert_eq!(base.louver_count(), 0);
}

#[test]
fn test_regeneration_replaces_previous_pass() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("design_options");
    let base = sample_model();
    let table = AbbreviationTable::standard();

    let first = wwr_lc_space(&[0.3, 0.4, 0.5], &[1.0]).expand().unwrap();
    Materializer::new(&base, &table)
        .materialize(&first, &out)
        .unwrap();
    assert_eq!(file_names(&out).len(), 3);

    let second = wwr_lc_space(&[0.6, 0.7], &[2.0]).expand().unwrap();
    let pass_a = Materializer::new(&base, &table)
        .materialize(&second, &out)
        .unwrap();
    let names_a = file_names(&out);
    assert_eq!(
        names_a,
        vec!["wwr_0.6__lc_2.hbjson", "wwr_0.7__lc_2.hbjson"]
    );

    let pass_b = Materializer::new(&base, &table)
        .materialize(&second, &out)
        .unwrap();
    assert_eq!(file_names(&out), names_a);
    let stems_a: Vec<&str> = pass_a.options.iter().map(|o| o.file_stem.as_str()).collect();
    let stems_b: Vec<&str> = pass_b.options.iter().map(|o| o.file_stem.as_str()).collect();
    assert_eq!(stems_a, stems_b);
}

#[test]
fn test_swap_leaves_only_the_new_output() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("design_options");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("old.hbjson"), "{}").unwrap();
    // Left behind by an interrupted earlier pass
    let stale = tmp.path().join("design_options.previous");
    fs::create_dir_all(&stale).unwrap();
    fs::write(stale.join("stale.hbjson"), "{}").unwrap();

    let base = sample_model();
    let table = AbbreviationTable::standard();
    let combinations = wwr_lc_space(&[0.4], &[1.0]).expand().unwrap();
    Materializer::new(&base, &table)
        .materialize(&combinations, &out)
        .unwrap();

    assert_eq!(file_names(&out), vec!["wwr_0.4__lc_1.hbjson"]);
    assert_eq!(file_names(tmp.path()), vec!["design_options"]);
}

#[test]
fn test_invalid_ratio_is_reported_per_option() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("design_options");
    let base = sample_model();
    let table = AbbreviationTable::standard();

    let range = "90:100:10".parse().unwrap();
    let space = ParameterSpace::new()
        .with(ParameterDefinition::from_range(Parameter::WindowToWallRatio, &range).unwrap())
        .unwrap();
    let combos = space.expand().unwrap();

    let report = Materializer::new(&base, &table)
        .materialize(&combos, &out)
        .unwrap();

    assert_eq!(report.options.len(), 1);
    assert_eq!(report.options[0].option_no, OptionNo(0));
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].option_no, OptionNo(1));
    assert_eq!(report.failures[0].label, "Window to wall ratio:1.0");
    assert_eq!(file_names(&out), vec!["wwr_0.9.hbjson"]);

    let err = report.into_options().unwrap_err();
    assert!(matches!(
        err,
        MaterializeError::Incomplete {
            failed: 1,
            total: 2
        }
    ));
}

#[test]
fn test_naming_error_leaves_file_system_alone() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("design_options");
    let base = sample_model();
    let table = AbbreviationTable::new([(Parameter::WindowToWallRatio, "wwr")]).unwrap();
    let combos = wwr_lc_space(&[0.4], &[1.0]).expand().unwrap();

    let err = Materializer::new(&base, &table)
        .materialize(&combos, &out)
        .unwrap_err();
    assert!(matches!(
        err,
        MaterializeError::Input(InputError::MissingAbbreviation(Parameter::LouverCount))
    ));
    assert!(!out.exists());
    assert!(!staging_of(&out).exists());
}

/// Model double whose serialization fails for one ratio
#[derive(Debug, Clone)]
struct FlakyModel {
    ratio: Option<f64>,
    fail_at: f64,
}

impl DesignModel for FlakyModel {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn set_window_to_wall_ratio(&mut self, ratio: f64) -> Result<(), ModelError> {
        self.ratio = Some(ratio);
        Ok(())
    }

    fn add_louvers(&mut self, _count: u32, _depth: f64) -> Result<(), ModelError> {
        Ok(())
    }

    fn write(&self, path: &Path) -> Result<(), ModelError> {
        if self.ratio == Some(self.fail_at) {
            return Err(ModelError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other("disk full"),
            });
        }
        fs::write(path, format!("{:?}", self.ratio)).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[test]
fn test_write_failure_preserves_previous_output() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("design_options");
    let table = AbbreviationTable::standard();
    let base = FlakyModel {
        ratio: None,
        fail_at: 0.5,
    };

    let first = ParameterSpace::new()
        .with(ParameterDefinition::new(Parameter::WindowToWallRatio, vec![0.1, 0.2]).unwrap())
        .unwrap()
        .expand()
        .unwrap();
    Materializer::new(&base, &table)
        .materialize(&first, &out)
        .unwrap();
    let before = file_names(&out);

    let second = ParameterSpace::new()
        .with(ParameterDefinition::new(Parameter::WindowToWallRatio, vec![0.4, 0.5, 0.6]).unwrap())
        .unwrap()
        .expand()
        .unwrap();
    let err = Materializer::new(&base, &table)
        .materialize(&second, &out)
        .unwrap_err();

    assert!(matches!(
        err,
        MaterializeError::Write {
            option_no: OptionNo(1),
            ..
        }
    ));
    assert_eq!(file_names(&out), before);
    assert!(!staging_of(&out).exists());
}

#[test]
fn test_single_louver_parameter_uses_defaults() {
    let defaults = LouverDefaults {
        count: 3,
        depth: 0.25,
    };

    let mut model = sample_model();
    apply_combination(&mut model, &single(Parameter::LouverDepth, 0.5), defaults).unwrap();
    assert_eq!(model.louver_count(), 3);

    let mut model = sample_model();
    apply_combination(&mut model, &single(Parameter::LouverCount, 2.0), defaults).unwrap();
    assert_eq!(model.louver_count(), 2);

    let mut model = sample_model();
    apply_combination(&mut model, &single(Parameter::LouverDepth, 0.0), defaults).unwrap();
    assert_eq!(model.louver_count(), 0);
}

#[test]
fn test_window_ratio_replaces_exterior_apertures() {
    let mut model = sample_model();
    assert_eq!(model.exterior_faces_with_apertures(), 2);

    model.set_window_to_wall_ratio(0.4).unwrap();
    assert_eq!(model.aperture_count(), 3);
    let south = &model.as_value()["rooms"][0]["faces"][0]["apertures"];
    assert_eq!(south[0]["identifier"], "Room_1_South_Glz0");

    // Adiabatic opening is left as is
    let west = &model.as_value()["rooms"][0]["faces"][2]["apertures"];
    assert_eq!(west[0]["identifier"], "Room_1_West_Opening");

    model.set_window_to_wall_ratio(0.0).unwrap();
    assert_eq!(model.aperture_count(), 1);
    assert_eq!(model.exterior_faces_with_apertures(), 0);
}

#[test]
fn test_window_ratio_scales_area() {
    use crate::building::geometry::{Point, polygon_area};

    let mut model = sample_model();
    model.set_window_to_wall_ratio(0.4).unwrap();
    let boundary = model.as_value()["rooms"][0]["faces"][0]["apertures"][0]["geometry"]["boundary"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| {
            let c: Vec<f64> = v.as_array().unwrap().iter().map(|x| x.as_f64().unwrap()).collect();
            Point::new(c[0], c[1], c[2])
        })
        .collect::<Vec<_>>();
    assert!((polygon_area(&boundary) - 4.8).abs() < 1e-9);
}

#[test]
fn test_invalid_model_operations() {
    let mut model = sample_model();
    assert!(matches!(
        model.set_window_to_wall_ratio(1.0),
        Err(ModelError::InvalidRatio(_))
    ));
    assert!(matches!(
        model.add_louvers(0, 0.5),
        Err(ModelError::InvalidLouvers { .. })
    ));
    assert!(matches!(
        model.add_louvers(2, -1.0),
        Err(ModelError::InvalidLouvers { .. })
    ));
    assert!(matches!(
        "{\"type\": \"Room\"}".parse::<HbModel>(),
        Err(ModelError::Malformed(_))
    ));
    assert!(matches!(
        "not json".parse::<HbModel>(),
        Err(ModelError::Parse(_))
    ));
}

#[test]
fn test_louvers_project_outward() {
    let mut model = sample_model();
    model.add_louvers(2, 0.5).unwrap();
    let shades = &model.as_value()["rooms"][0]["faces"][0]["apertures"][0]["outdoor_shades"];
    assert_eq!(shades.as_array().unwrap().len(), 2);
    assert_eq!(shades[0]["identifier"], "Room_1_South_Win_Louver0");

    // South wall faces -y; top louver sits at the window head
    let boundary = shades[0]["geometry"]["boundary"].as_array().unwrap();
    assert_eq!(boundary[0][2].as_f64().unwrap(), 2.0);
    assert!((boundary[2][1].as_f64().unwrap() + 0.5).abs() < 1e-9);
}
