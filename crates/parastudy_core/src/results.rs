//! Job status, run results and joining them back onto design options.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{JoinError, ResultsError};
use crate::model::{DesignCombination, DesignOption, OptionNo, Parameter};

/// Simulation status as seen by the study
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimStatus {
    NotStarted,
    Incomplete,
    Complete,
    Failed,
    Cancelled,
}

impl SimStatus {
    /// Map a job status reported by the service.
    ///
    /// Created, pre-processing, running and unknown jobs are incomplete;
    /// anything that is neither failed nor cancelled counts as complete.
    pub fn from_job_status(status: &str) -> Self {
        let normalized: String = status
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "created" | "preprocessing" | "running" | "unknown" => SimStatus::Incomplete,
            "failed" => SimStatus::Failed,
            "cancelled" | "canceled" => SimStatus::Cancelled,
            _ => SimStatus::Complete,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SimStatus::NotStarted => "NOTSTARTED",
            SimStatus::Incomplete => "INCOMPLETE",
            SimStatus::Complete => "COMPLETE",
            SimStatus::Failed => "FAILED",
            SimStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for SimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// EUI of one run, keyed by the option number it was submitted with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub run_id: String,
    pub option_no: OptionNo,
    pub eui: f64,
}

/// Read the `eui` value from an `eui.json` document
pub fn extract_eui(json: &str) -> Result<f64, ResultsError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    value
        .get("eui")
        .and_then(serde_json::Value::as_f64)
        .ok_or(ResultsError::MissingEui)
}

/// [`extract_eui`] on a file
pub fn read_eui(path: &Path) -> Result<f64, ResultsError> {
    let text = fs::read_to_string(path).map_err(|source| ResultsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    extract_eui(&text)
}

/// A design option joined with its simulation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub option_no: OptionNo,
    pub run_id: String,
    pub eui: f64,
    pub combination: DesignCombination,
    pub artifact: PathBuf,
}

/// Join results onto design options by option number.
///
/// Every option must have exactly one result and every result must belong
/// to an option. Rows come back sorted by option number.
pub fn join_results(
    options: &[DesignOption],
    results: Vec<RunResult>,
) -> Result<Vec<ResultRow>, JoinError> {
    let by_no: FxHashMap<OptionNo, &DesignOption> =
        options.iter().map(|o| (o.option_no, o)).collect();

    let mut matched: FxHashMap<OptionNo, RunResult> = FxHashMap::default();
    for result in results {
        if !by_no.contains_key(&result.option_no) {
            return Err(JoinError::UnknownOption(result.option_no));
        }
        let option_no = result.option_no;
        if matched.insert(option_no, result).is_some() {
            return Err(JoinError::DuplicateResult(option_no));
        }
    }

    let mut rows = Vec::with_capacity(options.len());
    for option in options {
        let result = matched
            .remove(&option.option_no)
            .ok_or(JoinError::MissingResult(option.option_no))?;
        rows.push(ResultRow {
            option_no: option.option_no,
            run_id: result.run_id,
            eui: result.eui,
            combination: option.combination.clone(),
            artifact: option.artifact.clone(),
        });
    }
    rows.sort_by_key(|r| r.option_no);
    Ok(rows)
}

/// One axis of a parallel coordinates plot
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub label: String,
    pub values: Vec<f64>,
    pub range: Option<(f64, f64)>,
}

/// Joined results prepared for plotting
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, option_no: OptionNo) -> Option<&ResultRow> {
        self.rows.iter().find(|r| r.option_no == option_no)
    }

    /// Row with the lowest EUI
    pub fn best(&self) -> Option<&ResultRow> {
        self.rows.iter().min_by(|a, b| a.eui.total_cmp(&b.eui))
    }

    /// Option-no and EUI, then one axis per parameter present in the rows
    pub fn dimensions(&self) -> Vec<Dimension> {
        let mut dims = vec![
            Dimension {
                label: "Option-no".to_string(),
                values: self.rows.iter().map(|r| r.option_no.0 as f64).collect(),
                range: None,
            },
            Dimension {
                label: "EUI".to_string(),
                values: self.rows.iter().map(|r| r.eui).collect(),
                range: None,
            },
        ];

        let plotted = [
            Parameter::WindowToWallRatio,
            Parameter::LouverCount,
            Parameter::LouverDepth,
        ];
        for parameter in plotted {
            if !self.rows.iter().any(|r| r.combination.contains(parameter)) {
                continue;
            }
            let values = self
                .rows
                .iter()
                .map(|r| r.combination.get(parameter).unwrap_or(f64::NAN))
                .collect();
            let range = (parameter == Parameter::WindowToWallRatio).then_some((0.0, 1.0));
            dims.push(Dimension {
                label: parameter.plot_label().to_string(),
                values,
                range,
            });
        }
        dims
    }
}
