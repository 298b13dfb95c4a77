//! Job requests for the external simulation service.
//!
//! The service itself lives behind [`JobService`]; this module only builds
//! the ordered argument list, one record per design option, each carrying
//! its `option-no` so results can be joined back regardless of the order the
//! service returns them in.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{JobUrlError, ServiceError, SubmitError};
use crate::model::{DesignOption, JobId, OptionNo};
use crate::results::{RunResult, SimStatus};

pub const DEFAULT_VIZ_VARIABLES: &str = "-v \"Zone Mean Radiant Temperature\"";

/// Recipe the job runs, e.g. `ladybug-tools/annual-energy-use:latest`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRef {
    pub owner: String,
    pub name: String,
    pub tag: String,
}

impl Default for RecipeRef {
    fn default() -> Self {
        Self {
            owner: "ladybug-tools".to_string(),
            name: "annual-energy-use".to_string(),
            tag: "latest".to_string(),
        }
    }
}

impl fmt::Display for RecipeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.owner, self.name, self.tag)
    }
}

/// Inputs shared by every run of a study
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInputs {
    pub epw: PathBuf,
    pub ddy: PathBuf,
    pub viz_variables: String,
}

impl SimulationInputs {
    pub fn new(epw: PathBuf, ddy: PathBuf) -> Self {
        Self {
            epw,
            ddy,
            viz_variables: DEFAULT_VIZ_VARIABLES.to_string(),
        }
    }
}

/// Arguments of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobArgument {
    pub model: PathBuf,
    pub epw: PathBuf,
    pub ddy: PathBuf,
    #[serde(rename = "viz-variables")]
    pub viz_variables: String,
    #[serde(rename = "option-no")]
    pub option_no: OptionNo,
    /// Parameter values keyed by argument name (`window-to-wall-ratio`, ...)
    #[serde(flatten)]
    pub parameters: BTreeMap<String, serde_json::Value>,
}

/// Everything the job service needs to create a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    pub owner: String,
    pub project: String,
    pub recipe: RecipeRef,
    pub arguments: Vec<JobArgument>,
}

/// Build a job request with one argument record per design option.
///
/// Option numbers must form exactly `0..N-1`; arguments are emitted in
/// option-number order.
pub fn build_job_request(
    options: &[DesignOption],
    inputs: &SimulationInputs,
    owner: &str,
    project: &str,
    recipe: RecipeRef,
) -> Result<JobRequest, SubmitError> {
    if owner.trim().is_empty() {
        return Err(SubmitError::MissingOwner);
    }
    if project.trim().is_empty() {
        return Err(SubmitError::MissingProject);
    }
    if options.is_empty() {
        return Err(SubmitError::NoOptions);
    }

    let mut ordered: Vec<&DesignOption> = options.iter().collect();
    ordered.sort_by_key(|o| o.option_no);
    for (expected, option) in ordered.iter().enumerate() {
        if option.option_no != OptionNo(expected) {
            return Err(SubmitError::OptionSequence {
                expected_last: options.len() - 1,
                found: option.option_no,
            });
        }
    }

    let arguments = ordered
        .into_iter()
        .map(|option| JobArgument {
            model: option.artifact.clone(),
            epw: inputs.epw.clone(),
            ddy: inputs.ddy.clone(),
            viz_variables: inputs.viz_variables.clone(),
            option_no: option.option_no,
            parameters: option
                .combination
                .iter()
                .map(|(p, v)| (p.argument_name().to_string(), p.argument_value(v)))
                .collect(),
        })
        .collect();

    Ok(JobRequest {
        owner: owner.trim().to_string(),
        project: project.trim().to_string(),
        recipe,
        arguments,
    })
}

/// Address of a submitted job
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobRef {
    pub owner: String,
    pub project: String,
    pub id: JobId,
}

impl JobRef {
    /// `<base>/<owner>/projects/<project>/jobs/<id>`
    pub fn to_url(&self, base_url: &str) -> String {
        format!(
            "{}/{}/projects/{}/jobs/{}",
            base_url.trim_end_matches('/'),
            self.owner,
            self.project,
            self.id
        )
    }

    pub fn from_url(url: &str) -> Result<Self, JobUrlError> {
        url.parse()
    }
}

impl FromStr for JobRef {
    type Err = JobUrlError;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = url.trim().trim_end_matches('/').split('/').collect();
        match segments.as_slice() {
            [.., owner, "projects", project, "jobs", id]
                if !owner.is_empty() && !project.is_empty() && !id.is_empty() =>
            {
                Ok(JobRef {
                    owner: owner.to_string(),
                    project: project.to_string(),
                    id: JobId(id.to_string()),
                })
            }
            _ => Err(JobUrlError::Malformed(url.to_string())),
        }
    }
}

/// The external simulation job service
pub trait JobService {
    /// Create a job running every argument of the request
    fn submit(&mut self, request: &JobRequest) -> Result<JobRef, ServiceError>;

    /// Current status of a job
    fn status(&self, job: &JobRef) -> Result<SimStatus, ServiceError>;

    /// Results of every run of a completed job, in no particular order
    fn results(&self, job: &JobRef) -> Result<Vec<RunResult>, ServiceError>;
}
