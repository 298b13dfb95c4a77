//! Filesystem-backed job service.
//!
//! Layout under the service root:
//! <owner>/<project>/<job-id>/
//!   job.json              # The submitted request
//!   status                # Job status as reported by the runner, e.g. "Running"
//!   runs/<run-id>/
//!     inputs.json         # Arguments of the run, including `option-no`
//!     eui.json            # Written by the runner when the run completes
//!
//! Submitting creates the job and one run directory per argument. An external
//! runner picks the job up, updates `status` and writes `eui.json` per run.

use std::fs;
use std::path::{Path, PathBuf};

use parastudy_core::{
    JobArgument, JobId, JobRef, JobRequest, JobService, OptionNo, RunResult, ServiceError,
    SimStatus, read_eui,
};
use uuid::Uuid;

const STATUS_FILE: &str = "status";
const RUNS_DIR: &str = "runs";

pub struct DirectoryJobService {
    root: PathBuf,
}

impl DirectoryJobService {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn job_dir(&self, job: &JobRef) -> PathBuf {
        self.root
            .join(&job.owner)
            .join(&job.project)
            .join(&job.id.0)
    }

    /// Existing job directory, or `JobNotFound`
    fn existing_job_dir(&self, job: &JobRef) -> Result<PathBuf, ServiceError> {
        let dir = self.job_dir(job);
        if !dir.is_dir() {
            return Err(ServiceError::JobNotFound(job.id.to_string()));
        }
        Ok(dir)
    }

    /// Run ids of a job with the option number each run was submitted with
    pub fn runs(&self, job: &JobRef) -> Result<Vec<(String, OptionNo)>, ServiceError> {
        let runs_dir = self.existing_job_dir(job)?.join(RUNS_DIR);
        let entries = fs::read_dir(&runs_dir).map_err(|source| io_err(&runs_dir, source))?;

        let mut runs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| io_err(&runs_dir, source))?;
            let run_dir = entry.path();
            if !run_dir.is_dir() {
                continue;
            }
            let run_id = entry.file_name().to_string_lossy().into_owned();
            let argument: JobArgument = read_json(&run_dir.join("inputs.json"))?;
            runs.push((run_id, argument.option_no));
        }
        runs.sort_by_key(|(_, option_no)| *option_no);
        Ok(runs)
    }
}

impl JobService for DirectoryJobService {
    fn submit(&mut self, request: &JobRequest) -> Result<JobRef, ServiceError> {
        let job = JobRef {
            owner: request.owner.clone(),
            project: request.project.clone(),
            id: JobId(Uuid::new_v4().to_string()),
        };
        let job_dir = self.job_dir(&job);
        let runs_dir = job_dir.join(RUNS_DIR);
        fs::create_dir_all(&runs_dir).map_err(|source| io_err(&runs_dir, source))?;

        write_json(&job_dir.join("job.json"), request)?;
        for argument in &request.arguments {
            let run_dir = runs_dir.join(Uuid::new_v4().to_string());
            fs::create_dir_all(&run_dir).map_err(|source| io_err(&run_dir, source))?;
            write_json(&run_dir.join("inputs.json"), argument)?;
        }
        let status_path = job_dir.join(STATUS_FILE);
        fs::write(&status_path, "Created\n").map_err(|source| io_err(&status_path, source))?;

        tracing::info!(
            job_id = %job.id,
            runs = request.arguments.len(),
            recipe = %request.recipe,
            "Submitted job"
        );
        Ok(job)
    }

    fn status(&self, job: &JobRef) -> Result<SimStatus, ServiceError> {
        let status_path = self.existing_job_dir(job)?.join(STATUS_FILE);
        let text =
            fs::read_to_string(&status_path).map_err(|source| io_err(&status_path, source))?;
        let status = SimStatus::from_job_status(text.trim());
        tracing::debug!(job_id = %job.id, reported = text.trim(), %status, "Queried job status");
        Ok(status)
    }

    fn results(&self, job: &JobRef) -> Result<Vec<RunResult>, ServiceError> {
        let runs_dir = self.existing_job_dir(job)?.join(RUNS_DIR);
        self.runs(job)?
            .into_iter()
            .map(|(run_id, option_no)| -> Result<RunResult, ServiceError> {
                let eui = read_eui(&runs_dir.join(&run_id).join("eui.json"))?;
                Ok(RunResult {
                    run_id,
                    option_no,
                    eui,
                })
            })
            .collect()
    }
}

fn io_err(path: &Path, source: std::io::Error) -> ServiceError {
    ServiceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), ServiceError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;
    fs::write(path, text).map_err(|source| io_err(path, source))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ServiceError> {
    let text = fs::read_to_string(path).map_err(|source| io_err(path, source))?;
    serde_json::from_str(&text)
        .map_err(|e| ServiceError::InvalidResponse(format!("{}: {}", path.display(), e)))
}
