use std::path::PathBuf;

use jiff::Timestamp;
use parastudy_core::{JobRef, JobService, SimulationInputs, build_job_request};

use crate::app::App;
use crate::state::{StepError, SubmissionState};

#[derive(Debug, Clone)]
pub struct SubmitArgs {
    pub owner: String,
    pub project: String,
    pub epw: PathBuf,
    pub ddy: PathBuf,
}

/// Submit every design option as one job.
pub fn submit<S: JobService>(
    app: &mut App,
    service: &mut S,
    args: &SubmitArgs,
) -> Result<SubmissionState, StepError> {
    let options = &app.context.require_options()?.options;
    for path in [&args.epw, &args.ddy] {
        if !path.is_file() {
            return Err(StepError::MissingFile(path.clone()));
        }
    }

    let inputs = SimulationInputs {
        epw: args.epw.clone(),
        ddy: args.ddy.clone(),
        viz_variables: app.config.viz_variables.clone(),
    };
    let request = build_job_request(
        options,
        &inputs,
        &args.owner,
        &args.project,
        app.config.recipe.clone(),
    )?;
    let job = service.submit(&request)?;

    let submission = SubmissionState {
        url: job.to_url(&app.config.job_service.base_url),
        job,
        inputs: Some(inputs),
        option_count: request.arguments.len(),
        submitted_at: Timestamp::now(),
    };
    app.context.set_submission(submission.clone());
    app.save()?;

    tracing::info!(url = %submission.url, "Job submitted");
    Ok(submission)
}

/// Follow a job that was submitted earlier, given its URL.
pub fn attach_job(app: &mut App, url: &str) -> Result<SubmissionState, StepError> {
    let option_count = app.context.require_options()?.options.len();
    let job = JobRef::from_url(url)?;

    let submission = SubmissionState {
        url: job.to_url(&app.config.job_service.base_url),
        job,
        inputs: None,
        option_count,
        submitted_at: Timestamp::now(),
    };
    app.context.set_submission(submission.clone());
    app.save()?;

    tracing::info!(url = %submission.url, "Attached to job");
    Ok(submission)
}
