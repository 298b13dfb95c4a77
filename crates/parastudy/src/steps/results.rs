use parastudy_core::{
    JobService, OptionNo, ResultKey, ResultRow, ResultTable, SimStatus, join_results,
};

use crate::app::App;
use crate::state::StepError;

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsOutcome {
    /// The job has not finished; nothing was downloaded
    Pending(SimStatus),
    /// The job service could not be reached or answered nonsense
    Unavailable(String),
    Ready {
        table: ResultTable,
        selected: Option<ResultRow>,
    },
}

/// Check the job and, once it is complete, join its results onto the
/// design options.
///
/// Results are downloaded at most once per job and status. Service errors
/// are reported in the outcome rather than retried.
pub fn fetch_results<S: JobService>(
    app: &mut App,
    service: &S,
    option: Option<OptionNo>,
) -> Result<ResultsOutcome, StepError> {
    let job = app.context.require_submission()?.job.clone();
    let options = app.context.require_options()?.options.clone();
    if let Some(no) = option
        && !options.iter().any(|o| o.option_no == no)
    {
        return Err(StepError::NoSuchOption(no));
    }

    let status = match service.status(&job) {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!(job_id = %job.id, error = %e, "Failed to query job status");
            return Ok(ResultsOutcome::Unavailable(e.to_string()));
        }
    };
    if status != SimStatus::Complete {
        return Ok(ResultsOutcome::Pending(status));
    }

    let key = ResultKey::new(job.id.clone(), status);
    let fetched = app.context.results.get_or_compute(key, || {
        tracing::info!(job_id = %job.id, "Downloading results");
        let runs = service.results(&job)?;
        Ok::<_, StepError>(ResultTable::new(join_results(&options, runs)?))
    });
    let table = match fetched {
        Ok(table) => table.clone(),
        Err(StepError::Service(e)) => {
            tracing::warn!(job_id = %job.id, error = %e, "Failed to download results");
            return Ok(ResultsOutcome::Unavailable(e.to_string()));
        }
        Err(e) => return Err(e),
    };
    app.save()?;

    let selected = option.and_then(|no| table.get(no).cloned());
    Ok(ResultsOutcome::Ready { table, selected })
}
