//! The wizard steps.
//!
//! Each step checks its prerequisites in the study context, does its work and
//! saves the context only when it succeeded.

mod model;
mod options;
mod parameters;
mod results;
mod submit;

pub use model::{ModelSummary, load_model};
pub use options::generate_options;
pub use parameters::{ParametersSummary, select_parameters};
pub use results::{ResultsOutcome, fetch_results};
pub use submit::{SubmitArgs, attach_job, submit};
