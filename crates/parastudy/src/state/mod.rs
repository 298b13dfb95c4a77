mod context;
mod errors;

pub use context::{
    ModelState, OptionsState, ParametersState, Selection, StudyContext, SubmissionState,
};
pub use errors::{Step, StepError};
