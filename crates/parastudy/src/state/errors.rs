//! Error types for the wizard steps.

use std::fmt;
use std::path::PathBuf;

use parastudy_core::{
    InputError, JobUrlError, JoinError, MaterializeError, ModelError, OptionNo, ServiceError,
    SpaceError, SubmitError,
};

use crate::data::storage::StorageError;

/// The wizard steps, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Model,
    Parameters,
    Options,
    Submit,
    Results,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Model,
        Step::Parameters,
        Step::Options,
        Step::Submit,
        Step::Results,
    ];

    /// Subcommand that runs this step
    pub fn command(&self) -> &'static str {
        match self {
            Step::Model => "model",
            Step::Parameters => "params",
            Step::Options => "options",
            Step::Submit => "submit",
            Step::Results => "results",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Model => "Load model",
            Step::Parameters => "Select parameters",
            Step::Options => "Generate design options",
            Step::Submit => "Submit simulation",
            Step::Results => "Review results",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("{0} has not been done yet; go back and run `parastudy {cmd}`", cmd = .0.command())]
    MissingPrerequisite(Step),

    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("design option {0} does not exist")]
    NoSuchOption(OptionNo),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Space(#[from] SpaceError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Materialize(#[from] MaterializeError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    JobUrl(#[from] JobUrlError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Join(#[from] JoinError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
