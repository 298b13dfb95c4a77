//! Error types, one enum per concern.
//!
//! User-input problems ([`InputError`]) are reported back to the user and stop
//! the current step. Internal invariant violations ([`ConsistencyError`]) mean
//! a bug in this crate and must never be swallowed.

use std::io;
use std::path::PathBuf;

use crate::model::{OptionNo, Parameter};

/// Problems with what the user asked for
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{parameter}: minimum {min} must not be larger than maximum {max}")]
    InvertedRange {
        parameter: String,
        min: f64,
        max: f64,
    },

    #[error("{parameter}: increment must be positive (got {step})")]
    NonPositiveStep { parameter: String, step: f64 },

    #[error("{parameter}: range bounds must be finite numbers")]
    NonFiniteRange { parameter: String },

    #[error("{parameter}: values allow at most {decimals} decimal places")]
    TooPrecise { parameter: String, decimals: u32 },

    #[error("{parameter}: range has more than {limit} values")]
    TooManyValues { parameter: String, limit: usize },

    #[error("invalid range {0:?}, expected min:max:step")]
    MalformedRange(String),

    #[error("{0} has no values")]
    EmptyValues(Parameter),

    #[error("{0} was selected more than once")]
    DuplicateParameter(Parameter),

    #[error("abbreviation {0:?} is used by more than one parameter")]
    DuplicateAbbreviation(String),

    #[error("{0} is not in the abbreviation table")]
    MissingAbbreviation(Parameter),

    #[error("changing {0} is not supported yet")]
    UnsupportedParameter(Parameter),

    #[error("unknown parameter {0:?}")]
    UnknownParameter(String),

    #[error("no parameters selected")]
    NoParametersSelected,
}

/// Internal invariant violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsistencyError {
    #[error("calculating design combinations failed: expected {expected}, produced {actual}")]
    CombinationCount { expected: usize, actual: usize },
}

/// Errors from [`crate::ParameterSpace::expand`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpaceError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}

/// Errors raised while loading, mutating or writing a building model
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("window to wall ratio must be at least 0 and below 1 (got {0})")]
    InvalidRatio(f64),

    #[error("louvers need a count of at least 1 and a positive depth (got {count} x {depth})")]
    InvalidLouvers { count: u32, depth: f64 },

    #[error("malformed model: {0}")]
    Malformed(String),

    #[error("failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Fatal errors of a materialization pass
#[derive(Debug, thiserror::Error)]
pub enum MaterializeError {
    #[error("failed to prepare output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write design option {option_no}: {source}")]
    Write {
        option_no: OptionNo,
        #[source]
        source: ModelError,
    },

    #[error("two design options share the file name {0:?}")]
    DuplicateFileName(String),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("{failed} of {total} design options could not be generated")]
    Incomplete { failed: usize, total: usize },
}

/// Errors while assembling a job request
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error("account name is required")]
    MissingOwner,

    #[error("project name is required")]
    MissingProject,

    #[error("there are no design options to submit")]
    NoOptions,

    #[error("design option numbers must run from 0 to {expected_last} without gaps (found {found})")]
    OptionSequence { expected_last: usize, found: OptionNo },
}

/// Errors parsing a job URL
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobUrlError {
    #[error("not a job URL: {0:?}")]
    Malformed(String),
}

/// Errors reading run results
#[derive(Debug, thiserror::Error)]
pub enum ResultsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse results: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("result has no numeric \"eui\" field")]
    MissingEui,
}

/// Errors joining results back onto design options
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JoinError {
    #[error("result for option {0} does not match any submitted design option")]
    UnknownOption(OptionNo),

    #[error("more than one result for option {0}")]
    DuplicateResult(OptionNo),

    #[error("no result for option {0}")]
    MissingResult(OptionNo),
}

/// Errors reported by a [`crate::JobService`]
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("job {0} not found")]
    JobNotFound(String),

    #[error("job service I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("job service returned invalid data: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Results(#[from] ResultsError),
}
