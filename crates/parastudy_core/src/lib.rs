//! Parametric building design studies
//!
//! This crate turns a selection of design parameter ranges into a set of
//! named building model variants and joins simulation results back onto them.
//! It supports:
//! - Range construction without floating-point drift
//! - Cartesian expansion of the selected parameters into design combinations
//! - Canonical labels and file names per combination
//! - One mutated model copy per combination, written atomically as a set
//! - Job requests that carry an explicit `option-no` per run
//! - Joining results by `option-no` and preparing them for plotting
//!
//! ```ignore
//! use parastudy_core::{
//!     AbbreviationTable, HbModel, Materializer, Parameter, ParameterDefinition,
//!     ParameterSpace, RangeSpec,
//! };
//!
//! let mut space = ParameterSpace::new();
//! space.insert(ParameterDefinition::from_range(
//!     Parameter::WindowToWallRatio,
//!     &RangeSpec::new(40.0, 80.0, 10.0),
//! )?)?;
//! let combinations = space.expand()?;
//!
//! let base = HbModel::from_path("model.hbjson".as_ref())?;
//! let table = AbbreviationTable::standard();
//! let report = Materializer::new(&base, &table).materialize(&combinations, out_dir)?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod building;
pub mod cache;
pub mod error;
pub mod materialize;
pub mod naming;
pub mod range;
pub mod results;
pub mod space;
pub mod submission;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use building::{DesignModel, HbModel};
pub use cache::{CachedResults, ResultKey};
pub use error::{
    ConsistencyError, InputError, JobUrlError, JoinError, MaterializeError, ModelError,
    ResultsError, ServiceError, SpaceError, SubmitError,
};
pub use materialize::{
    LouverDefaults, MaterializeReport, Materializer, OptionFailure, apply_combination,
};
pub use model::{
    AbbreviationTable, DesignCombination, DesignOption, JobId, OptionNo, Parameter,
    ParameterDefinition, ValueKind,
};
pub use naming::{design_label, file_stem};
pub use range::{RangeSpec, range_values};
pub use results::{
    Dimension, ResultRow, ResultTable, RunResult, SimStatus, extract_eui, join_results,
    read_eui,
};
pub use space::ParameterSpace;
pub use submission::{
    DEFAULT_VIZ_VARIABLES, JobArgument, JobRef, JobRequest, JobService, RecipeRef,
    SimulationInputs, build_job_request,
};
