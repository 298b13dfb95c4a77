//! Command line wizard for parametric building design studies
//!
//! The study lives in a data directory: a base model, the selected parameter
//! ranges, the generated design options, the submitted job and its results.
//! Each subcommand is one wizard step operating on that shared context.

pub mod app;
pub mod config;
pub mod data;
pub mod logging;
pub mod service;
pub mod state;
pub mod steps;
pub mod util;

#[cfg(test)]
mod tests;

pub use app::App;
pub use config::StudyConfig;
pub use logging::init_logging;
pub use service::DirectoryJobService;
