//! Building models that design options are generated from.
//!
//! The study only needs a model it can copy, mutate per parameter and write
//! to disk; [`DesignModel`] captures exactly that. [`HbModel`] implements it
//! for HBJSON documents.

pub mod geometry;
mod hbjson;

use std::path::Path;

use crate::error::ModelError;

pub use hbjson::HbModel;

/// A building model that can be varied per design combination.
///
/// `Clone` must produce an independent deep copy: each design option starts
/// from a fresh clone of the base model.
pub trait DesignModel: Clone {
    /// File extension of serialized models, without the dot
    fn extension(&self) -> &'static str;

    /// Replace the openings of every exterior face so that glazing covers
    /// `ratio` of the face area.
    fn set_window_to_wall_ratio(&mut self, ratio: f64) -> Result<(), ModelError>;

    /// Add `count` horizontal louvers of `depth` meters to every opening.
    fn add_louvers(&mut self, count: u32, depth: f64) -> Result<(), ModelError>;

    /// Serialize the model to `path`
    fn write(&self, path: &Path) -> Result<(), ModelError>;
}
