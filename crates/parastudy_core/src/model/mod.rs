//! Type definitions for parameter studies.

mod combination;
mod ids;
mod option;
mod parameters;

pub use combination::*;
pub use ids::*;
pub use option::*;
pub use parameters::*;
