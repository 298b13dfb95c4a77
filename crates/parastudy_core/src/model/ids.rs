//! Identifiers threaded through generation, submission and results
//!
//! Each identifier has its own type so that a run index is never mixed up
//! with an external run id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Run index of a design option (0-based, product-iteration order).
///
/// Carried as `option-no` through submission and result payloads.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OptionNo(pub usize);

impl fmt::Display for OptionNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a job on the external simulation service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
