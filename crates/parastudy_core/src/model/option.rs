//! Materialized design options.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{DesignCombination, OptionNo};

/// A design combination together with its generated model file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignOption {
    pub option_no: OptionNo,
    pub combination: DesignCombination,
    /// `Window to wall ratio:0.4, Louver count:2`
    pub label: String,
    /// `wwr_0.4__lc_2`
    pub file_stem: String,
    pub artifact: PathBuf,
}
