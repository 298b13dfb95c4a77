//! Generation of one model file per design combination.
//!
//! A pass writes into a staging directory next to the output directory and
//! swaps it in only when every file was written, so the output directory
//! holds exactly one pass's files. A fatal error leaves the previous output
//! untouched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::building::DesignModel;
use crate::error::{MaterializeError, ModelError};
use crate::model::{AbbreviationTable, DesignCombination, DesignOption, OptionNo, Parameter};
use crate::naming::{design_label, file_stem};

/// Louver settings used when only one of the louver parameters is active
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LouverDefaults {
    pub count: u32,
    pub depth: f64,
}

impl Default for LouverDefaults {
    fn default() -> Self {
        Self {
            count: 1,
            depth: 0.5,
        }
    }
}

/// Apply every active parameter of a combination to a model.
///
/// A louver count or depth of zero means no louvers.
pub fn apply_combination<M: DesignModel>(
    model: &mut M,
    combination: &DesignCombination,
    defaults: LouverDefaults,
) -> Result<(), ModelError> {
    if let Some(ratio) = combination.get(Parameter::WindowToWallRatio) {
        model.set_window_to_wall_ratio(ratio)?;
    }

    let count = combination.get(Parameter::LouverCount);
    let depth = combination.get(Parameter::LouverDepth);
    if count.is_none() && depth.is_none() {
        return Ok(());
    }

    let depth = depth.unwrap_or(defaults.depth);
    let count = match count {
        Some(c) if c < 0.0 => {
            return Err(ModelError::InvalidLouvers { count: 0, depth });
        }
        Some(c) => c.round() as u32,
        None => defaults.count,
    };
    if count == 0 || depth == 0.0 {
        return Ok(());
    }
    model.add_louvers(count, depth)
}

/// A design option that could not be generated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionFailure {
    pub option_no: OptionNo,
    pub label: String,
    pub reason: String,
}

/// Outcome of one materialization pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterializeReport {
    pub output_dir: PathBuf,
    pub options: Vec<DesignOption>,
    pub failures: Vec<OptionFailure>,
}

impl MaterializeReport {
    pub fn total(&self) -> usize {
        self.options.len() + self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// All design options, or an error if any of them failed
    pub fn into_options(self) -> Result<Vec<DesignOption>, MaterializeError> {
        if !self.is_complete() {
            return Err(MaterializeError::Incomplete {
                failed: self.failures.len(),
                total: self.total(),
            });
        }
        Ok(self.options)
    }
}

/// Generates design option files from a base model
pub struct Materializer<'a, M: DesignModel> {
    base: &'a M,
    table: &'a AbbreviationTable,
    louvers: LouverDefaults,
}

impl<'a, M: DesignModel> Materializer<'a, M> {
    pub fn new(base: &'a M, table: &'a AbbreviationTable) -> Self {
        Self {
            base,
            table,
            louvers: LouverDefaults::default(),
        }
    }

    pub fn with_louver_defaults(mut self, louvers: LouverDefaults) -> Self {
        self.louvers = louvers;
        self
    }

    /// Generate one file per combination into `output_dir`, replacing its
    /// previous contents.
    pub fn materialize(
        &self,
        combinations: &[DesignCombination],
        output_dir: &Path,
    ) -> Result<MaterializeReport, MaterializeError> {
        // Names first: a naming problem must not touch the file system
        let mut names = Vec::with_capacity(combinations.len());
        let mut seen = FxHashSet::default();
        for combination in combinations {
            let label = design_label(combination, self.table)?;
            let stem = file_stem(combination, self.table)?;
            if !seen.insert(stem.clone()) {
                return Err(MaterializeError::DuplicateFileName(stem));
            }
            names.push((label, stem));
        }

        let staging = staging_dir(output_dir)?;
        prepare_dir(&staging)?;

        let extension = self.base.extension();
        let mut options = Vec::with_capacity(combinations.len());
        let mut failures = Vec::new();

        for (num, (combination, (label, stem))) in combinations.iter().zip(names).enumerate() {
            let option_no = OptionNo(num);

            // Fresh copy per option so options never see each other's changes
            let mut model = self.base.clone();
            if let Err(e) = apply_combination(&mut model, combination, self.louvers) {
                tracing::warn!(option = num, label = %label, error = %e, "Design option failed");
                failures.push(OptionFailure {
                    option_no,
                    label,
                    reason: e.to_string(),
                });
                continue;
            }

            let file_name = format!("{stem}.{extension}");
            if let Err(source) = model.write(&staging.join(&file_name)) {
                discard(&staging);
                return Err(MaterializeError::Write { option_no, source });
            }

            tracing::debug!(option = num, file = %file_name, "Wrote design option");
            options.push(DesignOption {
                option_no,
                combination: combination.clone(),
                label,
                file_stem: stem,
                artifact: output_dir.join(&file_name),
            });
        }

        if let Err(e) = swap_in(&staging, output_dir) {
            discard(&staging);
            return Err(e);
        }

        tracing::info!(
            written = options.len(),
            failed = failures.len(),
            output_dir = %output_dir.display(),
            "Generated design options"
        );
        Ok(MaterializeReport {
            output_dir: output_dir.to_path_buf(),
            options,
            failures,
        })
    }
}

fn staging_dir(output_dir: &Path) -> Result<PathBuf, MaterializeError> {
    sibling_dir(output_dir, ".staging")
}

fn backup_dir(output_dir: &Path) -> Result<PathBuf, MaterializeError> {
    sibling_dir(output_dir, ".previous")
}

fn sibling_dir(output_dir: &Path, suffix: &str) -> Result<PathBuf, MaterializeError> {
    let name = output_dir
        .file_name()
        .ok_or_else(|| MaterializeError::OutputDirectory {
            path: output_dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "output path has no name"),
        })?;
    let mut sibling = name.to_os_string();
    sibling.push(suffix);
    Ok(output_dir.with_file_name(sibling))
}

/// Create an empty directory, clearing whatever was there
fn prepare_dir(dir: &Path) -> Result<(), MaterializeError> {
    let to_err = |source| MaterializeError::OutputDirectory {
        path: dir.to_path_buf(),
        source,
    };
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(to_err)?;
    }
    fs::create_dir_all(dir).map_err(to_err)
}

/// Move the staged output into place.
///
/// The previous output is renamed aside first and only deleted once the
/// staging directory has taken its place, so a failed rename leaves it intact.
fn swap_in(staging: &Path, output_dir: &Path) -> Result<(), MaterializeError> {
    let to_err = |source| MaterializeError::OutputDirectory {
        path: output_dir.to_path_buf(),
        source,
    };
    let backup = backup_dir(output_dir)?;
    if backup.exists() {
        fs::remove_dir_all(&backup).map_err(to_err)?;
    }

    let had_previous = output_dir.exists();
    if had_previous {
        fs::rename(output_dir, &backup).map_err(to_err)?;
    }
    if let Err(e) = fs::rename(staging, output_dir) {
        if had_previous && let Err(restore) = fs::rename(&backup, output_dir) {
            tracing::error!(
                path = %backup.display(),
                error = %restore,
                "Failed to restore previous design options"
            );
        }
        return Err(to_err(e));
    }

    if had_previous && let Err(e) = fs::remove_dir_all(&backup) {
        tracing::warn!(path = %backup.display(), error = %e, "Failed to remove previous design options");
    }
    Ok(())
}

fn discard(staging: &Path) {
    if let Err(e) = fs::remove_dir_all(staging) {
        tracing::warn!(path = %staging.display(), error = %e, "Failed to remove staging directory");
    }
}
