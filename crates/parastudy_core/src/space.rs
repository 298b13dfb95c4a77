//! Expansion of selected parameter values into design combinations.
//!
//! Combinations are enumerated in row-major order: the last parameter varies
//! fastest, matching nested loops over the parameters in canonical order.

use serde::{Deserialize, Serialize};

use crate::error::{ConsistencyError, InputError, SpaceError};
use crate::model::{DesignCombination, Parameter, ParameterDefinition};

/// The set of active parameters and their values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpace {
    definitions: Vec<ParameterDefinition>,
}

impl ParameterSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter. Definitions are kept in canonical parameter order.
    pub fn insert(&mut self, definition: ParameterDefinition) -> Result<(), InputError> {
        let parameter = definition.parameter;
        if !parameter.is_supported() {
            return Err(InputError::UnsupportedParameter(parameter));
        }
        if self.contains(parameter) {
            return Err(InputError::DuplicateParameter(parameter));
        }
        let at = self
            .definitions
            .partition_point(|d| d.parameter < parameter);
        self.definitions.insert(at, definition);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, definition: ParameterDefinition) -> Result<Self, InputError> {
        self.insert(definition)?;
        Ok(self)
    }

    pub fn contains(&self, parameter: Parameter) -> bool {
        self.definitions.iter().any(|d| d.parameter == parameter)
    }

    pub fn definitions(&self) -> &[ParameterDefinition] {
        &self.definitions
    }

    pub fn ndim(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Number of values per parameter
    pub fn shape(&self) -> Vec<usize> {
        self.definitions.iter().map(ParameterDefinition::len).collect()
    }

    /// Product of the per-parameter value counts (1 for an empty space)
    pub fn total_runs(&self) -> usize {
        self.definitions.iter().map(ParameterDefinition::len).product()
    }

    /// Every combination of one value per parameter, in product order.
    ///
    /// An empty space is rejected rather than yielding a single empty
    /// combination.
    pub fn expand(&self) -> Result<Vec<DesignCombination>, SpaceError> {
        if self.is_empty() {
            return Err(InputError::NoParametersSelected.into());
        }

        let expected = self.total_runs();
        let mut combinations = Vec::with_capacity(expected);
        for indices in ProductIndices::new(self.shape()) {
            let values = self
                .definitions
                .iter()
                .zip(&indices)
                .map(|(def, &i)| (def.parameter, def.values()[i]))
                .collect();
            combinations.push(DesignCombination::from_pairs(values));
        }

        if combinations.len() != expected {
            tracing::error!(
                expected,
                actual = combinations.len(),
                "Design combination count mismatch"
            );
            return Err(ConsistencyError::CombinationCount {
                expected,
                actual: combinations.len(),
            }
            .into());
        }
        tracing::debug!(total_runs = expected, "Expanded parameter space");
        Ok(combinations)
    }
}

/// Iterator over all index tuples of a shape in row-major order
struct ProductIndices {
    shape: Vec<usize>,
    current: Vec<usize>,
    done: bool,
}

impl ProductIndices {
    fn new(shape: Vec<usize>) -> Self {
        let done = shape.iter().any(|&n| n == 0);
        Self {
            current: vec![0; shape.len()],
            shape,
            done,
        }
    }
}

impl Iterator for ProductIndices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current.clone();

        // Last dimension varies fastest
        self.done = true;
        for i in (0..self.shape.len()).rev() {
            self.current[i] += 1;
            if self.current[i] < self.shape[i] {
                self.done = false;
                break;
            }
            self.current[i] = 0;
        }

        Some(result)
    }
}
