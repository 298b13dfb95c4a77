//! A single assignment of values to the active parameters.

use serde::{Deserialize, Serialize};

use super::Parameter;

/// One value per active parameter, in product order.
///
/// Produced in bulk by [`crate::ParameterSpace::expand`] and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignCombination {
    values: Vec<(Parameter, f64)>,
}

impl DesignCombination {
    pub(crate) fn from_pairs(values: Vec<(Parameter, f64)>) -> Self {
        Self { values }
    }

    /// Value selected for a parameter, if it is active
    pub fn get(&self, parameter: Parameter) -> Option<f64> {
        self.values
            .iter()
            .find(|(p, _)| *p == parameter)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, parameter: Parameter) -> bool {
        self.get(parameter).is_some()
    }

    /// Active parameters in product order
    pub fn parameters(&self) -> impl Iterator<Item = Parameter> + '_ {
        self.values.iter().map(|(p, _)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Parameter, f64)> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
