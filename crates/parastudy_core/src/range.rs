//! Numeric range construction for parameter values.
//!
//! Ranges are stepped on integers: a decimal range is scaled by
//! `10^decimals`, stepped, then scaled back, so `0.1` steps never accumulate
//! binary floating-point drift.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Upper bound on the number of values a single range may produce
pub const MAX_RANGE_VALUES: usize = 10_000;

/// Values from `min` to `max` (inclusive when reachable) in `step` increments.
///
/// `max` is part of the output exactly when `max - min` is divisible by `step`.
pub fn range_values(min: i64, max: i64, step: i64) -> Result<Vec<i64>, InputError> {
    checked_range("range", min, max, step)
}

fn checked_range(name: &str, min: i64, max: i64, step: i64) -> Result<Vec<i64>, InputError> {
    if step <= 0 {
        return Err(InputError::NonPositiveStep {
            parameter: name.to_string(),
            step: step as f64,
        });
    }
    if max < min {
        return Err(InputError::InvertedRange {
            parameter: name.to_string(),
            min: min as f64,
            max: max as f64,
        });
    }
    let too_many = || InputError::TooManyValues {
        parameter: name.to_string(),
        limit: MAX_RANGE_VALUES,
    };
    let count = max
        .checked_sub(min)
        .map(|span| span / step)
        .and_then(|n| usize::try_from(n).ok())
        .and_then(|n| n.checked_add(1))
        .ok_or_else(too_many)?;
    if count > MAX_RANGE_VALUES {
        return Err(too_many());
    }
    Ok((0..count as i64).map(|i| min + i * step).collect())
}

/// A `min`/`max`/`step` selection with a fixed number of decimal places
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    #[serde(default)]
    pub decimals: u32,
}

impl RangeSpec {
    /// Integer range (no decimal places)
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self {
            min,
            max,
            step,
            decimals: 0,
        }
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    fn scale(&self) -> f64 {
        10f64.powi(self.decimals as i32)
    }

    /// Expand the range. `name` is only used in error messages.
    pub fn values(&self, name: &str) -> Result<Vec<f64>, InputError> {
        if self.step <= 0.0 || !self.step.is_finite() {
            return Err(InputError::NonPositiveStep {
                parameter: name.to_string(),
                step: self.step,
            });
        }
        if self.max < self.min {
            return Err(InputError::InvertedRange {
                parameter: name.to_string(),
                min: self.min,
                max: self.max,
            });
        }

        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(InputError::NonFiniteRange {
                parameter: name.to_string(),
            });
        }

        let scale = self.scale();
        let mut scaled = [0i64; 3];
        for (slot, value) in scaled.iter_mut().zip([self.min, self.max, self.step]) {
            let v = value * scale;
            if (v - v.round()).abs() > 1e-6 * v.abs().max(1.0) {
                return Err(InputError::TooPrecise {
                    parameter: name.to_string(),
                    decimals: self.decimals,
                });
            }
            // Saturates for huge bounds; the value count check rejects those
            *slot = v.round() as i64;
        }
        let [min, max, step] = scaled;
        let scaled = checked_range(name, min, max, step)?;
        Ok(scaled.into_iter().map(|v| v as f64 / scale).collect())
    }
}

impl FromStr for RangeSpec {
    type Err = InputError;

    /// Parse `min:max:step`. A single number selects just that value.
    /// Decimal places are taken from the most precise part.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InputError::MalformedRange(s.to_string());
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let parts = match parts.as_slice() {
            [single] => vec![*single, *single, "1"],
            [_, _, _] => parts,
            _ => return Err(malformed()),
        };

        let mut numbers = [0.0; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part.parse::<f64>().map_err(|_| malformed())?;
        }
        let decimals = parts
            .iter()
            .map(|p| p.split_once('.').map_or(0, |(_, frac)| frac.len() as u32))
            .max()
            .unwrap_or(0);

        Ok(RangeSpec::new(numbers[0], numbers[1], numbers[2]).with_decimals(decimals))
    }
}
