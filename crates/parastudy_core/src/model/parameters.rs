//! Design parameters and the abbreviation table used for file names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::range::RangeSpec;

/// A design parameter the study can vary.
///
/// Declaration order is the canonical order used for product iteration,
/// labels and file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    WindowToWallRatio,
    LouverCount,
    LouverDepth,
    WallRValue,
    RoofRValue,
}

/// How a parameter's values are interpreted and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Fraction in `[0, 1)`, entered as integer percent
    Ratio,
    /// Whole number
    Count,
    /// Length in meters with one decimal place
    Length,
    /// Thermal resistance
    Resistance,
}

impl Parameter {
    pub const ALL: [Parameter; 5] = [
        Parameter::WindowToWallRatio,
        Parameter::LouverCount,
        Parameter::LouverDepth,
        Parameter::WallRValue,
        Parameter::RoofRValue,
    ];

    /// Name shown to the user and used in display labels
    pub fn display_name(&self) -> &'static str {
        match self {
            Parameter::WindowToWallRatio => "Window to wall ratio",
            Parameter::LouverCount => "Louver count",
            Parameter::LouverDepth => "Louver depth",
            Parameter::WallRValue => "Wall R value",
            Parameter::RoofRValue => "Roof R value",
        }
    }

    /// Short name used in generated file names
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Parameter::WindowToWallRatio => "wwr",
            Parameter::LouverCount => "lc",
            Parameter::LouverDepth => "ld",
            Parameter::WallRValue => "wr",
            Parameter::RoofRValue => "rr",
        }
    }

    /// Argument name in job submission payloads
    pub fn argument_name(&self) -> &'static str {
        match self {
            Parameter::WindowToWallRatio => "window-to-wall-ratio",
            Parameter::LouverCount => "louver-count",
            Parameter::LouverDepth => "louver-depth",
            Parameter::WallRValue => "wall-r-value",
            Parameter::RoofRValue => "roof-r-value",
        }
    }

    /// Axis label for result plots
    pub fn plot_label(&self) -> &'static str {
        match self {
            Parameter::WindowToWallRatio => "WWR",
            Parameter::LouverCount => "Louver count",
            Parameter::LouverDepth => "Louver depth",
            Parameter::WallRValue => "Wall R value",
            Parameter::RoofRValue => "Roof R value",
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Parameter::WindowToWallRatio => ValueKind::Ratio,
            Parameter::LouverCount => ValueKind::Count,
            Parameter::LouverDepth => ValueKind::Length,
            Parameter::WallRValue | Parameter::RoofRValue => ValueKind::Resistance,
        }
    }

    /// Whether design options can currently be generated for this parameter
    pub fn is_supported(&self) -> bool {
        !matches!(self, Parameter::WallRValue | Parameter::RoofRValue)
    }

    /// Render a value the way it appears in labels and file names.
    ///
    /// Counts render as integers (`2`); everything else renders in shortest
    /// round-trip form with at least one decimal (`0.4`, `1.0`).
    pub fn format_value(&self, value: f64) -> String {
        match self.kind() {
            ValueKind::Count => format!("{}", value.round() as i64),
            _ => format_real(value),
        }
    }

    /// Value as it is sent in job arguments
    pub fn argument_value(&self, value: f64) -> serde_json::Value {
        match self.kind() {
            ValueKind::Count => serde_json::Value::from(value.round() as i64),
            _ => serde_json::Value::from(value),
        }
    }

    /// Convert a user-entered range into this parameter's values.
    ///
    /// Window to wall ratio ranges are given in percent and come back as
    /// ratios; louver depth is kept to one decimal place. Bounds or steps
    /// finer than that are rejected rather than rounded.
    pub fn values_from_range(&self, range: &RangeSpec) -> Result<Vec<f64>, InputError> {
        if !self.is_supported() {
            return Err(InputError::UnsupportedParameter(*self));
        }
        let range = match self.kind() {
            ValueKind::Ratio | ValueKind::Count => range.with_decimals(0),
            ValueKind::Length => range.with_decimals(1),
            ValueKind::Resistance => *range,
        };
        let values = range.values(self.display_name())?;
        Ok(match self.kind() {
            ValueKind::Ratio => values.into_iter().map(|pct| pct / 100.0).collect(),
            _ => values,
        })
    }
}

fn format_real(value: f64) -> String {
    let text = format!("{value}");
    if text.contains('.') || !value.is_finite() {
        text
    } else {
        format!("{text}.0")
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Parameter {
    type Err = InputError;

    /// Accepts the display name, abbreviation or argument name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Parameter::ALL
            .into_iter()
            .find(|p| {
                p.display_name().eq_ignore_ascii_case(needle)
                    || p.abbreviation() == needle
                    || p.argument_name() == needle
            })
            .ok_or_else(|| InputError::UnknownParameter(s.to_string()))
    }
}

/// Ordered mapping from parameter to file-name abbreviation.
///
/// Entry order defines the canonical order of pairs in labels and file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbbreviationTable {
    entries: Vec<(Parameter, String)>,
}

impl AbbreviationTable {
    /// Build a table, rejecting repeated parameters or abbreviations
    pub fn new<I, S>(entries: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (Parameter, S)>,
        S: Into<String>,
    {
        let mut table: Vec<(Parameter, String)> = Vec::new();
        for (parameter, abbrev) in entries {
            let abbrev = abbrev.into();
            if table.iter().any(|(p, _)| *p == parameter) {
                return Err(InputError::DuplicateParameter(parameter));
            }
            if table.iter().any(|(_, a)| *a == abbrev) {
                return Err(InputError::DuplicateAbbreviation(abbrev));
            }
            table.push((parameter, abbrev));
        }
        Ok(Self { entries: table })
    }

    /// `wwr`, `lc`, `ld`, `wr`, `rr` in declaration order
    pub fn standard() -> Self {
        Self {
            entries: Parameter::ALL
                .into_iter()
                .map(|p| (p, p.abbreviation().to_string()))
                .collect(),
        }
    }

    pub fn abbreviation(&self, parameter: Parameter) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| *p == parameter)
            .map(|(_, a)| a.as_str())
    }

    /// Position of a parameter in canonical order
    pub fn position(&self, parameter: Parameter) -> Option<usize> {
        self.entries.iter().position(|(p, _)| *p == parameter)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Parameter, &str)> {
        self.entries.iter().map(|(p, a)| (*p, a.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AbbreviationTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// One parameter with its selected values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub parameter: Parameter,
    values: Vec<f64>,
}

impl ParameterDefinition {
    /// Create a definition. Repeated values are dropped, keeping the first
    /// occurrence; an empty list is rejected.
    pub fn new(parameter: Parameter, values: Vec<f64>) -> Result<Self, InputError> {
        let mut unique: Vec<f64> = Vec::with_capacity(values.len());
        for value in values {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        if unique.is_empty() {
            return Err(InputError::EmptyValues(parameter));
        }
        Ok(Self {
            parameter,
            values: unique,
        })
    }

    /// Create a definition from a user-entered range
    pub fn from_range(parameter: Parameter, range: &RangeSpec) -> Result<Self, InputError> {
        Self::new(parameter, parameter.values_from_range(range)?)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_matches_kind() {
        assert_eq!(Parameter::WindowToWallRatio.format_value(0.4), "0.4");
        assert_eq!(Parameter::LouverCount.format_value(2.0), "2");
        assert_eq!(Parameter::LouverDepth.format_value(1.0), "1.0");
        assert_eq!(Parameter::LouverDepth.format_value(0.5), "0.5");
    }

    #[test]
    fn test_parse_parameter_names() {
        assert_eq!(
            "Window to wall ratio".parse::<Parameter>().unwrap(),
            Parameter::WindowToWallRatio
        );
        assert_eq!("lc".parse::<Parameter>().unwrap(), Parameter::LouverCount);
        assert_eq!(
            "louver-depth".parse::<Parameter>().unwrap(),
            Parameter::LouverDepth
        );
        assert!(matches!(
            "shade".parse::<Parameter>(),
            Err(InputError::UnknownParameter(_))
        ));
    }

    #[test]
    fn test_table_rejects_duplicates() {
        let err = AbbreviationTable::new([
            (Parameter::WindowToWallRatio, "w"),
            (Parameter::LouverCount, "w"),
        ])
        .unwrap_err();
        assert_eq!(err, InputError::DuplicateAbbreviation("w".to_string()));

        let err = AbbreviationTable::new([
            (Parameter::LouverCount, "a"),
            (Parameter::LouverCount, "b"),
        ])
        .unwrap_err();
        assert_eq!(err, InputError::DuplicateParameter(Parameter::LouverCount));
    }

    #[test]
    fn test_standard_table_order() {
        let table = AbbreviationTable::standard();
        let abbrevs: Vec<&str> = table.iter().map(|(_, a)| a).collect();
        assert_eq!(abbrevs, vec!["wwr", "lc", "ld", "wr", "rr"]);
        assert_eq!(table.position(Parameter::LouverDepth), Some(2));
    }

    #[test]
    fn test_definition_dedups_and_rejects_empty() {
        let def = ParameterDefinition::new(Parameter::LouverCount, vec![1.0, 2.0, 1.0]).unwrap();
        assert_eq!(def.values(), &[1.0, 2.0]);

        let err = ParameterDefinition::new(Parameter::LouverCount, vec![]).unwrap_err();
        assert_eq!(err, InputError::EmptyValues(Parameter::LouverCount));
    }

    #[test]
    fn test_r_values_are_unsupported() {
        let range = RangeSpec::new(1.0, 3.0, 1.0);
        let err = ParameterDefinition::from_range(Parameter::WallRValue, &range).unwrap_err();
        assert_eq!(err, InputError::UnsupportedParameter(Parameter::WallRValue));
    }
}
