//! Display labels and file names for design combinations.

use crate::error::InputError;
use crate::model::{AbbreviationTable, DesignCombination, Parameter};

/// Pairs of the combination in the table's canonical order
fn ordered_pairs<'a>(
    combination: &DesignCombination,
    table: &'a AbbreviationTable,
) -> Result<Vec<(Parameter, &'a str, f64)>, InputError> {
    let mut pairs = Vec::with_capacity(combination.len());
    for (parameter, value) in combination.iter() {
        let position = table
            .position(parameter)
            .ok_or(InputError::MissingAbbreviation(parameter))?;
        let abbrev = table
            .abbreviation(parameter)
            .ok_or(InputError::MissingAbbreviation(parameter))?;
        pairs.push((position, parameter, abbrev, value));
    }
    pairs.sort_by_key(|(position, ..)| *position);
    Ok(pairs.into_iter().map(|(_, p, a, v)| (p, a, v)).collect())
}

/// Human readable label, e.g. `Window to wall ratio:0.4, Louver count:2`
pub fn design_label(
    combination: &DesignCombination,
    table: &AbbreviationTable,
) -> Result<String, InputError> {
    Ok(ordered_pairs(combination, table)?
        .into_iter()
        .map(|(p, _, v)| format!("{}:{}", p.display_name(), p.format_value(v)))
        .collect::<Vec<_>>()
        .join(", "))
}

/// File-system safe stem, e.g. `wwr_0.4__lc_2`
pub fn file_stem(
    combination: &DesignCombination,
    table: &AbbreviationTable,
) -> Result<String, InputError> {
    Ok(ordered_pairs(combination, table)?
        .into_iter()
        .map(|(p, abbrev, v)| format!("{}_{}", abbrev, p.format_value(v)))
        .collect::<Vec<_>>()
        .join("__"))
}
