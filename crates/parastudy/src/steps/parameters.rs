use parastudy_core::{Parameter, ParameterDefinition, ParameterSpace};

use crate::app::App;
use crate::state::{ParametersState, Selection, StepError};

#[derive(Debug, Clone, PartialEq)]
pub struct ParametersSummary {
    pub values: Vec<(Parameter, Vec<f64>)>,
    pub total_runs: usize,
}

/// Expand the selected ranges into design combinations.
pub fn select_parameters(
    app: &mut App,
    selections: &[Selection],
) -> Result<ParametersSummary, StepError> {
    app.context.require_model()?;

    let mut space = ParameterSpace::new();
    for selection in selections {
        space.insert(ParameterDefinition::from_range(
            selection.parameter,
            &selection.range,
        )?)?;
    }
    let combinations = space.expand()?;

    let summary = ParametersSummary {
        values: space
            .definitions()
            .iter()
            .map(|d| (d.parameter, d.values().to_vec()))
            .collect(),
        total_runs: combinations.len(),
    };

    app.context.set_parameters(ParametersState {
        selections: selections.to_vec(),
        space,
        combinations,
    });
    app.save()?;

    tracing::info!(
        parameters = summary.values.len(),
        total_runs = summary.total_runs,
        "Selected parameters"
    );
    Ok(summary)
}
