use parastudy_core::{AbbreviationTable, HbModel, MaterializeReport, Materializer};

use crate::app::App;
use crate::state::{OptionsState, Step, StepError};

/// Generate one model file per design combination.
///
/// A pass where some options failed replaces the output directory but
/// leaves the study without options; the report lists what failed.
pub fn generate_options(app: &mut App) -> Result<MaterializeReport, StepError> {
    let model_path = app.context.require_model()?.path.clone();
    let combinations = &app.context.require_parameters()?.combinations;

    let base = HbModel::from_path(&model_path)?;
    let table = AbbreviationTable::standard();
    let output_dir = app.directory.options_dir();
    let report = Materializer::new(&base, &table)
        .with_louver_defaults(app.config.louvers)
        .materialize(combinations, &output_dir)?;

    if report.is_complete() {
        app.context.set_options(OptionsState {
            output_dir,
            options: report.options.clone(),
        });
    } else {
        app.context.clear_from(Step::Options);
    }
    app.save()?;

    Ok(report)
}
