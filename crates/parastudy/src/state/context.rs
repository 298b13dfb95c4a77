//! Typed study context shared by the wizard steps.
//!
//! Each step reads the fields it depends on and writes its own. Writing a
//! step's field clears every field downstream of it, so a later step can
//! never see data derived from an older input.

use std::path::PathBuf;

use jiff::Timestamp;
use parastudy_core::{
    CachedResults, DesignCombination, DesignOption, JobRef, Parameter, ParameterSpace, RangeSpec,
    ResultTable, SimulationInputs,
};
use serde::{Deserialize, Serialize};

use super::errors::{Step, StepError};

/// The loaded base model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    /// Where the user loaded it from
    pub source: PathBuf,
    /// Copy inside the data directory
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub loaded_at: Timestamp,
}

/// A range the user entered for one parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub parameter: Parameter,
    pub range: RangeSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametersState {
    pub selections: Vec<Selection>,
    pub space: ParameterSpace,
    pub combinations: Vec<DesignCombination>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsState {
    pub output_dir: PathBuf,
    pub options: Vec<DesignOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionState {
    pub job: JobRef,
    pub url: String,
    /// Unknown when the job was attached by URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<SimulationInputs>,
    pub option_count: usize,
    pub submitted_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ParametersState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionsState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission: Option<SubmissionState>,
    #[serde(default)]
    pub results: CachedResults<ResultTable>,
}

impl StudyContext {
    pub fn set_model(&mut self, model: ModelState) {
        self.clear_from(Step::Model);
        self.model = Some(model);
    }

    pub fn set_parameters(&mut self, parameters: ParametersState) {
        self.clear_from(Step::Parameters);
        self.parameters = Some(parameters);
    }

    pub fn set_options(&mut self, options: OptionsState) {
        self.clear_from(Step::Options);
        self.options = Some(options);
    }

    pub fn set_submission(&mut self, submission: SubmissionState) {
        self.clear_from(Step::Submit);
        self.submission = Some(submission);
    }

    /// Clear the field written by `step` and everything downstream of it
    pub fn clear_from(&mut self, step: Step) {
        if step <= Step::Model {
            self.model = None;
        }
        if step <= Step::Parameters {
            self.parameters = None;
        }
        if step <= Step::Options {
            self.options = None;
        }
        if step <= Step::Submit {
            self.submission = None;
        }
        self.results.invalidate();
    }

    pub fn require_model(&self) -> Result<&ModelState, StepError> {
        self.model
            .as_ref()
            .ok_or(StepError::MissingPrerequisite(Step::Model))
    }

    pub fn require_parameters(&self) -> Result<&ParametersState, StepError> {
        self.parameters
            .as_ref()
            .ok_or(StepError::MissingPrerequisite(Step::Parameters))
    }

    pub fn require_options(&self) -> Result<&OptionsState, StepError> {
        self.options
            .as_ref()
            .ok_or(StepError::MissingPrerequisite(Step::Options))
    }

    pub fn require_submission(&self) -> Result<&SubmissionState, StepError> {
        self.submission
            .as_ref()
            .ok_or(StepError::MissingPrerequisite(Step::Submit))
    }

    pub fn is_done(&self, step: Step) -> bool {
        match step {
            Step::Model => self.model.is_some(),
            Step::Parameters => self.parameters.is_some(),
            Step::Options => self.options.is_some(),
            Step::Submit => self.submission.is_some(),
            Step::Results => self.results.key().is_some(),
        }
    }

    /// Each step with whether it has been completed
    pub fn progress(&self) -> Vec<(Step, bool)> {
        Step::ALL.iter().map(|&s| (s, self.is_done(s))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parastudy_core::{JobId, ResultKey, SimStatus};

    fn model_state() -> ModelState {
        ModelState {
            source: PathBuf::from("box.hbjson"),
            path: PathBuf::from("model/box.hbjson"),
            identifier: Some("Box".to_string()),
            loaded_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn full_context() -> StudyContext {
        let mut ctx = StudyContext::default();
        ctx.set_model(model_state());
        ctx.set_parameters(ParametersState {
            selections: vec![],
            space: ParameterSpace::new(),
            combinations: vec![],
        });
        ctx.set_options(OptionsState {
            output_dir: PathBuf::from("design_options"),
            options: vec![],
        });
        ctx.set_submission(SubmissionState {
            job: JobRef {
                owner: "ladybug".to_string(),
                project: "demo".to_string(),
                id: JobId("abc".to_string()),
            },
            url: "https://app.pollination.cloud/ladybug/projects/demo/jobs/abc".to_string(),
            inputs: Some(SimulationInputs::new(
                PathBuf::from("a.epw"),
                PathBuf::from("a.ddy"),
            )),
            option_count: 0,
            submitted_at: Timestamp::UNIX_EPOCH,
        });
        ctx.results.set(
            ResultKey::new(JobId("abc".to_string()), SimStatus::Complete),
            ResultTable::default(),
        );
        ctx
    }

    #[test]
    fn test_new_model_clears_downstream() {
        let mut ctx = full_context();
        assert!(ctx.progress().iter().all(|(_, done)| *done));

        ctx.set_model(model_state());
        assert!(ctx.is_done(Step::Model));
        assert!(!ctx.is_done(Step::Parameters));
        assert!(!ctx.is_done(Step::Options));
        assert!(!ctx.is_done(Step::Submit));
        assert!(!ctx.is_done(Step::Results));
    }

    #[test]
    fn test_new_options_keep_upstream() {
        let mut ctx = full_context();
        ctx.set_options(OptionsState {
            output_dir: PathBuf::from("design_options"),
            options: vec![],
        });

        assert!(ctx.is_done(Step::Model));
        assert!(ctx.is_done(Step::Parameters));
        assert!(ctx.is_done(Step::Options));
        assert!(ctx.submission.is_none());
        assert!(ctx.results.key().is_none());
    }

    #[test]
    fn test_missing_prerequisite_names_step() {
        let ctx = StudyContext::default();
        let err = ctx.require_parameters().unwrap_err();
        assert!(matches!(err, StepError::MissingPrerequisite(Step::Parameters)));
        assert!(err.to_string().contains("parastudy params"));
    }

    #[test]
    fn test_context_yaml_round_trip() {
        let ctx = full_context();
        let yaml = serde_saphyr::to_string(&ctx).unwrap();
        let back: StudyContext = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(back, ctx);
    }
}
